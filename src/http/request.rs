//! # Lectura de Requests HTTP/1.1
//! src/http/request.rs
//!
//! Este módulo implementa el lector de requests desde cero, directamente
//! sobre un stream de bytes (normalmente el `TcpStream` de la conexión).
//!
//! ## Formato de un Request
//!
//! ```text
//! POST /files/notas.txt HTTP/1.1\r\n
//! Host: localhost:4221\r\n
//! Content-Length: 5\r\n
//! \r\n
//! hello
//! ```
//!
//! ## Componentes
//!
//! 1. **Head block**: request line + headers, terminado por una línea vacía.
//!    Se acepta `\r\n` o `\n` solo como fin de línea.
//! 2. **Body**: exactamente `Content-Length` bytes. Si el stream se cierra antes,
//!    el body queda truncado (no es un error).
//!
//! Los nombres de header son sensibles a mayúsculas: `user-agent` y
//! `User-Agent` son claves distintas.

use std::collections::HashMap;
use std::io::{BufRead, Read};

use thiserror::Error;

/// Longitud máxima de una línea del head block, incluyendo el terminador
pub const MAX_LINE_LEN: usize = 64 * 1024;

/// Cantidad máxima de líneas en el head block (request line + headers)
pub const MAX_HEAD_LINES: usize = 128;

/// Método HTTP tal como aparece en la request line
///
/// Los métodos comunes tienen su propia variante; cualquier otro token se
/// conserva textual en `Other`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Method {
    GET,
    HEAD,
    POST,
    PUT,
    DELETE,
    /// Token no reconocido (o vacío, en un request sin líneas)
    Other(String),
}

impl Method {
    /// Parsea un método HTTP desde un string. Nunca falla.
    pub fn parse(s: &str) -> Self {
        match s {
            "GET" => Method::GET,
            "HEAD" => Method::HEAD,
            "POST" => Method::POST,
            "PUT" => Method::PUT,
            "DELETE" => Method::DELETE,
            other => Method::Other(other.to_string()),
        }
    }

    /// Convierte el método a string
    pub fn as_str(&self) -> &str {
        match self {
            Method::GET => "GET",
            Method::HEAD => "HEAD",
            Method::POST => "POST",
            Method::PUT => "PUT",
            Method::DELETE => "DELETE",
            Method::Other(s) => s,
        }
    }
}

impl Default for Method {
    fn default() -> Self {
        Method::Other(String::new())
    }
}

impl std::fmt::Display for Method {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Representa un request HTTP parseado
///
/// `Request::default()` es el request "vacío" que se produce cuando el
/// cliente cierra la conexión sin enviar ninguna línea.
#[derive(Debug, Clone, Default)]
pub struct Request {
    /// Método HTTP (GET, POST, ...)
    method: Method,

    /// Segmentos no vacíos del target (ej: "/files/a/b" → ["files", "a", "b"]).
    /// La raíz "/" es la lista vacía.
    path: Vec<String>,

    /// Versión HTTP textual (no se valida)
    version: String,

    /// Headers HTTP; la última ocurrencia de un nombre gana
    headers: HashMap<String, String>,

    /// Body crudo, a lo sumo `Content-Length` bytes
    body: Vec<u8>,
}

/// Errores que pueden ocurrir durante la lectura del request
#[derive(Debug, Error)]
pub enum ParseError {
    /// La request line no tiene exactamente `METHOD TARGET VERSION`
    #[error("Invalid request line: {0:?}")]
    InvalidRequestLine(String),

    /// El target no empieza con '/'
    #[error("Invalid request target: {0:?}")]
    InvalidTarget(String),

    /// Header sin ':'
    #[error("Invalid header: {0:?}")]
    InvalidHeader(String),

    /// El head block no es UTF-8 válido
    #[error("Request head is not valid UTF-8")]
    InvalidEncoding,

    /// Línea demasiado larga o demasiados headers
    #[error("Request head too large")]
    HeadTooLarge,

    /// Falla de lectura del socket
    #[error("I/O error while reading request: {0}")]
    Io(#[from] std::io::Error),
}

impl Request {
    /// Lee un request completo desde un stream con buffer
    ///
    /// Lee líneas hasta encontrar una línea vacía (o EOF), parsea la request
    /// line y los headers, y luego lee el body según `Content-Length`.
    ///
    /// # Ejemplo
    ///
    /// ```
    /// use minihttp::http::Request;
    ///
    /// let mut raw: &[u8] = b"GET /echo/abc HTTP/1.1\r\nHost: localhost\r\n\r\n";
    /// let request = Request::read_from(&mut raw).unwrap();
    ///
    /// assert_eq!(request.route(), Some("echo"));
    /// assert_eq!(request.header("Host"), Some("localhost"));
    /// ```
    pub fn read_from<R: BufRead>(reader: &mut R) -> Result<Self, ParseError> {
        let lines = Self::read_head_block(reader)?;

        // Stream cerrado sin ninguna línea
        if lines.is_empty() {
            return Ok(Request::default());
        }

        let (method, path, version) = Self::parse_request_line(&lines[0])?;
        let headers = Self::parse_headers(&lines[1..])?;

        let mut request = Request {
            method,
            path,
            version,
            headers,
            body: Vec::new(),
        };

        if let Some(length) = request.content_length() {
            request.body = Self::read_body(reader, length)?;
        }

        Ok(request)
    }

    /// Parsea un request desde un buffer en memoria
    ///
    /// # Ejemplo
    ///
    /// ```
    /// use minihttp::http::Request;
    ///
    /// let request = Request::parse(b"GET /files/a/b HTTP/1.1\r\n\r\n").unwrap();
    /// assert_eq!(request.path(), ["files", "a", "b"]);
    /// ```
    pub fn parse(mut buffer: &[u8]) -> Result<Self, ParseError> {
        Self::read_from(&mut buffer)
    }

    /// Lee las líneas del head block, sin terminadores
    ///
    /// La línea vacía que cierra el bloque no se incluye. Cada línea se lee
    /// con un tope de `MAX_LINE_LEN` bytes y el bloque con `MAX_HEAD_LINES`
    /// líneas.
    fn read_head_block<R: BufRead>(reader: &mut R) -> Result<Vec<String>, ParseError> {
        let mut lines = Vec::new();
        let mut raw = Vec::new();

        loop {
            raw.clear();
            let limit = MAX_LINE_LEN as u64 + 1;
            if reader.by_ref().take(limit).read_until(b'\n', &mut raw)? == 0 {
                break;
            }

            if raw.len() > MAX_LINE_LEN {
                return Err(ParseError::HeadTooLarge);
            }

            let line = strip_line_ending(&raw);
            if line.is_empty() {
                break;
            }

            if lines.len() == MAX_HEAD_LINES {
                return Err(ParseError::HeadTooLarge);
            }

            let line = std::str::from_utf8(line).map_err(|_| ParseError::InvalidEncoding)?;
            lines.push(line.to_string());
        }

        Ok(lines)
    }

    /// Parsea la request line
    ///
    /// Formato: `GET /path HTTP/1.1`, separado por espacios simples.
    fn parse_request_line(line: &str) -> Result<(Method, Vec<String>, String), ParseError> {
        let parts: Vec<&str> = line.split(' ').collect();

        if parts.len() != 3 {
            return Err(ParseError::InvalidRequestLine(line.to_string()));
        }

        let target = parts[1];
        if !target.starts_with('/') {
            return Err(ParseError::InvalidTarget(target.to_string()));
        }

        let path = target
            .split('/')
            .filter(|segment| !segment.is_empty())
            .map(str::to_string)
            .collect();

        Ok((Method::parse(parts[0]), path, parts[2].to_string()))
    }

    /// Parsea los headers HTTP
    ///
    /// Cada header tiene formato "Name: Value". Se corta en el primer ':',
    /// así `Host: localhost:4221` conserva el puerto.
    fn parse_headers(lines: &[String]) -> Result<HashMap<String, String>, ParseError> {
        let mut headers = HashMap::new();

        for line in lines {
            match line.split_once(':') {
                Some((name, value)) => {
                    headers.insert(name.to_string(), value.trim().to_string());
                }
                None => return Err(ParseError::InvalidHeader(line.clone())),
            }
        }

        Ok(headers)
    }

    /// Lee hasta `length` bytes; un EOF temprano trunca el body sin error
    fn read_body<R: Read>(reader: &mut R, length: usize) -> Result<Vec<u8>, ParseError> {
        let mut body = Vec::new();
        reader.take(length as u64).read_to_end(&mut body)?;

        if body.len() < length {
            log::debug!("Body truncado: {} de {} bytes", body.len(), length);
        }

        Ok(body)
    }

    // === Métodos públicos para acceder a los campos ===

    /// Obtiene el método HTTP del request
    pub fn method(&self) -> &Method {
        &self.method
    }

    /// Segmentos del path
    pub fn path(&self) -> &[String] {
        &self.path
    }

    /// Primer segmento del path (la clave de ruteo); `None` para la raíz
    pub fn route(&self) -> Option<&str> {
        self.path.first().map(String::as_str)
    }

    /// Segmentos después del primero
    pub fn tail(&self) -> &[String] {
        self.path.get(1..).unwrap_or_default()
    }

    /// Target reconstruido a partir de los segmentos (para logs)
    pub fn target(&self) -> String {
        format!("/{}", self.path.join("/"))
    }

    /// Obtiene la versión HTTP
    pub fn version(&self) -> &str {
        &self.version
    }

    /// Obtiene todos los headers
    pub fn headers(&self) -> &HashMap<String, String> {
        &self.headers
    }

    /// Obtiene un header específico (sensible a mayúsculas)
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).map(|s| s.as_str())
    }

    /// `Content-Length` declarado, solo si es un número positivo
    pub fn content_length(&self) -> Option<usize> {
        self.header("Content-Length")
            .and_then(|value| value.parse::<usize>().ok())
            .filter(|length| *length > 0)
    }

    /// Obtiene el body del request
    pub fn body(&self) -> &[u8] {
        &self.body
    }

    /// `true` si es el request vacío de una conexión sin datos
    pub fn is_empty(&self) -> bool {
        self.method.as_str().is_empty() && self.path.is_empty()
    }
}

/// Quita `\n` y, si existe, el `\r` anterior
fn strip_line_ending(line: &[u8]) -> &[u8] {
    let line = line.strip_suffix(b"\n").unwrap_or(line);
    line.strip_suffix(b"\r").unwrap_or(line)
}
