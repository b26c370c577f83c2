//! # Construcción de Respuestas HTTP
//!
//! Este módulo proporciona una API para construir respuestas HTTP/1.1
//! de forma programática y convertirlas a bytes para enviar al cliente.
//!
//! ## Formato de una respuesta
//!
//! ```text
//! HTTP/1.1 200 OK\r\n
//! Content-Type: text/plain\r\n
//! Content-Length: 5\r\n
//! \r\n
//! a/b/c
//! ```
//!
//! El orden de los headers no está especificado. El body va tal cual, sin
//! terminador final.
//!
//! ## Ejemplo de uso
//!
//! ```
//! use minihttp::http::{Response, StatusCode};
//!
//! let response = Response::new(StatusCode::Ok)
//!     .with_header("Content-Type", "text/plain")
//!     .with_body("Hello");
//!
//! let bytes = response.to_bytes();
//! assert!(bytes.ends_with(b"\r\n\r\nHello"));
//! ```

use super::{ContentEncoding, StatusCode};
use std::collections::HashMap;
use std::io::Write;

/// Representa una respuesta HTTP/1.1 completa
#[derive(Debug, Clone)]
pub struct Response {
    /// Código de estado HTTP (200, 201, 404, ...)
    status: StatusCode,

    /// Headers HTTP; un nombre repetido se sobrescribe
    headers: HashMap<String, String>,

    /// Cuerpo de la respuesta (puede ser vacío)
    body: Vec<u8>,
}

impl Response {
    /// Crea una nueva respuesta sin headers ni body
    ///
    /// Sin body tampoco hay `Content-Length`.
    pub fn new(status: StatusCode) -> Self {
        Self {
            status,
            headers: HashMap::new(),
            body: Vec::new(),
        }
    }

    /// Agrega un header a la respuesta (si ya existe, se sobrescribe)
    pub fn with_header(mut self, name: &str, value: &str) -> Self {
        self.add_header(name, value);
        self
    }

    /// Agrega un header a una respuesta existente (versión mutable)
    pub fn add_header(&mut self, name: &str, value: &str) {
        self.headers.insert(name.to_string(), value.to_string());
    }

    /// Establece el cuerpo desde un string y calcula `Content-Length`
    ///
    /// Un string vacío produce `Content-Length: 0` explícito.
    pub fn with_body(self, body: &str) -> Self {
        self.with_body_bytes(body.as_bytes().to_vec())
    }

    /// Establece el cuerpo desde bytes y calcula `Content-Length`
    ///
    /// # Ejemplo
    /// ```
    /// use minihttp::http::{Response, StatusCode};
    ///
    /// let response = Response::new(StatusCode::Ok)
    ///     .with_body_bytes(vec![0x00, 0xFF]);
    /// assert_eq!(response.header("Content-Length"), Some("2"));
    /// ```
    pub fn with_body_bytes(mut self, body: Vec<u8>) -> Self {
        self.body = body;
        let length = self.body.len().to_string();
        self.add_header("Content-Length", &length);
        self
    }

    /// Respuesta 200 con `Content-Type: text/plain`
    pub fn text(body: &str) -> Self {
        Self::new(StatusCode::Ok)
            .with_header("Content-Type", "text/plain")
            .with_body(body)
    }

    /// Respuesta 200 con `Content-Type: application/octet-stream`
    pub fn octet_stream(body: Vec<u8>) -> Self {
        Self::new(StatusCode::Ok)
            .with_header("Content-Type", "application/octet-stream")
            .with_body_bytes(body)
    }

    /// Respuesta 404 vacía
    pub fn not_found() -> Self {
        Self::new(StatusCode::NotFound)
    }

    /// Declara la codificación del contenido
    ///
    /// El body no se transforma: solo se agrega `Content-Encoding`.
    pub fn set_encoding(&mut self, encoding: ContentEncoding) {
        self.add_header("Content-Encoding", encoding.as_str());
    }

    /// Convierte la respuesta a bytes listos para enviar por el socket
    ///
    /// - Status line: `HTTP/1.1 200 OK\r\n`
    /// - Headers: `Header-Name: Value\r\n`
    /// - Línea vacía: `\r\n`
    /// - Body: contenido binario
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut result = Vec::with_capacity(64 + self.body.len());

        // 1. Status line
        result.extend_from_slice(format!("HTTP/1.1 {}\r\n", self.status).as_bytes());

        // 2. Headers
        for (name, value) in &self.headers {
            result.extend_from_slice(format!("{}: {}\r\n", name, value).as_bytes());
        }

        // 3. Línea vacía que separa headers del body
        result.extend_from_slice(b"\r\n");

        // 4. Body (si existe)
        result.extend_from_slice(&self.body);

        result
    }

    /// Escribe la respuesta completa en el stream y hace flush
    pub fn write_to<W: Write>(&self, writer: &mut W) -> std::io::Result<()> {
        writer.write_all(&self.to_bytes())?;
        writer.flush()
    }

    /// Obtiene el código de estado de la respuesta
    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// Obtiene una referencia a los headers
    pub fn headers(&self) -> &HashMap<String, String> {
        &self.headers
    }

    /// Obtiene un header específico
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).map(String::as_str)
    }

    /// Obtiene una referencia al body
    pub fn body(&self) -> &[u8] {
        &self.body
    }
}
