//! # Manejo de una Conexión
//! src/server/connection.rs
//!
//! Un intercambio por conexión: leer request → rutear → escribir response →
//! cerrar. No hay keep-alive.
//!
//! `serve_exchange` trabaja sobre cualquier par lector/escritor, así se
//! prueba sin sockets. `handle_tcp` es el adaptador para `TcpStream`.

use std::io::{BufRead, BufReader, Write};
use std::net::{Shutdown, TcpStream};
use std::time::Instant;

use crate::http::{ParseError, Request, Response, StatusCode};
use crate::router::{RouteContext, Router};

/// Lee un request, lo despacha y escribe la respuesta
///
/// Un request malformado se contesta con 400 y cuerpo vacío. Solo los
/// errores de I/O del socket se propagan.
pub fn serve_exchange<R: BufRead, W: Write>(
    reader: &mut R,
    writer: &mut W,
    router: &Router,
    ctx: &RouteContext,
) -> std::io::Result<Response> {
    let response = match Request::read_from(reader) {
        Ok(request) => {
            if request.is_empty() {
                log::debug!("Conexión sin datos");
            } else {
                log::info!("{} {}", request.method(), request.target());
            }
            router.route(&request, ctx)
        }
        Err(ParseError::Io(e)) => return Err(e),
        Err(e) => {
            log::warn!("Request malformado: {}", e);
            Response::new(StatusCode::BadRequest)
        }
    };

    response.write_to(writer)?;
    Ok(response)
}

/// Atiende una conexión TCP completa y la cierra
pub fn handle_tcp(stream: TcpStream, router: &Router, ctx: &RouteContext) -> std::io::Result<()> {
    let start = Instant::now();

    let peer_addr = stream
        .peer_addr()
        .map(|addr| addr.to_string())
        .unwrap_or_else(|_| "unknown".to_string());

    let mut reader = BufReader::new(&stream);
    let mut writer = &stream;
    let response = serve_exchange(&mut reader, &mut writer, router, ctx)?;

    // El peer pudo haber cerrado ya
    let _ = stream.shutdown(Shutdown::Both);

    log::log!(
        log_level_for(response.status()),
        "{} → {} ({:.2}ms)",
        peer_addr,
        response.status(),
        start.elapsed().as_secs_f64() * 1000.0
    );

    Ok(())
}

/// Nivel de log para el resumen de la conexión según el status
fn log_level_for(status: StatusCode) -> log::Level {
    if status.is_success() {
        log::Level::Info
    } else if status.is_client_error() {
        log::Level::Warn
    } else {
        log::Level::Error
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handlers::default_router;
    use std::io::{Cursor, Read};
    use std::net::TcpListener;
    use std::thread;

    fn exchange(raw: &[u8]) -> (Response, Vec<u8>) {
        let router = default_router();
        let ctx = RouteContext::new(std::env::temp_dir());

        let mut reader = Cursor::new(raw.to_vec());
        let mut out = Vec::new();
        let response = serve_exchange(&mut reader, &mut out, &router, &ctx).unwrap();
        (response, out)
    }

    #[test]
    fn test_echo_exchange() {
        let (response, out) = exchange(b"GET /echo/abc HTTP/1.1\r\n\r\n");

        assert_eq!(response.status(), StatusCode::Ok);
        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with("HTTP/1.1 200 OK\r\n"));
        assert!(text.contains("Content-Length: 3\r\n"));
        assert!(text.ends_with("\r\n\r\nabc"));
    }

    #[test]
    fn test_empty_connection_gets_200() {
        let (response, out) = exchange(b"");

        assert_eq!(response.status(), StatusCode::Ok);
        assert_eq!(out, b"HTTP/1.1 200 OK\r\n\r\n");
    }

    #[test]
    fn test_malformed_request_gets_400() {
        let (response, out) = exchange(b"GET / HTTP/1.1\r\nbroken header\r\n\r\n");

        assert_eq!(response.status(), StatusCode::BadRequest);
        assert_eq!(out, b"HTTP/1.1 400 Bad Request\r\n\r\n");
    }

    #[test]
    fn test_oversized_head_gets_400() {
        let mut raw = b"GET / HTTP/1.1\r\nX-Big: ".to_vec();
        raw.extend(std::iter::repeat(b'a').take(crate::http::request::MAX_LINE_LEN * 2));
        raw.extend_from_slice(b"\r\n\r\n");

        let (response, out) = exchange(&raw);

        assert_eq!(response.status(), StatusCode::BadRequest);
        assert_eq!(out, b"HTTP/1.1 400 Bad Request\r\n\r\n");
    }

    #[test]
    fn test_log_level_for_status() {
        assert_eq!(log_level_for(StatusCode::Ok), log::Level::Info);
        assert_eq!(log_level_for(StatusCode::Created), log::Level::Info);
        assert_eq!(log_level_for(StatusCode::NotFound), log::Level::Warn);
        assert_eq!(log_level_for(StatusCode::BadRequest), log::Level::Warn);
    }

    #[test]
    fn test_unknown_route_gets_404() {
        let (response, out) = exchange(b"POST /bogus HTTP/1.1\r\n\r\n");

        assert_eq!(response.status(), StatusCode::NotFound);
        assert_eq!(out, b"HTTP/1.1 404 Not Found\r\n\r\n");
    }

    #[test]
    fn test_handle_tcp_over_socket() {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();

        let server = thread::spawn(move || {
            let (stream, _) = listener.accept().unwrap();
            handle_tcp(stream, &default_router(), &RouteContext::new(".")).unwrap();
        });

        let mut client = TcpStream::connect(addr).unwrap();
        client
            .write_all(b"GET /user-agent HTTP/1.1\r\nUser-Agent: curl/7.64\r\n\r\n")
            .unwrap();

        let mut buf = Vec::new();
        client.read_to_end(&mut buf).unwrap();
        let text = String::from_utf8_lossy(&buf);

        assert!(text.starts_with("HTTP/1.1 200 OK\r\n"));
        assert!(text.ends_with("\r\n\r\ncurl/7.64"));

        server.join().unwrap();
    }

    #[test]
    fn test_handle_tcp_peer_closed_immediately() {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();

        let server = thread::spawn(move || {
            let (stream, _) = listener.accept().unwrap();
            // El write puede fallar si el peer ya no está; no debe hacer panic
            let _ = handle_tcp(stream, &default_router(), &RouteContext::new("."));
        });

        drop(TcpStream::connect(addr).unwrap());
        server.join().unwrap();
    }
}
