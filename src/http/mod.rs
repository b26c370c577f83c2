//! # Módulo HTTP
//!
//! Este módulo implementa el subconjunto de HTTP/1.1 que habla el servidor,
//! sin usar librerías de alto nivel. Incluye:
//!
//! - Lectura de requests directamente desde el socket
//! - Construcción de responses
//! - Manejo de status codes
//! - Negociación de `Content-Encoding`
//!
//! ## Restricciones
//!
//! - Un solo intercambio por conexión (sin keep-alive ni pipelining)
//! - Sin chunked transfer encoding: el body se delimita con `Content-Length`
//! - Nombres de header sensibles a mayúsculas
//!
//! ### Formato de Request
//!
//! ```text
//! GET /echo/abc HTTP/1.1\r\n
//! Header-Name: Header-Value\r\n
//! \r\n
//! ```
//!
//! ### Formato de Response
//!
//! ```text
//! HTTP/1.1 200 OK\r\n
//! Content-Type: text/plain\r\n
//! Content-Length: 3\r\n
//! \r\n
//! abc
//! ```

pub mod encoding;  // Negociación de Accept-Encoding
pub mod request;   // Lectura de HTTP requests
pub mod response;  // Construcción de HTTP responses
pub mod status;    // Códigos de estado HTTP

// Re-exportamos los tipos principales para facilitar su uso
pub use encoding::ContentEncoding;
pub use request::{Method, ParseError, Request};
pub use response::Response;
pub use status::StatusCode;
