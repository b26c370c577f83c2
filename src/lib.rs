//! # minihttp
//! src/lib.rs
//!
//! Servidor HTTP/1.1 mínimo implementado desde cero sobre `std::net`:
//! lectura de requests byte a byte, un router por primer segmento y
//! construcción manual de responses.
//!
//! ## Arquitectura
//!
//! - `http`: Request, Response, status codes, negociación de encoding
//! - `router`: Despacho por primer segmento del path
//! - `handlers`: `/`, `/echo`, `/user-agent`, `/files`
//! - `server`: Listener TCP, un thread por conexión, start/stop
//! - `config`: Argumentos CLI y variables de entorno
//! - `logger`: Inicialización del backend de logging
//!
//! ## Ejemplo de uso
//!
//! ```no_run
//! use minihttp::config::Config;
//! use minihttp::server::Server;
//!
//! let config = Config::default();
//! let server = Server::bind(&config).expect("Error al abrir el puerto");
//! server.run();
//! ```

pub mod config;
pub mod handlers;
pub mod http;
pub mod logger;
pub mod router;
pub mod server;
