//! # Módulo del Servidor HTTP
//! src/server/mod.rs
//!
//! Este módulo implementa el servidor TCP que:
//! 1. Escucha en un puerto
//! 2. Acepta conexiones entrantes (un thread por conexión)
//! 3. Lee el request, lo rutea y escribe la response
//! 4. Cierra la conexión

pub mod connection;
pub mod tcp;

// Re-exportar para facilitar el uso
pub use tcp::{RunningServer, Server, ServerError, ShutdownHandle};
