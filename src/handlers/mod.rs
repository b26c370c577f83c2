//! # Handlers
//!
//! Organizados por categoría:
//! - `basic`: raíz, echo, user-agent
//! - `files`: lectura y escritura de archivos estáticos

pub mod basic;
pub mod files;

pub use basic::{echo_handler, root_handler, user_agent_handler};
pub use files::files_handler;

use crate::router::Router;

/// Router con todas las rutas del servidor registradas
pub fn default_router() -> Router {
    let mut router = Router::new();

    router.register_root(root_handler);
    router.register("echo", echo_handler);
    router.register("user-agent", user_agent_handler);
    router.register("files", files_handler);

    router
}
