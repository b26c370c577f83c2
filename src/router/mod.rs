//! # Sistema de Routing
//! src/router/mod.rs
//!
//! Este módulo implementa el router que despacha un request según el primer
//! segmento de su path.
//!
//! ## Arquitectura
//!
//! ```text
//! Request → Router → Handler → Response (+ Content-Encoding negociado)
//! ```
//!
//! `/echo/a/b` se despacha a la ruta `echo`; `/` va al handler raíz.
//! Si no hay handler para la ruta, retorna 404 Not Found.

use std::path::{Path, PathBuf};

use crate::http::{encoding, Request, Response};

/// Datos de solo lectura compartidos por todos los handlers
#[derive(Debug, Clone)]
pub struct RouteContext {
    /// Directorio base para la ruta `files`
    files_root: PathBuf,
}

impl RouteContext {
    pub fn new(files_root: impl Into<PathBuf>) -> Self {
        Self {
            files_root: files_root.into(),
        }
    }

    pub fn files_root(&self) -> &Path {
        &self.files_root
    }
}

/// Tipo de función handler
///
/// Un handler recibe el Request y el contexto, y retorna una Response
pub type Handler = fn(&Request, &RouteContext) -> Response;

/// Router que mapea el primer segmento del path a handlers
pub struct Router {
    /// Handler para el path vacío ("/")
    root: Option<Handler>,

    /// Lista de (segmento → handler)
    routes: Vec<(String, Handler)>,
}

impl Router {
    /// Crea un nuevo router vacío
    pub fn new() -> Self {
        Self {
            root: None,
            routes: Vec::new(),
        }
    }

    /// Registra el handler de la raíz
    pub fn register_root(&mut self, handler: Handler) {
        self.root = Some(handler);
    }

    /// Registra una ruta con su handler
    ///
    /// # Ejemplo
    /// ```
    /// use minihttp::router::{RouteContext, Router};
    /// use minihttp::http::{Request, Response};
    ///
    /// fn hello_handler(_req: &Request, _ctx: &RouteContext) -> Response {
    ///     Response::text("hello")
    /// }
    ///
    /// let mut router = Router::new();
    /// router.register("hello", hello_handler);
    /// ```
    pub fn register(&mut self, route: &str, handler: Handler) {
        self.routes.push((route.to_string(), handler));
    }

    /// Encuentra y ejecuta el handler apropiado para un request
    ///
    /// Si el request acepta una codificación soportada, la respuesta la
    /// declara en `Content-Encoding`, incluso si es un 404.
    pub fn route(&self, request: &Request, ctx: &RouteContext) -> Response {
        let mut response = match self.find(request.route()) {
            Some(handler) => handler(request, ctx),
            None => {
                log::debug!("Ruta no encontrada: {}", request.target());
                Response::not_found()
            }
        };

        self.apply_encoding(request, &mut response);
        response
    }

    fn find(&self, route: Option<&str>) -> Option<Handler> {
        match route {
            None => self.root,
            Some(route) => self
                .routes
                .iter()
                .find(|(name, _)| name == route)
                .map(|(_, handler)| *handler),
        }
    }

    fn apply_encoding(&self, request: &Request, response: &mut Response) {
        if let Some(encoding) = request
            .header("Accept-Encoding")
            .and_then(encoding::negotiate)
        {
            response.set_encoding(encoding);
        }
    }
}

impl Default for Router {
    fn default() -> Self {
        Self::new()
    }
}
