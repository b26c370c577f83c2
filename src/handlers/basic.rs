//! # Handlers Básicos
//! src/handlers/basic.rs
//!
//! - `/` → 200 vacío
//! - `/echo/{texto}` → devuelve el resto del path
//! - `/user-agent` → devuelve el header `User-Agent`

use crate::http::{Request, Response, StatusCode};
use crate::router::RouteContext;

/// Handler para `/`
///
/// También responde al request vacío (conexión cerrada sin datos).
pub fn root_handler(_req: &Request, _ctx: &RouteContext) -> Response {
    Response::new(StatusCode::Ok)
}

/// Handler para `/echo`
///
/// El body son los segmentos restantes unidos con `/`:
/// `/echo/a/b/c` → `a/b/c`. Sin segmentos, el body es vacío.
pub fn echo_handler(req: &Request, _ctx: &RouteContext) -> Response {
    Response::text(&req.tail().join("/"))
}

/// Handler para `/user-agent`
pub fn user_agent_handler(req: &Request, _ctx: &RouteContext) -> Response {
    Response::text(req.header("User-Agent").unwrap_or_default())
}
