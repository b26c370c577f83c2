//! # Handler de Archivos
//! src/handlers/files.rs
//!
//! `/files/{ruta}` lee o escribe archivos dentro del directorio configurado
//! con `--directory`.
//!
//! - `GET`  → 200 con el contenido, o 404 si no se puede leer
//! - `POST` → escribe el body (crea o trunca), 201; 404 si falla
//!
//! Cualquier falla del filesystem se reporta como 404. Los segmentos `.` y
//! `..` se rechazan antes de tocar el disco, así ninguna ruta sale del
//! directorio base.
//!
//! La escritura no es atómica: dos POST concurrentes al mismo archivo
//! compiten y el último en escribir gana.

use std::fs;
use std::path::{Path, PathBuf};

use crate::http::{Method, Request, Response, StatusCode};
use crate::router::RouteContext;

/// Handler para `/files`
pub fn files_handler(req: &Request, ctx: &RouteContext) -> Response {
    let filepath = match resolve(ctx.files_root(), req.tail()) {
        Some(p) => p,
        None => {
            log::warn!("Ruta de archivo inválida: {}", req.target());
            return Response::not_found();
        }
    };

    match req.method() {
        Method::GET => read_file(&filepath),
        Method::POST => write_file(&filepath, req.body()),
        other => {
            log::debug!("Método {} no soportado en /files", other);
            Response::not_found()
        }
    }
}

/// Une los segmentos con el directorio base
///
/// Retorna `None` si no hay segmentos o si alguno es `.` o `..`.
fn resolve(root: &Path, segments: &[String]) -> Option<PathBuf> {
    if segments.is_empty() {
        return None;
    }

    if segments.iter().any(|s| s == ".." || s == ".") {
        return None;
    }

    Some(segments.iter().fold(root.to_path_buf(), |path, segment| path.join(segment)))
}

fn read_file(filepath: &Path) -> Response {
    match fs::read(filepath) {
        Ok(contents) => Response::octet_stream(contents),
        Err(e) => {
            log::warn!("No se pudo leer {}: {}", filepath.display(), e);
            Response::not_found()
        }
    }
}

fn write_file(filepath: &Path, contents: &[u8]) -> Response {
    match fs::write(filepath, contents) {
        Ok(()) => {
            log::info!("Archivo escrito: {} ({} bytes)", filepath.display(), contents.len());
            Response::new(StatusCode::Created)
        }
        Err(e) => {
            log::warn!("No se pudo escribir {}: {}", filepath.display(), e);
            Response::not_found()
        }
    }
}
