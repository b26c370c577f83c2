//! # Negociación de Content-Encoding
//!
//! Solo se negocia el header: el body nunca se comprime. Si el cliente
//! acepta `gzip`, la respuesta declara `Content-Encoding: gzip`.

/// Codificaciones que el servidor sabe declarar
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentEncoding {
    Gzip,
}

impl ContentEncoding {
    /// Token tal como aparece en los headers
    pub fn as_str(&self) -> &'static str {
        match self {
            ContentEncoding::Gzip => "gzip",
        }
    }

    fn from_token(token: &str) -> Option<Self> {
        match token {
            "gzip" => Some(ContentEncoding::Gzip),
            _ => None,
        }
    }
}

/// Elige la codificación a partir del valor de `Accept-Encoding`
///
/// El valor se separa por `,` y cada token se recorta. Gana el primer token
/// soportado.
///
/// # Ejemplo
/// ```
/// use minihttp::http::encoding::{negotiate, ContentEncoding};
///
/// assert_eq!(negotiate("deflate, gzip"), Some(ContentEncoding::Gzip));
/// assert_eq!(negotiate("deflate"), None);
/// ```
pub fn negotiate(accept_encoding: &str) -> Option<ContentEncoding> {
    accept_encoding
        .split(',')
        .map(str::trim)
        .find_map(ContentEncoding::from_token)
}
