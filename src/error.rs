//! Errors raised while acquiring or drawing to a surface.

use wasm_bindgen::JsValue;

/// Failure from a surface backend or a delegate's paint.
///
/// Detached surfaces are not errors; those operations are skipped silently.
#[derive(Debug, thiserror::Error)]
pub enum SurfaceError {
    /// The surface could not hand out a 2D drawing context.
    #[error("2d drawing context is unavailable")]
    ContextUnavailable,
    /// A browser API threw; carries the exception's text.
    #[error("browser call failed: {0}")]
    Js(String),
    /// The delegate reported a drawing failure.
    #[error("drawing failed: {0}")]
    Draw(String),
}

impl From<JsValue> for SurfaceError {
    fn from(value: JsValue) -> Self {
        Self::Js(value.as_string().unwrap_or_else(|| format!("{value:?}")))
    }
}
