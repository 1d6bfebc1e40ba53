// crates/showcase-app/src/error.rs
// Error taxonomy for the site widgets

use thiserror::Error;

/// Every fault a widget can hit. None of these escape to the page: callers
/// log them and fall back to a placeholder or the last good state.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum WidgetError {
    #[error("no browser window available")]
    NoWindow,

    #[error("document not available")]
    NoDocument,

    #[error("element not found: {0}")]
    MissingElement(String),

    #[error("invalid selector: {0}")]
    InvalidSelector(String),

    #[error("invalid data: {0}")]
    InvalidData(String),

    #[error("render failed: {0}")]
    Render(String),

    #[error("render already in progress")]
    RenderInProgress,

    #[error("timer fault: {0}")]
    Timer(String),

    #[error("fetch failed: {0}")]
    Fetch(String),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("JavaScript error: {0}")]
    Js(String),
}

/// Convenience type alias for Result using WidgetError
pub type Result<T> = std::result::Result<T, WidgetError>;

#[cfg(target_arch = "wasm32")]
impl WidgetError {
    /// Wrap a thrown JS value
    pub fn js(value: &wasm_bindgen::JsValue) -> Self {
        WidgetError::Js(format!("{:?}", value))
    }
}

impl From<WidgetError> for String {
    fn from(err: WidgetError) -> Self {
        err.to_string()
    }
}
