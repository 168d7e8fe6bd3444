use thiserror::Error;
use wasm_bindgen::JsValue;
use web_sys::{Document, Window};

#[derive(Debug, Error)]
pub enum AppError {
    #[error("browser window is not available")]
    NoWindow,
    #[error("document is not available")]
    NoDocument,
    #[error("element `{0}` not found")]
    MissingElement(String),
    #[error("DOM call failed: {0}")]
    Dom(String),
}

impl From<JsValue> for AppError {
    fn from(value: JsValue) -> Self {
        AppError::Dom(value.as_string().unwrap_or_else(|| format!("{:?}", value)))
    }
}

pub fn window() -> Result<Window, AppError> {
    web_sys::window().ok_or(AppError::NoWindow)
}

pub fn document() -> Result<Document, AppError> {
    window()?.document().ok_or(AppError::NoDocument)
}
