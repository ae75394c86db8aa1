use thiserror::Error;

#[derive(Debug, Error)]
pub enum LogoError {
    #[error("WebGL2 not supported")]
    ContextUnavailable,
    #[error("shader compile failed: {0}")]
    ShaderCompile(String),
    #[error("program link failed: {0}")]
    ProgramLink(String),
    #[error("could not create {0}")]
    Resource(&'static str),
    #[error("{0}")]
    Js(String),
}

pub type Result<T> = std::result::Result<T, LogoError>;

#[cfg(target_arch = "wasm32")]
impl From<LogoError> for wasm_bindgen::JsValue {
    fn from(err: LogoError) -> Self {
        js_sys::Error::new(&err.to_string()).into()
    }
}

#[cfg(target_arch = "wasm32")]
impl From<wasm_bindgen::JsValue> for LogoError {
    fn from(value: wasm_bindgen::JsValue) -> Self {
        LogoError::Js(value.as_string().unwrap_or_else(|| format!("{value:?}")))
    }
}
