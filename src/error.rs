use thiserror::Error;

/// A query-string value the demo could not use.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("unknown setting `{0}`")]
    UnknownKey(String),

    #[error("invalid value `{value}` for `{key}`")]
    InvalidValue { key: String, value: String },
}

impl ConfigError {
    pub(crate) fn invalid(key: &str, value: &str) -> Self {
        Self::InvalidValue {
            key: key.to_string(),
            value: value.to_string(),
        }
    }
}

/// Startup and GPU failures. All of them are fatal to the demo.
#[derive(Debug, Error)]
pub enum DemoError {
    #[error("no window")]
    NoWindow,

    #[error("no document")]
    NoDocument,

    #[error("container `{0}` not found")]
    ContainerNotFound(String),

    #[error("WebGL2 not supported")]
    ContextUnavailable,

    #[error("{stage} shader failed to compile: {log}")]
    ShaderCompile { stage: &'static str, log: String },

    #[error("program `{name}` failed to link: {log}")]
    ProgramLink { name: &'static str, log: String },

    #[error("failed to create {0}")]
    Allocation(&'static str),

    #[error("framebuffer incomplete (status {0:#x})")]
    IncompleteFramebuffer(u32),

    #[error("javascript error: {0}")]
    Js(String),
}

#[cfg(target_arch = "wasm32")]
impl From<wasm_bindgen::JsValue> for DemoError {
    fn from(value: wasm_bindgen::JsValue) -> Self {
        Self::Js(format!("{value:?}"))
    }
}

#[cfg(target_arch = "wasm32")]
impl From<DemoError> for wasm_bindgen::JsValue {
    fn from(err: DemoError) -> Self {
        js_sys::Error::new(&err.to_string()).into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_carry_context() {
        let err = DemoError::ShaderCompile {
            stage: "fragment",
            log: "ERROR: 0:3: 'foo' undeclared".into(),
        };
        assert!(err.to_string().starts_with("fragment shader failed to compile"));
        assert_eq!(
            DemoError::IncompleteFramebuffer(0x8cd6).to_string(),
            "framebuffer incomplete (status 0x8cd6)"
        );
        assert_eq!(
            ConfigError::invalid("ease", "2").to_string(),
            "invalid value `2` for `ease`"
        );
    }
}
