use wasm_bindgen::JsValue;

/// A timestamp attribute that could not be turned into an instant.
///
/// Covers a missing attribute, an empty one, and text no accepted format
/// recognises. Handled per element; never aborts a refresh cycle.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TimestampError {
    #[error("Unparseable timestamp '{raw}'")]
    UnparseableTimestamp { raw: String },
}

impl TimestampError {
    pub fn unparseable(raw: impl Into<String>) -> Self {
        TimestampError::UnparseableTimestamp { raw: raw.into() }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            TimestampError::UnparseableTimestamp { .. } => "UNPARSEABLE_TIMESTAMP",
        }
    }
}

/// Failures talking to the host page.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DomError {
    #[error("window not available")]
    NoWindow,

    #[error("document not available")]
    NoDocument,

    #[error("Failed to query '{selector}': {message}")]
    Selector { selector: String, message: String },

    #[error("Timer error: {message}")]
    Timer { message: String },
}

impl DomError {
    pub fn error_code(&self) -> &'static str {
        match self {
            DomError::NoWindow => "NO_WINDOW",
            DomError::NoDocument => "NO_DOCUMENT",
            DomError::Selector { .. } => "SELECTOR_ERROR",
            DomError::Timer { .. } => "TIMER_ERROR",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid configuration: {message}")]
    InvalidConfiguration { message: String },

    #[error("Failed to read options: {message}")]
    Deserialize { message: String },
}

impl ConfigError {
    pub fn error_code(&self) -> &'static str {
        match self {
            ConfigError::InvalidConfiguration { .. } => "INVALID_CONFIGURATION",
            ConfigError::Deserialize { .. } => "CONFIG_DESERIALIZE_ERROR",
        }
    }
}

/// Renders a `JsValue` thrown by the browser for use in error messages.
pub(crate) fn describe_js(value: &JsValue) -> String {
    value.as_string().unwrap_or_else(|| format!("{:?}", value))
}

impl From<DomError> for JsValue {
    fn from(err: DomError) -> Self {
        JsValue::from_str(&err.to_string())
    }
}

impl From<ConfigError> for JsValue {
    fn from(err: ConfigError) -> Self {
        JsValue::from_str(&err.to_string())
    }
}
