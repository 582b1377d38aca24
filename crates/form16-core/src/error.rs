use thiserror::Error;

/// Everything that can go wrong between picking a file and rendering results.
///
/// The variants carry structured fields only. Turning them into the text shown
/// next to the drop zone is the job of [`crate::render::describe_error`].
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AnalyzeError {
    #[error("Unsupported file type: {mime_type:?}")]
    InvalidFileType { mime_type: String },

    #[error("No file selected")]
    NoFileSelected,

    #[error("An analysis is already in progress")]
    AlreadySubmitting,

    #[error("Request failed: {message}")]
    Transport { message: String },

    #[error("Server responded with status {status}")]
    Server {
        status: u16,
        /// `message` pulled out of a JSON error body, or the raw body when the
        /// body parsed as JSON but carried no usable message.
        server_message: Option<String>,
        raw_body: String,
    },

    #[error("Unexpected response body: {message}")]
    Response { message: String },
}

impl AnalyzeError {
    /// Build a server error from a non-2xx status and its body text.
    ///
    /// A body that parses as JSON yields its `message` field, falling back to
    /// the whole body when that field is missing or falsy. A body that is not
    /// JSON, or is JSON `null`, leaves `server_message` empty so the raw text
    /// is reported instead.
    pub fn server(status: u16, raw_body: impl Into<String>) -> Self {
        let raw_body = raw_body.into();
        let server_message = match serde_json::from_str::<serde_json::Value>(&raw_body) {
            // A JSON `null` has no fields to read, so it is reported raw
            Ok(serde_json::Value::Null) | Err(_) => None,
            Ok(value) => Some(message_field(&value).unwrap_or_else(|| raw_body.clone())),
        };

        AnalyzeError::Server {
            status,
            server_message,
            raw_body,
        }
    }

    /// Whether this error happened after a request was issued
    pub fn is_async(&self) -> bool {
        matches!(
            self,
            AnalyzeError::Transport { .. }
                | AnalyzeError::Server { .. }
                | AnalyzeError::Response { .. }
        )
    }
}

fn message_field(value: &serde_json::Value) -> Option<String> {
    use serde_json::Value;

    match value.get("message")? {
        Value::Null | Value::Bool(false) => None,
        Value::String(s) if s.is_empty() => None,
        Value::String(s) => Some(s.clone()),
        Value::Number(n) if n.as_f64() == Some(0.0) => None,
        other => Some(other.to_string()),
    }
}

/// Errors raised while loading a [`crate::config::PageConfig`]
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid page configuration: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },
}
