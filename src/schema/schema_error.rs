use std::fmt::Display;

#[derive(Debug, Clone, PartialEq)]
pub enum SchemaError {
    Io(String),
    Json(String),
    Invalid(String),
}

impl Display for SchemaError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SchemaError::Io(message) => write!(f, "SchemaError: io: {}", message),
            SchemaError::Json(message) => write!(f, "SchemaError: json: {}", message),
            SchemaError::Invalid(message) => write!(f, "SchemaError: {}", message),
        }
    }
}

impl std::error::Error for SchemaError {}

impl From<std::io::Error> for SchemaError {
    fn from(err: std::io::Error) -> Self {
        SchemaError::Io(err.to_string())
    }
}

impl From<serde_json::Error> for SchemaError {
    fn from(err: serde_json::Error) -> Self {
        SchemaError::Json(err.to_string())
    }
}
