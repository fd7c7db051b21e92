use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("{0}")]
    Configuration(String),

    #[error("{0}")]
    Connector(#[from] quill::Error),

    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Server(#[from] hyper::Error),
}

impl From<url::ParseError> for EngineError {
    fn from(e: url::ParseError) -> Self {
        Self::Configuration(format!("Error parsing connection string: {e}"))
    }
}

impl From<serde_json::Error> for EngineError {
    fn from(e: serde_json::Error) -> Self {
        Self::Configuration(format!("Error parsing the schema file: {e}"))
    }
}
