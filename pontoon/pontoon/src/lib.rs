pub mod cli;
pub mod context;
pub mod error;
pub mod logger;
pub mod opt;
pub mod server;

use error::EngineError;

pub type EngineResult<T> = Result<T, EngineError>;

/// STDOUT log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Text,
    Json,
}
