use thiserror::Error;

#[derive(Debug, Error)]
pub enum LogError {
    #[error("Invalid log format: {0} (expected: text|json|journald)")]
    InvalidFormat(String),
    #[error("Invalid log level: {0}")]
    InvalidLevel(String),
    #[error("Journald is not supported on this platform or feature disabled")]
    JournaldNotSupported,
    #[error("Logger has already been initialized")]
    AlreadyInitialized,
    #[error("Failed to initialize logger: {0}")]
    InitFailed(String),
}
