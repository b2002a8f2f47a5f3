// errors.rs
use thiserror::Error;

/// Errors originating from the audit job itself (configuration, delivery)
/// or from downstream layers (DB, spreadsheet writer).
#[derive(Debug, Error)]
pub enum AuditError {
    #[error("Database Error: {0}")]
    DbError(String),

    #[error("Spreadsheet Error: {0}")]
    XlsxError(String),

    #[error("Mail Error: {0}")]
    MailError(String),

    #[error("Configuration Error: {0}")]
    ConfigError(String),

    #[error("IO Error: {0}")]
    IoError(#[from] std::io::Error),
}
