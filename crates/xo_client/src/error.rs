//! Error types for the client.

use derive_more::{Display, Error};
use tracing::instrument;

/// The remote state could not be obtained right now.
///
/// Covers network failures, non-success statuses and responses that do not
/// match the expected shape. Callers cannot tell these apart; all of them
/// mean "try again next cycle".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error)]
#[display("remote state not available")]
pub struct NotAvailable;

/// A response that arrived but did not match the expected shape.
///
/// Never crosses the transport boundary: it is logged and folded into
/// [`NotAvailable`].
#[derive(Debug, Clone, Display, Error)]
#[display("Malformed response: {}", message)]
pub struct MalformedResponse {
    /// What was wrong with the payload.
    pub message: String,
}

impl MalformedResponse {
    /// Creates a new malformed-response error.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl From<MalformedResponse> for NotAvailable {
    fn from(_: MalformedResponse) -> Self {
        NotAvailable
    }
}

/// Why the local identity could not be established.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum IdentityErrorKind {
    /// No session id configured.
    #[display("identity missing")]
    Missing,
    /// The identity file could not be read or written.
    #[display("identity file I/O")]
    Io,
}

/// Identity bootstrap error with location tracking.
#[derive(Debug, Clone, Display, Error)]
#[display("Identity error ({}): {} at {}:{}", kind, message, file, line)]
pub struct IdentityError {
    /// Error category.
    pub kind: IdentityErrorKind,
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl IdentityError {
    /// Creates a new identity error with caller location tracking.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(kind: IdentityErrorKind, message: impl Into<String>) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            kind,
            message: message.into(),
            line: loc.line(),
            file: loc.file(),
        }
    }

    /// Shorthand for a missing identity.
    #[track_caller]
    pub fn missing(message: impl Into<String>) -> Self {
        Self::new(IdentityErrorKind::Missing, message)
    }
}

impl From<std::io::Error> for IdentityError {
    #[track_caller]
    fn from(err: std::io::Error) -> Self {
        Self::new(IdentityErrorKind::Io, format!("I/O error: {}", err))
    }
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: impl Into<String>) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: loc.line(),
            file: loc.file(),
        }
    }
}
