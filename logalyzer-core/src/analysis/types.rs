use thiserror::Error;

/// A single successfully parsed access log line.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedLine {
    pub url: String,
    /// Request duration in seconds.
    pub response_time: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("line is not valid UTF-8")]
    InvalidEncoding,

    #[error("line does not contain a quoted request field")]
    MissingRequest,

    #[error("malformed request field '{request}'")]
    MalformedRequest { request: String },

    #[error("line has no trailing request time")]
    MissingResponseTime,

    #[error("invalid request time '{token}'")]
    InvalidResponseTime { token: String },
}

/// Result of parsing one line. Per-line failures are values, never panics.
pub type ParseOutcome = Result<ParsedLine, ParseError>;
