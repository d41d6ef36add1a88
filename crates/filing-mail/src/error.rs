//! Mail error types.

use thiserror::Error;

/// Errors raised while building or delivering a digest email.
#[derive(Debug, Error)]
pub enum MailError {
    /// Sender or recipient address does not parse
    #[error("bad address {address:?}: {source}")]
    Address {
        /// The offending address
        address: String,
        /// Parser error
        source: lettre::address::AddressError,
    },

    /// Message could not be assembled
    #[error("failed to build message: {0}")]
    Build(#[from] lettre::error::Error),

    /// SMTP relay refused or dropped the message
    #[error("SMTP send failed: {0}")]
    Transport(#[from] lettre::transport::smtp::Error),
}

/// Render an error and all of its sources on one line.
pub fn error_chain(err: &(dyn std::error::Error + 'static)) -> String {
    let mut rendered = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        rendered.push_str(": ");
        rendered.push_str(&cause.to_string());
        source = cause.source();
    }
    rendered
}
