//! Filing Mail - digest formatting and delivery.
//!
//! Renders the filings found for one key as an HTML table and sends it to
//! the configured distribution list over plaintext SMTP. Delivery goes
//! through the [`MailTransport`] trait so dry runs and tests can swap in a
//! transport that never touches the network. Send failures are logged and
//! reported as a [`SendOutcome`], never propagated.
//!
//! # Modules
//!
//! - [`templates`] - HTML digest rendering
//! - [`sender`] - Message building, transports and [`DigestSender`]
//! - [`error`] - Mail error types using thiserror

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

pub mod error;
pub mod sender;
pub mod templates;

pub use error::MailError;
pub use sender::{DigestSender, LogOnlyTransport, MailTransport, SendOutcome, SmtpMailTransport};
pub use templates::{build_digest, Digest};
