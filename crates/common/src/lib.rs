//! Common building blocks for the RestSDK session layer.
//!
//! - [`clock`]: wall-clock abstraction used for every expiry decision
//! - [`auth`]: the OAuth credential (token set, validity queries, token
//!   response parsing). Nothing in this crate performs network I/O.

#![forbid(unsafe_code)]
#![warn(rust_2018_idioms)]
#![warn(clippy::all, clippy::perf, clippy::complexity, clippy::suspicious)]

pub mod auth;
pub mod clock;

// Re-export commonly used types and traits for convenience
pub use auth::{Credential, CredentialError, CredentialState, TokenResponse};
pub use clock::{Clock, MockClock, SystemClock};
