//! OAuth credential model
//!
//! Holds the password-grant token set for one session and answers validity
//! questions about it. The HTTP side of the protocol (token, refresh and
//! revoke calls) lives in `restsdk-infra::session`.
//!
//! # Architecture
//!
//! ```text
//! token endpoint JSON ──► TokenResponse::from_json ──► Credential::apply
//!                                                           │
//!                              Credential::state(now) ◄─────┘
//!                         Valid | Refreshable | Expired
//! ```
//!
//! # Module Organization
//!
//! - **[`types`]**: token endpoint payload parsing (`TokenResponse`)
//! - **[`credential`]**: the token set, validity queries and `CredentialState`

pub mod credential;
pub mod types;

// Re-export commonly used types
pub use credential::{Credential, CredentialError, CredentialState};
pub use types::TokenResponse;
