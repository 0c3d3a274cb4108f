//! # RestSDK Infrastructure
//!
//! The I/O half of the SDK: the HTTP transport, the authenticated
//! [`Session`] and configuration loading.
//!
//! ## Architecture
//! - Value types and configuration live in `restsdk-domain`
//! - Credential bookkeeping and the clock live in `restsdk-common`
//! - Everything that touches the network or the filesystem lives here
//!
//! ```no_run
//! use restsdk_domain::SdkConfig;
//! use restsdk_infra::{ApiRequest, Session};
//!
//! # async fn run() -> Result<(), restsdk_infra::SessionError> {
//! let config = SdkConfig::new("app-key", "app-secret", "https://platform.devtest.ringcentral.com");
//! let session = Session::new(config)?;
//! session.authenticate("+15551234567", "password", None, false).await?;
//!
//! let response = session
//!     .get(ApiRequest::new("/restapi/v1.0/account/~/extension").query("perPage", "10"))
//!     .await?;
//! println!("{}", response.status());
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]

pub mod config;
pub mod errors;
pub mod http;
pub mod session;

pub use errors::SessionError;
pub use http::{HttpClient, HttpClientBuilder};
pub use session::{ApiRequest, RequestBody, Session};
