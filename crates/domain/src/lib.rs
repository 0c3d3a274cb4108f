//! # RestSDK Domain
//!
//! Domain types for the RestSDK session layer.
//!
//! This crate contains:
//! - SDK configuration structures ([`SdkConfig`], [`TokenTtlConfig`])
//! - Endpoint paths, token lifetime defaults and server presets
//! - Domain error types and Result definitions
//! - The normalized response type ([`ApiResponse`])
//!
//! ## Architecture
//! - No dependencies on other RestSDK crates
//! - Only external dependencies allowed
//! - Pure data structures, no I/O

pub mod config;
pub mod constants;
pub mod errors;
pub mod types;

// Re-export commonly used items
pub use config::{SdkConfig, TokenTtlConfig};
pub use errors::*;
pub use types::*;
