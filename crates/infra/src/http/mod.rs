//! HTTP transport for the session layer

pub mod client;
pub mod response;

pub use client::{HttpClient, HttpClientBuilder};
pub use response::normalize;
