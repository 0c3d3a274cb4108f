//! Domain types shared by the session layer

pub mod response;

pub use response::ApiResponse;
