//! HTTP inbound adapter exposing REST endpoints.

pub mod adoptions;
pub mod error;
pub mod schemas;
pub mod session;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub mod users;
pub mod validation;

pub use error::ApiResult;
