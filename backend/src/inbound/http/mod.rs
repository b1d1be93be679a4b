//! HTTP inbound adapter exposing REST endpoints.

pub mod cache_control;
pub mod cars;
pub mod catalog;
pub mod dto;
pub mod error;
pub mod health;
pub mod relations;
pub mod schemas;
pub mod session;
pub mod session_config;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub mod users;
pub mod validation;

pub use error::ApiResult;
