//! Push notification outbound adapters.
//!
//! [`HttpPushTransport`] posts JSON to a push gateway; [`LoggingPushTransport`]
//! only logs and is wired in when no gateway is configured.

mod dto;
mod http_transport;
mod logging_transport;

pub use http_transport::HttpPushTransport;
pub use logging_transport::LoggingPushTransport;
