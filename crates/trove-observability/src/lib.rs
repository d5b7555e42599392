//! Observability for the TechnoTrove storefront client.
//!
//! This crate provides:
//! - `SessionId` - Identifier correlating every log line of one client session
//! - `ClientLogger` - Structured logging with screen and route context
//! - `LogSink` - Where entries go: stderr, the `tracing` ecosystem, or memory

mod logging;
mod session;
mod sink;

pub use logging::*;
pub use session::SessionId;
pub use sink::*;
