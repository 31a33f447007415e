//! REST boundary.
//!
//! Handlers parse input, call the domain services and map results to
//! status codes. `ApiError` is the only place where domain failures turn
//! into HTTP statuses.

pub mod endpoints;
pub mod error;
pub mod middleware;
pub mod router;
pub mod server;
pub mod types;

pub use router::api_router;
pub use server::{ApiServer, ApiSession};
pub use types::ApiContext;
