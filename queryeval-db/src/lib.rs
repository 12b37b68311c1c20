//! Owns the live connection to the target SQL Server: replica-failover
//! routing and schema introspection. No evaluation logic lives here —
//! see `queryeval-eval` for the Executor, which is the actual consumer
//! of `Router::acquire`.
//!
//! None of this crate's tests open a socket to a real SQL Server; see
//! the module doc comments on `router` for what is and isn't exercised
//! without one.

pub mod connect;
pub mod error;
pub mod introspector;
pub mod router;

pub use connect::{connect, Connection};
pub use error::DbError;
pub use introspector::inspect;
pub use router::Router;
