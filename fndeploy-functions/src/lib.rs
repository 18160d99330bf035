//! Sample HTTP function handlers.
//!
//! These are the deployment targets of `fndeploy`: one multiplies two
//! numbers, one returns a greeting. Requests carry JSON, responses are
//! plain text.

pub mod calculator;
pub mod error;
pub mod greeting;
pub mod server;

pub use calculator::{multiply, MultiplyRequest, Product};
pub use error::HandlerError;
pub use greeting::Greeter;
pub use server::{router, serve};
