//! Base types and error handling.
//!
//! Provides the foundational pieces shared by both resolution strategies:
//! - [`Error`](error::Error): Errors returned to callers
//! - [`Context`](cancel::Context): Cancellation and deadlines for a single call

pub mod cancel;
pub mod context;
pub mod error;

#[cfg(test)]
mod tests;
