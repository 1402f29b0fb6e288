//! Debug sink consumed by the resolvers.
//!
//! The resolution code only ever calls [`Logger::debug`]; it does not pick a
//! logging framework. [`TracingLogger`] forwards events to `tracing`, and
//! [`NoopLogger`] drops them.

use std::{fmt, sync::Arc};

/// A structured key/value pair attached to a debug event.
pub type Field<'a> = (&'a str, &'a dyn fmt::Debug);

/// Receives debug events from a resolution.
pub trait Logger: Send + Sync {
    /// Records `msg` together with structured key/value context.
    fn debug(&self, msg: &str, fields: &[Field<'_>]);
}

impl<L: Logger + ?Sized> Logger for &L {
    fn debug(&self, msg: &str, fields: &[Field<'_>]) {
        (**self).debug(msg, fields)
    }
}

impl<L: Logger + ?Sized> Logger for Arc<L> {
    fn debug(&self, msg: &str, fields: &[Field<'_>]) {
        (**self).debug(msg, fields)
    }
}

/// Discards every event.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopLogger;

impl Logger for NoopLogger {
    fn debug(&self, _msg: &str, _fields: &[Field<'_>]) {}
}

/// Forwards events to `tracing` at DEBUG level.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingLogger;

impl Logger for TracingLogger {
    fn debug(&self, msg: &str, fields: &[Field<'_>]) {
        tracing::debug!(fields = %Fields(fields), "{}", msg);
    }
}

/// Renders fields as `key=value` pairs separated by spaces.
pub struct Fields<'a>(pub &'a [Field<'a>]);

impl fmt::Display for Fields<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (key, value)) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{}={:?}", key, value)?;
        }
        Ok(())
    }
}
