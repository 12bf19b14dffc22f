use std::io;

use thiserror::Error;

use crate::app_id::AppId;
use crate::key_handle::KeyHandle;

/// Signature counter value as sent on the wire, big-endian.
pub type Counter = u32;

#[derive(Debug, Error)]
pub enum CounterError {
    /// The counter reached its maximum representable value. Advancing it
    /// further would repeat a value, so authentication can no longer proceed.
    #[error("usage counter exhausted")]
    Exhausted,

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

/// Strictly monotonic usage counter, the token's replay/cloning signal.
///
/// `next` atomically increments the counter, persists the new value, and
/// returns it. The persisted value must be durable before `next` returns so
/// that a power loss between persisting and delivering the response can
/// never cause a value to be handed out twice. The first successful
/// authentication observes counter value 1.
///
/// Whether the counter is kept per device or per key handle is up to the
/// implementation; both identifiers are passed in.
pub trait CounterStore {
    fn next(&self, application: &AppId, handle: &KeyHandle) -> Result<Counter, CounterError>;
}

impl CounterStore for Box<dyn CounterStore> {
    fn next(&self, application: &AppId, handle: &KeyHandle) -> Result<Counter, CounterError> {
        Box::as_ref(self).next(application, handle)
    }
}
