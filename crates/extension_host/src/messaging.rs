//! Runtime signal-bus contracts and adapters.

use std::{cell::RefCell, future::Future, pin::Pin, rc::Rc};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Object-safe boxed future used by [`RuntimeBus`].
pub type RuntimeBusFuture<'a, T> = Pin<Box<dyn Future<Output = T> + 'a>>;

/// Process-wide signal broadcast to interested listeners.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Signal {
    /// A storage write was rejected because the area is out of space.
    StorageExceeded,
}

impl Signal {
    /// Returns a stable string token for diagnostics and interop.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::StorageExceeded => "storage-exceeded",
        }
    }
}

/// Error raised when a broadcast cannot be delivered.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("broadcast failed: {detail}")]
pub struct BusError {
    /// Backend-provided failure detail.
    pub detail: String,
}

impl BusError {
    /// Builds a [`BusError`] from any displayable failure detail.
    pub fn new(detail: impl Into<String>) -> Self {
        Self {
            detail: detail.into(),
        }
    }
}

/// Host bus for fire-and-forget signal broadcasts.
pub trait RuntimeBus {
    /// Broadcasts a signal to all in-process listeners.
    fn broadcast<'a>(&'a self, signal: Signal) -> RuntimeBusFuture<'a, Result<(), BusError>>;
}

#[derive(Debug, Clone, Copy, Default)]
/// No-op bus for unsupported targets and baseline tests.
pub struct NoopBus;

impl RuntimeBus for NoopBus {
    fn broadcast<'a>(&'a self, _signal: Signal) -> RuntimeBusFuture<'a, Result<(), BusError>> {
        Box::pin(async { Ok(()) })
    }
}

#[derive(Debug, Clone, Default)]
/// In-memory bus recording broadcast signals for assertions.
pub struct MemoryBus {
    sent: Rc<RefCell<Vec<Signal>>>,
}

impl MemoryBus {
    /// Returns the broadcast signals in dispatch order.
    pub fn sent(&self) -> Vec<Signal> {
        self.sent.borrow().clone()
    }
}

impl RuntimeBus for MemoryBus {
    fn broadcast<'a>(&'a self, signal: Signal) -> RuntimeBusFuture<'a, Result<(), BusError>> {
        Box::pin(async move {
            self.sent.borrow_mut().push(signal);
            Ok(())
        })
    }
}

#[derive(Debug, Clone, Copy, Default)]
/// Bus whose broadcasts always fail, for exercising best-effort dispatch paths.
pub struct DeadBus;

impl RuntimeBus for DeadBus {
    fn broadcast<'a>(&'a self, signal: Signal) -> RuntimeBusFuture<'a, Result<(), BusError>> {
        Box::pin(async move {
            Err(BusError::new(format!("no listeners for {}", signal.as_str())))
        })
    }
}

#[cfg(test)]
mod tests {
    use futures::executor::block_on;

    use super::*;

    #[test]
    fn signal_tokens_are_stable() {
        assert_eq!(Signal::StorageExceeded.as_str(), "storage-exceeded");
        assert_eq!(
            serde_json::to_value(Signal::StorageExceeded).expect("serialize"),
            serde_json::json!("storage-exceeded")
        );
    }

    #[test]
    fn memory_bus_records_broadcasts_in_order() {
        let bus = MemoryBus::default();
        let bus_obj: &dyn RuntimeBus = &bus;

        block_on(bus_obj.broadcast(Signal::StorageExceeded)).expect("broadcast");
        block_on(bus_obj.broadcast(Signal::StorageExceeded)).expect("broadcast");

        assert_eq!(bus.sent(), vec![Signal::StorageExceeded, Signal::StorageExceeded]);
    }

    #[test]
    fn noop_bus_accepts_and_drops() {
        let bus_obj: &dyn RuntimeBus = &NoopBus;
        block_on(bus_obj.broadcast(Signal::StorageExceeded)).expect("broadcast");
    }

    #[test]
    fn dead_bus_always_fails() {
        let bus_obj: &dyn RuntimeBus = &DeadBus;
        let err = block_on(bus_obj.broadcast(Signal::StorageExceeded)).expect_err("dead bus");
        assert_eq!(err.to_string(), "broadcast failed: no listeners for storage-exceeded");
    }
}
