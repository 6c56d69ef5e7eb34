//! Network reachability probe contracts and guard helpers.

use crate::locale::{localize, MessageCatalog};

/// Catalog key for the localized offline error message.
pub const OFFLINE_MESSAGE_KEY: &str = "err_no_internet";

/// Fallback text used when the catalog does not define [`OFFLINE_MESSAGE_KEY`].
pub const OFFLINE_MESSAGE_FALLBACK: &str = "Internet disconnected";

/// Host probe reporting network reachability.
pub trait ConnectivityProbe {
    /// Returns whether the host currently reports network connectivity.
    fn is_online(&self) -> bool;
}

#[derive(Debug, Clone, Copy, Default)]
/// Probe that always reports connectivity, for unsupported targets.
pub struct NoopConnectivity;

impl ConnectivityProbe for NoopConnectivity {
    fn is_online(&self) -> bool {
        true
    }
}

#[derive(Debug, Clone, Copy)]
/// Probe reporting a fixed connectivity state.
pub struct StaticConnectivity {
    online: bool,
}

impl StaticConnectivity {
    /// Creates a probe that always reports `online`.
    pub const fn new(online: bool) -> Self {
        Self { online }
    }
}

impl ConnectivityProbe for StaticConnectivity {
    fn is_online(&self) -> bool {
        self.online
    }
}

/// Checks the probe before a network operation.
///
/// # Errors
///
/// Returns the catalog's [`OFFLINE_MESSAGE_KEY`] message, or
/// [`OFFLINE_MESSAGE_FALLBACK`] when undefined, when the host is offline.
pub fn ensure_online<P, C>(probe: &P, catalog: &C) -> Result<(), String>
where
    P: ConnectivityProbe + ?Sized,
    C: MessageCatalog + ?Sized,
{
    if probe.is_online() {
        Ok(())
    } else {
        Err(localize(catalog, OFFLINE_MESSAGE_KEY, OFFLINE_MESSAGE_FALLBACK))
    }
}

#[cfg(test)]
mod tests {
    use crate::locale::{NoopCatalog, StaticCatalog};

    use super::*;

    #[test]
    fn ensure_online_passes_when_connected() {
        ensure_online(&StaticConnectivity::new(true), &NoopCatalog).expect("online");
        ensure_online(&NoopConnectivity, &NoopCatalog).expect("online");
    }

    #[test]
    fn ensure_online_fails_with_fallback_message() {
        let err =
            ensure_online(&StaticConnectivity::new(false), &NoopCatalog).expect_err("offline");
        assert_eq!(err, OFFLINE_MESSAGE_FALLBACK);
    }

    #[test]
    fn ensure_online_fails_with_catalog_message() {
        let catalog = StaticCatalog::from_pairs(&[(OFFLINE_MESSAGE_KEY, "No connection")]);
        let err = ensure_online(&StaticConnectivity::new(false), &catalog).expect_err("offline");
        assert_eq!(err, "No connection");
    }
}
