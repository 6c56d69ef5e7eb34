//! Shared host service bundle for runtime composition.

use std::rc::Rc;

use crate::{
    ConnectivityProbe, DiagnosticsSink, HostRuntime, KeyValueAccessor, MemoryArea, MessageCatalog,
    NoopBus, NoopCatalog, NoopConnectivity, NoopDiagnostics, NoopHostRuntime, NoopPlatformInfo,
    PlatformInfo, RuntimeBus, StorageArea,
};

/// Runtime-selected host service bundle injected into the storage facade.
///
/// All environment-specific service selection happens before this bundle is installed, which
/// keeps facade consumers decoupled from concrete adapter types.
#[derive(Clone)]
pub struct HostServices {
    /// Persistent key/value storage area.
    pub area: Rc<dyn StorageArea>,
    /// Fire-and-forget signal bus.
    pub bus: Rc<dyn RuntimeBus>,
    /// Failure-report sink.
    pub diagnostics: Rc<dyn DiagnosticsSink>,
    /// Localized message catalog.
    pub catalog: Rc<dyn MessageCatalog>,
    /// Platform information service.
    pub platform: Rc<dyn PlatformInfo>,
    /// Extension runtime metadata service.
    pub runtime: Rc<dyn HostRuntime>,
    /// Network reachability probe.
    pub connectivity: Rc<dyn ConnectivityProbe>,
}

impl HostServices {
    /// Builds a bundle of in-memory and no-op adapters with no host integration.
    ///
    /// Storage round-trips within the process; every other service reports its baseline
    /// (no messages, no listeners, unknown platform, online).
    pub fn headless() -> Self {
        Self {
            area: Rc::new(MemoryArea::new()),
            bus: Rc::new(NoopBus),
            diagnostics: Rc::new(NoopDiagnostics),
            catalog: Rc::new(NoopCatalog),
            platform: Rc::new(NoopPlatformInfo),
            runtime: Rc::new(NoopHostRuntime),
            connectivity: Rc::new(NoopConnectivity),
        }
    }

    /// Builds a [`KeyValueAccessor`] over this bundle's storage services.
    pub fn accessor(&self) -> KeyValueAccessor {
        KeyValueAccessor::new(
            Rc::clone(&self.area),
            Rc::clone(&self.bus),
            Rc::clone(&self.diagnostics),
        )
    }
}
