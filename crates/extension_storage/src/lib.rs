//! Installed-facade helpers over the extension host services.
//!
//! This crate provides the convenience layer consumers call directly: free async functions for
//! key/value storage plus synchronous platform/runtime queries, all resolved against a
//! process-local [`HostServices`] bundle installed once at startup. Without an installed
//! bundle the facade falls back to a headless in-memory bundle so tests and tools run without
//! host wiring.
//!
//! # Example
//!
//! ```rust
//! use serde_json::json;
//!
//! futures::executor::block_on(async {
//!     assert_eq!(
//!         extension_storage::get_or("ui.theme.v1", json!("light")).await,
//!         json!("light")
//!     );
//!     assert!(extension_storage::set("ui.theme.v1", json!("dark")).await);
//!     assert_eq!(
//!         extension_storage::get("ui.theme.v1").await,
//!         Some(json!("dark"))
//!     );
//! });
//! ```

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

use std::cell::{Cell, RefCell};

use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;

pub use extension_host::{
    entry_bytes, is_blank, localize, next_monotonic_timestamp_ms, platform_os_or_unknown,
    random_float, random_int, random_string, random_string_default, shuffle, unix_time_ms_now,
    BusError, ConnectivityProbe, DeadBus, DiagnosticRecord, DiagnosticsSink, FailingArea,
    FailurePolicy, HostRuntime, HostServices, KeyValueAccessor, MemoryArea, MemoryBus,
    MemoryDiagnostics, MessageCatalog, NoopArea, NoopBus, NoopCatalog, NoopConnectivity,
    NoopDiagnostics, NoopHostRuntime, NoopPlatformInfo, PlatformInfo, PlatformInfoFuture,
    PlatformOs, RuntimeBus, RuntimeBusFuture, Signal, StaticCatalog, StaticConnectivity,
    StaticHostRuntime, StaticPlatformInfo, StorageArea, StorageAreaFuture, StorageEntries,
    StorageError, DEFAULT_RANDOM_STRING_LEN, OFFLINE_MESSAGE_FALLBACK, OFFLINE_MESSAGE_KEY,
    READ_DIAGNOSTIC_CONTEXT,
};

/// Versioned storage key holding the development-mode flag.
pub const DEV_MODE_KEY: &str = "extension.dev_mode.v1";

thread_local! {
    static INSTALLED_SERVICES: RefCell<Option<HostServices>> = const { RefCell::new(None) };
    static DEV_MODE: Cell<bool> = const { Cell::new(false) };
}

/// Installs the process-local host service bundle used by this crate's free functions.
///
/// Replaces any previously installed bundle.
pub fn install(services: HostServices) {
    INSTALLED_SERVICES.with(|slot| *slot.borrow_mut() = Some(services));
}

/// Returns the installed service bundle.
///
/// A headless bundle is installed on first use when none was provided, so repeated calls
/// observe the same stores.
pub fn services() -> HostServices {
    INSTALLED_SERVICES.with(|slot| {
        slot.borrow_mut()
            .get_or_insert_with(HostServices::headless)
            .clone()
    })
}

fn accessor() -> KeyValueAccessor {
    services().accessor()
}

/// Reads one key, resolving both absence and failure to `None`.
///
/// Failed reads are reported once to the installed diagnostics sink.
pub async fn get(key: &str) -> Option<Value> {
    accessor().get(key).await
}

/// Reads one key, resolving both absence and failure to `default`.
pub async fn get_or(key: &str, default: Value) -> Value {
    accessor().get_or(key, default).await
}

/// Writes one key, resolving failure to `false`.
///
/// A failed write broadcasts one [`Signal::StorageExceeded`] on the installed bus.
pub async fn set(key: &str, value: Value) -> bool {
    accessor().set(key, value).await
}

/// Writes one key, best-effort restoring the prior state when the write fails.
pub async fn set_with_restore(key: &str, value: Value) -> bool {
    accessor().set_with_restore(key, value).await
}

/// Reads one key, distinguishing presence, absence, and failure.
///
/// # Errors
///
/// Returns an error when the underlying area read fails; absence is `Ok(None)`.
pub async fn lookup(key: &str) -> Result<Option<Value>, StorageError> {
    accessor().lookup(key).await
}

/// Writes one key as a single operation.
///
/// # Errors
///
/// Returns an error when the underlying area write fails.
pub async fn store(key: &str, value: Value) -> Result<(), StorageError> {
    accessor().store(key, value).await
}

/// Reads and deserializes one key, resolving absence, failure, and decode errors to `None`.
pub async fn get_as<T: DeserializeOwned>(key: &str) -> Option<T> {
    accessor().get_as(key).await
}

/// Reads and deserializes one key, resolving absence, failure, and decode errors to `default`.
pub async fn get_or_as<T: DeserializeOwned>(key: &str, default: T) -> T {
    accessor().get_or_as(key, default).await
}

/// Serializes and writes one key, resolving failure to `false`.
pub async fn set_as<T: Serialize>(key: &str, value: &T) -> bool {
    accessor().set_as(key, value).await
}

/// Resolves the development-mode flag from storage and installs it process-locally.
///
/// The flag defaults to `false` when [`DEV_MODE_KEY`] is absent or the read fails. Callers
/// that branch on [`dev_mode`] await this once during startup instead of racing a background
/// load.
pub async fn init_dev_mode() -> bool {
    let enabled = accessor().get_or_as(DEV_MODE_KEY, false).await;
    DEV_MODE.with(|flag| flag.set(enabled));
    enabled
}

/// Returns the development-mode flag resolved by [`init_dev_mode`].
///
/// `false` until initialization completes.
pub fn dev_mode() -> bool {
    DEV_MODE.with(Cell::get)
}

/// Reports the host operating system, mapping service failures to [`PlatformOs::Unknown`].
pub async fn platform_os() -> PlatformOs {
    let services = services();
    platform_os_or_unknown(services.platform.as_ref()).await
}

/// Returns the extension's unique runtime identifier.
pub fn extension_id() -> String {
    services().runtime.extension_id()
}

/// Returns the version string declared by the extension manifest.
pub fn manifest_version() -> String {
    services().runtime.manifest_version()
}

/// Returns the extension's origin URL.
pub fn extension_origin() -> String {
    let services = services();
    extension_host::extension_origin(services.runtime.as_ref())
}

/// Returns the browser's dotted version parsed from the host user agent.
pub fn browser_version() -> Option<String> {
    let user_agent = services().runtime.user_agent();
    extension_host::browser_version(&user_agent).map(String::from)
}

/// Returns the browser's major version parsed from the host user agent.
pub fn browser_major_version() -> Option<u32> {
    let user_agent = services().runtime.user_agent();
    extension_host::browser_major_version(&user_agent)
}

/// Checks the installed connectivity probe before a network operation.
///
/// # Errors
///
/// Returns the localized offline message when the host reports no connectivity.
pub fn ensure_online() -> Result<(), String> {
    let services = services();
    extension_host::ensure_online(services.connectivity.as_ref(), services.catalog.as_ref())
}
