//! Typed host-service contracts and shared helpers for browser-extension utilities.
//!
//! This crate is the API-first boundary for extension platform services. It exposes the
//! key/value storage-area contract with its best-effort accessor, the runtime signal bus and
//! diagnostics sink, platform/runtime metadata services, and small pure helpers, while concrete
//! persistence lives in `extension_host_fs` and the installed facade surface in
//! `extension_storage`.

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

pub mod connectivity;
pub mod diagnostics;
pub mod host;
pub mod locale;
pub mod messaging;
pub mod platform;
pub mod random;
pub mod runtime;
pub mod storage;
pub mod text;
pub mod time;

pub use connectivity::{
    ensure_online, ConnectivityProbe, NoopConnectivity, StaticConnectivity,
    OFFLINE_MESSAGE_FALLBACK, OFFLINE_MESSAGE_KEY,
};
pub use diagnostics::{DiagnosticRecord, DiagnosticsSink, MemoryDiagnostics, NoopDiagnostics};
pub use host::HostServices;
pub use locale::{localize, MessageCatalog, NoopCatalog, StaticCatalog};
pub use messaging::{BusError, DeadBus, MemoryBus, NoopBus, RuntimeBus, RuntimeBusFuture, Signal};
pub use platform::{
    platform_os_or_unknown, NoopPlatformInfo, PlatformInfo, PlatformInfoFuture, PlatformOs,
    StaticPlatformInfo,
};
pub use random::{
    random_float, random_int, random_string, random_string_default, shuffle,
    DEFAULT_RANDOM_STRING_LEN,
};
pub use runtime::{
    browser_major_version, browser_version, extension_origin, HostRuntime, NoopHostRuntime,
    StaticHostRuntime,
};
pub use storage::accessor::{KeyValueAccessor, READ_DIAGNOSTIC_CONTEXT};
pub use storage::area::{
    entry_bytes, MemoryArea, NoopArea, StorageArea, StorageAreaFuture, StorageEntries,
};
pub use storage::error::StorageError;
pub use storage::failing::{FailingArea, FailurePolicy};
pub use text::is_blank;
pub use time::{next_monotonic_timestamp_ms, unix_time_ms_now};
