//! Platform identification contracts and adapters.

use std::{future::Future, pin::Pin};

use serde::{Deserialize, Serialize};

/// Object-safe boxed future used by [`PlatformInfo`].
pub type PlatformInfoFuture<'a, T> = Pin<Box<dyn Future<Output = T> + 'a>>;

/// Operating system families reported by the host platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlatformOs {
    /// Microsoft Windows.
    Windows,
    /// Apple macOS.
    Mac,
    /// Android.
    Android,
    /// ChromeOS.
    ChromeOs,
    /// Linux.
    Linux,
    /// OpenBSD.
    OpenBsd,
    /// Unrecognized or unavailable platform.
    Unknown,
}

impl PlatformOs {
    /// Parses the host platform's short OS token.
    ///
    /// Unrecognized tokens map to [`PlatformOs::Unknown`].
    pub fn from_token(token: &str) -> Self {
        match token {
            "win" => Self::Windows,
            "mac" => Self::Mac,
            "android" => Self::Android,
            "cros" => Self::ChromeOs,
            "linux" => Self::Linux,
            "openbsd" => Self::OpenBsd,
            _ => Self::Unknown,
        }
    }

    /// Returns the human-readable OS label.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Windows => "MS Windows",
            Self::Mac => "Mac",
            Self::Android => "Android",
            Self::ChromeOs => "Chrome OS",
            Self::Linux => "Linux",
            Self::OpenBsd => "OpenBSD",
            Self::Unknown => "Unknown",
        }
    }

    /// Returns whether this is Microsoft Windows.
    pub const fn is_windows(self) -> bool {
        matches!(self, Self::Windows)
    }

    /// Returns whether this is Apple macOS.
    pub const fn is_mac(self) -> bool {
        matches!(self, Self::Mac)
    }

    /// Returns whether this is ChromeOS.
    pub const fn is_chrome_os(self) -> bool {
        matches!(self, Self::ChromeOs)
    }
}

impl std::fmt::Display for PlatformOs {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Host service reporting platform details.
pub trait PlatformInfo {
    /// Reports the host operating system family.
    fn platform_os<'a>(&'a self) -> PlatformInfoFuture<'a, Result<PlatformOs, String>>;
}

#[derive(Debug, Clone, Copy, Default)]
/// Platform adapter that always fails, for unsupported targets.
pub struct NoopPlatformInfo;

impl PlatformInfo for NoopPlatformInfo {
    fn platform_os<'a>(&'a self) -> PlatformInfoFuture<'a, Result<PlatformOs, String>> {
        Box::pin(async { Err("platform info unavailable".to_string()) })
    }
}

#[derive(Debug, Clone, Copy)]
/// Platform adapter reporting a fixed OS.
pub struct StaticPlatformInfo {
    os: PlatformOs,
}

impl StaticPlatformInfo {
    /// Creates an adapter that always reports `os`.
    pub const fn new(os: PlatformOs) -> Self {
        Self { os }
    }
}

impl PlatformInfo for StaticPlatformInfo {
    fn platform_os<'a>(&'a self) -> PlatformInfoFuture<'a, Result<PlatformOs, String>> {
        Box::pin(async move { Ok(self.os) })
    }
}

/// Resolves the platform OS, mapping service failures to [`PlatformOs::Unknown`].
pub async fn platform_os_or_unknown<P: PlatformInfo + ?Sized>(info: &P) -> PlatformOs {
    info.platform_os().await.unwrap_or(PlatformOs::Unknown)
}
