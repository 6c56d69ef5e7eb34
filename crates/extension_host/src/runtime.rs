//! Extension runtime metadata contracts and user-agent parsing.

/// Host service exposing extension runtime metadata.
///
/// All values are available synchronously from the host runtime; adapters return owned strings
/// so callers never borrow host-managed state.
pub trait HostRuntime {
    /// Returns the extension's unique runtime identifier.
    fn extension_id(&self) -> String;

    /// Returns the version string declared by the extension manifest.
    fn manifest_version(&self) -> String;

    /// Returns the browser user-agent string.
    fn user_agent(&self) -> String;
}

#[derive(Debug, Clone, Copy, Default)]
/// No-op runtime adapter reporting empty metadata.
pub struct NoopHostRuntime;

impl HostRuntime for NoopHostRuntime {
    fn extension_id(&self) -> String {
        String::new()
    }

    fn manifest_version(&self) -> String {
        String::new()
    }

    fn user_agent(&self) -> String {
        String::new()
    }
}

#[derive(Debug, Clone, Default)]
/// Runtime adapter reporting fixed metadata.
pub struct StaticHostRuntime {
    /// Extension runtime identifier.
    pub extension_id: String,
    /// Extension manifest version string.
    pub manifest_version: String,
    /// Browser user-agent string.
    pub user_agent: String,
}

impl HostRuntime for StaticHostRuntime {
    fn extension_id(&self) -> String {
        self.extension_id.clone()
    }

    fn manifest_version(&self) -> String {
        self.manifest_version.clone()
    }

    fn user_agent(&self) -> String {
        self.user_agent.clone()
    }
}

/// Returns the extension's origin URL for `runtime`'s identifier.
pub fn extension_origin<R: HostRuntime + ?Sized>(runtime: &R) -> String {
    format!("chrome-extension://{}", runtime.extension_id())
}

/// Extracts the browser's dotted version from a user-agent string.
///
/// Recognizes the `Chrome/` and `Chromium/` product tokens and requires the leading version
/// segment to be numeric. Returns `None` when neither token is present or the segment is
/// malformed.
pub fn browser_version(user_agent: &str) -> Option<&str> {
    let start = product_version_start(user_agent)?;
    let rest = &user_agent[start..];
    let version = match rest.find(' ') {
        Some(end) => &rest[..end],
        None => rest,
    };
    let major = version.split('.').next().unwrap_or(version);
    if major.is_empty() || !major.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    Some(version)
}

/// Extracts the browser's major version number from a user-agent string.
pub fn browser_major_version(user_agent: &str) -> Option<u32> {
    browser_version(user_agent)?
        .split('.')
        .next()
        .and_then(|major| major.parse().ok())
}

fn product_version_start(user_agent: &str) -> Option<usize> {
    for marker in ["Chrome/", "Chromium/"] {
        if let Some(index) = user_agent.find(marker) {
            return Some(index + marker.len());
        }
    }
    None
}
