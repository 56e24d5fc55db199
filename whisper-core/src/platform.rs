//! Platform resolution
//!
//! Maps an operating-system identifier onto the prebuilt Whisper artifact
//! published for it and the executable name it is installed under.
//! CPU architecture is not considered: one artifact per OS family.

use std::fmt;

/// Supported platform families
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    Windows,
    MacOs,
    Linux,
}

impl Platform {
    /// Resolves an OS identifier such as `std::env::consts::OS` or the
    /// output of `uname -s`. Matching is case-insensitive.
    ///
    /// Returns `None` for anything outside the three supported families.
    pub fn from_os_name(os: &str) -> Option<Self> {
        match os.trim().to_lowercase().as_str() {
            "windows" => Some(Platform::Windows),
            "darwin" | "macos" => Some(Platform::MacOs),
            "linux" => Some(Platform::Linux),
            _ => None,
        }
    }

    /// Platform of the running host, if supported
    pub fn current() -> Option<Self> {
        Self::from_os_name(std::env::consts::OS)
    }

    /// Release artifact filename for this platform
    pub fn artifact_name(&self) -> &'static str {
        match self {
            Platform::Windows => "whisper-win.exe",
            Platform::MacOs => "whisper-macos",
            Platform::Linux => "whisper-linux",
        }
    }

    /// Filename the artifact is installed as
    pub fn executable_name(&self) -> &'static str {
        match self {
            Platform::Windows => "whisper.exe",
            Platform::MacOs | Platform::Linux => "whisper",
        }
    }

    pub fn is_windows(&self) -> bool {
        matches!(self, Platform::Windows)
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Platform::Windows => "windows",
            Platform::MacOs => "macos",
            Platform::Linux => "linux",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_windows_names() {
        let platform = Platform::from_os_name("windows").unwrap();
        assert_eq!(platform, Platform::Windows);
        assert_eq!(platform.artifact_name(), "whisper-win.exe");
        assert_eq!(platform.executable_name(), "whisper.exe");
        assert!(platform.is_windows());
    }

    #[test]
    fn test_macos_names() {
        for id in ["darwin", "macos", "Darwin"] {
            let platform = Platform::from_os_name(id).unwrap();
            assert_eq!(platform, Platform::MacOs);
            assert_eq!(platform.artifact_name(), "whisper-macos");
            assert_eq!(platform.executable_name(), "whisper");
        }
    }

    #[test]
    fn test_linux_names() {
        let platform = Platform::from_os_name("Linux").unwrap();
        assert_eq!(platform.artifact_name(), "whisper-linux");
        assert_eq!(platform.executable_name(), "whisper");
        assert!(!platform.is_windows());
    }

    #[test]
    fn test_unsupported_os() {
        for id in ["freebsd", "solaris", "", "win"] {
            assert_eq!(Platform::from_os_name(id), None, "{id:?} should be unsupported");
        }
    }

    #[test]
    fn test_current_matches_host() {
        let current = Platform::current();
        if cfg!(target_os = "linux") {
            assert_eq!(current, Some(Platform::Linux));
        } else if cfg!(target_os = "macos") {
            assert_eq!(current, Some(Platform::MacOs));
        } else if cfg!(target_os = "windows") {
            assert_eq!(current, Some(Platform::Windows));
        }
    }
}
