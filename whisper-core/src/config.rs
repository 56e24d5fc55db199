use std::path::PathBuf;

/// Constants for external URLs and installation
pub mod constants {
    /// GitHub release location the platform artifacts are published under
    pub const RELEASE_URL: &str = "https://github.com/Alinxus/whisper-cli/releases/latest/download";

    /// Build step that produces the artifacts in the local dist directory
    pub const BUILD_COMMAND: &str = "npm run build:standalone";

    /// Alternate install path for platforms without a prebuilt artifact
    pub const NPM_FALLBACK: &str = "npm install -g whisper-ai";

    /// Directory (relative to the package root) holding the installed binary
    pub const BIN_DIR: &str = "bin";

    /// Default local build output directory
    pub const DIST_DIR: &str = "dist";

    /// Overrides the package root for both installer and launcher
    pub const HOME_ENV: &str = "WHISPER_HOME";
}

/// Configuration options for the installer
#[derive(Debug, Clone)]
pub struct InstallConfig {
    /// Package root; the binary is installed under `<prefix>/bin`
    pub prefix: PathBuf,
    /// Directory searched for locally built artifacts (`<prefix>/dist` by default)
    pub dist_dir: PathBuf,
    /// OS identifier to install for (defaults to the host)
    pub os: String,
    /// Fetch the artifact from the release location when no local build exists
    pub download: bool,
    /// Base URL the artifact name is appended to
    pub release_url: String,
    /// Expected lowercase hex SHA-256 of the downloaded artifact
    pub expected_sha256: Option<String>,
}

impl Default for InstallConfig {
    fn default() -> Self {
        Self::for_prefix(default_package_root())
    }
}

impl InstallConfig {
    /// Configuration rooted at `prefix`, looking for artifacts in `<prefix>/dist`
    pub fn for_prefix(prefix: PathBuf) -> Self {
        Self {
            dist_dir: prefix.join(constants::DIST_DIR),
            prefix,
            os: std::env::consts::OS.to_string(),
            download: false, // Local build output is the guaranteed path
            release_url: constants::RELEASE_URL.to_string(),
            expected_sha256: None,
        }
    }

    /// Directory the executable is installed into
    pub fn bin_dir(&self) -> PathBuf {
        self.prefix.join(constants::BIN_DIR)
    }
}

/// Resolves the package root: `WHISPER_HOME` when set, otherwise the
/// directory containing the running executable.
pub fn default_package_root() -> PathBuf {
    if let Some(home) = std::env::var_os(constants::HOME_ENV) {
        if !home.is_empty() {
            return PathBuf::from(home);
        }
    }

    std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(|p| p.to_path_buf()))
        .unwrap_or_else(|| PathBuf::from("."))
}
