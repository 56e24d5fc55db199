//! Platform binary installer
//!
//! Provisions the prebuilt Whisper executable for the host platform under
//! `<prefix>/bin`. Every fault is converted into an [`InstallOutcome`] with a
//! manual remedy; nothing here is allowed to abort the surrounding package
//! installation.

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

use crate::config::{constants, InstallConfig};
use crate::download;
use crate::install_log::InstallLogger;
use crate::platform::Platform;

/// Result of an installer run
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InstallOutcome {
    /// The executable is in place
    Installed { path: PathBuf },
    /// No artifact is published for this OS; nothing was installed
    Unsupported { os: String, fallback: String },
    /// The artifact hasn't been built yet; nothing was installed
    SourceMissing { artifact: PathBuf, build_hint: String },
    /// Installation was attempted and failed
    Failed { error: String, remedy: String },
}

impl InstallOutcome {
    pub fn is_installed(&self) -> bool {
        matches!(self, InstallOutcome::Installed { .. })
    }
}

/// Where the installed bytes came from
enum Source {
    Local(PathBuf),
    Release(String),
}

/// Creates the install directory and its parents. Safe to call repeatedly.
pub fn ensure_install_dir(dir: &Path) -> Result<()> {
    fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create install directory {}", dir.display()))
}

/// Marks an installed binary executable. Windows has no mode bits to set.
pub fn make_executable(path: &Path, platform: Platform) -> Result<()> {
    if platform.is_windows() {
        return Ok(());
    }

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(path, fs::Permissions::from_mode(0o755))
            .with_context(|| format!("Failed to set permissions on {}", path.display()))?;
    }

    #[cfg(not(unix))]
    log::debug!("No permission bits to set for {} on this host", path.display());

    Ok(())
}

/// Copies `source` to `target` byte for byte, carrying over permission bits
/// and the modification time.
///
/// The bytes are staged in a temp file beside `target` and renamed over it,
/// so a running or half-written binary is never modified in place.
pub fn copy_artifact(source: &Path, target: &Path) -> Result<u64> {
    let dir = target
        .parent()
        .with_context(|| format!("{} has no parent directory", target.display()))?;
    let mut input = fs::File::open(source)
        .with_context(|| format!("Failed to open {}", source.display()))?;
    let metadata = input
        .metadata()
        .with_context(|| format!("Failed to read metadata of {}", source.display()))?;

    let mut staged = tempfile::NamedTempFile::new_in(dir)
        .with_context(|| format!("Failed to create temp file in {}", dir.display()))?;
    let bytes = std::io::copy(&mut input, staged.as_file_mut()).with_context(|| {
        format!("Failed to copy {} to {}", source.display(), target.display())
    })?;

    // mtime goes first: the staged file may become read-only below
    if let Ok(modified) = metadata.modified() {
        if let Err(e) = staged.as_file().set_modified(modified) {
            log::debug!("Could not preserve mtime on {}: {}", target.display(), e);
        }
    }
    fs::set_permissions(staged.path(), metadata.permissions())
        .with_context(|| format!("Failed to set permissions on {}", staged.path().display()))?;

    staged
        .persist(target)
        .with_context(|| format!("Failed to move staged copy to {}", target.display()))?;

    Ok(bytes)
}

/// Fallback instruction for platforms without a prebuilt artifact
pub fn unsupported_fallback() -> String {
    if which::which("npm").is_ok() {
        format!("Please use: {}", constants::NPM_FALLBACK)
    } else {
        format!(
            "Please install Node.js and use: {}",
            constants::NPM_FALLBACK
        )
    }
}

/// Installs the platform binary described by an [`InstallConfig`]
pub struct Installer {
    config: InstallConfig,
    logger: InstallLogger,
    client: Option<reqwest::blocking::Client>,
}

impl Installer {
    pub fn new(config: InstallConfig) -> Self {
        let logger = match InstallLogger::new() {
            Ok(logger) => {
                if let Err(e) = InstallLogger::cleanup_old_logs(
                    &std::env::temp_dir(),
                    crate::install_log::KEEP_LOGS,
                ) {
                    log::debug!("Failed to clean up old install logs: {}", e);
                }
                logger
            }
            Err(e) => {
                log::debug!("Install log disabled: {}", e);
                InstallLogger::disabled()
            }
        };
        Self::with_logger(config, logger)
    }

    pub fn with_logger(config: InstallConfig, logger: InstallLogger) -> Self {
        Self {
            config,
            logger,
            client: None,
        }
    }

    /// Use a preconfigured HTTP client for release downloads
    #[cfg(test)]
    pub(crate) fn with_client(mut self, client: reqwest::blocking::Client) -> Self {
        self.client = Some(client);
        self
    }

    /// Path of the install log, if one is being written
    pub fn log_path(&self) -> Option<&Path> {
        let path = self.logger.log_path();
        (!path.as_os_str().is_empty()).then_some(path)
    }

    /// Runs the installation. Never returns an error: every failure is
    /// reported and folded into the outcome.
    pub fn install(&mut self) -> InstallOutcome {
        let Some(platform) = Platform::from_os_name(&self.config.os) else {
            let os = self.config.os.clone();
            let fallback = unsupported_fallback();
            println!("⚠️  Unsupported platform: {}", os);
            println!("{}", fallback);
            self.logger.warn(&format!("Unsupported platform: {}", os));
            self.logger.finalize();
            return InstallOutcome::Unsupported { os, fallback };
        };

        self.logger.info(&format!(
            "Platform: {} (artifact {}, executable {})",
            platform,
            platform.artifact_name(),
            platform.executable_name()
        ));

        let outcome = match self.try_install(platform) {
            Ok(outcome) => outcome,
            Err(e) => {
                let error = format!("{:#}", e);
                let remedy = "Please install manually or use Node.js version".to_string();
                println!("❌ Failed to install Whisper binary: {}", error);
                println!("{}", remedy);
                self.logger.error(&error);
                InstallOutcome::Failed { error, remedy }
            }
        };

        self.logger.finalize();
        outcome
    }

    fn try_install(&mut self, platform: Platform) -> Result<InstallOutcome> {
        let bin_dir = self.config.bin_dir();
        ensure_install_dir(&bin_dir)?;
        let target = bin_dir.join(platform.executable_name());

        println!("📦 Installing Whisper CLI binary for {}...", platform);

        let source = match self.locate_source(platform) {
            Some(source) => source,
            None => {
                let artifact = self.config.dist_dir.join(platform.artifact_name());
                println!("ℹ️  Local binary not found. You'll need to build it first with:");
                println!("   {}", constants::BUILD_COMMAND);
                self.logger
                    .info(&format!("Source artifact missing: {}", artifact.display()));
                return Ok(InstallOutcome::SourceMissing {
                    artifact,
                    build_hint: constants::BUILD_COMMAND.to_string(),
                });
            }
        };

        match source {
            Source::Local(path) => {
                let bytes = copy_artifact(&path, &target)?;
                println!("✅ Copied local binary to {}", target.display());
                self.logger.info(&format!(
                    "Copied {} ({} bytes) to {}",
                    path.display(),
                    bytes,
                    target.display()
                ));
            }
            Source::Release(url) => {
                let client = match self.client.take() {
                    Some(client) => client,
                    None => download::release_client()?,
                };
                let digest = download::fetch_artifact(
                    &client,
                    &url,
                    &target,
                    self.config.expected_sha256.as_deref(),
                )?;
                println!("✅ Downloaded {} to {}", url, target.display());
                self.logger
                    .info(&format!("Downloaded {} (sha256 {})", url, digest));
            }
        }

        make_executable(&target, platform)?;

        println!("✅ Whisper CLI installed successfully!");
        println!("🚀 You can now use: whisper --help");
        self.logger.info(&format!("Installed to {}", target.display()));

        Ok(InstallOutcome::Installed { path: target })
    }

    fn locate_source(&self, platform: Platform) -> Option<Source> {
        let local = self.config.dist_dir.join(platform.artifact_name());
        if local.is_file() {
            log::debug!("Using local artifact {}", local.display());
            return Some(Source::Local(local));
        }

        if self.config.download {
            let url = download::artifact_url(&self.config.release_url, platform.artifact_name());
            return Some(Source::Release(url));
        }

        None
    }
}
