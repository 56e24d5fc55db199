//! Core library for the Whisper CLI shim
//!
//! Installs the prebuilt Whisper executable for the host platform and
//! launches it with the caller's arguments. The executable itself is opaque
//! to this crate.

mod config;
mod download;
mod install_log;
mod installer;
mod launcher;
mod platform;

pub use config::{constants, default_package_root, InstallConfig};
pub use install_log::InstallLogger;
pub use installer::{ensure_install_dir, InstallOutcome, Installer};
pub use launcher::{binary_path_for, LaunchError, Launcher, MISSING_BINARY_MESSAGE};
pub use platform::Platform;
