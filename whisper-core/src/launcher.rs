//! Launcher for the installed Whisper binary
//!
//! Forwards the current invocation to `<package-root>/bin/whisper[.exe]`:
//! arguments pass through unchanged, the standard streams are inherited and
//! the child's exit status becomes ours.

use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus};
use thiserror::Error;

use crate::config::{constants, default_package_root};

/// Message printed when the installed binary can't be found
pub const MISSING_BINARY_MESSAGE: &str =
    "Whisper CLI executable not found! Please ensure it is installed correctly.";

/// Why a launch did not end in a successful child exit
#[derive(Debug, Error)]
pub enum LaunchError {
    /// Nothing installed at the expected path
    #[error("{}", MISSING_BINARY_MESSAGE)]
    BinaryMissing(PathBuf),

    /// The binary exists but could not be started
    #[error("Failed to run {}: {source}", .path.display())]
    Spawn {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The child ran and exited unsuccessfully
    #[error("Whisper CLI exited with status {code}")]
    ChildFailed { code: i32 },
}

impl LaunchError {
    /// Process exit code the launcher should terminate with
    pub fn exit_code(&self) -> i32 {
        match self {
            LaunchError::BinaryMissing(_) | LaunchError::Spawn { .. } => 1,
            LaunchError::ChildFailed { code } => *code,
        }
    }
}

/// Expected binary path under a package root for the host platform
pub fn binary_path_for(package_root: &Path) -> PathBuf {
    let name = if cfg!(windows) { "whisper.exe" } else { "whisper" };
    package_root.join(constants::BIN_DIR).join(name)
}

/// Exit code for a finished child. Signal deaths follow the shell
/// convention of 128 + signal number.
pub fn exit_code_of(status: ExitStatus) -> i32 {
    if let Some(code) = status.code() {
        return code;
    }

    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;
        if let Some(signal) = status.signal() {
            return 128 + signal;
        }
    }

    1
}

/// Runs the installed Whisper binary
#[derive(Debug, Clone)]
pub struct Launcher {
    binary: PathBuf,
}

impl Launcher {
    pub fn new(binary: PathBuf) -> Self {
        Self { binary }
    }

    /// Launcher for the binary under the default package root
    pub fn locate() -> Self {
        Self::new(binary_path_for(&default_package_root()))
    }

    pub fn binary(&self) -> &Path {
        &self.binary
    }

    /// Spawns the binary with `args` and waits for it. A non-zero exit is
    /// returned as [`LaunchError::ChildFailed`].
    pub fn run<I, S>(&self, args: I) -> Result<(), LaunchError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        if !self.binary.exists() {
            return Err(LaunchError::BinaryMissing(self.binary.clone()));
        }

        log::debug!("Launching {}", self.binary.display());

        let status = Command::new(&self.binary)
            .args(args)
            .status()
            .map_err(|source| LaunchError::Spawn {
                path: self.binary.clone(),
                source,
            })?;

        if status.success() {
            Ok(())
        } else {
            let code = exit_code_of(status);
            log::debug!("{} exited with {}", self.binary.display(), code);
            Err(LaunchError::ChildFailed { code })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_binary_path_for() {
        let path = binary_path_for(Path::new("/opt/whisper"));
        let expected = if cfg!(windows) { "whisper.exe" } else { "whisper" };
        assert_eq!(path, Path::new("/opt/whisper").join("bin").join(expected));
    }

    #[test]
    fn test_missing_binary_exits_one() {
        let temp_dir = TempDir::new().unwrap();
        let launcher = Launcher::new(binary_path_for(temp_dir.path()));

        let err = launcher.run(["--help"]).unwrap_err();

        assert!(matches!(err, LaunchError::BinaryMissing(_)));
        assert_eq!(err.exit_code(), 1);
        assert_eq!(err.to_string(), MISSING_BINARY_MESSAGE);
    }

    #[cfg(unix)]
    mod unix {
        use super::*;
        use std::fs;
        use std::os::unix::fs::PermissionsExt;

        /// Installs a shell script standing in for the Whisper binary. It
        /// records its arguments one per line and exits with `exit_code`.
        fn fake_binary(temp_dir: &TempDir, exit_code: i32) -> (PathBuf, PathBuf) {
            let binary = binary_path_for(temp_dir.path());
            fs::create_dir_all(binary.parent().unwrap()).unwrap();
            let record = temp_dir.path().join("args.txt");
            let script = format!(
                "#!/bin/sh\nfor arg in \"$@\"; do printf '%s\\n' \"$arg\" >> '{}'; done\nexit {}\n",
                record.display(),
                exit_code
            );
            fs::write(&binary, script).unwrap();
            fs::set_permissions(&binary, fs::Permissions::from_mode(0o755)).unwrap();
            (binary, record)
        }

        fn recorded_args(record: &Path) -> Vec<String> {
            fs::read_to_string(record)
                .unwrap_or_default()
                .lines()
                .map(str::to_string)
                .collect()
        }

        #[test]
        fn test_forwards_args_in_order() {
            let temp_dir = TempDir::new().unwrap();
            let (binary, record) = fake_binary(&temp_dir, 0);

            let args = ["scan", "--path", "src dir", "-v", "--", "--path"];
            Launcher::new(binary).run(args).unwrap();

            assert_eq!(recorded_args(&record), args);
        }

        #[test]
        fn test_no_args_forwarded_when_none_given() {
            let temp_dir = TempDir::new().unwrap();
            let (binary, record) = fake_binary(&temp_dir, 0);

            Launcher::new(binary).run(Vec::<String>::new()).unwrap();

            assert!(recorded_args(&record).is_empty());
        }

        #[test]
        fn test_child_exit_code_propagates() {
            let temp_dir = TempDir::new().unwrap();
            let (binary, record) = fake_binary(&temp_dir, 3);

            let err = Launcher::new(binary).run(["audit"]).unwrap_err();

            assert!(matches!(err, LaunchError::ChildFailed { code: 3 }));
            assert_eq!(err.exit_code(), 3);
            assert_eq!(recorded_args(&record), ["audit"]);
        }

        #[test]
        fn test_unexecutable_binary_is_spawn_error() {
            let temp_dir = TempDir::new().unwrap();
            let (binary, _) = fake_binary(&temp_dir, 0);
            fs::set_permissions(&binary, fs::Permissions::from_mode(0o644)).unwrap();

            let err = Launcher::new(binary).run(["scan"]).unwrap_err();

            assert!(matches!(err, LaunchError::Spawn { .. }));
            assert_eq!(err.exit_code(), 1);
            assert!(err.to_string().starts_with("Failed to run "));
            assert!(std::error::Error::source(&err).is_some());
        }

        #[test]
        fn test_signal_exit_code() {
            use std::os::unix::process::ExitStatusExt;
            // Raw wait status for SIGKILL
            assert_eq!(exit_code_of(ExitStatus::from_raw(9)), 137);
            assert_eq!(exit_code_of(ExitStatus::from_raw(2 << 8)), 2);
        }
    }
}
