use whisper_core::{LaunchError, Launcher};

/// Forwards this process's arguments to the installed Whisper binary and
/// exits with its status. Shared by the `whisper` and `whisper-ai` entry points.
pub fn run() -> ! {
    // Stay quiet unless RUST_LOG asks otherwise: the streams belong to the child
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let launcher = Launcher::locate();
    log::debug!("Resolved Whisper binary: {}", launcher.binary().display());

    match launcher.run(std::env::args_os().skip(1)) {
        Ok(()) => std::process::exit(0),
        Err(e) => {
            match &e {
                LaunchError::BinaryMissing(_) | LaunchError::Spawn { .. } => eprintln!("{}", e),
                // The child already reported its own failure
                LaunchError::ChildFailed { .. } => log::debug!("{}", e),
            }
            std::process::exit(e.exit_code());
        }
    }
}
