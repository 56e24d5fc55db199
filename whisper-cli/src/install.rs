use clap::error::ErrorKind;
use whisper_core::{constants, InstallConfig, InstallOutcome, Installer};

mod cli;

fn main() {
    let args = match cli::try_parse_args() {
        Ok(args) => args,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => e.exit(),
        Err(e) => {
            // A bad flag or environment value must not fail the package install
            let _ = e.print();
            println!("⚠️  Skipping Whisper CLI binary installation.");
            println!("Run whisper-install --help for usage, or use: {}", constants::NPM_FALLBACK);
            return;
        }
    };

    // Initialize logger with appropriate level based on verbose flag
    let default_level = if args.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    let mut config = match args.prefix {
        Some(prefix) => InstallConfig::for_prefix(prefix),
        None => InstallConfig::default(),
    };
    if let Some(dist_dir) = args.dist_dir {
        config.dist_dir = dist_dir;
    }
    if let Some(os) = args.os {
        config.os = os;
    }
    if let Some(release_url) = args.release_url {
        config.release_url = release_url;
    }
    config.download = args.download;
    config.expected_sha256 = args.sha256;

    log::debug!("Install configuration: {:?}", config);

    let mut installer = Installer::new(config);
    let outcome = installer.install();

    match &outcome {
        InstallOutcome::Installed { path } => log::debug!("Installed {}", path.display()),
        InstallOutcome::Unsupported { .. } | InstallOutcome::SourceMissing { .. } => {
            log::debug!("Nothing installed")
        }
        InstallOutcome::Failed { .. } => {
            if let Some(log_path) = installer.log_path() {
                println!("Details were logged to {}", log_path.display());
            }
        }
    }

    // Install-time faults never fail the surrounding package install
}
