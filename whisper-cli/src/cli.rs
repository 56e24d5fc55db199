use clap::builder::FalseyValueParser;
use clap::{ArgAction, Parser};
use std::path::PathBuf;

/// Installs the prebuilt Whisper CLI binary for this platform
#[derive(Parser, Debug)]
#[command(name = "whisper-install")]
#[command(author = "Whisper CLI Team")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Installs the Whisper CLI binary for this platform", long_about = None)]
pub struct Args {
    /// Package root; the binary is installed into <PREFIX>/bin
    #[arg(long = "prefix", env = "WHISPER_HOME", value_name = "DIR")]
    pub prefix: Option<PathBuf>,

    /// Directory containing locally built artifacts
    #[arg(long = "dist-dir", env = "WHISPER_DIST_DIR", value_name = "DIR")]
    pub dist_dir: Option<PathBuf>,

    /// Install for this OS identifier instead of the host (windows, darwin, linux)
    #[arg(long = "os", value_name = "OS")]
    pub os: Option<String>,

    /// Download the artifact from the release location if no local build exists
    #[arg(
        long = "download",
        env = "WHISPER_DOWNLOAD",
        action = ArgAction::SetTrue,
        value_parser = FalseyValueParser::new()
    )]
    pub download: bool,

    /// Base URL release artifacts are downloaded from
    #[arg(long = "release-url", env = "WHISPER_RELEASE_URL", value_name = "URL")]
    pub release_url: Option<String>,

    /// Expected SHA-256 of the downloaded artifact (hex)
    #[arg(long = "sha256", value_name = "HEX", requires = "download")]
    pub sha256: Option<String>,

    /// Verbose logging
    #[arg(short = 'v', long = "verbose")]
    pub verbose: bool,
}

/// Parses command-line arguments, leaving `--help`/`--version` and usage
/// errors to the caller
pub fn try_parse_args() -> Result<Args, clap::Error> {
    Args::try_parse()
}
