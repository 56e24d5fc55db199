//! Release artifact download
//!
//! Fetches a platform artifact from the release location into the install
//! directory. The body lands in a temp file next to the target and is only
//! renamed into place once complete and verified, so a failed transfer never
//! leaves a partial executable behind.

use anyhow::{bail, Context, Result};
use sha2::{Digest, Sha256};
use std::io::Write;
use std::path::Path;
use std::time::Duration;

/// Blocking HTTP client used for release downloads
pub fn release_client() -> Result<reqwest::blocking::Client> {
    reqwest::blocking::Client::builder()
        .user_agent(concat!("whisper-install/", env!("CARGO_PKG_VERSION")))
        .connect_timeout(Duration::from_secs(30))
        .build()
        .context("Failed to build HTTP client")
}

/// Joins the release base URL and an artifact name
pub fn artifact_url(release_url: &str, artifact: &str) -> String {
    format!("{}/{}", release_url.trim_end_matches('/'), artifact)
}

/// Downloads `url` to `target`, verifying its SHA-256 when `expected_sha256`
/// is given. Returns the hex digest of what was written.
pub fn fetch_artifact(
    client: &reqwest::blocking::Client,
    url: &str,
    target: &Path,
    expected_sha256: Option<&str>,
) -> Result<String> {
    log::info!("Downloading {}", url);

    let mut response = client
        .get(url)
        .send()
        .with_context(|| format!("Failed to download {}", url))?;

    if !response.status().is_success() {
        bail!("Release asset not found: {} (HTTP {})", url, response.status());
    }

    let dir = target
        .parent()
        .with_context(|| format!("{} has no parent directory", target.display()))?;
    let temp = tempfile::NamedTempFile::new_in(dir)
        .with_context(|| format!("Failed to create temp file in {}", dir.display()))?;

    let mut writer = HashingWriter {
        inner: temp.as_file(),
        hasher: Sha256::new(),
    };
    let written = response
        .copy_to(&mut writer)
        .context("Failed to read response body")?;
    writer.flush().context("Failed to flush download")?;
    let digest = hex::encode(writer.hasher.finalize());

    log::debug!("Received {} bytes, sha256 {}", written, digest);

    if let Some(expected) = expected_sha256 {
        if !expected.trim().eq_ignore_ascii_case(&digest) {
            bail!(
                "Checksum mismatch for {}: expected {}, got {}",
                url,
                expected.trim(),
                digest
            );
        }
    }

    temp.persist(target)
        .with_context(|| format!("Failed to move download to {}", target.display()))?;

    Ok(digest)
}

struct HashingWriter<W: Write> {
    inner: W,
    hasher: Sha256,
}

impl<W: Write> Write for HashingWriter<W> {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        let n = self.inner.write(buf)?;
        self.hasher.update(&buf[..n]);
        Ok(n)
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.inner.flush()
    }
}

/// Client for tests: mock servers listen on localhost, so skip any proxy
/// configured in the environment.
#[cfg(test)]
pub(crate) fn test_client() -> reqwest::blocking::Client {
    reqwest::blocking::Client::builder()
        .no_proxy()
        .build()
        .unwrap()
}
