// crates/satcat-cli/src/fetch.rs
// ============================================================================
// Module: Archive Fetcher
// Description: Fetch-to-local-file collaborator for catalog archives.
// Purpose: Download archive blobs idempotently with atomic persistence.
// Dependencies: reqwest, tempfile, url
// ============================================================================

//! ## Overview
//! Archives download once into the working directory, named after the final
//! URL path segment. A file that already exists is reused unless a refetch
//! is forced, so repeated loads stay cheap and offline-friendly. Downloads
//! land in a temporary file first and are renamed into place, so a partial
//! download never shadows the target name.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::io::Write;
use std::path::Path;
use std::path::PathBuf;

use url::Url;

use crate::CliError;

// ============================================================================
// SECTION: Fetching
// ============================================================================

/// Derives the local file name for an archive URL: the final non-empty path
/// segment, under the given directory.
///
/// # Errors
///
/// Returns [`CliError::Fetch`] when the URL does not parse or carries no
/// usable file name.
pub fn target_path(raw_url: &str, directory: &Path) -> Result<PathBuf, CliError> {
    let url = Url::parse(raw_url)
        .map_err(|err| CliError::Fetch(format!("invalid url {raw_url}: {err}")))?;
    let name = url
        .path_segments()
        .and_then(|segments| segments.filter(|segment| !segment.is_empty()).next_back())
        .map(ToString::to_string)
        .ok_or_else(|| CliError::Fetch(format!("url has no file name: {raw_url}")))?;
    Ok(directory.join(name))
}

/// Downloads one archive URL to its local target, returning the target path.
///
/// An existing target is reused untouched unless `refetch` is set.
///
/// # Errors
///
/// Returns [`CliError::Fetch`] on URL, network, or persistence failures.
pub fn fetch_to_file(raw_url: &str, directory: &Path, refetch: bool) -> Result<PathBuf, CliError> {
    let target = target_path(raw_url, directory)?;
    if target.exists() && !refetch {
        tracing::debug!(target = %target.display(), "archive already present, skipping fetch");
        return Ok(target);
    }
    let response = reqwest::blocking::get(raw_url)
        .and_then(reqwest::blocking::Response::error_for_status)
        .map_err(|err| CliError::Fetch(format!("download failed for {raw_url}: {err}")))?;
    let body = response
        .bytes()
        .map_err(|err| CliError::Fetch(format!("download failed for {raw_url}: {err}")))?;
    let mut staged = tempfile::NamedTempFile::new_in(directory)
        .map_err(|err| CliError::Fetch(format!("cannot stage download: {err}")))?;
    staged
        .write_all(&body)
        .map_err(|err| CliError::Fetch(format!("cannot stage download: {err}")))?;
    staged
        .persist(&target)
        .map_err(|err| CliError::Fetch(format!("cannot persist download: {err}")))?;
    tracing::info!(url = raw_url, target = %target.display(), bytes = body.len(), "archive fetched");
    Ok(target)
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[cfg(test)]
mod tests {
    #![allow(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::panic,
        reason = "Test-only assertions use unwrap/expect for clarity."
    )]

    use super::fetch_to_file;
    use super::target_path;

    #[test]
    fn target_name_is_the_final_path_segment() {
        let directory = tempfile::tempdir().unwrap();
        let target =
            target_path("https://example.org/archives/visual.txt", directory.path()).unwrap();
        assert_eq!(target.file_name().unwrap(), "visual.txt");
        let trailing =
            target_path("https://example.org/archives/visual.txt/", directory.path()).unwrap();
        assert_eq!(trailing.file_name().unwrap(), "visual.txt");
    }

    #[test]
    fn unusable_urls_are_rejected() {
        let directory = tempfile::tempdir().unwrap();
        assert!(target_path("not a url", directory.path()).is_err());
        assert!(target_path("https://example.org", directory.path()).is_err());
    }

    #[test]
    fn existing_target_skips_the_network() {
        let directory = tempfile::tempdir().unwrap();
        let target = directory.path().join("visual.txt");
        std::fs::write(&target, "cached").unwrap();
        // The host is unresolvable, so reaching the network would fail.
        let fetched =
            fetch_to_file("https://satcat.invalid/visual.txt", directory.path(), false).unwrap();
        assert_eq!(fetched, target);
        assert_eq!(std::fs::read_to_string(&target).unwrap(), "cached");
    }
}
