//! Remote downloads
//!
//! The [`Fetch`] trait is the seam the stager calls; [`HttpFetcher`] is the
//! blocking HTTP implementation used by the CLI. A download is written to
//! `<name>.part` and only renamed to its final name once complete, so a stable
//! name never refers to a half-written file.

use std::fs::{self, File};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use reqwest::{StatusCode, Url};
use reqwest::blocking::Client;
use reqwest::header::{CONTENT_DISPOSITION, CONTENT_TYPE};

use crate::error::{ItgError, Result, file_write_failed};
use crate::path_utils::sanitize_file_name;
use crate::progress::DownloadProgress;

use super::archive;

/// Name used when neither the response nor the URL suggests one
pub const DEFAULT_FILE_NAME: &str = "download.zip";

/// Content types accepted as archives
const ACCEPTED_CONTENT_TYPES: &[&str] = &[
    "application/zip",
    "application/x-zip",
    "application/x-zip-compressed",
    "application/x-tar",
    "application/x-gtar",
    "application/gzip",
    "application/x-gzip",
    "application/x-bzip2",
    "application/x-xz",
    "application/octet-stream",
];

/// Downloads a URL into a directory and returns the local file path
pub trait Fetch {
    fn fetch(&self, url: &str, dest_dir: &Path) -> Result<PathBuf>;
}

/// Blocking HTTP(S) downloader with a byte progress bar
pub struct HttpFetcher {
    client: Client,
    show_progress: bool,
}

fn download_failed(url: &str, reason: impl std::fmt::Display) -> ItgError {
    ItgError::DownloadFailed {
        url: url.to_string(),
        reason: reason.to_string(),
    }
}

impl HttpFetcher {
    pub fn new(show_progress: bool) -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("itg-cli/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| download_failed("<client>", e))?;
        Ok(Self {
            client,
            show_progress,
        })
    }
}

impl Fetch for HttpFetcher {
    fn fetch(&self, url: &str, dest_dir: &Path) -> Result<PathBuf> {
        let request_url = google_drive_direct_url(url).unwrap_or_else(|| url.to_string());
        tracing::info!(url = %request_url, "requesting download");

        let mut response = self
            .client
            .get(&request_url)
            .send()
            .map_err(|e| download_failed(url, e))?;

        if response.status() != StatusCode::OK {
            return Err(download_failed(
                url,
                format!("unsuccessful request with status {}", response.status()),
            ));
        }

        let headers = response.headers();
        let content_type = headers
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| download_failed(url, "no Content-Type header found"))?;
        validate_content_type(content_type).map_err(|reason| download_failed(url, reason))?;

        let file_name = headers
            .get(CONTENT_DISPOSITION)
            .and_then(|v| v.to_str().ok())
            .and_then(file_name_from_content_disposition)
            .or_else(|| file_name_from_url(response.url().as_str()))
            .unwrap_or_else(|| DEFAULT_FILE_NAME.to_string());

        fs::create_dir_all(dest_dir).map_err(|e| file_write_failed(dest_dir, e))?;
        let dest = dest_dir.join(&file_name);
        let part = dest_dir.join(format!("{file_name}.part"));

        let progress = if self.show_progress {
            DownloadProgress::new(response.content_length(), &file_name)
        } else {
            DownloadProgress::hidden()
        };

        if let Err(e) = stream_to_file(&mut response, &part, &progress) {
            progress.abandon();
            let _ = fs::remove_file(&part);
            return Err(e);
        }
        progress.finish();

        if dest.exists() {
            fs::remove_file(&dest).map_err(|e| file_write_failed(&dest, e))?;
        }
        fs::rename(&part, &dest).map_err(|e| file_write_failed(&dest, e))?;

        tracing::info!(path = %dest.display(), "download complete");
        Ok(dest)
    }
}

fn stream_to_file(reader: &mut impl Read, part: &Path, progress: &DownloadProgress) -> Result<()> {
    let mut file = File::create(part).map_err(|e| file_write_failed(part, e))?;
    let mut buffer = [0u8; 64 * 1024];
    loop {
        let read = reader
            .read(&mut buffer)
            .map_err(|e| file_write_failed(part, format!("reading response body: {e}")))?;
        if read == 0 {
            break;
        }
        file.write_all(&buffer[..read])
            .map_err(|e| file_write_failed(part, e))?;
        progress.inc(read as u64);
    }
    file.flush().map_err(|e| file_write_failed(part, e))
}

/// Check a `Content-Type` header value against the accepted archive types
pub fn validate_content_type(content_type: &str) -> std::result::Result<(), String> {
    let mime = content_type
        .split(';')
        .next()
        .unwrap_or("")
        .trim()
        .to_ascii_lowercase();
    if ACCEPTED_CONTENT_TYPES.contains(&mime.as_str()) {
        Ok(())
    } else {
        Err(format!("invalid Content-Type: {content_type}"))
    }
}

/// Extract a file name from a `Content-Disposition` header.
///
/// `filename*=` (RFC 5987) wins over `filename=`.
pub fn file_name_from_content_disposition(header: &str) -> Option<String> {
    let mut plain = None;
    let mut extended = None;

    for part in header.split(';').map(str::trim) {
        let Some((key, value)) = part.split_once('=') else {
            continue;
        };
        match key.trim().to_ascii_lowercase().as_str() {
            "filename*" => {
                let encoded = value.trim().trim_matches('"');
                let encoded = encoded
                    .split_once("''")
                    .map_or(encoded, |(_charset, rest)| rest);
                extended = Some(percent_decode(encoded));
            }
            "filename" => plain = Some(value.trim().trim_matches('"').to_string()),
            _ => {}
        }
    }

    extended.or(plain).and_then(|n| sanitize_file_name(&n))
}

/// Use the last URL path segment when it names an archive
pub fn file_name_from_url(url: &str) -> Option<String> {
    let parsed = Url::parse(url).ok()?;
    let last = parsed.path_segments()?.rev().find(|s| !s.is_empty())?;
    let decoded = percent_decode(last);
    if archive::is_archive_name(&decoded) {
        sanitize_file_name(&decoded)
    } else {
        None
    }
}

/// Rewrite a Google Drive share link to its direct download endpoint
pub fn google_drive_direct_url(url: &str) -> Option<String> {
    let parsed = Url::parse(url).ok()?;
    if !matches!(
        parsed.host_str(),
        Some("drive.google.com" | "drive.usercontent.google.com")
    ) {
        return None;
    }

    let segments: Vec<&str> = parsed.path_segments()?.collect();
    let id = match segments.as_slice() {
        ["file", "d", id, ..] => (*id).to_string(),
        _ => parsed
            .query_pairs()
            .find_map(|(key, value)| (key == "id").then(|| value.into_owned()))?,
    };

    if id.is_empty() {
        return None;
    }
    Some(format!(
        "https://drive.usercontent.google.com/download?id={id}&export=download&confirm=t"
    ))
}

fn percent_decode(input: &str) -> String {
    String::from_utf8_lossy(&urlencoding::decode_binary(input.as_bytes())).into_owned()
}
