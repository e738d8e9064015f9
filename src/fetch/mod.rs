//! Transports behind the [`CurveFetcher`] seam.
//!
//! - [`FileFetcher`]: reads local files (always available)
//! - [`HttpFetcher`]: blocking HTTP GET via `ureq` (`http` feature)
//! - [`AutoFetcher`]: dispatches on the URL scheme
//!
//! [`CurveSource`] classifies command-line inputs.
//!
//! The browser transport lives in the `web` module because it is async.

#[cfg(feature = "http")]
mod http;

use std::path::{Path, PathBuf};

#[cfg(feature = "http")]
pub use http::HttpFetcher;

use crate::loader::{CurveFetcher, TransportError};

/// Reads curve bodies from the local filesystem.
///
/// A `file://` prefix is stripped; anything else is taken as a path.
#[derive(Debug, Clone, Copy, Default)]
pub struct FileFetcher;

impl CurveFetcher for FileFetcher {
    fn fetch(&self, url: &str) -> Result<String, TransportError> {
        let path = url.strip_prefix("file://").unwrap_or(url);
        std::fs::read_to_string(Path::new(path))
            .map_err(|e| io_transport_error(&e))
    }
}

/// Map an I/O failure to a transport error named after its kind.
pub(crate) fn io_transport_error(e: &std::io::Error) -> TransportError {
    TransportError::new(format!("{:?}", e.kind()), e.to_string())
}

/// Whether `url` names a remote resource.
#[must_use]
pub fn is_remote(url: &str) -> bool {
    let lower = url.trim_start().to_ascii_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://")
}

/// Uses HTTP for `http(s)://` URLs and the filesystem for everything else.
#[derive(Debug, Clone, Default)]
pub struct AutoFetcher {
    #[cfg(feature = "http")]
    http: HttpFetcher,
}

impl AutoFetcher {
    /// Fetcher with default transport settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl CurveFetcher for AutoFetcher {
    fn fetch(&self, url: &str) -> Result<String, TransportError> {
        if !is_remote(url) {
            return FileFetcher.fetch(url);
        }
        #[cfg(feature = "http")]
        {
            self.http.fetch(url)
        }
        #[cfg(not(feature = "http"))]
        {
            Err(TransportError::new(
                "Unsupported",
                format!("HTTP support is not compiled in; cannot fetch {url}"),
            ))
        }
    }
}

/// Where a curve comes from, as given on the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CurveSource {
    /// `http(s)://` URL serving curve JSON.
    Remote(String),
    /// Local file holding curve JSON.
    JsonFile(PathBuf),
    /// Local FASTA file; its first entry is walked into a curve.
    FastaFile(PathBuf),
}

const FASTA_EXTENSIONS: [&str; 5] = ["fasta", "fa", "fna", "ffn", "fas"];

impl CurveSource {
    /// Classify a URL or path by scheme and extension.
    #[must_use]
    pub fn parse(arg: &str) -> Self {
        if is_remote(arg) {
            return Self::Remote(arg.trim().to_owned());
        }
        let path = PathBuf::from(arg.strip_prefix("file://").unwrap_or(arg));
        let is_fasta = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| {
                FASTA_EXTENSIONS
                    .iter()
                    .any(|known| ext.eq_ignore_ascii_case(known))
            });
        if is_fasta {
            Self::FastaFile(path)
        } else {
            Self::JsonFile(path)
        }
    }

    /// The location as passed to a [`CurveFetcher`].
    #[must_use]
    pub fn location(&self) -> String {
        match self {
            Self::Remote(url) => url.clone(),
            Self::JsonFile(path) | Self::FastaFile(path) => {
                path.to_string_lossy().into_owned()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_file(name: &str, body: &str) -> PathBuf {
        let path = std::env::temp_dir()
            .join(format!("wcurve-{}-{name}", std::process::id()));
        std::fs::write(&path, body).unwrap();
        path
    }

    #[test]
    fn unreadable_file_converts_to_transport_error() {
        let missing = std::env::temp_dir().join("wcurve-missing.fasta");
        let err = FileFetcher
            .fetch(&missing.to_string_lossy())
            .map_err(crate::error::WCurveError::from)
            .unwrap_err();
        match err {
            crate::error::WCurveError::Transport(e) => {
                assert_eq!(e.name, "NotFound");
            }
            other => panic!("expected transport error, got {other:?}"),
        }
    }

    #[test]
    fn file_fetcher_reads_plain_and_file_urls() {
        let path = temp_file("plain.json", "[[0,0,0,0,0]]");
        let plain = path.to_string_lossy().into_owned();

        assert_eq!(FileFetcher.fetch(&plain).unwrap(), "[[0,0,0,0,0]]");
        assert_eq!(
            FileFetcher.fetch(&format!("file://{plain}")).unwrap(),
            "[[0,0,0,0,0]]"
        );
        let _ = std::fs::remove_file(path);
    }

    #[test]
    fn missing_file_is_a_transport_error() {
        let err = FileFetcher
            .fetch("/definitely/not/here/curve.json")
            .unwrap_err();
        assert_eq!(err.name, "NotFound");
        assert!(!err.message.is_empty());
    }

    #[test]
    fn remote_detection() {
        assert!(is_remote("http://example.org/c.json"));
        assert!(is_remote("HTTPS://example.org/c.json"));
        assert!(!is_remote("curves/c.json"));
        assert!(!is_remote("file:///tmp/c.json"));
    }

    #[test]
    fn sources_classify_by_scheme_and_extension() {
        assert_eq!(
            CurveSource::parse("https://host/c.json"),
            CurveSource::Remote("https://host/c.json".to_owned())
        );
        assert_eq!(
            CurveSource::parse("data/seq.FASTA"),
            CurveSource::FastaFile(PathBuf::from("data/seq.FASTA"))
        );
        assert_eq!(
            CurveSource::parse("file:///tmp/c.json"),
            CurveSource::JsonFile(PathBuf::from("/tmp/c.json"))
        );
        assert_eq!(
            CurveSource::parse("curve").location(),
            "curve".to_owned()
        );
    }

    #[test]
    fn auto_fetcher_reads_local_paths() {
        let path = temp_file("auto.json", "[]");
        let body = AutoFetcher::new()
            .fetch(&path.to_string_lossy())
            .unwrap();
        assert_eq!(body, "[]");
        let _ = std::fs::remove_file(path);
    }
}
