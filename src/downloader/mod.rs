mod fetcher;

use std::env;
use std::fmt;
use std::fs::{self, File};
use std::io::{self, ErrorKind, Read, Write};
use std::path::{Path, PathBuf};

use itertools::Itertools;
use thiserror::Error;
use url::Url;

use crate::config::FetchConfig;

pub use fetcher::UReqFetcher;

pub type Body = Box<dyn Read + Send>;

pub enum Response {
    Ok(Body),
    Status(u16),
    NetworkError(String),
}

impl Response {
    pub fn ok(body: impl Read + Send + 'static) -> Self {
        Self::Ok(Box::new(body))
    }

    pub fn status(code: u16) -> Self {
        Self::Status(code)
    }

    pub fn network_error(message: impl Into<String>) -> Self {
        Self::NetworkError(message.into())
    }
}

impl fmt::Debug for Response {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Response::Ok(_) => f.write_str("Ok(<body>)"),
            Response::Status(code) => f.debug_tuple("Status").field(code).finish(),
            Response::NetworkError(message) => {
                f.debug_tuple("NetworkError").field(message).finish()
            }
        }
    }
}

pub trait FileDownloader {
    fn fetch(&self, url: &str) -> Response;
}

#[derive(Debug, Error)]
pub enum DownloadError {
    #[error("invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("HTTP status {0}")]
    Status(u16),

    #[error("network error: {0}")]
    Network(String),

    #[error("write failed: {0}")]
    Io(#[from] io::Error),
}

#[derive(Debug, PartialEq)]
pub struct Download {
    pub source: String,
    pub file: PathBuf,
    pub bytes: u64,
}

impl Download {
    pub fn new(source: String, file: PathBuf, bytes: u64) -> Self {
        Self {
            source,
            file,
            bytes,
        }
    }
}

#[derive(Debug, PartialEq)]
pub struct FailedItem {
    /// 1-based position in the URL list.
    pub index: usize,
    pub url: String,
    pub error: String,
}

#[derive(Debug, Default, PartialEq)]
pub struct BatchReport {
    pub saved: Vec<Download>,
    pub failed: Vec<FailedItem>,
}

impl BatchReport {
    pub fn attempted(&self) -> usize {
        self.saved.len() + self.failed.len()
    }
}

pub struct Downloader<T: FileDownloader> {
    fetcher: T,
    config: FetchConfig,
    path: PathBuf,
}

impl<T> Downloader<T>
where
    T: FileDownloader,
{
    /// Creates the target directory (and parents) if missing.
    pub fn with_fetcher(config: FetchConfig, fetcher: T) -> io::Result<Self> {
        let path = Self::create_path(&config.target_dir)?;

        Ok(Downloader {
            fetcher,
            config,
            path,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn config(&self) -> &FetchConfig {
        &self.config
    }

    /// Fetches `url` and streams it into the file for the 1-based `index`.
    ///
    /// Nothing is written unless the server answers with a success status. A
    /// failure while copying the body leaves the partial file behind.
    pub fn download(&self, index: usize, url: &str) -> Result<Download, DownloadError> {
        let parsed = Url::parse(url)?;

        let body = match self.fetcher.fetch(parsed.as_str()) {
            Response::Ok(body) => body,
            Response::Status(code) => return Err(DownloadError::Status(code)),
            Response::NetworkError(message) => return Err(DownloadError::Network(message)),
        };

        let file_path = self.path.join(self.config.file_name(index));

        let mut file = File::create(&file_path)?;

        let bytes = copy_in_chunks(body, &mut file, self.config.chunk_size)?;

        tracing::debug!(url, file = %file_path.display(), bytes, "body written");

        Ok(Download::new(url.to_string(), file_path, bytes))
    }

    /// Runs the whole batch, printing progress to stdout.
    pub fn run(&self) -> BatchReport {
        let stdout = io::stdout();
        let mut out = stdout.lock();

        self.run_to(&mut out)
    }

    /// Runs the whole batch, printing progress to `out`.
    ///
    /// Item failures are reported and skipped; the completion line is always
    /// printed. Errors writing to `out` are ignored.
    pub fn run_to<W: Write>(&self, out: &mut W) -> BatchReport {
        let total = self.config.urls.len();
        let mut report = BatchReport::default();

        for (position, url) in self.config.urls.iter().enumerate() {
            let index = position + 1;

            let _ = writeln!(out, "Downloading image {}/{}...", index, total);

            match self.download(index, url) {
                Ok(download) => {
                    tracing::info!(index, url = %url, file = %download.file.display(), "image saved");

                    let _ = writeln!(out, "Saved: {}", download.file.display());

                    report.saved.push(download);
                }

                Err(error) => {
                    tracing::warn!(index, url = %url, %error, "image download failed");

                    let _ = writeln!(out, "Error downloading image {}: {}", index, error);

                    report.failed.push(FailedItem {
                        index,
                        url: url.clone(),
                        error: error.to_string(),
                    });
                }
            }
        }

        if !report.failed.is_empty() {
            tracing::warn!(
                "{} of {} downloads failed (items {})",
                report.failed.len(),
                total,
                report.failed.iter().map(|item| item.index).join(", ")
            );
        }

        let _ = writeln!(out, "All downloads complete!");

        report
    }

    fn create_path(path: &Path) -> io::Result<PathBuf> {
        let absolute_path = if path.is_absolute() {
            path.to_path_buf()
        } else {
            env::current_dir()?.join(path)
        };

        fs::create_dir_all(&absolute_path)?;

        Ok(absolute_path)
    }
}

impl Downloader<UReqFetcher> {
    pub fn new(config: FetchConfig) -> io::Result<Self> {
        let fetcher = UReqFetcher::new();
        Downloader::with_fetcher(config, fetcher)
    }
}

/// Copies `reader` into `writer` through a single `chunk_size` buffer.
fn copy_in_chunks<R, W>(mut reader: R, writer: &mut W, chunk_size: usize) -> io::Result<u64>
where
    R: Read,
    W: Write,
{
    let mut buffer = vec![0u8; chunk_size.max(1)];
    let mut written = 0u64;

    loop {
        let read = match reader.read(&mut buffer) {
            Ok(0) => break,
            Ok(read) => read,
            Err(error) if error.kind() == ErrorKind::Interrupted => continue,
            Err(error) => return Err(error),
        };

        writer.write_all(&buffer[..read])?;
        written += read as u64;
    }

    writer.flush()?;

    Ok(written)
}

#[cfg(test)]
use fetcher::MockFetcher;
