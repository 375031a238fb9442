//! Batch settings. Everything defaults to the built-in constants.

use std::path::PathBuf;

pub const DEFAULT_IMAGE_URLS: [&str; 3] = [
    "https://picsum.photos/id/237/600/400",
    "https://picsum.photos/id/169/600/400",
    "https://picsum.photos/id/1062/600/400",
];

pub const DEFAULT_TARGET_DIR: &str = "images";
pub const DEFAULT_FILE_PREFIX: &str = "puppy";
pub const DEFAULT_EXTENSION: &str = "jpg";
pub const DEFAULT_CHUNK_SIZE: usize = 8192;

#[derive(Debug, Clone, PartialEq)]
pub struct FetchConfig {
    /// Relative paths resolve against the current working directory.
    pub target_dir: PathBuf,
    pub urls: Vec<String>,
    pub file_prefix: String,
    pub extension: String,
    pub chunk_size: usize,
}

impl FetchConfig {
    pub fn with_target_dir(mut self, target_dir: impl Into<PathBuf>) -> Self {
        self.target_dir = target_dir.into();
        self
    }

    pub fn with_urls<I, S>(mut self, urls: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.urls = urls.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_file_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.file_prefix = prefix.into();
        self
    }

    pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
        self.extension = extension.into();
        self
    }

    /// Zero is bumped to one byte so the copy loop always makes progress.
    pub fn with_chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = chunk_size.max(1);
        self
    }

    /// File name for the 1-based `index`, e.g. `puppy_2.jpg`.
    pub fn file_name(&self, index: usize) -> String {
        format!("{}_{}.{}", self.file_prefix, index, self.extension)
    }
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            target_dir: PathBuf::from(DEFAULT_TARGET_DIR),
            urls: DEFAULT_IMAGE_URLS.iter().map(|url| url.to_string()).collect(),
            file_prefix: DEFAULT_FILE_PREFIX.to_string(),
            extension: DEFAULT_EXTENSION.to_string(),
            chunk_size: DEFAULT_CHUNK_SIZE,
        }
    }
}
