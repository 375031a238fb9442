pub mod config;
pub mod logging;

mod downloader;

pub use config::FetchConfig;
pub use downloader::{
    BatchReport, Download, DownloadError, Downloader, FailedItem, FileDownloader, Response,
    UReqFetcher,
};
