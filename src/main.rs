use anyhow::Context;
use puppy_fetcher::{logging, Downloader, FetchConfig};

fn main() -> anyhow::Result<()> {
    logging::init_logging();

    let config = FetchConfig::default();

    let downloader = Downloader::new(config).context("failed to prepare image directory")?;

    downloader.run();

    Ok(())
}
