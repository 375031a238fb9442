use ureq::Error::{Status, Transport};

use super::{FileDownloader, Response};

/// Blocking GET through ureq's default agent. Default timeouts, no extra headers.
pub struct UReqFetcher;

impl FileDownloader for UReqFetcher {
    fn fetch(&self, url: &str) -> Response {
        let response = ureq::request("GET", url).call();

        match response {
            Ok(response) => {
                tracing::debug!(
                    url,
                    status = response.status(),
                    content_type = response.content_type(),
                    "response received"
                );

                Response::ok(response.into_reader())
            }

            Err(Status(code, _)) => Response::status(code),

            Err(Transport(transport)) => Response::network_error(transport.to_string()),
        }
    }
}

impl UReqFetcher {
    pub fn new() -> Self {
        UReqFetcher
    }
}

impl Default for UReqFetcher {
    fn default() -> Self {
        Self::new()
    }
}
