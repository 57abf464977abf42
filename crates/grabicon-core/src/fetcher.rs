use crate::{Error, GrabConfig, Result};
use reqwest::{Client, Response, StatusCode, redirect};
use tracing::debug;
use url::Url;

/// HTTP client shared by every stage of a discovery run.
///
/// Redirects are followed transparently; callers always see the final URL of
/// the request. Every request is bounded by the configured timeouts.
#[derive(Debug, Clone)]
pub struct Fetcher {
    client: Client,
    page_limit: u64,
}

/// The resolved root page.
#[derive(Debug, Clone)]
pub struct FetchedPage {
    /// URL after following all redirects.
    pub final_url: Url,
    /// Final HTTP status (always a success status).
    pub status: u16,
    /// Response body decoded as UTF-8, cut at the page size limit.
    pub text: String,
    /// Whether the body went past the limit and `text` is only a prefix.
    pub truncated: bool,
}

/// A fetched candidate resource.
#[derive(Debug, Clone)]
pub struct FetchedBytes {
    /// URL after following all redirects.
    pub final_url: String,
    /// Raw body, or a marker that it exceeded the size limit.
    pub body: Body,
}

/// Body of a candidate response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Body {
    /// The full body, within the configured size limit.
    Complete(Vec<u8>),
    /// The body was abandoned after `size` bytes (or a declared
    /// `Content-Length` of `size`) went past the limit.
    Oversized {
        /// Bytes received or declared when the download was abandoned.
        size: u64,
    },
}

impl Fetcher {
    /// Creates a fetcher with default settings.
    pub fn new() -> Result<Self> {
        Self::from_config(&GrabConfig::default())
    }

    /// Creates a fetcher from the timeouts, redirect limit, page size limit
    /// and user agent in `config`.
    pub fn from_config(config: &GrabConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.request_timeout())
            .connect_timeout(config.connect_timeout())
            .redirect(redirect::Policy::limited(config.max_redirects))
            .user_agent(config.user_agent.clone())
            .gzip(true)
            .brotli(true)
            .build()
            .map_err(Error::Network)?;
        Ok(Self {
            client,
            page_limit: config.max_page_bytes,
        })
    }

    /// Fetches a page as text, following redirects.
    ///
    /// Non-success statuses are errors: `404` maps to [`Error::NotFound`],
    /// anything else to [`Error::HttpStatus`]. At most `max_page_bytes` of
    /// the body are kept.
    pub async fn fetch_page(&self, url: &str) -> Result<FetchedPage> {
        let response = self.send(url).await?;
        let final_url = response.url().clone();
        let status = response.status().as_u16();

        let (mut data, truncated) = read_limited(response, url, self.page_limit).await?;
        if truncated {
            data.truncate(usize::try_from(self.page_limit).unwrap_or(usize::MAX));
        }
        let text = String::from_utf8_lossy(&data).into_owned();

        debug!(%final_url, status, bytes = text.len(), truncated, "fetched page");
        Ok(FetchedPage {
            final_url,
            status,
            text,
            truncated,
        })
    }

    /// Fetches raw bytes, abandoning the download once more than `limit`
    /// bytes have arrived.
    pub async fn fetch_bytes(&self, url: &str, limit: u64) -> Result<FetchedBytes> {
        let response = self.send(url).await?;
        let final_url = response.url().to_string();

        if let Some(declared) = response.content_length() {
            if declared > limit {
                debug!(%final_url, declared, limit, "declared length over limit");
                return Ok(FetchedBytes {
                    final_url,
                    body: Body::Oversized { size: declared },
                });
            }
        }

        let (data, over) = read_limited(response, url, limit).await?;
        let body = if over {
            Body::Oversized {
                size: data.len() as u64,
            }
        } else {
            Body::Complete(data)
        };
        Ok(FetchedBytes { final_url, body })
    }

    async fn send(&self, url: &str) -> Result<Response> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| Error::from_transport(url, e))?;
        check_status(url, response)
    }
}

/// Stream `response` into memory, stopping as soon as more than `limit`
/// bytes have arrived. The flag reports whether the limit was crossed.
async fn read_limited(
    mut response: Response,
    url: &str,
    limit: u64,
) -> Result<(Vec<u8>, bool)> {
    let mut data = Vec::new();
    while let Some(chunk) = response
        .chunk()
        .await
        .map_err(|e| Error::from_transport(url, e))?
    {
        data.extend_from_slice(&chunk);
        if data.len() as u64 > limit {
            return Ok((data, true));
        }
    }
    Ok((data, false))
}

fn check_status(url: &str, response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    if status == StatusCode::NOT_FOUND {
        return Err(Error::NotFound(format!("Resource not found at '{url}'")));
    }

    Err(Error::HttpStatus {
        url: url.to_string(),
        status: status.as_u16(),
    })
}
