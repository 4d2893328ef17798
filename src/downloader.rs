use async_trait::async_trait;
use reqwest::{redirect, Client, ClientBuilder};
use std::path::{Path, PathBuf};
use std::time::Duration;
use url::Url;

use crate::config::LoaderConfig;
use crate::error::{FetchError, PageLoaderError, Result};
use crate::file_manager::FileManager;

/// HTTP GET capability.
///
/// A response with a status in `[200, 400)` yields its raw body; anything
/// else is a [`FetchError`]. Implementations never retry.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Fetcher: Send + Sync {
    async fn fetch(&self, url: &Url, timeout: Duration) -> std::result::Result<Vec<u8>, FetchError>;
}

/// [`Fetcher`] backed by a `reqwest` client.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new(config: &LoaderConfig) -> anyhow::Result<Self> {
        let client = Self::build_http_client(config)?;
        Ok(Self { client })
    }

    fn build_http_client(config: &LoaderConfig) -> anyhow::Result<Client> {
        let client = ClientBuilder::new()
            .use_rustls_tls()
            .user_agent(config.user_agent.as_str())
            .redirect(redirect::Policy::limited(config.max_redirects))
            .cookie_store(true)
            .build()?;

        Ok(client)
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch(&self, url: &Url, timeout: Duration) -> std::result::Result<Vec<u8>, FetchError> {
        tracing::debug!(%url, ?timeout, "sending request");
        let response = self
            .client
            .get(url.clone())
            .timeout(timeout)
            .send()
            .await
            .map_err(|e| FetchError::from_reqwest(&e))?;

        let status = response.status();
        tracing::debug!(%url, %status, "response received");
        if !(status.is_success() || status.is_redirection()) {
            return Err(FetchError::HttpStatus {
                status: status.as_u16(),
            });
        }

        let content = response
            .bytes()
            .await
            .map_err(|e| FetchError::from_reqwest(&e))?;
        Ok(content.to_vec())
    }
}

/// Downloads one local resource and stores it, as two separate steps.
pub struct ResourceFetcher<'a, F: ?Sized> {
    fetcher: &'a F,
    file_manager: &'a FileManager,
    timeout: Duration,
}

impl<'a, F: Fetcher + ?Sized> ResourceFetcher<'a, F> {
    pub fn new(fetcher: &'a F, file_manager: &'a FileManager, timeout: Duration) -> Self {
        Self {
            fetcher,
            file_manager,
            timeout,
        }
    }

    pub async fn fetch(&self, url: &Url) -> Result<Vec<u8>> {
        self.fetcher
            .fetch(url, self.timeout)
            .await
            .map_err(|source| PageLoaderError::ResourceFetchFailed {
                url: url.to_string(),
                source,
            })
    }

    /// Writes `content` to `relative_path` inside the output directory.
    pub fn save(&self, content: &[u8], relative_path: &Path) -> Result<PathBuf> {
        self.file_manager.save_file(relative_path, content)
    }

    pub async fn download(&self, url: &Url, relative_path: &Path) -> Result<PathBuf> {
        let content = self.fetch(url).await?;
        self.save(&content, relative_path)
    }
}
