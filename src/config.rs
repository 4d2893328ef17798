use std::time::Duration;

pub const DEFAULT_DOCUMENT_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_RESOURCE_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_MAX_REDIRECTS: usize = 5;

/// HTTP policy for a single run.
#[derive(Debug, Clone)]
pub struct LoaderConfig {
    /// Timeout for the page itself.
    pub document_timeout: Duration,
    /// Timeout for each image, stylesheet, canonical link or script.
    pub resource_timeout: Duration,
    pub max_redirects: usize,
    pub user_agent: String,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            document_timeout: Duration::from_secs(DEFAULT_DOCUMENT_TIMEOUT_SECS),
            resource_timeout: Duration::from_secs(DEFAULT_RESOURCE_TIMEOUT_SECS),
            max_redirects: DEFAULT_MAX_REDIRECTS,
            user_agent: default_user_agent(),
        }
    }
}

pub fn default_user_agent() -> String {
    format!("page-loader/{}", env!("CARGO_PKG_VERSION"))
}
