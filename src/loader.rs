use std::path::{Path, PathBuf};
use url::Url;

use crate::config::LoaderConfig;
use crate::downloader::{Fetcher, HttpFetcher};
use crate::error::{PageLoaderError, Result};
use crate::file_manager::FileManager;
use crate::html_parser::HtmlDocument;
use crate::naming::derive_document_file_name;
use crate::observer::{LoadEvent, LoadObserver, LoadPhase, TracingObserver};
use crate::rewriter::{DocumentRewriter, ResourceFailure, SavedResource};

/// What a successful run leaves behind. The files belong to the caller.
#[derive(Debug)]
pub struct LoadResult {
    /// Absolute path of the saved page.
    pub html_file_path: PathBuf,
    pub saved_resources: Vec<SavedResource>,
    /// Local resources that were skipped; diagnostic only.
    pub failed_resources: Vec<ResourceFailure>,
}

/// Saves one page and its local resources into an output directory.
///
/// Phases run strictly in order: validate input, fetch the page, download and
/// rewrite resources, write the page. Any failure outside the resource phase
/// ends the run.
pub struct PageLoader<F = HttpFetcher> {
    fetcher: F,
    config: LoaderConfig,
}

impl PageLoader<HttpFetcher> {
    pub fn new(config: LoaderConfig) -> anyhow::Result<Self> {
        let fetcher = HttpFetcher::new(&config)?;
        Ok(Self { fetcher, config })
    }
}

impl<F: Fetcher> PageLoader<F> {
    pub fn with_fetcher(fetcher: F, config: LoaderConfig) -> Self {
        Self { fetcher, config }
    }

    pub fn config(&self) -> &LoaderConfig {
        &self.config
    }

    pub async fn load(
        &self,
        source_url: &str,
        output_dir: &Path,
        observer: &dyn LoadObserver,
    ) -> Result<LoadResult> {
        observer.on_event(&LoadEvent::PhaseEntered(LoadPhase::Idle));
        let result = self.run(source_url, output_dir, observer).await;
        match &result {
            Ok(_) => observer.on_event(&LoadEvent::PhaseEntered(LoadPhase::Done)),
            Err(error) => observer.on_event(&LoadEvent::Failed {
                kind: error.kind(),
                error,
            }),
        }
        result
    }

    async fn run(
        &self,
        source_url: &str,
        output_dir: &Path,
        observer: &dyn LoadObserver,
    ) -> Result<LoadResult> {
        observer.on_event(&LoadEvent::PhaseEntered(LoadPhase::ValidatingInput));
        let page_url = parse_page_url(source_url)?;
        let file_manager = FileManager::open(output_dir)?;

        observer.on_event(&LoadEvent::PhaseEntered(LoadPhase::FetchingDocument));
        let content = self
            .fetcher
            .fetch(&page_url, self.config.document_timeout)
            .await
            .map_err(|source| PageLoaderError::DocumentFetchFailed {
                url: page_url.to_string(),
                source,
            })?;
        let document = HtmlDocument::parse(&String::from_utf8_lossy(&content));

        observer.on_event(&LoadEvent::PhaseEntered(LoadPhase::RewritingResources));
        let rewriter = DocumentRewriter::new(&self.fetcher, &file_manager, &self.config, observer);
        let outcome = rewriter.rewrite(&document, &page_url).await?;

        observer.on_event(&LoadEvent::PhaseEntered(LoadPhase::PersistingDocument));
        let file_name = derive_document_file_name(&page_url);
        let html_file_path = file_manager.save_file(Path::new(&file_name), outcome.html.as_bytes())?;
        observer.on_event(&LoadEvent::DocumentSaved {
            path: &html_file_path,
        });

        Ok(LoadResult {
            html_file_path,
            saved_resources: outcome.saved,
            failed_resources: outcome.failures,
        })
    }
}

/// Accepts only absolute `http` and `https` URLs.
pub fn parse_page_url(source_url: &str) -> Result<Url> {
    let invalid = |reason: String| PageLoaderError::InvalidInput {
        url: source_url.to_string(),
        reason,
    };

    let url = Url::parse(source_url).map_err(|e| invalid(e.to_string()))?;
    match url.scheme() {
        "http" | "https" if url.has_host() => Ok(url),
        "http" | "https" => Err(invalid("URL has no host".to_string())),
        scheme => Err(invalid(format!("unsupported scheme '{}'", scheme))),
    }
}

/// Loads `source_url` into `output_dir` with default settings, logging through `tracing`.
pub async fn load_page(source_url: &str, output_dir: &Path) -> anyhow::Result<LoadResult> {
    let loader = PageLoader::new(LoaderConfig::default())?;
    Ok(loader.load(source_url, output_dir, &TracingObserver).await?)
}
