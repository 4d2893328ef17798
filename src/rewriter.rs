use futures::future::join_all;
use std::path::{Path, PathBuf};
use url::Url;

use crate::config::LoaderConfig;
use crate::downloader::{Fetcher, ResourceFetcher};
use crate::error::{PageLoaderError, Result};
use crate::file_manager::FileManager;
use crate::html_parser::{HtmlDocument, ResourceLink};
use crate::locality::is_local;
use crate::naming::{derive_resources_dir_name, resource_file_name};
use crate::observer::{LoadEvent, LoadObserver};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SavedResource {
    pub url: Url,
    pub path: PathBuf,
}

/// A local resource that was left pointing at its original URL.
#[derive(Debug)]
pub struct ResourceFailure {
    pub url: Url,
    pub error: PageLoaderError,
}

#[derive(Debug)]
pub struct RewriteOutcome {
    pub html: String,
    pub saved: Vec<SavedResource>,
    pub failures: Vec<ResourceFailure>,
}

/// Downloads a page's local resources and points their attributes at the copies.
pub struct DocumentRewriter<'a, F: ?Sized> {
    fetcher: &'a F,
    file_manager: &'a FileManager,
    config: &'a LoaderConfig,
    observer: &'a dyn LoadObserver,
}

impl<'a, F: Fetcher + ?Sized> DocumentRewriter<'a, F> {
    pub fn new(
        fetcher: &'a F,
        file_manager: &'a FileManager,
        config: &'a LoaderConfig,
        observer: &'a dyn LoadObserver,
    ) -> Self {
        Self {
            fetcher,
            file_manager,
            config,
            observer,
        }
    }

    /// Rewrites `document` in place and returns its serialization.
    ///
    /// The resources directory is only created when the page has at least one
    /// local resource. A resource that fails to download or save keeps its
    /// original attribute value and is reported in `failures`; it never fails
    /// the call.
    pub async fn rewrite(&self, document: &HtmlDocument, page_url: &Url) -> Result<RewriteOutcome> {
        let references = local_references(document, page_url);
        self.observer.on_event(&LoadEvent::ResourcesDiscovered {
            count: references.len(),
        });

        let mut saved = Vec::new();
        let mut failures = Vec::new();

        if !references.is_empty() {
            let dir_name = derive_resources_dir_name(page_url);
            // must exist before the first download starts
            self.file_manager.create_dir(&dir_name)?;

            let resource_fetcher =
                ResourceFetcher::new(self.fetcher, self.file_manager, self.config.resource_timeout);
            let downloads = references.iter().map(|(_, url)| {
                let file_name = resource_file_name(url);
                let relative_path = Path::new(&dir_name).join(&file_name);
                let resource_fetcher = &resource_fetcher;
                async move {
                    let result = resource_fetcher.download(url, &relative_path).await;
                    (file_name, result)
                }
            });
            let results = join_all(downloads).await;

            for ((link, url), (file_name, result)) in references.iter().zip(results) {
                match result {
                    Ok(path) => {
                        // browsers read this value, so always join with '/'
                        link.set_url(&format!("{}/{}", dir_name, file_name));
                        self.observer.on_event(&LoadEvent::ResourceSaved {
                            url: url.as_str(),
                            path: &path,
                        });
                        saved.push(SavedResource {
                            url: url.clone(),
                            path,
                        });
                    }
                    Err(error) => {
                        self.observer.on_event(&LoadEvent::ResourceFailed {
                            url: url.as_str(),
                            error: &error,
                        });
                        failures.push(ResourceFailure {
                            url: url.clone(),
                            error,
                        });
                    }
                }
            }
        }

        let html = document
            .serialize()
            .map_err(|source| PageLoaderError::PersistFailed {
                path: self.file_manager.base_dir().to_path_buf(),
                source,
            })?;

        Ok(RewriteOutcome {
            html,
            saved,
            failures,
        })
    }
}

/// Resource links on the page's own host, paired with their absolute URLs.
fn local_references(document: &HtmlDocument, page_url: &Url) -> Vec<(ResourceLink, Url)> {
    document
        .find_resources()
        .into_iter()
        .filter(|link| is_local(&link.original_url, page_url))
        .filter_map(|link| {
            let resolved = page_url.join(&link.original_url).ok()?;
            Some((link, resolved))
        })
        .collect()
}
