pub mod cli;
pub mod config;
pub mod downloader;
pub mod error;
pub mod file_manager;
pub mod html_parser;
pub mod loader;
pub mod locality;
pub mod naming;
pub mod observer;
pub mod progress;
pub mod rewriter;

// Re-export main types for convenience
pub use cli::LoaderCommand;
pub use config::LoaderConfig;
pub use downloader::{Fetcher, HttpFetcher, ResourceFetcher};
pub use error::{ErrorKind, FetchError, OutputTargetCause, PageLoaderError};
pub use file_manager::FileManager;
pub use html_parser::{HtmlDocument, ResourceLink, ResourceType};
pub use loader::{load_page, LoadResult, PageLoader};
pub use observer::{LoadEvent, LoadObserver, LoadPhase, TracingObserver};
pub use progress::ProgressObserver;
pub use rewriter::{DocumentRewriter, ResourceFailure, RewriteOutcome, SavedResource};
