use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;

use crate::config::{
    default_user_agent, LoaderConfig, DEFAULT_DOCUMENT_TIMEOUT_SECS, DEFAULT_MAX_REDIRECTS,
    DEFAULT_RESOURCE_TIMEOUT_SECS,
};

#[derive(Parser, Debug)]
#[command(
    name = "page-loader",
    about = "Saves a web page together with its local resources",
    version,
    long_about = "Downloads a single web page, saves the images, stylesheets, canonical links and scripts served from the same host next to it, and rewrites the page to use the local copies."
)]
pub struct LoaderCommand {
    /// The URL of the page to save
    #[arg(required = true)]
    pub url: String,

    /// Output directory (must already exist); defaults to the current directory
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Timeout for the page request in seconds
    #[arg(long, default_value_t = DEFAULT_DOCUMENT_TIMEOUT_SECS, value_parser = clap::value_parser!(u64).range(1..))]
    pub timeout: u64,

    /// Timeout for each resource request in seconds
    #[arg(long, default_value_t = DEFAULT_RESOURCE_TIMEOUT_SECS, value_parser = clap::value_parser!(u64).range(1..))]
    pub resource_timeout: u64,

    /// Maximum number of redirects to follow per request
    #[arg(long, default_value_t = DEFAULT_MAX_REDIRECTS)]
    pub max_redirects: usize,

    /// User agent string to use for requests
    #[arg(long, default_value_t = default_user_agent())]
    pub user_agent: String,

    /// Do not show progress
    #[arg(short, long)]
    pub quiet: bool,
}

impl LoaderCommand {
    pub fn loader_config(&self) -> LoaderConfig {
        LoaderConfig {
            document_timeout: Duration::from_secs(self.timeout),
            resource_timeout: Duration::from_secs(self.resource_timeout),
            max_redirects: self.max_redirects,
            user_agent: self.user_agent.clone(),
        }
    }

    pub fn output_dir(&self) -> std::io::Result<PathBuf> {
        match &self.output {
            Some(dir) => Ok(dir.clone()),
            None => std::env::current_dir(),
        }
    }
}
