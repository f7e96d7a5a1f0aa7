// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use std::path::PathBuf;
use thiserror::Error;

use crate::http::HttpError;

/// Errors that can occur when loading the subscriptions file
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    ReadFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config: {0}")]
    ParseFailed(#[from] serde_yaml::Error),

    #[error("Config must be a mapping of podcast title to feed URL")]
    NotAMapping,

    #[error("Invalid subscription entry: {0}")]
    InvalidEntry(String),

    #[error("Could not determine the user's home directory")]
    NoHomeDirectory,
}

/// Errors that can occur when fetching or parsing RSS feeds
#[derive(Error, Debug)]
pub enum FeedError {
    #[error("Failed to fetch feed from {url}: {source}")]
    FetchFailed {
        url: String,
        #[source]
        source: HttpError,
    },

    #[error("Failed to parse RSS feed: {0}")]
    ParseFailed(#[from] rss::Error),

    #[error("Invalid feed URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("Feed contains no episodes")]
    NoItems,

    #[error("Latest episode has no {field}")]
    MissingField { field: &'static str },

    #[error("Episode '{title}' has no enclosure (audio file)")]
    MissingEnclosure { title: String },
}

/// Errors that can occur while deciding on or starting a download
#[derive(Error, Debug)]
pub enum DownloadError {
    #[error("Failed to read answer from stdin: {0}")]
    Prompt(#[source] std::io::Error),
}

/// Errors that end the processing of a single subscription
#[derive(Error, Debug)]
pub enum SubscriptionError {
    #[error("Failed to create directory {path}: {source}")]
    CreateDirectoryFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Feed(#[from] FeedError),

    #[error(transparent)]
    Download(#[from] DownloadError),
}
