// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use bytes::Bytes;
use url::Url;

use crate::error::FeedError;
use crate::http::HttpClient;

use super::parse::{Episode, parse_latest_episode};

/// Fetch raw feed bytes from a URL (without parsing)
async fn fetch_feed_bytes<C: HttpClient>(client: &C, url: &str) -> Result<Bytes, FeedError> {
    let bytes = client
        .get_bytes(url)
        .await
        .map_err(|e| FeedError::FetchFailed {
            url: url.to_string(),
            source: e,
        })?;
    Ok(bytes)
}

/// Fetch a feed and return its latest episode
pub async fn fetch_latest_episode<C: HttpClient>(
    client: &C,
    url: &str,
) -> Result<Episode, FeedError> {
    Url::parse(url)?;
    let bytes = fetch_feed_bytes(client, url).await?;
    log::debug!("Fetched {} bytes from {}", bytes.len(), url);
    parse_latest_episode(&bytes)
}
