// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use std::path::{Component, Path, PathBuf};

use serde::Deserialize;
use serde_yaml::{Mapping, Value};

use crate::error::ConfigError;

/// Default location of the subscriptions file, relative to the working directory
pub const DEFAULT_CONFIG_PATH: &str = "config.yml";

/// A configured podcast: the title used as directory name and its feed URL
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubscriptionEntry {
    pub title: String,
    pub feed_url: String,
}

/// Load subscriptions from a YAML file of `title: feed-url` lines
///
/// Entries are returned in the order they appear in the file.
pub fn load_subscriptions(path: &Path) -> Result<Vec<SubscriptionEntry>, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadFailed {
        path: path.to_path_buf(),
        source: e,
    })?;

    parse_subscriptions(&content)
}

/// Parse subscriptions from YAML text
pub fn parse_subscriptions(yaml: &str) -> Result<Vec<SubscriptionEntry>, ConfigError> {
    let document: Value = serde_yaml::from_str(yaml)?;

    let mapping = match document {
        Value::Null => return Ok(Vec::new()),
        Value::Mapping(mapping) => mapping,
        _ => return Err(ConfigError::NotAMapping),
    };

    mapping_to_entries(mapping)
}

fn mapping_to_entries(mapping: Mapping) -> Result<Vec<SubscriptionEntry>, ConfigError> {
    mapping
        .into_iter()
        .map(|(key, value)| {
            let title = String::deserialize(key)
                .map_err(|e| ConfigError::InvalidEntry(format!("title: {}", e)))?;
            let feed_url = String::deserialize(value)
                .map_err(|e| ConfigError::InvalidEntry(format!("feed URL for '{}': {}", title, e)))?;

            Ok(SubscriptionEntry { title, feed_url })
        })
        .collect()
}

/// The default podcast home: `<home>/Music/podcasts`
pub fn default_podcast_home() -> Result<PathBuf, ConfigError> {
    dirs::home_dir()
        .map(|home| home.join("Music").join("podcasts"))
        .ok_or(ConfigError::NoHomeDirectory)
}

/// Create a directory (and its parents) unless it already exists
pub fn ensure_dir(path: &Path) -> std::io::Result<()> {
    if !path.is_dir() {
        log::debug!("Creating directory {}", path.display());
        std::fs::create_dir_all(path)?;
    }
    Ok(())
}

/// Join a title-derived name onto `base` without ever leaving it
///
/// Root, prefix, `.` and `..` components are dropped, so `/tmp/x` and
/// `../x` both end up below `base`.
pub fn join_within(base: &Path, name: &str) -> PathBuf {
    let mut path = base.to_path_buf();
    for component in Path::new(name).components() {
        if let Component::Normal(part) = component {
            path.push(part);
        }
    }
    path
}
