// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use crate::feed::Episode;

/// Extensions recognised in enclosure URLs
const AUDIO_EXTENSIONS: [&str; 2] = ["ogg", "mp3"];

/// Format an episode title for use as a filename stem
///
/// Surrounding whitespace is trimmed, spaces become underscores and the
/// result is lower-cased.
pub fn format_title(title: &str) -> String {
    title.trim().replace(' ', "_").to_lowercase()
}

/// Find the audio extension in an enclosure URL
///
/// Scans the whole URL left to right for "ogg" or "mp3" and returns the last
/// match. Query strings are part of the scan.
pub fn detect_extension(url: &str) -> Option<&'static str> {
    let mut found = None;
    let mut rest = url;

    while !rest.is_empty() {
        match AUDIO_EXTENSIONS.iter().find(|ext| rest.starts_with(**ext)) {
            Some(ext) => {
                found = Some(*ext);
                rest = &rest[ext.len()..];
            }
            None => {
                let step = rest.chars().next().map_or(1, char::len_utf8);
                rest = &rest[step..];
            }
        }
    }

    found
}

/// Generate the filename an episode is stored under
///
/// Without a recognised extension the name ends in a bare dot.
pub fn generate_filename(episode: &Episode) -> String {
    format!(
        "{}.{}",
        format_title(&episode.title),
        detect_extension(&episode.url).unwrap_or_default()
    )
}
