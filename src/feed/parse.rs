// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use quick_xml::events::Event;
use quick_xml::Reader;

use crate::error::FeedError;

/// The latest episode of a podcast feed
///
/// Values are kept exactly as they appear in the feed; the publication date
/// is shown to the user, never interpreted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Episode {
    pub title: String,
    pub url: String,
    pub pub_date: String,
}

/// Parse RSS feed XML bytes and return its first (newest) item
pub fn parse_latest_episode(xml_bytes: &[u8]) -> Result<Episode, FeedError> {
    let channel = rss::Channel::read_from(xml_bytes)?;
    let item = channel.items().first().ok_or(FeedError::NoItems)?;
    parse_episode(item, xml_bytes)
}

fn parse_episode(item: &rss::Item, xml_bytes: &[u8]) -> Result<Episode, FeedError> {
    let title = item
        .title()
        .map(String::from)
        .ok_or(FeedError::MissingField { field: "title" })?;

    let pub_date = item
        .pub_date()
        .or_else(|| {
            item.dublin_core_ext()
                .and_then(|dc| dc.dates().first())
                .map(String::as_str)
        })
        .map(String::from)
        .or_else(|| first_item_lowercase_pub_date(xml_bytes))
        .ok_or(FeedError::MissingField {
            field: "publication date",
        })?;

    let url = item
        .enclosure()
        .map(|enclosure| enclosure.url().to_string())
        .ok_or_else(|| FeedError::MissingEnclosure {
            title: title.clone(),
        })?;

    Ok(Episode {
        title,
        url,
        pub_date,
    })
}

/// Scan the first `<item>` for a `<pubdate>` element in any letter case
///
/// `rss` only knows `pubDate`; feeds written with `pubdate` would otherwise
/// lose their date.
fn first_item_lowercase_pub_date(xml_bytes: &[u8]) -> Option<String> {
    let mut reader = Reader::from_reader(xml_bytes);
    let mut in_item = false;
    let mut in_pub_date = false;

    loop {
        match reader.read_event() {
            Ok(Event::Start(element)) => {
                let name = element.local_name();
                if name.as_ref() == b"item" {
                    in_item = true;
                } else if in_item && name.as_ref().eq_ignore_ascii_case(b"pubdate") {
                    in_pub_date = true;
                }
            }
            Ok(Event::Text(text)) if in_pub_date => {
                let value = text.unescape().ok()?;
                let value = value.trim();
                if !value.is_empty() {
                    return Some(value.to_string());
                }
            }
            Ok(Event::CData(data)) if in_pub_date => {
                let value = String::from_utf8_lossy(&data).trim().to_string();
                if !value.is_empty() {
                    return Some(value);
                }
            }
            Ok(Event::End(element)) => {
                let name = element.local_name();
                if name.as_ref() == b"item" {
                    return None;
                }
                if name.as_ref().eq_ignore_ascii_case(b"pubdate") {
                    in_pub_date = false;
                }
            }
            Ok(Event::Eof) | Err(_) => return None,
            Ok(_) => {}
        }
    }
}
