mod fetch;
mod parse;

pub use fetch::fetch_latest_episode;
pub use parse::{Episode, parse_latest_episode};
