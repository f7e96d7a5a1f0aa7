mod download;
mod filename;

pub use download::{
    DEFAULT_DOWNLOADER, DownloadContext, DownloadOutcome, download_command, download_episode,
};
pub use filename::{detect_extension, format_title, generate_filename};
