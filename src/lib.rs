pub mod command;
pub mod config;
pub mod episode;
pub mod error;
pub mod feed;
pub mod http;
pub mod playlist;
pub mod progress;
pub mod prompt;
pub mod runner;

// Re-export main types for convenience
pub use command::{CommandRunner, CommandSpec, SystemCommandRunner};
pub use config::{
    DEFAULT_CONFIG_PATH, SubscriptionEntry, default_podcast_home, ensure_dir, join_within,
    load_subscriptions, parse_subscriptions,
};
pub use episode::{
    DEFAULT_DOWNLOADER, DownloadContext, DownloadOutcome, detect_extension, download_episode,
    format_title, generate_filename,
};
pub use error::{ConfigError, DownloadError, FeedError, SubscriptionError};
pub use feed::{Episode, fetch_latest_episode, parse_latest_episode};
pub use http::{HttpClient, HttpError, ReqwestClient};
pub use playlist::{DEFAULT_PLAYER_PATH, PlaylistUpdater};
pub use progress::{NoopReporter, ProgressEvent, ProgressReporter, SharedProgressReporter};
pub use prompt::{Prompter, StdinPrompter};
pub use runner::{RunOptions, RunSummary, Subscription, run_subscriptions};
