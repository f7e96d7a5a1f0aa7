// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use std::path::PathBuf;
use std::sync::Arc;

/// Events emitted while checking subscriptions
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProgressEvent {
    /// A subscription is about to be checked
    CheckingSubscription { title: String },

    /// Feed is being fetched from URL
    FetchingFeed { url: String },

    /// The latest episode is not on disk yet; the user is asked next
    EpisodeFound {
        subscription: String,
        episode_title: String,
        pub_date: String,
    },

    /// The latest episode already exists at its destination
    AlreadyDownloaded { episode_title: String },

    /// The user answered anything but "y"
    DownloadDeclined { episode_title: String },

    /// The download command is being run
    DownloadStarting {
        episode_title: String,
        destination: PathBuf,
    },

    /// Checking a subscription failed; the run moves on
    SubscriptionFailed { title: String, error: String },

    /// The media player library is being refreshed
    UpdatingPlaylist,

    /// All subscriptions have been checked
    RunCompleted {
        checked_count: usize,
        downloaded_count: usize,
        skipped_count: usize,
        declined_count: usize,
        failed_count: usize,
    },
}

/// Trait for reporting progress events.
///
/// Implementations can use this to print notices, log messages,
/// or collect statistics.
pub trait ProgressReporter: Send + Sync {
    /// Report a progress event
    fn report(&self, event: ProgressEvent);
}

/// A shared reference to a progress reporter
pub type SharedProgressReporter = Arc<dyn ProgressReporter>;

/// A no-op progress reporter that silently ignores all events.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopReporter;

impl ProgressReporter for NoopReporter {
    fn report(&self, _event: ProgressEvent) {}
}

impl NoopReporter {
    /// Create a new NoopReporter wrapped in an Arc
    pub fn shared() -> SharedProgressReporter {
        Arc::new(Self)
    }
}
