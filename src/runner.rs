// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use std::path::{Path, PathBuf};

use crate::command::CommandRunner;
use crate::config::{SubscriptionEntry, ensure_dir, join_within};
use crate::episode::{DEFAULT_DOWNLOADER, DownloadContext, DownloadOutcome, download_episode};
use crate::error::SubscriptionError;
use crate::feed::fetch_latest_episode;
use crate::http::HttpClient;
use crate::progress::{ProgressEvent, SharedProgressReporter};
use crate::prompt::Prompter;

/// Options for a run over all subscriptions
#[derive(Debug, Clone)]
pub struct RunOptions {
    /// Directory holding one sub-directory per subscription
    pub podcast_home: PathBuf,
    /// Program used to download episodes
    pub downloader: String,
}

impl RunOptions {
    pub fn new(podcast_home: impl Into<PathBuf>) -> Self {
        Self {
            podcast_home: podcast_home.into(),
            downloader: DEFAULT_DOWNLOADER.to_string(),
        }
    }
}

/// A subscription resolved against the podcast home
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Subscription {
    pub title: String,
    pub feed_url: String,
    pub directory: PathBuf,
}

impl Subscription {
    pub fn new(entry: &SubscriptionEntry, podcast_home: &Path) -> Self {
        Self {
            title: entry.title.clone(),
            feed_url: entry.feed_url.clone(),
            directory: join_within(podcast_home, &entry.title),
        }
    }
}

/// Result of a run over all subscriptions
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Number of subscriptions processed, failed ones included
    pub checked: usize,
    /// Episodes the download command was run for
    pub downloaded: usize,
    /// Episodes already on disk
    pub skipped: usize,
    /// Episodes the user chose not to download
    pub declined: usize,
    /// Subscriptions that could not be checked (title, error message)
    pub failed: Vec<(String, String)>,
}

/// Check every subscription in order and offer its latest episode
///
/// A failing subscription is reported and never stops the run.
pub async fn run_subscriptions<C: HttpClient>(
    client: &C,
    entries: &[SubscriptionEntry],
    options: &RunOptions,
    prompter: &dyn Prompter,
    commands: &dyn CommandRunner,
    reporter: &SharedProgressReporter,
) -> RunSummary {
    let mut summary = RunSummary::default();

    for entry in entries {
        let subscription = Subscription::new(entry, &options.podcast_home);
        summary.checked += 1;

        let context = DownloadContext {
            subscription: &subscription.title,
            downloader: &options.downloader,
            prompter,
            commands,
            reporter,
        };

        match check_subscription(client, &subscription, &context).await {
            Ok(DownloadOutcome::Downloaded(_)) => summary.downloaded += 1,
            Ok(DownloadOutcome::AlreadyPresent(_)) => summary.skipped += 1,
            Ok(DownloadOutcome::Declined) => summary.declined += 1,
            Err(e) => {
                log::debug!("Subscription '{}' failed: {:?}", subscription.title, e);
                reporter.report(ProgressEvent::SubscriptionFailed {
                    title: subscription.title.clone(),
                    error: e.to_string(),
                });
                summary.failed.push((subscription.title, e.to_string()));
            }
        }
    }

    reporter.report(ProgressEvent::RunCompleted {
        checked_count: summary.checked,
        downloaded_count: summary.downloaded,
        skipped_count: summary.skipped,
        declined_count: summary.declined,
        failed_count: summary.failed.len(),
    });

    summary
}

async fn check_subscription<C: HttpClient>(
    client: &C,
    subscription: &Subscription,
    context: &DownloadContext<'_>,
) -> Result<DownloadOutcome, SubscriptionError> {
    ensure_dir(&subscription.directory).map_err(|e| SubscriptionError::CreateDirectoryFailed {
        path: subscription.directory.clone(),
        source: e,
    })?;

    context.reporter.report(ProgressEvent::CheckingSubscription {
        title: subscription.title.clone(),
    });
    context.reporter.report(ProgressEvent::FetchingFeed {
        url: subscription.feed_url.clone(),
    });

    let episode = fetch_latest_episode(client, &subscription.feed_url).await?;
    let outcome = download_episode(&episode, &subscription.directory, context)?;

    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::command::testing::{Invocation, RecordingRunner};
    use crate::http::HttpError;
    use crate::progress::testing::RecordingReporter;
    use crate::prompt::testing::ScriptedPrompter;
    use async_trait::async_trait;
    use bytes::Bytes;
    use std::sync::Arc;
    use tempfile::tempdir;

    /// Serves feeds by URL; any other URL fails as if the host were down
    struct MockHttpClient {
        feeds: Vec<(&'static str, String)>,
    }

    impl MockHttpClient {
        fn serving(feeds: Vec<(&'static str, String)>) -> Self {
            Self { feeds }
        }
    }

    #[async_trait]
    impl HttpClient for MockHttpClient {
        async fn get_bytes(&self, url: &str) -> Result<Bytes, HttpError> {
            match self.feeds.iter().find(|(u, _)| *u == url) {
                Some((_, body)) => Ok(Bytes::from(body.clone())),
                None => Err(format!("connection refused: {}", url).into()),
            }
        }
    }

    fn feed_with(title: &str, date: &str, url: &str) -> String {
        format!(
            r#"<?xml version="1.0"?>
<rss version="2.0">
  <channel>
    <title>Feed</title>
    <item>
      <title>{title}</title>
      <pubDate>{date}</pubDate>
      <enclosure url="{url}" type="audio/mpeg"/>
    </item>
  </channel>
</rss>"#
        )
    }

    fn entry(title: &str, feed_url: &str) -> SubscriptionEntry {
        SubscriptionEntry {
            title: title.to_string(),
            feed_url: feed_url.to_string(),
        }
    }

    #[tokio::test]
    async fn downloads_latest_episode_into_subscription_dir() {
        let home = tempdir().unwrap();
        let client = MockHttpClient::serving(vec![(
            "http://feed/a.xml",
            feed_with("Ep One", "2024-01-01", "http://cdn/ep1.mp3"),
        )]);
        let prompter = ScriptedPrompter::answering(&["y\n"]);
        let commands = RecordingRunner::default();
        let recorder = Arc::new(RecordingReporter::default());
        let reporter: SharedProgressReporter = recorder.clone();

        let summary = run_subscriptions(
            &client,
            &[entry("ShowA", "http://feed/a.xml")],
            &RunOptions::new(home.path()),
            &prompter,
            &commands,
            &reporter,
        )
        .await;

        let destination = home.path().join("ShowA").join("ep_one.mp3");
        assert!(home.path().join("ShowA").is_dir());
        assert_eq!(summary.checked, 1);
        assert_eq!(summary.downloaded, 1);
        assert!(summary.failed.is_empty());

        assert_eq!(
            commands.invocations(),
            vec![Invocation::Run(
                crate::episode::download_command("curl", "http://cdn/ep1.mp3", &destination)
            )]
        );

        let events = recorder.events();
        assert_eq!(
            events[..3],
            [
                ProgressEvent::CheckingSubscription {
                    title: "ShowA".to_string()
                },
                ProgressEvent::FetchingFeed {
                    url: "http://feed/a.xml".to_string()
                },
                ProgressEvent::EpisodeFound {
                    subscription: "ShowA".to_string(),
                    episode_title: "Ep One".to_string(),
                    pub_date: "2024-01-01".to_string(),
                },
            ]
        );
    }

    #[tokio::test]
    async fn network_failure_does_not_stop_the_run() {
        let home = tempdir().unwrap();
        let client = MockHttpClient::serving(vec![(
            "http://feed/b.xml",
            feed_with("Bee Episode", "2024-02-02", "http://cdn/bee.ogg"),
        )]);
        let prompter = ScriptedPrompter::answering(&["y\n"]);
        let commands = RecordingRunner::default();
        let recorder = Arc::new(RecordingReporter::default());
        let reporter: SharedProgressReporter = recorder.clone();

        let entries = [
            entry("Unreachable", "http://feed/down.xml"),
            entry("ShowB", "http://feed/b.xml"),
        ];
        let summary = run_subscriptions(
            &client,
            &entries,
            &RunOptions::new(home.path()),
            &prompter,
            &commands,
            &reporter,
        )
        .await;

        assert_eq!(summary.checked, entries.len());
        assert_eq!(summary.downloaded, 1);
        assert_eq!(summary.failed.len(), 1);
        assert_eq!(summary.failed[0].0, "Unreachable");
        assert!(summary.failed[0].1.contains("connection refused"));
        assert!(home.path().join("ShowB").is_dir());
        assert_eq!(commands.invocations().len(), 1);
        assert!(recorder.events().iter().any(|event| matches!(
            event,
            ProgressEvent::SubscriptionFailed { title, .. } if title == "Unreachable"
        )));
    }

    #[tokio::test]
    async fn malformed_feed_is_reported_and_skipped() {
        let home = tempdir().unwrap();
        let client = MockHttpClient::serving(vec![
            ("http://feed/broken.xml", "<html>oops".to_string()),
            (
                "http://feed/c.xml",
                feed_with("See", "2024-03-03", "http://cdn/see.mp3"),
            ),
        ]);
        let prompter = ScriptedPrompter::answering(&["n\n"]);
        let commands = RecordingRunner::default();
        let reporter = crate::progress::NoopReporter::shared();

        let summary = run_subscriptions(
            &client,
            &[
                entry("Broken", "http://feed/broken.xml"),
                entry("ShowC", "http://feed/c.xml"),
            ],
            &RunOptions::new(home.path()),
            &prompter,
            &commands,
            &reporter,
        )
        .await;

        assert_eq!(summary.checked, 2);
        assert_eq!(summary.declined, 1);
        assert_eq!(summary.failed.len(), 1);
        assert!(commands.invocations().is_empty());
    }

    #[tokio::test]
    async fn second_run_skips_existing_episode() {
        let home = tempdir().unwrap();
        let client = MockHttpClient::serving(vec![(
            "http://feed/a.xml",
            feed_with("Ep One", "2024-01-01", "http://cdn/ep1.mp3"),
        )]);
        let entries = [entry("ShowA", "http://feed/a.xml")];
        let options = RunOptions::new(home.path());
        let reporter = crate::progress::NoopReporter::shared();

        // The fake runner never writes the file, so emulate curl having done it.
        std::fs::create_dir_all(home.path().join("ShowA")).unwrap();
        std::fs::write(home.path().join("ShowA").join("ep_one.mp3"), b"audio").unwrap();

        let prompter = ScriptedPrompter::answering(&["y\n"]);
        let commands = RecordingRunner::default();
        let summary =
            run_subscriptions(&client, &entries, &options, &prompter, &commands, &reporter).await;

        assert_eq!(summary.skipped, 1);
        assert_eq!(summary.downloaded, 0);
        assert_eq!(prompter.question_count(), 0);
        assert!(commands.invocations().is_empty());
    }

    #[tokio::test]
    async fn directory_creation_failure_is_contained() {
        let home = tempdir().unwrap();
        // A plain file where the subscription directory should go.
        std::fs::write(home.path().join("Blocked"), b"not a directory").unwrap();

        let client = MockHttpClient::serving(vec![(
            "http://feed/a.xml",
            feed_with("Ep One", "2024-01-01", "http://cdn/ep1.mp3"),
        )]);
        let prompter = ScriptedPrompter::answering(&["n\n"]);
        let commands = RecordingRunner::default();
        let reporter = crate::progress::NoopReporter::shared();

        let summary = run_subscriptions(
            &client,
            &[
                entry("Blocked", "http://feed/a.xml"),
                entry("ShowA", "http://feed/a.xml"),
            ],
            &RunOptions::new(home.path()),
            &prompter,
            &commands,
            &reporter,
        )
        .await;

        assert_eq!(summary.checked, 2);
        assert_eq!(summary.failed.len(), 1);
        assert_eq!(summary.failed[0].0, "Blocked");
        assert_eq!(summary.declined, 1);
    }

    #[tokio::test]
    async fn empty_config_reports_completion() {
        let home = tempdir().unwrap();
        let client = MockHttpClient::serving(vec![]);
        let prompter = ScriptedPrompter::default();
        let commands = RecordingRunner::default();
        let recorder = Arc::new(RecordingReporter::default());
        let reporter: SharedProgressReporter = recorder.clone();

        let summary = run_subscriptions(
            &client,
            &[],
            &RunOptions::new(home.path()),
            &prompter,
            &commands,
            &reporter,
        )
        .await;

        assert_eq!(summary, RunSummary::default());
        assert_eq!(
            recorder.events(),
            vec![ProgressEvent::RunCompleted {
                checked_count: 0,
                downloaded_count: 0,
                skipped_count: 0,
                declined_count: 0,
                failed_count: 0,
            }]
        );
    }

    #[test]
    fn absolute_title_resolves_below_podcast_home() {
        let home = Path::new("/home/me/Music/podcasts");
        let subscription = Subscription::new(&entry("/tmp/escape", "http://feed/a.xml"), home);

        assert_eq!(subscription.directory, home.join("tmp").join("escape"));
        assert_eq!(subscription.title, "/tmp/escape");
    }
}
