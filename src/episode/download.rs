// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use std::path::{Path, PathBuf};

use crate::command::{CommandRunner, CommandSpec};
use crate::config::join_within;
use crate::error::DownloadError;
use crate::feed::Episode;
use crate::progress::{ProgressEvent, SharedProgressReporter};
use crate::prompt::{Prompter, is_confirmation};

use super::filename::generate_filename;

/// Program used to fetch episodes when none is configured
pub const DEFAULT_DOWNLOADER: &str = "curl";

const DOWNLOAD_QUESTION: &str = "Would you like to download it? [y/n]";

/// Collaborators needed to offer and start a download
pub struct DownloadContext<'a> {
    /// Title of the subscription the episode belongs to
    pub subscription: &'a str,
    /// Program invoked as `<program> -L <url> --output <destination>`
    pub downloader: &'a str,
    pub prompter: &'a dyn Prompter,
    pub commands: &'a dyn CommandRunner,
    pub reporter: &'a SharedProgressReporter,
}

/// What happened to an episode offered for download
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DownloadOutcome {
    /// A file with the episode's name already exists
    AlreadyPresent(PathBuf),
    /// The user did not confirm
    Declined,
    /// The download command was run for this destination
    Downloaded(PathBuf),
}

/// Build the download command for an episode URL and destination
pub fn download_command(program: &str, url: &str, destination: &Path) -> CommandSpec {
    CommandSpec::new(program)
        .arg("-L")
        .arg(url)
        .arg("--output")
        .arg(destination.to_string_lossy())
}

/// Offer an episode for download into `directory`
///
/// Episodes whose file already exists are skipped without asking. Otherwise
/// the user is shown the episode and asked; only a literal "y" starts the
/// download command. The command's exit status is not checked.
pub fn download_episode(
    episode: &Episode,
    directory: &Path,
    context: &DownloadContext<'_>,
) -> Result<DownloadOutcome, DownloadError> {
    let destination = join_within(directory, &generate_filename(episode));

    if destination.exists() {
        context.reporter.report(ProgressEvent::AlreadyDownloaded {
            episode_title: episode.title.clone(),
        });
        return Ok(DownloadOutcome::AlreadyPresent(destination));
    }

    context.reporter.report(ProgressEvent::EpisodeFound {
        subscription: context.subscription.to_string(),
        episode_title: episode.title.clone(),
        pub_date: episode.pub_date.clone(),
    });

    let answer = context
        .prompter
        .ask(DOWNLOAD_QUESTION)
        .map_err(DownloadError::Prompt)?;

    if !is_confirmation(&answer) {
        context.reporter.report(ProgressEvent::DownloadDeclined {
            episode_title: episode.title.clone(),
        });
        return Ok(DownloadOutcome::Declined);
    }

    context.reporter.report(ProgressEvent::DownloadStarting {
        episode_title: episode.title.clone(),
        destination: destination.clone(),
    });

    let command = download_command(context.downloader, &episode.url, &destination);
    if let Err(e) = context.commands.run(&command) {
        log::warn!("Failed to start `{}`: {}", command, e);
    }

    Ok(DownloadOutcome::Downloaded(destination))
}
