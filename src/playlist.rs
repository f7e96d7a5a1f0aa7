// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use std::path::PathBuf;

use crate::command::{CommandRunner, CommandSpec};
use crate::progress::{ProgressEvent, SharedProgressReporter};

/// Where the mpd client is expected to live
pub const DEFAULT_PLAYER_PATH: &str = "/usr/bin/mpc";

/// Refreshes the media player's library and queues every track
#[derive(Debug, Clone)]
pub struct PlaylistUpdater {
    player: PathBuf,
}

impl PlaylistUpdater {
    pub fn new(player: impl Into<PathBuf>) -> Self {
        Self {
            player: player.into(),
        }
    }

    /// Whether the player binary exists
    pub fn is_available(&self) -> bool {
        self.player.exists()
    }

    fn command(&self) -> CommandSpec {
        CommandSpec::new(self.player.to_string_lossy())
    }

    /// Rescan the library (waiting for it to finish), then add all tracks
    ///
    /// Returns `false` without running anything when the player is missing.
    pub fn update(&self, commands: &dyn CommandRunner, reporter: &SharedProgressReporter) -> bool {
        if !self.is_available() {
            log::info!(
                "{} not found, leaving the playlist alone",
                self.player.display()
            );
            return false;
        }

        reporter.report(ProgressEvent::UpdatingPlaylist);

        let rescan = self.command().arg("update").arg("--wait");
        if let Err(e) = commands.run(&rescan) {
            log::warn!("Failed to start `{}`: {}", rescan, e);
        }

        let list = self.command().arg("ls");
        let add = self.command().arg("add");
        if let Err(e) = commands.pipe(&list, &add) {
            log::warn!("Failed to start `{} | {}`: {}", list, add, e);
        }

        true
    }
}

impl Default for PlaylistUpdater {
    fn default() -> Self {
        Self::new(DEFAULT_PLAYER_PATH)
    }
}
