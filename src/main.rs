// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser};
use colored::Colorize;
use console::Emoji;
use indicatif::{ProgressBar, ProgressStyle};
use log::LevelFilter;

use podcheck::{
    DEFAULT_CONFIG_PATH, DEFAULT_DOWNLOADER, DEFAULT_PLAYER_PATH, PlaylistUpdater, ProgressEvent,
    ProgressReporter, ReqwestClient, RunOptions, SharedProgressReporter, StdinPrompter,
    SystemCommandRunner, default_podcast_home, ensure_dir, load_subscriptions, run_subscriptions,
};

// Emoji with fallback for terminals without Unicode support
static MICROPHONE: Emoji<'_, '_> = Emoji("🎙️  ", "");
static SEARCH: Emoji<'_, '_> = Emoji("🔍 ", "[~] ");
static HEADPHONES: Emoji<'_, '_> = Emoji("🎧 ", "[i] ");
static DOWNLOAD: Emoji<'_, '_> = Emoji("📥 ", "[v] ");
static SKIP: Emoji<'_, '_> = Emoji("⏭️  ", "[-] ");
static FAILURE: Emoji<'_, '_> = Emoji("❌ ", "[!] ");
static MUSIC: Emoji<'_, '_> = Emoji("🎶 ", "[*] ");
static PARTY: Emoji<'_, '_> = Emoji("🎉 ", "[*] ");

/// Check podcast feeds for new episodes and download them on request
#[derive(Parser, Debug)]
#[command(name = "podcheck")]
#[command(about = "Check podcast feeds for new episodes and download them on request")]
#[command(version)]
struct Args {
    /// YAML file mapping podcast titles to feed URLs
    #[arg(short, long, default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    /// Directory for downloaded podcasts [default: ~/Music/podcasts]
    #[arg(long)]
    home: Option<PathBuf>,

    /// Program used to download episodes
    #[arg(long, default_value = DEFAULT_DOWNLOADER)]
    downloader: String,

    /// Path of the mpd client used to refresh the playlist
    #[arg(long, default_value = DEFAULT_PLAYER_PATH)]
    player: PathBuf,

    /// Do not touch the mpd playlist
    #[arg(long)]
    no_playlist: bool,

    /// Increase log output (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

/// Prints events to the terminal, with a spinner while a feed loads
struct ConsoleReporter {
    spinner: Mutex<Option<ProgressBar>>,
}

impl ConsoleReporter {
    fn new() -> Self {
        Self {
            spinner: Mutex::new(None),
        }
    }

    fn start_spinner(&self, message: String) {
        let style = ProgressStyle::default_spinner()
            .template("{spinner:.green} {wide_msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner());

        let bar = ProgressBar::new_spinner();
        bar.set_style(style);
        bar.set_message(message);
        bar.enable_steady_tick(Duration::from_millis(100));

        if let Some(previous) = self.lock_spinner().replace(bar) {
            previous.finish_and_clear();
        }
    }

    fn clear_spinner(&self) {
        if let Some(bar) = self.lock_spinner().take() {
            bar.finish_and_clear();
        }
    }

    fn lock_spinner(&self) -> std::sync::MutexGuard<'_, Option<ProgressBar>> {
        self.spinner.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl ProgressReporter for ConsoleReporter {
    fn report(&self, event: ProgressEvent) {
        match event {
            ProgressEvent::CheckingSubscription { title } => {
                println!(
                    "\n{SEARCH}Checking {} for new episode",
                    title.bold().green()
                );
            }

            ProgressEvent::FetchingFeed { url } => {
                self.start_spinner(format!("Fetching feed: {}", url.cyan()));
            }

            ProgressEvent::EpisodeFound {
                subscription,
                episode_title,
                pub_date,
            } => {
                self.clear_spinner();
                println!(
                    "{HEADPHONES}Latest {} episode is: {} posted {}",
                    subscription.green(),
                    episode_title.bold(),
                    pub_date.cyan()
                );
            }

            ProgressEvent::AlreadyDownloaded { episode_title } => {
                self.clear_spinner();
                println!(
                    "{SKIP}You already have {}, skipping!",
                    episode_title.yellow()
                );
            }

            ProgressEvent::DownloadDeclined { episode_title } => {
                println!("{}", format!("Not downloading {}", episode_title).dimmed());
            }

            ProgressEvent::DownloadStarting {
                episode_title,
                destination,
            } => {
                println!(
                    "{DOWNLOAD}Downloading {} to {}",
                    episode_title.bold(),
                    destination.display().to_string().cyan()
                );
            }

            ProgressEvent::SubscriptionFailed { title, error } => {
                self.clear_spinner();
                println!(
                    "{FAILURE}{} {}",
                    format!("{}:", title).bold(),
                    format!("Oops, ran into {}. Try again?", error).red()
                );
            }

            ProgressEvent::UpdatingPlaylist => {
                println!("\n{MUSIC}Updating mpc playlist with new content..");
            }

            ProgressEvent::RunCompleted {
                checked_count,
                downloaded_count,
                skipped_count,
                declined_count,
                failed_count,
            } => {
                self.clear_spinner();
                println!(
                    "\n{PARTY}{} {} checked, {} downloaded, {} already present, {} declined, {} failed",
                    "Done:".bold().green(),
                    checked_count.to_string().cyan(),
                    downloaded_count.to_string().green().bold(),
                    skipped_count.to_string().yellow(),
                    declined_count.to_string().dimmed(),
                    if failed_count > 0 {
                        failed_count.to_string().red().bold()
                    } else {
                        failed_count.to_string().green()
                    }
                );
            }
        }
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        _ => LevelFilter::Debug,
    };

    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    println!(
        "\n{}{} {}",
        MICROPHONE,
        "podcheck".bold().magenta(),
        "- Podcast Checker".dimmed()
    );

    let entries = load_subscriptions(&args.config)
        .with_context(|| format!("Failed to load {}", args.config.display()))?;
    log::info!("Loaded {} subscriptions", entries.len());

    let podcast_home = match args.home {
        Some(home) => home,
        None => default_podcast_home()?,
    };
    ensure_dir(&podcast_home).with_context(|| {
        format!(
            "Failed to create podcast directory {}",
            podcast_home.display()
        )
    })?;

    let client = ReqwestClient::new();
    let commands = SystemCommandRunner;
    let reporter: SharedProgressReporter = Arc::new(ConsoleReporter::new());

    let options = RunOptions {
        podcast_home,
        downloader: args.downloader,
    };

    let summary = run_subscriptions(
        &client,
        &entries,
        &options,
        &StdinPrompter,
        &commands,
        &reporter,
    )
    .await;
    log::info!(
        "Checked {} subscriptions, {} failed",
        summary.checked,
        summary.failed.len()
    );

    if !args.no_playlist {
        PlaylistUpdater::new(args.player).update(&commands, &reporter);
    }

    Ok(())
}
