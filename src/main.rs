//! Chaordle - console runner
//!
//! Runs the game against an in-memory chat host. Each line typed on stdin is
//! posted as a message from the configured author; bot replies are printed.

use anyhow::{Context, Result};
use chaordle::{
    BotConfig,
    game::SessionManager,
    host::{Archive, ChannelId, CommunityId, InboundMessage, MemoryHost, SentMessage, UserId},
    wordlists::Dictionary,
};
use clap::Parser;
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tracing::warn;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(
    name = "chaordle",
    about = "Guess words sampled from your community's own chat history",
    version,
    author
)]
struct Cli {
    /// Common English word list (one word per line)
    #[arg(long, default_value = "words/english.txt")]
    english: PathBuf,

    /// Common French word list (one word per line, accents allowed)
    #[arg(long, default_value = "words/french.txt")]
    french: PathBuf,

    /// JSON archive of communities, channels and message history
    #[arg(short, long)]
    archive: Option<PathBuf>,

    /// Command prefix
    #[arg(short, long, default_value = "!")]
    prefix: String,

    /// Word search timeout in seconds (0 = no timeout)
    #[arg(long, default_value = "30")]
    lookup_timeout: u64,

    /// Seed for secret word selection (random if omitted)
    #[arg(long)]
    seed: Option<u64>,

    /// Community the console speaks in
    #[arg(long, default_value = "1")]
    community: u64,

    /// Channel the console speaks in
    #[arg(long, default_value = "1")]
    channel: u64,

    /// User id the console speaks as
    #[arg(long, default_value = "1")]
    author: u64,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "chaordle=info".into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let dictionary = Arc::new(load_dictionary(&cli.english, &cli.french)?);

    let archive = match &cli.archive {
        Some(path) => Archive::load(path)
            .with_context(|| format!("Failed to load archive {}", path.display()))?,
        None => Archive::default(),
    };
    let host = Arc::new(MemoryHost::from_archive(&archive));
    host.add_channel(CommunityId(cli.community), ChannelId(cli.channel));

    let mut config = BotConfig::default()
        .with_prefix(cli.prefix.clone())
        .with_lookup_timeout(Duration::from_secs(cli.lookup_timeout));
    if let Some(seed) = cli.seed {
        config = config.with_seed(seed);
    }
    let mut manager = SessionManager::start(Arc::clone(&host), dictionary, config)
        .await
        .context("Failed to start sessions")?;

    tokio::spawn(print_replies(host.subscribe()));

    println!(
        "{} Type messages as user {} in channel {}. {} switches channel, {} shows the round state, {} exits.",
        "chaordle".bright_cyan().bold(),
        cli.author,
        cli.channel,
        "/channel <id>".yellow(),
        "/status".yellow(),
        "/quit".yellow()
    );

    run_console(&host, &mut manager, &cli).await
}

fn load_dictionary(english: &Path, french: &Path) -> Result<Dictionary> {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(ProgressStyle::default_spinner().template("{spinner:.green} {msg}")?);
    spinner.set_message("Loading common word lists...");
    spinner.enable_steady_tick(Duration::from_millis(80));

    let dictionary = Dictionary::load(english, french).with_context(|| {
        format!(
            "Failed to load word lists {} and {}",
            english.display(),
            french.display()
        )
    })?;

    spinner.finish_with_message(format!(
        "Loaded {} English and {} French common words",
        dictionary.english_count(),
        dictionary.french_count()
    ));
    Ok(dictionary)
}

async fn run_console(
    host: &MemoryHost,
    manager: &mut SessionManager<MemoryHost>,
    cli: &Cli,
) -> Result<()> {
    let author = UserId(cli.author);
    let mut community = CommunityId(cli.community);
    let mut channel = ChannelId(cli.channel);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        match line.split_whitespace().collect::<Vec<_>>().as_slice() {
            ["/quit"] => break,
            ["/status"] => match manager.session(community).phase().await {
                Ok(phase) => println!("community {community}: {phase}"),
                Err(err) => println!("{}", err.to_string().red()),
            },
            ["/channel", id] => match id.parse().ok().map(ChannelId) {
                Some(id) => match host.community_of(id) {
                    Some(owner) => {
                        channel = id;
                        community = owner;
                        println!("now in channel {channel} of community {community}");
                    }
                    None => println!("{}", format!("no channel {id}").red()),
                },
                None => println!("{}", "usage: /channel <id>".red()),
            },
            _ => {
                host.post(channel, author, line);
                let message = InboundMessage {
                    community,
                    channel,
                    author,
                    content: line.to_string(),
                };
                if let Err(err) = manager.dispatch(&message) {
                    warn!(error = %err, "message dropped");
                }
            }
        }
    }

    Ok(())
}

async fn print_replies(mut replies: mpsc::UnboundedReceiver<SentMessage>) {
    while let Some(message) = replies.recv().await {
        println!(
            "{} {}",
            format!("[#{}] bot:", message.channel).bright_cyan().bold(),
            message.text
        );
    }
}
