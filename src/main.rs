use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

use agora::{seed, Forum, Result, Seed};

mod commands;

/// Agora - threaded community discussions
#[derive(Parser)]
#[command(name = "agora")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Load discussions and comments from this JSON fixture instead of the built-in one
    #[arg(long, global = true, env = "AGORA_SEED")]
    seed: Option<PathBuf>,

    /// Log store activity to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Browse and vote on discussions
    #[command(subcommand)]
    Discussion(DiscussionCommands),
    /// Post and vote on comments
    #[command(subcommand)]
    Comment(CommentCommands),
}

#[derive(Subcommand)]
enum DiscussionCommands {
    /// List discussions, newest first
    #[command(alias = "ls")]
    List(DiscussionListArgs),
    /// Highest scoring discussions
    Trending(DiscussionTrendingArgs),
    /// Discussions from several communities
    Feed(DiscussionFeedArgs),
    /// Show a discussion with its comment thread
    View(DiscussionViewArgs),
    /// Upvote a discussion
    Upvote(DiscussionUpvoteArgs),
}

#[derive(Args)]
struct DiscussionListArgs {
    /// Only discussions of this community
    #[arg(short, long)]
    community: Option<String>,

    /// Output as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Args)]
struct DiscussionTrendingArgs {
    /// Maximum discussions to show
    #[arg(short = 'L', long)]
    limit: Option<usize>,

    /// Output as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Args)]
struct DiscussionFeedArgs {
    /// Community to include, can be repeated
    #[arg(short, long = "community", required = true, action = clap::ArgAction::Append)]
    communities: Vec<String>,

    /// Output as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Args)]
struct DiscussionViewArgs {
    /// Discussion id
    id: i64,

    /// Sort by: newest, most-upvoted
    #[arg(short, long, default_value = "newest")]
    sort: String,

    /// Depth at which replying stops
    #[arg(long)]
    max_depth: Option<usize>,

    /// Hide the body of a comment, can be repeated
    #[arg(long = "collapse", action = clap::ArgAction::Append)]
    collapse: Vec<i64>,

    /// Hide the replies of a comment, can be repeated
    #[arg(long = "collapse-replies", action = clap::ArgAction::Append)]
    collapse_replies: Vec<i64>,

    /// Output as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Args)]
struct DiscussionUpvoteArgs {
    /// Discussion id
    id: i64,
}

#[derive(Subcommand)]
enum CommentCommands {
    /// Add a top-level comment to a discussion
    Add(CommentAddArgs),
    /// Reply to a comment
    Reply(CommentReplyArgs),
    /// Upvote a comment
    Upvote(CommentUpvoteArgs),
}

#[derive(Args)]
struct CommentAddArgs {
    /// Discussion id
    discussion: i64,

    /// Comment author
    #[arg(short, long)]
    author: String,

    /// Comment body
    #[arg(short, long)]
    body: String,

    /// Posting time in RFC 3339, defaults to now
    #[arg(long)]
    at: Option<String>,

    /// Starting upvotes
    #[arg(long, default_value = "0")]
    upvotes: u32,
}

#[derive(Args)]
struct CommentReplyArgs {
    /// Discussion id
    discussion: i64,

    /// Comment being replied to
    parent: i64,

    /// Reply author
    #[arg(short, long)]
    author: String,

    /// Reply body
    #[arg(short, long)]
    body: String,

    /// Posting time in RFC 3339, defaults to now
    #[arg(long)]
    at: Option<String>,
}

#[derive(Args)]
struct CommentUpvoteArgs {
    /// Comment id
    id: i64,
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "agora=info" } else { "warn" };
    let _ = tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| default.into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init();
}

/// A fresh in-memory forum with the fixture loaded
fn open_forum(seed_path: Option<&PathBuf>) -> Result<Forum> {
    let fixture = match seed_path {
        Some(path) => Seed::from_path(path)?,
        None => Seed::builtin()?,
    };
    let forum = Forum::in_memory()?;
    seed::load(&forum, &fixture)?;
    Ok(forum)
}

fn run(cli: Cli) -> Result<()> {
    let forum = open_forum(cli.seed.as_ref())?;

    match cli.command {
        Commands::Discussion(cmd) => match cmd {
            DiscussionCommands::List(args) => commands::discussion::list(&forum, args),
            DiscussionCommands::Trending(args) => commands::discussion::trending(&forum, args),
            DiscussionCommands::Feed(args) => commands::discussion::feed(&forum, args),
            DiscussionCommands::View(args) => commands::discussion::view(&forum, args),
            DiscussionCommands::Upvote(args) => commands::discussion::upvote(&forum, args),
        },
        Commands::Comment(cmd) => match cmd {
            CommentCommands::Add(args) => commands::comment::add(&forum, args),
            CommentCommands::Reply(args) => commands::comment::reply(&forum, args),
            CommentCommands::Upvote(args) => commands::comment::upvote(&forum, args),
        },
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}
