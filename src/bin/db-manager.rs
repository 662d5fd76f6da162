//! Command-line maintenance for the API's SQLite store.
//!
//! Operates directly on the database file, so the server does not need to be running.

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use halloween_api::{db::RecordKind, models::DatabaseStats, Config, Store};

/// Inspect or wipe the Halloween API database
#[derive(Parser, Debug)]
#[command(name = "db-manager")]
#[command(about = "Database maintenance for the Halloween API", long_about = None)]
struct Args {
    /// Database file (defaults to DATABASE_PATH)
    #[arg(long)]
    database: Option<String>,

    /// Confirm destructive commands
    #[arg(short, long, global = true)]
    yes: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug, Clone, Copy)]
enum Command {
    /// Show record counts and database size
    Stats,
    /// Drop and recreate every table
    Reset,
    /// Delete all rows, keeping the schema
    Clear,
    /// Delete all images
    ClearImages,
    /// Delete all users
    ClearUsers,
    /// Delete all leaderboard entries
    ClearLeaderboard,
}

impl Command {
    /// Kinds of record the command deletes
    fn targets(self) -> &'static [RecordKind] {
        match self {
            Command::Stats => &[],
            Command::Reset | Command::Clear => &RecordKind::ALL,
            Command::ClearImages => &[RecordKind::Images],
            Command::ClearUsers => &[RecordKind::Users],
            Command::ClearLeaderboard => &[RecordKind::Leaderboard],
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "halloween_api=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let database_path = match args.database {
        Some(path) => path,
        None => {
            Config::from_env()
                .map_err(|e| anyhow::anyhow!(e))?
                .database_path
        }
    };

    let store = Store::open(&database_path).await?;
    let before = store.stats().await?;

    if let Command::Stats = args.command {
        print_stats(&before);
        return Ok(());
    }

    let pending = args
        .command
        .targets()
        .iter()
        .map(|kind| (*kind, count_of(&before, *kind)))
        .collect::<Vec<_>>();

    if !args.yes {
        println!("Dry run, nothing deleted. Re-run with --yes to apply.");
        for (kind, count) in &pending {
            println!("  would delete {} row(s) from {}", count, kind.table());
        }
        return Ok(());
    }

    let deleted = match args.command {
        Command::Reset => store.reset_all().await?,
        Command::Clear => store.clear_all().await?,
        Command::ClearImages => vec![(
            RecordKind::Images,
            store.clear(RecordKind::Images).await?,
        )],
        Command::ClearUsers => vec![(RecordKind::Users, store.clear(RecordKind::Users).await?)],
        Command::ClearLeaderboard => vec![(
            RecordKind::Leaderboard,
            store.clear(RecordKind::Leaderboard).await?,
        )],
        Command::Stats => Vec::new(),
    };

    for (kind, count) in &deleted {
        println!("Deleted {} row(s) from {}", count, kind.table());
    }
    print_stats(&store.stats().await?);

    Ok(())
}

fn count_of(stats: &DatabaseStats, kind: RecordKind) -> i64 {
    match kind {
        RecordKind::Images => stats.images_count,
        RecordKind::Users => stats.users_count,
        RecordKind::Leaderboard => stats.leaderboard_count,
    }
}

fn print_stats(stats: &DatabaseStats) {
    println!("Database statistics");
    println!("  Images:              {}", stats.images_count);
    println!("  Users:               {}", stats.users_count);
    println!("  Leaderboard entries: {}", stats.leaderboard_count);
    println!("  Size:                {}", stats.database_size_human);
    println!("  File:                {}", stats.database_path);
}
