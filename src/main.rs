use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use draft_tracker::api::{build_router, state::AppState};
use draft_tracker::calculate::{
    compute_combinations, compute_hero_stats, compute_summary, filter_combinations, search_heroes,
    search_matches,
};
use draft_tracker::config::AppConfig;
use draft_tracker::entry::NewMatch;
use draft_tracker::models::{Draft, MatchId, Role, Side};
use draft_tracker::storage::{LocalMatchStore, MatchStore};

#[derive(Parser)]
#[command(name = "draft-tracker")]
#[command(about = "Esports match recorder with draft analytics")]
#[command(version)]
struct Cli {
    /// Path to configuration file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Data directory path (overrides config)
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<String>,

    /// Output logs as JSON
    #[arg(long)]
    json_logs: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the API server
    Serve {
        /// Bind address (overrides config)
        #[arg(long)]
        host: Option<String>,

        /// Port number (overrides config)
        #[arg(long)]
        port: Option<u16>,
    },

    /// Record a match
    Add {
        /// Opponent team name
        #[arg(long)]
        opponent: String,

        /// Own picks in role order: Goldlane,Explaner,Jungler,Midlane,Roamer
        #[arg(long)]
        own: String,

        /// Opponent picks in role order
        #[arg(long)]
        opp: String,

        /// Own bans, comma-separated
        #[arg(long, default_value = "")]
        own_bans: String,

        /// Opponent bans, comma-separated
        #[arg(long, default_value = "")]
        opp_bans: String,

        /// Winning side: own or opp
        #[arg(long)]
        winner: Side,

        /// Match date (YYYY-MM-DD), defaults to today
        #[arg(long)]
        date: Option<String>,
    },

    /// List recorded matches, newest first
    List {
        /// Case-insensitive filter on opponent and picked heroes
        #[arg(long)]
        search: Option<String>,
    },

    /// Delete a match by id
    Delete { id: String },

    /// Hero pick/ban/win statistics
    Heroes {
        /// own or opponent
        #[arg(long, default_value = "own")]
        side: Side,

        /// Case-insensitive hero name filter
        #[arg(long)]
        search: Option<String>,
    },

    /// Head-to-head draft combinations
    H2h {
        /// Own heroes that must appear, comma-separated
        #[arg(long, default_value = "")]
        own: String,

        /// Opponent heroes that must appear, comma-separated
        #[arg(long, default_value = "")]
        opp: String,
    },

    /// Overall team record
    Summary,
}

fn split_list(raw: &str) -> Vec<String> {
    raw.split(',').map(|s| s.trim().to_string()).collect()
}

fn parse_draft(raw: &str) -> Result<Draft> {
    let heroes = split_list(raw);
    if heroes.len() != Role::ALL.len() {
        bail!(
            "expected {} comma-separated heroes ({}), got {}",
            Role::ALL.len(),
            Role::ALL.map(|r| r.to_string()).join(","),
            heroes.len()
        );
    }

    let mut draft = Draft::default();
    for (role, hero) in Role::ALL.into_iter().zip(heroes) {
        draft.set(role, hero);
    }
    Ok(draft)
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = AppConfig::load_or_default(cli.config.as_deref())
        .context("Failed to load configuration")?;
    if let Some(dir) = cli.data_dir {
        config.data_dir = dir;
    }
    if let Some(level) = cli.log_level {
        config.log_level = level;
    }

    // Initialize tracing
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.log_level));
    let registry = tracing_subscriber::registry().with(filter);
    if cli.json_logs {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }

    tracing::debug!("Using data directory {:?}", config.data_dir);
    let store = LocalMatchStore::new(&config.storage());

    match cli.command {
        Commands::Serve { host, port } => {
            if let Some(host) = host {
                config.server.host = host;
            }
            if let Some(port) = port {
                config.server.port = port;
            }
            config.validate()?;

            tracing::info!("Starting draft-tracker v{}", env!("CARGO_PKG_VERSION"));
            let addr = config.server.bind_addr();
            let app = build_router(AppState::new(config));
            let listener = tokio::net::TcpListener::bind(&addr).await?;
            tracing::info!("Dashboard: http://{}", addr);
            axum::serve(listener, app).await?;
        }
        Commands::Add {
            opponent,
            own,
            opp,
            own_bans,
            opp_bans,
            winner,
            date,
        } => {
            let entry = NewMatch {
                date,
                opponent,
                own_heroes: parse_draft(&own).context("--own")?,
                opp_heroes: parse_draft(&opp).context("--opp")?,
                own_bans: split_list(&own_bans),
                opp_bans: split_list(&opp_bans),
                winner,
            };
            let record = entry.into_match(chrono::Local::now().date_naive())?;
            store.append(record.clone())?;
            println!("Recorded {} vs {} on {}", record.id, record.opponent, record.date);
        }
        Commands::List { search } => {
            let mut matches = store.list()?;
            if let Some(query) = search.as_deref() {
                matches = search_matches(&matches, query);
            }
            if matches.is_empty() {
                println!("No matches recorded.");
            }
            for m in &matches {
                let result = if m.won_by(Side::Own) { "W" } else { "L" };
                println!(
                    "{}  {}  {:<16} {}  [{}]",
                    m.date,
                    result,
                    m.opponent,
                    m.own_heroes.heroes().collect::<Vec<_>>().join(", "),
                    m.id
                );
            }
        }
        Commands::Delete { id } => {
            let id = MatchId::from(id);
            if store.delete(&id)? {
                println!("Deleted {}", id);
            } else {
                bail!("No match with id {}", id);
            }
        }
        Commands::Heroes { side, search } => {
            let matches = store.list()?;
            let mut stats = compute_hero_stats(&matches, side);
            if let Some(query) = search.as_deref() {
                stats = search_heroes(&stats, query);
            }

            println!("\n=== {} heroes ({} matches) ===", side, matches.len());
            println!(
                "{:<16} {:>5} {:>5} {:>5} {:>8} {:>8} {:>8}",
                "Hero", "Pick", "Ban", "Win", "Pres%", "Win%", "Impact"
            );
            for s in &stats {
                println!(
                    "{:<16} {:>5} {:>5} {:>5} {:>8.1} {:>8.1} {:>8.1}",
                    s.hero, s.pick, s.ban, s.win, s.presence, s.win_rate, s.impact
                );
            }
        }
        Commands::H2h { own, opp } => {
            let matches = store.list()?;
            let all = compute_combinations(&matches);
            let combos = filter_combinations(&all, &own, &opp);

            println!("\n=== {} of {} combinations ===", combos.len(), all.len());
            for c in &combos {
                println!(
                    "{}x  {:.0}% win  [{}] vs [{}]",
                    c.total,
                    c.win_rate,
                    c.picks.join(", "),
                    c.opp_picks.join(", ")
                );
                if !c.bans.is_empty() || !c.opp_bans.is_empty() {
                    println!(
                        "      bans: [{}] vs [{}]",
                        c.bans.join(", "),
                        c.opp_bans.join(", ")
                    );
                }
            }
        }
        Commands::Summary => match compute_summary(&store.list()?) {
            Some(s) => {
                println!("\n=== {} ===", config.team_name);
                println!("Matches:       {}", s.total);
                println!("Wins/Losses:   {}/{}", s.wins, s.losses);
                println!("Win rate:      {:.1}%", s.win_rate);
                println!("Unique heroes: {}", s.unique_heroes);
                println!("Opponents:     {}", s.unique_teams);
                println!("Best streak:   {}", s.max_win_streak);
            }
            None => println!("No matches recorded."),
        },
    }

    Ok(())
}
