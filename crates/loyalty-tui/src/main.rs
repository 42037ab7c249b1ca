mod app;
mod ui;

use std::fs::File;
use std::io::{self, stdout};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use clap::{Parser, Subcommand};
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::prelude::*;
use serde::Serialize;
use tracing_subscriber::EnvFilter;

use loyalty::dashboard::Overview;
use loyalty::state::{
    ActiveChallenge, AvailableChallenge, CategoryFilter, CompletedChallenge, SortOrder,
    TransactionFilter, DEFAULT_TIER_SPAN,
};
use loyalty::views::{self, ChallengeSummary, LedgerRow, LedgerSummary, RewardCard};
use loyalty::{
    Acknowledgement, ActionOutcome, CatalogSource, Dashboard, DashboardConfig, JsonFileSource,
    SeedCatalog,
};

#[derive(Parser)]
#[command(name = "loyalty-tui")]
#[command(about = "Interactive dashboard for the LoyaltyPlus rewards program")]
struct Cli {
    /// Load the catalog from a JSON file instead of the built-in demo data
    #[arg(long, global = true)]
    catalog: Option<PathBuf>,

    /// Points between two tier boundaries, used for the tier progress bar
    #[arg(
        long,
        global = true,
        default_value_t = DEFAULT_TIER_SPAN,
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    tier_span: u64,

    /// Print progress/debug info to stderr (one-shot commands only)
    #[arg(long, global = true)]
    verbose: bool,

    /// Write tracing output to this file
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    action: Option<Action>,
}

#[derive(Subcommand)]
enum Action {
    /// Account, tier progress, quick stats and achievements
    Status,
    /// Search the rewards catalog
    Rewards {
        /// Case-insensitive substring of the reward name
        #[arg(long, default_value = "")]
        query: String,
        /// Reward category, or "all"
        #[arg(long, default_value = "all")]
        category: CategoryFilter,
    },
    /// Active, available and completed challenges
    Challenges,
    /// Transaction history with totals
    History {
        /// all, earned, redeemed, or a transaction category
        #[arg(long, default_value = "all")]
        filter: TransactionFilter,
        /// newest or oldest
        #[arg(long, default_value = "newest")]
        sort: SortOrder,
    },
    /// Request a reward redemption
    Redeem {
        #[arg(long)]
        id: u32,
    },
    /// Request to start an available challenge
    StartChallenge {
        #[arg(long)]
        id: u32,
    },
}

// ---------------------------------------------------------------------------
// JSON output types
// ---------------------------------------------------------------------------

#[derive(Serialize)]
#[serde(tag = "type")]
enum CliOutput<'a> {
    #[serde(rename = "status")]
    Status(Overview<'a>),
    #[serde(rename = "rewards")]
    Rewards {
        query: String,
        category: String,
        rewards: Vec<RewardCard<'a>>,
    },
    #[serde(rename = "challenges")]
    Challenges {
        summary: ChallengeSummary,
        active: Vec<ActiveProgress<'a>>,
        available: &'a [AvailableChallenge],
        completed: &'a [CompletedChallenge],
    },
    #[serde(rename = "history")]
    History {
        filter: String,
        sort: String,
        summary: LedgerSummary,
        transactions: Vec<LedgerRow<'a>>,
    },
    #[serde(rename = "acknowledged")]
    Acknowledged {
        action: String,
        acknowledgement: Acknowledgement,
    },
    #[serde(rename = "error")]
    Error { action: String, error: String },
}

#[derive(Serialize)]
struct ActiveProgress<'a> {
    #[serde(flatten)]
    challenge: &'a ActiveChallenge,
    ratio: f64,
}

fn main() -> io::Result<()> {
    let cli = Cli::parse();
    let interactive = cli.action.is_none();
    let action_name = cli
        .action
        .as_ref()
        .map(action_to_name)
        .unwrap_or_else(|| "dashboard".into());

    if let Err(e) = init_logging(cli.log_file.as_deref(), cli.verbose, interactive) {
        fail(CliOutput::Error {
            action: action_name,
            error: format!("Failed to open log file: {}", e),
        });
    }

    let source: Box<dyn CatalogSource> = match &cli.catalog {
        Some(path) => Box::new(JsonFileSource::new(path)),
        None => Box::new(SeedCatalog),
    };
    let config = match DashboardConfig::new(cli.tier_span) {
        Ok(config) => config,
        Err(e) => fail(CliOutput::Error {
            action: action_name,
            error: e.to_string(),
        }),
    };
    let dashboard = match Dashboard::load(source.as_ref(), config) {
        Ok(dashboard) => dashboard,
        Err(e) => fail(CliOutput::Error {
            action: action_name,
            error: e.to_string(),
        }),
    };

    match cli.action {
        Some(action) => {
            run_oneshot(&dashboard, action);
            Ok(())
        }
        None => run_interactive(dashboard),
    }
}

/// Install a subscriber only where its output cannot tear the alternate screen.
fn init_logging(log_file: Option<&Path>, verbose: bool, interactive: bool) -> io::Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(if verbose { "debug" } else { "info" }));

    if let Some(path) = log_file {
        let file = File::create(path)?;
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_ansi(false)
            .with_writer(Mutex::new(file))
            .init();
    } else if verbose && !interactive {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(io::stderr)
            .init();
    }
    Ok(())
}

fn run_interactive(dashboard: Dashboard) -> io::Result<()> {
    // Panic hook: always restore terminal.
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original_hook(panic);
    }));

    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = app::App::new(dashboard);
    let result = app.run(&mut terminal);

    disable_raw_mode()?;
    execute!(io::stdout(), LeaveAlternateScreen)?;

    result
}

fn run_oneshot(dashboard: &Dashboard, action: Action) {
    let output = build_output(dashboard, action);
    if matches!(output, CliOutput::Error { .. }) {
        fail(output);
    }
    print_json(&output);
}

fn build_output(dashboard: &Dashboard, action: Action) -> CliOutput<'_> {
    let action_name = action_to_name(&action);

    match action {
        Action::Status => CliOutput::Status(dashboard.overview()),
        Action::Rewards { query, category } => CliOutput::Rewards {
            rewards: dashboard.rewards(&query, category),
            query,
            category: category.to_string(),
        },
        Action::Challenges => {
            let book = &dashboard.catalog().challenges;
            CliOutput::Challenges {
                summary: dashboard.challenge_summary(),
                active: book
                    .active
                    .iter()
                    .map(|challenge| ActiveProgress {
                        challenge,
                        ratio: views::progress_ratio(challenge),
                    })
                    .collect(),
                available: &book.available,
                completed: &book.completed,
            }
        }
        Action::History { filter, sort } => CliOutput::History {
            filter: filter.to_string(),
            sort: sort.to_string(),
            summary: dashboard.ledger_summary(),
            transactions: dashboard.history(filter, sort),
        },
        Action::Redeem { id } => outcome_output(action_name, dashboard.redeem(id)),
        Action::StartChallenge { id } => outcome_output(action_name, dashboard.start_challenge(id)),
    }
}

fn outcome_output(action: String, outcome: ActionOutcome) -> CliOutput<'static> {
    match outcome {
        ActionOutcome::Acknowledged(acknowledgement) => CliOutput::Acknowledged {
            action,
            acknowledgement,
        },
        ActionOutcome::Rejected(rejection) => CliOutput::Error {
            action,
            error: rejection.to_string(),
        },
    }
}

fn print_json(output: &CliOutput) {
    match serde_json::to_string(output) {
        Ok(line) => println!("{}", line),
        Err(e) => eprintln!("Failed to encode output: {}", e),
    }
}

fn fail(output: CliOutput) -> ! {
    print_json(&output);
    std::process::exit(1);
}

fn action_to_name(action: &Action) -> String {
    match action {
        Action::Status => "status".into(),
        Action::Rewards { .. } => "rewards".into(),
        Action::Challenges => "challenges".into(),
        Action::History { .. } => "history".into(),
        Action::Redeem { .. } => "redeem".into(),
        Action::StartChallenge { .. } => "start-challenge".into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use loyalty::catalog::seed;

    fn dashboard() -> Dashboard {
        Dashboard::new(seed(), DashboardConfig::default())
    }

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn tier_span_must_be_positive() {
        assert!(Cli::try_parse_from(["loyalty-tui", "--tier-span", "0", "status"]).is_err());
        let cli = Cli::try_parse_from(["loyalty-tui", "status", "--tier-span", "5300"]).unwrap();
        assert_eq!(cli.tier_span, 5_300);
    }

    #[test]
    fn selectors_parse_from_flags() {
        let cli = Cli::try_parse_from([
            "loyalty-tui",
            "history",
            "--filter",
            "Redeemed",
            "--sort",
            "oldest",
        ])
        .unwrap();
        match cli.action {
            Some(Action::History { filter, sort }) => {
                assert_eq!(filter.to_string(), "redeemed");
                assert_eq!(sort, SortOrder::Oldest);
            }
            _ => panic!("expected history"),
        }
        assert!(Cli::try_parse_from(["loyalty-tui", "rewards", "--category", "toys"]).is_err());
    }

    #[test]
    fn redeem_output_is_tagged() {
        let dashboard = dashboard();
        let output = outcome_output("redeem".into(), dashboard.redeem(1));
        let json = serde_json::to_value(&output).unwrap();
        assert_eq!(json["type"], "acknowledged");
        assert_eq!(json["acknowledgement"]["kind"], "redeem");
        assert_eq!(json["acknowledgement"]["points"], 1000);
    }

    #[test]
    fn rejected_action_becomes_error_output() {
        let dashboard = dashboard();
        let output = outcome_output("start-challenge".into(), dashboard.start_challenge(1));
        let json = serde_json::to_value(&output).unwrap();
        assert_eq!(json["type"], "error");
        assert_eq!(json["error"], "Challenge 1 is not available to start");
    }

    #[test]
    fn status_output_uses_camel_case_account() {
        let dashboard = dashboard();
        let json = serde_json::to_value(build_output(&dashboard, Action::Status)).unwrap();
        assert_eq!(json["type"], "status");
        assert_eq!(json["account"]["pointsToNextTier"], 2650);
        assert_eq!(json["stats"]["streakDays"], 15);
        assert_eq!(json["tierSpan"], 15000);
    }

    #[test]
    fn history_output_echoes_flag_values() {
        let dashboard = dashboard();
        let action = Action::History {
            filter: TransactionFilter::All,
            sort: SortOrder::Oldest,
        };
        let json = serde_json::to_value(build_output(&dashboard, action)).unwrap();
        assert_eq!(json["type"], "history");
        assert_eq!(json["filter"], "all");
        assert_eq!(json["sort"], "oldest");
        assert_eq!(json["transactions"][0]["id"], 8);

        let sort = json["sort"].as_str().unwrap();
        let filter = json["filter"].as_str().unwrap();
        let args = ["loyalty-tui", "history", "--filter", filter, "--sort", sort];
        let cli = Cli::try_parse_from(args).unwrap();
        assert!(matches!(
            cli.action,
            Some(Action::History { filter: TransactionFilter::All, sort: SortOrder::Oldest })
        ));
    }
}
