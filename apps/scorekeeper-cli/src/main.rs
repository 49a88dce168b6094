use clap::{Parser, Subcommand};
use scorekeeper::domain::audit_game;
use scorekeeper::{build_state, telemetry, AppError, AppState, PlayerId, StoreConfig};
use serde::Serialize;
use tracing::debug;

#[derive(Parser)]
#[command(name = "scorekeeper")]
#[command(about = "Card game score ledger kept in a local file")]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Seat a new roster, replacing any stored game
    New {
        /// Player names in seating order
        #[arg(required = true, num_args = 2..)]
        names: Vec<String>,

        /// Score limit; defaults to SCOREKEEPER_SCORE_LIMIT
        #[arg(short, long)]
        limit: Option<i32>,
    },
    /// Record one round, one score per player in seating order
    Round {
        #[arg(required = true, allow_negative_numbers = true)]
        scores: Vec<i32>,

        /// Id of the player who called Dutch, e.g. player-2
        #[arg(short, long)]
        dutch: Option<String>,
    },
    /// Remove the most recent round
    Undo,
    /// Print the stored game
    Show,
    /// Check totals and history against each other
    Audit {
        /// Repair drifted totals
        #[arg(long)]
        fix: bool,
    },
    /// Clear the stored game
    Reset,
}

#[tokio::main]
async fn main() {
    telemetry::init_tracing("scorekeeper=warn");

    let args = Args::parse();

    let config = match StoreConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Invalid configuration: {e}");
            std::process::exit(2);
        }
    };

    debug!(path = %config.storage_path.display(), "Opening game storage");
    let state = match build_state().with_config(config).build() {
        Ok(state) => state,
        Err(e) => {
            eprintln!("Failed to open game storage: {e}");
            std::process::exit(1);
        }
    };

    if let Err(e) = run(&state, args.command).await {
        eprintln!("{}: {e}", e.code());
        std::process::exit(1);
    }
}

async fn run(state: &AppState, command: Command) -> Result<(), AppError> {
    let store = state.store();
    let sync = state.sync();

    match command {
        Command::New { names, limit } => {
            let limit = limit.unwrap_or(state.config().score_limit);
            let commit = store.create_game_with_limit(&names, limit)?;
            print_json(&commit.state)
        }
        Command::Round { scores, dutch } => {
            let dutch = dutch.map(PlayerId::new);
            sync.add_round(&scores, dutch.as_ref()).await?;
            let view = sync.view();
            if view.is_game_over {
                eprintln!("Score limit {} reached; game over", view.score_limit);
            }
            print_json(&view)
        }
        Command::Undo => {
            sync.undo_last_round().await?;
            print_json(&sync.view())
        }
        Command::Show => print_json(&store.snapshot()),
        Command::Audit { fix } => {
            let report = if fix {
                store.run_integrity_check()
            } else {
                Some(audit_game(&store.snapshot()))
            };
            match report {
                Some(report) => print_json(&report),
                None => {
                    eprintln!("No active game to audit");
                    Ok(())
                }
            }
        }
        Command::Reset => sync.reset_game(),
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<(), AppError> {
    let out = serde_json::to_string_pretty(value)
        .map_err(|e| AppError::storage("failed to render output", e))?;
    println!("{out}");
    Ok(())
}
