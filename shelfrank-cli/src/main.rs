mod api;
mod config;
mod output;

use clap::Parser;
use reqwest::Client;
use shelfrank_core::{
    constants::{DEFAULT_SIMILAR_BIAS, DEFAULT_SIMILAR_WINDOW},
    resolve_comparison, ComparisonEngine, RankedItem, SelectionConfig,
};
use std::io::{self, Write};
use std::path::PathBuf;

use crate::api::{ApiConfig, RankingApi};

pub fn bail(msg: impl std::fmt::Display) -> ! {
    eprintln!("Error: {msg}");
    std::process::exit(1);
}

#[derive(Parser)]
#[command(name = "shelfrank", version, about = "Refine personal rankings through pairwise comparisons")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Run the interactive comparison loop
    Compare(CompareArgs),
    /// Print the current rankings
    List(ListArgs),
    /// Create a default config file at ~/.config/shelfrank/config.toml
    Init,
}

#[derive(Parser)]
struct CompareArgs {
    /// Base URL of the ranking backend
    #[arg(long)]
    endpoint: Option<String>,

    /// Bearer token for the API (also reads SHELFRANK_API_KEY env var)
    #[arg(long)]
    api_key: Option<String>,

    /// Seed a calibration queue for this newly ranked item before
    /// freeform comparisons begin
    #[arg(long)]
    calibrate: Option<i64>,

    /// Rating gap under which two items count as similarly rated
    #[arg(long)]
    similar_window: Option<i64>,

    /// Probability that a freeform draw uses the similar-rating pool
    #[arg(long)]
    similar_bias: Option<f64>,

    /// Path to config file (default: ~/.config/shelfrank/config.toml)
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(Parser)]
struct ListArgs {
    /// Base URL of the ranking backend
    #[arg(long)]
    endpoint: Option<String>,

    /// Bearer token for the API (also reads SHELFRANK_API_KEY env var)
    #[arg(long)]
    api_key: Option<String>,

    /// Output JSON instead of table
    #[arg(long)]
    json: bool,

    /// Path to config file (default: ~/.config/shelfrank/config.toml)
    #[arg(long)]
    config: Option<PathBuf>,
}

/// Resolve endpoint + key from CLI args, config file and environment
/// (CLI wins), and build the backend client.
fn build_api(
    endpoint: Option<String>,
    api_key: Option<String>,
    config_file: Option<PathBuf>,
) -> (RankingApi, config::ShelfrankConfig) {
    let config_path = config_file.unwrap_or_else(config::config_path);
    let cfg = config::load_config(&config_path);

    let endpoint = endpoint.or(cfg.endpoint.clone()).unwrap_or_else(|| {
        bail(format!("No endpoint specified. Pass --endpoint or set it in {}", config_path.display()));
    });
    let api_key = api_key.or_else(|| std::env::var("SHELFRANK_API_KEY").ok());

    let api = RankingApi::new(Client::new(), ApiConfig { endpoint, api_key });
    (api, cfg)
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    match cli.command {
        Commands::Compare(args) => run_compare(args).await,
        Commands::List(args) => run_list(args).await,
        Commands::Init => {
            let path = config::create_default_config();
            println!("Created config at {}", path.display());
            println!("Edit it to set your backend endpoint.");
        }
    }
}

async fn run_list(args: ListArgs) {
    let (api, _) = build_api(args.endpoint, args.api_key, args.config);

    let mut items = api.fetch_ranked_items().await.unwrap_or_else(|e| bail(e));
    items.sort_by_key(|i| std::cmp::Reverse(i.rating));

    if args.json {
        output::print_json(&items);
    } else {
        output::print_table(&items);
    }
}

async fn run_compare(args: CompareArgs) {
    let (api, cfg) = build_api(args.endpoint, args.api_key, args.config);

    let selection = SelectionConfig {
        similar_window: args.similar_window.or(cfg.similar_window).unwrap_or(DEFAULT_SIMILAR_WINDOW),
        similar_bias: args.similar_bias.or(cfg.similar_bias).unwrap_or(DEFAULT_SIMILAR_BIAS),
    };
    if !(0.0..=1.0).contains(&selection.similar_bias) {
        bail("--similar-bias must be between 0.0 and 1.0");
    }

    let mut items = api.fetch_ranked_items().await.unwrap_or_else(|e| bail(e));
    let mut version: u64 = 0;

    let mut engine = ComparisonEngine::new(selection);
    engine.set_items(&items, version);

    if let Some(id) = args.calibrate {
        engine.start_calibration(id);
        if engine.is_calibrating() {
            println!("Calibrating item {id}: {} matchups queued.", engine.queue_len());
        } else {
            println!("Item {id} is not in the ranked set; continuing with freeform matchups.");
        }
    }
    if engine.current_pair().is_none() {
        engine.next_pair();
    }

    println!("Pick a winner with 1 or 2, s to skip the matchup, q to quit.\n");

    loop {
        let Some((left_id, right_id)) = engine.current_pair() else {
            println!("Not enough ranked items to compare. Rank at least two items first.");
            break;
        };

        let left = items.iter().find(|i| i.id == left_id).cloned();
        let right = items.iter().find(|i| i.id == right_id).cloned();
        let (Some(left), Some(right)) = (left, right) else {
            // The list refreshed out from under the shown pair; redraw.
            if engine.next_pair().is_none() {
                println!("Not enough ranked items to compare. Rank at least two items first.");
                break;
            }
            continue;
        };

        if engine.is_calibrating() {
            println!("[calibration, {} left in queue]", engine.queue_len());
        }
        println!("  [1] {}   vs   [2] {}", left.name, right.name);
        print!("> ");
        let _ = io::stdout().flush();

        let mut line = String::new();
        let read = io::stdin()
            .read_line(&mut line)
            .unwrap_or_else(|e| bail(format!("Failed to read from stdin: {e}")));
        if read == 0 {
            break; // EOF
        }

        match line.trim() {
            "q" => break,
            "s" => {
                engine.next_pair();
            }
            pick @ ("1" | "2") => {
                let (winner, loser) = if pick == "1" { (&left, &right) } else { (&right, &left) };

                match resolve_comparison(&api, winner, loser).await {
                    Err(e) => {
                        // Same matchup stays up so the pick can be retried.
                        eprintln!("  {e}");
                    }
                    Ok(outcome) => {
                        match outcome {
                            Some(result) => output::print_result(&result),
                            None => println!("  Recorded (updated ratings unavailable)."),
                        }
                        refresh_items(&api, &mut engine, &mut items, &mut version).await;
                        engine.next_pair();
                    }
                }
            }
            _ => println!("  Unrecognized input."),
        }
        println!();
    }
}

/// Re-fetch the ranked working set after a recorded comparison; a failed
/// refresh keeps the previous list and only warns.
async fn refresh_items(
    api: &RankingApi,
    engine: &mut ComparisonEngine,
    items: &mut Vec<RankedItem>,
    version: &mut u64,
) {
    match api.fetch_ranked_items().await {
        Ok(fresh) => {
            *items = fresh;
            *version += 1;
            engine.set_items(items, *version);
        }
        Err(e) => eprintln!("  Warning: failed to refresh items: {e}"),
    }
}
