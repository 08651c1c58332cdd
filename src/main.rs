use std::path::PathBuf;

use cart_recs::Result;
use cart_recs::commands::{list_items, run_recommender, show_rules};
use cart_recs::config::{run_interactive_config, show_config};
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "cart-recs")]
#[command(about = "Hybrid shopping-cart recommendations from association rules and a local LLM")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Configure Ollama connection and mining thresholds
    Config {
        /// Show current configuration
        #[arg(long)]
        show: bool,
    },
    /// Get recommendations, interactively or for items given on the command line
    Recommend {
        /// Cart item; may be repeated. Omit to select interactively.
        #[arg(long = "item")]
        items: Vec<String>,
        /// JSON transaction file to mine instead of the builtin dataset
        #[arg(long)]
        transactions: Option<PathBuf>,
    },
    /// Print the mined association rules
    Rules {
        /// JSON transaction file to mine instead of the builtin dataset
        #[arg(long)]
        transactions: Option<PathBuf>,
    },
    /// Print the selectable item universe
    Items {
        /// JSON transaction file to mine instead of the builtin dataset
        #[arg(long)]
        transactions: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Config { show } => {
            if show {
                show_config()?;
            } else {
                run_interactive_config()?;
            }
        }
        Commands::Recommend {
            items,
            transactions,
        } => {
            run_recommender(transactions.as_deref(), &items)?;
        }
        Commands::Rules { transactions } => {
            show_rules(transactions.as_deref())?;
        }
        Commands::Items { transactions } => {
            list_items(transactions.as_deref())?;
        }
    }

    Ok(())
}
