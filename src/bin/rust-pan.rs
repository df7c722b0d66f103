//! rust-pan CLI: validate and generate payment card numbers.
//!
//! Prints the JSON response shapes from `rust_pan::response` on stdout.
//! Logs go to stderr, filtered by `RUST_LOG` (default `warn`).

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

use rust_pan::{
    well_known, CardClassifier, CardGenerator, CardNumberInput, GenerationResponse,
    GeneratorConfig, InMemoryRegistry, RegistrySnapshot, ValidationResponse,
};

/// Payment card number validation and generation (ISO/IEC 7812).
#[derive(Parser, Debug)]
#[command(name = "rust-pan", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Registry snapshot (JSON) to use instead of the built-in issuer table
    #[arg(long, global = true)]
    registry: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Validate a card number and describe it.
    Validate {
        /// Card number; spaces are ignored.
        card_number: String,
    },
    /// Generate a random valid card number for an issuer.
    Generate {
        /// Issuer network name, e.g. "Visa".
        issuer: String,

        /// Seed for reproducible output
        #[arg(long)]
        seed: Option<u64>,
    },
    /// List the issuers in the registry.
    Issuers,
}

fn load_registry(path: Option<&PathBuf>) -> Result<InMemoryRegistry> {
    match path {
        Some(path) => {
            let snapshot = RegistrySnapshot::from_path(path)
                .with_context(|| format!("reading registry {}", path.display()))?;
            let registry = snapshot
                .into_registry()
                .with_context(|| format!("validating registry {}", path.display()))?;
            info!(
                issuers = registry.issuer_count(),
                iins = registry.iin_count(),
                "loaded registry snapshot"
            );
            Ok(registry)
        }
        None => Ok(well_known()),
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let registry = load_registry(cli.registry.as_ref())?;

    let output = match cli.command {
        Commands::Validate { card_number } => {
            let classifier = CardClassifier::new(&registry);
            let outcome = classifier
                .classify_input(CardNumberInput::Text(card_number))
                .context("`card_number` string does not represent an integer")?;
            serde_json::to_string_pretty(&ValidationResponse::from(outcome))?
        }
        Commands::Generate { issuer, seed } => {
            if issuer.trim().is_empty() {
                bail!("A non-empty `issuer` string is required");
            }

            let config = GeneratorConfig { seed };
            let mut rng = config.rng();
            info!(seed = rng.seed(), "generating card number");

            let generator = CardGenerator::new(&registry);
            let outcome = generator.generate(&issuer, &mut rng);
            serde_json::to_string_pretty(&GenerationResponse::from(outcome))?
        }
        Commands::Issuers => serde_json::to_string_pretty(&registry.issuers().collect::<Vec<_>>())?,
    };

    println!("{}", output);
    Ok(())
}
