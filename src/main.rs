use std::path::{Path, PathBuf};
use std::process;

use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;
use tracing::{debug, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use commander_forge::catalog::{CatalogClient, CatalogPage, InMemoryCatalog, ScryfallClient};
use commander_forge::serve::start_server;
use commander_forge::{
    extract_creature_types, CandidateCard, Forge, ForgeConfig, ForgeError, GameRng, GameRngState,
    GeneratedCard,
};

/// Output format for CLI responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

/// Legendary creature synthesizer.
#[derive(Parser)]
#[command(
    name = "commander-forge",
    version,
    about = "Synthesize legendary creatures from a mana cost"
)]
struct Cli {
    /// Output format (text or json)
    #[arg(long, global = true, default_value = "text", value_enum)]
    output: OutputFormat,

    /// Log level used when RUST_LOG is unset
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,

    /// Emit logs as JSON
    #[arg(long, global = true)]
    log_json: bool,

    /// Fixed seed for reproducible output (overrides FORGE_SEED)
    #[arg(long, global = true)]
    seed: Option<u64>,

    /// Read candidates from a local JSON card dump instead of the catalog
    #[arg(long, global = true)]
    corpus: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a legendary creature for a mana cost
    Generate {
        /// Mana cost, e.g. "2WU"
        cost: String,
        /// Number of cards to generate
        #[arg(long, default_value_t = 1)]
        rolls: usize,
        /// Replay one roll from its printed RNG state (JSON)
        #[arg(long, value_parser = parse_replay, conflicts_with = "rolls")]
        replay: Option<GameRngState>,
    },

    /// List sampled candidates for a colour identity
    Candidates {
        /// Colour identity, e.g. "WU"
        colors: String,
        /// Number of candidates to keep (all when omitted)
        #[arg(long)]
        cmc: Option<usize>,
    },

    /// Start the HTTP JSON server
    Serve {
        /// Listen address (overrides FORGE_BIND_ADDR)
        #[arg(long)]
        bind: Option<String>,
    },
}

fn main() {
    let cli = Cli::parse();
    init_tracing(&cli.log_level, cli.log_json);

    let mut config = ForgeConfig::from_env();
    if let Some(seed) = cli.seed {
        config = config.with_seed(seed);
    }
    debug!(?config, "configuration loaded");

    let result = match cli.command {
        Commands::Generate {
            cost,
            rolls,
            replay,
        } => with_forge(&config, cli.corpus.as_deref(), |forge| {
            cmd_generate(forge, &cost, rolls, replay.as_ref(), cli.output)
        }),
        Commands::Candidates { colors, cmc } => {
            with_forge(&config, cli.corpus.as_deref(), |forge| {
                cmd_candidates(forge, &colors, cmc, cli.output)
            })
        }
        Commands::Serve { bind } => {
            if let Some(addr) = bind {
                config = config.with_bind_addr(addr);
            }
            cmd_serve(&config)
        }
    };

    if let Err(err) = result {
        eprintln!("error: {err}");
        process::exit(1);
    }
}

/// Logs go to stderr so JSON output on stdout stays clean.
fn init_tracing(log_level: &str, json: bool) {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level));

    if json {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

type CliResult = Result<(), Box<dyn std::error::Error>>;

/// Run `f` against a forge over the local corpus when given, else Scryfall.
fn with_forge<F>(config: &ForgeConfig, corpus: Option<&Path>, f: F) -> CliResult
where
    F: FnOnce(&dyn ForgeRunner) -> CliResult,
{
    match corpus {
        Some(path) => {
            let cards = load_corpus(path)?;
            info!(path = %path.display(), cards = cards.len(), "loaded local corpus");
            f(&Forge::new(InMemoryCatalog::single_page(cards), config))
        }
        None => f(&Forge::new(ScryfallClient::new(config), config)),
    }
}

/// Accepts a bare array of cards or a saved catalog page (`{"data": [...]}`).
fn load_corpus(path: &Path) -> Result<Vec<CandidateCard>, Box<dyn std::error::Error>> {
    let text = std::fs::read_to_string(path)
        .map_err(|e| format!("cannot read '{}': {e}", path.display()))?;

    if let Ok(cards) = serde_json::from_str::<Vec<CandidateCard>>(&text) {
        return Ok(cards);
    }
    let page: CatalogPage = serde_json::from_str(&text)
        .map_err(|e| format!("'{}' is not a card list or catalog page: {e}", path.display()))?;
    Ok(page.data)
}

/// Object-safe view of `Forge<C>` for the subcommands.
trait ForgeRunner {
    fn request_rng(&self) -> GameRng;

    fn generate(&self, cost: &str, rng: &mut GameRng) -> Result<GeneratedCard, ForgeError>;

    fn select_candidates(
        &self,
        colors: &str,
        count: Option<usize>,
        rng: &mut GameRng,
    ) -> Result<Vec<CandidateCard>, ForgeError>;
}

impl<C: CatalogClient> ForgeRunner for Forge<C> {
    fn request_rng(&self) -> GameRng {
        Forge::request_rng(self)
    }

    fn generate(&self, cost: &str, rng: &mut GameRng) -> Result<GeneratedCard, ForgeError> {
        Forge::generate(self, cost, rng)
    }

    fn select_candidates(
        &self,
        colors: &str,
        count: Option<usize>,
        rng: &mut GameRng,
    ) -> Result<Vec<CandidateCard>, ForgeError> {
        Forge::select_candidates(self, Some(colors), count, rng)
    }
}

fn parse_replay(raw: &str) -> Result<GameRngState, String> {
    serde_json::from_str(raw).map_err(|e| format!("invalid RNG state: {e}"))
}

/// One generated card and the RNG state it started from.
#[derive(Serialize)]
struct Roll {
    card: GeneratedCard,
    replay: GameRngState,
}

fn cmd_generate(
    forge: &dyn ForgeRunner,
    cost: &str,
    rolls: usize,
    replay: Option<&GameRngState>,
    output: OutputFormat,
) -> CliResult {
    let rngs: Vec<GameRng> = match replay {
        Some(state) => vec![GameRng::from_state(state)],
        None => {
            let mut base = forge.request_rng();
            (0..rolls.max(1)).map(|_| base.fork()).collect()
        }
    };

    let mut results = Vec::with_capacity(rngs.len());
    for mut rng in rngs {
        let replay = rng.state();
        let card = forge.generate(cost, &mut rng)?;
        results.push(Roll { card, replay });
    }

    match output {
        OutputFormat::Json if results.len() == 1 => {
            println!("{}", serde_json::to_string_pretty(&results[0])?);
        }
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&results)?),
        OutputFormat::Text => {
            for (i, roll) in results.iter().enumerate() {
                if i > 0 {
                    println!();
                }
                println!("{}", roll.card);
                println!("Replay: {}", serde_json::to_string(&roll.replay)?);
            }
        }
    }
    Ok(())
}

fn cmd_candidates(
    forge: &dyn ForgeRunner,
    colors: &str,
    count: Option<usize>,
    output: OutputFormat,
) -> CliResult {
    let mut rng = forge.request_rng();
    let cards = forge.select_candidates(colors, count, &mut rng)?;

    match output {
        OutputFormat::Json => {
            let body = serde_json::json!({ "cards": cards });
            println!("{}", serde_json::to_string_pretty(&body)?);
        }
        OutputFormat::Text => {
            for card in &cards {
                println!("{}  ({})", card.name, card.type_line);
            }
            let types = extract_creature_types(&cards);
            if !types.is_empty() {
                println!("Creature types: {}", types.join(", "));
            }
            println!("{} candidate(s)", cards.len());
        }
    }
    Ok(())
}

fn cmd_serve(config: &ForgeConfig) -> CliResult {
    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(start_server(config))
}
