use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use kanjigraph_api::{handlers::DecomposeResponse, AppState, GraphView, Server};
use kanjigraph_core::{ConfigManager, Direction, Settings};
use kanjigraph_dict::{Dictionaries, QueryHit};
use kanjigraph_graph::{adaptive_subgraph, hub, lineage, to_dot, AdaptivePolicy, Lineage};
use serde::Serialize;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser)]
#[command(name = "kanjigraph")]
#[command(about = "KanjiGraph CLI - Explore kanji composition graphs and dictionaries", long_about = None)]
#[command(version)]
struct Cli {
    /// Output format (json, pretty)
    #[arg(short, long, global = true, default_value = "pretty")]
    output: OutputFormat,

    /// Configuration directory
    #[arg(long, global = true, env = "KANJIGRAPH_CONFIG_DIR")]
    config_dir: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, ValueEnum)]
enum OutputFormat {
    Json,
    Pretty,
}

#[derive(Subcommand)]
enum Commands {
    /// Adaptive neighbourhood of a kanji
    Subgraph {
        /// Kanji or Heisig keyword
        kanji: String,

        /// Accept a depth once the neighbourhood has fewer nodes than this
        #[arg(short, long)]
        threshold: Option<usize>,

        /// Edge direction (outgoing, incoming, both)
        #[arg(short, long)]
        direction: Option<Direction>,

        /// Print Graphviz DOT instead of nodes and links
        #[arg(long)]
        dot: bool,
    },

    /// Parents, children and indirect relatives of a kanji
    Lineage {
        /// Kanji or Heisig keyword
        kanji: String,
    },

    /// Find kanji built from the given components or meanings
    Query {
        #[arg(required = true)]
        words: Vec<String>,
    },

    /// CHISE decomposition and KRADFILE radicals
    Decompose { kanji: String },

    /// Subgraph of one Heisig lesson
    Lesson { lesson: String },

    /// Run the HTTP service
    Serve {
        #[arg(long)]
        host: Option<String>,

        #[arg(short, long)]
        port: Option<u16>,
    },
}

#[derive(Serialize)]
#[serde(untagged)]
enum Output {
    Graph(GraphView),
    Lineage(Lineage),
    Hits(Vec<QueryHit>),
    Decompose(DecomposeResponse),
    Dot(String),
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config_dir {
        Some(dir) => ConfigManager::from_dir(dir.clone(), None),
        None => ConfigManager::new(),
    }
    .context("Failed to load configuration")?;
    let settings = config.into_settings();
    init_tracing(&settings, cli.verbose);

    match execute_command(&cli, settings).await {
        Ok(Some(output)) => print_output(&cli.output, &output),
        Ok(None) => Ok(()),
        Err(e) => {
            eprintln!("{} {:#}", "Error:".red().bold(), e);
            std::process::exit(1);
        }
    }
}

fn init_tracing(settings: &Settings, verbose: bool) {
    let default = if verbose {
        "debug".to_string()
    } else {
        settings.logging.level.clone()
    };
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| default.into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

async fn execute_command(cli: &Cli, mut settings: Settings) -> Result<Option<Output>> {
    match &cli.command {
        Commands::Query { words } => {
            let dicts = load_dictionaries(&settings)?;
            Ok(Some(Output::Hits(
                dicts.query(&words.join(" "), settings.search.max_combinations),
            )))
        }
        Commands::Decompose { kanji } => {
            let dicts = load_dictionaries(&settings)?;
            Ok(Some(Output::Decompose(DecomposeResponse {
                parts: dicts.chise.decompose(kanji),
                radicals: dicts.radical_labels(kanji),
                kanji: kanji.clone(),
            })))
        }
        Commands::Serve { host, port } => {
            if let Some(host) = host {
                settings.server.host = host.clone();
            }
            if let Some(port) = port {
                settings.server.port = *port;
            }
            settings.validate().context("Invalid server configuration")?;
            let addr = Server::bind_addr(&settings.server).await?;
            let state = AppState::load(settings).context("Failed to load kanji data")?;
            Server::new(addr, state).run().await?;
            Ok(None)
        }
        command => {
            let state = AppState::load(settings).context("Failed to load kanji data")?;
            graph_command(command, &state).map(Some)
        }
    }
}

/// Dictionary-only commands do not need the graph file.
fn load_dictionaries(settings: &Settings) -> Result<Dictionaries> {
    Dictionaries::load(&settings.data).context("Failed to load dictionaries")
}

fn graph_command(command: &Commands, state: &AppState) -> Result<Output> {
    let heisig = &state.dicts.heisig;
    let output = match command {
        Commands::Subgraph {
            kanji,
            threshold,
            direction,
            dot,
        } => {
            let mut policy = AdaptivePolicy::from(&state.settings.subgraph);
            if let Some(threshold) = threshold {
                policy = policy.with_threshold(*threshold);
            }
            if let Some(direction) = direction {
                policy = policy.with_direction(*direction);
            }
            let ego = adaptive_subgraph(&state.graph, heisig.resolve(kanji), &policy)?;
            if *dot {
                Output::Dot(to_dot(&ego.graph))
            } else {
                Output::Graph(GraphView::from_ego(&ego, heisig))
            }
        }
        Commands::Lineage { kanji } => Output::Lineage(lineage(&state.graph, heisig.resolve(kanji))?),
        Commands::Lesson { lesson } => {
            let sub = state.graph.subgraph(heisig.lesson(lesson));
            let center = hub(&sub)
                .with_context(|| format!("lesson {} has no kanji in the graph", lesson))?;
            Output::Graph(GraphView::new(&sub, &center, None, heisig))
        }
        Commands::Query { .. } | Commands::Decompose { .. } | Commands::Serve { .. } => {
            anyhow::bail!("command does not read the kanji graph")
        }
    };
    Ok(output)
}

fn print_output(format: &OutputFormat, output: &Output) -> Result<()> {
    match (format, output) {
        (_, Output::Dot(dot)) => print!("{}", dot),
        (OutputFormat::Json, _) => println!("{}", serde_json::to_string_pretty(output)?),
        (OutputFormat::Pretty, _) => print_pretty(output),
    }
    Ok(())
}

fn print_pretty(output: &Output) {
    match output {
        Output::Graph(view) => {
            if let Some(depth) = view.depth {
                println!("{}: {}", "depth".cyan().bold(), depth.to_string().yellow());
            }
            for (pos, node) in view.nodes.iter().enumerate() {
                let marker = if Some(pos) == view.current_kanji { "*" } else { " " };
                let targets: Vec<&str> = view
                    .links
                    .iter()
                    .filter(|l| l.source == pos)
                    .filter_map(|l| view.nodes.get(l.target))
                    .map(|n| n.kanji.as_str())
                    .collect();
                println!(
                    "{} {} {} -> {}",
                    marker,
                    node.kanji.green().bold(),
                    node.keyword.as_deref().unwrap_or("-").dimmed(),
                    targets.join(" ")
                );
            }
        }
        Output::Lineage(l) => {
            println!("{}: {}", "kanji".cyan().bold(), l.kanji.green().bold());
            for (label, list) in [
                ("ancestors", &l.ancestors),
                ("parents", &l.parents),
                ("children", &l.children),
                ("descendants", &l.descendants),
            ] {
                println!("{}: {}", label.cyan().bold(), list.join(" "));
            }
        }
        Output::Hits(hits) => {
            if hits.is_empty() {
                println!("{}", "no matches".yellow());
            }
            for hit in hits {
                let radicals: Vec<String> = hit
                    .radicals
                    .iter()
                    .map(|r| format!("{}({})", r.kanji, r.ruby))
                    .collect();
                println!(
                    "{} {} [{}] {}",
                    hit.kanji.green().bold(),
                    hit.meaning,
                    hit.parts.yellow(),
                    radicals.join(" ").dimmed()
                );
            }
        }
        Output::Decompose(d) => {
            println!("{}: {}", "kanji".cyan().bold(), d.kanji.green().bold());
            println!("{}: {}", "parts".cyan().bold(), d.parts.join(" "));
            let radicals: Vec<String> = d
                .radicals
                .iter()
                .map(|r| format!("{}({})", r.kanji, r.ruby))
                .collect();
            println!("{}: {}", "radicals".cyan().bold(), radicals.join(" "));
        }
        Output::Dot(dot) => print!("{}", dot),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn subgraph_flags_parse() {
        let cli = Cli::parse_from([
            "kanjigraph", "-o", "json", "subgraph", "語", "--threshold", "10", "-d", "in", "--dot",
        ]);
        assert!(matches!(cli.output, OutputFormat::Json));
        match cli.command {
            Commands::Subgraph {
                kanji,
                threshold,
                direction,
                dot,
            } => {
                assert_eq!(kanji, "語");
                assert_eq!(threshold, Some(10));
                assert_eq!(direction, Some(Direction::Incoming));
                assert!(dot);
            }
            _ => panic!("expected subgraph"),
        }
    }

    fn settings_for(dir: &std::path::Path) -> Settings {
        let mut settings = Settings::default();
        settings.data.dir = dir.to_path_buf();
        settings
    }

    #[tokio::test]
    async fn dictionary_commands_run_without_graph_file() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("radicals.json"),
            r#"{"number": 30, "char": "口", "strokes": 3, "en": "mouth"}"#,
        )
        .unwrap();

        let cli = Cli::parse_from(["kanjigraph", "query", "mouth"]);
        match execute_command(&cli, settings_for(dir.path())).await.unwrap() {
            Some(Output::Hits(hits)) => {
                assert_eq!(hits.len(), 1);
                assert_eq!(hits[0].kanji, "口");
            }
            _ => panic!("expected query hits"),
        }

        let cli = Cli::parse_from(["kanjigraph", "decompose", "語"]);
        match execute_command(&cli, settings_for(dir.path())).await.unwrap() {
            Some(Output::Decompose(d)) => assert_eq!(d.parts, vec!["語"]),
            _ => panic!("expected decomposition"),
        }
    }

    #[tokio::test]
    async fn graph_commands_still_need_graph_file() {
        let dir = tempfile::tempdir().unwrap();
        let cli = Cli::parse_from(["kanjigraph", "lineage", "語"]);
        let err = execute_command(&cli, settings_for(dir.path())).await.err().unwrap();
        assert!(format!("{:#}", err).contains("Failed to load kanji data"));
    }

    #[test]
    fn query_requires_words() {
        assert!(Cli::try_parse_from(["kanjigraph", "query"]).is_err());
        let cli = Cli::try_parse_from(["kanjigraph", "query", "mouth", "speech"]).unwrap();
        assert!(matches!(cli.command, Commands::Query { ref words } if words.len() == 2));
    }
}
