use anyhow::{bail, Context};
use clap::{Args as ClapArgs, Parser, Subcommand};
use diettree::{
    index_records, BuildConfig, Catalog, RecommendResponse, Recommender, ScorePolicy, ScoreType,
    Scorer, SearchQuery, Weighting,
};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

/// Columns shown next to each result
const SUMMARY_COLUMNS: [&str; 4] = ["Company", "Item", "Calories", "Protein (g)"];

/// Recommend similar items from a table of bucketed attributes
#[derive(Parser, Debug)]
#[command(name = "diettree")]
#[command(about = "Graph-based item recommendations", long_about = None)]
struct Args {
    /// Log level (overridden by RUST_LOG)
    #[arg(long, default_value = "warn", global = true)]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Recommend the items most similar to one item
    Recommend {
        #[command(flatten)]
        data: DataArgs,
        #[command(flatten)]
        policy: PolicyArgs,
        /// Item to find recommendations for
        #[arg(short, long)]
        item: String,
        /// Maximum number of recommendations
        #[arg(short, long, default_value_t = 5)]
        limit: usize,
        /// Print the full response as JSON
        #[arg(long)]
        json: bool,
    },
    /// Score the similarity of two items
    Score {
        #[command(flatten)]
        data: DataArgs,
        #[command(flatten)]
        policy: PolicyArgs,
        #[arg(short = 'a', long = "a")]
        first: String,
        #[arg(short = 'b', long = "b")]
        second: String,
    },
    /// Search records by name and attribute targets
    Search {
        #[command(flatten)]
        data: DataArgs,
        /// Case-insensitive fragment of the item name
        #[arg(short, long, default_value = "")]
        name: String,
        /// Attribute target as ATTR=VALUE, may be repeated
        #[arg(long = "target", value_parser = parse_key_value)]
        targets: Vec<(String, f64)>,
    },
    /// Show build statistics, or the neighbourhood of one vertex
    Inspect {
        #[command(flatten)]
        data: DataArgs,
        #[arg(short, long)]
        item: Option<String>,
    },
}

#[derive(ClapArgs, Debug)]
struct DataArgs {
    /// Path to the CSV data file
    #[arg(short, long)]
    data: PathBuf,

    /// Path to a JSON build configuration
    #[arg(short, long)]
    config: Option<PathBuf>,
}

impl DataArgs {
    fn build_config(&self) -> anyhow::Result<BuildConfig> {
        match &self.config {
            Some(path) => BuildConfig::from_json_file(path)
                .with_context(|| format!("loading config {}", path.display())),
            None => Ok(BuildConfig::default()),
        }
    }

    fn catalog(&self) -> anyhow::Result<(Catalog, BuildConfig)> {
        let config = self.build_config()?;
        let catalog = Catalog::from_csv(&self.data, &config)
            .with_context(|| format!("building graph from {}", self.data.display()))?;
        Ok((catalog, config))
    }
}

#[derive(ClapArgs, Debug)]
struct PolicyArgs {
    /// unweighted, strict or category-weighted
    #[arg(short, long, default_value = "unweighted")]
    policy: ScoreType,

    /// Importance of a category kind as KIND=WEIGHT, may be repeated
    #[arg(short, long = "weight", value_parser = parse_key_value)]
    weights: Vec<(String, f64)>,

    /// JSON file mapping category kinds to importance weights
    #[arg(long)]
    weights_file: Option<PathBuf>,
}

impl PolicyArgs {
    /// Weights start at 1 for every bucketed attribute, then the weights
    /// file and the command line override them in that order.
    fn policy(&self, config: &BuildConfig) -> anyhow::Result<ScorePolicy> {
        let mut weighting = Weighting::uniform(config.increments.keys().cloned());
        if let Some(path) = &self.weights_file {
            let from_file = read_weighting(path)?;
            weighting = weighting.with_overrides(&from_file);
        }
        let overrides: HashMap<String, f64> = self.weights.iter().cloned().collect();
        let weighting = weighting.with_overrides(&overrides);
        Ok(ScorePolicy::from_type(self.policy, weighting)?)
    }
}

fn read_weighting(path: &Path) -> anyhow::Result<HashMap<String, f64>> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("reading weights {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("parsing weights {}", path.display()))
}

fn parse_key_value(s: &str) -> Result<(String, f64), String> {
    let (key, value) = s
        .rsplit_once('=')
        .ok_or_else(|| format!("expected KEY=VALUE, got '{s}'"))?;
    let value: f64 = value
        .trim()
        .parse()
        .map_err(|e| format!("invalid number in '{s}': {e}"))?;
    Ok((key.trim().to_string(), value))
}

fn describe(catalog: &Catalog, id: &str) -> String {
    catalog
        .record(id)
        .map(|r| r.summary(&SUMMARY_COLUMNS))
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| id.to_string())
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(args.log_level.as_str()));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    info!("Starting DietTree v{}", env!("CARGO_PKG_VERSION"));

    match args.command {
        Command::Recommend {
            data,
            policy,
            item,
            limit,
            json,
        } => {
            let (catalog, config) = data.catalog()?;
            let policy = policy.policy(&config)?;
            let recommender = Recommender::new(catalog.graph());
            let ranked = recommender.rank(&item, limit, &policy)?;

            if json {
                let response = RecommendResponse::new(
                    item,
                    policy.score_type(),
                    ranked,
                    recommender.candidate_count(),
                );
                println!("{}", serde_json::to_string_pretty(&response)?);
            } else if ranked.is_empty() {
                println!("No available recommendations!");
            } else {
                for (rank, entry) in ranked.iter().enumerate() {
                    println!(
                        "{:>3}. {:>8.3}  {}",
                        rank + 1,
                        entry.score,
                        describe(&catalog, &entry.id)
                    );
                }
            }
        }
        Command::Score {
            data,
            policy,
            first,
            second,
        } => {
            let (catalog, config) = data.catalog()?;
            let policy = policy.policy(&config)?;
            let similarity = Scorer::new(catalog.graph()).explain(&first, &second, &policy)?;

            println!("{:.6}", similarity.score);
            let mut contributions: Vec<_> = similarity.contributions.into_iter().collect();
            contributions.sort_by(|a, b| a.0.cmp(&b.0));
            for (kind, contribution) in contributions {
                println!("  {kind}: {contribution:.6}");
            }
        }
        Command::Search {
            data,
            name,
            targets,
        } => {
            let config = data.build_config()?;
            let records = diettree::load_records(&data.data)
                .with_context(|| format!("reading {}", data.data.display()))?;
            let table = index_records(records, &config.id_column);

            let query = targets
                .into_iter()
                .fold(SearchQuery::new().with_name(name), |q, (attribute, value)| {
                    q.with_target(attribute, value)
                });
            let hits = diettree::search(&table, &query);
            for (_, record) in &hits {
                println!("{}", record.summary(&SUMMARY_COLUMNS));
            }
            info!("{} matching records", hits.len());
        }
        Command::Inspect { data, item } => {
            let (catalog, _) = data.catalog()?;
            let graph = catalog.graph();

            let Some(id) = item else {
                println!("{}", serde_json::to_string_pretty(catalog.stats())?);
                return Ok(());
            };
            let Some(vertex) = graph.get_vertex(&id) else {
                bail!("vertex not found: {id}");
            };

            println!("{} ({}), degree {}", vertex.id(), vertex.kind(), vertex.degree());
            if vertex.degree() > 0 {
                println!("average weight {:.3}", graph.average_weight(&id)?);
            }
            for neighbour in graph.get_neighbours(&id)? {
                println!("  {} [{}]", neighbour, graph.get_weight(&id, neighbour)?);
            }
        }
    }

    Ok(())
}
