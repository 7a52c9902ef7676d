//! markscout: trademark conflict research
//! Entry point for the CLI binary.

mod config;

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use markscout_common::research_config::DefaultsConfig;
use markscout_research::classification::nice_classification;
use markscout_research::queries::generate_search_queries;
use markscout_research::{
    build_provider, conduct_trademark_research, format_brief, format_research_for_prompt,
    ResearchRequest, RetrievalConfig,
};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::config::Config;

#[derive(Parser)]
#[command(name = "markscout")]
#[command(version)]
#[command(about = "Research trademark conflict risk for a brand name")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Config file (defaults to ./markscout.toml)
    #[arg(long, global = true, env = "MARKSCOUT_CONFIG")]
    config: Option<PathBuf>,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    /// Research block for an LLM prompt
    Prompt,
    /// Full result as JSON
    Json,
    /// Short digest
    Summary,
}

#[derive(clap::Args)]
struct BrandArgs {
    /// Candidate brand name
    brand: String,

    #[arg(long, default_value = "")]
    industry: String,

    #[arg(long, default_value = "")]
    category: String,

    /// Target country, repeatable; the first is the primary market
    #[arg(long = "country")]
    countries: Vec<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Search the web and score conflicts for a brand
    Research {
        #[command(flatten)]
        brand: BrandArgs,

        #[arg(long, short = 'f', default_value = "prompt", value_enum)]
        format: OutputFormat,
    },
    /// Print the planned search queries without running them
    Queries {
        #[command(flatten)]
        brand: BrandArgs,
    },
    /// Resolve the Nice class for a category/industry
    Classify {
        category: String,

        #[arg(long, default_value = "")]
        industry: String,
    },
}

impl BrandArgs {
    fn into_request(self, defaults: &DefaultsConfig) -> ResearchRequest {
        ResearchRequest::new(self.brand)
            .industry(self.industry)
            .category(self.category)
            .countries(self.countries)
            .with_defaults(defaults)
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config_path = cli.config.clone().unwrap_or_else(Config::path);
    let config = Config::load_from(&config_path)?;

    // Initialise structured logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.logging.filter)),
        )
        .with_writer(std::io::stderr)
        .init();

    if !config_path.exists() {
        warn!(
            "Config file not found: {}, using defaults. Copy markscout.example.toml to markscout.toml to customise.",
            config_path.display()
        );
    }

    let research_config = config.research();

    match cli.command {
        Commands::Research { brand, format } => {
            let request = brand.into_request(&research_config.defaults);
            let provider = build_provider(&research_config)?;
            info!("🔎 markscout v{} researching \"{}\" via {}", env!("CARGO_PKG_VERSION"), request.brand_name, provider.name());

            let retrieval = RetrievalConfig::from(&research_config);
            let result = conduct_trademark_research(request, provider, &retrieval, None).await;

            match format {
                OutputFormat::Prompt => println!("{}", format_research_for_prompt(&result)),
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&result)?),
                OutputFormat::Summary => println!("{}", format_brief(&result)),
            }
        }
        Commands::Queries { brand } => {
            let request = brand.into_request(&research_config.defaults).normalized();
            let queries = generate_search_queries(
                &request.brand_name,
                &request.industry,
                &request.category,
                &request.countries,
            );
            for (i, q) in queries.iter().enumerate() {
                println!("{:>2}. [{}] {}", i + 1, q.purpose, q.query);
            }
        }
        Commands::Classify { category, industry } => {
            let class = nice_classification(&category, &industry);
            println!("Class {} - {} (matched \"{}\")", class.code, class.description, class.matched_term);
        }
    }

    Ok(())
}
