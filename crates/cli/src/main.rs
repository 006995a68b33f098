use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use conversation::Profile;
use pipeline::{DEFAULT_LIMIT, Selection};
use server::{BOT_NAME, Recommendation, RecommendationOrchestrator, ServerConfig};
use std::path::PathBuf;
use std::time::Instant;
use tracing::info;

/// Lumi - Skincare Questionnaire Bot
#[derive(Parser)]
#[command(name = "lumi")]
#[command(about = "Skincare questionnaire bot with ensemble product recommendations", long_about = None)]
#[command(args_conflicts_with_subcommands = true)]
struct Cli {
    /// Product catalog CSV
    #[arg(long, global = true, env = "LUMI_CATALOG", default_value = "data/skincare_products.csv")]
    catalog: PathBuf,

    /// Directory holding the classifier artifacts
    #[arg(long, global = true, env = "LUMI_MODELS_DIR", default_value = "models")]
    models_dir: PathBuf,

    /// Number of products listed per recommendation
    #[arg(long, global = true, default_value_t = DEFAULT_LIMIT)]
    limit: usize,

    #[command(subcommand)]
    command: Option<Commands>,

    #[command(flatten)]
    serve: ServeArgs,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the chat web server (default)
    Serve(ServeArgs),

    /// Recommend products for one profile without the chat
    Recommend {
        #[arg(long)]
        skin_type: String,

        #[arg(long)]
        skin_tone: String,

        #[arg(long)]
        hair_color: String,

        #[arg(long)]
        eye_color: String,

        /// Show every classifier's vote
        #[arg(long)]
        explain: bool,
    },
}

#[derive(Args)]
struct ServeArgs {
    /// Address to listen on
    #[arg(long, env = "LUMI_BIND", default_value = "127.0.0.1:5000")]
    bind: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    let config = ServerConfig {
        catalog_path: cli.catalog,
        models_dir: cli.models_dir,
        recommendation_limit: cli.limit,
        ..ServerConfig::default()
    };

    match cli.command {
        Some(Commands::Serve(args)) => handle_serve(config, args).await?,
        None => handle_serve(config, cli.serve).await?,
        Some(Commands::Recommend {
            skin_type,
            skin_tone,
            hair_color,
            eye_color,
            explain,
        }) => {
            let profile = Profile::parse(&skin_type, &skin_tone, &hair_color, &eye_color)?;
            handle_recommend(config, profile, explain).await?
        }
    }

    Ok(())
}

/// Handle the 'serve' command
async fn handle_serve(mut config: ServerConfig, args: ServeArgs) -> Result<()> {
    config.bind_address = args.bind;
    info!(
        "Starting {} (catalog: {}, models: {})",
        BOT_NAME,
        config.catalog_path.display(),
        config.models_dir.display()
    );
    server::serve(config).await
}

/// Handle the 'recommend' command
async fn handle_recommend(config: ServerConfig, profile: Profile, explain: bool) -> Result<()> {
    println!(
        "Loading artifacts from {} and {}...",
        config.catalog_path.display(),
        config.models_dir.display()
    );
    let start = Instant::now();
    let orchestrator =
        tokio::task::spawn_blocking(move || RecommendationOrchestrator::load(&config))
            .await
            .context("Artifact loading task failed")?;
    println!("{} Loaded artifacts in {:?}", "✓".green(), start.elapsed());

    if orchestrator.catalog().is_none() {
        println!("{} Catalog unavailable", "!".yellow());
    }
    if orchestrator.ensemble().is_empty() {
        println!("{} No classifiers loaded", "!".yellow());
    }

    let recommendation = orchestrator.recommend_profile(&profile)?;
    print_recommendation(&profile, &recommendation, explain);
    Ok(())
}

fn print_recommendation(profile: &Profile, recommendation: &Recommendation, explain: bool) {
    println!("\n{}", "Profile:".bold().blue());
    for (key, value) in profile.pairs() {
        println!("{}{}: {}", "• ".green(), key, value);
    }

    let prediction = &recommendation.prediction;
    let suffix = if prediction.fallback { " (default)" } else { "" };
    println!(
        "\n{} {}{}",
        "Predicted category:".bold().blue(),
        prediction.category.bold(),
        suffix
    );
    if explain {
        for vote in &prediction.votes {
            println!("   {} voted {}", vote.model.cyan(), vote.label);
        }
    }

    match &recommendation.selection {
        Selection::Products { products, .. } => {
            println!("\n{}", "Recommended products:".bold().blue());
            for (rank, product) in products.iter().enumerate() {
                println!(
                    "{}. {} - Rating: {}",
                    (rank + 1).to_string().green(),
                    product.name,
                    product.rating_label().yellow()
                );
                println!("   {}", product.url);
            }
        }
        Selection::NoMatches { category } => {
            println!("\n{} No {} products in the catalog", "✗".red(), category);
        }
        Selection::CatalogUnavailable => {
            println!("\n{} Product data is unavailable", "✗".red());
        }
    }
}
