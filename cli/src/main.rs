#![warn(clippy::all, clippy::pedantic, clippy::nursery)]

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use dotenvy::dotenv;
use std::{fs, path::PathBuf, process};
use tracing::{error, info};
use tracing_subscriber::{
    prelude::__tracing_subscriber_SubscriberExt, util::SubscriberInitExt, EnvFilter,
};
use validator::Validate;

use ::strategist::{
    load_reports, report, safety_checklist, Assistant, Config, Export, Pinecone, ProjectData,
};

#[derive(Parser, Debug)]
#[command(author, version, about = "Blasting Business Strategist AI", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Embed a JSON array of reports into the knowledge base
    Ingest { file: PathBuf },
    /// Ask the strategist a question
    Ask { query: String },
    /// Show the reports closest to a question
    Search { query: String },
    /// Run the rule-based project analysis
    Analyze(AnalyzeArgs),
    /// Print the safety checklist
    Checklist,
    /// List the Pinecone indexes available to the API key
    Indexes,
}

#[derive(Debug, Args)]
struct AnalyzeArgs {
    #[arg(long, default_value = "New Blasting Project")]
    name: String,
    #[arg(long, default_value_t = 100_000.0)]
    budget: f64,
    #[arg(long, default_value_t = 80_000.0)]
    estimated_cost: f64,
    #[arg(long, default_value_t = 150_000.0)]
    expected_revenue: f64,
    /// Days
    #[arg(long, default_value_t = 60)]
    timeline: u32,
    #[arg(long, default_value_t = 5_000.0)]
    blast_volume: f64,
    /// Write the analysis as JSON to this file
    #[arg(long)]
    export: Option<PathBuf>,
}

impl From<&AnalyzeArgs> for ProjectData {
    fn from(args: &AnalyzeArgs) -> Self {
        Self {
            name: args.name.clone(),
            budget: args.budget,
            estimated_cost: args.estimated_cost,
            expected_revenue: args.expected_revenue,
            timeline: args.timeline,
            blast_volume: args.blast_volume,
        }
    }
}

#[tokio::main]
async fn main() {
    dotenv().ok();
    let cli = Cli::parse();
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "cli=info,strategist=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    if let Err(err) = run(cli.command).await {
        error!("{err:#}");
        process::exit(1);
    }
}

async fn run(command: Commands) -> Result<()> {
    match command {
        Commands::Analyze(args) => analyze(&args),
        Commands::Checklist => {
            for item in safety_checklist() {
                println!("[ ] {item}");
            }

            Ok(())
        }
        Commands::Indexes => {
            let config = Config::load()?;

            for index in Pinecone::new(&config).list_indexes().await? {
                println!("{index}");
            }

            Ok(())
        }
        Commands::Ingest { file } => {
            let reports = load_reports(&file)?;
            let assistant = Assistant::connect(&Config::load()?).await?;

            let count = assistant.ingest(&reports).await?;
            info!("Loaded {count} reports from {}", file.display());

            Ok(())
        }
        Commands::Search { query } => {
            let assistant = Assistant::connect(&Config::load()?).await?;

            for hit in assistant.search(&query).await? {
                println!("{:.3}\t{}\t{}", hit.score, hit.id, hit.content().unwrap_or_default());
            }

            Ok(())
        }
        Commands::Ask { query } => {
            let assistant = Assistant::connect(&Config::load()?).await?;

            println!("{}", assistant.ask(&query).await?);

            Ok(())
        }
    }
}

fn analyze(args: &AnalyzeArgs) -> Result<()> {
    let project = ProjectData::from(args);
    project.validate()?;

    let report = report(&project);

    println!("Project: {}", project.name);
    match report.roi {
        Some(roi) => println!("ROI: {roi:.1}%"),
        None => println!("ROI: n/a (no estimated cost)"),
    }

    for (title, items) in [
        ("Recommendations", &report.analysis.recommendations),
        ("Risks", &report.analysis.risks),
        ("Opportunities", &report.analysis.opportunities),
    ] {
        println!("\n{title}:");
        if items.is_empty() {
            println!("  - None");
        }
        for item in items {
            println!("  - {item}");
        }
    }

    println!("\nSafety checklist:");
    for item in &report.safety_checklist {
        println!("  [ ] {item}");
    }

    if let Some(path) = &args.export {
        let export = Export::new(project, report.analysis, report.roi, report.safety_checklist);

        fs::write(path, export.to_json()?)
            .with_context(|| format!("Failed to write export to {}", path.display()))?;
        info!("Exported analysis to {}", path.display());
    }

    Ok(())
}
