// file: src/main.rs
// description: commandline application entry point with command handling
// reference: application bootstrap and orchestration

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand};
use enrich_notes::utils::logging::{
    format_error, format_query, format_step, format_success, format_warning,
};
use enrich_notes::{
    Config, ExtractionSchema, JsonExporter, OpenAiCompatibleClient, ResearchPipeline,
    SearchFailurePolicy, TavilyClient, mcp::EnrichNotesMcp,
};
use rmcp::ServiceExt;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{info, warn};

#[derive(Parser)]
#[command(name = "enrich_notes")]
#[command(author = "cipher")]
#[command(version = "0.1.0")]
#[command(about = "Schema-driven company research over web search", long_about = None)]
struct Cli {
    #[arg(
        short,
        long,
        value_name = "FILE",
        default_value = "config/default.toml"
    )]
    config: PathBuf,

    #[arg(long, default_value_t = true, action = ArgAction::Set)]
    color: bool,

    #[arg(short, long, action = ArgAction::SetTrue)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Research the targets and print notes aligned with the schema
    Research {
        /// Companies to research, e.g. "Acme Corp, Globex Inc"
        #[arg(short, long)]
        targets: String,

        /// JSON file mapping field names to descriptions
        #[arg(short, long, value_name = "FILE")]
        schema: Option<PathBuf>,

        /// Directory to write the JSON run record to
        #[arg(short, long)]
        output: Option<PathBuf>,

        #[arg(short, long)]
        pretty: bool,

        /// Skip failed searches instead of failing the run
        #[arg(long)]
        isolate_failures: bool,
    },

    /// Only generate the search queries for the targets
    Queries {
        #[arg(short, long)]
        targets: String,

        #[arg(short, long, value_name = "FILE")]
        schema: Option<PathBuf>,
    },

    /// Start MCP (Model Context Protocol) server for agentic tool integration
    Mcp {
        #[arg(long, default_value = "stdio")]
        transport: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    enrich_notes::utils::logging::init_logger(cli.color, cli.verbose);

    info!("Loading configuration from: {}", cli.config.display());

    let mut config = if cli.config.exists() {
        Config::load(Some(cli.config.as_path())).context("Failed to load configuration")?
    } else {
        warn!(
            "Config file {} not found, using default configuration",
            cli.config.display()
        );
        Config::load(None).unwrap_or_else(|e| {
            warn!("Falling back to built-in defaults: {}", e);
            Config::default_config()
        })
    };

    let outcome = match cli.command {
        Commands::Research {
            targets,
            schema,
            output,
            pretty,
            isolate_failures,
        } => {
            if isolate_failures {
                config.research.failure_policy = SearchFailurePolicy::Isolate;
            }
            cmd_research(&config, &targets, schema.as_deref(), output, pretty, cli.color).await
        }
        Commands::Queries { targets, schema } => {
            cmd_queries(&config, &targets, schema.as_deref()).await
        }
        Commands::Mcp { transport } => cmd_mcp(&config, &transport).await,
    };

    if let Err(e) = outcome {
        eprintln!("{}", format_error(&format!("{:#}", e)));
        std::process::exit(1);
    }

    Ok(())
}

fn load_schema(config: &Config, schema: Option<&Path>) -> Result<ExtractionSchema> {
    let path = schema
        .or(config.research.default_schema.as_deref())
        .context("No extraction schema given; pass --schema or set research.default_schema")?;

    let schema = ExtractionSchema::from_file(path)
        .with_context(|| format!("Failed to load extraction schema from {}", path.display()))?;

    if schema.is_empty() {
        eprintln!(
            "{}",
            format_warning("Extraction schema has no fields; notes will be unfocused")
        );
    }

    Ok(schema)
}

fn build_pipeline(config: &Config) -> Result<ResearchPipeline> {
    let model = OpenAiCompatibleClient::from_config(&config.model)
        .context("Failed to create chat model client")?;
    let search =
        TavilyClient::from_config(&config.search).context("Failed to create search client")?;

    Ok(ResearchPipeline::new(Arc::new(model), Arc::new(search)))
}

async fn cmd_research(
    config: &Config,
    targets: &str,
    schema: Option<&Path>,
    output: Option<PathBuf>,
    pretty: bool,
    colored: bool,
) -> Result<()> {
    let schema = load_schema(config, schema)?;
    let pipeline = build_pipeline(config)?.with_progress_bar(colored);

    eprintln!("{}", format_step(1, 2, &format!("Researching {}", targets)));

    let notes = pipeline
        .run_detailed(targets, &schema, config)
        .await
        .context("Research run failed")?;

    eprintln!(
        "{}",
        format_step(
            2,
            2,
            &format!(
                "{} queries, {} unique sources, {} ms",
                notes.stats.queries_issued, notes.stats.unique_sources, notes.stats.duration_ms
            )
        )
    );

    println!("{}", notes.notes);

    if let Some(dir) = output {
        let exporter = JsonExporter::new(dir)?;
        let path = exporter.export(&notes, pretty)?;
        eprintln!(
            "{}",
            format_success(&format!("Run record written to {}", path.display()))
        );
    }

    Ok(())
}

async fn cmd_queries(config: &Config, targets: &str, schema: Option<&Path>) -> Result<()> {
    let schema = load_schema(config, schema)?;
    let pipeline = build_pipeline(config)?;

    let queries = pipeline
        .generate_queries(targets, &schema, config)
        .await
        .context("Query generation failed")?;

    if queries.is_empty() {
        eprintln!("{}", format_warning("The model returned no search queries"));
        return Ok(());
    }

    for (idx, query) in queries.iter().enumerate() {
        println!("{}", format_query(idx + 1, query));
    }

    Ok(())
}

async fn cmd_mcp(config: &Config, transport: &str) -> Result<()> {
    info!("Starting MCP server (transport: {})", transport);

    if transport != "stdio" {
        return Err(anyhow::anyhow!("Unsupported transport: {}", transport));
    }

    let default_schema = match &config.research.default_schema {
        Some(path) => Some(
            ExtractionSchema::from_file(path)
                .with_context(|| format!("Failed to load default schema {}", path.display()))?,
        ),
        None => None,
    };

    let pipeline = build_pipeline(config)?;
    let mcp_server = EnrichNotesMcp::new(pipeline, config.clone(), default_schema);

    info!("MCP server ready. Available tools:");
    for tool in mcp_server.get_tool_router().list_all() {
        info!(
            "  - {}: {}",
            tool.name,
            tool.description.as_deref().unwrap_or("No description")
        );
    }

    let service = mcp_server
        .serve(rmcp::transport::stdio())
        .await
        .context("Failed to start MCP stdio transport")?;
    service.waiting().await?;

    Ok(())
}
