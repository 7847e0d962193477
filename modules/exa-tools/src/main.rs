use std::sync::Arc;

use ai_client::Tool;
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use exa_client::{ExaClient, ExaConfig, HighlightsOptions, SearchType, SummaryOptions};
use exa_tools::{exa_toolset, FindSimilarArgs, FindSimilarTool, SearchArgs, SearchTool};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "exa-tools", about = "Run Exa agent tools from the command line")]
struct Cli {
    /// Emit logs as JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Find pages similar to a seed URL
    FindSimilar {
        #[arg(long)]
        url: String,
        #[arg(long, default_value_t = 10)]
        num_results: u32,
        #[arg(long = "include-domain")]
        include_domains: Vec<String>,
        #[arg(long = "exclude-domain")]
        exclude_domains: Vec<String>,
        #[arg(long)]
        exclude_source_domain: bool,
        /// Return highlighted sentences for each page
        #[arg(long)]
        highlights: bool,
        /// Return a summary for each page
        #[arg(long)]
        summary: bool,
    },
    /// Search the web
    Search {
        #[arg(long)]
        query: String,
        #[arg(long, default_value_t = 10)]
        num_results: u32,
        #[arg(long, value_parser = parse_search_type, default_value = "auto")]
        search_type: SearchType,
    },
    /// Print tool definitions
    Tools,
    /// Invoke a tool by name with JSON arguments
    Invoke {
        #[arg(long)]
        tool: String,
        #[arg(long)]
        args: String,
    },
}

fn parse_search_type(s: &str) -> std::result::Result<SearchType, String> {
    match s {
        "auto" => Ok(SearchType::Auto),
        "neural" => Ok(SearchType::Neural),
        "keyword" => Ok(SearchType::Keyword),
        other => Err(format!("unknown search type: {other}")),
    }
}

fn non_empty(values: Vec<String>) -> Option<Vec<String>> {
    (!values.is_empty()).then_some(values)
}

fn live_client() -> Result<Arc<ExaClient>> {
    let config = ExaConfig::from_env().context("Failed to load Exa config")?;
    Ok(Arc::new(ExaClient::new(config).context("Failed to build Exa client")?))
}

/// Client for commands that never send a request, so no API key is needed.
fn offline_client() -> Result<Arc<ExaClient>> {
    Ok(Arc::new(
        ExaClient::new(ExaConfig::new(String::new())).context("Failed to build Exa client")?,
    ))
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    if cli.json {
        subscriber.json().init();
    } else {
        subscriber.init();
    }

    let output = match cli.command {
        Command::FindSimilar {
            url,
            num_results,
            include_domains,
            exclude_domains,
            exclude_source_domain,
            highlights,
            summary,
        } => {
            let mut tool = FindSimilarTool::new(live_client()?);
            if highlights {
                tool = tool.with_highlights(HighlightsOptions::default());
            }
            if summary {
                tool = tool.with_summary(SummaryOptions::default());
            }

            let mut args = FindSimilarArgs::new(url, num_results);
            args.include_domains = non_empty(include_domains);
            args.exclude_domains = non_empty(exclude_domains);
            args.exclude_source_domain = exclude_source_domain.then_some(true);

            let results = tool.call(args).await.context("find similar failed")?;
            serde_json::to_value(results)?
        }
        Command::Search {
            query,
            num_results,
            search_type,
        } => {
            let mut args = SearchArgs::new(query, num_results);
            args.search_type = Some(search_type);

            let results = SearchTool::new(live_client()?)
                .call(args)
                .await
                .context("search failed")?;
            serde_json::to_value(results)?
        }
        Command::Tools => {
            serde_json::to_value(exa_toolset(offline_client()?).definitions().await)?
        }
        Command::Invoke { tool, args } => {
            let args: serde_json::Value =
                serde_json::from_str(&args).context("--args must be a JSON object")?;
            exa_toolset(live_client()?)
                .invoke(&tool, args)
                .await
                .with_context(|| format!("{tool} failed"))?
        }
    };

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
