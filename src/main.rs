//! ghsearch - Entry Point

use clap::builder::TypedValueParser;
use clap::Parser;
use ghsearch::api::GithubClient;
use ghsearch::model::{Query, SearchType};
use ghsearch::pagination::{EngineOptions, PaginationEngine, PAGE_SIZE};
use ghsearch::view::{CardStyles, ColorConfig};
use std::path::PathBuf;
use tracing::info;

/// ghsearch - search GitHub users and repositories from the terminal
#[derive(Parser, Debug)]
#[command(name = "ghsearch")]
#[command(version)]
#[command(about = "TUI application for searching GitHub users and repositories")]
pub struct Args {
    /// Search text to run on startup
    pub query: Option<String>,

    /// What to search for: users or repositories
    #[arg(short = 't', long = "type")]
    pub search_type: Option<SearchType>,

    /// Path to configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// GitHub API root (e.g. a GitHub Enterprise URL)
    #[arg(long)]
    pub api_url: Option<String>,

    /// Print results to stdout instead of starting the TUI
    #[arg(short, long)]
    pub print: bool,

    /// Number of results to print (with --print)
    #[arg(short = 'n', long, default_value_t = PAGE_SIZE, value_parser = clap::value_parser!(u16).range(1..).map(usize::from))]
    pub count: usize,

    /// Disable colors
    #[arg(long)]
    pub no_color: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    // Load configuration with full precedence chain:
    // Defaults → Config File → Env Vars → CLI Args
    let config = {
        let config_file = ghsearch::config::load_config_with_precedence(args.config.clone())?;
        let merged = ghsearch::config::merge_config(config_file);
        let with_env = ghsearch::config::apply_env_overrides(merged);
        ghsearch::config::apply_cli_overrides(with_env, args.search_type, args.api_url.clone())
    };

    ghsearch::logging::init(&config.log_file_path)?;

    info!(
        config = ?config,
        "Configuration loaded and resolved"
    );

    let client = GithubClient::builder()
        .api_base(config.api_base_url.clone())
        .user_agent(config.user_agent.clone())
        .token(config.token.as_ref().map(|token| token.expose().to_string()))
        .build()?;
    let options = EngineOptions {
        max_extra_pages: config.max_extra_pages,
    };
    let query = Query::new(
        args.query.clone().unwrap_or_default(),
        config.default_search_type,
    );

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;

    if args.print {
        let engine = PaginationEngine::with_options(std::sync::Arc::new(client), options);
        let mut stdout = std::io::stdout().lock();
        runtime.block_on(ghsearch::headless::run_print(
            &engine,
            query,
            args.count,
            &mut stdout,
        ))?;
        return Ok(());
    }

    let styles = CardStyles::with_color_config(ColorConfig::from_env_and_args(args.no_color));
    ghsearch::view::run_tui(client, options, query, styles, runtime.handle().clone())?;

    Ok(())
}
