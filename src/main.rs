//! route-table command-line tool.
//!
//! # Commands
//!
//! ```text
//! route-table check                  validate the route file, list every error
//! route-table list                   print routes in declaration order
//! route-table resolve /blog/123      show which route a request reaches
//! route-table watch                  re-validate whenever the file changes
//! ```
//!
//! Settings come from `--config <FILE>` (TOML) or built-in defaults;
//! `--routes <FILE>` overrides the route file named there.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use serde::Serialize;

use route_table::config::{load_config, load_routes, AppConfig, ConfigError, RouteUpdate, RouteWatcher};
use route_table::observability::init_logging;
use route_table::report::{ErrorView, LoadedView, MatchView, RouteView};
use route_table::routing::{Method, RequestTarget, RouteTable, SharedRouteTable};

#[derive(Parser)]
#[command(name = "route-table")]
#[command(about = "Validate and query declarative route tables", long_about = None)]
struct Cli {
    /// Settings file (TOML)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Route file, overriding `routes.path` from the settings
    #[arg(short, long)]
    routes: Option<PathBuf>,

    /// Print JSON instead of text
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate the route file
    Check,
    /// List routes in declaration order
    List,
    /// Show the route a request would reach
    Resolve {
        /// Request path, e.g. /blog/123
        path: String,

        /// Request method
        #[arg(short, long, default_value = "GET")]
        method: Method,
    },
    /// Re-validate the route file on every change until Ctrl+C
    Watch,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => load_config(path).unwrap_or_else(|e| fail(&e, cli.json)),
        None => AppConfig::default(),
    };
    if let Some(routes) = cli.routes {
        config.routes.path = routes;
    }

    init_logging(&config.observability);
    tracing::debug!(routes = %config.routes.path.display(), "route-table v0.1.0 starting");

    match cli.command {
        Commands::Check => {
            let table = load(&config, cli.json);
            print_loaded(table.len(), cli.json)?;
        }
        Commands::List => {
            let table = load(&config, cli.json);
            let views: Vec<RouteView<'_>> = table.routes().map(RouteView::from).collect();
            if cli.json {
                print_json(&views)?;
            } else {
                for view in &views {
                    println!("{}", view);
                }
            }
        }
        Commands::Resolve { path, method } => {
            let table = load(&config, cli.json);
            let request = RequestTarget::new(method, &path);
            let mut candidates = table.candidates(&request);

            let Some(found) = candidates.next() else {
                if cli.json {
                    print_json(&serde_json::json!({ "matched": false, "method": method, "path": request.path }))?;
                } else {
                    println!("no route matches {} {}", method, request.path);
                }
                std::process::exit(1);
            };
            let shadowed = candidates.map(|m| m.route.line).collect();

            let view = MatchView::new(&found, &config.target_defaults(), shadowed);
            if cli.json {
                print_json(&view)?;
            } else {
                println!("{}", view);
            }
        }
        Commands::Watch => watch(config, cli.json).await?,
    }

    Ok(())
}

/// Load the route table or exit with the errors printed.
fn load(config: &AppConfig, json: bool) -> RouteTable {
    load_routes(&config.routes.path, config).unwrap_or_else(|e| fail(&e, json))
}

async fn watch(config: AppConfig, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let path = config.routes.path.clone();

    let shared = match load_routes(&path, &config) {
        Ok(table) => {
            print_loaded(table.len(), json)?;
            SharedRouteTable::new(table)
        }
        Err(e) => {
            print_error(&e, json);
            SharedRouteTable::new(RouteTable::default())
        }
    };

    let (watcher, mut updates) = RouteWatcher::new(&path, config);
    let _watcher = watcher.run()?;

    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);

    loop {
        tokio::select! {
            Some(update) = updates.recv() => match update {
                RouteUpdate::Loaded(table) => {
                    shared.replace(table);
                    print_loaded(shared.snapshot().len(), json)?;
                }
                RouteUpdate::Rejected(e) => print_error(&e, json),
            },
            result = &mut ctrl_c => {
                match result {
                    Ok(()) => tracing::info!("Shutdown signal received"),
                    Err(e) => tracing::error!(error = %e, "Failed to listen for Ctrl+C"),
                }
                break;
            }
        }
    }

    tracing::info!("Watch stopped");
    Ok(())
}

fn print_loaded(routes: usize, json: bool) -> Result<(), serde_json::Error> {
    let view = LoadedView::new(routes);
    if json {
        print_json(&view)
    } else {
        println!("{}", view);
        Ok(())
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<(), serde_json::Error> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn print_error(error: &ConfigError, json: bool) {
    let view = match error.validation_errors() {
        [] => ErrorView {
            errors: vec![error.to_string()],
        },
        errors => ErrorView::from_validation(errors),
    };

    if json {
        if let Ok(text) = serde_json::to_string_pretty(&view) {
            println!("{}", text);
        }
    } else {
        for message in &view.errors {
            eprintln!("error: {}", message);
        }
    }
}

fn fail(error: &ConfigError, json: bool) -> ! {
    print_error(error, json);
    std::process::exit(1);
}
