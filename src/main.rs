//! element-router CLI.
//!
//! Loads a TOML route table and drives an in-memory router from the command
//! line: single matches, scripted navigations, validation, or an interactive
//! session with hot reload of the route file.

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use serde_json::json;
use tokio::io::{AsyncBufReadExt, BufReader};

use element_router::config::loader::{load_config, ConfigError};
use element_router::config::watcher::RouteWatcher;
use element_router::lifecycle::{self, signals, Shutdown};
use element_router::navigation::{Location, NavigationOutcome, RouterRegistry};
use element_router::observability::{logging, metrics};
use element_router::routing::{select, RouteTable};
use element_router::RouterConfig;

#[derive(Parser)]
#[command(name = "element-router")]
#[command(about = "Declarative client-side router driven by a TOML route table", long_about = None)]
struct Cli {
    /// Route configuration file.
    #[arg(short, long, default_value = "routes.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show which route a path selects and its parameters
    Match { path: String },
    /// Mount the router and navigate to each URL in turn
    Navigate { urls: Vec<String> },
    /// Check the configuration and list every problem
    Validate,
    /// Interactive session: URLs, `back` and `forward` from stdin; reloads on file change
    Watch,
}

#[tokio::main]
async fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = match load_config(&cli.config) {
        Ok(config) => config,
        Err(err @ ConfigError::Validation(_)) => {
            if let ConfigError::Validation(errors) = &err {
                for error in errors {
                    eprintln!("error: {}", error);
                }
            }
            let routes = err.invalid_routes();
            if !routes.is_empty() {
                let routes: Vec<String> = routes.iter().map(ToString::to_string).collect();
                eprintln!("invalid routes: {}", routes.join(", "));
            }
            eprintln!("{}: {}", cli.config.display(), err);
            return Ok(ExitCode::FAILURE);
        }
        Err(e) => return Err(e.into()),
    };

    logging::init_logging(&config.observability);
    metrics::describe_metrics();

    match cli.command {
        Commands::Match { path } => match_path(&config, &path)?,
        Commands::Navigate { urls } => navigate(&config, &urls).await?,
        Commands::Validate => println!("{}: ok ({} routes)", cli.config.display(), config.routes.len()),
        Commands::Watch => watch(config, cli.config).await?,
    }

    Ok(ExitCode::SUCCESS)
}

fn match_path(config: &RouterConfig, path: &str) -> Result<(), Box<dyn std::error::Error>> {
    let table = RouteTable::compile(config.routes.clone());
    let location = Location::parse(path);
    let mut output = match select(&table, path) {
        Some(selection) => json!({
            "index": selection.index,
            "route": selection.route.descriptor.path,
            "params": selection.params,
        }),
        None => json!({ "route": null }),
    };
    output["location"] = json!({
        "path": &location.path,
        "query": location.query_pairs(),
        "fragment": &location.fragment,
    });
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

async fn navigate(config: &RouterConfig, urls: &[String]) -> Result<(), Box<dyn std::error::Error>> {
    let registry = RouterRegistry::global();
    let runtime = lifecycle::start(config, &registry).await?;
    let controller = runtime.controller();
    let mut events = controller.subscribe();

    print_state(&json!({ "url": controller.current_location(), "outcome": "mounted" }), controller.slot().render())?;

    for url in urls {
        let outcome = registry.navigate_to(url).await?;
        let mut emitted = Vec::new();
        while let Ok(change) = events.try_recv() {
            emitted.push(change);
        }
        let summary = json!({
            "url": url,
            "outcome": describe(&outcome),
            "events": emitted,
            "active": controller.active_default(url),
        });
        print_state(&summary, controller.slot().render())?;
    }
    Ok(())
}

async fn watch(config: RouterConfig, path: PathBuf) -> Result<(), Box<dyn std::error::Error>> {
    let registry = RouterRegistry::global();
    let runtime = lifecycle::start(&config, &registry).await?;
    let controller = Arc::clone(runtime.controller());
    let shutdown = Shutdown::new();

    let _route_watch = RouteWatcher::new(&path, &config).spawn(Arc::clone(&controller))?;
    let listener = tokio::spawn(Arc::clone(&controller).run(shutdown.subscribe()));

    let mut events = controller.subscribe();
    let slot = controller.slot();
    let mut printer_shutdown = shutdown.subscribe();
    tokio::spawn(async move {
        loop {
            tokio::select! {
                Ok(change) = events.recv() => {
                    println!("{} → {}", change.url, slot.render());
                }
                _ = printer_shutdown.triggered() => break,
            }
        }
    });

    println!("{} → {}", controller.current_location(), controller.slot().render());

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let interrupted = signals::wait_for_shutdown_signal(&shutdown);
    tokio::pin!(interrupted);
    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else { break };
                match line.trim() {
                    "" => continue,
                    "back" => {
                        if !runtime.history.go_back() {
                            eprintln!("already at the oldest entry");
                        }
                    }
                    "forward" => {
                        if !runtime.history.go_forward() {
                            eprintln!("already at the newest entry");
                        }
                    }
                    url => {
                        if let Err(e) = registry.navigate_to(url).await {
                            eprintln!("error: {}", e);
                        }
                    }
                }
            }
            _ = &mut interrupted => break,
        }
    }

    shutdown.trigger();
    listener.await?;
    Ok(())
}

fn describe(outcome: &NavigationOutcome) -> serde_json::Value {
    match outcome {
        NavigationOutcome::Unchanged => json!("unchanged"),
        NavigationOutcome::Superseded => json!("superseded"),
        NavigationOutcome::Completed { url, route } => json!({ "completed": url, "route": route }),
    }
}

fn print_state(summary: &serde_json::Value, rendered: String) -> Result<(), Box<dyn std::error::Error>> {
    let mut summary = summary.clone();
    summary["outlet"] = json!(rendered);
    println!("{}", serde_json::to_string(&summary)?);
    Ok(())
}
