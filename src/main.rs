//! Zonewall - zone firewall rule-set editor
//!
//! A desktop console for the ordered, named firewall rule-sets of a
//! zone-based router, talking to the router's admin API.
//!
//! # Features
//!
//! - Zone directory with rule-set membership, reconciled on every refresh
//! - Rule editing with typed address/port/group fields and service presets
//! - Drag-and-drop reordering, committed in a single request
//! - Optional local journal of every mutation sent to the router
//!
//! # Usage
//!
//! ```bash
//! # Run the GUI application
//! zonewall
//!
//! # CLI commands
//! zonewall list                  # List zones and their rule sets
//! zonewall show lan-wan          # Print one rule set's rules
//! zonewall events                # Print recent journal entries
//! zonewall --server http://10.0.0.1 list
//! ```

mod api;
mod app;
mod audit;
mod config;
mod core;
mod theme;
mod utils;
mod validators;

use clap::{Parser, Subcommand};
use iced::Size;
use std::process::ExitCode;

shadow_rs::shadow!(build);

#[derive(Parser)]
#[command(name = "zonewall")]
#[command(about = "Zone firewall rule-set editor", long_about = None)]
#[command(version, long_version = build::CLAP_LONG_VERSION)]
struct Cli {
    /// Router base URL (overrides the configured one)
    #[arg(short, long, value_name = "URL", global = true)]
    server: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// List zones and the rule sets assigned to them
    List,
    /// Print the rules of one rule set
    Show {
        /// Name of the rule set
        name: String,
    },
    /// Print recent entries from the local event journal
    Events {
        /// Maximum number of entries to print
        #[arg(short, long, default_value_t = 20)]
        count: usize,
    },
}

fn main() -> ExitCode {
    let _ = crate::utils::ensure_dirs();
    let cli = Cli::parse();

    if let Some(command) = cli.command {
        // Create Tokio runtime only for CLI commands
        let runtime = tokio::runtime::Runtime::new().expect("Failed to create Tokio runtime");
        match runtime.block_on(handle_cli(command, cli.server)) {
            Ok(()) => ExitCode::SUCCESS,
            Err(e) => {
                eprintln!("Error: {e}");
                ExitCode::FAILURE
            }
        }
    } else {
        // GUI runs in normal sync context (Iced has its own async runtime)
        launch_gui()
    }
}

async fn handle_cli(
    command: Commands,
    server: Option<String>,
) -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(tracing::Level::WARN)
        .init();

    match command {
        Commands::List => {
            let snapshot = make_client(server).await?.fetch_overview().await?;
            for zone in &snapshot.zones {
                println!("{zone}");
                for entry in snapshot.zone_groups.get(zone).map_or(&[][..], Vec::as_slice) {
                    println!("    {} -> {}", entry.name, entry.destination);
                }
            }
        }
        Commands::Show { name } => {
            let name = validators::validate_rule_set_name(&name)?;
            let detail = make_client(server).await?.fetch_rule_set(&name).await?;
            for wire in detail.rules {
                let rule = core::ruleset::Rule::from_wire(wire);
                let action = rule
                    .action
                    .map_or("-", core::ruleset::Action::display_name);
                let flag = if rule.disabled { " (disabled)" } else { "" };
                println!(
                    "{:>8}  {:<7} {:<8} {} -> {}{}",
                    rule.id,
                    action,
                    core::codec::format_protocol_display(&rule.protocol),
                    rule.source.display(),
                    rule.destination.display(),
                    flag,
                );
            }
        }
        Commands::Events { count } => print_events(count).await?,
    }
    Ok(())
}

/// API client against the configured router, with an optional URL override.
async fn make_client(server: Option<String>) -> Result<api::ApiClient, Box<dyn std::error::Error>> {
    let config = config::load_config().await;
    let base_url = server.unwrap_or(config.server_url);
    Ok(api::ApiClient::new(&base_url)?)
}

/// Prints the most recent event journal entries, newest first.
async fn print_events(count: usize) -> Result<(), Box<dyn std::error::Error>> {
    let journal = audit::AuditLog::new()?;
    let events = journal.read_recent(count).await.unwrap_or_default();
    if events.is_empty() {
        println!("No journal entries at {}", journal.path().display());
        return Ok(());
    }
    for event in events {
        let outcome = if event.success { "ok" } else { "FAILED" };
        print!(
            "{}  {:<15} {:<6} {}",
            event.timestamp.format("%Y-%m-%d %H:%M:%S"),
            event.event_type.label(),
            outcome,
            event.details,
        );
        if let Some(error) = &event.error {
            print!("  {error}");
        }
        println!();
    }
    Ok(())
}

fn launch_gui() -> ExitCode {
    // Set up logging to file
    if let Some(mut log_path) = crate::utils::get_state_dir() {
        log_path.push("zonewall.log");
        if let Ok(file) = std::fs::File::create(log_path) {
            tracing_subscriber::fmt().with_writer(file).init();
        } else {
            tracing_subscriber::fmt::init();
        }
    } else {
        tracing_subscriber::fmt::init();
    }

    let result = iced::application(app::State::new, app::State::update, app::State::view)
        .subscription(app::State::subscription)
        .window(iced::window::Settings {
            size: Size::new(1100.0, 720.0),
            ..Default::default()
        })
        .title(app::State::title)
        .theme(|_state: &app::State| iced::Theme::Dark)
        .run();

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(_) => ExitCode::FAILURE,
    }
}
