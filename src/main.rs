//! CLI entry point for input-binding-manager
//!
//! Provides command-line interface for listing and editing bindings,
//! checking the bindings file, managing backups and running scripts
//! against a headless input device.

use anyhow::{anyhow, bail, Context};
use clap::{Parser, Subcommand};
use colored::*;
use input_binding_manager::config::{BindingStore, ConfigError, ConfigValidator, Settings, ValidationLevel};
use input_binding_manager::core::types::{ButtonArg, ButtonCode, RgssVersion};
use input_binding_manager::facade::BindingController;
use input_binding_manager::script::{create_engine, run_file, HeadlessInput, InputDevice, ScriptContext};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "input-binding-manager")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Engine settings file
    #[arg(short, long, global = true, default_value = "mkxp.json")]
    settings: PathBuf,

    /// Bindings file (overrides the settings)
    #[arg(short, long, global = true)]
    bindings: Option<PathBuf>,

    /// RGSS version 1-3 (overrides the settings)
    #[arg(long, global = true, value_parser = clap::value_parser!(u8).range(1..=3))]
    rgss: Option<u8>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List bindings
    List {
        /// Only this action (name or code)
        #[arg(short, long)]
        action: Option<String>,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Show the bindings and display names of one action
    Get {
        action: String,
    },

    /// Replace the bindings of an action and save
    Set {
        action: String,

        /// Source tokens, e.g. Return pad_a axis_leftx-
        tokens: Vec<String>,
    },

    /// Restore the default layout and save
    Reset,

    /// Validate the bindings file
    Check,

    /// Run a Rhai script against a headless input device
    Run {
        script: PathBuf,
    },

    /// List, prune or restore backups
    Backups {
        /// Delete all but the configured number of backups
        #[arg(long)]
        cleanup: bool,

        /// Restore this backup
        #[arg(long, conflicts_with = "cleanup")]
        restore: Option<PathBuf>,
    },
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let (settings, store) = open_store(&cli)?;

    // Recovery commands work on the raw file, so a malformed line never
    // locks them out
    match cli.command {
        Commands::Reset => reset_bindings(&settings, &store)?,
        Commands::Check => check_bindings(&store)?,
        Commands::Backups { cleanup, restore } => manage_backups(&settings, &store, cleanup, restore)?,
        Commands::List { action, json } => {
            let controller = BindingController::open(settings, store)?;
            list_bindings(&controller, action.as_deref(), json)?
        }
        Commands::Get { action } => {
            let controller = BindingController::open(settings, store)?;
            show_action(&controller, &action)?
        }
        Commands::Set { action, tokens } => {
            let controller = BindingController::open(settings, store)?;
            set_bindings(&controller, &action, &tokens)?
        }
        Commands::Run { script } => run(BindingController::open(settings, store)?, &script)?,
    }

    Ok(())
}

fn expand(path: &Path) -> anyhow::Result<PathBuf> {
    let raw = path
        .to_str()
        .ok_or_else(|| anyhow!("Invalid path encoding"))?;
    Ok(PathBuf::from(shellexpand::tilde(raw).into_owned()))
}

/// Settings file, then CLI overrides, then the store
fn open_store(cli: &Cli) -> anyhow::Result<(Settings, BindingStore)> {
    let settings_path = expand(&cli.settings)?;
    let mut settings = Settings::load(&settings_path)?;

    if let Some(version) = cli.rgss {
        settings.rgss_version = RgssVersion::try_from(version).map_err(anyhow::Error::msg)?;
    }

    let base = settings_path
        .parent()
        .filter(|parent| !parent.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let bindings_path = match &cli.bindings {
        Some(path) => expand(path)?,
        None => settings.resolved_bindings_path(base),
    };

    let store = BindingStore::new(bindings_path)?.with_backups_to_keep(settings.backups_to_keep);
    Ok((settings, store))
}

/// Overwrites the stored bindings with the default layout
fn reset_bindings(settings: &Settings, store: &BindingStore) -> anyhow::Result<()> {
    store.save(&settings.default_table())?;
    println!(
        "{} Restored {} defaults in {}",
        "✓".green(),
        settings.rgss_version,
        store.path().display()
    );
    Ok(())
}

/// Action names are accepted under every ruleset on the command line
fn parse_action(action: &str) -> anyhow::Result<ButtonArg> {
    if let Ok(code) = action.parse::<i64>() {
        return Ok(ButtonArg::Code(code));
    }
    match ButtonCode::from_name(action) {
        Some(button) => Ok(ButtonArg::Code(i64::from(button.code()))),
        None => bail!("Unknown action '{}'", action),
    }
}

fn format_tokens(tokens: &[Option<String>]) -> String {
    tokens
        .iter()
        .map(|token| match token {
            Some(token) => token.clone(),
            None => "(none)".to_string(),
        })
        .collect::<Vec<_>>()
        .join(", ")
}

fn list_bindings(controller: &BindingController, action: Option<&str>, json: bool) -> anyhow::Result<()> {
    if let Some(action) = action {
        let arg = parse_action(action)?;
        let tokens = controller.bindings(&arg);
        if json {
            println!("{}", serde_json::to_string_pretty(&tokens)?);
        } else {
            println!(
                "{} → {}",
                controller.resolve_action(&arg).to_string().cyan().bold(),
                format_tokens(&tokens)
            );
        }
        return Ok(());
    }

    let table = controller.table();
    if json {
        println!("{}", serde_json::to_string_pretty(&table)?);
        return Ok(());
    }

    println!(
        "{}",
        format!("Bindings from: {}\n", controller.store().path().display()).bold()
    );

    for action in table.actions() {
        let arg = ButtonArg::Code(i64::from(action.code()));
        println!(
            "{:>12} → {}",
            action.to_string().cyan().bold(),
            format_tokens(&controller.bindings(&arg))
        );
    }

    println!("\n{} Total: {} bindings", "✓".green(), table.len());
    Ok(())
}

fn show_action(controller: &BindingController, action: &str) -> anyhow::Result<()> {
    let arg = parse_action(action)?;
    let mapping = controller.key_mapping(&arg);

    println!("{}", controller.resolve_action(&arg).to_string().cyan().bold());
    println!("  {} {}", "tokens:".dimmed(), format_tokens(&controller.bindings(&arg)));
    println!("  {} {}", "keyboard:".dimmed(), mapping.kbm.join(", "));
    println!("  {} {}", "gamepad:".dimmed(), mapping.gamepad.join(", "));
    Ok(())
}

fn set_bindings(controller: &BindingController, action: &str, tokens: &[String]) -> anyhow::Result<()> {
    let arg = parse_action(action)?;
    controller.apply_bindings(&arg, tokens)?;
    controller.save_bindings()?;

    let bound = controller.bindings(&arg);
    if bound.is_empty() {
        println!("{} Cleared {}", "✓".green(), controller.resolve_action(&arg));
    } else {
        println!(
            "{} {} → {}",
            "✓".green(),
            controller.resolve_action(&arg),
            format_tokens(&bound)
        );
    }
    Ok(())
}

/// Validates the bindings file; exits with status 1 on errors
fn check_bindings(store: &BindingStore) -> anyhow::Result<()> {
    if !store.exists() {
        println!(
            "{} No bindings file at {} (defaults in use)",
            "→".cyan(),
            store.path().display()
        );
        return Ok(());
    }

    println!("{} Checking: {}", "→".cyan(), store.path().display());
    let content = store.read_bindings_file()?;
    let report = match ConfigValidator::new().validate_content(&content) {
        Ok(report) => report,
        Err(ConfigError::Parse(e)) => {
            println!("  {} {}", "error".red().bold(), e);
            println!(
                "\n{} Unreadable bindings file; fix it or run `reset` / `backups --restore`",
                "✗".red().bold()
            );
            std::process::exit(1);
        }
        Err(e) => return Err(e.into()),
    };

    for issue in &report.issues {
        let label = match issue.validation_level {
            ValidationLevel::Error => "error".red().bold(),
            ValidationLevel::Warning => "warning".yellow().bold(),
            ValidationLevel::Info => "info".blue(),
        };
        println!("  {} binding {}: {}", label, issue.binding_index, issue.message);
        if let Some(suggestion) = &issue.suggestion {
            println!("    {} {}", "↳".dimmed(), suggestion.dimmed());
        }
    }

    let errors = report.count(ValidationLevel::Error);
    let warnings = report.count(ValidationLevel::Warning);
    if errors > 0 {
        println!(
            "\n{} {} error(s), {} warning(s)",
            "✗".red().bold(),
            errors,
            warnings
        );
        std::process::exit(1);
    }

    println!("\n{} No errors, {} warning(s)", "✓".green().bold(), warnings);
    Ok(())
}

fn run(controller: BindingController, script: &Path) -> anyhow::Result<()> {
    let script = expand(script)?;
    let controller = Arc::new(controller);
    let device: Arc<dyn InputDevice> = Arc::new(HeadlessInput::new(controller.shared()));

    let engine = create_engine(ScriptContext::new(device, controller));
    let result = run_file(&engine, &script)
        .with_context(|| format!("Failed to run {}", script.display()))?;

    if !result.is_unit() {
        println!("{}", result);
    }
    Ok(())
}

fn manage_backups(
    settings: &Settings,
    store: &BindingStore,
    cleanup: bool,
    restore: Option<PathBuf>,
) -> anyhow::Result<()> {
    if let Some(backup) = restore {
        let backup = expand(&backup)?;
        store.restore_backup(&backup)?;
        println!("{} Restored {}", "✓".green(), backup.display());
        return Ok(());
    }

    if cleanup {
        let removed = store.cleanup_old_backups(settings.backups_to_keep)?;
        println!("{} Removed {} old backup(s)", "✓".green(), removed);
        return Ok(());
    }

    let backups = store.list_backups()?;
    if backups.is_empty() {
        println!("No backups in {}", store.backup_dir().display());
        return Ok(());
    }

    println!("{}", format!("Backups in {}\n", store.backup_dir().display()).bold());
    for backup in &backups {
        println!("  {}", backup.display());
    }
    println!("\n{} Total: {} backups", "✓".green(), backups.len());
    Ok(())
}
