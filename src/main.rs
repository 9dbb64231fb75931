use std::path::PathBuf;

use chrono::Local;
use clap::{Parser, Subcommand, ValueEnum};
use miette::Result;

use timestamper::{
    App, Config,
    daily_note::{DailyNoteResolver, FsDailyNoteResolver},
    document::Position,
    timestamp::InsertionPlan,
};

/// Insert a timestamp into today's daily note
#[derive(Parser)]
#[command(name = "timestamper")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Note to treat as the active document
    file: Option<PathBuf>,

    /// Vault directory holding the daily notes (default: config value or current directory)
    #[arg(long)]
    vault: Option<PathBuf>,

    /// Config file to use instead of the default location
    #[arg(long)]
    config: Option<PathBuf>,

    /// Cursor line (1-based) for cursor mode
    #[arg(long)]
    line: Option<usize>,

    /// Override the configured insertion mode
    #[arg(long, value_enum)]
    mode: Option<Mode>,

    /// Insert into FILE even when it is not today's note
    #[arg(long)]
    no_open: bool,

    /// Print the planned edit without changing the note
    #[arg(long)]
    dry_run: bool,

    /// Print the edit as JSON
    #[arg(long)]
    json: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize default configuration file
    InitConfig,
    /// Print the effective configuration
    ShowConfig,
}

#[derive(Clone, Copy, ValueEnum)]
enum Mode {
    End,
    Cursor,
    Chain,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    if matches!(cli.command, Some(Commands::InitConfig)) {
        return init_config(cli.config.unwrap_or_else(Config::default_config_path));
    }

    let mut config = match &cli.config {
        Some(path) => Config::load_from_file(path)?,
        None => Config::load_or_default(),
    };

    if matches!(cli.command, Some(Commands::ShowConfig)) {
        return show_config(&config);
    }

    match cli.mode {
        Some(Mode::End) => config.set_insert_at_end(true),
        Some(Mode::Chain) => config.set_chain_mode(true),
        Some(Mode::Cursor) => {
            config.set_chain_mode(false);
            config.set_insert_at_end(false);
        }
        None => {}
    }
    if cli.no_open {
        config.auto_open_daily_note = false;
    }

    let vault = match cli.vault.or_else(|| config.vault.clone()) {
        Some(vault) => vault,
        None => std::env::current_dir()
            .map_err(|e| miette::miette!("Failed to read current directory: {}", e))?,
    };
    let resolver = FsDailyNoteResolver::new(vault, config.daily_note.clone());
    let mut app = App::new(config, resolver);

    if let Some(file) = &cli.file {
        if let Err(e) = app.open_file(file) {
            log::warn!("{}", e);
        }
    }
    if let Some(line) = cli.line {
        app.set_cursor(Position::line_start(line.saturating_sub(1)));
    }

    let now = Local::now().naive_local();
    let plan = if cli.dry_run {
        app.plan_timestamp(now)
    } else {
        let plan = app.insert_timestamp(now);
        app.save()?;
        plan
    };

    // Nothing to insert into is not an error
    let Some(plan) = plan else {
        return Ok(());
    };
    report(&app, &plan, cli.json, cli.dry_run)
}

fn report<R: DailyNoteResolver>(
    app: &App<R>,
    plan: &InsertionPlan,
    json: bool,
    dry_run: bool,
) -> Result<()> {
    if json {
        let output = serde_json::to_string_pretty(plan)
            .map_err(|e| miette::miette!("Failed to serialize plan: {}", e))?;
        println!("{}", output);
        return Ok(());
    }

    let target = app
        .buffer()
        .and_then(|b| b.file_path())
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "<unsaved>".to_string());
    println!(
        "{} {:?} into {} at {} (cursor {})",
        if dry_run { "Would insert" } else { "Inserted" },
        plan.edit.text.trim(),
        target,
        plan.edit.from,
        plan.cursor
    );
    Ok(())
}

/// Initialize default configuration file
fn init_config(config_path: PathBuf) -> Result<()> {
    if config_path.exists() {
        eprintln!("Config file already exists at: {}", config_path.display());
        eprintln!("Remove it first or edit it manually.");
        return Ok(());
    }

    let config = Config::default();
    config.save_to_file(&config_path)?;
    println!(
        "Created default config file at: {}\n\n\
         Timestamp format:  {}\n\
         Insert at end:     {}\n\
         Chain mode:        {}\n\
         Daily note format: {}\n\n\
         Set `vault` to your notes directory, or pass --vault.",
        config_path.display(),
        config.timestamp_format,
        config.insert_at_end,
        config.chain_mode,
        config.daily_note.format
    );

    Ok(())
}

/// Print the effective configuration
fn show_config(config: &Config) -> Result<()> {
    let content = toml::to_string_pretty(config)
        .map_err(|e| miette::miette!("Failed to serialize config: {}", e))?;
    println!("{}", content);
    Ok(())
}
