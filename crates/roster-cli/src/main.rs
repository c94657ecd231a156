//! Roster - main entry point.
//!
//! Loads configuration, wires the host services and runs either a one-shot
//! command or the interactive shell.

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use roster_cli::cli::{Cli, Command, ExportArgs, FilterArgs, ListArgs};
use roster_cli::shell;
use roster_cli::views::{render_detail, render_page};
use roster_cli::{
    AppError, Directory, DirectoryFileSink, Services, TerminalClipboard, TerminalNotifier,
};
use roster_core::{config_path, preferences_path, AppConfig, SortDirection, SortSpec, UserId};
use roster_runtime::{
    ExportOutcome, ExportScope, FilePreferenceStore, HttpUserSource, LoadState,
    MemoryPreferenceStore, PreferenceStore, SORT_BY_KEY, VIEW_MODE_KEY,
};

// =============================================================================
// Configuration
// =============================================================================

/// Config file, with command-line overrides applied.
fn load_config(cli: &Cli) -> Result<AppConfig, AppError> {
    let path = cli.config.clone().or_else(config_path);
    let mut config = match path {
        Some(path) => {
            tracing::debug!("Reading config from {:?}", path);
            AppConfig::load(&path)?
        }
        None => {
            tracing::debug!("No config directory, using defaults");
            AppConfig::default()
        }
    };
    cli.apply_overrides(&mut config);
    Ok(config)
}

/// Preference store for this run.
///
/// The shell writes through to disk. One-shot commands read persisted
/// values but keep their own changes in memory.
fn preference_store(one_shot: bool) -> Arc<dyn PreferenceStore> {
    let Some(path) = preferences_path() else {
        return Arc::new(MemoryPreferenceStore::new());
    };

    let file = FilePreferenceStore::open(path);
    if !one_shot {
        return Arc::new(file);
    }

    Arc::new(MemoryPreferenceStore::copy_of(
        &file,
        &[VIEW_MODE_KEY, SORT_BY_KEY],
    ))
}

fn build_directory(cli: &Cli, config: &AppConfig) -> Result<Directory, AppError> {
    let assume_yes = matches!(&cli.command, Some(Command::Export(ExportArgs { yes: true, .. })));
    let export_dir = config
        .export_dir
        .clone()
        .unwrap_or_else(|| PathBuf::from("."));

    let services = Services {
        source: Arc::new(HttpUserSource::new(
            &config.endpoint,
            config.fetch_timeout(),
        )?),
        preferences: preference_store(cli.is_one_shot()),
        sink: Arc::new(DirectoryFileSink::new(export_dir)),
        clipboard: Arc::new(TerminalClipboard::new()),
        notifier: Arc::new(TerminalNotifier::new().assume_yes(assume_yes)),
    };
    Ok(Directory::new(config, services))
}

// =============================================================================
// Commands
// =============================================================================

/// Load users, turning a surfaced failure into an error.
async fn load_users(directory: &Directory) -> Result<(), AppError> {
    match directory.load().await {
        LoadState::Failed { message } => Err(AppError::Load(message)),
        _ => Ok(()),
    }
}

fn apply_filters(directory: &mut Directory, filters: &FilterArgs) {
    if let Some(search) = &filters.search {
        directory.set_search(search.as_str());
    }
    if let Some(company) = &filters.company {
        directory.set_company_filter(company.as_str());
    }
    if let Some(city) = &filters.city {
        directory.set_city_filter(city.as_str());
    }
}

async fn list(directory: &mut Directory, args: &ListArgs) -> Result<(), AppError> {
    load_users(directory).await?;
    apply_filters(directory, &args.filters);

    if args.sort.is_some() || args.desc {
        let key = args.sort.unwrap_or(directory.sort().key);
        let dir = if args.desc {
            SortDirection::Desc
        } else {
            SortDirection::Asc
        };
        directory.set_sort(SortSpec::new(key, dir));
    }
    if let Some(view) = args.view {
        directory.set_view(view);
    }
    if let Some(page) = args.page {
        directory.goto_page(page);
    }

    println!("{}", render_page(&directory.refresh()));
    Ok(())
}

async fn show(directory: &Directory, id: u64, json: bool) -> Result<(), AppError> {
    load_users(directory).await?;
    let id = UserId(id);
    let user = directory.user(id).ok_or(AppError::UnknownUser(id))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&user)?);
    } else {
        println!("{}", render_detail(&user));
    }
    Ok(())
}

async fn export(directory: &mut Directory, args: &ExportArgs) -> Result<(), AppError> {
    load_users(directory).await?;
    apply_filters(directory, &args.filters);

    let scope = match &args.selected {
        Some(ids) => {
            for id in ids {
                if !directory.is_selected(UserId(*id)) {
                    directory.toggle_select(UserId(*id));
                }
            }
            ExportScope::SelectedOnly
        }
        None => ExportScope::AllFiltered,
    };

    match directory.export(scope).await? {
        ExportOutcome::Saved { filename, rows } => {
            tracing::info!("Wrote {} rows to {}", rows, filename);
        }
        ExportOutcome::Empty => {}
        ExportOutcome::Cancelled => eprintln!("Export cancelled."),
    }
    Ok(())
}

async fn run(cli: Cli) -> Result<(), AppError> {
    let config = load_config(&cli)?;
    tracing::debug!("Config: {:?}", config);
    let mut directory = build_directory(&cli, &config)?;

    match cli.command.clone().unwrap_or(Command::Shell) {
        Command::List(args) => list(&mut directory, &args).await,
        Command::Show { id, json } => show(&directory, id, json).await,
        Command::Export(args) => export(&mut directory, &args).await,
        Command::Shell => shell::run(&mut directory).await,
    }
}

// =============================================================================
// Entry Point
// =============================================================================

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Logs go to stderr so stdout carries only rendered output
    let level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let rt = match tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
    {
        Ok(rt) => rt,
        Err(e) => {
            eprintln!("Error: failed to create tokio runtime: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let result = rt.block_on(run(cli));
    // A pending stdin read must not hold up exit
    rt.shutdown_background();

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{}", e);
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
