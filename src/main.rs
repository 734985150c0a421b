//! monolize: update every git repository in a directory and assemble them
//! into a submodule monorepo.

use anyhow::{Context, Result};
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command as ClapCommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use monolize::commands::{
    handle_create_command, handle_status_command, handle_sync_command, handle_update_command,
};
use monolize::core::{Settings, APP_NAME, DEFAULT_MONOREPO_NAME};
use monolize::git::GitRunner;

fn build_cli() -> ClapCommand {
    ClapCommand::new(APP_NAME)
        .version(clap::crate_version!())
        .about("Update multiple git repositories and manage them as a submodule monorepo")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("config")
                .long("config")
                .global(true)
                .value_parser(value_parser!(PathBuf))
                .help("Config file (default is $HOME/.monolize.yaml)"),
        )
        .arg(
            Arg::new("path")
                .short('p')
                .long("path")
                .global(true)
                .value_parser(value_parser!(PathBuf))
                .help("Path to the directory containing git repositories"),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .global(true)
                .action(ArgAction::SetTrue)
                .help("Enable verbose output"),
        )
        .subcommand(
            ClapCommand::new("update").about("Update all git repositories to the latest version"),
        )
        .subcommand(
            ClapCommand::new("create")
                .about("Create a monorepo with all repositories as submodules")
                .arg(
                    Arg::new("name")
                        .short('n')
                        .long("name")
                        .default_value(DEFAULT_MONOREPO_NAME)
                        .help("Name of the monorepo directory"),
                )
                .arg(
                    Arg::new("output")
                        .short('o')
                        .long("output")
                        .value_parser(value_parser!(PathBuf))
                        .help("Output path for the monorepo (default: same as source path)"),
                ),
        )
        .subcommand(
            ClapCommand::new("sync")
                .about("Sync all submodules in a monorepo to the latest version")
                .arg(
                    Arg::new("monorepo")
                        .value_parser(value_parser!(PathBuf))
                        .help("Monorepo path (default: current directory)"),
                ),
        )
        .subcommand(
            ClapCommand::new("status")
                .about("List the submodules of a monorepo")
                .arg(
                    Arg::new("monorepo")
                        .value_parser(value_parser!(PathBuf))
                        .help("Monorepo path (default: current directory)"),
                ),
        )
}

/// Settings from file and environment, with command-line flags applied on top
fn resolve_settings(matches: &ArgMatches) -> Result<Settings> {
    let mut settings = Settings::load(matches.get_one::<PathBuf>("config").map(PathBuf::as_path))
        .context("failed to load configuration")?;

    if let Some(path) = matches.get_one::<PathBuf>("path") {
        settings.path = path.clone();
    }
    if matches.get_flag("verbose") {
        settings.verbose = true;
    }

    Ok(settings)
}

fn init_logging(verbose: bool) {
    let default_filter = if verbose {
        "monolize=debug"
    } else {
        "monolize=warn"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let matches = build_cli().get_matches();
    let settings = resolve_settings(&matches)?;

    init_logging(settings.verbose);
    tracing::debug!(?settings, "resolved settings");

    let runner = GitRunner::with_timeout(settings.git_timeout());

    match matches.subcommand() {
        Some(("update", _)) => {
            handle_update_command(&runner, &settings).await?;
        }
        Some(("create", sub)) => {
            let name = sub
                .get_one::<String>("name")
                .map(String::as_str)
                .unwrap_or(DEFAULT_MONOREPO_NAME);
            let output = sub.get_one::<PathBuf>("output").map(PathBuf::as_path);
            handle_create_command(&runner, &settings, name, output).await?;
        }
        Some(("sync", sub)) => {
            let path = sub.get_one::<PathBuf>("monorepo").map(PathBuf::as_path);
            handle_sync_command(&runner, &settings, path).await?;
        }
        Some(("status", sub)) => {
            let path = sub.get_one::<PathBuf>("monorepo").map(PathBuf::as_path);
            handle_status_command(&runner, path).await?;
        }
        _ => unreachable!("clap requires a subcommand"),
    }

    Ok(())
}
