use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{CommandFactory, Parser};
use clap_complete::generate;
use colored::Colorize;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use bns_anim_core::config::Config;
use bns_anim_core::operator::{FileCallback, FileLocation, Operator};
use bns_anim_core::queue::{build_queue, Selection};
use bns_anim_core::table;
use bns_anim_core::{BnsAnimError, Result};

mod args;
use args::{Cli, Commands, ConfigAction, Shell};

const INTEGRITY_ADVISORY: &str = "[IntegrityError] Some files don't exist.\n                 Restore animations first. If it won't help, check your client.";

/// Command-line overrides applied on top of the config file
struct Overrides {
    root: Option<PathBuf>,
    backup_dir: Option<PathBuf>,
    no_common: bool,
    select: Vec<Selection>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.quiet);

    let config_path = resolve_config_path(cli.config);
    let overrides = Overrides {
        root: cli.root,
        backup_dir: cli.backup_dir,
        no_common: cli.no_common,
        select: cli.select,
    };
    let quiet = cli.quiet;

    let result = match cli.command {
        Commands::Remove => load_config(&config_path, &overrides)
            .and_then(|config| handle_remove(&config, quiet)),
        Commands::Restore => load_config(&config_path, &overrides)
            .and_then(|config| handle_restore(&config, quiet)),
        Commands::Queue => {
            load_config(&config_path, &overrides).map(|config| handle_queue(&config))
        }
        Commands::Status => {
            load_config(&config_path, &overrides).map(|config| handle_status(&config))
        }
        Commands::Table => {
            handle_table();
            Ok(())
        }
        Commands::Config { action } => handle_config(action, &config_path),
        Commands::Completions { shell } => {
            handle_completions(shell);
            Ok(())
        }
    };

    let code = report(result, cli.verbose, &mut io::stdout(), &mut io::stderr());
    ExitCode::from(code)
}

/// Print the outcome of a command and return the process exit code.
///
/// Integrity errors are advisory: printed to stdout with a zero exit code.
fn report(result: Result<()>, verbose: bool, out: &mut dyn Write, err: &mut dyn Write) -> u8 {
    let e = match result {
        Ok(()) => return 0,
        Err(e) => e,
    };

    if e.is_integrity() {
        let _ = writeln!(out, "{}", INTEGRITY_ADVISORY);
        if verbose {
            let _ = writeln!(out);
            let _ = writeln!(out, "{}", e);
        }
    } else {
        let _ = writeln!(err, "{} {}", "[ERROR]".red().bold(), e);
    }

    e.exit_code() as u8
}

fn init_logging(verbose: bool, quiet: bool) {
    let level = if verbose {
        "debug"
    } else if quiet {
        "error"
    } else {
        "warn"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn resolve_config_path(cli_config: Option<PathBuf>) -> PathBuf {
    if let Some(path) = cli_config {
        return path;
    }

    if let Ok(path) = std::env::var("BNS_ANIM_CONFIG") {
        return PathBuf::from(path);
    }

    Config::default_path()
}

fn load_config(path: &Path, overrides: &Overrides) -> Result<Config> {
    let mut config = Config::load(path)?;
    debug!(path = %path.display(), exists = path.exists(), "loaded config");

    if let Some(root) = &overrides.root {
        config.game.root = root.clone();
    }
    if let Some(backup_dir) = &overrides.backup_dir {
        config.game.backup_dir = Some(backup_dir.clone());
    }
    if overrides.no_common {
        config.queue.include_common = false;
    }
    if !overrides.select.is_empty() {
        config.queue.select = overrides.select.clone();
    }

    debug!(
        root = %config.game.root.display(),
        backup = %config.game.backup_dir().display(),
        include_common = config.queue.include_common,
        selections = config.queue.select.len(),
        "resolved configuration"
    );

    Ok(config)
}

fn handle_completions(shell: Shell) {
    let mut cmd = Cli::command();
    let shell = match shell {
        Shell::Bash => clap_complete::Shell::Bash,
        Shell::Zsh => clap_complete::Shell::Zsh,
        Shell::Fish => clap_complete::Shell::Fish,
        Shell::PowerShell => clap_complete::Shell::PowerShell,
        Shell::Elvish => clap_complete::Shell::Elvish,
    };
    generate(shell, &mut cmd, "bns-anim", &mut io::stdout());
}

fn handle_remove(config: &Config, quiet: bool) -> Result<()> {
    let operator = Operator::from_config(&config.game);
    let queue = build_queue(&config.queue);

    if !quiet {
        println!();
        println!("Client: {}", operator.root().display());
        println!("Backup: {}", operator.backup_dir().display());
        println!("Queued: {} files", queue.len().to_string().cyan());
        println!();
    }

    let on_file = |status: &str, name: &str| {
        let status_str = match status {
            "CLEAR" => format!("[{}]", status).yellow(),
            "MOVE" => format!("[{}]", status).blue(),
            _ => format!("[{}]", status).normal(),
        };
        println!("  {} {}", status_str, name);
    };
    let callback: FileCallback<'_> = if quiet { None } else { Some(&on_file) };

    let result = operator.remove(&queue, callback)?;

    if !quiet {
        println!();
        println!("Summary:");
        println!("  Cleared: {} (previous backup)", result.cleared);
        println!("  Moved: {}", result.moved);
        println!();
        println!("{}", "Animations removed.".green());
    }

    Ok(())
}

fn handle_restore(config: &Config, quiet: bool) -> Result<()> {
    let operator = Operator::from_config(&config.game);

    if !quiet {
        println!();
        println!("Backup: {}", operator.backup_dir().display());
        println!("Client: {}", operator.packages_dir().display());
        println!();
    }

    let on_file = |status: &str, name: &str| {
        println!("  {} {}", format!("[{}]", status).green(), name);
    };
    let callback: FileCallback<'_> = if quiet { None } else { Some(&on_file) };

    let result = operator.restore(callback)?;

    if !quiet {
        println!();
        println!("Summary:");
        println!("  Restored: {}", result.restored);
        println!();
        println!("{}", "Animations restored.".green());
    }

    Ok(())
}

fn handle_queue(config: &Config) {
    for id in build_queue(&config.queue) {
        println!("{}", id);
    }
}

fn handle_status(config: &Config) {
    let operator = Operator::from_config(&config.game);
    let files = operator.status(&build_queue(&config.queue));

    println!();
    println!("Client: {}", operator.packages_dir().display());
    println!("Backup: {}", operator.backup_dir().display());
    println!();

    let (mut game, mut backup, mut both, mut missing) = (0, 0, 0, 0);
    for file in &files {
        let label = format!("{:<8}", file.location);
        let label = match file.location {
            FileLocation::Game => {
                game += 1;
                label.green()
            }
            FileLocation::Backup => {
                backup += 1;
                label.blue()
            }
            FileLocation::Both => {
                both += 1;
                label.yellow()
            }
            FileLocation::Missing => {
                missing += 1;
                label.red()
            }
        };
        println!("  {} {}", label, file.id);
    }

    println!();
    println!("Summary:");
    println!("  In client: {}", game);
    println!("  In backup: {}", backup);
    if both > 0 {
        println!("  In both: {}", both.to_string().yellow());
    }
    if missing > 0 {
        println!("  Missing: {}", missing.to_string().red());
    }
    println!();
}

fn handle_table() {
    println!();
    println!("{} ({} files)", "Common".cyan(), table::COMMON.len());
    for chunk in table::COMMON.chunks(8) {
        println!("  {}", chunk.join(" "));
    }

    println!();
    println!("{} ({} entries)", "Special".cyan(), table::SPECIAL.len());
    for entry in table::SPECIAL {
        println!(
            "  {:<16} {:<22} {}",
            entry.class.to_string(),
            entry.stage.to_string(),
            entry.files.join(" ")
        );
    }
    println!();
}

fn handle_config(action: ConfigAction, config_path: &Path) -> Result<()> {
    match action {
        ConfigAction::Get { key } => {
            let config = Config::load(config_path)?;
            match config.get(&key) {
                Some(value) => {
                    println!("{}", value);
                }
                None => {
                    return Err(BnsAnimError::ConfigKeyNotFound { key });
                }
            }
        }
        ConfigAction::Set { key, value } => {
            let mut config = Config::load(config_path)?;
            config.set(&key, &value)?;
            config.save(config_path)?;
            println!("{} {} = {}", "Set:".green(), key, value);
        }
        ConfigAction::List => {
            let config = Config::load(config_path)?;
            println!();
            for (key, value) in config.list() {
                println!("{} = {}", key.cyan(), value);
            }
            println!();
        }
        ConfigAction::Path => {
            println!("{}", config_path.display());
        }
        ConfigAction::Init => {
            let path = Config::init(config_path)?;
            println!("{} {}", "Initialized:".green(), path.display());
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(result: Result<()>, verbose: bool) -> (u8, String, String) {
        let mut out = Vec::new();
        let mut err = Vec::new();
        let code = report(result, verbose, &mut out, &mut err);
        (
            code,
            String::from_utf8(out).unwrap(),
            String::from_utf8(err).unwrap(),
        )
    }

    #[test]
    fn test_report_success() {
        let (code, out, err) = run(Ok(()), false);
        assert_eq!(code, 0);
        assert!(out.is_empty());
        assert!(err.is_empty());
    }

    #[test]
    fn test_report_missing_files_is_advisory() {
        let missing = PathBuf::from("CookedPC").join("00007916.upk");
        let result = Err(BnsAnimError::MissingFiles {
            paths: vec![missing],
        });

        let (code, out, err) = run(result, false);

        assert_eq!(code, 0);
        assert_eq!(out, format!("{}\n", INTEGRITY_ADVISORY));
        assert!(err.is_empty());
    }

    #[test]
    fn test_report_missing_backup_verbose_names_path() {
        let result = Err(BnsAnimError::BackupNotFound {
            path: PathBuf::from("animation_backup"),
        });

        let (code, out, err) = run(result, true);

        assert_eq!(code, 0);
        assert!(out.starts_with("[IntegrityError] Some files don't exist."));
        assert!(out.contains("animation_backup"));
        assert!(err.is_empty());
    }

    #[test]
    fn test_report_other_errors_go_to_stderr() {
        let result = Err(BnsAnimError::ConfigKeyNotFound {
            key: "game.nope".to_string(),
        });

        let (code, out, err) = run(result, false);

        assert_eq!(code, 3);
        assert!(out.is_empty());
        assert!(err.contains("[ERROR]"));
        assert!(err.contains("Config key not found: game.nope"));
    }

    #[test]
    fn test_load_config_applies_overrides() {
        let overrides = Overrides {
            root: Some(PathBuf::from("/games/bns")),
            backup_dir: None,
            no_common: true,
            select: vec!["warden:all".parse().unwrap()],
        };

        let config = load_config(Path::new("/nonexistent/bns-anim.toml"), &overrides).unwrap();

        assert_eq!(config.game.root, PathBuf::from("/games/bns"));
        assert!(!config.queue.include_common);
        assert_eq!(config.queue.select, overrides.select);
    }
}
