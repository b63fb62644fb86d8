use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::{Context, Result, bail};
use atrium_registry::{RailState, RenderedEntry, ShellConfig, ShellInputs, render_navigation, search_route};
use clap::{Parser, Subcommand};
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "atrium", version, about = "Module-gated application shell")]
struct Cli {
    /// Shell configuration file (JSON or YAML). Must exist when given.
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// File holding the module list; replaces the configured one.
    #[arg(long, global = true, value_name = "FILE")]
    modules: Option<PathBuf>,

    #[arg(long, global = true)]
    locale: Option<String>,

    /// Dictionary file overlaid on the embedded labels for the locale.
    #[arg(long, global = true, value_name = "FILE")]
    dictionary: Option<PathBuf>,

    /// Location to start at (or to render, for `nav`).
    #[arg(long, global = true, value_name = "PATH")]
    path: Option<String>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print the navigation rail for a location without starting the TUI.
    Nav {
        #[arg(long)]
        collapsed: bool,
        #[arg(long)]
        json: bool,
    },
    /// Print the location a palette search would navigate to.
    Search {
        #[arg(required = true, num_args = 1..)]
        query: Vec<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.command.is_none());
    let inputs = build_inputs(&cli)?;

    match cli.command {
        // No subcommand => TUI
        None => atrium_tui::run(inputs).await,
        Some(Command::Nav { collapsed, json }) => {
            let entries = render_nav(&inputs, collapsed);
            if json {
                println!("{}", serde_json::to_string_pretty(&entries)?);
            } else {
                for entry in &entries {
                    println!("{}", format_nav_line(entry));
                }
            }
            Ok(())
        }
        Some(Command::Search { query }) => {
            println!("{}", search_location(&query)?);
            Ok(())
        }
    }
}

/// The TUI owns the terminal, so its logs go to a file; subcommands log to
/// stderr.
fn init_tracing(to_file: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    if !to_file {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .try_init();
        return;
    }

    let path = atrium_util::default_log_path();
    match open_log_file(&path) {
        Ok(file) => {
            let _ = tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .try_init();
        }
        Err(error) => eprintln!("logging disabled: {error:#}"),
    }
}

fn open_log_file(path: &Path) -> Result<fs::File> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).with_context(|| format!("failed to create {}", parent.display()))?;
    }
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("failed to open {}", path.display()))
}

/// Loads the configuration and applies command-line overrides.
fn build_inputs(cli: &Cli) -> Result<ShellInputs> {
    let mut config = match cli.config.as_deref() {
        Some(path) => ShellConfig::load_from(path).with_context(|| format!("failed to load {}", path.display()))?,
        None => ShellConfig::load(),
    };
    if let Some(path) = cli.modules.as_deref() {
        config = config
            .with_modules_file(path)
            .with_context(|| format!("failed to load modules from {}", path.display()))?;
    }
    if let Some(locale) = &cli.locale {
        config.locale = Some(locale.clone());
    }
    if let Some(dictionary) = &cli.dictionary {
        config.dictionary_path = Some(dictionary.clone());
    }
    if let Some(path) = &cli.path {
        config.initial_path = Some(path.clone());
    }
    debug!(?config, "resolved shell configuration");
    Ok(config.resolve()?)
}

fn render_nav(inputs: &ShellInputs, collapsed: bool) -> Vec<RenderedEntry> {
    render_navigation(
        &inputs.registry,
        &inputs.dictionary,
        &inputs.initial_path,
        RailState { collapsed },
    )
}

fn format_nav_line(entry: &RenderedEntry) -> String {
    let marker = if entry.active { '▌' } else { ' ' };
    if entry.show_label {
        format!("{marker} {} {:<16} {}", entry.icon.glyph(), entry.label, entry.route)
    } else {
        format!("{marker} {}", entry.icon.glyph())
    }
}

fn search_location(words: &[String]) -> Result<String> {
    let query = words.join(" ");
    match search_route(&query) {
        Some(location) => Ok(location),
        None => bail!("search query must not be blank"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn inputs_for(args: &[&str]) -> ShellInputs {
        let cli = Cli::try_parse_from(args).expect("valid arguments");
        build_inputs(&cli).expect("inputs")
    }

    #[test]
    fn search_joins_words_and_rejects_blank_queries() {
        let words = vec!["q3".to_string(), "report".to_string()];
        assert_eq!(search_location(&words).expect("route"), "/fulltext-search?q=q3%20report");
        assert!(search_location(&["   ".to_string()]).is_err());
    }

    #[test]
    fn search_requires_a_query() {
        assert!(Cli::try_parse_from(["atrium", "search"]).is_err());
    }

    #[test]
    fn nav_honors_path_and_modules_file() {
        let dir = tempfile::tempdir().expect("temp dir");
        let config = dir.path().join("shell.json");
        fs::write(&config, r#"{"modules": []}"#).expect("config");
        let modules = dir.path().join("modules.json");
        fs::write(&modules, r#"[{"name": "projects", "enabled": true}]"#).expect("modules");

        let inputs = inputs_for(&[
            "atrium",
            "nav",
            "--config",
            config.to_str().expect("utf-8 path"),
            "--modules",
            modules.to_str().expect("utf-8 path"),
            "--path",
            "/projects/7",
        ]);
        let entries = render_nav(&inputs, false);
        let ids: Vec<_> = entries.iter().map(|entry| entry.id).collect();
        assert_eq!(ids, vec!["dashboard", "projects", "administration"]);

        let lines: Vec<_> = entries.iter().map(format_nav_line).collect();
        assert!(lines[1].starts_with('▌'));
        assert!(lines[0].starts_with(' '));

        let collapsed = render_nav(&inputs, true);
        assert_eq!(format_nav_line(&collapsed[0]), format!("  {}", collapsed[0].icon.glyph()));
    }

    #[test]
    fn explicit_config_must_exist() {
        let cli = Cli::try_parse_from(["atrium", "--config", "/nonexistent/atrium/shell.json"]).expect("valid arguments");
        assert!(build_inputs(&cli).is_err());
    }
}
