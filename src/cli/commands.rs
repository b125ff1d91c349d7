//! Command execution

use std::io;
use std::path::{Path, PathBuf};

use clap::CommandFactory;
use tracing::{debug, instrument};

use crate::application::format::OutputFormat;
use crate::cli::args::{Cli, Commands, ConfigCommands};
use crate::cli::output;
use crate::cli::{CliError, CliResult};
use crate::config::{global_config_path, local_config_path, Settings};
use crate::domain::{DataType, DomainError};
use crate::infrastructure::traits::{FileSystem, RealFileSystem};
use crate::infrastructure::{InfraError, ServiceContainer};
use crate::util::path::expand_env_vars;

pub fn execute_command(cli: &Cli) -> CliResult<()> {
    match &cli.command {
        Some(Commands::Render {
            file,
            format,
            width,
            no_color,
        }) => cmd_render(cli, file, *format, *width, *no_color),
        Some(Commands::Tags { tags }) => cmd_tags(tags),
        Some(Commands::Config { command }) => cmd_config(cli, command),
        Some(Commands::Completion { shell }) => {
            cmd_completion(*shell);
            Ok(())
        }
        None => Err(CliError::Usage(
            "no command given, run with --help for usage".to_string(),
        )),
    }
}

fn config_dir(cli: &Cli) -> CliResult<PathBuf> {
    match &cli.config_dir {
        Some(dir) => Ok(PathBuf::from(expand_env_vars(&dir.to_string_lossy()))),
        None => std::env::current_dir()
            .map_err(|e| CliError::Infra(InfraError::io("get current directory", e))),
    }
}

fn load_settings(cli: &Cli) -> CliResult<Settings> {
    let dir = config_dir(cli)?;
    Ok(Settings::load(Some(dir.as_path()))?)
}

#[instrument(skip(cli))]
fn cmd_render(
    cli: &Cli,
    file: &Path,
    format: Option<OutputFormat>,
    width: Option<usize>,
    no_color: bool,
) -> CliResult<()> {
    let mut settings = load_settings(cli)?;
    if let Some(width) = width {
        if width == 0 {
            return Err(CliError::InvalidArgs("--width must be positive".to_string()));
        }
        settings.width = width;
    }
    if no_color {
        settings.color = false;
    }
    let container = ServiceContainer::new(settings);
    let format = format.unwrap_or(container.settings.format);
    debug!(
        "cmd_render: format={} width={}",
        format, container.settings.width
    );

    let node = if Cli::is_stdin(file) {
        let content = io::read_to_string(io::stdin())
            .map_err(|e| CliError::Infra(InfraError::io("read stdin", e)))?;
        container.render.parse_document(&content, "<stdin>")?
    } else {
        let path = PathBuf::from(expand_env_vars(&file.to_string_lossy()));
        container.render.load(&path)?
    };

    let view = container.render.render_node(&node)?;
    let rendered = container.render.format(&view, format)?;
    if !rendered.is_empty() {
        output::info(&rendered);
    }
    Ok(())
}

fn cmd_tags(filter: &[String]) -> CliResult<()> {
    let tags = select_tags(filter)?;
    output::header("Recognized data types");
    for tag in tags {
        output::detail(&format!("{:<36} {}", tag, tag.view()));
    }
    Ok(())
}

/// Resolve the requested tags, or all of them in priority order when none
/// are given. Any unknown tag fails the whole selection.
pub fn select_tags(filter: &[String]) -> Result<Vec<DataType>, DomainError> {
    if filter.is_empty() {
        return Ok(DataType::ALL.to_vec());
    }
    filter.iter().map(|raw| raw.trim().parse()).collect()
}

fn cmd_config(cli: &Cli, command: &ConfigCommands) -> CliResult<()> {
    match command {
        ConfigCommands::Show => {
            let settings = load_settings(cli)?;
            output::info(&settings.to_toml()?);
            Ok(())
        }
        ConfigCommands::Path => {
            let dir = config_dir(cli)?;
            output::header("Config files");
            let global = global_config_path();
            let local = Some(local_config_path(&dir));
            for (label, path) in [("global", global), ("local", local)] {
                match path {
                    Some(p) if p.exists() => {
                        output::success_detail(&format!("{label}: {}", p.display()))
                    }
                    Some(p) => output::failure(&format!("{label}: {} (not found)", p.display())),
                    None => output::failure(&format!("{label}: no config directory available")),
                }
            }
            Ok(())
        }
        ConfigCommands::Init { local, force } => {
            let target = if *local {
                local_config_path(&config_dir(cli)?)
            } else {
                global_config_path().ok_or_else(|| {
                    CliError::Usage("cannot determine global config directory".to_string())
                })?
            };
            init_config(&RealFileSystem, &target, *force)?;
            output::action("Created", &target.display());
            Ok(())
        }
    }
}

/// Write the config template to `target`, refusing to overwrite unless forced.
pub fn init_config(fs: &dyn FileSystem, target: &Path, force: bool) -> CliResult<()> {
    if fs.exists(target) && !force {
        return Err(CliError::Usage(format!(
            "config already exists: {} (use --force to overwrite)",
            target.display()
        )));
    }
    fs.ensure_parent(target)
        .map_err(|e| InfraError::io(format!("create parent of {}", target.display()), e))?;
    fs.write(target, &Settings::template())
        .map_err(|e| InfraError::io(format!("write {}", target.display()), e))?;
    Ok(())
}

fn cmd_completion(shell: clap_complete::Shell) {
    let mut cmd = Cli::command();
    clap_complete::generate(shell, &mut cmd, "aidtree", &mut io::stdout());
}
