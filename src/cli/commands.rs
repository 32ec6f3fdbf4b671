//! Command dispatch
//!
//! The process environment is read once here and everything below works on
//! that snapshot.

use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use clap::CommandFactory;
use itertools::Itertools;
use tracing::{debug, instrument};

use crate::application::format::{parse_camel, render_camel, render_exports, render_sections};
use crate::application::{InputFormat, IoResultExt, OutputFormat};
use crate::cli::args::{CaseTarget, Cli, Commands, ConfigCommands};
use crate::cli::output;
use crate::cli::{CliError, CliResult};
use crate::config::{global_config_path, local_config_path, Settings};
use crate::domain::{to_camel_case, to_constant_case};
use crate::infrastructure::di::ServiceContainer;
use crate::infrastructure::traits::{EnvSource, ProcessEnv, RealFileSystem, StaticEnv};
use crate::infrastructure::InfraError;

/// Entry point used by `main`.
pub fn execute_command(cli: &Cli) -> CliResult<()> {
    if let Commands::Completion { shell } = &cli.command {
        let mut cmd = Cli::command();
        let name = cmd.get_name().to_string();
        clap_complete::generate(*shell, &mut cmd, name, &mut io::stdout());
        return Ok(());
    }

    let project_dir = match &cli.project_dir {
        Some(dir) => dir.clone(),
        None => std::env::current_dir().map_err(|e| InfraError::io("current directory", e))?,
    };

    let snapshot = ProcessEnv.vars();
    let settings = Settings::load(Some(&project_dir), &snapshot)?;
    let container = ServiceContainer::with_deps(
        settings,
        Arc::new(RealFileSystem),
        Arc::new(StaticEnv::new(snapshot)),
    );

    let out = run(&cli.command, &container, &project_dir)?;
    output::data(&out);
    Ok(())
}

/// Run a command against a wired container and return what goes to stdout.
#[instrument(level = "debug", skip(container))]
pub fn run(command: &Commands, container: &ServiceContainer, project_dir: &Path) -> CliResult<String> {
    match command {
        Commands::Import { scopes, format } => _import(container, scopes, *format),
        Commands::Export { scopes, file } => _export(container, scopes, file.as_deref()),
        Commands::Of { labels, format } => _of(container, labels, *format),
        Commands::Prefix { scopes } => _prefix(container, scopes),
        Commands::Case { to, words } => Ok(_case(*to, words)),
        Commands::Check { keys } => _check(container, keys),
        Commands::Config { command } => _config(container, command, project_dir),
        Commands::Completion { .. } => Err(CliError::Usage(
            "completion is handled before dispatch".to_string(),
        )),
    }
}

/// Explicit labels win, otherwise the configured default scope.
fn labels_or_default<'a>(container: &'a ServiceContainer, scopes: &'a [String]) -> &'a [String] {
    if scopes.is_empty() {
        &container.settings.scope
    } else {
        scopes
    }
}

fn _import(
    container: &ServiceContainer,
    scopes: &[String],
    format: Option<OutputFormat>,
) -> CliResult<String> {
    let labels = labels_or_default(container, scopes);
    debug!("import: labels={:?}", labels);
    let camel = container.namespace_service().import(labels);
    let format = format.unwrap_or(container.settings.format);
    Ok(render_camel(&camel, format)?)
}

fn _export(
    container: &ServiceContainer,
    scopes: &[String],
    file: Option<&Path>,
) -> CliResult<String> {
    let labels = labels_or_default(container, scopes);
    let (content, input_format) = match file {
        Some(path) => {
            let content = container
                .fs
                .read_to_string(path)
                .with_path_context("read config", path)?;
            (content, InputFormat::from_path(path))
        }
        None => {
            let mut content = String::new();
            io::stdin()
                .read_to_string(&mut content)
                .map_err(|e| InfraError::io("read stdin", e))?;
            (content, InputFormat::Toml)
        }
    };
    let camel = parse_camel(&content, input_format)?;
    let flat = container.namespace_service().export(labels, &camel);
    Ok(render_exports(&flat))
}

fn _of(
    container: &ServiceContainer,
    labels: &[String],
    format: Option<OutputFormat>,
) -> CliResult<String> {
    let sections = container.namespace_service().of(labels);
    let format = format.unwrap_or(container.settings.format);
    Ok(render_sections(&sections, format)?)
}

fn _prefix(container: &ServiceContainer, scopes: &[String]) -> CliResult<String> {
    let scope = container
        .namespace_service()
        .scope(labels_or_default(container, scopes));
    Ok(format!("{}\n", scope.prefix()))
}

fn _case(to: CaseTarget, words: &[String]) -> String {
    let convert = match to {
        CaseTarget::Camel => to_camel_case,
        CaseTarget::Constant => to_constant_case,
    };
    words.iter().map(|w| convert(w)).map(|w| w + "\n").collect()
}

fn _check(container: &ServiceContainer, keys: &[String]) -> CliResult<String> {
    let policy = container.key_policy();
    let (accepted, rejected): (Vec<&String>, Vec<&String>) =
        keys.iter().partition(|key| policy.accepts(key));

    for key in &accepted {
        output::success_detail(key);
    }
    for key in &rejected {
        output::failure(key);
    }

    if rejected.is_empty() {
        Ok(String::new())
    } else {
        Err(CliError::Rejected(format!(
            "{} key(s) would be dropped: {}",
            rejected.len(),
            rejected.iter().join(", ")
        )))
    }
}

fn _config(
    container: &ServiceContainer,
    command: &ConfigCommands,
    project_dir: &Path,
) -> CliResult<String> {
    match command {
        ConfigCommands::Show => Ok(container.settings.to_toml()?),
        ConfigCommands::Path => {
            let global = global_config_path();
            let local = local_config_path(project_dir);
            let describe = |path: &Path| {
                let state = if container.fs.exists(path) {
                    "exists"
                } else {
                    "missing"
                };
                format!("{} ({})", path.display(), state)
            };
            let global_line = global
                .as_deref()
                .map(describe)
                .unwrap_or_else(|| "unavailable".to_string());
            Ok(format!(
                "global: {}\nlocal:  {}\n",
                global_line,
                describe(&local)
            ))
        }
        ConfigCommands::Init { global } => {
            let path: PathBuf = if *global {
                global_config_path().ok_or_else(|| {
                    CliError::Usage("cannot determine global config directory".to_string())
                })?
            } else {
                local_config_path(project_dir)
            };
            if container.fs.exists(&path) {
                return Err(CliError::Usage(format!(
                    "config already exists: {}",
                    path.display()
                )));
            }
            container
                .fs
                .write(&path, &Settings::template())
                .with_path_context("write config", &path)?;
            output::action("Created", &path.display());
            Ok(String::new())
        }
    }
}
