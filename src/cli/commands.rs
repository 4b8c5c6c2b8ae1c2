use std::io;
use std::path::Path;

use clap::CommandFactory;
use clap_complete::generate;
use tracing::{debug, instrument};

use crate::arena::Tree;
use crate::cli::args::{Cli, Commands, ConfigCommands};
use crate::cli::error::{CliError, CliResult};
use crate::cli::output;
use crate::codec::{deserialize, serialize};
use crate::compare::trees_equal;
use crate::config::{global_config_path, parse_fill, Settings};
use crate::exitcode;
use crate::render::render_with;
use crate::tree_traits::TreeNodeConvert;

/// Runs the selected subcommand and returns the process exit code.
pub fn execute_command(cli: &Cli) -> CliResult<i32> {
    match &cli.command {
        Some(Commands::Build {
            values,
            parents,
            output,
        }) => _build(cli, values, parents, output.as_deref()),
        Some(Commands::Render { file }) => _render(cli, file),
        Some(Commands::Outline { file }) => _outline(file),
        Some(Commands::Compare { left, right }) => _compare(left, right),
        Some(Commands::Config { command }) => _config(cli, command),
        Some(Commands::Completion { shell }) => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            generate(*shell, &mut cmd, name, &mut io::stdout());
            Ok(exitcode::OK)
        }
        None => Ok(exitcode::OK),
    }
}

/// Config file and env vars, then the `--fill` flag on top.
fn settings(cli: &Cli) -> CliResult<Settings> {
    let mut settings = Settings::load()?;
    if let Some(fill) = &cli.fill {
        settings.render.fill = parse_fill(fill)?;
    }
    debug!(?settings, "effective settings");
    Ok(settings)
}

fn print_diagram(tree: &Tree<String>, settings: &Settings) {
    if !tree.is_empty() {
        output::info(&render_with(tree, &settings.render));
    }
}

#[instrument(skip(cli))]
fn _build(cli: &Cli, values: &[String], parents: &[i64], out: Option<&Path>) -> CliResult<i32> {
    let settings = settings(cli)?;
    let tree = Tree::from_parent_indices(values.to_vec(), parents)?;
    print_diagram(&tree, &settings);
    if let Some(path) = out {
        serialize(&tree, path)?;
        output::action("Wrote", &path.display());
    }
    Ok(exitcode::OK)
}

#[instrument(skip(cli))]
fn _render(cli: &Cli, file: &Path) -> CliResult<i32> {
    let settings = settings(cli)?;
    let tree: Tree<String> = deserialize(file)?;
    print_diagram(&tree, &settings);
    Ok(exitcode::OK)
}

#[instrument]
fn _outline(file: &Path) -> CliResult<i32> {
    let tree: Tree<String> = deserialize(file)?;
    output::info(&tree.to_tree_string());
    Ok(exitcode::OK)
}

#[instrument]
fn _compare(left: &Path, right: &Path) -> CliResult<i32> {
    let lhs: Tree<String> = deserialize(left)?;
    let rhs: Tree<String> = deserialize(right)?;
    if trees_equal(&lhs, &rhs) {
        output::success("trees are equal");
        Ok(exitcode::OK)
    } else {
        output::failure("trees differ");
        Ok(exitcode::DIFFERENT)
    }
}

#[instrument(skip(cli))]
fn _config(cli: &Cli, command: &ConfigCommands) -> CliResult<i32> {
    match command {
        ConfigCommands::Show => output::info(&settings(cli)?.to_toml()?),
        ConfigCommands::Path => match global_config_path() {
            Some(path) => output::info(&path.display()),
            None => return Err(CliError::Usage("no home directory for config".into())),
        },
        ConfigCommands::Init => {
            let path = global_config_path()
                .ok_or_else(|| CliError::Usage("no home directory for config".into()))?;
            if path.exists() {
                return Err(CliError::Usage(format!(
                    "config already exists: {}",
                    path.display()
                )));
            }
            if let Some(dir) = path.parent() {
                std::fs::create_dir_all(dir)
                    .map_err(|e| CliError::io(format!("create {}", dir.display()), e))?;
            }
            std::fs::write(&path, Settings::template())
                .map_err(|e| CliError::io(format!("write {}", path.display()), e))?;
            output::action("Created", &path.display());
        }
    }
    Ok(exitcode::OK)
}
