//! Command dispatch

use std::io::{self, Write};
use std::path::Path;

use clap::CommandFactory;
use clap_complete::generate;
use serde::Serialize;
use tracing::{debug, instrument};

use crate::application::services::{Chart, RenderedNode};
use crate::cli::args::{split_node_path, Cli, Commands, ConfigCommands};
use crate::cli::error::{CliError, CliResult};
use crate::cli::output;
use crate::config::{global_config_path, Settings};
use crate::domain::{TransitionPlan, ViewDomain};
use crate::infrastructure::di::ServiceContainer;
use crate::infrastructure::InfraError;
use crate::tree_traits::TreeNodeConvert;

#[derive(Serialize)]
struct LayoutReport {
    focus: String,
    domain: ViewDomain,
    nodes: Vec<RenderedNode>,
}

#[derive(Serialize)]
struct FocusReport {
    focus: String,
    plan: TransitionPlan,
    frames: Vec<ViewDomain>,
}

pub fn execute_command(cli: &Cli) -> CliResult<()> {
    let Some(command) = &cli.command else {
        return Ok(());
    };
    if let Commands::Completion { shell } = command {
        let mut cmd = Cli::command();
        let name = cmd.get_name().to_string();
        generate(*shell, &mut cmd, name, &mut io::stdout());
        return Ok(());
    }

    let settings = Settings::load(cli.config.as_deref())?;
    let container = ServiceContainer::new(settings);

    match command {
        Commands::Tree { file } => cmd_tree(&container, file),
        Commands::Layout { file, focus } => cmd_layout(&container, file, focus.as_deref()),
        Commands::Focus { file, path, frames } => cmd_focus(&container, file, path, *frames),
        Commands::Config { command } => cmd_config(&container, command),
        Commands::Completion { .. } => Ok(()),
    }
}

fn load_chart(container: &ServiceContainer, file: &Path) -> CliResult<Chart> {
    Ok(container.chart_service().load(file)?)
}

fn focus_label(chart: &Chart) -> String {
    chart
        .focused()
        .map(|idx| chart.tree().path_names(idx).join("/"))
        .unwrap_or_default()
}

/// Parse a `a/b/c` node path; at least one name is required.
fn node_path(path: &str) -> CliResult<Vec<&str>> {
    let names = split_node_path(path);
    if names.is_empty() {
        return Err(CliError::InvalidArgs(format!("empty node path '{path}'")));
    }
    Ok(names)
}

fn format_report<T: Serialize>(report: &T) -> CliResult<String> {
    toml::to_string_pretty(report)
        .map_err(|e| CliError::Internal(format!("cannot format output: {e}")))
}

/// Write a report to stdout as TOML.
fn emit<T: Serialize>(report: &T) -> CliResult<()> {
    let text = format_report(report)?;
    let mut stdout = io::stdout().lock();
    stdout
        .write_all(text.as_bytes())
        .and_then(|_| stdout.flush())
        .map_err(|e| InfraError::io("write report", e))?;
    Ok(())
}

#[instrument(skip(container))]
fn cmd_tree(container: &ServiceContainer, file: &Path) -> CliResult<()> {
    let chart = load_chart(container, file)?;
    output::info(&chart.tree().to_tree_string());
    Ok(())
}

#[instrument(skip(container))]
fn cmd_layout(container: &ServiceContainer, file: &Path, focus: Option<&str>) -> CliResult<()> {
    let mut chart = load_chart(container, file)?;
    if let Some(path) = focus {
        chart.select_path(&node_path(path)?)?;
    }
    let report = LayoutReport {
        focus: focus_label(&chart),
        domain: chart.domain(),
        nodes: chart.render_current(),
    };
    debug!("rendering {} nodes", report.nodes.len());
    emit(&report)
}

#[instrument(skip(container))]
fn cmd_focus(container: &ServiceContainer, file: &Path, path: &str, frames: usize) -> CliResult<()> {
    let mut chart = load_chart(container, file)?;
    let plan = chart.select_path(&node_path(path)?)?;
    let report = FocusReport {
        focus: focus_label(&chart),
        plan,
        frames: plan.sample(frames),
    };
    emit(&report)
}

fn cmd_config(container: &ServiceContainer, command: &ConfigCommands) -> CliResult<()> {
    match command {
        ConfigCommands::Show => output::info(&container.settings.to_toml()?),
        ConfigCommands::Template => output::info(&Settings::template()),
        ConfigCommands::Path => match global_config_path() {
            Some(path) => {
                output::header("Global config");
                output::info(&path.display());
            }
            None => {
                return Err(CliError::Usage(
                    "cannot determine config directory".to_string(),
                ))
            }
        },
    }
    Ok(())
}
