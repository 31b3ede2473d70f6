//! Command dispatch: maps parsed arguments onto services

use std::io;
use std::path::Path;

use clap::CommandFactory;
use clap_complete::generate;
use tracing::{debug, instrument};

use crate::application::services::parse_numbers;
use crate::cli::args::{Cli, Commands, ConfigCommands};
use crate::cli::error::{CliError, CliResult};
use crate::cli::output;
use crate::config::{global_config_path, local_config_path, Settings};
use crate::domain::{self, Literal, SnailfishNumber, TreeConvert};
use crate::infrastructure::{InfraError, ServiceContainer};

/// Execute the parsed command line.
pub fn execute(cli: &Cli) -> CliResult<()> {
    let Some(command) = &cli.command else {
        return Err(CliError::Usage(
            "no command given, see --help".to_string(),
        ));
    };

    // completions must work even with a broken config
    if let Commands::Completion { shell } = command {
        let mut cmd = Cli::command();
        let name = cmd.get_name().to_string();
        generate(*shell, &mut cmd, name, &mut io::stdout());
        return Ok(());
    }

    let settings = Settings::load(cli.config.as_deref())?;
    debug!("settings: {:?}", settings);
    let container = ServiceContainer::new(settings);

    match command {
        Commands::Solve { file } => cmd_solve(&container, file.as_deref()),
        Commands::Sum { file } => cmd_sum(&container, file.as_deref()),
        Commands::Largest { file } => cmd_largest(&container, file.as_deref()),
        Commands::Reduce { literal } => cmd_reduce(&container, literal),
        Commands::Add { literals } => cmd_add(&container, literals),
        Commands::Magnitude { literal } => cmd_magnitude(literal),
        Commands::Tree { literal } => cmd_tree(literal),
        Commands::Config { command } => cmd_config(&container, command, cli.config.as_deref()),
        Commands::Completion { .. } => Ok(()),
    }
}

/// Read homework from a file, or from stdin when no file (or `-`) is given.
fn read_homework(container: &ServiceContainer, file: Option<&Path>) -> CliResult<Vec<Literal>> {
    match file {
        Some(path) if path != Path::new("-") => Ok(container.homework.load(path)?),
        _ => {
            let content = container
                .stdin
                .read_all()
                .map_err(|e| InfraError::io("read stdin", e))?;
            Ok(parse_numbers(&content)?)
        }
    }
}

fn parse_number(literal: &str) -> CliResult<SnailfishNumber> {
    Ok(literal.parse::<SnailfishNumber>()?)
}

#[instrument(skip(container))]
fn cmd_solve(container: &ServiceContainer, file: Option<&Path>) -> CliResult<()> {
    let literals = read_homework(container, file)?;
    let homework = container.homework.solve(&literals)?;
    output::info(&homework.sum.magnitude);
    output::info(&homework.largest.magnitude);
    Ok(())
}

#[instrument(skip(container))]
fn cmd_sum(container: &ServiceContainer, file: Option<&Path>) -> CliResult<()> {
    let literals = read_homework(container, file)?;
    let report = container.homework.final_sum(&literals)?;
    output::header(&format!("Sum of {} numbers", report.count));
    output::detail(&report.number);
    output::action("magnitude", &report.magnitude);
    output::action("reductions", &report.reductions);
    Ok(())
}

#[instrument(skip(container))]
fn cmd_largest(container: &ServiceContainer, file: Option<&Path>) -> CliResult<()> {
    let literals = read_homework(container, file)?;
    let report = container.homework.largest_pair(&literals)?;
    output::header("Largest pair");
    output::detail(&format!("#{}: {}", report.left + 1, literals[report.left]));
    output::detail(&format!("#{}: {}", report.right + 1, literals[report.right]));
    output::action("magnitude", &report.magnitude);
    Ok(())
}

#[instrument(skip(container))]
fn cmd_reduce(container: &ServiceContainer, literal: &str) -> CliResult<()> {
    let mut number = parse_number(literal)?;
    let report = number.reduce(container.homework.limits())?;
    debug!("reduced with {}", report);
    output::info(&number);
    Ok(())
}

#[instrument(skip(container))]
fn cmd_add(container: &ServiceContainer, literals: &[String]) -> CliResult<()> {
    let numbers = literals
        .iter()
        .map(|literal| parse_number(literal))
        .collect::<CliResult<Vec<_>>>()?;
    let (total, report) = domain::sum(numbers, container.homework.limits())?
        .ok_or_else(|| CliError::InvalidArgs("nothing to add".to_string()))?;
    debug!("added with {}", report);
    output::info(&total);
    Ok(())
}

#[instrument]
fn cmd_magnitude(literal: &str) -> CliResult<()> {
    output::info(&parse_number(literal)?.magnitude()?);
    Ok(())
}

#[instrument]
fn cmd_tree(literal: &str) -> CliResult<()> {
    output::info(&parse_number(literal)?.to_tree_string());
    Ok(())
}

fn cmd_config(
    container: &ServiceContainer,
    command: &ConfigCommands,
    explicit: Option<&Path>,
) -> CliResult<()> {
    match command {
        ConfigCommands::Show => output::info(&container.settings.to_toml()?),
        ConfigCommands::Path => {
            let global = global_config_path()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|| "(no config directory)".to_string());
            let local = explicit
                .map(Path::to_path_buf)
                .unwrap_or_else(|| local_config_path(Path::new(".")));
            output::action("global", &global);
            output::action("local", &local.display());
        }
    }
    Ok(())
}
