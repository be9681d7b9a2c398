//! Command execution logic.

use anyhow::{Result, bail};
use std::io::{self, Write};

use super::Cli;
use crate::config::Settings;
use crate::graph::{DependencyGraph, build_graph};
use crate::render::{
    self, ArtifactReport, GraphView, Graphviz, OutputConfig, OutputMode, ReverseLookupView,
};
use crate::source::{WorkingMode, create_source};

/// Build the graph described by `cli` and produce the requested outputs.
pub async fn execute(cli: &Cli) -> Result<()> {
    let current_dir = std::env::current_dir()?;
    let settings = Settings::discover(cli.config.as_deref(), &current_dir).await?;

    let mode = cli.mode.map_or(settings.mode, WorkingMode::from);
    let max_depth = cli.max_depth.or(settings.max_depth);
    let repository = match (cli.repository.as_deref(), mode) {
        (Some(repository), _) => repository,
        (None, WorkingMode::Real) => settings.repository_or_default(),
        (None, WorkingMode::Test) => match settings.repository.as_deref() {
            Some(repository) => repository,
            None => bail!("test mode requires --repository <FIXTURE FILE>"),
        },
    };

    tracing::info!(
        package = %cli.package,
        version = %cli.package_version,
        mode = %mode,
        repository,
        max_depth = ?max_depth,
        "Starting analysis"
    );

    let source = create_source(mode, repository, &settings.default_version);
    let graph = build_graph(
        &cli.package,
        &cli.package_version,
        max_depth,
        source.as_ref(),
    )
    .await?;

    let output_mode = if cli.json {
        OutputMode::Json
    } else {
        OutputMode::Text
    };
    let mut config = OutputConfig::from_env();
    config.use_ascii |= cli.ascii;

    match output_mode {
        OutputMode::Json => print_json(cli, &graph)?,
        OutputMode::Text => print_text(cli, &graph, &config)?,
    }

    if let Some(output) = &cli.output {
        let graphviz = Graphviz::new(settings.graphviz_command.as_str());
        let report = render::write_artifacts(&graph, output, &graphviz).await;
        if output_mode == OutputMode::Json {
            print_report(&mut io::stderr().lock(), &report, &config)?;
        } else {
            print_report(&mut io::stdout().lock(), &report, &config)?;
        }
    }

    Ok(())
}

fn print_json(cli: &Cli, graph: &DependencyGraph) -> io::Result<()> {
    match &cli.reverse {
        Some(fragment) => {
            let lookup = graph.find_dependents(fragment);
            render::print_json(&ReverseLookupView::new(graph, fragment, lookup.as_ref()))
        }
        None => render::print_json(&GraphView::new(graph)),
    }
}

fn print_text(cli: &Cli, graph: &DependencyGraph, config: &OutputConfig) -> io::Result<()> {
    let stdout = io::stdout();
    let mut handle = stdout.lock();

    if cli.tree {
        render::write_tree(&mut handle, graph, config)?;
    }

    if let Some(fragment) = &cli.reverse {
        if cli.tree {
            writeln!(handle)?;
        }
        match graph.find_dependents(fragment) {
            Some(lookup) => render::write_dependents(&mut handle, graph, &lookup, config)?,
            None => writeln!(
                handle,
                "{}",
                render::warning(&format!("No package matching '{fragment}' in the graph"), config)
            )?,
        }
    }

    if !cli.tree && cli.reverse.is_none() && cli.output.is_none() {
        render::write_summary(&mut handle, graph, config)?;
    }

    Ok(())
}

/// Report each artifact; failures are shown but never abort the run.
fn print_report<W: Write>(
    w: &mut W,
    report: &ArtifactReport,
    config: &OutputConfig,
) -> io::Result<()> {
    let results = [
        ("DOT file", &report.paths.dot, &report.dot),
        ("Mermaid file", &report.paths.mermaid, &report.mermaid),
        ("Image", &report.paths.image, &report.image),
    ];

    for (what, path, result) in results {
        match result {
            Ok(()) => writeln!(
                w,
                "{} {what}: {}",
                render::success("Wrote", config),
                path.display()
            )?,
            Err(e) => {
                tracing::warn!(artifact = what, error = %e, "Render failed");
                writeln!(
                    w,
                    "{} {what} {}: {e}",
                    render::error("Failed", config),
                    path.display()
                )?;
            }
        }
    }

    Ok(())
}
