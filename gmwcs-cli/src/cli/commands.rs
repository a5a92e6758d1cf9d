//! Command implementations and argument parsing for the gmwcs CLI.

use std::{
    io::{self, Write},
    path::PathBuf,
};

use clap::{Args, Parser, Subcommand};
use gmwcs_core::{
    DEFAULT_MAX_VERTEX_DEGREE, DEFAULT_SEED, DEFAULT_THREADS, DEFAULT_TRIALS, Element, Gmwcs,
    GmwcsBuilder, GmwcsError, Graph, GraphError, ReductionSummary, Solution,
};
use thiserror::Error;
use tracing::{Span, field, info, instrument};

use super::input::{Labels, load_instance};

/// Top-level CLI options parsed by [`clap`].
#[derive(Debug, Parser, Clone)]
#[command(
    name = "gmwcs",
    about = "Reduce and solve maximum weight connected subgraph instances."
)]
pub struct Cli {
    /// Command to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// Supported CLI commands.
#[derive(Debug, Subcommand, Clone)]
pub enum Command {
    /// Preprocess an instance and report the best connected subgraph found.
    Solve(SolveCommand),
    /// Preprocess an instance and report how far each rule shrank it.
    Reduce(ReduceCommand),
}

/// Input files shared by every command.
#[derive(Debug, Args, Clone)]
pub struct InputArgs {
    /// File with one `name weight` line per node.
    #[arg(long)]
    pub nodes: PathBuf,

    /// File with one `source target weight` line per edge.
    #[arg(long)]
    pub edges: PathBuf,

    /// Make edge weights optional, defaulting to zero.
    #[arg(long)]
    pub unweighted_edges: bool,
}

/// Reduction engine options shared by every command.
#[derive(Debug, Args, Clone)]
pub struct EngineArgs {
    /// Worker threads for the parallel negative edge rule.
    #[arg(long, default_value_t = DEFAULT_THREADS)]
    pub threads: usize,

    /// Largest degree examined by the bounded-degree vertex rule.
    #[arg(long = "max-degree", default_value_t = DEFAULT_MAX_VERTEX_DEGREE)]
    pub max_degree: usize,
}

/// Options accepted by the `solve` command.
#[derive(Debug, Args, Clone)]
pub struct SolveCommand {
    /// Input files.
    #[command(flatten)]
    pub input: InputArgs,

    /// Engine options.
    #[command(flatten)]
    pub engine: EngineArgs,

    /// Spanning trees sampled per component.
    #[arg(long, default_value_t = DEFAULT_TRIALS)]
    pub trials: usize,

    /// Seed of the spanning-tree sampler.
    #[arg(long, default_value_t = DEFAULT_SEED)]
    pub seed: u64,
}

/// Options accepted by the `reduce` command.
#[derive(Debug, Args, Clone)]
pub struct ReduceCommand {
    /// Input files.
    #[command(flatten)]
    pub input: InputArgs,

    /// Engine options.
    #[command(flatten)]
    pub engine: EngineArgs,
}

/// Errors surfaced while executing CLI commands.
#[derive(Debug, Error)]
pub enum CliError {
    /// An input file could not be read.
    #[error("failed to read `{path}`: {source}")]
    Io {
        /// Path that triggered the failure.
        path: PathBuf,
        /// Underlying operating system error.
        #[source]
        source: io::Error,
    },
    /// A line did not have the expected number of tokens.
    #[error("{}:{line}: expected `{expected}`", path.display())]
    MalformedLine {
        /// File containing the line.
        path: PathBuf,
        /// 1-based line number.
        line: usize,
        /// Shape the line should have.
        expected: &'static str,
    },
    /// A weight was not a finite number.
    #[error("{}:{line}: `{value}` is not a finite weight", path.display())]
    InvalidWeight {
        /// File containing the line.
        path: PathBuf,
        /// 1-based line number.
        line: usize,
        /// Offending token.
        value: String,
    },
    /// A node name was declared twice.
    #[error("{}:{line}: node `{name}` was already declared on line {first}", path.display())]
    DuplicateNode {
        /// File containing the line.
        path: PathBuf,
        /// 1-based line number.
        line: usize,
        /// Repeated name.
        name: String,
        /// Line of the first declaration.
        first: usize,
    },
    /// An edge referred to a node that was never declared.
    #[error("{}:{line}: unknown node `{name}`", path.display())]
    UnknownNode {
        /// File containing the line.
        path: PathBuf,
        /// 1-based line number.
        line: usize,
        /// Unknown name.
        name: String,
    },
    /// Building the graph failed.
    #[error(transparent)]
    Graph(#[from] GraphError),
    /// Core configuration or solving failed.
    #[error(transparent)]
    Core(#[from] GmwcsError),
}

/// Summarises the outcome of executing a CLI command.
#[derive(Debug, Clone)]
pub enum ExecutionSummary {
    /// Outcome of `solve`.
    Solved(SolveReport),
    /// Outcome of `reduce`.
    Reduced(ReductionSummary),
}

/// A solution together with what is needed to describe it by name.
#[derive(Debug, Clone)]
pub struct SolveReport {
    /// The instance as it was loaded, before any reduction.
    pub original: Graph,
    /// Node names of the instance.
    pub labels: Labels,
    /// The solution found on the reduced instance.
    pub solution: Solution,
}

/// Executes the CLI command represented by `cli`.
///
/// # Errors
/// Returns [`CliError`] when loading, configuration, or solving fails.
///
/// # Examples
/// ```
/// # use std::error::Error;
/// # use gmwcs_cli::cli::{
/// #     Cli, Command, EngineArgs, ExecutionSummary, InputArgs, SolveCommand, run_cli,
/// # };
/// # use tempfile::TempDir;
/// #
/// # fn main() -> Result<(), Box<dyn Error>> {
/// let dir = TempDir::new()?;
/// let nodes = dir.path().join("nodes.txt");
/// let edges = dir.path().join("edges.txt");
/// std::fs::write(&nodes, "a 3\nb -1\nc 4\n")?;
/// std::fs::write(&edges, "a b 0\nb c 0\n")?;
/// let cli = Cli {
///     command: Command::Solve(SolveCommand {
///         input: InputArgs { nodes, edges, unweighted_edges: false },
///         engine: EngineArgs { threads: 1, max_degree: 4 },
///         trials: 11,
///         seed: 1337,
///     }),
/// };
/// let ExecutionSummary::Solved(report) = run_cli(cli)? else {
///     panic!("solve must produce a solution");
/// };
/// assert_eq!(report.solution.weight(), 6.0);
/// # Ok(())
/// # }
/// ```
#[instrument(name = "cli.run", err, skip(cli), fields(command = field::Empty))]
pub fn run_cli(cli: Cli) -> Result<ExecutionSummary, CliError> {
    match cli.command {
        Command::Solve(solve) => {
            Span::current().record("command", field::display("solve"));
            run_solve(solve).map(ExecutionSummary::Solved)
        }
        Command::Reduce(reduce) => {
            Span::current().record("command", field::display("reduce"));
            run_reduce(reduce).map(ExecutionSummary::Reduced)
        }
    }
}

fn engine(args: &EngineArgs, builder: GmwcsBuilder) -> Result<Gmwcs, CliError> {
    Ok(builder
        .with_threads(args.threads)
        .with_max_vertex_degree(args.max_degree)
        .build()?)
}

#[instrument(
    name = "cli.solve",
    err,
    skip(command),
    fields(threads = command.engine.threads, trials = command.trials, seed = command.seed),
)]
pub(super) fn run_solve(command: SolveCommand) -> Result<SolveReport, CliError> {
    let gmwcs = engine(
        &command.engine,
        GmwcsBuilder::new()
            .with_trials(command.trials)
            .with_seed(command.seed),
    )?;
    let InputArgs {
        nodes,
        edges,
        unweighted_edges,
    } = command.input;
    let (original, labels) = load_instance(&nodes, &edges, unweighted_edges)?.into_parts();
    let mut graph = original.clone();
    let solution = gmwcs.solve(&mut graph)?;
    info!(
        score = solution.weight(),
        selected = solution.provenance().len(),
        "command completed"
    );
    Ok(SolveReport {
        original,
        labels,
        solution,
    })
}

#[instrument(
    name = "cli.reduce",
    err,
    skip(command),
    fields(threads = command.engine.threads, max_degree = command.engine.max_degree),
)]
pub(super) fn run_reduce(command: ReduceCommand) -> Result<ReductionSummary, CliError> {
    let gmwcs = engine(&command.engine, GmwcsBuilder::new())?;
    let InputArgs {
        nodes,
        edges,
        unweighted_edges,
    } = command.input;
    let (mut graph, _) = load_instance(&nodes, &edges, unweighted_edges)?.into_parts();
    let summary = gmwcs.preprocess(&mut graph)?;
    info!(
        nodes = summary.nodes_after(),
        edges = summary.edges_after(),
        "command completed"
    );
    Ok(summary)
}

/// Renders `summary` to `writer` in a human-readable text format.
///
/// Solutions are listed in terms of the loaded instance: every original node
/// and edge that ended up in the selection, with its original weight.
///
/// # Errors
/// Returns [`io::Error`] if writing to the supplied writer fails.
pub fn render_summary(summary: &ExecutionSummary, writer: impl Write) -> io::Result<()> {
    match summary {
        ExecutionSummary::Solved(report) => render_solution(report, writer),
        ExecutionSummary::Reduced(reduction) => render_reduction(reduction, writer),
    }
}

fn render_solution(report: &SolveReport, mut writer: impl Write) -> io::Result<()> {
    let SolveReport {
        original,
        labels,
        solution,
    } = report;
    writeln!(writer, "score: {}", solution.weight())?;
    let nodes: Vec<_> = solution
        .provenance()
        .iter()
        .filter_map(|id| id.as_node())
        .filter_map(|node| original.node(node).map(|record| (node, record.weight())))
        .collect();
    writeln!(writer, "nodes: {}", nodes.len())?;
    for (node, weight) in nodes {
        writeln!(writer, "{}\t{weight}", labels.node(node))?;
    }
    let edges: Vec<_> = solution
        .provenance()
        .iter()
        .filter_map(|id| id.as_edge())
        .filter_map(|edge| original.edge(edge))
        .collect();
    writeln!(writer, "edges: {}", edges.len())?;
    for edge in edges {
        let (source, target) = edge.ends();
        writeln!(
            writer,
            "{}\t{}\t{}",
            labels.node(source),
            labels.node(target),
            edge.weight()
        )?;
    }
    Ok(())
}

fn render_reduction(summary: &ReductionSummary, mut writer: impl Write) -> io::Result<()> {
    writeln!(
        writer,
        "nodes: {} -> {}",
        summary.nodes_before(),
        summary.nodes_after()
    )?;
    writeln!(
        writer,
        "edges: {} -> {}",
        summary.edges_before(),
        summary.edges_after()
    )?;
    writeln!(writer, "passes: {}", summary.passes())?;
    for (rule, changed) in summary.per_rule() {
        writeln!(writer, "{rule}\t{changed}")?;
    }
    Ok(())
}
