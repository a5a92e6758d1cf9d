//! Command-line interface orchestration for the gmwcs solver.
//!
//! `solve` loads a node file and an edge file, preprocesses the graph, and
//! reports the best connected subgraph found; `reduce` stops after
//! preprocessing and reports how much each rule removed.

mod commands;
mod input;

pub use commands::{
    Cli, CliError, Command, EngineArgs, ExecutionSummary, InputArgs, ReduceCommand, SolveCommand,
    SolveReport, render_summary, run_cli,
};
pub use input::{Instance, Labels, load_instance};
