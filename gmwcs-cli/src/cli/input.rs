//! Line-based readers for node and edge weight files.
//!
//! Node files hold `name weight` lines and edge files hold
//! `source target weight` lines. Tokens are whitespace separated, blank lines
//! are skipped, and lines starting with `#` are comments.

use std::{
    collections::HashMap,
    fs::File,
    io::{BufRead, BufReader},
    path::{Path, PathBuf},
};

use gmwcs_core::{Graph, NodeId};
use tracing::{Span, debug, field, instrument};

use super::commands::CliError;

/// A graph together with the names its nodes were declared under.
#[derive(Debug, Clone)]
pub struct Instance {
    graph: Graph,
    names: Vec<String>,
}

impl Instance {
    /// Returns the loaded graph.
    #[must_use]
    #[rustfmt::skip]
    pub fn graph(&self) -> &Graph { &self.graph }

    /// Splits the instance into its graph and its node names.
    #[must_use]
    pub fn into_parts(self) -> (Graph, Labels) {
        (self.graph, Labels { names: self.names })
    }
}

/// Node names indexed by node identifier.
#[derive(Debug, Clone, Default)]
pub struct Labels {
    names: Vec<String>,
}

impl Labels {
    /// Returns the declared name of `node`, or `?` for unknown identifiers.
    #[must_use]
    pub fn node(&self, node: NodeId) -> &str {
        self.names.get(node.index()).map_or("?", String::as_str)
    }
}

/// Loads an instance from a node file and an edge file.
///
/// # Errors
/// Returns [`CliError::Io`] when a file cannot be read and the parse variants
/// of [`CliError`] for malformed lines.
#[instrument(
    name = "cli.load_instance",
    err,
    skip(nodes, edges),
    fields(
        node_file = %nodes.display(),
        edge_file = %edges.display(),
        node_count = field::Empty,
        edge_count = field::Empty,
    ),
)]
pub fn load_instance(
    nodes: &Path,
    edges: &Path,
    unweighted_edges: bool,
) -> Result<Instance, CliError> {
    let mut instance = read_nodes(open(nodes)?, nodes)?;
    read_edges(&mut instance, open(edges)?, edges, unweighted_edges)?;
    let span = Span::current();
    span.record("node_count", instance.graph.node_count());
    span.record("edge_count", instance.graph.edge_count());
    Ok(instance)
}

fn open(path: &Path) -> Result<BufReader<File>, CliError> {
    let file = File::open(path).map_err(|source| CliError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(BufReader::new(file))
}

/// Yields the 1-based number and tokens of every meaningful line.
fn records(
    reader: impl BufRead,
    path: &Path,
) -> impl Iterator<Item = Result<(usize, Vec<String>), CliError>> {
    let path = path.to_path_buf();
    reader
        .lines()
        .enumerate()
        .filter_map(move |(index, line)| match line {
            Err(source) => Some(Err(CliError::Io {
                path: path.clone(),
                source,
            })),
            Ok(text) => {
                let trimmed = text.trim();
                if trimmed.is_empty() || trimmed.starts_with('#') {
                    return None;
                }
                let tokens = trimmed.split_whitespace().map(ToOwned::to_owned).collect();
                Some(Ok((index + 1, tokens)))
            }
        })
}

fn parse_weight(raw: &str, path: &Path, line: usize) -> Result<f64, CliError> {
    raw.parse::<f64>()
        .ok()
        .filter(|weight| weight.is_finite())
        .ok_or_else(|| CliError::InvalidWeight {
            path: path.to_path_buf(),
            line,
            value: raw.to_owned(),
        })
}

fn malformed(path: &Path, line: usize, expected: &'static str) -> CliError {
    CliError::MalformedLine {
        path: path.to_path_buf(),
        line,
        expected,
    }
}

/// Reads `name weight` lines into a fresh instance.
pub(super) fn read_nodes(reader: impl BufRead, path: &Path) -> Result<Instance, CliError> {
    let mut graph = Graph::new();
    let mut names = Vec::new();
    let mut seen: HashMap<String, usize> = HashMap::new();
    for record in records(reader, path) {
        let (line, tokens) = record?;
        let [name, weight] = tokens.as_slice() else {
            return Err(malformed(path, line, "name weight"));
        };
        let weight = parse_weight(weight, path, line)?;
        if let Some(&first) = seen.get(name) {
            return Err(CliError::DuplicateNode {
                path: path.to_path_buf(),
                line,
                name: name.clone(),
                first,
            });
        }
        seen.insert(name.clone(), line);
        graph.add_node(weight);
        names.push(name.clone());
    }
    debug!(path = %path.display(), nodes = names.len(), "node file read");
    Ok(Instance { graph, names })
}

/// Reads `source target weight` lines into `instance`. With
/// `unweighted_edges` the weight is optional and defaults to zero.
pub(super) fn read_edges(
    instance: &mut Instance,
    reader: impl BufRead,
    path: &Path,
    unweighted_edges: bool,
) -> Result<(), CliError> {
    let ids: HashMap<&str, NodeId> = instance
        .names
        .iter()
        .enumerate()
        .map(|(index, name)| (name.as_str(), NodeId::new(index)))
        .collect();
    let lookup = |name: &str, line: usize| {
        ids.get(name).copied().ok_or_else(|| CliError::UnknownNode {
            path: PathBuf::from(path),
            line,
            name: name.to_owned(),
        })
    };

    let mut links = Vec::new();
    for record in records(reader, path) {
        let (line, tokens) = record?;
        let (source, target, weight) = match tokens.as_slice() {
            [source, target, weight] => (source, target, parse_weight(weight, path, line)?),
            [source, target] if unweighted_edges => (source, target, 0.0),
            _ if unweighted_edges => return Err(malformed(path, line, "source target [weight]")),
            _ => return Err(malformed(path, line, "source target weight")),
        };
        links.push((
            lookup(source.as_str(), line)?,
            lookup(target.as_str(), line)?,
            weight,
        ));
    }
    for (source, target, weight) in links {
        instance.graph.add_edge(source, target, weight)?;
    }
    debug!(path = %path.display(), edges = instance.graph.edge_count(), "edge file read");
    Ok(())
}
