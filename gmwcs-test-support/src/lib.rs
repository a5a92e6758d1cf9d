//! Shared test utilities used across gmwcs crates.

pub mod fixtures {
    //! Small graph builders for hand-written scenarios.
    use gmwcs_core::{EdgeId, Graph, NodeId};

    /// Builds a path `n0 - e0 - n1 - e1 - ...` from node and edge weights.
    ///
    /// # Panics
    /// Panics when `edges` is not exactly one shorter than `nodes`.
    ///
    /// # Examples
    /// ```
    /// use gmwcs_test_support::fixtures::path;
    ///
    /// let (graph, nodes, edges) = path(&[-1.0, 2.0, 5.0], &[0.5, 1.0]);
    /// assert_eq!(graph.node_count(), 3);
    /// assert_eq!(graph.endpoints(edges[1]), Some((nodes[1], nodes[2])));
    /// ```
    #[must_use]
    pub fn path(nodes: &[f64], edges: &[f64]) -> (Graph, Vec<NodeId>, Vec<EdgeId>) {
        assert_eq!(
            nodes.len(),
            edges.len() + 1,
            "a path needs one edge fewer than nodes"
        );
        let links: Vec<(usize, usize, f64)> = edges
            .iter()
            .enumerate()
            .map(|(index, &weight)| (index, index + 1, weight))
            .collect();
        graph_from(nodes, &links)
    }

    /// Builds a graph from node weights and `(source, target, weight)`
    /// triples indexing into `nodes`.
    ///
    /// # Panics
    /// Panics when a triple refers to a node position that does not exist.
    #[must_use]
    pub fn graph_from(
        nodes: &[f64],
        edges: &[(usize, usize, f64)],
    ) -> (Graph, Vec<NodeId>, Vec<EdgeId>) {
        let mut graph = Graph::new();
        let node_ids: Vec<NodeId> = nodes.iter().map(|&weight| graph.add_node(weight)).collect();
        let edge_ids = edges
            .iter()
            .map(|&(source, target, weight)| {
                graph
                    .add_edge(node_ids[source], node_ids[target], weight)
                    .expect("fixture endpoints must exist")
            })
            .collect();
        (graph, node_ids, edge_ids)
    }
}

pub mod reference {
    //! Exhaustive reference solver for small graphs.
    use std::collections::{BTreeMap, BTreeSet};

    use gmwcs_core::{Element, ElementId, Graph, NodeId};

    /// Largest graph, in nodes, accepted by [`brute_force`].
    pub const MAX_NODES: usize = 16;

    /// Returns the exact maximum weight of a connected subgraph, counting the
    /// empty selection as zero.
    ///
    /// Every node subset is tried; for each, all non-negative edges inside
    /// it are taken and the remaining pieces are joined by the heaviest
    /// negative edges, which is optimal for a fixed node set.
    ///
    /// # Panics
    /// Panics when the graph has more than [`MAX_NODES`] nodes.
    ///
    /// # Examples
    /// ```
    /// use gmwcs_test_support::{fixtures::path, reference::brute_force};
    ///
    /// let (graph, _, _) = path(&[3.0, -1.0, 4.0], &[0.0, 0.0]);
    /// assert_eq!(brute_force(&graph), 6.0);
    /// ```
    #[must_use]
    pub fn brute_force(graph: &Graph) -> f64 {
        let nodes: Vec<NodeId> = graph.node_ids().collect();
        assert!(
            nodes.len() <= MAX_NODES,
            "brute force is limited to {MAX_NODES} nodes (got {})",
            nodes.len()
        );
        let mut best = 0.0;
        for mask in 1_u32..(1 << nodes.len()) {
            let members: BTreeSet<NodeId> = nodes
                .iter()
                .enumerate()
                .filter(|(position, _)| mask & (1 << position) != 0)
                .map(|(_, &node)| node)
                .collect();
            if let Some(value) = best_connection(graph, &members)
                && value > best
            {
                best = value;
            }
        }
        best
    }

    fn best_connection(graph: &Graph, members: &BTreeSet<NodeId>) -> Option<f64> {
        let position: BTreeMap<NodeId, usize> = members
            .iter()
            .enumerate()
            .map(|(index, &node)| (node, index))
            .collect();
        let mut parent: Vec<usize> = (0..members.len()).collect();
        let mut pieces = members.len();
        let mut value: f64 = members.iter().map(|&node| graph[node].weight()).sum();
        let mut negative = Vec::new();

        for edge in graph.edge_ids() {
            let Some((source, target)) = graph.endpoints(edge) else {
                continue;
            };
            let (Some(&left), Some(&right)) = (position.get(&source), position.get(&target))
            else {
                continue;
            };
            let weight = graph[edge].weight();
            if weight >= 0.0 {
                value += weight;
                if join(&mut parent, left, right) {
                    pieces -= 1;
                }
            } else if left != right {
                negative.push((weight, left, right));
            }
        }

        negative.sort_by(|a, b| b.0.total_cmp(&a.0));
        for (weight, left, right) in negative {
            if join(&mut parent, left, right) {
                value += weight;
                pieces -= 1;
            }
        }
        (pieces == 1).then_some(value)
    }

    fn root(parent: &mut [usize], mut node: usize) -> usize {
        while parent[node] != node {
            parent[node] = parent[parent[node]];
            node = parent[node];
        }
        node
    }

    fn join(parent: &mut [usize], left: usize, right: usize) -> bool {
        let left = root(parent, left);
        let right = root(parent, right);
        if left == right {
            return false;
        }
        parent[right] = left;
        true
    }

    /// Returns `true` when `elements` names live elements of `graph` that
    /// form one connected subgraph. The empty selection is connected.
    #[must_use]
    pub fn is_connected_selection(graph: &Graph, elements: &BTreeSet<ElementId>) -> bool {
        let nodes: BTreeSet<NodeId> = elements.iter().filter_map(|id| id.as_node()).collect();
        if nodes.iter().any(|&node| !graph.contains_node(node)) {
            return false;
        }
        let mut edges = BTreeSet::new();
        for edge in elements.iter().filter_map(|id| id.as_edge()) {
            match graph.endpoints(edge) {
                Some((source, target)) if nodes.contains(&source) && nodes.contains(&target) => {
                    edges.insert(edge);
                }
                _ => return false,
            }
        }
        graph.subgraph(&nodes, Some(&edges)).connected_components().len() <= 1
    }

    /// Sums the weights of `elements` as they stand in `graph`.
    #[must_use]
    pub fn selection_weight(graph: &Graph, elements: &BTreeSet<ElementId>) -> f64 {
        elements
            .iter()
            .filter_map(|&id| graph.weight_of(id))
            .sum()
    }

}

pub mod tracing {
    //! Recording layer for asserting on spans and events in tests.
    use std::{
        collections::HashMap,
        fmt,
        sync::{Arc, Mutex},
    };

    use tracing::{
        Event, Level, Subscriber,
        field::{Field, Visit},
        span::{Attributes, Id},
    };
    use tracing_subscriber::{Layer, layer::Context, registry::LookupSpan};

    /// Layer that keeps every opened span and emitted event in memory.
    ///
    /// # Examples
    /// ```
    /// use gmwcs_test_support::tracing::RecordingLayer;
    /// use tracing_subscriber::layer::SubscriberExt;
    ///
    /// let layer = RecordingLayer::default();
    /// let subscriber = tracing_subscriber::registry().with(layer.clone());
    /// tracing::subscriber::with_default(subscriber, || {
    ///     tracing::info!(answer = 42, "recorded");
    /// });
    /// let events = layer.events();
    /// assert_eq!(events[0].fields["answer"], "42");
    /// assert_eq!(events[0].message(), Some("recorded"));
    /// ```
    #[derive(Clone, Default)]
    pub struct RecordingLayer {
        spans: Arc<Mutex<Vec<SpanRecord>>>,
        events: Arc<Mutex<Vec<EventRecord>>>,
    }

    impl RecordingLayer {
        /// Returns the spans opened so far, in creation order.
        #[must_use]
        pub fn spans(&self) -> Vec<SpanRecord> {
            self.spans.lock().expect("span log poisoned").clone()
        }

        /// Returns the events emitted so far, in emission order.
        #[must_use]
        pub fn events(&self) -> Vec<EventRecord> {
            self.events.lock().expect("event log poisoned").clone()
        }

        /// Returns the events whose message equals `message`.
        #[must_use]
        pub fn events_with_message(&self, message: &str) -> Vec<EventRecord> {
            self.events()
                .into_iter()
                .filter(|event| event.message() == Some(message))
                .collect()
        }
    }

    /// A span as it was opened.
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub struct SpanRecord {
        /// Span name.
        pub name: String,
        /// Fields recorded when the span was created.
        pub fields: HashMap<String, String>,
    }

    /// An emitted event.
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub struct EventRecord {
        /// Event level.
        pub level: Level,
        /// Event target.
        pub target: String,
        /// Event fields, including `message`.
        pub fields: HashMap<String, String>,
    }

    impl EventRecord {
        /// Returns the event's message, if any.
        #[must_use]
        pub fn message(&self) -> Option<&str> {
            self.fields.get("message").map(String::as_str)
        }
    }

    impl<S> Layer<S> for RecordingLayer
    where
        S: Subscriber + for<'span> LookupSpan<'span>,
    {
        fn on_new_span(&self, attrs: &Attributes<'_>, _id: &Id, _ctx: Context<'_, S>) {
            let mut fields = HashMap::new();
            attrs.record(&mut Fields(&mut fields));
            self.spans
                .lock()
                .expect("span log poisoned")
                .push(SpanRecord {
                    name: attrs.metadata().name().to_owned(),
                    fields,
                });
        }

        fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
            let mut fields = HashMap::new();
            event.record(&mut Fields(&mut fields));
            self.events
                .lock()
                .expect("event log poisoned")
                .push(EventRecord {
                    level: *event.metadata().level(),
                    target: event.metadata().target().to_owned(),
                    fields,
                });
        }
    }

    struct Fields<'a>(&'a mut HashMap<String, String>);

    impl Visit for Fields<'_> {
        fn record_str(&mut self, field: &Field, value: &str) {
            self.0.insert(field.name().to_owned(), value.to_owned());
        }

        fn record_f64(&mut self, field: &Field, value: f64) {
            self.0.insert(field.name().to_owned(), value.to_string());
        }

        fn record_i64(&mut self, field: &Field, value: i64) {
            self.0.insert(field.name().to_owned(), value.to_string());
        }

        fn record_u64(&mut self, field: &Field, value: u64) {
            self.0.insert(field.name().to_owned(), value.to_string());
        }

        fn record_bool(&mut self, field: &Field, value: bool) {
            self.0.insert(field.name().to_owned(), value.to_string());
        }

        fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
            self.0.insert(field.name().to_owned(), format!("{value:?}"));
        }
    }
}
