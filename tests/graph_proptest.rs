use compact_graph::{Graph, GraphConfig, GraphError, VertexHandle};
use proptest::prelude::*;
use std::collections::HashSet;

#[derive(Debug, Clone)]
enum Operation {
    AddVertex,
    RemoveVertex(usize),
    AddEdge(usize, usize),
    RemoveEdge(usize, usize),
    Compact,
}

fn operation() -> impl Strategy<Value = Operation> {
    prop_oneof![
        3 => Just(Operation::AddVertex),
        1 => any::<usize>().prop_map(Operation::RemoveVertex),
        4 => (any::<usize>(), any::<usize>()).prop_map(|(a, b)| Operation::AddEdge(a, b)),
        2 => (any::<usize>(), any::<usize>()).prop_map(|(a, b)| Operation::RemoveEdge(a, b)),
        1 => Just(Operation::Compact),
    ]
}

/// Reference model: live vertices by content, edges as content pairs.
struct Model {
    directed: bool,
    live: Vec<(u64, VertexHandle)>,
    edges: HashSet<(u64, u64)>,
}

impl Model {
    fn key(&self, a: u64, b: u64) -> (u64, u64) {
        if self.directed || a <= b {
            (a, b)
        } else {
            (b, a)
        }
    }

    fn pick(&self, raw: usize) -> Option<(u64, VertexHandle)> {
        if self.live.is_empty() {
            None
        } else {
            Some(self.live[raw % self.live.len()])
        }
    }
}

fn run(directed: bool, capacity: usize, ops: Vec<Operation>) {
    let config = GraphConfig::default()
        .directed(directed)
        .with_initial_capacity(capacity);
    let mut graph: Graph = Graph::with_config(config).unwrap();
    let mut model = Model {
        directed,
        live: Vec::new(),
        edges: HashSet::new(),
    };
    let mut removed: Vec<VertexHandle> = Vec::new();
    let mut next_content = 0u64;

    for op in ops {
        match op {
            Operation::AddVertex => {
                let handle = graph.add_vertex(next_content).unwrap();
                model.live.push((next_content, handle));
                next_content += 1;
            }
            Operation::RemoveVertex(raw) => {
                if let Some((c, h)) = model.pick(raw) {
                    assert_eq!(graph.remove_vertex(h), Ok(c));
                    model.live.retain(|&(lc, _)| lc != c);
                    model.edges.retain(|&(a, b)| a != c && b != c);
                    removed.push(h);
                }
            }
            Operation::AddEdge(x, y) => {
                if let (Some((a, ha)), Some((b, hb))) = (model.pick(x), model.pick(y)) {
                    let key = model.key(a, b);
                    let fresh = model.edges.insert(key);
                    assert_eq!(graph.add_edge(ha, hb), Ok(fresh));
                }
            }
            Operation::RemoveEdge(x, y) => {
                if let (Some((a, ha)), Some((b, hb))) = (model.pick(x), model.pick(y)) {
                    let key = model.key(a, b);
                    let existed = model.edges.remove(&key);
                    assert_eq!(graph.remove_edge(ha, hb), Ok(existed));
                }
            }
            Operation::Compact => graph.compact(),
        }
        assert!(graph.check_invariants());
    }

    assert_eq!(graph.vertex_count(), model.live.len());
    for &(a, ha) in &model.live {
        assert_eq!(graph.find_vertex(&a), Ok(ha));
        assert_eq!(*graph.content(ha).unwrap(), a);
        for &(b, hb) in &model.live {
            let expected = model.edges.contains(&model.key(a, b));
            assert_eq!(graph.is_linked(ha, hb), Ok(expected), "is_linked({a}, {b})");
            if !directed {
                assert_eq!(graph.is_linked(hb, ha), Ok(expected));
            }
        }
    }
    for h in removed {
        assert_eq!(graph.content(h), Err(GraphError::InvalidHandle));
    }
}

proptest! {
    #[test]
    fn test_directed_graph_matches_model(
        capacity in 0usize..8,
        ops in proptest::collection::vec(operation(), 1..200),
    ) {
        run(true, capacity, ops);
    }

    #[test]
    fn test_undirected_graph_matches_model(
        capacity in 0usize..8,
        ops in proptest::collection::vec(operation(), 1..200),
    ) {
        run(false, capacity, ops);
    }
}
