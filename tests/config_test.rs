use compact_graph::{Graph, GraphConfig, GraphError};

#[test]
fn test_partial_config_fills_defaults() {
    let config: GraphConfig = serde_json::from_str(r#"{ "directed": true }"#).unwrap();
    assert!(config.directed);
    assert_eq!(config.initial_capacity, 20);
    assert_eq!(config.growth_factor, 2);

    let graph: Graph = Graph::with_config(config).unwrap();
    assert!(graph.is_directed());
    assert_eq!(graph.capacity(), 20);
}

#[test]
fn test_config_from_json_is_validated_on_construction() {
    let config: GraphConfig =
        serde_json::from_str(r#"{ "growth_factor": 1, "initial_capacity": 3 }"#).unwrap();
    assert_eq!(config.initial_capacity, 3);
    assert_eq!(
        Graph::<u64>::with_config(config).err(),
        Some(GraphError::InvalidConfig {
            reason: "growth_factor must be at least 2"
        })
    );
}

#[test]
fn test_growth_factor_is_honoured() {
    let config = GraphConfig::default()
        .with_initial_capacity(2)
        .with_growth_factor(4);
    let mut graph: Graph = Graph::with_config(config).unwrap();
    for i in 0..3 {
        graph.add_vertex(i).unwrap();
    }
    assert_eq!(graph.capacity(), 8);
}
