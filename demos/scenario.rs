//! Builds a 20-vertex directed graph, thins it out, and prints it after each
//! step. Run with `cargo run --example scenario`.

use compact_graph::Graph;

fn main() -> anyhow::Result<()> {
    let mut graph = Graph::new(true)?;
    let nodes = (0..20u64)
        .map(|i| graph.add_vertex(i))
        .collect::<Result<Vec<_>, _>>()?;
    println!("Vertices added:\n{graph}");

    for i in 0..20 {
        for j in 0..20 {
            if i != j && (i * j + 3 * i * i) % 7 == 1 {
                graph.add_edge(nodes[i], nodes[j])?;
            }
        }
    }
    println!("Edges added:\n{graph}");

    for i in 0..20 {
        for j in 0..20 {
            if i != j && (i * j * j + 2 * i * i) % 9 == 3 {
                graph.remove_edge(nodes[i], nodes[j])?;
            }
        }
    }
    println!("Edges removed:\n{graph}");

    for (i, &node) in nodes.iter().enumerate() {
        if (6 * i * i * i + 1 - 2 * i) % 3 == 2 {
            graph.remove_vertex(node)?;
        }
    }
    println!("Vertices removed:\n{graph}");

    let fresh = graph.add_vertex(666)?;
    graph.add_edge(fresh, nodes[0])?;
    println!(
        "After insertion (capacity {}, high-water mark {}):\n{graph}",
        graph.capacity(),
        graph.high_water_mark()
    );

    anyhow::ensure!(graph.check_invariants(), "graph invariants violated");
    Ok(())
}
