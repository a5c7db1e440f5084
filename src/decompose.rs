//! Splits a reduced machine into independent sub-machines along the
//! connected components of its counter/button incidence graph.

use petgraph::graph::{NodeIndex, UnGraph};
use petgraph::visit::Bfs;

use crate::machine::Button;
use crate::reduce::Reduced;

/// One connected component, renumbered to stand alone as a miniature
/// machine. A button only ever touches counters inside its own component, so
/// the machine minimum is the sum of the component minima.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Component {
    pub targets: Vec<u32>,
    pub buttons: Vec<Button>,
}

/// Node payload in the bipartite incidence graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Cell {
    Counter(usize),
    Button(usize),
}

/// Collects connected components by BFS over the incidence graph.
///
/// Components come back ordered by their smallest member counter, which
/// fixes the aggregation (and error-index) order deterministically. A
/// counter covered by no button forms a singleton component with no buttons.
pub fn components(reduced: &Reduced) -> Vec<Component> {
    let mut graph = UnGraph::<Cell, ()>::new_undirected();
    let counter_nodes: Vec<NodeIndex> = (0..reduced.targets.len())
        .map(|i| graph.add_node(Cell::Counter(i)))
        .collect();
    let button_nodes: Vec<NodeIndex> = (0..reduced.buttons.len())
        .map(|i| graph.add_node(Cell::Button(i)))
        .collect();
    for (b, button) in reduced.buttons.iter().enumerate() {
        for &c in button.indices() {
            graph.add_edge(button_nodes[b], counter_nodes[c as usize], ());
        }
    }

    let mut assigned = vec![false; graph.node_count()];
    let mut result = Vec::new();
    for &start in &counter_nodes {
        if assigned[start.index()] {
            continue;
        }
        let mut counters = Vec::new();
        let mut buttons = Vec::new();
        let mut bfs = Bfs::new(&graph, start);
        while let Some(node) = bfs.next(&graph) {
            assigned[node.index()] = true;
            match graph[node] {
                Cell::Counter(i) => counters.push(i),
                Cell::Button(i) => buttons.push(i),
            }
        }
        // Traversal order is arbitrary; sorting restores the reduced-index
        // order before renumbering.
        counters.sort_unstable();
        buttons.sort_unstable();
        result.push(build_component(reduced, &counters, &buttons));
    }
    result
}

/// Renumbers a component's counters densely. The renumbering is monotone, so
/// the canonical button order from preprocessing survives locally.
fn build_component(reduced: &Reduced, counters: &[usize], buttons: &[usize]) -> Component {
    let targets = counters.iter().map(|&c| reduced.targets[c]).collect();
    let local = |c: u32| -> u32 {
        counters
            .binary_search(&(c as usize))
            .expect("BUG: button references a counter outside its component") as u32
    };
    let buttons = buttons
        .iter()
        .map(|&b| Button::new(reduced.buttons[b].indices().iter().map(|&c| local(c))))
        .collect();
    Component { targets, buttons }
}
