//! Network statistics and connected-component analysis.

use std::collections::{BTreeMap, VecDeque};

use mt_core::NodeId;

use crate::{Blockades, GraphIndex};

/// Headline counts for a loaded graph.
#[derive(Debug, Clone, PartialEq)]
pub struct NetworkStats {
    pub nodes: usize,
    /// Lanes from the payload, excluding bridges.
    pub lanes: usize,
    pub bridges: usize,
    pub ports: usize,
    pub chokepoints: usize,
    /// How many lanes pass each named chokepoint, including names the
    /// catalog does not list.
    pub lanes_per_chokepoint: BTreeMap<String, usize>,
    /// Nodes with no lanes at all.
    pub isolated_nodes: usize,
}

impl NetworkStats {
    pub fn of(graph: &GraphIndex) -> Self {
        let mut lanes_per_chokepoint: BTreeMap<String, usize> = graph
            .chokepoints()
            .iter()
            .map(|c| (c.name.clone(), 0))
            .collect();
        for e in graph.edges() {
            for c in &e.chokepoints {
                *lanes_per_chokepoint.entry(c.clone()).or_default() += 1;
            }
        }
        let isolated_nodes = (0..graph.node_count())
            .filter(|&i| graph.degree(NodeId::from_index(i)) == 0)
            .count();

        Self {
            nodes: graph.node_count(),
            lanes: graph.edge_count() - graph.bridge_count(),
            bridges: graph.bridge_count(),
            ports: graph.port_count(),
            chokepoints: graph.chokepoints().len(),
            lanes_per_chokepoint,
            isolated_nodes,
        }
    }
}

/// Connected components over the lanes left open by a set of blockades.
///
/// Component labels are dense and assigned in node order, so component 0
/// always contains node 0.
#[derive(Debug, Clone)]
pub struct Connectivity {
    labels: Vec<u32>,
    sizes:  Vec<usize>,
}

impl Connectivity {
    pub fn compute(graph: &GraphIndex, blockades: &Blockades) -> Self {
        let n = graph.node_count();
        let mut labels = vec![u32::MAX; n];
        let mut sizes = Vec::new();
        let mut queue = VecDeque::new();

        for start in 0..n {
            if labels[start] != u32::MAX {
                continue;
            }
            let label = sizes.len() as u32;
            labels[start] = label;
            queue.push_back(NodeId::from_index(start));
            let mut size = 0;

            while let Some(node) = queue.pop_front() {
                size += 1;
                for (edge, next) in graph.neighbours(node) {
                    if labels[next.index()] != u32::MAX
                        || blockades.is_edge_disabled(graph.edge(edge))
                    {
                        continue;
                    }
                    labels[next.index()] = label;
                    queue.push_back(next);
                }
            }
            sizes.push(size);
        }

        Self { labels, sizes }
    }

    pub fn component_count(&self) -> usize {
        self.sizes.len()
    }

    pub fn largest_component_size(&self) -> usize {
        self.sizes.iter().copied().max().unwrap_or(0)
    }

    /// Component sizes, largest first.
    pub fn sizes_descending(&self) -> Vec<usize> {
        let mut s = self.sizes.clone();
        s.sort_unstable_by(|a, b| b.cmp(a));
        s
    }

    pub fn component_of(&self, node: NodeId) -> Option<u32> {
        self.labels.get(node.index()).copied()
    }

    pub fn connected(&self, a: NodeId, b: NodeId) -> bool {
        match (self.component_of(a), self.component_of(b)) {
            (Some(x), Some(y)) => x == y,
            _ => false,
        }
    }
}
