use crate::base::Numberer;
use crate::domain::Domain;
use std::collections::{BTreeSet, VecDeque};

/// Returns the nodes connected to each node through the elements
pub fn node_adjacency(domain: &Domain) -> Vec<BTreeSet<usize>> {
    let mut adjacency = vec![BTreeSet::new(); domain.nodes.len()];
    for e in &domain.elements {
        let nodes = e.actual.nodes();
        for a in nodes {
            for b in nodes {
                if a != b {
                    adjacency[*a].insert(*b);
                }
            }
        }
    }
    adjacency
}

/// Returns the order in which the nodes receive their equation numbers
pub fn node_order(numberer: Numberer, adjacency: &[BTreeSet<usize>]) -> Vec<usize> {
    match numberer {
        Numberer::Plain => (0..adjacency.len()).collect(),
        Numberer::ReverseCuthillMckee => reverse_cuthill_mckee(adjacency),
    }
}

/// Computes the reverse Cuthill-McKee ordering of a graph
///
/// Each connected component starts at its unvisited node with the smallest degree;
/// the neighbors are visited in ascending order of degree (ties broken by id).
pub fn reverse_cuthill_mckee(adjacency: &[BTreeSet<usize>]) -> Vec<usize> {
    let n = adjacency.len();
    let mut visited = vec![false; n];
    let mut order = Vec::with_capacity(n);
    let mut by_degree: Vec<usize> = (0..n).collect();
    by_degree.sort_by_key(|i| (adjacency[*i].len(), *i));
    for start in by_degree {
        if visited[start] {
            continue;
        }
        visited[start] = true;
        let mut queue = VecDeque::from([start]);
        while let Some(i) = queue.pop_front() {
            order.push(i);
            let mut neighbors: Vec<usize> = adjacency[i].iter().copied().filter(|j| !visited[*j]).collect();
            neighbors.sort_by_key(|j| (adjacency[*j].len(), *j));
            for j in neighbors {
                visited[j] = true;
                queue.push_back(j);
            }
        }
    }
    order.reverse();
    order
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
