use std::cmp::{Ordering, max, Ord};

use log::debug;
use priority_queue::PriorityQueue;
use bit_set::BitSet;

use crate::color::{GraphInstance, Solution, VertexId};

#[derive(PartialEq, Eq)]
struct DSatInfo {
    dsat: usize,
    degree: usize,
    vertex: VertexId,
}

impl Ord for DSatInfo {
    fn cmp(&self, other: &Self) -> Ordering {
        self.dsat.cmp(&other.dsat)
            .then_with(|| self.degree.cmp(&other.degree))
            .then_with(|| other.vertex.cmp(&self.vertex)) // smallest id first
    }
}

// `PartialOrd` needs to be implemented as well.
impl PartialOrd for DSatInfo {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/** implements a greedy DSATUR algorithm.
    1. choose an uncolored node that sees the most colors (break ties by the largest degree,
       then by the smallest id)
    2. add the vertex to the first color available
    3. mark all its neighbors seeing this color
    4. repeat until a proper coloring is found

parameters:
 - inst: reference to an instance
 - show_completion: if true, log progress towards the coloring
*/
pub fn greedy_dsatur(inst:&dyn GraphInstance, show_completion:bool) -> Solution {
    let n:usize = inst.nb_vertices();
    if n == 0 { return Vec::new(); }
    let mut remaining_vertices:PriorityQueue<VertexId, DSatInfo> = PriorityQueue::new();
    for i in 0..n {
        remaining_vertices.push(i, DSatInfo { dsat:0, degree:inst.degree(i), vertex:i });
    }
    let mut colors:Vec<Option<usize>> = vec![None ; n]; // colors[v] -> color assigned to vertex v
    let mut adj_colors:Vec<BitSet> = vec![BitSet::default() ; n]; // adj_colors[n] -> colors n sees
    let mut nb_colored:usize = 0;
    let mut last_color:usize = 0;
    while let Some((current_vertex, _)) = remaining_vertices.pop() {
        if show_completion && nb_colored % 1000 == 0 { debug!("dsatur: colored {} / {}...", nb_colored, n); }
        // assign it a color
        let mut color:usize = 0;
        while adj_colors[current_vertex].contains(color) { color += 1; }
        colors[current_vertex] = Some(color);
        nb_colored += 1;
        last_color = max(last_color, color);
        // update saturation degree information
        for conflict_vertex in inst.neighbors(current_vertex).iter()
        .filter(|conflict_vertex| colors[**conflict_vertex].is_none()) {
            if adj_colors[*conflict_vertex].insert(color) {
                remaining_vertices.change_priority_by(conflict_vertex, |p| { p.dsat += 1; });
            }
        }
    }
    super::coloring_strategy::colors_to_solution(&colors, last_color+1)
}
