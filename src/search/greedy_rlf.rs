use bit_set::BitSet;
use log::debug;

use crate::color::{GraphInstance, Solution};

/** implements a greedy RLF algorithm. That colors vertices one color at a time
    1. selects the vertex with the largest degree in the graph and mark it colored
    2. mark its neighbors unreachable
    3. select a reachable vertex that has the largest set of edges in the reachable vertices
    4. when there are no reachable vertices, start over with a new color
*/
pub fn greedy_rlf(inst:&dyn GraphInstance, show_completion:bool) -> Solution {
    let n:usize = inst.nb_vertices();
    let mut colors:Vec<Option<usize>> = vec![None ; n];
    let mut colored:BitSet<u64> = BitSet::default();
    let mut reachable_degree:Vec<usize> = (0..n).map(|u| inst.degree(u)).collect();
    let mut nb_colored:usize = 0;
    let mut current_color:usize = 0;
    while nb_colored < n { // add a new color until everything is colored
        let mut unreachable:BitSet<u64> = BitSet::default();
        let mut reachable_degree_removal:Vec<usize> = vec![0 ; n];
        // find not colored and reachable vertex with maximum degree
        // (max_by keeps the last maximum, iterate in reverse so the smallest id wins ties)
        while let Some(current_vertex) = (0..n).rev()
            .filter(|v| !colored.contains(*v) && !unreachable.contains(*v))
            .max_by(|a,b| {
                reachable_degree_removal[*a].cmp(&reachable_degree_removal[*b])
                    .then_with(|| (reachable_degree[*a] - reachable_degree_removal[*a]).cmp(
                        &(reachable_degree[*b] - reachable_degree_removal[*b])
                    ))
            }) {
            if show_completion && nb_colored % 1000 == 0 { debug!("rlf: colored {} / {}...", nb_colored, n); }
            nb_colored += 1;
            colored.insert(current_vertex);
            colors[current_vertex] = Some(current_color);
            // mark its neighbors unreachable and decrease their reachability degree
            for v in inst.neighbors(current_vertex) {
                if !unreachable.contains(*v) && !colored.contains(*v) {
                    // every vertex that sees v sees a reachable vertex less
                    for w in inst.neighbors(*v) {
                        reachable_degree_removal[*w] += 1; // because v is now unreachable
                    }
                    unreachable.insert(*v);
                    reachable_degree[*v] -= 1; // because current_vertex is now colored
                }
            }
        }
        current_color += 1;
    }
    super::coloring_strategy::colors_to_solution(&colors, current_color)
}


#[cfg(test)]
mod tests {
    use super::*;

    use crate::color::{coloring_checker, CheckerResult};
    use crate::dimacs::DimacsInstance;

    #[test]
    fn test_rlf_grid() {
        let inst = DimacsInstance::from_file("insts/grid2x2.clq").unwrap();
        let solution = greedy_rlf(&inst, false);
        assert_eq!(coloring_checker(&inst, &solution), CheckerResult::Ok(2));
    }

    #[test]
    fn test_rlf_path() {
        let inst = DimacsInstance::from_edges(5, &[(0,1),(1,2),(2,3),(3,4)]);
        let solution = greedy_rlf(&inst, true);
        assert!(matches!(coloring_checker(&inst, &solution), CheckerResult::Ok(_)));
    }
}
