use log::debug;

use crate::color::{GraphInstance, VertexId};

use super::coloring_strategy::ColoringStrategy;

/** generates independent sets used as cuts of the clique relaxation.
Colors the graph with the given heuristic, each color class is an independent set
(one set per color used, in color order). */
pub fn independent_sets(inst:&dyn GraphInstance, strategy:ColoringStrategy) -> Vec<Vec<VertexId>> {
    let res = strategy.color(inst);
    debug!(
        "{} independent sets generated by '{}' (largest: {})",
        res.len(), strategy, res.iter().map(|s| s.len()).max().unwrap_or(0)
    );
    res
}


#[cfg(test)]
mod tests {
    use super::*;

    use crate::dimacs::DimacsInstance;

    fn check_independent(inst:&dyn GraphInstance, sets:&[Vec<VertexId>]) {
        for s in sets {
            for (i,u) in s.iter().enumerate() {
                for v in &s[i+1..] {
                    assert!(!inst.are_adjacent(*u, *v), "{} and {} are adjacent", u, v);
                }
            }
        }
    }

    #[test]
    fn test_sets_are_independent() {
        let inst = DimacsInstance::from_edges(6, &[
            (0,1),(0,2),(1,2),(3,4),(3,5),(4,5),(2,3)
        ]);
        for strategy in &[ColoringStrategy::IndependentSet, ColoringStrategy::Dsatur, ColoringStrategy::Rlf] {
            let sets = independent_sets(&inst, *strategy);
            check_independent(&inst, &sets);
            assert_eq!(sets.iter().map(|s| s.len()).sum::<usize>(), 6);
        }
    }

    #[test]
    fn test_triangle_gives_singletons() {
        let inst = DimacsInstance::from_file("insts/triangle.clq").unwrap();
        let sets = independent_sets(&inst, ColoringStrategy::default());
        assert_eq!(sets, vec![vec![0], vec![1], vec![2]]);
    }

    #[test]
    fn test_at_least_one_set() {
        let inst = DimacsInstance::from_edges(1, &[]);
        assert_eq!(independent_sets(&inst, ColoringStrategy::default()).len(), 1);
        let empty = DimacsInstance::from_edges(0, &[]);
        assert!(independent_sets(&empty, ColoringStrategy::default()).is_empty());
    }
}
