use std::fmt;
use std::str::FromStr;

use bit_set::BitSet;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;

use crate::color::{GraphInstance, Solution, VertexId};
use crate::error::CliqueError;

use super::greedy_dsatur::greedy_dsatur;
use super::greedy_rlf::greedy_rlf;


/** heuristic used to color the graph (each color class is an independent set) */
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColoringStrategy {
    /// extracts maximal independent sets one after the other (minimum degree first)
    IndependentSet,
    /// DSATUR greedy
    Dsatur,
    /// Recursive Largest First
    Rlf,
    /// sequential greedy, vertices by decreasing degree
    LargestFirst,
    /// sequential greedy, vertices shuffled using the given seed
    RandomSequential(u64),
}

impl Default for ColoringStrategy {
    fn default() -> Self { ColoringStrategy::IndependentSet }
}

impl fmt::Display for ColoringStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColoringStrategy::IndependentSet => write!(f, "independent_set"),
            ColoringStrategy::Dsatur => write!(f, "dsatur"),
            ColoringStrategy::Rlf => write!(f, "rlf"),
            ColoringStrategy::LargestFirst => write!(f, "largest_first"),
            ColoringStrategy::RandomSequential(seed) => write!(f, "random({})", seed),
        }
    }
}

/// parses a strategy name (`random` uses the seed 0, see [`ColoringStrategy::with_seed`])
impl FromStr for ColoringStrategy {
    type Err = CliqueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "independent_set" => Ok(ColoringStrategy::IndependentSet),
            "dsatur" => Ok(ColoringStrategy::Dsatur),
            "rlf" => Ok(ColoringStrategy::Rlf),
            "largest_first" => Ok(ColoringStrategy::LargestFirst),
            "random" => Ok(ColoringStrategy::RandomSequential(0)),
            _ => Err(CliqueError::InvalidArgument(format!(
                "unknown coloring strategy '{}' (valid: independent_set, dsatur, rlf, largest_first, random)", s
            ))),
        }
    }
}

impl ColoringStrategy {
    /// replaces the seed of a random strategy (other strategies are unchanged)
    pub fn with_seed(self, seed:u64) -> Self {
        match self {
            ColoringStrategy::RandomSequential(_) => ColoringStrategy::RandomSequential(seed),
            s => s,
        }
    }

    /// colors the graph. Returns the color classes (each sorted by increasing vertex id)
    pub fn color(&self, inst:&dyn GraphInstance) -> Solution {
        let mut res = match self {
            ColoringStrategy::IndependentSet => greedy_independent_sets(inst),
            ColoringStrategy::Dsatur => greedy_dsatur(inst, false),
            ColoringStrategy::Rlf => greedy_rlf(inst, false),
            ColoringStrategy::LargestFirst => {
                let mut order:Vec<VertexId> = inst.vertices().collect();
                order.sort_by_key(|u| std::cmp::Reverse(inst.degree(*u))); // stable: ties by id
                greedy_sequential(inst, &order)
            },
            ColoringStrategy::RandomSequential(seed) => {
                let mut order:Vec<VertexId> = inst.vertices().collect();
                order.shuffle(&mut StdRng::seed_from_u64(*seed));
                greedy_sequential(inst, &order)
            },
        };
        for c in res.iter_mut() { c.sort_unstable(); }
        res
    }
}


/// builds the partition from a complete color assignment
pub fn colors_to_solution(colors:&[Option<usize>], nb_colors:usize) -> Solution {
    let mut res = vec![vec![] ; nb_colors];
    for (i,c) in colors.iter().enumerate() {
        if let Some(c) = c { res[*c].push(i); }
    }
    res.retain(|c| !c.is_empty());
    res
}

/** sequential greedy coloring: each vertex (in the given order) receives the smallest
color not used by its neighbors. */
pub fn greedy_sequential(inst:&dyn GraphInstance, order:&[VertexId]) -> Solution {
    let mut colors:Vec<Option<usize>> = vec![None ; inst.nb_vertices()];
    let mut nb_colors = 0;
    for u in order {
        let mut used = BitSet::new();
        for v in inst.neighbors(*u) {
            if let Some(c) = colors[*v] { used.insert(c); }
        }
        let mut color = 0;
        while used.contains(color) { color += 1; }
        colors[*u] = Some(color);
        nb_colors = nb_colors.max(color+1);
    }
    colors_to_solution(&colors, nb_colors)
}

/** colors the graph one independent set at a time.
While some vertex is uncolored: start from the uncolored vertices as candidates, repeatedly
pick the candidate with the minimum degree in the subgraph induced by the candidates (smallest
id on ties), add it to the current set and remove it and its neighbors from the candidates.
The resulting maximal independent set becomes a new color.
*/
pub fn greedy_independent_sets(inst:&dyn GraphInstance) -> Solution {
    let n = inst.nb_vertices();
    let mut uncolored:BitSet = (0..n).collect();
    let mut res = Vec::new();
    while !uncolored.is_empty() {
        let mut candidates = uncolored.clone();
        let mut stable = Vec::new();
        loop {
            let next = candidates.iter().min_by_key(|v| {
                inst.neighbors(*v).iter().filter(|w| candidates.contains(**w)).count()
            });
            let u = match next {
                None => break,
                Some(u) => u,
            };
            stable.push(u);
            candidates.remove(u);
            for v in inst.neighbors(u) { candidates.remove(*v); }
        }
        for u in &stable { uncolored.remove(*u); }
        res.push(stable);
    }
    res
}


#[cfg(test)]
mod tests {
    use super::*;

    use crate::color::{coloring_checker, CheckerResult};
    use crate::dimacs::DimacsInstance;

    fn strategies() -> Vec<ColoringStrategy> {
        vec![
            ColoringStrategy::IndependentSet,
            ColoringStrategy::Dsatur,
            ColoringStrategy::Rlf,
            ColoringStrategy::LargestFirst,
            ColoringStrategy::RandomSequential(42),
        ]
    }

    #[test]
    fn test_all_strategies_proper() {
        let inst = DimacsInstance::from_edges(7, &[
            (0,1),(0,2),(1,2),(2,3),(3,4),(4,5),(5,6),(6,3),(1,5)
        ]);
        for s in strategies() {
            let solution = s.color(&inst);
            assert!(
                matches!(coloring_checker(&inst, &solution), CheckerResult::Ok(_)),
                "strategy {} produced an invalid coloring", s
            );
            for c in &solution {
                assert!(c.windows(2).all(|w| w[0] < w[1]));
            }
        }
    }

    #[test]
    fn test_independent_sets_no_edges() {
        let inst = DimacsInstance::from_edges(4, &[]);
        assert_eq!(greedy_independent_sets(&inst), vec![vec![0,1,2,3]]);
    }

    #[test]
    fn test_independent_sets_path() {
        // 0-1-2-3: min degree picks 0, removes 1, then 2 (degree 1) over 3 by id
        let inst = DimacsInstance::from_edges(4, &[(0,1),(1,2),(2,3)]);
        assert_eq!(greedy_independent_sets(&inst), vec![vec![0,2], vec![1,3]]);
    }

    #[test]
    fn test_random_is_reproducible() {
        let inst = DimacsInstance::from_file("insts/two_triangles.clq").unwrap();
        let s = ColoringStrategy::RandomSequential(7);
        assert_eq!(s.color(&inst), s.color(&inst));
    }

    #[test]
    fn test_parse_strategy() {
        assert_eq!("dsatur".parse::<ColoringStrategy>().unwrap(), ColoringStrategy::Dsatur);
        assert_eq!(
            "random".parse::<ColoringStrategy>().unwrap().with_seed(3),
            ColoringStrategy::RandomSequential(3)
        );
        assert!(matches!("nope".parse::<ColoringStrategy>(), Err(CliqueError::InvalidArgument(_))));
    }
}
