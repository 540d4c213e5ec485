//! Search algorithms for the maximum clique problem.

/// greedy DSATUR algorithm
pub mod greedy_dsatur;

/// Recursive Largest First algorithm (RLF)
pub mod greedy_rlf;

/// coloring heuristics used to generate independent sets
pub mod coloring_strategy;

/// independent set cuts for the clique relaxation
pub mod clique_independent_sets;

/// LP relaxation of the clique problem and its branching decisions
pub mod clique_relaxation;

/// LP solver interface and its good_lp implementation
pub mod lp_solver;

/// best clique found during the search
pub mod clique_incumbent;

/// LP-based branch & bound for the CLIQUE problem
pub mod clique_lp_bnb;
