use std::rc::Rc;
use std::time::Instant;

use dogs::search_algorithm::{NeverStoppingCriterion, StoppingCriterion};
use log::{debug, info, trace};
use serde::Serialize;

use crate::color::{GraphInstance, VertexId};
use crate::error::Result;

use super::clique_incumbent::Incumbent;
use super::clique_independent_sets::independent_sets;
use super::clique_relaxation::Relaxation;
use super::coloring_strategy::ColoringStrategy;
use super::lp_solver::{GoodLpSolver, LpOutcome, LpSolver};


/// a value closer than this to 0 or 1 is considered integral
pub const INTEGRALITY_TOLERANCE:f64 = 1e-6;

/** parameters of the branch & bound */
#[derive(Debug, Clone)]
pub struct BnbConfig {
    /// heuristic used to generate the independent set cuts
    pub coloring: ColoringStrategy,
    /// integrality and pruning tolerance
    pub tolerance: f64,
}

impl Default for BnbConfig {
    fn default() -> Self {
        Self { coloring: ColoringStrategy::default(), tolerance: INTEGRALITY_TOLERANCE }
    }
}

/** counters collected during the search */
#[derive(Debug, Clone, Default, Serialize)]
pub struct SearchStats {
    /// relaxations solved
    pub nb_nodes: usize,
    /// infeasible relaxations
    pub nb_infeasible: usize,
    /// nodes pruned by bound
    pub nb_pruned: usize,
    /// integral relaxations
    pub nb_integral: usize,
    /// nodes split on a fractional variable
    pub nb_branchings: usize,
    /// deepest node evaluated
    pub max_depth: usize,
    /// bound of the root relaxation
    pub root_bound: f64,
    /// search time (seconds)
    pub time_searched: f32,
}

/** integral solution found at a leaf of the search tree */
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    /// number of vertices in the clique
    pub size: usize,
    /// assignment[v]: true iff v is in the clique
    pub assignment: Vec<bool>,
}

/** result of the search */
#[derive(Debug, Clone, Serialize)]
pub struct CliqueResult {
    /// size of the best clique found
    pub size: usize,
    /// vertices of the best clique found (increasing ids)
    pub clique: Vec<VertexId>,
    /// false if the search was interrupted by the stopping criterion
    pub is_optimal: bool,
    /// successive sizes of the improving cliques
    pub primal_list: Vec<usize>,
    /// search statistics
    pub stats: SearchStats,
}


/** returns the first variable (lowest index) that is not integral */
pub fn branching_variable(values:&[f64], tolerance:f64) -> Option<VertexId> {
    values.iter().position(|x| x.abs() > tolerance && (x - 1.).abs() > tolerance)
}

/// keeps the largest candidate (the first one on ties)
fn best_candidate(a:Option<Candidate>, b:Option<Candidate>) -> Option<Candidate> {
    match (a, b) {
        (Some(a), Some(b)) => if b.size > a.size { Some(b) } else { Some(a) },
        (Some(a), None) => Some(a),
        (None, b) => b,
    }
}


/**
Branch & bound for the maximum clique problem. Each node solves the LP relaxation
(independent set cuts + non-edge constraints + branching decisions):
 - infeasible relaxation: the node is dropped
 - bound <= best clique: the node is pruned
 - integral solution: it is a clique, offered to the incumbent
 - otherwise, branch on the first fractional variable (x_v = 1 first, then x_v = 0)
*/
#[derive(Debug)]
pub struct LpCliqueBnb<S:LpSolver> {
    /// instance to solve
    inst: Rc<dyn GraphInstance>,
    /// LP solver used at each node
    solver: S,
    /// search parameters
    config: BnbConfig,
    /// statistics of the last search
    stats: SearchStats,
    /// true if the stopping criterion interrupted the last search
    stopped: bool,
}

impl<S:LpSolver> LpCliqueBnb<S> {

    /** creates the search given an instance, an LP solver and its parameters */
    pub fn new(inst:Rc<dyn GraphInstance>, solver:S, config:BnbConfig) -> Self {
        Self { inst, solver, config, stats: SearchStats::default(), stopped: false }
    }

    /// statistics of the last search
    pub fn stats(&self) -> &SearchStats { &self.stats }

    /// LP solver
    pub fn solver(&self) -> &S { &self.solver }

    /// builds the relaxation of the root node
    pub fn root_relaxation(&self) -> Relaxation {
        let sets = independent_sets(self.inst.as_ref(), self.config.coloring);
        Relaxation::build(self.inst.as_ref(), sets)
    }

    /** runs the search until the tree is explored or the stopping criterion is met */
    pub fn solve<SC:StoppingCriterion>(&mut self, stopping_criterion:SC) -> Result<CliqueResult> {
        let t_start = Instant::now();
        self.stats = SearchStats::default();
        self.stopped = false;
        let mut incumbent = Incumbent::new(self.inst.nb_vertices());
        if self.inst.nb_vertices() > 0 {
            let root = self.root_relaxation();
            let best = self.branching(&root, &mut incumbent, &stopping_criterion)?;
            debug_assert!(best.map_or(0, |c| c.size) <= incumbent.best_size());
            debug_assert!(incumbent.best_size() == 0 || root.is_satisfied_by(
                &incumbent.assignment().iter().map(|b| if *b { 1. } else { 0. }).collect::<Vec<f64>>(),
                self.config.tolerance,
            ));
        }
        self.stats.time_searched = t_start.elapsed().as_secs_f32();
        let is_optimal = !self.stopped;
        info!(
            "clique of size {} ({}) in {:.3} seconds, {} nodes ({} pruned, {} infeasible)",
            incumbent.best_size(),
            if is_optimal { "optimal" } else { "interrupted" },
            self.stats.time_searched,
            self.stats.nb_nodes,
            self.stats.nb_pruned,
            self.stats.nb_infeasible,
        );
        Ok(CliqueResult {
            size: incumbent.best_size(),
            clique: incumbent.clique(),
            is_optimal,
            primal_list: incumbent.history().to_vec(),
            stats: self.stats.clone(),
        })
    }

    /** explores the subtree rooted at the relaxation. Returns the best clique found inside it
    if it beats the incumbent at the time it is found, None otherwise (infeasible or pruned). */
    pub fn branching<SC:StoppingCriterion>(
        &mut self,
        relaxation:&Relaxation,
        incumbent:&mut Incumbent,
        stopping_criterion:&SC,
    ) -> Result<Option<Candidate>> {
        if self.stopped || stopping_criterion.is_finished() {
            self.stopped = true;
            return Ok(None);
        }
        self.stats.nb_nodes += 1;
        self.stats.max_depth = self.stats.max_depth.max(relaxation.depth());
        let (values, bound) = match self.solver.solve(relaxation)? {
            LpOutcome::Infeasible => {
                self.stats.nb_infeasible += 1;
                return Ok(None);
            },
            LpOutcome::Optimal { values, objective } => (values, objective),
        };
        if relaxation.depth() == 0 {
            self.stats.root_bound = bound;
            debug!("root bound: {:.4}", bound);
        }
        if bound <= incumbent.best_size() as f64 + self.config.tolerance {
            trace!("pruned (depth {}): {:.4} <= {}", relaxation.depth(), bound, incumbent.best_size());
            self.stats.nb_pruned += 1;
            return Ok(None);
        }
        match branching_variable(&values, self.config.tolerance) {
            None => { // integral: the solution is a clique
                self.stats.nb_integral += 1;
                let assignment:Vec<bool> = values.iter().map(|x| *x > 0.5).collect();
                let size = assignment.iter().filter(|b| **b).count();
                incumbent.offer(size, &assignment);
                Ok(Some(Candidate { size, assignment }))
            },
            Some(v) => {
                self.stats.nb_branchings += 1;
                trace!(
                    "branching on {} (value {:.4}, depth {}, {} constraints)",
                    v, values[v], relaxation.depth(), relaxation.nb_constraints()
                );
                let with_v = self.branching(&relaxation.branch(v, true), incumbent, stopping_criterion)?;
                let without_v = self.branching(&relaxation.branch(v, false), incumbent, stopping_criterion)?;
                Ok(best_candidate(with_v, without_v))
            },
        }
    }
}


/** computes a maximum clique with the default LP solver and no time limit */
pub fn lp_max_clique(inst:Rc<dyn GraphInstance>, config:BnbConfig) -> Result<CliqueResult> {
    LpCliqueBnb::new(inst, GoodLpSolver::new(), config).solve(NeverStoppingCriterion::default())
}
