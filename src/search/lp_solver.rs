use good_lp::{constraint, variable, Expression, ProblemVariables, ResolutionError, Solution, SolverModel, Variable};
use good_lp::solvers::minilp::minilp;
use log::trace;

use crate::error::{CliqueError, Result};

use super::clique_relaxation::Relaxation;


/** result of a relaxation solve */
#[derive(Debug, Clone, PartialEq)]
pub enum LpOutcome {
    /// optimal solution found
    Optimal {
        /// values[v]: value of the variable of vertex v
        values: Vec<f64>,
        /// objective value (sum of the values)
        objective: f64,
    },
    /// no assignment satisfies the constraints (conflicting fixings)
    Infeasible,
}

/** solves the continuous relaxation of a search tree node */
pub trait LpSolver {
    /// returns the optimal primal solution, or `LpOutcome::Infeasible`
    fn solve(&mut self, relaxation:&Relaxation) -> Result<LpOutcome>;
}

/** LP solver backed by good_lp (minilp backend). Builds a fresh model for each node. */
#[derive(Debug, Default, Clone)]
pub struct GoodLpSolver {
    /// number of models solved so far
    nb_solves: usize,
}

impl GoodLpSolver {
    /// creates a new solver
    pub fn new() -> Self { Self::default() }

    /// number of models solved so far
    pub fn nb_solves(&self) -> usize { self.nb_solves }
}

impl LpSolver for GoodLpSolver {
    fn solve(&mut self, relaxation:&Relaxation) -> Result<LpOutcome> {
        self.nb_solves += 1;
        let n = relaxation.nb_variables();
        let mut model = ProblemVariables::new();
        // x_{v}: vertex v is in the clique
        let x:Vec<Variable> = (0..n).map(|_| model.add(variable().min(0).max(1))).collect();
        // ∑_{v} x_v -> max
        let mut obj_expr = Expression::with_capacity(n);
        for xv in x.iter() { obj_expr.add_mul(1., *xv); }
        let mut problem = model.maximise(obj_expr).using(minilp);
        // ∑_{v ∈ row} x_v <= 1
        for row in relaxation.rows() {
            let mut cst = Expression::with_capacity(row.len());
            for v in row { cst.add_mul(1., x[*v]); }
            problem = problem.with(cst.leq(1));
        }
        // x_v = 0 or x_v = 1 (branching decisions)
        for (v, value) in relaxation.fixings() {
            problem = problem.with(constraint::eq(x[v], if value { 1. } else { 0. }));
        }
        match problem.solve() {
            Ok(sol) => {
                let values:Vec<f64> = x.iter().map(|xv| sol.value(*xv)).collect();
                let objective:f64 = values.iter().sum();
                trace!("lp solved (depth {}): {:.4}", relaxation.depth(), objective);
                Ok(LpOutcome::Optimal { values, objective })
            },
            Err(ResolutionError::Infeasible) => {
                trace!("lp infeasible (depth {})", relaxation.depth());
                Ok(LpOutcome::Infeasible)
            },
            Err(e) => Err(CliqueError::Solver(format!("{:?}", e))),
        }
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    use crate::color::GraphInstance;
    use crate::dimacs::DimacsInstance;
    use crate::search::clique_independent_sets::independent_sets;
    use crate::search::coloring_strategy::ColoringStrategy;

    const EPS:f64 = 1e-6;

    fn root(inst:&dyn GraphInstance) -> Relaxation {
        Relaxation::build(inst, independent_sets(inst, ColoringStrategy::default()))
    }

    fn objective(outcome:&LpOutcome) -> f64 {
        match outcome {
            LpOutcome::Optimal { objective, .. } => *objective,
            LpOutcome::Infeasible => panic!("unexpected infeasible relaxation"),
        }
    }

    #[test]
    fn test_triangle_integral() {
        let inst = DimacsInstance::from_file("insts/triangle.clq").unwrap();
        let mut solver = GoodLpSolver::new();
        match solver.solve(&root(&inst)).unwrap() {
            LpOutcome::Optimal { values, objective } => {
                assert!((objective - 3.).abs() < EPS);
                assert!(values.iter().all(|x| (x - 1.).abs() < EPS));
            },
            LpOutcome::Infeasible => panic!("triangle should be feasible"),
        }
        assert_eq!(solver.nb_solves(), 1);
    }

    #[test]
    fn test_path_bound() {
        let inst = DimacsInstance::from_edges(4, &[(0,1),(1,2),(2,3)]);
        let relax = root(&inst);
        let outcome = GoodLpSolver::new().solve(&relax).unwrap();
        assert!((objective(&outcome) - 2.).abs() < EPS);
        if let LpOutcome::Optimal { values, .. } = outcome {
            assert!(relax.is_satisfied_by(&values, EPS));
        }
    }

    #[test]
    fn test_fixing_is_respected() {
        let inst = DimacsInstance::from_edges(4, &[]);
        let relax = root(&inst).branch(2, true);
        match GoodLpSolver::new().solve(&relax).unwrap() {
            LpOutcome::Optimal { values, objective } => {
                assert!((objective - 1.).abs() < EPS);
                assert!((values[2] - 1.).abs() < EPS);
            },
            LpOutcome::Infeasible => panic!("should be feasible"),
        }
        let relax = root(&inst).branch(2, false).branch(0, false).branch(1, false).branch(3, false);
        assert!(objective(&GoodLpSolver::new().solve(&relax).unwrap()).abs() < EPS);
    }

    #[test]
    fn test_conflicting_fixings_are_infeasible() {
        let inst = DimacsInstance::from_edges(4, &[(0,1),(1,2),(2,3)]);
        let relax = root(&inst).branch(0, true).branch(3, true);
        assert_eq!(GoodLpSolver::new().solve(&relax).unwrap(), LpOutcome::Infeasible);
    }
}
