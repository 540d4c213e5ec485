use std::rc::Rc;

use log::debug;

use crate::color::{GraphInstance, VertexId};


/** LP relaxation of the maximum clique problem (shared by every node of the search tree).

```text
x_1 + x_2 + ... + x_n -> max
∑_{v ∈ S} x_v <= 1          ∀ S independent set
x_u + x_v <= 1              ∀ u < v, (u,v) not an edge
0 <= x_v <= 1               ∀ v
```
*/
#[derive(Debug)]
pub struct CliqueLp {
    /// nb variables (one per vertex)
    nb_vars: usize,
    /// rows[i]: variables of the ith "at most one" constraint
    rows: Vec<Vec<VertexId>>,
    /// the first nb_set_rows rows come from the independent sets, the others are non-edges
    nb_set_rows: usize,
}

/** x_var = value, linked to the fixings of the parent node */
#[derive(Debug)]
struct Fixing {
    var: VertexId,
    value: bool,
    parent: Option<Rc<Fixing>>,
}

/** node of the search tree: the base relaxation extended with equality constraints.
Cloning or branching never copies the constraints, children share them with their parent. */
#[derive(Debug, Clone)]
pub struct Relaxation {
    lp: Rc<CliqueLp>,
    fixings: Option<Rc<Fixing>>,
    depth: usize,
}

impl Relaxation {

    /** builds the root relaxation: one row per independent set, then one row per pair of
    non-adjacent vertices (lexicographic order). */
    pub fn build(inst:&dyn GraphInstance, independent_sets:Vec<Vec<VertexId>>) -> Self {
        let nb_set_rows = independent_sets.len();
        let mut rows = independent_sets;
        rows.extend(inst.complement_edges().into_iter().map(|(u,v)| vec![u,v]));
        debug!(
            "relaxation: {} variables, {} independent set rows, {} non-edge rows",
            inst.nb_vertices(), nb_set_rows, rows.len() - nb_set_rows
        );
        Self {
            lp: Rc::new(CliqueLp { nb_vars: inst.nb_vertices(), rows, nb_set_rows }),
            fixings: None,
            depth: 0,
        }
    }

    /// number of variables
    pub fn nb_variables(&self) -> usize { self.lp.nb_vars }

    /// every "at most one" row (independent sets first)
    pub fn rows(&self) -> &[Vec<VertexId>] { &self.lp.rows }

    /// rows generated by the independent sets
    pub fn independent_set_rows(&self) -> &[Vec<VertexId>] { &self.lp.rows[..self.lp.nb_set_rows] }

    /// rows generated by the non-adjacent pairs
    pub fn non_edge_rows(&self) -> &[Vec<VertexId>] { &self.lp.rows[self.lp.nb_set_rows..] }

    /// number of fixed variables
    pub fn depth(&self) -> usize { self.depth }

    /// number of constraints (rows and fixings)
    pub fn nb_constraints(&self) -> usize { self.lp.rows.len() + self.depth }

    /** returns a child relaxation where x_var = value. */
    pub fn branch(&self, var:VertexId, value:bool) -> Self {
        debug_assert!(var < self.nb_variables());
        debug_assert!(self.fixed_value(var).is_none(), "variable {} already fixed", var);
        Self {
            lp: Rc::clone(&self.lp),
            fixings: Some(Rc::new(Fixing { var, value, parent: self.fixings.clone() })),
            depth: self.depth + 1,
        }
    }

    /// fixed variables, from the root to this node
    pub fn fixings(&self) -> Vec<(VertexId, bool)> {
        let mut res = Vec::with_capacity(self.depth);
        let mut current = self.fixings.as_deref();
        while let Some(f) = current {
            res.push((f.var, f.value));
            current = f.parent.as_deref();
        }
        res.reverse();
        res
    }

    /// value of a fixed variable (the deepest fixing wins)
    pub fn fixed_value(&self, var:VertexId) -> Option<bool> {
        let mut current = self.fixings.as_deref();
        while let Some(f) = current {
            if f.var == var { return Some(f.value); }
            current = f.parent.as_deref();
        }
        None
    }

    /// true if the assignment satisfies bounds, rows and fixings (up to eps)
    pub fn is_satisfied_by(&self, values:&[f64], eps:f64) -> bool {
        values.len() == self.nb_variables()
            && values.iter().all(|x| *x >= -eps && *x <= 1.+eps)
            && self.rows().iter().all(|row| row.iter().map(|v| values[*v]).sum::<f64>() <= 1.+eps)
            && self.fixings().iter().all(|(v,value)| {
                (values[*v] - if *value { 1. } else { 0. }).abs() <= eps
            })
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    use crate::dimacs::DimacsInstance;
    use crate::search::clique_independent_sets::independent_sets;
    use crate::search::coloring_strategy::ColoringStrategy;

    fn path4() -> DimacsInstance {
        DimacsInstance::from_edges(4, &[(0,1),(1,2),(2,3)])
    }

    #[test]
    fn test_build_path() {
        let inst = path4();
        let sets = independent_sets(&inst, ColoringStrategy::default());
        let relax = Relaxation::build(&inst, sets.clone());
        assert_eq!(relax.nb_variables(), 4);
        assert_eq!(relax.independent_set_rows(), sets.as_slice());
        assert_eq!(relax.non_edge_rows(), &[vec![0,2], vec![0,3], vec![1,3]]);
        assert_eq!(relax.nb_constraints(), sets.len() + 3);
        assert_eq!(relax.depth(), 0);
    }

    #[test]
    fn test_every_non_edge_once() {
        let inst = DimacsInstance::from_file("insts/two_triangles.clq").unwrap();
        let relax = Relaxation::build(&inst, vec![]);
        for u in 0..6 {
            for v in u+1..6 {
                let nb = relax.non_edge_rows().iter().filter(|r| r[..] == [u,v]).count();
                assert_eq!(nb, if inst.are_adjacent(u, v) { 0 } else { 1 });
            }
        }
    }

    #[test]
    fn test_cliques_are_feasible() {
        let inst = DimacsInstance::from_file("insts/two_triangles.clq").unwrap();
        let relax = Relaxation::build(&inst, independent_sets(&inst, ColoringStrategy::default()));
        assert!(relax.is_satisfied_by(&[1.,1.,1.,0.,0.,0.], 1e-9));
        assert!(relax.is_satisfied_by(&[0.,0.,0.,0.,1.,1.], 1e-9));
        assert!(!relax.is_satisfied_by(&[1.,0.,0.,1.,0.,0.], 1e-9));
    }

    #[test]
    fn test_branch_does_not_modify_parent() {
        let inst = path4();
        let root = Relaxation::build(&inst, vec![]);
        let left = root.branch(1, true);
        let right = root.branch(1, false);
        let left_left = left.branch(2, false);
        assert!(root.fixings().is_empty());
        assert_eq!(left.fixings(), vec![(1,true)]);
        assert_eq!(right.fixings(), vec![(1,false)]);
        assert_eq!(left_left.fixings(), vec![(1,true),(2,false)]);
        assert_eq!(left_left.depth(), 2);
        assert_eq!(left_left.nb_constraints(), root.nb_constraints() + 2);
        assert_eq!(left_left.fixed_value(1), Some(true));
        assert_eq!(left_left.fixed_value(0), None);
        assert_eq!(right.fixed_value(1), Some(false));
        assert!(left.is_satisfied_by(&[0.,1.,0.,0.], 1e-9));
        assert!(!right.is_satisfied_by(&[0.,1.,0.,0.], 1e-9));
    }
}
