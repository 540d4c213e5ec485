use std::fmt::Debug;
use std::ops::Range;

use bit_set::BitSet;
use log::info;

/** Vertex Id */
pub type VertexId = usize;

/** Solution of a graph coloring problem
(represented as a partition: res[c] lists the vertices colored by c).
*/
pub type Solution = Vec<Vec<VertexId>>;

/** models an undirected graph (vertices are 0..n) */
pub trait GraphInstance: Debug {
    /// number of vertices
    fn nb_vertices(&self) -> usize;

    /// number of edges
    fn nb_edges(&self) -> usize { self.edges().len() }

    /// vertices adjacent to u
    fn neighbors(&self, u:VertexId) -> &[VertexId];

    /// degree of u
    fn degree(&self, u:VertexId) -> usize { self.neighbors(u).len() }

    /// true iff u and v are joined by an edge
    fn are_adjacent(&self, u:VertexId, v:VertexId) -> bool;

    /// edge list (u < v)
    fn edges(&self) -> &[(VertexId, VertexId)];

    /// iterator over the vertices
    fn vertices(&self) -> Range<VertexId> { 0..self.nb_vertices() }

    /** edges of the complement graph: every pair u < v not joined by an edge,
    in lexicographic order. */
    fn complement_edges(&self) -> Vec<(VertexId, VertexId)> {
        let n = self.nb_vertices();
        let mut res = Vec::with_capacity((n*n.saturating_sub(1)/2).saturating_sub(self.nb_edges()));
        for u in 0..n {
            for v in u+1..n {
                if !self.are_adjacent(u, v) {
                    res.push((u,v));
                }
            }
        }
        res
    }

    /// logs some statistics about the graph
    fn display_statistics(&self) {
        info!("\t{} \t vertices", self.nb_vertices());
        info!("\t{} \t edges", self.nb_edges());
        let degrees:Vec<usize> = self.vertices().map(|u| self.degree(u)).collect();
        if let (Some(min), Some(max)) = (degrees.iter().min(), degrees.iter().max()) {
            info!("\t{} \t min degree", min);
            info!("\t{} \t max degree", max);
        }
    }
}

/** result of a checker call */
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckerResult {
    /// valid solution (stores its objective)
    Ok(usize),
    /// vertex id not in the graph
    VertexOutOfRange(VertexId),
    /// vertex present twice
    DuplicateVertex(VertexId),
    /// some vertices are not colored (stores how many)
    MissingVertices(usize),
    /// two adjacent vertices share a color
    Conflict(VertexId, VertexId),
    /// two vertices of the clique are not adjacent
    NotAdjacent(VertexId, VertexId),
}

/** checks that the vertex list represents a clique.
returns the clique size if valid. */
pub fn clique_checker(inst:&dyn GraphInstance, clique:&[VertexId]) -> CheckerResult {
    let mut visited = BitSet::with_capacity(inst.nb_vertices());
    for u in clique {
        if *u >= inst.nb_vertices() { return CheckerResult::VertexOutOfRange(*u); }
        if !visited.insert(*u) { return CheckerResult::DuplicateVertex(*u); }
    }
    for (i,u) in clique.iter().enumerate() {
        for v in &clique[i+1..] {
            if !inst.are_adjacent(*u, *v) { return CheckerResult::NotAdjacent(*u, *v); }
        }
    }
    CheckerResult::Ok(clique.len())
}

/** checks that the partition is a proper coloring of every vertex.
returns the number of colors if valid. */
pub fn coloring_checker(inst:&dyn GraphInstance, sol:&[Vec<VertexId>]) -> CheckerResult {
    let mut visited = BitSet::with_capacity(inst.nb_vertices());
    for c in sol {
        for v in c {
            if *v >= inst.nb_vertices() { return CheckerResult::VertexOutOfRange(*v); }
            if !visited.insert(*v) { return CheckerResult::DuplicateVertex(*v); }
        }
    }
    if visited.len() != inst.nb_vertices() {
        return CheckerResult::MissingVertices(inst.nb_vertices() - visited.len());
    }
    for c in sol {
        for (i,v1) in c.iter().enumerate() {
            for v2 in &c[i+1..] {
                if inst.are_adjacent(*v1, *v2) { return CheckerResult::Conflict(*v1, *v2); }
            }
        }
    }
    CheckerResult::Ok(sol.len())
}
