use log::info;

use crate::color::VertexId;

/** best clique found so far (size and 0/1 assignment of the vertices).
The size never decreases: a new clique is only accepted if it is strictly larger. */
#[derive(Debug, Clone, Default)]
pub struct Incumbent {
    /// size of the best clique
    best_size: usize,
    /// assignment[v]: true iff v belongs to the best clique
    assignment: Vec<bool>,
    /// successive sizes of the improving cliques
    history: Vec<usize>,
}

impl Incumbent {
    /// empty incumbent (size 0) for a graph with n vertices
    pub fn new(n:usize) -> Self {
        Self { best_size: 0, assignment: vec![false ; n], history: Vec::new() }
    }

    /// size of the best clique found so far
    pub fn best_size(&self) -> usize { self.best_size }

    /// 0/1 assignment of the best clique found so far
    pub fn assignment(&self) -> &[bool] { &self.assignment }

    /// vertices of the best clique found so far (increasing ids)
    pub fn clique(&self) -> Vec<VertexId> {
        self.assignment.iter().enumerate().filter(|(_,b)| **b).map(|(v,_)| v).collect()
    }

    /// sizes of the successive improving cliques
    pub fn history(&self) -> &[usize] { &self.history }

    /** replaces the incumbent if size is strictly larger. returns true if replaced. */
    pub fn offer(&mut self, size:usize, assignment:&[bool]) -> bool {
        if size <= self.best_size { return false; }
        info!("new best clique: {}", size);
        self.best_size = size;
        self.assignment = assignment.to_vec();
        self.history.push(size);
        true
    }
}
