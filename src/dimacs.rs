use std::fs;

use bit_set::BitSet;
use log::{debug, warn};
use nom::IResult;
use nom::branch::alt;
use nom::bytes::complete::tag;
use nom::character::complete::{digit1, space0, space1};
use nom::combinator::map_res;
use nom::sequence::{preceded, separated_pair, terminated, tuple};

use crate::color::{GraphInstance, VertexId};
use crate::error::{CliqueError, Result};


/** models an undirected graph read from a DIMACS file (`.clq`, `.col`). */
#[derive(Debug)]
pub struct DimacsInstance {
    /// nb vertices
    n: usize,
    /// edges of the graph (u < v)
    edges: Vec<(VertexId,VertexId)>,
    /// adj_list[i]: list of vertices adjacent to i
    adj_list: Vec<Vec<VertexId>>,
    /// adj_matrix[i] represents a bitset of its neighbors
    adj_matrix: Vec<BitSet>,
}

impl GraphInstance for DimacsInstance {
    fn nb_vertices(&self) -> usize { self.n }

    fn neighbors(&self, u:VertexId) -> &[VertexId] { &self.adj_list[u] }

    fn are_adjacent(&self, u:VertexId, v:VertexId) -> bool { self.adj_matrix[u].contains(v) }

    fn edges(&self) -> &[(VertexId, VertexId)] { &self.edges }
}


impl DimacsInstance {

    /// builds the edge list
    fn build_edges(adj_list:&[Vec<VertexId>]) -> Vec<(VertexId,VertexId)> {
        let mut res = Vec::new();
        for (i,l) in adj_list.iter().enumerate() {
            for j in l {
                if i < *j {
                    res.push((i,*j));
                }
            }
        }
        res
    }

    /** constructor using an adjacency list.
    loops, duplicate edges and neighbors outside 0..n are dropped,
    missing symmetric entries are added. */
    pub fn new(adj_list:Vec<Vec<usize>>) -> Self {
        let n = adj_list.len();
        let mut adj_matrix = vec![BitSet::with_capacity(n) ; n];
        for (a,l) in adj_list.iter().enumerate() {
            for b in l {
                if *b >= n {
                    warn!("edge ({},{}) ignored: vertex {} out of range (n={})", a, b, b, n);
                } else if a != *b {
                    adj_matrix[a].insert(*b);
                    adj_matrix[*b].insert(a);
                }
            }
        }
        let adj_list:Vec<Vec<VertexId>> = adj_matrix.iter().map(|s| s.iter().collect()).collect();
        let edges = Self::build_edges(&adj_list);
        Self { n, edges, adj_list, adj_matrix }
    }

    /// constructor using an edge list (0-based endpoints, edges outside 0..n are dropped)
    pub fn from_edges(n:usize, edges:&[(VertexId,VertexId)]) -> Self {
        let mut adj_list = vec![Vec::new() ; n];
        for (a,b) in edges {
            match adj_list.get_mut(*a) {
                Some(l) => l.push(*b),
                None => warn!("edge ({},{}) ignored: vertex {} out of range (n={})", a, b, a, n),
            }
        }
        Self::new(adj_list)
    }

    /// creates an instance from a DIMACS file
    pub fn from_file(filename:&str) -> Result<Self> {
        let content = fs::read_to_string(filename)
            .map_err(|source| CliqueError::Io { path: filename.to_string(), source })?;
        let (n, edges) = parse_dimacs(&content)?;
        Ok(Self::from_edges(n, &edges))
    }

    /** writes a string encoding a clique (one line, DIMACS 1-based vertex ids) */
    pub fn solution_to_string(&self, clique:&[VertexId]) -> String {
        let mut res = String::default();
        for v in clique {
            res += format!("{} ", v+1).as_str();
        }
        res += "\n";
        res
    }

    /** writes a clique into a file. */
    pub fn write_solution(&self, filename:&str, clique:&[VertexId]) -> Result<()> {
        fs::write(filename, self.solution_to_string(clique))
            .map_err(|source| CliqueError::Io { path: filename.to_string(), source })
    }
}


/** parses the content of a DIMACS file, returns (n, edges) with 0-based endpoints.
If the header is missing, n is the largest vertex id seen. */
pub fn parse_dimacs(content:&str) -> Result<(usize, Vec<(VertexId,VertexId)>)> {
    let mut header:Option<(usize,usize)> = None;
    let mut edges = Vec::new();
    for (line_number, raw_line) in content.lines().enumerate() {
        let line = raw_line.trim();
        if line.is_empty() || line.starts_with('c') { continue; }
        if let Ok((_, (n,m))) = read_header(line) {
            header = Some((n,m));
        } else if let Ok((_, (a,b))) = read_edge(line) {
            if a == 0 || b == 0 {
                return Err(CliqueError::Parse(format!(
                    "line {}: vertex ids start at 1 ({})", line_number+1, line
                )));
            }
            if let Some((n,_)) = header {
                if a > n || b > n {
                    return Err(CliqueError::Parse(format!(
                        "line {}: vertex id greater than {} ({})", line_number+1, n, line
                    )));
                }
            }
            edges.push((a-1, b-1));
        } else if line.starts_with('p') || line.starts_with('e') {
            return Err(CliqueError::Parse(format!("line {}: unable to read '{}'", line_number+1, line)));
        } else {
            debug!("line {}: ignored ({})", line_number+1, line);
        }
    }
    let n = match header {
        Some((n,m)) => {
            if edges.len() != m && 2*edges.len() != m {
                warn!("header announces {} edges, {} read", m, edges.len());
            }
            n
        },
        None => {
            warn!("no 'p' header found, inferring the number of vertices");
            edges.iter().map(|(a,b)| a.max(b)+1).max().unwrap_or(0)
        }
    };
    // edges read before the header
    if let Some((a,b)) = edges.iter().find(|(a,b)| *a >= n || *b >= n) {
        return Err(CliqueError::Parse(format!(
            "edge ({},{}): vertex id greater than {}", a+1, b+1, n
        )));
    }
    Ok((n, edges))
}

/// reads a positive integer
fn read_integer(s:&str) -> IResult<&str, usize> {
    map_res(digit1, |d:&str| d.parse::<usize>())(s)
}

/// reads two numbers separated by spaces
fn read_two_integers(s:&str) -> IResult<&str, (usize,usize)> {
    terminated(separated_pair(read_integer, space1, read_integer), space0)(s)
}

/// reads header containing (n,m)
pub fn read_header(s:&str) -> IResult<&str, (usize,usize)> {
    preceded(
        tuple((tag("p"), space1, alt((tag("edge"), tag("col"))), space1)),
        read_two_integers
    )(s)
}

/// reads edge line (WARNING: indices start at 1 in the DIMACS format)
pub fn read_edge(s:&str) -> IResult<&str, (usize,usize)> {
    preceded(tuple((tag("e"), space1)), read_two_integers)(s)
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_instance() {
        let inst = DimacsInstance::from_file("insts/grid2x2.clq").unwrap();
        assert_eq!(inst.nb_vertices(), 4);
        assert_eq!(inst.nb_edges(), 4);
        assert_eq!(inst.neighbors(0), &[1,2]);
    }

    #[test]
    fn test_read_missing_file() {
        assert!(matches!(
            DimacsInstance::from_file("insts/does-not-exist.clq"),
            Err(CliqueError::Io { .. })
        ));
    }

    #[test]
    fn test_read_header() {
        let s = "p edge 2 1";
        assert_eq!(read_header(s).unwrap().1, (2,1));
        assert_eq!(read_header("p col 2 1").unwrap().1, (2,1));
        assert_eq!(read_header("p  edge  12 30 ").unwrap(), ("", (12,30)));
    }

    #[test]
    fn test_read_edge() {
        let s = "e 1 2";
        assert_eq!(read_edge(s).unwrap().1, (1,2));
        assert_eq!(read_edge(s).unwrap().0, "");
        assert!(read_edge("p edge 1 2").is_err());
    }

    #[test]
    fn test_parse_with_comments() {
        let s = "c this is a test comment\r\np edge 3 2\ne 1 2\n\ne 2 3\n";
        let (n, edges) = parse_dimacs(s).unwrap();
        assert_eq!(n, 3);
        assert_eq!(edges, vec![(0,1),(1,2)]);
    }

    #[test]
    fn test_parse_without_header() {
        let (n, edges) = parse_dimacs("e 1 4\ne 2 3\n").unwrap();
        assert_eq!(n, 4);
        assert_eq!(edges.len(), 2);
    }

    #[test]
    fn test_parse_out_of_range() {
        assert!(matches!(parse_dimacs("p edge 2 1\ne 1 3\n"), Err(CliqueError::Parse(_))));
        assert!(matches!(parse_dimacs("p edge 2 1\ne 0 1\n"), Err(CliqueError::Parse(_))));
        assert!(matches!(parse_dimacs("p edge 2 1\ne 1 x\n"), Err(CliqueError::Parse(_))));
    }

    #[test]
    fn test_parse_edge_before_smaller_header() {
        assert!(matches!(parse_dimacs("e 1 5\np edge 3 1\n"), Err(CliqueError::Parse(_))));
        assert!(matches!(
            DimacsInstance::from_file("insts/late_header.clq"),
            Err(CliqueError::Parse(_))
        ));
        let (n, edges) = parse_dimacs("e 1 2\np edge 3 1\n").unwrap();
        assert_eq!(n, 3);
        assert_eq!(edges, vec![(0,1)]);
    }

    #[test]
    fn test_out_of_range_endpoints_dropped() {
        let inst = DimacsInstance::from_edges(3, &[(0,1),(1,4),(5,2)]);
        assert_eq!(inst.nb_vertices(), 3);
        assert_eq!(inst.edges(), &[(0,1)]);
        let inst = DimacsInstance::new(vec![vec![1,7], vec![], vec![]]);
        assert_eq!(inst.nb_edges(), 1);
    }

    #[test]
    fn test_loops_and_duplicates_dropped() {
        let inst = DimacsInstance::from_edges(3, &[(0,1),(1,0),(2,2),(1,2)]);
        assert_eq!(inst.nb_edges(), 2);
        assert!(!inst.are_adjacent(2, 2));
        assert!(inst.are_adjacent(2, 1));
    }

    #[test]
    fn test_solution_to_string() {
        let inst = DimacsInstance::from_edges(3, &[(0,1)]);
        assert_eq!(inst.solution_to_string(&[0,1]), "1 2 \n");
    }
}
