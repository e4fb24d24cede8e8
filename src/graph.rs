use bit_set::BitSet;

use crate::error::Error;

/** Vertex Id (0-indexed internally; DIMACS files are 1-indexed) */
pub type VertexId = usize;

/** models a maximum clique instance.
The graph is simple and undirected: construction discards self-loops and
collapses duplicate edges, and adjacency is kept symmetric. Solvers only
read it; the ACO solver keeps its pheromone trails in a separate arena. */
#[derive(Debug, Clone)]
pub struct Instance {
    /// nb vertices
    n: usize,
    /// nb edges
    m: usize,
    /// edges of the graph (u < v)
    edges: Vec<(VertexId,VertexId)>,
    /// adj_list[i]: sorted list of vertices adjacent to i
    adj_list: Vec<Vec<VertexId>>,
    /// adj_matrix[i]: bitset of the neighbors of i
    adj_matrix: Vec<BitSet>,
}


impl Instance {

    /// number of vertices
    pub fn n(&self) -> usize { self.n }

    /// number of edges
    pub fn m(&self) -> usize { self.m }

    /// list of vertices adjacent to vertex i (ascending)
    pub fn adj(&self, i:VertexId) -> &[VertexId] {
        &self.adj_list[i]
    }

    /// degree of vertex i
    pub fn degree(&self, i:VertexId) -> usize {
        self.adj_list[i].len()
    }

    /// neighbors of vertex i as a bitset (used for candidate intersections)
    pub fn neighbors_bitset(&self, i:VertexId) -> &BitSet {
        &self.adj_matrix[i]
    }

    /// edge list (u < v)
    pub fn edges(&self) -> &[(VertexId, VertexId)] {
        &self.edges
    }

    /// iterator over the vertex ids
    pub fn vertices(&self) -> std::ops::Range<VertexId> { 0..self.n }

    /// returns true iff a and b are adjacent, O(1)
    pub fn are_adjacent(&self, a:VertexId, b:VertexId) -> bool {
        self.adj_matrix[a].contains(b)
    }

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

    /** constructor from an edge list. Self-loops are discarded and duplicate
    edges collapse to one (idempotent insertion), so the invariants hold for
    any input. */
    pub fn from_edge_list(n:usize, edge_list:&[(VertexId,VertexId)]) -> Self {
        let mut adj_matrix = vec![BitSet::with_capacity(n); n];
        for &(a,b) in edge_list {
            if a == b { continue; }
            adj_matrix[a].insert(b);
            adj_matrix[b].insert(a);
        }
        // BitSet iteration is ascending: adjacency lists come out sorted
        let adj_list:Vec<Vec<VertexId>> = adj_matrix.iter()
            .map(|row| row.iter().collect()).collect();
        let edges = Self::build_edges(&adj_list);
        let m = edges.len();
        Self { n, m, edges, adj_list, adj_matrix }
    }

    /** constructor using an adjacency list (normalized through the edge-list
    constructor, so symmetry is enforced even on one-sided input) */
    pub fn new(adj_list:Vec<Vec<VertexId>>) -> Self {
        let n = adj_list.len();
        let mut pairs = Vec::new();
        for (a,l) in adj_list.iter().enumerate() {
            for b in l { pairs.push((a,*b)); }
        }
        Self::from_edge_list(n, &pairs)
    }

    /// creates an instance from a DIMACS file
    pub fn from_file(filename:&str) -> Result<Self, Error> {
        crate::dimacs::read_from_file(filename)
    }

    /// print statistics of the instance
    pub fn display_statistics(&self) {
        println!("\t{} \t vertices", self.n());
        println!("\t{} \t edges", self.m());
        if self.n() > 0 {
            let degrees:Vec<usize> = self.vertices().map(|i| self.degree(i)).collect();
            println!("\t{} \t min degree", degrees.iter().min().unwrap());
            println!("\t{} \t max degree", degrees.iter().max().unwrap());
        }
    }
}


/** returns true iff `sol` is a clique of the instance
(no duplicates, every pair adjacent) */
pub fn is_clique(inst:&Instance, sol:&[VertexId]) -> bool {
    let mut seen = BitSet::with_capacity(inst.n());
    for &v in sol {
        if v >= inst.n() || seen.contains(v) { return false; }
        seen.insert(v);
    }
    for (i,&a) in sol.iter().enumerate() {
        for &b in sol.iter().skip(i+1) {
            if !inst.are_adjacent(a,b) { return false; }
        }
    }
    true
}

/** returns true iff `sol` is a maximal clique
(a clique that no remaining vertex can extend) */
pub fn is_maximal_clique(inst:&Instance, sol:&[VertexId]) -> bool {
    if !is_clique(inst, sol) { return false; }
    let mut members = BitSet::with_capacity(inst.n());
    for &v in sol { members.insert(v); }
    inst.vertices().all(|v|
        members.contains(v) || !sol.iter().all(|&u| inst.are_adjacent(u,v))
    )
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_edge_list() {
        let inst = Instance::from_edge_list(4, &[(0,1),(1,2),(2,3),(1,0),(2,2)]);
        assert_eq!(inst.n(), 4);
        assert_eq!(inst.m(), 3); // duplicate and self-loop dropped
        assert_eq!(inst.adj(1), &[0,2]);
        assert!(inst.are_adjacent(0,1));
        assert!(inst.are_adjacent(1,0));
        assert!(!inst.are_adjacent(0,3));
    }

    #[test]
    fn test_one_sided_adj_list_is_symmetrized() {
        let inst = Instance::new(vec![vec![1], vec![], vec![1]]);
        assert!(inst.are_adjacent(1,0));
        assert!(inst.are_adjacent(1,2));
        assert_eq!(inst.degree(1), 2);
    }

    #[test]
    fn test_is_clique() {
        let inst = Instance::from_edge_list(4, &[(0,1),(1,2),(0,2),(2,3)]);
        assert!(is_clique(&inst, &[]));
        assert!(is_clique(&inst, &[3]));
        assert!(is_clique(&inst, &[0,1,2]));
        assert!(!is_clique(&inst, &[0,1,3]));
        assert!(!is_clique(&inst, &[0,0]));
    }

    #[test]
    fn test_is_maximal_clique() {
        let inst = Instance::from_edge_list(4, &[(0,1),(1,2),(0,2),(2,3)]);
        assert!(is_maximal_clique(&inst, &[0,1,2]));
        assert!(!is_maximal_clique(&inst, &[0,1])); // extendable by 2
        assert!(is_maximal_clique(&inst, &[2,3]));
        assert!(!is_maximal_clique(&inst, &[]));
    }
}
