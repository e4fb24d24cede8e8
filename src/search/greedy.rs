use rand::Rng;

use crate::graph::{Instance, VertexId};

/** single-pass greedy maximal clique.
Starts from a random vertex, then scans all vertices in id order and adds
each one adjacent to every current member. Linear scan, no backtracking;
the result is maximal and can seed the branch-and-bound lower bound. */
pub fn greedy_clique(inst:&Instance, rng:&mut impl Rng) -> Vec<VertexId> {
    if inst.n() == 0 { return Vec::new(); }
    let start = rng.gen_range(0..inst.n());
    let mut clique = vec![start];
    for v in inst.vertices() {
        if v == start { continue; }
        if clique.iter().all(|&u| inst.are_adjacent(u,v)) {
            clique.push(v);
        }
    }
    clique.sort_unstable();
    clique
}
