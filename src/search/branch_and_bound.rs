use std::time::{Duration, Instant};

use bit_set::BitSet;
use log::info;

use crate::graph::{Instance, VertexId};
use crate::stopping::StoppingCriterion;

/** outcome of an exact run.
When the lower bound was not improved upon, `size` equals the bound and
`clique` is empty. */
#[derive(Debug, Clone)]
pub struct BranchAndBoundResult {
    /// size of the best clique found (or the initial lower bound)
    pub size: usize,
    /// best clique found (empty if the lower bound was not beaten)
    pub clique: Vec<VertexId>,
    /// wall time of the whole run
    pub elapsed: Duration,
    /// number of recursive calls performed
    pub nb_calls: usize,
    /// true iff the stopping criterion fired before the search was exhaustive
    pub interrupted: bool,
}

/** exact maximum clique search.
The maximum clique is found by computing, for each vertex v in increasing id
order, the largest clique containing v among the vertices with a larger id
(a clique is attributed to its smallest member, which avoids recomputation).
The current maximum persists across the outer loop, which makes the prunings
increasingly effective:
1. skip v entirely if degree(v) < cur_max;
2. only neighbors with a larger id enter the candidate set;
3. ... and only if their own degree reaches cur_max;
4. abandon a candidate set once size + |U| ≤ cur_max;
5. filter by degree again before intersecting during the recursion.

The per-run search state lives in this struct, so instances are re-entrant:
one `BranchAndBound` per run. */
#[derive(Debug)]
pub struct BranchAndBound {
    /// initial lower bound (only cliques strictly larger are reported)
    lower_bound: usize,
    /// size of the best clique encountered so far
    cur_max: usize,
    /// best clique encountered so far
    best_clique: Vec<VertexId>,
    /// number of recursive calls
    nb_calls: usize,
}

impl BranchAndBound {

    /** creates a solver. With `lower_bound = 0` the result is the global
    maximum; with a larger bound, only cliques of size > lower_bound are
    searched for. */
    pub fn new(lower_bound:usize) -> Self {
        Self {
            lower_bound,
            cur_max: lower_bound,
            best_clique: Vec::new(),
            nb_calls: 0,
        }
    }

    /** runs the search. Deterministic: the candidate removal order is fixed
    (ascending vertex id), so repeated runs report the same clique. The
    stopping criterion is polled between top-level vertex iterations; an
    interrupted run keeps the best clique found so far. */
    pub fn run(&mut self, inst:&Instance, stopping:&impl StoppingCriterion) -> BranchAndBoundResult {
        let start = Instant::now();
        let interrupted = self.max_clique(inst, stopping);
        let elapsed = start.elapsed();
        info!(
            "clique size: {}, time(ms): {:.3}",
            self.cur_max, elapsed.as_secs_f64()*1000.
        );
        BranchAndBoundResult {
            size: self.cur_max,
            clique: self.best_clique.clone(),
            elapsed,
            nb_calls: self.nb_calls,
            interrupted,
        }
    }

    /// main routine: builds the pruned candidate set of each vertex and
    /// recurses. Returns true iff interrupted.
    fn max_clique(&mut self, inst:&Instance, stopping:&impl StoppingCriterion) -> bool {
        self.cur_max = self.lower_bound;
        self.best_clique.clear();
        self.nb_calls = 0;
        for v in inst.vertices() {
            if stopping.is_finished() { return true; }
            if inst.degree(v) < self.cur_max { continue; } // pruning 1
            let mut candidates = BitSet::with_capacity(inst.n());
            for &w in inst.adj(v) {
                // prunings 2 & 3
                if w > v && inst.degree(w) >= self.cur_max {
                    candidates.insert(w);
                }
            }
            let mut cur_clique = vec![v];
            self.clique(inst, candidates, 1, &mut cur_clique);
        }
        false
    }

    /** recursive subroutine: enumerates the relevant cliques extending
    `cur_clique` with vertices of `candidates`, updating the incumbent at the
    leaves. Candidates are consumed in ascending id order (fixed tie-break:
    among several maximum cliques, the lexicographically smallest reachable
    one is reported). */
    fn clique(&mut self, inst:&Instance, mut candidates:BitSet, size:usize, cur_clique:&mut Vec<VertexId>) {
        self.nb_calls += 1;
        if candidates.is_empty() {
            if size > self.cur_max { // strict: ties keep the first maximum found
                self.cur_max = size;
                self.best_clique = cur_clique.clone();
            }
            return;
        }
        while !candidates.is_empty() {
            if size + candidates.len() <= self.cur_max { return; } // pruning 4
            let x = candidates.iter().next().unwrap(); // non-empty
            candidates.remove(x);
            // pruning 5: degree filter before intersecting
            let mut next_candidates = BitSet::with_capacity(inst.n());
            for w in candidates.iter() {
                if inst.are_adjacent(x, w) && inst.degree(w) >= self.cur_max {
                    next_candidates.insert(w);
                }
            }
            cur_clique.push(x);
            self.clique(inst, next_candidates, size+1, cur_clique);
            cur_clique.pop();
        }
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    use rand::{Rng, SeedableRng, rngs::StdRng};

    use crate::graph::is_clique;
    use crate::stopping::{NeverStopping, TimeStopping};

    fn solve(inst:&Instance, lb:usize) -> BranchAndBoundResult {
        BranchAndBound::new(lb).run(inst, &NeverStopping)
    }

    fn random_instance(n:usize, p:f64, seed:u64) -> Instance {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut edge_list = Vec::new();
        for a in 0..n {
            for b in (a+1)..n {
                if rng.gen::<f64>() < p { edge_list.push((a,b)); }
            }
        }
        Instance::from_edge_list(n, &edge_list)
    }

    /// max clique size by subset enumeration (small instances only)
    fn brute_force(inst:&Instance) -> usize {
        let n = inst.n();
        assert!(n <= 20);
        let mut best = 0;
        for mask in 0u32..(1<<n) {
            let vertices:Vec<VertexId> = (0..n).filter(|v| mask >> v & 1 == 1).collect();
            if vertices.len() > best && is_clique(inst, &vertices) {
                best = vertices.len();
            }
        }
        best
    }

    #[test]
    fn test_triangle() {
        let inst = Instance::from_edge_list(3, &[(0,1),(1,2),(0,2)]);
        let res = solve(&inst, 0);
        assert_eq!(res.size, 3);
        assert_eq!(res.clique, vec![0,1,2]);
    }

    #[test]
    fn test_path_has_no_triangle() {
        let inst = Instance::from_edge_list(4, &[(0,1),(1,2),(2,3)]);
        let res = solve(&inst, 0);
        assert_eq!(res.size, 2);
        assert!(is_clique(&inst, &res.clique));
    }

    #[test]
    fn test_isolated_vertex_ignored() {
        // vertex 0 isolated, triangle on 1-2-3
        let inst = Instance::from_edge_list(4, &[(1,2),(2,3),(1,3)]);
        let res = solve(&inst, 0);
        assert_eq!(res.size, 3);
        assert_eq!(res.clique, vec![1,2,3]);
    }

    #[test]
    fn test_empty_graph() {
        let inst = Instance::new(Vec::new());
        let res = solve(&inst, 0);
        assert_eq!(res.size, 0);
        assert!(res.clique.is_empty());
        assert!(!res.interrupted);
    }

    #[test]
    fn test_edgeless_graph() {
        let inst = Instance::new(vec![Vec::new(); 5]);
        let res = solve(&inst, 0);
        assert_eq!(res.size, 1);
    }

    #[test]
    fn test_petersen_from_file() {
        let inst = Instance::from_file("insts/petersen.col").unwrap();
        assert_eq!(solve(&inst, 0).size, 2);
    }

    #[test]
    fn test_disconnected_from_file() {
        let inst = Instance::from_file("insts/disconnected.col").unwrap();
        let res = solve(&inst, 0);
        assert_eq!(res.size, 3);
        assert_eq!(res.clique, vec![1,2,3]);
    }

    #[test]
    fn test_matches_brute_force() {
        for seed in 0..5 {
            let inst = random_instance(10, 0.5, seed);
            let res = solve(&inst, 0);
            assert!(is_clique(&inst, &res.clique));
            assert_eq!(res.clique.len(), res.size);
            assert_eq!(res.size, brute_force(&inst), "seed {}", seed);
        }
    }

    #[test]
    fn test_deterministic() {
        let inst = random_instance(12, 0.6, 42);
        let first = solve(&inst, 0);
        let second = solve(&inst, 0);
        assert_eq!(first.size, second.size);
        assert_eq!(first.clique, second.clique);
    }

    #[test]
    fn test_lower_bound_below_max() {
        let inst = random_instance(10, 0.6, 7);
        let max = solve(&inst, 0).size;
        assert_eq!(solve(&inst, max-1).size, max);
    }

    #[test]
    fn test_lower_bound_above_max_reports_the_bound() {
        let inst = Instance::from_edge_list(3, &[(0,1),(1,2),(0,2)]);
        let res = solve(&inst, 10);
        assert_eq!(res.size, 10);
        assert!(res.clique.is_empty());
    }

    #[test]
    fn test_expired_budget_interrupts() {
        let inst = random_instance(10, 0.5, 0);
        let res = BranchAndBound::new(0).run(&inst, &TimeStopping::new(0.));
        assert!(res.interrupted);
        assert_eq!(res.size, 0);
    }
}
