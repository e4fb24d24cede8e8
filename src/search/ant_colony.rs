use std::time::{Duration, Instant};

use bit_set::BitSet;
use log::info;
use rand::{Rng, SeedableRng, rngs::StdRng};
use rayon::prelude::*;
use serde::Serialize;

use crate::error::Error;
use crate::graph::{Instance, VertexId};
use crate::stopping::StoppingCriterion;

/** parameters of the ant colony search.
`taomin > 0` is a required invariant: it keeps every selection weight strictly
positive, so the probability distribution over candidates is always defined. */
#[derive(Debug, Clone, Serialize)]
pub struct AntColonyConfig {
    /// number of ants per cycle
    pub num_ants: usize,
    /// pheromone floor (must be > 0)
    pub taomin: f64,
    /// pheromone ceiling and initial trail value
    pub taomax: f64,
    /// exponent applied to the pheromone factor of a candidate
    pub alpha: f64,
    /// evaporation coefficient, in (0,1)
    pub rho: f64,
    /// number of cycles to run
    pub max_cycles: usize,
    /// seed of the random streams (one derived stream per ant per cycle)
    pub seed: u64,
}

impl Default for AntColonyConfig {
    fn default() -> Self {
        Self {
            num_ants: 7,
            taomin: 0.01,
            taomax: 4.,
            alpha: 2.,
            rho: 0.995,
            max_cycles: 3000,
            seed: 0,
        }
    }
}

impl AntColonyConfig {
    /// rejects parameter values that make the search undefined
    pub fn validate(&self) -> Result<(), Error> {
        if self.num_ants == 0 {
            return Err(Error::InvalidConfiguration("num_ants must be > 0".to_string()));
        }
        if self.taomin <= 0. {
            return Err(Error::InvalidConfiguration("taomin must be > 0".to_string()));
        }
        if self.taomax < self.taomin {
            return Err(Error::InvalidConfiguration("taomax must be >= taomin".to_string()));
        }
        if self.alpha < 0. {
            return Err(Error::InvalidConfiguration("alpha must be >= 0".to_string()));
        }
        if !(self.rho > 0. && self.rho < 1.) {
            return Err(Error::InvalidConfiguration("rho must be in (0,1)".to_string()));
        }
        if self.max_cycles == 0 {
            return Err(Error::InvalidConfiguration("max_cycles must be > 0".to_string()));
        }
        Ok(())
    }
}

/// outcome of an ant colony run
#[derive(Debug, Clone)]
pub struct AntColonyResult {
    /// best clique found over all cycles
    pub clique: Vec<VertexId>,
    /// size of the best clique
    pub size: usize,
    /// wall time at which the best clique was found, in ms (-1 if none)
    pub time_to_best_ms: f64,
    /// 1-indexed cycle in which the best clique was found (-1 if none)
    pub cycle_of_best: i64,
    /// number of cycles actually run
    pub nb_cycles: usize,
    /// wall time of the whole run
    pub elapsed: Duration,
    /// true iff the stopping criterion fired before max_cycles
    pub interrupted: bool,
}

/** pheromone arena: one cell per undirected edge of the instance.
Ants only read it during construction (the fan-out phase); evaporation and
deposit are the single-writer fan-in phase between cycles. */
#[derive(Debug)]
struct PheromoneTrails {
    /// tao[e]: pheromone of edge e, always within [taomin, taomax]
    tao: Vec<f64>,
    /// adj_edges[v]: (neighbor, edge id) pairs, ascending neighbor id
    adj_edges: Vec<Vec<(VertexId,usize)>>,
}

impl PheromoneTrails {

    /// builds the arena with every trail at taomax
    fn new(inst:&Instance, taomax:f64) -> Self {
        let mut adj_edges = vec![Vec::new(); inst.n()];
        for (e,&(a,b)) in inst.edges().iter().enumerate() {
            adj_edges[a].push((b,e));
            adj_edges[b].push((a,e));
        }
        for l in adj_edges.iter_mut() { l.sort_unstable(); }
        Self { tao: vec![taomax; inst.edges().len()], adj_edges }
    }

    /// multiplicative decay of every trail, floored at taomin
    fn evaporate(&mut self, rho:f64, taomin:f64) {
        for t in self.tao.iter_mut() {
            *t = taomin.max(rho * *t);
        }
    }

    /** rewards the edges of the cycle-best clique: every ordered pair of
    distinct members receives `delta`, capped at taomax (each undirected edge
    is reinforced once from each endpoint). */
    fn deposit(&mut self, clique:&[VertexId], delta:f64, taomax:f64) {
        let mut members = BitSet::new();
        for &v in clique { members.insert(v); }
        for &v in clique {
            for &(w,e) in &self.adj_edges[v] {
                if members.contains(w) {
                    self.tao[e] = taomax.min(self.tao[e] + delta);
                }
            }
        }
    }
}

/** one ant: builds a maximal clique by pheromone-guided randomized growth.
Starts from a uniformly random vertex; while candidates remain, samples the
next member with probability proportional to (sum of trail weights towards
the clique)^alpha, then intersects the candidate set with its neighbors.
The result is maximal by construction: every discarded vertex is non-adjacent
to at least one member. */
fn construct_clique(inst:&Instance, trails:&PheromoneTrails, alpha:f64, rng:&mut StdRng) -> Vec<VertexId> {
    let initial_vertex = rng.gen_range(0..inst.n());
    let mut clique = vec![initial_vertex];
    let mut candidates = inst.neighbors_bitset(initial_vertex).clone();
    // pheromone_factor[v]: sum of trail weights between v and the clique,
    // maintained incrementally (strictly positive for every candidate since
    // candidates are adjacent to all members and taomin > 0)
    let mut pheromone_factor = vec![0.; inst.n()];
    for &(w,e) in &trails.adj_edges[initial_vertex] {
        pheromone_factor[w] = trails.tao[e];
    }
    let mut weights:Vec<(VertexId,f64)> = Vec::new();
    while !candidates.is_empty() {
        // snapshot of the candidates in ascending id order, for a
        // reproducible cumulative-distribution draw
        weights.clear();
        let mut total = 0.;
        for v in candidates.iter() {
            let weight = pheromone_factor[v].powf(alpha);
            total += weight;
            weights.push((v,weight));
        }
        let mut r = rng.gen::<f64>() * total;
        let mut selected = weights[weights.len()-1].0; // fallback absorbs rounding
        for &(v,weight) in &weights {
            if r < weight { selected = v; break; }
            r -= weight;
        }
        clique.push(selected);
        candidates.intersect_with(inst.neighbors_bitset(selected));
        for &(w,e) in &trails.adj_edges[selected] {
            pheromone_factor[w] += trails.tao[e];
        }
    }
    clique
}

/** stochastic maximum clique search by ant colony optimization.
Each cycle fans out `num_ants` independent constructions (sequentially or on
the rayon pool), selects the cardinality-best clique, updates the global best
on strict improvement, then evaporates and deposits pheromone as the single
writer. The stopping criterion is polled between cycles only, so the trail
state is always consistent. */
#[derive(Debug)]
pub struct AntColony {
    /// search parameters
    config: AntColonyConfig,
}

impl AntColony {

    /// creates a solver from a configuration (validated when `run` starts)
    pub fn new(config:AntColonyConfig) -> Self {
        Self { config }
    }

    /// derives the random stream of one ant; sequential and parallel
    /// construction sample identically
    fn ant_rng(&self, cycle:usize, ant:usize) -> StdRng {
        let stream = (cycle * self.config.num_ants + ant) as u64;
        StdRng::seed_from_u64(self.config.seed ^ stream.wrapping_mul(0x9E37_79B9_7F4A_7C15))
    }

    /// runs the search on an instance
    pub fn run(&self, inst:&Instance, parallel:bool, stopping:&impl StoppingCriterion) -> Result<AntColonyResult, Error> {
        self.config.validate()?;
        let start = Instant::now();
        let mut best_clique:Vec<VertexId> = Vec::new();
        let mut time_to_best_ms = -1.;
        let mut cycle_of_best:i64 = -1;
        let mut nb_cycles = 0;
        let mut interrupted = false;
        if inst.n() > 0 {
            let mut trails = PheromoneTrails::new(inst, self.config.taomax);
            for cycle in 0..self.config.max_cycles {
                if stopping.is_finished() { interrupted = true; break; }
                // fan-out: ants read the trails, write nothing
                let cliques:Vec<Vec<VertexId>> = if parallel {
                    (0..self.config.num_ants).into_par_iter()
                        .map(|ant| construct_clique(inst, &trails, self.config.alpha, &mut self.ant_rng(cycle, ant)))
                        .collect()
                } else {
                    (0..self.config.num_ants)
                        .map(|ant| construct_clique(inst, &trails, self.config.alpha, &mut self.ant_rng(cycle, ant)))
                        .collect()
                };
                nb_cycles += 1;
                // selection: maximum cardinality, ties broken by ant order
                let mut cycle_best = &cliques[0];
                for c in &cliques[1..] {
                    if c.len() > cycle_best.len() { cycle_best = c; }
                }
                if cycle_best.len() > best_clique.len() {
                    best_clique = cycle_best.clone();
                    time_to_best_ms = start.elapsed().as_secs_f64()*1000.;
                    cycle_of_best = (cycle+1) as i64;
                    info!("cycle {}: new best clique ({})", cycle+1, best_clique.len());
                }
                // fan-in: single-writer trail update
                trails.evaporate(self.config.rho, self.config.taomin);
                // c_best >= c_k here, so the reward is in (0,1]
                let gap = (best_clique.len() - cycle_best.len()) as f64;
                trails.deposit(cycle_best, 1./(1.+gap), self.config.taomax);
            }
        }
        let elapsed = start.elapsed();
        info!(
            "clique size: {}, req cycles: {}, req time(ms): {:.3}",
            best_clique.len(), cycle_of_best, time_to_best_ms
        );
        Ok(AntColonyResult {
            size: best_clique.len(),
            clique: best_clique,
            time_to_best_ms,
            cycle_of_best,
            nb_cycles,
            elapsed,
            interrupted,
        })
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    use crate::graph::{is_clique, is_maximal_clique};
    use crate::stopping::{NeverStopping, TimeStopping};

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

    fn small_config(max_cycles:usize) -> AntColonyConfig {
        AntColonyConfig { max_cycles, ..AntColonyConfig::default() }
    }

    #[test]
    fn test_triangle() {
        let inst = Instance::from_edge_list(3, &[(0,1),(1,2),(0,2)]);
        let res = AntColony::new(small_config(1)).run(&inst, false, &NeverStopping).unwrap();
        assert_eq!(res.size, 3);
        assert_eq!(res.cycle_of_best, 1);
        assert!(is_clique(&inst, &res.clique));
    }

    #[test]
    fn test_single_vertex() {
        let inst = Instance::new(vec![Vec::new()]);
        let res = AntColony::new(small_config(1)).run(&inst, false, &NeverStopping).unwrap();
        assert_eq!(res.size, 1);
    }

    #[test]
    fn test_empty_graph() {
        let inst = Instance::new(Vec::new());
        let res = AntColony::new(small_config(5)).run(&inst, false, &NeverStopping).unwrap();
        assert_eq!(res.size, 0);
        assert_eq!(res.cycle_of_best, -1);
        assert_eq!(res.time_to_best_ms, -1.);
    }

    #[test]
    fn test_constructed_cliques_are_maximal() {
        for seed in 0..10 {
            let inst = random_instance(15, 0.4, seed);
            let trails = PheromoneTrails::new(&inst, 4.);
            let mut rng = StdRng::seed_from_u64(seed);
            let clique = construct_clique(&inst, &trails, 2., &mut rng);
            assert!(is_maximal_clique(&inst, &clique), "seed {}", seed);
        }
    }

    #[test]
    fn test_pheromone_stays_within_bounds() {
        let inst = random_instance(12, 0.5, 3);
        let config = AntColonyConfig { taomin: 0.01, taomax: 4., rho: 0.5, ..AntColonyConfig::default() };
        let mut trails = PheromoneTrails::new(&inst, config.taomax);
        let mut rng = StdRng::seed_from_u64(9);
        for _ in 0..200 {
            let clique = construct_clique(&inst, &trails, config.alpha, &mut rng);
            trails.evaporate(config.rho, config.taomin);
            trails.deposit(&clique, 1., config.taomax);
            for &t in &trails.tao {
                assert!(t >= config.taomin && t <= config.taomax);
            }
        }
    }

    #[test]
    fn test_sequential_and_parallel_agree() {
        let inst = random_instance(20, 0.5, 11);
        let config = AntColonyConfig { max_cycles: 30, ..AntColonyConfig::default() };
        let sequential = AntColony::new(config.clone()).run(&inst, false, &NeverStopping).unwrap();
        let parallel = AntColony::new(config).run(&inst, true, &NeverStopping).unwrap();
        assert_eq!(sequential.size, parallel.size);
        assert_eq!(sequential.clique, parallel.clique);
        assert_eq!(sequential.cycle_of_best, parallel.cycle_of_best);
    }

    #[test]
    fn test_reproducible_for_a_fixed_seed() {
        let inst = random_instance(20, 0.5, 11);
        let first = AntColony::new(small_config(20)).run(&inst, false, &NeverStopping).unwrap();
        let second = AntColony::new(small_config(20)).run(&inst, false, &NeverStopping).unwrap();
        assert_eq!(first.clique, second.clique);
        assert_eq!(first.cycle_of_best, second.cycle_of_best);
    }

    #[test]
    fn test_invalid_configurations_rejected() {
        let inst = Instance::from_edge_list(3, &[(0,1),(1,2),(0,2)]);
        let invalid = vec![
            AntColonyConfig { num_ants: 0, ..AntColonyConfig::default() },
            AntColonyConfig { taomin: 0., ..AntColonyConfig::default() },
            AntColonyConfig { taomin: 2., taomax: 1., ..AntColonyConfig::default() },
            AntColonyConfig { alpha: -1., ..AntColonyConfig::default() },
            AntColonyConfig { rho: 1., ..AntColonyConfig::default() },
            AntColonyConfig { rho: 0., ..AntColonyConfig::default() },
            AntColonyConfig { max_cycles: 0, ..AntColonyConfig::default() },
        ];
        for config in invalid {
            let res = AntColony::new(config.clone()).run(&inst, false, &NeverStopping);
            assert!(
                matches!(res, Err(Error::InvalidConfiguration(_))),
                "accepted {:?}", config
            );
        }
    }

    #[test]
    fn test_expired_budget_interrupts() {
        let inst = random_instance(10, 0.5, 0);
        let res = AntColony::new(small_config(1000)).run(&inst, false, &TimeStopping::new(0.)).unwrap();
        assert!(res.interrupted);
        assert_eq!(res.nb_cycles, 0);
    }
}
