//! Solvers for the maximum clique problem.

/// exact branch-and-bound solver
pub mod branch_and_bound;

/// ant colony optimization heuristic
pub mod ant_colony;

/// greedy maximal clique construction
pub mod greedy;
