//! Maximum clique solvers for DIMACS-style graph instances

// #![warn(clippy::all, clippy::pedantic)]
// useful additional warnings if docs are missing, or crates imported but unused, etc.
#![warn(missing_debug_implementations)]
#![warn(missing_docs)]
#![warn(trivial_casts, trivial_numeric_casts)]
#![warn(unsafe_code)]
#![warn(unused_extern_crates)]
#![warn(variant_size_differences)]

// not sure if already by default in clippy
#![warn(clippy::similar_names)]
#![warn(clippy::shadow_unrelated)]
#![warn(clippy::shadow_same)]
#![warn(clippy::shadow_reuse)]


/// crate error type
pub mod error;

/// graph instance, vertex ids and clique checkers
pub mod graph;

/// read DIMACS formats
pub mod dimacs;

/// stopping criteria checked at solver checkpoints
pub mod stopping;

/// maximum clique solvers
pub mod search;

/// helper and utility methods for executables
pub mod util;
