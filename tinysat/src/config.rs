//! Solver configuration.
//!
//! Variable-activity decay, clause-activity decay, and clause-reduction/restart intervals all
//! have no place here, since branching heuristics, clause deletion, and restarts are all out of
//! scope. What remains is an opaque iteration-cap cancellation knob and a verbosity toggle,
//! passed in at construction time rather than read from a process-wide mutable.

/// Configurable parameters used during solving.
#[derive(Clone, Copy, Debug)]
pub struct SolverConfig {
    /// Maximum number of driver iterations (DECIDE/PROPAGATE/ANALYZE steps combined) before the
    /// search aborts as `unknown`. `None` means unbounded. This is an opaque abort mechanism; it
    /// leaves no resumable state behind.
    pub max_iterations: Option<u64>,

    /// Enables per-decision/per-conflict trace-level logging of the search.
    pub verbose: bool,
}

impl Default for SolverConfig {
    fn default() -> SolverConfig {
        SolverConfig {
            max_iterations: None,
            verbose: false,
        }
    }
}
