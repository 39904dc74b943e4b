/// Lexer configuration
///
/// None of the options change the produced tokens; they only decide how the
/// family-signature checks are scheduled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LexOptions {
    /// Run the per-blank-line signature checks on the rayon pool
    pub parallel_signatures: bool,
    /// Minimum number of blank-line boundaries before the parallel path is taken
    pub parallel_threshold: usize,
}

impl Default for LexOptions {
    fn default() -> Self {
        Self {
            parallel_signatures: true,
            parallel_threshold: 8,
        }
    }
}

impl LexOptions {
    /// Options that keep every check on the calling thread
    pub fn sequential() -> Self {
        Self {
            parallel_signatures: false,
            ..Self::default()
        }
    }

    /// Decide whether `boundaries` blank-line checks go to the rayon pool
    pub fn runs_parallel(&self, boundaries: usize) -> bool {
        self.parallel_signatures && boundaries >= self.parallel_threshold
    }
}
