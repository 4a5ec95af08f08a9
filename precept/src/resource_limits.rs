/// Resource limits to prevent abuse and enable predictable memory usage
///
/// These limits protect against malicious questionnaires while being generous
/// enough for all legitimate regulatory forms.
#[derive(Debug, Clone)]
pub struct ResourceLimits {
    /// Maximum compiled program size in bytes
    /// Real usage: ~4KB of facts and rules, Limit: 1MB (250x)
    pub max_program_bytes: usize,

    /// Maximum inference steps per query before the resolver gives up
    /// Real usage: ~100 steps, Limit: 100,000 (1000x)
    ///
    /// Exhaustion surfaces as an inconclusive (failing) answer, never as
    /// a crash or a hang.
    pub max_inference_steps: usize,

    /// Maximum solutions collected per query during enumeration
    /// Real usage: a handful, Limit: 256
    pub max_solutions: usize,

    /// Maximum term nesting depth accepted by the parser
    /// Real usage: ~4 levels, Limit: 64 (16x)
    pub max_term_depth: usize,
}

impl Default for ResourceLimits {
    fn default() -> Self {
        Self {
            max_program_bytes: 1024 * 1024, // 1 MB
            max_inference_steps: 100_000,
            max_solutions: 256,
            max_term_depth: 64,
        }
    }
}

impl ResourceLimits {
    /// Create a new ResourceLimits with default values
    pub fn new() -> Self {
        Self::default()
    }
}
