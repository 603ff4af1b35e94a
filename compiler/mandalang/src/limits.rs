//! The small configurable surface of the engine (§4.9): a static bound on function arity and an
//! optional guard on how long a single input line may be.

/// Tunables threaded into [`crate::Module::with_limits`].
#[derive(Copy, Clone, Debug)]
pub struct Limits {
    /// Static bound on a function literal's parameter count (§3: "the 16-parameter cap is a
    /// deliberate static bound"). Exceeding it fails with `not_enough_memory`.
    pub max_function_params: usize,
    /// Optional cap on the byte length of a single submitted line. `None` means unbounded.
    pub max_source_len: Option<usize>,
}

impl Default for Limits {
    fn default() -> Self {
        Limits {
            max_function_params: mandalang_ir::DEFAULT_MAX_FUNCTION_PARAMS,
            max_source_len: None,
        }
    }
}
