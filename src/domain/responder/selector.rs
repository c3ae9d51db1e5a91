use std::fmt::Debug;

use rand::Rng;

/// Picks one of `count` template variants
///
/// This is the only source of nondeterminism in the local responder.
pub trait VariantSelector: Send + Sync + Debug {
    /// Return an index in `0..count`; `count` is at least 1
    fn select(&self, count: usize) -> usize;
}

/// Uniform random choice
#[derive(Debug, Default, Clone, Copy)]
pub struct RandomSelector;

impl VariantSelector for RandomSelector {
    fn select(&self, count: usize) -> usize {
        if count <= 1 {
            return 0;
        }
        rand::thread_rng().gen_range(0..count)
    }
}

/// Always the same index (wrapped to the variant count)
#[derive(Debug, Default, Clone, Copy)]
pub struct FixedSelector(pub usize);

impl VariantSelector for FixedSelector {
    fn select(&self, count: usize) -> usize {
        if count == 0 { 0 } else { self.0 % count }
    }
}
