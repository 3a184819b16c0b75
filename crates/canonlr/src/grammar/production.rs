use std::hash::{Hash, Hasher};

use smallvec::SmallVec;

use crate::intern::Symbol;

/// Inline storage for the common short right-hand side.
pub(crate) type Rhs = SmallVec<[Symbol; 4]>;

/// A rewrite rule `A → X₁ … Xₙ`.
///
/// An empty right-hand side denotes an ε-production. The `id` is stable for
/// one generator run: the synthetic augmentation is always id 0 and the
/// declared rules are renumbered contiguously from 1 in declaration order.
/// Equality and hashing ignore the id; two productions with the same
/// left- and right-hand sides are the same rule.
#[derive(Debug, Clone)]
pub struct Production {
    id: usize,
    lhs: Symbol,
    rhs: Rhs,
}

impl Production {
    pub(crate) fn new(id: usize, lhs: Symbol, rhs: Rhs) -> Self {
        Self { id, lhs, rhs }
    }

    #[must_use]
    pub const fn id(&self) -> usize {
        self.id
    }

    #[must_use]
    pub const fn lhs(&self) -> Symbol {
        self.lhs
    }

    #[must_use]
    pub fn rhs(&self) -> &[Symbol] {
        &self.rhs
    }

    /// True for `A → ε`.
    #[must_use]
    pub fn is_epsilon(&self) -> bool {
        self.rhs.is_empty()
    }
}

impl PartialEq for Production {
    fn eq(&self, other: &Self) -> bool {
        self.lhs == other.lhs && self.rhs == other.rhs
    }
}

impl Eq for Production {}

impl Hash for Production {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.lhs.hash(state);
        self.rhs.hash(state);
    }
}
