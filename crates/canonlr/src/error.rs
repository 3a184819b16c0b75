//! Error types.
//!
//! Grammar construction and parsing both fail through sum types; table
//! construction never fails (conflicts are data, see [`crate::table`]).
//! Internal table inconsistencies discovered by the driver are the one
//! class of condition that panics instead.

use compact_str::CompactString;
use thiserror::Error;

/// A grammar rejected at construction time.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GrammarError {
    /// The production list was empty.
    #[error("grammar has no productions")]
    Empty,

    /// The start symbol never appears on a left-hand side.
    #[error("start symbol '{0}' does not appear on the left-hand side of any production")]
    UnknownStart(CompactString),

    /// A reserved marker (`$` or `ε`) was used as a grammar symbol.
    #[error("reserved symbol '{symbol}' in production '{production}'")]
    ReservedSymbol {
        symbol: CompactString,
        production: CompactString,
    },

    /// The start symbol has no production of its own.
    #[error("start symbol '{0}' has no production")]
    StartHasNoProduction(CompactString),
}

/// A token stream rejected by the parse driver.
///
/// Carries everything a caller needs for a diagnostic: the state the
/// machine was in, the offending token, its position in the input (the
/// internal `$` sits at `tokens.len()`), and the terminals for which the
/// state has a defined ACTION entry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error(
    "unexpected token '{token}' in state {state} at position {position} (expected: {exp})",
    exp = .expected.join(", ")
)]
pub struct ParseError {
    pub state: usize,
    pub token: CompactString,
    pub position: usize,
    pub expected: Vec<CompactString>,
}
