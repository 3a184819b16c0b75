//! # canonlr
//!
//! Canonical LR(1) table construction and table-driven shift/reduce
//! parsing.
//!
//! ## Overview
//!
//! Given a context-free grammar over string symbols, the library
//!
//! - augments and validates the grammar ([`grammar`]),
//! - computes FIRST/FOLLOW sets by fixed point ([`analysis`]),
//! - builds the canonical collection of LR(1) item sets and its
//!   transition graph ([`automaton`]),
//! - derives deterministic ACTION/GOTO tables, recording — not hiding —
//!   every shift/reduce and reduce/reduce conflict ([`table`]),
//! - and drives a shift/reduce engine that yields a parse tree and the
//!   applied derivation, or a structured error ([`driver`]).
//!
//! Construction is deterministic: the same grammar always produces the
//! same state numbering and the same tables. Everything built is
//! immutable afterwards, so one [`Lr1Parser`] may be shared freely across
//! threads.
//!
//! ## Quick start
//!
//! ```
//! use canonlr::{Grammar, Lr1Parser};
//!
//! let grammar = Grammar::builder()
//!     .rule("E", &["E", "+", "T"])
//!     .rule("E", &["T"])
//!     .rule("T", &["id"])
//!     .start("E")
//!     .build()?;
//!
//! let parser = Lr1Parser::new(grammar);
//! assert!(parser.is_lr1());
//!
//! let parse = parser.parse(&["id", "+", "id"])?;
//! assert_eq!(parse.tree.symbol(), "E");
//! assert_eq!(parse.tree.terminal_yield(), vec!["id", "+", "id"]);
//! assert_eq!(parse.derivation, vec![3, 2, 3, 1]);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! Tokenization is not part of the library: the driver consumes a finite,
//! pre-tokenized sequence of terminal strings and appends the `$` marker
//! itself.

pub mod analysis;
pub mod automaton;
pub mod driver;
pub mod error;
pub mod grammar;
pub mod intern;
pub mod pipeline;
pub mod pretty;
pub mod table;

pub use driver::{Parse, TreeNode};
pub use error::{GrammarError, ParseError};
pub use grammar::{Grammar, GrammarBuilder, Production};
pub use intern::Symbol;
pub use pipeline::Lr1Parser;
pub use table::{Action, Conflict, ConflictKind, ParseTables};
