//! The shift/reduce engine.
//!
//! [`parse`] runs a token sequence against frozen tables. Two parallel
//! stacks carry the machine: a state stack (always one entry deeper than
//! the node stack) and a node stack holding the parse trees built so far.
//! The `$` marker is appended internally; callers never pass it.
//!
//! A missing ACTION entry is an input error and comes back as
//! [`ParseError`]. A missing GOTO entry after a reduce, or an accept with
//! anything but exactly the start symbol's tree on the node stack, means
//! the tables themselves are inconsistent — that panics.

mod tree;

use crate::error::ParseError;
use crate::grammar::Grammar;
use crate::intern::{END_OF_INPUT, EPSILON};
use crate::table::{Action, ParseTables};

pub use tree::TreeNode;

/// A successful parse.
#[derive(Debug, Clone)]
pub struct Parse {
    /// Root of the parse tree; its symbol is the declared start symbol.
    pub tree: TreeNode,
    /// Production ids in reduce order. Read back to front this is the
    /// rightmost derivation of the input.
    pub derivation: Vec<usize>,
}

/// Drive `tokens` through the tables.
///
/// # Errors
///
/// [`ParseError`] when a token has no defined ACTION in the current
/// state, carrying the state, the offending token, its position, and the
/// terminals that would have been accepted.
///
/// # Panics
///
/// Panics on table inconsistencies (missing GOTO after a reduce, accept
/// with a malformed node stack). These indicate a table-construction bug,
/// not bad input.
pub fn parse<S: AsRef<str>>(
    grammar: &Grammar,
    tables: &ParseTables,
    tokens: &[S],
) -> Result<Parse, ParseError> {
    // The reserved markers are not input: `$` is appended internally and
    // `ε` never names a token. Reject them before the machine starts.
    for (position, token) in tokens.iter().enumerate() {
        let token = token.as_ref();
        if token == END_OF_INPUT || token == EPSILON {
            return Err(ParseError {
                state: 0,
                token: token.into(),
                position,
                expected: tables.expected_terminals(grammar, 0),
            });
        }
    }

    let mut states: Vec<usize> = vec![0];
    let mut nodes: Vec<TreeNode> = Vec::new();
    let mut derivation: Vec<usize> = Vec::new();
    let mut pos = 0;

    loop {
        let state = *states.last().expect("state stack never drains");
        let (lookup, text) = if pos < tokens.len() {
            let text = tokens[pos].as_ref();
            (
                grammar.lookup(text).filter(|s| grammar.is_terminal(*s)),
                text,
            )
        } else {
            (Some(grammar.eof()), END_OF_INPUT)
        };

        let action = lookup.and_then(|terminal| tables.action(state, terminal));
        let Some(action) = action else {
            return Err(ParseError {
                state,
                token: text.into(),
                position: pos,
                expected: tables.expected_terminals(grammar, state),
            });
        };

        match action {
            Action::Shift(next) => {
                nodes.push(TreeNode::leaf(text));
                states.push(next);
                pos += 1;
            }
            Action::Reduce(id) => {
                let production = grammar.production(id);
                let arity = production.rhs().len();
                assert!(
                    nodes.len() >= arity && states.len() > arity,
                    "reduce by production {id} pops more than the stacks hold"
                );
                let children = nodes.split_off(nodes.len() - arity);
                states.truncate(states.len() - arity);

                let lhs = production.lhs();
                nodes.push(TreeNode::interior(grammar.resolve(lhs), children, id));
                derivation.push(id);

                let top = *states.last().expect("state stack never drains");
                let Some(next) = tables.goto(top, lhs) else {
                    panic!(
                        "missing GOTO entry for state {top} on '{}' after reducing production {id}",
                        grammar.resolve(lhs)
                    );
                };
                states.push(next);
            }
            Action::Accept => {
                assert!(
                    nodes.len() == 1,
                    "accept with {} nodes on the stack",
                    nodes.len()
                );
                let root = nodes.pop().expect("node stack holds the root");
                assert!(
                    root.symbol() == grammar.resolve(grammar.start()),
                    "accepted root '{}' is not the start symbol",
                    root.symbol()
                );
                return Ok(Parse { tree: root, derivation });
            }
        }
    }
}
