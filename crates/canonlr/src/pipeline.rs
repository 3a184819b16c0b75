//! End-to-end construction.
//!
//! [`Lr1Parser`] wires the stages together: grammar → FIRST/FOLLOW →
//! canonical collection → tables. Construction runs once; everything it
//! produces is immutable afterwards, so one parser can serve any number
//! of `parse` calls — concurrently, if the caller likes — with each call
//! owning its own stacks and tree nodes.

use crate::analysis::FirstFollow;
use crate::automaton::Automaton;
use crate::driver::{self, Parse};
use crate::error::{GrammarError, ParseError};
use crate::grammar::Grammar;
use crate::table::{Conflict, ParseTables};

/// A prepared canonical LR(1) parser.
#[derive(Debug)]
pub struct Lr1Parser {
    grammar: Grammar,
    sets: FirstFollow,
    automaton: Automaton,
    tables: ParseTables,
}

impl Lr1Parser {
    /// Run the construction chain for an already-validated grammar.
    ///
    /// This never fails: conflicts are data, available through
    /// [`conflicts`](Self::conflicts), and the tables hold the resolved
    /// entries.
    #[must_use]
    pub fn new(grammar: Grammar) -> Self {
        let sets = FirstFollow::compute(&grammar);
        let automaton = Automaton::build(&grammar, &sets);
        let tables = ParseTables::build(&grammar, &automaton);
        Self {
            grammar,
            sets,
            automaton,
            tables,
        }
    }

    /// Build straight from `(lhs, rhs)` rules.
    ///
    /// # Errors
    ///
    /// Forwards [`GrammarError`] from grammar construction.
    pub fn from_rules<'a, R>(rules: R, start: &str) -> Result<Self, GrammarError>
    where
        R: IntoIterator<Item = (&'a str, Vec<&'a str>)>,
    {
        let rules = rules
            .into_iter()
            .map(|(lhs, rhs)| {
                (
                    lhs.to_owned(),
                    rhs.into_iter().map(str::to_owned).collect(),
                )
            })
            .collect();
        Ok(Self::new(Grammar::new(rules, start)?))
    }

    /// Parse a token sequence. The `$` marker is appended internally.
    ///
    /// # Errors
    ///
    /// [`ParseError`] when the input is not a sentence of the grammar.
    pub fn parse<S: AsRef<str>>(&self, tokens: &[S]) -> Result<Parse, ParseError> {
        driver::parse(&self.grammar, &self.tables, tokens)
    }

    #[must_use]
    pub const fn grammar(&self) -> &Grammar {
        &self.grammar
    }

    #[must_use]
    pub const fn first_follow(&self) -> &FirstFollow {
        &self.sets
    }

    #[must_use]
    pub const fn automaton(&self) -> &Automaton {
        &self.automaton
    }

    #[must_use]
    pub const fn tables(&self) -> &ParseTables {
        &self.tables
    }

    /// Every conflict met during table construction, never suppressed.
    #[must_use]
    pub fn conflicts(&self) -> &[Conflict] {
        self.tables.conflicts()
    }

    /// True when the grammar produced no conflicts, i.e. is LR(1).
    #[must_use]
    pub fn is_lr1(&self) -> bool {
        self.tables.conflicts().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_rules_runs_the_whole_chain() {
        let parser = Lr1Parser::from_rules(
            [
                ("E", vec!["E", "+", "T"]),
                ("E", vec!["T"]),
                ("T", vec!["id"]),
            ],
            "E",
        )
        .unwrap();

        assert!(parser.is_lr1());
        let parse = parser.parse(&["id", "+", "id"]).unwrap();
        assert_eq!(parse.tree.symbol(), "E");
    }

    #[test]
    fn grammar_errors_are_forwarded() {
        let err = Lr1Parser::from_rules([("E", vec!["id"])], "X").unwrap_err();
        assert_eq!(err, GrammarError::UnknownStart("X".into()));
    }

    #[test]
    fn conflicts_are_observable() {
        let parser = Lr1Parser::from_rules(
            [
                ("S", vec!["A"]),
                ("S", vec!["B"]),
                ("A", vec!["a"]),
                ("B", vec!["a"]),
            ],
            "S",
        )
        .unwrap();
        assert!(!parser.is_lr1());
        assert_eq!(parser.conflicts().len(), 1);
        // The resolved table still parses.
        assert!(parser.parse(&["a"]).is_ok());
    }
}
