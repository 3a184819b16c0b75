//! ACTION/GOTO table construction.
//!
//! Construction is total: it always completes and returns the tables
//! together with every conflict it met along the way. The resolution
//! policy is a fixed contract, not emergent behavior — on shift/reduce
//! the shift survives, on reduce/reduce the production with the lower id
//! (the earlier declaration) survives — and the discarded entry is kept
//! in the conflict record so callers can reject the grammar or warn.

use compact_str::CompactString;
use hashbrown::HashMap;

use crate::automaton::Automaton;
use crate::grammar::Grammar;
use crate::intern::Symbol;

/// One defined entry of the ACTION table; absence of an entry is the
/// error case.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Consume the terminal and enter the state.
    Shift(usize),
    /// Replace the production's right-hand side on the stack by its
    /// left-hand side.
    Reduce(usize),
    /// The input is a sentence of the grammar.
    Accept,
}

/// How two incompatible entries collided.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConflictKind {
    ShiftReduce,
    ReduceReduce,
}

/// A recorded table conflict. Non-fatal: the `kept` entry is what the
/// table contains.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Conflict {
    pub state: usize,
    pub symbol: Symbol,
    pub kind: ConflictKind,
    pub kept: Action,
    pub discarded: Action,
}

type ActionMap = HashMap<(usize, Symbol), Action, ahash::RandomState>;
type GotoMap = HashMap<(usize, Symbol), usize, ahash::RandomState>;

/// Frozen ACTION/GOTO tables plus the conflicts met while building them.
#[derive(Debug)]
pub struct ParseTables {
    action: ActionMap,
    goto: GotoMap,
    conflicts: Vec<Conflict>,
    num_states: usize,
}

impl ParseTables {
    /// Walk every state and item of the collection and fill both tables.
    #[must_use]
    pub fn build(grammar: &Grammar, automaton: &Automaton) -> Self {
        let mut tables = Self {
            action: ActionMap::with_hasher(ahash::RandomState::new()),
            goto: GotoMap::with_hasher(ahash::RandomState::new()),
            conflicts: Vec::new(),
            num_states: automaton.states().len(),
        };

        for (state, items) in automaton.states().iter().enumerate() {
            for item in items.iter() {
                match item.next_symbol(grammar) {
                    Some(symbol) if grammar.is_terminal(symbol) => {
                        if let Some(to) = automaton.transition(state, symbol) {
                            tables.insert_action(state, symbol, Action::Shift(to));
                        }
                    }
                    Some(symbol) => {
                        if let Some(to) = automaton.transition(state, symbol) {
                            tables.goto.insert((state, symbol), to);
                        }
                    }
                    None => {
                        if item.production() == 0 {
                            // [S' → S •, $]
                            if item.lookahead() == grammar.eof() {
                                tables.insert_action(state, grammar.eof(), Action::Accept);
                            }
                        } else {
                            tables.insert_action(
                                state,
                                item.lookahead(),
                                Action::Reduce(item.production()),
                            );
                        }
                    }
                }
            }
        }

        tables
    }

    fn insert_action(&mut self, state: usize, symbol: Symbol, new: Action) {
        let existing = match self.action.get(&(state, symbol)) {
            None => {
                self.action.insert((state, symbol), new);
                return;
            }
            Some(&existing) => existing,
        };
        if existing == new {
            // Rewriting the same entry is idempotent, not a conflict.
            return;
        }

        let (kept, discarded, kind) = resolve(existing, new);
        self.conflicts.push(Conflict {
            state,
            symbol,
            kind,
            kept,
            discarded,
        });
        if kept != existing {
            self.action.insert((state, symbol), kept);
        }
    }

    /// The ACTION entry for `(state, terminal)`; `None` means error.
    #[must_use]
    pub fn action(&self, state: usize, terminal: Symbol) -> Option<Action> {
        self.action.get(&(state, terminal)).copied()
    }

    /// The GOTO entry for `(state, nonterminal)`.
    #[must_use]
    pub fn goto(&self, state: usize, nonterminal: Symbol) -> Option<usize> {
        self.goto.get(&(state, nonterminal)).copied()
    }

    /// Conflicts in the order they were met.
    #[must_use]
    pub fn conflicts(&self) -> &[Conflict] {
        &self.conflicts
    }

    #[must_use]
    pub const fn num_states(&self) -> usize {
        self.num_states
    }

    /// The terminals with a defined ACTION entry in `state`, sorted by
    /// name. This is the "expected" set reported on parse errors.
    #[must_use]
    pub fn expected_terminals(&self, grammar: &Grammar, state: usize) -> Vec<CompactString> {
        let mut out: Vec<CompactString> = self
            .action
            .keys()
            .filter(|(s, _)| *s == state)
            .map(|(_, sym)| CompactString::from(grammar.resolve(*sym)))
            .collect();
        out.sort_unstable();
        out
    }
}

/// Pick the surviving entry for two incompatible actions on the same
/// `(state, terminal)` cell.
///
/// Accept is the completed augmentation — production 0 — so an
/// accept/reduce collision resolves like any reduce/reduce pair: the
/// lower production id wins.
fn resolve(existing: Action, new: Action) -> (Action, Action, ConflictKind) {
    match (existing, new) {
        (Action::Shift(_), Action::Reduce(_)) => (existing, new, ConflictKind::ShiftReduce),
        (Action::Reduce(_), Action::Shift(_)) => (new, existing, ConflictKind::ShiftReduce),
        (Action::Reduce(a), Action::Reduce(b)) => {
            if a <= b {
                (existing, new, ConflictKind::ReduceReduce)
            } else {
                (new, existing, ConflictKind::ReduceReduce)
            }
        }
        (Action::Accept, Action::Reduce(_)) => (existing, new, ConflictKind::ReduceReduce),
        (Action::Reduce(_), Action::Accept) => (new, existing, ConflictKind::ReduceReduce),
        // `$` is never shifted, so shift/accept pairs cannot arise, and
        // identical entries were filtered before resolution.
        _ => unreachable!("impossible action collision: {existing:?} vs {new:?}"),
    }
}
