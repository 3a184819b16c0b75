//! The canonical LR(1) collection.
//!
//! [`Automaton::build`] computes the closure of `[S' → • S, $]` and grows
//! the collection through GOTO until no new state or edge appears. States
//! are deduplicated by item-set equality, so the same closure reached
//! along different paths is a single state.
//!
//! Numbering is deterministic: states are processed in creation order and
//! a state's outgoing symbols are visited terminals-first, each group in
//! string order. Two runs over the same grammar produce identical state
//! numbers and identical transitions.

mod item;

use std::collections::VecDeque;

use hashbrown::{HashMap, HashSet};

use crate::analysis::FirstFollow;
use crate::grammar::Grammar;
use crate::intern::Symbol;

pub use item::{Item, ItemSet};

type ItemBag = HashSet<Item, ahash::RandomState>;

/// The frozen canonical collection plus its transition graph.
#[derive(Debug)]
pub struct Automaton {
    states: Vec<ItemSet>,
    transitions: HashMap<(usize, Symbol), usize, ahash::RandomState>,
}

impl Automaton {
    /// Build the collection for a grammar.
    #[must_use]
    pub fn build(grammar: &Grammar, sets: &FirstFollow) -> Self {
        let initial = Self::closure(grammar, sets, &[Item::new(0, 0, grammar.eof())]);

        let mut states = vec![initial.clone()];
        let mut index: HashMap<ItemSet, usize, ahash::RandomState> =
            HashMap::with_hasher(ahash::RandomState::new());
        index.insert(initial, 0);

        let mut transitions: HashMap<(usize, Symbol), usize, ahash::RandomState> =
            HashMap::with_hasher(ahash::RandomState::new());

        let mut queue = VecDeque::from([0usize]);
        while let Some(from) = queue.pop_front() {
            for symbol in transition_symbols(grammar, &states[from]) {
                let target = Self::goto(grammar, sets, &states[from], symbol);
                if target.is_empty() {
                    continue;
                }
                let to = match index.get(&target) {
                    Some(&to) => to,
                    None => {
                        let to = states.len();
                        states.push(target.clone());
                        index.insert(target, to);
                        queue.push_back(to);
                        to
                    }
                };
                transitions.insert((from, symbol), to);
            }
        }

        Self {
            states,
            transitions,
        }
    }

    /// CLOSURE of a kernel: keep adding `[B → • γ, b]` for every item
    /// `[A → α • B β, a]` with nonterminal `B`, production `B → γ`, and
    /// `b ∈ FIRST(β a)`, until stable.
    #[must_use]
    pub fn closure(grammar: &Grammar, sets: &FirstFollow, kernel: &[Item]) -> ItemSet {
        let mut closed = ItemBag::with_hasher(ahash::RandomState::new());
        closed.extend(kernel.iter().copied());
        let mut pending: Vec<Item> = kernel.to_vec();

        while let Some(item) = pending.pop() {
            let Some(next) = item.next_symbol(grammar) else {
                continue;
            };
            if !grammar.is_nonterminal(next) {
                continue;
            }

            let production = grammar.production(item.production());
            let beta = production.rhs()[item.dot() + 1..].iter().copied();
            let lookaheads =
                sets.first_of_sequence(beta.chain(std::iter::once(item.lookahead())));

            for &id in grammar.production_ids_for(next) {
                for &la in &lookaheads {
                    // ε never survives as a lookahead.
                    if la == grammar.epsilon() {
                        continue;
                    }
                    let new_item = Item::new(id, 0, la);
                    if closed.insert(new_item) {
                        pending.push(new_item);
                    }
                }
            }
        }

        ItemSet::from_items(closed)
    }

    /// GOTO: advance the dot over `symbol` in every item that allows it,
    /// then close the result. Empty when no item has `symbol` after its
    /// dot.
    #[must_use]
    pub fn goto(grammar: &Grammar, sets: &FirstFollow, state: &ItemSet, symbol: Symbol) -> ItemSet {
        let kernel: Vec<Item> = state
            .iter()
            .filter(|item| item.next_symbol(grammar) == Some(symbol))
            .map(Item::advanced)
            .collect();
        if kernel.is_empty() {
            return ItemSet::from_items(ItemBag::with_hasher(ahash::RandomState::new()));
        }
        Self::closure(grammar, sets, &kernel)
    }

    /// States in creation order; state 0 is the initial state.
    #[must_use]
    pub fn states(&self) -> &[ItemSet] {
        &self.states
    }

    /// The target of the `(state, symbol)` edge, if present.
    #[must_use]
    pub fn transition(&self, state: usize, symbol: Symbol) -> Option<usize> {
        self.transitions.get(&(state, symbol)).copied()
    }

    /// Every `(state, symbol) → state` edge, unordered.
    pub fn transitions(&self) -> impl Iterator<Item = ((usize, Symbol), usize)> + '_ {
        self.transitions.iter().map(|(&k, &v)| (k, v))
    }
}

/// Symbols with at least one dot in front of them in `state`, terminals
/// first, each group sorted by name.
fn transition_symbols(grammar: &Grammar, state: &ItemSet) -> Vec<Symbol> {
    let mut symbols: Vec<Symbol> = state
        .iter()
        .filter_map(|item| item.next_symbol(grammar))
        .collect();
    symbols.sort_unstable();
    symbols.dedup();
    symbols.sort_by(|a, b| {
        (grammar.is_nonterminal(*a), grammar.resolve(*a))
            .cmp(&(grammar.is_nonterminal(*b), grammar.resolve(*b)))
    });
    symbols
}
