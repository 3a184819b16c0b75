//! FIRST and FOLLOW sets.
//!
//! Both sets are computed by fixed-point iteration over the augmented
//! production list and frozen afterwards. FIRST feeds the closure's
//! lookahead computation through [`FirstFollow::first_of_sequence`];
//! FOLLOW is kept for diagnostic parity with the textbook construction
//! and is never consulted by the table builder — LR(1) lookaheads come
//! from closure alone.

use hashbrown::{HashMap, HashSet};

use crate::grammar::Grammar;
use crate::intern::Symbol;

type SymbolSet = HashSet<Symbol, ahash::RandomState>;
type SetMap = HashMap<Symbol, SymbolSet, ahash::RandomState>;

/// Frozen FIRST/FOLLOW mappings for one grammar.
#[derive(Debug)]
pub struct FirstFollow {
    first: SetMap,
    follow: SetMap,
    epsilon: Symbol,
}

impl FirstFollow {
    /// Run both fixed points to convergence.
    ///
    /// The traversal order of productions does not affect the result;
    /// each pass keeps applying the accumulation rules until a full pass
    /// changes nothing.
    #[must_use]
    pub fn compute(grammar: &Grammar) -> Self {
        let epsilon = grammar.epsilon();

        let mut first = SetMap::with_hasher(ahash::RandomState::new());
        // FIRST(t) = {t} for every terminal, `$` included.
        for t in grammar.sorted_terminals() {
            first.entry(t).or_default().insert(t);
        }
        // FIRST(ε) = {ε}.
        first.entry(epsilon).or_default().insert(epsilon);
        for nt in grammar.sorted_nonterminals() {
            first.entry(nt).or_default();
        }

        let mut changed = true;
        while changed {
            changed = false;
            for prod in grammar.productions() {
                let add = if prod.is_epsilon() {
                    let mut set = SymbolSet::with_hasher(ahash::RandomState::new());
                    set.insert(epsilon);
                    set
                } else {
                    sequence_first(&first, epsilon, prod.rhs().iter().copied())
                };
                let row = first.get_mut(&prod.lhs()).expect("row for every lhs");
                for sym in add {
                    if row.insert(sym) {
                        changed = true;
                    }
                }
            }
        }

        let mut follow = SetMap::with_hasher(ahash::RandomState::new());
        for nt in grammar.sorted_nonterminals() {
            follow.entry(nt).or_default();
        }
        // `$` follows the declared start symbol.
        follow
            .get_mut(&grammar.start())
            .expect("row for the start symbol")
            .insert(grammar.eof());

        let mut changed = true;
        while changed {
            changed = false;
            for prod in grammar.productions() {
                for (i, sym) in prod.rhs().iter().enumerate() {
                    if !grammar.is_nonterminal(*sym) {
                        continue;
                    }
                    let beta = &prod.rhs()[i + 1..];
                    let beta_first = sequence_first(&first, epsilon, beta.iter().copied());

                    let mut add: Vec<Symbol> = beta_first
                        .iter()
                        .copied()
                        .filter(|s| *s != epsilon)
                        .collect();
                    if beta_first.contains(&epsilon) {
                        add.extend(follow[&prod.lhs()].iter().copied());
                    }

                    let row = follow.get_mut(sym).expect("row for every nonterminal");
                    for s in add {
                        if row.insert(s) {
                            changed = true;
                        }
                    }
                }
            }
        }

        Self {
            first,
            follow,
            epsilon,
        }
    }

    /// FIRST of a single symbol.
    ///
    /// # Panics
    ///
    /// Panics if the symbol does not belong to the grammar the sets were
    /// computed for.
    #[must_use]
    pub fn first(&self, sym: Symbol) -> &SymbolSet {
        &self.first[&sym]
    }

    /// FIRST of a symbol sequence: accumulate `FIRST(Xᵢ) \ {ε}` while the
    /// prefix stays ε-derivable, and include `ε` iff every `Xᵢ` is.
    #[must_use]
    pub fn first_of_sequence<I>(&self, seq: I) -> SymbolSet
    where
        I: IntoIterator<Item = Symbol>,
    {
        sequence_first(&self.first, self.epsilon, seq)
    }

    /// FOLLOW of a nonterminal.
    ///
    /// # Panics
    ///
    /// Panics if `nt` has no FOLLOW row (i.e. is not a nonterminal of the
    /// grammar).
    #[must_use]
    pub fn follow(&self, nt: Symbol) -> &SymbolSet {
        &self.follow[&nt]
    }

    /// True when `sym` derives the empty string.
    #[must_use]
    pub fn is_nullable(&self, sym: Symbol) -> bool {
        self.first[&sym].contains(&self.epsilon)
    }
}

fn sequence_first<I>(first: &SetMap, epsilon: Symbol, seq: I) -> SymbolSet
where
    I: IntoIterator<Item = Symbol>,
{
    let mut out = SymbolSet::with_hasher(ahash::RandomState::new());
    for sym in seq {
        let row = &first[&sym];
        out.extend(row.iter().copied().filter(|s| *s != epsilon));
        if !row.contains(&epsilon) {
            return out;
        }
    }
    out.insert(epsilon);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grammar::Grammar;

    fn names(grammar: &Grammar, set: &SymbolSet) -> Vec<String> {
        let mut out: Vec<String> = set.iter().map(|s| grammar.resolve(*s).to_owned()).collect();
        out.sort();
        out
    }

    /// S → A B, A → a | ε, B → b
    fn nullable_grammar() -> Grammar {
        Grammar::builder()
            .rule("S", &["A", "B"])
            .rule("A", &["a"])
            .rule("A", &[])
            .rule("B", &["b"])
            .start("S")
            .build()
            .unwrap()
    }

    #[test]
    fn first_propagates_through_nullable_prefixes() {
        let g = nullable_grammar();
        let sets = FirstFollow::compute(&g);

        let a = g.lookup("A").unwrap();
        let s = g.lookup("S").unwrap();
        assert_eq!(names(&g, sets.first(a)), vec!["a", "ε"]);
        assert_eq!(names(&g, sets.first(s)), vec!["a", "b"]);
        assert!(sets.is_nullable(a));
        assert!(!sets.is_nullable(s));
    }

    #[test]
    fn first_of_terminal_is_itself() {
        let g = nullable_grammar();
        let sets = FirstFollow::compute(&g);
        let b = g.lookup("b").unwrap();
        assert_eq!(names(&g, sets.first(b)), vec!["b"]);
    }

    #[test]
    fn follow_of_start_contains_eof() {
        let g = nullable_grammar();
        let sets = FirstFollow::compute(&g);
        assert!(sets.follow(g.start()).contains(&g.eof()));
    }

    #[test]
    fn follow_uses_first_of_beta() {
        let g = nullable_grammar();
        let sets = FirstFollow::compute(&g);
        let a = g.lookup("A").unwrap();
        let b = g.lookup("B").unwrap();
        // S → A B puts FIRST(B) = {b} into FOLLOW(A); B closes S so it
        // inherits FOLLOW(S) = {$}.
        assert_eq!(names(&g, sets.follow(a)), vec!["b"]);
        assert_eq!(names(&g, sets.follow(b)), vec!["$"]);
    }

    #[test]
    fn sequence_first_monotonicity() {
        let g = nullable_grammar();
        let sets = FirstFollow::compute(&g);
        let a = g.lookup("A").unwrap();
        let b = g.lookup("B").unwrap();

        // FIRST(AB) ⊇ FIRST(A) \ {ε} and, since A is nullable, ⊇ FIRST(B).
        let seq = sets.first_of_sequence([a, b]);
        for sym in sets.first(a) {
            if *sym != g.epsilon() {
                assert!(seq.contains(sym));
            }
        }
        for sym in sets.first(b) {
            assert!(seq.contains(sym));
        }
        assert!(!seq.contains(&g.epsilon()));
    }

    #[test]
    fn empty_sequence_is_epsilon() {
        let g = nullable_grammar();
        let sets = FirstFollow::compute(&g);
        let seq = sets.first_of_sequence(std::iter::empty());
        assert_eq!(names(&g, &seq), vec!["ε"]);
    }

    #[test]
    fn result_is_independent_of_rule_order() {
        let forward = nullable_grammar();
        let reversed = Grammar::builder()
            .rule("B", &["b"])
            .rule("A", &[])
            .rule("A", &["a"])
            .rule("S", &["A", "B"])
            .start("S")
            .build()
            .unwrap();

        let fwd = FirstFollow::compute(&forward);
        let rev = FirstFollow::compute(&reversed);
        for name in ["S", "A", "B"] {
            let f = forward.lookup(name).unwrap();
            let r = reversed.lookup(name).unwrap();
            assert_eq!(names(&forward, fwd.first(f)), names(&reversed, rev.first(r)));
            assert_eq!(
                names(&forward, fwd.follow(f)),
                names(&reversed, rev.follow(r))
            );
        }
    }
}
