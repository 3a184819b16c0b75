//! Grammar model.
//!
//! A [`Grammar`] is an immutable, augmented context-free grammar over
//! interned symbols. Classification is derived, never declared: a symbol
//! is a nonterminal iff it appears on some left-hand side; every other
//! symbol occurring on a right-hand side is a terminal. Construction
//! validates the rule set, synthesizes a fresh augmented start `S' → S`
//! with id 0, and renumbers the declared rules contiguously from 1.

mod production;

use std::fmt;

use hashbrown::{HashMap, HashSet};

use crate::error::GrammarError;
use crate::intern::{Symbol, SymbolTable, END_OF_INPUT, EPSILON};

pub use production::Production;

use production::Rhs;

type SymbolSet = HashSet<Symbol, ahash::RandomState>;

/// Incremental construction surface for [`Grammar`].
///
/// ```
/// use canonlr::Grammar;
///
/// let grammar = Grammar::builder()
///     .rule("E", &["E", "+", "T"])
///     .rule("E", &["T"])
///     .rule("T", &["id"])
///     .start("E")
///     .build()
///     .unwrap();
/// assert_eq!(grammar.productions().len(), 4);
/// ```
#[derive(Debug, Default)]
pub struct GrammarBuilder {
    rules: Vec<(String, Vec<String>)>,
    start: Option<String>,
}

impl GrammarBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a rule. An empty `rhs` declares an ε-production.
    #[must_use]
    pub fn rule(mut self, lhs: &str, rhs: &[&str]) -> Self {
        self.rules.push((
            lhs.to_owned(),
            rhs.iter().map(|s| (*s).to_owned()).collect(),
        ));
        self
    }

    /// Set the start symbol. Defaults to the first rule's left-hand side.
    #[must_use]
    pub fn start(mut self, start: &str) -> Self {
        self.start = Some(start.to_owned());
        self
    }

    /// Validate and augment.
    ///
    /// # Errors
    ///
    /// See [`GrammarError`] for the construction failure modes.
    pub fn build(self) -> Result<Grammar, GrammarError> {
        let start = match self.start {
            Some(s) => s,
            None => self
                .rules
                .first()
                .map(|(lhs, _)| lhs.clone())
                .ok_or(GrammarError::Empty)?,
        };
        Grammar::new(self.rules, &start)
    }
}

/// An augmented context-free grammar, frozen after construction.
pub struct Grammar {
    symbols: SymbolTable,
    /// Augmented production list; index equals production id.
    productions: Vec<Production>,
    start: Symbol,
    augmented_start: Symbol,
    terminals: SymbolSet,
    nonterminals: SymbolSet,
    by_lhs: HashMap<Symbol, Vec<usize>, ahash::RandomState>,
}

impl Grammar {
    #[must_use]
    pub fn builder() -> GrammarBuilder {
        GrammarBuilder::new()
    }

    /// Construct from `(lhs, rhs)` rules and a start symbol.
    ///
    /// # Errors
    ///
    /// * [`GrammarError::Empty`] — no rules.
    /// * [`GrammarError::ReservedSymbol`] — `$` or `ε` used in a rule.
    /// * [`GrammarError::UnknownStart`] — the start symbol is not a
    ///   left-hand side.
    /// * [`GrammarError::StartHasNoProduction`] — the start symbol ended
    ///   up without a production (augmentation guard).
    pub fn new(rules: Vec<(String, Vec<String>)>, start: &str) -> Result<Self, GrammarError> {
        if rules.is_empty() {
            return Err(GrammarError::Empty);
        }

        for (lhs, rhs) in &rules {
            for sym in std::iter::once(lhs).chain(rhs.iter()) {
                if sym == END_OF_INPUT || sym == EPSILON {
                    return Err(GrammarError::ReservedSymbol {
                        symbol: sym.as_str().into(),
                        production: render_rule(lhs, rhs).into(),
                    });
                }
            }
        }

        let mut symbols = SymbolTable::new();
        let mut interned: Vec<(Symbol, Rhs)> = Vec::with_capacity(rules.len());
        for (lhs, rhs) in &rules {
            let lhs = symbols.intern(lhs);
            let rhs = rhs.iter().map(|s| symbols.intern(s)).collect();
            interned.push((lhs, rhs));
        }

        let mut nonterminals = SymbolSet::with_hasher(ahash::RandomState::new());
        for (lhs, _) in &interned {
            nonterminals.insert(*lhs);
        }

        let mut terminals = SymbolSet::with_hasher(ahash::RandomState::new());
        for (_, rhs) in &interned {
            for sym in rhs {
                if !nonterminals.contains(sym) {
                    terminals.insert(*sym);
                }
            }
        }
        // `$` is a terminal for lookahead purposes although it occurs in
        // no right-hand side.
        terminals.insert(symbols.eof());

        let start_sym = symbols
            .get(start)
            .filter(|s| nonterminals.contains(s))
            .ok_or_else(|| GrammarError::UnknownStart(start.into()))?;

        // Fresh augmented start: keep priming until the name is unused.
        let mut augmented_name = format!("{start}'");
        while symbols.get(&augmented_name).is_some() {
            augmented_name.push('\'');
        }
        let augmented_start = symbols.intern(&augmented_name);
        nonterminals.insert(augmented_start);

        let mut productions = Vec::with_capacity(interned.len() + 1);
        productions.push(Production::new(
            0,
            augmented_start,
            std::iter::once(start_sym).collect(),
        ));
        for (id, (lhs, rhs)) in interned.into_iter().enumerate() {
            productions.push(Production::new(id + 1, lhs, rhs));
        }

        let mut by_lhs: HashMap<Symbol, Vec<usize>, ahash::RandomState> =
            HashMap::with_hasher(ahash::RandomState::new());
        for prod in &productions {
            by_lhs.entry(prod.lhs()).or_default().push(prod.id());
        }

        if by_lhs.get(&start_sym).map_or(true, Vec::is_empty) {
            return Err(GrammarError::StartHasNoProduction(start.into()));
        }

        Ok(Self {
            symbols,
            productions,
            start: start_sym,
            augmented_start,
            terminals,
            nonterminals,
            by_lhs,
        })
    }

    /// The declared start symbol `S`.
    #[must_use]
    pub const fn start(&self) -> Symbol {
        self.start
    }

    /// The synthetic start symbol `S'`.
    #[must_use]
    pub const fn augmented_start(&self) -> Symbol {
        self.augmented_start
    }

    /// The `$` marker.
    #[must_use]
    pub const fn eof(&self) -> Symbol {
        self.symbols.eof()
    }

    /// The `ε` marker.
    #[must_use]
    pub const fn epsilon(&self) -> Symbol {
        self.symbols.epsilon()
    }

    /// The augmented production list; `productions()[0]` is `S' → S` and
    /// a production's id equals its index.
    #[must_use]
    pub fn productions(&self) -> &[Production] {
        &self.productions
    }

    /// Production by id.
    ///
    /// # Panics
    ///
    /// Panics if `id` is out of range.
    #[must_use]
    pub fn production(&self, id: usize) -> &Production {
        &self.productions[id]
    }

    /// All productions whose left-hand side is `nt`, in id order.
    pub fn productions_for(&self, nt: Symbol) -> impl Iterator<Item = &Production> {
        self.production_ids_for(nt).iter().map(|&id| &self.productions[id])
    }

    pub(crate) fn production_ids_for(&self, nt: Symbol) -> &[usize] {
        self.by_lhs.get(&nt).map_or(&[], Vec::as_slice)
    }

    #[must_use]
    pub fn is_terminal(&self, sym: Symbol) -> bool {
        self.terminals.contains(&sym)
    }

    #[must_use]
    pub fn is_nonterminal(&self, sym: Symbol) -> bool {
        self.nonterminals.contains(&sym)
    }

    /// Look up a symbol by name without interning.
    #[must_use]
    pub fn lookup(&self, name: &str) -> Option<Symbol> {
        self.symbols.get(name)
    }

    /// Resolve a symbol back to its name.
    #[must_use]
    pub fn resolve(&self, sym: Symbol) -> &str {
        self.symbols.resolve(sym)
    }

    /// Terminals sorted by name (`$` included).
    #[must_use]
    pub fn sorted_terminals(&self) -> Vec<Symbol> {
        let mut out: Vec<Symbol> = self.terminals.iter().copied().collect();
        out.sort_unstable_by(|a, b| self.resolve(*a).cmp(self.resolve(*b)));
        out
    }

    /// Nonterminals sorted by name (`S'` included).
    #[must_use]
    pub fn sorted_nonterminals(&self) -> Vec<Symbol> {
        let mut out: Vec<Symbol> = self.nonterminals.iter().copied().collect();
        out.sort_unstable_by(|a, b| self.resolve(*a).cmp(self.resolve(*b)));
        out
    }

    /// Render `A → α` (with `ε` for an empty right-hand side).
    #[must_use]
    pub fn render_production(&self, prod: &Production) -> String {
        let mut out = format!("{} →", self.resolve(prod.lhs()));
        if prod.is_epsilon() {
            out.push(' ');
            out.push_str(EPSILON);
        } else {
            for sym in prod.rhs() {
                out.push(' ');
                out.push_str(self.resolve(*sym));
            }
        }
        out
    }
}

impl fmt::Debug for Grammar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Grammar")
            .field("start", &self.resolve(self.start))
            .field("productions", &self.productions.len())
            .field("terminals", &self.terminals.len())
            .field("nonterminals", &self.nonterminals.len())
            .finish()
    }
}

impl fmt::Display for Grammar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for prod in &self.productions {
            writeln!(f, "{:>3}: {}", prod.id(), self.render_production(prod))?;
        }
        Ok(())
    }
}

fn render_rule(lhs: &str, rhs: &[String]) -> String {
    if rhs.is_empty() {
        return format!("{lhs} → {EPSILON}");
    }
    format!("{lhs} → {}", rhs.join(" "))
}
