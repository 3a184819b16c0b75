//! Table construction: accept placement, conflict records, resolution
//! policy, and reproducibility.

use canonlr::{pretty, Action, ConflictKind, Lr1Parser};

fn arithmetic() -> Lr1Parser {
    Lr1Parser::from_rules(
        [
            ("E", vec!["E", "+", "T"]),
            ("E", vec!["T"]),
            ("T", vec!["id"]),
        ],
        "E",
    )
    .unwrap()
}

fn dangling_else() -> Lr1Parser {
    Lr1Parser::from_rules(
        [
            ("S", vec!["i", "C", "t", "S"]),
            ("S", vec!["i", "C", "t", "S", "e", "S"]),
            ("S", vec!["a"]),
            ("C", vec!["b"]),
        ],
        "S",
    )
    .unwrap()
}

#[test]
fn accept_is_unique_and_reachable() {
    let parser = arithmetic();
    let g = parser.grammar();
    let tables = parser.tables();

    let accepts: Vec<usize> = (0..tables.num_states())
        .filter(|&s| tables.action(s, g.eof()) == Some(Action::Accept))
        .collect();
    assert_eq!(accepts.len(), 1);
    assert_eq!(parser.automaton().transition(0, g.start()), Some(accepts[0]));
}

#[test]
fn goto_targets_are_valid_states() {
    let parser = dangling_else();
    let g = parser.grammar();
    let tables = parser.tables();
    let n = tables.num_states();

    for state in 0..n {
        for nt in g.sorted_nonterminals() {
            if let Some(to) = tables.goto(state, nt) {
                assert!(to < n);
                // GOTO entries exist only for nonterminals.
                assert!(g.is_nonterminal(nt));
            }
        }
    }
}

#[test]
fn shift_entries_agree_with_the_transition_graph() {
    let parser = arithmetic();
    let g = parser.grammar();
    let tables = parser.tables();

    for state in 0..tables.num_states() {
        for t in g.sorted_terminals() {
            if let Some(Action::Shift(to)) = tables.action(state, t) {
                assert_eq!(parser.automaton().transition(state, t), Some(to));
            }
        }
    }
}

#[test]
fn dangling_else_records_shift_reduce_and_keeps_shift() {
    let parser = dangling_else();
    let g = parser.grammar();

    assert!(!parser.is_lr1());
    let on_e: Vec<_> = parser
        .conflicts()
        .iter()
        .filter(|c| g.resolve(c.symbol) == "e")
        .collect();
    assert!(!on_e.is_empty(), "expected a conflict on 'e'");
    for c in &on_e {
        assert_eq!(c.kind, ConflictKind::ShiftReduce);
        assert!(matches!(c.kept, Action::Shift(_)));
        assert_eq!(parser.tables().action(c.state, c.symbol), Some(c.kept));
    }
}

#[test]
fn reduce_reduce_keeps_the_earlier_declaration() {
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
    let g = parser.grammar();

    let conflicts = parser.conflicts();
    assert_eq!(conflicts.len(), 1);
    assert_eq!(conflicts[0].kind, ConflictKind::ReduceReduce);
    assert_eq!(g.resolve(conflicts[0].symbol), "$");
    // Production 3 is A → a, production 4 is B → a.
    assert_eq!(conflicts[0].kept, Action::Reduce(3));
    assert_eq!(conflicts[0].discarded, Action::Reduce(4));
}

#[test]
fn construction_is_reproducible_bit_for_bit() {
    let a = arithmetic();
    let b = arithmetic();

    assert_eq!(
        pretty::dump_states(a.grammar(), a.automaton()),
        pretty::dump_states(b.grammar(), b.automaton())
    );
    assert_eq!(
        pretty::dump_tables(a.grammar(), a.tables()),
        pretty::dump_tables(b.grammar(), b.tables())
    );
    assert_eq!(
        pretty::dump_sets(a.grammar(), a.first_follow()),
        pretty::dump_sets(b.grammar(), b.first_follow())
    );
}

#[test]
fn conflict_dump_names_state_symbol_and_kind() {
    let parser = dangling_else();
    let dump = pretty::dump_conflicts(parser.grammar(), parser.conflicts());
    assert!(dump.contains("on 'e'"));
    assert!(dump.contains("shift/reduce"));
    assert!(dump.contains("kept s"));
}

#[test]
fn table_dump_has_one_row_per_state() {
    let parser = arithmetic();
    let dump = pretty::dump_tables(parser.grammar(), parser.tables());
    // Header plus one line per state.
    assert_eq!(dump.lines().count(), parser.tables().num_states() + 1);
}
