use pegtree_core::chars;

use super::builder::{GrammarBuilder, GrammarError};
use super::matcher::MatcherKind;

#[test]
fn rule_installs_and_labels_the_matcher() {
    let mut b = GrammarBuilder::<()>::new();
    let a = b.ch('a');
    b.rule("S", a);
    b.start("S");
    let grammar = b.finish().unwrap();

    assert_eq!(grammar.rule("S"), Some(a));
    assert_eq!(grammar.start(), a);
    assert_eq!(grammar.label_of(a), "S");
}

#[test]
fn rule_ref_resolves_forward_references() {
    let mut b = GrammarBuilder::<()>::new();
    let proxy = b.rule_ref("Later");
    let s = b.seq([proxy]);
    b.rule("S", s);
    let a = b.ch('a');
    b.rule("Later", a);
    b.start("S");
    let grammar = b.finish().unwrap();

    match grammar.matcher(proxy).kind() {
        MatcherKind::Proxy(Some(target)) => assert_eq!(*target, a),
        other => panic!("unexpected kind {other:?}"),
    }
    assert_eq!(grammar.label_of(proxy), "Later");
}

#[test]
fn unresolved_rule_is_rejected() {
    let mut b = GrammarBuilder::<()>::new();
    let proxy = b.rule_ref("Missing");
    b.rule("S", proxy);
    b.start("S");

    assert_eq!(
        b.finish().unwrap_err(),
        GrammarError::UnresolvedRule {
            name: "Missing".to_string()
        }
    );
}

#[test]
fn duplicate_rule_is_rejected() {
    let mut b = GrammarBuilder::<()>::new();
    let a = b.ch('a');
    let c = b.ch('c');
    b.rule("S", a);
    b.rule("S", c);
    b.start("S");

    assert_eq!(
        b.finish().unwrap_err(),
        GrammarError::DuplicateRule {
            name: "S".to_string()
        }
    );
}

#[test]
fn missing_and_unknown_start_are_rejected() {
    let b = GrammarBuilder::<()>::new();
    assert_eq!(b.finish().unwrap_err(), GrammarError::MissingStart);

    let mut b = GrammarBuilder::<()>::new();
    let a = b.ch('a');
    b.rule("S", a);
    b.start("T");
    assert_eq!(
        b.finish().unwrap_err(),
        GrammarError::UnknownStartRule {
            name: "T".to_string()
        }
    );
}

#[test]
fn label_overrides_the_default() {
    let mut b = GrammarBuilder::<()>::new();
    let a = b.ch('a');
    b.label(a, "Letter");
    b.rule("S", a);
    b.start("S");
    let grammar = b.finish().unwrap();

    // The explicit label set before rule() wins over the rule name.
    assert_eq!(grammar.label_of(a), "Letter");
}

#[test]
fn flag_setters_mark_the_matcher() {
    let mut b = GrammarBuilder::<()>::new();
    let a = b.ch('a');
    b.suppress_node(a);
    b.suppress_subnodes(a);
    b.skip_node(a);
    b.skip_actions_in_predicates(a);
    b.rule("S", a);
    b.start("S");
    let grammar = b.finish().unwrap();

    let flags = grammar.matcher(a).flags();
    assert!(flags.suppress_node);
    assert!(flags.suppress_subnodes);
    assert!(flags.skip_node);
    assert!(flags.skip_actions_in_predicates);
}

#[test]
fn rules_iterate_in_declaration_order() {
    let mut b = GrammarBuilder::<()>::new();
    let z = b.ch('z');
    let a = b.ch('a');
    b.rule("Zed", z);
    b.rule("Alpha", a);
    b.start("Zed");
    let grammar = b.finish().unwrap();

    let names: Vec<&str> = grammar.rules().map(|(name, _)| name).collect();
    assert_eq!(names, vec!["Zed", "Alpha"]);
}

#[test]
fn none_of_excludes_end_of_input() {
    let mut b = GrammarBuilder::<()>::new();
    let id = b.none_of("ab");
    b.rule("S", id);
    b.start("S");
    let grammar = b.finish().unwrap();

    match grammar.matcher(id).kind() {
        MatcherKind::AnyOf(set) => {
            assert!(!set.contains('a'));
            assert!(!set.contains(chars::EOI));
            assert!(set.contains('z'));
        }
        other => panic!("unexpected kind {other:?}"),
    }
}
