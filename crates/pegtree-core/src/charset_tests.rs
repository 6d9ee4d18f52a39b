use crate::chars;
use crate::charset::CharSet;

#[test]
fn finite_membership() {
    let set = CharSet::of("abc".chars());

    assert!(set.contains('a'));
    assert!(!set.contains('d'));
    assert!(!set.is_empty());
    assert!(CharSet::empty().is_empty());
}

#[test]
fn complement_flips_membership() {
    let set = CharSet::of("ab".chars()).complement();

    assert!(!set.contains('a'));
    assert!(set.contains('z'));
    assert!(set.contains(chars::EOI));
    assert!(set.is_complemented());
}

#[test]
fn range_is_inclusive() {
    let digits = CharSet::range('0', '9');

    assert!(digits.contains('0'));
    assert!(digits.contains('9'));
    assert!(!digits.contains('a'));
}

#[test]
fn union_of_finite_sets() {
    let ab = CharSet::of("ab".chars());
    let bc = CharSet::of("bc".chars());

    assert_eq!(ab.union(&bc), CharSet::of("abc".chars()));
}

#[test]
fn union_with_cofinite_set() {
    let ab = CharSet::of("ab".chars());
    let not_bc = CharSet::of("bc".chars()).complement();
    let union = ab.union(&not_bc);

    // Everything except 'c': 'b' is covered by ab, 'c' by neither.
    assert!(union.contains('a'));
    assert!(union.contains('b'));
    assert!(!union.contains('c'));
    assert!(union.contains('z'));
}

#[test]
fn union_of_cofinite_sets() {
    let not_ab = CharSet::of("ab".chars()).complement();
    let not_bc = CharSet::of("bc".chars()).complement();
    let union = not_ab.union(&not_bc);

    // Only the shared exclusion survives.
    assert!(union.contains('a'));
    assert!(!union.contains('b'));
    assert!(union.contains('c'));
}

#[test]
fn intersect_covers_both_orientations() {
    let ab = CharSet::of("ab".chars());
    let bc = CharSet::of("bc".chars());
    assert_eq!(ab.intersect(&bc), CharSet::single('b'));

    let not_bc = bc.complement();
    assert_eq!(ab.intersect(&not_bc), CharSet::single('a'));

    let not_ab = ab.complement();
    let both = not_ab.intersect(&not_bc);
    assert!(!both.contains('a'));
    assert!(!both.contains('b'));
    assert!(!both.contains('c'));
    assert!(both.contains('z'));
}

#[test]
fn subset_rules() {
    let a = CharSet::single('a');
    let ab = CharSet::of("ab".chars());

    assert!(a.is_subset_of(&ab));
    assert!(!ab.is_subset_of(&a));

    // Finite inside cofinite: must be disjoint from the exclusions.
    assert!(a.is_subset_of(&CharSet::of("xy".chars()).complement()));
    assert!(!a.is_subset_of(&CharSet::of("ax".chars()).complement()));

    // Cofinite never fits in finite.
    assert!(!CharSet::empty().complement().is_subset_of(&ab));

    // Cofinite inside cofinite: exclusions must shrink.
    assert!(
        CharSet::of("ab".chars())
            .complement()
            .is_subset_of(&CharSet::single('a').complement())
    );
}

#[test]
fn with_and_without() {
    let set = CharSet::single('a').with('b').without('a');

    assert!(!set.contains('a'));
    assert!(set.contains('b'));

    let cofinite = CharSet::all().without('x');
    assert!(!cofinite.contains('x'));
    assert!(cofinite.with('x').contains('x'));
}

#[test]
fn display_formats_both_orientations() {
    assert_eq!(CharSet::of("ab".chars()).to_string(), "[ab]");
    assert_eq!(CharSet::of("ab".chars()).complement().to_string(), "[^ab]");
    assert_eq!(CharSet::single('\n').to_string(), "[\\n]");
}
