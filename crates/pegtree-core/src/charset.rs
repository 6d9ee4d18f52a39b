//! Finite and cofinite character sets.
//!
//! Starter-set analysis works over sets that may be complements of finite
//! sets (e.g. "anything but a quote"), so the representation carries an
//! explicit complement bit and implements the full set algebra for both
//! orientations. The alphabet includes the three reserved sentinels from
//! [`crate::chars`].

use std::collections::BTreeSet;

use crate::chars;

/// A finite or cofinite set over the extended character alphabet.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct CharSet {
    set: BTreeSet<char>,
    complemented: bool,
}

impl CharSet {
    /// The empty set.
    pub fn empty() -> Self {
        Self::default()
    }

    /// The set of all characters (including sentinels).
    pub fn all() -> Self {
        Self {
            set: BTreeSet::new(),
            complemented: true,
        }
    }

    /// A single-character set.
    pub fn single(c: char) -> Self {
        Self::of([c])
    }

    /// A finite set from any char iterator.
    pub fn of(chars: impl IntoIterator<Item = char>) -> Self {
        Self {
            set: chars.into_iter().collect(),
            complemented: false,
        }
    }

    /// The inclusive range `lo..=hi`.
    pub fn range(lo: char, hi: char) -> Self {
        Self::of(lo..=hi)
    }

    #[inline]
    pub fn contains(&self, c: char) -> bool {
        self.set.contains(&c) != self.complemented
    }

    /// Whether the set is finite and has no members.
    pub fn is_empty(&self) -> bool {
        !self.complemented && self.set.is_empty()
    }

    pub fn is_complemented(&self) -> bool {
        self.complemented
    }

    /// Whether the set accepts the empty-match sentinel.
    pub fn matches_empty(&self) -> bool {
        self.contains(chars::EMPTY)
    }

    pub fn complement(&self) -> Self {
        Self {
            set: self.set.clone(),
            complemented: !self.complemented,
        }
    }

    pub fn union(&self, other: &Self) -> Self {
        match (self.complemented, other.complemented) {
            (false, false) => Self {
                set: self.set.union(&other.set).copied().collect(),
                complemented: false,
            },
            (false, true) => Self {
                set: other.set.difference(&self.set).copied().collect(),
                complemented: true,
            },
            (true, false) => other.union(self),
            (true, true) => Self {
                set: self.set.intersection(&other.set).copied().collect(),
                complemented: true,
            },
        }
    }

    pub fn intersect(&self, other: &Self) -> Self {
        match (self.complemented, other.complemented) {
            (false, false) => Self {
                set: self.set.intersection(&other.set).copied().collect(),
                complemented: false,
            },
            (false, true) => Self {
                set: self.set.difference(&other.set).copied().collect(),
                complemented: false,
            },
            (true, false) => other.intersect(self),
            (true, true) => Self {
                set: self.set.union(&other.set).copied().collect(),
                complemented: true,
            },
        }
    }

    /// Subset test. A cofinite set is never a subset of a finite one.
    pub fn is_subset_of(&self, other: &Self) -> bool {
        match (self.complemented, other.complemented) {
            (false, false) => self.set.is_subset(&other.set),
            (false, true) => self.set.is_disjoint(&other.set),
            (true, false) => false,
            (true, true) => other.set.is_subset(&self.set),
        }
    }

    /// The set with one character added.
    pub fn with(&self, c: char) -> Self {
        let mut out = self.clone();
        if out.complemented {
            out.set.remove(&c);
        } else {
            out.set.insert(c);
        }
        out
    }

    /// The set with one character removed.
    pub fn without(&self, c: char) -> Self {
        let mut out = self.clone();
        if out.complemented {
            out.set.insert(c);
        } else {
            out.set.remove(&c);
        }
        out
    }
}

impl std::fmt::Display for CharSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("[")?;
        if self.complemented {
            f.write_str("^")?;
        }
        for &c in &self.set {
            f.write_str(&chars::display_char(c))?;
        }
        f.write_str("]")
    }
}
