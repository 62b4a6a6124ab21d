//! Interned identifiers for fragments and categories.
//!
//! Fragment ids, edge endpoints and category tags are compared far more often
//! than they are printed, so they are stored as [`Id`] symbols backed by one
//! process-wide string interner.

use std::{
    fmt,
    sync::{Mutex, OnceLock},
};

use string_interner::{DefaultStringInterner, DefaultSymbol};

/// Global string interner shared by every [`Id`].
///
/// # Thread Safety
///
/// Access goes through a `Mutex`, so ids can be created and resolved from
/// concurrent render requests without further coordination.
static INTERNER: OnceLock<Mutex<DefaultStringInterner>> = OnceLock::new();

fn with_interner<R>(f: impl FnOnce(&mut DefaultStringInterner) -> R) -> R {
    let mut interner = INTERNER
        .get_or_init(|| Mutex::new(DefaultStringInterner::new()))
        .lock()
        .expect("Failed to acquire interner lock");
    f(&mut interner)
}

/// Interned identifier used for fragment ids and category tags.
///
/// Two ids are equal exactly when their strings are equal, and equality is a
/// symbol comparison.
///
/// # Examples
///
/// ```
/// use prism_core::identifier::Id;
///
/// let planner = Id::new("PLAN");
/// let category = Id::new("agents");
///
/// assert_eq!(planner, "PLAN");
/// assert_ne!(planner, category);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Id(DefaultSymbol);

impl Id {
    /// Creates an `Id` from its string form, interning it on first use.
    pub fn new(name: &str) -> Self {
        Self(with_interner(|interner| interner.get_or_intern(name)))
    }

    /// Returns the id for `name` if it has been interned, without interning it.
    ///
    /// # Examples
    ///
    /// ```
    /// use prism_core::identifier::Id;
    ///
    /// let router = Id::new("ROUTER");
    ///
    /// assert_eq!(Id::lookup("ROUTER"), Some(router));
    /// assert_eq!(Id::lookup("never seen before"), None);
    /// ```
    pub fn lookup(name: &str) -> Option<Self> {
        with_interner(|interner| interner.get(name)).map(Self)
    }

    /// Creates the generated id of an edge between two nodes.
    ///
    /// The `ordinal` distinguishes parallel edges between the same pair: the
    /// first edge is `A->B`, the second `A->B#2`, and so on.
    ///
    /// # Examples
    ///
    /// ```
    /// use prism_core::identifier::Id;
    ///
    /// let source = Id::new("EMB");
    /// let target = Id::new("VEC");
    ///
    /// assert_eq!(Id::edge(source, target, 1), "EMB->VEC");
    /// assert_eq!(Id::edge(source, target, 2), "EMB->VEC#2");
    /// ```
    pub fn edge(source: Id, target: Id, ordinal: usize) -> Self {
        let name = if ordinal <= 1 {
            format!("{source}->{target}")
        } else {
            format!("{source}->{target}#{ordinal}")
        };
        Self::new(&name)
    }

    /// Resolves the id and passes its string form to `f`.
    ///
    /// Avoids allocating when the caller only needs to inspect the text. The
    /// interner lock is held while `f` runs, so `f` must not create or
    /// resolve other ids.
    pub fn with_str<R>(&self, f: impl FnOnce(&str) -> R) -> R {
        with_interner(|interner| {
            let value = interner
                .resolve(self.0)
                .expect("Symbol should exist in interner");
            f(value)
        })
    }
}

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = self.with_str(str::to_owned);
        f.write_str(&value)
    }
}

impl From<&str> for Id {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<&String> for Id {
    fn from(name: &String) -> Self {
        Self::new(name)
    }
}

impl PartialEq<str> for Id {
    fn eq(&self, other: &str) -> bool {
        self.with_str(|value| value == other)
    }
}

impl PartialEq<&str> for Id {
    fn eq(&self, other: &&str) -> bool {
        self == *other
    }
}
