use std::fmt;

/// How much of the checklist is currently relevant to show.
///
/// Variants are declared in progression order, so `Ord` matches the direction
/// a session moves in: `Unavailable < OnlyRecommended < All`.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    serde::Serialize,
    serde::Deserialize,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Checkpoint {
    /// Nothing in the story warrants advice yet.
    #[default]
    Unavailable,
    /// Design and accessibility advice only.
    OnlyRecommended,
    /// Every category, including priority issues.
    All,
}

impl Checkpoint {
    /// Every checkpoint in progression order.
    pub const ALL_STATES: [Checkpoint; 3] = [
        Checkpoint::Unavailable,
        Checkpoint::OnlyRecommended,
        Checkpoint::All,
    ];

    /// Stable upper-case identifier.
    pub fn name(self) -> &'static str {
        match self {
            Checkpoint::Unavailable => "UNAVAILABLE",
            Checkpoint::OnlyRecommended => "ONLY_RECOMMENDED",
            Checkpoint::All => "ALL",
        }
    }
}

impl fmt::Display for Checkpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.name())
    }
}

/// Checklist grouping. Each category is counted independently.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    serde::Serialize,
    serde::Deserialize,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Category {
    /// Issues that should be fixed before publishing.
    Priority,
    /// Design recommendations.
    Design,
    /// Accessibility recommendations.
    Accessibility,
}

impl Category {
    /// Every category in display order.
    pub const ALL: [Category; 3] = [Category::Priority, Category::Design, Category::Accessibility];

    /// Dense index in `0..3`, matching [`Category::ALL`].
    pub fn index(self) -> usize {
        match self {
            Category::Priority => 0,
            Category::Design => 1,
            Category::Accessibility => 2,
        }
    }

    /// Stable upper-case identifier.
    pub fn name(self) -> &'static str {
        match self {
            Category::Priority => "PRIORITY",
            Category::Design => "DESIGN",
            Category::Accessibility => "ACCESSIBILITY",
        }
    }

    fn bit(self) -> u8 {
        1 << self.index()
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.name())
    }
}

/// Small set of [`Category`] values, iterated in [`Category::ALL`] order.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct CategorySet(u8);

impl CategorySet {
    /// The empty set.
    pub const EMPTY: CategorySet = CategorySet(0);

    /// Build a set from a slice of categories.
    pub fn of(categories: &[Category]) -> Self {
        categories.iter().fold(Self::EMPTY, |set, &c| set.with(c))
    }

    /// Copy of `self` with `category` added.
    pub fn with(self, category: Category) -> Self {
        Self(self.0 | category.bit())
    }

    /// Membership test.
    pub fn contains(self, category: Category) -> bool {
        self.0 & category.bit() != 0
    }

    /// True when no category is present.
    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Number of categories present.
    pub fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    /// Members in [`Category::ALL`] order.
    pub fn iter(self) -> impl Iterator<Item = Category> {
        Category::ALL.into_iter().filter(move |c| self.contains(*c))
    }
}

impl FromIterator<Category> for CategorySet {
    fn from_iter<I: IntoIterator<Item = Category>>(iter: I) -> Self {
        iter.into_iter().fold(Self::EMPTY, CategorySet::with)
    }
}

impl serde::Serialize for CategorySet {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.iter())
    }
}

impl<'de> serde::Deserialize<'de> for CategorySet {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let v = Vec::<Category>::deserialize(deserializer)?;
        Ok(v.into_iter().collect())
    }
}

/// Human-assigned check identifier, unique within its category.
#[derive(
    Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(transparent)]
pub struct CheckId(String);

impl CheckId {
    /// Wrap an identifier string.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Borrow the identifier.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// True when the identifier is empty or whitespace only.
    pub fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl From<&str> for CheckId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for CheckId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl fmt::Display for CheckId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&self.0)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
