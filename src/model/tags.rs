//! Integer tag sets for entity attributes and constraint sets.

use std::fmt;

/// A set of integer tags.
///
/// Stored sorted and deduplicated, so subset checks run as a linear merge.
///
/// # Examples
///
/// ```
/// use u_assign::model::TagSet;
///
/// let attributes = TagSet::from([2, 0, 1]);
/// let required = TagSet::from([0, 2]);
/// assert!(required.is_subset(&attributes));
/// assert!(!attributes.is_subset(&required));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TagSet {
    tags: Vec<i64>,
}

impl TagSet {
    /// Creates an empty tag set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of distinct tags.
    pub fn len(&self) -> usize {
        self.tags.len()
    }

    /// Whether the set holds no tags.
    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    /// Whether `tag` is in the set.
    pub fn contains(&self, tag: i64) -> bool {
        self.tags.binary_search(&tag).is_ok()
    }

    /// Whether every tag of `self` is also in `other`.
    ///
    /// The empty set is a subset of every set.
    pub fn is_subset(&self, other: &TagSet) -> bool {
        if self.tags.len() > other.tags.len() {
            return false;
        }
        let mut theirs = other.tags.iter();
        'outer: for tag in &self.tags {
            for candidate in theirs.by_ref() {
                if candidate == tag {
                    continue 'outer;
                }
                if candidate > tag {
                    return false;
                }
            }
            return false;
        }
        true
    }

    /// Iterates over the tags in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = i64> + '_ {
        self.tags.iter().copied()
    }
}

impl FromIterator<i64> for TagSet {
    fn from_iter<I: IntoIterator<Item = i64>>(iter: I) -> Self {
        let mut tags: Vec<i64> = iter.into_iter().collect();
        tags.sort_unstable();
        tags.dedup();
        Self { tags }
    }
}

impl<const N: usize> From<[i64; N]> for TagSet {
    fn from(tags: [i64; N]) -> Self {
        tags.into_iter().collect()
    }
}

impl From<Vec<i64>> for TagSet {
    fn from(tags: Vec<i64>) -> Self {
        tags.into_iter().collect()
    }
}

impl From<&[i64]> for TagSet {
    fn from(tags: &[i64]) -> Self {
        tags.iter().copied().collect()
    }
}

impl fmt::Display for TagSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, tag) in self.tags.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{tag}")?;
        }
        write!(f, "}}")
    }
}
