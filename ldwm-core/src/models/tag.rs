//! Tags and the bitmasks that select them.
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{BitAnd, BitOr, BitXor};

/// Largest number of tags; the full mask must fit a single word.
pub const MAX_TAGS: usize = 31;

/// A set of tags, one bit per tag. Bit `n` is the tag labelled `tags[n]`.
#[derive(Serialize, Deserialize, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct TagMask(pub u32);

impl TagMask {
    pub const EMPTY: Self = Self(0);
    /// Every possible bit. Masked down to the configured tags where used.
    pub const ALL: Self = Self(u32::MAX);

    /// The mask of the single tag at `index` (0 based). Empty when the index doesn't fit.
    pub const fn single(index: usize) -> Self {
        if index < u32::BITS as usize {
            Self(1 << index)
        } else {
            Self::EMPTY
        }
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub const fn contains(self, index: usize) -> bool {
        self.0 & Self::single(index).0 != 0
    }

    pub const fn intersects(self, other: Self) -> bool {
        self.0 & other.0 != 0
    }

    /// Position of the lowest set bit.
    pub const fn lowest(self) -> Option<usize> {
        if self.0 == 0 {
            None
        } else {
            Some(self.0.trailing_zeros() as usize)
        }
    }
}

impl fmt::Debug for TagMask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TagMask({:#b})", self.0)
    }
}

impl BitAnd for TagMask {
    type Output = Self;
    fn bitand(self, rhs: Self) -> Self {
        Self(self.0 & rhs.0)
    }
}

impl BitOr for TagMask {
    type Output = Self;
    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl BitXor for TagMask {
    type Output = Self;
    fn bitxor(self, rhs: Self) -> Self {
        Self(self.0 ^ rhs.0)
    }
}

/// The configured tag labels.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct Tags {
    labels: Vec<String>,
}

impl Tags {
    /// Builds the tag list, dropping labels past [`MAX_TAGS`]. An empty list gets a single tag.
    pub fn new(mut labels: Vec<String>) -> Self {
        if labels.len() > MAX_TAGS {
            tracing::warn!(
                "{} tags configured, only the first {} are used",
                labels.len(),
                MAX_TAGS
            );
            labels.truncate(MAX_TAGS);
        }
        if labels.is_empty() {
            labels.push("1".to_owned());
        }
        Self { labels }
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// Mask with every configured tag set.
    pub fn mask(&self) -> TagMask {
        TagMask((1 << self.labels.len()) - 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mask_covers_configured_tags_only() {
        let tags = Tags::new(vec!["1".to_owned(), "2".to_owned(), "3".to_owned()]);
        assert_eq!(tags.mask(), TagMask(0b111));
        assert_eq!(TagMask::ALL & tags.mask(), tags.mask());
    }

    #[test]
    fn lowest_set_bit() {
        assert_eq!(TagMask(0b110).lowest(), Some(1));
        assert_eq!(TagMask::EMPTY.lowest(), None);
        assert!(TagMask(0b100).contains(2));
        assert!(!TagMask(0b100).contains(0));
    }

    #[test]
    fn too_many_tags_are_truncated() {
        let labels = (1..=40).map(|i| i.to_string()).collect();
        let tags = Tags::new(labels);
        assert_eq!(tags.len(), MAX_TAGS);
        assert_eq!(tags.mask(), TagMask(0x7fff_ffff));
    }

    #[test]
    fn indexes_past_the_word_have_no_bit() {
        assert_eq!(TagMask::single(31), TagMask(0x8000_0000));
        assert_eq!(TagMask::single(32), TagMask::EMPTY);
        assert!(!TagMask::ALL.contains(40));
    }
}
