//! Review tag vocabulary

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Spoiler-category tag a reviewer may attach to a review
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Tag {
    Ending,
    Twist,
    Death,
    VillainIdentity,
    PostCredits,
    Action,
    Moving,
    Direction,
    Gore,
    Ost,
}

/// Label that is not part of the tag vocabulary
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown tag: {0}")]
pub struct UnknownTag(pub String);

impl Tag {
    /// The full vocabulary in display order
    pub const ALL: [Tag; 10] = [
        Tag::Ending,
        Tag::Twist,
        Tag::Death,
        Tag::VillainIdentity,
        Tag::PostCredits,
        Tag::Action,
        Tag::Moving,
        Tag::Direction,
        Tag::Gore,
        Tag::Ost,
    ];

    /// Display label, which is also the wire representation
    pub fn label(self) -> &'static str {
        match self {
            Tag::Ending => "결말",
            Tag::Twist => "반전",
            Tag::Death => "죽음",
            Tag::VillainIdentity => "빌런정체",
            Tag::PostCredits => "쿠키영상",
            Tag::Action => "액션",
            Tag::Moving => "감동",
            Tag::Direction => "연출",
            Tag::Gore => "잔인함",
            Tag::Ost => "OST",
        }
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Tag {
    type Err = UnknownTag;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Tag::ALL
            .into_iter()
            .find(|tag| tag.label() == s)
            .ok_or_else(|| UnknownTag(s.to_string()))
    }
}

impl Serialize for Tag {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

impl<'de> Deserialize<'de> for Tag {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let label = String::deserialize(deserializer)?;
        label.parse().map_err(serde::de::Error::custom)
    }
}

/// Ordered set of tags
///
/// Keeps insertion order and never holds the same tag twice.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct TagSet(Vec<Tag>);

impl TagSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a tag, returning false if it was already present
    pub fn insert(&mut self, tag: Tag) -> bool {
        if self.contains(tag) {
            return false;
        }
        self.0.push(tag);
        true
    }

    /// Remove a tag, returning true if it was present
    pub fn remove(&mut self, tag: Tag) -> bool {
        let before = self.0.len();
        self.0.retain(|t| *t != tag);
        self.0.len() != before
    }

    /// Add the tag if absent, remove it otherwise
    pub fn toggle(&mut self, tag: Tag) {
        if !self.remove(tag) {
            self.0.push(tag);
        }
    }

    pub fn contains(&self, tag: Tag) -> bool {
        self.0.contains(&tag)
    }

    pub fn iter(&self) -> impl Iterator<Item = Tag> + '_ {
        self.0.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    pub fn labels(&self) -> Vec<String> {
        self.iter().map(|t| t.label().to_string()).collect()
    }
}

impl FromIterator<Tag> for TagSet {
    fn from_iter<I: IntoIterator<Item = Tag>>(iter: I) -> Self {
        let mut set = TagSet::new();
        for tag in iter {
            set.insert(tag);
        }
        set
    }
}

impl<'de> Deserialize<'de> for TagSet {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let tags = Vec::<Tag>::deserialize(deserializer)?;
        Ok(tags.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_labels() {
        assert_eq!("결말".parse::<Tag>(), Ok(Tag::Ending));
        assert_eq!(" OST ".parse::<Tag>(), Ok(Tag::Ost));
        assert_eq!(
            "plot".parse::<Tag>(),
            Err(UnknownTag("plot".to_string()))
        );
    }

    #[test]
    fn test_every_label_round_trips() {
        for tag in Tag::ALL {
            assert_eq!(tag.label().parse::<Tag>(), Ok(tag));
        }
    }

    #[test]
    fn test_tag_set_keeps_insertion_order_without_duplicates() {
        let mut set = TagSet::new();
        assert!(set.insert(Tag::Ost));
        assert!(set.insert(Tag::Ending));
        assert!(!set.insert(Tag::Ost));
        assert_eq!(set.iter().collect::<Vec<_>>(), vec![Tag::Ost, Tag::Ending]);
    }

    #[test]
    fn test_toggle() {
        let mut set = TagSet::new();
        set.toggle(Tag::Death);
        assert!(set.contains(Tag::Death));
        set.toggle(Tag::Death);
        assert!(set.is_empty());
    }
}
