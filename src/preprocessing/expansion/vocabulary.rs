//! Insertion-ordered attribute containers.
//!
//! Column order is derived from discovery order, so both containers iterate
//! in first-insertion order and ignore repeated inserts.

use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// Deduplicated attribute values of one group, in first-seen order.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub struct Vocabulary {
    values: Vec<String>,
    seen: HashSet<String>,
}

impl Vocabulary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a value, returning `false` if it was already present.
    pub fn insert(&mut self, value: impl Into<String>) -> bool {
        let value = value.into();
        if self.seen.contains(&value) {
            return false;
        }
        self.seen.insert(value.clone());
        self.values.push(value);
        true
    }

    pub fn contains(&self, value: &str) -> bool {
        self.seen.contains(value)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// The first-inserted value (the one dropped under drop-first).
    pub fn first(&self) -> Option<&str> {
        self.values.first().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.values.iter().map(String::as_str)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.values
    }
}

impl From<Vec<String>> for Vocabulary {
    fn from(values: Vec<String>) -> Self {
        let mut vocabulary = Vocabulary::new();
        for value in values {
            vocabulary.insert(value);
        }
        vocabulary
    }
}

impl From<Vocabulary> for Vec<String> {
    fn from(vocabulary: Vocabulary) -> Self {
        vocabulary.values
    }
}

impl<S: Into<String>> FromIterator<S> for Vocabulary {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut vocabulary = Vocabulary::new();
        for value in iter {
            vocabulary.insert(value);
        }
        vocabulary
    }
}

/// Attribute set of one extraction column: group key → vocabulary.
///
/// List-style columns have a single group named after the column; dict-style
/// columns have one group per outer mapping key.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(
    from = "Vec<(String, Vocabulary)>",
    into = "Vec<(String, Vocabulary)>"
)]
pub struct AttributeSet {
    groups: Vec<(String, Vocabulary)>,
    index: HashMap<String, usize>,
}

impl AttributeSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `value` under `group`, creating the group on first use.
    ///
    /// Returns `false` if the pair was already present.
    pub fn insert(&mut self, group: &str, value: impl Into<String>) -> bool {
        let pos = match self.index.get(group) {
            Some(&pos) => pos,
            None => {
                self.groups.push((group.to_string(), Vocabulary::new()));
                self.index.insert(group.to_string(), self.groups.len() - 1);
                self.groups.len() - 1
            }
        };
        self.groups[pos].1.insert(value)
    }

    pub fn group(&self, group: &str) -> Option<&Vocabulary> {
        self.index.get(group).map(|&pos| &self.groups[pos].1)
    }

    pub fn contains(&self, group: &str, value: &str) -> bool {
        self.group(group).is_some_and(|v| v.contains(value))
    }

    /// Groups in first-seen order.
    pub fn groups(&self) -> impl Iterator<Item = (&str, &Vocabulary)> {
        self.groups.iter().map(|(key, vocab)| (key.as_str(), vocab))
    }

    /// Number of groups.
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Total number of (group, value) pairs.
    pub fn n_attributes(&self) -> usize {
        self.groups.iter().map(|(_, vocab)| vocab.len()).sum()
    }
}

impl From<Vec<(String, Vocabulary)>> for AttributeSet {
    fn from(groups: Vec<(String, Vocabulary)>) -> Self {
        let mut set = AttributeSet::new();
        for (group, vocabulary) in groups {
            for value in Vec::<String>::from(vocabulary) {
                set.insert(&group, value);
            }
        }
        set
    }
}

impl From<AttributeSet> for Vec<(String, Vocabulary)> {
    fn from(set: AttributeSet) -> Self {
        set.groups
    }
}
