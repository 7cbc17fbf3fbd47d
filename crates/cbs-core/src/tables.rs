//! Fixed label tables shared by hierarchy pruning and constraint selection

use std::collections::{HashMap, HashSet};

/// Object classes that never become constraints. Subtrees rooted at any of
/// these labels are also pruned from the hierarchy.
#[rustfmt::skip]
pub const BLACKLIST: &[&str] = &[
    "auto part", "bathroom accessory", "bicycle wheel", "boy", "building", "clothing",
    "door handle", "fashion accessory", "footwear", "girl", "hiking equipment", "human arm",
    "human beard", "human body", "human ear", "human eye", "human face", "human foot",
    "human hair", "human hand", "human head", "human leg", "human mouth", "human nose",
    "land vehicle", "mammal", "man", "person", "personal care", "plant", "plumbing fixture",
    "seat belt", "skull", "sports equipment", "tire", "tree", "vehicle registration plate",
    "wheel", "woman",
];

/// Cosmetic rewrites applied to the selected constraint labels.
pub const REPLACEMENTS: &[(&str, &str)] = &[
    ("band-aid", "bandaid"),
    ("wood-burning stove", "wood burning stove"),
    ("kitchen & dining room table", "table"),
    ("salt and pepper shakers", "salt and pepper"),
    ("power plugs and sockets", "power plugs"),
    ("luggage and bags", "luggage"),
];

/// Set of disallowed labels.
///
/// Membership deliberately ignores case: an exact-case check would let
/// "Person" from a capitalized taxonomy through, while "person" is rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Blacklist {
    labels: HashSet<String>,
}

impl Blacklist {
    pub fn new<I, S>(labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            labels: labels
                .into_iter()
                .map(|label| label.as_ref().to_lowercase())
                .collect(),
        }
    }

    /// A blacklist that rejects nothing
    pub fn empty() -> Self {
        Self { labels: HashSet::new() }
    }

    pub fn contains(&self, label: &str) -> bool {
        self.labels.contains(&label.to_lowercase())
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

impl Default for Blacklist {
    fn default() -> Self {
        Self::new(BLACKLIST)
    }
}

/// Label rewrite table. Unmapped labels pass through unchanged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Replacements {
    map: HashMap<String, String>,
}

impl Replacements {
    pub fn new<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            map: pairs
                .into_iter()
                .map(|(from, to)| (from.into(), to.into()))
                .collect(),
        }
    }

    pub fn empty() -> Self {
        Self { map: HashMap::new() }
    }

    pub fn apply<'a>(&'a self, label: &'a str) -> &'a str {
        self.map.get(label).map(String::as_str).unwrap_or(label)
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

impl Default for Replacements {
    fn default() -> Self {
        Self::new(REPLACEMENTS.iter().copied())
    }
}
