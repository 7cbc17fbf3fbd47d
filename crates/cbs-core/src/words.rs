//! Constraint word forms per object class
//!
//! Reads the tab-separated `class<TAB>word,word,...` file used to extend the
//! caption vocabulary with every word a constraint may be realized as.

use anyhow::{bail, Context, Result};
use std::collections::{BTreeMap, BTreeSet};
use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;
use tracing::info;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConstraintWords {
    words: BTreeMap<String, Vec<String>>,
}

impl ConstraintWords {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).with_context(|| format!("Failed to open file: {:?}", path))?;

        let words = Self::from_reader(file)
            .with_context(|| format!("Failed to load constraint words from {:?}", path))?;

        info!(classes = words.len(), "loaded constraint words from {:?}", path);
        Ok(words)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let reader = BufReader::new(reader);
        let mut words = BTreeMap::new();

        for (line_num, line) in reader.lines().enumerate() {
            let line = line.with_context(|| format!("Failed to read line {}", line_num + 1))?;

            if line.trim().is_empty() {
                continue;
            }

            let parts: Vec<&str> = line.split('\t').collect();
            if parts.len() != 2 {
                bail!(
                    "Invalid line format at line {}: '{}' (expected class<TAB>words)",
                    line_num + 1,
                    line
                );
            }

            let forms: Vec<String> = parts[1]
                .split(',')
                .map(str::trim)
                .filter(|word| !word.is_empty())
                .map(str::to_string)
                .collect();

            words.insert(parts[0].trim().to_string(), forms);
        }

        Ok(Self { words })
    }

    /// Word forms a constraint for this class may be realized as
    pub fn words_for(&self, class: &str) -> Option<&[String]> {
        self.words.get(class).map(Vec::as_slice)
    }

    /// Every token of every word form. Multi-word forms contribute each token.
    pub fn tokens(&self) -> BTreeSet<String> {
        self.words
            .values()
            .flatten()
            .flat_map(|word| word.split_whitespace())
            .map(str::to_string)
            .collect()
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}
