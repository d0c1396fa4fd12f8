//! Leveled outline types inferred from flat text.

mod segmenter;

pub use segmenter::{segment, Segmenter};

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A single retained line with its inferred nesting level.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutlineLine {
    /// Original line as it appeared in the input.
    pub raw: String,
    /// Display text with leading whitespace and list markers stripped.
    pub text: String,
    /// Inferred nesting level (0 = top).
    pub level: u32,
}

impl OutlineLine {
    /// Create an outline line.
    pub fn new(raw: impl Into<String>, text: impl Into<String>, level: u32) -> Self {
        Self {
            raw: raw.into(),
            text: text.into(),
            level,
        }
    }
}

/// An ordered, leveled grouping of outline lines.
///
/// Lines keep document order; grouping by level is order-preserving within
/// each level. "Main topics" are all lines sharing the numerically smallest
/// level present.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Outline {
    /// All retained lines in document order.
    pub lines: Vec<OutlineLine>,
}

impl Outline {
    /// Create an empty outline.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the outline has no lines.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Number of retained lines.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// The smallest level present, if any.
    pub fn min_level(&self) -> Option<u32> {
        self.lines.iter().map(|line| line.level).min()
    }

    /// Lines grouped by level, ascending, order-preserving within a level.
    pub fn by_level(&self) -> BTreeMap<u32, Vec<&OutlineLine>> {
        let mut groups: BTreeMap<u32, Vec<&OutlineLine>> = BTreeMap::new();
        for line in &self.lines {
            groups.entry(line.level).or_default().push(line);
        }
        groups
    }

    /// All lines at the minimum level present.
    pub fn main_topics(&self) -> Vec<&OutlineLine> {
        match self.min_level() {
            Some(min) => self
                .lines
                .iter()
                .filter(|line| line.level == min)
                .collect(),
            None => Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Outline {
        Outline {
            lines: vec![
                OutlineLine::new("Topic", "Topic", 0),
                OutlineLine::new("- detail", "detail", 1),
                OutlineLine::new("Other", "Other", 0),
                OutlineLine::new("    deep", "deep", 2),
            ],
        }
    }

    #[test]
    fn test_min_level() {
        assert_eq!(sample().min_level(), Some(0));
        assert_eq!(Outline::new().min_level(), None);
    }

    #[test]
    fn test_by_level_preserves_order() {
        let outline = sample();
        let groups = outline.by_level();
        let level0: Vec<&str> = groups[&0].iter().map(|l| l.text.as_str()).collect();
        assert_eq!(level0, vec!["Topic", "Other"]);
        assert_eq!(groups[&1].len(), 1);
        assert_eq!(groups[&2].len(), 1);
    }

    #[test]
    fn test_main_topics_are_minimum_level() {
        let outline = sample();
        let topics: Vec<&str> = outline.main_topics().iter().map(|l| l.text.as_str()).collect();
        assert_eq!(topics, vec!["Topic", "Other"]);
    }

    #[test]
    fn test_main_topics_shift_with_minimum() {
        // No level-0 lines: the minimum present level becomes "main".
        let outline = Outline {
            lines: vec![
                OutlineLine::new("- a", "a", 1),
                OutlineLine::new("    b", "b", 2),
            ],
        };
        let topics: Vec<&str> = outline.main_topics().iter().map(|l| l.text.as_str()).collect();
        assert_eq!(topics, vec!["a"]);
    }
}
