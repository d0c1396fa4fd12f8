//! Line segmentation: marker patterns and indentation heuristics.

use regex::Regex;

use super::{Outline, OutlineLine};

/// Number of leading whitespace characters that equal one nesting level
/// when no marker pattern matches.
const INDENT_CHARS_PER_LEVEL: usize = 2;

/// Splits flat text into an ordered sequence of leveled lines.
///
/// Each non-empty line is matched against a fixed, ordered list of marker
/// patterns; the index of the first matching pattern is the line's level.
/// The order is load-bearing: numbered lines are always level 0, bullets
/// level 1, roman numerals level 2, lettered items level 3, regardless of
/// visual indentation. Lines with no marker fall back to an indentation
/// heuristic.
///
/// # Example
/// ```
/// use docmap::outline::Segmenter;
///
/// let outline = Segmenter::new().segment("1. First\n- detail\n");
/// assert_eq!(outline.lines[0].level, 0);
/// assert_eq!(outline.lines[1].level, 1);
/// ```
pub struct Segmenter {
    // Index in this list = assigned level.
    patterns: Vec<Regex>,
}

impl Segmenter {
    /// Create a segmenter with the fixed marker pattern list.
    pub fn new() -> Self {
        Self {
            patterns: vec![
                // 0: multi-level numbered list ("1. ", "1.2.3. ")
                Regex::new(r"^\s*(?:\d+\.)+\s+").unwrap(),
                // 1: bullet at any indentation
                Regex::new(r"^\s*[-•*]\s+").unwrap(),
                // 2: roman numeral, case-insensitive
                Regex::new(r"(?i)^\s*[ivxlcdm]+\.\s+").unwrap(),
                // 3: single letter, case-insensitive
                Regex::new(r"(?i)^\s*[a-z]\.\s+").unwrap(),
            ],
        }
    }

    /// Segment flat text into an outline.
    ///
    /// Lines that are empty after trimming are discarded entirely; they do
    /// not occupy a position in the output.
    pub fn segment(&self, text: &str) -> Outline {
        let lines = text
            .split('\n')
            .filter(|line| !line.trim().is_empty())
            .map(|line| self.classify(line))
            .collect();
        Outline { lines }
    }

    /// Classify a single non-empty line.
    pub fn classify(&self, line: &str) -> OutlineLine {
        for (index, pattern) in self.patterns.iter().enumerate() {
            if let Some(found) = pattern.find(line) {
                return OutlineLine::new(
                    line,
                    line[found.end()..].trim(),
                    index as u32,
                );
            }
        }

        let indent = line.chars().take_while(|c| c.is_whitespace()).count();
        OutlineLine::new(line, line.trim(), (indent / INDENT_CHARS_PER_LEVEL) as u32)
    }
}

impl Default for Segmenter {
    fn default() -> Self {
        Self::new()
    }
}

/// Segment text with the default pattern set.
pub fn segment(text: &str) -> Outline {
    Segmenter::new().segment(text)
}
