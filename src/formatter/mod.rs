//! Lyrics formatting engines.
//!
//! Two text transforms run in sequence when the user formats lyrics:
//! repetition-collapsing segmentation ([`segment`]) followed by emphasis
//! uppercasing ([`emphasize`]). The formatted output is then split on
//! blank-line boundaries into render-stage slide bodies ([`split_slides`]).

use regex::{Regex, RegexBuilder};
use std::collections::HashMap;

use crate::session::EmphasisWordSet;
use crate::types::Precision;

lazy_static::lazy_static! {
    static ref EXTRA_NEWLINES: Regex = Regex::new(r"\n{3,}").unwrap();
    static ref SLIDE_BREAK: Regex = Regex::new(r"\n\n+").unwrap();
}

/// Occurrence counts of normalized line keys across a whole input.
///
/// Built once per formatting pass and read-only during segmentation.
#[derive(Debug, Default)]
pub struct LineFrequencyTable {
    counts: HashMap<String, usize>,
}

impl LineFrequencyTable {
    /// Count every line of `lines` under its normalized key.
    pub fn build<'a>(lines: impl IntoIterator<Item = &'a str>) -> Self {
        let mut counts = HashMap::new();
        for line in lines {
            *counts.entry(normalize_line(line)).or_insert(0) += 1;
        }
        Self { counts }
    }

    /// Total occurrences of the line, matched case/whitespace-insensitively.
    #[must_use]
    pub fn count(&self, line: &str) -> usize {
        self.counts.get(&normalize_line(line)).copied().unwrap_or(0)
    }
}

/// Normalized lookup key for frequency counting: trimmed and case-folded.
fn normalize_line(line: &str) -> String {
    line.trim().to_lowercase()
}

/// Collapse repeated lines and group the rest into slide-sized blocks.
///
/// A line is repetitive when its total occurrence count strictly exceeds
/// `precision.max_lines_per_slide()`; repetitive lines are dropped wherever
/// they appear, including their first occurrence. (Dropping the first
/// occurrence too is deliberate: the threshold compares against the total
/// count, not the running count.) Remaining lines fill slides of at most
/// `max_lines_per_slide` lines each; an empty buffer is never flushed, so
/// all-repetitive input yields an empty string. Slides are joined with one
/// blank line and any run of three or more newlines is collapsed to two.
#[must_use]
pub fn segment(text: &str, precision: Precision) -> String {
    if text.is_empty() {
        return String::new();
    }

    let lines: Vec<&str> = text.split('\n').collect();
    let table = LineFrequencyTable::build(lines.iter().copied());
    let max_lines = precision.max_lines_per_slide();

    let mut slides: Vec<String> = Vec::new();
    let mut current: Vec<&str> = Vec::new();

    for line in &lines {
        let repetitive = table.count(line) > max_lines;

        if current.len() < max_lines && !repetitive {
            current.push(line);
        } else {
            if !current.is_empty() {
                slides.push(current.join("\n"));
            }
            current = if repetitive { Vec::new() } else { vec![line] };
        }
    }

    if !current.is_empty() {
        slides.push(current.join("\n"));
    }

    let joined = slides.join("\n\n");
    EXTRA_NEWLINES.replace_all(&joined, "\n\n").into_owned()
}

/// Uppercase each whole-word, case-insensitive match of the emphasis words.
///
/// Matching is word-boundary aware, so `"love"` does not touch `"clover"`.
/// No markup is inserted; color emphasis is decided later at render time from
/// the uppercased text alone. Idempotent by construction.
#[must_use]
pub fn emphasize(text: &str, words: &EmphasisWordSet) -> String {
    let mut formatted = text.to_string();
    for word in words.iter() {
        let pattern = format!(r"\b{}\b", regex::escape(word));
        let Ok(re) = RegexBuilder::new(&pattern).case_insensitive(true).build() else {
            continue;
        };
        formatted = re
            .replace_all(&formatted, |caps: &regex::Captures<'_>| {
                caps[0].to_uppercase()
            })
            .into_owned();
    }
    formatted
}

/// Run both formatting engines: segmentation, then emphasis uppercasing.
#[must_use]
pub fn format_lyrics(text: &str, precision: Precision, words: &EmphasisWordSet) -> String {
    emphasize(&segment(text, precision), words)
}

/// Split formatted output into render-stage slide bodies.
///
/// Blocks are delimited by runs of two or more newlines; each body is
/// trimmed and empty blocks are discarded.
#[must_use]
pub fn split_slides(formatted: &str) -> Vec<String> {
    SLIDE_BREAK
        .split(formatted)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(ToString::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

    use super::*;

    fn words(list: &[&str]) -> EmphasisWordSet {
        let mut set = EmphasisWordSet::new();
        for w in list {
            set.add(w);
        }
        set
    }

    #[test]
    fn empty_input_yields_empty_output() {
        assert_eq!(segment("", Precision::new(50)), "");
        assert!(split_slides("").is_empty());
    }

    #[test]
    fn no_repetition_preserves_lines_in_order() {
        let input = "line one\nline two\nline three\nline four\nline five";
        let formatted = segment(input, Precision::new(50));
        let rejoined: Vec<&str> = formatted
            .split('\n')
            .filter(|l| !l.trim().is_empty())
            .collect();
        assert_eq!(rejoined, vec![
            "line one", "line two", "line three", "line four", "line five",
        ]);
    }

    #[test]
    fn slides_respect_max_lines() {
        // Precision 50 -> 2 lines per slide
        let input = "a1\nb2\nc3\nd4";
        let formatted = segment(input, Precision::new(50));
        assert_eq!(formatted, "a1\nb2\n\nc3\nd4");
    }

    #[test]
    fn over_threshold_line_dropped_everywhere_including_first() {
        // "a" occurs 4 times; precision 100 -> threshold 1, so every
        // occurrence is dropped, first included.
        let formatted = segment("a\na\na\na", Precision::new(100));
        assert_eq!(formatted, "");
        assert!(split_slides(&formatted).is_empty());
    }

    #[test]
    fn repeats_below_threshold_are_kept() {
        // "hello" occurs twice, threshold is 4: nothing dropped, one slide.
        let formatted = segment("hello\nworld\nhello\nfoo", Precision::new(25));
        assert_eq!(formatted, "hello\nworld\nhello\nfoo");
    }

    #[test]
    fn frequency_is_whitespace_and_case_insensitive() {
        let table = LineFrequencyTable::build(["Hello ", " hello", "HELLO"]);
        assert_eq!(table.count("hello"), 3);
        assert_eq!(table.count("absent"), 0);
    }

    #[test]
    fn newline_runs_collapse_to_exactly_two() {
        // A kept blank line ending a slide stacks with the slide join; the
        // collapse rule caps any run at two.
        let formatted = segment("a\n\nb", Precision::new(50));
        assert_eq!(formatted, "a\n\nb");
        assert!(!segment("x\n\n\n\ny", Precision::new(100)).contains("\n\n\n"));
    }

    #[test]
    fn emphasize_uppercases_whole_words_only() {
        let set = words(&["love"]);
        assert_eq!(emphasize("I love you", &set), "I LOVE you");
        assert_eq!(emphasize("a clover field", &set), "a clover field");
    }

    #[test]
    fn emphasize_is_case_insensitive_and_idempotent() {
        let set = words(&["grace"]);
        let once = emphasize("Amazing Grace, how sweet", &set);
        assert_eq!(once, "Amazing GRACE, how sweet");
        assert_eq!(emphasize(&once, &set), once);
    }

    #[test]
    fn emphasize_handles_regex_metacharacters() {
        let set = words(&["a+b"]);
        // Escaped literally; no panic, no spurious match
        assert_eq!(emphasize("sum a+b here", &set), "sum A+B here");
    }

    #[test]
    fn split_slides_counts_blank_delimited_blocks() {
        let formatted = "first slide\nstill first\n\nsecond slide\n\nthird";
        let slides = split_slides(formatted);
        assert_eq!(slides.len(), 3);
        assert_eq!(slides[0], "first slide\nstill first");
        assert_eq!(slides[2], "third");
    }

    #[test]
    fn full_pipeline_segments_then_emphasizes() {
        let set = words(&["sound"]);
        let out = format_lyrics(
            "Amazing grace how sweet the sound\nThat saved a wretch like me",
            Precision::new(50),
            &set,
        );
        assert!(out.contains("SOUND"));
        assert!(out.contains("That saved a wretch like me"));
    }
}
