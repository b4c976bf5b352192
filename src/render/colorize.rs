//! Preview token colorizer.
//!
//! On-screen previews color fully-uppercase tokens with a random pick from
//! the selected palette on every render. The coloring is intentionally
//! non-deterministic across re-renders; only the random source is abstracted
//! so tests can pin it down. Exported rasters never use these colors.

use rand::Rng;

use crate::types::PaletteColor;

/// A run of preview text with an optional emphasis color.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextFragment {
    /// The token or whitespace run, verbatim.
    pub text: String,
    /// Emphasis color, present only for eligible tokens.
    pub color: Option<PaletteColor>,
}

/// Source of emphasis colors for eligible tokens.
///
/// The production implementation draws uniformly at random per token per
/// render; tests inject a deterministic source.
pub trait ColorSource {
    /// Pick a color from the selected palette subset.
    ///
    /// Returns white when the palette is empty.
    fn pick(&mut self, palette: &[PaletteColor]) -> PaletteColor;
}

/// Uniform random color selection, the production behavior.
#[derive(Debug, Default)]
pub struct RandomColorSource;

impl ColorSource for RandomColorSource {
    fn pick(&mut self, palette: &[PaletteColor]) -> PaletteColor {
        if palette.is_empty() {
            return PaletteColor::WHITE;
        }
        let idx = rand::thread_rng().gen_range(0..palette.len());
        palette[idx]
    }
}

/// Whether a token receives emphasis coloring.
///
/// Eligible tokens are non-empty, composed entirely of uppercase A-Z, and
/// not the single-character token "I". Eligibility looks only at the text,
/// never at the user's emphasis word list, so words already uppercase in the
/// source lyrics are colored too.
#[must_use]
pub fn is_emphasis_token(token: &str) -> bool {
    !token.is_empty()
        && token != "I"
        && token.chars().all(|c| c.is_ascii_uppercase())
}

/// Split slide text into styled preview fragments.
///
/// Whitespace runs (newlines included) are preserved as separate uncolored
/// fragments so the preview reflows exactly like the formatted text.
pub fn colorize(
    text: &str,
    palette: &[PaletteColor],
    source: &mut dyn ColorSource,
) -> Vec<TextFragment> {
    split_tokens(text)
        .into_iter()
        .map(|token| {
            let color = is_emphasis_token(&token).then(|| source.pick(palette));
            TextFragment { text: token, color }
        })
        .collect()
}

/// Split text on whitespace boundaries, keeping the whitespace runs.
fn split_tokens(text: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut in_whitespace = None;

    for c in text.chars() {
        let ws = c.is_whitespace();
        if in_whitespace != Some(ws) && !current.is_empty() {
            tokens.push(std::mem::take(&mut current));
        }
        in_whitespace = Some(ws);
        current.push(c);
    }
    if !current.is_empty() {
        tokens.push(current);
    }
    tokens
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

    use super::*;

    /// Always picks the first palette entry; white on empty.
    struct FirstColor;

    impl ColorSource for FirstColor {
        fn pick(&mut self, palette: &[PaletteColor]) -> PaletteColor {
            palette.first().copied().unwrap_or(PaletteColor::WHITE)
        }
    }

    #[test]
    fn eligibility_boundary_cases() {
        assert!(!is_emphasis_token("I"));
        assert!(is_emphasis_token("A"));
        assert!(is_emphasis_token("AI"));
        assert!(!is_emphasis_token("a1"));
        assert!(!is_emphasis_token(""));
        assert!(!is_emphasis_token("Love"));
        assert!(is_emphasis_token("LOVE"));
        // Digits and punctuation disqualify the whole token
        assert!(!is_emphasis_token("LOVE!"));
    }

    #[test]
    fn whitespace_runs_survive_as_fragments() {
        let fragments = colorize("HE  is\nLORD", &[], &mut FirstColor);
        let texts: Vec<&str> = fragments.iter().map(|f| f.text.as_str()).collect();
        assert_eq!(texts, vec!["HE", "  ", "is", "\n", "LORD"]);
        assert_eq!(fragments.iter().filter(|f| f.color.is_some()).count(), 2);
    }

    #[test]
    fn eligible_tokens_get_palette_color() {
        let red = PaletteColor::from_hex("#FF0000").unwrap();
        let fragments = colorize("sing HOLY now", &[red], &mut FirstColor);
        let holy = fragments.iter().find(|f| f.text == "HOLY").unwrap();
        assert_eq!(holy.color, Some(red));
        let sing = fragments.iter().find(|f| f.text == "sing").unwrap();
        assert_eq!(sing.color, None);
    }

    #[test]
    fn empty_palette_falls_back_to_white() {
        let fragments = colorize("GLORY", &[], &mut FirstColor);
        assert_eq!(fragments[0].color, Some(PaletteColor::WHITE));
    }

    #[test]
    fn random_source_only_draws_from_palette() {
        let palette = [
            PaletteColor::from_hex("#FF0000").unwrap(),
            PaletteColor::from_hex("#00FF00").unwrap(),
        ];
        let mut source = RandomColorSource;
        for _ in 0..50 {
            let picked = source.pick(&palette);
            assert!(palette.contains(&picked));
        }
        assert_eq!(source.pick(&[]), PaletteColor::WHITE);
    }
}
