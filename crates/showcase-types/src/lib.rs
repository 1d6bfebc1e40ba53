// crates/showcase-types/src/lib.rs
// Shared types for the showcase widgets (native + WASM compatible)
// No browser-only dependencies allowed here

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

/// Shown when a review has no usable quote text
pub const FALLBACK_QUOTE: &str = "No review text available.";
/// Shown when a review has no usable author
pub const FALLBACK_AUTHOR: &str = "Anonymous";

pub const DEFAULT_MAX_QUOTE_CHARS: usize = 280;
pub const MAX_AUTHOR_CHARS: usize = 80;
pub const MAX_CONTEXT_CHARS: usize = 120;

// ═══════════════════════════════════════
// REVIEW RECORDS
// ═══════════════════════════════════════

/// Review candidate as supplied by the page. Every field may be missing.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ReviewInput {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub quote: Option<String>,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub context: Option<String>,
    #[serde(default)]
    pub featured: Option<bool>,
}

impl ReviewInput {
    /// Candidates without an explicit flag are featured
    pub fn is_featured(&self) -> bool {
        self.featured.unwrap_or(true)
    }
}

/// Normalized review ready for display
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Review {
    pub id: String,
    pub quote: String,
    pub author: String,
    pub context: Option<String>,
    pub featured: bool,
}

/// Filter candidates to featured ones and backfill missing fields.
///
/// Generated ids are `review-<n>` with `n` the 1-based position in
/// `candidates`, so the same input always yields the same ids. Ids are
/// unique within the returned list.
pub fn prepare_reviews(candidates: &[ReviewInput], max_quote_chars: usize) -> Vec<Review> {
    let mut seen = HashSet::new();

    candidates
        .iter()
        .enumerate()
        .filter(|(_, candidate)| candidate.is_featured())
        .map(|(position, candidate)| {
            let base_id = candidate
                .id
                .as_deref()
                .map(str::trim)
                .filter(|id| !id.is_empty())
                .map(str::to_string)
                .unwrap_or_else(|| format!("review-{}", position + 1));

            Review {
                id: unique_id(base_id, &mut seen),
                quote: clean_text(candidate.quote.as_deref(), max_quote_chars)
                    .unwrap_or_else(|| FALLBACK_QUOTE.to_string()),
                author: clean_text(candidate.author.as_deref(), MAX_AUTHOR_CHARS)
                    .unwrap_or_else(|| FALLBACK_AUTHOR.to_string()),
                context: clean_text(candidate.context.as_deref(), MAX_CONTEXT_CHARS),
                featured: true,
            }
        })
        .collect()
}

fn unique_id(base: String, seen: &mut HashSet<String>) -> String {
    if seen.insert(base.clone()) {
        return base;
    }
    let mut suffix = 2;
    loop {
        let candidate = format!("{}-{}", base, suffix);
        if seen.insert(candidate.clone()) {
            return candidate;
        }
        suffix += 1;
    }
}

// ═══════════════════════════════════════
// TEXT SANITATION
// ═══════════════════════════════════════

/// Strip markup, collapse whitespace and cap length. `None` when nothing is left.
pub fn clean_text(raw: Option<&str>, max_chars: usize) -> Option<String> {
    let text = strip_html(raw?);
    if text.is_empty() {
        return None;
    }
    Some(truncate_chars(&text, max_chars))
}

/// Remove `<...>` tags and decode the handful of entities testimonials use.
/// A `<` with no closing `>` is kept as literal text.
pub fn strip_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut rest = input;

    while let Some(start) = rest.find('<') {
        match rest[start..].find('>') {
            Some(end) => {
                out.push_str(&rest[..start]);
                out.push(' ');
                rest = &rest[start + end + 1..];
            }
            None => break,
        }
    }
    out.push_str(rest);

    let decoded = out
        .replace("&nbsp;", " ")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&amp;", "&");

    decoded.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Cap `text` at `max_chars` characters, ending in an ellipsis when cut
pub fn truncate_chars(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    if max_chars == 0 {
        return String::new();
    }
    let mut cut: String = text.chars().take(max_chars - 1).collect();
    let kept = cut.trim_end().len();
    cut.truncate(kept);
    cut.push('…');
    cut
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidate(quote: &str, author: &str) -> ReviewInput {
        ReviewInput {
            quote: Some(quote.to_string()),
            author: Some(author.to_string()),
            ..Default::default()
        }
    }

    // ============================================================================
    // ReviewInput tests
    // ============================================================================

    #[test]
    fn test_review_input_deserialize_partial() {
        let json = r#"{"quote": "Great work", "featured": false}"#;
        let input: ReviewInput = serde_json::from_str(json).unwrap();
        assert_eq!(input.quote.as_deref(), Some("Great work"));
        assert_eq!(input.author, None);
        assert!(!input.is_featured());
    }

    #[test]
    fn test_review_input_featured_defaults_true() {
        let input: ReviewInput = serde_json::from_str("{}").unwrap();
        assert!(input.is_featured());
    }

    // ============================================================================
    // prepare_reviews tests
    // ============================================================================

    #[test]
    fn test_prepare_keeps_only_featured() {
        let mut hidden = candidate("Hidden", "Someone");
        hidden.featured = Some(false);
        let mut shown = candidate("Shown", "Someone else");
        shown.featured = Some(true);
        let implicit = candidate("Implicit", "Third");

        let reviews = prepare_reviews(&[hidden, shown, implicit], DEFAULT_MAX_QUOTE_CHARS);
        assert_eq!(reviews.len(), 2);
        assert!(reviews.iter().all(|r| r.featured));
        assert_eq!(reviews[0].quote, "Shown");
        assert_eq!(reviews[1].quote, "Implicit");
    }

    #[test]
    fn test_prepare_backfills_missing_fields() {
        let reviews = prepare_reviews(&[ReviewInput::default()], DEFAULT_MAX_QUOTE_CHARS);
        assert_eq!(reviews.len(), 1);
        assert_eq!(reviews[0].id, "review-1");
        assert_eq!(reviews[0].quote, FALLBACK_QUOTE);
        assert_eq!(reviews[0].author, FALLBACK_AUTHOR);
        assert_eq!(reviews[0].context, None);
    }

    #[test]
    fn test_prepare_generated_ids_follow_input_position() {
        let mut skipped = candidate("a", "b");
        skipped.featured = Some(false);
        let reviews = prepare_reviews(&[skipped, candidate("c", "d")], DEFAULT_MAX_QUOTE_CHARS);
        assert_eq!(reviews[0].id, "review-2");
    }

    #[test]
    fn test_prepare_deduplicates_ids() {
        let mut first = candidate("one", "x");
        first.id = Some("dup".to_string());
        let mut second = candidate("two", "y");
        second.id = Some(" dup ".to_string());
        let mut third = candidate("three", "z");
        third.id = Some("dup".to_string());

        let reviews = prepare_reviews(&[first, second, third], DEFAULT_MAX_QUOTE_CHARS);
        let ids: Vec<_> = reviews.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["dup", "dup-2", "dup-3"]);
    }

    #[test]
    fn test_prepare_strips_markup_from_quote() {
        let reviews = prepare_reviews(
            &[candidate("<p>Loved <b>every</b> minute</p>", "<i>Dana</i>")],
            DEFAULT_MAX_QUOTE_CHARS,
        );
        assert_eq!(reviews[0].quote, "Loved every minute");
        assert_eq!(reviews[0].author, "Dana");
    }

    #[test]
    fn test_prepare_caps_quote_length() {
        let long = "word ".repeat(100);
        let reviews = prepare_reviews(&[candidate(&long, "A")], 40);
        assert!(reviews[0].quote.chars().count() <= 40);
        assert!(reviews[0].quote.ends_with('…'));
    }

    #[test]
    fn test_prepare_blank_context_is_none() {
        let mut input = candidate("q", "a");
        input.context = Some("   <br>  ".to_string());
        let reviews = prepare_reviews(&[input], DEFAULT_MAX_QUOTE_CHARS);
        assert_eq!(reviews[0].context, None);
    }

    #[test]
    fn test_prepare_empty_input() {
        assert!(prepare_reviews(&[], DEFAULT_MAX_QUOTE_CHARS).is_empty());
    }

    // ============================================================================
    // Sanitation tests
    // ============================================================================

    #[test]
    fn test_strip_html_decodes_entities() {
        assert_eq!(strip_html("Tom &amp; Jerry&nbsp;&quot;rock&quot;"), "Tom & Jerry \"rock\"");
    }

    #[test]
    fn test_strip_html_keeps_unclosed_angle() {
        assert_eq!(strip_html("5 < 6 and   more"), "5 < 6 and more");
    }

    #[test]
    fn test_truncate_chars_short_text_untouched() {
        assert_eq!(truncate_chars("short", 10), "short");
    }

    #[test]
    fn test_truncate_chars_counts_characters_not_bytes() {
        let text = "ééééé";
        assert_eq!(truncate_chars(text, 5), text);
        assert_eq!(truncate_chars(text, 3), "éé…");
    }

    #[test]
    fn test_truncate_chars_zero() {
        assert_eq!(truncate_chars("abc", 0), "");
    }
}
