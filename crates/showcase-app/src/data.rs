// crates/showcase-app/src/data.rs
// Review data source: page-embedded JSON or the built-in list

use serde_json::Value;
use showcase_types::ReviewInput;

use crate::error::{Result, WidgetError};

/// Id of the `<script type="application/json">` element holding reviews
pub const REVIEW_DATA_ELEMENT_ID: &str = "review-data";

/// Parse review candidates leniently.
///
/// Accepts a bare array or `{"reviews": [...]}`. Entries that are not objects
/// are skipped; fields of the wrong type count as missing.
pub fn parse_review_data(json: &str) -> Result<Vec<ReviewInput>> {
    let root: Value =
        serde_json::from_str(json).map_err(|e| WidgetError::InvalidData(e.to_string()))?;

    let entries = match &root {
        Value::Array(entries) => entries,
        Value::Object(map) => match map.get("reviews") {
            Some(Value::Array(entries)) => entries,
            _ => {
                return Err(WidgetError::InvalidData(
                    "expected a \"reviews\" array".to_string(),
                ));
            }
        },
        _ => {
            return Err(WidgetError::InvalidData(
                "expected an array of reviews".to_string(),
            ));
        }
    };

    let mut inputs = Vec::with_capacity(entries.len());
    for (position, entry) in entries.iter().enumerate() {
        match review_from_value(entry) {
            Some(input) => inputs.push(input),
            None => log::warn!("Skipping review entry {}: not an object", position + 1),
        }
    }
    Ok(inputs)
}

fn review_from_value(value: &Value) -> Option<ReviewInput> {
    let obj = value.as_object()?;
    let text = |key: &str| obj.get(key).and_then(Value::as_str).map(str::to_string);

    Some(ReviewInput {
        id: text("id").or_else(|| obj.get("id").and_then(Value::as_i64).map(|n| n.to_string())),
        quote: text("quote"),
        author: text("author"),
        context: text("context"),
        featured: obj.get("featured").and_then(Value::as_bool),
    })
}

/// Reviews shipped with the site, used when the page embeds none
pub fn builtin_reviews() -> Vec<ReviewInput> {
    let review = |id: &str, quote: &str, author: &str, context: Option<&str>, featured: bool| {
        ReviewInput {
            id: Some(id.to_string()),
            quote: Some(quote.to_string()),
            author: Some(author.to_string()),
            context: context.map(str::to_string),
            featured: Some(featured),
        }
    };

    vec![
        review(
            "kitchen-refresh",
            "The before and after photos speak for themselves. Our kitchen looks brand new and the crew left the place spotless every evening.",
            "Maria G.",
            Some("Kitchen renovation"),
            true,
        ),
        review(
            "deck-restoration",
            "They brought a twenty year old deck back to life in two days. Clear quote, no surprises, great communication.",
            "Tom R.",
            Some("Deck restoration"),
            true,
        ),
        review(
            "bathroom-remodel",
            "From the first visit to the final walkthrough everything ran on schedule. I would hire them again tomorrow.",
            "Priya S.",
            Some("Bathroom remodel"),
            true,
        ),
        review(
            "exterior-paint",
            "Fast, friendly and the paint job still looks perfect after a full winter.",
            "Jordan L.",
            None,
            true,
        ),
        review(
            "draft-review",
            "Pending approval.",
            "Internal",
            None,
            false,
        ),
    ]
}

/// Candidates from the page, or the built-in list when absent or unusable
#[cfg(target_arch = "wasm32")]
pub fn load_reviews(document: &web_sys::Document) -> Vec<ReviewInput> {
    let Some(raw) = document
        .get_element_by_id(REVIEW_DATA_ELEMENT_ID)
        .and_then(|el| el.text_content())
    else {
        log::debug!("No #{} element, using built-in reviews", REVIEW_DATA_ELEMENT_ID);
        return builtin_reviews();
    };

    match parse_review_data(&raw) {
        Ok(inputs) => inputs,
        Err(e) => {
            log::warn!("Ignoring embedded reviews: {}", e);
            builtin_reviews()
        }
    }
}
