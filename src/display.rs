//! Rendering list items as a single line of text, and reading quantities back
//! out of text the user typed.
//!
//! Rendering folds quantity and unit into the name: `Milk (2 L)`, `Eggs (x6)`,
//! `Flour (kg)`. Parsing only understands a trailing ` x3` and a leading `2 `;
//! parenthesised units are never read back.

use crate::models::ListItem;

/// Name and quantity recovered from user-entered text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedItem {
    pub name: String,
    pub quantity_value: u32,
}

pub fn to_display_name(item: &ListItem) -> String {
    match (item.quantity_value, item.unit()) {
        (qty, Some(unit)) if qty > 1 => format!("{} ({qty} {unit})", item.name),
        (qty, None) if qty > 1 => format!("{} (x{qty})", item.name),
        (_, Some(unit)) => format!("{} ({unit})", item.name),
        _ => item.name.clone(),
    }
}

/// Parse `"Milk x3"` or `"2 Milk"` into a name and quantity.
///
/// The trailing ` xN` form is checked first, then the leading `N ` form runs
/// on whatever name is left. When both match, the leading number wins:
/// `"2 Milk x3"` is two of `"Milk"`.
pub fn parse_display_name(input: &str) -> ParsedItem {
    let mut name = input;
    let mut quantity_value = 1;

    if let Some((prefix, suffix)) = input.rsplit_once(" x") {
        if let Some(qty) = parse_count(suffix) {
            name = prefix;
            quantity_value = qty;
        }
    }

    if let Some((head, rest)) = name.split_once(' ') {
        if let Some(qty) = parse_count(head) {
            quantity_value = qty;
            name = rest;
        }
    }

    ParsedItem {
        name: name.to_string(),
        quantity_value,
    }
}

/// A non-empty run of ASCII digits that fits in a `u32`.
fn parse_count(text: &str) -> Option<u32> {
    if text.is_empty() || !text.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    text.parse().ok()
}
