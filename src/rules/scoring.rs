//! Rules domain: star rating from the variety of categories used.

use std::collections::BTreeSet;

use crate::content::ItemCategory;
use crate::session::AppliedItem;

/// Distinct categories needed for two stars.
const TWO_STAR_CATEGORIES: usize = 4;

fn used_categories(applied_items: &[AppliedItem]) -> BTreeSet<ItemCategory> {
    applied_items
        .iter()
        .map(|applied| applied.item.category)
        .collect()
}

/// 0 categories → 0, 1-3 → 1, 4-5 → 2, all six → 3.
/// Only variety counts: repeats inside a category and rarity are ignored.
pub fn calculate_stars(applied_items: &[AppliedItem]) -> u8 {
    match used_categories(applied_items).len() {
        0 => 0,
        n if n >= ItemCategory::ALL.len() => 3,
        n if n >= TWO_STAR_CATEGORIES => 2,
        _ => 1,
    }
}

pub fn star_message(stars: u8) -> &'static str {
    match stars {
        3 => "Perfect! You used all categories!",
        2 => "Great job! Almost complete!",
        1 => "Good start! Try more categories!",
        _ => "Keep trying!",
    }
}

/// Categories still unused, in catalog order.
pub fn missing_categories(applied_items: &[AppliedItem]) -> Vec<ItemCategory> {
    let used = used_categories(applied_items);
    ItemCategory::ALL
        .into_iter()
        .filter(|category| !used.contains(category))
        .collect()
}

/// A makeover can be submitted once anything is applied.
pub fn is_makeover_complete(applied_items: &[AppliedItem]) -> bool {
    !applied_items.is_empty()
}
