use std::collections::HashMap;

use super::model::{Calculation, CalculationItem};

/// An item whose price or quantity is zero, with its location.
#[derive(Debug, Clone, PartialEq)]
pub struct EmptyItem<'a> {
    pub group: &'a str,
    pub category: &'a str,
    pub item: &'a CalculationItem,
}

/// A description used by more than one item of the same calculation.
#[derive(Debug, Clone, PartialEq)]
pub struct DuplicateItem<'a> {
    /// First item carrying the description.
    pub item: &'a CalculationItem,
    pub count: usize,
    /// Sum of the totals of every occurrence.
    pub total: f64,
}

/// Items of `calculation` with a zero price or a zero quantity.
pub fn empty_items(calculation: &Calculation) -> Vec<EmptyItem<'_>> {
    let mut result = Vec::new();
    for group in &calculation.groups {
        for category in &group.categories {
            for item in category.items.iter().filter(|i| i.is_empty()) {
                result.push(EmptyItem {
                    group: &group.code,
                    category: &category.code,
                    item,
                });
            }
        }
    }
    result
}

/// Descriptions appearing more than once in `calculation` (case-insensitive),
/// in order of first appearance.
pub fn duplicate_items(calculation: &Calculation) -> Vec<DuplicateItem<'_>> {
    let mut order: Vec<String> = Vec::new();
    let mut found: HashMap<String, DuplicateItem<'_>> = HashMap::new();

    for item in calculation.items() {
        let key = item.description_key();
        match found.get_mut(&key) {
            Some(entry) => {
                entry.count += 1;
                entry.total += item.total();
            }
            None => {
                order.push(key.clone());
                found.insert(
                    key,
                    DuplicateItem {
                        item,
                        count: 1,
                        total: item.total(),
                    },
                );
            }
        }
    }

    order
        .into_iter()
        .filter_map(|key| found.remove(&key))
        .filter(|d| d.count > 1)
        .collect()
}

pub fn has_empty_items(calculation: &Calculation) -> bool {
    calculation.items().any(CalculationItem::is_empty)
}

pub fn has_duplicate_items(calculation: &Calculation) -> bool {
    !duplicate_items(calculation).is_empty()
}
