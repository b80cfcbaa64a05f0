use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Round an amount to 2 decimals, half away from zero.
pub fn round_amount(value: f64) -> f64 {
    round_half_away(value, 2)
}

/// Round `value` to `decimals` places, half away from zero.
///
/// The scaled value is first rounded to 9 decimals so that binary artefacts
/// (`2.005 * 100.0 == 200.49999999999997`) land on the half they were meant
/// to represent.
pub fn round_half_away(value: f64, decimals: usize) -> f64 {
    if !value.is_finite() {
        return value;
    }
    let factor = 10f64.powi(decimals as i32);
    let scaled = ((value * factor) * 1e9).round() / 1e9;
    let rounded = scaled.round() / factor;
    if rounded == 0.0 {
        0.0
    } else {
        rounded
    }
}

/// `numerator / denominator`, or 0 when the denominator is 0.
pub fn safe_divide(numerator: f64, denominator: f64) -> f64 {
    if denominator == 0.0 {
        0.0
    } else {
        numerator / denominator
    }
}

/// A global margin applied to the groups total when it falls in
/// `[minimum, maximum)`.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct GlobalMargin {
    pub minimum: f64,
    pub maximum: f64,
    pub margin: f64,
}

impl GlobalMargin {
    pub fn contains(&self, value: f64) -> bool {
        value >= self.minimum && value < self.maximum
    }
}

/// Find the margin of the first range containing `value`.
pub fn find_global_margin(ranges: &[GlobalMargin], value: f64) -> Option<f64> {
    ranges.iter().find(|r| r.contains(value)).map(|r| r.margin)
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct CalculationItem {
    pub description: String,
    #[serde(default)]
    pub unit: Option<String>,
    pub price: f64,
    pub quantity: f64,
}

impl CalculationItem {
    pub fn new(description: impl Into<String>, price: f64, quantity: f64) -> Self {
        Self {
            description: description.into(),
            unit: None,
            price,
            quantity,
        }
    }

    pub fn with_unit(mut self, unit: impl Into<String>) -> Self {
        self.unit = Some(unit.into());
        self
    }

    pub fn total(&self) -> f64 {
        round_amount(self.price * self.quantity)
    }

    /// An item is empty when its price or its quantity is zero.
    pub fn is_empty(&self) -> bool {
        self.price == 0.0 || self.quantity == 0.0
    }

    /// Key used to detect duplicated items.
    pub fn description_key(&self) -> String {
        self.description.trim().to_lowercase()
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct CalculationCategory {
    pub code: String,
    #[serde(default)]
    pub items: Vec<CalculationItem>,
}

impl CalculationCategory {
    pub fn new(code: impl Into<String>, items: Vec<CalculationItem>) -> Self {
        Self {
            code: code.into(),
            items,
        }
    }

    pub fn amount(&self) -> f64 {
        self.items.iter().map(CalculationItem::total).sum()
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct CalculationGroup {
    pub code: String,
    /// Margin as a fraction (0.25 = 25%).
    #[serde(default)]
    pub margin: f64,
    #[serde(default)]
    pub categories: Vec<CalculationCategory>,
}

impl CalculationGroup {
    pub fn new(code: impl Into<String>, margin: f64, categories: Vec<CalculationCategory>) -> Self {
        Self {
            code: code.into(),
            margin,
            categories,
        }
    }

    pub fn amount(&self) -> f64 {
        self.categories.iter().map(CalculationCategory::amount).sum()
    }

    pub fn margin_amount(&self) -> f64 {
        self.amount() * self.margin
    }

    pub fn total(&self) -> f64 {
        self.amount() * (1.0 + self.margin)
    }

    pub fn items(&self) -> impl Iterator<Item = &CalculationItem> {
        self.categories.iter().flat_map(|c| c.items.iter())
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct Calculation {
    pub id: u32,
    pub date: NaiveDate,
    #[serde(default)]
    pub customer: String,
    #[serde(default)]
    pub description: String,
    pub state: String,
    /// Stored global margin; resolved from the configured ranges when absent.
    #[serde(default)]
    pub global_margin: Option<f64>,
    #[serde(default)]
    pub user_margin: f64,
    #[serde(default)]
    pub groups: Vec<CalculationGroup>,
}

impl Calculation {
    pub fn new(id: u32, date: NaiveDate, state: impl Into<String>) -> Self {
        Self {
            id,
            date,
            customer: String::new(),
            description: String::new(),
            state: state.into(),
            global_margin: None,
            user_margin: 0.0,
            groups: Vec::new(),
        }
    }

    pub fn items(&self) -> impl Iterator<Item = &CalculationItem> {
        self.groups.iter().flat_map(CalculationGroup::items)
    }

    pub fn items_count(&self) -> usize {
        self.items().count()
    }

    pub fn is_empty(&self) -> bool {
        self.items().next().is_none()
    }

    pub fn items_total(&self) -> f64 {
        self.groups_amount()
    }

    pub fn groups_amount(&self) -> f64 {
        self.groups.iter().map(CalculationGroup::amount).sum()
    }

    pub fn groups_margin_amount(&self) -> f64 {
        self.groups.iter().map(CalculationGroup::margin_amount).sum()
    }

    pub fn groups_total(&self) -> f64 {
        self.groups.iter().map(CalculationGroup::total).sum()
    }

    /// Margin of the groups total over the items total (0 when empty).
    pub fn groups_margin(&self) -> f64 {
        margin_of(self.groups_total(), self.groups_amount())
    }

    pub fn global_margin(&self) -> f64 {
        self.global_margin.unwrap_or(0.0)
    }

    pub fn global_amount(&self) -> f64 {
        self.groups_total() * self.global_margin()
    }

    pub fn total_net(&self) -> f64 {
        self.groups_total() + self.global_amount()
    }

    pub fn user_amount(&self) -> f64 {
        self.total_net() * self.user_margin
    }

    pub fn overall_total(&self) -> f64 {
        self.total_net() + self.user_amount()
    }

    pub fn overall_margin_amount(&self) -> f64 {
        self.overall_total() - self.items_total()
    }

    /// `overall_total / items_total - 1`, 0 without items total.
    pub fn overall_margin(&self) -> f64 {
        margin_of(self.overall_total(), self.items_total())
    }

    pub fn is_margin_below(&self, minimum: f64) -> bool {
        self.overall_margin() < minimum
    }

    /// Fill in the global margin from `ranges` when none is stored.
    pub fn resolve_global_margin(&mut self, ranges: &[GlobalMargin]) {
        if self.global_margin.is_none() {
            let margin = find_global_margin(ranges, self.groups_total()).unwrap_or(0.0);
            self.global_margin = Some(margin);
        }
    }
}

/// Margin of `total` over `base` as a fraction; 0 when `base` is 0.
pub fn margin_of(total: f64, base: f64) -> f64 {
    if base == 0.0 {
        0.0
    } else {
        total / base - 1.0
    }
}
