mod audit;
mod model;

pub use audit::{
    duplicate_items, empty_items, has_duplicate_items, has_empty_items, DuplicateItem, EmptyItem,
};
pub use model::{
    find_global_margin, margin_of, round_amount, round_half_away, safe_divide, Calculation,
    CalculationCategory, CalculationGroup, CalculationItem, GlobalMargin,
};
