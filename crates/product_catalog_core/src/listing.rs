use std::collections::HashMap;

use crate::product::Product;

/// Options recognized by the list operation. Unknown parameters are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListQuery {
    pub category: Option<String>,
    pub limit: Option<usize>,
}

impl ListQuery {
    pub fn from_params(params: &HashMap<String, String>) -> Self {
        let category = params
            .get("category")
            .filter(|value| !value.is_empty())
            .cloned();
        let limit = params.get("limit").and_then(|value| parse_limit(value));

        Self { category, limit }
    }
}

/// A limit that does not parse as a non-negative integer is ignored.
pub fn parse_limit(raw: &str) -> Option<usize> {
    raw.trim().parse::<usize>().ok()
}

/// Filters by exact category, orders newest first by `created_at`, then
/// truncates to the limit.
///
/// The sort is stable, so records sharing a timestamp keep scan order. An
/// empty `created_at` compares lowest and lands at the end.
pub fn shape_listing(products: Vec<Product>, query: &ListQuery) -> Vec<Product> {
    let mut selected: Vec<Product> = match &query.category {
        Some(category) => products
            .into_iter()
            .filter(|product| &product.category == category)
            .collect(),
        None => products,
    };

    selected.sort_by(|left, right| right.created_at.cmp(&left.created_at));

    if let Some(limit) = query.limit {
        selected.truncate(limit);
    }

    selected
}
