//! Query tokenising, customer name matching and note term matching.
//!
//! Search queries are lowercased and split on whitespace. A customer matches a
//! query only when the query contains both their first and last name as whole
//! tokens.

use std::collections::HashSet;

use crate::models::customer::Model as CustomerModel;

/// Lowercased whitespace-separated tokens of `query`.
pub fn tokenize(query: &str) -> Vec<String> {
    query.split_whitespace().map(str::to_lowercase).collect()
}

/// True when `tokens` contain both the first and the last name, ignoring case.
pub fn matches_full_name(customer: &CustomerModel, tokens: &HashSet<String>) -> bool {
    tokens.contains(&customer.first_name.to_lowercase())
        && tokens.contains(&customer.last_name.to_lowercase())
}

/// True when `text` contains every one of the lowercased `terms`, ignoring case.
pub fn contains_all_terms(text: &str, terms: &[String]) -> bool {
    let text = text.to_lowercase();
    terms.iter().all(|term| text.contains(term.as_str()))
}

/// Keeps the customers whose full name appears in `query`, preserving order.
pub fn filter_by_full_name(customers: Vec<CustomerModel>, query: &str) -> Vec<CustomerModel> {
    let tokens: HashSet<String> = tokenize(query).into_iter().collect();
    if tokens.is_empty() {
        return Vec::new();
    }

    customers
        .into_iter()
        .filter(|customer| matches_full_name(customer, &tokens))
        .collect()
}
