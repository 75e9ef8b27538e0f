//! Query string building
//!
//! Pure functions that turn page/filter state into request query pairs.

use std::collections::BTreeMap;

use super::pagination::PAGE_SIZE;

/// Drop filter entries whose value is empty or whitespace
pub fn strip_empty<'a, I>(filters: I) -> Vec<(String, String)>
where
    I: IntoIterator<Item = (&'a String, &'a String)>,
{
    filters
        .into_iter()
        .filter(|(_, value)| !value.trim().is_empty())
        .map(|(key, value)| (key.clone(), value.trim().to_string()))
        .collect()
}

/// Query for one page of a list section
///
/// # Examples
/// ```
/// use std::collections::BTreeMap;
/// use tenderdesk::logic::query::list_query;
///
/// let mut filters = BTreeMap::new();
/// filters.insert("search".to_string(), "paper".to_string());
/// filters.insert("status".to_string(), String::new());
///
/// let query = list_query(2, &filters);
/// assert_eq!(query, vec![
///     ("page".to_string(), "2".to_string()),
///     ("per_page".to_string(), "10".to_string()),
///     ("search".to_string(), "paper".to_string()),
/// ]);
/// ```
pub fn list_query(page: u32, filters: &BTreeMap<String, String>) -> Vec<(String, String)> {
    let mut query = vec![
        ("page".to_string(), page.max(1).to_string()),
        ("per_page".to_string(), PAGE_SIZE.to_string()),
    ];
    query.extend(strip_empty(filters));
    query
}

/// Query for a calendar range merged with the current filters
pub fn range_query(
    start: &str,
    end: &str,
    filters: &BTreeMap<String, String>,
) -> Vec<(String, String)> {
    let mut query = vec![
        ("start".to_string(), start.to_string()),
        ("end".to_string(), end.to_string()),
    ];
    query.extend(strip_empty(filters));
    query
}
