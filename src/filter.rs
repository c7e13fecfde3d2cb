//! Client-side filtering over the most recent snapshot.
//!
//! Filters are pure and non-mutating: they borrow from the store's
//! current data and never trigger a fetch. For transactions the fixed
//! composition order is category first, then search.

use crate::api::{LeaderboardEntry, Transaction, TransactionType};

/// Categorical selector with an explicit "all" sentinel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CategorySelector<C> {
    #[default]
    All,
    Only(C),
}

/// Transaction-type selector driving the feed widget.
pub type TypeFilter = CategorySelector<TransactionType>;

impl TypeFilter {
    pub fn label(self) -> &'static str {
        match self {
            CategorySelector::All => "all",
            CategorySelector::Only(kind) => kind.as_str(),
        }
    }

    /// Cycle forward through all -> each type -> all.
    pub fn next(self) -> Self {
        let kinds = TransactionType::all();
        match self {
            CategorySelector::All => CategorySelector::Only(kinds[0]),
            CategorySelector::Only(kind) => match kinds.iter().position(|&k| k == kind) {
                Some(i) if i + 1 < kinds.len() => CategorySelector::Only(kinds[i + 1]),
                _ => CategorySelector::All,
            },
        }
    }

    /// Cycle backward.
    pub fn prev(self) -> Self {
        let kinds = TransactionType::all();
        match self {
            CategorySelector::All => CategorySelector::Only(kinds[kinds.len() - 1]),
            CategorySelector::Only(kind) => match kinds.iter().position(|&k| k == kind) {
                Some(0) | None => CategorySelector::All,
                Some(i) => CategorySelector::Only(kinds[i - 1]),
            },
        }
    }
}

/// Active search text and category selection. Owned by the UI loop,
/// read on every input change and on every data refresh.
#[derive(Debug, Clone, Default)]
pub struct FilterState {
    pub leaderboard_query: String,
    pub transaction_query: String,
    pub type_filter: TypeFilter,
}

fn normalize_query(query: &str) -> String {
    query.trim().to_lowercase()
}

fn query_matches(normalized: &str, fields: &[&str]) -> bool {
    if normalized.is_empty() {
        return true;
    }
    fields.iter().any(|f| f.to_lowercase().contains(normalized))
}

/// Case-insensitive substring match against any extracted field.
/// Empty or whitespace-only queries are the identity, order preserved.
pub fn filter_by_search<'a, T, F>(items: &'a [T], query: &str, fields: F) -> Vec<&'a T>
where
    F: Fn(&T) -> Vec<&str>,
{
    let normalized = normalize_query(query);
    items
        .iter()
        .filter(|item| query_matches(&normalized, &fields(item)))
        .collect()
}

/// Exact-match categorical filter; the `All` sentinel is the identity.
pub fn filter_by_category<'a, T, C, F>(
    items: &'a [T],
    selector: CategorySelector<C>,
    extract: F,
) -> Vec<&'a T>
where
    C: PartialEq + Copy,
    F: Fn(&T) -> C,
{
    items
        .iter()
        .filter(|item| match selector {
            CategorySelector::All => true,
            CategorySelector::Only(wanted) => extract(item) == wanted,
        })
        .collect()
}

fn entry_fields(entry: &LeaderboardEntry) -> Vec<&str> {
    vec![entry.user_id.as_str()]
}

/// Leaderboard search matches on user id only.
pub fn filter_leaderboard<'a>(
    entries: &'a [LeaderboardEntry],
    query: &str,
) -> Vec<&'a LeaderboardEntry> {
    filter_by_search(entries, query, entry_fields)
}

/// Transaction feed filter: type selector first, then search over
/// user id and the free-text details field.
pub fn filter_transactions<'a>(
    items: &'a [Transaction],
    state: &FilterState,
) -> Vec<&'a Transaction> {
    let normalized = normalize_query(&state.transaction_query);
    filter_by_category(items, state.type_filter, |t| t.kind)
        .into_iter()
        .filter(|t| query_matches(&normalized, &[t.user_id.as_str(), t.details.as_str()]))
        .collect()
}
