//! Usage reports and symbol listings.
//!
//! Both are pure values built from an [`Index`]; rendering to text lives in
//! [`crate::output`].

use std::collections::HashSet;

use tracing::debug;

use crate::callers::collect_callers;
use crate::collector::collect_occurrences;
use crate::symbol::format_symbol_name;
use crate::types::{Index, SymbolUsage};

/// Two-level usage report for one query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    pub query: String,
    pub entries: Vec<ReportEntry>,
}

/// A top-level line: one distinct formatted name among the query's matches.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportEntry {
    /// Formatted name (also the dedup key).
    pub name: String,
    /// Raw identifier of the first occurrence shown under this name.
    pub symbol: String,
    /// The raw identifier or formatted name contains the query text.
    pub highlighted: bool,
    /// Other symbols found under this entry when it is itself a caller.
    /// Empty for non-callers.
    pub nested: Vec<NestedEntry>,
}

/// A sub-line under a caller entry. Never nests further.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NestedEntry {
    pub name: String,
    pub symbol: String,
}

/// Build the usage report for `query`.
pub fn build_report(index: &Index, query: &str) -> Report {
    let caller_names: HashSet<String> = collect_callers(index, query)
        .iter()
        .map(|c| format_symbol_name(&c.symbol))
        .collect();

    let entries: Vec<ReportEntry> = distinct_by_name(collect_occurrences(index, query))
        .into_iter()
        .map(|(name, usage)| {
            let highlighted = usage.symbol.contains(query) || name.contains(query);
            let nested = if caller_names.contains(&name) {
                nested_entries(index, &usage.symbol, &name)
            } else {
                Vec::new()
            };
            ReportEntry {
                name,
                symbol: usage.symbol,
                highlighted,
                nested,
            }
        })
        .collect();

    debug!(
        query,
        entries = entries.len(),
        callers = caller_names.len(),
        "built report"
    );
    Report {
        query: query.to_string(),
        entries,
    }
}

/// Occurrences of `parent_symbol` itself used as a query, minus the parent's
/// own name.
fn nested_entries(index: &Index, parent_symbol: &str, parent_name: &str) -> Vec<NestedEntry> {
    distinct_by_name(collect_occurrences(index, parent_symbol))
        .into_iter()
        .filter(|(name, _)| name != parent_name)
        .map(|(name, usage)| NestedEntry {
            name,
            symbol: usage.symbol,
        })
        .collect()
}

/// Pair each usage with its formatted name, keeping the first usage per name.
fn distinct_by_name(usages: Vec<SymbolUsage>) -> Vec<(String, SymbolUsage)> {
    let mut seen = HashSet::new();
    usages
        .into_iter()
        .map(|u| (format_symbol_name(&u.symbol), u))
        .filter(|(name, _)| seen.insert(name.clone()))
        .collect()
}

// ---------------------------------------------------------------------------
// Listing
// ---------------------------------------------------------------------------

/// One distinct canonical identifier in the index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SymbolListing {
    pub name: String,
    pub symbol: String,
}

/// Every distinct identifier declared or occurring in the index, sorted by
/// formatted name (then raw identifier).
///
/// Deduplication is by raw identifier, so distinct identifiers that format
/// identically are listed separately.
pub fn list_symbols(index: &Index) -> Vec<SymbolListing> {
    let mut seen: HashSet<&str> = HashSet::new();
    let mut listing: Vec<SymbolListing> = index
        .documents
        .iter()
        .flat_map(|doc| {
            doc.symbols
                .iter()
                .map(|s| s.symbol.as_str())
                .chain(doc.occurrences.iter().map(|o| o.symbol.as_str()))
        })
        .filter(|symbol| seen.insert(*symbol))
        .map(|symbol| SymbolListing {
            name: format_symbol_name(symbol),
            symbol: symbol.to_string(),
        })
        .collect();
    listing.sort_by(|a, b| a.name.cmp(&b.name).then_with(|| a.symbol.cmp(&b.symbol)));
    listing
}
