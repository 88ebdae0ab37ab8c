//! Occurrence collection: every occurrence of symbols matching a query.

use std::collections::HashSet;

use tracing::{debug, trace};

use crate::symbol::SymbolMatcher;
use crate::types::{Index, SymbolUsage};

/// Collect every occurrence whose symbol matches `query`.
///
/// Order is document order, then stored occurrence order. At most one
/// definition is kept per `(file, line)`; references are never deduplicated.
pub fn collect_occurrences(index: &Index, query: &str) -> Vec<SymbolUsage> {
    let matcher = &SymbolMatcher::new(query);
    let usages = index
        .documents
        .iter()
        .flat_map(|doc| {
            doc.occurrences
                .iter()
                .filter(move |occ| matcher.matches(&occ.symbol))
                .map(move |occ| SymbolUsage {
                    symbol: occ.symbol.clone(),
                    file: doc.relative_path.clone(),
                    line: occ.line,
                    is_reference: !occ.roles.is_definition(),
                })
        })
        .fold(DefinitionDedup::default(), DefinitionDedup::push)
        .into_usages();
    debug!(query, usages = usages.len(), "collected occurrences");
    usages
}

/// Accumulator that drops repeated definitions at the same site.
#[derive(Default)]
struct DefinitionDedup {
    seen: HashSet<(String, i32)>,
    usages: Vec<SymbolUsage>,
}

impl DefinitionDedup {
    fn push(mut self, usage: SymbolUsage) -> Self {
        if usage.is_reference || self.seen.insert((usage.file.clone(), usage.line)) {
            trace!(%usage, "matched occurrence");
            self.usages.push(usage);
        } else {
            trace!(%usage, "duplicate definition skipped");
        }
        self
    }

    fn into_usages(self) -> Vec<SymbolUsage> {
        self.usages
    }
}
