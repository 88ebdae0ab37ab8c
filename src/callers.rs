//! Caller resolution: symbols whose declarations reference a matching symbol.

use std::collections::HashSet;

use tracing::debug;

use crate::symbol::SymbolMatcher;
use crate::types::{Document, Index, SymbolUsage};

/// Find every declared symbol that references a symbol matching `query`,
/// with one representative occurrence per caller.
///
/// A document may contribute several callers. Output order is document
/// order, then declaration order; each caller appears once, represented by
/// its first occurrence in the first document that declares it as a caller
/// and also contains an occurrence of it.
pub fn collect_callers(index: &Index, query: &str) -> Vec<SymbolUsage> {
    let matcher = SymbolMatcher::new(query);
    let mut emitted: HashSet<&str> = HashSet::new();
    let mut callers = Vec::new();

    for doc in &index.documents {
        for caller in caller_symbols(doc, &matcher) {
            if emitted.contains(caller) {
                continue;
            }
            if let Some(occ) = doc.occurrences.iter().find(|o| o.symbol == caller) {
                emitted.insert(caller);
                callers.push(SymbolUsage {
                    symbol: caller.to_string(),
                    file: doc.relative_path.clone(),
                    line: occ.line,
                    is_reference: !occ.roles.is_definition(),
                });
            }
        }
    }

    debug!(query, callers = callers.len(), "resolved callers");
    callers
}

/// Declared symbols in `doc` with a reference relationship to a match.
fn caller_symbols<'a>(doc: &'a Document, matcher: &SymbolMatcher) -> Vec<&'a str> {
    doc.symbols
        .iter()
        .filter(|decl| {
            decl.relationships
                .iter()
                .any(|rel| rel.is_reference && matcher.matches(&rel.symbol))
        })
        .map(|decl| decl.symbol.as_str())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Occurrence, Relationship, SymbolDeclaration, SymbolRoles};

    const RUN: &str = "scip go gomod svc 1.0 A#run().";
    const STOP: &str = "scip go gomod svc 1.0 A#stop().";
    const HELPER: &str = "scip go gomod svc 1.0 B#helper().";

    fn decl(symbol: &str, target: &str, is_reference: bool) -> SymbolDeclaration {
        SymbolDeclaration {
            symbol: symbol.to_string(),
            relationships: vec![Relationship {
                symbol: target.to_string(),
                is_reference,
            }],
        }
    }

    fn occ(symbol: &str, line: i32, definition: bool) -> Occurrence {
        Occurrence {
            symbol: symbol.to_string(),
            line,
            roles: SymbolRoles(if definition { SymbolRoles::DEFINITION } else { 0 }),
        }
    }

    #[test]
    fn finds_caller_with_first_occurrence() {
        let index = Index {
            documents: vec![Document {
                relative_path: "a.go".into(),
                symbols: vec![decl(RUN, HELPER, true)],
                occurrences: vec![occ(RUN, 2, true), occ(HELPER, 4, false), occ(RUN, 9, false)],
            }],
        };
        let callers = collect_callers(&index, "B.helper");
        assert_eq!(callers.len(), 1);
        assert_eq!(callers[0].symbol, RUN);
        assert_eq!(callers[0].line, 2);
        assert!(!callers[0].is_reference);
    }

    #[test]
    fn non_reference_relationships_are_ignored() {
        let index = Index {
            documents: vec![Document {
                relative_path: "a.go".into(),
                symbols: vec![decl(RUN, HELPER, false)],
                occurrences: vec![occ(RUN, 2, true)],
            }],
        };
        assert!(collect_callers(&index, "B.helper").is_empty());
    }

    #[test]
    fn keeps_every_caller_in_a_document() {
        let index = Index {
            documents: vec![Document {
                relative_path: "a.go".into(),
                symbols: vec![decl(RUN, HELPER, true), decl(STOP, HELPER, true)],
                occurrences: vec![occ(RUN, 2, true), occ(STOP, 8, true)],
            }],
        };
        let callers: Vec<String> = collect_callers(&index, "B.helper")
            .into_iter()
            .map(|c| c.symbol)
            .collect();
        assert_eq!(callers, vec![RUN.to_string(), STOP.to_string()]);
    }

    #[test]
    fn one_entry_per_caller_across_documents() {
        let index = Index {
            documents: vec![
                Document {
                    relative_path: "a.go".into(),
                    symbols: vec![decl(RUN, HELPER, true)],
                    occurrences: vec![occ(RUN, 2, true)],
                },
                Document {
                    relative_path: "b.go".into(),
                    symbols: vec![decl(RUN, HELPER, true)],
                    occurrences: vec![occ(RUN, 20, false)],
                },
            ],
        };
        let callers = collect_callers(&index, "B.helper");
        assert_eq!(callers.len(), 1);
        assert_eq!(callers[0].file, "a.go");
    }

    #[test]
    fn caller_without_occurrence_in_its_document_is_skipped() {
        let index = Index {
            documents: vec![
                Document {
                    relative_path: "a.go".into(),
                    symbols: vec![decl(RUN, HELPER, true)],
                    occurrences: Vec::new(),
                },
                Document {
                    relative_path: "b.go".into(),
                    symbols: vec![decl(RUN, HELPER, true)],
                    occurrences: vec![occ(RUN, 20, false)],
                },
            ],
        };
        let callers = collect_callers(&index, "B.helper");
        assert_eq!(callers.len(), 1);
        assert_eq!(callers[0].file, "b.go");
        assert!(callers[0].is_reference);
    }

    #[test]
    fn output_is_deterministic() {
        let index = Index {
            documents: vec![Document {
                relative_path: "a.go".into(),
                symbols: vec![decl(STOP, HELPER, true), decl(RUN, HELPER, true)],
                occurrences: vec![occ(RUN, 2, true), occ(STOP, 8, true)],
            }],
        };
        let first = collect_callers(&index, "helper");
        for _ in 0..10 {
            assert_eq!(collect_callers(&index, "helper"), first);
        }
        assert_eq!(first[0].symbol, STOP);
    }
}
