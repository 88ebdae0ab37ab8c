//! Index loading: read a SCIP file from disk and convert it into the
//! engine's read-only [`Index`] model.

use std::path::Path;

use protobuf::Message;
use scip::types;
use tracing::debug;

use crate::errors::LoadError;
use crate::types::{Document, Index, Occurrence, Relationship, SymbolDeclaration, SymbolRoles};

/// Read and decode the SCIP index at `path`.
pub fn load_index(path: &Path) -> Result<Index, LoadError> {
    let bytes = std::fs::read(path).map_err(|source| LoadError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let index = decode_index(&bytes).map_err(|source| LoadError::Decode {
        path: path.to_path_buf(),
        source,
    })?;
    debug!(
        path = %path.display(),
        documents = index.documents.len(),
        occurrences = index.occurrence_count(),
        "loaded index"
    );
    Ok(index)
}

/// Decode SCIP protobuf bytes.
pub fn decode_index(bytes: &[u8]) -> Result<Index, protobuf::Error> {
    let raw = types::Index::parse_from_bytes(bytes)?;
    Ok(Index::from(raw))
}

impl From<types::Index> for Index {
    fn from(raw: types::Index) -> Self {
        Index {
            documents: raw.documents.into_iter().map(Document::from).collect(),
        }
    }
}

impl From<types::Document> for Document {
    fn from(raw: types::Document) -> Self {
        Document {
            relative_path: raw.relative_path,
            symbols: raw.symbols.into_iter().map(SymbolDeclaration::from).collect(),
            occurrences: raw.occurrences.into_iter().map(Occurrence::from).collect(),
        }
    }
}

impl From<types::SymbolInformation> for SymbolDeclaration {
    fn from(raw: types::SymbolInformation) -> Self {
        SymbolDeclaration {
            symbol: raw.symbol,
            relationships: raw
                .relationships
                .into_iter()
                .map(|r| Relationship {
                    symbol: r.symbol,
                    is_reference: r.is_reference,
                })
                .collect(),
        }
    }
}

impl From<types::Occurrence> for Occurrence {
    fn from(raw: types::Occurrence) -> Self {
        Occurrence {
            // Empty ranges are malformed but tolerated.
            line: raw.range.first().copied().unwrap_or(0),
            symbol: raw.symbol,
            roles: SymbolRoles(raw.symbol_roles),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw_occurrence(symbol: &str, line: i32, roles: i32) -> types::Occurrence {
        types::Occurrence {
            range: vec![line, 0, 3],
            symbol: symbol.to_string(),
            symbol_roles: roles,
            ..Default::default()
        }
    }

    fn sample_raw_index() -> types::Index {
        let mut rel = types::Relationship::new();
        rel.symbol = "scip go b/ helper().".into();
        rel.is_reference = true;

        let decl = types::SymbolInformation {
            symbol: "scip go a/ run().".into(),
            relationships: vec![rel],
            ..Default::default()
        };

        let doc = types::Document {
            relative_path: "a/run.go".into(),
            symbols: vec![decl],
            occurrences: vec![
                raw_occurrence("scip go a/ run().", 4, types::SymbolRole::Definition as i32),
                raw_occurrence("scip go b/ helper().", 6, 0),
            ],
            ..Default::default()
        };

        types::Index {
            documents: vec![doc],
            ..Default::default()
        }
    }

    #[test]
    fn decode_converts_documents_and_relationships() {
        let bytes = sample_raw_index().write_to_bytes().unwrap();
        let index = decode_index(&bytes).unwrap();

        assert_eq!(index.documents.len(), 1);
        let doc = &index.documents[0];
        assert_eq!(doc.relative_path, "a/run.go");
        assert_eq!(doc.symbols[0].symbol, "scip go a/ run().");
        assert_eq!(doc.symbols[0].relationships[0].symbol, "scip go b/ helper().");
        assert!(doc.symbols[0].relationships[0].is_reference);
        assert_eq!(doc.occurrences[0].line, 4);
        assert!(doc.occurrences[0].roles.is_definition());
        assert!(!doc.occurrences[1].roles.is_definition());
    }

    #[test]
    fn empty_range_becomes_line_zero() {
        let occ = Occurrence::from(types::Occurrence {
            symbol: "scip go a/ x.".into(),
            ..Default::default()
        });
        assert_eq!(occ.line, 0);
    }

    #[test]
    fn empty_input_is_an_empty_index() {
        let index = decode_index(&[]).unwrap();
        assert!(index.documents.is_empty());
    }

    #[test]
    fn missing_file_is_a_read_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_index(&dir.path().join("nope.scip")).unwrap_err();
        assert!(matches!(err, LoadError::Read { .. }));
    }

    #[test]
    fn garbage_is_a_decode_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.scip");
        std::fs::write(&path, [0xff, 0xff, 0xff]).unwrap();
        let err = load_index(&path).unwrap_err();
        assert!(matches!(err, LoadError::Decode { .. }));
    }

    #[test]
    fn load_reads_written_index() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("index.scip");
        std::fs::write(&path, sample_raw_index().write_to_bytes().unwrap()).unwrap();
        let index = load_index(&path).unwrap();
        assert_eq!(index.occurrence_count(), 2);
    }
}
