//! Shared types and data structures.
//!
//! The [`Index`] model is a read-only, in-memory view of a SCIP index,
//! reduced to the parts the query engine consumes. It is built once by
//! [`crate::loader`] and never mutated afterwards.

use std::fmt;

/// Bitmask of roles an occurrence plays at its location.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct SymbolRoles(pub i32);

impl SymbolRoles {
    /// Bit 0: the occurrence is the definition site of its symbol.
    pub const DEFINITION: i32 = 0x1;

    pub fn is_definition(self) -> bool {
        self.0 & Self::DEFINITION != 0
    }
}

/// A complete parsed code-intelligence index.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Index {
    pub documents: Vec<Document>,
}

/// One source file's worth of declarations and occurrences.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Document {
    /// Path of the source file, relative to the project root.
    pub relative_path: String,
    /// Symbols declared in this document.
    pub symbols: Vec<SymbolDeclaration>,
    /// Occurrences in stored order.
    pub occurrences: Vec<Occurrence>,
}

/// A declared symbol and its outgoing relationships.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SymbolDeclaration {
    pub symbol: String,
    pub relationships: Vec<Relationship>,
}

/// An edge from a declared symbol to another canonical identifier.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Relationship {
    /// Target canonical identifier.
    pub symbol: String,
    /// `true` when the declaring symbol references/calls the target.
    pub is_reference: bool,
}

/// A recorded location where a canonical identifier is used or defined.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Occurrence {
    pub symbol: String,
    /// 0-based start line, as stored in the index.
    pub line: i32,
    pub roles: SymbolRoles,
}

impl Index {
    /// Total number of occurrences across all documents.
    pub fn occurrence_count(&self) -> usize {
        self.documents.iter().map(|d| d.occurrences.len()).sum()
    }
}

/// One occurrence of a matching symbol, tagged with its location.
///
/// Built fresh for every query; never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SymbolUsage {
    /// Raw canonical identifier.
    pub symbol: String,
    /// Relative path of the containing document.
    pub file: String,
    /// 0-based start line.
    pub line: i32,
    /// `false` only for definition sites.
    pub is_reference: bool,
}

impl fmt::Display for SymbolUsage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let role = if self.is_reference { "ref" } else { "def" };
        write!(f, "{}:{} ({role}) {}", self.file, self.line, self.symbol)
    }
}
