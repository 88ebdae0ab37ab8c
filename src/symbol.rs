//! Canonical symbol identifiers: parsing, display names, and query matching.
//!
//! A SCIP identifier is a whitespace-separated list of fields. The first two
//! are the scheme and package manager; the rest are either package metadata
//! (package name, version) or descriptor chains such as `Foo#bar().`.
//!
//! Descriptor grammar (one field may hold several descriptors):
//!
//! | form                  | suffix            |
//! |-----------------------|-------------------|
//! | `name/`               | namespace         |
//! | `name#`               | type              |
//! | `name.`               | term              |
//! | `name().`, `name(d).` | method            |
//! | `name:`               | meta              |
//! | `name!`               | macro             |
//! | `[name]`              | type parameter    |
//! | `(name)`              | parameter         |
//!
//! Names are either simple or wrapped in backticks, with a doubled backtick
//! standing for a literal one.

/// Path separator suffix trimmed from plain fields.
const PATH_SUFFIX: &str = "/";
/// Method call suffix trimmed from plain fields.
const CALL_SUFFIX: &str = "().";
/// Member terminator trimmed from plain fields.
const TERM_SUFFIX: &str = ".";

/// Hosting prefixes dropped (with the organisation segment) from package paths.
const HOSTING_PREFIXES: &[&str] = &["github.com", "golang.org", "gopkg.in"];

/// The kind of a descriptor, determined by its suffix punctuation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Suffix {
    Namespace,
    Type,
    Term,
    Method,
    Meta,
    Macro,
    TypeParameter,
    Parameter,
}

/// One name segment of a descriptor chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Descriptor {
    pub name: String,
    pub suffix: Suffix,
}

impl Descriptor {
    /// Name as shown to users. Namespaces that spell out a package path have
    /// their hosting prefix removed.
    pub fn display_name(&self) -> String {
        if self.suffix == Suffix::Namespace && self.name.contains('/') {
            simplify_package_path(&self.name)
        } else {
            self.name.clone()
        }
    }
}

/// A canonical identifier split into its structural parts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScipSymbol {
    /// Fewer than three fields (e.g. `local 7`); not structurally parsed.
    Opaque(String),
    /// Scheme and manager are dropped; package metadata survives only in
    /// `fields`.
    Global {
        /// Every descriptor, in field order.
        descriptors: Vec<Descriptor>,
        /// All fields after scheme and manager, verbatim.
        fields: Vec<String>,
    },
}

impl ScipSymbol {
    pub fn parse(raw: &str) -> Self {
        let parts: Vec<&str> = raw.split_whitespace().collect();
        if parts.len() < 3 {
            return ScipSymbol::Opaque(raw.to_string());
        }

        let descriptors = parts[2..]
            .iter()
            .filter_map(|field| parse_descriptors(field))
            .flatten()
            .collect();

        ScipSymbol::Global {
            descriptors,
            fields: parts[2..].iter().map(|f| (*f).to_string()).collect(),
        }
    }

    /// Non-empty descriptor display names, outermost first.
    pub fn names(&self) -> Vec<String> {
        match self {
            ScipSymbol::Opaque(_) => Vec::new(),
            ScipSymbol::Global { descriptors, .. } => descriptors
                .iter()
                .map(Descriptor::display_name)
                .filter(|n| !n.is_empty())
                .collect(),
        }
    }

    /// Short dotted display name.
    pub fn display_name(&self) -> String {
        match self {
            ScipSymbol::Opaque(raw) => raw.clone(),
            ScipSymbol::Global { fields, .. } => {
                let names = self.names();
                if names.is_empty() {
                    trim_fields(fields)
                } else {
                    names.join(".")
                }
            }
        }
    }
}

/// Render a canonical identifier as a short, human-readable dotted name.
///
/// Identifiers with fewer than three fields are returned unchanged.
pub fn format_symbol_name(symbol: &str) -> String {
    ScipSymbol::parse(symbol).display_name()
}

/// Plain-field fallback: trim `/`, `().` and `.` (in that order) from every
/// field and join the survivors with `.`.
fn trim_fields(fields: &[String]) -> String {
    fields
        .iter()
        .map(|f| {
            let f = f.strip_suffix(PATH_SUFFIX).unwrap_or(f);
            let f = f.strip_suffix(CALL_SUFFIX).unwrap_or(f);
            f.strip_suffix(TERM_SUFFIX).unwrap_or(f)
        })
        .filter(|f| !f.is_empty())
        .collect::<Vec<_>>()
        .join(".")
}

/// Drop a leading hosting domain and organisation from a package path,
/// e.g. `github.com/acme/tool/pkg` becomes `tool/pkg`.
pub fn simplify_package_path(path: &str) -> String {
    let parts: Vec<&str> = path.split('/').collect();
    if let Some(i) = parts.iter().position(|p| HOSTING_PREFIXES.contains(p))
        && i + 2 < parts.len()
    {
        return parts[i + 2..].join("/");
    }
    path.to_string()
}

// ---------------------------------------------------------------------------
// Descriptor parsing
// ---------------------------------------------------------------------------

/// Parse a whole field as a descriptor chain. Returns `None` when the field
/// contains anything that is not a complete descriptor.
fn parse_descriptors(field: &str) -> Option<Vec<Descriptor>> {
    let chars: Vec<char> = field.chars().collect();
    let mut pos = 0;
    let mut out = Vec::new();

    while pos < chars.len() {
        let descriptor = match chars[pos] {
            '[' => {
                let (name, next) = read_enclosed(&chars, pos + 1, ']')?;
                pos = next;
                Descriptor { name, suffix: Suffix::TypeParameter }
            }
            '(' => {
                let (name, next) = read_enclosed(&chars, pos + 1, ')')?;
                pos = next;
                Descriptor { name, suffix: Suffix::Parameter }
            }
            _ => {
                let (name, next) = read_name(&chars, pos)?;
                let suffix = match chars.get(next)? {
                    '/' => Suffix::Namespace,
                    '#' => Suffix::Type,
                    '.' => Suffix::Term,
                    ':' => Suffix::Meta,
                    '!' => Suffix::Macro,
                    '(' => {
                        // Method disambiguator, then the terminating `.`.
                        let (_, close) = read_enclosed(&chars, next + 1, ')')?;
                        if chars.get(close) != Some(&'.') {
                            return None;
                        }
                        pos = close + 1;
                        out.push(Descriptor { name, suffix: Suffix::Method });
                        continue;
                    }
                    _ => return None,
                };
                pos = next + 1;
                Descriptor { name, suffix }
            }
        };
        out.push(descriptor);
    }

    if out.is_empty() { None } else { Some(out) }
}

/// Read a simple or backtick-escaped name starting at `pos`. Returns the name
/// and the index just past it.
fn read_name(chars: &[char], pos: usize) -> Option<(String, usize)> {
    if chars.get(pos) == Some(&'`') {
        let mut name = String::new();
        let mut i = pos + 1;
        loop {
            match chars.get(i)? {
                '`' if chars.get(i + 1) == Some(&'`') => {
                    name.push('`');
                    i += 2;
                }
                '`' => return Some((name, i + 1)),
                c => {
                    name.push(*c);
                    i += 1;
                }
            }
        }
    }

    let end = chars[pos..]
        .iter()
        .position(|c| matches!(c, '/' | '#' | '.' | ':' | '!' | '(' | ')' | '[' | ']' | '`'))
        .map_or(chars.len(), |off| pos + off);
    Some((chars[pos..end].iter().collect(), end))
}

/// Read a name up to `close`. Returns the name and the index past `close`.
fn read_enclosed(chars: &[char], pos: usize, close: char) -> Option<(String, usize)> {
    let (name, next) = read_name(chars, pos)?;
    if chars.get(next) == Some(&close) {
        Some((name, next + 1))
    } else {
        None
    }
}

// ---------------------------------------------------------------------------
// Query matching
// ---------------------------------------------------------------------------

/// Convert a dotted user query (`pkg.Type.method`) into the textual shape of
/// a canonical identifier (`scip  pkg/ Type/ method().`).
///
/// Returns `None` for queries with fewer than two dot-separated parts.
pub fn query_to_canonical(query: &str) -> Option<String> {
    let parts: Vec<&str> = query.split('.').collect();
    if parts.len() < 2 {
        return None;
    }
    let last = parts.len() - 1;
    let mut fields = vec!["scip".to_string(), String::new()];
    for (i, part) in parts.iter().enumerate() {
        if i == last {
            fields.push(format!("{part}{CALL_SUFFIX}"));
        } else {
            fields.push(format!("{part}{PATH_SUFFIX}"));
        }
    }
    Some(fields.join(" "))
}

/// A user query prepared for repeated matching against canonical identifiers.
///
/// Matching is textual and deliberately permissive: a short query can match
/// unrelated identifiers that happen to contain it.
#[derive(Debug, Clone)]
pub struct SymbolMatcher {
    query: String,
    canonical: Option<String>,
    parts: Vec<String>,
}

impl SymbolMatcher {
    pub fn new(query: &str) -> Self {
        let parts: Vec<String> = query.split('.').map(str::to_string).collect();
        Self {
            query: query.to_string(),
            canonical: query_to_canonical(query),
            parts: if parts.len() < 2 { Vec::new() } else { parts },
        }
    }

    /// Does `symbol` match this query?
    ///
    /// True on exact equality, when `symbol` contains the query, when it
    /// contains the query's canonical conversion, or when the query's dotted
    /// parts appear as a contiguous run of the symbol's descriptor names.
    pub fn matches(&self, symbol: &str) -> bool {
        if symbol == self.query || symbol.contains(&self.query) {
            return true;
        }
        if let Some(ref canonical) = self.canonical
            && symbol.contains(canonical.as_str())
        {
            return true;
        }
        if self.parts.is_empty() {
            return false;
        }
        let names = ScipSymbol::parse(symbol).names();
        names.windows(self.parts.len()).any(|w| w == self.parts.as_slice())
    }
}

/// One-shot form of [`SymbolMatcher::matches`].
pub fn matches_symbol(symbol: &str, query: &str) -> bool {
    SymbolMatcher::new(query).matches(symbol)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
