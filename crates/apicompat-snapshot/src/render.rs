//! Go source emission for a [`PackageSnapshot`].
//!
//! Output is gofmt-stable: header comment, package clause, one import declaration with
//! explicit aliases sorted by path, then one `var` per entry separated by blank lines.

use std::collections::{BTreeMap, BTreeSet};

use apicompat_core::{CanonicalType, FuncSignature, Results};

use crate::assemble::PackageSnapshot;

pub const GENERATED_HEADER: &str = "// Code generated by apicompat. DO NOT EDIT.";

const GO_KEYWORDS: &[&str] = &[
    "break", "case", "chan", "const", "continue", "default", "defer", "else", "fallthrough",
    "for", "func", "go", "goto", "if", "import", "interface", "map", "package", "range", "return",
    "select", "struct", "switch", "type", "var",
];

const GO_PREDECLARED: &[&str] = &[
    "any", "append", "bool", "byte", "cap", "clear", "close", "comparable", "complex",
    "complex64", "complex128", "copy", "delete", "error", "false", "float32", "float64", "imag",
    "int", "int8", "int16", "int32", "int64", "iota", "len", "make", "max", "min", "new", "nil",
    "panic", "print", "println", "real", "recover", "rune", "string", "true", "uint", "uint8",
    "uint16", "uint32", "uint64", "uintptr",
];

/// Import path -> alias for one generated file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportTable {
    aliases: BTreeMap<String, String>,
}

impl ImportTable {
    /// Assigns an alias to every path, in path order, avoiding the file's own package
    /// name, Go keywords, predeclared identifiers and each other.
    pub fn new<'a>(file_package: &str, paths: impl IntoIterator<Item = &'a str>) -> Self {
        let mut taken: BTreeSet<String> = BTreeSet::new();
        let mut aliases = BTreeMap::new();
        let paths: BTreeSet<&str> = paths.into_iter().collect();
        for path in paths {
            let guess = guess_alias(path);
            let mut alias = guess.clone();
            let mut n = 0;
            while alias == file_package
                || GO_KEYWORDS.contains(&alias.as_str())
                || GO_PREDECLARED.contains(&alias.as_str())
                || taken.contains(&alias)
            {
                n += 1;
                alias = format!("{guess}{n}");
            }
            taken.insert(alias.clone());
            aliases.insert(path.to_string(), alias);
        }
        Self { aliases }
    }

    pub fn alias(&self, path: &str) -> Option<&str> {
        self.aliases.get(path).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.aliases.is_empty()
    }

    /// `(path, alias)` pairs sorted by path.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.aliases.iter().map(|(p, a)| (p.as_str(), a.as_str()))
    }
}

/// Derives a package identifier from an import path: last element, skipping a `vN`
/// major-version suffix, lower-cased, alphanumerics only, no leading digits.
pub fn guess_alias(path: &str) -> String {
    let mut elems = path.trim_end_matches('/').rsplit('/');
    let mut last = elems.next().unwrap_or_default();
    if is_major_version(last) {
        if let Some(prev) = elems.next() {
            last = prev;
        }
    }
    let alias: String = last
        .to_lowercase()
        .chars()
        .filter(char::is_ascii_alphanumeric)
        .skip_while(char::is_ascii_digit)
        .collect();
    if alias.is_empty() { "pkg".to_string() } else { alias }
}

fn is_major_version(elem: &str) -> bool {
    elem.strip_prefix('v')
        .is_some_and(|rest| !rest.is_empty() && rest.bytes().all(|b| b.is_ascii_digit()))
}

/// Renders the complete Go file for a snapshot.
pub fn render_file(snapshot: &PackageSnapshot) -> String {
    let mut paths = BTreeSet::new();
    for entry in &snapshot.entries {
        paths.insert(entry.origin.as_str());
        entry.signature.collect_paths(&mut paths);
    }
    let imports = ImportTable::new(&snapshot.package_name, paths);

    let mut out = String::new();
    out.push_str(GENERATED_HEADER);
    out.push_str("\n\n");
    out.push_str(&format!("package {}\n", snapshot.package_name));

    let specs: Vec<_> = imports.iter().collect();
    match specs.as_slice() {
        [] => {}
        [(path, alias)] => {
            out.push_str(&format!("\nimport {alias} {path:?}\n"));
        }
        many => {
            out.push_str("\nimport (\n");
            for (path, alias) in many {
                out.push_str(&format!("\t{alias} {path:?}\n"));
            }
            out.push_str(")\n");
        }
    }

    for entry in &snapshot.entries {
        out.push_str("\nvar ");
        out.push_str(&entry.name);
        out.push(' ');
        write_signature(&mut out, &entry.signature, &imports);
        out.push_str(" = ");
        write_qualified(&mut out, &entry.origin, &entry.name, &imports);
        out.push('\n');
    }
    out
}

/// Renders a single canonical type, e.g. `map[string]*p1.T`.
pub fn render_type(ty: &CanonicalType, imports: &ImportTable) -> String {
    let mut out = String::new();
    write_type(&mut out, ty, imports);
    out
}

fn write_type(out: &mut String, ty: &CanonicalType, imports: &ImportTable) {
    match ty {
        CanonicalType::Ident { name } => out.push_str(name),
        CanonicalType::Qual { path, name } => write_qualified(out, path, name, imports),
        CanonicalType::Pointer { elem } => {
            out.push('*');
            write_type(out, elem, imports);
        }
        CanonicalType::Slice { elem } => {
            out.push_str("[]");
            write_type(out, elem, imports);
        }
        CanonicalType::Map { key, value } => {
            out.push_str("map[");
            write_type(out, key, imports);
            out.push(']');
            write_type(out, value, imports);
        }
        CanonicalType::Func(sig) => write_signature(out, sig, imports),
        CanonicalType::EmptyInterface => out.push_str("interface{}"),
    }
}

fn write_signature(out: &mut String, sig: &FuncSignature, imports: &ImportTable) {
    out.push_str("func(");
    for (i, param) in sig.params.iter().enumerate() {
        if i > 0 {
            out.push_str(", ");
        }
        if param.variadic {
            out.push_str("...");
        }
        write_type(out, &param.ty, imports);
    }
    out.push(')');
    match &sig.results {
        Results::None => {}
        Results::Single(ty) => {
            out.push(' ');
            write_type(out, ty, imports);
        }
        Results::Tuple(types) => {
            out.push_str(" (");
            for (i, ty) in types.iter().enumerate() {
                if i > 0 {
                    out.push_str(", ");
                }
                write_type(out, ty, imports);
            }
            out.push(')');
        }
    }
}

fn write_qualified(out: &mut String, path: &str, name: &str, imports: &ImportTable) {
    // every path was registered by render_file; a miss falls back to the guessed name
    match imports.alias(path) {
        Some(alias) => out.push_str(alias),
        None => out.push_str(&guess_alias(path)),
    }
    out.push('.');
    out.push_str(name);
}

#[cfg(test)]
mod tests {
    use super::*;
    use apicompat_core::Param;
    use pretty_assertions::assert_eq;

    #[test]
    fn alias_guessing() {
        assert_eq!(guess_alias("example.com/m/store"), "store");
        assert_eq!(guess_alias("gopkg.in/yaml.v3"), "yamlv3");
        assert_eq!(guess_alias("github.com/org/mod/v2"), "mod");
        assert_eq!(guess_alias("example.com/m/go-kit"), "gokit");
        assert_eq!(guess_alias("example.com/m/3d"), "d");
        assert_eq!(guess_alias("example.com/m/42"), "pkg");
        assert_eq!(guess_alias("io"), "io");
    }

    #[test]
    fn aliases_avoid_file_package_and_each_other() {
        let table = ImportTable::new(
            "store",
            ["example.com/m/store", "example.com/other/store", "example.com/m/error", "io"],
        );
        assert_eq!(table.alias("example.com/m/store"), Some("store1"));
        assert_eq!(table.alias("example.com/other/store"), Some("store2"));
        assert_eq!(table.alias("example.com/m/error"), Some("error1"));
        assert_eq!(table.alias("io"), Some("io"));
    }

    #[test]
    fn renders_nested_types() {
        let table = ImportTable::new("p", ["example.com/m/q"]);
        let ty = CanonicalType::map(
            CanonicalType::ident("string"),
            CanonicalType::Func(FuncSignature {
                params: vec![
                    Param::new(CanonicalType::pointer(CanonicalType::qual("example.com/m/q", "T"))),
                    Param::variadic(CanonicalType::EmptyInterface),
                ],
                results: Results::Tuple(vec![
                    CanonicalType::slice(CanonicalType::ident("byte")),
                    CanonicalType::ident("error"),
                ]),
            }),
        );
        assert_eq!(
            render_type(&ty, &table),
            "map[string]func(*q.T, ...interface{}) ([]byte, error)"
        );
    }
}
