//! Shared naming utilities for code generation.
//!
//! Generated type names, file paths, and namespaces all flow through these
//! functions, so their exact behavior is load-bearing: the pluralizer is a
//! naive suffix rule, not a dictionary, and stays that way.

use std::path::{Component, Path, PathBuf};

/// Pluralize a name with the naive suffix rule: a trailing `y` becomes
/// `ies`, anything else gets an `s` appended.
///
/// `Category` → `Categories`, `Order` → `Orders`, `Class` → `Classs`.
pub fn pluralize(name: &str) -> String {
    if name.ends_with('y') || name.ends_with('Y') {
        format!("{}ies", &name[..name.len() - 1])
    } else {
        format!("{}s", name)
    }
}

/// Undo [`pluralize`]: `ies` back to `y`, otherwise strip one trailing `s`.
///
/// Used to derive foreign-key names from collection navigation properties
/// (`Tags` → `TagId`).
pub fn singularize(name: &str) -> String {
    if let Some(stem) = name.strip_suffix("ies") {
        format!("{}y", stem)
    } else if let Some(stem) = name.strip_suffix('s') {
        stem.to_string()
    } else {
        name.to_string()
    }
}

/// Split a camel-cased name into space-separated words.
///
/// A space is inserted between an uppercase run and a following
/// capital+lowercase pair, between a non-uppercase character and a following
/// uppercase one, and at letter/non-letter transitions.
///
/// `OrderDate` → `Order Date`, `HTMLParser` → `HTML Parser`, `ID` → `ID`.
pub fn split_camel_case(name: &str) -> String {
    let chars: Vec<char> = name.chars().collect();
    let mut out = String::with_capacity(name.len() + 4);
    for (i, &c) in chars.iter().enumerate() {
        if i > 0 && is_word_boundary(&chars, i) {
            out.push(' ');
        }
        out.push(c);
    }
    out
}

fn is_word_boundary(chars: &[char], i: usize) -> bool {
    let c = chars[i];
    let prev = chars[i - 1];
    if c.is_whitespace() || prev.is_whitespace() {
        return false;
    }
    if c.is_uppercase() {
        // run-to-word boundary: "HTMLParser" splits before 'P'
        return !prev.is_uppercase() || chars.get(i + 1).is_some_and(|n| n.is_lowercase());
    }
    c.is_alphabetic() != prev.is_alphabetic()
}

/// Convert a relative directory path into a namespace segment: directory
/// separators become dots, hyphens become underscores.
pub fn relative_path_to_namespace(path: &str) -> String {
    path.replace(['/', '\\'], ".").replace('-', "_")
}

/// Compute the relative path from one absolute directory to another.
pub fn make_relative_path(from: &Path, to: &Path) -> PathBuf {
    let from: Vec<Component> = from.components().collect();
    let to: Vec<Component> = to.components().collect();
    let common = from
        .iter()
        .zip(to.iter())
        .take_while(|(a, b)| a == b)
        .count();

    let mut out = PathBuf::new();
    for _ in common..from.len() {
        out.push("..");
    }
    for comp in &to[common..] {
        out.push(comp.as_os_str());
    }
    if out.as_os_str().is_empty() {
        out.push(".");
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pluralize() {
        assert_eq!(pluralize("Category"), "Categories");
        assert_eq!(pluralize("Order"), "Orders");
        // documented quirk of the suffix rule, kept on purpose
        assert_eq!(pluralize("Class"), "Classs");
        assert_eq!(pluralize("COMPANY"), "COMPANies");
    }

    #[test]
    fn test_singularize() {
        assert_eq!(singularize("Categories"), "Category");
        assert_eq!(singularize("Orders"), "Order");
        assert_eq!(singularize("Tags"), "Tag");
        assert_eq!(singularize("Tax"), "Tax");
    }

    #[test]
    fn test_singularize_inverts_pluralize() {
        for name in ["Category", "Order", "Product", "Tag"] {
            assert_eq!(singularize(&pluralize(name)), name);
        }
    }

    #[test]
    fn test_split_camel_case() {
        assert_eq!(split_camel_case("OrderDate"), "Order Date");
        assert_eq!(split_camel_case("ID"), "ID");
        assert_eq!(split_camel_case("Name"), "Name");
        assert_eq!(split_camel_case("HTMLParser"), "HTML Parser");
        assert_eq!(split_camel_case("Address1"), "Address 1");
        assert_eq!(split_camel_case(""), "");
    }

    #[test]
    fn test_relative_path_to_namespace() {
        assert_eq!(
            relative_path_to_namespace("Application/Products"),
            "Application.Products"
        );
        assert_eq!(
            relative_path_to_namespace("Application\\Sales-Orders"),
            "Application.Sales_Orders"
        );
    }

    #[test]
    fn test_make_relative_path() {
        assert_eq!(
            make_relative_path(Path::new("/repo/src/Domain"), Path::new("/repo/src/Application")),
            PathBuf::from("../Application")
        );
        assert_eq!(
            make_relative_path(Path::new("/repo/src"), Path::new("/repo/src/Domain/Entities")),
            PathBuf::from("Domain/Entities")
        );
        assert_eq!(
            make_relative_path(Path::new("/repo/src"), Path::new("/repo/src")),
            PathBuf::from(".")
        );
    }
}
