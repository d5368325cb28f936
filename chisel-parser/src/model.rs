//! Chunk-stream interpretation: recover class, enum, and property
//! declarations and build the entity model.

use chisel_core::is_known_scalar_type;
use chisel_ir::{ClassModel, Container, GLOBAL_NAMESPACE, PropertyModel};
use tracing::trace;

use crate::scanner::{Chunk, Delim};

/// Modifier keywords stripped from declaration headers before the type/name
/// split. `static` and `const` are intentionally absent: members carrying
/// them are not instance properties and are skipped.
const MODIFIERS: &[&str] = &[
    "public", "private", "protected", "internal", "virtual", "override", "abstract", "sealed",
    "partial", "new", "required",
];

/// Scopes tracked while replaying the chunk stream.
enum Scope {
    Namespace,
    Class(ClassModel),
    /// Enum model plus the byte offset where its body starts; members are
    /// parsed from the raw body slice when the scope closes.
    Enum(ClassModel, usize),
    /// Anything else: method bodies, accessor blocks, interfaces, records.
    Block,
}

/// Replay the chunk stream and collect declared models, deduplicated by
/// structural equality, in declaration order.
pub(crate) fn build_models(src: &str, chunks: Vec<Chunk>) -> Vec<ClassModel> {
    let mut models: Vec<ClassModel> = Vec::new();
    let mut scopes: Vec<Scope> = Vec::new();
    let mut namespaces: Vec<String> = Vec::new();
    let mut file_scoped: Option<String> = None;

    for chunk in chunks {
        match chunk.delim {
            Delim::Open => {
                let text = chunk.text.as_str();
                if let Some(name) = namespace_name(text) {
                    namespaces.push(name);
                    scopes.push(Scope::Namespace);
                } else if let Some((name, base)) = class_decl(text) {
                    let mut model =
                        ClassModel::new(name, current_namespace(&namespaces, &file_scoped));
                    model.base_type = base;
                    model.summary = chunk.doc.as_deref().and_then(summary_from_trivia);
                    scopes.push(Scope::Class(model));
                } else if let Some(name) = enum_decl(text) {
                    let mut model =
                        ClassModel::new(name, current_namespace(&namespaces, &file_scoped));
                    model.is_enum = true;
                    model.summary = chunk.doc.as_deref().and_then(summary_from_trivia);
                    scopes.push(Scope::Enum(model, chunk.offset + 1));
                } else {
                    let in_class = matches!(scopes.last(), Some(Scope::Class(_)));
                    let decl = if in_class { property_decl(text) } else { None };
                    match decl {
                        Some((type_name, name)) => {
                            let prop = build_property(name, type_name, &chunk);
                            if let Some(Scope::Class(model)) = scopes.last_mut() {
                                model.properties.push(prop);
                            }
                        }
                        None => trace!(header = text, "skipping unrecognized scope"),
                    }
                    scopes.push(Scope::Block);
                }
            }
            Delim::Close => match scopes.pop() {
                Some(Scope::Namespace) => {
                    namespaces.pop();
                }
                Some(Scope::Class(model)) => push_model(&mut models, model),
                Some(Scope::Enum(mut model, body_start)) => {
                    parse_enum_members(&src[body_start..chunk.offset], &mut model);
                    push_model(&mut models, model);
                }
                _ => {}
            },
            Delim::Semi => {
                if scopes.is_empty() {
                    if let Some(name) = namespace_name(&chunk.text) {
                        file_scoped = Some(name);
                    }
                }
                // using directives, fields, expression-bodied members and
                // property initializers are not part of the model
            }
        }
    }

    models
}

fn push_model(models: &mut Vec<ClassModel>, model: ClassModel) {
    if !models.contains(&model) {
        models.push(model);
    }
}

fn current_namespace(namespaces: &[String], file_scoped: &Option<String>) -> String {
    let mut parts: Vec<&str> = Vec::new();
    if let Some(fs) = file_scoped {
        parts.push(fs);
    }
    parts.extend(namespaces.iter().map(String::as_str));
    if parts.is_empty() {
        GLOBAL_NAMESPACE.to_string()
    } else {
        parts.join(".")
    }
}

/// `namespace A.B.C` → `Some("A.B.C")`.
fn namespace_name(text: &str) -> Option<String> {
    let mut tokens = text.split_whitespace();
    while let Some(token) = tokens.next() {
        if token == "namespace" {
            return tokens.next().map(str::to_string);
        }
    }
    None
}

/// `public class Product : BaseEntity, IHasTags` → `("Product", Some("BaseEntity"))`.
///
/// Only the first listed base type is kept; further base-list entries are
/// interface implementations this tool has no use for.
fn class_decl(text: &str) -> Option<(String, Option<String>)> {
    let (head, base_list) = match text.split_once(':') {
        Some((head, bases)) => (head, Some(bases)),
        None => (text, None),
    };
    let mut tokens = head.split_whitespace();
    while let Some(token) = tokens.next() {
        if token == "class" {
            let name = tokens.next()?;
            let name = name.split('<').next().unwrap_or(name).to_string();
            let base = base_list
                .map(|bases| first_segment(bases).trim().to_string())
                .filter(|b| !b.is_empty());
            return Some((name, base));
        }
    }
    None
}

/// `public enum OrderStatus` → `Some("OrderStatus")`.
fn enum_decl(text: &str) -> Option<String> {
    let mut tokens = text.split_whitespace();
    while let Some(token) = tokens.next() {
        if token == "enum" {
            return tokens.next().map(str::to_string);
        }
    }
    None
}

/// First comma-separated segment at angle-bracket depth zero.
fn first_segment(s: &str) -> &str {
    let mut depth = 0i32;
    for (i, c) in s.char_indices() {
        match c {
            '<' | '(' => depth += 1,
            '>' | ')' => depth -= 1,
            ',' if depth == 0 => return &s[..i],
            _ => {}
        }
    }
    s
}

/// Parse a property header into `(type_text, name)`.
///
/// Headers with parentheses (methods, constructors) and `static`/`const`/
/// `event` members are not properties.
fn property_decl(text: &str) -> Option<(String, String)> {
    if text.contains('(') {
        return None;
    }
    let stripped = strip_modifiers(text);
    let first = stripped.split_whitespace().next()?;
    if matches!(first, "static" | "const" | "event" | "class" | "enum" | "interface" | "struct") {
        return None;
    }
    let (type_name, name) = split_type_and_name(stripped)?;
    if !is_identifier(&name) {
        return None;
    }
    Some((type_name, name))
}

fn strip_modifiers(text: &str) -> &str {
    let mut rest = text.trim();
    loop {
        let Some(token) = rest.split_whitespace().next() else {
            return rest;
        };
        if MODIFIERS.contains(&token) {
            rest = rest[token.len()..].trim_start();
        } else {
            return rest;
        }
    }
}

/// Split a declaration into type text and member name at the last
/// whitespace outside generic brackets.
fn split_type_and_name(s: &str) -> Option<(String, String)> {
    let s = s.trim();
    let mut depth = 0i32;
    let mut split = None;
    for (i, c) in s.char_indices() {
        match c {
            '<' | '[' => depth += 1,
            '>' | ']' => depth -= 1,
            c if c.is_whitespace() && depth == 0 => split = Some(i),
            _ => {}
        }
    }
    let at = split?;
    let type_name = s[..at].trim();
    let name = s[at..].trim();
    if type_name.is_empty() || name.is_empty() {
        return None;
    }
    Some((type_name.to_string(), name.to_string()))
}

fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_alphanumeric() || c == '_')
}

fn build_property(name: String, type_name: String, chunk: &Chunk) -> PropertyModel {
    let mut prop = PropertyModel::new(name, type_name);
    prop.nullable = prop.type_name.trim_end().ends_with('?');
    prop.container = classify_container(&prop.type_name);
    prop.is_known_scalar = is_known_scalar_type(prop.element_type());
    prop.summary = chunk.doc.as_deref().and_then(summary_from_trivia);
    prop.attributes = chunk.attributes.clone();
    prop
}

/// Container classification by the outer type identifier.
fn classify_container(type_name: &str) -> Container {
    let ty = type_name.trim().trim_end_matches('?').trim();
    if ty.ends_with("[]") {
        return Container::Array;
    }
    let Some(open) = ty.find('<') else {
        return Container::None;
    };
    match &ty[..open] {
        "List" | "IList" => Container::List,
        "Dictionary" | "IDictionary" => Container::Dictionary,
        "ICollection" | "Collection" | "HashSet" => Container::Collection,
        "IEnumerable" => Container::Enumerable,
        _ => Container::None,
    }
}

/// Extract a doc summary from leading trivia: the inner text of a
/// `<summary>` tag when present, the raw trivia trimmed otherwise.
pub(crate) fn summary_from_trivia(trivia: &str) -> Option<String> {
    let trimmed = trivia.trim();
    if trimmed.is_empty() {
        return None;
    }
    if let (Some(open), Some(close)) = (trimmed.find("<summary>"), trimmed.find("</summary>")) {
        if open < close {
            let inner = &trimmed[open + "<summary>".len()..close];
            let joined = inner
                .lines()
                .map(str::trim)
                .filter(|line| !line.is_empty())
                .collect::<Vec<_>>()
                .join(" ");
            return Some(joined);
        }
    }
    Some(trimmed.to_string())
}

/// Parse enum members from the raw body slice. Members are comma separated;
/// `///` trivia lines attach to the member that follows them.
fn parse_enum_members(body: &str, model: &mut ClassModel) {
    let mut doc_lines: Vec<String> = Vec::new();
    for line in body.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if let Some(doc) = line.strip_prefix("///") {
            doc_lines.push(doc.trim().to_string());
            continue;
        }
        if line.starts_with("//") || line.starts_with('[') {
            continue;
        }
        for segment in line.split(',') {
            let segment = segment.trim();
            if segment.is_empty() {
                continue;
            }
            let name = segment
                .split(['=', ' '])
                .next()
                .unwrap_or_default()
                .trim();
            if !is_identifier(name) {
                continue;
            }
            let mut member = PropertyModel::new(name, "");
            if !doc_lines.is_empty() {
                member.summary = summary_from_trivia(&std::mem::take(&mut doc_lines).join("\n"));
            }
            model.properties.push(member);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_namespace_name() {
        assert_eq!(namespace_name("namespace Shop.Domain"), Some("Shop.Domain".into()));
        assert_eq!(namespace_name("using System"), None);
    }

    #[test]
    fn test_class_decl() {
        assert_eq!(
            class_decl("public class Product : BaseEntity, IHasTags"),
            Some(("Product".into(), Some("BaseEntity".into())))
        );
        assert_eq!(
            class_decl("internal sealed class Widget"),
            Some(("Widget".into(), None))
        );
        assert_eq!(class_decl("public interface IThing"), None);
    }

    #[test]
    fn test_property_decl() {
        assert_eq!(
            property_decl("public string Name"),
            Some(("string".into(), "Name".into()))
        );
        assert_eq!(
            property_decl("public List<Order> Orders"),
            Some(("List<Order>".into(), "Orders".into()))
        );
        assert_eq!(
            property_decl("public Dictionary<string, int> Counts"),
            Some(("Dictionary<string, int>".into(), "Counts".into()))
        );
        // methods, statics and consts are not properties
        assert_eq!(property_decl("public void Recalculate()"), None);
        assert_eq!(property_decl("public static string Label"), None);
        assert_eq!(property_decl("const int Max"), None);
    }

    #[test]
    fn test_classify_container() {
        assert_eq!(classify_container("string"), Container::None);
        assert_eq!(classify_container("string[]"), Container::Array);
        assert_eq!(classify_container("string[]?"), Container::Array);
        assert_eq!(classify_container("List<Order>"), Container::List);
        assert_eq!(classify_container("IList<Order>"), Container::List);
        assert_eq!(classify_container("Dictionary<string, int>"), Container::Dictionary);
        assert_eq!(classify_container("ICollection<Tag>"), Container::Collection);
        assert_eq!(classify_container("HashSet<Tag>"), Container::Collection);
        assert_eq!(classify_container("IEnumerable<Tag>"), Container::Enumerable);
        assert_eq!(classify_container("Lazy<Order>"), Container::None);
    }

    #[test]
    fn test_summary_from_trivia() {
        assert_eq!(
            summary_from_trivia("<summary>A product.</summary>"),
            Some("A product.".into())
        );
        assert_eq!(
            summary_from_trivia("<summary>\nSpans\nlines.\n</summary>"),
            Some("Spans lines.".into())
        );
        assert_eq!(summary_from_trivia("plain trivia"), Some("plain trivia".into()));
        assert_eq!(summary_from_trivia("  "), None);
    }

    #[test]
    fn test_split_type_and_name_keeps_generics_together() {
        assert_eq!(
            split_type_and_name("Dictionary<string, int> Counts"),
            Some(("Dictionary<string, int>".into(), "Counts".into()))
        );
        assert_eq!(split_type_and_name("Name"), None);
    }
}
