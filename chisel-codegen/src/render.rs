//! Single-pass placeholder substitution.

use crate::Fragments;

/// Substitute `{{token}}` placeholders from the fragment set.
///
/// The scan is single-pass: substituted values are never re-scanned, so a
/// fragment containing `{{` cannot trigger further substitution. Tokens
/// with no matching fragment are left verbatim. There is no escaping and
/// no expression syntax.
pub fn render(template: &str, fragments: &Fragments) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find("{{") {
        out.push_str(&rest[..start]);
        let after = &rest[start + 2..];
        match after.find("}}") {
            Some(end) => {
                let token = &after[..end];
                match fragments.get(token.trim()) {
                    Some(value) => out.push_str(value),
                    None => {
                        out.push_str("{{");
                        out.push_str(token);
                        out.push_str("}}");
                    }
                }
                rest = &after[end + 2..];
            }
            None => {
                // dangling opener: copy it through and stop scanning
                out.push_str("{{");
                rest = after;
            }
        }
    }
    out.push_str(rest);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fragments(pairs: &[(&str, &str)]) -> Fragments {
        let mut f = Fragments::new();
        for (name, value) in pairs {
            f.insert(*name, *value);
        }
        f
    }

    #[test]
    fn test_basic_substitution() {
        let f = fragments(&[("name", "Product")]);
        assert_eq!(render("class {{name}}Dto", &f), "class ProductDto");
    }

    #[test]
    fn test_token_whitespace_is_tolerated() {
        let f = fragments(&[("name", "Product")]);
        assert_eq!(render("{{ name }}", &f), "Product");
    }

    #[test]
    fn test_unknown_tokens_are_left_verbatim() {
        let f = fragments(&[("name", "Product")]);
        assert_eq!(render("{{name}} {{unknown}}", &f), "Product {{unknown}}");
    }

    #[test]
    fn test_substituted_values_are_not_rescanned() {
        let f = fragments(&[("a", "{{b}}"), ("b", "never")]);
        assert_eq!(render("{{a}}", &f), "{{b}}");
    }

    #[test]
    fn test_dangling_opener() {
        let f = fragments(&[]);
        assert_eq!(render("tail {{", &f), "tail {{");
    }

    #[test]
    fn test_multiple_occurrences() {
        let f = fragments(&[("name", "Tag")]);
        assert_eq!(
            render("{{name}} + {{name}} = {{name}}s", &f),
            "Tag + Tag = Tags"
        );
    }
}
