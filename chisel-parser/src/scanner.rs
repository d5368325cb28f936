//! Delimiter-event scanner over C# source text.
//!
//! The scanner does not build a syntax tree. It walks the text once, skipping
//! comments and string literals, and emits one [`Chunk`] per `{`, `}` or `;`
//! it encounters: the declaration header collected since the previous
//! delimiter plus any leading `///` trivia and `[...]` attribute lists.
//! Declaration structure is recovered from the chunk stream in
//! [`crate::model`].

use chisel_ir::Attribute;

/// The delimiter that terminated a chunk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Delim {
    /// `{` — a scope opens after this header.
    Open,
    /// `}` — a scope closes.
    Close,
    /// `;` — a bodiless statement.
    Semi,
}

/// A declaration header with its leading trivia.
#[derive(Debug)]
pub(crate) struct Chunk {
    /// Header text since the previous delimiter, whitespace-collapsed at the
    /// edges. Attribute lists and comments are not part of it.
    pub text: String,
    /// Attribute lists that preceded the header.
    pub attributes: Vec<Attribute>,
    /// Joined `///` trivia lines that preceded the header.
    pub doc: Option<String>,
    pub delim: Delim,
    /// Byte offset of the delimiter in the source.
    pub offset: usize,
}

/// Scan failure: a delimiter with no partner.
#[derive(Debug)]
pub(crate) struct ScanError {
    pub delimiter: char,
    pub offset: usize,
}

/// Scan source text into a chunk stream.
///
/// Fails only on unbalanced braces; text without any recognizable
/// declaration scans to chunks that [`crate::model`] simply ignores.
pub(crate) fn scan(src: &str) -> Result<Vec<Chunk>, ScanError> {
    let chars: Vec<(usize, char)> = src.char_indices().collect();
    let mut chunks = Vec::new();
    let mut header = String::new();
    let mut docs: Vec<String> = Vec::new();
    let mut attrs: Vec<Attribute> = Vec::new();
    let mut open_offsets: Vec<usize> = Vec::new();
    let mut i = 0;

    while i < chars.len() {
        let (offset, c) = chars[i];
        match c {
            '/' if next_is(&chars, i, '/') => {
                let start = i;
                while i < chars.len() && chars[i].1 != '\n' {
                    i += 1;
                }
                let text: String = chars[start..i].iter().map(|&(_, ch)| ch).collect();
                if let Some(doc) = text.strip_prefix("///") {
                    docs.push(doc.trim().to_string());
                }
            }
            '/' if next_is(&chars, i, '*') => {
                i += 2;
                while i < chars.len() {
                    if chars[i].1 == '*' && next_is(&chars, i, '/') {
                        i += 2;
                        break;
                    }
                    i += 1;
                }
            }
            '"' => {
                let verbatim = header.trim_end().ends_with('@');
                i = copy_string_literal(&chars, i, verbatim, &mut header);
            }
            '\'' => {
                header.push('\'');
                i += 1;
                while i < chars.len() {
                    let ch = chars[i].1;
                    header.push(ch);
                    i += 1;
                    if ch == '\\' {
                        if let Some(&(_, escaped)) = chars.get(i) {
                            header.push(escaped);
                            i += 1;
                        }
                    } else if ch == '\'' {
                        break;
                    }
                }
            }
            '[' if header.trim().is_empty() => {
                let (content, rest) = consume_attribute_list(&chars, i + 1);
                attrs.extend(parse_attribute_text(&content));
                i = rest;
            }
            '{' | '}' | ';' => {
                let delim = match c {
                    '{' => Delim::Open,
                    '}' => Delim::Close,
                    _ => Delim::Semi,
                };
                match delim {
                    Delim::Open => open_offsets.push(offset),
                    Delim::Close => {
                        if open_offsets.pop().is_none() {
                            return Err(ScanError {
                                delimiter: '}',
                                offset,
                            });
                        }
                    }
                    Delim::Semi => {}
                }
                chunks.push(Chunk {
                    text: std::mem::take(&mut header).trim().to_string(),
                    attributes: std::mem::take(&mut attrs),
                    doc: finish_docs(&mut docs),
                    delim,
                    offset,
                });
                i += 1;
            }
            _ => {
                header.push(c);
                i += 1;
            }
        }
    }

    if let Some(&offset) = open_offsets.last() {
        return Err(ScanError {
            delimiter: '{',
            offset,
        });
    }
    Ok(chunks)
}

fn next_is(chars: &[(usize, char)], i: usize, expected: char) -> bool {
    chars.get(i + 1).is_some_and(|&(_, ch)| ch == expected)
}

/// Copy a string literal (opening quote at `i`) into `out`, returning the
/// index past the closing quote. Verbatim strings escape quotes by doubling.
fn copy_string_literal(
    chars: &[(usize, char)],
    i: usize,
    verbatim: bool,
    out: &mut String,
) -> usize {
    out.push('"');
    let mut i = i + 1;
    while i < chars.len() {
        let ch = chars[i].1;
        out.push(ch);
        i += 1;
        if verbatim {
            if ch == '"' {
                if chars.get(i).is_some_and(|&(_, n)| n == '"') {
                    out.push('"');
                    i += 1;
                    continue;
                }
                break;
            }
        } else if ch == '\\' {
            if let Some(&(_, escaped)) = chars.get(i) {
                out.push(escaped);
                i += 1;
            }
        } else if ch == '"' {
            break;
        }
    }
    i
}

/// Consume an attribute list body (opening `[` already consumed), returning
/// its raw content and the index past the closing `]`.
fn consume_attribute_list(chars: &[(usize, char)], start: usize) -> (String, usize) {
    let mut content = String::new();
    let mut nest = 0usize;
    let mut i = start;
    while i < chars.len() {
        let ch = chars[i].1;
        match ch {
            '"' => {
                let verbatim = content.trim_end().ends_with('@');
                i = copy_string_literal(chars, i, verbatim, &mut content);
                continue;
            }
            '[' => {
                nest += 1;
                content.push(ch);
            }
            ']' => {
                if nest == 0 {
                    return (content, i + 1);
                }
                nest -= 1;
                content.push(ch);
            }
            _ => content.push(ch),
        }
        i += 1;
    }
    (content, i)
}

fn finish_docs(docs: &mut Vec<String>) -> Option<String> {
    if docs.is_empty() {
        None
    } else {
        Some(std::mem::take(docs).join("\n"))
    }
}

/// Parse the content of one `[...]` list into attributes.
///
/// `Required, MaxLength(50)` yields two attributes; argument text is kept
/// raw, one string per top-level comma-separated segment.
fn parse_attribute_text(content: &str) -> Vec<Attribute> {
    split_top_level(content, ',')
        .into_iter()
        .filter_map(|segment| {
            let segment = segment.trim();
            if segment.is_empty() {
                return None;
            }
            match segment.find('(') {
                None => Some(Attribute::new(segment)),
                Some(open) => {
                    let name = segment[..open].trim();
                    if name.is_empty() {
                        return None;
                    }
                    let inner = segment[open + 1..].trim_end().trim_end_matches(')');
                    let mut attr = Attribute::new(name);
                    for arg in split_top_level(inner, ',') {
                        let arg = arg.trim();
                        if !arg.is_empty() {
                            attr = attr.arg(arg);
                        }
                    }
                    Some(attr)
                }
            }
        })
        .collect()
}

/// Split on a separator at paren/bracket/brace depth zero, outside string
/// literals.
fn split_top_level(s: &str, sep: char) -> Vec<String> {
    let mut parts = Vec::new();
    let mut current = String::new();
    let mut depth = 0i32;
    let mut in_string = false;
    let mut prev = '\0';
    for c in s.chars() {
        if in_string {
            current.push(c);
            if c == '"' && prev != '\\' {
                in_string = false;
            }
            prev = c;
            continue;
        }
        match c {
            '"' => {
                in_string = true;
                current.push(c);
            }
            '(' | '[' | '{' => {
                depth += 1;
                current.push(c);
            }
            ')' | ']' | '}' => {
                depth -= 1;
                current.push(c);
            }
            c if c == sep && depth == 0 => parts.push(std::mem::take(&mut current)),
            _ => current.push(c),
        }
        prev = c;
    }
    parts.push(current);
    parts
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scan_counts_delimiters() {
        let chunks = scan("namespace A { class B { } }").unwrap();
        let delims: Vec<Delim> = chunks.iter().map(|c| c.delim).collect();
        assert_eq!(delims, [Delim::Open, Delim::Open, Delim::Close, Delim::Close]);
        assert_eq!(chunks[0].text, "namespace A");
        assert_eq!(chunks[1].text, "class B");
    }

    #[test]
    fn test_scan_unbalanced_close() {
        let err = scan("class B { } }").unwrap_err();
        assert_eq!(err.delimiter, '}');
    }

    #[test]
    fn test_scan_unbalanced_open() {
        let err = scan("class B {").unwrap_err();
        assert_eq!(err.delimiter, '{');
    }

    #[test]
    fn test_braces_in_strings_and_comments_are_ignored() {
        let src = r#"
            // not a scope: {
            /* nor this: } */
            class B { string X = "{{literal}}"; }
        "#;
        assert!(scan(src).is_ok());
    }

    #[test]
    fn test_doc_trivia_attaches_to_next_chunk() {
        let src = "/// <summary>A thing.</summary>\nclass B { }";
        let chunks = scan(src).unwrap();
        assert_eq!(chunks[0].doc.as_deref(), Some("<summary>A thing.</summary>"));
    }

    #[test]
    fn test_attribute_lists_are_captured() {
        let src = "[Required]\n[MaxLength(50)]\npublic string Name { get; set; }";
        let chunks = scan(src).unwrap();
        let attrs = &chunks[0].attributes;
        assert_eq!(attrs.len(), 2);
        assert_eq!(attrs[0].name, "Required");
        assert_eq!(attrs[1].name, "MaxLength");
        assert_eq!(attrs[1].args, ["50"]);
    }

    #[test]
    fn test_combined_attribute_list_splits() {
        let src = "[Required, MaxLength(50)]\npublic string Name { get; set; }";
        let chunks = scan(src).unwrap();
        assert_eq!(chunks[0].attributes.len(), 2);
    }

    #[test]
    fn test_attribute_args_keep_commas_inside_parens() {
        let src = "[Scaffold(Relationship, ManyToOne, inverseProperty: \"Products\")]\npublic Category Category { get; set; }";
        let chunks = scan(src).unwrap();
        let attr = &chunks[0].attributes[0];
        assert_eq!(attr.name, "Scaffold");
        assert_eq!(
            attr.args,
            ["Relationship", "ManyToOne", "inverseProperty: \"Products\""]
        );
    }

    #[test]
    fn test_attribute_with_regex_pattern() {
        let src = "[RegularExpression(@\"^[A-Z]+$\", ErrorMessage = \"Uppercase only\")]\npublic string Code { get; set; }";
        let chunks = scan(src).unwrap();
        let attr = &chunks[0].attributes[0];
        assert_eq!(attr.name, "RegularExpression");
        assert_eq!(attr.args.len(), 2);
        assert_eq!(attr.args[0], "@\"^[A-Z]+$\"");
        assert_eq!(attr.args[1], "ErrorMessage = \"Uppercase only\"");
    }

    #[test]
    fn test_indexer_brackets_are_not_attributes() {
        // '[' after header text belongs to the type, not an attribute list
        let src = "public string[] Tags { get; set; }";
        let chunks = scan(src).unwrap();
        assert!(chunks[0].attributes.is_empty());
        assert_eq!(chunks[0].text, "public string[] Tags");
    }
}
