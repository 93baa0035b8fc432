//! Minimal markup tokenizer for chapter content.
//!
//! Splits input into start tags, end tags and text runs. Only the tag name
//! and the `class` attribute are kept; everything else about a tag is
//! dropped. A `<` that does not open a well-formed tag is kept as text.
//! A `>` inside a quoted attribute value does not end the tag.

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token<'a> {
    StartTag {
        name: String,
        class: Option<String>,
        self_closing: bool,
    },
    EndTag {
        name: String,
    },
    /// Comments, doctypes and processing instructions.
    Markup,
    Text(&'a str),
}

pub struct Tokenizer<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> Tokenizer<'a> {
    pub fn new(input: &'a str) -> Self {
        Self { input, pos: 0 }
    }
}

impl<'a> Iterator for Tokenizer<'a> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let rest = &self.input[self.pos..];
        if rest.is_empty() {
            return None;
        }

        if rest.starts_with('<') {
            if let Some(end) = tag_end(rest) {
                if let Some(token) = parse_tag(&rest[1..end]) {
                    self.pos += end + 1;
                    return Some(token);
                }
            }

            // Stray '<': emit it with the text that follows.
            let len = rest[1..].find('<').map(|i| i + 1).unwrap_or(rest.len());
            self.pos += len;
            return Some(Token::Text(&rest[..len]));
        }

        let len = rest.find('<').unwrap_or(rest.len());
        self.pos += len;
        Some(Token::Text(&rest[..len]))
    }
}

/// Offset of the `>` closing the tag that starts `rest`.
fn tag_end(rest: &str) -> Option<usize> {
    if rest.starts_with("<!") || rest.starts_with("<?") {
        return rest.find('>');
    }

    let mut quote = None;
    let mut after_eq = false;
    for (i, c) in rest.char_indices().skip(1) {
        match quote {
            Some(q) => {
                if c == q {
                    quote = None;
                }
            }
            None => {
                match c {
                    '>' => return Some(i),
                    '"' | '\'' if after_eq => quote = Some(c),
                    _ => {}
                }
                after_eq = c == '=' || (after_eq && c.is_whitespace());
            }
        }
    }

    // Unbalanced quote
    rest.find('>')
}

fn parse_tag(raw: &str) -> Option<Token<'static>> {
    if raw.starts_with('!') || raw.starts_with('?') {
        return Some(Token::Markup);
    }

    if let Some(rest) = raw.strip_prefix('/') {
        let name = tag_name(rest)?;
        return Some(Token::EndTag { name });
    }

    let name = tag_name(raw)?;
    let attrs = &raw[name.len()..];
    Some(Token::StartTag {
        class: attribute(attrs, "class"),
        self_closing: attrs.trim_end().ends_with('/'),
        name,
    })
}

fn tag_name(raw: &str) -> Option<String> {
    if !raw.starts_with(|c: char| c.is_ascii_alphabetic()) {
        return None;
    }
    let len = raw
        .find(|c: char| !(c.is_ascii_alphanumeric() || c == '-' || c == ':'))
        .unwrap_or(raw.len());
    Some(raw[..len].to_ascii_lowercase())
}

fn attribute(attrs: &str, wanted: &str) -> Option<String> {
    let mut rest = attrs;
    loop {
        rest = rest.trim_start_matches(|c: char| c.is_whitespace() || c == '/');
        if rest.is_empty() {
            return None;
        }

        let name_len = rest
            .find(|c: char| c.is_whitespace() || c == '=' || c == '/')
            .unwrap_or(rest.len());
        let name = &rest[..name_len];
        rest = rest[name_len..].trim_start();

        let mut value = "";
        if let Some(after_eq) = rest.strip_prefix('=') {
            let after_eq = after_eq.trim_start();
            let (parsed, remaining) = match after_eq.chars().next() {
                Some(quote @ ('"' | '\'')) => {
                    let body = &after_eq[1..];
                    match body.find(quote) {
                        Some(end) => (&body[..end], &body[end + 1..]),
                        None => (body, ""),
                    }
                }
                _ => {
                    let end = after_eq.find(char::is_whitespace).unwrap_or(after_eq.len());
                    (&after_eq[..end], &after_eq[end..])
                }
            };
            value = parsed;
            rest = remaining;
        }

        if name.eq_ignore_ascii_case(wanted) {
            return Some(value.to_string());
        }
    }
}
