//! Fragment parser covering the markup forms are written in: elements with
//! quoted, unquoted or bare attributes, text with character references,
//! comments, raw `<textarea>` content and implicitly closed `<option>`s.
//! Declarations such as `<!doctype html>` are skipped.

use super::*;

const VOID_TAGS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source", "track",
    "wbr",
];

#[derive(Debug)]
enum Token {
    Open {
        tag: String,
        attrs: HashMap<String, String>,
        self_closing: bool,
    },
    Close(String),
    Text(String),
    Comment(String),
}

fn parse_error(message: impl Into<String>) -> Error {
    Error::HtmlParse(message.into())
}

struct Tokenizer<'a> {
    rest: &'a str,
}

impl<'a> Tokenizer<'a> {
    fn next_token(&mut self) -> Result<Option<Token>> {
        loop {
            if self.rest.is_empty() {
                return Ok(None);
            }
            if let Some(body) = self.rest.strip_prefix("<!--") {
                let end = body
                    .find("-->")
                    .ok_or_else(|| parse_error("unterminated comment"))?;
                self.rest = &body[end + 3..];
                return Ok(Some(Token::Comment(body[..end].to_string())));
            }
            if let Some(body) = self.rest.strip_prefix("</") {
                let end = body
                    .find('>')
                    .ok_or_else(|| parse_error("unterminated end tag"))?;
                self.rest = &body[end + 1..];
                return Ok(Some(Token::Close(body[..end].trim().to_ascii_lowercase())));
            }
            if let Some(body) = self.rest.strip_prefix("<!") {
                let end = body
                    .find('>')
                    .ok_or_else(|| parse_error("unterminated declaration"))?;
                self.rest = &body[end + 1..];
                continue;
            }
            if let Some(body) = self.rest.strip_prefix('<') {
                if body.starts_with(|c: char| c.is_ascii_alphabetic()) {
                    return self.open_tag(body).map(Some);
                }
            }
            return Ok(Some(self.text()));
        }
    }

    /// Text up to the next `<`; a leading `<` that opens no tag is literal.
    fn text(&mut self) -> Token {
        let first = self.rest.chars().next().map_or(0, char::len_utf8);
        let end = self.rest[first..]
            .find('<')
            .map_or(self.rest.len(), |offset| first + offset);
        let (text, rest) = self.rest.split_at(end);
        self.rest = rest;
        Token::Text(decode_entities(text))
    }

    fn open_tag(&mut self, body: &'a str) -> Result<Token> {
        let name_end = body
            .find(|c: char| !(c.is_ascii_alphanumeric() || c == '-' || c == '_'))
            .unwrap_or(body.len());
        let tag = body[..name_end].to_ascii_lowercase();
        let mut rest = &body[name_end..];
        let mut attrs = HashMap::new();

        loop {
            rest = rest.trim_start();
            let self_closing = rest.starts_with("/>");
            if self_closing || rest.starts_with('>') {
                self.rest = &rest[if self_closing { 2 } else { 1 }..];
                return Ok(Token::Open {
                    tag,
                    attrs,
                    self_closing,
                });
            }
            if rest.is_empty() {
                return Err(parse_error(format!("unterminated <{tag}> tag")));
            }

            let name_end = rest
                .find(|c: char| c.is_whitespace() || matches!(c, '=' | '>' | '/'))
                .unwrap_or(rest.len());
            if name_end == 0 {
                // stray '=' or '/'
                rest = &rest[1..];
                continue;
            }
            let name = rest[..name_end].to_ascii_lowercase();
            rest = rest[name_end..].trim_start();

            let value = match rest.strip_prefix('=') {
                Some(after) => {
                    let (raw, after) = split_attr_value(after.trim_start(), &tag)?;
                    rest = after;
                    decode_entities(raw)
                }
                None => String::new(),
            };
            // the first occurrence of a repeated attribute wins
            attrs.entry(name).or_insert(value);
        }
    }

    /// Everything up to `</tag`, case-insensitively; the end tag is consumed.
    fn raw_text(&mut self, tag: &str) -> Result<&'a str> {
        let end_tag = format!("</{tag}");
        let end = self
            .rest
            .to_ascii_lowercase()
            .find(&end_tag)
            .ok_or_else(|| parse_error(format!("unterminated <{tag}>")))?;
        let (text, tail) = self.rest.split_at(end);
        self.rest = tail.find('>').map_or("", |close| &tail[close + 1..]);
        Ok(text)
    }
}

fn split_attr_value<'s>(src: &'s str, tag: &str) -> Result<(&'s str, &'s str)> {
    match src.chars().next() {
        Some(quote @ ('"' | '\'')) => {
            let body = &src[1..];
            let end = body
                .find(quote)
                .ok_or_else(|| parse_error(format!("unterminated attribute value in <{tag}>")))?;
            Ok((&body[..end], &body[end + 1..]))
        }
        _ => {
            let end = src
                .find(|c: char| c.is_whitespace() || c == '>')
                .unwrap_or(src.len());
            Ok(src.split_at(end))
        }
    }
}

fn decode_entities(src: &str) -> String {
    let mut pieces = src.split('&');
    let mut out = pieces.next().unwrap_or_default().to_string();
    for piece in pieces {
        let decoded = piece
            .split_once(';')
            .and_then(|(name, tail)| Some((entity_char(name)?, tail)));
        match decoded {
            Some((ch, tail)) => {
                out.push(ch);
                out.push_str(tail);
            }
            None => {
                out.push('&');
                out.push_str(piece);
            }
        }
    }
    out
}

fn entity_char(name: &str) -> Option<char> {
    if let Some(code) = name.strip_prefix('#') {
        let code = match code.strip_prefix(['x', 'X']) {
            Some(hex) => u32::from_str_radix(hex, 16).ok()?,
            None => code.parse().ok()?,
        };
        return char::from_u32(code);
    }
    let ch = match name {
        "amp" => '&',
        "lt" => '<',
        "gt" => '>',
        "quot" => '"',
        "apos" => '\'',
        "nbsp" => '\u{a0}',
        _ => return None,
    };
    Some(ch)
}

/// Pops back to the innermost open `tag`; end tags with nothing to close
/// are dropped.
fn close_element(dom: &Dom, open: &mut Vec<NodeId>, tag: &str) {
    if let Some(index) = open.iter().rposition(|node| dom.tag_name(*node) == Some(tag)) {
        open.truncate(index);
    }
}

/// A new `<option>` or `<optgroup>` ends an open option in the same list.
fn close_open_option(dom: &Dom, open: &mut Vec<NodeId>) {
    let innermost = open.iter().rposition(|node| {
        matches!(
            dom.tag_name(*node),
            Some("option" | "optgroup" | "select" | "datalist")
        )
    });
    if let Some(index) = innermost.filter(|index| dom.tag_name(open[*index]) == Some("option")) {
        open.truncate(index);
    }
}

pub(super) fn parse_html(html: &str) -> Result<Dom> {
    let mut dom = Dom::new();
    let mut open = vec![dom.root];
    let mut tokens = Tokenizer { rest: html };

    while let Some(token) = tokens.next_token()? {
        match token {
            Token::Comment(text) => {
                let parent = open.last().copied().unwrap_or(dom.root);
                dom.push_child(parent, NodeData::Comment(text));
            }
            Token::Text(text) => {
                let parent = open.last().copied().unwrap_or(dom.root);
                dom.push_child(parent, NodeData::Text(text));
            }
            Token::Close(tag) => close_element(&dom, &mut open, &tag),
            Token::Open {
                tag,
                attrs,
                self_closing,
            } => {
                if tag == "option" || tag == "optgroup" {
                    close_open_option(&dom, &mut open);
                }
                let parent = open.last().copied().unwrap_or(dom.root);
                let node = dom.push_child(parent, NodeData::Element(Element::new(&tag, attrs)));
                if self_closing || VOID_TAGS.contains(&tag.as_str()) {
                    continue;
                }
                if tag == "textarea" {
                    let raw = tokens.raw_text(&tag)?;
                    let raw = raw
                        .strip_prefix("\r\n")
                        .or_else(|| raw.strip_prefix('\n'))
                        .unwrap_or(raw);
                    if !raw.is_empty() {
                        dom.push_child(node, NodeData::Text(decode_entities(raw)));
                    }
                } else {
                    open.push(node);
                }
            }
        }
    }

    dom.settle_parsed_controls()?;
    Ok(dom)
}
