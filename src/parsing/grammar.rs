//! parsing::grammar
//!
//! Structural parser over the token stream.
//!
//! A member is a run of tokens ending at `;`, at a `{ ... }` body, or (for
//! `doc` and `comment`) at the block comment it owns. Parentheses and square
//! brackets must balance inside a member. Bodies nest recursively.
//!
//! The parser does not resolve names or check types; a structurally sound
//! file with a misspelled type still parses.

use super::error::ParseError;
use super::lexer::{tokenize, Token, TokenKind};
use super::model::{Element, Model};

/// Reserved words of the textual notation. Leading keywords of a member
/// become its kind.
const KEYWORDS: &[&str] = &[
    "about", "abstract", "accept", "action", "actor", "after", "alias", "all", "allocate",
    "allocation", "analysis", "and", "as", "assert", "assign", "assume", "at", "attribute",
    "bind", "binding", "by", "calc", "case", "comment", "concern", "connect", "connection",
    "constant", "constraint", "crosses", "decide", "def", "default", "defined", "dependency",
    "derived", "do", "doc", "else", "end", "entry", "enum", "event", "exhibit", "exit",
    "expose", "false", "filter", "first", "flow", "for", "fork", "frame", "from", "hastype",
    "if", "implies", "import", "in", "include", "individual", "inout", "interface", "istype",
    "item", "join", "language", "library", "locale", "loop", "merge", "message", "meta",
    "metadata", "new", "nonunique", "not", "null", "objective", "occurrence", "of", "or",
    "ordered", "out", "package", "parallel", "part", "perform", "port", "private",
    "protected", "public", "readonly", "redefines", "ref", "references", "render",
    "rendering", "rep", "require", "requirement", "return", "satisfy", "send", "snapshot",
    "specializes", "stakeholder", "standard", "state", "subject", "subsets", "succession",
    "terminate", "then", "timeslice", "to", "transition", "true", "until", "use", "variant",
    "variation", "verification", "verify", "via", "view", "viewpoint", "when", "while", "xor",
];

/// Kinds whose first identifier refers to something else rather than
/// declaring a name.
const REFERENCE_KINDS: &[&str] = &[
    "allocate", "bind", "connect", "exhibit", "expose", "first", "import", "include",
    "perform", "satisfy", "verify",
];

/// Deepest `{ ... }` nesting accepted before parsing stops with an error.
pub const MAX_DEPTH: usize = 256;

/// Parse `source` into a [`Model`].
///
/// # Errors
///
/// Returns the first lexical or structural error with its position.
pub fn parse(source: &str) -> Result<Model, ParseError> {
    let tokens = tokenize(source)?;
    let mut parser = Parser {
        tokens,
        pos: 0,
        depth: 0,
        end: end_position(source),
    };
    let elements = parser.body(None)?;
    Ok(Model { elements })
}

fn is_keyword(word: &str) -> bool {
    KEYWORDS.contains(&word)
}

/// Position just past the last character of `source`.
fn end_position(source: &str) -> (usize, usize) {
    let line = source.matches('\n').count() + 1;
    let last = source.rsplit('\n').next().unwrap_or_default();
    (line, last.chars().count() + 1)
}

fn error_at(token: &Token, message: impl Into<String>) -> ParseError {
    ParseError::new(token.line, token.column, message)
}

/// Leading keyword identifiers of a member header.
fn leading_keywords(header: &[Token]) -> Vec<&str> {
    header
        .iter()
        .map_while(|t| match &t.kind {
            TokenKind::Ident(word) if is_keyword(word) => Some(word.as_str()),
            _ => None,
        })
        .collect()
}

fn is_annotation(header: &[Token]) -> bool {
    leading_keywords(header)
        .iter()
        .any(|w| *w == "doc" || *w == "comment")
}

/// A member with neither leading keywords nor a redefinition prefix, such as
/// the result expression of a `calc` or `constraint` body.
fn is_expression(header: &[Token]) -> bool {
    leading_keywords(header).is_empty()
        && !header
            .first()
            .is_some_and(|t| t.kind.is_symbol(":>>") || t.kind.is_symbol(":>"))
}

/// Derive `(kind, name)` from a member header.
fn describe(header: &[Token]) -> (String, Option<String>) {
    let keywords = leading_keywords(header);
    let mut rest = &header[keywords.len()..];

    let kind = if !keywords.is_empty() {
        keywords.join(" ")
    } else if is_expression(header) {
        "expression".to_string()
    } else {
        "redefinition".to_string()
    };

    let references = keywords
        .last()
        .is_some_and(|w| REFERENCE_KINDS.contains(w));
    if references || kind == "expression" {
        return (kind, None);
    }

    if rest
        .first()
        .is_some_and(|t| t.kind.is_symbol(":>>") || t.kind.is_symbol(":>"))
    {
        rest = &rest[1..];
    }

    // Short name: `part <p1> engine`
    if rest.first().is_some_and(|t| t.kind.is_symbol("<")) {
        if let Some(close) = rest.iter().position(|t| t.kind.is_symbol(">")) {
            rest = &rest[close + 1..];
        }
    }

    let name = match rest.first().map(|t| &t.kind) {
        Some(TokenKind::Ident(n)) if !is_keyword(n) => Some(n.clone()),
        Some(TokenKind::Name(n)) => Some(n.clone()),
        _ => None,
    };

    (kind, name)
}

struct Parser {
    tokens: Vec<Token>,
    pos: usize,
    /// Bodies currently open
    depth: usize,
    end: (usize, usize),
}

impl Parser {
    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn next(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.pos).cloned();
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    fn at_end(&self, message: impl Into<String>) -> ParseError {
        ParseError::new(self.end.0, self.end.1, message)
    }

    /// Parse members until end of input (top level) or the `}` closing the
    /// brace at `open`.
    fn body(&mut self, open: Option<(usize, usize)>) -> Result<Vec<Element>, ParseError> {
        let mut elements = Vec::new();

        loop {
            let Some(token) = self.peek() else {
                return match open {
                    None => Ok(elements),
                    Some((line, column)) => Err(self.at_end(format!(
                        "unexpected end of input, expected '}}' to close '{{' at line {}, column {}",
                        line, column
                    ))),
                };
            };

            match &token.kind {
                TokenKind::Symbol("}") => {
                    if open.is_none() {
                        return Err(error_at(token, "unexpected '}'"));
                    }
                    self.pos += 1;
                    return Ok(elements);
                }
                TokenKind::Symbol(";") => {
                    self.pos += 1;
                }
                TokenKind::Comment(text) => {
                    elements.push(Element {
                        kind: "comment".to_string(),
                        name: None,
                        declaration: String::new(),
                        comment: Some(text.clone()),
                        line: token.line,
                        children: Vec::new(),
                    });
                    self.pos += 1;
                }
                _ => {
                    let element = self.member()?;
                    elements.push(element);
                }
            }
        }
    }

    fn member(&mut self) -> Result<Element, ParseError> {
        let start = self.pos;
        let line = self.peek().map_or(self.end.0, |t| t.line);
        let mut brackets: Vec<Token> = Vec::new();
        let mut comment = None;
        let mut children = Vec::new();

        let header_end = loop {
            let Some(token) = self.next() else {
                if let Some(open) = brackets.last() {
                    return Err(error_at(open, format!("unclosed '{}'", open.kind.text())));
                }
                return Err(self.at_end("unexpected end of input, expected ';' or '{'"));
            };

            match &token.kind {
                TokenKind::Symbol("(" | "[") => brackets.push(token.clone()),
                TokenKind::Symbol(s @ (")" | "]")) => {
                    let opener = if *s == ")" { "(" } else { "[" };
                    match brackets.pop() {
                        Some(open) if open.kind.is_symbol(opener) => {}
                        _ => return Err(error_at(&token, format!("unbalanced '{}'", s))),
                    }
                }
                TokenKind::Symbol(";" | "{" | "}") if !brackets.is_empty() => {
                    let open = &brackets[brackets.len() - 1];
                    return Err(error_at(open, format!("unclosed '{}'", open.kind.text())));
                }
                TokenKind::Symbol(";") => break self.pos - 1,
                TokenKind::Symbol("{") => {
                    if self.depth >= MAX_DEPTH {
                        return Err(error_at(&token, "nesting too deep"));
                    }
                    let header_end = self.pos - 1;
                    self.depth += 1;
                    children = self.body(Some((token.line, token.column)))?;
                    self.depth -= 1;
                    break header_end;
                }
                TokenKind::Symbol("}") => {
                    if is_expression(&self.tokens[start..self.pos - 1]) {
                        // Leave the brace for the enclosing body.
                        self.pos -= 1;
                        break self.pos;
                    }
                    return Err(error_at(&token, "expected ';' before '}'"));
                }
                TokenKind::Comment(text) => {
                    if is_annotation(&self.tokens[start..self.pos - 1]) {
                        comment = Some(text.clone());
                        break self.pos - 1;
                    }
                }
                _ => {}
            }
        };

        let header: Vec<Token> = self.tokens[start..header_end]
            .iter()
            .filter(|t| !matches!(t.kind, TokenKind::Comment(_)))
            .cloned()
            .collect();
        let (kind, name) = describe(&header);
        let declaration = header
            .iter()
            .map(|t| t.kind.text())
            .collect::<Vec<_>>()
            .join(" ");

        Ok(Element {
            kind,
            name,
            declaration,
            comment,
            line,
            children,
        })
    }
}
