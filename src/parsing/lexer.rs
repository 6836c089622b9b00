//! parsing::lexer
//!
//! Tokenizer for SysML v2 textual notation.
//!
//! Line comments (`//`) are dropped. Block comments are kept as
//! [`TokenKind::Comment`] because `doc` and `comment` elements own the
//! comment that follows them; the grammar decides whether a block comment is
//! a body or trivia.

use super::error::ParseError;

/// A lexical token with its 1-based source position.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub line: usize,
    pub column: usize,
}

/// Token categories.
#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    /// Identifier or keyword (`part`, `Vehicle`, `_x1`)
    Ident(String),
    /// Unrestricted name (`'front wheel'`), without quotes
    Name(String),
    /// Numeric literal, as written
    Number(String),
    /// String literal, without quotes
    Str(String),
    /// Block comment text, without delimiters
    Comment(String),
    /// Operator or punctuation (`:>`, `::`, `{`, `;`, ...)
    Symbol(&'static str),
}

impl TokenKind {
    /// Source-like rendering used in declarations and error messages.
    pub fn text(&self) -> String {
        match self {
            TokenKind::Ident(s) | TokenKind::Number(s) => s.clone(),
            TokenKind::Name(s) => format!("'{}'", s),
            TokenKind::Str(s) => format!("\"{}\"", s),
            TokenKind::Comment(_) => "/* */".to_string(),
            TokenKind::Symbol(s) => (*s).to_string(),
        }
    }

    /// Whether this is the given punctuation symbol.
    pub fn is_symbol(&self, symbol: &str) -> bool {
        matches!(self, TokenKind::Symbol(s) if *s == symbol)
    }
}

/// Multi-character operators, longest first so `:>>` wins over `:>`.
const SYMBOLS: &[&str] = &[
    ":>>", "::>", "...", "==>", "===", "!==", ":>", "::", ":=", "=>", "->", "..", "==", "!=",
    "<=", ">=", "**", "{", "}", "(", ")", "[", "]", ";", ",", ":", "=", ".", "<", ">", "+",
    "-", "*", "/", "%", "^", "~", "@", "#", "$", "&", "|", "?", "!",
];

/// Tokenize `source`.
///
/// # Errors
///
/// Returns a `ParseError` for unterminated strings, names, or block
/// comments, and for characters outside the notation.
pub fn tokenize(source: &str) -> Result<Vec<Token>, ParseError> {
    Lexer::new(source).run()
}

struct Lexer<'a> {
    source: &'a str,
    chars: Vec<(usize, char)>,
    pos: usize,
    line: usize,
    column: usize,
}

impl<'a> Lexer<'a> {
    fn new(source: &'a str) -> Self {
        Self {
            source,
            chars: source.char_indices().collect(),
            pos: 0,
            line: 1,
            column: 1,
        }
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).map(|(_, c)| *c)
    }

    fn peek_at(&self, offset: usize) -> Option<char> {
        self.chars.get(self.pos + offset).map(|(_, c)| *c)
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += 1;
        if c == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        Some(c)
    }

    fn byte_offset(&self) -> usize {
        self.chars
            .get(self.pos)
            .map(|(i, _)| *i)
            .unwrap_or(self.source.len())
    }

    fn run(mut self) -> Result<Vec<Token>, ParseError> {
        let mut tokens = Vec::new();

        while let Some(c) = self.peek() {
            if c.is_whitespace() {
                self.bump();
                continue;
            }

            let (line, column) = (self.line, self.column);

            if c == '/' && self.peek_at(1) == Some('/') {
                self.skip_line_comment();
                continue;
            }

            let kind = if c == '/' && self.peek_at(1) == Some('*') {
                TokenKind::Comment(self.block_comment(line, column)?)
            } else if c == '"' {
                TokenKind::Str(self.quoted('"', line, column, "string")?)
            } else if c == '\'' {
                TokenKind::Name(self.quoted('\'', line, column, "name")?)
            } else if c.is_ascii_digit() {
                TokenKind::Number(self.number())
            } else if c.is_alphabetic() || c == '_' {
                TokenKind::Ident(self.ident())
            } else if let Some(symbol) = self.symbol() {
                TokenKind::Symbol(symbol)
            } else {
                return Err(ParseError::new(
                    line,
                    column,
                    format!("unexpected character '{}'", c),
                ));
            };

            tokens.push(Token { kind, line, column });
        }

        Ok(tokens)
    }

    fn skip_line_comment(&mut self) {
        while let Some(c) = self.peek() {
            if c == '\n' {
                break;
            }
            self.bump();
        }
    }

    fn block_comment(&mut self, line: usize, column: usize) -> Result<String, ParseError> {
        self.bump();
        self.bump();
        let start = self.byte_offset();
        loop {
            match self.peek() {
                None => {
                    return Err(ParseError::new(line, column, "unterminated block comment"));
                }
                Some('*') if self.peek_at(1) == Some('/') => {
                    let text = self.source[start..self.byte_offset()].trim().to_string();
                    self.bump();
                    self.bump();
                    return Ok(text);
                }
                Some(_) => {
                    self.bump();
                }
            }
        }
    }

    fn quoted(
        &mut self,
        quote: char,
        line: usize,
        column: usize,
        what: &str,
    ) -> Result<String, ParseError> {
        self.bump();
        let unterminated = || ParseError::new(line, column, format!("unterminated {}", what));
        let mut value = String::new();
        loop {
            match self.bump() {
                None => return Err(unterminated()),
                Some('\n') if quote == '\'' => return Err(unterminated()),
                Some('\\') => {
                    let escaped = self.bump().ok_or_else(unterminated)?;
                    value.push('\\');
                    value.push(escaped);
                }
                Some(c) if c == quote => return Ok(value),
                Some(c) => value.push(c),
            }
        }
    }

    fn number(&mut self) -> String {
        let mut text = String::new();
        while let Some(c) = self.peek() {
            let exponent_sign =
                (c == '-' || c == '+') && text.ends_with(|e: char| e == 'e' || e == 'E');
            let fraction = c == '.' && self.peek_at(1).is_some_and(|n| n.is_ascii_digit());
            if c.is_ascii_digit() || c == 'e' || c == 'E' || exponent_sign || fraction {
                text.push(c);
                self.bump();
            } else {
                break;
            }
        }
        text
    }

    fn ident(&mut self) -> String {
        let mut text = String::new();
        while let Some(c) = self.peek() {
            if c.is_alphanumeric() || c == '_' {
                text.push(c);
                self.bump();
            } else {
                break;
            }
        }
        text
    }

    fn symbol(&mut self) -> Option<&'static str> {
        let rest = &self.source[self.byte_offset()..];
        let symbol = SYMBOLS.iter().find(|s| rest.starts_with(**s))?;
        for _ in 0..symbol.chars().count() {
            self.bump();
        }
        Some(*symbol)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(source: &str) -> Vec<TokenKind> {
        tokenize(source)
            .unwrap()
            .into_iter()
            .map(|t| t.kind)
            .collect()
    }

    #[test]
    fn declaration_tokens() {
        assert_eq!(
            kinds("part engine : Engine;"),
            vec![
                TokenKind::Ident("part".into()),
                TokenKind::Ident("engine".into()),
                TokenKind::Symbol(":"),
                TokenKind::Ident("Engine".into()),
                TokenKind::Symbol(";"),
            ]
        );
    }

    #[test]
    fn longest_symbol_wins() {
        assert_eq!(
            kinds(":>> mass :> x :: y"),
            vec![
                TokenKind::Symbol(":>>"),
                TokenKind::Ident("mass".into()),
                TokenKind::Symbol(":>"),
                TokenKind::Ident("x".into()),
                TokenKind::Symbol("::"),
                TokenKind::Ident("y".into()),
            ]
        );
    }

    #[test]
    fn line_comments_dropped_block_comments_kept() {
        assert_eq!(
            kinds("// note\ndoc /* Body text */"),
            vec![
                TokenKind::Ident("doc".into()),
                TokenKind::Comment("Body text".into()),
            ]
        );
    }

    #[test]
    fn numbers_with_fraction_and_exponent() {
        assert_eq!(
            kinds("1500.0 2e-3 1..*"),
            vec![
                TokenKind::Number("1500.0".into()),
                TokenKind::Number("2e-3".into()),
                TokenKind::Number("1".into()),
                TokenKind::Symbol(".."),
                TokenKind::Symbol("*"),
            ]
        );
    }

    #[test]
    fn quoted_names_and_strings() {
        assert_eq!(
            kinds("part 'front wheel'; \"text\""),
            vec![
                TokenKind::Ident("part".into()),
                TokenKind::Name("front wheel".into()),
                TokenKind::Symbol(";"),
                TokenKind::Str("text".into()),
            ]
        );
    }

    #[test]
    fn positions_are_one_based() {
        let tokens = tokenize("package P {\n  part x;\n}").unwrap();
        let part = &tokens[3];
        assert_eq!(part.kind, TokenKind::Ident("part".into()));
        assert_eq!((part.line, part.column), (2, 3));
    }

    #[test]
    fn unterminated_string_fails() {
        let err = tokenize("attribute a = \"open;").unwrap_err();
        assert_eq!((err.line, err.column), (1, 15));
        assert!(err.message.contains("unterminated string"));
    }

    #[test]
    fn unterminated_comment_fails() {
        let err = tokenize("part x; /* never closed").unwrap_err();
        assert!(err.message.contains("unterminated block comment"));
    }

    #[test]
    fn unexpected_character_fails() {
        let err = tokenize("part x` ;").unwrap_err();
        assert!(err.message.contains("unexpected character '`'"));
    }
}
