// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
// http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! The streaming, dialect-aware tokenizer.
//!
//! [`Lexer::scan`] is the only entry point: it peeks one code point, picks a
//! sub-scanner, and returns exactly one [`Token`]. There is no lookahead
//! buffer of tokens and no recursion; callers drive the loop themselves,
//! which is what lets the obfuscator and normalizer fold scanning and
//! rewriting into a single pass.

use crate::classifier::{self, JSON_OPERATORS};
use crate::dialect::Dialect;
use crate::token::{Token, TokenKind};

pub struct Lexer<'a> {
    src: &'a str,
    bytes: &'a [u8],
    cursor: usize,
    dialect: &'static dyn Dialect,
    done: bool,
}

impl<'a> Lexer<'a> {
    pub fn new(src: &'a str, dialect: &'static dyn Dialect) -> Self {
        Lexer {
            src,
            bytes: src.as_bytes(),
            cursor: 0,
            dialect,
            done: false,
        }
    }

    pub fn dialect(&self) -> &'static dyn Dialect {
        self.dialect
    }

    pub fn source(&self) -> &'a str {
        self.src
    }

    fn is_eof(&self) -> bool {
        self.cursor >= self.bytes.len()
    }

    /// The code point at the cursor, decoded from UTF-8. ASCII is the
    /// overwhelmingly common case and is handled without touching the
    /// decoder; non-ASCII falls back to `str::char_indices`.
    fn peek(&self) -> Option<char> {
        self.peek_at(self.cursor)
    }

    fn peek_at(&self, pos: usize) -> Option<char> {
        if pos >= self.bytes.len() {
            return None;
        }
        let byte = self.bytes[pos];
        if byte < 0x80 {
            return Some(byte as char);
        }
        self.src[pos..].chars().next()
    }

    /// Byte length of the current code point, or 1 past EOF (never read).
    fn char_len_at(&self, pos: usize) -> usize {
        match self.peek_at(pos) {
            Some(ch) => ch.len_utf8(),
            None => 1,
        }
    }

    fn advance(&mut self) {
        if !self.is_eof() {
            self.cursor += self.char_len_at(self.cursor);
        }
    }

    fn peek_ahead(&self, n: usize) -> Option<char> {
        let mut pos = self.cursor;
        for _ in 0..n {
            if pos >= self.bytes.len() {
                return None;
            }
            pos += self.char_len_at(pos);
        }
        self.peek_at(pos)
    }

    fn starts_with(&self, needle: &str) -> bool {
        self.src[self.cursor..].starts_with(needle)
    }

    /// Skip `n` *bytes* forward (used once a literal ASCII needle has
    /// already been matched, so byte-width and code-point-width agree).
    fn advance_bytes(&mut self, n: usize) {
        self.cursor = (self.cursor + n).min(self.bytes.len());
    }

    pub fn scan(&mut self) -> Token {
        let token = self.scan_inner();
        if matches!(
            token.kind,
            TokenKind::Error | TokenKind::IncompleteString | TokenKind::Unknown
        ) {
            log::warn!(
                "lexer surfaced {:?} at byte {}..{} (dbms={})",
                token.kind,
                token.start,
                token.end,
                self.dialect.name(),
            );
        }
        token
    }

    fn scan_inner(&mut self) -> Token {
        if self.done {
            return Token::eof(self.cursor);
        }
        let Some(ch) = self.peek() else {
            self.done = true;
            return Token::eof(self.cursor);
        };

        log::trace!("dispatching on {:?} at byte {} (dbms={})", ch, self.cursor, self.dialect.name());

        if classifier::is_whitespace(ch) {
            return self.scan_whitespace();
        }
        if classifier::is_letter(ch) {
            return self.scan_identifier();
        }
        if classifier::is_double_quote(ch) {
            return self.scan_delimited_ident('"', '"');
        }
        if ch == '`' && self.dialect.supports_backtick_quoted_identifier() {
            return self.scan_delimited_ident('`', '`');
        }
        if ch == '[' && self.dialect.supports_bracket_quoted_identifier() {
            return self.scan_delimited_ident('[', ']');
        }
        if classifier::is_single_quote(ch) {
            return self.scan_string();
        }
        if ch == '-' && self.peek_ahead(1) == Some('-') {
            return self.scan_line_comment(2);
        }
        if ch == '#' && self.dialect.supports_hash_comment() {
            return self.scan_line_comment(1);
        }
        if ch == '/' && self.peek_ahead(1) == Some('*') {
            return self.scan_block_comment();
        }
        if classifier::is_leading_sign(ch) {
            let next = self.peek_ahead(1);
            if next.is_some_and(classifier::is_digit) || next == Some('.') {
                return self.scan_number();
            }
            return self.scan_operator();
        }
        if classifier::is_digit(ch) {
            return self.scan_number();
        }
        if classifier::is_wildcard(ch) {
            return self.scan_wildcard();
        }
        if ch == '$'
            && (self.peek_ahead(1).is_some_and(classifier::is_digit)
                || self.dialect.supports_dollar_quoting())
        {
            return self.scan_dollar();
        }
        if ch == ':' {
            return self.scan_bind_parameter(':');
        }
        if ch == '@' {
            return self.scan_at();
        }
        if ch == '#' && self.dialect.supports_temp_table_prefix() {
            return self.scan_temp_table();
        }
        if classifier::is_operator_char(ch) {
            if let Some(tok) = self.try_scan_json_operator() {
                return tok;
            }
            return self.scan_operator();
        }
        if classifier::is_punctuation_char(ch) {
            return self.scan_punctuation();
        }
        self.scan_unknown()
    }

    fn scan_whitespace(&mut self) -> Token {
        let start = self.cursor;
        while self.peek().is_some_and(classifier::is_whitespace) {
            self.advance();
        }
        Token::new(TokenKind::Space, start, self.cursor)
    }

    fn scan_identifier(&mut self) -> Token {
        let start = self.cursor;
        let mut has_digits = false;
        while let Some(ch) = self.peek() {
            if !classifier::is_identifier_continue(ch) {
                break;
            }
            if classifier::is_digit(ch) {
                has_digits = true;
            }
            self.advance();
        }
        let end = self.cursor;
        let word = &self.src[start..end];
        let (mut kind, is_table_indicator) = classifier::classify_identifier(word);

        if matches!(kind, TokenKind::Ident) && self.followed_by_call_paren() {
            kind = TokenKind::Function;
        }

        let mut token = Token::new(kind, start, end);
        token.has_digits = has_digits;
        token.is_table_indicator = is_table_indicator;
        token
    }

    /// True iff, skipping whitespace, the next non-whitespace byte is `(`.
    fn followed_by_call_paren(&self) -> bool {
        let mut pos = self.cursor;
        loop {
            match self.peek_at(pos) {
                Some(ch) if classifier::is_whitespace(ch) => pos += self.char_len_at(pos),
                Some('(') => return true,
                _ => return false,
            }
        }
    }

    fn scan_string(&mut self) -> Token {
        let start = self.cursor;
        self.advance(); // opening quote
        let mut escaped = false;
        loop {
            match self.peek() {
                None => return Token::new(TokenKind::IncompleteString, start, self.cursor),
                Some(ch) => {
                    if escaped {
                        escaped = false;
                        self.advance();
                        continue;
                    }
                    if ch == '\\' {
                        escaped = true;
                        self.advance();
                        continue;
                    }
                    if ch == '\'' {
                        self.advance();
                        return Token::new(TokenKind::String, start, self.cursor);
                    }
                    self.advance();
                }
            }
        }
    }

    /// Shared by double-quote, backtick, and bracket identifiers: scans
    /// until `close`, supporting a dotted chain of same-style quoted parts
    /// (`"a"."b"`, `` `a`.`b` ``, `[a].[b]`) and non-ASCII identifier text.
    fn scan_delimited_ident(&mut self, open: char, close: char) -> Token {
        let start = self.cursor;
        let mut has_digits = false;
        self.advance(); // opening delimiter
        loop {
            match self.peek() {
                None => return Token::new(TokenKind::Error, start, self.cursor),
                Some(ch) if ch == close => {
                    self.advance();
                    if self.peek() == Some('.') && self.peek_ahead(1) == Some(open) {
                        self.advance(); // '.'
                        self.advance(); // reopen
                        continue;
                    }
                    let mut token = Token::new(TokenKind::QuotedIdent, start, self.cursor);
                    token.has_quotes = true;
                    token.has_digits = has_digits;
                    return token;
                }
                Some(ch) => {
                    if classifier::is_digit(ch) {
                        has_digits = true;
                    }
                    self.advance();
                }
            }
        }
    }

    fn scan_line_comment(&mut self, marker_len: usize) -> Token {
        let start = self.cursor;
        self.advance_bytes(marker_len);
        while let Some(ch) = self.peek() {
            if ch == '\n' {
                break;
            }
            self.advance();
        }
        Token::new(TokenKind::Comment, start, self.cursor)
    }

    fn scan_block_comment(&mut self) -> Token {
        let start = self.cursor;
        self.advance_bytes(2); // '/*'
        loop {
            match self.peek() {
                None => return Token::new(TokenKind::Error, start, self.cursor),
                Some('*') if self.peek_ahead(1) == Some('/') => {
                    self.advance_bytes(2);
                    return Token::new(TokenKind::MultilineComment, start, self.cursor);
                }
                _ => self.advance(),
            }
        }
    }

    fn scan_number(&mut self) -> Token {
        let start = self.cursor;
        if classifier::is_leading_sign(self.peek().unwrap()) {
            self.advance();
        }
        if self.peek() == Some('0') {
            match self.peek_ahead(1) {
                Some('x') | Some('X') => return self.scan_hex_number(start),
                Some(c) if ('0'..='7').contains(&c) => return self.scan_octal_number(start),
                _ => {}
            }
        }
        self.scan_decimal_number(start)
    }

    fn scan_decimal_number(&mut self, start: usize) -> Token {
        loop {
            match self.peek() {
                Some(ch) if classifier::is_digit(ch) || ch == '.' => self.advance(),
                Some(ch) if classifier::is_exponent_marker(ch) => {
                    self.advance();
                    if self.peek().is_some_and(classifier::is_leading_sign) {
                        self.advance();
                    }
                }
                _ => break,
            }
        }
        Token::new(TokenKind::Number, start, self.cursor)
    }

    fn scan_hex_number(&mut self, start: usize) -> Token {
        self.advance_bytes(2); // '0x'
        while let Some(ch) = self.peek() {
            if ch.is_ascii_hexdigit() {
                self.advance();
            } else {
                break;
            }
        }
        Token::new(TokenKind::Number, start, self.cursor)
    }

    fn scan_octal_number(&mut self, start: usize) -> Token {
        self.advance(); // '0'
        while let Some(ch) = self.peek() {
            if ('0'..='7').contains(&ch) {
                self.advance();
            } else {
                break;
            }
        }
        Token::new(TokenKind::Number, start, self.cursor)
    }

    fn scan_wildcard(&mut self) -> Token {
        let start = self.cursor;
        self.advance();
        Token::new(TokenKind::Wildcard, start, self.cursor)
    }

    /// `$` dispatches three ways: positional parameter (`$1`), the literal
    /// `$func$...$func$` function-body quoting, or an arbitrary-tag
    /// dollar-quoted string (including the empty tag `$$...$$`).
    fn scan_dollar(&mut self) -> Token {
        let start = self.cursor;
        if self.peek_ahead(1).is_some_and(classifier::is_digit) {
            self.advance(); // '$'
            while self.peek().is_some_and(classifier::is_digit) {
                self.advance();
            }
            return Token::new(TokenKind::PositionalParameter, start, self.cursor);
        }
        self.scan_dollar_quoted(start)
    }

    fn scan_dollar_quoted(&mut self, start: usize) -> Token {
        self.advance(); // opening '$'
        let tag_start = self.cursor;
        while let Some(ch) = self.peek() {
            if ch == '$' {
                break;
            }
            self.advance();
        }
        if self.peek() != Some('$') {
            return Token::new(TokenKind::Error, start, self.cursor);
        }
        self.advance(); // closing '$' of the opening tag
        let tag = &self.src[tag_start - 1..self.cursor];
        let is_func = tag == "$func$";

        loop {
            if self.is_eof() {
                return Token::new(TokenKind::Error, start, self.cursor);
            }
            if self.starts_with(tag) {
                self.advance_bytes(tag.len());
                let kind = if is_func {
                    TokenKind::DollarQuotedFunction
                } else {
                    TokenKind::DollarQuotedString
                };
                return Token::new(kind, start, self.cursor);
            }
            self.advance();
        }
    }

    /// `:name` / `:number` bind parameters, usable in every dialect.
    fn scan_bind_parameter(&mut self, _marker: char) -> Token {
        let start = self.cursor;
        self.advance(); // ':'
        while let Some(ch) = self.peek() {
            if classifier::is_digit(ch) || classifier::is_letter(ch) {
                self.advance();
            } else {
                break;
            }
        }
        Token::new(TokenKind::BindParameter, start, self.cursor)
    }

    /// `@` dispatches to `@@ident` (system variable, unless the dialect
    /// doesn't gate it through the bind-parameter family and it instead
    /// reads as a JSON operator), `@name` (bind parameter), or falls through
    /// to the operator scanner for a bare `@` used as a JSON operator byte.
    fn scan_at(&mut self) -> Token {
        let start = self.cursor;
        if self.peek_ahead(1) == Some('@') {
            let after = self.peek_ahead(2);
            if after.is_some_and(|c| classifier::is_letter(c) || c == '_') {
                self.advance_bytes(2); // '@@'
                while let Some(ch) = self.peek() {
                    if classifier::is_identifier_continue(ch) {
                        self.advance();
                    } else {
                        break;
                    }
                }
                return Token::new(TokenKind::SystemVariable, start, self.cursor);
            }
            if let Some(tok) = self.try_scan_json_operator() {
                return tok;
            }
        }
        if self
            .dialect
            .supports_at_bind_parameter()
            .then(|| self.peek_ahead(1))
            .flatten()
            .is_some_and(|c| classifier::is_letter(c) || classifier::is_digit(c))
        {
            self.advance(); // '@'
            while let Some(ch) = self.peek() {
                if classifier::is_digit(ch) || classifier::is_letter(ch) {
                    self.advance();
                } else {
                    break;
                }
            }
            return Token::new(TokenKind::BindParameter, start, self.cursor);
        }
        if let Some(tok) = self.try_scan_json_operator() {
            return tok;
        }
        self.scan_operator()
    }

    /// `#ident` temp tables (MSSQL only); the `#` is part of the span.
    fn scan_temp_table(&mut self) -> Token {
        let start = self.cursor;
        self.advance(); // '#'
        while self.peek().is_some_and(classifier::is_identifier_continue) {
            self.advance();
        }
        Token::new(TokenKind::Ident, start, self.cursor)
    }

    /// Longest-match against [`JSON_OPERATORS`]; returns `None` (leaving the
    /// cursor untouched) if nothing matches, letting the caller fall back to
    /// the generic operator scanner.
    fn try_scan_json_operator(&mut self) -> Option<Token> {
        let start = self.cursor;
        let remaining = &self.src[start..];
        let matched = JSON_OPERATORS
            .iter()
            .filter(|op| remaining.starts_with(**op))
            .max_by_key(|op| op.len())?;
        self.advance_bytes(matched.len());
        Some(Token::new(TokenKind::JsonOp, start, self.cursor))
    }

    fn scan_operator(&mut self) -> Token {
        let start = self.cursor;
        while self.peek().is_some_and(classifier::is_operator_char) {
            // Stop before a byte that would begin a JSON operator, so a run
            // like `->` right after `=` splits into `=` and a JSON_OP token
            // rather than being swallowed whole as one OPERATOR.
            if start != self.cursor && self.at_json_operator_start() {
                break;
            }
            self.advance();
        }
        Token::new(TokenKind::Operator, start, self.cursor)
    }

    fn at_json_operator_start(&self) -> bool {
        let remaining = &self.src[self.cursor..];
        JSON_OPERATORS.iter().any(|op| remaining.starts_with(*op))
    }

    fn scan_punctuation(&mut self) -> Token {
        let start = self.cursor;
        self.advance();
        Token::new(TokenKind::Punctuation, start, self.cursor)
    }

    fn scan_unknown(&mut self) -> Token {
        let start = self.cursor;
        self.advance();
        Token::new(TokenKind::Unknown, start, self.cursor)
    }
}
