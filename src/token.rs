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

//! Token kinds and the zero-copy [`Token`] that the [`crate::lexer::Lexer`] emits.

/// The closed set of token kinds the lexer can produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    Eof,
    Error,
    Space,
    String,
    IncompleteString,
    Number,
    Ident,
    QuotedIdent,
    Operator,
    Wildcard,
    Comment,
    MultilineComment,
    Punctuation,
    DollarQuotedFunction,
    DollarQuotedString,
    PositionalParameter,
    BindParameter,
    Function,
    SystemVariable,
    Keyword,
    Command,
    AliasIndicator,
    ProcIndicator,
    CteIndicator,
    JsonOp,
    Boolean,
    Null,
    Unknown,
}

impl TokenKind {
    /// Whether tokens of this kind are skipped entirely by the normalizer's
    /// metadata collection and whitespace bookkeeping (they are never a
    /// "last value token").
    pub fn is_trivia(self) -> bool {
        matches!(
            self,
            TokenKind::Space | TokenKind::Comment | TokenKind::MultilineComment
        )
    }
}

/// A single lexer token: a tag plus a byte range into the original input.
///
/// Tokens never own a copy of their source text. `start`/`end` are byte
/// offsets such that `input[start..end]` recovers the token's source span;
/// `output_value`, when present, is an owned override the obfuscator or
/// normalizer substitutes in its place when emitting output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub start: usize,
    pub end: usize,
    /// Set on `FROM`, `JOIN`, `INTO`, `UPDATE`, `TABLE`, `EXISTS` (drop-table-if-exists),
    /// `STRAIGHT_JOIN`, `CLONE`, `ONLY` — the tokens after which an identifier names a table.
    pub is_table_indicator: bool,
    /// True iff an identifier-class token's span contains an ASCII digit.
    pub has_digits: bool,
    /// True iff the span includes the enclosing quote/backtick/bracket bytes.
    pub has_quotes: bool,
    /// Owned override substituted for the source slice when emitting this token.
    pub output_value: Option<String>,
}

impl Token {
    pub fn new(kind: TokenKind, start: usize, end: usize) -> Self {
        Token {
            kind,
            start,
            end,
            is_table_indicator: false,
            has_digits: false,
            has_quotes: false,
            output_value: None,
        }
    }

    pub fn eof(at: usize) -> Self {
        Token::new(TokenKind::Eof, at, at)
    }

    /// The token's source text, borrowed from `input`.
    pub fn text<'a>(&self, input: &'a str) -> &'a str {
        &input[self.start..self.end]
    }

    /// The value that should be emitted for this token: `output_value` if the
    /// obfuscator or normalizer has set one, otherwise the raw source slice.
    pub fn value<'a>(&'a self, input: &'a str) -> &'a str {
        self.output_value.as_deref().unwrap_or_else(|| self.text(input))
    }

    pub fn set_output_value(&mut self, value: impl Into<String>) {
        self.output_value = Some(value.into());
    }

    pub fn is_value_token(&self) -> bool {
        !self.kind.is_trivia()
    }
}

/// A compact snapshot of the most recently emitted non-whitespace,
/// non-comment token. This is the entire look-back context the obfuscator
/// and normalizer use; they never look further back than this.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LastValueToken {
    pub kind: Option<TokenKind>,
    pub value: String,
    pub is_table_indicator: bool,
}

impl LastValueToken {
    pub fn from_token(token: &Token, input: &str) -> Self {
        LastValueToken {
            kind: Some(token.kind),
            value: token.value(input).to_string(),
            is_table_indicator: token.is_table_indicator,
        }
    }

    pub fn kind_is(&self, kind: TokenKind) -> bool {
        self.kind == Some(kind)
    }
}
