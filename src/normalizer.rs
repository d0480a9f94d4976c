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

//! Normalization: whitespace collapsing, metadata collection, alias
//! discarding, and placeholder-list folding over an (optionally already
//! obfuscated) token stream.
//!
//! Like the obfuscator, the normalizer only ever looks back one
//! [`LastValueToken`]. Everything else it needs — whether it is inside a
//! groupable placeholder list, whether a leading `(...)` should be hoisted —
//! is folded into a handful of `bool`/`Option` fields on [`Normalizer`]
//! itself, so a single forward pass over the token stream is enough.

use std::collections::HashSet;

use itertools::Itertools;

use crate::token::{LastValueToken, Token, TokenKind};

/// Normalizer configuration, built through chainable `with_*` setters.
///
/// The collection flags default to `true` (metadata is cheap to gather and
/// callers can ignore it); the rewriting flags default to the more
/// conservative, least-surprising form.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct NormalizerConfig {
    pub collect_tables: bool,
    pub collect_commands: bool,
    pub collect_comments: bool,
    pub collect_procedures: bool,
    pub keep_sql_alias: bool,
    pub uppercase_keywords: bool,
    pub remove_space_between_parentheses: bool,
    pub keep_trailing_semicolon: bool,
    pub keep_identifier_quotation: bool,
}

impl Default for NormalizerConfig {
    fn default() -> Self {
        NormalizerConfig {
            collect_tables: true,
            collect_commands: true,
            collect_comments: true,
            collect_procedures: true,
            keep_sql_alias: false,
            uppercase_keywords: false,
            remove_space_between_parentheses: false,
            keep_trailing_semicolon: false,
            keep_identifier_quotation: false,
        }
    }
}

impl NormalizerConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_collect_tables(mut self, value: bool) -> Self {
        self.collect_tables = value;
        self
    }

    pub fn with_collect_commands(mut self, value: bool) -> Self {
        self.collect_commands = value;
        self
    }

    pub fn with_collect_comments(mut self, value: bool) -> Self {
        self.collect_comments = value;
        self
    }

    pub fn with_collect_procedures(mut self, value: bool) -> Self {
        self.collect_procedures = value;
        self
    }

    pub fn with_keep_sql_alias(mut self, value: bool) -> Self {
        self.keep_sql_alias = value;
        self
    }

    pub fn with_uppercase_keywords(mut self, value: bool) -> Self {
        self.uppercase_keywords = value;
        self
    }

    pub fn with_remove_space_between_parentheses(mut self, value: bool) -> Self {
        self.remove_space_between_parentheses = value;
        self
    }

    pub fn with_keep_trailing_semicolon(mut self, value: bool) -> Self {
        self.keep_trailing_semicolon = value;
        self
    }

    pub fn with_keep_identifier_quotation(mut self, value: bool) -> Self {
        self.keep_identifier_quotation = value;
        self
    }
}

/// Deduplicated, order-preserving metadata gathered while normalizing one
/// statement, plus a `size` used by callers for quota accounting.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatementMetadata {
    pub tables: Vec<String>,
    pub comments: Vec<String>,
    pub commands: Vec<String>,
    pub procedures: Vec<String>,
    pub size: usize,
}

impl StatementMetadata {
    fn finalize(&mut self) {
        self.tables = self.tables.drain(..).unique().collect();
        self.comments = self.comments.drain(..).unique().collect();
        self.commands = self.commands.drain(..).unique().collect();
        self.procedures = self.procedures.drain(..).unique().collect();
        self.size = self
            .tables
            .iter()
            .chain(self.comments.iter())
            .chain(self.commands.iter())
            .chain(self.procedures.iter())
            .map(|s| s.len())
            .sum();
    }
}

/// A statement that opens with a redundant `(...)` wrap around the whole
/// thing (some drivers send `(SELECT ...)`) needs no special buffering: every
/// token, including the ones inside that leading group, already runs through
/// the normal alias/fold/emit pipeline below and lands in `out` with its
/// normalized spacing. Whether or not real content follows the group's close
/// is irrelevant to what ends up in `out` — there is no separate "verbatim"
/// rendering to splice back in, since the per-token emission already wrote
/// the normalized form for that span.
#[derive(Debug, Default)]
struct GroupableState {
    active: bool,
    pending_comma: bool,
}

pub struct Normalizer<'cfg, 'src> {
    config: &'cfg NormalizerConfig,
    input: &'src str,
    last_value_token: LastValueToken,
    ctes: HashSet<String>,
    groupable: GroupableState,
    pending_alias: bool,
    metadata: StatementMetadata,
    out: String,
}

impl<'cfg, 'src> Normalizer<'cfg, 'src> {
    pub fn new(config: &'cfg NormalizerConfig, input: &'src str) -> Self {
        Normalizer {
            config,
            input,
            last_value_token: LastValueToken::default(),
            ctes: HashSet::new(),
            groupable: GroupableState::default(),
            pending_alias: false,
            metadata: StatementMetadata::default(),
            out: String::with_capacity(input.len()),
        }
    }

    pub fn last_value_token(&self) -> &LastValueToken {
        &self.last_value_token
    }

    /// Feed one token through the normalizer. `token.value(input)` (the
    /// obfuscator's substitution, if any, else the raw source slice) is
    /// what gets emitted and what metadata collection inspects.
    ///
    /// Takes `token` by unique reference because, when
    /// `keep_identifier_quotation` is false, a `QUOTED_IDENT` gets its
    /// `output_value` set here to the delimiter-stripped dotted name — the
    /// same substitution mechanism the obfuscator uses for `?` — so the
    /// stripped form is what both metadata collection and emission see.
    pub fn process(&mut self, token: &mut Token) {
        if token.kind == TokenKind::Eof {
            return;
        }

        if token.kind == TokenKind::QuotedIdent && !self.config.keep_identifier_quotation {
            // Strip quotes from whatever the obfuscator already substituted
            // (e.g. a digit-replaced quoted identifier), not the raw source
            // text, so the two substitutions compose instead of one
            // clobbering the other.
            let stripped = trim_quotes(token.value(self.input));
            token.set_output_value(stripped);
        }

        self.collect_metadata(token);

        // Whitespace and comments are never emitted: spacing between real
        // tokens is synthesized by `write_space_before`, and comments are
        // stripped from the normalized output entirely (their text only
        // ever reaches `metadata.comments`).
        if token.kind.is_trivia() {
            return;
        }

        if !self.config.keep_sql_alias && self.discard_alias(token) {
            self.update_last_value_token(token);
            return;
        }

        if self.fold_groupable_placeholder(token) {
            self.update_last_value_token(token);
            return;
        }

        self.emit(token);
        self.update_last_value_token(token);
    }

    /// Finish the statement: trim trailing whitespace/semicolon and
    /// deduplicate metadata. Returns the finished normalized string.
    pub fn finish(mut self) -> (String, StatementMetadata) {
        let mut trimmed = self.out.trim_end().to_string();
        if !self.config.keep_trailing_semicolon && trimmed.ends_with(';') {
            trimmed.pop();
            trimmed = trimmed.trim_end().to_string();
        }

        self.metadata.finalize();
        (trimmed, self.metadata)
    }

    fn collect_metadata(&mut self, token: &Token) {
        match token.kind {
            TokenKind::Comment | TokenKind::MultilineComment => {
                if self.config.collect_comments {
                    self.metadata.comments.push(token.text(self.input).to_string());
                }
            }
            TokenKind::Command => {
                if self.config.collect_commands {
                    self.metadata.commands.push(token.text(self.input).to_uppercase());
                }
            }
            TokenKind::Ident | TokenKind::QuotedIdent | TokenKind::Function => {
                let name = token.value(self.input).to_string();
                if self.last_value_token.kind_is(TokenKind::CteIndicator) {
                    self.ctes.insert(name);
                } else if self.last_value_token.is_table_indicator {
                    if self.config.collect_tables && !self.ctes.contains(&name) {
                        self.metadata.tables.push(name);
                    }
                } else if self.last_value_token.kind_is(TokenKind::ProcIndicator)
                    && self.config.collect_procedures
                {
                    self.metadata.procedures.push(name);
                }
            }
            _ => {}
        }
    }

    /// Returns `true` iff the token was fully consumed by alias handling
    /// (and must not be emitted or folded further).
    fn discard_alias(&mut self, token: &Token) -> bool {
        if token.kind == TokenKind::AliasIndicator {
            self.pending_alias = true;
            return true;
        }
        if self.pending_alias {
            self.pending_alias = false;
            if token.kind == TokenKind::Ident || token.kind == TokenKind::QuotedIdent {
                return true;
            }
            // Not an identifier (e.g. the `(` of `WITH x AS (...)`): replay
            // the buffered alias indicator's own source text before falling
            // through to emit this token, so `as`/`As`/`AS` keeps its
            // original case (it's an ALIAS_INDICATOR, not a KEYWORD, so
            // `uppercase_keywords` must not touch it either).
            let alias_text = self.last_value_token.value.clone();
            self.write_space_before(&alias_text);
            self.out.push_str(&alias_text);
        }
        false
    }

    /// Folds `(?, ?, ?)`-shaped lists down to `(?)`. Returns `true` iff the
    /// token was consumed by the fold (skipped or already emitted here).
    ///
    /// Keyed on the token's *emitted value* being `?`, not its `TokenKind`:
    /// an obfuscated `NUMBER`/`STRING`/`BOOLEAN`/... literal keeps its
    /// original kind and only gets `output_value` set to the placeholder,
    /// so kind-gating here would miss every obfuscated literal and only
    /// fold a literal `?` bind-marker written directly in the source.
    fn fold_groupable_placeholder(&mut self, token: &Token) -> bool {
        let prev_is_open = matches!(self.last_value_token.value.as_str(), "(" | "[");
        let prev_is_placeholder = self.last_value_token.value == "?";
        let value = token.value(self.input);

        if value == "?" {
            if prev_is_open {
                self.groupable.active = true;
                self.groupable.pending_comma = false;
                self.emit(token);
                return true;
            }
            if self.groupable.active && self.groupable.pending_comma {
                self.groupable.pending_comma = false;
                return true;
            }
            return false;
        }

        if token.kind == TokenKind::Punctuation && value == "," {
            if self.groupable.active && prev_is_placeholder {
                self.groupable.pending_comma = true;
                return true;
            }
            return false;
        }

        if token.kind == TokenKind::Punctuation && matches!(value, ")" | "]") {
            self.groupable.active = false;
            self.groupable.pending_comma = false;
            return false;
        }

        if self.groupable.active && self.groupable.pending_comma {
            self.groupable.pending_comma = false;
            self.out.push(',');
        }
        false
    }

    fn emit(&mut self, token: &Token) {
        let text = token.value(self.input);
        self.write_space_before(text);
        if self.config.uppercase_keywords && matches!(token.kind, TokenKind::Command | TokenKind::Keyword) {
            self.out.push_str(&text.to_uppercase());
        } else {
            self.out.push_str(text);
        }
    }

    fn write_space_before(&mut self, value: &str) {
        if self.out.is_empty() {
            return;
        }
        if matches!(value, "," | ";") {
            return;
        }
        if value == "=" && self.last_value_token.value == ":" {
            return;
        }
        if self.config.remove_space_between_parentheses {
            let prev_is_paren_open = matches!(self.last_value_token.value.as_str(), "(" | "[")
                || self.last_value_token.kind_is(TokenKind::Function);
            let cur_is_paren_close = matches!(value, ")" | "]");
            if prev_is_paren_open || cur_is_paren_close {
                return;
            }
        }
        self.out.push(' ');
    }

    fn update_last_value_token(&mut self, token: &Token) {
        if token.is_value_token() {
            self.last_value_token = LastValueToken::from_token(token, self.input);
        }
    }
}

/// Strip delimiter bytes (`"`, `` ` ``, `[`/`]`) throughout the span,
/// including at dotted-chain boundaries (`"a"."b"` -> `a.b`).
pub fn trim_quotes(input: &str) -> String {
    input
        .chars()
        .filter(|&c| !matches!(c, '"' | '`' | '[' | ']'))
        .collect()
}
