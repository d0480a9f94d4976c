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

//! Character predicates and the case-insensitive keyword trie.
//!
//! The trie is built once, at first use, from the keyword tables below and
//! answers a single question per identifier: "what [`TokenKind`] is this,
//! and does it mark the next identifier as a table name?". A single walk
//! over the identifier's bytes reports both, rather than separate lookups
//! into several maps.

use once_cell::sync::Lazy;
use std::collections::HashMap;

use crate::token::TokenKind;

// ---------------------------------------------------------------------
// Character predicates
// ---------------------------------------------------------------------

pub fn is_whitespace(ch: char) -> bool {
    ch == ' ' || ch == '\t' || ch == '\n' || ch == '\r'
}

pub fn is_digit(ch: char) -> bool {
    ch.is_ascii_digit()
}

pub fn is_ascii_letter(ch: char) -> bool {
    ch.is_ascii_alphabetic() || ch == '_'
}

/// Fast ASCII path first, falling back to full Unicode classification so
/// that quoted and unquoted identifiers in non-English scripts still scan
/// as a single IDENT token rather than UNKNOWN run-of-one.
pub fn is_letter(ch: char) -> bool {
    if ch.is_ascii() {
        is_ascii_letter(ch)
    } else {
        ch.is_alphabetic()
    }
}

/// `identifier-continue`: letter, digit, `_`, `.`, `?`, `$`, `#`, `/`, `@`, `!`.
pub fn is_identifier_continue(ch: char) -> bool {
    is_letter(ch)
        || is_digit(ch)
        || matches!(ch, '.' | '?' | '$' | '#' | '/' | '@' | '!')
}

pub fn is_operator_char(ch: char) -> bool {
    matches!(
        ch,
        '+' | '-' | '*' | '/' | '=' | '<' | '>' | '!' | '&' | '|' | '^' | '%' | '~' | '?' | '@' | ':' | '#'
    )
}

pub fn is_punctuation_char(ch: char) -> bool {
    matches!(ch, '(' | ')' | ',' | ';' | '.' | ':' | '[' | ']' | '{' | '}')
}

pub fn is_exponent_marker(ch: char) -> bool {
    ch == 'e' || ch == 'E'
}

pub fn is_leading_sign(ch: char) -> bool {
    ch == '+' || ch == '-'
}

pub fn is_single_quote(ch: char) -> bool {
    ch == '\''
}

pub fn is_double_quote(ch: char) -> bool {
    ch == '"'
}

pub fn is_wildcard(ch: char) -> bool {
    ch == '*'
}

/// The longest-match JSON operator set, checked before the generic operator
/// scanner takes over. Kept as a plain ordered slice: there are few enough
/// entries that a linear longest-match scan beats building a second trie.
pub const JSON_OPERATORS: &[&str] = &[
    "->>", "#>>", "->", "#>", "@?", "@@", "?|", "?&", "@>", "<@", "#-",
];

// ---------------------------------------------------------------------
// Keyword trie
// ---------------------------------------------------------------------

/// Defines a keyword list as an array of uppercase `&'static str` constants,
/// keyed to the behavior this lexer needs per word instead of a parser's
/// keyword enum.
macro_rules! keyword_set {
    ($name:ident = [$($word:expr),* $(,)?]) => {
        const $name: &[&str] = &[$($word),*];
    };
}

// Commands: table-indicator commands are the subset in TABLE_INDICATOR_COMMANDS.
keyword_set!(COMMANDS = [
    "SELECT", "INSERT", "UPDATE", "DELETE", "CREATE", "ALTER", "DROP", "JOIN",
    "GRANT", "REVOKE", "COMMIT", "BEGIN", "TRUNCATE", "MERGE", "EXECUTE", "EXEC",
    "EXPLAIN", "STRAIGHT_JOIN", "USE", "CLONE",
]);

keyword_set!(TABLE_INDICATOR_COMMANDS = ["JOIN", "UPDATE", "STRAIGHT_JOIN", "CLONE"]);

keyword_set!(KEYWORDS = [
    "SELECT", "INSERT", "UPDATE", "DELETE", "CREATE", "ALTER", "DROP", "GRANT", "REVOKE",
    "ADD", "ALL", "AND", "ANY", "AS", "ASC", "BEGIN", "BETWEEN", "BY", "CASE", "CHECK",
    "COLUMN", "COMMIT", "CONSTRAINT", "DATABASE", "DECLARE", "DEFAULT", "DESC", "DISTINCT",
    "ELSE", "END", "EXEC", "EXISTS", "FOREIGN", "FROM", "GROUP", "HAVING", "IN", "INDEX",
    "INNER", "INTO", "IS", "JOIN", "KEY", "LEFT", "LIKE", "LIMIT", "NOT", "ON", "OR",
    "ORDER", "OUTER", "PRIMARY", "PROCEDURE", "REPLACE", "RETURNS", "RIGHT", "ROLLBACK",
    "ROWNUM", "SET", "SOME", "TABLE", "TOP", "TRUNCATE", "UNION", "UNIQUE", "USE", "VALUES",
    "VIEW", "WHERE", "CUBE", "ROLLUP", "LITERAL", "WINDOW", "VACUUM", "ANALYZE", "ILIKE",
    "USING", "ASSERTION", "DOMAIN", "CLUSTER", "COPY", "EXPLAIN", "PLPGSQL", "TRIGGER",
    "TEMPORARY", "UNLOGGED", "RECURSIVE", "RETURNING", "OFFSET", "OF", "SKIP", "IF", "ONLY",
]);

keyword_set!(TABLE_INDICATOR_KEYWORDS = ["FROM", "INTO", "TABLE", "EXISTS", "ONLY"]);

keyword_set!(BOOLEANS = ["TRUE", "FALSE"]);
keyword_set!(NULLS = ["NULL"]);
keyword_set!(PROC_INDICATORS = ["PROCEDURE", "PROC"]);
keyword_set!(CTE_INDICATORS = ["WITH"]);
keyword_set!(ALIAS_INDICATORS = ["AS"]);

#[derive(Debug, Clone, Copy)]
struct Terminal {
    kind: TokenKind,
    is_table_indicator: bool,
}

#[derive(Debug, Default)]
struct TrieNode {
    children: HashMap<u8, TrieNode>,
    terminal: Option<Terminal>,
}

impl TrieNode {
    fn insert(&mut self, word: &str, terminal: Terminal) {
        let mut node = self;
        for byte in word.bytes() {
            debug_assert!(byte.is_ascii_uppercase() || byte == b'_');
            node = node.children.entry(byte).or_default();
        }
        node.terminal = Some(terminal);
    }
}

struct KeywordTrie {
    root: TrieNode,
}

impl KeywordTrie {
    fn build() -> Self {
        let mut root = TrieNode::default();

        let insert_all = |root: &mut TrieNode, words: &[&str], kind: TokenKind, table_words: &[&str]| {
            for &word in words {
                root.insert(
                    word,
                    Terminal {
                        kind,
                        is_table_indicator: table_words.contains(&word),
                    },
                );
            }
        };

        // COMMANDS and KEYWORDS overlap (e.g. SELECT, JOIN, UPDATE appear in
        // both): insert KEYWORDS first so the COMMANDS pass, which runs
        // last, wins the terminal kind/table-indicator for shared words.
        insert_all(&mut root, KEYWORDS, TokenKind::Keyword, TABLE_INDICATOR_KEYWORDS);
        insert_all(&mut root, COMMANDS, TokenKind::Command, TABLE_INDICATOR_COMMANDS);
        insert_all(&mut root, BOOLEANS, TokenKind::Boolean, &[]);
        insert_all(&mut root, NULLS, TokenKind::Null, &[]);
        insert_all(&mut root, PROC_INDICATORS, TokenKind::ProcIndicator, &[]);
        insert_all(&mut root, CTE_INDICATORS, TokenKind::CteIndicator, &[]);
        insert_all(&mut root, ALIAS_INDICATORS, TokenKind::AliasIndicator, &[]);

        KeywordTrie { root }
    }

    /// Walk `word` uppercasing each byte as it goes; returns the terminal's
    /// attributes iff the walk ends exactly on a terminal node (no partial
    /// matches, no trailing unconsumed bytes).
    fn classify(&self, word: &str) -> Option<Terminal> {
        if !word.is_ascii() {
            return None;
        }
        let mut node = &self.root;
        for byte in word.bytes() {
            node = node.children.get(&byte.to_ascii_uppercase())?;
        }
        node.terminal
    }
}

static TRIE: Lazy<KeywordTrie> = Lazy::new(KeywordTrie::build);

/// Classify an already-scanned identifier span. Returns `(kind,
/// is_table_indicator)`; `kind` is [`TokenKind::Ident`] for anything the
/// trie doesn't recognize.
pub fn classify_identifier(word: &str) -> (TokenKind, bool) {
    match TRIE.classify(word) {
        Some(terminal) => (terminal.kind, terminal.is_table_indicator),
        None => (TokenKind::Ident, false),
    }
}
