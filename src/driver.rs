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

//! Entry points that drive a [`Lexer`] to completion through the
//! obfuscator, the normalizer, or both at once.
//!
//! Running both components together is not "obfuscate, then re-lex, then
//! normalize" — it is a single pass in which each token is obfuscated and
//! then immediately handed to the normalizer, sharing one
//! [`LastValueToken`] between the two. That shared value is what lets the
//! normalizer's metadata collection see `?` and `NULL` placeholders the
//! obfuscator just produced rather than the original literals.

use crate::lexer::Lexer;
use crate::normalizer::{Normalizer, NormalizerConfig, StatementMetadata};
use crate::obfuscator::{Obfuscator, ObfuscatorConfig};
use crate::token::{LastValueToken, TokenKind};

/// Replace literal values with `?` throughout `input`, tokenizing with
/// `dialect`. The result is the obfuscated SQL text.
pub fn obfuscate(input: &str, config: &ObfuscatorConfig, dialect: &'static dyn crate::dialect::Dialect) -> String {
    let mut lexer = Lexer::new(input, dialect);
    let obfuscator = Obfuscator::new(config, dialect);
    let mut last = LastValueToken::default();
    let mut out = String::with_capacity(input.len());

    loop {
        let mut token = lexer.scan();
        if token.kind == TokenKind::Eof {
            break;
        }
        obfuscator.obfuscate_token(&mut token, input, &last);
        out.push_str(token.value(input));
        if token.is_value_token() {
            last = LastValueToken::from_token(&token, input);
        }
    }
    out.trim().to_string()
}

/// Collapse whitespace, discard aliases, fold placeholder lists, and
/// collect [`StatementMetadata`] over `input` without obfuscating literals.
pub fn normalize(
    input: &str,
    config: &NormalizerConfig,
    dialect: &'static dyn crate::dialect::Dialect,
) -> (String, StatementMetadata) {
    let mut lexer = Lexer::new(input, dialect);
    let mut normalizer = Normalizer::new(config, input);

    loop {
        let mut token = lexer.scan();
        if token.kind == TokenKind::Eof {
            break;
        }
        normalizer.process(&mut token);
    }
    normalizer.finish()
}

/// Obfuscate and normalize `input` in a single pass, sharing one
/// [`LastValueToken`] between the two components.
pub fn obfuscate_and_normalize(
    input: &str,
    obfuscator_config: &ObfuscatorConfig,
    normalizer_config: &NormalizerConfig,
    dialect: &'static dyn crate::dialect::Dialect,
) -> (String, StatementMetadata) {
    let mut lexer = Lexer::new(input, dialect);
    let obfuscator = Obfuscator::new(obfuscator_config, dialect);
    let mut normalizer = Normalizer::new(normalizer_config, input);
    let mut last = LastValueToken::default();

    loop {
        let mut token = lexer.scan();
        if token.kind == TokenKind::Eof {
            break;
        }
        obfuscator.obfuscate_token(&mut token, input, &last);
        if token.is_value_token() {
            last = LastValueToken::from_token(&token, input);
        }
        normalizer.process(&mut token);
    }
    normalizer.finish()
}
