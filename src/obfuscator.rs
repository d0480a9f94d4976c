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

//! Per-token obfuscation: substituting `?` for literal values.
//!
//! [`Obfuscator::obfuscate_token`] is a pure function of `(token.kind,
//! last_value_token)` and the configured flags. It never looks at
//! surrounding tokens beyond the single look-back the caller hands it, and
//! it never fails — a token it doesn't recognize passes through unchanged.

use crate::classifier;
use crate::dialect::Dialect;
use crate::normalizer::NormalizerConfig;
use crate::token::{LastValueToken, Token, TokenKind};

const PLACEHOLDER: &str = "?";

/// Obfuscator configuration, built through chainable `with_*` setters.
///
/// All flags default to the conservative "obfuscate everything" posture
/// except `dollar_quoted_func` and `keep_json_path`, which default to
/// `false`: recursing into function bodies and preserving JSON paths are
/// opt-in behaviors a caller reaches for deliberately.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ObfuscatorConfig {
    pub replace_digits: bool,
    pub replace_positional_parameter: bool,
    pub replace_bind_parameter: bool,
    pub replace_boolean: bool,
    pub replace_null: bool,
    pub dollar_quoted_func: bool,
    pub keep_json_path: bool,
}

impl Default for ObfuscatorConfig {
    fn default() -> Self {
        ObfuscatorConfig {
            replace_digits: false,
            replace_positional_parameter: true,
            replace_bind_parameter: true,
            replace_boolean: true,
            replace_null: true,
            dollar_quoted_func: false,
            keep_json_path: false,
        }
    }
}

impl ObfuscatorConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_replace_digits(mut self, value: bool) -> Self {
        self.replace_digits = value;
        self
    }

    pub fn with_replace_positional_parameter(mut self, value: bool) -> Self {
        self.replace_positional_parameter = value;
        self
    }

    pub fn with_replace_bind_parameter(mut self, value: bool) -> Self {
        self.replace_bind_parameter = value;
        self
    }

    pub fn with_replace_boolean(mut self, value: bool) -> Self {
        self.replace_boolean = value;
        self
    }

    pub fn with_replace_null(mut self, value: bool) -> Self {
        self.replace_null = value;
        self
    }

    pub fn with_dollar_quoted_func(mut self, value: bool) -> Self {
        self.dollar_quoted_func = value;
        self
    }

    pub fn with_keep_json_path(mut self, value: bool) -> Self {
        self.keep_json_path = value;
        self
    }
}

pub struct Obfuscator<'a> {
    config: &'a ObfuscatorConfig,
    dialect: &'static dyn Dialect,
}

impl<'a> Obfuscator<'a> {
    pub fn new(config: &'a ObfuscatorConfig, dialect: &'static dyn Dialect) -> Self {
        Obfuscator { config, dialect }
    }

    /// Obfuscate `token` in place against `input`, consulting `last` for the
    /// single token of look-back context this component is allowed.
    pub fn obfuscate_token(&self, token: &mut Token, input: &str, last: &LastValueToken) {
        match token.kind {
            TokenKind::Number => {
                if !(self.config.keep_json_path && last.kind_is(TokenKind::JsonOp)) {
                    token.set_output_value(PLACEHOLDER);
                }
            }
            TokenKind::String | TokenKind::IncompleteString | TokenKind::DollarQuotedString => {
                if !(self.config.keep_json_path && last.kind_is(TokenKind::JsonOp)) {
                    token.set_output_value(PLACEHOLDER);
                }
            }
            TokenKind::DollarQuotedFunction => self.obfuscate_dollar_quoted_function(token, input),
            TokenKind::PositionalParameter => {
                if self.config.replace_positional_parameter {
                    token.set_output_value(PLACEHOLDER);
                }
            }
            TokenKind::BindParameter => {
                if self.config.replace_bind_parameter {
                    token.set_output_value(PLACEHOLDER);
                }
            }
            TokenKind::Boolean => {
                if self.config.replace_boolean {
                    token.set_output_value(PLACEHOLDER);
                }
            }
            TokenKind::Null => {
                if self.config.replace_null {
                    token.set_output_value(PLACEHOLDER);
                }
            }
            TokenKind::Ident | TokenKind::QuotedIdent => {
                if self.config.replace_digits && token.has_digits {
                    let replaced = replace_digits(token.text(input), PLACEHOLDER);
                    token.set_output_value(replaced);
                }
            }
            _ => {}
        }
    }

    /// `$func$...$func$` bodies are either replaced wholesale or recursively
    /// obfuscated *and normalized* with the same options, then re-wrapped.
    fn obfuscate_dollar_quoted_function(&self, token: &mut Token, input: &str) {
        if !self.config.dollar_quoted_func {
            token.set_output_value(PLACEHOLDER);
            return;
        }
        let text = token.text(input);
        let Some(body) = text.strip_prefix("$func$").and_then(|s| s.strip_suffix("$func$")) else {
            token.set_output_value(PLACEHOLDER);
            return;
        };

        let normalizer_config = NormalizerConfig::new();
        let (normalized, _metadata) =
            crate::driver::obfuscate_and_normalize(body, self.config, &normalizer_config, self.dialect);

        token.set_output_value(format!("$func${normalized}$func$"));
    }
}

/// Replace every maximal run of ASCII digits in `input` with `placeholder`,
/// leaving everything else untouched.
pub fn replace_digits(input: &str, placeholder: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut run_start: Option<usize> = None;

    for (i, ch) in input.char_indices() {
        if classifier::is_digit(ch) {
            if run_start.is_none() {
                run_start = Some(i);
            }
        } else {
            if run_start.is_some() {
                out.push_str(placeholder);
                run_start = None;
            }
            out.push(ch);
        }
    }
    if run_start.is_some() {
        out.push_str(placeholder);
    }
    out
}
