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

//! A dialect-aware SQL lexer, obfuscator and normalizer for database
//! observability pipelines.
//!
//! Two transformations share one streaming token scan of the input SQL
//! text:
//!
//! - [`obfuscate`] replaces literal values (numbers, strings, booleans,
//!   nulls, bind/positional parameters) with a single `?` placeholder so
//!   that a query can be logged and aggregated safely;
//! - [`normalize`] collapses whitespace, comments, aliases, optional
//!   identifier quoting, and groupable placeholder lists to a canonical
//!   form, and collects a [`StatementMetadata`] record of the commands,
//!   tables, procedures, and comments encountered.
//!
//! [`obfuscate_and_normalize`] performs both in a single pass and is the
//! entry point most callers want.
//!
//! ```
//! use sqllexer::{obfuscate_and_normalize, resolve_dialect, ObfuscatorConfig, NormalizerConfig};
//!
//! let (sql, metadata) = obfuscate_and_normalize(
//!     "SELECT * FROM users WHERE id = 1",
//!     &ObfuscatorConfig::new(),
//!     &NormalizerConfig::new(),
//!     resolve_dialect(None),
//! );
//! assert_eq!(sql, "SELECT * FROM users WHERE id = ?");
//! assert_eq!(metadata.tables, vec!["users".to_string()]);
//! ```

pub mod classifier;
pub mod dialect;
pub mod driver;
pub mod error;
pub mod lexer;
pub mod normalizer;
pub mod obfuscator;
pub mod token;

pub use dialect::{dialect_from_name, Dialect};
pub use driver::{obfuscate, normalize, obfuscate_and_normalize};
pub use error::Error;
pub use lexer::Lexer;
pub use normalizer::{Normalizer, NormalizerConfig, StatementMetadata};
pub use obfuscator::{Obfuscator, ObfuscatorConfig};
pub use token::{LastValueToken, Token, TokenKind};

/// Resolve an optional `dbms` setting string to its dialect. `None` or an
/// unrecognized name resolves to the generic dialect, the intersection of
/// rules safe across every supported DBMS.
pub fn resolve_dialect(dbms: Option<&str>) -> &'static dyn Dialect {
    dialect_from_name(dbms.unwrap_or(""))
}
