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

//! The crate's one fallible boundary.
//!
//! [`Lexer`](crate::lexer::Lexer), [`Obfuscator`](crate::obfuscator::Obfuscator) and
//! [`Normalizer`](crate::normalizer::Normalizer) never fail: any malformed
//! input surfaces as an `ERROR`/`INCOMPLETE_STRING`/`UNKNOWN` token rather
//! than an `Err`. [`Error`] exists for the layer above the core — today,
//! the CLI's file I/O, argument validation, and metadata serialization.

use thiserror::Error as ThisError;

#[derive(ThisError, Debug)]
pub enum Error {
    #[error("failed to read input: {0}")]
    Read(#[source] std::io::Error),

    #[error("failed to write output: {0}")]
    Write(#[source] std::io::Error),

    #[error("unrecognized subcommand: {0}")]
    UnknownCommand(String),

    #[error("failed to serialize metadata: {0}")]
    #[cfg(feature = "cli")]
    Serialize(#[source] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
