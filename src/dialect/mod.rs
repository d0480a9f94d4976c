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

//! Dialect switches consulted by the [`crate::lexer::Lexer`].
//!
//! A `Dialect` never participates in parsing; it only toggles which of the
//! lexer's dialect-specific sub-scanners are reachable (bracket quoting,
//! backtick quoting, `#` line comments, `#temp` tables, dollar quoting,
//! positional/bind parameter syntax). The generic dialect is the
//! intersection of rules that is safe across every supported DBMS.

mod generic;
mod mssql;
mod mysql;
mod oracle;
mod postgresql;
mod snowflake;
mod sqlite;

pub use generic::GenericDialect;
pub use mssql::MsSqlDialect;
pub use mysql::MySqlDialect;
pub use oracle::OracleDialect;
pub use postgresql::PostgreSqlDialect;
pub use snowflake::SnowflakeDialect;
pub use sqlite::SqliteDialect;

/// Dialect-dependent lexing rules.
///
/// Every method has a default matching the generic dialect, so a new
/// dialect only needs to override what actually differs from it.
pub trait Dialect: std::fmt::Debug + Sync {
    /// `dbms` name this dialect answers to, e.g. `"postgresql"`.
    fn name(&self) -> &'static str;

    /// MySQL backtick-quoted identifiers: `` `col` ``.
    fn supports_backtick_quoted_identifier(&self) -> bool {
        false
    }

    /// MS SQL Server bracket-quoted identifiers: `[col]`.
    fn supports_bracket_quoted_identifier(&self) -> bool {
        false
    }

    /// MySQL `#` end-of-line comments (distinct from `#temp` tables).
    fn supports_hash_comment(&self) -> bool {
        false
    }

    /// MS SQL Server `#temp`/`##global_temp` identifier prefix.
    fn supports_temp_table_prefix(&self) -> bool {
        false
    }

    /// PostgreSQL/Snowflake `$tag$...$tag$` dollar-quoted strings and
    /// functions (the reserved `$func$` tag).
    fn supports_dollar_quoting(&self) -> bool {
        false
    }

    /// `@name`/`@@name` bind parameters and system variables (MS SQL Server
    /// and, for plain `@name` bind parameters, several others).
    fn supports_at_bind_parameter(&self) -> bool {
        false
    }
}

/// Resolve a `dbms` setting string to its dialect, canonicalising the
/// documented aliases (`sql-server`/`sqlserver` -> mssql, `postgres` ->
/// postgresql). An empty or unrecognized value resolves to the generic
/// dialect.
pub fn dialect_from_name(name: &str) -> &'static dyn Dialect {
    match name {
        "mssql" | "sql-server" | "sqlserver" => &MsSqlDialect,
        "postgresql" | "postgres" => &PostgreSqlDialect,
        "mysql" => &MySqlDialect,
        "oracle" => &OracleDialect,
        "snowflake" => &SnowflakeDialect,
        "sqlite" => &SqliteDialect,
        _ => &GenericDialect,
    }
}
