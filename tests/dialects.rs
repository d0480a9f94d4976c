//! Dialect resolution and dialect-gated lexing: quoting styles, comment
//! markers, bind parameters, and temp-table prefixes that only a subset of
//! dialects recognize.

use pretty_assertions::assert_eq;

use sqllexer::dialect::{
    GenericDialect, MsSqlDialect, MySqlDialect, OracleDialect, PostgreSqlDialect, SnowflakeDialect,
    SqliteDialect,
};
use sqllexer::{dialect_from_name, Lexer, TokenKind};

fn kinds(input: &str, dialect: &'static dyn sqllexer::Dialect) -> Vec<TokenKind> {
    let mut lexer = Lexer::new(input, dialect);
    let mut out = Vec::new();
    loop {
        let token = lexer.scan();
        if token.kind == TokenKind::Eof {
            break;
        }
        out.push(token.kind);
    }
    out
}

#[test]
fn resolves_canonical_names() {
    assert_eq!(dialect_from_name("mssql").name(), "mssql");
    assert_eq!(dialect_from_name("postgresql").name(), "postgresql");
    assert_eq!(dialect_from_name("mysql").name(), "mysql");
    assert_eq!(dialect_from_name("oracle").name(), "oracle");
    assert_eq!(dialect_from_name("snowflake").name(), "snowflake");
    assert_eq!(dialect_from_name("sqlite").name(), "sqlite");
    assert_eq!(dialect_from_name("").name(), "generic");
}

#[test]
fn resolves_documented_aliases() {
    assert_eq!(dialect_from_name("sql-server").name(), "mssql");
    assert_eq!(dialect_from_name("sqlserver").name(), "mssql");
    assert_eq!(dialect_from_name("postgres").name(), "postgresql");
}

#[test]
fn unrecognized_name_falls_back_to_generic() {
    assert_eq!(dialect_from_name("db2").name(), "generic");
}

#[test]
fn backtick_quoting_is_mysql_and_sqlite_only() {
    static MYSQL: MySqlDialect = MySqlDialect;
    static SQLITE: SqliteDialect = SqliteDialect;
    static GENERIC: GenericDialect = GenericDialect;

    assert_eq!(kinds("`col`", &MYSQL), vec![TokenKind::QuotedIdent]);
    assert_eq!(kinds("`col`", &SQLITE), vec![TokenKind::QuotedIdent]);

    // Generic dialect doesn't recognize the backtick at all: it scans one
    // byte at a time as UNKNOWN rather than a delimited identifier.
    let generic_kinds = kinds("`col`", &GENERIC);
    assert!(generic_kinds.iter().all(|k| *k != TokenKind::QuotedIdent));
}

#[test]
fn bracket_quoting_is_mssql_and_sqlite_only() {
    static MSSQL: MsSqlDialect = MsSqlDialect;
    static SQLITE: SqliteDialect = SqliteDialect;
    static POSTGRES: PostgreSqlDialect = PostgreSqlDialect;

    assert_eq!(kinds("[col]", &MSSQL), vec![TokenKind::QuotedIdent]);
    assert_eq!(kinds("[col]", &SQLITE), vec![TokenKind::QuotedIdent]);

    // Without bracket-quoting support, `[` and `]` are plain punctuation.
    assert_eq!(
        kinds("[col]", &POSTGRES),
        vec![TokenKind::Punctuation, TokenKind::Ident, TokenKind::Punctuation]
    );
}

#[test]
fn dotted_bracket_identifier_chain_scans_as_one_token() {
    static MSSQL: MsSqlDialect = MsSqlDialect;
    assert_eq!(kinds("[dbo].[users]", &MSSQL), vec![TokenKind::QuotedIdent]);
}

#[test]
fn hash_comment_is_mysql_only() {
    static MYSQL: MySqlDialect = MySqlDialect;
    static GENERIC: GenericDialect = GenericDialect;

    assert_eq!(kinds("# a comment\nSELECT 1", &MYSQL)[0], TokenKind::Comment);

    // Without hash-comment or temp-table support, a leading bare `#` falls
    // through to the operator scanner instead of starting a comment.
    assert_ne!(kinds("#x", &GENERIC)[0], TokenKind::Comment);
}

#[test]
fn temp_table_prefix_is_mssql_only() {
    static MSSQL: MsSqlDialect = MsSqlDialect;
    static GENERIC: GenericDialect = GenericDialect;

    assert_eq!(kinds("#temp", &MSSQL), vec![TokenKind::Ident]);

    // The generic dialect has neither hash-comment nor temp-table support
    // for `#`, so it falls through to the operator scanner instead and
    // `temp` scans as a separate identifier.
    assert_eq!(kinds("#temp", &GENERIC), vec![TokenKind::Operator, TokenKind::Ident]);
}

#[test]
fn dollar_quoting_is_postgres_and_snowflake_only() {
    static POSTGRES: PostgreSqlDialect = PostgreSqlDialect;
    static SNOWFLAKE: SnowflakeDialect = SnowflakeDialect;
    static GENERIC: GenericDialect = GenericDialect;

    assert_eq!(kinds("$$hello$$", &POSTGRES), vec![TokenKind::DollarQuotedString]);
    assert_eq!(kinds("$$hello$$", &SNOWFLAKE), vec![TokenKind::DollarQuotedString]);

    // Without dollar-quoting, a bare `$tag$` only scans as dollar-quoted
    // when the lexer's own unconditional `$digit` positional-parameter
    // check kicks in; `$$` (no digit) falls through to UNKNOWN territory.
    let generic_kinds = kinds("$$hello$$", &GENERIC);
    assert!(generic_kinds.iter().all(|k| *k != TokenKind::DollarQuotedString));
}

#[test]
fn positional_parameter_is_dialect_independent() {
    static GENERIC: GenericDialect = GenericDialect;
    static ORACLE: OracleDialect = OracleDialect;
    assert_eq!(kinds("$1", &GENERIC), vec![TokenKind::PositionalParameter]);
    assert_eq!(kinds("$1", &ORACLE), vec![TokenKind::PositionalParameter]);
}

#[test]
fn at_bind_parameter_is_mssql_and_postgres_only() {
    static MSSQL: MsSqlDialect = MsSqlDialect;
    static POSTGRES: PostgreSqlDialect = PostgreSqlDialect;
    static MYSQL: MySqlDialect = MySqlDialect;

    assert_eq!(kinds("@id", &MSSQL), vec![TokenKind::BindParameter]);
    assert_eq!(kinds("@id", &POSTGRES), vec![TokenKind::BindParameter]);

    // MySQL doesn't opt into `@name` bind parameters, so a bare `@` falls
    // through to the JSON/operator scanners instead.
    assert_ne!(kinds("@id", &MYSQL)[0], TokenKind::BindParameter);
}

#[test]
fn system_variable_is_dialect_independent() {
    static MYSQL: MySqlDialect = MySqlDialect;
    assert_eq!(kinds("@@version", &MYSQL), vec![TokenKind::SystemVariable]);
}

#[test]
fn colon_bind_parameter_works_in_every_dialect() {
    static ORACLE: OracleDialect = OracleDialect;
    assert_eq!(kinds(":name", &ORACLE), vec![TokenKind::BindParameter]);
}
