//! Whitespace collapsing, alias discarding, groupable-placeholder folding,
//! CTE-aware table collection, and the leading-parenthesized-expression
//! hoist.

use pretty_assertions::assert_eq;

use sqllexer::dialect::{GenericDialect, MsSqlDialect};
use sqllexer::{normalize, obfuscate_and_normalize, NormalizerConfig, ObfuscatorConfig};

static GENERIC: GenericDialect = GenericDialect;
static MSSQL: MsSqlDialect = MsSqlDialect;

#[test]
fn collapses_whitespace_and_replaces_literals() {
    let (sql, meta) = obfuscate_and_normalize(
        "SELECT   1",
        &ObfuscatorConfig::new(),
        &NormalizerConfig::new(),
        &GENERIC,
    );
    assert_eq!(sql, "SELECT ?");
    assert_eq!(meta.commands, vec!["SELECT".to_string()]);
    assert_eq!(meta.size, "SELECT".len());
}

#[test]
fn groupable_placeholder_lists_fold_to_one() {
    let (sql, meta) = obfuscate_and_normalize(
        "SELECT * FROM users WHERE id IN (1, 2) and name IN ARRAY[3, 4]",
        &ObfuscatorConfig::new(),
        &NormalizerConfig::new(),
        &GENERIC,
    );
    assert_eq!(
        sql,
        "SELECT * FROM users WHERE id IN ( ? ) and name IN ARRAY [ ? ]"
    );
    assert_eq!(meta.tables, vec!["users".to_string()]);
}

#[test]
fn groupable_fold_handles_arbitrary_length_lists() {
    // A bare `(...)` spanning the whole input is the leading-redundant-paren
    // case (see the `leading_redundant_parens_*` tests below), so the list
    // is embedded in a real clause here rather than standing alone.
    for n in 1..=5 {
        let list = std::iter::repeat("?").take(n).collect::<Vec<_>>().join(",");
        let input = format!("x IN ({list})");
        let (sql, _) = normalize(&input, &NormalizerConfig::new(), &GENERIC);
        assert_eq!(sql, "x IN ( ? )", "failed for n={n}");

        let bracketed = format!("y IN [{list}]");
        let (sql, _) = normalize(&bracketed, &NormalizerConfig::new(), &GENERIC);
        assert_eq!(sql, "y IN [ ? ]", "failed for n={n}");
    }
}

#[test]
fn mixed_groupable_list_preserves_non_placeholder_members() {
    let (sql, _) = normalize("SELECT (?, ARRAY[?], ?)", &NormalizerConfig::new(), &GENERIC);
    assert_eq!(sql, "SELECT ( ?, ARRAY [ ? ], ? )");
}

#[test]
fn alias_indicator_is_discarded_by_default() {
    let (sql, _) = normalize(
        "SELECT u.id as ID, u.name as Name FROM users as u WHERE u.id = 1",
        &NormalizerConfig::new(),
        &GENERIC,
    );
    assert_eq!(sql, "SELECT u.id, u.name FROM users WHERE u.id = 1");
}

#[test]
fn keep_sql_alias_preserves_as_clauses() {
    let cfg = NormalizerConfig::new().with_keep_sql_alias(true);
    let (sql, _) = normalize("SELECT x AS y FROM t", &cfg, &GENERIC);
    assert_eq!(sql, "SELECT x AS y FROM t");
}

#[test]
fn cte_alias_indicator_keeps_its_original_case() {
    let (sql, _) = normalize("WITH cte as (SELECT 1) SELECT * FROM cte", &NormalizerConfig::new(), &GENERIC);
    assert!(sql.contains("WITH cte as ("), "expected lowercase `as` to survive replay, got {sql:?}");
}

#[test]
fn cte_aware_table_collection_excludes_the_cte_name() {
    let (sql, meta) = normalize(
        "WITH foo AS (SELECT 1) SELECT * FROM foo JOIN bar ON foo.id = bar.id",
        &NormalizerConfig::new(),
        &GENERIC,
    );
    assert_eq!(meta.tables, vec!["bar".to_string()]);
    assert!(sql.contains("WITH foo AS"));
}

#[test]
fn update_cte_example_collects_person_only() {
    let (sql, meta) = obfuscate_and_normalize(
        "WITH cte AS (SELECT id FROM person WHERE age > 1) UPDATE person SET age = 2 WHERE id IN (SELECT id FROM cte)",
        &ObfuscatorConfig::new(),
        &NormalizerConfig::new(),
        &GENERIC,
    );
    assert_eq!(
        sql,
        "WITH cte AS ( SELECT id FROM person WHERE age > ? ) UPDATE person SET age = ? WHERE id IN ( SELECT id FROM cte )"
    );
    assert_eq!(meta.tables, vec!["person".to_string()]);
    assert_eq!(meta.commands, vec!["SELECT".to_string(), "UPDATE".to_string()]);
}

#[test]
fn metadata_sequences_are_deduplicated_preserving_first_occurrence() {
    let (_, meta) = normalize(
        "SELECT * FROM users; SELECT * FROM users",
        &NormalizerConfig::new(),
        &GENERIC,
    );
    assert_eq!(meta.tables, vec!["users".to_string()]);
    assert_eq!(meta.commands, vec!["SELECT".to_string()]);
    assert_eq!(meta.size, "users".len() + "SELECT".len());
}

#[test]
fn comments_are_stripped_from_sql_and_collected_in_metadata() {
    let (sql, meta) = normalize(
        "SELECT 1 -- trailing comment\n/* block */ FROM t",
        &NormalizerConfig::new(),
        &GENERIC,
    );
    assert!(!sql.contains("comment"));
    assert_eq!(meta.comments, vec!["-- trailing comment".to_string(), "/* block */".to_string()]);
}

#[test]
fn idempotent_modulo_comments() {
    let input = "SELECT   1 -- note\nFROM t";
    let (first, meta_first) = normalize(input, &NormalizerConfig::new(), &GENERIC);
    let (second, meta_second) = normalize(&first, &NormalizerConfig::new(), &GENERIC);
    assert_eq!(first, second);
    assert_eq!(meta_second.comments.len(), 0);
    assert_eq!(meta_first.comments, vec!["-- note".to_string()]);
}

#[test]
fn trailing_semicolon_is_stripped_by_default_and_kept_when_configured() {
    let (sql, _) = normalize("SELECT 1;", &NormalizerConfig::new(), &GENERIC);
    assert_eq!(sql, "SELECT 1");

    let cfg = NormalizerConfig::new().with_keep_trailing_semicolon(true);
    let (sql, _) = normalize("SELECT 1;", &cfg, &GENERIC);
    assert_eq!(sql, "SELECT 1;");
}

#[test]
fn uppercase_keywords_uppercases_commands_and_keywords_only() {
    let cfg = NormalizerConfig::new().with_uppercase_keywords(true);
    let (sql, _) = normalize("select * from users", &cfg, &GENERIC);
    assert_eq!(sql, "SELECT * FROM users");
}

#[test]
fn remove_space_between_parentheses_tightens_call_and_group_spacing() {
    let cfg = NormalizerConfig::new().with_remove_space_between_parentheses(true);
    let (sql, _) = normalize("SELECT COUNT( x ) FROM t", &cfg, &GENERIC);
    assert_eq!(sql, "SELECT COUNT(x) FROM t");
}

#[test]
fn leading_redundant_parens_get_the_same_normalized_spacing_as_any_other_group() {
    let (sql, _) = normalize("(SELECT 1)", &NormalizerConfig::new(), &GENERIC);
    assert_eq!(sql, "( SELECT 1 )");
}

#[test]
fn leading_parens_are_not_hoisted_when_real_content_follows() {
    let (sql, _) = normalize("(a) + (b)", &NormalizerConfig::new(), &GENERIC);
    assert_eq!(sql, "( a ) + ( b )");
}

#[test]
fn nested_leading_parens_are_handled_without_recursion() {
    let (sql, _) = normalize("((SELECT 1))", &NormalizerConfig::new(), &GENERIC);
    assert_eq!(sql, "( ( SELECT 1 ) )");
}

#[test]
fn mssql_bracket_identifiers_are_unquoted_and_dotted() {
    let (sql, meta) = obfuscate_and_normalize(
        "SELECT * FROM [public].[users] WHERE id = 1",
        &ObfuscatorConfig::new(),
        &NormalizerConfig::new(),
        &MSSQL,
    );
    assert_eq!(sql, "SELECT * FROM public.users WHERE id = ?");
    assert_eq!(meta.tables, vec!["public.users".to_string()]);
    assert_eq!(meta.commands, vec!["SELECT".to_string()]);
    assert_eq!(meta.size, "public.users".len() + "SELECT".len());
}

#[test]
fn keep_identifier_quotation_preserves_brackets() {
    let cfg = NormalizerConfig::new().with_keep_identifier_quotation(true);
    let (sql, meta) = normalize("SELECT * FROM [public].[users]", &cfg, &MSSQL);
    assert_eq!(sql, "SELECT * FROM [public].[users]");
    assert_eq!(meta.tables, vec!["[public].[users]".to_string()]);
}

#[test]
fn procedures_are_collected_after_proc_indicator() {
    let (_, meta) = normalize("CREATE PROCEDURE my_proc AS BEGIN SELECT 1 END", &NormalizerConfig::new(), &GENERIC);
    assert_eq!(meta.procedures, vec!["my_proc".to_string()]);
}

#[test]
fn unterminated_string_and_comment_never_panic() {
    let (sql, _) = normalize("SELECT 'unterminated", &NormalizerConfig::new(), &GENERIC);
    assert!(sql.contains("'unterminated"));

    let (sql, _) = normalize("SELECT 1 /* unterminated", &NormalizerConfig::new(), &GENERIC);
    assert!(sql.contains("/* unterminated"));
}
