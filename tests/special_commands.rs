//! # Integration Tests for Catalog Special Commands
//!
//! End-to-end tests for `.tables`, `.schema`, `.databases`, `status` and `help`
//! through the public registry API against on-disk SQLite databases.
//!
//! ## Test Categories
//!
//! 1. **Listing**: prefix filtering, ordering, internal table exclusion
//! 2. **Schema**: exact-name lookup and catalog ordering
//! 3. **Databases**: attached databases and streamed rows
//! 4. **Idempotence**: repeated calls without schema changes agree
//! 5. **Parsing**: quoted arguments, verbose suffix, trailing semicolons
//! 6. **Status**: the report SQLite can give without the MySQL status queries
//!
//! ## Running Tests
//!
//! ```sh
//! cargo test --test special_commands
//! ```

use sqlshell::cursor::{Cursor, SqliteCursor};
use sqlshell::special::{
    ClientInfo, CommandRegistry, PagerState, Rows, SessionContext, SpecialResult,
};
use sqlshell::types::Row;
use tempfile::tempdir;

fn session() -> SessionContext {
    SessionContext::new(ClientInfo::current(), PagerState::default())
}

fn run(cursor: &mut SqliteCursor, input: &str) -> Vec<SpecialResult> {
    CommandRegistry::with_builtins()
        .execute(cursor, input, &session())
        .unwrap()
        .unwrap_or_else(|| panic!("{} should be a special command", input))
}

fn single(mut results: Vec<SpecialResult>) -> (Option<Vec<String>>, Vec<Row>, Option<String>) {
    assert_eq!(results.len(), 1, "built-in commands return one result");
    let mut result = results.remove(0);
    let rows = result.take_rows();
    (result.headers, rows, result.footer)
}

fn first_column(rows: &[Row]) -> Vec<String> {
    rows.iter().map(|r| r.text_at(0)).collect()
}

fn shop_database() -> (tempfile::TempDir, SqliteCursor) {
    let dir = tempdir().unwrap();
    let mut cur = SqliteCursor::open(dir.path().join("shop.db")).unwrap();
    for sql in [
        "CREATE TABLE customers (id INTEGER PRIMARY KEY, name TEXT NOT NULL)",
        "CREATE TABLE customer_notes (customer_id INTEGER, note TEXT)",
        "CREATE TABLE orders (id INTEGER PRIMARY KEY AUTOINCREMENT, customer_id INTEGER)",
        "CREATE TABLE \"order items\" (order_id INTEGER, sku TEXT)",
        "CREATE INDEX idx_orders_customer ON orders (customer_id)",
        "CREATE VIEW big_orders AS SELECT * FROM orders WHERE id > 100",
        "INSERT INTO orders (customer_id) VALUES (1)",
    ] {
        cur.execute(sql, &[]).unwrap();
    }
    (dir, cur)
}

mod listing_tests {
    use super::*;

    #[test]
    fn tables_lists_user_tables_and_views_sorted() {
        let (_dir, mut cur) = shop_database();

        let (headers, rows, footer) = single(run(&mut cur, ".tables"));

        assert_eq!(headers, Some(vec!["name".to_string()]));
        assert_eq!(footer.as_deref(), Some(""));
        assert_eq!(
            first_column(&rows),
            vec!["big_orders", "customer_notes", "customers", "order items", "orders"]
        );
    }

    #[test]
    fn autoincrement_sequence_table_is_hidden() {
        let (_dir, mut cur) = shop_database();
        cur.execute("SELECT name FROM sqlite_master WHERE name = 'sqlite_sequence'", &[])
            .unwrap();
        assert_eq!(cur.fetchall().len(), 1, "fixture should create sqlite_sequence");

        let (_, rows, _) = single(run(&mut cur, "\\dt"));
        assert!(first_column(&rows).iter().all(|n| !n.starts_with("sqlite_")));
    }

    #[test]
    fn prefix_filter_matches_only_prefixed_names() {
        let (_dir, mut cur) = shop_database();

        for prefix in ["c", "cust", "customers", "o", "order", "big", "zzz"] {
            let (_, rows, _) = single(run(&mut cur, &format!(".tables {}", prefix)));
            let names = first_column(&rows);

            assert!(
                names.iter().all(|n| n.starts_with(prefix)),
                "{:?} should all start with {}",
                names,
                prefix
            );
            let mut sorted = names.clone();
            sorted.sort();
            assert_eq!(names, sorted, "results for {} should be sorted", prefix);
        }
    }

    #[test]
    fn unfiltered_listing_is_superset_of_every_prefix() {
        let (_dir, mut cur) = shop_database();
        let (_, all, _) = single(run(&mut cur, ".tables"));
        let all = first_column(&all);

        let (_, customers, _) = single(run(&mut cur, ".tables cust"));
        for name in first_column(&customers) {
            assert!(all.contains(&name));
        }
    }

    #[test]
    fn prefix_wildcards_and_case_follow_like() {
        let (_dir, mut cur) = shop_database();

        let (_, rows, _) = single(run(&mut cur, ".tables c_st"));
        assert_eq!(first_column(&rows), vec!["customer_notes", "customers"]);

        let (_, rows, _) = single(run(&mut cur, ".tables %items"));
        assert_eq!(first_column(&rows), vec!["order items"]);

        let (_, rows, _) = single(run(&mut cur, ".tables ORDERS"));
        assert_eq!(first_column(&rows), vec!["orders"]);
    }

    #[test]
    fn quoted_prefix_is_unquoted() {
        let (_dir, mut cur) = shop_database();

        let (_, rows, _) = single(run(&mut cur, ".tables \"order \""));
        assert_eq!(first_column(&rows), vec!["order items"]);
    }

    #[test]
    fn verbose_suffix_is_accepted() {
        let (_dir, mut cur) = shop_database();

        let (_, plain, _) = single(run(&mut cur, ".tables cust"));
        let (_, verbose, _) = single(run(&mut cur, ".tables+ cust"));
        assert_eq!(plain, verbose);
    }

    #[test]
    fn empty_database_has_headers_but_no_rows() {
        let dir = tempdir().unwrap();
        let mut cur = SqliteCursor::open(dir.path().join("empty.db")).unwrap();

        let (headers, rows, footer) = single(run(&mut cur, ".tables"));
        assert_eq!(headers, Some(vec!["name".to_string()]));
        assert!(rows.is_empty());
        assert_eq!(footer.as_deref(), Some(""));
    }
}

mod schema_tests {
    use super::*;

    #[test]
    fn schema_for_named_table_returns_its_sql() {
        let (_dir, mut cur) = shop_database();

        let (headers, rows, _) = single(run(&mut cur, ".schema customers"));
        assert_eq!(headers, Some(vec!["sql".to_string()]));
        assert_eq!(
            first_column(&rows),
            vec!["CREATE TABLE customers (id INTEGER PRIMARY KEY, name TEXT NOT NULL)"]
        );
    }

    #[test]
    fn schema_for_unknown_table_is_empty() {
        let (_dir, mut cur) = shop_database();

        let (headers, rows, _) = single(run(&mut cur, ".schema nope"));
        assert!(headers.is_some());
        assert!(rows.is_empty());
    }

    #[test]
    fn schema_accepts_quoted_names_with_spaces() {
        let (_dir, mut cur) = shop_database();

        let (_, rows, _) = single(run(&mut cur, ".schema 'order items'"));
        assert_eq!(rows.len(), 1);
        assert!(rows[0].text_at(0).contains("\"order items\""));
    }

    #[test]
    fn full_schema_follows_catalog_order() {
        let (_dir, mut cur) = shop_database();

        let (_, rows, _) = single(run(&mut cur, ".schema"));
        let sql = first_column(&rows);

        cur.execute(
            "SELECT sql FROM sqlite_master ORDER BY tbl_name, type DESC, name",
            &[],
        )
        .unwrap();
        let expected: Vec<String> = cur.fetchall().iter().map(|r| r.text_at(0)).collect();
        assert_eq!(sql, expected);

        let orders = sql.iter().position(|s| s.starts_with("CREATE TABLE orders")).unwrap();
        let index = sql.iter().position(|s| s.starts_with("CREATE INDEX")).unwrap();
        assert!(orders < index, "table sorts before its index (type DESC)");
    }
}

mod database_tests {
    use super::*;

    #[test]
    fn databases_lists_main_and_attached() {
        let (dir, mut cur) = shop_database();
        let other = dir.path().join("archive.db");
        cur.execute("ATTACH DATABASE ? AS archive", &[other.display().to_string().into()])
            .unwrap();

        let results = run(&mut cur, ".databases");
        assert!(matches!(results[0].rows, Some(Rows::Stream(_))));

        let (headers, rows, footer) = single(results);
        assert_eq!(
            headers,
            Some(vec!["seq".to_string(), "name".to_string(), "file".to_string()])
        );
        assert_eq!(footer.as_deref(), Some(""));

        let names: Vec<String> = rows
            .iter()
            .map(|r| r.text_at(1))
            .filter(|n| n != "temp")
            .collect();
        assert_eq!(names, vec!["main", "archive"]);
        assert!(rows[0].text_at(2).ends_with("shop.db"));
    }
}

mod idempotence_tests {
    use super::*;

    #[test]
    fn repeated_invocations_agree() {
        let (_dir, mut cur) = shop_database();

        for input in [".tables", ".tables cu", ".schema", ".schema orders", ".databases"] {
            let first = single(run(&mut cur, input));
            let second = single(run(&mut cur, input));
            assert_eq!(first, second, "{} should be idempotent", input);
        }
    }
}

mod parsing_tests {
    use super::*;

    #[test]
    fn trailing_semicolon_is_ignored() {
        let (_dir, mut cur) = shop_database();

        let (_, rows, _) = single(run(&mut cur, ".schema customers;"));
        assert_eq!(rows.len(), 1);
    }

    #[test]
    fn sql_is_not_a_special_command() {
        let (_dir, mut cur) = shop_database();

        let outcome = CommandRegistry::with_builtins()
            .execute(&mut cur, "SELECT * FROM orders;", &session())
            .unwrap();
        assert!(outcome.is_none());
    }

    #[test]
    fn unbalanced_quotes_are_reported() {
        let (_dir, mut cur) = shop_database();

        let err = CommandRegistry::with_builtins()
            .execute(&mut cur, ".schema \"orders", &session())
            .unwrap_err();
        assert!(err.to_string().contains("failed to parse argument"));
    }

    #[test]
    fn help_lists_registered_commands() {
        let (_dir, mut cur) = shop_database();

        let (headers, rows, _) = single(run(&mut cur, "\\?"));
        assert_eq!(
            headers,
            Some(vec!["Command".to_string(), "Shortcut".to_string(), "Description".to_string()])
        );
        let commands = first_column(&rows);
        assert!(commands.contains(&"\\dt".to_string()));
        assert!(commands.contains(&"status".to_string()));
    }
}

mod status_tests {
    use super::*;

    fn report(cur: &mut SqliteCursor, input: &str) -> (SpecialResult, Vec<(String, String)>) {
        let mut results = run(cur, input);
        assert_eq!(results.len(), 1);
        let mut result = results.remove(0);
        let rows = result
            .take_rows()
            .into_iter()
            .map(|row| (row.text_at(0), row.text_at(1)))
            .collect();
        (result, rows)
    }

    fn database_count(result: &SpecialResult) -> usize {
        let footer = result.footer.as_deref().unwrap();
        let count = footer
            .split("Databases: ")
            .nth(1)
            .and_then(|rest| rest.split_whitespace().next())
            .unwrap();
        count.parse().unwrap()
    }

    #[test]
    fn status_reports_engine_details() {
        let (_dir, mut cur) = shop_database();

        let (result, rows) = report(&mut cur, "status");

        let labels: Vec<&str> = rows.iter().map(|(l, _)| l.as_str()).collect();
        assert_eq!(
            labels,
            vec![
                "Connection id:",
                "Current database:",
                "Current pager:",
                "Server version:",
                "Connection:",
                "Db characterset:",
            ]
        );
        assert!(rows[1].1.ends_with("shop.db"));
        assert_eq!(rows[2].1, "stdout");
        assert!(rows[3].1.starts_with("SQLite 3."));
        assert!(rows[4].1.ends_with("shop.db"));
        assert_eq!(rows[5].1, "UTF-8");

        assert_eq!(result.headers, Some(Vec::new()));
        assert!(result.title.unwrap().starts_with("--------------\n"));
        let footer = result.footer.unwrap();
        assert!(footer.starts_with("\nDatabases: "));
        assert!(footer.contains("  Page size: "));
        assert!(footer.ends_with("\n--------------"));
    }

    #[test]
    fn status_in_memory_names_main() {
        let mut cur = SqliteCursor::open_in_memory().unwrap();

        let (_, rows) = report(&mut cur, "\\s");
        assert_eq!(rows[1], ("Current database:".to_string(), "main".to_string()));
        assert_eq!(rows[4], ("Connection:".to_string(), ":memory:".to_string()));
    }

    #[test]
    fn status_counts_attached_databases() {
        let (dir, mut cur) = shop_database();
        let (before, _) = report(&mut cur, "status");

        let other = dir.path().join("archive.db");
        cur.execute("ATTACH DATABASE ? AS archive", &[other.display().to_string().into()])
            .unwrap();

        let (after, _) = report(&mut cur, "status");
        assert_eq!(database_count(&after), database_count(&before) + 1);
    }
}
