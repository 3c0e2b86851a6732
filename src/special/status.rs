//! # Server Status Report
//!
//! `status` / `\s` assembles a MySQL-style status block from several
//! round-trips on the same cursor:
//!
//! ```text
//! SHOW GLOBAL STATUS;        -- falls back to SHOW STATUS; on old servers
//! SHOW GLOBAL VARIABLES;
//! SELECT DATABASE(), USER();
//! SELECT @@character_set_server, ... LIMIT 1;
//! ```
//!
//! ## Output
//!
//! ```text
//! --------------
//! sqlshell 0.1.0, running on Rust linux/x86_64
//!
//! Connection id:        42
//! Current database:     app
//! ...
//! Uptime:               1 hour 1 min 1 sec
//!
//! Connections: 3  Queries: 7322  Slow queries: 0  ...  Queries per second avg: 2.000
//! --------------
//! ```
//!
//! The rows carry no column headers (`headers` is an empty list), which tells
//! the renderer to print a key/value block rather than a table.
//!
//! ## Engines Without the Status Protocol
//!
//! When both `SHOW` forms come back unsupported (SQLite), the report is
//! built from what the engine exposes instead, under the same title and
//! labels where one applies:
//!
//! ```text
//! Connection id:    1
//! Current database: /data/app.db
//! Current pager:    stdout
//! Server version:   SQLite 3.46.0
//! Connection:       /data/app.db
//! Db characterset:  UTF-8
//!
//! Databases: 1  Page size: 4096  Pages: 12
//! ```
//!
//! ## Missing Keys
//!
//! Servers differ in which counters they expose. `Queries` is optional: when
//! it is absent neither `Queries:` nor the per-second average is printed.
//! Any other missing key renders as an empty value instead of failing the
//! report.

use crate::config::STATUS_SEPARATOR;
use crate::cursor::Cursor;
use crate::special::uptime::format_uptime;
use crate::special::{SessionContext, SpecialResult};
use crate::types::{Row, Value};
use eyre::{eyre, Result};
use std::collections::HashMap;
use tracing::debug;

const GLOBAL_STATUS_QUERY: &str = "SHOW GLOBAL STATUS;";
const LEGACY_STATUS_QUERY: &str = "SHOW STATUS;";
const GLOBAL_VARIABLES_QUERY: &str = "SHOW GLOBAL VARIABLES;";
const IDENTITY_QUERY: &str = "SELECT DATABASE(), USER();";
const CHARSET_QUERY: &str = "SELECT @@character_set_server, @@character_set_database, \
     @@character_set_client, @@character_set_connection LIMIT 1;";

const ENGINE_VERSION_QUERY: &str = "SELECT sqlite_version();";
const DATABASE_LIST_QUERY: &str = "PRAGMA database_list;";
const ENCODING_QUERY: &str = "PRAGMA encoding;";
const PAGE_SIZE_QUERY: &str = "PRAGMA page_size;";
const PAGE_COUNT_QUERY: &str = "PRAGMA page_count;";

type Settings = HashMap<String, String>;
type Report<'a> = Vec<(&'a str, String)>;

pub fn status(cursor: &mut dyn Cursor, session: &SessionContext) -> Result<Vec<SpecialResult>> {
    let status = match fetch_status(cursor)? {
        Some(status) => status,
        None => return engine_status(cursor, session),
    };

    debug!(query = GLOBAL_VARIABLES_QUERY, "status");
    cursor.execute(GLOBAL_VARIABLES_QUERY, &[])?;
    let variables = collect_settings(cursor.fetchall());

    let mut output: Report = Vec::with_capacity(12);
    output.push(("Connection id:", cursor.connection().connection_id()));

    debug!(query = IDENTITY_QUERY, "status");
    cursor.execute(IDENTITY_QUERY, &[])?;
    let identity = fetch_one(cursor, IDENTITY_QUERY)?;
    output.push(("Current database:", identity.text_at(0)));
    output.push(("Current user:", identity.text_at(1)));

    output.push(("Current pager:", session.pager.describe()));
    output.push((
        "Server version:",
        format!("{} {}", setting(&variables, "version"), setting(&variables, "version_comment")),
    ));
    output.push(("Protocol version:", setting(&variables, "protocol_version").to_string()));
    output.push((
        "Connection:",
        connection_description(&cursor.connection().host_info(), &cursor.connection().host()),
    ));

    debug!(query = CHARSET_QUERY, "status");
    cursor.execute(CHARSET_QUERY, &[])?;
    let charset = fetch_one(cursor, CHARSET_QUERY)?;
    output.push(("Server characterset:", charset.text_at(0)));
    output.push(("Db characterset:", charset.text_at(1)));
    output.push(("Client characterset:", charset.text_at(2)));
    output.push(("Conn. characterset:", charset.text_at(3)));

    let uptime = parse_counter(&status, "Uptime");
    output.push(("Uptime:", uptime.map(format_uptime).unwrap_or_default()));

    Ok(vec![report(session, output, stats_line(&status))])
}

/// Report for engines without the status protocol, built from SQLite's own
/// introspection: library version, attached databases, encoding and page
/// counters.
fn engine_status(cursor: &mut dyn Cursor, session: &SessionContext) -> Result<Vec<SpecialResult>> {
    let mut output: Report = Vec::with_capacity(6);
    output.push(("Connection id:", cursor.connection().connection_id()));

    debug!(query = DATABASE_LIST_QUERY, "status");
    cursor.execute(DATABASE_LIST_QUERY, &[])?;
    let databases = cursor.fetchall();
    let current = databases
        .iter()
        .find(|row| row.text_at(1) == "main")
        .or_else(|| databases.first())
        .map(|row| match row.text_at(2) {
            file if file.is_empty() => row.text_at(1),
            file => file,
        })
        .unwrap_or_default();
    output.push(("Current database:", current));

    output.push(("Current pager:", session.pager.describe()));

    let version = single_value(cursor, ENGINE_VERSION_QUERY)?;
    output.push(("Server version:", format!("SQLite {}", version)));
    output.push(("Connection:", cursor.connection().host_info()));

    let encoding = single_value(cursor, ENCODING_QUERY)?;
    output.push(("Db characterset:", encoding));

    let page_size = single_value(cursor, PAGE_SIZE_QUERY)?;
    let page_count = single_value(cursor, PAGE_COUNT_QUERY)?;
    let stats = format!(
        "Databases: {}  Page size: {}  Pages: {}",
        databases.len(),
        page_size,
        page_count
    );

    Ok(vec![report(session, output, stats)])
}

fn report(session: &SessionContext, output: Report, stats: String) -> SpecialResult {
    let title = [
        STATUS_SEPARATOR.to_string(),
        format!("{}\n", session.client.banner()),
    ];
    let footer = [format!("\n{}", stats), STATUS_SEPARATOR.to_string()];

    let rows: Vec<Row> = output
        .into_iter()
        .map(|(label, value)| Row::new(vec![Value::from(label), Value::from(value)]))
        .collect();

    SpecialResult {
        title: Some(title.join("\n")),
        rows: Some(rows.into()),
        headers: Some(Vec::new()),
        footer: Some(footer.join("\n")),
    }
}

/// Runs the status query, retrying the legacy form when the global one is
/// unsupported. `None` means the engine speaks neither.
fn fetch_status(cursor: &mut dyn Cursor) -> Result<Option<Settings>> {
    debug!(query = GLOBAL_STATUS_QUERY, "status");
    if let Err(err) = cursor.execute(GLOBAL_STATUS_QUERY, &[]) {
        if !err.is_unsupported() {
            return Err(err.into());
        }
        debug!(error = %err, query = LEGACY_STATUS_QUERY, "global status unsupported, falling back");
        if let Err(err) = cursor.execute(LEGACY_STATUS_QUERY, &[]) {
            if !err.is_unsupported() {
                return Err(err.into());
            }
            debug!(error = %err, "status protocol unsupported, reporting engine introspection");
            return Ok(None);
        }
    }
    Ok(Some(collect_settings(cursor.fetchall())))
}

fn fetch_one(cursor: &mut dyn Cursor, query: &str) -> Result<Row> {
    cursor
        .fetchone()
        .ok_or_else(|| eyre!("query returned no rows: {}", query))
}

fn single_value(cursor: &mut dyn Cursor, query: &str) -> Result<String> {
    debug!(query, "status");
    cursor.execute(query, &[])?;
    Ok(fetch_one(cursor, query)?.text_at(0))
}

/// Builds a name → value map from two-column rows, decoding byte values.
fn collect_settings(rows: Vec<Row>) -> Settings {
    rows.into_iter()
        .map(|row| (row.text_at(0), row.text_at(1)))
        .collect()
}

fn setting<'a>(settings: &'a Settings, key: &str) -> &'a str {
    settings.get(key).map(String::as_str).unwrap_or("")
}

fn parse_counter(settings: &Settings, key: &str) -> Option<u64> {
    settings.get(key).and_then(|v| v.trim().parse().ok())
}

fn connection_description(host_info: &str, host: &str) -> String {
    if host_info.to_lowercase().contains("unix") {
        host_info.to_string()
    } else {
        format!("{} via TCP/IP", host)
    }
}

fn queries_per_second(queries: u64, uptime: u64) -> Option<f64> {
    if uptime == 0 {
        return None;
    }
    Some(queries as f64 / uptime as f64)
}

fn stats_line(status: &Settings) -> String {
    let queries = status.get("Queries");
    let mut stats = Vec::with_capacity(7);

    stats.push(format!("Connections: {}", setting(status, "Threads_connected")));
    if let Some(queries) = queries {
        stats.push(format!("Queries: {}", queries));
    }
    stats.push(format!("Slow queries: {}", setting(status, "Slow_queries")));
    stats.push(format!("Opens: {}", setting(status, "Opened_tables")));
    stats.push(format!("Flush tables: {}", setting(status, "Flush_commands")));
    stats.push(format!("Open tables: {}", setting(status, "Open_tables")));

    if queries.is_some() {
        let average = parse_counter(status, "Queries")
            .zip(parse_counter(status, "Uptime"))
            .and_then(|(queries, uptime)| queries_per_second(queries, uptime));
        if let Some(average) = average {
            stats.push(format!("Queries per second avg: {:.3}", average));
        }
    }

    stats.join("  ")
}
