//! DuckDB SQL backend
//!
//! Implements [`SqlConnection`] for embedded DuckDB databases. Table schemas
//! come from `information_schema.columns`, primary keys from
//! `duckdb_constraints()`. Dates, times, timestamps, intervals and decimals
//! are read as the text DuckDB itself prints for them.

use super::QueryResponse;
use super::sql::SqlConnection;
use crate::export::ExportError;
use crate::models::{Cell, ColumnSchema, Row, RowSet, Table};
use chrono::{DateTime, Days, NaiveTime};
use duckdb::types::{TimeUnit, Value};
use std::path::Path;
use tracing::info;

/// Statement prefixes that produce rows
const READ_PREFIXES: &[&str] = &["select", "with", "from", "values", "show", "describe"];

/// Embedded DuckDB connection
pub struct DuckDbConnection {
    conn: duckdb::Connection,
}

impl DuckDbConnection {
    /// Open a database file
    pub fn open(path: &Path) -> Result<Self, ExportError> {
        let conn = duckdb::Connection::open(path).map_err(|e| {
            ExportError::SourceUnavailable(format!("Failed to open {}: {}", path.display(), e))
        })?;
        info!("Opened DuckDB database {}", path.display());
        Ok(Self { conn })
    }

    /// Open an in-memory database (for testing)
    pub fn memory() -> Result<Self, ExportError> {
        let conn = duckdb::Connection::open_in_memory()
            .map_err(|e| ExportError::SourceUnavailable(e.to_string()))?;
        Ok(Self { conn })
    }

    /// Run DDL/DML statements
    pub fn execute_batch(&self, sql: &str) -> Result<(), ExportError> {
        self.conn
            .execute_batch(sql)
            .map_err(|e| ExportError::SourceUnavailable(e.to_string()))
    }

    fn is_read(sql: &str) -> bool {
        let head = sql
            .trim_start()
            .split_whitespace()
            .next()
            .unwrap_or("")
            .to_lowercase();
        READ_PREFIXES.contains(&head.as_str())
    }

    fn value_to_cell(value: Value) -> Cell {
        match value {
            Value::Null => Cell::Null,
            Value::Boolean(b) => Cell::Boolean(b),
            Value::TinyInt(n) => Cell::Integer(n.into()),
            Value::SmallInt(n) => Cell::Integer(n.into()),
            Value::Int(n) => Cell::Integer(n.into()),
            Value::BigInt(n) => Cell::Integer(n),
            Value::UTinyInt(n) => Cell::Integer(n.into()),
            Value::USmallInt(n) => Cell::Integer(n.into()),
            Value::UInt(n) => Cell::Integer(n.into()),
            Value::UBigInt(n) => i64::try_from(n)
                .map(Cell::Integer)
                .unwrap_or(Cell::Real(n as f64)),
            Value::HugeInt(n) => i64::try_from(n)
                .map(Cell::Integer)
                .unwrap_or(Cell::Real(n as f64)),
            Value::Float(f) => Cell::Real(f as f64),
            Value::Double(f) => Cell::Real(f),
            Value::Text(s) | Value::Enum(s) => Cell::Text(s),
            Value::Blob(bytes) => Cell::Binary(bytes),
            Value::Decimal(d) => Cell::from_display(d),
            Value::Date32(days) => Cell::Text(Self::date_text(days)),
            Value::Timestamp(unit, value) => Cell::Text(Self::timestamp_text(unit, value)),
            Value::Time64(unit, value) => Cell::Text(Self::time_text(unit, value)),
            Value::Interval {
                months,
                days,
                nanos,
            } => Cell::Text(Self::interval_text(months, days, nanos)),
            // Nested values (LIST, STRUCT, MAP, UNION) have no scalar form
            other => Cell::from_display(format!("{:?}", other)),
        }
    }

    fn micros(unit: TimeUnit, value: i64) -> i64 {
        match unit {
            TimeUnit::Second => value.saturating_mul(1_000_000),
            TimeUnit::Millisecond => value.saturating_mul(1_000),
            TimeUnit::Microsecond => value,
            TimeUnit::Nanosecond => value / 1_000,
        }
    }

    /// `YYYY-MM-DD` from days since the Unix epoch
    fn date_text(days: i32) -> String {
        let epoch = DateTime::UNIX_EPOCH.date_naive();
        let date = if days >= 0 {
            epoch.checked_add_days(Days::new(days.unsigned_abs().into()))
        } else {
            epoch.checked_sub_days(Days::new(days.unsigned_abs().into()))
        };
        date.map(|d| d.to_string()).unwrap_or_else(|| days.to_string())
    }

    /// `YYYY-MM-DD HH:MM:SS[.ffffff]`, as DuckDB prints timestamps
    fn timestamp_text(unit: TimeUnit, value: i64) -> String {
        let micros = Self::micros(unit, value);
        DateTime::from_timestamp_micros(micros)
            .map(|dt| dt.naive_utc().to_string())
            .unwrap_or_else(|| micros.to_string())
    }

    /// `HH:MM:SS[.ffffff]` from time since midnight
    fn time_text(unit: TimeUnit, value: i64) -> String {
        let micros = Self::micros(unit, value);
        u32::try_from(micros.div_euclid(1_000_000))
            .ok()
            .and_then(|secs| {
                let nanos = (micros.rem_euclid(1_000_000) * 1_000) as u32;
                NaiveTime::from_num_seconds_from_midnight_opt(secs, nanos)
            })
            .map(|t| t.to_string())
            .unwrap_or_else(|| micros.to_string())
    }

    /// `N months N days HH:MM:SS`, zero parts omitted
    fn interval_text(months: i32, days: i32, nanos: i64) -> String {
        let mut parts = Vec::new();
        if months != 0 {
            parts.push(format!("{} months", months));
        }
        if days != 0 {
            parts.push(format!("{} days", days));
        }
        if nanos != 0 || parts.is_empty() {
            let sign = if nanos < 0 { "-" } else { "" };
            let total = nanos.unsigned_abs();
            let secs = total / 1_000_000_000;
            let mut clock = format!(
                "{}{:02}:{:02}:{:02}",
                sign,
                secs / 3600,
                secs / 60 % 60,
                secs % 60
            );
            let fraction = (total % 1_000_000_000) / 1_000;
            if fraction != 0 {
                clock.push_str(&format!(".{:06}", fraction));
            }
            parts.push(clock);
        }
        parts.join(" ")
    }

    fn query_rows(&self, sql: &str) -> Result<RowSet, duckdb::Error> {
        let mut stmt = self.conn.prepare(sql)?;
        let mut rows = stmt.query([])?;

        let column_count = rows.as_ref().map(|r| r.column_count()).unwrap_or(0);
        let columns: Vec<String> = (0..column_count)
            .map(|i| {
                rows.as_ref()
                    .and_then(|r| r.column_name(i).ok())
                    .map(|s| s.to_string())
                    .unwrap_or_else(|| format!("col{}", i))
            })
            .collect();

        let mut data: Vec<Row> = Vec::new();
        while let Some(row) = rows.next()? {
            let mut cells = Vec::with_capacity(column_count);
            for i in 0..column_count {
                let value: Value = row.get(i)?;
                cells.push(Self::value_to_cell(value));
            }
            data.push(cells);
        }

        Ok(RowSet::new(columns, data))
    }

    fn table_columns(&self, table: &str) -> Result<Vec<ColumnSchema>, duckdb::Error> {
        let mut key_stmt = self.conn.prepare(
            "SELECT unnest(constraint_column_names) FROM duckdb_constraints() \
             WHERE table_name = ?1 AND constraint_type = 'PRIMARY KEY'",
        )?;
        let keys = key_stmt
            .query_map([table], |row| row.get::<_, String>(0))?
            .collect::<Result<Vec<_>, _>>()?;

        let mut stmt = self.conn.prepare(
            "SELECT column_name, data_type, is_nullable FROM information_schema.columns \
             WHERE table_schema = 'main' AND table_name = ?1 ORDER BY ordinal_position",
        )?;
        let columns = stmt
            .query_map([table], |row| {
                let name: String = row.get(0)?;
                let data_type: String = row.get(1)?;
                let nullable: String = row.get(2)?;
                Ok((name, data_type, nullable))
            })?
            .map(|row| {
                row.map(|(name, data_type, nullable)| ColumnSchema {
                    is_primary_key: keys.contains(&name),
                    is_nullable: nullable.eq_ignore_ascii_case("YES"),
                    name,
                    declared_type: data_type,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(columns)
    }

    fn list_tables(&self) -> Result<Vec<Table>, duckdb::Error> {
        let mut stmt = self.conn.prepare(
            "SELECT table_name FROM information_schema.tables \
             WHERE table_schema = 'main' AND table_type = 'BASE TABLE' ORDER BY table_name",
        )?;
        let names = stmt
            .query_map([], |row| row.get::<_, String>(0))?
            .collect::<Result<Vec<_>, _>>()?;

        names
            .into_iter()
            .map(|name| {
                let columns = self.table_columns(&name)?;
                Ok(Table::new(name, columns))
            })
            .collect()
    }
}

impl SqlConnection for DuckDbConnection {
    fn tables(&self) -> Result<Vec<Table>, String> {
        self.list_tables().map_err(|e| e.to_string())
    }

    fn execute(&self, sql: &str) -> QueryResponse {
        if !Self::is_read(sql) {
            return match self.conn.execute(sql, []) {
                Ok(rows) => QueryResponse::Affected { rows: rows as u64 },
                Err(e) => QueryResponse::Error(e.to_string()),
            };
        }

        match self.query_rows(sql) {
            Ok(rows) => QueryResponse::Rows(rows),
            Err(e) => QueryResponse::Error(e.to_string()),
        }
    }
}
