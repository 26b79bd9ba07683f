// src/outputter/pgsql.rs
//! PostgreSQL sink
//!
//! Each run becomes one row in `scan_results`: the reporting host, the
//! time of the report and the full controls tree as `jsonb`.

use super::Outputter;
use crate::errors::OutputError;
use crate::logging::codes;
use bench_check::{Controls, Summary};
use chrono::{DateTime, Utc};
use postgres::{Client, NoTls};
use std::collections::HashMap;

/// Connection parameter keys read from [`crate::Config::values`]
pub mod keys {
    pub const HOST: &str = "PGSQL_HOST";
    pub const PORT: &str = "PGSQL_PORT";
    pub const USER: &str = "PGSQL_USER";
    pub const PASSWORD: &str = "PGSQL_PASSWORD";
    pub const DBNAME: &str = "PGSQL_DBNAME";
    /// Connections are made without TLS, so only `disable` and `prefer`
    /// (which then falls back to plaintext) are accepted.
    pub const SSLMODE: &str = "PGSQL_SSLMODE";

    pub const DEFAULT_PORT: &str = "5432";
    pub const DEFAULT_SSLMODE: &str = "disable";
    pub const SUPPORTED_SSLMODES: [&str; 2] = ["disable", "prefer"];
}

const CREATE_TABLE: &str = "CREATE TABLE IF NOT EXISTS scan_results (
    id BIGSERIAL PRIMARY KEY,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    scan_host TEXT NOT NULL,
    scan_time TIMESTAMPTZ NOT NULL,
    scan_info JSONB NOT NULL
)";

const INSERT_ROW: &str =
    "INSERT INTO scan_results (scan_host, scan_time, scan_info) VALUES ($1, $2, $3)";

/// One stored report
#[derive(Debug, Clone, PartialEq)]
pub struct ScanRecord {
    pub scan_host: String,
    pub scan_time: DateTime<Utc>,
    pub scan_info: serde_json::Value,
}

/// Persists scan records
pub trait ScanResultStore {
    fn save(&mut self, record: &ScanRecord) -> Result<(), OutputError>;
}

/// [`ScanResultStore`] backed by a live PostgreSQL connection
pub struct PostgresStore {
    client: Client,
}

impl PostgresStore {
    pub fn connect(connection_string: &str) -> Result<Self, OutputError> {
        let client = Client::connect(connection_string, NoTls)?;
        Ok(Self { client })
    }
}

impl ScanResultStore for PostgresStore {
    fn save(&mut self, record: &ScanRecord) -> Result<(), OutputError> {
        self.client.batch_execute(CREATE_TABLE)?;
        self.client.execute(
            INSERT_ROW,
            &[&record.scan_host, &record.scan_time, &record.scan_info],
        )?;
        Ok(())
    }
}

/// Stores each report as a row in PostgreSQL.
///
/// Construction never fails; missing or unsupported connection parameters
/// surface from [`Outputter::output`].
pub struct PgSqlOutputter {
    values: HashMap<String, String>,
    store: Option<Box<dyn ScanResultStore>>,
}

impl PgSqlOutputter {
    pub fn new(values: HashMap<String, String>) -> Self {
        Self {
            values,
            store: None,
        }
    }

    /// Write through `store` instead of opening a connection
    pub fn with_store(mut self, store: Box<dyn ScanResultStore>) -> Self {
        self.store = Some(store);
        self
    }

    pub fn values(&self) -> &HashMap<String, String> {
        &self.values
    }

    fn required(&self, key: &str) -> Result<&str, OutputError> {
        self.values
            .get(key)
            .map(String::as_str)
            .filter(|v| !v.is_empty())
            .ok_or_else(|| OutputError::missing_parameter(key))
    }

    fn optional<'a>(&'a self, key: &str, default: &'a str) -> &'a str {
        self.values
            .get(key)
            .map(String::as_str)
            .filter(|v| !v.is_empty())
            .unwrap_or(default)
    }

    /// libpq-style `key=value` connection string
    pub fn connection_string(&self) -> Result<String, OutputError> {
        let host = self.required(keys::HOST)?;
        let user = self.required(keys::USER)?;
        let dbname = self.required(keys::DBNAME)?;
        let port = self.optional(keys::PORT, keys::DEFAULT_PORT);
        let sslmode = self.optional(keys::SSLMODE, keys::DEFAULT_SSLMODE);
        if !keys::SUPPORTED_SSLMODES.iter().any(|m| *m == sslmode) {
            return Err(OutputError::UnsupportedSslMode {
                mode: sslmode.to_string(),
            });
        }

        let mut conn = format!(
            "host={} port={} user={} dbname={} sslmode={}",
            quote(host),
            quote(port),
            quote(user),
            quote(dbname),
            quote(sslmode)
        );
        if let Some(password) = self.values.get(keys::PASSWORD).filter(|p| !p.is_empty()) {
            conn.push_str(" password=");
            conn.push_str(&quote(password));
        }
        Ok(conn)
    }
}

impl Outputter for PgSqlOutputter {
    fn output(&mut self, controls: &Controls, _summary: &Summary) -> Result<(), OutputError> {
        let connection_string = match self.connection_string() {
            Ok(conn) => conn,
            Err(err) => {
                crate::log_error!(
                    codes::output::MISSING_SINK_PARAMETER,
                    "PostgreSQL connection settings rejected",
                    "error" => err
                );
                return Err(err);
            }
        };

        let scan_host = local_hostname()?;
        let record = ScanRecord {
            scan_host,
            scan_time: Utc::now(),
            scan_info: serde_json::to_value(controls)?,
        };

        match self.store.as_mut() {
            Some(store) => store.save(&record)?,
            None => PostgresStore::connect(&connection_string)?.save(&record)?,
        }

        crate::log_success!(
            codes::success::REPORT_STORED,
            "Scan results stored",
            "host" => record.scan_host,
            "table" => "scan_results"
        );
        Ok(())
    }
}

impl std::fmt::Debug for PgSqlOutputter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut keys: Vec<&str> = self.values.keys().map(String::as_str).collect();
        keys.sort_unstable();
        f.debug_struct("PgSqlOutputter")
            .field("keys", &keys)
            .field("custom_store", &self.store.is_some())
            .finish()
    }
}

fn local_hostname() -> Result<String, OutputError> {
    let name = hostname::get().map_err(|e| OutputError::Hostname {
        reason: e.to_string(),
    })?;
    name.into_string().map_err(|raw| OutputError::Hostname {
        reason: format!("host name is not valid UTF-8: {:?}", raw),
    })
}

/// Quote a connection-string value when it carries spaces, quotes or backslashes
fn quote(value: &str) -> String {
    if !value.is_empty() && !value.contains(|c: char| c.is_whitespace() || c == '\'' || c == '\\')
    {
        return value.to_string();
    }
    let mut quoted = String::with_capacity(value.len() + 2);
    quoted.push('\'');
    for c in value.chars() {
        if c == '\'' || c == '\\' {
            quoted.push('\\');
        }
        quoted.push(c);
    }
    quoted.push('\'');
    quoted
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use bench_check::{Check, Group, State};
    use std::sync::{Arc, Mutex};

    #[derive(Default, Clone)]
    struct MemoryStore {
        rows: Arc<Mutex<Vec<ScanRecord>>>,
    }

    impl ScanResultStore for MemoryStore {
        fn save(&mut self, record: &ScanRecord) -> Result<(), OutputError> {
            self.rows.lock().unwrap().push(record.clone());
            Ok(())
        }
    }

    fn values() -> HashMap<String, String> {
        [
            (keys::HOST, "db.local"),
            (keys::USER, "bench"),
            (keys::DBNAME, "results"),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
    }

    #[test]
    fn test_connection_string_defaults() {
        let conn = PgSqlOutputter::new(values()).connection_string().unwrap();
        assert_eq!(
            conn,
            "host=db.local port=5432 user=bench dbname=results sslmode=disable"
        );
    }

    #[test]
    fn test_connection_string_quotes_password() {
        let mut values = values();
        values.insert(keys::PASSWORD.to_string(), "it's secret".to_string());
        values.insert(keys::PORT.to_string(), "6543".to_string());

        let conn = PgSqlOutputter::new(values).connection_string().unwrap();
        assert!(conn.contains("port=6543"));
        assert!(conn.ends_with(r"password='it\'s secret'"));
    }

    #[test]
    fn test_missing_required_key() {
        let mut values = values();
        values.remove(keys::DBNAME);

        assert_matches!(
            PgSqlOutputter::new(values).connection_string(),
            Err(OutputError::MissingParameter { key }) if key == keys::DBNAME
        );
    }

    #[test]
    fn test_tls_sslmodes_rejected() {
        let mut values = values();
        values.insert(keys::SSLMODE.to_string(), "prefer".to_string());
        let conn = PgSqlOutputter::new(values.clone()).connection_string().unwrap();
        assert!(conn.contains("sslmode=prefer"));

        values.insert(keys::SSLMODE.to_string(), "verify-full".to_string());
        let store = MemoryStore::default();
        let mut outputter = PgSqlOutputter::new(values).with_store(Box::new(store.clone()));

        assert_matches!(
            outputter.output(&Controls::default(), &Summary::new(1, 0, 0, 0)),
            Err(OutputError::UnsupportedSslMode { mode }) if mode == "verify-full"
        );
        assert!(store.rows.lock().unwrap().is_empty());
    }

    #[test]
    fn test_output_without_settings_never_touches_store() {
        let store = MemoryStore::default();
        let mut outputter = PgSqlOutputter::new(HashMap::new()).with_store(Box::new(store.clone()));

        let result = outputter.output(&Controls::default(), &Summary::new(1, 0, 0, 0));

        assert_matches!(result, Err(OutputError::MissingParameter { .. }));
        assert!(store.rows.lock().unwrap().is_empty());
    }

    #[test]
    fn test_output_saves_one_record() {
        let store = MemoryStore::default();
        let mut outputter = PgSqlOutputter::new(values()).with_store(Box::new(store.clone()));
        let mut controls = Controls::new("1.6.0", "Docker Benchmark").with_group(
            Group::new("1", "Host").with_check(Check::new("1.1", "Partition", State::Fail)),
        );
        let summary = controls.tally();

        let before = Utc::now();
        outputter.output(&controls, &summary).unwrap();

        let rows = store.rows.lock().unwrap();
        assert_eq!(rows.len(), 1);
        assert!(!rows[0].scan_host.is_empty());
        assert!(rows[0].scan_time >= before);
        assert_eq!(rows[0].scan_info["total_fail"], 1);
        assert_eq!(rows[0].scan_info["tests"][0]["results"][0]["test_number"], "1.1");
    }

    #[test]
    fn test_quote() {
        assert_eq!(quote("plain"), "plain");
        assert_eq!(quote(""), "''");
        assert_eq!(quote(r"a\b"), r"'a\\b'");
    }
}
