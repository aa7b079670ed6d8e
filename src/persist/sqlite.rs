//! SQLite archive of enriched sessions.

use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use rusqlite::{Connection, OptionalExtension, params};
use serde::{Deserialize, Serialize};

use crate::engine::session::SessionReport;

use super::{PersistError, PersistResult, ReportSink};

const REPORT_FORMAT_VERSION: u16 = 1;

/// Session row id.
pub type SessionId = i64;

#[derive(Debug, Clone, Serialize, Deserialize)]
struct ReportEnvelope {
    format_version: u16,
    report: SessionReport,
}

/// Stores each report as a `sessions` row plus one `qsos` row per contact.
pub struct SqliteReportSink {
    conn: Connection,
    path: PathBuf,
}

impl SqliteReportSink {
    /// Opens or creates a database at `path`.
    ///
    /// Enables WAL mode and sets `synchronous=NORMAL`.
    pub fn open(path: impl AsRef<Path>) -> PersistResult<Self> {
        let path = path.as_ref().to_path_buf();
        let conn = Connection::open(&path)?;
        Self::init_connection(conn, path)
    }

    /// Opens an in-memory database.
    pub fn open_in_memory() -> PersistResult<Self> {
        let conn = Connection::open_in_memory()?;
        Self::init_connection(conn, PathBuf::from(":memory:"))
    }

    fn init_connection(conn: Connection, path: PathBuf) -> PersistResult<Self> {
        conn.execute_batch(include_str!("schema.sql"))?;
        conn.pragma_update(None, "journal_mode", "WAL")?;
        conn.pragma_update(None, "synchronous", "NORMAL")?;
        conn.pragma_update(None, "foreign_keys", "ON")?;
        Ok(Self { conn, path })
    }

    /// Inserts `report` in one transaction and returns its session id.
    pub fn insert_session(
        &mut self,
        source: &Path,
        report: &SessionReport,
    ) -> PersistResult<SessionId> {
        let payload = serde_json::to_vec(&ReportEnvelope {
            format_version: REPORT_FORMAT_VERSION,
            report: report.clone(),
        })?;

        let tx = self.conn.transaction()?;
        tx.execute(
            "INSERT INTO sessions(source, ts_ms, date, my_callsign, my_locator, my_lat, my_lon, my_sota, payload)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
            params![
                source.to_string_lossy().into_owned(),
                now_ms() as i64,
                report.date,
                report.my_callsign,
                report.my_locator,
                report.my_lat,
                report.my_lon,
                report.my_sota,
                payload,
            ],
        )?;
        let session_id = tx.last_insert_rowid();
        {
            let mut stmt = tx.prepare(
                "INSERT INTO qsos(session_id, idx, time, callsign, band, qth, locator, lat, lon, distance_km, sota_ref, comment)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)",
            )?;
            for (idx, q) in report.qsos.iter().enumerate() {
                stmt.execute(params![
                    session_id,
                    idx as i64,
                    q.time,
                    q.callsign,
                    q.band,
                    q.qth,
                    q.locator,
                    q.lat,
                    q.lon,
                    q.distance_km,
                    q.sota_ref,
                    q.comment,
                ])?;
            }
        }
        tx.commit()?;

        Ok(session_id)
    }

    /// Loads the report stored under `id`.
    pub fn load_session(&self, id: SessionId) -> PersistResult<Option<SessionReport>> {
        let payload: Option<Vec<u8>> = self
            .conn
            .query_row("SELECT payload FROM sessions WHERE id = ?1", params![id], |row| {
                row.get(0)
            })
            .optional()?;

        let Some(payload) = payload else {
            return Ok(None);
        };

        let env: ReportEnvelope = serde_json::from_slice(&payload)?;
        if env.format_version != REPORT_FORMAT_VERSION {
            return Err(PersistError::Message(format!(
                "unsupported report format version: {}",
                env.format_version
            )));
        }
        Ok(Some(env.report))
    }

    /// Number of stored sessions.
    pub fn session_count(&self) -> PersistResult<usize> {
        let n: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM sessions", [], |row| row.get(0))?;
        Ok(n as usize)
    }

    /// `(callsign, distance_km)` of every stored contact with `callsign`.
    pub fn distances_for_call(&self, callsign: &str) -> PersistResult<Vec<(String, Option<i64>)>> {
        let mut stmt = self.conn.prepare(
            "SELECT callsign, distance_km FROM qsos WHERE callsign = ?1 ORDER BY session_id, idx",
        )?;
        let rows = stmt.query_map(params![callsign], |row| {
            Ok((row.get::<_, String>(0)?, row.get::<_, Option<i64>>(1)?))
        })?;

        let mut out = Vec::new();
        for row in rows {
            out.push(row?);
        }
        Ok(out)
    }
}

impl ReportSink for SqliteReportSink {
    fn name(&self) -> &'static str {
        "sqlite"
    }

    fn write_report(&mut self, source: &Path, report: &SessionReport) -> PersistResult<PathBuf> {
        self.insert_session(source, report)?;
        Ok(self.path.clone())
    }

    fn flush(&mut self) -> PersistResult<()> {
        self.conn.execute_batch("PRAGMA wal_checkpoint(PASSIVE);")?;
        Ok(())
    }
}

fn now_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}
