//! Command-line configuration for the `contactd` binary.

use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use clap::{Parser, ValueEnum};
use contactd_store::{JsonSnapshot, Snapshot, SqliteSnapshot, StoreError};

/// contactd - contact directory over HTTP
#[derive(Parser, Debug)]
#[command(name = "contactd")]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Address to listen on
    #[arg(long, env = "CONTACTD_BIND", default_value = "127.0.0.1:8080")]
    pub bind: SocketAddr,

    /// Snapshot file loaded at startup and written at shutdown.
    ///
    /// Without one the directory starts empty and is discarded on exit.
    #[arg(long, env = "CONTACTD_SNAPSHOT")]
    pub snapshot: Option<PathBuf>,

    /// Snapshot format (inferred from the file extension when omitted)
    #[arg(long, value_enum)]
    pub format: Option<SnapshotFormat>,

    /// Log filter, e.g. `info` or `contactd=debug` (overrides RUST_LOG)
    #[arg(long)]
    pub log: Option<String>,
}

/// On-disk snapshot formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SnapshotFormat {
    Json,
    Sqlite,
}

impl SnapshotFormat {
    /// `.db`, `.sqlite` and `.sqlite3` are SQLite; anything else is JSON.
    pub fn infer(path: &Path) -> Self {
        let ext = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase);
        match ext.as_deref() {
            Some("db" | "sqlite" | "sqlite3") => SnapshotFormat::Sqlite,
            _ => SnapshotFormat::Json,
        }
    }
}

impl Args {
    /// The configured snapshot, if any, with its resolved format.
    pub fn snapshot_target(&self) -> Option<(&Path, SnapshotFormat)> {
        self.snapshot.as_deref().map(|path| {
            let format = self.format.unwrap_or_else(|| SnapshotFormat::infer(path));
            (path, format)
        })
    }
}

/// Open the snapshot backend for `path`.
pub fn open_snapshot(path: &Path, format: SnapshotFormat) -> Result<Box<dyn Snapshot>, StoreError> {
    Ok(match format {
        SnapshotFormat::Json => Box::new(JsonSnapshot::new(path)),
        SnapshotFormat::Sqlite => Box::new(SqliteSnapshot::open(path)?),
    })
}
