use std::fmt;
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableStatus {
    Exported { rows: usize, artifact: PathBuf },
    Failed(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableReport {
    pub table: String,
    pub status: TableStatus,
}

impl TableReport {
    pub fn is_success(&self) -> bool {
        matches!(self.status, TableStatus::Exported { .. })
    }
}

impl fmt::Display for TableReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.status {
            TableStatus::Exported { rows, artifact } => write!(
                f,
                "✅ {}: {} rows saved to {}",
                self.table,
                rows,
                artifact.display()
            ),
            TableStatus::Failed(detail) => write!(f, "❌ {}: {}", self.table, detail),
        }
    }
}

///Events emitted while a run is in progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Progress<'a> {
    ///The table list was resolved. A failed discovery reports zero tables.
    TablesFound(usize),
    TableFinished(&'a TableReport),
}

///Outcome of a whole run: one entry per table, in the order they were processed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BackupReport {
    pub tables: Vec<TableReport>,
    pub artifacts: Vec<PathBuf>,
}

impl BackupReport {
    pub fn exported(&self) -> usize {
        self.tables.iter().filter(|t| t.is_success()).count()
    }

    pub fn failed(&self) -> impl Iterator<Item = &TableReport> {
        self.tables.iter().filter(|t| !t.is_success())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_lines() {
        let ok = TableReport {
            table: "usuarios".into(),
            status: TableStatus::Exported {
                rows: 3,
                artifact: PathBuf::from("usuarios_backup_20240101_000000.json"),
            },
        };
        let failed = TableReport {
            table: "vendas".into(),
            status: TableStatus::Failed("HTTP 404 Not Found".into()),
        };
        assert_eq!(
            ok.to_string(),
            "✅ usuarios: 3 rows saved to usuarios_backup_20240101_000000.json"
        );
        assert_eq!(failed.to_string(), "❌ vendas: HTTP 404 Not Found");

        let report = BackupReport {
            tables: vec![ok, failed],
            artifacts: Vec::new(),
        };
        assert_eq!(report.exported(), 1);
        assert_eq!(report.failed().count(), 1);
    }
}
