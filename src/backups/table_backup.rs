use crate::backups::{TableReport, TableStatus};
use crate::data::Identifier;
use crate::readers::DataReader;
use crate::writers::DataWriter;
use anyhow::Result;
use std::path::PathBuf;
use tracing::{info, warn};

///Reads a table from the specified database and hands it to the writer.
pub struct TableBackup {
    table_name: String,
}

impl TableBackup {
    pub fn new(table_name: String) -> TableBackup {
        TableBackup { table_name }
    }

    ///Attempts the table exactly once. Failures are reported, never propagated.
    pub async fn execute(&self, reader: &dyn DataReader, writer: &mut dyn DataWriter) -> TableReport {
        let status = match self.run(reader, writer).await {
            Ok((rows, artifact)) => {
                info!(table = %self.table_name, rows, artifact = %artifact.display(), "table saved");
                TableStatus::Exported { rows, artifact }
            }
            Err(e) => {
                warn!(table = %self.table_name, error = %e, "table backup failed");
                TableStatus::Failed(format!("{e:#}"))
            }
        };
        TableReport {
            table: self.table_name.clone(),
            status,
        }
    }

    async fn run(
        &self,
        reader: &dyn DataReader,
        writer: &mut dyn DataWriter,
    ) -> Result<(usize, PathBuf)> {
        let table = Identifier::parse(&self.table_name)?;
        let data = reader.read_table(&table).await?;
        let artifact = writer.write(&data)?;
        Ok((data.row_count(), artifact))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backups::test_support::FakeReader;
    use crate::writers::{BackupStamp, JsonWriter};

    #[tokio::test]
    async fn exported() {
        let dir = tempfile::tempdir().unwrap();
        let reader = FakeReader::new().with_table("usuarios", &["id", "nome"], 3);
        let mut writer = JsonWriter::new(dir.path().to_path_buf(), BackupStamp::now());
        writer.setup().unwrap();

        let report = TableBackup::new("usuarios".into()).execute(&reader, &mut writer).await;
        match report.status {
            TableStatus::Exported { rows, artifact } => {
                assert_eq!(rows, 3);
                assert!(artifact.exists());
            }
            TableStatus::Failed(e) => panic!("unexpected failure: {e}"),
        }
    }

    #[tokio::test]
    async fn invalid_name_is_never_queried() {
        let dir = tempfile::tempdir().unwrap();
        let reader = FakeReader::new();
        let mut writer = JsonWriter::new(dir.path().to_path_buf(), BackupStamp::now());
        writer.setup().unwrap();

        let report = TableBackup::new("users; DROP TABLE users".into())
            .execute(&reader, &mut writer)
            .await;
        assert!(!report.is_success());
        assert!(reader.reads().is_empty());
    }

    #[tokio::test]
    async fn read_failure_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let reader = FakeReader::new().with_failing_table("vendas");
        let mut writer = JsonWriter::new(dir.path().to_path_buf(), BackupStamp::now());
        writer.setup().unwrap();

        let report = TableBackup::new("vendas".into()).execute(&reader, &mut writer).await;
        assert_eq!(
            report.status,
            TableStatus::Failed("relation \"vendas\" is unavailable".into())
        );
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }
}
