use crate::backups::{BackupReport, Progress, TableBackup};
use crate::readers::DataReader;
use crate::writers::DataWriter;
use anyhow::Result;
use tracing::{info, warn};

///Backs up several tables one after another into the same writer.
///
///Tables are processed in the order they were added. A table that fails does not stop the ones
///after it.
pub struct BatchBackup {
    tables: Vec<String>,
}

impl BatchBackup {
    pub fn new() -> BatchBackup {
        BatchBackup { tables: Vec::new() }
    }

    pub fn add_table(&mut self, name: String) {
        if !self.tables.contains(&name) {
            self.tables.push(name);
        }
    }

    pub fn tables(&self) -> &[String] {
        &self.tables
    }

    pub async fn execute(
        &self,
        reader: &dyn DataReader,
        writer: &mut dyn DataWriter,
        progress: &mut dyn FnMut(Progress<'_>),
    ) -> Result<BackupReport> {
        writer.setup()?;

        let mut report = BackupReport::default();
        for name in self.tables.iter() {
            info!(table = %name, "backing up");
            let table_report = TableBackup::new(name.clone()).execute(reader, writer).await;
            progress(Progress::TableFinished(&table_report));
            report.tables.push(table_report);
        }

        match writer.finish() {
            Ok(artifacts) => report.artifacts = artifacts,
            Err(e) => {
                if let Err(abort_error) = writer.abort() {
                    warn!(error = %abort_error, "discarding the unfinished backup failed");
                }
                return Err(e);
            }
        }
        Ok(report)
    }
}

impl Default for BatchBackup {
    fn default() -> Self {
        Self::new()
    }
}
