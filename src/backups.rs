use crate::readers::DataReader;
use crate::writers::DataWriter;
use anyhow::Result;
use tracing::info;

mod batch_backup;
mod report;
mod table_backup;
mod table_list;
#[cfg(test)]
mod test_support;

pub use batch_backup::BatchBackup;
pub use report::{BackupReport, Progress, TableReport, TableStatus};
pub use table_backup::TableBackup;
pub use table_list::TableSelection;

///Resolves the tables to export and backs each of them up into `writer`.
///
///When discovery fails the writer is never set up, so the run leaves no files behind.
pub async fn export(
    reader: &dyn DataReader,
    selection: &TableSelection,
    writer: &mut dyn DataWriter,
    progress: &mut dyn FnMut(Progress<'_>),
) -> Result<BackupReport> {
    let Some(tables) = selection.resolve(reader).await else {
        progress(Progress::TablesFound(0));
        return Ok(BackupReport::default());
    };
    info!(tables = tables.len(), "tables found");
    progress(Progress::TablesFound(tables.len()));

    let mut backup = BatchBackup::new();
    for table in tables.into_iter() {
        backup.add_table(table);
    }
    backup.execute(reader, writer, progress).await
}
