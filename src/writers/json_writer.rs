use crate::data::TableData;
use crate::writers::{ArtifactFile, BackupStamp, DataWriter, artifact_name};
use anyhow::Result;
use std::fs;
use std::path::PathBuf;

///An array of row objects, indented by two spaces, with non-ASCII text kept as is.
pub fn render_document(table: &TableData) -> Result<String> {
    Ok(serde_json::to_string_pretty(&table.to_records())?)
}

///Writes each table to its own `<table>_backup_<stamp>.json` document.
pub struct JsonWriter {
    root_directory: PathBuf,
    stamp: BackupStamp,
    artifacts: Vec<PathBuf>,
}

impl JsonWriter {
    pub fn new(root_directory: PathBuf, stamp: BackupStamp) -> JsonWriter {
        JsonWriter {
            root_directory,
            stamp,
            artifacts: Vec::new(),
        }
    }

    fn table_path(&self, table: &TableData) -> PathBuf {
        let context = format!("{}_backup", table.name());
        self.root_directory
            .join(artifact_name(&context, &self.stamp, "json"))
    }
}

impl DataWriter for JsonWriter {
    fn setup(&mut self) -> Result<()> {
        fs::create_dir_all(&self.root_directory)?;
        Ok(())
    }

    fn write(&mut self, table: &TableData) -> Result<PathBuf> {
        let document = render_document(table)?;
        let mut file = ArtifactFile::create(self.table_path(table))?;
        file.write_str(&document)?;
        let path = file.commit()?;
        self.artifacts.push(path.clone());
        Ok(path)
    }

    fn finish(&mut self) -> Result<Vec<PathBuf>> {
        Ok(std::mem::take(&mut self.artifacts))
    }

    //Each document is committed as soon as it is written, so there is nothing left to discard.
    fn abort(&mut self) -> Result<()> {
        Ok(())
    }
}
