use crate::data::TableData;
use anyhow::Result;
use std::path::PathBuf;

///Serializes fetched tables into backup artifacts.
///
///`setup` is called once before the first table and `finish` once after the last. A failed
///`write` only affects the table being written; `abort` discards whatever has not been committed.
pub trait DataWriter: Send {
    fn setup(&mut self) -> Result<()>;
    ///Writes one table and returns the artifact that holds it.
    fn write(&mut self, table: &TableData) -> Result<PathBuf>;
    fn finish(&mut self) -> Result<Vec<PathBuf>>;
    fn abort(&mut self) -> Result<()>;
}

mod artifact;
mod json_writer;
mod sql_writer;
pub use artifact::{ArtifactFile, BackupStamp, artifact_name};
pub use json_writer::{JsonWriter, render_document};
pub use sql_writer::{SqlWriter, render_inserts};
