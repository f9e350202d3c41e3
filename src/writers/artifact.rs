use anyhow::{Result, bail};
use chrono::{Local, NaiveDateTime};
use std::fs::{self, File, OpenOptions};
use std::io::{BufWriter, ErrorKind, Write};
use std::path::{Path, PathBuf};

///Wall-clock time a run started at. Every artifact of the run is named after it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BackupStamp(NaiveDateTime);

impl BackupStamp {
    pub fn now() -> BackupStamp {
        BackupStamp(Local::now().naive_local())
    }

    pub fn file_component(&self) -> String {
        self.0.format("%Y%m%d_%H%M%S").to_string()
    }

    pub fn header_component(&self) -> String {
        self.0.format("%Y-%m-%d %H:%M:%S%.6f").to_string()
    }
}

impl From<NaiveDateTime> for BackupStamp {
    fn from(value: NaiveDateTime) -> Self {
        BackupStamp(value)
    }
}

///`<context>_<YYYYMMDD>_<HHMMSS>.<extension>`
pub fn artifact_name(context: &str, stamp: &BackupStamp, extension: &str) -> String {
    format!("{}_{}.{}", context, stamp.file_component(), extension)
}

///An output file that only appears under its final name once it is complete.
///
///Content goes to a `.temp` sibling; [`ArtifactFile::commit`] renames it into place. Dropping an
///uncommitted artifact removes the temp file.
pub struct ArtifactFile {
    file_path: PathBuf,
    temp_path: PathBuf,
    writer: Option<BufWriter<File>>,
}

impl ArtifactFile {
    pub fn create(file_path: PathBuf) -> Result<ArtifactFile> {
        if file_path.exists() {
            bail!("{} already exists.", file_path.display());
        }
        let mut temp_path = file_path.clone();
        temp_path.set_extension("temp");
        let file = OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&temp_path)?;
        Ok(ArtifactFile {
            file_path,
            temp_path,
            writer: Some(BufWriter::new(file)),
        })
    }

    pub fn path(&self) -> &Path {
        &self.file_path
    }

    pub fn write_str(&mut self, content: &str) -> Result<()> {
        if let Some(ref mut writer) = self.writer {
            writer.write_all(content.as_bytes())?;
        } else {
            bail!("No file handle.")
        }
        Ok(())
    }

    pub fn commit(mut self) -> Result<PathBuf> {
        let Some(writer) = self.writer.take() else {
            bail!("Artifact {} was already closed.", self.file_path.display());
        };
        let file = writer.into_inner().map_err(|e| e.into_error())?;
        file.sync_all()?;
        drop(file);
        fs::rename(&self.temp_path, &self.file_path)?;
        Ok(self.file_path.clone())
    }

    pub fn abort(mut self) -> Result<()> {
        self.writer.take();
        remove_if_exists(&self.temp_path)
    }
}

impl Drop for ArtifactFile {
    fn drop(&mut self) {
        if self.writer.take().is_some() {
            let _ = remove_if_exists(&self.temp_path);
        }
    }
}

fn remove_if_exists(path: &Path) -> Result<()> {
    if let Err(e) = fs::remove_file(path) {
        if e.kind() != ErrorKind::NotFound {
            bail!(e);
        }
    }
    Ok(())
}
