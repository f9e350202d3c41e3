use crate::data::{Identifier, TableData, Value};
use crate::writers::{ArtifactFile, BackupStamp, DataWriter};
use anyhow::{Result, bail};
use std::fs;
use std::path::PathBuf;

///Renders the INSERT block for one table, or nothing when the table has no rows.
///
///```text
///INSERT INTO t (id, name) VALUES
///(1, 'O''Brien'),
///(2, NULL);
///
///```
pub fn render_inserts(table: &TableData) -> Result<Option<String>> {
    if table.is_empty() {
        return Ok(None);
    }
    let columns = table
        .columns()
        .iter()
        .map(|column| Identifier::parse(column))
        .collect::<Result<Vec<_>, _>>()?;
    let columns: Vec<&str> = columns.iter().map(Identifier::as_str).collect();

    let mut block = format!("INSERT INTO {} ({}) VALUES\n", table.name(), columns.join(", "));
    let last = table.row_count() - 1;
    for (i, row) in table.rows().iter().enumerate() {
        let values: Vec<String> = row.iter().map(Value::to_sql_literal).collect();
        block.push('(');
        block.push_str(&values.join(", "));
        block.push(')');
        block.push_str(if i == last { ";\n\n" } else { ",\n" });
    }
    Ok(Some(block))
}

///Writes every table into one `.sql` file that starts with a generation comment.
pub struct SqlWriter {
    file_path: PathBuf,
    stamp: BackupStamp,
    file: Option<ArtifactFile>,
}

impl SqlWriter {
    pub fn new(file_path: PathBuf, stamp: BackupStamp) -> SqlWriter {
        SqlWriter {
            file_path,
            stamp,
            file: None,
        }
    }
}

impl DataWriter for SqlWriter {
    fn setup(&mut self) -> Result<()> {
        if let Some(parent) = self.file_path.parent() {
            fs::create_dir_all(parent)?;
        }
        let mut file = ArtifactFile::create(self.file_path.clone())?;
        file.write_str(&format!(
            "-- Backup generated at {}\n\n",
            self.stamp.header_component()
        ))?;
        self.file = Some(file);
        Ok(())
    }

    fn write(&mut self, table: &TableData) -> Result<PathBuf> {
        //Render first so a bad table never leaves half a statement in the file.
        let block = render_inserts(table)?;
        let Some(ref mut file) = self.file else {
            bail!("No file handle.");
        };
        if let Some(block) = block {
            file.write_str(&block)?;
        }
        Ok(self.file_path.clone())
    }

    fn finish(&mut self) -> Result<Vec<PathBuf>> {
        match self.file.take() {
            Some(file) => Ok(vec![file.commit()?]),
            None => bail!("Invalid SQL writer."),
        }
    }

    fn abort(&mut self) -> Result<()> {
        if let Some(file) = self.file.take() {
            file.abort()?;
        }
        Ok(())
    }
}
