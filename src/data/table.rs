use crate::data::{Identifier, Value};
use anyhow::{Result, bail};

///The column names and rows of one table as they were at fetch time.
///
///Every row holds exactly one value per column, in column order.
#[derive(Debug, Clone, PartialEq)]
pub struct TableData {
    name: Identifier,
    columns: Vec<String>,
    rows: Vec<Vec<Value>>,
}

impl TableData {
    pub fn new(name: Identifier, columns: Vec<String>) -> TableData {
        TableData {
            name,
            columns,
            rows: Vec::new(),
        }
    }

    ///Builds a table from an array of JSON objects, as returned by a REST endpoint.
    ///
    ///Columns are ordered by first appearance across all records. A key missing from a record
    ///is treated as null for that row.
    pub fn from_records(name: Identifier, records: Vec<serde_json::Value>) -> Result<TableData> {
        let mut objects = Vec::with_capacity(records.len());
        let mut columns: Vec<String> = Vec::new();
        for (i, record) in records.into_iter().enumerate() {
            let serde_json::Value::Object(object) = record else {
                bail!("Record {i} of {name} is not an object.");
            };
            for key in object.keys() {
                if !columns.contains(key) {
                    columns.push(key.clone());
                }
            }
            objects.push(object);
        }

        let mut table = TableData::new(name, columns);
        for mut object in objects {
            let row = table
                .columns
                .iter()
                .map(|column| object.remove(column).map(Value::from).unwrap_or(Value::Null))
                .collect();
            table.push_row(row)?;
        }
        Ok(table)
    }

    pub fn push_row(&mut self, row: Vec<Value>) -> Result<()> {
        if row.len() != self.columns.len() {
            bail!(
                "Row has {} values but {} has {} columns.",
                row.len(),
                self.name,
                self.columns.len()
            );
        }
        self.rows.push(row);
        Ok(())
    }

    pub fn name(&self) -> &Identifier {
        &self.name
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<Value>] {
        &self.rows
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    ///One JSON object per row with keys in column order.
    pub fn to_records(&self) -> Vec<serde_json::Value> {
        self.rows
            .iter()
            .map(|row| {
                let object: serde_json::Map<String, serde_json::Value> = self
                    .columns
                    .iter()
                    .cloned()
                    .zip(row.iter().map(Value::to_json))
                    .collect();
                serde_json::Value::Object(object)
            })
            .collect()
    }
}
