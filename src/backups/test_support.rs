use crate::data::{Identifier, TableData, Value};
use crate::readers::DataReader;
use anyhow::{Result, bail};
use async_trait::async_trait;
use std::sync::Mutex;

///In-memory reader that records which tables were read.
pub struct FakeReader {
    tables: Vec<(String, Option<TableData>)>,
    discovery_fails: bool,
    reads: Mutex<Vec<String>>,
}

impl FakeReader {
    pub fn new() -> FakeReader {
        FakeReader {
            tables: Vec::new(),
            discovery_fails: false,
            reads: Mutex::new(Vec::new()),
        }
    }

    ///Adds a table whose first column is a row number and whose other columns hold text.
    pub fn with_table(mut self, name: &str, columns: &[&str], rows: usize) -> FakeReader {
        let mut table = TableData::new(
            Identifier::parse(name).unwrap(),
            columns.iter().map(|c| c.to_string()).collect(),
        );
        for i in 0..rows {
            let row = columns
                .iter()
                .enumerate()
                .map(|(c, column)| {
                    if c == 0 {
                        Value::Number((i + 1).to_string())
                    } else {
                        Value::Text(format!("{column} {}'s", i + 1))
                    }
                })
                .collect();
            table.push_row(row).unwrap();
        }
        self.tables.push((name.to_string(), Some(table)));
        self
    }

    pub fn with_failing_table(mut self, name: &str) -> FakeReader {
        self.tables.push((name.to_string(), None));
        self
    }

    pub fn discovery_fails(mut self) -> FakeReader {
        self.discovery_fails = true;
        self
    }

    pub fn reads(&self) -> Vec<String> {
        self.reads.lock().unwrap().clone()
    }
}

#[async_trait]
impl DataReader for FakeReader {
    async fn list_tables(&self) -> Result<Vec<String>> {
        if self.discovery_fails {
            bail!("HTTP 401 Unauthorized");
        }
        Ok(self.tables.iter().map(|(name, _)| name.clone()).collect())
    }

    async fn read_table(&self, table: &Identifier) -> Result<TableData> {
        self.reads.lock().unwrap().push(table.to_string());
        match self.tables.iter().find(|(name, _)| name == table.as_str()) {
            Some((_, Some(data))) => Ok(data.clone()),
            Some((_, None)) => bail!("relation \"{table}\" is unavailable"),
            None => bail!("relation \"{table}\" does not exist"),
        }
    }
}
