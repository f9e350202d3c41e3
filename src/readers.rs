use crate::data::{Identifier, TableData};
use anyhow::Result;
use async_trait::async_trait;

///A database that can list its tables and hand back the full contents of one of them.
#[async_trait]
pub trait DataReader: Send + Sync {
    ///Names of the base tables in the working schema.
    async fn list_tables(&self) -> Result<Vec<String>>;

    ///All rows of `table`, with column names in the order the values are stored.
    async fn read_table(&self, table: &Identifier) -> Result<TableData>;
}

mod mysql_reader;
mod rest_reader;
pub use mysql_reader::MysqlReader;
pub use rest_reader::RestReader;
