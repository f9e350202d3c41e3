use crate::config::DatabaseConfig;
use crate::data::columns::ColumnData;
use crate::data::{Identifier, TableData};
use crate::readers::DataReader;
use anyhow::{Result, bail};
use async_trait::async_trait;
use futures::StreamExt;
use mysql_async::prelude::*;
use mysql_async::{Params, Pool, Row};
use tracing::{debug, info};

const CATALOG_QUERY: &str = r"SELECT table_name
    FROM information_schema.tables
    WHERE table_schema = ?
    AND table_type = 'BASE TABLE'
    ORDER BY table_name";

///The schema is a bound parameter, so any database name the server accepts works here.
fn catalog_params(schema: &str) -> Params {
    Params::Positional(vec![schema.into()])
}

///Reads tables over a direct connection pool.
///
///The pool must be released with [`MysqlReader::disconnect`] once the run is over.
pub struct MysqlReader {
    pool: Pool,
    schema: String,
}

impl MysqlReader {
    ///Opens the pool and checks that a connection can be established.
    pub async fn connect(config: &DatabaseConfig) -> Result<MysqlReader> {
        let pool = Pool::new(config.opts());
        match pool.get_conn().await {
            Ok(conn) => drop(conn),
            Err(e) => {
                pool.disconnect().await?;
                bail!("Could not connect to {}:{}: {e}", config.host, config.port);
            }
        }
        info!(host = %config.host, database = %config.database, "connected");
        Ok(MysqlReader {
            pool,
            schema: config.schema.clone(),
        })
    }

    pub async fn disconnect(self) -> Result<()> {
        self.pool.disconnect().await?;
        debug!("connection pool closed");
        Ok(())
    }
}

#[async_trait]
impl DataReader for MysqlReader {
    async fn list_tables(&self) -> Result<Vec<String>> {
        let mut conn = self.pool.get_conn().await?;
        let rows: Vec<(String,)> = conn.exec(CATALOG_QUERY, catalog_params(&self.schema)).await?;
        Ok(rows.into_iter().map(|(name,)| name).collect())
    }

    async fn read_table(&self, table: &Identifier) -> Result<TableData> {
        let mut conn = self.pool.get_conn().await?;
        let query = format!("SELECT * FROM {}", table);
        let mut stream = conn.exec_stream(query, Params::Empty).await?;

        let columns: Vec<ColumnData> = stream
            .columns()
            .iter()
            .map(|column| ColumnData::new(column.name_str().into_owned(), column.column_type()))
            .collect();
        for column in columns.iter() {
            debug!(table = %table, column = column.name(), column_type = ?column.column_type(), "column");
        }

        let names = columns.iter().map(|c| c.name().to_string()).collect();
        let mut data = TableData::new(table.clone(), names);

        while let Some(row_result) = stream.next().await {
            let row: Row = row_result?;
            let values = row
                .unwrap()
                .into_iter()
                .zip(columns.iter())
                .map(|(value, column)| column.convert(value))
                .collect::<Result<Vec<_>>>()?;
            data.push_row(values)?;
        }
        Ok(data)
    }
}
