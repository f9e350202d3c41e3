use crate::config::RestConfig;
use crate::data::{Identifier, TableData};
use crate::readers::DataReader;
use anyhow::{Result, bail};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

#[derive(Serialize)]
struct ExecSql<'a> {
    query: &'a str,
}

///A row of the catalog query, which the RPC returns either as an object or as a bare name.
#[derive(Deserialize, Debug, PartialEq)]
#[serde(untagged)]
enum CatalogEntry {
    Row { table_name: String },
    Name(String),
}

impl CatalogEntry {
    fn into_name(self) -> String {
        match self {
            CatalogEntry::Row { table_name } => table_name,
            CatalogEntry::Name(name) => name,
        }
    }
}

///Reads tables through an authenticated REST API that exposes one resource per table.
pub struct RestReader {
    client: reqwest::Client,
    base_url: String,
    anon_key: String,
    catalog_key: String,
    schema: Identifier,
}

impl RestReader {
    pub fn new(config: &RestConfig) -> Result<RestReader> {
        Ok(RestReader {
            client: reqwest::Client::builder().build()?,
            base_url: config.url.trim_end_matches('/').to_string(),
            anon_key: config.anon_key.clone(),
            catalog_key: config.catalog_key().to_string(),
            schema: Identifier::parse(&config.schema)?,
        })
    }

    fn catalog_url(&self) -> String {
        format!("{}/rest/v1/rpc/exec_sql", self.base_url)
    }

    fn table_url(&self, table: &Identifier) -> String {
        format!("{}/rest/v1/{}", self.base_url, table)
    }

    fn catalog_query(&self) -> String {
        format!(
            "SELECT table_name FROM information_schema.tables \
             WHERE table_schema = '{}' AND table_type = 'BASE TABLE' \
             ORDER BY table_name",
            self.schema
        )
    }
}

#[async_trait]
impl DataReader for RestReader {
    async fn list_tables(&self) -> Result<Vec<String>> {
        let query = self.catalog_query();
        let response = self
            .client
            .post(self.catalog_url())
            .header("apikey", &self.catalog_key)
            .bearer_auth(&self.catalog_key)
            .json(&ExecSql { query: &query })
            .send()
            .await?;
        let status = response.status();
        if !status.is_success() {
            bail!("Listing tables failed with HTTP {status}");
        }
        let entries: Vec<CatalogEntry> = response.json().await?;
        Ok(entries.into_iter().map(CatalogEntry::into_name).collect())
    }

    async fn read_table(&self, table: &Identifier) -> Result<TableData> {
        let response = self
            .client
            .get(self.table_url(table))
            .header("apikey", &self.anon_key)
            .bearer_auth(&self.anon_key)
            .send()
            .await?;
        let status = response.status();
        if !status.is_success() {
            bail!("HTTP {status}");
        }
        let records: Vec<serde_json::Value> = response.json().await?;
        debug!(table = %table, records = records.len(), "fetched");
        TableData::from_records(table.clone(), records)
    }
}
