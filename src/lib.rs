use anyhow::Result;
use tracing::warn;

mod config;
pub use config::{Config, ConfigError, DatabaseConfig, RestConfig, parse_table_list};

pub mod backups;
pub mod data;
pub mod readers;
pub mod writers;

use crate::backups::{BackupReport, Progress, TableSelection, export};
use crate::readers::{MysqlReader, RestReader};
use crate::writers::{BackupStamp, DataWriter, JsonWriter, SqlWriter, artifact_name};

///Where rows come from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum SourceKind {
    ///Direct database connection.
    Database,
    ///Authenticated REST API.
    Rest,
}

///What the backup is written as.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    ///One `<prefix>_<stamp>.sql` file of INSERT statements for all tables.
    Sql,
    ///One `<table>_backup_<stamp>.json` document per table.
    Json,
}

fn create_writer(config: &Config, format: ExportFormat, stamp: BackupStamp) -> Box<dyn DataWriter> {
    match format {
        ExportFormat::Sql => {
            let name = artifact_name(&config.backup_prefix, &stamp, "sql");
            Box::new(SqlWriter::new(config.backup_directory.join(name), stamp))
        }
        ExportFormat::Json => Box::new(JsonWriter::new(config.backup_directory.clone(), stamp)),
    }
}

///Runs one backup.
///
///Errors are only returned for failures before the table loop starts (configuration, connection,
///opening the output) or when the output cannot be finalized. Individual table failures are in
///the report, and each of them is passed to `progress` as soon as it is done.
pub async fn run(
    config: &Config,
    format: ExportFormat,
    source: SourceKind,
    progress: &mut dyn FnMut(Progress<'_>),
) -> Result<BackupReport> {
    let stamp = BackupStamp::now();
    let selection = TableSelection::from_list(config.database_tables.clone());
    let mut writer = create_writer(config, format, stamp);

    match source {
        SourceKind::Database => {
            let reader = MysqlReader::connect(config.database()?).await?;
            let result = export(&reader, &selection, writer.as_mut(), progress).await;
            if let Err(e) = reader.disconnect().await {
                warn!(error = %e, "closing the connection pool failed");
            }
            result
        }
        SourceKind::Rest => {
            let reader = RestReader::new(config.rest()?)?;
            export(&reader, &selection, writer.as_mut(), progress).await
        }
    }
}
