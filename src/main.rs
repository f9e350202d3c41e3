use clap::{Args, Parser, Subcommand};
use easydump::backups::Progress;
use easydump::{Config, ExportFormat, SourceKind, parse_table_list, run};
use std::path::PathBuf;
use std::process;
use tracing::error;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "easydump")]
#[command(version, about = "Exports database tables to JSON documents or SQL insert scripts.")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    ///Write every table into a single file of INSERT statements.
    Sql(SqlCommand),
    ///Write every table into its own JSON document.
    Json(JsonCommand),
}

#[derive(Args, Debug)]
struct SqlCommand {
    #[arg(long, value_enum, default_value_t = SourceKind::Database)]
    source: SourceKind,

    ///File name prefix for the backup file.
    #[arg(long)]
    prefix: Option<String>,

    #[command(flatten)]
    common: CommonArgs,
}

#[derive(Args, Debug)]
struct JsonCommand {
    #[arg(long, value_enum, default_value_t = SourceKind::Rest)]
    source: SourceKind,

    #[command(flatten)]
    common: CommonArgs,
}

#[derive(Args, Debug)]
struct CommonArgs {
    ///Tables to back up, separated by `;`. Discovers all base tables when omitted.
    #[arg(long, value_name = "TABLES")]
    tables: Option<String>,

    ///Directory the backup is written to.
    #[arg(short, long, value_name = "DIR")]
    output: Option<PathBuf>,
}

impl CommonArgs {
    fn apply(&self, config: &mut Config) {
        if let Some(tables) = &self.tables {
            config.database_tables = parse_table_list(tables);
        }
        if let Some(output) = &self.output {
            config.backup_directory = output.clone();
        }
    }
}

impl Commands {
    fn configure(&self, config: &mut Config) -> (ExportFormat, SourceKind) {
        match self {
            Commands::Sql(args) => {
                args.common.apply(config);
                if let Some(prefix) = &args.prefix {
                    config.backup_prefix = prefix.clone();
                }
                (ExportFormat::Sql, args.source)
            }
            Commands::Json(args) => {
                args.common.apply(config);
                (ExportFormat::Json, args.source)
            }
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("easydump=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    //Detect parsing errors in the .env file only.
    if let Err(e @ dotenvy::Error::LineParse(..)) = dotenvy::dotenv() {
        eprintln!("Error parsing .env file\n{e}");
        process::exit(1);
    }

    let mut config = Config::build().unwrap_or_else(|error| {
        eprintln!("Could not build config\n{error}");
        process::exit(1);
    });
    let (format, source) = cli.command.configure(&mut config);

    println!("🔄 Starting backup...");
    let result = run(&config, format, source, &mut |event| match event {
        Progress::TablesFound(count) => println!("📋 {count} tables found"),
        Progress::TableFinished(table) => println!("{table}"),
    })
    .await;
    let report = match result {
        Ok(report) => report,
        Err(e) => {
            error!(error = %e, "backup aborted");
            eprintln!("❌ Error: {e:#}");
            process::exit(1);
        }
    };

    for artifact in report.artifacts.iter() {
        println!("✅ Backup written: {}", artifact.display());
    }
    let failed = report.failed().count();
    if failed > 0 {
        println!("{} of {} tables failed", failed, report.tables.len());
    }
}
