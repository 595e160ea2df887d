mod config;
mod error;
mod helpers;
mod models;
mod services;

use config::{ImportConfig, MongoConfig};
use error::ImportError;
use helpers::logging::init_logging;
use services::database::MongoConnector;
use services::importer::{ImportReport, Importer};
use std::io::Write;
use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    // A missing .env is fine; the environment and defaults still apply.
    let _ = dotenv::dotenv();
    init_logging();

    let config = ImportConfig::new(MongoConfig::from_env());
    tracing::debug!(
        uri = %config.mongo.uri,
        authenticated = config.mongo.credentials.is_some(),
        collection = %config.mongo.collection,
        "starting planet import"
    );

    let outcome = Importer::new(config).run(&MongoConnector).await;
    ExitCode::from(finish(outcome, &mut std::io::stderr()))
}

/// Maps the import outcome to an exit status. A failure writes exactly one
/// line to `stderr`.
fn finish(outcome: Result<ImportReport, ImportError>, stderr: &mut impl Write) -> u8 {
    match outcome {
        Ok(report) => {
            for planet in &report.inserted {
                tracing::debug!(object_id = %planet.object_id, id = ?planet.id, name = ?planet.name, "stored planet");
            }
            tracing::debug!(deleted = report.deleted, total = report.total, "import report");
            0
        }
        Err(err) => {
            tracing::debug!(stage = %err.stage(), kind = ?err.kind(), "import failed");
            let _ = writeln!(stderr, "❌ Error importing planets: {}", err);
            1
        }
    }
}
