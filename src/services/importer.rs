use std::time::Instant;

use crate::config::ImportConfig;
use crate::error::{ImportError, Stage};
use crate::models::PlanetRecord;
use crate::services::database::{Connector, PlanetStore};
use crate::services::source::load_planets;

#[derive(Debug, Clone, PartialEq)]
pub struct ImportedPlanet {
    /// Store-assigned `_id`, distinct from the record's own `id`.
    pub object_id: String,
    pub id: Option<i64>,
    pub name: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ImportReport {
    pub deleted: u64,
    pub inserted: Vec<ImportedPlanet>,
    /// Document count re-read after the insert.
    pub total: u64,
}

/// Replaces the planets collection with the contents of the data file.
pub struct Importer {
    config: ImportConfig,
}

impl Importer {
    pub fn new(config: ImportConfig) -> Self {
        Self { config }
    }

    pub async fn run<C: Connector>(&self, connector: &C) -> Result<ImportReport, ImportError> {
        let start = Instant::now();

        let raw = load_planets(&self.config.data_file).await?;
        tracing::info!(
            path = %self.config.data_file.display(),
            records = raw.len(),
            "loaded planet data"
        );

        println!("Connecting to MongoDB...");
        let store = connector
            .connect(&self.config.mongo)
            .await
            .map_err(|source| ImportError::Connection { source })?;
        println!("✅ Connected to MongoDB successfully!\n");

        println!("Clearing existing planet data...");
        let deleted = store
            .delete_all()
            .await
            .map_err(|source| ImportError::storage(Stage::Reset, source))?;
        tracing::info!(deleted, collection = %self.config.mongo.collection, "cleared collection");
        println!("✅ Existing data cleared\n");

        println!("Importing planet data...");
        let planets = coerce_all(&raw)?;
        let object_ids = store
            .insert_batch(&planets)
            .await
            .map_err(|source| ImportError::storage(Stage::Insert, source))?;
        println!("✅ Successfully imported {} planets!\n", planets.len());

        println!("Imported planets:");
        for planet in &planets {
            println!("  - {}", planet.summary());
        }

        println!("\nVerifying data...");
        let total = store
            .count()
            .await
            .map_err(|source| ImportError::storage(Stage::Verify, source))?;
        println!("✅ Total planets in database: {}", total);

        store
            .close()
            .await
            .map_err(|source| ImportError::storage(Stage::Disconnect, source))?;
        println!("\n✅ Database connection closed. Import complete!");

        tracing::info!(
            inserted = planets.len(),
            total,
            elapsed = ?start.elapsed(),
            "import finished"
        );

        let inserted = planets
            .into_iter()
            .zip(object_ids)
            .map(|(planet, object_id)| ImportedPlanet {
                object_id,
                id: planet.id,
                name: planet.name,
            })
            .collect();

        Ok(ImportReport {
            deleted,
            inserted,
            total,
        })
    }
}

// The whole batch is checked before anything is written.
fn coerce_all(raw: &[serde_json::Value]) -> Result<Vec<PlanetRecord>, ImportError> {
    raw.iter()
        .enumerate()
        .map(|(index, value)| {
            PlanetRecord::coerce(value).map_err(|source| ImportError::Rejected { index, source })
        })
        .collect()
}
