//! Horse catalog
//!
//! Loaded once at startup from a CSV file with a header line and five
//! columns: `name,mud_rating,grass_rating,dirt_rating,preferred_length`.
//! Rows with the wrong column count or unparseable numbers are skipped.

use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::sync::Arc;

use rand::Rng;
use rand::seq::SliceRandom;
use serde::Deserialize;

use crate::error::CatalogError;
use crate::sim::Horse;

const COLUMNS: usize = 5;

/// One CSV row, in column order
#[derive(Debug, Deserialize)]
struct HorseRecord {
    name: String,
    mud_rating: i32,
    grass_rating: i32,
    dirt_rating: i32,
    preferred_length: f64,
}

impl From<HorseRecord> for Horse {
    fn from(r: HorseRecord) -> Self {
        Horse::new(
            r.name,
            r.mud_rating,
            r.grass_rating,
            r.dirt_rating,
            r.preferred_length,
        )
    }
}

/// The pool of horses races are drawn from
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    horses: Vec<Arc<Horse>>,
}

impl Catalog {
    pub fn new(horses: Vec<Horse>) -> Self {
        Self {
            horses: horses.into_iter().map(Arc::new).collect(),
        }
    }

    /// Load from a CSV file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let catalog = Self::from_reader(file)?;
        log::info!("Loaded {} horses from {}", catalog.len(), path.display());
        Ok(catalog)
    }

    /// Parse CSV from any reader
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, CatalogError> {
        let mut csv = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let mut horses = Vec::new();
        for (i, row) in csv.records().enumerate() {
            // Header is line 1
            let line = i + 2;
            let record = match row {
                Ok(record) => record,
                Err(e) if e.is_io_error() => return Err(e.into()),
                Err(e) => {
                    log::warn!("Skipping catalog line {line}: {e}");
                    continue;
                }
            };
            if record.len() != COLUMNS {
                log::warn!(
                    "Skipping catalog line {line}: expected {COLUMNS} columns, found {}",
                    record.len()
                );
                continue;
            }
            match record.deserialize::<HorseRecord>(None) {
                Ok(horse) if !(horse.preferred_length.is_finite() && horse.preferred_length > 0.0) => {
                    log::warn!(
                        "Skipping catalog line {line}: preferred length {} is not a positive furlong count",
                        horse.preferred_length
                    );
                }
                Ok(horse) => horses.push(horse.into()),
                Err(e) => log::warn!("Skipping catalog line {line}: {e}"),
            }
        }
        Ok(Self::new(horses))
    }

    pub fn len(&self) -> usize {
        self.horses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.horses.is_empty()
    }

    pub fn horses(&self) -> &[Arc<Horse>] {
        &self.horses
    }

    /// `n` distinct horses in random order, or the whole pool if smaller
    pub fn sample<R: Rng + ?Sized>(&self, n: usize, rng: &mut R) -> Vec<Arc<Horse>> {
        let mut pool = self.horses.clone();
        pool.shuffle(rng);
        pool.truncate(n);
        pool
    }
}
