use std::{
    path::{Path, PathBuf},
    time::Duration,
};

use tabula_list::{DynRecord, Value};

use crate::{DataError, ID_FIELD, Sector};

/// Anything that can produce the records of a sector
#[async_trait::async_trait]
pub trait RecordSource: Send + Sync {
    /// Short label shown in the status line
    fn name(&self) -> &str;

    async fn fetch(&self, sector: Sector) -> Result<Vec<DynRecord>, DataError>;
}

/// Checks that every record carries a unique, non-empty identifier
fn validate(
    sector: Sector,
    records: Vec<DynRecord>,
) -> Result<Vec<DynRecord>, DataError> {
    let mut seen = std::collections::HashSet::with_capacity(records.len());
    for (index, record) in records.iter().enumerate() {
        let id = match record.get(ID_FIELD) {
            None | Some(Value::Null) => {
                return Err(DataError::InvalidDataset {
                    sector,
                    reason: format!("record {index} has no `{ID_FIELD}`"),
                });
            }
            Some(id) => id.to_string(),
        };
        if !seen.insert(id.clone()) {
            return Err(DataError::InvalidDataset {
                sector,
                reason: format!("duplicate `{ID_FIELD}` {id}"),
            });
        }
    }
    Ok(records)
}

fn parse(sector: Sector, json: &str) -> Result<Vec<DynRecord>, DataError> {
    let records: Vec<DynRecord> = serde_json::from_str(json)?;
    validate(sector, records)
}

const fn bundled(sector: Sector) -> &'static str {
    match sector {
        Sector::Hr => include_str!("../datasets/hr.json"),
        Sector::Crm => include_str!("../datasets/crm.json"),
        Sector::Accounting => include_str!("../datasets/accounting.json"),
        Sector::Ecommerce => include_str!("../datasets/ecommerce.json"),
        Sector::Hardware => include_str!("../datasets/hardware.json"),
        Sector::Restaurant => include_str!("../datasets/restaurant.json"),
        Sector::RealEstate => include_str!("../datasets/real-estate.json"),
        Sector::Laundry => include_str!("../datasets/laundry.json"),
        Sector::Law => include_str!("../datasets/law.json"),
        Sector::Beauty => include_str!("../datasets/beauty.json"),
        Sector::Gym => include_str!("../datasets/gym.json"),
        Sector::Logistics => include_str!("../datasets/logistics.json"),
    }
}

/// Serves the datasets compiled into the binary, optionally after a
/// simulated network delay
#[derive(Debug, Clone, Default)]
pub struct MockSource {
    latency: Duration,
}

impl MockSource {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            latency: Duration::ZERO,
        }
    }

    #[must_use]
    pub const fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }
}

#[async_trait::async_trait]
impl RecordSource for MockSource {
    fn name(&self) -> &str {
        "mock"
    }

    async fn fetch(&self, sector: Sector) -> Result<Vec<DynRecord>, DataError> {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
        let records = parse(sector, bundled(sector))?;
        tracing::debug!(%sector, count = records.len(), "loaded bundled dataset");
        Ok(records)
    }
}

/// Reads `<dir>/<slug>.json` for each sector
#[derive(Debug, Clone)]
pub struct JsonDirSource {
    dir: PathBuf,
}

impl JsonDirSource {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    #[must_use]
    pub fn path_for(&self, sector: Sector) -> PathBuf {
        self.dir.join(format!("{}.json", sector.slug()))
    }
}

#[async_trait::async_trait]
impl RecordSource for JsonDirSource {
    fn name(&self) -> &str {
        "json"
    }

    async fn fetch(&self, sector: Sector) -> Result<Vec<DynRecord>, DataError> {
        let path = self.path_for(sector);
        let json = match tokio::fs::read_to_string(&path).await {
            Ok(json) => json,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(DataError::DatasetMissing { sector, path });
            }
            Err(e) => return Err(e.into()),
        };
        let records = parse(sector, &json)?;
        tracing::debug!(
            %sector,
            path = %path.display(),
            count = records.len(),
            "loaded dataset from disk"
        );
        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use tabula_list::Record;

    use super::*;

    #[tokio::test]
    async fn test_every_bundled_dataset_loads() {
        let source = MockSource::new();
        for sector in Sector::ALL {
            let records = source.fetch(sector).await.unwrap();
            assert!(!records.is_empty(), "{sector} is empty");
            let schema = sector.schema();
            for column in schema.columns {
                assert!(
                    records.iter().any(|r| !r.field(column.key).is_null()),
                    "{sector}: column {} never has a value",
                    column.key
                );
            }
        }
    }

    #[tokio::test]
    async fn test_latency_is_applied() {
        let source = MockSource::new().with_latency(Duration::from_millis(20));
        let started = std::time::Instant::now();
        source.fetch(Sector::Gym).await.unwrap();
        assert!(started.elapsed() >= Duration::from_millis(20));
    }

    #[tokio::test]
    async fn test_json_dir_reads_sector_file() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("real-estate.json"),
            r#"[{"id": "P-1", "price": 250000}, {"id": "P-2", "price": null}]"#,
        )
        .unwrap();

        let source = JsonDirSource::new(dir.path());
        let records = source.fetch(Sector::RealEstate).await.unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].field("price").as_number(), Some(250_000.0));
        assert!(records[1].field("price").is_null());
    }

    #[tokio::test]
    async fn test_json_dir_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let source = JsonDirSource::new(dir.path());
        let err = source.fetch(Sector::Law).await.unwrap_err();
        assert!(matches!(
            err,
            DataError::DatasetMissing { sector: Sector::Law, .. }
        ));
    }

    #[tokio::test]
    async fn test_json_dir_rejects_bad_records() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("gym.json");
        let source = JsonDirSource::new(dir.path());

        std::fs::write(&path, r#"[{"id": "A"}, {"name": "no id"}]"#).unwrap();
        assert!(matches!(
            source.fetch(Sector::Gym).await,
            Err(DataError::InvalidDataset { .. })
        ));

        std::fs::write(&path, r#"[{"id": "A"}, {"id": "A"}]"#).unwrap();
        assert!(matches!(
            source.fetch(Sector::Gym).await,
            Err(DataError::InvalidDataset { .. })
        ));

        std::fs::write(&path, "not json").unwrap();
        assert!(matches!(
            source.fetch(Sector::Gym).await,
            Err(DataError::Json(_))
        ));
    }
}
