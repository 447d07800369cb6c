use std::fs::{self, File};
use std::io::BufReader;
use std::path::PathBuf;

use crate::billing::BillingRecord;
use crate::error::StoreError;

// Append-only history of billing records. Append order is the only
// ordering the records carry, and "latest" always means last match in
// that order.
pub trait RecordStore {
    fn append(&mut self, record: BillingRecord) -> Result<(), StoreError>;

    fn for_customer(
        &self,
        username: &str,
    ) -> Result<Vec<BillingRecord>, StoreError>;

    fn for_meter(
        &self,
        username: &str,
        meter_serial: &str,
    ) -> Result<Vec<BillingRecord>, StoreError> {
        Ok(self
            .for_customer(username)?
            .into_iter()
            .filter(|r| r.meter_serial == meter_serial)
            .collect())
    }
}

pub struct FileRecordStore {
    path: PathBuf,
}

impl FileRecordStore {
    pub fn new(path: &PathBuf) -> Self {
        Self { path: path.clone() }
    }

    fn load(&self) -> Result<Vec<BillingRecord>, StoreError> {
        if self.path.as_path().exists() {
            let file = File::open(&self.path)?;
            let reader = BufReader::new(file);
            Ok(serde_lexpr::from_reader(reader)?)
        } else {
            Ok(Vec::new())
        }
    }

    fn save(&self, records: &Vec<BillingRecord>) -> Result<(), StoreError> {
        let updated_path = self.path.with_extension("updated");
        let f = File::create(&updated_path)?;

        serde_lexpr::to_writer(f, records)?;
        fs::rename(updated_path, &self.path)?;
        Ok(())
    }
}

impl RecordStore for FileRecordStore {
    fn append(&mut self, record: BillingRecord) -> Result<(), StoreError> {
        let mut records = self.load()?;
        records.push(record);
        self.save(&records)
    }

    fn for_customer(
        &self,
        username: &str,
    ) -> Result<Vec<BillingRecord>, StoreError> {
        Ok(self
            .load()?
            .into_iter()
            .filter(|r| r.username == username)
            .collect())
    }
}

#[derive(Debug, Default)]
pub struct MemoryStore {
    records: Vec<BillingRecord>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl RecordStore for MemoryStore {
    fn append(&mut self, record: BillingRecord) -> Result<(), StoreError> {
        self.records.push(record);
        Ok(())
    }

    fn for_customer(
        &self,
        username: &str,
    ) -> Result<Vec<BillingRecord>, StoreError> {
        Ok(self
            .records
            .iter()
            .filter(|r| r.username == username)
            .cloned()
            .collect())
    }
}
