use crate::calendar::Month;
use crate::error::StoreError;
use crate::records::RecordStore;

// Defaults for the next billing period of one meter, derived from the
// last matching record in append order. `None` means no history: the
// caller must collect both values manually. A meter that has billed once
// never goes back to manual entry.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct MeterDefaults {
    pub previous_reading: Option<u32>,
    pub period: Option<Month>,
}

pub fn defaults(
    store: &impl RecordStore,
    username: &str,
    meter_serial: &str,
) -> Result<MeterDefaults, StoreError> {
    let history = store.for_meter(username, meter_serial)?;
    let last = history.last();
    Ok(MeterDefaults {
        previous_reading: last.map(|r| r.current_reading),
        period: last.map(|r| r.month.succ()),
    })
}

pub fn last_reading(
    store: &impl RecordStore,
    username: &str,
    meter_serial: &str,
) -> Result<Option<u32>, StoreError> {
    Ok(defaults(store, username, meter_serial)?.previous_reading)
}

pub fn next_period(
    store: &impl RecordStore,
    username: &str,
    meter_serial: &str,
) -> Result<Option<Month>, StoreError> {
    Ok(defaults(store, username, meter_serial)?.period)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::billing::{BillingRecord, Tariff};
    use crate::records::MemoryStore;

    fn record(
        username: &str,
        serial: &str,
        month: Month,
        previous: u32,
        current: u32,
    ) -> BillingRecord {
        BillingRecord::new(
            username,
            serial,
            month,
            previous,
            current,
            &Tariff::residential(),
        )
    }

    #[test]
    fn empty_history_has_no_defaults() -> Result<(), StoreError> {
        let store = MemoryStore::new();
        let derived = defaults(&store, "ali", "MTR-1")?;
        assert_eq!(derived.previous_reading, None);
        assert_eq!(derived.period, None);
        Ok(())
    }

    #[test]
    fn single_record_fills_both_defaults() -> Result<(), StoreError> {
        let mut store = MemoryStore::new();
        store.append(record("ali", "MTR-1", Month::June, 100, 180))?;

        let derived = defaults(&store, "ali", "MTR-1")?;
        assert_eq!(derived.previous_reading, Some(180));
        assert_eq!(derived.period, Some(Month::July));
        Ok(())
    }

    #[test]
    fn last_append_wins_over_larger_earlier_readings() -> Result<(), StoreError>
    {
        let mut store = MemoryStore::new();
        // A meter swap can legitimately reset the counter; append order
        // stays authoritative, not magnitude.
        store.append(record("ali", "MTR-1", Month::June, 500, 900))?;
        store.append(record("ali", "MTR-1", Month::July, 0, 40))?;

        assert_eq!(last_reading(&store, "ali", "MTR-1")?, Some(40));
        assert_eq!(next_period(&store, "ali", "MTR-1")?, Some(Month::August));
        Ok(())
    }

    #[test]
    fn other_meters_and_customers_are_ignored() -> Result<(), StoreError> {
        let mut store = MemoryStore::new();
        store.append(record("ali", "MTR-2", Month::June, 0, 75))?;
        store.append(record("sara", "MTR-1", Month::March, 0, 60))?;

        let derived = defaults(&store, "ali", "MTR-1")?;
        assert_eq!(derived.previous_reading, None);
        assert_eq!(derived.period, None);
        Ok(())
    }

    #[test]
    fn zero_reading_is_history_too() -> Result<(), StoreError> {
        let mut store = MemoryStore::new();
        store.append(record("ali", "MTR-1", Month::December, 0, 0))?;

        // A literal reading of zero still counts as history; only an
        // absent record reads as None.
        assert_eq!(last_reading(&store, "ali", "MTR-1")?, Some(0));
        assert_eq!(next_period(&store, "ali", "MTR-1")?, Some(Month::January));
        Ok(())
    }
}
