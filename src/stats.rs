use std::fmt;

use num_format::{Locale, ToFormattedString};
use rust_decimal::{Decimal, RoundingStrategy};

use crate::billing::{BillingRecord, Money};

// One pass over a customer's history; `None` when there is nothing to
// summarize yet.
#[derive(Debug, PartialEq, Clone)]
pub struct UsageSummary {
    pub bills: usize,
    pub total_units: u64,
    pub total_amount: Money,
    pub highest_units: u32,
    pub lowest_units: u32,
}

impl UsageSummary {
    pub fn from_records<'a, I>(records: I) -> Option<Self>
    where
        I: IntoIterator<Item = &'a BillingRecord>,
    {
        let mut records = records.into_iter();
        let first = records.next()?;
        let mut summary = Self {
            bills: 1,
            total_units: u64::from(first.units_consumed),
            total_amount: first.total,
            highest_units: first.units_consumed,
            lowest_units: first.units_consumed,
        };

        for record in records {
            summary.bills += 1;
            summary.total_units += u64::from(record.units_consumed);
            summary.total_amount = summary.total_amount + record.total;
            summary.highest_units =
                summary.highest_units.max(record.units_consumed);
            summary.lowest_units =
                summary.lowest_units.min(record.units_consumed);
        }
        Some(summary)
    }

    pub fn average_units(&self) -> Decimal {
        (Decimal::from(self.total_units) / Decimal::from(self.bills))
            .round_dp_with_strategy(2, RoundingStrategy::MidpointNearestEven)
    }

    pub fn average_amount(&self) -> Money {
        self.total_amount / Decimal::from(self.bills)
    }
}

impl fmt::Display for UsageSummary {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "Total Bills Generated : {}", self.bills)?;
        writeln!(
            f,
            "Total Units Consumed  : {} units",
            self.total_units.to_formatted_string(&Locale::en)
        )?;
        writeln!(f, "Total Amount Billed   : {}", self.total_amount)?;
        writeln!(f, "Average Units/Month   : {} units", self.average_units())?;
        writeln!(f, "Average Bill/Month    : {}", self.average_amount())?;
        writeln!(
            f,
            "Highest Consumption   : {} units",
            self.highest_units.to_formatted_string(&Locale::en)
        )?;
        write!(
            f,
            "Lowest Consumption    : {} units",
            self.lowest_units.to_formatted_string(&Locale::en)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::billing::Tariff;
    use crate::calendar::Month;
    use rust_decimal_macros::dec;

    fn record(month: Month, previous: u32, current: u32) -> BillingRecord {
        BillingRecord::new(
            "ali",
            "MTR-1",
            month,
            previous,
            current,
            &Tariff::residential(),
        )
    }

    #[test]
    fn empty_history_has_no_summary() {
        let records: Vec<BillingRecord> = Vec::new();
        assert_eq!(UsageSummary::from_records(&records), None);
    }

    #[test]
    fn aggregates_over_history() {
        let records = vec![
            record(Month::June, 0, 80),     // 80 units, Rs. 400
            record(Month::July, 80, 330),   // 250 units, Rs. 1700
            record(Month::August, 330, 360), // 30 units, Rs. 150
        ];
        let summary = UsageSummary::from_records(&records).unwrap();

        assert_eq!(summary.bills, 3);
        assert_eq!(summary.total_units, 360);
        assert_eq!(summary.total_amount, Money::rupees(2250));
        assert_eq!(summary.highest_units, 250);
        assert_eq!(summary.lowest_units, 30);
        assert_eq!(summary.average_units(), dec!(120));
        assert_eq!(summary.average_amount(), Money::rupees(750));
    }

    #[test]
    fn averages_round_to_two_places() {
        let records = vec![
            record(Month::June, 0, 10),
            record(Month::July, 10, 30),
            record(Month::August, 30, 55),
        ];
        let summary = UsageSummary::from_records(&records).unwrap();

        // 55 units over 3 bills
        assert_eq!(summary.average_units(), dec!(18.33));
    }
}
