use std::fmt;
use std::ops::{Add, Div, Mul};

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use crate::calendar::Month;

#[derive(Serialize, Deserialize, Debug, PartialEq, Eq, Clone, Copy)]
pub struct Money(Decimal);

impl Money {
    pub fn rupees(amount: i64) -> Self {
        Self(Decimal::from(amount))
    }

    pub fn zero() -> Self {
        Self(Decimal::ZERO)
    }

    pub fn amount(&self) -> Decimal {
        self.0
    }
}

impl Add<Money> for Money {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self(self.0 + other.0)
    }
}

impl Mul<Decimal> for Money {
    type Output = Self;

    fn mul(self, other: Decimal) -> Self {
        Self((self.0 * other).round_dp_with_strategy(
            2,
            RoundingStrategy::MidpointNearestEven,
        ))
    }
}

impl Div<Decimal> for Money {
    type Output = Self;

    fn div(self, other: Decimal) -> Self {
        Self((self.0 / other).round_dp_with_strategy(
            2,
            RoundingStrategy::MidpointNearestEven,
        ))
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Rs. {:.2}", self.0)
    }
}

// One slab of the progressive schedule. `units` is the width of the slab;
// the final slab is open-ended.
#[derive(Serialize, Deserialize, Debug, PartialEq, Clone)]
pub struct Band {
    pub units: Option<u32>,
    pub rate: Money,
}

#[derive(Serialize, Deserialize, Debug, PartialEq, Clone)]
pub struct Tariff {
    bands: Vec<Band>,
}

#[derive(Debug, PartialEq, Clone)]
pub struct BandCharge {
    pub units: u32,
    pub rate: Money,
    pub amount: Money,
}

impl Tariff {
    pub fn new(bands: Vec<Band>) -> Self {
        Self { bands }
    }

    // The domestic schedule: first 100 units at Rs. 5, the next 200 at
    // Rs. 8, everything beyond at Rs. 10.
    pub fn residential() -> Self {
        Self::new(vec![
            Band {
                units: Some(100),
                rate: Money::rupees(5),
            },
            Band {
                units: Some(200),
                rate: Money::rupees(8),
            },
            Band {
                units: None,
                rate: Money::rupees(10),
            },
        ])
    }

    // Each band's rate applies only to the units falling within it.
    pub fn charges(&self, units: u32) -> Vec<BandCharge> {
        let mut remaining = units;
        let mut charges = Vec::new();
        for band in self.bands.iter() {
            if remaining == 0 {
                break;
            }
            let slice = band.units.map_or(remaining, |w| w.min(remaining));
            charges.push(BandCharge {
                units: slice,
                rate: band.rate,
                amount: band.rate * Decimal::from(slice),
            });
            remaining -= slice;
        }
        charges
    }

    pub fn bill(&self, units: u32) -> Money {
        self.charges(units)
            .iter()
            .fold(Money::zero(), |acc, c| acc + c.amount)
    }
}

#[derive(Serialize, Deserialize, Debug, PartialEq, Clone)]
pub struct BillingRecord {
    pub username: String,
    pub meter_serial: String,
    pub month: Month,
    pub previous_reading: u32,
    pub current_reading: u32,
    pub units_consumed: u32,
    pub total: Money,
}

impl BillingRecord {
    // `current` must already be validated >= `previous`; the prompt layer
    // enforces that before a record is ever constructed.
    pub fn new(
        username: &str,
        meter_serial: &str,
        month: Month,
        previous: u32,
        current: u32,
        tariff: &Tariff,
    ) -> Self {
        let units = current - previous;
        Self {
            username: username.to_string(),
            meter_serial: meter_serial.to_string(),
            month,
            previous_reading: previous,
            current_reading: current,
            units_consumed: units,
            total: tariff.bill(units),
        }
    }
}

impl fmt::Display for BillingRecord {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "Meter Serial     : {}", self.meter_serial)?;
        writeln!(f, "Month            : {}", self.month)?;
        writeln!(f, "Previous Reading : {} units", self.previous_reading)?;
        writeln!(f, "Current Reading  : {} units", self.current_reading)?;
        writeln!(f, "Units Consumed   : {} units", self.units_consumed)?;
        write!(f, "Total Bill       : {}", self.total)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn bill(units: u32) -> Decimal {
        Tariff::residential().bill(units).amount()
    }

    #[test]
    fn schedule_values() {
        assert_eq!(bill(0), dec!(0));
        assert_eq!(bill(42), dec!(210));
        assert_eq!(bill(100), dec!(500));
        assert_eq!(bill(101), dec!(508));
        assert_eq!(bill(300), dec!(2100));
        assert_eq!(bill(301), dec!(2110));
        assert_eq!(bill(450), dec!(3600));
    }

    #[test]
    fn boundary_steps() {
        assert_eq!(bill(101) - bill(100), dec!(8));
        assert_eq!(bill(301) - bill(300), dec!(10));
    }

    #[test]
    fn no_consumption_no_charges() {
        assert_eq!(Tariff::residential().charges(0), Vec::new());
    }

    #[test]
    fn breakdown_covers_every_band() {
        let charges = Tariff::residential().charges(450);
        assert_eq!(charges.len(), 3);
        assert_eq!(charges[0].units, 100);
        assert_eq!(charges[1].units, 200);
        assert_eq!(charges[2].units, 150);
        assert_eq!(charges[2].amount, Money::rupees(1500));
    }

    #[test]
    fn record_computes_units_and_total() {
        let record = BillingRecord::new(
            "ali",
            "MTR-4711",
            Month::June,
            1200,
            1450,
            &Tariff::residential(),
        );
        assert_eq!(record.units_consumed, 250);
        assert_eq!(record.total.amount(), dec!(1700));
    }

    #[test]
    fn money_division_rounds_to_cents() {
        let third = Money::rupees(100) / Decimal::from(3);
        assert_eq!(third.amount(), dec!(33.33));
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn monotone(a in 0u32..5000, b in 0u32..5000) {
                let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
                prop_assert!(bill(lo) <= bill(hi));
            }

            #[test]
            fn breakdown_sums_to_total(units in 0u32..5000) {
                let tariff = Tariff::residential();
                let summed = tariff
                    .charges(units)
                    .iter()
                    .fold(Money::zero(), |acc, c| acc + c.amount);
                prop_assert_eq!(summed, tariff.bill(units));
            }

            #[test]
            fn charged_units_cover_consumption(units in 0u32..5000) {
                let covered: u32 = Tariff::residential()
                    .charges(units)
                    .iter()
                    .map(|c| c.units)
                    .sum();
                prop_assert_eq!(covered, units);
            }
        }
    }
}
