use crate::billing::{BandCharge, BillingRecord};
use crate::run::RunError;

use askama::Template;

#[derive(Template)]
#[template(path = "bill.txt")]
struct BillData<'a> {
    customer: &'a str,
    record: &'a BillingRecord,
    charges: Vec<BandCharge>,
}

pub fn bill(
    record: &BillingRecord,
    customer: &str,
    charges: Vec<BandCharge>,
) -> Result<(), RunError> {
    let data = BillData {
        customer,
        record,
        charges,
    };

    println!("{}", data.render()?);

    Ok(())
}
