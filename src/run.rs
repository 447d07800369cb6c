use std::path::PathBuf;

use crate::accounts::{Account, Accounts};
use crate::billing::{BillingRecord, Tariff};
use crate::cli::Command;
use crate::error::{AccountError, StoreError};
use crate::input::{self, SessionChoice};
use crate::records::{FileRecordStore, RecordStore};
use crate::resolver;
use crate::stats::UsageSummary;
use crate::templates;

use inquire::error::InquireError;
use thiserror::Error;

pub fn run_cmd_with_paths(
    cmd: Command,
    users_path: &PathBuf,
    records_path: &PathBuf,
) -> Result<(), RunError> {
    let mut store = FileRecordStore::new(records_path);

    match cmd {
        Command::Register => register(users_path),
        Command::Login => login(users_path, &mut store),
    }
}

fn register(users_path: &PathBuf) -> Result<(), RunError> {
    let mut accounts = Accounts::load(users_path)?;

    let username = input::username()?;
    if accounts.contains(&username) {
        return Err(AccountError::Duplicate { username }.into());
    }

    let password = input::new_password()?;
    let (full_name, street_number, residential_area) =
        input::contact_details()?;
    let meters = input::meter_serials()?;

    let account = Account::new(
        &username,
        &password,
        &full_name,
        &street_number,
        &residential_area,
        meters,
    );

    println!("\nRegistering account:\n\n{}", account);
    if input::confirm()? {
        accounts.register(account)?;
        accounts.save(users_path)?;
        println!("Registration successful for '{}'.", username);
    }
    Ok(())
}

fn login(
    users_path: &PathBuf,
    store: &mut impl RecordStore,
) -> Result<(), RunError> {
    let accounts = Accounts::load(users_path)?;

    let username = input::username()?;
    let password = input::login_password()?;
    let account = accounts.authenticate(&username, &password)?;

    println!("\nWelcome, {}!", account.full_name);
    session(account, store)
}

// One menu round per iteration; a failed operation is reported and the
// session keeps going.
fn session(
    account: &Account,
    store: &mut impl RecordStore,
) -> Result<(), RunError> {
    loop {
        let outcome = match input::session_choice()? {
            SessionChoice::EnterReading => enter_reading(account, store),
            SessionChoice::History => billing_history(account, store),
            SessionChoice::Statistics => usage_statistics(account, store),
            SessionChoice::Logout => {
                println!("Logging out.");
                return Ok(());
            }
        };

        if let Err(error) = outcome {
            eprintln!("{}", error);
        }
    }
}

fn enter_reading(
    account: &Account,
    store: &mut impl RecordStore,
) -> Result<(), RunError> {
    let meter_serial = if account.meters.len() == 1 {
        account.meters[0].clone()
    } else {
        input::meter(&account.meters)?
    };

    let defaults =
        resolver::defaults(store, &account.username, &meter_serial)?;

    let month = match defaults.period {
        Some(month) => {
            println!("Billing month (auto-generated): {}", month);
            month
        }
        None => input::month()?,
    };

    let previous = match defaults.previous_reading {
        Some(reading) => {
            println!(
                "Previous meter reading (auto-fetched): {} units",
                reading
            );
            reading
        }
        None => {
            println!("No previous record found for this meter.");
            input::previous_reading()?
        }
    };

    let current = input::current_reading(previous)?;

    let tariff = Tariff::residential();
    let record = BillingRecord::new(
        &account.username,
        &meter_serial,
        month,
        previous,
        current,
        &tariff,
    );

    templates::bill(
        &record,
        &account.full_name,
        tariff.charges(record.units_consumed),
    )?;

    if input::confirm()? {
        store.append(record)?;
        println!("Billing record saved.");
    }
    Ok(())
}

fn billing_history(
    account: &Account,
    store: &impl RecordStore,
) -> Result<(), RunError> {
    let records = store.for_customer(&account.username)?;

    if records.is_empty() {
        println!("No billing records found for this account.");
        return Ok(());
    }

    for (number, record) in records.iter().enumerate() {
        println!("Record #{}", number + 1);
        println!("----------------------------------------");
        println!("{}", record);
        println!("----------------------------------------\n");
    }
    Ok(())
}

fn usage_statistics(
    account: &Account,
    store: &impl RecordStore,
) -> Result<(), RunError> {
    let records = store.for_customer(&account.username)?;

    match UsageSummary::from_records(&records) {
        Some(summary) => println!("{}", summary),
        None => println!("No statistics available yet."),
    }
    Ok(())
}


#[derive(Debug, Error)]
pub enum RunError {
    #[error("{source}")]
    Store {
        #[from]
        source: StoreError,
    },

    #[error("{source}")]
    Account {
        #[from]
        source: AccountError,
    },

    #[error("Input Error: {source}")]
    Input {
        #[from]
        source: InquireError,
    },

    #[error("Error rendering bill: {source}")]
    Template {
        #[from]
        source: askama::Error,
    },
}
