use inquire::validator::Validation;
use inquire::{
    error::InquireError, Confirm, CustomType, Password, PasswordDisplayMode,
    Select, Text,
};
use strum_macros::Display;

use crate::accounts;
use crate::calendar::Month;

type InputResult<T> = Result<T, InquireError>;

#[derive(Display, Debug, PartialEq, Eq, Clone, Copy)]
pub enum SessionChoice {
    #[strum(serialize = "Enter meter reading")]
    EnterReading,
    #[strum(serialize = "View billing history")]
    History,
    #[strum(serialize = "View usage statistics")]
    Statistics,
    #[strum(serialize = "Log out")]
    Logout,
}

pub fn username() -> InputResult<String> {
    Ok(Text::new("Username:").prompt()?.to_lowercase())
}

pub fn new_password() -> InputResult<String> {
    Password::new("Password:")
        .with_display_mode(PasswordDisplayMode::Masked)
        .with_help_message(
            "At least 8 characters, one capital letter, one of !@#$%&*",
        )
        .with_validator(|input: &str| match accounts::check_password(input) {
            Ok(()) => Ok(Validation::Valid),
            Err(reason) => Ok(Validation::Invalid(reason.into())),
        })
        .prompt()
}

pub fn login_password() -> InputResult<String> {
    Password::new("Password:")
        .with_display_mode(PasswordDisplayMode::Masked)
        .without_confirmation()
        .prompt()
}

pub fn contact_details() -> InputResult<(String, String, String)> {
    let full_name = Text::new("Full name:").prompt()?;
    let street_number = Text::new("Street number:").prompt()?;
    let residential_area = Text::new("Residential area:").prompt()?;
    Ok((full_name, street_number, residential_area))
}

pub fn meter_serials() -> InputResult<Vec<String>> {
    let count: u8 = CustomType::new("How many meters do you have?")
        .with_help_message("Maximum 2")
        .with_error_message("Please type a valid number")
        .with_validator(|count: &u8| {
            if (1..=2).contains(count) {
                Ok(Validation::Valid)
            } else {
                Ok(Validation::Invalid("Please enter 1 or 2".into()))
            }
        })
        .prompt()?;

    let mut serials = Vec::new();
    for number in 1..=count {
        let serial =
            Text::new(&format!("Serial number for meter {}:", number))
                .prompt()?;
        serials.push(serial);
    }
    Ok(serials)
}

pub fn meter(serials: &[String]) -> InputResult<String> {
    Select::new("Select meter:", serials.to_vec()).prompt()
}

pub fn month() -> InputResult<Month> {
    Select::new("Billing month:", Month::ALL.to_vec()).prompt()
}

pub fn previous_reading() -> InputResult<u32> {
    CustomType::new("Previous meter reading:")
        .with_error_message("Please type a valid number")
        .prompt()
}

// A meter counter never runs backwards; the resolver's auto-fetched
// previous reading is the floor.
pub fn current_reading(previous: u32) -> InputResult<u32> {
    CustomType::new("Current meter reading:")
        .with_error_message("Please type a valid number")
        .with_validator(move |current: &u32| {
            if *current < previous {
                Ok(Validation::Invalid(
                    format!(
                        "Current reading ({}) cannot be less than \
                         previous reading ({})",
                        current, previous
                    )
                    .into(),
                ))
            } else {
                Ok(Validation::Valid)
            }
        })
        .prompt()
}

pub fn session_choice() -> InputResult<SessionChoice> {
    Select::new(
        "What would you like to do?",
        vec![
            SessionChoice::EnterReading,
            SessionChoice::History,
            SessionChoice::Statistics,
            SessionChoice::Logout,
        ],
    )
    .prompt()
}

pub fn confirm() -> InputResult<bool> {
    Confirm::new("Confirm").with_default(true).prompt()
}
