use serde::{Deserialize, Serialize};

use std::collections::BTreeMap;
use std::fmt;
use std::fs::{self, File};
use std::io::BufReader;
use std::path::PathBuf;

use crate::error::{AccountError, StoreError};

const SPECIAL_CHARS: &str = "!@#$%&*";

#[derive(Serialize, Deserialize, Debug, PartialEq, Clone)]
pub struct Account {
    pub username: String,
    // Obscured at rest, never plain text. See `obscure`.
    password: String,
    pub full_name: String,
    pub street_number: String,
    pub residential_area: String,
    pub meters: Vec<String>,
}

impl Account {
    pub fn new(
        username: &str,
        password: &str,
        full_name: &str,
        street_number: &str,
        residential_area: &str,
        meters: Vec<String>,
    ) -> Self {
        Self {
            username: username.to_string(),
            password: obscure(password),
            full_name: full_name.to_string(),
            street_number: street_number.to_string(),
            residential_area: residential_area.to_string(),
            meters,
        }
    }
}

impl fmt::Display for Account {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "{}:", self.username)?;
        writeln!(f, "\n{}", self.full_name)?;
        writeln!(f, "{}, {}", self.street_number, self.residential_area)?;
        write!(f, "Meters: {}", self.meters.join(", "))
    }
}

#[derive(Serialize, Deserialize, Debug, PartialEq, Clone, Default)]
pub struct Accounts {
    accounts: BTreeMap<String, Account>,
}

impl Accounts {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn load(path: &PathBuf) -> Result<Self, StoreError> {
        if path.as_path().exists() {
            let file = File::open(path)?;
            let reader = BufReader::new(file);
            Ok(serde_lexpr::from_reader(reader)?)
        } else {
            Ok(Self::new())
        }
    }

    pub fn save(&self, path: &PathBuf) -> Result<(), StoreError> {
        let updated_path = path.with_extension("updated");
        let f = File::create(&updated_path)?;

        serde_lexpr::to_writer(f, self)?;
        fs::rename(updated_path, path)?;
        Ok(())
    }

    pub fn register(&mut self, account: Account) -> Result<(), AccountError> {
        if self.accounts.contains_key(&account.username) {
            return Err(AccountError::Duplicate {
                username: account.username,
            });
        }
        self.accounts.insert(account.username.clone(), account);
        Ok(())
    }

    pub fn contains(&self, username: &str) -> bool {
        self.accounts.contains_key(username)
    }

    pub fn authenticate(
        &self,
        username: &str,
        password: &str,
    ) -> Result<&Account, AccountError> {
        match self.accounts.get(username) {
            Some(account) if reveal(&account.password) == password => {
                Ok(account)
            }
            _ => Err(AccountError::BadCredentials),
        }
    }
}

// Registration policy from the paper form: 8+ characters, a capital
// letter, and one of the listed special characters.
pub fn check_password(password: &str) -> Result<(), &'static str> {
    if password.chars().count() < 8 {
        return Err("must be at least 8 characters long");
    }
    if !password.chars().any(|c| c.is_ascii_uppercase()) {
        return Err("must contain at least one capital letter (A-Z)");
    }
    if !password.chars().any(|c| SPECIAL_CHARS.contains(c)) {
        return Err("must contain at least one special character (!@#$%&*)");
    }
    Ok(())
}

const SHIFT: i16 = 3;
const FIRST_PRINTABLE: u8 = b'!';
const PRINTABLE_SPAN: i16 = 94; // '!' through '~'

// Reversible character shift carried over from the legacy user table.
// This is obfuscation, not encryption: it keeps passwords out of casual
// view of anyone reading the file, and nothing more.
fn rotate(text: &str, offset: i16) -> String {
    text.chars()
        .map(|c| match c {
            '!'..='~' => {
                let pos = i16::from(c as u8 - FIRST_PRINTABLE);
                let moved = (pos + offset).rem_euclid(PRINTABLE_SPAN) as u8;
                (FIRST_PRINTABLE + moved) as char
            }
            other => other,
        })
        .collect()
}

fn obscure(password: &str) -> String {
    rotate(password, SHIFT)
}

fn reveal(stored: &str) -> String {
    rotate(stored, -SHIFT)
}
