use clap::Parser;
use std::path::PathBuf;
use thiserror::Error;

pub const MAX_DAYS_BACK: i64 = 10;

#[derive(Debug, Parser)]
pub struct Config {
    /// How many days back to fetch, today included.
    #[arg(allow_negative_numbers = true)]
    pub days: i64,
    #[arg(long, default_value = "https://api.privatbank.ua")]
    pub api_url: String,
    #[arg(long, default_value = "data.json")]
    pub output: PathBuf,
}

#[derive(Debug, Error)]
#[error("day count {days} can't be greater than {max}", max = MAX_DAYS_BACK)]
pub struct DayCountError {
    pub days: i64,
}

impl Config {
    pub fn validate(&self) -> Result<(), DayCountError> {
        if self.days > MAX_DAYS_BACK {
            return Err(DayCountError { days: self.days });
        }
        Ok(())
    }
}
