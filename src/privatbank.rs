use crate::archive::{CurrencyQuote, DayQuotes, RateRecord};
use crate::config::Config;
use chrono::{Duration, Local};
use reqwest::StatusCode;
use serde::Deserialize;
use thiserror::Error;
use tracing::info;
use url::Url;

// PrivatBank keeps EUR and USD at fixed positions in the exchangeRate array.
pub const EUR_INDEX: usize = 8;
pub const USD_INDEX: usize = 23;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("error status: {status} for {url}")]
    Status { status: StatusCode, url: String },
    #[error("connection error: {url}: {source}")]
    Connection { url: String, source: reqwest::Error },
    #[error("invalid url: {url}: {source}")]
    InvalidUrl { url: String, source: url::ParseError },
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DayRatesDto {
    pub date: String,
    pub exchange_rate: Vec<CurrencyRateDto>,
}

// Entries outside the consumed indices may omit both rate fields.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrencyRateDto {
    pub sale_rate: Option<f64>,
    pub purchase_rate: Option<f64>,
}

impl From<DayRatesDto> for RateRecord {
    fn from(dto: DayRatesDto) -> Self {
        let eur = quote_at(&dto.exchange_rate, EUR_INDEX);
        let usd = quote_at(&dto.exchange_rate, USD_INDEX);
        RateRecord {
            date: dto.date,
            quotes: DayQuotes { eur, usd },
        }
    }
}

fn quote_at(entries: &[CurrencyRateDto], index: usize) -> CurrencyQuote {
    let entry = &entries[index];
    CurrencyQuote {
        sale: entry.sale_rate.expect("saleRate missing"),
        purchase: entry.purchase_rate.expect("purchaseRate missing"),
    }
}

async fn get_day_rates(api_url: &str, date: &str) -> Result<DayRatesDto, FetchError> {
    let raw = format!("{api_url}/p24api/exchange_rates?date={date}");
    let url = Url::parse(&raw).map_err(|source| FetchError::InvalidUrl {
        url: raw.clone(),
        source,
    })?;

    let response = reqwest::get(url)
        .await
        .map_err(|source| FetchError::Connection {
            url: raw.clone(),
            source,
        })?;

    if response.status() != StatusCode::OK {
        return Err(FetchError::Status {
            status: response.status(),
            url: raw,
        });
    }

    let dto = response.json().await.expect("malformed exchange-rates payload");
    Ok(dto)
}

/// Fetches one record per day, from `config.days` days ago up to today.
///
/// Requests run strictly in order; the first failure aborts the whole pull.
pub async fn pull_rates(config: &Config) -> Result<Vec<RateRecord>, FetchError> {
    let _span = tracing::info_span!("pull_rates").entered();
    let mut records = Vec::new();
    let mut countdown = config.days;

    info!("fetching rates...");

    while countdown >= 0 {
        let date = Local::now().date_naive() - Duration::days(countdown);
        countdown -= 1;
        let formatted = date.format("%d.%m.%Y").to_string();
        let dto = get_day_rates(&config.api_url, &formatted).await?;
        records.push(dto.into());
    }

    info!("done fetching rates");
    Ok(records)
}
