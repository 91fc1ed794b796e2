use serde::Serialize;

use crate::cleaning::{RecordId, SalesRecord};

/// Fixed-rate conversion from the source currency into the target currency.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CurrencyConverter {
    rate: f64,
}

impl CurrencyConverter {
    pub fn new(rate: f64) -> Self {
        CurrencyConverter { rate }
    }

    pub fn rate(&self) -> f64 {
        self.rate
    }

    pub fn convert(&self, amount: f64) -> f64 {
        round_2dp(amount * self.rate)
    }
}

/// Rounds half to even at two decimal places.
pub fn round_2dp(value: f64) -> f64 {
    (value * 100.0).round_ties_even() / 100.0
}

/// A record in report shape. Field order here is the key order in the JSON.
#[derive(Debug, Serialize, PartialEq, Clone)]
pub struct OutputRecord {
    pub id: RecordId,
    pub product: String,
    pub price_usd: f64,
    pub price_inr: f64,
    pub country: String,
}

pub fn reshape(record: SalesRecord, converter: &CurrencyConverter) -> OutputRecord {
    OutputRecord {
        price_inr: converter.convert(record.price_usd),
        id: record.id,
        product: record.product,
        price_usd: record.price_usd,
        country: record.country,
    }
}

pub fn convert_records(records: Vec<SalesRecord>, converter: &CurrencyConverter) -> Vec<OutputRecord> {
    records
        .into_iter()
        .map(|record| reshape(record, converter))
        .collect()
}
