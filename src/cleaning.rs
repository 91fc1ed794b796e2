use serde::Serialize;
use std::{collections::HashSet, fmt};

use crate::records::RawRecord;

/// Record identifier: numeric when the input column parses as an integer,
/// otherwise kept as the text it was read as.
#[derive(Debug, Serialize, PartialEq, Eq, Clone)]
#[serde(untagged)]
pub enum RecordId {
    Int(i64),
    Text(String),
}

impl From<String> for RecordId {
    fn from(s: String) -> Self {
        match s.parse::<i64>() {
            Ok(n) => RecordId::Int(n),
            Err(_) => RecordId::Text(s),
        }
    }
}

/// A row after field cleanup. `None` marks a missing value.
#[derive(Debug, PartialEq, Clone)]
pub struct NormalizedRecord {
    pub id: Option<RecordId>,
    pub product: Option<String>,
    pub price: Option<f64>,
    pub country: Option<String>,
}

/// A row with every field present.
#[derive(Debug, PartialEq, Clone)]
pub struct SalesRecord {
    pub id: RecordId,
    pub product: String,
    pub price_usd: f64,
    pub country: String,
}

#[derive(Debug, Default, PartialEq, Eq, Clone, Copy)]
pub struct MissingCounts {
    pub id: usize,
    pub product: usize,
    pub price: usize,
    pub country: usize,
}

impl MissingCounts {
    pub fn tally(records: &[NormalizedRecord]) -> Self {
        records.iter().fold(MissingCounts::default(), |mut counts, r| {
            counts.id += usize::from(r.id.is_none());
            counts.product += usize::from(r.product.is_none());
            counts.price += usize::from(r.price.is_none());
            counts.country += usize::from(r.country.is_none());
            counts
        })
    }

    pub fn total(&self) -> usize {
        self.id + self.product + self.price + self.country
    }
}

impl fmt::Display for MissingCounts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "id={} product={} price={} country={}",
            self.id, self.product, self.price, self.country
        )
    }
}

pub fn normalize_records(records: Vec<RawRecord>) -> Vec<NormalizedRecord> {
    records.into_iter().map(normalize).collect()
}

pub fn normalize(record: RawRecord) -> NormalizedRecord {
    NormalizedRecord {
        id: record.id.map(RecordId::from),
        product: record.product.map(|p| clean_product(&p)),
        price: record.price.as_deref().and_then(parse_price),
        country: record.country,
    }
}

pub fn clean_product(s: &str) -> String {
    s.replace('"', "").trim().to_owned()
}

/// Strips `$` and whitespace and parses what is left. Anything that does not
/// parse to a number is a missing value rather than an error.
pub fn parse_price(s: &str) -> Option<f64> {
    s.replace('$', "")
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|price| !price.is_nan())
}

/// Keeps only complete records, preserving their order.
pub fn drop_missing(records: Vec<NormalizedRecord>) -> Vec<SalesRecord> {
    records
        .into_iter()
        .filter_map(|r| match (r.id, r.product, r.price, r.country) {
            (Some(id), Some(product), Some(price_usd), Some(country)) => Some(SalesRecord {
                id,
                product,
                price_usd,
                country,
            }),
            (id, product, price, country) => {
                tracing::debug!(?id, ?product, ?price, ?country, "dropping incomplete record");
                None
            }
        })
        .collect()
}

/// Number of records whose (product, price) key was already seen earlier.
pub fn count_duplicates(records: &[SalesRecord]) -> usize {
    let mut seen = HashSet::new();
    records.iter().filter(|r| !seen.insert(dedup_key(r))).count()
}

/// Removes later records sharing a (product, price) key; the first wins.
pub fn dedup_records(records: Vec<SalesRecord>) -> Vec<SalesRecord> {
    let mut seen = HashSet::new();
    records
        .into_iter()
        .filter(|r| {
            let first = seen.insert(dedup_key(r));
            if !first {
                tracing::debug!(id = ?r.id, product = %r.product, "dropping duplicate record");
            }
            first
        })
        .collect()
}

fn dedup_key(record: &SalesRecord) -> (String, u64) {
    // -0.0 == 0.0 but their bit patterns differ.
    let price = if record.price_usd == 0.0 { 0.0 } else { record.price_usd };
    (record.product.clone(), price.to_bits())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sale(id: i64, product: &str, price_usd: f64, country: &str) -> SalesRecord {
        SalesRecord {
            id: RecordId::Int(id),
            product: product.to_owned(),
            price_usd,
            country: country.to_owned(),
        }
    }

    fn raw(id: &str, product: &str, price: &str, country: &str) -> RawRecord {
        RawRecord {
            id: Some(id.to_owned()),
            product: Some(product.to_owned()),
            price: Some(price.to_owned()),
            country: Some(country.to_owned()),
        }
    }

    #[test]
    fn normalize_quoted_product_and_dollar_price() {
        let record = normalize(raw("1", "\"Widget\"", "$10.00", "US"));

        assert_eq!(
            record,
            NormalizedRecord {
                id: Some(RecordId::Int(1)),
                product: Some("Widget".to_owned()),
                price: Some(10.0),
                country: Some("US".to_owned()),
            }
        );
    }

    #[test]
    fn product_loses_inner_quotes_and_whitespace() {
        assert_eq!(clean_product("  \"Big \"Red\" Box\"  "), "Big Red Box");
        assert!(!clean_product("\" x \"").contains('"'));
    }

    #[test]
    fn price_with_spaces_after_symbol() {
        assert_eq!(parse_price("$ 5.50 "), Some(5.5));
        assert_eq!(parse_price("$$-3"), Some(-3.0));
    }

    #[test]
    fn unparseable_price_is_missing() {
        assert_eq!(parse_price("$abc"), None);
        assert_eq!(parse_price("$"), None);
        assert_eq!(parse_price("NaN"), None);
    }

    #[test]
    fn non_numeric_id_kept_as_text() {
        let record = normalize(raw("A-17", "Widget", "$1", "US"));
        assert_eq!(record.id, Some(RecordId::Text("A-17".to_owned())));
    }

    #[test]
    fn missing_counts_per_column() {
        let records = normalize_records(vec![
            raw("1", "Widget", "$abc", "US"),
            RawRecord {
                product: None,
                ..raw("2", "", "$1", "UK")
            },
            raw("3", "Gadget", "$2", "DE"),
        ]);

        let counts = MissingCounts::tally(&records);
        assert_eq!(
            counts,
            MissingCounts {
                id: 0,
                product: 1,
                price: 1,
                country: 0
            }
        );
        assert_eq!(counts.total(), 2);
        assert_eq!(counts.to_string(), "id=0 product=1 price=1 country=0");
    }

    #[test]
    fn drop_missing_keeps_complete_records_in_order() {
        let records = normalize_records(vec![
            raw("1", "Widget", "$1", "US"),
            raw("2", "Gadget", "$abc", "UK"),
            raw("3", "Gizmo", "$3", "DE"),
        ]);

        let kept = drop_missing(records);
        assert_eq!(kept, vec![sale(1, "Widget", 1.0, "US"), sale(3, "Gizmo", 3.0, "DE")]);
    }

    #[test]
    fn dedup_keeps_first_occurrence() {
        let records = vec![
            sale(1, "Widget", 10.0, "US"),
            sale(2, "Gadget", 10.0, "UK"),
            sale(3, "Widget", 10.0, "FR"),
            sale(4, "Widget", 10.5, "DE"),
        ];

        assert_eq!(count_duplicates(&records), 1);

        let deduped = dedup_records(records);
        assert_eq!(
            deduped,
            vec![
                sale(1, "Widget", 10.0, "US"),
                sale(2, "Gadget", 10.0, "UK"),
                sale(4, "Widget", 10.5, "DE"),
            ]
        );
    }

    #[test]
    fn dedup_uses_exact_price_equality() {
        let records = vec![sale(1, "Widget", 0.1 + 0.2, "US"), sale(2, "Widget", 0.3, "UK")];

        assert_eq!(count_duplicates(&records), 0);
        assert_eq!(dedup_records(records).len(), 2);
    }

    #[test]
    fn dedup_treats_signed_zero_as_equal() {
        let records = vec![sale(1, "Freebie", 0.0, "US"), sale(2, "Freebie", -0.0, "UK")];
        assert_eq!(dedup_records(records), vec![sale(1, "Freebie", 0.0, "US")]);
    }
}
