use tracing::{debug, info};

use crate::{
    cleaning::{count_duplicates, dedup_records, drop_missing, normalize_records, MissingCounts},
    config::CleanerConfig,
    conversion::{convert_records, CurrencyConverter},
    error::CleanerError,
    records::read_csv,
    writer::write_json,
};

/// Row counts observed at each stage of a run.
#[derive(Debug, Default, PartialEq, Eq, Clone, Copy)]
pub struct CleaningSummary {
    pub rows_in: usize,
    pub missing: MissingCounts,
    pub rows_after_missing: usize,
    pub duplicates: usize,
    pub rows_out: usize,
}

impl CleaningSummary {
    pub fn dropped_missing(&self) -> usize {
        self.rows_in - self.rows_after_missing
    }
}

/// Load, clean, convert and write in one pass. Stops at the first error
/// without writing output.
pub fn run(config: &CleanerConfig) -> Result<CleaningSummary, CleanerError> {
    info!("Reading {}...", config.input_file.display());
    let raw = read_csv(&config.input_file)?;
    let rows_in = raw.len();
    info!("Total number of rows in original data: {rows_in}");

    let normalized = normalize_records(raw);
    let missing = MissingCounts::tally(&normalized);
    info!("Number of null values per column: {missing} (total {})", missing.total());

    let complete = drop_missing(normalized);
    let rows_after_missing = complete.len();
    info!("Total number of rows after removing null values: {rows_after_missing}");

    let duplicates = count_duplicates(&complete);
    info!("Total number of duplicate rows: {duplicates}");
    let unique = dedup_records(complete);
    let rows_out = unique.len();
    info!("Total number of rows after removing duplicates: {rows_out}");

    let converter = CurrencyConverter::new(config.rate);
    debug!(rate = converter.rate(), "converting USD prices to INR");
    let output = convert_records(unique, &converter);

    write_json(&config.output_file, &output, config.indent)?;
    info!("{} created successfully!", config.output_file.display());

    let summary = CleaningSummary {
        rows_in,
        missing,
        rows_after_missing,
        duplicates,
        rows_out,
    };
    debug!(
        dropped_missing = summary.dropped_missing(),
        dropped_duplicate = summary.duplicates,
        "run complete"
    );
    Ok(summary)
}
