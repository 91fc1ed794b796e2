use std::path::PathBuf;

/// Units of target currency (INR) per unit of source currency (USD).
pub const USD_TO_INR: f64 = 83.0;

#[derive(Debug, Clone, PartialEq)]
pub struct CleanerConfig {
    pub input_file: PathBuf,
    pub output_file: PathBuf,
    pub rate: f64,
    /// Spaces per indentation level in the JSON report.
    pub indent: usize,
}

impl Default for CleanerConfig {
    fn default() -> Self {
        CleanerConfig {
            input_file: PathBuf::from("raw_data/sales.csv"),
            output_file: PathBuf::from("clean_sales.json"),
            rate: USD_TO_INR,
            indent: 4,
        }
    }
}

impl CleanerConfig {
    pub fn with_paths(input_file: impl Into<PathBuf>, output_file: impl Into<PathBuf>) -> Self {
        CleanerConfig {
            input_file: input_file.into(),
            output_file: output_file.into(),
            ..Default::default()
        }
    }
}
