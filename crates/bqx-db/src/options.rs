//! Write and extract policy for warehouse jobs.

use std::fmt;

/// What a query job does when its destination table already exists
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WriteDisposition {
    /// Replace the table contents
    #[default]
    Truncate,
}

impl WriteDisposition {
    /// BigQuery API spelling
    pub fn as_api_str(&self) -> &'static str {
        match self {
            WriteDisposition::Truncate => "WRITE_TRUNCATE",
        }
    }
}

impl fmt::Display for WriteDisposition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_api_str())
    }
}

/// Compression applied to extracted files
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Compression {
    /// gzip
    Gzip,
}

impl Compression {
    /// BigQuery API spelling
    pub fn as_api_str(&self) -> &'static str {
        match self {
            Compression::Gzip => "GZIP",
        }
    }
}

/// File format of extracted files
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DestinationFormat {
    /// Delimited text
    Csv,
}

impl DestinationFormat {
    /// BigQuery API spelling
    pub fn as_api_str(&self) -> &'static str {
        match self {
            DestinationFormat::Csv => "CSV",
        }
    }
}

/// Output policy of an extract job
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractOptions {
    pub compression: Compression,
    pub format: DestinationFormat,
    pub field_delimiter: char,
    pub print_header: bool,
}

impl ExtractOptions {
    /// Gzip-compressed, comma-delimited CSV with a header row
    pub fn gzip_csv() -> Self {
        Self {
            compression: Compression::Gzip,
            format: DestinationFormat::Csv,
            field_delimiter: ',',
            print_header: true,
        }
    }
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self::gzip_csv()
    }
}
