// 📚 Resale Catalog - CSV load + in-memory lookups
// Rows that fail to parse are written to the error log and skipped

use crate::config::CatalogConfig;
use crate::record::{describe_row, parse_row, ResaleRecord};
use crate::search::{SearchQuery, SEARCH_LIMIT};
use anyhow::{Context, Result};
use csv::ReaderBuilder;
use std::collections::HashSet;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

// ============================================================================
// LOAD REPORT
// ============================================================================

/// Outcome of a single `Catalog::load` call
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadReport {
    /// Rows appended to the catalog
    pub loaded: usize,
    /// Rows written to the error log
    pub rejected: usize,
}

// ============================================================================
// CATALOG
// ============================================================================

pub struct Catalog {
    config: CatalogConfig,
    records: Vec<ResaleRecord>,
}

impl Catalog {
    /// Create an empty catalog
    pub fn new(config: CatalogConfig) -> Self {
        Catalog {
            config,
            records: Vec::new(),
        }
    }

    pub fn config(&self) -> &CatalogConfig {
        &self.config
    }

    /// Load resale rows from a CSV file with a header row.
    ///
    /// The error log is truncated first, then every row that fails to parse
    /// gets one line: `Error in row <row>: <error>`. Parsed records are
    /// appended to whatever an earlier load left in the catalog.
    ///
    /// Only I/O failures (missing input, unwritable log) are returned as
    /// errors; bad rows never abort the load.
    pub fn load<P: AsRef<Path>>(&mut self, file_path: P) -> Result<LoadReport> {
        let file_path = file_path.as_ref();
        let log_path = &self.config.log_path;
        let delimiter = self.config.delimiter_byte()?;

        let log_file = File::create(log_path)
            .with_context(|| format!("Failed to create log file: {}", log_path.display()))?;
        let mut log = BufWriter::new(log_file);

        let csv_file = File::open(file_path)
            .with_context(|| format!("Failed to open file: {}", file_path.display()))?;

        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .delimiter(delimiter)
            .from_reader(csv_file);

        let headers = reader
            .headers()
            .with_context(|| format!("Failed to read CSV header in {}", file_path.display()))?
            .clone();

        let mut report = LoadReport::default();

        for (line_num, result) in reader.records().enumerate() {
            let record = match result {
                Ok(record) => record,
                Err(err) if err.is_io_error() => {
                    return Err(err).with_context(|| {
                        format!("Failed to read {}", file_path.display())
                    });
                }
                Err(err) => {
                    // +2: 1-indexed plus the header row
                    let line = err.position().map_or(line_num as u64 + 2, |pos| pos.line());
                    writeln!(log, "Error in row <line {}>: {}", line, err)
                        .with_context(|| format!("Failed to write log file: {}", log_path.display()))?;
                    tracing::debug!(line, error = %err, "undecodable CSV record");
                    report.rejected += 1;
                    continue;
                }
            };

            match parse_row(&headers, &record) {
                Ok(resale) => {
                    self.records.push(resale);
                    report.loaded += 1;
                }
                Err(err) => {
                    writeln!(log, "Error in row {}: {}", describe_row(&headers, &record), err)
                        .with_context(|| format!("Failed to write log file: {}", log_path.display()))?;
                    tracing::debug!(line = line_num + 2, error = %err, "rejected resale row");
                    report.rejected += 1;
                }
            }
        }

        log.flush()
            .with_context(|| format!("Failed to write log file: {}", log_path.display()))?;

        tracing::info!(
            file = %file_path.display(),
            loaded = report.loaded,
            rejected = report.rejected,
            total = self.records.len(),
            "resale data loaded"
        );
        if report.rejected > 0 {
            tracing::warn!(
                rejected = report.rejected,
                log = %log_path.display(),
                "some rows were rejected, see error log"
            );
        }

        Ok(report)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// All records in load order
    pub fn records(&self) -> &[ResaleRecord] {
        &self.records
    }

    // ========================================================================
    // DISTINCT VALUES
    // ========================================================================

    /// Distinct towns, in first-seen order
    pub fn towns(&self) -> Vec<String> {
        self.distinct(ResaleRecord::town)
    }

    /// Distinct flat types, in first-seen order
    pub fn flat_types(&self) -> Vec<String> {
        self.distinct(ResaleRecord::flat_type)
    }

    /// Distinct flat models, in first-seen order
    pub fn flat_models(&self) -> Vec<String> {
        self.distinct(ResaleRecord::flat_model)
    }

    fn distinct<F>(&self, field: F) -> Vec<String>
    where
        F: Fn(&ResaleRecord) -> &str,
    {
        let mut seen = HashSet::new();
        let mut values = Vec::new();

        for record in &self.records {
            let value = field(record);
            if seen.insert(value) {
                values.push(value.to_string());
            }
        }

        values
    }

    // ========================================================================
    // SEARCH
    // ========================================================================

    /// First `SEARCH_LIMIT` records matching the query, in load order
    pub fn search(&self, query: &SearchQuery) -> Vec<&ResaleRecord> {
        self.records
            .iter()
            .filter(|record| query.matches(record))
            .take(SEARCH_LIMIT)
            .collect()
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::new(CatalogConfig::default())
    }
}

// ============================================================================
// OUTPUT
// ============================================================================

/// Write one formatted line per result
pub fn write_search_results<W: Write>(out: &mut W, results: &[&ResaleRecord]) -> io::Result<()> {
    for result in results {
        writeln!(out, "{}", result)?;
    }
    Ok(())
}

/// Print search results to stdout
pub fn print_search_results(results: &[&ResaleRecord]) -> io::Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    write_search_results(&mut out, results)
}

// ============================================================================
// TESTS
// ============================================================================
