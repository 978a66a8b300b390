//! Loading the call log from delimited text

use crate::timestamp::parse_timestamp;
use crate::{CallLogError, Result, API_CODE_COLUMN, TIME_OF_CALL_COLUMN};
use chrono::NaiveDateTime;
use csv::{ReaderBuilder, StringRecord};
use log::{debug, info, warn};
use std::collections::HashSet;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Immutable in-memory call log
///
/// Keeps the source header and every record exactly as read, so filtered
/// exports reproduce the source schema. Only the `API Code` and
/// `Time of Call` columns are interpreted.
#[derive(Debug, Clone)]
pub struct CallLog {
    headers: StringRecord,
    records: Vec<StringRecord>,
    api_column: usize,
    time_column: usize,
}

impl CallLog {
    /// Load a call log from a CSV file with a header row
    pub fn from_csv<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)?;
        let log = Self::from_reader(file)?;
        info!(
            "Loaded {} calls for {} APIs from {}",
            log.len(),
            log.distinct_api_count(),
            path.display()
        );
        Ok(log)
    }

    /// Load a call log from any CSV source with a header row
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let mut reader = ReaderBuilder::new().has_headers(true).from_reader(reader);

        let headers = reader.headers()?.clone();
        let api_column = Self::locate_column(&headers, API_CODE_COLUMN)?;
        let time_column = Self::locate_column(&headers, TIME_OF_CALL_COLUMN)?;

        let records = reader.records().collect::<std::result::Result<Vec<_>, _>>()?;
        debug!("Read {} records with {} columns", records.len(), headers.len());

        Ok(Self {
            headers,
            records,
            api_column,
            time_column,
        })
    }

    fn locate_column(headers: &StringRecord, name: &str) -> Result<usize> {
        headers
            .iter()
            .position(|h| h.trim() == name)
            .ok_or_else(|| CallLogError::MissingColumn(name.to_string()))
    }

    /// Header row as it appeared in the source
    pub fn headers(&self) -> &StringRecord {
        &self.headers
    }

    /// Number of calls (data rows)
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Check if the log has no calls
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Number of distinct API identifiers
    pub fn distinct_api_count(&self) -> usize {
        self.records
            .iter()
            .filter_map(|r| r.get(self.api_column))
            .collect::<HashSet<_>>()
            .len()
    }

    /// Identifier of every call, in file order
    pub(crate) fn api_codes(&self) -> impl Iterator<Item = &str> + '_ {
        self.records
            .iter()
            .map(move |r| r.get(self.api_column).unwrap_or_default())
    }

    /// Raw records for one identifier, in file order
    pub fn records_for<'a>(
        &'a self,
        api_code: &'a str,
    ) -> impl Iterator<Item = &'a StringRecord> + 'a {
        self.records
            .iter()
            .filter(move |r| r.get(self.api_column) == Some(api_code))
    }

    /// Parsed call times for one identifier, in file order
    ///
    /// Rows whose timestamp cannot be parsed are dropped and counted in the log.
    pub fn call_times(&self, api_code: &str) -> Vec<NaiveDateTime> {
        let mut dropped = 0usize;
        let times: Vec<NaiveDateTime> = self
            .records_for(api_code)
            .filter_map(|r| {
                let parsed = r.get(self.time_column).and_then(parse_timestamp);
                if parsed.is_none() {
                    dropped += 1;
                }
                parsed
            })
            .collect();

        if dropped > 0 {
            warn!(
                "Dropped {} call(s) for API {} with unparseable '{}'",
                dropped, api_code, TIME_OF_CALL_COLUMN
            );
        }
        times
    }

    /// Chronologically sorted call times for one identifier
    pub fn raw_calls(&self, api_code: &str) -> Vec<NaiveDateTime> {
        let mut times = self.call_times(api_code);
        times.sort();
        times
    }
}
