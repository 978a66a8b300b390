//! Exporting one identifier's calls as CSV

use crate::loader::CallLog;
use crate::Result;
use csv::Writer;
use std::io::Write;

/// File name offered for an identifier's export
pub fn export_file_name(api_code: &str) -> String {
    format!("{}_calls.csv", api_code)
}

impl CallLog {
    /// Write the header and every row for `api_code` to `writer`
    ///
    /// Rows keep their file order and raw field text; columns keep the
    /// source order. Returns the number of data rows written.
    pub fn write_csv<W: Write>(&self, api_code: &str, writer: W) -> Result<usize> {
        let mut csv_writer = Writer::from_writer(writer);
        csv_writer.write_record(self.headers())?;

        let mut rows = 0;
        for record in self.records_for(api_code) {
            csv_writer.write_record(record)?;
            rows += 1;
        }
        csv_writer.flush()?;

        Ok(rows)
    }

    /// The CSV export for `api_code` as bytes
    pub fn export_csv(&self, api_code: &str) -> Result<Vec<u8>> {
        let mut buffer = Vec::new();
        self.write_csv(api_code, &mut buffer)?;
        Ok(buffer)
    }
}
