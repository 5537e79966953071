//! CSV batch front end: one prediction per row.
//!
//! The input needs a header row containing the seven field names (extra
//! columns are carried through). Output rows repeat the input and append
//! `Calories` and `Error`; a failing row does not stop the batch.

use crate::core::handler::PredictionHandler;
use crate::utils::error::Result;
use std::collections::HashMap;
use std::io::{Read, Write};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchSummary {
    pub rows: usize,
    pub succeeded: usize,
    pub failed: usize,
}

pub fn predict_csv<R: Read, W: Write>(
    handler: &PredictionHandler,
    input: R,
    output: W,
) -> Result<BatchSummary> {
    // Ragged rows reach the handler and fail there as missing fields.
    let mut reader = csv::ReaderBuilder::new().flexible(true).from_reader(input);
    let mut writer = csv::Writer::from_writer(output);

    let headers = reader.headers()?.clone();
    let mut out_headers = headers.clone();
    out_headers.push_field("Calories");
    out_headers.push_field("Error");
    writer.write_record(&out_headers)?;

    let mut summary = BatchSummary::default();
    for (line, record) in reader.records().enumerate() {
        // 輸出列與標頭等長
        let (mut row, result) = match record {
            Ok(record) => {
                let fields: HashMap<String, String> = headers
                    .iter()
                    .zip(record.iter())
                    .map(|(k, v)| (k.to_string(), v.to_string()))
                    .collect();
                let row: csv::StringRecord = (0..headers.len())
                    .map(|i| record.get(i).unwrap_or(""))
                    .collect();
                (row, handler.handle(&fields))
            }
            Err(e) => {
                let row: csv::StringRecord = headers.iter().map(|_| "").collect();
                (row, Err(e.into()))
            }
        };

        match result {
            Ok(prediction) => {
                row.push_field(&prediction.to_string());
                row.push_field("");
                summary.succeeded += 1;
            }
            Err(e) => {
                tracing::debug!("Row {} failed: {}", line + 1, e);
                row.push_field("");
                row.push_field(&e.to_string());
                summary.failed += 1;
            }
        }
        summary.rows += 1;
        writer.write_record(&row)?;
    }

    writer.flush()?;
    Ok(summary)
}
