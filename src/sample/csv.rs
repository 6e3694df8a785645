use ::csv;
use std::convert::TryFrom;
use std::fs::File;
use std::io::{Read, Write};
use thiserror::Error;
use super::*;

/// Failures while reading or writing a labeled sample table. Malformed
/// rows are reported with their position instead of being skipped.
#[derive(Debug, Error)]
pub enum TableError {

    #[error("Error accessing sample table: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed CSV content: {0}")]
    Csv(#[from] csv::Error),

    #[error("Row {row}: expected the three columns x1,x2,label")]
    MissingField { row : usize },

    #[error("Row {row}: could not parse '{value}' as a coordinate")]
    BadCoordinate { row : usize, value : String },

    #[error("Row {row}: {source}")]
    BadLabel { row : usize, source : InvalidLabel }

}

fn parse_coord(field : &str, row : usize) -> Result<f64, TableError> {
    field.trim().parse::<f64>()
        .map_err(|_| TableError::BadCoordinate { row, value : field.to_string() })
}

/// Reads labeled samples from x1,x2,label records with a header row. Row
/// positions in errors count data rows from one.
pub fn read_samples<R>(reader : R) -> Result<Vec<LabeledSample>, TableError>
    where R : Read
{
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(reader);
    let mut samples = Vec::new();
    for (ix, record) in csv_reader.records().enumerate() {
        let record = record?;
        let row = ix + 1;
        let x1 = parse_coord(record.get(0).ok_or(TableError::MissingField { row })?, row)?;
        let x2 = parse_coord(record.get(1).ok_or(TableError::MissingField { row })?, row)?;
        let sign = parse_coord(record.get(2).ok_or(TableError::MissingField { row })?, row)?;
        let label = Label::try_from(sign)
            .map_err(|source| TableError::BadLabel { row, source })?;
        samples.push(LabeledSample::new(x1, x2, label));
    }
    Ok(samples)
}

/// Writes labeled samples as x1,x2,label records preceded by a header row.
pub fn write_samples<W>(samples : &[LabeledSample], writer : W) -> Result<(), TableError>
    where W : Write
{
    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer.write_record(&["x1", "x2", "label"])?;
    for s in samples.iter() {
        csv_writer.write_record(&[
            s.point[0].to_string(),
            s.point[1].to_string(),
            s.label.to_string()
        ])?;
    }
    csv_writer.flush()?;
    Ok(())
}

/// Reads a labeled sample table from the informed path.
pub fn load_samples(path : &str) -> Result<Vec<LabeledSample>, TableError> {
    let f = File::open(path)?;
    read_samples(f)
}

/// Saves a labeled sample table at the informed path.
pub fn save_samples(samples : &[LabeledSample], path : &str) -> Result<(), TableError> {
    let f = File::create(path)?;
    write_samples(samples, f)
}
