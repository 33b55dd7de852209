//! Tab-delimited dataset format shared by every staged artifact.
//!
//! A header row is always written, even for an empty dataset, so downstream
//! readers can tell "no rows" apart from "not a dataset".

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::{EtlError, Result};
use crate::types::{CleanedRecord, RawRecord, CLEANED_COLUMNS, RAW_COLUMNS};

const DELIMITER: u8 = b'\t';

pub fn encode_raw(records: &[RawRecord]) -> Result<String> {
    encode(&RAW_COLUMNS, records)
}

pub fn decode_raw(content: &[u8]) -> Result<Vec<RawRecord>> {
    decode(content)
}

pub fn encode_cleaned(records: &[CleanedRecord]) -> Result<String> {
    encode(&CLEANED_COLUMNS, records)
}

pub fn decode_cleaned(content: &[u8]) -> Result<Vec<CleanedRecord>> {
    decode(content)
}

fn encode<T: Serialize>(header: &[&str], records: &[T]) -> Result<String> {
    let mut writer = csv::WriterBuilder::new()
        .delimiter(DELIMITER)
        .has_headers(false)
        .from_writer(Vec::new());

    writer.write_record(header)?;
    for record in records {
        writer.serialize(record)?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| EtlError::Io(e.into_error()))?;
    String::from_utf8(bytes).map_err(|e| {
        EtlError::Io(std::io::Error::new(std::io::ErrorKind::InvalidData, e))
    })
}

fn decode<T: DeserializeOwned>(content: &[u8]) -> Result<Vec<T>> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(DELIMITER)
        .has_headers(true)
        .from_reader(content);

    reader
        .deserialize()
        .map(|row| row.map_err(EtlError::from))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Region;

    fn raw(link: &str) -> RawRecord {
        RawRecord {
            purpose: "Prodej bytu".into(),
            address: "Nejedleho 123, Stredocesky kraj".into(),
            size_m2: Some("75 m2".into()),
            design: None,
            price_czk: "3 500 000 Kc".into(),
            link: link.into(),
        }
    }

    #[test]
    fn empty_dataset_still_has_header() {
        let text = encode_raw(&[]).unwrap();
        assert_eq!(text, "purpose\taddress\tsize_m2\tdesign\tprice_czk\tlink\n");
        assert!(decode_raw(text.as_bytes()).unwrap().is_empty());
    }

    #[test]
    fn absent_details_are_empty_fields() {
        let text = encode_raw(&[raw("https://x/1")]).unwrap();
        let line = text.lines().nth(1).unwrap();
        let fields: Vec<&str> = line.split('\t').collect();
        assert_eq!(fields[3], "");

        let back = decode_raw(text.as_bytes()).unwrap();
        assert_eq!(back[0].design, None);
        assert_eq!(back[0].size_m2.as_deref(), Some("75 m2"));
    }

    #[test]
    fn cleaned_rows_keep_schema_and_types() {
        let record = CleanedRecord {
            purpose: "Prodej bytu".into(),
            address: "Nejedleho 123".into(),
            region: Region::Stredocesky,
            size_m2: 0,
            design: Some("3+kk".into()),
            price_czk: 3_500_000,
            price_per_m2: None,
            link: "https://x/1".into(),
            dump_date: "2024_05_27_143015".into(),
            file_name: "raw_properties_2024_05_27_080000.csv".into(),
        };
        let text = encode_cleaned(std::slice::from_ref(&record)).unwrap();
        assert!(text.starts_with(&CLEANED_COLUMNS.join("\t")));
        assert!(text.contains("\tStredocesky kraj\t"));

        let back = decode_cleaned(text.as_bytes()).unwrap();
        assert_eq!(back, vec![record]);
    }
}
