// src/csv.rs
use std::io::Write;

use ::csv::WriterBuilder;

use crate::{error::Result, record::JobRecord};

/// UTF-8 signature so spreadsheet apps pick the right encoding.
pub const BOM: &[u8] = b"\xEF\xBB\xBF";

/// BOM, header row in schema order, then one row per record.
pub fn write_records<W: Write>(mut w: W, records: &[JobRecord]) -> Result<()> {
    w.write_all(BOM)?;
    let mut out = WriterBuilder::new().has_headers(false).from_writer(w);
    out.write_record(JobRecord::FIELDS)?;
    for rec in records {
        out.serialize(rec)?;
    }
    out.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_set_still_has_header() {
        let mut bytes = Vec::new();
        write_records(&mut bytes, &[]).unwrap();
        assert!(bytes.starts_with(BOM));
        let text = std::str::from_utf8(&bytes[BOM.len()..]).unwrap();
        assert_eq!(text.trim_end(), JobRecord::FIELDS.join(","));
    }
}
