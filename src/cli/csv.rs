use ipinfolookup::{RangeRecord, Result, SearchResults};
use std::path::Path;

/*-------------------------------------------------------------------------------------------------
  Save Lookup Results to CSV File
-------------------------------------------------------------------------------------------------*/

pub fn save<R: RangeRecord>(search_results: &SearchResults<'_, R>, path: &Path) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)?;

    // Write header
    writer.serialize([
        "IP Address",
        "Range Start",
        "Range End",
        "Country",
        "ASN",
        "AS Domain",
        "AS Name",
    ])?;

    // Write lookup records
    for (ip, record) in &search_results.matches {
        let row = (
            ip,
            record.start_addr(),
            record.end_addr(),
            record.country_code(),
            format!("AS{}", record.asn()),
            record.as_domain(),
            record.as_name(),
        );
        writer.serialize(row)?;
    }

    writer.flush()?;

    Ok(())
}
