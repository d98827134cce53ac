use crate::core::builder::TableBuilder;
use crate::core::errors::Result;
use crate::core::range_record::RangeRecord;
use crate::core::range_table::RangeTable;
use flate2::bufread::MultiGzDecoder;
use log::info;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

/*-------------------------------------------------------------------------------------------------
  Range Table Feed
-------------------------------------------------------------------------------------------------*/

/// Open a range table feed; files with a `.gz` extension are decompressed while reading.
pub fn open<P: AsRef<Path>>(path: P) -> Result<Box<dyn Read>> {
    let path = path.as_ref();
    let file = BufReader::new(File::open(path)?);

    let is_gzip = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.eq_ignore_ascii_case("gz"))
        .unwrap_or(false);

    if is_gzip {
        info!("Reading gzip-compressed range table: {:?}", path);
        Ok(Box::new(MultiGzDecoder::new(file)))
    } else {
        info!("Reading range table: {:?}", path);
        Ok(Box::new(file))
    }
}

/// Read a CSV range table (with a header row) from `stream` and build a [RangeTable].
pub fn read_table<R, T>(stream: T) -> Result<RangeTable<R>>
where
    R: RangeRecord,
    T: Read,
{
    // Row shape is validated by the table builder
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(stream);

    let mut builder = TableBuilder::new();
    let mut record = csv::StringRecord::new();
    while reader.read_record(&mut record)? {
        let fields: Vec<&str> = record.iter().collect();
        builder.push_row(&fields)?;
    }

    Ok(builder.finish())
}

/// Open the feed at `path` and build a [RangeTable] from it.
pub fn load_table<R, P>(path: P) -> Result<RangeTable<R>>
where
    R: RangeRecord,
    P: AsRef<Path>,
{
    read_table(open(path)?)
}

/*-------------------------------------------------------------------------------------------------
  Unit Tests
-------------------------------------------------------------------------------------------------*/
