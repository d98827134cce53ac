use crate::core::errors::{Error, Result};
use crate::core::ordinal::{addr_to_ordinal, parse_addr};
use crate::core::range_record::{RangeRecord, RangeRow, NO_ASN};
use crate::core::range_table::RangeTable;
use crate::core::utils::StringPool;
use lazy_static::lazy_static;
use log::{debug, error, info, trace, warn};
use regex::Regex;

/*-------------------------------------------------------------------------------------------------
  Feed Layout
-------------------------------------------------------------------------------------------------*/

/// Number of fields in every feed row.
pub const FIELD_COUNT: usize = 9;

const START_IP: usize = 0;
const END_IP: usize = 1;
const COUNTRY_CODE: usize = 2;
const COUNTRY_NAME: usize = 3;
const CONTINENT_CODE: usize = 4;
const CONTINENT_NAME: usize = 5;
const AS_NUMBER: usize = 6;
const AS_NAME: usize = 7;
const AS_DOMAIN: usize = 8;

const AS_NUMBER_PREFIX: &str = "AS";

lazy_static! {
    static ref IPV6_LITERAL: Regex = Regex::new("^[0-9a-fA-F]{1,4}:").unwrap();
}

/*-------------------------------------------------------------------------------------------------
  Simple Interface
-------------------------------------------------------------------------------------------------*/

/// Build a [RangeTable] from feed rows (header row excluded).
///
/// IPv6 rows and rows without AS data are skipped. A row with the wrong number of fields, an
/// unparsable address, or a start address above its end address aborts the build.
///
/// ```
/// use ipinfolookup::{CompactRecord, RangeRecord, RangeTable};
///
/// let rows = [[
///     "1.0.0.0", "1.0.0.255", "US", "United States", "NA", "North America",
///     "AS15169", "Google LLC", "google.com",
/// ]];
/// let table: RangeTable<CompactRecord> = ipinfolookup::build_table(rows)?;
///
/// let record = table.lookup("1.0.0.128").unwrap();
/// assert_eq!(record.asn(), 15169);
/// assert_eq!(record.country_code(), "US");
/// # Ok::<(), ipinfolookup::Error>(())
/// ```
pub fn build_table<R, I, S>(rows: I) -> Result<RangeTable<R>>
where
    R: RangeRecord,
    I: IntoIterator,
    I::Item: AsRef<[S]>,
    S: AsRef<str>,
{
    let mut builder = TableBuilder::new();
    for row in rows {
        builder.push_row(row.as_ref())?;
    }
    Ok(builder.finish())
}

/*-------------------------------------------------------------------------------------------------
  Table Builder
-------------------------------------------------------------------------------------------------*/

/// Incremental [RangeTable] construction, one feed row at a time.
#[derive(Debug)]
pub struct TableBuilder<R> {
    records: Vec<R>,
    strings: StringPool,

    skipped_ipv6: usize,
    skipped_no_asn: usize,
    malformed_asn: usize,
}

impl<R: RangeRecord> Default for TableBuilder<R> {
    fn default() -> Self {
        Self {
            records: Vec::new(),
            strings: StringPool::new(),
            skipped_ipv6: 0,
            skipped_no_asn: 0,
            malformed_asn: 0,
        }
    }
}

impl<R: RangeRecord> TableBuilder<R> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of records stored so far.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Validate one feed row and store it when it qualifies.
    ///
    /// Returns an error when the row shows the feed is corrupt; the builder should then be
    /// discarded.
    pub fn push_row<S: AsRef<str>>(&mut self, fields: &[S]) -> Result<()> {
        if fields.len() != FIELD_COUNT {
            let row = join_fields(fields);
            error!("Incorrect row in range table: {row}");
            return Err(Error::FieldCount {
                expected: FIELD_COUNT,
                found: fields.len(),
                row,
            });
        }

        let field = |index: usize| fields[index].as_ref();

        if IPV6_LITERAL.is_match(field(START_IP)) {
            trace!("Skipping IPv6 range: {}", field(START_IP));
            self.skipped_ipv6 += 1;
            return Ok(());
        }

        let asn = match field(AS_NUMBER).strip_prefix(AS_NUMBER_PREFIX) {
            Some(suffix) => suffix.parse::<u32>().unwrap_or_else(|_| {
                warn!("Malformed AS number in range table: {}", join_fields(fields));
                self.malformed_asn += 1;
                NO_ASN
            }),
            None => NO_ASN,
        };

        // AS data is mandatory
        if asn == NO_ASN {
            debug!("Skipping range without AS data: {}", join_fields(fields));
            self.skipped_no_asn += 1;
            return Ok(());
        }

        let country_code = Some(field(COUNTRY_CODE))
            .filter(|code| code.len() == 2 && code.is_ascii());

        let start_addr = parse_addr(field(START_IP)).inspect_err(|_| {
            error!("Invalid start address in range table: {}", join_fields(fields))
        })?;
        let end_addr = parse_addr(field(END_IP)).inspect_err(|_| {
            error!("Invalid end address in range table: {}", join_fields(fields))
        })?;

        let start_ordinal = addr_to_ordinal(start_addr);
        let end_ordinal = addr_to_ordinal(end_addr);

        if start_ordinal > end_ordinal {
            let row = join_fields(fields);
            error!("Inverted range in range table: {row}");
            return Err(Error::InvertedRange { row });
        }

        let row = RangeRow {
            start_addr,
            end_addr,
            start_ordinal,
            end_ordinal,
            asn,
            as_name: field(AS_NAME),
            as_domain: field(AS_DOMAIN),
            country_code,
            country_name: field(COUNTRY_NAME),
            continent_code: field(CONTINENT_CODE),
            continent_name: field(CONTINENT_NAME),
        };

        self.records.push(R::from_row(&row, &mut self.strings));

        Ok(())
    }

    /// Sort the stored records by start address, highest first, and return the finished table.
    pub fn finish(mut self) -> RangeTable<R> {
        self.records
            .sort_unstable_by(|a, b| b.start_ordinal().cmp(&a.start_ordinal()));

        info!(
            "Built range table: {} ranges, {} shared strings",
            self.records.len(),
            self.strings.len()
        );
        info!(
            "Skipped {} IPv6 ranges and {} ranges without AS data ({} malformed AS numbers)",
            self.skipped_ipv6, self.skipped_no_asn, self.malformed_asn
        );

        RangeTable::from_sorted(self.records)
    }
}

fn join_fields<S: AsRef<str>>(fields: &[S]) -> String {
    fields
        .iter()
        .map(|field| field.as_ref())
        .collect::<Vec<&str>>()
        .join(",")
}

/*-------------------------------------------------------------------------------------------------
  Unit Tests
-------------------------------------------------------------------------------------------------*/
