//! Country and autonomous-system lookups for IPv4 addresses.
//!
//! The ipinfo.io `country_asn` CSV feed is loaded once into an immutable [RangeTable] of
//! non-overlapping IPv4 ranges; each lookup is a binary search over that table.
//!
//! ```no_run
//! use ipinfolookup::RangeRecord;
//!
//! // Load the feed from `$IPINFO_CSV` or `${HOME}/country_asn.csv.gz`
//! let table = ipinfolookup::get_table()?;
//!
//! match table.lookup("1.1.1.1") {
//!     Some(record) => println!("{} AS{}", record.country_code(), record.asn()),
//!     None => println!("not found"),
//! }
//! # Ok::<(), ipinfolookup::Error>(())
//! ```

mod core;

/*-------------------------------------------------------------------------------------------------
  Primary Interface
-------------------------------------------------------------------------------------------------*/

pub use crate::core::annotate::{annotate_lines, AnnotateOptions, AnnotateStats};
pub use crate::core::builder::{build_table, TableBuilder, FIELD_COUNT};
pub use crate::core::client::{get_table, Client, ClientBuilder};
pub use crate::core::errors::{Error, Result};
pub use crate::core::feed::{load_table, read_table};
pub use crate::core::ordinal::{
    addr_to_ordinal, ip_to_ordinal, ordinal_to_addr, parse_addr, Ordinal,
};
pub use crate::core::range_record::{
    CompactRecord, Country, RangeRecord, RangeRow, VerboseRecord, NOT_AVAILABLE, NO_ASN,
    UNKNOWN_COUNTRY,
};
pub use crate::core::range_table::RangeTable;
pub use crate::core::search_results::SearchResults;
pub use crate::core::utils::StringPool;
