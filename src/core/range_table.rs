use crate::core::ordinal::{addr_to_ordinal, ip_to_ordinal, Ordinal};
use crate::core::range_record::RangeRecord;
use crate::core::search_results::SearchResults;
use log::{trace, warn};
use std::collections::{BTreeMap, BTreeSet};
use std::net::Ipv4Addr;

/*-------------------------------------------------------------------------------------------------
  Range Table
-------------------------------------------------------------------------------------------------*/

/// Immutable collection of non-overlapping IPv4 ranges, sorted by start address in descending
/// order, answering point lookups by binary search.
///
/// Tables are built once (see [build_table](crate::build_table) and
/// [Client::get_table](crate::Client::get_table)) and only read afterwards; they can be shared
/// by reference across threads.
#[derive(Clone, Debug)]
pub struct RangeTable<R> {
    records: Vec<R>,
}

impl<R> Default for RangeTable<R> {
    fn default() -> Self {
        Self {
            records: Vec::new(),
        }
    }
}

/*--------------------------------------------------------------------------------------
  Range Table Implementation
--------------------------------------------------------------------------------------*/

impl<R: RangeRecord> RangeTable<R> {
    /// Wrap records that are already sorted by start ordinal, highest first.
    pub(crate) fn from_sorted(records: Vec<R>) -> Self {
        debug_assert!(records
            .windows(2)
            .all(|pair| pair[0].start_ordinal() >= pair[1].start_ordinal()));
        Self { records }
    }

    /*-------------------------------------------------------------------------
      Getters
    -------------------------------------------------------------------------*/

    /// Records in table order (descending start address).
    pub fn records(&self) -> &[R] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /*-------------------------------------------------------------------------
      Lookup
    -------------------------------------------------------------------------*/

    /// Find the range containing the dotted-quad address `ip`.
    ///
    /// Returns `None` when `ip` does not parse, when no range contains it, and when it equals a
    /// range's end address: the end bound is exclusive here even though the feed lists ranges
    /// with inclusive ends.
    ///
    /// ```
    /// use ipinfolookup::{CompactRecord, RangeTable};
    ///
    /// let rows = [[
    ///     "1.0.0.0", "1.0.0.255", "US", "United States", "NA", "North America",
    ///     "AS15169", "Google LLC", "google.com",
    /// ]];
    /// let table: RangeTable<CompactRecord> = ipinfolookup::build_table(rows)?;
    ///
    /// assert!(table.lookup("1.0.0.0").is_some());
    /// assert!(table.lookup("1.0.0.254").is_some());
    /// assert!(table.lookup("1.0.0.255").is_none());
    /// assert!(table.lookup("not an address").is_none());
    /// # Ok::<(), ipinfolookup::Error>(())
    /// ```
    pub fn lookup(&self, ip: &str) -> Option<&R> {
        match ip_to_ordinal(ip) {
            Ok(ordinal) => self.lookup_ordinal(ordinal),
            Err(error) => {
                trace!("Lookup of unparsable address: {error}");
                None
            }
        }
    }

    /// Find the range containing `addr`.
    pub fn lookup_addr(&self, addr: Ipv4Addr) -> Option<&R> {
        self.lookup_ordinal(addr_to_ordinal(addr))
    }

    /// Find the range containing `ordinal`.
    pub fn lookup_ordinal(&self, ordinal: Ordinal) -> Option<&R> {
        // First (lowest) index whose start bound is not above the query
        let index = self
            .records
            .partition_point(|record| record.start_ordinal() > ordinal);

        let candidate = self.records.get(index)?;

        if ordinal >= candidate.start_ordinal() && ordinal < candidate.end_ordinal() {
            Some(candidate)
        } else {
            None
        }
    }

    /*-------------------------------------------------------------------------
      Search
    -------------------------------------------------------------------------*/

    /// Look up each address in `values`, collecting the matches and the addresses not found.
    pub fn search<'a, I>(&self, values: I) -> SearchResults<'_, R>
    where
        I: IntoIterator<Item = &'a Ipv4Addr>,
    {
        let mut matches: BTreeMap<Ipv4Addr, &R> = BTreeMap::new();
        let mut not_found: BTreeSet<Ipv4Addr> = BTreeSet::new();

        for addr in values {
            match self.lookup_addr(*addr) {
                Some(record) => {
                    matches.insert(*addr, record);
                }
                None => {
                    warn!("Address not found in range table: {addr}");
                    not_found.insert(*addr);
                }
            }
        }

        SearchResults { matches, not_found }
    }
}

/*-------------------------------------------------------------------------------------------------
  Unit Tests
-------------------------------------------------------------------------------------------------*/
