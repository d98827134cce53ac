use std::collections::{BTreeMap, BTreeSet};
use std::net::Ipv4Addr;

/*-------------------------------------------------------------------------------------------------
  Search Results
-------------------------------------------------------------------------------------------------*/

/// Search results containing the range record found for each address and the set of
/// addresses not found in the range table.
#[derive(Clone, Debug)]
pub struct SearchResults<'t, R> {
    /// Map of found addresses to the records of the ranges containing them.
    pub matches: BTreeMap<Ipv4Addr, &'t R>,

    /// Set of addresses not contained in any range.
    pub not_found: BTreeSet<Ipv4Addr>,
}
