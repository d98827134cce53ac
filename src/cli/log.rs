use ipinfolookup::SearchResults;
use log::{info, warn};
use std::net::Ipv4Addr;

/*-------------------------------------------------------------------------------------------------
  Logging Functions
-------------------------------------------------------------------------------------------------*/

/*--------------------------------------------------------------------------------------
  Search Results
--------------------------------------------------------------------------------------*/

pub fn search_results<R>(ips: &[Ipv4Addr], search_results: &SearchResults<'_, R>) {
    let count_ips = ips.len();
    info!("Searched for {count_ips} address(es) in the range table");

    let count_found = search_results.matches.len();
    if count_found > 0 {
        info!("Found {count_found} address(es) in the range table");
    };

    let count_not_found = search_results.not_found.len();
    if count_not_found > 0 {
        warn!("Did not find {count_not_found} address(es)");
    };
}
