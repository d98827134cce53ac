/*-------------------------------------------------------------------------------------------------
  Core Modules
-------------------------------------------------------------------------------------------------*/

pub mod annotate;
pub mod builder;
pub mod client;
pub mod errors;
pub mod feed;
pub mod ordinal;
pub mod range_record;
pub mod range_table;
pub mod search_results;
pub mod utils;
