use crate::cli;
use ipinfolookup::{AnnotateOptions, Client, ClientBuilder, RangeRecord, RangeTable, Result};
use log::error;
use serde::Serialize;
use std::io::{self, BufWriter};
use std::net::Ipv4Addr;

/*-------------------------------------------------------------------------------------------------
  Core functions
-------------------------------------------------------------------------------------------------*/

/*--------------------------------------------------------------------------------------
  Build the range table client from CLI arguments
--------------------------------------------------------------------------------------*/

pub fn build_client(args: &cli::Args) -> Client {
    let mut client_builder = ClientBuilder::new();
    if let Some(csv_file) = &args.csv_file {
        client_builder.csv_file(csv_file);
    }
    client_builder.build()
}

/*--------------------------------------------------------------------------------------
  Parse IP addresses from CLI arguments
--------------------------------------------------------------------------------------*/

pub fn parse_ips(args: &cli::Args) -> Option<Vec<Ipv4Addr>> {
    args.ips.as_ref().map(|ips| {
        ips.iter()
            .filter_map(|ip| {
                ip.parse().ok().or_else(|| {
                    error!("Invalid IPv4 address: {:?}", ip);
                    None
                })
            })
            .collect()
    })
}

/*--------------------------------------------------------------------------------------
  Run the CLI
--------------------------------------------------------------------------------------*/

/// Load the range table and either look up the addresses given on the command line or
/// annotate stdin. Returns `false` when any requested address is invalid or not found.
pub fn run<R>(args: &cli::Args) -> Result<bool>
where
    R: RangeRecord + Serialize,
{
    let client = build_client(args);
    let table: RangeTable<R> = client.get_table()?;

    match parse_ips(args) {
        Some(ips) => {
            let search_results = table.search(&ips);
            cli::log::search_results(&ips, &search_results);

            if args.json_format {
                cli::output::json_lines(&search_results)?;
            } else {
                cli::output::results_table(&search_results);
            }

            if let Some(path) = &args.results_csv_file {
                cli::csv::save(&search_results, path)?;
            }

            let all_valid = args.ips.as_ref().map(Vec::len) == Some(ips.len());
            Ok(all_valid && search_results.not_found.is_empty())
        }
        None => {
            let options = AnnotateOptions {
                separator: args.separator,
                field: usize::from(args.field),
            };

            let stdout = io::stdout();
            let output = BufWriter::with_capacity(64 * 1024, stdout.lock());
            ipinfolookup::annotate_lines(&table, io::stdin().lock(), output, options)?;

            Ok(true)
        }
    }
}
