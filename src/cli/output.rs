use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::{NOTHING, UTF8_FULL};
use comfy_table::*;
use ipinfolookup::{RangeRecord, Result, SearchResults};
use serde::Serialize;
use std::io::{self, Write};
use std::net::Ipv4Addr;

/*-------------------------------------------------------------------------------------------------
  Output Functions
-------------------------------------------------------------------------------------------------*/

/*--------------------------------------------------------------------------------------
  Results Table
--------------------------------------------------------------------------------------*/

pub fn results_table<R: RangeRecord>(search_results: &SearchResults<'_, R>) {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic);

    table.set_header(vec![
        Cell::new("IP Address")
            .add_attribute(Attribute::Bold)
            .fg(Color::Green),
        Cell::new("Range")
            .add_attribute(Attribute::Bold)
            .fg(Color::Green),
        Cell::new("Country")
            .add_attribute(Attribute::Bold)
            .fg(Color::Green),
        Cell::new("ASN")
            .add_attribute(Attribute::Bold)
            .fg(Color::Green),
        Cell::new("AS Domain")
            .add_attribute(Attribute::Bold)
            .fg(Color::Green),
        Cell::new("AS Name")
            .add_attribute(Attribute::Bold)
            .fg(Color::Green),
    ]);

    for (ip, record) in &search_results.matches {
        table.add_row(vec![
            Cell::new(ip).add_attribute(Attribute::Bold),
            Cell::new(format!("{} - {}", record.start_addr(), record.end_addr())),
            Cell::new(record.country_code()),
            Cell::new(format!("AS{}", record.asn())),
            Cell::new(record.as_domain()),
            Cell::new(record.as_name()),
        ]);
    }

    for ip in &search_results.not_found {
        table.add_row(vec![
            Cell::new(ip).add_attribute(Attribute::Bold),
            Cell::new("not found").fg(Color::Red),
        ]);
    }

    // Right-align the IP Address column
    let column = table.column_mut(0).expect("The first column exists");
    column.set_cell_alignment(CellAlignment::Right);

    println!("{table}");

    // Print results summary
    let found_count = search_results.matches.len();
    let not_found_count = search_results.not_found.len();

    let mut summary_table = Table::new();
    summary_table
        .load_preset(NOTHING)
        .set_content_arrangement(ContentArrangement::Dynamic);

    summary_table.add_row(vec![Cell::new(found_count), Cell::new("Addresses Found")]);
    summary_table.add_row(vec![
        Cell::new(not_found_count),
        Cell::new("Addresses Not Found"),
    ]);

    let summary_numbers_column = summary_table
        .column_mut(0)
        .expect("The first column exists");
    summary_numbers_column.set_cell_alignment(CellAlignment::Right);

    println!("{summary_table}");
}

/*--------------------------------------------------------------------------------------
  Results In JSON Lines Format
--------------------------------------------------------------------------------------*/

#[derive(Serialize)]
struct JsonResult<'r, R> {
    ip: Ipv4Addr,
    found: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    range: Option<&'r R>,
}

pub fn json_lines<R: Serialize>(search_results: &SearchResults<'_, R>) -> Result<()> {
    let stdout = io::stdout();
    let mut stdout = stdout.lock();

    let found = search_results
        .matches
        .iter()
        .map(|(ip, record)| JsonResult {
            ip: *ip,
            found: true,
            range: Some(*record),
        });
    let not_found = search_results.not_found.iter().map(|ip| JsonResult {
        ip: *ip,
        found: false,
        range: None,
    });

    for result in found.chain(not_found) {
        serde_json::to_writer(&mut stdout, &result)?;
        writeln!(stdout)?;
    }

    Ok(())
}
