use clap::Parser;
use std::path::PathBuf;

/*-------------------------------------------------------------------------------------------------
  Command Line Interface (CLI) Arguments
-------------------------------------------------------------------------------------------------*/

#[derive(Parser, Debug)]
#[command(author, version, about = "Look up country and AS data for IPv4 addresses.", long_about = None)]
pub struct Args {
    /// ipinfo.io country_asn CSV file [env: IPINFO_CSV] [default: ~/country_asn.csv.gz]
    #[arg(short = 'i', long = "input")]
    pub csv_file: Option<PathBuf>,

    /// Field separator used when annotating lines read from stdin
    #[arg(
        short = 's',
        long,
        default_value = "\t",
        hide_default_value = true,
        value_parser = parse_separator
    )]
    pub separator: char,

    /// Field (1-based) holding the IP address when annotating lines read from stdin
    #[arg(short = 'f', long, default_value_t = 1, value_parser = clap::value_parser!(u16).range(1..))]
    pub field: u16,

    /// Use the compact range table (no AS names)
    #[arg(long)]
    pub compact: bool,

    /// Output Format: JSON lines
    #[arg(short = 'J', long)]
    pub json_format: bool,

    /// Save the lookup results to a CSV file
    #[arg(long = "csv")]
    pub results_csv_file: Option<PathBuf>,

    /// Logging verbosity
    #[command(flatten)]
    pub verbose: clap_verbosity_flag::Verbosity,

    /// IP addresses to look up; when omitted, annotate lines read from stdin
    pub ips: Option<Vec<String>>,
}

/// Accept exactly one ASCII character as the field separator.
fn parse_separator(value: &str) -> Result<char, String> {
    let mut chars = value.chars();
    match (chars.next(), chars.next()) {
        (Some(separator), None) if separator.is_ascii() => Ok(separator),
        _ => Err(format!(
            "expected a single ASCII character, got {} bytes",
            value.len()
        )),
    }
}
