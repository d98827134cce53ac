use crate::core::errors::Result;
use crate::core::range_record::{RangeRecord, NO_ASN};
use crate::core::range_table::RangeTable;
use log::info;
use std::io::{BufRead, Write};

/*-------------------------------------------------------------------------------------------------
  Line Annotation
-------------------------------------------------------------------------------------------------*/

/// Options controlling how [annotate_lines] splits its input lines.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct AnnotateOptions {
    /// Field separator, used both to split input lines and to join the appended columns.
    pub separator: char,

    /// 1-based index of the field holding the IP address.
    pub field: usize,
}

impl Default for AnnotateOptions {
    fn default() -> Self {
        Self {
            separator: '\t',
            field: 1,
        }
    }
}

/// Line counters reported by [annotate_lines].
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct AnnotateStats {
    pub lines: usize,
    pub found: usize,
    pub not_found: usize,

    /// Lines echoed unchanged because they have fewer fields than [AnnotateOptions::field].
    pub passed_through: usize,
}

/// Copy each line of `input` to `output`, appending the country code, AS number, AS domain and
/// AS name of the address found in the configured field.
///
/// Addresses not found in `table` get empty country and AS columns and `AS0`.
///
/// ```
/// use ipinfolookup::{AnnotateOptions, CompactRecord, RangeTable};
///
/// let rows = [[
///     "1.0.0.0", "1.0.0.255", "US", "United States", "NA", "North America",
///     "AS15169", "Google LLC", "google.com",
/// ]];
/// let table: RangeTable<CompactRecord> = ipinfolookup::build_table(rows)?;
///
/// let options = AnnotateOptions { separator: ',', field: 2 };
/// let mut output = Vec::new();
/// ipinfolookup::annotate_lines(&table, "GET,1.0.0.7\n".as_bytes(), &mut output, options)?;
///
/// assert_eq!(output, b"GET,1.0.0.7,US,AS15169,google.com,n/a\n");
/// # Ok::<(), ipinfolookup::Error>(())
/// ```
pub fn annotate_lines<R, I, O>(
    table: &RangeTable<R>,
    mut input: I,
    mut output: O,
    options: AnnotateOptions,
) -> Result<AnnotateStats>
where
    R: RangeRecord,
    I: BufRead,
    O: Write,
{
    let separator = options.separator;
    let mut separator_bytes = [0u8; 4];
    let separator_bytes = separator.encode_utf8(&mut separator_bytes).as_bytes();

    let mut stats = AnnotateStats::default();
    let mut buffer = Vec::new();

    loop {
        buffer.clear();
        if input.read_until(b'\n', &mut buffer)? == 0 {
            break;
        }
        stats.lines += 1;

        let line = buffer.strip_suffix(b"\n").unwrap_or(&buffer[..]);
        let line = line.strip_suffix(b"\r").unwrap_or(line);

        let ip = options
            .field
            .checked_sub(1)
            .and_then(|index| nth_field(line, separator_bytes, index));

        let Some(ip) = ip else {
            stats.passed_through += 1;
            output.write_all(line)?;
            output.write_all(b"\n")?;
            continue;
        };

        // Only the address field has to be text; the rest of the line is copied as-is
        let record = std::str::from_utf8(ip)
            .ok()
            .and_then(|ip| table.lookup(ip));

        let (country_code, asn, as_domain, as_name) = match record {
            Some(record) => {
                stats.found += 1;
                (
                    record.country_code(),
                    record.asn(),
                    record.as_domain(),
                    record.as_name(),
                )
            }
            None => {
                stats.not_found += 1;
                ("", NO_ASN, "", "")
            }
        };

        output.write_all(line)?;
        writeln!(
            output,
            "{separator}{country_code}{separator}AS{asn}{separator}{as_domain}{separator}{as_name}"
        )?;
    }

    output.flush()?;

    info!(
        "Annotated {} lines: {} found, {} not found, {} passed through",
        stats.lines, stats.found, stats.not_found, stats.passed_through
    );

    Ok(stats)
}

/// The `index`-th (0-based) `separator`-delimited field of `line`, or `None` when the line has
/// fewer fields.
fn nth_field<'l>(line: &'l [u8], separator: &[u8], index: usize) -> Option<&'l [u8]> {
    let find = |bytes: &[u8]| {
        bytes
            .windows(separator.len())
            .position(|window| window == separator)
    };

    let mut rest = line;
    for _ in 0..index {
        let position = find(rest)?;
        rest = &rest[position + separator.len()..];
    }

    let end = find(rest).unwrap_or(rest.len());
    Some(&rest[..end])
}

/*-------------------------------------------------------------------------------------------------
  Unit Tests
-------------------------------------------------------------------------------------------------*/

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::builder::build_table;
    use crate::core::builder::tests::test_rows;
    use crate::core::range_record::{CompactRecord, VerboseRecord};
    use test_log::test;

    fn annotate<R: RangeRecord>(
        table: &RangeTable<R>,
        input: &str,
        options: AnnotateOptions,
    ) -> (String, AnnotateStats) {
        let mut output = Vec::new();
        let stats = annotate_lines(table, input.as_bytes(), &mut output, options).unwrap();
        (String::from_utf8(output).unwrap(), stats)
    }

    #[test]
    fn test_annotate_default_options() {
        let table: RangeTable<VerboseRecord> = build_table(test_rows()).unwrap();
        let (output, stats) = annotate(&table, "8.8.8.8\tGET /\n", AnnotateOptions::default());

        assert_eq!(output, "8.8.8.8\tGET /\tUS\tAS15169\tgoogle.com\tAS Name\n");
        assert_eq!(
            stats,
            AnnotateStats {
                lines: 1,
                found: 1,
                not_found: 0,
                passed_through: 0,
            }
        );
    }

    #[test]
    fn test_annotate_not_found() {
        let table: RangeTable<CompactRecord> = build_table(test_rows()).unwrap();
        let input = "9.9.9.9\nnot-an-ip\n";
        let (output, stats) = annotate(&table, input, AnnotateOptions::default());

        assert_eq!(output, "9.9.9.9\t\tAS0\t\t\nnot-an-ip\t\tAS0\t\t\n");
        assert_eq!(stats.not_found, 2);
    }

    #[test]
    fn test_annotate_field_and_separator() {
        let table: RangeTable<CompactRecord> = build_table(test_rows()).unwrap();
        let options = AnnotateOptions {
            separator: ' ',
            field: 3,
        };
        let input = "2024-01-01 12:00:00 1.0.0.1 GET\n2024-01-01 12:00:01\n";
        let (output, stats) = annotate(&table, input, options);

        assert_eq!(
            output,
            "2024-01-01 12:00:00 1.0.0.1 GET AU AS13335 cloudflare.com n/a\n2024-01-01 12:00:01\n"
        );
        assert_eq!(stats.found, 1);
        assert_eq!(stats.passed_through, 1);
    }

    #[test]
    fn test_annotate_line_endings() {
        let table: RangeTable<CompactRecord> = build_table(test_rows()).unwrap();
        let (output, stats) = annotate(&table, "8.8.8.8\r\n1.0.0.1", AnnotateOptions::default());

        assert_eq!(
            output,
            "8.8.8.8\tUS\tAS15169\tgoogle.com\tn/a\n1.0.0.1\tAU\tAS13335\tcloudflare.com\tn/a\n"
        );
        assert_eq!(stats.lines, 2);
    }

    #[test]
    fn test_annotate_empty_lines_and_input() {
        let table: RangeTable<CompactRecord> = build_table(test_rows()).unwrap();

        let (output, stats) = annotate(&table, "", AnnotateOptions::default());
        assert_eq!(output, "");
        assert_eq!(stats, AnnotateStats::default());

        // An empty line still has one (empty) field
        let (output, _) = annotate(&table, "\n", AnnotateOptions::default());
        assert_eq!(output, "\t\tAS0\t\t\n");
    }

    #[test]
    fn test_annotate_field_zero_passes_through() {
        let table: RangeTable<CompactRecord> = build_table(test_rows()).unwrap();
        let options = AnnotateOptions {
            separator: '\t',
            field: 0,
        };
        let (output, stats) = annotate(&table, "8.8.8.8\n", options);

        assert_eq!(output, "8.8.8.8\n");
        assert_eq!(stats.passed_through, 1);
    }

    #[test]
    fn test_annotate_preserves_non_utf8_bytes() {
        let table: RangeTable<CompactRecord> = build_table(test_rows()).unwrap();
        let input: &[u8] = b"8.8.8.8\tcaf\xe9\n\xff\xfe\n";

        let mut output = Vec::new();
        let stats =
            annotate_lines(&table, input, &mut output, AnnotateOptions::default()).unwrap();

        let mut expected = b"8.8.8.8\tcaf\xe9".to_vec();
        expected.extend_from_slice(b"\tUS\tAS15169\tgoogle.com\tn/a\n");
        expected.extend_from_slice(b"\xff\xfe\t\tAS0\t\t\n");
        assert_eq!(output, expected);
        assert_eq!(stats.found, 1);
        assert_eq!(stats.not_found, 1);
    }

    #[test]
    fn test_annotate_multi_byte_separator() {
        let table: RangeTable<CompactRecord> = build_table(test_rows()).unwrap();
        let options = AnnotateOptions {
            separator: '→',
            field: 2,
        };
        let (output, stats) = annotate(&table, "GET→1.0.0.1\nGET\n", options);

        assert_eq!(output, "GET→1.0.0.1→AU→AS13335→cloudflare.com→n/a\nGET\n");
        assert_eq!(stats.found, 1);
        assert_eq!(stats.passed_through, 1);
    }

    #[test]
    fn test_nth_field() {
        assert_eq!(nth_field(b"a,b,,c", b",", 0), Some(&b"a"[..]));
        assert_eq!(nth_field(b"a,b,,c", b",", 2), Some(&b""[..]));
        assert_eq!(nth_field(b"a,b,,c", b",", 3), Some(&b"c"[..]));
        assert_eq!(nth_field(b"a,b,,c", b",", 4), None);
        assert_eq!(nth_field(b"", b",", 0), Some(&b""[..]));
        assert_eq!(nth_field(b"a::b", b"::", 1), Some(&b"b"[..]));
    }
}
