use crate::core::ordinal::{ordinal_to_addr, Ordinal};
use crate::core::utils::StringPool;
use serde::{Serialize, Serializer};
use std::net::Ipv4Addr;
use std::sync::Arc;

/*-------------------------------------------------------------------------------------------------
  Sentinel Values
-------------------------------------------------------------------------------------------------*/

/// Placeholder for text metadata that is not available.
pub const NOT_AVAILABLE: &str = "n/a";

/// Placeholder country code stored in [CompactRecord]s without a usable country code.
pub const UNKNOWN_COUNTRY: &str = "__";

/// Autonomous system number meaning "no AS data"; rows carrying it are never stored.
pub const NO_ASN: u32 = 0;

fn or_not_available(value: &str) -> &str {
    if value.is_empty() {
        NOT_AVAILABLE
    } else {
        value
    }
}

/*-------------------------------------------------------------------------------------------------
  Range Row
-------------------------------------------------------------------------------------------------*/

/// A validated feed row, borrowed from the raw fields, before it is projected into one of the
/// [RangeRecord] representations.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RangeRow<'r> {
    pub start_addr: Ipv4Addr,
    pub end_addr: Ipv4Addr,
    pub start_ordinal: Ordinal,
    pub end_ordinal: Ordinal,

    /// Never [NO_ASN]; the builder skips rows without AS data.
    pub asn: u32,
    pub as_name: &'r str,
    pub as_domain: &'r str,

    /// `Some` only when the feed carries a two-character ASCII country code.
    pub country_code: Option<&'r str>,
    pub country_name: &'r str,
    pub continent_code: &'r str,
    pub continent_name: &'r str,
}

/*-------------------------------------------------------------------------------------------------
  Range Record
-------------------------------------------------------------------------------------------------*/

/// A range table entry: an IPv4 interval and its country / autonomous system metadata.
pub trait RangeRecord {
    /// Project a validated row into this representation, sharing repeated strings through
    /// `strings`.
    fn from_row(row: &RangeRow<'_>, strings: &mut StringPool) -> Self;

    fn start_ordinal(&self) -> Ordinal;

    fn end_ordinal(&self) -> Ordinal;

    fn asn(&self) -> u32;

    fn country_code(&self) -> &str;

    fn as_name(&self) -> &str;

    fn as_domain(&self) -> &str;

    fn start_addr(&self) -> Ipv4Addr {
        ordinal_to_addr(self.start_ordinal())
    }

    fn end_addr(&self) -> Ipv4Addr {
        ordinal_to_addr(self.end_ordinal())
    }
}

/*-------------------------------------------------------------------------------------------------
  Verbose Record
-------------------------------------------------------------------------------------------------*/

/// Country and continent metadata of a [VerboseRecord].
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct Country {
    /// Two-character country code or [NOT_AVAILABLE].
    pub code: Arc<str>,
    pub name: Arc<str>,
    pub continent_code: Arc<str>,
    pub continent_name: Arc<str>,
}

/// Range record carrying all of the feed's metadata.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct VerboseRecord {
    #[serde(rename = "start_ip")]
    pub start_addr: Ipv4Addr,

    #[serde(rename = "end_ip")]
    pub end_addr: Ipv4Addr,

    #[serde(skip)]
    pub start_ordinal: Ordinal,

    #[serde(skip)]
    pub end_ordinal: Ordinal,

    pub asn: u32,
    pub as_name: Arc<str>,
    pub as_domain: Arc<str>,
    pub country: Country,
}

impl RangeRecord for VerboseRecord {
    fn from_row(row: &RangeRow<'_>, strings: &mut StringPool) -> Self {
        // Without a country code the remaining country columns are not trusted either
        let country = match row.country_code {
            Some(code) => Country {
                code: strings.intern(code),
                name: strings.intern(or_not_available(row.country_name)),
                continent_code: strings.intern(or_not_available(row.continent_code)),
                continent_name: strings.intern(or_not_available(row.continent_name)),
            },
            None => {
                let not_available = strings.intern(NOT_AVAILABLE);
                Country {
                    code: not_available.clone(),
                    name: not_available.clone(),
                    continent_code: not_available.clone(),
                    continent_name: not_available,
                }
            }
        };

        Self {
            start_addr: row.start_addr,
            end_addr: row.end_addr,
            start_ordinal: row.start_ordinal,
            end_ordinal: row.end_ordinal,
            asn: row.asn,
            as_name: strings.intern(or_not_available(row.as_name)),
            as_domain: strings.intern(or_not_available(row.as_domain)),
            country,
        }
    }

    fn start_ordinal(&self) -> Ordinal {
        self.start_ordinal
    }

    fn end_ordinal(&self) -> Ordinal {
        self.end_ordinal
    }

    fn asn(&self) -> u32 {
        self.asn
    }

    fn country_code(&self) -> &str {
        &self.country.code
    }

    fn as_name(&self) -> &str {
        &self.as_name
    }

    fn as_domain(&self) -> &str {
        &self.as_domain
    }

    fn start_addr(&self) -> Ipv4Addr {
        self.start_addr
    }

    fn end_addr(&self) -> Ipv4Addr {
        self.end_addr
    }
}

/*-------------------------------------------------------------------------------------------------
  Compact Record
-------------------------------------------------------------------------------------------------*/

/// Dense range record for production lookups: fixed-width bounds and ASN, a two-byte country
/// code, and a shared AS domain. The AS name is not kept.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct CompactRecord {
    #[serde(rename = "start_ip", serialize_with = "serialize_ordinal")]
    pub start_ordinal: Ordinal,

    #[serde(rename = "end_ip", serialize_with = "serialize_ordinal")]
    pub end_ordinal: Ordinal,

    pub asn: u32,
    pub as_domain: Arc<str>,

    #[serde(serialize_with = "serialize_country_code")]
    pub country_code: [u8; 2],
}

impl RangeRecord for CompactRecord {
    fn from_row(row: &RangeRow<'_>, strings: &mut StringPool) -> Self {
        let country_code = match row.country_code.map(str::as_bytes) {
            Some(&[first, second]) => [first, second],
            _ => [b'_', b'_'],
        };

        Self {
            start_ordinal: row.start_ordinal,
            end_ordinal: row.end_ordinal,
            asn: row.asn,
            as_domain: strings.intern(or_not_available(row.as_domain)),
            country_code,
        }
    }

    fn start_ordinal(&self) -> Ordinal {
        self.start_ordinal
    }

    fn end_ordinal(&self) -> Ordinal {
        self.end_ordinal
    }

    fn asn(&self) -> u32 {
        self.asn
    }

    fn country_code(&self) -> &str {
        std::str::from_utf8(&self.country_code).unwrap_or(UNKNOWN_COUNTRY)
    }

    fn as_name(&self) -> &str {
        NOT_AVAILABLE
    }

    fn as_domain(&self) -> &str {
        &self.as_domain
    }
}

/*--------------------------------------------------------------------------------------
  Serialization Helpers
--------------------------------------------------------------------------------------*/

fn serialize_ordinal<S>(ordinal: &Ordinal, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    ordinal_to_addr(*ordinal).serialize(serializer)
}

fn serialize_country_code<S>(country_code: &[u8; 2], serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(std::str::from_utf8(country_code).unwrap_or(UNKNOWN_COUNTRY))
}

/*-------------------------------------------------------------------------------------------------
  Unit Tests
-------------------------------------------------------------------------------------------------*/
