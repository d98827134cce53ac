use crate::core::errors::Result;
use crate::core::feed;
use crate::core::range_record::{CompactRecord, RangeRecord, VerboseRecord};
use crate::core::range_table::RangeTable;
use log::{info, warn};
use std::env;
use std::path::{Path, PathBuf};
use std::time;

/*-------------------------------------------------------------------------------------------------
  Simple Interface
-------------------------------------------------------------------------------------------------*/

/// _**Simple library interface**_ loads the range table feed using the default client
/// configuration and returns a compact [RangeTable] ready for lookups.
///
/// ```no_run
/// let table = ipinfolookup::get_table()?;
///
/// if let Some(record) = table.lookup("8.8.8.8") {
///     use ipinfolookup::RangeRecord;
///     println!("{} AS{} {}", record.country_code(), record.asn(), record.as_domain());
/// }
/// # Ok::<(), ipinfolookup::Error>(())
/// ```
pub fn get_table() -> Result<RangeTable<CompactRecord>> {
    Client::new().get_table()
}

/*-------------------------------------------------------------------------------------------------
  Client Builder
-------------------------------------------------------------------------------------------------*/

/// A builder for the [Client] struct that allows you to customize the client configuration.
///
/// ```
/// let client = ipinfolookup::ClientBuilder::new()
///     .csv_file("/tmp/country_asn.csv.gz")
///     .build();
///
/// assert_eq!(client.csv_file(), std::path::Path::new("/tmp/country_asn.csv.gz"));
/// ```
///
/// The [ClientBuilder::new] method sources configuration values from environment variables when
/// set and uses default values otherwise. [ClientBuilder::default] ignores the environment.
#[derive(Debug, Clone)]
pub struct ClientBuilder {
    csv_file: PathBuf,
}

/*--------------------------------------------------------------------------------------
  Client Builder Implementation
--------------------------------------------------------------------------------------*/

impl Default for ClientBuilder {
    /// Create a new [ClientBuilder] with default configuration values.
    ///
    /// ```
    /// let client = ipinfolookup::ClientBuilder::default().build();
    ///
    /// assert_eq!(
    ///     client.csv_file(),
    ///     dirs::home_dir().unwrap_or_default().join("country_asn.csv.gz")
    /// );
    /// ```
    fn default() -> Self {
        Self {
            csv_file: dirs::home_dir()
                .unwrap_or_default()
                .join("country_asn.csv.gz"), // ${HOME}/country_asn.csv.gz
        }
    }
}

impl ClientBuilder {
    /// Create a new [ClientBuilder] reading initial configuration values from
    /// environment variables when set and default values when the environment
    /// variables are not set.
    ///
    /// The environment variables used to set the initial configuration values
    /// are:
    /// - `IPINFO_CSV`
    pub fn new() -> Self {
        let default = ClientBuilder::default();

        Self {
            csv_file: get_env_var("IPINFO_CSV", default.csv_file),
        }
    }

    /*-------------------------------------------------------------------------
      Setters
    -------------------------------------------------------------------------*/

    /// Set the path of the ipinfo.io `country_asn` CSV feed; defaults to
    /// `${HOME}/country_asn.csv.gz`. A `.gz` extension selects gzip
    /// decompression.
    pub fn csv_file<P: AsRef<Path>>(&mut self, csv_file: P) -> &mut Self {
        self.csv_file = csv_file.as_ref().to_path_buf();
        self
    }

    /*-------------------------------------------------------------------------
      Build Method
    -------------------------------------------------------------------------*/

    pub fn build(&self) -> Client {
        Client {
            csv_file: self.csv_file.clone(),
        }
    }
}

/*-------------------------------------------------------------------------------------------------
  Client
-------------------------------------------------------------------------------------------------*/

/// A client for loading range tables from the configured feed file.
///
/// ```no_run
/// use ipinfolookup::{RangeRecord, VerboseRecord};
///
/// let client = ipinfolookup::Client::new();
/// let table = client.get_table::<VerboseRecord>()?;
/// println!("{:?}", table.lookup("1.1.1.1").map(|record| record.as_name()));
/// # Ok::<(), ipinfolookup::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct Client {
    csv_file: PathBuf,
}

/*--------------------------------------------------------------------------------------
  Client Implementation
--------------------------------------------------------------------------------------*/

impl Default for Client {
    fn default() -> Self {
        ClientBuilder::default().build()
    }
}

impl Client {
    pub fn new() -> Self {
        ClientBuilder::new().build()
    }

    /*-------------------------------------------------------------------------
      Getters
    -------------------------------------------------------------------------*/

    /// Get the path of the range table feed.
    pub fn csv_file(&self) -> &Path {
        &self.csv_file
    }

    /*-------------------------------------------------------------------------
      Get Table
    -------------------------------------------------------------------------*/

    /// Read the feed and build a [RangeTable] of the requested record type.
    pub fn get_table<R: RangeRecord>(&self) -> Result<RangeTable<R>> {
        info!("Range table file path: {:?}", &self.csv_file);

        let start_time = time::Instant::now();
        let table = feed::load_table(&self.csv_file)
            .inspect_err(|error| {
                log::error!(
                    "Failed to load range table from `{:?}`: {}",
                    &self.csv_file,
                    error
                )
            })?;

        info!(
            "Loaded {} ranges in {} ms",
            table.len(),
            start_time.elapsed().as_millis()
        );

        Ok(table)
    }

    /// Read the feed into a [CompactRecord] table.
    pub fn get_compact_table(&self) -> Result<RangeTable<CompactRecord>> {
        self.get_table()
    }

    /// Read the feed into a [VerboseRecord] table.
    pub fn get_verbose_table(&self) -> Result<RangeTable<VerboseRecord>> {
        self.get_table()
    }
}

/*-------------------------------------------------------------------------------------------------
  Helper Functions
-------------------------------------------------------------------------------------------------*/

/// Get and parse an environment variable value or return a default value.
fn get_env_var<T: std::str::FromStr>(env_var: &str, default: T) -> T {
    env::var(env_var)
        .ok()
        .filter(|value| !value.is_empty())
        .and_then(|value| {
            value
                .parse::<T>()
                .inspect(|_| info!("Using {}: {}", env_var, value))
                .inspect_err(|_| warn!("Invalid {}: {}", env_var, value))
                .ok()
        })
        .unwrap_or(default)
}

/*-------------------------------------------------------------------------------------------------
  Unit Tests
-------------------------------------------------------------------------------------------------*/
