//! # nicapi-dns01
//!
//! ACME DNS-01 challenge provider for the [Lumaserv](https://www.lumaserv.com/) /
//! [NicAPI](https://docs.nicapi.eu/) DNS API.
//!
//! The provider publishes and removes the `_acme-challenge` TXT record an ACME
//! CA checks during domain validation. It resolves the authoritative zone of the
//! challenge name over DNS, reads a fresh record snapshot from the API, and
//! reconciles the TXT record against it:
//!
//! - [`present`](ChallengeProvider::present) is a no-op when the record already
//!   holds the value, replaces it (delete + add) when it holds another one, and
//!   adds it otherwise.
//! - [`clean_up`](ChallengeProvider::clean_up) is a no-op when no record exists,
//!   and deletes it otherwise (by default only if it still holds the value, see
//!   [`CleanupMatch`]).
//!
//! ## Feature Flags
//!
//! - **`native-tls`** *(default)*: use the platform's native TLS implementation.
//! - **`rustls`**: use rustls. Recommended for cross-compilation and static builds.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use nicapi_dns01::{ChallengeProvider, NicapiConfig, NicapiProvider};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let provider = NicapiProvider::with_config(NicapiConfig::new("your-token"))?;
//!
//!     let fqdn = "_acme-challenge.example.com.";
//!     provider.present("example.com", fqdn, "challenge-digest").await?;
//!     // ... let the CA validate ...
//!     provider.clean_up("example.com", fqdn, "challenge-digest").await?;
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! All operations return [`Result<T, ProviderError>`](ProviderError). Nothing is
//! retried internally; [`ProviderError::is_transient`] flags the failures where
//! retrying the whole operation is worthwhile.

mod error;
mod http_client;
mod nicapi;
mod traits;
mod types;
mod utils;
mod zone;

// Re-export error types
pub use error::{ApiMessage, ProviderError, Result};

// Re-export traits
pub use traits::{ChallengeProvider, ZoneLocator};

// Re-export types
pub use types::{CleanupMatch, NicapiConfig};

// Re-export the provider and its constants
pub use nicapi::{
    API_KEY_ENV, DEFAULT_RECORD_TTL, DEFAULT_RECURSIVE_NAMESERVERS, NICAPI_API_BASE,
    NicapiProvider,
};

pub use zone::HickoryZoneLocator;

// Re-export utils module
pub use utils::domain;
