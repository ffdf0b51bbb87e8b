//! A small single-threaded query cache and the conditional MDMS asset
//! lookups built on it.

mod client;
mod key;
pub mod lookup;
mod options;
mod result;
pub mod time;

pub use client::{QueryClient, QuerySubscription};
pub use key::QueryKey;
pub use lookup::{
    AssetLookup, KeyScope, LookupConfig, LookupRequest, LookupResult, MdmsSource,
};
pub use options::QueryOptions;
pub use result::{QueryResult, QueryStatus};
pub use time::TimeSource;
