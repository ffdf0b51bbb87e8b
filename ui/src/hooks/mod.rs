//! Hooks for cached MDMS lookups.
//!
//! `use_query` reads and fills the `QueryClient` provided by
//! `QueryClientProvider`. The asset hooks return `None` unless the lookup
//! type matches their master; the returned value then carries:
//!
//! | data    | is_loading | error   | meaning                                 |
//! |---------|------------|---------|-----------------------------------------|
//! | None    | true       | None    | first fetch pending                     |
//! | None    | false      | Some(e) | first fetch failed                      |
//! | Some(d) | false      | None    | fetched                                 |
//! | Some(d) | false      | Some(e) | refetch failed, previous data kept      |

pub mod use_asset_classification;
pub mod use_asset_parent_sub_type;
pub mod use_asset_type;
pub mod use_conditional_lookup;
pub mod use_query;

pub use use_asset_classification::use_asset_classification;
pub use use_asset_parent_sub_type::use_asset_parent_sub_type;
pub use use_asset_type::use_asset_type;
pub use use_conditional_lookup::use_conditional_lookup;
pub use use_query::{QueryHookReturn, use_query};
