pub mod query_client;

pub use query_client::{QueryClientProvider, use_query_client};
