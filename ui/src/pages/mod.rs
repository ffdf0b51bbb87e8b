pub mod asset_masters;
pub mod not_found;

pub use asset_masters::AssetMastersPage;
pub use not_found::NotFoundPage;
