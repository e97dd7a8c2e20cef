pub mod cache;
pub mod client;
pub mod error;
pub(crate) mod retry;
pub mod types;

pub use cache::{BrandCache, TtlCache};
pub use client::FipeClient;
pub use error::FipeError;
pub use types::{BrandWithModels, FipeReference};
