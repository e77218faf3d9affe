pub mod config;
pub mod logging;

pub mod acquire;
pub mod error;
pub mod fetcher;
pub mod http;
pub mod landing;
pub mod resolver;
pub mod storage;

#[cfg(test)]
pub(crate) mod test_support;
