mod client;

use std::future::Future;

pub use client::{ReqwestHttpClient, StatusError};

pub type Error = Box<dyn std::error::Error + Send + Sync>;

/// Minimal byte-oriented HTTP seam. API crates are generic over it so they
/// can be driven by `ReqwestHttpClient` in production and by anything else
/// in tests.
pub trait HttpClient: Send + Sync {
    fn get(&self, path: &str) -> impl Future<Output = Result<Vec<u8>, Error>> + Send;

    fn patch(
        &self,
        path: &str,
        body: Vec<u8>,
    ) -> impl Future<Output = Result<Vec<u8>, Error>> + Send;
}
