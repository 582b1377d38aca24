//! Platform seams
//!
//! Controllers reach the browser only through these traits, so the state
//! machines can be driven from native tests with in-memory fakes. The wasm
//! crate provides the `fetch` and `IntersectionObserver` implementations.

use crate::error::AnalyzeError;

/// Status and body text of a completed HTTP exchange
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// True for statuses in 200..=299
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Sends one file to the analysis endpoint
///
/// Implementations run on a single-threaded event loop, so the returned future
/// is not required to be `Send`.
#[allow(async_fn_in_trait)]
pub trait AnalysisClient {
    /// Platform file handle (a `web_sys::File` in the browser)
    type File;

    /// POST `file` as the only multipart field `field` to `endpoint`
    ///
    /// Only transport failures are errors here; any HTTP status is returned
    /// as a response.
    async fn post_file(
        &self,
        endpoint: &str,
        field: &str,
        file: &Self::File,
    ) -> Result<HttpResponse, AnalyzeError>;
}

/// Source of viewport-intersection notifications for a set of targets
pub trait ViewportObserver<T> {
    /// Start reporting intersection changes for `target`
    fn observe(&self, target: &T);

    /// Stop reporting intersection changes for `target`
    fn unobserve(&self, target: &T);
}
