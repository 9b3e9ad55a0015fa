//! GitHub adapter
//!
//! Rate-limited implementation of the GitHub client port, plus the
//! transport and clock seams it is built on.

pub mod clock;
pub mod fetcher;
pub mod transport;

pub use clock::{Clock, SystemClock};
pub use fetcher::{GitHubFetcher, RetryPolicy};
pub use transport::{HttpResponse, HttpTransport, ReqwestTransport, TransportError};
