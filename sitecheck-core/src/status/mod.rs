//! Site availability checking module
//!
//! Provides the HTTP side of a site check:
//! - GET request with a bounded timeout and limited redirects
//! - Status code classification (anything outside 2xx is a failure)
//! - Page body and title for the later extraction steps

mod client;
mod types;

pub use client::{extract_title, AvailabilityClient};
pub use types::PageResponse;
