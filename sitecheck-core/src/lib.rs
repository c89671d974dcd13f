pub mod checker;
pub mod colors;
pub mod config;
pub mod dns;
pub mod error;
pub mod output;
pub mod phone;
pub mod status;
pub mod validation;

#[cfg(test)]
mod test_support;

pub use error::{ErrorKind, Result, SiteCheckError};
pub use validation::{hostname_from_url, request_url};

pub use checker::{CheckReport, SiteChecker};
pub use config::CheckerConfig;
pub use dns::HostResolver;
pub use phone::{find_phone_number, validate_phone_number, PhoneNumber};
pub use status::{AvailabilityClient, PageResponse};

pub use output::{OutputFormat, OutputFormatter};
