use serde::Serialize;

use super::OutputFormatter;
use crate::checker::CheckReport;
use crate::error::{ErrorKind, SiteCheckError};

#[derive(Serialize)]
struct ErrorBody {
    error: String,
    kind: ErrorKind,
}

pub struct JsonFormatter {
    pretty: bool,
}

impl Default for JsonFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl JsonFormatter {
    pub fn new() -> Self {
        Self { pretty: true }
    }

    pub fn compact(mut self) -> Self {
        self.pretty = false;
        self
    }

    fn to_json<T: serde::Serialize + ?Sized>(&self, value: &T) -> String {
        if self.pretty {
            serde_json::to_string_pretty(value)
                .unwrap_or_else(|e| format!("{{\"error\": \"{}\"}}", e))
        } else {
            serde_json::to_string(value).unwrap_or_else(|e| format!("{{\"error\": \"{}\"}}", e))
        }
    }
}

impl OutputFormatter for JsonFormatter {
    fn format_report(&self, report: &CheckReport) -> String {
        self.to_json(report)
    }

    fn format_error(&self, error: &SiteCheckError) -> String {
        self.to_json(&ErrorBody {
            error: error.to_string(),
            kind: error.kind(),
        })
    }
}
