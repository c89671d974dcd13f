use colored::Colorize;

use super::OutputFormatter;
use crate::checker::CheckReport;
use crate::colors::CatppuccinExt;
use crate::error::SiteCheckError;

pub struct HumanFormatter {
    use_colors: bool,
}

impl Default for HumanFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl HumanFormatter {
    pub fn new() -> Self {
        Self { use_colors: true }
    }

    pub fn without_colors(mut self) -> Self {
        self.use_colors = false;
        self
    }

    fn address(&self, text: &str) -> String {
        if self.use_colors {
            text.sky().to_string()
        } else {
            text.to_string()
        }
    }

    fn phone(&self, text: &str) -> String {
        if self.use_colors {
            text.ctp_green().bold().to_string()
        } else {
            text.to_string()
        }
    }

    fn error(&self, text: &str) -> String {
        if self.use_colors {
            text.ctp_red().to_string()
        } else {
            text.to_string()
        }
    }
}

impl OutputFormatter for HumanFormatter {
    fn format_report(&self, report: &CheckReport) -> String {
        format!(
            "IP address: {}, Valid phone number: {}",
            self.address(&report.ip_address.to_string()),
            self.phone(&report.phone_number)
        )
    }

    fn format_error(&self, error: &SiteCheckError) -> String {
        self.error(&error.to_string())
    }
}
