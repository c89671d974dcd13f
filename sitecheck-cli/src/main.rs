mod display;

use std::time::Duration;

use clap::Parser;
use sitecheck_core::output::{get_formatter, HumanFormatter, OutputFormat, OutputFormatter};
use sitecheck_core::{CheckReport, CheckerConfig, Result, SiteChecker};
use tracing_subscriber::EnvFilter;

use display::Spinner;

const DEFAULT_URL: &str = "http://sstmk.ru";

#[derive(Parser)]
#[command(name = "sitecheck")]
#[command(about = "Check a website is up, resolve its IP and find the phone number on it")]
#[command(version)]
struct Cli {
    /// Site URL to check
    #[arg(default_value = DEFAULT_URL)]
    url: String,

    /// Output format (human or json)
    #[arg(short, long, default_value = "human")]
    format: String,

    /// HTTP request timeout in seconds
    #[arg(long, default_value_t = 10)]
    timeout: u64,

    /// DNS lookup timeout in seconds
    #[arg(long, default_value_t = 5)]
    dns_timeout: u64,

    /// Nameserver to query instead of the system resolver (e.g., @8.8.8.8 or 127.0.0.1:5353)
    #[arg(short = 's', long)]
    nameserver: Option<String>,

    /// Country code used when the number on the page has none
    #[arg(long, default_value = sitecheck_core::phone::DEFAULT_COUNTRY_CODE)]
    default_code: String,

    /// Ignore HTTP(S)_PROXY settings from the environment
    #[arg(long)]
    no_proxy: bool,

    /// Disable colored output
    #[arg(long)]
    no_color: bool,
}

impl Cli {
    fn checker_config(&self) -> CheckerConfig {
        let mut config = CheckerConfig::new()
            .with_http_timeout(Duration::from_secs(self.timeout))
            .with_dns_timeout(Duration::from_secs(self.dns_timeout))
            .with_default_country_code(self.default_code.as_str());
        if let Some(ns) = &self.nameserver {
            config = config.with_nameserver(ns.trim_start_matches('@'));
        }
        if self.no_proxy {
            config = config.without_proxy();
        }
        config
    }

    fn formatter(&self) -> Box<dyn OutputFormatter> {
        let format: OutputFormat = self.format.parse().unwrap_or_default();
        match format {
            OutputFormat::Human if self.no_color => {
                Box::new(HumanFormatter::new().without_colors())
            }
            other => get_formatter(other),
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Logs go to stderr; stdout carries only the result
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let formatter = cli.formatter();
    let mut checker = SiteChecker::with_config(cli.url.as_str(), cli.checker_config());

    let spinner = Spinner::new(&format!("Checking {}...", checker.url()));
    let result = checker.run_checks().await;
    spinner.finish();

    // Every outcome is reported on stdout and the exit status stays 0
    println!("{}", render(result, formatter.as_ref()));

    Ok(())
}

/// The single stdout line for a finished check: the summary or the error message.
fn render(result: Result<CheckReport>, formatter: &dyn OutputFormatter) -> String {
    match result {
        Ok(report) => formatter.format_report(&report),
        Err(e) => {
            tracing::debug!(kind = %e.kind(), "Site check failed");
            formatter.format_error(&e)
        }
    }
}
