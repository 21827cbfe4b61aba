//! Command-line interface for the scraper.

use std::path::PathBuf;
use std::time::{Duration, Instant};

use clap::builder::BoolishValueParser;
use clap::Parser;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};

use crate::config::{Layout, RunOptions};
use crate::error::Result;
use crate::http::{create_client, Throttle};
use crate::imdb::ImdbSource;
use crate::readme::git_available;
use crate::scrape::run_scrape;

/// IMDb Awards - Scrape award nominations and winners per event into YAML.
///
/// Every flag can also be set through its environment variable, which takes
/// any of `true`/`false`, `yes`/`no`, `on`/`off` or `1`/`0` in any case.
#[derive(Parser, Debug)]
#[command(name = "imdb-awards")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Run without random sleep timers between requests.
    #[arg(long, env = "NO_SLEEP", value_parser = BoolishValueParser::new())]
    pub no_sleep: bool,

    /// Run a completely clean run.
    #[arg(long, env = "CLEAN", value_parser = BoolishValueParser::new())]
    pub clean: bool,

    /// Run with extra trace logs.
    #[arg(long, env = "TRACE", value_parser = BoolishValueParser::new())]
    pub trace: bool,

    /// Run with every request logged.
    #[arg(long, env = "LOG_REQUESTS", value_parser = BoolishValueParser::new())]
    pub log_requests: bool,

    /// Directory holding event_ids.yml, events/ and README.md
    #[arg(long, env = "AWARDS_BASE_DIR", default_value = ".")]
    pub base_dir: PathBuf,
}

impl Cli {
    pub fn options(&self) -> RunOptions {
        RunOptions {
            no_sleep: self.no_sleep,
            clean: self.clean,
            trace: self.trace,
            log_requests: self.log_requests,
        }
    }
}

/// Default log filter for a set of run options.
///
/// Used when `RUST_LOG` is not set.
pub fn default_log_filter(options: &RunOptions) -> String {
    if options.trace {
        return "warn,imdb_awards=trace".to_string();
    }
    let mut filter = "warn".to_string();
    if options.log_requests {
        filter.push_str(",imdb_awards::http=debug");
    }
    filter
}

/// Check the environment before doing any work.
///
/// Returns a diagnostic message when the run cannot start.
pub fn preflight(layout: &Layout) -> Option<String> {
    if !layout.event_ids().is_file() {
        return Some(format!(
            "Event list not found: {}",
            layout.event_ids().display()
        ));
    }
    if !git_available() {
        return Some("git is not installed or not on PATH".to_string());
    }
    None
}

/// Run the CLI with parsed arguments.
pub fn run(cli: Cli) -> Result<()> {
    let started = Instant::now();
    let options = cli.options();
    let layout = Layout::new(&cli.base_dir);

    if let Some(message) = preflight(&layout) {
        println!("{} {message}", style("Requirements Error:").red().bold());
        return Ok(());
    }

    println!(
        "{} events from {}{}",
        style("Scraping").bold(),
        style(layout.base().display()).cyan(),
        if options.clean {
            style(" (clean run)").yellow().to_string()
        } else {
            String::new()
        }
    );
    println!();

    let pb = if options.trace || options.log_requests {
        // Log lines and a redrawn bar do not mix
        ProgressBar::hidden()
    } else {
        ProgressBar::new(0)
    };
    #[allow(clippy::expect_used)] // Static template string that is guaranteed to be valid
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{pos}/{len}] {msg}")
            .expect("valid template"),
    );
    pb.enable_steady_tick(Duration::from_millis(100));

    let client = create_client()?;
    let mut source = ImdbSource::new(client, Throttle::new(options.no_sleep));

    let report = match run_scrape(&mut source, &layout, &options, &pb) {
        Ok(report) => report,
        Err(e) => {
            pb.finish_and_clear();
            return Err(e);
        }
    };

    pb.finish_and_clear();

    println!("  Events: {}", style(report.events).green());
    println!("  Editions fetched: {}", report.fetched_years);
    println!("  Editions reused: {}", report.reused_years);
    println!(
        "  README: {}",
        if report.readme_updated {
            style("regenerated").green()
        } else {
            style("unchanged").dim()
        }
    );
    println!();
    println!(
        "{} {}",
        style("IMDb Awards Finished - Total Runtime:").green().bold(),
        format_runtime(started.elapsed())
    );

    Ok(())
}

/// Format a duration as `H:MM:SS`.
fn format_runtime(elapsed: Duration) -> String {
    let secs = elapsed.as_secs();
    format!("{}:{:02}:{:02}", secs / 3600, (secs / 60) % 60, secs % 60)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    // Parsing reads the process environment, which tests share
    static ENV_LOCK: Mutex<()> = Mutex::new(());

    const FLAG_VARS: [&str; 4] = ["NO_SLEEP", "CLEAN", "TRACE", "LOG_REQUESTS"];

    /// Parse arguments with the given flag variables set and all others unset.
    fn parse_with_env(vars: &[(&str, &str)], args: &[&str]) -> std::result::Result<Cli, clap::Error> {
        let _guard = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        for var in FLAG_VARS.iter().chain(["AWARDS_BASE_DIR"].iter()) {
            std::env::remove_var(var);
        }
        for (key, value) in vars {
            std::env::set_var(key, value);
        }
        let parsed = Cli::try_parse_from(args);
        for (key, _) in vars {
            std::env::remove_var(key);
        }
        parsed
    }

    #[test]
    fn test_cli_parse_defaults() {
        let cli = parse_with_env(&[], &["imdb-awards"]).unwrap();
        assert!(!cli.no_sleep);
        assert!(!cli.clean);
        assert!(!cli.trace);
        assert!(!cli.log_requests);
        assert_eq!(cli.base_dir, PathBuf::from("."));
    }

    #[test]
    fn test_cli_parse_flags() {
        let cli = parse_with_env(
            &[],
            &["imdb-awards", "--no-sleep", "--clean", "--base-dir", "/data"],
        )
        .unwrap();
        let options = cli.options();
        assert!(options.no_sleep);
        assert!(options.clean);
        assert!(!options.trace);
        assert_eq!(cli.base_dir, PathBuf::from("/data"));
    }

    #[test]
    fn test_cli_env_fallbacks_accept_boolish_values() {
        for value in ["true", "True", "TRUE", "1", "yes", "on"] {
            let cli = parse_with_env(&[("CLEAN", value)], &["imdb-awards"])
                .unwrap_or_else(|e| panic!("CLEAN={value}: {e}"));
            assert!(cli.clean, "CLEAN={value}");
        }
        for value in ["false", "False", "0", "no", "off"] {
            let cli = parse_with_env(&[("CLEAN", value)], &["imdb-awards"])
                .unwrap_or_else(|e| panic!("CLEAN={value}: {e}"));
            assert!(!cli.clean, "CLEAN={value}");
        }
    }

    #[test]
    fn test_cli_env_fallbacks_for_every_flag() {
        let vars: Vec<(&str, &str)> = FLAG_VARS.iter().map(|v| (*v, "True")).collect();
        let options = parse_with_env(&vars, &["imdb-awards"]).unwrap().options();
        assert!(options.no_sleep);
        assert!(options.clean);
        assert!(options.trace);
        assert!(options.log_requests);
    }

    #[test]
    fn test_cli_env_rejects_garbage() {
        assert!(parse_with_env(&[("NO_SLEEP", "maybe")], &["imdb-awards"]).is_err());
    }

    #[test]
    fn test_default_log_filter() {
        assert_eq!(default_log_filter(&RunOptions::default()), "warn");
        let requests = RunOptions {
            log_requests: true,
            ..Default::default()
        };
        assert_eq!(default_log_filter(&requests), "warn,imdb_awards::http=debug");
        let trace = RunOptions {
            trace: true,
            log_requests: true,
            ..Default::default()
        };
        assert_eq!(default_log_filter(&trace), "warn,imdb_awards=trace");
    }

    #[test]
    fn test_format_runtime() {
        assert_eq!(format_runtime(Duration::from_secs(5)), "0:00:05");
        assert_eq!(format_runtime(Duration::from_secs(3725)), "1:02:05");
    }

    #[test]
    fn test_preflight_missing_event_list() {
        let dir = tempfile::tempdir().unwrap();
        let message = preflight(&Layout::new(dir.path())).unwrap();
        assert!(message.contains("event_ids.yml"));
    }
}
