//! email-posture - check a domain's SPF, DMARC and DKIM records.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use email_posture::config::Config;
use email_posture::report::{self, OutputFormat};
use email_posture::Inspector;

#[derive(Debug, Parser)]
#[command(name = "email-posture", version, about = "Inspect a domain's email-authentication posture")]
struct Args {
    /// Domain to query
    #[arg(short, long)]
    domain: String,

    /// Show summary view (same as --format summary)
    #[arg(short, long, conflicts_with = "format")]
    summary: bool,

    /// Output format; overrides the config file
    #[arg(short, long, value_enum)]
    format: Option<OutputFormat>,

    /// Path to a TOML configuration file
    #[arg(short, long, env = "EMAIL_POSTURE_CONFIG")]
    config: Option<PathBuf>,

    /// Disable colored output
    #[arg(long)]
    no_color: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

impl Args {
    fn output_format(&self, config: &Config) -> OutputFormat {
        if self.summary {
            OutputFormat::Summary
        } else {
            self.format.unwrap_or(config.output.format)
        }
    }
}

/// Heading printed before the lookups. JSON output stays a single document.
fn banner(format: OutputFormat, domain: &str) -> Option<String> {
    match format {
        OutputFormat::Text | OutputFormat::Summary => Some(format!("Inspecting Domain: {domain}")),
        OutputFormat::Json => None,
    }
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "email_posture=warn",
        1 => "email_posture=info",
        2 => "email_posture=debug",
        _ => "email_posture=trace,hickory_resolver=debug",
    };

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| default_level.into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose);

    let config = Config::load_or_default(args.config.as_deref()).context("loading configuration")?;
    let format = args.output_format(&config);

    if args.no_color || !config.output.color {
        colored::control::set_override(false);
    }

    let resolver = config.resolver.build_resolver().context("configuring DNS resolver")?;
    let inspector = Inspector::new(resolver);

    if let Some(banner) = banner(format, &args.domain) {
        println!("{banner}");
    }

    let report = inspector.inspect(&args.domain).await?;
    let rendered = report::render(&report, format).context("rendering report")?;
    print!("{rendered}");
    if !rendered.ends_with('\n') {
        println!();
    }

    Ok(())
}
