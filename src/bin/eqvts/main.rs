//! Equalizer conformance runner

use std::{convert::TryFrom, fmt, path::PathBuf};

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand};
use eqvts::{
    config::SuiteConfig, mock::MockFactory, scenario, suite::Case, Capability, Suite,
};
use serde::Serialize;
use termcolor::{ColorChoice, StandardStream};

#[derive(Clone, Parser, Debug)]
#[command(version, author)]
struct Opts {
    /// Verbosity level. -v logs every call made to the effect, -vv adds debug output
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,

    /// Output format (text (default), json, jsonline)
    #[arg(long = "output", short = 'o', default_value = "text")]
    output_format: OutputFormat,

    /// Configuration file
    #[arg(short, long, env = "EQVTS_CONFIG")]
    config: Option<PathBuf>,

    /// Band level in millibels, overrides the configured levels. Can be repeated.
    #[arg(long = "band-level", allow_negative_numbers = true)]
    band_levels: Vec<i32>,

    #[command(subcommand)]
    subcmd: Option<SubCommand>,
}

#[derive(Clone, Subcommand, Debug)]
enum SubCommand {
    /// Runs every scenario against every equalizer instance (default)
    Run,

    /// Prints the capability derived from each instance's descriptor
    Capability,

    /// Lists the scenarios generated for each case
    Scenarios,
}

#[derive(Debug, strum::EnumString, strum::Display, Clone, Copy, Eq, PartialEq)]
#[strum(serialize_all = "lowercase")]
pub enum OutputFormat {
    Text,
    Json,
    JsonLine,
}

impl OutputFormat {
    pub fn format<T>(self, obj: &T) -> String
    where
        T: serde::Serialize + fmt::Display,
    {
        match self {
            OutputFormat::Text => format!("{}", obj),
            OutputFormat::Json => {
                serde_json::to_string_pretty(obj).expect("couldn't serialize object as json")
            }
            OutputFormat::JsonLine => {
                serde_json::to_string(obj).expect("couldn't serialize object as json")
            }
        }
    }
}

#[derive(Serialize)]
struct CaseCapability {
    name: String,
    capability: Capability,
}

impl fmt::Display for CaseCapability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.name, self.capability)
    }
}

#[derive(Serialize)]
struct CaseScenarios {
    name: String,
    scenarios: Vec<scenario::Scenario>,
}

impl fmt::Display for CaseScenarios {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.name)?;
        for scenario in &self.scenarios {
            let steps: Vec<String> = scenario.steps.iter().map(ToString::to_string).collect();
            writeln!(f, "    {}: {}", scenario.kind, steps.join(", then "))?;
        }
        Ok(())
    }
}

fn capability(case: &Case) -> Result<Capability> {
    Capability::try_from(&case.descriptor)
        .with_context(|| format!("{}: invalid descriptor", case.name))
}

#[tokio::main]
async fn main() -> Result<()> {
    let opts: Opts = Opts::parse();

    let default_filter = match opts.verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    let mut config = match &opts.config {
        Some(path) => SuiteConfig::load(path)
            .with_context(|| format!("couldn't load {}", path.display()))?,
        None => SuiteConfig::default(),
    };
    if !opts.band_levels.is_empty() {
        config.band_levels = opts.band_levels.clone();
    }

    let factory = MockFactory::from_config(&config.mock);
    let mut suite = Suite::new(&factory, &config);
    if opts.verbose > 0 {
        suite = suite.with_call_logging(log::Level::Info);
    }

    match opts.subcmd.clone().unwrap_or(SubCommand::Run) {
        SubCommand::Run => {
            let report = suite.run().await?;
            if opts.output_format == OutputFormat::Text {
                let mut stdout = StandardStream::stdout(ColorChoice::Auto);
                report.write_to(&mut stdout)?;
            } else {
                println!("{}", opts.output_format.format(&report));
            }

            if !report.passed() {
                std::process::exit(1);
            }
        }
        SubCommand::Capability => {
            for case in suite.cases().await? {
                let item = CaseCapability {
                    capability: capability(&case)?,
                    name: case.name,
                };
                println!("{}", opts.output_format.format(&item));
            }
        }
        SubCommand::Scenarios => {
            for case in suite.cases().await? {
                let item = CaseScenarios {
                    scenarios: scenario::generate(&capability(&case)?, case.band_level),
                    name: case.name,
                };
                println!("{}", opts.output_format.format(&item));
            }
        }
    }

    Ok(())
}
