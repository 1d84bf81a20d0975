//! CLI for the cookie support guard.
//!
//! Evaluates a single request: config -> request view -> decision -> report.

use clap::{Parser, Subcommand};
use cookieguard_core::{Decision, GuardConfig, GuardError};
use cookieguard_guard::CookieSupportGuard;
use cookieguard_http::{render, Outcome};
use http::header::COOKIE;
use http::Request;
use std::path::{Path, PathBuf};

/// Exit status when the request would fail with `NO_COOKIES`.
const EXIT_NO_COOKIES: i32 = 2;

#[derive(Parser, Debug)]
#[command(name = "cookieguard", version, about = "Cookie support guard")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Decide what the guard does with one request.
    Check {
        /// Request path and query, e.g. `/journey?step=2`.
        #[arg(short, long)]
        url: String,

        /// Raw `Cookie` header value. Repeatable.
        #[arg(short, long = "cookie")]
        cookies: Vec<String>,

        #[arg(long, env = "COOKIEGUARD_COOKIE_NAME")]
        cookie_name: Option<String>,

        #[arg(long, env = "COOKIEGUARD_PARAM_NAME")]
        param_name: Option<String>,

        /// JSON file with `cookie-name` and `param-name`.
        /// Flags and env vars override its values.
        #[arg(long)]
        config: Option<PathBuf>,

        #[arg(long, default_value_t = false)]
        json: bool,
    },
}

#[derive(Debug, Default)]
struct PartialConfig {
    cookie_name: Option<String>,
    param_name: Option<String>,
}

impl PartialConfig {
    fn from_file(path: &Path) -> Result<Self, Box<dyn std::error::Error>> {
        let file = std::fs::File::open(path)?;
        let cfg: GuardConfig = serde_json::from_reader(file)?;
        Ok(Self {
            cookie_name: Some(cfg.cookie_name),
            param_name: Some(cfg.param_name),
        })
    }

    fn overlay(self, cookie_name: Option<String>, param_name: Option<String>) -> Self {
        Self {
            cookie_name: cookie_name.or(self.cookie_name),
            param_name: param_name.or(self.param_name),
        }
    }

    fn finish(self) -> Result<GuardConfig, GuardError> {
        let cookie_name = self
            .cookie_name
            .ok_or_else(|| GuardError::InvalidConfig("cookie-name is required".into()))?;
        let param_name = self
            .param_name
            .ok_or_else(|| GuardError::InvalidConfig("param-name is required".into()))?;
        Ok(GuardConfig::new(cookie_name, param_name))
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Check {
            url,
            cookies,
            cookie_name,
            param_name,
            config,
            json,
        } => {
            // 1. Resolve configuration.
            let base = match config {
                Some(ref path) => PartialConfig::from_file(path)?,
                None => PartialConfig::default(),
            };
            let config = base.overlay(cookie_name, param_name).finish()?;
            let guard = CookieSupportGuard::new(config)?;

            // 2. Build the request.
            let mut builder = Request::builder().uri(url.as_str());
            for cookie in &cookies {
                builder = builder.header(COOKIE, cookie.as_str());
            }
            let (parts, ()) = builder.body(())?.into_parts();
            let view = cookieguard_http::view_from_parts(&parts)?;

            // 3. Decide.
            let decision = guard.decide(&view);
            tracing::info!(url = %url, ?decision, "decision");

            // 4. Report.
            let failed = matches!(decision, Decision::Fail { .. });
            if json {
                println!("{}", serde_json::to_string_pretty(&decision)?);
            } else {
                match render(&guard, decision) {
                    Ok(Outcome::Continue) => println!("proceed"),
                    Ok(Outcome::Respond(response)) => {
                        println!("{:?} {}", response.version(), response.status());
                        for (name, value) in response.headers() {
                            println!("{}: {}", name, value.to_str().unwrap_or("<binary>"));
                        }
                    }
                    Err(GuardError::NoCookies) => println!("fail: {}", GuardError::NoCookies),
                    Err(e) => return Err(e.into()),
                }
            }

            if failed {
                std::process::exit(EXIT_NO_COOKIES);
            }
        }
    }

    Ok(())
}
