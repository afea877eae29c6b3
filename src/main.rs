use clap::Parser;
use std::process::ExitCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use cccdl::{Cli, Config, HttpFetcher, LinkResolver};

/// Exit code for bad input (flags, format, language, config)
const EXIT_INVALID: u8 = 1;
/// Exit code when the page holds no matching link
const EXIT_NOT_FOUND: u8 = 3;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            // --help and --version are not errors
            let code = if err.use_stderr() { EXIT_INVALID } else { 0 };
            let _ = err.print();
            return ExitCode::from(code);
        }
    };

    // Logs go to stderr, stdout only carries the link
    let default_filter = if cli.verbose { "cccdl=debug" } else { "cccdl=warn" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    run(cli).await
}

async fn run(cli: Cli) -> ExitCode {
    let config = match Config::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("Error: {:#}", err);
            return ExitCode::from(EXIT_INVALID);
        }
    };

    let format = cli.format.unwrap_or(config.defaults.format);
    let lang = cli.lang.unwrap_or(config.defaults.language);

    let mut http = config.http;
    if cli.timeout.is_some() {
        http.timeout_secs = cli.timeout;
    }

    let fetcher = match HttpFetcher::from_config(&http) {
        Ok(fetcher) => fetcher,
        Err(err) => {
            eprintln!("Error: {}", err);
            return ExitCode::from(err.exit_code());
        }
    };

    let resolver = LinkResolver::with_fetcher(fetcher);
    match resolver.resolve(&cli.url, &format, &lang).await {
        Ok(Some(link)) => {
            println!("{}", link);
            ExitCode::SUCCESS
        }
        Ok(None) => ExitCode::from(EXIT_NOT_FOUND),
        Err(err) => {
            eprintln!("Error: {}", err);
            ExitCode::from(err.exit_code())
        }
    }
}
