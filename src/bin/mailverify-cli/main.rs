mod args;
mod output;

use std::path::Path;

use anyhow::{Context, Result};
use clap::Parser;
use clap::error::ErrorKind;
use mailverify_lib::{
    AcceptMode, Callout, Invocation, LdapConnector, Response, Verdict, VerifierConfig,
    parse_address,
};
use tracing_subscriber::EnvFilter;

use args::Cli;

fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) if matches!(err.kind(), ErrorKind::DisplayHelp) => {
            let _ = err.print();
            std::process::exit(0);
        }
        Err(err) => finish(&output::usage_error(output::clap_reason(&err))),
    };

    init_tracing(cli.log_level.as_deref());
    let response = run(&cli);
    finish(&response)
}

fn run(cli: &Cli) -> Response {
    let Some(invocation) = cli.invocation() else {
        return output::usage_error("usage: mailverify-cli [--version | <address>]");
    };

    match &invocation {
        Invocation::Version => {
            return Response::from_verdict(&Verdict::VersionQuery, AcceptMode::Local);
        }
        Invocation::Verify { address, context } => {
            tracing::info!(%address, ?context, "verification requested");
            // syntaxe d'abord: pas besoin de config pour rejeter
            if parse_address(address).is_err() {
                return Response::from_verdict(
                    &Verdict::RejectedMalformed {
                        address: address.clone(),
                    },
                    AcceptMode::Local,
                );
            }
        }
    }

    let callout = match load_callout(&cli.config) {
        Ok(callout) => callout,
        Err(err) => {
            tracing::error!("{err:#}");
            return output::usage_error(format!("{err:#}"));
        }
    };

    let verdict = callout.run(&invocation, &LdapConnector);
    tracing::info!(?verdict, "verification done");
    Response::from_verdict(&verdict, callout.accept_mode())
}

fn load_callout(path: &Path) -> Result<Callout> {
    let config = VerifierConfig::load(path)
        .with_context(|| format!("config {}", path.display()))?;
    Callout::from_config(&config).with_context(|| format!("config {}", path.display()))
}

/// Logs go to stderr only; stdout belongs to the relay protocol.
fn init_tracing(level: Option<&str>) {
    let filter = match level {
        Some(level) => EnvFilter::try_new(level).ok(),
        None => EnvFilter::try_from_default_env().ok(),
    }
    .unwrap_or_else(|| EnvFilter::new("warn"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn finish(response: &Response) -> ! {
    if let Err(err) = output::emit(response) {
        eprintln!("{err:#}");
        std::process::exit(mailverify_lib::callout::EXIT_TEMPORARY);
    }
    std::process::exit(response.exit_code)
}
