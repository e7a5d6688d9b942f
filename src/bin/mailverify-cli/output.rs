use std::io::Write;

use anyhow::{Context, Result};
use mailverify_lib::{AcceptMode, Response, Verdict};

/// Réponse « error » (code 3) pour une invocation inutilisable.
pub fn usage_error(reason: impl Into<String>) -> Response {
    Response::from_verdict(
        &Verdict::UsageError {
            reason: reason.into(),
        },
        AcceptMode::Local,
    )
}

/// Write the response lines to stdout, the relay's only input channel.
pub fn emit(response: &Response) -> Result<()> {
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    out.write_all(response.render().as_bytes())
        .context("write response to stdout")?;
    out.flush().context("flush stdout")?;
    Ok(())
}

/// First line of a clap error, without its `error: ` prefix.
pub fn clap_reason(err: &clap::Error) -> String {
    let text = err.to_string();
    let first = text.lines().next().unwrap_or_default();
    first.strip_prefix("error: ").unwrap_or(first).to_string()
}
