use std::io::{self, Write};
use std::sync::Arc;

use clap::Parser;

use env_response::http::{FixedVersion, HttpResponse, WriterTransport};
use env_response::observability::init_logging;
use env_response::config::ObservabilityConfig;

#[derive(Parser)]
#[command(name = "render-response")]
#[command(about = "Build a response from arguments and print its wire form", long_about = None)]
struct Cli {
    /// Status code.
    #[arg(short, long, default_value = "200")]
    status: String,

    /// Header line as `Name: value`; repeat for several lines.
    #[arg(short = 'H', long = "header")]
    headers: Vec<String>,

    /// Redirect target; uses the given status (302 unless set).
    #[arg(short, long)]
    redirect: Option<String>,

    /// Response body.
    #[arg(short, long, default_value = "")]
    body: String,

    /// Protocol version for the status line.
    #[arg(long = "http-version", default_value = "1.1")]
    http_version: String,

    /// Print the JSON snapshot instead of the wire form.
    #[arg(long)]
    snapshot: bool,

    /// Log level for diagnostics on stderr.
    #[arg(long, default_value = "warn")]
    log_level: String,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_logging(&ObservabilityConfig {
        log_level: cli.log_level.clone(),
    });

    let mut response = HttpResponse::with_detector(Arc::new(FixedVersion::new(cli.http_version)));

    for raw in &cli.headers {
        let (name, value) = raw
            .split_once(':')
            .ok_or_else(|| format!("header {:?} is not `Name: value`", raw))?;
        response.set_header(name.trim(), value.trim(), false);
    }

    match &cli.redirect {
        Some(url) if cli.status == "200" => {
            response.set_redirect(url, 302)?;
        }
        Some(url) => {
            response.set_redirect(url, cli.status.as_str())?;
        }
        None => {
            response.set_http_response_code(cli.status.as_str())?;
        }
    }
    response.set_body(cli.body);

    let stdout = io::stdout();
    if cli.snapshot {
        let mut out = stdout.lock();
        writeln!(out, "{}", response.snapshot().to_json()?)?;
        return Ok(());
    }

    let mut transport = WriterTransport::new(stdout.lock());
    response.send_response(&mut transport)?;
    transport.into_inner()?;
    Ok(())
}
