//! beacon-probe - reports whether the beacons module is usable on a platform.

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use capability_prober::{render_json, render_status, Config, ProbeHost};

#[derive(Parser)]
#[command(
    name = "beacon-probe",
    version,
    about = "Probe a platform for the optional beacons module"
)]
struct Args {
    /// Platform to probe (defaults to config host.platform, then the OS name)
    #[arg(long)]
    platform: Option<String>,

    /// Print the probe result as JSON instead of a status line.
    /// Failures print {"status":"error","kind":...,"message":...}
    #[arg(long)]
    json: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    // Logs go to stderr; stdout carries only the result
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = Config::load().map_err(|e| {
        format!(
            "Failed to load configuration: {}. \
             Check config.toml or the PROBER__SECTION__KEY environment variables.",
            e
        )
    })?;

    let host = ProbeHost::new(config).await?;
    let platform = host.resolve_platform(args.platform.as_deref());
    tracing::info!(
        platform = %platform,
        module_id = %host.prober.module_id(),
        "Probing platform"
    );

    let outcome = host.prober.probe(&platform).await;

    if args.json {
        let body = render_json(&outcome)?;
        println!("{}", serde_json::to_string_pretty(&body)?);
    } else {
        println!("{}", render_status(host.prober.module_id(), &platform, &outcome));
    }

    Ok(())
}
