use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use heartglow_core::{run_overlay, OverlayConfig, RunSummary};

const CONFIG_ENV: &str = "HEARTGLOW_CONFIG";

fn main() {
    // Init logging
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = FmtSubscriber::builder().with_env_filter(filter).finish();
    let _ = tracing::subscriber::set_global_default(subscriber);

    info!("Heartglow starting");
    match run() {
        Ok(summary) => info!("Heartglow stopped after {} frames", summary.frames),
        Err(e) => {
            error!("Heartglow failed: {e}");
            eprintln!("Heartglow error: {e}");
            std::process::exit(1);
        }
    }
}

fn run() -> Result<RunSummary, Box<dyn std::error::Error + Send + Sync>> {
    let config = match std::env::var_os(CONFIG_ENV) {
        Some(path) => {
            info!("loading config from {}", path.to_string_lossy());
            OverlayConfig::load(path)?
        }
        None => OverlayConfig::default(),
    };
    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    cfg_if::cfg_if! {
        if #[cfg(windows)] {
            let mut platform = heartglow_win::WinOverlayPlatform::new()?;
            Ok(run_overlay(&mut platform, config, &mut rng)?)
        } else {
            let _ = (config, &mut rng);
            Err("no overlay backend for this platform; Heartglow requires Windows".into())
        }
    }
}
