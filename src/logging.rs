// Logging via tracing, written to stderr. `RUST_LOG` overrides the default level.

use tracing_subscriber::{EnvFilter, fmt, prelude::*};

pub fn init() -> anyhow::Result<()> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::new("moodwave=info"),
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .try_init()?;
    Ok(())
}
