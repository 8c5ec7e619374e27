use anyhow::Context;
use bookclub_kernel::settings::Settings;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let settings = Settings::load().with_context(|| "failed to load bookclub settings")?;
    bookclub_telemetry::init(&settings.telemetry)?;

    tracing::info!(
        env = ?settings.environment,
        port = settings.server.port,
        "bookclub-app bootstrap starting"
    );

    bookclub_app::run(settings, bookclub_http::shutdown_signal()).await?;

    tracing::info!("bookclub-app shut down cleanly");
    Ok(())
}
