//! WebOffice gateway serving an in-memory drive.
//!
//! Every capability is backed by one seeded [`MockDrive`], which makes the
//! binary handy for pointing a WebOffice test tenant at a local machine.
//!
//! ```text
//! WEBOFFICE_PORT=8080 WEBOFFICE_PREFIX=/weboffice cargo run -p memory-drive
//! ```

mod config;

use config::ServerConfig;
use std::sync::Arc;
use tokio::signal;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use weboffice_core::{FileInfo, UserInfo, Watermark};
use weboffice_testing::MockDrive;
use weboffice_web::{Gateway, GatewayConfig, Providers};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "memory_drive=info,weboffice_web=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let server = ServerConfig::from_env();
    let config = GatewayConfig::from_env();
    info!(
        address = %server.address(),
        prefix = %config.prefix,
        referer = %config.referer,
        "Configuration loaded"
    );

    let drive = Arc::new(seeded_drive());
    let providers = Providers::new()
        .with_preview(Arc::clone(&drive))
        .with_user(Arc::clone(&drive))
        .with_watermark(Arc::clone(&drive))
        .with_edit(Arc::clone(&drive))
        .with_version(Arc::clone(&drive))
        .with_notify(drive);

    let gateway = Gateway::new(config, providers)?;
    for route in gateway.routes() {
        info!(%route, "route");
    }

    let listener = tokio::net::TcpListener::bind(server.address()).await?;
    gateway.serve(listener, shutdown_signal()).await?;

    info!("Server shutdown complete");
    Ok(())
}

fn seeded_drive() -> MockDrive {
    let mut welcome = FileInfo::new("welcome", "welcome.docx", 1);
    welcome.size = 12_288;
    welcome.creator_id = "u1".to_string();
    welcome.modifier_id = "u1".to_string();

    MockDrive::new()
        .with_file(welcome)
        .with_file(FileInfo::new("budget", "budget.xlsx", 1))
        .with_user(UserInfo {
            id: "u1".to_string(),
            name: "Demo User".to_string(),
            avatar_url: String::new(),
        })
        .with_watermark(
            "budget",
            Watermark {
                watermark_type: 1,
                value: "INTERNAL".to_string(),
                fill_style: "rgba(192, 192, 192, 0.6)".to_string(),
                font: "bold 20px Serif".to_string(),
                rotate: -0.785_398,
                horizontal: 50,
                vertical: 100,
            },
        )
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = signal::ctrl_c().await {
            error!(error = %err, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(err) => {
                error!(error = %err, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            info!("Received Ctrl+C signal, shutting down gracefully...");
        },
        () = terminate => {
            info!("Received SIGTERM signal, shutting down gracefully...");
        },
    }
}
