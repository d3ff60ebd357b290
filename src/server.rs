//! Reusable server runtime.
//!
//! [`ServerHandle`] owns the full lifecycle of the reference service:
//! database init, migrations, optional demo data, the REST API with its
//! grid endpoints, metrics, and graceful shutdown.

use std::sync::OnceLock;
use std::time::Duration;

use metrics_exporter_prometheus::{BuildError, PrometheusBuilder, PrometheusHandle};
use sea_orm::DatabaseConnection;
use sea_orm_migration::MigratorTrait;
use tokio::task::JoinHandle;
use tracing::{error, info, warn};

use crate::application::grid::DataGrid;
use crate::config::AppConfig;
use crate::infrastructure::database::migrator::Migrator;
use crate::infrastructure::database::seed::seed_demo_users;
use crate::infrastructure::{init_database, DatabaseConfig};
use crate::interfaces::http::create_api_router;
use crate::shared::shutdown::{listen_for_shutdown_signals, ShutdownSignal};

/// Options for starting the service.
pub struct ServerOptions {
    /// Application configuration.
    pub config: AppConfig,
    /// Run database migrations on startup (default: true).
    pub auto_migrate: bool,
    /// Insert the demo users when the table is empty (default: false).
    pub seed_demo_data: bool,
}

impl Default for ServerOptions {
    fn default() -> Self {
        Self {
            config: AppConfig::default(),
            auto_migrate: true,
            seed_demo_data: false,
        }
    }
}

/// The global metrics recorder can only be installed once per process, so a
/// restart within the same process reuses the first handle.
fn prometheus_handle() -> Result<PrometheusHandle, BuildError> {
    static PROM_HANDLE: OnceLock<PrometheusHandle> = OnceLock::new();

    if let Some(handle) = PROM_HANDLE.get() {
        return Ok(handle.clone());
    }
    let handle = PrometheusBuilder::new().install_recorder()?;
    info!("Prometheus metrics recorder installed");
    Ok(PROM_HANDLE.get_or_init(|| handle).clone())
}

/// Handle to a running service.
///
/// ```rust,no_run
/// use datagrid::server::{ServerHandle, ServerOptions};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let handle = ServerHandle::start(ServerOptions::default()).await?;
///     handle.install_signal_handler();
///     handle.shutdown_signal().wait().await;
///     handle.wait().await;
///     Ok(())
/// }
/// ```
pub struct ServerHandle {
    /// The configuration the server was started with.
    pub config: AppConfig,
    /// Port the API is listening on.
    pub port: u16,

    db: DatabaseConnection,
    shutdown: ShutdownSignal,
    api_task: JoinHandle<()>,
}

impl ServerHandle {
    /// Start the service.
    ///
    /// Grid configuration errors surface here, before anything listens.
    pub async fn start(opts: ServerOptions) -> Result<Self, Box<dyn std::error::Error>> {
        let config = opts.config;
        info!("Starting data grid service...");

        config.grid.check()?;
        let prometheus = prometheus_handle()?;

        let db_config = DatabaseConfig {
            url: config.database.connection_url(),
        };
        let db = init_database(&db_config).await?;

        if opts.auto_migrate {
            info!("Running database migrations...");
            Migrator::up(&db, None).await?;
            info!("Migrations completed");
        }

        if opts.seed_demo_data {
            seed_demo_users(&db).await?;
        }

        let data_grid = DataGrid::from_config(&config);
        let router = create_api_router(db.clone(), &data_grid, prometheus)?;

        let addr = config.server.address();
        let listener = tokio::net::TcpListener::bind(&addr).await?;
        let port = listener.local_addr()?.port();
        info!("REST API listening on http://{}", addr);
        info!("Swagger UI available at http://{}/docs/", addr);

        let shutdown = ShutdownSignal::new();
        let api_shutdown = shutdown.clone();
        let api_server = axum::serve(listener, router).with_graceful_shutdown(async move {
            api_shutdown.wait().await;
            info!("REST API received shutdown signal");
        });

        let api_task = tokio::spawn(async move {
            if let Err(e) = api_server.await {
                error!("REST API server error: {}", e);
            }
        });

        Ok(Self {
            config,
            port,
            db,
            shutdown,
            api_task,
        })
    }

    /// Get a cloneable shutdown signal.
    pub fn shutdown_signal(&self) -> ShutdownSignal {
        self.shutdown.clone()
    }

    /// Trigger shutdown on SIGTERM / SIGINT.
    pub fn install_signal_handler(&self) {
        tokio::spawn(listen_for_shutdown_signals(self.shutdown.clone()));
    }

    /// Trigger graceful shutdown without waiting for it.
    pub fn trigger_shutdown(&self) {
        self.shutdown.trigger();
    }

    /// Wait for the server to stop after shutdown has been triggered, then
    /// close the database. In-flight requests get `server.shutdown_timeout`
    /// seconds to finish.
    pub async fn wait(self) {
        let grace = Duration::from_secs(self.config.server.shutdown_timeout);
        match tokio::time::timeout(grace, self.api_task).await {
            Ok(Ok(())) => info!("REST API server stopped"),
            Ok(Err(e)) => error!("REST API task panicked: {}", e),
            Err(_) => warn!("REST API did not stop within {}s", grace.as_secs()),
        }

        if let Err(e) = self.db.close().await {
            warn!("Error closing database connection: {}", e);
        } else {
            info!("Database connection closed");
        }
        info!("Shutdown complete");
    }

    /// Trigger shutdown and wait for completion.
    pub async fn shutdown(self) {
        self.trigger_shutdown();
        self.wait().await;
    }

    pub fn is_running(&self) -> bool {
        !self.api_task.is_finished()
    }
}

/// Initialize tracing from the application config.
///
/// Call once at process startup, before [`ServerHandle::start`].
/// `RUST_LOG` wins over `logging.level`.
pub fn init_tracing(config: &AppConfig) {
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.logging.level));

    match config.logging.format.to_lowercase().as_str() {
        "json" => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().json())
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer())
                .init();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn options() -> ServerOptions {
        let mut config = AppConfig::default();
        config.server.host = "127.0.0.1".to_string();
        config.server.port = 0;
        config.database.url = "sqlite::memory:".to_string();
        ServerOptions {
            config,
            auto_migrate: true,
            seed_demo_data: true,
        }
    }

    #[tokio::test]
    async fn starts_serves_and_stops() {
        let handle = ServerHandle::start(options()).await.unwrap();
        assert!(handle.is_running());
        assert_ne!(handle.port, 0);

        let mut stream = tokio::net::TcpStream::connect(("127.0.0.1", handle.port))
            .await
            .unwrap();
        use tokio::io::{AsyncReadExt, AsyncWriteExt};
        stream
            .write_all(b"GET /api/v1/users?perPage=5 HTTP/1.1\r\nHost: localhost\r\nConnection: close\r\n\r\n")
            .await
            .unwrap();
        let mut response = String::new();
        stream.read_to_string(&mut response).await.unwrap();
        assert!(response.starts_with("HTTP/1.1 200"), "{response}");
        assert!(response.contains("\"total\":12"), "{response}");

        handle.shutdown().await;
    }

    #[tokio::test]
    async fn invalid_grid_defaults_refuse_to_start() {
        let mut opts = options();
        opts.config.grid.per_page_limit.min = 50;
        opts.config.grid.per_page_limit.max = 10;
        assert!(ServerHandle::start(opts).await.is_err());
    }
}
