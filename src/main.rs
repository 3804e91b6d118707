use anyhow::Result;
use dotenvy::dotenv;
use tokio::signal;
use tracing::{error, info, warn};

use delivery_routes::config::environment::EnvironmentConfig;
use delivery_routes::database::connection::DatabaseConnection;
use delivery_routes::database::seed::seed_demo_routes;
use delivery_routes::{create_router, AppState};

#[tokio::main]
async fn main() -> Result<()> {
    // Cargar variables de entorno
    dotenv().ok();

    let config = EnvironmentConfig::from_env()?;

    // Configurar logging
    tracing_subscriber::fmt()
        .with_max_level(config.tracing_level())
        .init();

    info!("🚚 Delivery Routes - API de gestión de rutas");
    info!("============================================");

    // Inicializar base de datos
    let db_connection = match DatabaseConnection::new_default().await {
        Ok(conn) => conn,
        Err(e) => {
            error!("❌ Error conectando a la base de datos: {:#}", e);
            return Err(e);
        }
    };

    if config.seed_database {
        match seed_demo_routes(db_connection.pool()).await {
            Ok(0) => info!("🌱 Datos de ejemplo ya presentes, nada que sembrar"),
            Ok(count) => info!("🌱 {} rutas de ejemplo sembradas", count),
            Err(e) => warn!("⚠️ No se pudieron sembrar datos de ejemplo: {}", e),
        }
    }

    if config.cors_origins.is_empty() && !config.is_development() {
        warn!("⚠️ CORS_ORIGINS vacío fuera de desarrollo: se aceptan todos los orígenes");
    }

    let app_state = AppState::new(db_connection.pool().clone(), config.clone());
    let app = create_router(app_state);

    let addr = config.server_url();
    info!("🌐 Servidor iniciando en http://{} ({})", addr, config.environment);
    info!("🔍 Endpoints disponibles:");
    info!("   GET  /health - Health check");
    info!("🗺️ Rutas:");
    info!("   GET  /api/routes?region= - Listar rutas de una región");
    info!("   GET  /api/routes/:id - Obtener ruta");
    info!("   POST /api/routes - Crear ruta con paradas");
    info!("   PUT  /api/routes/:id - Actualizar ruta y sincronizar paradas");
    info!("   DELETE /api/routes/:id - Eliminar ruta");
    info!("   POST /api/routes/bulk - Guardado masivo");
    info!("📍 Paradas:");
    info!("   GET  /api/locations/:id - Obtener parada");
    info!("   PUT  /api/locations/:id - Actualizar parada");
    info!("   DELETE /api/locations/:id - Eliminar parada");
    info!("🔳 Códigos QR:");
    info!("   POST /api/qrcodes - Crear QR");
    info!("   GET  /api/qrcodes?locationId= - Listar QR de una parada");
    info!("   PUT  /api/qrcodes/:id - Actualizar QR");
    info!("   DELETE /api/qrcodes/:id - Eliminar QR");

    let listener = tokio::net::TcpListener::bind(addr.as_str()).await?;
    let served = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await;

    if let Err(e) = served {
        error!("❌ Servidor terminó con error: {}", e);
    }

    db_connection.close().await;
    info!("👋 Servidor terminado");
    Ok(())
}

/// Señal de apagado graceful
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("❌ No se pudo escuchar Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                error!("❌ No se pudo instalar el manejador de SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("🛑 Señal Ctrl+C recibida, apagando servidor...");
        },
        _ = terminate => {
            info!("🛑 Señal de terminación recibida, apagando servidor...");
        },
    }
}
