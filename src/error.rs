use thiserror::Error;

/// Errores de las capas alrededor del motor (entrada, fuentes externas,
/// configuración). El motor en sí nunca falla.
#[derive(Debug, Error)]
pub enum ProjectionError {
    #[error("JSON inválido: {0}")]
    Json(#[from] serde_json::Error),

    #[error("error de E/S: {0}")]
    Io(#[from] std::io::Error),

    #[error("fuente '{fuente}' no disponible: {mensaje}")]
    Source { fuente: &'static str, mensaje: String },

    #[error("solicitud inválida: {0}")]
    InvalidRequest(String),

    #[error("configuración inválida: {0}")]
    Config(String),
}
