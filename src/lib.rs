// Biblioteca raíz del crate `proyeccion`.
// Motor de proyección de ramos (qué tomar el próximo semestre) más las capas
// de entrada JSON, configuración y casos de uso que lo rodean.
pub mod api_json;
pub mod config;
pub mod error;
pub mod models;
pub mod projection;
pub mod use_cases;

pub use config::ProjectionConfig;
pub use error::ProjectionError;
pub use projection::{build, build_options};
pub use use_cases::{generate_projection, generate_projection_options};
