// Casos de uso: obtener malla y avance desde las fuentes externas,
// normalizarlos y ejecutar el motor de proyección.

use serde_json::Value;
use tracing::info;

use crate::api_json::{ProjectionRequest, parse_avance, parse_malla};
use crate::config::ProjectionConfig;
use crate::error::ProjectionError;
use crate::models::{EstadoAvance, ProjectionInput, ProjectionResult};
use crate::projection::{build, build_options};

/// Catálogo de mallas curriculares (servicio externo).
pub trait MallaSource {
    fn get_malla(&self, cod_carrera: &str, catalogo: &str) -> Result<Value, ProjectionError>;
}

/// Historial académico del alumno (servicio externo).
pub trait AvanceSource {
    fn get_avance(&self, rut: &str, cod_carrera: &str) -> Result<Value, ProjectionError>;
}

/// Fuente en memoria: devuelve siempre la misma malla y el mismo avance.
#[derive(Debug, Clone, Default)]
pub struct StaticSource {
    pub malla: Value,
    pub avance: Value,
}

impl StaticSource {
    pub fn new(malla: Value, avance: Value) -> Self {
        StaticSource { malla, avance }
    }
}

impl MallaSource for StaticSource {
    fn get_malla(&self, _cod_carrera: &str, _catalogo: &str) -> Result<Value, ProjectionError> {
        Ok(self.malla.clone())
    }
}

impl AvanceSource for StaticSource {
    fn get_avance(&self, _rut: &str, _cod_carrera: &str) -> Result<Value, ProjectionError> {
        Ok(self.avance.clone())
    }
}

fn validar(request: &ProjectionRequest) -> Result<(), ProjectionError> {
    let faltantes: Vec<&str> = [
        ("rut", &request.rut),
        ("codCarrera", &request.cod_carrera),
        ("catalogo", &request.catalogo),
    ]
    .iter()
    .filter(|(_, v)| v.trim().is_empty())
    .map(|(k, _)| *k)
    .collect();

    if faltantes.is_empty() {
        Ok(())
    } else {
        Err(ProjectionError::InvalidRequest(format!("faltan campos: {}", faltantes.join(", "))))
    }
}

fn log_diagnostico(input: &ProjectionInput, max_opciones: Option<usize>) {
    let (malla, avance) = (&input.malla, &input.avance);
    let con_estado = |estado: EstadoAvance| avance.iter().filter(move |a| a.status == estado);
    let ejemplo_malla: Vec<&str> = malla.iter().take(3).map(|c| c.codigo.as_str()).collect();
    let ejemplo_reprob: Vec<&str> = con_estado(EstadoAvance::Reprobado)
        .take(5)
        .map(|a| a.course.as_str())
        .collect();

    info!(
        malla = malla.len(),
        avance = avance.len(),
        aprobados = con_estado(EstadoAvance::Aprobado).count(),
        reprobados = con_estado(EstadoAvance::Reprobado).count(),
        ejemplo_malla = ?ejemplo_malla,
        ejemplo_reprob = ?ejemplo_reprob,
        tope = input.tope_efectivo(),
        maximizar = input.maximizar_creditos,
        priorizar_reprobados = input.priorizar_reprobados,
        orden = ?input.orden_prioridades,
        max_opciones = ?max_opciones,
        "diag.proyeccion"
    );
}

fn cargar_input<M, A>(
    request: &ProjectionRequest,
    config: &ProjectionConfig,
    malla_src: &M,
    avance_src: &A,
    max_opciones: Option<usize>,
) -> Result<ProjectionInput, ProjectionError>
where
    M: MallaSource + ?Sized,
    A: AvanceSource + ?Sized,
{
    validar(request)?;

    let malla_raw = malla_src.get_malla(&request.cod_carrera, &request.catalogo)?;
    let avance_raw = avance_src.get_avance(&request.rut, &request.cod_carrera)?;

    let malla = parse_malla(&malla_raw);
    let avance = parse_avance(&avance_raw);
    let input = request.to_input(config, malla, avance);
    log_diagnostico(&input, max_opciones);
    Ok(input)
}

/// Genera la mejor proyección para el alumno de la solicitud.
pub fn generate_projection<M, A>(
    request: &ProjectionRequest,
    config: &ProjectionConfig,
    malla_src: &M,
    avance_src: &A,
) -> Result<ProjectionResult, ProjectionError>
where
    M: MallaSource + ?Sized,
    A: AvanceSource + ?Sized,
{
    info!(rut = %request.rut, "iniciando proyección");
    let input = cargar_input(request, config, malla_src, avance_src, None)?;
    Ok(build(&input))
}

/// Genera la mejor proyección y sus alternativas (hasta `maxOptions`).
pub fn generate_projection_options<M, A>(
    request: &ProjectionRequest,
    config: &ProjectionConfig,
    malla_src: &M,
    avance_src: &A,
) -> Result<Vec<ProjectionResult>, ProjectionError>
where
    M: MallaSource + ?Sized,
    A: AvanceSource + ?Sized,
{
    info!(rut = %request.rut, "iniciando proyección con opciones");
    let max = request.max_opciones(config);
    let input = cargar_input(request, config, malla_src, avance_src, Some(max))?;
    Ok(build_options(&input, max))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    struct FuenteCaida;

    impl MallaSource for FuenteCaida {
        fn get_malla(&self, _: &str, _: &str) -> Result<Value, ProjectionError> {
            Err(ProjectionError::Source { fuente: "malla", mensaje: "timeout".to_string() })
        }
    }

    fn request() -> ProjectionRequest {
        ProjectionRequest {
            rut: "1-9".to_string(),
            cod_carrera: "8606".to_string(),
            catalogo: "201610".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_faltan_identificadores() {
        let fuente = StaticSource::default();
        let req = ProjectionRequest { rut: " ".to_string(), ..request() };
        let err = generate_projection(&req, &ProjectionConfig::default(), &fuente, &fuente).unwrap_err();
        match err {
            ProjectionError::InvalidRequest(msg) => assert!(msg.contains("rut")),
            other => panic!("error inesperado: {other}"),
        }
    }

    #[test]
    fn test_error_de_fuente_se_propaga() {
        let avance = StaticSource::default();
        let err = generate_projection(&request(), &ProjectionConfig::default(), &FuenteCaida, &avance).unwrap_err();
        assert!(matches!(err, ProjectionError::Source { fuente: "malla", .. }));
    }

    #[test]
    fn test_fuentes_vacias_dan_proyeccion_vacia() {
        let fuente = StaticSource::default();
        let res = generate_projection(&request(), &ProjectionConfig::default(), &fuente, &fuente).unwrap();
        assert!(res.seleccion.is_empty());
        assert_eq!(res.total_creditos, 0);
        assert_eq!(res.reglas.tope_creditos, 22);
    }

    #[test]
    fn test_opciones_usan_max_de_config() {
        let fuente = StaticSource::new(
            json!([
                { "codigo": "A", "asignatura": "A", "creditos": 6, "nivel": 1 },
                { "codigo": "B", "asignatura": "B", "creditos": 6, "nivel": 1 },
                { "codigo": "C", "asignatura": "C", "creditos": 6, "nivel": 1 }
            ]),
            json!([]),
        );
        let config = ProjectionConfig { max_opciones: 2, ..Default::default() };
        let req = ProjectionRequest { tope_creditos: Some(6), ..request() };
        let opciones = generate_projection_options(&req, &config, &fuente, &fuente).unwrap();
        assert_eq!(opciones.len(), 2);
        assert_eq!(opciones[0].codigos(), vec!["A"]);
        assert_eq!(opciones[1].codigos(), vec!["B"]);
    }
}
