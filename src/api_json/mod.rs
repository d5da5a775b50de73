use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};
use tracing::warn;

use crate::config::ProjectionConfig;
use crate::models::{AvanceItem, Course, CreditRange, EstadoAvance, ProjectionInput, TOPE_CREDITOS_MAX};

/// Solicitud de proyección.
///
/// # Estructura del JSON esperado:
/// ```json
/// {
///   "rut": "12345678-9",
///   "codCarrera": "8606",
///   "catalogo": "201610",
///   "topeCreditos": 22,
///   "prioritarios": ["CIT3313"],
///   "creditRange": { "min": 0, "max": 10 },
///   "maximizarCreditos": false,
///   "priorizarReprobados": true,
///   "ordenPrioridades": ["REPROBADOS", "PRIORITARIOS", "NIVEL MAS BAJO"],
///   "maxOptions": 5
/// }
/// ```
///
/// Todos los campos de reglas son opcionales; los ausentes se completan con
/// `ProjectionConfig`. También se aceptan los nombres en inglés
/// (`creditCap`, `priorityCodes`, `maximizeCredits`, `prioritizeFailed`,
/// `priorityTagOrder`, `maxAlternatives`).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectionRequest {
    #[serde(default, alias = "studentId")]
    pub rut: String,
    #[serde(default, alias = "programId")]
    pub cod_carrera: String,
    #[serde(default, alias = "catalogId")]
    pub catalogo: String,
    #[serde(default, alias = "creditCap")]
    pub tope_creditos: Option<i64>,
    #[serde(default, alias = "priorityCodes")]
    pub prioritarios: Option<Vec<String>>,
    #[serde(default)]
    pub credit_range: Option<CreditRange>,
    #[serde(default, alias = "maximizeCredits")]
    pub maximizar_creditos: Option<bool>,
    // sólo informativo: el efecto real lo da el tag REPROBADOS en ordenPrioridades
    #[serde(default, alias = "prioritizeFailed")]
    pub priorizar_reprobados: Option<bool>,
    #[serde(default, alias = "priorityTagOrder")]
    pub orden_prioridades: Option<Vec<String>>,
    #[serde(default, alias = "maxAlternatives")]
    pub max_options: Option<usize>,
}

impl ProjectionRequest {
    /// Arma la entrada del motor completando lo ausente con `config`.
    /// Un tope ausente o no positivo toma el de la configuración; uno sobre
    /// `TOPE_CREDITOS_MAX` se recorta.
    pub fn to_input(&self, config: &ProjectionConfig, malla: Vec<Course>, avance: Vec<AvanceItem>) -> ProjectionInput {
        let pedido = self
            .tope_creditos
            .filter(|t| *t > 0)
            .unwrap_or(i64::from(config.tope_creditos));
        let tope = pedido.min(i64::from(TOPE_CREDITOS_MAX));
        if tope < pedido {
            warn!(pedido, tope, "tope de créditos recortado");
        }

        ProjectionInput {
            malla,
            avance,
            tope_creditos: Some(tope),
            prioritarios: self.prioritarios.clone().unwrap_or_default(),
            credit_range: self.credit_range.unwrap_or(config.credit_range),
            maximizar_creditos: self.maximizar_creditos.unwrap_or(false),
            priorizar_reprobados: self.priorizar_reprobados.unwrap_or(false),
            orden_prioridades: self
                .orden_prioridades
                .clone()
                .unwrap_or_else(|| config.orden_prioridades.clone()),
        }
    }

    pub fn max_opciones(&self, config: &ProjectionConfig) -> usize {
        self.max_options.unwrap_or(config.max_opciones)
    }
}

pub fn parse_json_input(json_str: &str) -> Result<ProjectionRequest, serde_json::Error> {
    serde_json::from_str::<ProjectionRequest>(json_str)
}

// ----------------- coerción de datos externos -----------------
// Las fuentes de malla y avance entregan JSON poco confiable: campos que
// faltan, números como texto, booleanos como "true". Aquí se llevan a
// valores seguros; el motor no vuelve a validar.

fn campo<'a>(obj: &'a Value, claves: &[&str]) -> Option<&'a Value> {
    claves.iter().find_map(|k| obj.get(*k))
}

fn numero_a_texto(n: &Number) -> String {
    match (n.as_i64(), n.as_u64(), n.as_f64()) {
        (Some(i), _, _) => i.to_string(),
        (_, Some(u), _) => u.to_string(),
        (_, _, Some(f)) if f.fract() == 0.0 && f.abs() < 1e15 => format!("{}", f as i64),
        (_, _, Some(f)) => f.to_string(),
        _ => String::new(),
    }
}

/// Texto tal cual, número finito como texto, cualquier otra cosa vacío.
fn texto(v: Option<&Value>) -> String {
    match v {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => numero_a_texto(n),
        _ => String::new(),
    }
}

/// Número finito, texto numérico, o 0.
fn numero(v: Option<&Value>) -> f64 {
    let x = match v {
        Some(Value::Number(n)) => n.as_f64().unwrap_or(0.0),
        Some(Value::String(s)) if !s.trim().is_empty() => s.trim().parse::<f64>().unwrap_or(0.0),
        _ => 0.0,
    };
    if x.is_finite() { x } else { 0.0 }
}

fn booleano(v: Option<&Value>) -> bool {
    match v {
        Some(Value::Bool(b)) => *b,
        Some(Value::String(s)) => s == "true",
        _ => false,
    }
}

fn creditos(v: Option<&Value>) -> u32 {
    let x = numero(v);
    if x <= 0.0 { 0 } else { x.min(f64::from(u32::MAX)) as u32 }
}

/// Prerequisitos como "A, B" o como ["A", "B"]; tokens recortados, sin vacíos.
fn prerequisitos(v: Option<&Value>) -> Vec<String> {
    let crudos: Vec<String> = match v {
        Some(Value::Array(items)) => items.iter().map(|x| texto(Some(x))).collect(),
        Some(other) => vec![texto(Some(other))],
        None => Vec::new(),
    };
    crudos
        .iter()
        .flat_map(|s| s.split(','))
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Convierte el JSON de la malla en ramos. Entrada que no es arreglo -> vacío.
pub fn parse_malla(data: &Value) -> Vec<Course> {
    let Some(items) = data.as_array() else {
        return Vec::new();
    };
    items
        .iter()
        .map(|obj| Course {
            codigo: texto(campo(obj, &["codigo", "code"])),
            asignatura: texto(campo(obj, &["asignatura", "title"])),
            creditos: creditos(campo(obj, &["creditos", "credits"])),
            nivel: numero(campo(obj, &["nivel", "level"])) as i32,
            prereq: prerequisitos(campo(obj, &["prereq", "prerequisites"])),
        })
        .collect()
}

/// Convierte el JSON del avance en registros. Entrada que no es arreglo -> vacío.
pub fn parse_avance(data: &Value) -> Vec<AvanceItem> {
    let Some(items) = data.as_array() else {
        return Vec::new();
    };
    items
        .iter()
        .map(|obj| AvanceItem {
            nrc: texto(obj.get("nrc")),
            period: texto(obj.get("period")),
            student: texto(obj.get("student")),
            course: texto(obj.get("course")),
            excluded: booleano(obj.get("excluded")),
            inscription_type: texto(obj.get("inscriptionType")),
            status: EstadoAvance::from_status(&texto(obj.get("status"))),
        })
        .collect()
}
