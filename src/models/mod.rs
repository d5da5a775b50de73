// Estructuras de datos principales del motor de proyección

use serde::{Deserialize, Serialize};

/// Tope de créditos usado cuando la solicitud no trae uno válido (> 0).
pub const TOPE_CREDITOS_DEFAULT: u32 = 22;

/// Tope más alto que acepta el motor; uno mayor se recorta a este valor.
/// La tabla del modo maximizar crece con el tope.
pub const TOPE_CREDITOS_MAX: u32 = 200;

/// Ramo de la malla curricular. Dato de referencia, el motor sólo lo lee.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Course {
    pub codigo: String,
    pub asignatura: String,
    pub creditos: u32,
    pub nivel: i32,
    /// Códigos de los prerequisitos (ya separados y recortados).
    #[serde(default)]
    pub prereq: Vec<String>,
}

/// Estado de una inscripción en el avance del alumno.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EstadoAvance {
    #[serde(rename = "APROBADO")]
    Aprobado,
    #[serde(rename = "REPROBADO")]
    Reprobado,
    #[serde(rename = "OTRO")]
    Otro,
}

impl EstadoAvance {
    /// Acepta la forma en castellano y en inglés, sin importar mayúsculas.
    pub fn from_status(raw: &str) -> Self {
        match raw.trim().to_uppercase().as_str() {
            "APROBADO" | "APPROVED" => EstadoAvance::Aprobado,
            "REPROBADO" | "FAILED" => EstadoAvance::Reprobado,
            _ => EstadoAvance::Otro,
        }
    }
}

/// Un intento de inscripción de un ramo (puede haber varios por ramo).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AvanceItem {
    pub nrc: String,
    pub period: String,
    pub student: String,
    pub course: String,
    pub excluded: bool,
    pub inscription_type: String,
    pub status: EstadoAvance,
}

impl AvanceItem {
    /// Atajo para construir registros en pruebas y fixtures.
    pub fn new(course: &str, status: EstadoAvance) -> Self {
        AvanceItem {
            nrc: String::new(),
            period: String::new(),
            student: String::new(),
            course: course.to_string(),
            excluded: false,
            inscription_type: String::new(),
            status,
        }
    }
}

/// Por qué se ofrece un ramo en la proyección.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Motivo {
    #[serde(rename = "REPROBADO")]
    Reprobado,
    #[serde(rename = "PENDIENTE")]
    Pendiente,
}

/// Rango inclusivo de créditos por ramo.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreditRange {
    pub min: u32,
    pub max: u32,
}

impl Default for CreditRange {
    fn default() -> Self {
        CreditRange { min: 0, max: 10 }
    }
}

impl CreditRange {
    pub fn contains(&self, creditos: u32) -> bool {
        creditos >= self.min && creditos <= self.max
    }
}

/// Forma pública de un ramo seleccionado. No lleva las marcas internas
/// de ordenamiento (reprobado / prioritario).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectionCourse {
    pub codigo: String,
    pub asignatura: String,
    pub creditos: u32,
    pub nivel: i32,
    pub motivo: Motivo,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nrc: Option<String>,
}

/// Reglas efectivas con que se armó una proyección (se devuelven como eco).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reglas {
    pub tope_creditos: u32,
    pub credit_range: CreditRange,
    pub priorizar_reprobados: bool,
    pub maximizar_creditos: bool,
    pub prioritarios: Vec<String>,
    pub orden_prioridades: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectionResult {
    pub seleccion: Vec<ProjectionCourse>,
    pub total_creditos: u32,
    pub reglas: Reglas,
}

impl ProjectionResult {
    pub fn codigos(&self) -> Vec<&str> {
        self.seleccion.iter().map(|c| c.codigo.as_str()).collect()
    }
}

/// Entrada completa del motor: malla y avance ya normalizados más las
/// opciones del usuario. `tope_creditos` se resuelve a 22 si es <= 0 y a
/// `TOPE_CREDITOS_MAX` si lo supera.
#[derive(Debug, Clone, Default)]
pub struct ProjectionInput {
    pub malla: Vec<Course>,
    pub avance: Vec<AvanceItem>,
    pub tope_creditos: Option<i64>,
    pub prioritarios: Vec<String>,
    pub credit_range: CreditRange,
    pub maximizar_creditos: bool,
    pub priorizar_reprobados: bool,
    pub orden_prioridades: Vec<String>,
}

impl ProjectionInput {
    /// Tope efectivo: el solicitado si es positivo, si no 22; nunca más
    /// que `TOPE_CREDITOS_MAX`.
    pub fn tope_efectivo(&self) -> u32 {
        match self.tope_creditos {
            Some(t) if t > 0 => u32::try_from(t).unwrap_or(u32::MAX).min(TOPE_CREDITOS_MAX),
            _ => TOPE_CREDITOS_DEFAULT,
        }
    }
}
