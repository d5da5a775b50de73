// orden.rs - Comparador dinámico guiado por la lista de tags del usuario.
//
// Cada tag reconocido aporta una regla de comparación; las reglas se
// aplican en el orden en que el usuario las declaró y la primera que no
// empata decide. Si todas empatan se ordena por nivel ascendente.

use std::cmp::Ordering;

use crate::projection::preparacion::CursoAnotado;

pub(crate) type ReglaOrden = fn(&CursoAnotado, &CursoAnotado) -> Ordering;

/// Criterios de prioridad reconocidos. Se aceptan en inglés y en castellano.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PriorityTag {
    Reprobados,
    Prioritarios,
    NivelMasBajo,
}

impl PriorityTag {
    /// `None` para tags desconocidos (se ignoran al ordenar).
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_uppercase().as_str() {
            "FAILED" | "REPROBADOS" => Some(PriorityTag::Reprobados),
            "PRIORITIZED" | "PRIORITARIOS" => Some(PriorityTag::Prioritarios),
            "LOWEST_LEVEL" | "NIVEL MAS BAJO" => Some(PriorityTag::NivelMasBajo),
            _ => None,
        }
    }

    fn regla(self) -> ReglaOrden {
        match self {
            PriorityTag::Reprobados => primero_reprobados,
            PriorityTag::Prioritarios => primero_prioritarios,
            PriorityTag::NivelMasBajo => nivel_ascendente,
        }
    }
}

fn primero_reprobados(a: &CursoAnotado, b: &CursoAnotado) -> Ordering {
    b.reprobado.cmp(&a.reprobado)
}

fn primero_prioritarios(a: &CursoAnotado, b: &CursoAnotado) -> Ordering {
    b.prioritario.cmp(&a.prioritario)
}

fn nivel_ascendente(a: &CursoAnotado, b: &CursoAnotado) -> Ordering {
    a.nivel.cmp(&b.nivel)
}

pub(crate) struct Ordenador {
    reglas: Vec<ReglaOrden>,
}

impl Ordenador {
    pub fn from_tags<S: AsRef<str>>(tags: &[S]) -> Self {
        let reglas = tags
            .iter()
            .filter_map(|t| PriorityTag::parse(t.as_ref()))
            .map(PriorityTag::regla)
            .collect();
        Ordenador { reglas }
    }

    pub fn compare(&self, a: &CursoAnotado, b: &CursoAnotado) -> Ordering {
        self.reglas
            .iter()
            .map(|regla| regla(a, b))
            .find(|o| o.is_ne())
            .unwrap_or_else(|| nivel_ascendente(a, b))
    }
}
