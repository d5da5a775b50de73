// preparacion.rs - Etapa 1 del motor: filtrar, anotar y ordenar la malla
//
// Pasos (en orden):
//   1. aprobados / reprobados a partir del avance (aprobar anula reprobaciones previas)
//   2. pendientes: fuera todo lo aprobado
//   3. disponibles: reprobados siempre; el resto sólo con prerequisitos aprobados
//   4. rango de créditos (inclusivo)
//   5. anotar motivo + marcas de ordenamiento
//   6. orden estable según los tags del usuario

use std::collections::HashSet;

use tracing::debug;

use crate::models::{AvanceItem, Course, EstadoAvance, Motivo, ProjectionCourse, ProjectionInput};
use crate::projection::orden::Ordenador;

/// Ramo de trabajo del motor. Vive sólo durante una llamada; las marcas
/// `reprobado` / `prioritario` nunca salen en el resultado público.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct CursoAnotado {
    pub codigo: String,
    pub asignatura: String,
    pub creditos: u32,
    pub nivel: i32,
    pub motivo: Motivo,
    pub reprobado: bool,
    pub prioritario: bool,
}

impl CursoAnotado {
    pub fn to_projection(&self) -> ProjectionCourse {
        ProjectionCourse {
            codigo: self.codigo.clone(),
            asignatura: self.asignatura.clone(),
            creditos: self.creditos,
            nivel: self.nivel,
            motivo: self.motivo,
            nrc: None,
        }
    }
}

/// Conjuntos derivados del avance del alumno.
#[derive(Debug, Default, Clone)]
pub struct EstadoAlumno {
    pub aprobados: HashSet<String>,
    pub reprobados: HashSet<String>,
}

/// Reduce el historial de inscripciones a dos conjuntos disjuntos.
/// Un ramo aprobado alguna vez no cuenta como reprobado.
pub fn derivar_estado(avance: &[AvanceItem]) -> EstadoAlumno {
    let aprobados: HashSet<String> = avance
        .iter()
        .filter(|a| a.status == EstadoAvance::Aprobado)
        .map(|a| a.course.trim().to_string())
        .collect();

    let reprobados: HashSet<String> = avance
        .iter()
        .filter(|a| a.status == EstadoAvance::Reprobado)
        .map(|a| a.course.trim().to_string())
        .filter(|code| !aprobados.contains(code))
        .collect();

    EstadoAlumno { aprobados, reprobados }
}

/// true si todos los prerequisitos (tokens recortados, no vacíos) están aprobados.
/// Un ramo sin prerequisitos siempre cumple.
pub fn has_prereqs(course: &Course, aprobados: &HashSet<String>) -> bool {
    course
        .prereq
        .iter()
        .map(|p| p.trim())
        .filter(|p| !p.is_empty())
        .all(|code| aprobados.contains(code))
}

/// Normaliza la lista de ramos prioritarios: recorta y descarta vacíos.
pub fn normalizar_prioritarios(prioritarios: &[String]) -> Vec<String> {
    prioritarios
        .iter()
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

pub(crate) fn preparar_cursos(input: &ProjectionInput) -> Vec<CursoAnotado> {
    let estado = derivar_estado(&input.avance);
    let prios: HashSet<String> = normalizar_prioritarios(&input.prioritarios)
        .into_iter()
        .collect();

    // Códigos repetidos en la malla: queda la primera aparición
    let mut vistos: HashSet<&str> = HashSet::new();
    let unicos: Vec<&Course> = input
        .malla
        .iter()
        .filter(|c| vistos.insert(c.codigo.trim()))
        .collect();

    let pendientes: Vec<&Course> = unicos
        .into_iter()
        .filter(|c| !estado.aprobados.contains(c.codigo.trim()))
        .collect();
    let n_pendientes = pendientes.len();

    let disponibles: Vec<&Course> = pendientes
        .into_iter()
        .filter(|c| estado.reprobados.contains(c.codigo.trim()) || has_prereqs(c, &estado.aprobados))
        .collect();
    let n_disponibles = disponibles.len();

    let mut cursos: Vec<CursoAnotado> = disponibles
        .into_iter()
        .filter(|c| input.credit_range.contains(c.creditos))
        .map(|c| {
            let codigo = c.codigo.trim();
            let reprobado = estado.reprobados.contains(codigo);
            CursoAnotado {
                codigo: codigo.to_string(),
                asignatura: c.asignatura.clone(),
                creditos: c.creditos,
                nivel: c.nivel,
                motivo: if reprobado { Motivo::Reprobado } else { Motivo::Pendiente },
                reprobado,
                prioritario: prios.contains(codigo),
            }
        })
        .collect();

    // sort_by es estable: empates conservan el orden de la malla
    let ordenador = Ordenador::from_tags(input.orden_prioridades.as_slice());
    cursos.sort_by(|a, b| ordenador.compare(a, b));

    debug!(
        malla = input.malla.len(),
        aprobados = estado.aprobados.len(),
        reprobados = estado.reprobados.len(),
        pendientes = n_pendientes,
        disponibles = n_disponibles,
        en_rango = cursos.len(),
        "cursos preparados"
    );

    cursos
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CreditRange;

    fn curso(codigo: &str, creditos: u32, nivel: i32, prereq: &[&str]) -> Course {
        Course {
            codigo: codigo.to_string(),
            asignatura: format!("Ramo {}", codigo),
            creditos,
            nivel,
            prereq: prereq.iter().map(|s| s.to_string()).collect(),
        }
    }

    fn input(malla: Vec<Course>, avance: Vec<AvanceItem>) -> ProjectionInput {
        ProjectionInput {
            malla,
            avance,
            credit_range: CreditRange { min: 0, max: 10 },
            ..Default::default()
        }
    }

    fn codigos(cursos: &[CursoAnotado]) -> Vec<&str> {
        cursos.iter().map(|c| c.codigo.as_str()).collect()
    }

    #[test]
    fn test_aprobado_anula_reprobado() {
        let avance = vec![
            AvanceItem::new("MAT101", EstadoAvance::Reprobado),
            AvanceItem::new("MAT101", EstadoAvance::Aprobado),
            AvanceItem::new("FIS101", EstadoAvance::Reprobado),
            AvanceItem::new("QUI101", EstadoAvance::Otro),
        ];
        let estado = derivar_estado(&avance);
        assert!(estado.aprobados.contains("MAT101"));
        assert!(!estado.reprobados.contains("MAT101"));
        assert!(estado.reprobados.contains("FIS101"));
        assert!(!estado.aprobados.contains("QUI101"));
        assert!(!estado.reprobados.contains("QUI101"));
    }

    #[test]
    fn test_prerequisitos_recortados_y_vacios() {
        let aprobados: HashSet<String> = ["MAT101".to_string()].into_iter().collect();
        assert!(has_prereqs(&curso("X", 4, 1, &[]), &aprobados));
        assert!(has_prereqs(&curso("X", 4, 1, &[" MAT101 ", ""]), &aprobados));
        assert!(!has_prereqs(&curso("X", 4, 1, &["MAT101", "FIS101"]), &aprobados));
    }

    #[test]
    fn test_reprobado_se_ofrece_aunque_falten_prerequisitos() {
        let malla = vec![curso("C1", 6, 1, &[]), curso("C2", 4, 2, &["C1"])];
        let avance = vec![AvanceItem::new("C2", EstadoAvance::Reprobado)];
        let cursos = preparar_cursos(&input(malla, avance));
        assert_eq!(codigos(&cursos), vec!["C1", "C2"]);
        let c2 = &cursos[1];
        assert!(c2.reprobado);
        assert_eq!(c2.motivo, Motivo::Reprobado);
    }

    #[test]
    fn test_rango_de_creditos_inclusivo() {
        let malla = vec![curso("A", 2, 1, &[]), curso("B", 4, 1, &[]), curso("C", 7, 1, &[])];
        let mut inp = input(malla, vec![]);
        inp.credit_range = CreditRange { min: 2, max: 4 };
        assert_eq!(codigos(&preparar_cursos(&inp)), vec!["A", "B"]);
    }

    #[test]
    fn test_codigos_duplicados_en_malla() {
        let malla = vec![curso("A", 2, 1, &[]), curso("A", 8, 3, &[]), curso("B", 4, 2, &[])];
        let cursos = preparar_cursos(&input(malla, vec![]));
        assert_eq!(codigos(&cursos), vec!["A", "B"]);
        assert_eq!(cursos[0].creditos, 2);
    }

    #[test]
    fn test_marca_prioritarios_normalizados() {
        let malla = vec![curso("A", 2, 1, &[]), curso("B", 4, 1, &[])];
        let mut inp = input(malla, vec![]);
        inp.prioritarios = vec![" B ".to_string(), "".to_string()];
        let cursos = preparar_cursos(&inp);
        assert!(!cursos[0].prioritario);
        assert!(cursos[1].prioritario);
    }

    #[test]
    fn test_sin_datos_lista_vacia() {
        assert!(preparar_cursos(&ProjectionInput::default()).is_empty());
    }
}
