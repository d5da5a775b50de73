// Motor de proyección: qué ramos tomar el próximo semestre.
//
// Dos etapas puras, sin I/O:
//   1. preparacion: malla + avance -> lista anotada y ordenada
//   2. seleccion / combinaciones: lista + tope -> una o varias proyecciones
//
// Cada llamada arma su propia lista de trabajo; no hay estado compartido.
mod combinaciones;
mod orden;
mod preparacion;
mod seleccion;

pub use orden::PriorityTag;
pub use preparacion::{EstadoAlumno, derivar_estado, has_prereqs, normalizar_prioritarios};

use tracing::{debug, trace, warn};

use crate::models::{ProjectionInput, ProjectionResult, Reglas};
use combinaciones::{Presupuesto, extender_hacia_adelante, siguiente_bajo_tope, siguiente_combinacion};
use preparacion::{CursoAnotado, preparar_cursos};
use seleccion::{llenar_hasta_tope, maximizar_creditos, suma_creditos};

/// Cantidad de alternativas cuando la solicitud no indica otra.
pub const MAX_OPCIONES_DEFAULT: usize = 5;

/// Lista preparada + reglas efectivas de una llamada.
struct Proyector {
    cursos: Vec<CursoAnotado>,
    tope: u32,
    maximizar: bool,
    reglas: Reglas,
}

impl Proyector {
    fn new(input: &ProjectionInput) -> Self {
        let tope = input.tope_efectivo();
        Proyector {
            cursos: preparar_cursos(input),
            tope,
            maximizar: input.maximizar_creditos,
            reglas: Reglas {
                tope_creditos: tope,
                credit_range: input.credit_range,
                priorizar_reprobados: input.priorizar_reprobados,
                maximizar_creditos: input.maximizar_creditos,
                prioritarios: normalizar_prioritarios(&input.prioritarios),
                orden_prioridades: input.orden_prioridades.clone(),
            },
        }
    }

    fn primera_seleccion(&self) -> Vec<usize> {
        if self.maximizar {
            maximizar_creditos(&self.cursos, self.tope).0
        } else {
            llenar_hasta_tope(&self.cursos, self.tope)
        }
    }

    fn resultado(&self, indices: &[usize]) -> ProjectionResult {
        let total = suma_creditos(&self.cursos, indices);
        ProjectionResult {
            seleccion: indices.iter().map(|&i| self.cursos[i].to_projection()).collect(),
            total_creditos: u32::try_from(total).unwrap_or(u32::MAX),
            reglas: self.reglas.clone(),
        }
    }

    /// Modo maximizar: mismo tamaño que la semilla, saltando lo que pasa el tope.
    fn alternativas_maximizadas(
        &self,
        semilla: Vec<usize>,
        opciones: &mut Vec<ProjectionResult>,
        max: usize,
        presupuesto: &mut Presupuesto,
    ) {
        let mut previa = semilla;
        while opciones.len() < max {
            let Some(next) = siguiente_bajo_tope(&previa, &self.cursos, self.tope, presupuesto) else {
                debug!(generadas = opciones.len(), "combinaciones agotadas");
                break;
            };
            debug!(indices = ?next, "alternativa aceptada");
            opciones.push(self.resultado(&next));
            previa = next;
        }
    }

    /// Modo prioridad: paso del mismo tamaño y luego relleno hacia adelante.
    /// Una combinación descartada pasa a ser el nuevo punto de partida sin
    /// ocupar una opción.
    fn alternativas_voraces(
        &self,
        semilla: Vec<usize>,
        opciones: &mut Vec<ProjectionResult>,
        max: usize,
        presupuesto: &mut Presupuesto,
    ) {
        let mut indices = semilla;
        while opciones.len() < max {
            let Some(next) = siguiente_combinacion(&indices, self.cursos.len()) else {
                debug!(generadas = opciones.len(), "combinaciones agotadas");
                break;
            };
            indices = next;

            let (extendida, total) = extender_hacia_adelante(&indices, &self.cursos, self.tope);
            if total > u64::from(self.tope) {
                trace!(indices = ?indices, total, tope = self.tope, "alternativa descartada: supera el tope");
                if !presupuesto.descartar() {
                    break;
                }
                continue;
            }
            debug!(indices = ?extendida, total, "alternativa aceptada");
            opciones.push(self.resultado(&extendida));
        }
    }
}

/// Una única proyección: la mejor según el modo pedido.
pub fn build(input: &ProjectionInput) -> ProjectionResult {
    let proyector = Proyector::new(input);
    let indices = proyector.primera_seleccion();
    proyector.resultado(&indices)
}

/// Hasta `max_options` proyecciones: la mejor primero y luego las
/// siguientes combinaciones en orden lexicográfico. Se devuelve siempre
/// al menos la primera, aunque `max_options` sea 0.
pub fn build_options(input: &ProjectionInput, max_options: usize) -> Vec<ProjectionResult> {
    let max = max_options.max(1);
    let proyector = Proyector::new(input);

    let semilla = proyector.primera_seleccion();
    let mut opciones = Vec::with_capacity(max);
    opciones.push(proyector.resultado(&semilla));

    // descartes permitidos: lineal en la cantidad de ramos por opción pedida
    let mut presupuesto = Presupuesto::new(proyector.cursos.len().saturating_mul(max));
    if proyector.maximizar {
        proyector.alternativas_maximizadas(semilla, &mut opciones, max, &mut presupuesto);
    } else {
        proyector.alternativas_voraces(semilla, &mut opciones, max, &mut presupuesto);
    }

    if presupuesto.agotado() {
        warn!(
            descartadas = presupuesto.descartadas(),
            opciones = opciones.len(),
            "búsqueda de alternativas cortada: demasiadas combinaciones sobre el tope"
        );
    } else if presupuesto.descartadas() > 0 {
        debug!(descartadas = presupuesto.descartadas(), "combinaciones descartadas por tope");
    }

    debug!(opciones = opciones.len(), pedidas = max, "proyecciones generadas");
    opciones
}
