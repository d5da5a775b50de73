// combinaciones.rs - Paso combinatorio para generar proyecciones alternativas
//
// Las combinaciones son tuplas de índices crecientes sobre la lista ordenada.
// "Siguiente" = la tupla del mismo tamaño inmediatamente posterior en orden
// lexicográfico, o sea la siguiente menos preferida según el orden de la lista.

use tracing::trace;

use crate::projection::preparacion::CursoAnotado;
use crate::projection::seleccion::suma_creditos;

/// Cupo de combinaciones que se pueden descartar por pasar el tope en una
/// misma llamada. Sin cupo el paso recorre hasta C(n, k) tuplas.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Presupuesto {
    limite: usize,
    descartadas: usize,
}

impl Presupuesto {
    pub fn new(limite: usize) -> Self {
        Presupuesto { limite, descartadas: 0 }
    }

    /// Registra un descarte; false si ya no quedaba cupo para él.
    pub fn descartar(&mut self) -> bool {
        self.descartadas += 1;
        self.descartadas <= self.limite
    }

    pub fn descartadas(&self) -> usize {
        self.descartadas
    }

    pub fn agotado(&self) -> bool {
        self.descartadas > self.limite
    }
}

/// Siguiente combinación de tamaño `k = indices.len()` sobre `n` elementos.
/// `None` cuando ya no quedan (o la combinación está vacía).
pub(crate) fn siguiente_combinacion(indices: &[usize], n: usize) -> Option<Vec<usize>> {
    let k = indices.len();
    if k == 0 || k > n {
        return None;
    }

    let mut next = indices.to_vec();
    // posición más a la derecha que todavía no llegó a su máximo
    let i = (0..k).rev().find(|&i| next[i] != i + (n - k))?;

    next[i] += 1;
    for j in (i + 1)..k {
        next[j] = next[j - 1] + 1;
    }
    Some(next)
}

/// Como `siguiente_combinacion`, pero salta las combinaciones que pasan el
/// tope. Cada salto gasta cupo del presupuesto; sin cupo devuelve `None`.
pub(crate) fn siguiente_bajo_tope(
    indices: &[usize],
    cursos: &[CursoAnotado],
    tope: u32,
    presupuesto: &mut Presupuesto,
) -> Option<Vec<usize>> {
    let mut actual = siguiente_combinacion(indices, cursos.len())?;
    while suma_creditos(cursos, &actual) > u64::from(tope) {
        trace!(indices = ?actual, tope, "combinación descartada: supera el tope");
        if !presupuesto.descartar() {
            return None;
        }
        actual = siguiente_combinacion(&actual, cursos.len())?;
    }
    Some(actual)
}

/// Extiende la combinación con los ramos que siguen al último índice
/// mientras quepan; se detiene en el primero que se pasa del tope.
/// Devuelve la combinación extendida y su total.
pub(crate) fn extender_hacia_adelante(
    indices: &[usize],
    cursos: &[CursoAnotado],
    tope: u32,
) -> (Vec<usize>, u64) {
    let tope = u64::from(tope);
    let mut extendida = indices.to_vec();
    let mut total = suma_creditos(cursos, indices);

    let desde = indices.last().map_or(0, |&ultimo| ultimo + 1);
    for j in desde..cursos.len() {
        let creditos = u64::from(cursos[j].creditos);
        if total + creditos > tope {
            break;
        }
        extendida.push(j);
        total += creditos;
    }

    (extendida, total)
}
