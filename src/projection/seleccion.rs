// seleccion.rs - Etapa 2 del motor: una única selección bajo el tope
//
// Dos modos excluyentes:
//   - llenar_hasta_tope: recorre la lista ordenada y toma lo que cabe
//   - maximizar_creditos: mochila 0/1 por suma exacta de créditos

use std::cmp::Ordering;

use tracing::debug;

use crate::projection::preparacion::CursoAnotado;

pub(crate) fn suma_creditos(cursos: &[CursoAnotado], indices: &[usize]) -> u64 {
    indices.iter().map(|&i| u64::from(cursos[i].creditos)).sum()
}

/// Modo prioridad: toma cada ramo que todavía cabe; corta apenas el
/// total llega justo al tope.
pub(crate) fn llenar_hasta_tope(cursos: &[CursoAnotado], tope: u32) -> Vec<usize> {
    let tope = u64::from(tope);
    let mut indices = Vec::new();
    let mut total: u64 = 0;

    for (i, c) in cursos.iter().enumerate() {
        let creditos = u64::from(c.creditos);
        if total + creditos <= tope {
            indices.push(i);
            total += creditos;
        }
        if total >= tope {
            break;
        }
    }

    indices
}

/// Criterio secundario entre combinaciones con la misma suma de créditos:
/// más ramos es mejor; a igual cantidad, menor suma de índices (promedio
/// más cercano al inicio de la lista ordenada).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Bondad {
    pub cursos: usize,
    pub suma_indices: usize,
}

impl Ord for Bondad {
    fn cmp(&self, other: &Self) -> Ordering {
        self.cursos
            .cmp(&other.cursos)
            .then_with(|| other.suma_indices.cmp(&self.suma_indices))
    }
}

impl PartialOrd for Bondad {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

#[derive(Debug, Clone)]
struct Combinacion {
    indices: Vec<usize>,
    bondad: Bondad,
}

impl Combinacion {
    fn vacia() -> Self {
        Combinacion {
            indices: Vec::new(),
            bondad: Bondad { cursos: 0, suma_indices: 0 },
        }
    }

    fn con(&self, i: usize) -> Self {
        let mut indices = self.indices.clone();
        indices.push(i);
        Combinacion {
            indices,
            bondad: Bondad {
                cursos: self.bondad.cursos + 1,
                suma_indices: self.bondad.suma_indices + i,
            },
        }
    }
}

/// Modo maximizar: `dp[t]` guarda la mejor combinación que suma exactamente
/// `t` créditos. Devuelve los índices (en orden de lista) de la suma más
/// alta alcanzable y esa suma.
pub(crate) fn maximizar_creditos(cursos: &[CursoAnotado], tope: u32) -> (Vec<usize>, u32) {
    // Ninguna suma puede pasar del total de créditos disponibles
    let disponible: u64 = cursos.iter().map(|c| u64::from(c.creditos)).sum();
    let capacidad = disponible.min(u64::from(tope)) as usize;

    let mut dp: Vec<Option<Combinacion>> = vec![None; capacidad + 1];
    dp[0] = Some(Combinacion::vacia());

    for (i, c) in cursos.iter().enumerate() {
        let peso = c.creditos as usize;
        if peso > capacidad {
            continue;
        }
        // de mayor a menor para que cada ramo se use a lo más una vez
        for t in (peso..=capacidad).rev() {
            let candidata = match &dp[t - peso] {
                Some(prev) => prev.con(i),
                None => continue,
            };
            let mejora = dp[t]
                .as_ref()
                .is_none_or(|actual| candidata.bondad > actual.bondad);
            if mejora {
                dp[t] = Some(candidata);
            }
        }
    }

    let mejor = (0..=capacidad).rev().find_map(|t| dp[t].take().map(|c| (c.indices, t)));
    let (indices, total) = mejor.unwrap_or_default();

    debug!(capacidad, total, cursos = indices.len(), "mochila resuelta");
    (indices, total as u32)
}
