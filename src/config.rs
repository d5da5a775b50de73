//! Valores por defecto de las solicitudes de proyección.
//!
//! Se pueden sobreescribir con variables de entorno (o un `.env`):
//!
//! - `PROYECCION_TOPE_CREDITOS`: tope cuando la solicitud no trae uno válido
//!   (entre 1 y `TOPE_CREDITOS_MAX`)
//! - `PROYECCION_CREDITOS_MIN` / `PROYECCION_CREDITOS_MAX`: rango de créditos por ramo
//! - `PROYECCION_MAX_OPCIONES`: cantidad de alternativas
//! - `PROYECCION_ORDEN`: tags de prioridad separados por coma

use std::str::FromStr;

use crate::error::ProjectionError;
use crate::models::{CreditRange, TOPE_CREDITOS_DEFAULT, TOPE_CREDITOS_MAX};
use crate::projection::MAX_OPCIONES_DEFAULT;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectionConfig {
    pub tope_creditos: u32,
    pub credit_range: CreditRange,
    pub max_opciones: usize,
    pub orden_prioridades: Vec<String>,
}

impl Default for ProjectionConfig {
    fn default() -> Self {
        ProjectionConfig {
            tope_creditos: TOPE_CREDITOS_DEFAULT,
            credit_range: CreditRange::default(),
            max_opciones: MAX_OPCIONES_DEFAULT,
            orden_prioridades: vec!["NIVEL MAS BAJO".to_string()],
        }
    }
}

fn parse_var<T: FromStr>(clave: &str, valor: &str) -> Result<T, ProjectionError> {
    valor
        .trim()
        .parse::<T>()
        .map_err(|_| ProjectionError::Config(format!("{} = '{}' no es un número válido", clave, valor)))
}

impl ProjectionConfig {
    /// Lee `.env` si existe y luego el entorno del proceso.
    pub fn from_env() -> Result<Self, ProjectionError> {
        let _ = dotenv::dotenv();
        Self::from_vars(std::env::vars())
    }

    /// Igual que `from_env` pero sobre pares clave/valor explícitos.
    pub fn from_vars<I, K, V>(vars: I) -> Result<Self, ProjectionError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut config = ProjectionConfig::default();

        for (clave, valor) in vars {
            let (clave, valor) = (clave.as_ref(), valor.as_ref());
            match clave {
                "PROYECCION_TOPE_CREDITOS" => {
                    let tope: u32 = parse_var(clave, valor)?;
                    if tope == 0 || tope > TOPE_CREDITOS_MAX {
                        return Err(ProjectionError::Config(format!(
                            "{} debe estar entre 1 y {}",
                            clave, TOPE_CREDITOS_MAX
                        )));
                    }
                    config.tope_creditos = tope;
                }
                "PROYECCION_CREDITOS_MIN" => config.credit_range.min = parse_var(clave, valor)?,
                "PROYECCION_CREDITOS_MAX" => config.credit_range.max = parse_var(clave, valor)?,
                "PROYECCION_MAX_OPCIONES" => config.max_opciones = parse_var(clave, valor)?,
                "PROYECCION_ORDEN" => {
                    config.orden_prioridades = valor
                        .split(',')
                        .map(str::trim)
                        .filter(|t| !t.is_empty())
                        .map(str::to_string)
                        .collect();
                }
                _ => {}
            }
        }

        if config.credit_range.min > config.credit_range.max {
            return Err(ProjectionError::Config(format!(
                "rango de créditos invertido: {} > {}",
                config.credit_range.min, config.credit_range.max
            )));
        }

        Ok(config)
    }
}
