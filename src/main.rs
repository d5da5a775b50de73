// --- Proyección de ramos - línea de comandos ---
//
// Uso: proyeccion [--opciones] [archivo.json | -]
//
// El archivo (o stdin) trae { "request": {...}, "malla": [...], "avance": [...] }.

use std::io::Read;
use std::process::ExitCode;

use proyeccion::api_json::ProjectionRequest;
use proyeccion::use_cases::StaticSource;
use proyeccion::{ProjectionConfig, ProjectionError, generate_projection, generate_projection_options};
use serde::Deserialize;
use serde_json::Value;
use tracing::error;
use tracing_subscriber::EnvFilter;

#[derive(Deserialize)]
struct Bundle {
    request: ProjectionRequest,
    #[serde(default)]
    malla: Value,
    #[serde(default)]
    avance: Value,
}

fn leer_entrada(ruta: Option<&str>) -> Result<String, ProjectionError> {
    match ruta {
        Some(p) if p != "-" => Ok(std::fs::read_to_string(p)?),
        _ => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            Ok(buf)
        }
    }
}

fn run(opciones: bool, ruta: Option<&str>) -> Result<String, ProjectionError> {
    let config = ProjectionConfig::from_env()?;
    let bundle: Bundle = serde_json::from_str(&leer_entrada(ruta)?)?;
    let fuente = StaticSource::new(bundle.malla, bundle.avance);

    let salida = if opciones {
        let res = generate_projection_options(&bundle.request, &config, &fuente, &fuente)?;
        serde_json::to_string_pretty(&res)?
    } else {
        let res = generate_projection(&bundle.request, &config, &fuente, &fuente)?;
        serde_json::to_string_pretty(&res)?
    };
    Ok(salida)
}

fn main() -> ExitCode {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("proyeccion=info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let opciones = args.iter().any(|a| a == "--opciones");
    let ruta = args.iter().find(|a| *a != "--opciones").map(String::as_str);

    match run(opciones, ruta) {
        Ok(salida) => {
            println!("{}", salida);
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}
