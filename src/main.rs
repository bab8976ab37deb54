use std::error::Error;
use std::path::PathBuf;

use chem_domain::LookupConfig;
use chem_providers::ProviderConfig;
use chem_workflow::{PkaSearch, PkaSearchFactory};

/// Identificadores usados cuando no se pasa ninguno por línea de comandos:
/// CAS del ácido acético, un CAS sin sección de disociación, InChI del
/// tiofenol y SMILES del fenol.
const DEMO_IDENTIFIERS: [&str; 4] =
    ["64-19-7", "2950-43-8", "InChI=1S/C6H6S/c7-6-4-2-1-3-5-6/h1-5,7H", "C1=CC=C(C=C1)O"];

/// Opciones de la línea de comandos.
#[derive(Debug, Default, PartialEq)]
struct CliArgs {
    debug: bool,
    db_path: Option<PathBuf>,
    identifiers: Vec<String>,
}

fn parse_args(args: impl IntoIterator<Item = String>) -> Result<CliArgs, String> {
    let mut cli = CliArgs::default();
    let mut args = args.into_iter();
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--debug" | "-d" | "--debug=true" | "--debug=True" => cli.debug = true,
            "--debug=false" | "--debug=False" => cli.debug = false,
            "--db" => {
                let path = args.next().ok_or_else(|| "--db necesita una ruta".to_string())?;
                cli.db_path = Some(PathBuf::from(path));
            }
            other if other.starts_with("--db=") => cli.db_path = Some(PathBuf::from(&other[5..])),
            _ => cli.identifiers.push(arg),
        }
    }
    Ok(cli)
}

fn init_logging(debug: bool) {
    let default_level = if debug { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level)).init();
}

fn build_search(cli: &CliArgs) -> Result<PkaSearch, Box<dyn Error>> {
    let config = LookupConfig::new(cli.debug || LookupConfig::from_env().debug);
    let search = match &cli.db_path {
        Some(path) => PkaSearchFactory::create(path.clone(), ProviderConfig::from_env(), config)?,
        None => PkaSearchFactory::from_env(config)?,
    };
    Ok(search)
}

/// `pka-lookup [--debug] [--db RUTA] IDENTIFICADOR...`
///
/// Imprime por cada identificador el registro (o lista de registros en
/// caché) como JSON, o `null` si no hay pKa disponible.
fn main() -> Result<(), Box<dyn Error>> {
    dotenvy::dotenv().ok();
    let cli = parse_args(std::env::args().skip(1))?;
    init_logging(cli.debug);

    let search = build_search(&cli)?;
    let identifiers: Vec<String> = if cli.identifiers.is_empty() {
        DEMO_IDENTIFIERS.iter().map(|s| s.to_string()).collect()
    } else {
        cli.identifiers.clone()
    };

    for identifier in &identifiers {
        let outcome = search.search_pka(identifier);
        println!("{}:", identifier);
        println!("{}", serde_json::to_string_pretty(&outcome)?);
    }

    search.flush()?;
    log::debug!("caché escrita en disco");
    Ok(())
}
