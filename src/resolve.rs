use crate::error::AppError;
use crate::models::directory::LightsDirectory;

/// Resolve a light name to its resource id.
///
/// Resolution priority:
/// 1. Exact name match
/// 2. Case-insensitive name match (only if exactly one result)
pub fn resolve_light<'a>(directory: &'a LightsDirectory, name: &str) -> Result<&'a str, AppError> {
    if let Some(rid) = directory.get(name) {
        return Ok(rid);
    }

    let name_lower = name.to_lowercase();
    let matches: Vec<(&str, &str)> = directory
        .iter()
        .filter(|(candidate, _)| candidate.to_lowercase() == name_lower)
        .collect();

    match matches.as_slice() {
        [(_, rid)] => Ok(*rid),
        [] => Err(AppError::LightNotFound(name.to_string())),
        _ => {
            let names: Vec<&str> = matches.iter().map(|(n, _)| *n).collect();
            Err(AppError::LightNotFound(format!(
                "{} (ambiguous: {})",
                name,
                names.join(", ")
            )))
        }
    }
}
