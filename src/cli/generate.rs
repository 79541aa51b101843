//! Generate command implementation - print a level map.

use super::output::{format_map_text, JsonMap};
use super::{resolve_seed, CliError, GridArgs, OutputFormat};
use hexzoe::Grid;

/// Execute the generate command.
///
/// # Errors
///
/// Returns an error if the settings are invalid or output fails.
pub(crate) fn execute(grid_args: &GridArgs, found_zoe: bool, format: OutputFormat) -> Result<(), CliError> {
    let settings = grid_args.settings()?;
    let seed = resolve_seed(settings.seed);
    let grid = Grid::generate_seeded(settings.grid, found_zoe, seed);

    log::debug!("generated {} map from seed {seed}", settings.grid);

    match format {
        OutputFormat::Text => print!("{}", format_map_text(&grid, seed)),
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&JsonMap::from_grid(&grid, seed))?;
            println!("{json}");
        }
    }

    Ok(())
}
