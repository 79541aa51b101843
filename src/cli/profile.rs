//! Profile command implementation - inspect or reset the saved profile.

use super::output::format_profile_text;
use super::{open_store, CliError, GridArgs, OutputFormat};
use hexzoe::progression::reset_profile;
use hexzoe::{Profile, ProfileStore};

/// What to do with the profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub(crate) enum ProfileAction {
    /// Print the profile.
    Show,
    /// Replace the profile with a fresh one.
    Reset,
}

/// Execute the profile command.
///
/// # Errors
///
/// Returns an error if the profile cannot be read or written.
pub(crate) fn execute(grid_args: &GridArgs, action: ProfileAction, format: OutputFormat) -> Result<(), CliError> {
    let settings = grid_args.settings()?;
    let mut store = open_store(&settings)?;

    let profile = match action {
        ProfileAction::Show => store.load()?.unwrap_or_default(),
        ProfileAction::Reset => {
            let profile = reset_profile();
            store.save(&profile)?;
            log::info!("profile at {} reset", store.path().display());
            profile
        }
    };

    print_profile(&profile, format)
}

fn print_profile(profile: &Profile, format: OutputFormat) -> Result<(), CliError> {
    match format {
        OutputFormat::Text => print!("{}", format_profile_text(profile)),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(profile)?),
    }
    Ok(())
}
