//! Turns a resampler block into a resolved profile

use crate::block::ResamplerBlock;
use crate::error::{ConfigResult, RecipeError, RecipeResult};
use crate::profile::ResolvedProfile;
use crate::recipe::{select_recipe, RecipeSelection, CUSTOM_RECIPE};
use crate::validator::resolve_custom;
use std::path::Path;

/// Resolves a block into a profile
///
/// Built-in recipes never look at the numeric keys. Custom recipes validate
/// every key and fail on the first invalid one. The function has no hidden
/// state: the same block always yields the same profile.
pub fn resolve(block: &ResamplerBlock) -> RecipeResult<ResolvedProfile> {
    let name = block.quality.as_ref().map(|s| s.value.as_str());

    let resolved = match select_recipe(name) {
        RecipeSelection::Builtin(preset) => {
            ResolvedProfile::new(preset.name(), preset.profile(), None)
        }
        RecipeSelection::Custom => {
            let (quality, scaling) = resolve_custom(block)?;
            ResolvedProfile::new(CUSTOM_RECIPE, quality, scaling)
        }
        RecipeSelection::Invalid => {
            return Err(RecipeError::UnknownRecipe {
                value: name.unwrap_or("(missing)").to_string(),
                location: block.location_of(&block.quality),
            });
        }
    };

    log::info!(target: "soxr", "soxr converter '{}'", resolved.recipe());
    Ok(resolved)
}

/// Parses TOML text and resolves its `[resampler]` block
pub fn resolve_str(text: &str) -> ConfigResult<ResolvedProfile> {
    resolve_toml(text, None)
}

/// Like [`resolve_str`], annotating locations with the file the text came from
pub fn resolve_toml(text: &str, path: Option<&Path>) -> ConfigResult<ResolvedProfile> {
    let block = ResamplerBlock::from_toml(text, path)?;
    Ok(resolve(&block)?)
}
