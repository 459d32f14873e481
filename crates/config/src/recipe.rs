//! Recipe selection by quality name

use crate::preset::Preset;

/// Name that requests a fully custom recipe
pub const CUSTOM_RECIPE: &str = "custom";

/// Outcome of looking up a quality name
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecipeSelection {
    Builtin(Preset),
    Custom,
    Invalid,
}

/// Lookup table, searched in order
const RECIPE_TABLE: [(&str, RecipeSelection); 6] = [
    (Preset::VeryHigh.name(), RecipeSelection::Builtin(Preset::VeryHigh)),
    (Preset::High.name(), RecipeSelection::Builtin(Preset::High)),
    (Preset::Medium.name(), RecipeSelection::Builtin(Preset::Medium)),
    (Preset::Low.name(), RecipeSelection::Builtin(Preset::Low)),
    (Preset::Quick.name(), RecipeSelection::Builtin(Preset::Quick)),
    (CUSTOM_RECIPE, RecipeSelection::Custom),
];

/// Maps a quality name to a recipe
///
/// Matching is exact and case-sensitive. A missing name is `Invalid`.
pub fn select_recipe(name: Option<&str>) -> RecipeSelection {
    let Some(name) = name else {
        return RecipeSelection::Invalid;
    };

    RECIPE_TABLE
        .iter()
        .find(|(candidate, _)| *candidate == name)
        .map_or(RecipeSelection::Invalid, |(_, selection)| *selection)
}

/// All accepted quality names, in lookup order
pub fn recipe_names() -> impl Iterator<Item = &'static str> {
    RECIPE_TABLE.iter().map(|(name, _)| *name)
}
