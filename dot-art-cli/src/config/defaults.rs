//! All setting definitions with their default values.

use std::collections::HashMap;
use std::sync::LazyLock;

type DefTuple = (&'static str, &'static str, &'static str);

const DEFS: &[DefTuple] = &[
    ("DOT_ART_PIXEL_SIZE_MM", "10", "Physical edge length of one dot cell in millimeters"),
    ("DOT_ART_GRID_SIZE", "32", "Maximum dots per side of the grid (0 = source size)"),
    ("DOT_ART_TOTAL_BANDS", "16", "Number of brightness bands dots are snapped to"),
    ("DOT_ART_DOT_SIZE_MULTIPLIER", "1.3", "Scale applied to every dot"),
    ("DOT_ART_DOT_STYLE", "round", "round, square, triangle, triangle-alt or ring"),
    (
        "DOT_ART_COLOR_SCHEME",
        "black-on-white",
        "black-on-white, grey-on-white, white-on-black or random-on-white",
    ),
    (
        "DOT_ART_MAX_SOURCE_SIZE",
        "1000",
        "Source images are shrunk to fit this many pixels per side",
    ),
    ("DOT_ART_STAMP_ROTATION", "true", "Rotate stamp images by a random angle per dot"),
];

/// A single setting definition.
#[derive(Debug, Clone)]
pub struct SettingDef {
    pub key: &'static str,
    pub default: &'static str,
    pub description: &'static str,
}

/// Global setting definitions indexed by key.
pub static DEFAULT_SETTINGS: LazyLock<HashMap<&'static str, SettingDef>> = LazyLock::new(|| {
    DEFS.iter()
        .map(|&(key, default, description)| {
            (
                key,
                SettingDef {
                    key,
                    default,
                    description,
                },
            )
        })
        .collect()
});

/// Get the default value for a setting key, or `None` if not defined.
pub fn get_default(key: &str) -> Option<&'static str> {
    DEFAULT_SETTINGS.get(key).map(|d| d.default)
}

/// Setting keys in declaration order.
pub fn keys() -> impl Iterator<Item = &'static str> {
    DEFS.iter().map(|&(key, _, _)| key)
}
