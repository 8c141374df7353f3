//! Fixed color palette
//!
//! Immutable shared data; every dot and target color refers to an entry here
//! by `ColorId`.

use rand::Rng;
use serde::{Deserialize, Serialize};

/// Index into `PALETTE`
///
/// Ids arriving from the host are not trusted: use `get_color_by_id` and skip
/// drawing when it returns `None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ColorId(pub u8);

/// A palette entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Color {
    pub id: ColorId,
    /// Human-readable name ("Red")
    pub name: &'static str,
    /// Style reference for the renderer (hex RGB)
    pub hex: &'static str,
}

/// Every color a dot can take
pub const PALETTE: [Color; 6] = [
    Color {
        id: ColorId(0),
        name: "Red",
        hex: "#EF4444",
    },
    Color {
        id: ColorId(1),
        name: "Blue",
        hex: "#3B82F6",
    },
    Color {
        id: ColorId(2),
        name: "Green",
        hex: "#22C55E",
    },
    Color {
        id: ColorId(3),
        name: "Yellow",
        hex: "#EAB308",
    },
    Color {
        id: ColorId(4),
        name: "Purple",
        hex: "#A855F7",
    },
    Color {
        id: ColorId(5),
        name: "Orange",
        hex: "#F97316",
    },
];

/// Look up a color; unknown ids yield `None`, never a panic
pub fn get_color_by_id(id: ColorId) -> Option<&'static Color> {
    PALETTE.get(id.0 as usize)
}

/// Uniformly random palette color
pub fn random_color<R: Rng + ?Sized>(rng: &mut R) -> ColorId {
    PALETTE[rng.random_range(0..PALETTE.len())].id
}

/// Uniformly random palette color other than `exclude`
pub fn random_color_except<R: Rng + ?Sized>(rng: &mut R, exclude: ColorId) -> ColorId {
    // Draw from the n-1 others, then shift past the excluded slot
    let pick = rng.random_range(0..PALETTE.len() - 1) as u8;
    if pick >= exclude.0 {
        ColorId(pick + 1)
    } else {
        ColorId(pick)
    }
}
