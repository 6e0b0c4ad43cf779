//! Fixed brick palette and nearest-color lookup.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Brick color names, in palette declaration order.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum ColorName {
    Orange,
    Green,
    #[default]
    Blue,
    Purple,
    Red,
    Yellow,
    LightBlue,
    DarkBlue,
}

/// Palette entries. Declaration order breaks distance ties.
pub const PALETTE: [(ColorName, [u8; 3]); 8] = [
    (ColorName::Orange, [255, 153, 0]),
    (ColorName::Green, [35, 47, 62]),
    (ColorName::Blue, [35, 47, 62]),
    (ColorName::Purple, [146, 43, 140]),
    (ColorName::Red, [214, 51, 132]),
    (ColorName::Yellow, [255, 204, 0]),
    (ColorName::LightBlue, [135, 206, 235]),
    (ColorName::DarkBlue, [25, 25, 112]),
];

impl ColorName {
    pub const ALL: [ColorName; 8] = [
        ColorName::Orange,
        ColorName::Green,
        ColorName::Blue,
        ColorName::Purple,
        ColorName::Red,
        ColorName::Yellow,
        ColorName::LightBlue,
        ColorName::DarkBlue,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ColorName::Orange => "orange",
            ColorName::Green => "green",
            ColorName::Blue => "blue",
            ColorName::Purple => "purple",
            ColorName::Red => "red",
            ColorName::Yellow => "yellow",
            ColorName::LightBlue => "light_blue",
            ColorName::DarkBlue => "dark_blue",
        }
    }

    /// Single-letter preview symbol.
    pub fn symbol(self) -> char {
        match self {
            ColorName::Orange => 'O',
            ColorName::Green => 'G',
            ColorName::Blue => 'B',
            ColorName::Purple => 'P',
            ColorName::Red => 'R',
            ColorName::Yellow => 'Y',
            ColorName::LightBlue => 'L',
            ColorName::DarkBlue => 'D',
        }
    }

    pub fn rgb(self) -> [u8; 3] {
        PALETTE[self as usize].1
    }
}

impl fmt::Display for ColorName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ColorName {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ColorName::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| format!("unknown color {:?}", s))
    }
}

/// Palette entry closest to `rgb` in Euclidean RGB distance.
/// The first-declared entry wins a tie.
pub fn nearest(rgb: [f64; 3]) -> ColorName {
    let mut best = PALETTE[0].0;
    let mut best_dist = f64::INFINITY;

    for &(name, color) in PALETTE.iter() {
        // squared distance orders the same as the distance itself
        let dist: f64 = rgb
            .iter()
            .zip(color.iter())
            .map(|(a, &b)| (a - b as f64).powi(2))
            .sum();
        if dist < best_dist {
            best_dist = dist;
            best = name;
        }
    }

    best
}

#[cfg(test)]
mod tests {
    use super::*;

    fn as_f64(rgb: [u8; 3]) -> [f64; 3] {
        rgb.map(|c| c as f64)
    }

    #[test]
    fn palette_order_matches_enum() {
        for (i, &(name, _)) in PALETTE.iter().enumerate() {
            assert_eq!(ColorName::ALL[i], name);
        }
    }

    #[test]
    fn exact_palette_color_maps_to_itself() {
        for name in [
            ColorName::Orange,
            ColorName::Purple,
            ColorName::Red,
            ColorName::Yellow,
            ColorName::LightBlue,
            ColorName::DarkBlue,
        ] {
            assert_eq!(nearest(as_f64(name.rgb())), name);
        }
    }

    #[test]
    fn duplicate_entry_resolves_to_first_declared() {
        // green and blue share a value
        assert_eq!(nearest(as_f64(ColorName::Blue.rgb())), ColorName::Green);
    }

    #[test]
    fn midpoint_tie_goes_to_first_declared() {
        // orange (255,153,0) and yellow (255,204,0)
        assert_eq!(nearest([255.0, 178.5, 0.0]), ColorName::Orange);
    }

    #[test]
    fn names_and_symbols() {
        assert_eq!(ColorName::LightBlue.as_str(), "light_blue");
        assert_eq!("dark_blue".parse::<ColorName>(), Ok(ColorName::DarkBlue));
        assert!("teal".parse::<ColorName>().is_err());
        let symbols: String = ColorName::ALL.iter().map(|c| c.symbol()).collect();
        assert_eq!(symbols, "OGBPRYLD");
        assert_eq!(
            serde_json::to_string(&ColorName::LightBlue).unwrap(),
            "\"light_blue\""
        );
    }
}
