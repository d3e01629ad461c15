//! Named color catalogs and the built-in set shipped with the crate.

use crate::color::{Color, ParseColorError};

pub const BASE: &str = "base";
pub const PASTELS: &str = "pastels";

/// Catalog selected when nothing else is requested.
pub const DEFAULT_CATALOG: &str = PASTELS;

const BASE_COLORS: [Color; 14] = [
    Color::new(14, 23, 53),
    Color::new(22, 33, 64),
    Color::new(25, 24, 63),
    Color::new(37, 26, 75),
    Color::new(50, 35, 83),
    Color::new(42, 21, 73),
    Color::new(84, 11, 69),
    Color::new(70, 4, 63),
    Color::new(204, 3, 56),
    Color::new(209, 23, 32),
    Color::new(211, 21, 47),
    Color::new(232, 12, 63),
    Color::new(340, 14, 38),
    Color::new(330, 17, 46),
];

const PASTEL_COLORS: [Color; 10] = [
    Color::new(140, 37, 75),
    Color::new(165, 31, 80),
    Color::new(44, 84, 83),
    Color::new(26, 56, 77),
    Color::new(0, 35, 74),
    Color::new(221, 24, 76),
    Color::new(156, 21, 79),
    Color::new(30, 36, 83),
    Color::new(27, 60, 89),
    Color::new(187, 25, 89),
];

pub const PRIMARY_GREEN: Color = Color::new(140, 37, 75);
pub const PRIMARY_YELLOW: Color = Color::new(44, 84, 83);
pub const PRIMARY_RED: Color = Color::new(0, 35, 74);
pub const PRIMARY_GREY: Color = Color::new(0, 0, 87);
pub const MODEL_RED: Color = Color::new(0, 40, 60);
pub const MODEL_GREEN: Color = Color::new(100, 40, 60);
pub const MODEL_YELLOW: Color = Color::new(60, 40, 60);

/// Accent colors addressed by name rather than by catalog position.
pub const NAMED_COLORS: [(&str, Color); 7] = [
    ("primary-green", PRIMARY_GREEN),
    ("primary-yellow", PRIMARY_YELLOW),
    ("primary-red", PRIMARY_RED),
    ("primary-grey", PRIMARY_GREY),
    ("model-red", MODEL_RED),
    ("model-green", MODEL_GREEN),
    ("model-yellow", MODEL_YELLOW),
];

/// Looks up one of [`NAMED_COLORS`], ignoring ASCII case.
pub fn named_color(name: &str) -> Option<Color> {
    NAMED_COLORS
        .iter()
        .find(|(candidate, _)| candidate.eq_ignore_ascii_case(name))
        .map(|(_, color)| *color)
}

#[derive(Debug, thiserror::Error, Clone, PartialEq, Eq)]
pub enum CatalogError {
    #[error("catalog {name:?} has no colors")]
    EmptyCatalog { name: String },
    #[error("catalog {name:?} does not exist")]
    UnknownCatalog { name: String },
    #[error("catalog {catalog:?} entry {index} repeats {color}")]
    DuplicateColor {
        catalog: String,
        index: usize,
        color: Color,
    },
    #[error("catalog {catalog:?} entry {index}: {source}")]
    InvalidColor {
        catalog: String,
        index: usize,
        #[source]
        source: ParseColorError,
    },
}

/// An ordered, non-empty list of distinct colors. Order decides both round-robin
/// order and tie-breaks during distinct selection.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Catalog {
    name: String,
    colors: Vec<Color>,
}

impl Catalog {
    pub fn new(name: impl Into<String>, colors: Vec<Color>) -> Result<Self, CatalogError> {
        let name = name.into();
        if colors.is_empty() {
            return Err(CatalogError::EmptyCatalog { name });
        }
        if let Some(index) = (1..colors.len()).find(|&i| colors[..i].contains(&colors[i])) {
            return Err(CatalogError::DuplicateColor {
                catalog: name,
                index,
                color: colors[index],
            });
        }
        Ok(Self { name, colors })
    }

    /// Parses every entry as an `hsl(...)` string, reporting the first bad
    /// index.
    pub fn parse<S: AsRef<str>>(name: impl Into<String>, entries: &[S]) -> Result<Self, CatalogError> {
        let name = name.into();
        let colors = entries
            .iter()
            .enumerate()
            .map(|(index, entry)| {
                entry
                    .as_ref()
                    .parse::<Color>()
                    .map_err(|source| CatalogError::InvalidColor {
                        catalog: name.clone(),
                        index,
                        source,
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Self::new(name, colors)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn colors(&self) -> &[Color] {
        &self.colors
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    /// Always `false`; empty catalogs are rejected at construction.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// Color at `index` wrapped around the catalog length.
    #[inline]
    pub fn color_at(&self, index: usize) -> Color {
        self.colors[index % self.colors.len()]
    }
}

/// The catalogs every [`crate::PaletteManager`] starts with.
pub fn builtin_catalogs() -> Vec<Catalog> {
    vec![
        Catalog {
            name: BASE.to_string(),
            colors: BASE_COLORS.to_vec(),
        },
        Catalog {
            name: PASTELS.to_string(),
            colors: PASTEL_COLORS.to_vec(),
        },
    ]
}
