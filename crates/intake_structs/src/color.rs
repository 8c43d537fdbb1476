use crate::Choice;

/// Coat color grouped by number of colors.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    strum::Display,
    strum::EnumIter,
    clap::ValueEnum,
)]
pub enum ColorGroup {
    #[default]
    #[strum(to_string = "Un solo color (Monocolor)")]
    Monocolor,
    #[strum(to_string = "Dos colores (Bicolor)")]
    Bicolor,
    #[strum(to_string = "Tres colores (Tricolor)")]
    Tricolor,
}

impl Choice for ColorGroup {
    fn model_token(self) -> &'static str {
        match self {
            Self::Monocolor => "Monocolor",
            Self::Bicolor => "Bicolor",
            Self::Tricolor => "Tricolor",
        }
    }
}

/// A single coat color, offered as a multi-select.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display, strum::EnumIter, clap::ValueEnum,
)]
pub enum CoatColor {
    #[strum(to_string = "Negro")]
    Black,
    #[strum(to_string = "Blanco")]
    White,
    #[strum(to_string = "Marrón")]
    Brown,
    #[strum(to_string = "Canela")]
    Tan,
    #[strum(to_string = "Gris")]
    Gray,
    #[strum(to_string = "Naranja")]
    Orange,
    #[strum(to_string = "Crema")]
    Cream,
    #[strum(to_string = "Atigrado")]
    Tabby,
    #[strum(to_string = "Barcino")]
    Brindle,
    #[strum(to_string = "Tricolor")]
    Tricolor,
}

impl Choice for CoatColor {
    fn model_token(self) -> &'static str {
        match self {
            Self::Black => "Black",
            Self::White => "White",
            Self::Brown => "Brown",
            Self::Tan => "Tan",
            Self::Gray => "Gray",
            Self::Orange => "Orange",
            Self::Cream => "Cream",
            Self::Tabby => "Tabby",
            Self::Brindle => "Brindle",
            Self::Tricolor => "Tricolor",
        }
    }
}

/// Joins a multi-select of colors into the free-form token the
/// extended model expects, keeping selection order (`Black/White`).
#[must_use]
pub fn join_colors(colors: &[CoatColor]) -> String {
    colors
        .iter()
        .map(|c| c.model_token())
        .collect::<Vec<_>>()
        .join("/")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_join_colors() {
        assert_eq!(join_colors(&[CoatColor::Black, CoatColor::White]), "Black/White");
        assert_eq!(join_colors(&[CoatColor::Tabby]), "Tabby");
        assert_eq!(join_colors(&[]), "");
    }
}
