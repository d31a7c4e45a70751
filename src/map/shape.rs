// src/map/shape.rs
use serde::{Deserialize, Serialize};
use std::fmt;

/// Footprint keywords a zone can be rasterized with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ShapeKind {
    #[serde(rename = "square")]
    Square,
    #[serde(rename = "rectangle")]
    Rectangle,
    #[serde(rename = "L_shape")]
    LShape,
    #[serde(rename = "T_shape")]
    TShape,
    #[serde(rename = "plus")]
    Plus,
    #[serde(rename = "organic")]
    Organic,
}

impl ShapeKind {
    /// Order matters: a random pick indexes into this table.
    pub const ALL: [ShapeKind; 6] = [
        ShapeKind::Square,
        ShapeKind::Rectangle,
        ShapeKind::LShape,
        ShapeKind::TShape,
        ShapeKind::Plus,
        ShapeKind::Organic,
    ];

    pub fn keyword(self) -> &'static str {
        match self {
            ShapeKind::Square => "square",
            ShapeKind::Rectangle => "rectangle",
            ShapeKind::LShape => "L_shape",
            ShapeKind::TShape => "T_shape",
            ShapeKind::Plus => "plus",
            ShapeKind::Organic => "organic",
        }
    }

    /// Exact, case-sensitive keyword lookup.
    pub fn from_keyword(keyword: &str) -> Option<ShapeKind> {
        ShapeKind::ALL.iter().copied().find(|s| s.keyword() == keyword)
    }
}

impl fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keyword_lookup() {
        for shape in ShapeKind::ALL {
            assert_eq!(ShapeKind::from_keyword(shape.keyword()), Some(shape));
        }
        assert_eq!(ShapeKind::from_keyword("l_shape"), None);
        assert_eq!(ShapeKind::from_keyword("hexagon"), None);
    }

    #[test]
    fn test_serde_keywords() {
        assert_eq!(serde_json::to_string(&ShapeKind::LShape).unwrap(), "\"L_shape\"");
        let shape: ShapeKind = serde_json::from_str("\"organic\"").unwrap();
        assert_eq!(shape, ShapeKind::Organic);
    }
}
