//! Entity attributes drawn from small fixed sets

use serde::{Deserialize, Serialize};

/// Kid-friendly palette
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Color {
    Red,
    Pink,
    Blue,
    Yellow,
    Green,
    Purple,
    Orange,
}

/// Bubble and falling-number colors
pub const BUBBLE_COLORS: [Color; 6] = [
    Color::Pink,
    Color::Blue,
    Color::Yellow,
    Color::Green,
    Color::Purple,
    Color::Orange,
];

/// Colors used by the color-match grid
pub const MATCH_COLORS: [Color; 6] = [
    Color::Red,
    Color::Blue,
    Color::Yellow,
    Color::Green,
    Color::Purple,
    Color::Orange,
];

impl Color {
    pub fn hex(&self) -> &'static str {
        match self {
            Color::Red => "#FF6B6B",
            Color::Pink => "#FF6B9D",
            Color::Blue => "#4ECDC4",
            Color::Yellow => "#FFE66D",
            Color::Green => "#7ED957",
            Color::Purple => "#A28BFE",
            Color::Orange => "#FF9F43",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Color::Red => "Red",
            Color::Pink => "Pink",
            Color::Blue => "Blue",
            Color::Yellow => "Yellow",
            Color::Green => "Green",
            Color::Purple => "Purple",
            Color::Orange => "Orange",
        }
    }
}

/// Conveyor shapes (one bin each)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Shape {
    Circle,
    Square,
    Triangle,
}

impl Shape {
    pub const ALL: [Shape; 3] = [Shape::Circle, Shape::Square, Shape::Triangle];

    pub fn color(&self) -> Color {
        match self {
            Shape::Circle => Color::Pink,
            Shape::Square => Color::Blue,
            Shape::Triangle => Color::Yellow,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Shape::Circle => "Circle",
            Shape::Square => "Square",
            Shape::Triangle => "Triangle",
        }
    }
}

/// Decorative objects shown on color-match cards
pub const OBJECTS: [&str; 12] = [
    "🍎", "🚗", "🌟", "🎈", "🐸", "🌸", "🏀", "🍌", "🐱", "🌈", "🎁", "🦋",
];

/// Renderable attribute of an entity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum Attr {
    Bubble { color: Color },
    Card { color: Color, object: &'static str },
    Number { value: u8, color: Color },
    Shape { shape: Shape },
}
