//! The four mini-games
//!
//! Each game owns its entities, spawner and round, and is driven through the
//! [`MiniGame`](crate::sim::MiniGame) reducer.

pub mod bubble_pop;
pub mod color_match;
pub mod number_catch;
pub mod shape_sorter;

pub use bubble_pop::{BubblePop, BubblePopConfig};
pub use color_match::{Card, ColorMatch, ColorMatchConfig};
pub use number_catch::{Number, NumberCatch, NumberCatchConfig};
pub use shape_sorter::{ShapeSorter, ShapeSorterConfig};
