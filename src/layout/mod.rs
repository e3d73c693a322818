pub mod rectangle;
pub mod slice_dice;

pub use rectangle::{Rectangle, ValidationError};
pub use slice_dice::{compute_rectangles, total_area, Bounds, SplitAxis};
