pub mod axis;
pub mod relayout_patch;
pub mod types;

pub use axis::AxisRange;
pub use relayout_patch::RelayoutPatch;
pub use types::{ChartId, HoverPoint, SeriesId};
