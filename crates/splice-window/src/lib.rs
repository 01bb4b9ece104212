//! Series alignment and boundary windows
//!
//! Given two station series that may be one relocated record, this crate:
//!
//! 1. orders them by end date and truncates the later one at the splice
//!    boundary ([`SeriesAligner`])
//! 2. takes a fixed-length window on each side of the boundary and reduces
//!    it to annual means ([`extract_window`], [`BoundaryWindows`])

mod align;
mod window;

pub use align::{order_by_end, AlignedPair, EndOrdering, SeriesAligner};
pub use window::{extract_window, window_range, BoundaryWindows, Window, WindowEnd};
