//! Terminal presentation: a [`Presenter`](crate::reconciler::Presenter)
//! that draws the list as colored bands, plus the pieces around it.

mod color;
mod list_view;
mod row;
mod session;

pub use color::Rgb;
pub use list_view::{FrameStats, ListViewConfig, RowFrame, TerminalList};
pub use row::{centred, truncate_to_width, ColorRow, RowContent, ROW_REUSE_TAG};
pub use session::{SessionConfig, TerminalSession};
