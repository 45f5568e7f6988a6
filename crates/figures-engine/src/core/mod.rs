//! Contract between the runtime (platform loop) and the figure programs.

mod app;
mod ctx;

pub use app::{App, AppControl};
pub use ctx::{FrameCtx, WindowCtx};
