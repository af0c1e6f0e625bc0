mod header;
mod status;

pub use header::{HeaderInfo, render_header};
pub use status::{StatusView, render_status};
