#![forbid(unsafe_code)]

mod rendering;

pub use rendering::{disk_brush, init_tracing, load_png, save_png};
