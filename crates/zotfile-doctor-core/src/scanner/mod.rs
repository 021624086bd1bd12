pub mod walk;

pub use walk::{iter_dir, ScannedPdf};
