pub mod writer;

pub use writer::{HEADER, SheetWriter};
