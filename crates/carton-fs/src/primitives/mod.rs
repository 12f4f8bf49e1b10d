pub mod copy;
pub mod dir;
pub mod rw;

pub use copy::copy;
pub use dir::{create_dirs, create_dirs_with_mode, remove};
pub use rw::{create, create_with_mode, open, read_string, release, write_string};
