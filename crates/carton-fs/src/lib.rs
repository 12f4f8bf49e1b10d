//! Filesystem primitives for the carton archiver.
//!
//! Every fallible helper returns [`Error`], which always carries the path
//! that was being touched, so callers never have to re-attach context.

mod error;
mod path;
mod permissions;
pub mod primitives;

pub use error::{Error, Result};
pub use path::{absolute, clean, exists, is_dir, is_file, metadata};
pub use permissions::{DEFAULT_DIR_MODE, DEFAULT_FILE_MODE, mode_of, permission_bits};
pub use primitives::{
    copy, create, create_dirs, create_dirs_with_mode, create_with_mode, open, read_string,
    release, remove, write_string,
};
