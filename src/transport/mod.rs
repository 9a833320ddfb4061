/// Filesystem discovery of release files.
pub mod fs;
