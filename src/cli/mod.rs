//! Command-line driver: thin collaborator over the library's
//! compress/decompress entry points.

pub mod args;
pub mod constants;
