//! I/O for the external inversion tool's file formats.
//!
//! Currently one writer: the gzipped-tar `.param` model-parameterization
//! archive consumed by Geopsy/dinver (see [`write_param_file`]).

mod param_file;

pub use param_file::{write_param_file, ParamFileError, SchemaVersion, CONTENTS_NAME};
