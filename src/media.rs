//! Media validation: is a discovered file something we should queue?
//!
//! Remote locations are always accepted. Local files pass on a known
//! extension; otherwise the injected `DecodeProbe` decides.

mod probe;
mod validator;

pub use probe::{DecodeProbe, LoftyProbe};
pub use validator::{DEFAULT_EXTENSIONS, MediaValidator};
