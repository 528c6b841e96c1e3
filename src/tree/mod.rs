//! In-memory model of Java sources: parsed files, declarative class
//! specs, the merge engine and project tree access.

mod class;
mod merge;
mod project;
mod source;

pub use class::*;
pub use merge::*;
pub use project::*;
pub use source::{parse_java, render_java};
