pub mod debug;
mod error;
mod lineflow;
pub mod linsolve;
pub mod model;
mod newton;
mod pfopt;
mod pfsoln;
mod printpf;
mod results;
mod runpf;
pub mod ybus;

pub use error::*;
pub use lineflow::*;
pub use newton::{newtonpf, PrintProgress, ProgressMonitor};
pub use pfopt::*;
pub use pfsoln::*;
pub use printpf::*;
pub use results::*;
pub use runpf::*;
