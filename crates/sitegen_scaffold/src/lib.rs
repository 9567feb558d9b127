//! Barrel-file scaffolding for screenshot assets
//!
//! Every directory under the asset root gets an index module that imports
//! each of its files and exports them as one object keyed by file name, so
//! site code can write `shots.picker` instead of an import per image.
//!
//! Output is sorted and deterministic: running the generator twice produces
//! byte-identical files, and unchanged barrels are not rewritten.

pub mod barrel;
mod error;
pub mod generator;

pub use barrel::{binding_for, module_name, Barrel, BarrelEntry};
pub use error::{Result, ScaffoldError};
pub use generator::{ScaffoldGenerator, ScaffoldReport, DEFAULT_INDEX_NAME};
