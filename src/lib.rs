#![no_std]

extern crate alloc;

pub mod config;
pub mod coord;
pub mod cursor;
pub mod error;
pub mod grid;
pub mod script;

pub use config::RenderConfig;
pub use coord::Coord2;
pub use cursor::GridCursor;
pub use error::{GridError, ScriptError};
pub use grid::{Cell, Grid, IntoIter, Iter, IterMut, Rendered};
pub use script::{
    count_by_script, dominant_direction, script_of, script_of_char, Direction, ScriptCount,
    ScriptDescriptor, ScriptTable, SCRIPTS,
};
