//! Test helpers shared across the argsmith workspace.
//!
//! - [`env`]: guarded mutation of process environment variables, such as
//!   pointing `PATH` at a directory of fake command binaries.
//! - [`scripts`]: writing executable shell scripts that stand in for
//!   `<binary>-<command>` executables.
//! - [`text`]: inspecting rendered help, including stripping terminal styling
//!   and measuring description columns.

pub mod env;
pub mod scripts;
pub mod text;
