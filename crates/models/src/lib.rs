//! Record and wire types for the emulated control planes.
//!
//! Wire field translation is the serde boundary: struct fields are
//! snake_case Rust names, renamed to the external casing of each API
//! (`camelCase` for the mesh API, `PascalCase` for the transfer API) on
//! serialization and back on deserialization, recursively through nested
//! blocks. Absent optional fields stay absent in both directions.

pub mod errors;
pub mod mesh;
pub mod patch;
pub mod transfer;
