//! `sbe-rs`: a zero-copy Simple Binary Encoding runtime.
//!
//! This crate provides the pieces a generated-code tool would otherwise
//! bake into per-schema source: the flyweight wire model ([`flyweight`])
//! that reads and writes fields in place against a caller-owned buffer,
//! the self-describing IR token stream ([`ir`]) a schema compiles down
//! to, and the On-The-Fly decoder ([`otf`]) that walks an encoded message
//! against that token stream without any compiled type for it.
//!
//! Building concrete generated types from an XML schema, and the schema
//! compiler itself, are out of scope here — this crate is the runtime
//! those generated types, or a schema-agnostic tool, would link against.
pub mod buffer;
pub mod error;
pub mod flyweight;
pub mod ir;
pub mod otf;
pub mod primitive;
