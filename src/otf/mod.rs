//! On-The-Fly (OTF) decoder (spec.md §4.5, §6.3): walks an encoded
//! message using only its IR token stream, driving a caller-supplied
//! [`Visitor`] rather than generated per-schema accessors. This is how a
//! generic tool (a message browser, a schema-agnostic gateway) can decode
//! traffic it has never seen compiled types for.
pub mod decoder;
pub mod visitor;

pub use decoder::decode_message;
pub use visitor::Visitor;
