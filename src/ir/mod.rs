//! Intermediate Representation (spec.md §3): a self-describing, ordered
//! [`Token`](token::Token) stream that lets the [`crate::otf`] decoder walk
//! an encoded message without any compiled, schema-specific code.
pub mod codec;
pub mod header;
pub mod token;

pub use codec::IrCodec;
pub use header::{HeaderEncoder, HeaderView};
pub use token::{Encoding, Signal, Token};
