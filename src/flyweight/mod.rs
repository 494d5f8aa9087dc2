//! The flyweight wire model (spec.md §4): non-owning accessor types that
//! wrap a caller-supplied byte slice and read/write fields in place,
//! never copying or allocating on the hot path.
//!
//! - [`message`] — the root flyweight, wrapping a whole encoded message.
//! - [`composite`] — a stateless sub-view over a composite's static offsets.
//! - [`group`] — the repeating-group iterator and its entry accessor.
//! - [`var_data`] — length-prefixed variable-length field encode/decode.
pub mod composite;
pub mod group;
pub mod message;
pub mod var_data;

pub use composite::{CompositeDecoder, CompositeEncoder};
pub use group::{CountWidth, GroupDecoder, GroupEncoder, GroupEntryDecoder, GroupEntryEncoder};
pub use message::{MessageDecoder, MessageEncoder};
pub use var_data::{LengthWidth, read_var_data, write_var_data};
