//! The IR [`Token`] model (spec.md §3.10): one entry per structural
//! boundary or leaf encoding in a schema, carrying enough attributes for
//! the OTF decoder to reproduce the generated decoder's behaviour without
//! ever seeing the generated code.
use crate::error::EnumError;
use crate::primitive::{ByteOrder, Presence, PrimitiveType, PrimitiveValue};

/// Structural role of a token in the stream (mirrors the original tool's
/// `Signal` enum). Every structural construct brackets its contents with
/// a `BEGIN_*`/`END_*` pair; `VALID_VALUE`, `CHOICE` and `ENCODING` are
/// leaves that never nest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Signal {
    BeginMessage,
    EndMessage,
    BeginComposite,
    EndComposite,
    BeginField,
    EndField,
    BeginGroup,
    EndGroup,
    BeginVarData,
    EndVarData,
    BeginEnum,
    EndEnum,
    BeginSet,
    EndSet,
    /// One named value of an `ENUM`.
    ValidValue,
    /// One named bit of a `SET`.
    Choice,
    /// A leaf scalar encoding (a composite's member, or an enum/set's
    /// underlying primitive).
    Encoding,
}

impl Signal {
    pub const fn is_begin(self) -> bool {
        matches!(
            self,
            Signal::BeginMessage
                | Signal::BeginComposite
                | Signal::BeginField
                | Signal::BeginGroup
                | Signal::BeginVarData
                | Signal::BeginEnum
                | Signal::BeginSet
        )
    }

    pub const fn is_end(self) -> bool {
        matches!(
            self,
            Signal::EndMessage
                | Signal::EndComposite
                | Signal::EndField
                | Signal::EndGroup
                | Signal::EndVarData
                | Signal::EndEnum
                | Signal::EndSet
        )
    }
}

/// The scalar attributes of a token: its primitive type, presence, byte
/// order, and the typed `min`/`max`/`null`/`const`/`lsb`/`msb` values
/// (spec.md §3.2, §4.1). `lsb`/`msb` are only meaningful for `CHOICE`
/// tokens describing a bit-range within a `SET`'s underlying encoding.
#[derive(Debug, Clone, PartialEq)]
pub struct Encoding {
    pub primitive_type: PrimitiveType,
    pub presence: Presence,
    pub byte_order: ByteOrder,
    pub min_value: PrimitiveValue,
    pub max_value: PrimitiveValue,
    pub null_value: PrimitiveValue,
    pub const_value: PrimitiveValue,
    pub lsb_value: PrimitiveValue,
    pub msb_value: PrimitiveValue,
    pub character_encoding: String,
    pub epoch: String,
    pub time_unit: String,
    pub semantic_type: String,
}

impl Encoding {
    /// Extract a single-bit `CHOICE`'s position out of `const_value`, or a
    /// genuine `[lsb, msb]` range, as bit bounds for [`crate::primitive::get_bits`].
    /// `is_choice` tells the caller which case applies — derived from the
    /// owning [`Token`]'s [`Signal`], not from `const_value` (see
    /// [`Token::is_choice`]).
    fn bit_bounds(&self, is_choice: bool) -> (u32, u32) {
        if is_choice {
            let bit = self.const_value.as_int() as u32;
            (bit, bit)
        } else {
            (self.lsb_value.as_int() as u32, self.msb_value.as_int() as u32)
        }
    }
}

/// One entry of the IR token stream.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    /// Byte offset within the enclosing block, or -1 when not statically
    /// positioned (e.g. a `GROUP`'s dimension composite is itself at a
    /// fixed offset, but the group's repeating entries are not).
    pub offset: i32,
    /// Field/message/group id (`fieldId` in the schema).
    pub id: i32,
    /// Schema version this token was introduced in.
    pub version: i32,
    /// Size in bytes of the entity this token describes.
    pub size: i32,
    /// Number of tokens between this `BEGIN_*` and its matching `END_*`,
    /// inclusive of both brackets — lets a reader skip an entire
    /// construct without interpreting its contents.
    pub component_token_count: i32,
    /// Declared array length for a fixed-size array field, or 1.
    pub array_capacity: i32,
    pub signal: Signal,
    pub name: String,
    pub description: String,
    /// For a `GROUP`/`VAR_DATA`/enum-or-set reference, the name of the
    /// type it refers to (ref-by-name composites/enums/sets).
    pub referenced_name: String,
    pub encoding: Encoding,
}

impl Token {
    /// Whether this token's entity was present on the wire for a decode
    /// with the given `acting_version` (spec.md §4.7): tokens introduced
    /// after the acting version never were.
    pub fn is_present_for_version(&self, acting_version: u16) -> bool {
        self.version as i64 <= acting_version as i64
    }

    /// Whether this token is a single-bit `CHOICE` (as opposed to an
    /// `ENCODING` carrying a genuine `[lsb, msb]` range). Derived from the
    /// token's own `signal`, per spec.md §9.2's REDESIGN FLAGS: the
    /// original tool instead compares `constValue` against the `UINT8`
    /// null sentinel, which misfires for choices on wider encodings.
    pub fn is_choice(&self) -> bool {
        matches!(self.signal, Signal::Choice)
    }

    /// Extract this token's bit range out of an already-decoded `u64`
    /// host value (spec.md §4.1).
    pub fn get_bits(&self, encoded: u64) -> u64 {
        let (lsb, msb) = self.encoding.bit_bounds(self.is_choice());
        crate::primitive::get_bits(encoded, lsb, msb)
    }

    /// Checks a decoded enum's underlying raw value against this enum
    /// token's `VALID_VALUE` children, returning [`EnumError`] when `raw`
    /// matches none of them (spec.md §3.8 "decoding an unrecognised value
    /// is an error", §7 `UNKNOWN_ENUM_VALUE`).
    pub fn validate_enum_value(&self, raw: u64, valid_values: &[Token]) -> Result<(), EnumError> {
        if valid_values.iter().any(|v| v.encoding.const_value.as_uint() == raw) {
            Ok(())
        } else {
            Err(EnumError {
                value: raw as i64,
                primitive_type: self.encoding.primitive_type,
            })
        }
    }
}
