//!
//! IPP value
//!
use std::{fmt, io};

use bytes::{Buf, BufMut, Bytes, BytesMut};
use enum_as_inner::EnumAsInner;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{charset::Charset, model::ValueTag, FromPrimitive as _};

/// IPP attribute values for the syntaxes this client decodes, as defined in
/// [RFC 8010](https://tools.ietf.org/html/rfc8010)
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Debug, PartialEq, EnumAsInner)]
pub enum IppValue {
    Integer(i32),
    Enum(i32),
    TextWithoutLanguage(String),
    Keyword(String),
    Uri(String),
    Charset(String),
    NaturalLanguage(String),
    /// A recognized but unsupported syntax. The raw bytes are kept so the
    /// attribute can still be inspected or re-emitted.
    Unsupported { tag: u8, data: Bytes },
}

impl IppValue {
    /// Convert to binary tag
    pub fn to_tag(&self) -> u8 {
        match *self {
            IppValue::Integer(_) => ValueTag::Integer as u8,
            IppValue::Enum(_) => ValueTag::Enum as u8,
            IppValue::TextWithoutLanguage(_) => ValueTag::TextWithoutLanguage as u8,
            IppValue::Keyword(_) => ValueTag::Keyword as u8,
            IppValue::Uri(_) => ValueTag::Uri as u8,
            IppValue::Charset(_) => ValueTag::Charset as u8,
            IppValue::NaturalLanguage(_) => ValueTag::NaturalLanguage as u8,
            IppValue::Unsupported { tag, .. } => tag,
        }
    }

    /// Parse value from byte array which does not include the value length field
    pub fn parse(value_tag: u8, mut data: Bytes, charset: Charset) -> io::Result<IppValue> {
        let ipp_tag = match ValueTag::from_u8(value_tag) {
            Some(tag) => tag,
            None => {
                return Ok(IppValue::Unsupported {
                    tag: value_tag,
                    data,
                });
            }
        };

        let value = match ipp_tag {
            ValueTag::Integer | ValueTag::Enum => {
                if data.remaining() != 4 {
                    return Err(io::Error::new(
                        io::ErrorKind::InvalidData,
                        format!("integer value of {} bytes", data.remaining()),
                    ));
                }
                let value = data.get_i32();
                if ipp_tag == ValueTag::Integer {
                    IppValue::Integer(value)
                } else {
                    IppValue::Enum(value)
                }
            }
            ValueTag::TextWithoutLanguage => IppValue::TextWithoutLanguage(charset.decode(&data)),
            ValueTag::Keyword => IppValue::Keyword(charset.decode(&data)),
            ValueTag::Uri => IppValue::Uri(charset.decode(&data)),
            ValueTag::Charset => IppValue::Charset(charset.decode(&data)),
            ValueTag::NaturalLanguage => IppValue::NaturalLanguage(charset.decode(&data)),
        };
        Ok(value)
    }

    /// Write value to byte array, including leading value length field, excluding value tag
    pub fn to_bytes(&self, charset: Charset) -> Bytes {
        let mut buffer = BytesMut::new();

        match *self {
            IppValue::Integer(i) | IppValue::Enum(i) => {
                buffer.put_u16(4);
                buffer.put_i32(i);
            }
            IppValue::TextWithoutLanguage(ref s)
            | IppValue::Keyword(ref s)
            | IppValue::Uri(ref s)
            | IppValue::Charset(ref s)
            | IppValue::NaturalLanguage(ref s) => {
                let encoded = charset.encode(s);
                buffer.put_u16(encoded.len() as u16);
                buffer.put_slice(&encoded);
            }
            IppValue::Unsupported { ref data, .. } => {
                buffer.put_u16(data.len() as u16);
                buffer.put_slice(data);
            }
        }
        buffer.freeze()
    }
}

/// Implement Display trait to print the value
impl fmt::Display for IppValue {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            IppValue::Integer(i) | IppValue::Enum(i) => write!(f, "{}", i),
            IppValue::TextWithoutLanguage(ref s)
            | IppValue::Keyword(ref s)
            | IppValue::Uri(ref s)
            | IppValue::Charset(ref s)
            | IppValue::NaturalLanguage(ref s) => write!(f, "{}", s),
            IppValue::Unsupported { tag, ref data } => write!(f, "{:0x}: {:?}", tag, data),
        }
    }
}
