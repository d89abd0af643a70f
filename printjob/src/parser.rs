//!
//! IPP stream parser
//!
use std::io::{self, Read};

use bytes::Bytes;
use log::{trace, warn};

use crate::{
    attribute::{IppAttribute, IppAttributeGroup, IppAttributes},
    charset::Charset,
    model::{DelimiterTag, ValueTag},
    reader::IppReader,
    request::IppRequestResponse,
    value::IppValue,
    FromPrimitive as _, IppHeader,
};

/// Parse error enum
#[derive(Debug, thiserror::Error)]
pub enum IppParseError {
    /// The stream ended before a required field or before the
    /// end-of-attributes delimiter was seen
    #[error("truncated IPP message")]
    Truncated,

    /// Integer or enum value whose declared length is not four bytes
    #[error("invalid length {len} for value tag {tag:#04x}")]
    InvalidValueLength { tag: u8, len: usize },

    /// Value tag outside the supported set, reported only under
    /// [`UnknownTagPolicy::Fail`]
    #[error("unsupported value tag {0:#04x}")]
    UnsupportedValueTag(u8),

    #[error(transparent)]
    IoError(#[from] io::Error),
}

impl IppParseError {
    fn from_io(err: io::Error) -> Self {
        if err.kind() == io::ErrorKind::UnexpectedEof {
            IppParseError::Truncated
        } else {
            IppParseError::IoError(err)
        }
    }
}

/// Handling of value tags outside the supported set
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub enum UnknownTagPolicy {
    /// Consume the value bytes and record the attribute as
    /// [`IppValue::Unsupported`], then continue with the next attribute
    #[default]
    SkipAndMark,
    /// Abort the parse
    Fail,
}

struct ParserState {
    current_group: Option<IppAttributeGroup>,
    attributes: IppAttributes,
    charset: Charset,
}

impl ParserState {
    fn new() -> Self {
        ParserState {
            current_group: None,
            attributes: IppAttributes::new(),
            // baseline until the response declares its own charset
            charset: Charset::UsAscii,
        }
    }

    fn end_group(&mut self) {
        if let Some(group) = self.current_group.take() {
            self.attributes.groups_mut().push(group);
        }
    }

    fn begin_group(&mut self, tag: u8) {
        trace!("Delimiter tag: {tag:0x}");
        self.end_group();
        self.current_group = Some(IppAttributeGroup::new(tag));
    }

    fn add_value(
        &mut self,
        tag: u8,
        name: String,
        value: Bytes,
        policy: UnknownTagPolicy,
    ) -> Result<(), IppParseError> {
        match ValueTag::from_u8(tag) {
            None => {
                if policy == UnknownTagPolicy::Fail {
                    return Err(IppParseError::UnsupportedValueTag(tag));
                }
            }
            Some(ValueTag::Integer) | Some(ValueTag::Enum) => {
                if value.len() != 4 {
                    return Err(IppParseError::InvalidValueLength { tag, len: value.len() });
                }
            }
            _ => {}
        }

        let ipp_value = IppValue::parse(tag, value, self.charset)?;

        trace!("Value tag: {tag:0x}: {name}: {ipp_value}");

        // switch the decode charset once the response declares its own
        if name == IppAttribute::ATTRIBUTES_CHARSET {
            if let Some(declared) = ipp_value.as_charset() {
                match declared.parse::<Charset>() {
                    Ok(charset) => self.charset = charset,
                    Err(_) => warn!("Undecodable attributes-charset: {declared}"),
                }
            }
        }

        if let Some(ref mut group) = self.current_group {
            group.attributes_mut().push(IppAttribute::new(name, ipp_value));
        } else {
            warn!("Value tag {tag:0x} before any delimiter, ignoring");
        }
        Ok(())
    }
}

/// IPP parser. Reads the header and the attribute section of an IPP message
/// and leaves the remaining stream untouched as the payload.
pub struct IppParser<R> {
    reader: IppReader<R>,
    state: ParserState,
    unknown_tags: UnknownTagPolicy,
}

impl<R> IppParser<R>
where
    R: 'static + Read + Send + Sync,
{
    /// Create IPP parser from IppReader
    pub fn new<T>(reader: T) -> IppParser<R>
    where
        T: Into<IppReader<R>>,
    {
        IppParser {
            reader: reader.into(),
            state: ParserState::new(),
            unknown_tags: UnknownTagPolicy::default(),
        }
    }

    /// Set the handling of value tags outside the supported set
    pub fn unknown_tag_policy(mut self, policy: UnknownTagPolicy) -> Self {
        self.unknown_tags = policy;
        self
    }

    fn parse_value(&mut self, tag: u8) -> Result<(), IppParseError> {
        let name = self.reader.read_name().map_err(IppParseError::from_io)?;
        let value = self.reader.read_value().map_err(IppParseError::from_io)?;

        self.state.add_value(tag, name, value, self.unknown_tags)
    }

    fn parse_header_attributes(&mut self) -> Result<IppHeader, IppParseError> {
        let header = self.reader.read_header().map_err(IppParseError::from_io)?;
        trace!("IPP header: {header:?}");

        loop {
            let tag = self.reader.read_tag().map_err(IppParseError::from_io)?;
            if tag < 0x10 {
                if tag == DelimiterTag::EndOfAttributes as u8 {
                    self.state.end_group();
                    break;
                }
                self.state.begin_group(tag);
            } else {
                self.parse_value(tag)?;
            }
        }

        Ok(header)
    }

    /// Parse IPP stream without reading beyond the end of the attributes. The payload stays untouched.
    pub fn parse_parts(mut self) -> Result<(IppHeader, IppAttributes, IppReader<R>), IppParseError> {
        let header = self.parse_header_attributes()?;
        Ok((header, self.state.attributes, self.reader))
    }

    /// Parse IPP stream
    pub fn parse(mut self) -> Result<IppRequestResponse, IppParseError> {
        let header = self.parse_header_attributes()?;

        Ok(IppRequestResponse {
            header,
            attributes: self.state.attributes,
            payload: self.reader.into_payload(),
            charset: self.state.charset,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(data: Vec<u8>) -> Result<IppRequestResponse, IppParseError> {
        IppParser::new(IppReader::new(io::Cursor::new(data))).parse()
    }

    #[test]
    fn test_parse_no_attributes() {
        let res = parse(vec![1, 1, 0, 0, 0, 0, 0, 0, 3]).unwrap();
        assert!(res.attributes().groups().is_empty());
    }

    #[test]
    fn test_parse_single_value() {
        let res = parse(vec![
            1, 1, 0, 0, 0, 0, 0, 0, 2, 0x21, 0x00, 0x04, b't', b'e', b's', b't', 0x00, 0x04, 0x12, 0x34, 0x56, 0x78, 3,
        ])
        .unwrap();

        let group = res.attributes().groups_of(DelimiterTag::JobAttributes).next().unwrap();
        let attr = group.get("test").unwrap();
        assert_eq!(attr.value().as_integer(), Some(&0x1234_5678));
    }

    #[test]
    fn test_parse_job_state_scenario() {
        // group 0x01, integer attribute "job-state" = 3, end tag
        let data = vec![
            0x01, 0x01, 0x00, 0x00, 0x00, 0x00, 0x00, 0x01, 0x01, 0x21, 0x00, 0x09, b'j', b'o', b'b', b'-', b's',
            b't', b'a', b't', b'e', 0x00, 0x04, 0x00, 0x00, 0x00, 0x03, 0x03,
        ];
        let res = parse(data).unwrap();

        assert_eq!(res.header().operation_or_status, 0x0000);
        assert!(res.header().status_code().is_success());
        assert_eq!(res.attributes().groups().len(), 1);

        let group = res
            .attributes()
            .groups_of(DelimiterTag::OperationAttributes)
            .next()
            .unwrap();
        assert_eq!(group.attributes().len(), 1);

        let attr = group.get("job-state").unwrap();
        assert_eq!(attr.value().to_tag(), 0x21);
        assert_eq!(attr.value().as_integer(), Some(&3));
    }

    #[test]
    fn test_parse_missing_end_tag() {
        // no 0x03 before end of input
        let result = parse(vec![
            1, 1, 0, 0, 0, 0, 0, 0, 2, 0x21, 0x00, 0x04, b't', b'e', b's', b't', 0x00, 0x04, 0x12, 0x34, 0x56, 0x78,
        ]);
        assert!(matches!(result, Err(IppParseError::Truncated)));
    }

    #[test]
    fn test_parse_truncated_header() {
        let result = parse(vec![1, 1, 0, 0]);
        assert!(matches!(result, Err(IppParseError::Truncated)));
    }

    #[test]
    fn test_parse_truncated_value() {
        let result = parse(vec![
            1, 1, 0, 0, 0, 0, 0, 0, 2, 0x21, 0x00, 0x04, b't', b'e', b's', b't', 0x00, 0x04, 0x12,
        ]);
        assert!(matches!(result, Err(IppParseError::Truncated)));
    }

    #[test]
    fn test_unknown_tag_is_skipped_and_marked() {
        // 0x4a is outside the supported set; the following attribute must
        // still decode from the correct stream position
        let res = parse(vec![
            1, 1, 0, 0, 0, 0, 0, 0, 2, 0x4a, 0x00, 0x03, b'f', b'o', b'o', 0x00, 0x02, 0xab, 0xcd, 0x21, 0x00, 0x04,
            b't', b'e', b's', b't', 0x00, 0x04, 0x12, 0x34, 0x56, 0x78, 3,
        ])
        .unwrap();

        let group = res.attributes().groups_of(DelimiterTag::JobAttributes).next().unwrap();
        assert_eq!(group.attributes().len(), 2);

        let marked = group.get("foo").unwrap();
        assert_eq!(
            marked.value(),
            &IppValue::Unsupported {
                tag: 0x4a,
                data: Bytes::from_static(&[0xab, 0xcd])
            }
        );

        let attr = group.get("test").unwrap();
        assert_eq!(attr.value().as_integer(), Some(&0x1234_5678));
    }

    #[test]
    fn test_unknown_tag_policy_fail() {
        let data = vec![
            1, 1, 0, 0, 0, 0, 0, 0, 2, 0x4a, 0x00, 0x03, b'f', b'o', b'o', 0x00, 0x02, 0xab, 0xcd, 3,
        ];
        let result = IppParser::new(IppReader::new(io::Cursor::new(data)))
            .unknown_tag_policy(UnknownTagPolicy::Fail)
            .parse();
        assert!(matches!(result, Err(IppParseError::UnsupportedValueTag(0x4a))));
    }

    #[test]
    fn test_invalid_integer_length() {
        let result = parse(vec![
            1, 1, 0, 0, 0, 0, 0, 0, 2, 0x21, 0x00, 0x04, b't', b'e', b's', b't', 0x00, 0x02, 0x00, 0x03, 3,
        ]);
        assert!(matches!(
            result,
            Err(IppParseError::InvalidValueLength { tag: 0x21, len: 2 })
        ));
    }

    #[test]
    fn test_declared_charset_switches_decoding() {
        let mut data = vec![1, 1, 0, 0, 0, 0, 0, 0, 1];
        // attributes-charset = utf-8
        data.push(0x47);
        data.extend_from_slice(&[0x00, 0x12]);
        data.extend_from_slice(b"attributes-charset");
        data.extend_from_slice(&[0x00, 0x05]);
        data.extend_from_slice(b"utf-8");
        // text attribute with utf-8 bytes
        let message = "Grüße".as_bytes();
        data.push(0x41);
        data.extend_from_slice(&[0x00, 0x04]);
        data.extend_from_slice(b"info");
        data.extend_from_slice(&(message.len() as u16).to_be_bytes());
        data.extend_from_slice(message);
        data.push(3);

        let res = parse(data).unwrap();
        let group = res
            .attributes()
            .groups_of(DelimiterTag::OperationAttributes)
            .next()
            .unwrap();
        assert_eq!(
            group.get("info").unwrap().value().as_text_without_language(),
            Some(&"Grüße".to_owned())
        );
    }

    #[test]
    fn test_empty_name_recorded_as_is() {
        // a zero-length name continues a multi-value set; this client keeps
        // it as a separate attribute with an empty name
        let res = parse(vec![
            1, 1, 0, 0, 0, 0, 0, 0, 2, 0x21, 0x00, 0x04, b't', b'e', b's', b't', 0x00, 0x04, 0x12, 0x34, 0x56, 0x78,
            0x21, 0x00, 0x00, 0x00, 0x04, 0x77, 0x65, 0x43, 0x21, 3,
        ])
        .unwrap();

        let group = res.attributes().groups_of(DelimiterTag::JobAttributes).next().unwrap();
        assert_eq!(group.attributes().len(), 2);
        assert_eq!(group.attributes()[1].name(), "");
        assert_eq!(group.attributes()[1].value().as_integer(), Some(&0x7765_4321));
    }

    #[test]
    fn test_parse_groups() {
        let data = vec![
            0x01, 0x01, 0x00, 0x00, 0x00, 0x00, 0x00, 0x01, 0x01, 0x21, 0x00, 0x04, b't', b'e', b's', b't', 0x00,
            0x04, 0x12, 0x34, 0x56, 0x78, 0x21, 0x00, 0x05, b't', b'e', b's', b't', b'2', 0x00, 0x04, 0x12, 0x34,
            0x56, 0xFF, 0x04, 0x21, 0x00, 0x04, b't', b'e', b's', b't', 0x00, 0x04, 0x87, 0x65, 0x43, 0x21, 0x03,
        ];

        let res = parse(data).unwrap();

        assert_eq!(2, res.attributes().groups()[0].attributes().len());
        assert_eq!(1, res.attributes().groups()[1].attributes().len());
    }

    #[test]
    fn test_unrecognized_delimiter_opens_group() {
        // delimiter 0x07 is not in the registry but still groups attributes
        let res = parse(vec![
            1, 1, 0, 0, 0, 0, 0, 0, 0x07, 0x21, 0x00, 0x04, b't', b'e', b's', b't', 0x00, 0x04, 0x12, 0x34, 0x56,
            0x78, 3,
        ])
        .unwrap();

        let group = &res.attributes().groups()[0];
        assert_eq!(group.tag(), 0x07);
        assert!(group.delimiter().is_none());
        assert_eq!(group.get("test").unwrap().value().as_integer(), Some(&0x1234_5678));
    }

    #[test]
    fn test_parser_with_payload() {
        let data = vec![
            1, 1, 0, 0, 0, 0, 0, 0, 2, 0x21, 0x00, 0x04, b't', b'e', b's', b't', 0x00, 0x04, 0x12, 0x34, 0x56, 0x78, 3,
            b'f', b'o', b'o',
        ];

        let mut res = parse(data).unwrap();

        let mut cursor = io::Cursor::new(Vec::new());
        io::copy(res.payload_mut(), &mut cursor).unwrap();
        assert_eq!(cursor.into_inner(), b"foo");
    }

    #[test]
    fn test_parse_parts() {
        let data = vec![
            1, 1, 0, 0, 0, 0, 0, 0, 2, 0x21, 0x00, 0x04, b't', b'e', b's', b't', 0x00, 0x04, 0x12, 0x34, 0x56, 0x78, 3,
            b'f', b'o', b'o',
        ];

        let (header, attributes, reader) = IppParser::new(IppReader::new(io::Cursor::new(data)))
            .parse_parts()
            .unwrap();

        assert_eq!(header.version, crate::model::IppVersion::v1_1());
        let group = attributes.groups_of(DelimiterTag::JobAttributes).next().unwrap();
        assert_eq!(group.get("test").unwrap().value().as_integer(), Some(&0x1234_5678));

        let mut payload = reader.into_payload();
        let mut cursor = io::Cursor::new(Vec::new());
        io::copy(&mut payload, &mut cursor).unwrap();
        assert_eq!(cursor.into_inner(), b"foo");
    }
}
