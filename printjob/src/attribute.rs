//!
//! Attribute-related structs
//!
use bytes::{BufMut, Bytes, BytesMut};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{charset::Charset, model::DelimiterTag, value::IppValue, FromPrimitive as _};

macro_rules! define_attributes {
    ($($name:ident => $value:literal),* $(,)?) => {
        $(pub const $name: &'static str = $value;)*
    };
}

fn is_header_attr(attr: &str) -> bool {
    IppAttribute::HEADER_ATTRS.contains(&attr)
}

/// `IppAttribute` represents an IPP attribute
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Debug, PartialEq)]
pub struct IppAttribute {
    /// Attribute name
    name: String,
    /// Attribute value
    value: IppValue,
}

impl IppAttribute {
    define_attributes! {
        ATTRIBUTES_CHARSET => "attributes-charset",
        ATTRIBUTES_NATURAL_LANGUAGE => "attributes-natural-language",
        DOCUMENT_FORMAT => "document-format",
        JOB_ID => "job-id",
        JOB_NAME => "job-name",
        JOB_STATE => "job-state",
        JOB_STATE_MESSAGE => "job-state-message",
        JOB_STATE_REASONS => "job-state-reasons",
        JOB_URI => "job-uri",
        PRINTER_URI => "printer-uri",
        REQUESTING_USER_NAME => "requesting-user-name",
        STATUS_MESSAGE => "status-message",
    }

    // Per section 4.1.4 of RFC 8011 the "attributes-charset" and
    // "attributes-natural-language" attributes MUST be the first two
    // attributes of the Operation Attributes group, followed by the
    // operation target ("printer-uri").
    const HEADER_ATTRS: [&'static str; 3] = [
        IppAttribute::ATTRIBUTES_CHARSET,
        IppAttribute::ATTRIBUTES_NATURAL_LANGUAGE,
        IppAttribute::PRINTER_URI,
    ];

    /// Create new instance of the attribute
    ///
    /// * `name` - Attribute name<br/>
    /// * `value` - Attribute value<br/>
    pub fn new<S>(name: S, value: IppValue) -> IppAttribute
    where
        S: AsRef<str>,
    {
        IppAttribute {
            name: name.as_ref().to_owned(),
            value,
        }
    }

    /// Return attribute name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Return attribute value
    pub fn value(&self) -> &IppValue {
        &self.value
    }

    /// Consume this attribute and return the value
    pub fn into_value(self) -> IppValue {
        self.value
    }

    /// Write attribute to byte array: tag, name length and bytes, then the value
    pub fn to_bytes(&self, charset: Charset) -> Bytes {
        let mut buffer = BytesMut::new();

        let name = charset.encode(&self.name);

        buffer.put_u8(self.value.to_tag());
        buffer.put_u16(name.len() as u16);
        buffer.put_slice(&name);
        buffer.put(self.value.to_bytes(charset));
        buffer.freeze()
    }
}

/// Attribute group. The group keeps the raw delimiter byte which introduced
/// it, so groups opened by delimiters outside the registry survive a decode,
/// and keeps its attributes in wire order.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Debug)]
pub struct IppAttributeGroup {
    tag: u8,
    attributes: Vec<IppAttribute>,
}

impl IppAttributeGroup {
    /// Create new attribute group introduced by a given delimiter byte
    pub fn new(tag: u8) -> IppAttributeGroup {
        IppAttributeGroup {
            tag,
            attributes: Vec::new(),
        }
    }

    /// Return the raw delimiter byte of this group
    pub fn tag(&self) -> u8 {
        self.tag
    }

    /// Return the registry delimiter of this group, if the byte is a known one
    pub fn delimiter(&self) -> Option<DelimiterTag> {
        DelimiterTag::from_u8(self.tag)
    }

    /// Return attributes in wire order
    pub fn attributes(&self) -> &[IppAttribute] {
        &self.attributes
    }

    /// Return mutable attributes
    pub fn attributes_mut(&mut self) -> &mut Vec<IppAttribute> {
        &mut self.attributes
    }

    /// Consume this group and return its attributes
    pub fn into_attributes(self) -> Vec<IppAttribute> {
        self.attributes
    }

    /// Return the first attribute with a given name
    pub fn get(&self, name: &str) -> Option<&IppAttribute> {
        self.attributes.iter().find(|attr| attr.name() == name)
    }
}

/// Attribute list
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Debug, Default)]
pub struct IppAttributes {
    groups: Vec<IppAttributeGroup>,
}

impl IppAttributes {
    /// Create attribute list
    pub fn new() -> IppAttributes {
        IppAttributes { ..Default::default() }
    }

    /// Get all groups
    pub fn groups(&self) -> &[IppAttributeGroup] {
        &self.groups
    }

    /// Get all mutable groups
    pub fn groups_mut(&mut self) -> &mut Vec<IppAttributeGroup> {
        &mut self.groups
    }

    /// Consume this attribute list and return all attribute groups
    pub fn into_groups(self) -> Vec<IppAttributeGroup> {
        self.groups
    }

    /// Get a list of attribute groups matching a given delimiter tag
    pub fn groups_of(&self, tag: DelimiterTag) -> impl Iterator<Item = &IppAttributeGroup> {
        self.groups.iter().filter(move |g| g.tag == tag as u8)
    }

    /// Add attribute to a given group
    pub fn add(&mut self, tag: DelimiterTag, attribute: IppAttribute) {
        let group = self.groups.iter_mut().find(|g| g.tag() == tag as u8);
        if let Some(group) = group {
            group.attributes_mut().push(attribute);
        } else {
            let mut new_group = IppAttributeGroup::new(tag as u8);
            new_group.attributes_mut().push(attribute);
            self.groups.push(new_group);
        }
    }

    /// Write attribute list to byte array
    pub fn to_bytes(&self, charset: Charset) -> Bytes {
        let mut buffer = BytesMut::new();

        // put the required attributes first as described in section 4.1.4 of RFC 8011
        buffer.put_u8(DelimiterTag::OperationAttributes as u8);

        if let Some(group) = self.groups_of(DelimiterTag::OperationAttributes).next() {
            for hdr in &IppAttribute::HEADER_ATTRS {
                if let Some(attr) = group.get(hdr) {
                    buffer.put(attr.to_bytes(charset));
                }
            }

            // now the other operation attributes
            for attr in group.attributes() {
                if !is_header_attr(attr.name()) {
                    buffer.put(attr.to_bytes(charset));
                }
            }
        }

        // now the rest
        for group in self
            .groups()
            .iter()
            .filter(|group| group.tag() != DelimiterTag::OperationAttributes as u8)
        {
            buffer.put_u8(group.tag());

            for attr in group.attributes() {
                buffer.put(attr.to_bytes(charset));
            }
        }
        buffer.put_u8(DelimiterTag::EndOfAttributes as u8);

        buffer.freeze()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attribute_to_bytes() {
        let attr = IppAttribute::new("job-id", IppValue::Integer(3));
        let buf = attr.to_bytes(Charset::UsAscii).to_vec();

        assert_eq!(
            buf,
            vec![0x21, 0, 6, b'j', b'o', b'b', b'-', b'i', b'd', 0, 4, 0, 0, 0, 3],
        );
    }

    #[test]
    fn test_group_keeps_wire_order() {
        let mut group = IppAttributeGroup::new(DelimiterTag::JobAttributes as u8);
        group
            .attributes_mut()
            .push(IppAttribute::new("job-id", IppValue::Integer(42)));
        group
            .attributes_mut()
            .push(IppAttribute::new("job-state", IppValue::Enum(3)));

        let names = group.attributes().iter().map(|a| a.name()).collect::<Vec<_>>();
        assert_eq!(names, ["job-id", "job-state"]);
        assert_eq!(group.get("job-state").map(|a| a.value()), Some(&IppValue::Enum(3)));
        assert!(group.get("job-uri").is_none());
    }

    #[test]
    fn test_header_attributes_written_first() {
        let mut attrs = IppAttributes::new();
        // insert out of order on purpose
        attrs.add(
            DelimiterTag::OperationAttributes,
            IppAttribute::new(IppAttribute::PRINTER_URI, IppValue::Uri("ipp://host/p".to_owned())),
        );
        attrs.add(
            DelimiterTag::OperationAttributes,
            IppAttribute::new(
                IppAttribute::ATTRIBUTES_CHARSET,
                IppValue::Charset("us-ascii".to_owned()),
            ),
        );
        attrs.add(
            DelimiterTag::OperationAttributes,
            IppAttribute::new(
                IppAttribute::ATTRIBUTES_NATURAL_LANGUAGE,
                IppValue::NaturalLanguage("en".to_owned()),
            ),
        );

        let buf = attrs.to_bytes(Charset::UsAscii);
        assert_eq!(buf[0], DelimiterTag::OperationAttributes as u8);
        // first attribute must be attributes-charset regardless of insertion order
        assert_eq!(buf[1], 0x47);
        assert_eq!(buf[buf.len() - 1], DelimiterTag::EndOfAttributes as u8);
    }

    #[test]
    fn test_groups_of() {
        let mut attrs = IppAttributes::new();
        attrs.add(
            DelimiterTag::JobAttributes,
            IppAttribute::new(IppAttribute::JOB_ID, IppValue::Integer(7)),
        );

        assert_eq!(attrs.groups_of(DelimiterTag::JobAttributes).count(), 1);
        assert_eq!(attrs.groups_of(DelimiterTag::PrinterAttributes).count(), 0);
    }
}
