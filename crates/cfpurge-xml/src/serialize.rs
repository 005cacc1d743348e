//! CloudFront XML serialization: converting request types to XML.
//!
//! This module provides the [`XmlSerialize`] trait and the implementations for
//! the request bodies CloudFront expects.

use std::io::{self, Write};

use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesText, Event};

use cfpurge_model::{InvalidationBatch, Paths};

use crate::error::XmlError;

/// The CloudFront XML namespace for the 2019-03-26 API version.
pub const CLOUDFRONT_NAMESPACE: &str = "http://cloudfront.amazonaws.com/doc/2019-03-26/";

/// Trait for serializing CloudFront types to XML.
///
/// Implementors write their content as child elements inside the current XML
/// context. The root element and namespace are written by [`to_xml`].
///
/// Uses `io::Result` because `quick_xml::Writer` closures require `io::Result<()>`.
pub trait XmlSerialize {
    /// Serialize this value as XML child elements into the given writer.
    ///
    /// # Errors
    ///
    /// Returns `io::Error` if writing to the underlying writer fails.
    fn serialize_xml<W: Write>(&self, writer: &mut Writer<W>) -> io::Result<()>;
}

/// Serialize a value as a complete CloudFront XML document.
///
/// # Errors
///
/// Returns `XmlError` if serialization fails.
pub fn to_xml<T: XmlSerialize>(root_element: &str, value: &T) -> Result<Vec<u8>, XmlError> {
    let mut buf = Vec::with_capacity(256);
    let mut writer = Writer::new(&mut buf);

    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;

    writer
        .create_element(root_element)
        .with_attribute(("xmlns", CLOUDFRONT_NAMESPACE))
        .write_inner_content(|w| value.serialize_xml(w))?;

    Ok(buf)
}

/// Write a simple `<tag>text</tag>` element.
fn write_text_element<W: Write>(writer: &mut Writer<W>, tag: &str, text: &str) -> io::Result<()> {
    writer
        .create_element(tag)
        .write_text_content(BytesText::new(text))?;
    Ok(())
}

impl XmlSerialize for Paths {
    fn serialize_xml<W: Write>(&self, writer: &mut Writer<W>) -> io::Result<()> {
        write_text_element(writer, "Quantity", &self.quantity.to_string())?;
        if !self.items.is_empty() {
            writer.create_element("Items").write_inner_content(|w| {
                for path in &self.items {
                    write_text_element(w, "Path", path)?;
                }
                Ok(())
            })?;
        }
        Ok(())
    }
}

impl XmlSerialize for InvalidationBatch {
    fn serialize_xml<W: Write>(&self, writer: &mut Writer<W>) -> io::Result<()> {
        writer
            .create_element("Paths")
            .write_inner_content(|w| self.paths.serialize_xml(w))?;
        write_text_element(writer, "CallerReference", &self.caller_reference)
    }
}
