//! CloudFront XML deserialization: parsing response bodies into model types.
//!
//! Response decoding is lenient by default: unknown elements are skipped and a
//! member whose text cannot be read is left unset instead of failing the
//! whole document.

use quick_xml::Reader;
use quick_xml::events::{BytesRef, Event};

use cfpurge_model::{Invalidation, InvalidationBatch, Paths};

use crate::error::XmlError;

/// Trait for deserializing CloudFront types from XML.
///
/// The root element has already been consumed by the caller; the
/// implementation reads child elements until the matching end tag.
pub trait XmlDeserialize: Sized {
    /// Deserialize an instance from the given XML reader.
    ///
    /// The reader is positioned just after the opening tag of this element.
    ///
    /// # Errors
    ///
    /// Returns `XmlError` if the XML is malformed or required fields are missing.
    fn deserialize_xml(reader: &mut Reader<&[u8]>) -> Result<Self, XmlError>;
}

/// Deserialize a CloudFront XML document into a typed value.
///
/// Finds the root element and delegates to the type's `XmlDeserialize` implementation.
///
/// # Errors
///
/// Returns `XmlError` if the XML is malformed or deserialization fails.
pub fn from_xml<T: XmlDeserialize>(xml: &[u8]) -> Result<T, XmlError> {
    let mut reader = Reader::from_reader(xml);
    reader.config_mut().trim_text(true);

    loop {
        match reader.read_event()? {
            Event::Start(_) => return T::deserialize_xml(&mut reader),
            Event::Eof => return Err(XmlError::MissingElement("root element".to_owned())),
            // Skip declaration, comments, processing instructions, whitespace.
            _ => {}
        }
    }
}

/// Decode a `CreateInvalidation` success body.
///
/// Never fails: an empty body yields an empty [`Invalidation`], and a body
/// that is not well-formed is logged and treated the same way.
#[must_use]
pub fn decode_invalidation(body: &[u8]) -> Invalidation {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Invalidation::default();
    }
    match from_xml::<Invalidation>(body) {
        Ok(invalidation) => invalidation,
        Err(e) => {
            tracing::warn!(error = %e, "malformed CreateInvalidation response body, members left unset");
            Invalidation::default()
        }
    }
}

// ---------------------------------------------------------------------------
// Helper functions for reading common XML patterns
// ---------------------------------------------------------------------------

/// The local name of a start tag as a string.
pub(crate) fn tag_name(name: &[u8]) -> Result<&str, XmlError> {
    std::str::from_utf8(name).map_err(|e| XmlError::ParseError(e.to_string()))
}

/// Read the text content of the current element and consume its end tag.
///
/// Expects the reader to be positioned right after a `Start` event. A member
/// holding markup or an unknown entity reads as `None`; the element is still
/// consumed up to its end tag, so its siblings can be read. Only running out
/// of input is an error.
pub(crate) fn read_text_lenient(reader: &mut Reader<&[u8]>) -> Result<Option<String>, XmlError> {
    let mut text = String::new();
    let mut readable = true;
    loop {
        match reader.read_event()? {
            Event::Text(e) => match e.decode() {
                Ok(decoded) => text.push_str(&decoded),
                Err(_) => readable = false,
            },
            Event::GeneralRef(e) => {
                if push_reference(&mut text, &e).is_err() {
                    readable = false;
                }
            }
            Event::Start(_) => {
                readable = false;
                skip_element(reader)?;
            }
            Event::Empty(_) => readable = false,
            Event::End(_) => return Ok(readable.then_some(text)),
            Event::Eof => {
                return Err(XmlError::UnexpectedElement(
                    "unexpected EOF while reading text content".to_owned(),
                ));
            }
            _ => {}
        }
    }
}

/// Append the text a character or predefined entity reference stands for.
fn push_reference(text: &mut String, e: &BytesRef<'_>) -> Result<(), XmlError> {
    if let Some(ch) = e.resolve_char_ref()? {
        text.push(ch);
        return Ok(());
    }
    let name = e
        .decode()
        .map_err(|err| XmlError::ParseError(err.to_string()))?;
    let resolved = quick_xml::escape::resolve_predefined_entity(&name)
        .ok_or_else(|| XmlError::ParseError(format!("unknown entity &{name};")))?;
    text.push_str(resolved);
    Ok(())
}

/// Skip over an element and all its children.
pub(crate) fn skip_element(reader: &mut Reader<&[u8]>) -> Result<(), XmlError> {
    let mut depth: u32 = 1;
    loop {
        match reader.read_event()? {
            Event::Start(_) => depth += 1,
            Event::End(_) => {
                depth -= 1;
                if depth == 0 {
                    return Ok(());
                }
            }
            Event::Eof => {
                return Err(XmlError::UnexpectedElement(
                    "unexpected EOF while skipping element".to_owned(),
                ));
            }
            _ => {}
        }
    }
}

/// Parse an ISO 8601 timestamp from XML text.
fn parse_timestamp(s: &str) -> Result<chrono::DateTime<chrono::Utc>, XmlError> {
    chrono::DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&chrono::Utc))
        .or_else(|_| {
            chrono::NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.fZ")
                .map(|ndt| ndt.and_utc())
        })
        .map_err(|e| XmlError::ParseError(format!("invalid timestamp '{s}': {e}")))
}

// ---------------------------------------------------------------------------
// XmlDeserialize implementations
// ---------------------------------------------------------------------------

impl XmlDeserialize for Paths {
    fn deserialize_xml(reader: &mut Reader<&[u8]>) -> Result<Self, XmlError> {
        let mut quantity = None;
        let mut items = Vec::new();

        loop {
            match reader.read_event()? {
                Event::Start(e) => {
                    let name = e.name();
                    match tag_name(name.as_ref())? {
                        "Quantity" => {
                            let text = read_text_lenient(reader)?;
                            quantity = text.as_deref().and_then(|t| t.parse::<i32>().ok());
                            if quantity.is_none() {
                                tracing::debug!(value = ?text, "ignoring unreadable Quantity");
                            }
                        }
                        "Items" => items = read_path_items(reader)?,
                        _ => skip_element(reader)?,
                    }
                }
                Event::End(_) => break,
                Event::Eof => {
                    return Err(XmlError::UnexpectedElement(
                        "unexpected EOF in Paths".to_owned(),
                    ));
                }
                _ => {}
            }
        }

        let quantity =
            quantity.unwrap_or_else(|| i32::try_from(items.len()).unwrap_or(i32::MAX));
        Ok(Paths { quantity, items })
    }
}

/// Read the `<Path>` children of an `<Items>` wrapper.
fn read_path_items(reader: &mut Reader<&[u8]>) -> Result<Vec<String>, XmlError> {
    let mut items = Vec::new();

    loop {
        match reader.read_event()? {
            Event::Start(e) => {
                let name = e.name();
                if tag_name(name.as_ref())? == "Path" {
                    match read_text_lenient(reader)? {
                        Some(path) => items.push(path),
                        None => tracing::debug!(index = items.len(), "ignoring unreadable Path"),
                    }
                } else {
                    skip_element(reader)?;
                }
            }
            Event::End(_) => break,
            Event::Eof => {
                return Err(XmlError::UnexpectedElement(
                    "unexpected EOF in Items".to_owned(),
                ));
            }
            _ => {}
        }
    }

    Ok(items)
}

impl XmlDeserialize for InvalidationBatch {
    fn deserialize_xml(reader: &mut Reader<&[u8]>) -> Result<Self, XmlError> {
        let mut paths = None;
        let mut caller_reference = None;

        loop {
            match reader.read_event()? {
                Event::Start(e) => {
                    let name = e.name();
                    match tag_name(name.as_ref())? {
                        "Paths" => paths = Some(Paths::deserialize_xml(reader)?),
                        "CallerReference" => caller_reference = read_text_lenient(reader)?,
                        _ => skip_element(reader)?,
                    }
                }
                Event::End(_) => break,
                Event::Eof => {
                    return Err(XmlError::UnexpectedElement(
                        "unexpected EOF in InvalidationBatch".to_owned(),
                    ));
                }
                _ => {}
            }
        }

        Ok(InvalidationBatch {
            paths: paths.unwrap_or_default(),
            caller_reference: caller_reference
                .ok_or_else(|| XmlError::MissingElement("CallerReference".to_owned()))?,
        })
    }
}

impl XmlDeserialize for Invalidation {
    /// Members are read one by one into the result. A document that stops
    /// early keeps the members read before the break.
    fn deserialize_xml(reader: &mut Reader<&[u8]>) -> Result<Self, XmlError> {
        let mut out = Invalidation::default();
        if let Err(e) = read_invalidation_members(reader, &mut out) {
            tracing::warn!(error = %e, "CreateInvalidation response body ended early, keeping members read so far");
        }
        Ok(out)
    }
}

fn read_invalidation_members(
    reader: &mut Reader<&[u8]>,
    out: &mut Invalidation,
) -> Result<(), XmlError> {
    loop {
        match reader.read_event()? {
            Event::Start(e) => {
                let name = e.name();
                match tag_name(name.as_ref())? {
                    "Id" => out.id = read_text_lenient(reader)?,
                    "Status" => out.status = read_text_lenient(reader)?,
                    "CreateTime" => {
                        out.create_time = read_text_lenient(reader)?.and_then(|text| {
                            parse_timestamp(&text)
                                .inspect_err(|e| tracing::debug!(error = %e, "ignoring CreateTime"))
                                .ok()
                        });
                    }
                    "InvalidationBatch" => {
                        // A batch missing its CallerReference has been fully
                        // consumed, so reading can continue past it.
                        out.invalidation_batch = match InvalidationBatch::deserialize_xml(reader) {
                            Ok(batch) => Some(batch),
                            Err(XmlError::MissingElement(element)) => {
                                tracing::debug!(%element, "echoed batch is incomplete");
                                None
                            }
                            Err(e) => return Err(e),
                        };
                    }
                    _ => skip_element(reader)?,
                }
            }
            Event::End(_) => return Ok(()),
            Event::Eof => {
                return Err(XmlError::UnexpectedElement(
                    "unexpected EOF in Invalidation".to_owned(),
                ));
            }
            _ => {}
        }
    }
}
