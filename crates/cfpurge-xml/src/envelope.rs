//! Error envelope extraction.
//!
//! CloudFront wraps errors as
//!
//! ```xml
//! <ErrorResponse>
//!   <Error>
//!     <Type>Sender</Type>
//!     <Code>NoSuchDistribution</Code>
//!     <Message>The specified distribution does not exist.</Message>
//!   </Error>
//!   <RequestId>5b4f...</RequestId>
//! </ErrorResponse>
//! ```
//!
//! while other services in the same family send a flat `<Error>` root with the
//! members directly inside. Both shapes are read here.

use quick_xml::Reader;
use quick_xml::events::Event;

use crate::deserialize::{read_text_lenient, skip_element, tag_name};
use crate::error::XmlError;

/// Members read from an error body.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ErrorEnvelope {
    /// The error code, e.g. `NoSuchDistribution`.
    pub code: Option<String>,
    /// The human-readable message.
    pub message: Option<String>,
    /// `Sender` or `Receiver`.
    pub error_type: Option<String>,
    /// The request ID.
    pub request_id: Option<String>,
}

impl ErrorEnvelope {
    /// Fill members still unset from `other`.
    fn or(self, other: Self) -> Self {
        Self {
            code: self.code.or(other.code),
            message: self.message.or(other.message),
            error_type: self.error_type.or(other.error_type),
            request_id: self.request_id.or(other.request_id),
        }
    }
}

/// Parse an error body in either envelope shape.
///
/// When the root has a nested `<Error>` element its members are read from
/// there; members only present at the top level (typically `RequestId`) are
/// used as a fallback. A member holding markup reads as absent. A body cut
/// off after its `Code` still yields the members read so far.
///
/// # Errors
///
/// Returns `XmlError` if the body is not a well-formed XML document and no
/// `Code` could be read from it.
pub fn parse_error_envelope(body: &[u8]) -> Result<ErrorEnvelope, XmlError> {
    let mut reader = Reader::from_reader(body);
    reader.config_mut().trim_text(true);

    loop {
        match reader.read_event()? {
            Event::Start(_) => break,
            Event::Empty(_) => return Ok(ErrorEnvelope::default()),
            Event::Eof => return Err(XmlError::MissingElement("root element".to_owned())),
            _ => {}
        }
    }

    let mut top = ErrorEnvelope::default();
    let mut nested = None;
    let outcome = read_members(&mut reader, &mut top, &mut nested, true);

    let envelope = match nested {
        Some(nested) => nested.or(top),
        None => top,
    };
    match outcome {
        Ok(()) => Ok(envelope),
        Err(e) if envelope.code.is_some() => {
            tracing::debug!(error = %e, "error envelope ended early, using members read so far");
            Ok(envelope)
        }
        Err(e) => Err(e),
    }
}

/// Read envelope members from the current element's children into `envelope`.
///
/// With `descend` set, a child `<Error>` is read into `nested`. Members read
/// before a failure stay in place.
fn read_members(
    reader: &mut Reader<&[u8]>,
    envelope: &mut ErrorEnvelope,
    nested: &mut Option<ErrorEnvelope>,
    descend: bool,
) -> Result<(), XmlError> {
    loop {
        match reader.read_event()? {
            Event::Start(e) => {
                let name = e.name();
                match tag_name(name.as_ref())? {
                    "Code" => envelope.code = read_text_lenient(reader)?,
                    "Message" | "message" => envelope.message = read_text_lenient(reader)?,
                    "Type" => envelope.error_type = read_text_lenient(reader)?,
                    "RequestId" => envelope.request_id = read_text_lenient(reader)?,
                    "Error" if descend && nested.is_none() => {
                        let inner = nested.insert(ErrorEnvelope::default());
                        read_members(reader, inner, &mut None, false)?;
                    }
                    _ => skip_element(reader)?,
                }
            }
            Event::End(_) => return Ok(()),
            Event::Eof => {
                return Err(XmlError::UnexpectedElement(
                    "unexpected EOF in error envelope".to_owned(),
                ));
            }
            _ => {}
        }
    }
}
