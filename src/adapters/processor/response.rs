use std::fmt::Display;

use quick_xml::{Reader, events::Event};

use crate::application::ports::{UpstreamError, UpstreamResult};

const ERROR_TAG: &[u8] = b"ErrorResponse";
const RESPONSE_TAG: &[u8] = b"Response";

/// Result code carried by the second `<Response>` element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResultCode {
    Success,
    AlreadyCancelled,
    Other(String),
}

impl ResultCode {
    fn from_text(text: &str) -> Self {
        match text {
            "Success" => ResultCode::Success,
            "NMYALREADYCANCELLED" => ResultCode::AlreadyCancelled,
            other => ResultCode::Other(other.to_string()),
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Tag {
    Error,
    Response,
}

fn malformed(err: impl Display) -> UpstreamError {
    UpstreamError::Rejected(format!("Malformed processor response: {err}"))
}

/// Reads the processor's XML body.
///
/// An `<ErrorResponse>` anywhere in the body wins and its text becomes the
/// rejection message. Otherwise the result code is the text of the second
/// `<Response>` element in document order. The body is not required to have
/// a single root element.
pub fn parse_result_code(xml: &str) -> UpstreamResult<ResultCode> {
    let mut reader = Reader::from_str(xml);

    // Text content of each tracked element, in document order.
    let mut found: Vec<(Tag, String)> = Vec::new();
    // One entry per open element; `Some` points into `found`.
    let mut open: Vec<Option<usize>> = Vec::new();

    loop {
        match reader.read_event().map_err(malformed)? {
            Event::Start(e) => {
                let tracked = tag_of(e.name().as_ref()).map(|tag| {
                    found.push((tag, String::new()));
                    found.len() - 1
                });
                open.push(tracked);
            }
            Event::Empty(e) => {
                if let Some(tag) = tag_of(e.name().as_ref()) {
                    found.push((tag, String::new()));
                }
            }
            Event::End(_) => {
                open.pop();
            }
            Event::Text(t) => {
                let text = t.unescape().map_err(malformed)?;
                append_text(&mut found, &open, &text);
            }
            Event::CData(c) => {
                let text = String::from_utf8_lossy(&c);
                append_text(&mut found, &open, &text);
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if let Some((_, message)) = found.iter().find(|(tag, _)| *tag == Tag::Error) {
        return Err(UpstreamError::Rejected(message.trim().to_string()));
    }

    found
        .iter()
        .filter(|(tag, _)| *tag == Tag::Response)
        .nth(1)
        .map(|(_, text)| ResultCode::from_text(text.trim()))
        .ok_or_else(|| {
            UpstreamError::Rejected("Processor response has no result code".to_string())
        })
}

fn tag_of(name: &[u8]) -> Option<Tag> {
    match name {
        ERROR_TAG => Some(Tag::Error),
        RESPONSE_TAG => Some(Tag::Response),
        _ => None,
    }
}

// Text belongs to every enclosing tracked element, like DOM textContent.
fn append_text(found: &mut [(Tag, String)], open: &[Option<usize>], text: &str) {
    for idx in open.iter().flatten() {
        found[*idx].1.push_str(text);
    }
}
