//! SOAP envelope construction and response flattening.

use quick_xml::escape::escape;
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use super::record::Record;
use crate::error_handling::FetchError;

/// Builds a SOAP 1.1 request envelope for `operation` with the given
/// parameters as child elements, in order.
pub fn build_envelope(namespace: &str, operation: &str, params: &[(&str, &str)]) -> String {
    let mut body = String::new();
    for (name, value) in params {
        body.push_str(&format!("<{name}>{}</{name}>", escape(*value)));
    }
    format!(
        concat!(
            r#"<?xml version="1.0" encoding="utf-8"?>"#,
            r#"<soap:Envelope xmlns:soap="http://schemas.xmlsoap.org/soap/envelope/">"#,
            r#"<soap:Body><{op} xmlns="{ns}">{body}</{op}></soap:Body>"#,
            r#"</soap:Envelope>"#
        ),
        op = operation,
        ns = escape(namespace),
        body = body
    )
}

/// Value of the `SOAPAction` header: the operation qualified by the service
/// namespace, quoted.
pub fn soap_action(namespace: &str, operation: &str) -> String {
    format!("\"{}/{}\"", namespace.trim_end_matches('/'), operation)
}

struct OpenElement {
    name: String,
    has_children: bool,
    text: String,
}

fn local_name(e: &BytesStart<'_>) -> String {
    String::from_utf8_lossy(e.local_name().as_ref()).into_owned()
}

/// Flattens the payload of a SOAP response into a [`Record`].
///
/// The first element inside `Body` is the response wrapper; every leaf below
/// it becomes one field. Nested elements are joined with `.` (for example
/// `Hersteller.Wert`) and empty or nil elements produce an empty value.
/// A `Fault` wrapper is reported as [`FetchError::Fault`].
pub fn parse_response(xml: &str) -> Result<Record, FetchError> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut stack: Vec<OpenElement> = Vec::new();
    // Stack index of the response wrapper (the child of Body).
    let mut wrapper_index: Option<usize> = None;
    let mut body_index: Option<usize> = None;
    let mut is_fault = false;
    let mut fault_message: Option<String> = None;
    let mut record = Record::new();

    loop {
        let event = reader
            .read_event()
            .map_err(|e| FetchError::Malformed(format!("invalid XML: {e}")))?;
        let (start, end) = match &event {
            Event::Start(e) => (Some(local_name(e)), false),
            Event::Empty(e) => (Some(local_name(e)), true),
            Event::End(_) => (None, true),
            Event::Text(t) => {
                let text = t
                    .unescape()
                    .map_err(|e| FetchError::Malformed(format!("invalid text: {e}")))?;
                if let Some(top) = stack.last_mut() {
                    top.text.push_str(&text);
                }
                continue;
            }
            Event::CData(c) => {
                if let Some(top) = stack.last_mut() {
                    top.text.push_str(&String::from_utf8_lossy(c));
                }
                continue;
            }
            Event::Eof => break,
            _ => continue,
        };

        if let Some(name) = start {
            if let Some(parent) = stack.last_mut() {
                parent.has_children = true;
            }
            let index = stack.len();
            if body_index.is_none() && name == "Body" {
                body_index = Some(index);
            } else if wrapper_index.is_none() && body_index == Some(index.wrapping_sub(1)) {
                wrapper_index = Some(index);
                is_fault = name == "Fault";
            }
            stack.push(OpenElement {
                name,
                has_children: false,
                text: String::new(),
            });
        }

        if end {
            let depth = stack.len().saturating_sub(1);
            let Some(element) = stack.pop() else {
                return Err(FetchError::Malformed("unbalanced end tag".to_string()));
            };
            let Some(wrapper) = wrapper_index else {
                continue;
            };
            if depth <= wrapper || element.has_children {
                continue;
            }
            if is_fault {
                if matches!(element.name.as_str(), "faultstring" | "Text") {
                    fault_message = Some(element.text.trim().to_string());
                }
                continue;
            }
            let mut path: Vec<&str> = stack[wrapper + 1..]
                .iter()
                .map(|e| e.name.as_str())
                .collect();
            path.push(&element.name);
            record.push(path.join("."), element.text.trim());
        }
    }

    if body_index.is_none() {
        return Err(FetchError::Malformed("missing SOAP body".to_string()));
    }
    if is_fault {
        return Err(FetchError::Fault(
            fault_message.unwrap_or_else(|| "unspecified fault".to_string()),
        ));
    }
    if record.is_empty() {
        return Err(FetchError::Malformed("empty response payload".to_string()));
    }
    Ok(record)
}
