use quick_xml::events::{BytesDecl, BytesStart, Event};
use quick_xml::Reader;

use super::{Document, Element, Node, XmlDecl, XmlError};

/// Parse an XML document into an owned element tree.
///
/// Whitespace-only text is dropped (the writer re-indents), everything else
/// survives: declaration, comments inside and around the root, CDATA,
/// attribute order.
pub fn parse_document(source: &str) -> Result<Document, XmlError> {
    let mut reader = Reader::from_str(source);
    reader.trim_text(true);

    let mut decl = None;
    let mut prologue = Vec::new();
    let mut root: Option<Element> = None;
    let mut epilogue = Vec::new();
    let mut stack: Vec<Element> = Vec::new();

    loop {
        match reader.read_event() {
            Ok(Event::Decl(event)) => decl = Some(read_decl(&event, &reader)?),
            Ok(Event::Start(event)) => stack.push(read_element(&event, &reader)?),
            Ok(Event::Empty(event)) => {
                let element = read_element(&event, &reader)?;
                close_element(element, &mut stack, &mut root)?;
            }
            Ok(Event::End(event)) => {
                let element = stack.pop().ok_or_else(|| {
                    XmlError::UnexpectedClose(
                        String::from_utf8_lossy(event.name().as_ref()).into_owned(),
                    )
                })?;
                close_element(element, &mut stack, &mut root)?;
            }
            Ok(Event::Text(event)) => {
                let text = event
                    .unescape()
                    .map_err(|error| malformed(&reader, error))?
                    .into_owned();
                if let Some(parent) = stack.last_mut() {
                    parent.children.push(Node::Text(text));
                }
            }
            Ok(Event::CData(event)) => {
                let text = String::from_utf8_lossy(&event).into_owned();
                if let Some(parent) = stack.last_mut() {
                    parent.children.push(Node::CData(text));
                }
            }
            Ok(Event::Comment(event)) => {
                let comment = String::from_utf8_lossy(&event).into_owned();
                match (stack.last_mut(), &root) {
                    (Some(parent), _) => parent.children.push(Node::Comment(comment)),
                    (None, None) => prologue.push(comment),
                    (None, Some(_)) => epilogue.push(comment),
                }
            }
            // Processing instructions and doctypes do not occur in manifests
            Ok(Event::PI(_)) | Ok(Event::DocType(_)) => {}
            Ok(Event::Eof) => break,
            Err(error) => return Err(malformed(&reader, error)),
        }
    }

    if let Some(open) = stack.pop() {
        return Err(XmlError::Malformed {
            position: reader.buffer_position(),
            message: format!("unclosed element '<{}>'", open.name),
        });
    }

    Ok(Document {
        decl,
        prologue,
        root: root.ok_or(XmlError::NoRoot)?,
        epilogue,
    })
}

fn close_element(
    element: Element,
    stack: &mut Vec<Element>,
    root: &mut Option<Element>,
) -> Result<(), XmlError> {
    match stack.last_mut() {
        Some(parent) => parent.children.push(Node::Element(element)),
        None if root.is_none() => *root = Some(element),
        None => return Err(XmlError::MultipleRoots),
    }
    Ok(())
}

fn read_element<R>(start: &BytesStart<'_>, reader: &Reader<R>) -> Result<Element, XmlError> {
    let mut element = Element::new(String::from_utf8_lossy(start.name().as_ref()).into_owned());

    for attribute in start.attributes() {
        let attribute = attribute.map_err(|error| XmlError::Malformed {
            position: reader.buffer_position(),
            message: error.to_string(),
        })?;
        let name = String::from_utf8_lossy(attribute.key.as_ref()).into_owned();
        let value = attribute
            .unescape_value()
            .map_err(|error| malformed(reader, error))?
            .into_owned();
        element.attributes.push((name, value));
    }

    Ok(element)
}

fn read_decl<R>(decl: &BytesDecl<'_>, reader: &Reader<R>) -> Result<XmlDecl, XmlError> {
    let version = decl
        .version()
        .map_err(|error| malformed(reader, error))?
        .into_owned();
    let encoding = decl
        .encoding()
        .transpose()
        .map_err(|error| malformed(reader, error))?
        .map(|value| String::from_utf8_lossy(&value).into_owned());
    let standalone = decl
        .standalone()
        .transpose()
        .map_err(|error| malformed(reader, error))?
        .map(|value| String::from_utf8_lossy(&value).into_owned());

    Ok(XmlDecl {
        version: String::from_utf8_lossy(&version).into_owned(),
        encoding,
        standalone,
    })
}

fn malformed<R>(reader: &Reader<R>, error: quick_xml::Error) -> XmlError {
    XmlError::Malformed {
        position: reader.buffer_position(),
        message: error.to_string(),
    }
}
