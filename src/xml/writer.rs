use quick_xml::events::{BytesCData, BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;

use super::{Document, Element, Node, XmlError};

/// Serialize a document back to XML text.
///
/// Output uses two-space indentation and self-closing tags for childless
/// elements, the shape Android tooling emits. Attribute values and text are
/// re-escaped on the way out; comments are written verbatim.
pub fn write_document(document: &Document) -> Result<String, XmlError> {
    let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);

    if let Some(decl) = &document.decl {
        writer.write_event(Event::Decl(BytesDecl::new(
            &decl.version,
            decl.encoding.as_deref(),
            decl.standalone.as_deref(),
        )))?;
    }
    for comment in &document.prologue {
        writer.write_event(Event::Comment(BytesText::from_escaped(comment.as_str())))?;
    }
    write_element(&mut writer, &document.root)?;
    for comment in &document.epilogue {
        writer.write_event(Event::Comment(BytesText::from_escaped(comment.as_str())))?;
    }

    let mut output = String::from_utf8_lossy(&writer.into_inner()).into_owned();
    output.push('\n');
    Ok(output)
}

fn write_element<W: std::io::Write>(
    writer: &mut Writer<W>,
    element: &Element,
) -> Result<(), XmlError> {
    let mut start = BytesStart::new(element.name.as_str());
    for (name, value) in &element.attributes {
        start.push_attribute((name.as_str(), value.as_str()));
    }

    if element.children.is_empty() {
        writer.write_event(Event::Empty(start))?;
        return Ok(());
    }

    writer.write_event(Event::Start(start))?;
    for child in &element.children {
        match child {
            Node::Element(child) => write_element(writer, child)?,
            Node::Text(text) => writer.write_event(Event::Text(BytesText::new(text)))?,
            Node::CData(text) => writer.write_event(Event::CData(BytesCData::new(text.as_str())))?,
            Node::Comment(text) => {
                writer.write_event(Event::Comment(BytesText::from_escaped(text.as_str())))?
            }
        }
    }
    writer.write_event(Event::End(BytesEnd::new(element.name.as_str())))?;
    Ok(())
}
