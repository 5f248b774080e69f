//! InkML writer: document model to markup.

use crate::{fmt_number, InkmlError, INKML_NS, XML_NS};
use inkline_codec::encode;
use inkline_model::{Brush, Context, InkDocument, Trace};
use quick_xml::events::{BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;

type XmlWriter = Writer<Vec<u8>>;

/// Serializes a document to InkML text.
///
/// Contexts and brushes land under a `definitions` container keyed by
/// `xml:id`; traces follow as flat siblings and carry an `xml:id` only
/// when they had an explicit id at load time. Trace packets are written
/// uncompressed (see the codec's encode notes).
pub fn write_document(document: &InkDocument) -> Result<String, InkmlError> {
    let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);

    let mut ink = BytesStart::new("inkml:ink");
    ink.push_attribute(("xmlns:inkml", INKML_NS));
    // Declared explicitly: some consumers fail to resolve xml:id without it.
    ink.push_attribute(("xmlns:xml", XML_NS));
    writer.write_event(Event::Start(ink))?;

    writer.write_event(Event::Start(BytesStart::new("inkml:definitions")))?;
    for context in document.contexts() {
        write_context(&mut writer, context)?;
    }
    for brush in document.brushes() {
        write_brush(&mut writer, brush)?;
    }
    writer.write_event(Event::End(BytesEnd::new("inkml:definitions")))?;

    for trace in document.traces() {
        write_trace(&mut writer, trace)?;
    }

    writer.write_event(Event::End(BytesEnd::new("inkml:ink")))?;
    Ok(String::from_utf8(writer.into_inner())?)
}

fn write_context(writer: &mut XmlWriter, context: &Context) -> Result<(), InkmlError> {
    let mut element = BytesStart::new("inkml:context");
    element.push_attribute(("xml:id", context.id.as_str()));

    let is_empty = context.ink_source.is_none() && context.timestamp.is_none();
    if is_empty {
        writer.write_event(Event::Empty(element))?;
        return Ok(());
    }
    writer.write_event(Event::Start(element))?;

    if let Some(source) = &context.ink_source {
        let mut element = BytesStart::new("inkml:inkSource");
        if let Some(id) = &source.id {
            element.push_attribute(("xml:id", id.as_str()));
        }
        writer.write_event(Event::Start(element))?;

        let mut format = BytesStart::new("inkml:traceFormat");
        if let Some(id) = &source.trace_format.id {
            format.push_attribute(("xml:id", id.as_str()));
        }
        writer.write_event(Event::Start(format))?;
        for channel in source.trace_format.channels() {
            let mut element = BytesStart::new("inkml:channel");
            element.push_attribute(("name", channel.name.as_str()));
            if let Some(kind) = &channel.kind {
                element.push_attribute(("type", kind.as_str()));
            }
            if channel.min != 0.0 {
                element.push_attribute(("min", fmt_number(channel.min).as_str()));
            }
            if let Some(max) = channel.max {
                element.push_attribute(("max", fmt_number(max).as_str()));
            }
            if !channel.units.is_empty() {
                element.push_attribute(("units", channel.units.as_str()));
            }
            writer.write_event(Event::Empty(element))?;
        }
        writer.write_event(Event::End(BytesEnd::new("inkml:traceFormat")))?;

        if !source.channel_properties.is_empty() {
            writer.write_event(Event::Start(BytesStart::new("inkml:channelProperties")))?;
            for property in &source.channel_properties {
                let mut element = BytesStart::new("inkml:channelProperty");
                element.push_attribute(("channel", property.channel.as_str()));
                element.push_attribute(("name", property.name.as_str()));
                element.push_attribute(("value", fmt_number(property.value).as_str()));
                element.push_attribute(("units", property.units.as_str()));
                writer.write_event(Event::Empty(element))?;
            }
            writer.write_event(Event::End(BytesEnd::new("inkml:channelProperties")))?;
        }

        writer.write_event(Event::End(BytesEnd::new("inkml:inkSource")))?;
    }

    if let Some(timestamp) = &context.timestamp {
        let mut element = BytesStart::new("inkml:timestamp");
        if let Some(id) = &timestamp.id {
            element.push_attribute(("xml:id", id.as_str()));
        }
        if let Some(time_string) = &timestamp.time_string {
            element.push_attribute(("timeString", time_string.as_str()));
        }
        writer.write_event(Event::Empty(element))?;
    }

    writer.write_event(Event::End(BytesEnd::new("inkml:context")))?;
    Ok(())
}

fn write_brush(writer: &mut XmlWriter, brush: &Brush) -> Result<(), InkmlError> {
    let mut element = BytesStart::new("inkml:brush");
    element.push_attribute(("xml:id", brush.id.as_str()));

    if brush.properties().is_empty() {
        writer.write_event(Event::Empty(element))?;
        return Ok(());
    }
    writer.write_event(Event::Start(element))?;
    for property in brush.properties() {
        let mut element = BytesStart::new("inkml:brushProperty");
        element.push_attribute(("name", property.name.as_str()));
        element.push_attribute(("value", property.value.as_str()));
        if let Some(units) = &property.units {
            element.push_attribute(("units", units.as_str()));
        }
        writer.write_event(Event::Empty(element))?;
    }
    writer.write_event(Event::End(BytesEnd::new("inkml:brush")))?;
    Ok(())
}

fn write_trace(writer: &mut XmlWriter, trace: &Trace) -> Result<(), InkmlError> {
    let mut element = BytesStart::new("inkml:trace");
    if let Some(id) = &trace.id {
        element.push_attribute(("xml:id", id.as_str()));
    }
    if let Some(context_ref) = &trace.context_ref {
        element.push_attribute(("contextRef", format!("#{context_ref}").as_str()));
    }
    if let Some(brush_ref) = &trace.brush_ref {
        element.push_attribute(("brushRef", format!("#{brush_ref}").as_str()));
    }
    if let Some(time_offset) = &trace.time_offset {
        element.push_attribute(("timeOffset", time_offset.as_str()));
    }
    writer.write_event(Event::Start(element))?;
    writer.write_event(Event::Text(BytesText::new(&encode(&trace.table))))?;
    writer.write_event(Event::End(BytesEnd::new("inkml:trace")))?;
    Ok(())
}
