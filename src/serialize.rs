//! Serialize a [`Suite`] to the Allure 1.x XML document format.
//!
//! Tag and attribute names follow the `urn:model.allure.qatools.yandex.ru`
//! model schema; the report generator looks elements up by these exact
//! names. Empty child containers are omitted rather than written as empty
//! wrapper elements.

use std::io;

use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;

use crate::model::{Attachment, Failure, Label, Step, Suite, TestCase};

static TEST_SUITE_TAG: &str = "ns2:test-suite";
static MODEL_NAMESPACE: &str = "urn:model.allure.qatools.yandex.ru";
static NAME_TAG: &str = "name";
static TEST_CASES_TAG: &str = "test-cases";
static TEST_CASE_TAG: &str = "test-case";
static DESCRIPTION_TAG: &str = "description";
static FAILURE_TAG: &str = "failure";
static MESSAGE_TAG: &str = "message";
static STACK_TRACE_TAG: &str = "stack-trace";
static STEPS_TAG: &str = "steps";
static STEP_TAG: &str = "step";
static ATTACHMENTS_TAG: &str = "attachments";
static ATTACHMENT_TAG: &str = "attachment";
static LABELS_TAG: &str = "labels";
static LABEL_TAG: &str = "label";

pub(crate) fn serialize_suite(suite: &Suite, writer: impl io::Write) -> quick_xml::Result<()> {
    let mut writer = Writer::new_with_indent(writer, b' ', 4);

    let decl = BytesDecl::new("1.0", Some("UTF-8"), None);
    writer.write_event(Event::Decl(decl))?;

    serialize_suite_impl(suite, &mut writer)?;

    // trailing newline
    writer.write_indent()
}

fn serialize_suite_impl(
    suite: &Suite,
    writer: &mut Writer<impl io::Write>,
) -> quick_xml::Result<()> {
    let mut suite_tag = BytesStart::new(TEST_SUITE_TAG);
    suite_tag.extend_attributes([
        ("xmlns:ns2", MODEL_NAMESPACE),
        ("start", suite.start.to_string().as_str()),
        ("stop", suite.stop.to_string().as_str()),
    ]);
    writer.write_event(Event::Start(suite_tag))?;

    serialize_text_element(NAME_TAG, &suite.name, writer)?;

    if !suite.test_cases.is_empty() {
        writer.write_event(Event::Start(BytesStart::new(TEST_CASES_TAG)))?;
        for test_case in &suite.test_cases {
            serialize_test_case(test_case, writer)?;
        }
        serialize_end_tag(TEST_CASES_TAG, writer)?;
    }

    serialize_end_tag(TEST_SUITE_TAG, writer)?;
    writer.write_event(Event::Eof)?;

    Ok(())
}

fn serialize_test_case(
    test_case: &TestCase,
    writer: &mut Writer<impl io::Write>,
) -> quick_xml::Result<()> {
    let TestCase {
        name,
        description,
        start,
        stop,
        status,
        failure,
        steps,
        labels,
        attachments,
    } = test_case;

    let mut case_tag = BytesStart::new(TEST_CASE_TAG);
    case_tag.extend_attributes([
        ("start", start.to_string().as_str()),
        ("stop", stop.to_string().as_str()),
        ("status", status.map_or("", |s| s.as_str())),
    ]);
    writer.write_event(Event::Start(case_tag))?;

    serialize_text_element(NAME_TAG, name, writer)?;

    if let Some(description) = description {
        serialize_text_element(DESCRIPTION_TAG, description, writer)?;
    }

    if let Some(failure) = failure {
        serialize_failure(failure, writer)?;
    }

    if !steps.is_empty() {
        writer.write_event(Event::Start(BytesStart::new(STEPS_TAG)))?;
        for step in steps {
            serialize_step(step, writer)?;
        }
        serialize_end_tag(STEPS_TAG, writer)?;
    }

    if !attachments.is_empty() {
        writer.write_event(Event::Start(BytesStart::new(ATTACHMENTS_TAG)))?;
        for attachment in attachments {
            serialize_attachment(attachment, writer)?;
        }
        serialize_end_tag(ATTACHMENTS_TAG, writer)?;
    }

    if !labels.is_empty() {
        writer.write_event(Event::Start(BytesStart::new(LABELS_TAG)))?;
        for label in labels {
            serialize_label(label, writer)?;
        }
        serialize_end_tag(LABELS_TAG, writer)?;
    }

    serialize_end_tag(TEST_CASE_TAG, writer)
}

fn serialize_failure(
    failure: &Failure,
    writer: &mut Writer<impl io::Write>,
) -> quick_xml::Result<()> {
    let Failure {
        message,
        stack_trace,
    } = failure;

    writer.write_event(Event::Start(BytesStart::new(FAILURE_TAG)))?;
    serialize_text_element(MESSAGE_TAG, message, writer)?;
    if let Some(stack_trace) = stack_trace {
        serialize_text_element(STACK_TRACE_TAG, stack_trace, writer)?;
    }
    serialize_end_tag(FAILURE_TAG, writer)
}

fn serialize_step(step: &Step, writer: &mut Writer<impl io::Write>) -> quick_xml::Result<()> {
    let Step {
        name,
        start,
        stop,
        status,
        steps,
    } = step;

    let mut step_tag = BytesStart::new(STEP_TAG);
    step_tag.extend_attributes([
        ("start", start.to_string().as_str()),
        ("stop", stop.to_string().as_str()),
        ("status", status.map_or("", |s| s.as_str())),
    ]);
    writer.write_event(Event::Start(step_tag))?;

    serialize_text_element(NAME_TAG, name, writer)?;

    if !steps.is_empty() {
        writer.write_event(Event::Start(BytesStart::new(STEPS_TAG)))?;
        for step in steps {
            serialize_step(step, writer)?;
        }
        serialize_end_tag(STEPS_TAG, writer)?;
    }

    serialize_end_tag(STEP_TAG, writer)
}

fn serialize_attachment(
    attachment: &Attachment,
    writer: &mut Writer<impl io::Write>,
) -> quick_xml::Result<()> {
    let Attachment {
        title,
        source,
        mime_type,
        size,
    } = attachment;

    let mut attachment_tag = BytesStart::new(ATTACHMENT_TAG);
    attachment_tag.extend_attributes([
        ("title", title.as_str()),
        ("source", source.as_str()),
        ("type", mime_type.as_str()),
        ("size", size.to_string().as_str()),
    ]);
    writer.write_event(Event::Empty(attachment_tag))
}

fn serialize_label(label: &Label, writer: &mut Writer<impl io::Write>) -> quick_xml::Result<()> {
    let Label { name, value } = label;

    let mut label_tag = BytesStart::new(LABEL_TAG);
    label_tag.extend_attributes([("name", name.as_str()), ("value", value.as_str())]);
    writer.write_event(Event::Empty(label_tag))
}

fn serialize_text_element(
    tag: &str,
    content: &str,
    writer: &mut Writer<impl io::Write>,
) -> quick_xml::Result<()> {
    writer.write_event(Event::Start(BytesStart::new(tag)))?;
    writer.write_event(Event::Text(BytesText::new(content)))?;
    writer.write_event(Event::End(BytesEnd::new(tag)))
}

fn serialize_end_tag(tag: &str, writer: &mut Writer<impl io::Write>) -> quick_xml::Result<()> {
    writer.write_event(Event::End(BytesEnd::new(tag)))
}
