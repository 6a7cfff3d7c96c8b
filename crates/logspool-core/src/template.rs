//! Message render template
//!
//! A template is a literal string with `{placeholder}` substitutions.
//! Supported placeholders: `{data}`, `{name}`, `{id}`, `{timestamp}`.
//! Parsing is validated up front so an invalid template fails adapter
//! construction instead of the write path.

use crate::error::{Error, Result};
use crate::types::LogMessage;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Data,
    Name,
    Id,
    Timestamp,
}

/// A parsed message template
#[derive(Debug, Clone)]
pub struct Template {
    segments: Vec<Segment>,
}

impl Template {
    /// Parse a template string
    pub fn parse(input: &str) -> Result<Self> {
        let mut segments = Vec::new();
        let mut literal = String::new();
        let mut chars = input.chars();

        while let Some(c) = chars.next() {
            if c != '{' {
                literal.push(c);
                continue;
            }

            let mut placeholder = String::new();
            loop {
                match chars.next() {
                    Some('}') => break,
                    Some(c) => placeholder.push(c),
                    None => {
                        return Err(Error::template(format!(
                            "Unclosed placeholder in template: {:?}",
                            input
                        )))
                    }
                }
            }

            let segment = match placeholder.as_str() {
                "data" => Segment::Data,
                "name" => Segment::Name,
                "id" => Segment::Id,
                "timestamp" => Segment::Timestamp,
                other => {
                    return Err(Error::template(format!(
                        "Unknown placeholder {:?} in template {:?}",
                        other, input
                    )))
                }
            };

            if !literal.is_empty() {
                segments.push(Segment::Literal(std::mem::take(&mut literal)));
            }
            segments.push(segment);
        }

        if !literal.is_empty() {
            segments.push(Segment::Literal(literal));
        }

        Ok(Self { segments })
    }

    /// Render a message to the bytes that will be appended to its log file
    pub fn render(&self, message: &LogMessage) -> String {
        let mut out = String::new();
        for segment in &self.segments {
            match segment {
                Segment::Literal(s) => out.push_str(s),
                Segment::Data => out.push_str(&message.data),
                Segment::Name => out.push_str(message.container.display_name()),
                Segment::Id => out.push_str(&message.container.id),
                Segment::Timestamp => out.push_str(&chrono::Utc::now().to_rfc3339()),
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ContainerDetails;

    fn message(data: &str) -> LogMessage {
        LogMessage {
            container: ContainerDetails {
                id: "c1".to_string(),
                name: "/web-1".to_string(),
                ..Default::default()
            },
            data: data.to_string(),
        }
    }

    #[test]
    fn test_default_template() {
        let tmpl = Template::parse("{data}\n").unwrap();
        assert_eq!(tmpl.render(&message("hello")), "hello\n");
    }

    #[test]
    fn test_template_with_name_and_id() {
        let tmpl = Template::parse("{name} ({id}): {data}\n").unwrap();
        assert_eq!(tmpl.render(&message("boot")), "web-1 (c1): boot\n");
    }

    #[test]
    fn test_literal_only_template() {
        let tmpl = Template::parse("plain\n").unwrap();
        assert_eq!(tmpl.render(&message("ignored")), "plain\n");
    }

    #[test]
    fn test_unknown_placeholder_rejected() {
        let err = Template::parse("{payload}\n").unwrap_err();
        assert!(matches!(err, Error::TemplateError(_)));
    }

    #[test]
    fn test_unclosed_placeholder_rejected() {
        let err = Template::parse("{data").unwrap_err();
        assert!(matches!(err, Error::TemplateError(_)));
    }

    #[test]
    fn test_timestamp_renders_year() {
        let tmpl = Template::parse("[{timestamp}] {data}").unwrap();
        let rendered = tmpl.render(&message("x"));
        assert!(rendered.starts_with("[20"));
        assert!(rendered.ends_with("] x"));
    }
}
