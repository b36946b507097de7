//! Output formatting for the CLI.

use crate::config::OutputFormat;
use crate::error::Result;
use colored::*;
use nanoview_domain::{MatchedField, Template};
use nanoview_viewer::ViewResult;
use tabled::{
    builder::Builder,
    settings::{object::Rows, Alignment, Modify, Style},
};

/// Output formatter.
pub struct Formatter {
    format: OutputFormat,
    color_enabled: bool,
}

impl Formatter {
    /// Create a new formatter.
    pub fn new(format: OutputFormat, color_enabled: bool) -> Self {
        Self {
            format,
            color_enabled,
        }
    }

    /// Format a viewed nanopublication.
    pub fn format_view(&self, result: &ViewResult, with_graphs: bool) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(result.to_json(with_graphs)?),
            OutputFormat::Table => Ok(self.format_view_table(result, with_graphs)),
            OutputFormat::Quiet => Ok(format_view_quiet(result)),
        }
    }

    /// Format the statements and placeholders of a template.
    pub fn format_template(&self, template: &Template) -> Result<String> {
        match self.format {
            OutputFormat::Json => format_template_json(template),
            OutputFormat::Table => Ok(self.format_template_table(template)),
            OutputFormat::Quiet => Ok(template.statement_order.join("\n")),
        }
    }

    fn format_view_table(&self, result: &ViewResult, with_graphs: bool) -> String {
        let info = &result.info;
        let mut sections = Vec::new();

        let mut header = Vec::new();
        if let Some(title) = &info.title {
            header.push(self.colorize(title, "cyan"));
        }
        let metadata = [
            ("URI", &info.uri),
            ("Template", &result.template_title),
            ("Author", &info.author_name),
            ("Creator", &info.author),
            ("ORCID", &info.author_orcid),
            ("Created", &info.date),
            ("License", &info.license),
        ];
        for (name, value) in metadata {
            if let Some(value) = value {
                header.push(format!("{}: {}", name, value));
            }
        }
        if !header.is_empty() {
            sections.push(header.join("\n"));
        }

        if result.fields.is_empty() && result.unmatched.is_empty() {
            sections.push(self.colorize("No assertion triples found.", "yellow"));
        }
        if !result.fields.is_empty() {
            sections.push(fields_table(&result.fields, ["Field", "Value"]));
        }
        if !result.unmatched.is_empty() {
            let title = if result.fields.is_empty() {
                "Assertion"
            } else {
                "Other statements"
            };
            sections.push(format!(
                "{}\n{}",
                self.colorize(title, "magenta"),
                fields_table(&result.unmatched, ["Predicate", "Value"])
            ));
        }
        if !result.labels_resolved {
            sections.push(self.warning("Labels could not be resolved; showing IRIs"));
        }

        if with_graphs {
            let mut builder = Builder::default();
            builder.push_record(["Graph", "Subject", "Predicate", "Object"]);
            let graphs = [&result.assertion, &result.provenance, &result.pubinfo];
            for graph in graphs {
                for triple in graph {
                    builder.push_record([
                        graph.name.as_str(),
                        triple.subject.as_str(),
                        triple.predicate.as_str(),
                        triple.object.as_str(),
                    ]);
                }
            }
            sections.push(styled(builder));
        }

        sections.join("\n\n")
    }

    fn format_template_table(&self, template: &Template) -> String {
        let mut sections = Vec::new();
        if let Some(title) = &template.title {
            sections.push(self.colorize(title, "cyan"));
        }
        if template.is_empty() {
            sections.push(self.colorize("No statements found.", "yellow"));
            return sections.join("\n\n");
        }

        let mut statements = Builder::default();
        statements.push_record(["Statement", "Subject", "Predicate", "Object", "Flags"]);
        for stmt in template.ordered_statements() {
            let mut flags = Vec::new();
            if stmt.optional {
                flags.push("optional");
            }
            if stmt.repeatable {
                flags.push("repeatable");
            }
            if template.groups_constraining(&stmt.object).next().is_some() {
                flags.push("grouped");
            }
            statements.push_record([
                stmt.id.as_str(),
                stmt.subject.as_str(),
                stmt.predicate.as_str(),
                stmt.object.as_str(),
                flags.join(", ").as_str(),
            ]);
        }
        sections.push(styled(statements));

        let mut ids: Vec<&String> = template.placeholders.keys().collect();
        ids.sort();
        if !ids.is_empty() {
            let mut placeholders = Builder::default();
            placeholders.push_record(["Placeholder", "Kinds", "Label"]);
            for id in ids {
                let Some(placeholder) = template.placeholder(id) else {
                    continue;
                };
                let kinds: Vec<&str> = placeholder.kinds.iter().map(|k| k.as_str()).collect();
                placeholders.push_record([id.as_str(), kinds.join(", ").as_str(), placeholder.label.as_str()]);
            }
            sections.push(styled(placeholders));
        }

        sections.join("\n\n")
    }

    /// Format a success message.
    pub fn success(&self, message: &str) -> String {
        self.colorize(&format!("✓ {}", message), "green")
    }

    /// Format an info message.
    pub fn info(&self, message: &str) -> String {
        self.colorize(&format!("ℹ {}", message), "blue")
    }

    /// Format a warning message.
    pub fn warning(&self, message: &str) -> String {
        self.colorize(&format!("⚠ {}", message), "yellow")
    }

    /// Colorize text if color is enabled.
    fn colorize(&self, text: &str, color: &str) -> String {
        if !self.color_enabled {
            return text.to_string();
        }

        match color {
            "red" => text.red().to_string(),
            "green" => text.green().to_string(),
            "blue" => text.blue().to_string(),
            "yellow" => text.yellow().to_string(),
            "cyan" => text.cyan().bold().to_string(),
            "magenta" => text.magenta().to_string(),
            _ => text.to_string(),
        }
    }
}

fn styled(builder: Builder) -> String {
    let mut table = builder.build();
    table
        .with(Style::rounded())
        .with(Modify::new(Rows::first()).with(Alignment::center()));
    table.to_string()
}

/// One row per field, values on separate lines of the value cell
fn fields_table(fields: &[MatchedField], header: [&str; 2]) -> String {
    let mut builder = Builder::default();
    builder.push_record(header);
    for field in fields {
        let values: Vec<String> = field.values.iter().map(|v| value_text(v.display.as_str(), &v.raw)).collect();
        builder.push_record([field.label.to_string(), values.join("\n")]);
    }
    styled(builder)
}

fn value_text(display: &str, raw: &str) -> String {
    if display == raw {
        raw.to_string()
    } else {
        format!("{} <{}>", display, raw)
    }
}

fn format_view_quiet(result: &ViewResult) -> String {
    result
        .fields
        .iter()
        .chain(&result.unmatched)
        .flat_map(|field| {
            field
                .values
                .iter()
                .map(move |v| format!("{}\t{}", field.label, v.display))
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn format_template_json(template: &Template) -> Result<String> {
    let statements: Vec<serde_json::Value> = template
        .ordered_statements()
        .map(|s| {
            serde_json::json!({
                "id": s.id,
                "subject": s.subject,
                "predicate": s.predicate,
                "object": s.object,
                "optional": s.optional,
                "repeatable": s.repeatable,
            })
        })
        .collect();

    let mut ids: Vec<&String> = template.placeholders.keys().collect();
    ids.sort();
    let placeholders: Vec<serde_json::Value> = ids
        .into_iter()
        .filter_map(|id| template.placeholder(id))
        .map(|p| {
            serde_json::json!({
                "id": p.id,
                "kinds": p.kinds.iter().map(|k| k.as_str()).collect::<Vec<_>>(),
                "label": p.label(),
                "prefix": p.prefix,
                "possible_values": p.possible_values,
            })
        })
        .collect();

    let groups: Vec<serde_json::Value> = template
        .grouped_statements
        .iter()
        .map(|g| {
            serde_json::json!({
                "id": g.id,
                "statements": g.statement_ids,
                "optional": g.optional,
            })
        })
        .collect();

    Ok(serde_json::to_string_pretty(&serde_json::json!({
        "title": template.title,
        "description": template.description,
        "tag": template.tag,
        "statements": statements,
        "placeholders": placeholders,
        "groups": groups,
    }))?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use nanoview_domain::{FieldValue, Graph, GraphName, Label, StatementPattern};
    use nanoview_viewer::PublicationInfo;

    fn create_test_result() -> ViewResult {
        let field = MatchedField {
            statement_id: Some("sub:st1".to_string()),
            label: Label::text("Topic"),
            predicate_uri: Some("http://example.org/topic".to_string()),
            values: vec![FieldValue::raw("http://www.wikidata.org/entity/Q42").with_display(Label::text("Douglas Adams"))],
            ..Default::default()
        };
        let unmatched = MatchedField::unmatched(
            Label::text("note"),
            "http://example.org/note",
            FieldValue::raw("hello"),
        );
        ViewResult {
            info: PublicationInfo {
                title: Some("Example nanopub".to_string()),
                uri: Some("https://w3id.org/np/RAexample".to_string()),
                ..Default::default()
            },
            template_title: Some("Annotating a paper".to_string()),
            template_tag: None,
            template_description: None,
            fields: vec![field],
            unmatched: vec![unmatched],
            main_entity: None,
            bindings: Default::default(),
            assertion: Graph::empty(GraphName::Assertion),
            provenance: Graph::empty(GraphName::Provenance),
            pubinfo: Graph::empty(GraphName::Pubinfo),
            labels_resolved: true,
        }
    }

    #[test]
    fn test_table_format() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        let output = formatter.format_view(&create_test_result(), false).unwrap();
        assert!(output.contains("Example nanopub"));
        assert!(output.contains("URI: https://w3id.org/np/RAexample"));
        assert!(output.contains("Douglas Adams <http://www.wikidata.org/entity/Q42>"));
        assert!(output.contains("Other statements"));
        assert!(!output.contains("Graph"));
    }

    #[test]
    fn test_json_format() {
        let formatter = Formatter::new(OutputFormat::Json, false);
        let output = formatter.format_view(&create_test_result(), true).unwrap();
        let json: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(json["fields"][0]["label"], "Topic");
        assert_eq!(json["unmatched"][0]["values"][0]["raw"], "hello");
        assert!(json["graphs"]["assertion"].as_array().unwrap().is_empty());
    }

    #[test]
    fn test_quiet_format() {
        let formatter = Formatter::new(OutputFormat::Quiet, false);
        let output = formatter.format_view(&create_test_result(), false).unwrap();
        assert_eq!(output, "Topic\tDouglas Adams\nnote\thello");
    }

    #[test]
    fn test_unresolved_labels_warning() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        let mut result = create_test_result();
        result.labels_resolved = false;
        let output = formatter.format_view(&result, false).unwrap();
        assert!(output.contains("⚠ Labels could not be resolved"));
    }

    #[test]
    fn test_template_formats() {
        let mut template = Template::default();
        template.title = Some("Annotating a paper".to_string());
        template.statement_order.push("sub:st1".to_string());
        template.statements.insert(
            "sub:st1".to_string(),
            StatementPattern {
                id: "sub:st1".to_string(),
                subject: "sub:paper".to_string(),
                predicate: "http://example.org/topic".to_string(),
                object: "sub:topic".to_string(),
                optional: true,
                repeatable: false,
                grouped: false,
            },
        );

        let table = Formatter::new(OutputFormat::Table, false).format_template(&template).unwrap();
        assert!(table.contains("Annotating a paper"));
        assert!(table.contains("optional"));

        let quiet = Formatter::new(OutputFormat::Quiet, false).format_template(&template).unwrap();
        assert_eq!(quiet, "sub:st1");

        let json = Formatter::new(OutputFormat::Json, false).format_template(&template).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["statements"][0]["object"], "sub:topic");
    }

    #[test]
    fn test_colorize_disabled() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        assert_eq!(formatter.success("test"), "✓ test");
    }
}
