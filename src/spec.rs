//! Specification Rendering
//!
//! Walks the annotated schema and emits the Markdown specification:
//!
//! ```text
//! banner (4 comment lines)
//! # title / version / description
//! ## General structure      fixed table of the four top-level sections
//! ## Header                 root fields other than the collections
//! ## Settings               one ### per $defs.settings item
//! ## Data Sources           one ### per $defs.data_sources item
//! ## Data Sets              one ### per $defs.data_sets item
//! ## Appendix — Common Types one ### per $defs.types entry
//! ```
//!
//! Output order follows the declaration order of the input mappings, so the
//! same file always renders to the same bytes.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use serde_json::{Map, Value};

use crate::config::RenderConfig;
use crate::document::{write_creating_parents, SchemaDocument};
use crate::error::{Result, SchemaError};
use crate::markdown::{code_cell, escape_cell, Table};
use crate::names::{title_case, NameResolver, TYPES_GROUP};
use crate::shape::{detect_type_shape, TypeShape};

/// A top-level collection of kind-tagged items
#[derive(Debug, Clone, Copy)]
pub struct Section {
    pub key: &'static str,
    pub title: &'static str,
    pub description: &'static str,
}

/// Collections in rendering order
pub const SECTIONS: &[Section] = &[
    Section {
        key: "settings",
        title: "Settings",
        description: "Experimental setup and specimen metadata.",
    },
    Section {
        key: "data_sources",
        title: "Data Sources",
        description: "Sensors and processing blocks that produce data.",
    },
    Section {
        key: "data_sets",
        title: "Data Sets",
        description: "Data containers linked to one or more data sources.",
    },
];

const HEADER_DESCRIPTION: &str =
    "Top-level metadata fields (`title`, `description`, `version`, authorship and links).";

pub const UNKNOWN_VERSION: &str = "unknown";

pub const APPENDIX_HEADING: &str = "## Appendix — Common Types";

fn is_section(key: &str) -> bool {
    SECTIONS.iter().any(|s| s.key == key)
}

/// Append a JSON pointer token, escaping `~` and `/`
fn child(pointer: &str, token: &str) -> String {
    format!("{}/{}", pointer, token.replace('~', "~0").replace('/', "~1"))
}

fn properties_of(schema: &Value) -> Option<&Map<String, Value>> {
    schema.get("properties").and_then(Value::as_object)
}

fn non_empty_str<'a>(schema: &'a Value, key: &str) -> Option<&'a str> {
    schema.get(key).and_then(Value::as_str).filter(|s| !s.is_empty())
}

/// `description`, else `title`, else empty
fn description_of(schema: &Value) -> &str {
    non_empty_str(schema, "description")
        .or_else(|| non_empty_str(schema, "title"))
        .unwrap_or("")
}

fn required_of(schema: &Value) -> HashSet<&str> {
    schema
        .get("required")
        .and_then(Value::as_array)
        .map(|names| names.iter().filter_map(Value::as_str).collect())
        .unwrap_or_default()
}

/// Version string from the root `properties.version.const`
pub fn schema_version(schema: &Value) -> &str {
    properties_of(schema)
        .and_then(|props| props.get("version"))
        .and_then(|version| version.get("const"))
        .and_then(Value::as_str)
        .unwrap_or(UNKNOWN_VERSION)
}

/// Label in a collection item heading: its `kind` const, or `<section>/<key>`
pub fn kind_label(section_key: &str, item_key: &str, item_schema: &Value) -> String {
    properties_of(item_schema)
        .and_then(|props| props.get("kind"))
        .and_then(|kind| non_empty_str(kind, "const"))
        .map(str::to_string)
        .unwrap_or_else(|| format!("{}/{}", section_key, item_key))
}

/// Renders type expressions, optionally refusing shapes it cannot classify
struct TypeRenderer<'r> {
    names: &'r NameResolver,
    strict: bool,
}

impl TypeRenderer<'_> {
    fn render(&self, schema: &Value, pointer: &str) -> Result<String> {
        let rendered = match detect_type_shape(schema) {
            TypeShape::Const(Value::String(s)) => format!("\"{}\" (fixed)", s),
            TypeShape::Const(other) => format!("\"{}\" (fixed)", other),
            TypeShape::Enum(values) => values
                .iter()
                .map(Value::to_string)
                .collect::<Vec<_>>()
                .join(" | "),
            TypeShape::Ref(target) => self.names.resolve_ref(target),
            TypeShape::Union(options) => self.render_all(schema, options, pointer, " | ")?,
            TypeShape::Intersection(parts) => self.render_all(schema, parts, pointer, " + ")?,
            TypeShape::Scalars(names) => names.join(" | "),
            TypeShape::Array { items: Some(items) } => {
                format!("array[{}]", self.render(items, &child(pointer, "items"))?)
            }
            TypeShape::Array { items: None } => "array".to_string(),
            TypeShape::Scalar(name) => name.to_string(),
            TypeShape::Untyped => "object".to_string(),
            TypeShape::Unknown { reason } => {
                let pointer = if pointer.is_empty() { "/" } else { pointer };
                if self.strict {
                    return Err(SchemaError::UnclassifiedShape {
                        pointer: pointer.to_string(),
                        reason,
                    });
                }
                tracing::warn!(pointer, %reason, "rendering unclassified schema as object");
                "object".to_string()
            }
        };
        Ok(rendered)
    }

    fn render_all(
        &self,
        schema: &Value,
        options: &[Value],
        pointer: &str,
        separator: &str,
    ) -> Result<String> {
        let keyword = ["anyOf", "oneOf", "allOf"]
            .into_iter()
            .find(|k| schema.get(*k).is_some())
            .unwrap_or("anyOf");
        let base = child(pointer, keyword);
        let rendered = options
            .iter()
            .enumerate()
            .map(|(i, option)| self.render(option, &child(&base, &i.to_string())))
            .collect::<Result<Vec<_>>>()?;
        Ok(rendered.join(separator))
    }
}

/// Render a type expression, falling back to `object` for unclassifiable shapes
pub fn render_type(schema: &Value, names: &NameResolver) -> String {
    let renderer = TypeRenderer { names, strict: false };
    renderer
        .render(schema, "")
        .unwrap_or_else(|_| "object".to_string())
}

/// Renders the full Markdown specification for one schema
pub struct SpecRenderer<'a> {
    schema: &'a Value,
    config: &'a RenderConfig,
    names: NameResolver,
}

impl<'a> SpecRenderer<'a> {
    pub fn new(schema: &'a Value, config: &'a RenderConfig) -> Self {
        Self {
            schema,
            config,
            names: NameResolver::from_config(config),
        }
    }

    fn types(&self) -> TypeRenderer<'_> {
        TypeRenderer {
            names: &self.names,
            strict: self.config.strict,
        }
    }

    fn defs_group(&self, group: &str) -> Option<&'a Map<String, Value>> {
        self.schema
            .get("$defs")
            .and_then(|defs| defs.get(group))
            .and_then(Value::as_object)
    }

    /// Render the document. `source_label` is the schema path shown in the banner.
    pub fn render(&self, source_label: &str) -> Result<String> {
        let mut lines = Vec::new();
        self.push_preamble(&mut lines, source_label);
        self.push_overview(&mut lines);
        self.push_header(&mut lines)?;
        for section in SECTIONS {
            self.push_section(&mut lines, section)?;
        }
        self.push_appendix(&mut lines)?;

        let mut document = lines.join("\n").trim_end().to_string();
        document.push('\n');
        Ok(document)
    }

    fn push_preamble(&self, lines: &mut Vec<String>, source_label: &str) {
        lines.extend([
            "<!-- THIS FILE IS GENERATED AUTOMATICALLY -->".to_string(),
            format!("<!-- Source: {} -->", source_label),
            format!("<!-- Command: {} -->", self.config.command),
            "<!-- DO NOT EDIT BY HAND -->".to_string(),
            String::new(),
            format!("# {}", self.config.title),
            String::new(),
            format!("> Version: `{}`", escape_cell(schema_version(self.schema))),
            String::new(),
            escape_cell(self.schema.get("description").and_then(Value::as_str).unwrap_or("")),
            String::new(),
        ]);
    }

    fn push_overview(&self, lines: &mut Vec<String>) {
        let mut table = Table::new(&["Section", "Description"]);
        table.row([code_cell("header"), escape_cell(HEADER_DESCRIPTION)]);
        for section in SECTIONS {
            table.row([code_cell(section.key), escape_cell(section.description)]);
        }
        lines.push("## General structure".to_string());
        lines.push(String::new());
        lines.extend(table.lines());
    }

    fn push_header(&self, lines: &mut Vec<String>) -> Result<()> {
        let required = required_of(self.schema);
        let mut table = Table::fields();
        if let Some(props) = properties_of(self.schema) {
            for (name, field) in props.iter().filter(|(name, _)| !is_section(name)) {
                let pointer = child("/properties", name);
                table.row(self.field_row(name, field, required.contains(name.as_str()), &pointer)?);
            }
        }
        tracing::debug!(fields = table.len(), "rendered header");

        lines.extend([String::new(), "## Header".to_string(), String::new()]);
        lines.extend(table.lines());
        Ok(())
    }

    fn push_section(&self, lines: &mut Vec<String>, section: &Section) -> Result<()> {
        let collection = properties_of(self.schema).and_then(|props| props.get(section.key));
        let description = collection
            .and_then(|c| c.get("description"))
            .and_then(Value::as_str)
            .unwrap_or("");
        let kinds = match collection {
            Some(collection) => self.allowed_kinds(collection, &child("/properties", section.key))?,
            None => "N/A".to_string(),
        };

        lines.extend([
            String::new(),
            format!("## {}", section.title),
            String::new(),
            escape_cell(description),
            String::new(),
            format!("Allowed item kinds: {}", escape_cell(&kinds)),
            String::new(),
        ]);

        let items = self.defs_group(section.key);
        for (item_key, item) in items.into_iter().flatten() {
            let title = non_empty_str(item, "title")
                .map(str::to_string)
                .unwrap_or_else(|| title_case(item_key));
            let kind = kind_label(section.key, item_key, item);
            lines.push(format!("### {} (`{}`)", title, escape_cell(&kind)));
            lines.push(String::new());
            if let Some(description) = non_empty_str(item, "description") {
                lines.push(escape_cell(description));
                lines.push(String::new());
            }
            let pointer = child(&child("/$defs", section.key), item_key);
            lines.extend(self.fields_table(item, &pointer)?.lines());
            lines.push(String::new());
        }
        tracing::debug!(
            section = section.key,
            items = items.map_or(0, Map::len),
            "rendered section"
        );
        Ok(())
    }

    fn push_appendix(&self, lines: &mut Vec<String>) -> Result<()> {
        lines.push(APPENDIX_HEADING.to_string());
        lines.push(String::new());

        let types = self.defs_group(TYPES_GROUP);
        for (type_name, type_schema) in types.into_iter().flatten() {
            lines.push(format!("### {}", self.names.display_name(type_name)));
            lines.push(String::new());
            if let Some(description) = non_empty_str(type_schema, "description") {
                lines.push(escape_cell(description));
                lines.push(String::new());
            }

            let pointer = child(&child("/$defs", TYPES_GROUP), type_name);
            if type_schema.get("properties").is_some() {
                lines.extend(self.fields_table(type_schema, &pointer)?.lines());
            } else {
                let base = self.types().render(type_schema, &pointer)?;
                let mut table = Table::new(&["Property", "Value"]);
                table.row([code_cell("type"), escape_cell(&base)]);
                lines.extend(table.lines());
            }
            lines.push(String::new());
        }
        tracing::debug!(types = types.map_or(0, Map::len), "rendered appendix");
        Ok(())
    }

    fn field_row(&self, name: &str, field: &Value, required: bool, pointer: &str) -> Result<[String; 4]> {
        let rendered = self.types().render(field, pointer)?;
        Ok([
            code_cell(name),
            escape_cell(&rendered),
            if required { "Yes" } else { "" }.to_string(),
            escape_cell(description_of(field)),
        ])
    }

    fn fields_table(&self, schema: &Value, pointer: &str) -> Result<Table> {
        let required = required_of(schema);
        let mut table = Table::fields();
        let props_pointer = child(pointer, "properties");
        for (name, field) in properties_of(schema).into_iter().flatten() {
            let row = self.field_row(
                name,
                field,
                required.contains(name.as_str()),
                &child(&props_pointer, name),
            )?;
            table.row(row);
        }
        Ok(table)
    }

    /// Labels of the alternatives a collection's items may take
    fn allowed_kinds(&self, collection: &Value, pointer: &str) -> Result<String> {
        let items = collection.get("items");
        let Some((keyword, options)) = ["anyOf", "oneOf"].into_iter().find_map(|k| {
            items
                .and_then(|items| items.get(k))
                .and_then(Value::as_array)
                .map(|options| (k, options))
        }) else {
            return Ok("N/A".to_string());
        };

        let base = child(&child(pointer, "items"), keyword);
        let mut labels = Vec::with_capacity(options.len());
        for (i, option) in options.iter().enumerate() {
            let label = match option.get("$ref").and_then(Value::as_str) {
                Some(target) if !target.is_empty() => self.names.resolve_ref(target),
                _ => self.types().render(option, &child(&base, &i.to_string()))?,
            };
            labels.push(label);
        }
        if labels.is_empty() {
            Ok("N/A".to_string())
        } else {
            Ok(labels.join(" | "))
        }
    }
}

/// Load `schema_path` and render its specification in memory
pub fn render_spec_file(schema_path: &Path, config: &RenderConfig) -> Result<String> {
    let doc = SchemaDocument::load(schema_path)?;
    SpecRenderer::new(&doc.content, config).render(&doc.display_path())
}

/// Render `schema_path` into `output`, creating parent directories as needed
pub fn generate_spec_file(schema_path: &Path, output: &Path, config: &RenderConfig) -> Result<PathBuf> {
    let markdown = render_spec_file(schema_path, config)?;
    write_creating_parents(output, &markdown)?;
    tracing::info!(output = %output.display(), bytes = markdown.len(), "specification written");
    Ok(output.to_path_buf())
}
