mod options;

pub use self::options::{RenderFormat, RenderOptions};
use crate::{error::Error, node_spec::Specification, template::Template};
use colored::Colorize;
use serde::Serialize;
use std::io::Write;
use tabled::{
    Table,
    settings::{Color, Style, themes::Colorization},
};

const INDENT: &str = "  ";

#[derive(Debug, Serialize)]
struct RenderedNode<'a> {
    context: String,
    name: &'a str,
    #[serde(rename = "type")]
    type_locator: String,
    classification: String,
}

impl RenderedNode<'_> {
    fn into_row(self) -> Vec<String> {
        vec![
            self.context,
            self.name.into(),
            self.type_locator,
            self.classification,
        ]
    }
}

/// Renders a template.
pub fn render_template(
    template: &Template,
    options: &RenderOptions,
    writer: &mut impl Write,
) -> Result<(), Error> {
    match options.format() {
        RenderFormat::Text => render_text(template, 0, options, writer)?,
        RenderFormat::Json => {
            serde_json::to_writer_pretty(&mut *writer, template)?;
            writeln!(writer)?;
        }
    }

    Ok(())
}

fn render_text(
    template: &Template,
    depth: usize,
    options: &RenderOptions,
    writer: &mut impl Write,
) -> Result<(), Error> {
    let indent = INDENT.repeat(depth);

    match template {
        Template::Leaf(leaf) => writeln!(writer, "{indent}{}", paint_leaf(leaf, options))?,
        Template::Map(map) => {
            for (name, template) in map {
                let name = paint_name(name, options);

                if let Template::Leaf(leaf) = template {
                    writeln!(writer, "{indent}{name}: {}", paint_leaf(leaf, options))?;
                } else {
                    writeln!(writer, "{indent}{name}")?;
                    render_text(template, depth + 1, options, writer)?;
                }
            }
        }
    }

    Ok(())
}

fn paint_name(name: &str, options: &RenderOptions) -> String {
    if options.color() {
        name.bold().to_string()
    } else {
        name.into()
    }
}

fn paint_leaf(leaf: &str, options: &RenderOptions) -> String {
    if options.color() {
        leaf.green().to_string()
    } else {
        leaf.into()
    }
}

/// Renders a table of node specifications.
pub fn render_specification(
    specification: &Specification,
    options: &RenderOptions,
    writer: &mut impl Write,
) -> Result<(), Error> {
    let nodes = specification.iter().map(|(context, node)| RenderedNode {
        context: context.to_string(),
        name: node.name(),
        type_locator: node.type_locator().to_string(),
        classification: node.classification().to_string(),
    });

    match options.format() {
        RenderFormat::Text => {
            let mut table = Table::from_iter(
                [vec![
                    "context".into(),
                    "name".into(),
                    "type".into(),
                    "classification".into(),
                ]]
                .into_iter()
                .chain(nodes.map(RenderedNode::into_row)),
            );
            table.with(Style::markdown());

            if options.color() {
                table.with(Colorization::columns([
                    Color::FG_WHITE,
                    Color::FG_CYAN,
                    Color::FG_GREEN,
                    Color::FG_YELLOW,
                ]));
            }

            writeln!(writer, "{table}")?;
        }
        RenderFormat::Json => {
            serde_json::to_writer_pretty(&mut *writer, &nodes.collect::<Vec<_>>())?;
            writeln!(writer)?;
        }
    }

    Ok(())
}
