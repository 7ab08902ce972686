#![doc = include_str!("../README.md")]

use clap::Parser;
use core::error::Error;
use log::{LevelFilter, debug};
use std::{fs::read, io::stdout, path::PathBuf, process::exit};
use xsd_template::{
    Config, RenderFormat, RenderOptions, SchemaParser, Template, compile_config, read_config,
    render_specification, render_template,
};

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Arguments {
    /// A schema file.
    schema: PathBuf,
    /// A configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Names of top-level elements or types to materialize.
    #[arg(short, long)]
    root: Vec<String>,
    /// Sets an output format.
    #[arg(long, default_value = "text")]
    format: RenderFormat,
    /// Prints node specifications instead of templates.
    #[arg(long)]
    facts: bool,
    /// Colors text output.
    #[arg(long)]
    color: bool,
    /// Becomes verbose.
    #[arg(long)]
    verbose: bool,
}

fn main() {
    if let Err(error) = run() {
        eprintln!("{error}");
        exit(1)
    }
}

fn run() -> Result<(), Box<dyn Error>> {
    let Arguments {
        schema,
        config,
        root,
        format,
        facts,
        color,
        verbose,
    } = Arguments::parse();

    env_logger::Builder::new()
        .filter_level(if verbose {
            LevelFilter::Debug
        } else {
            LevelFilter::Warn
        })
        .parse_default_env()
        .init();
    colored::control::set_override(color);

    let mut config = if let Some(path) = &config {
        compile_config(read_config(path)?)
    } else {
        Config::default()
    };

    if !root.is_empty() {
        config = config.set_roots(root);
    }

    let schema = SchemaParser::new()
        .set_allow_duplicate_names(config.allow_duplicate_names())
        .parse(&read(&schema)?)?;
    let options = RenderOptions::new().set_format(format).set_color(color);
    let mut output = stdout().lock();

    if facts {
        render_specification(schema.specification(), &options, &mut output)?;
        return Ok(());
    }

    let roots = if config.roots().next().is_some() {
        config
            .roots()
            .map(|name| schema.find_root(name))
            .collect::<Result<Vec<_>, _>>()?
    } else {
        schema.roots().collect()
    };
    let materializer = schema.materializer(config.materialize());
    let mut template = Template::Map(Default::default());

    for root in roots {
        debug!("materializing {root}");
        template.merge(materializer.materialize(root)?);
    }

    render_template(&template, &options, &mut output)?;

    Ok(())
}
