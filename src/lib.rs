#![doc = include_str!("../README.md")]

extern crate alloc;

mod config;
mod context_path;
mod error;
mod extract;
mod facts;
mod materialize;
mod node_spec;
mod raw_tree;
mod reference_graph;
mod reference_index;
mod render;
mod scan;
mod schema;
mod template;
mod vocabulary;

pub use self::{
    config::*,
    context_path::{ContextPath, Segment},
    error::Error,
    extract::{PathFilter, extract_paths},
    facts::{FactTable, FactTables},
    materialize::{MaterializeOptions, Materializer, RecursionPolicy, materialize},
    node_spec::{Classification, Declaration, NodeSpec, Specification, TypeLocator, classify},
    raw_tree::parse_document,
    reference_graph::ReferenceGraph,
    reference_index::{DuplicatePolicy, IndexEntry, ReferenceIndex},
    render::{RenderFormat, RenderOptions, render_specification, render_template},
    scan::{ScanMatch, scan},
    schema::{ParsedSchema, SchemaParser, parse_schema},
    template::Template,
    vocabulary::{DEFAULT_PREFIX, PRIMITIVE_TYPES, Vocabulary},
};
