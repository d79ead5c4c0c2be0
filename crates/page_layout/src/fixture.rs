//! JSON scene descriptions.
//!
//! ```json
//! {
//!   "viewport": { "width": 400, "height": 300 },
//!   "rules": { "row": "display: flex; gap: 10px", "cell": "flex: 1; height: 20px" },
//!   "text": { "advance": 8, "line_height": 16 },
//!   "roots": [
//!     { "id": "bar", "classes": ["row"], "children": [
//!       { "classes": ["cell"] },
//!       { "kind": "text", "text": "hello" }
//!     ] }
//!   ]
//! }
//! ```
//!
//! Class names are interned in sorted order, so when two classes declare the
//! same property the one that sorts last wins.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use anyhow::{Context as _, Result, bail};
use css_archetypes::{ClassRules, StyleProperty, parse_declarations};
use layout_arrays::{ContentSize, IntrinsicSize};
use log::debug;
use node_table::{Atom, NodeId, NodeKind};
use rustc_hash::FxHashMap;
use serde::Deserialize;

use crate::config::EngineConfig;
use crate::document::Document;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct SceneSpec {
    #[serde(default)]
    viewport: Option<ViewportSpec>,
    #[serde(default)]
    rules: BTreeMap<String, String>,
    #[serde(default)]
    text: TextSpec,
    roots: Vec<NodeSpec>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ViewportSpec {
    width: f32,
    height: f32,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields, default)]
struct TextSpec {
    advance: f32,
    line_height: f32,
}

impl Default for TextSpec {
    fn default() -> Self {
        Self {
            advance: 8.0,
            line_height: 16.0,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
enum KindSpec {
    #[default]
    Element,
    Text,
    Comment,
    Document,
    Doctype,
}

impl From<KindSpec> for NodeKind {
    fn from(kind: KindSpec) -> Self {
        match kind {
            KindSpec::Element => Self::Element,
            KindSpec::Text => Self::Text,
            KindSpec::Comment => Self::Comment,
            KindSpec::Document => Self::Document,
            KindSpec::Doctype => Self::Doctype,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct NodeSpec {
    #[serde(default)]
    id: Option<String>,
    #[serde(default)]
    kind: KindSpec,
    #[serde(default)]
    tag: Option<String>,
    #[serde(default)]
    classes: Vec<String>,
    #[serde(default)]
    text: Option<String>,
    #[serde(default)]
    children: Vec<NodeSpec>,
}

/// Text measured with a fixed advance per character, wrapping greedily at
/// the available width.
#[derive(Clone, Debug, Default)]
pub struct FixedAdvanceText {
    pub advance: f32,
    pub line_height: f32,
    lengths: FxHashMap<Atom, usize>,
}

impl FixedAdvanceText {
    pub fn new(advance: f32, line_height: f32) -> Self {
        Self {
            advance: advance.max(0.0),
            line_height: line_height.max(0.0),
            lengths: FxHashMap::default(),
        }
    }

    /// Record the character count of the text interned as `atom`.
    pub fn insert(&mut self, atom: Atom, text: &str) {
        self.lengths.insert(atom, text.chars().count());
    }
}

impl IntrinsicSize for FixedAdvanceText {
    fn measure(&self, _: NodeId, text: Option<Atom>, available_width: Option<f32>) -> ContentSize {
        let chars = text
            .and_then(|atom| self.lengths.get(&atom))
            .copied()
            .unwrap_or(0);
        if chars == 0 || self.advance <= 0.0 {
            return ContentSize::ZERO;
        }
        let natural = chars as f32 * self.advance;
        match available_width.filter(|width| *width < natural) {
            Some(width) => {
                let per_line = (width / self.advance).floor().max(1.0);
                let lines = (chars as f32 / per_line).ceil();
                ContentSize {
                    width: per_line * self.advance,
                    height: lines * self.line_height,
                }
            }
            None => ContentSize {
                width: natural,
                height: self.line_height,
            },
        }
    }
}

#[derive(Debug, Default)]
struct Interner {
    atoms: FxHashMap<String, Atom>,
}

impl Interner {
    fn intern(&mut self, text: &str) -> Result<Atom> {
        if let Some(atom) = self.atoms.get(text) {
            return Ok(*atom);
        }
        let atom = Atom::from_index(self.atoms.len()).context("atom space exhausted")?;
        self.atoms.insert(text.to_owned(), atom);
        Ok(atom)
    }
}

/// A loaded document plus the nodes its description named.
#[derive(Debug)]
pub struct Fixture {
    pub document: Document,
    /// `id` of a node description to its node
    pub ids: FxHashMap<String, NodeId>,
}

impl Fixture {
    pub fn node(&self, id: &str) -> Option<NodeId> {
        self.ids.get(id).copied()
    }
}

/// Parse a `name: value; ...` block, failing on the first bad declaration.
fn parse_rule(block: &str) -> Result<Vec<StyleProperty>> {
    let mut properties = Vec::new();
    for declaration in block.split(';').filter(|text| !text.trim().is_empty()) {
        let Some((name, value)) = declaration.split_once(':') else {
            bail!("missing `:` in `{}`", declaration.trim());
        };
        let parsed = parse_declarations(name, value)
            .with_context(|| format!("declaration `{}`", declaration.trim()))?;
        properties.extend(parsed);
    }
    Ok(properties)
}

struct Builder {
    document: Document,
    interner: Interner,
    text: FixedAdvanceText,
    ids: FxHashMap<String, NodeId>,
}

impl Builder {
    fn add(&mut self, spec: &NodeSpec, parent: Option<NodeId>) -> Result<()> {
        let kind = NodeKind::from(spec.kind);
        let tag = spec
            .tag
            .as_deref()
            .map(|tag| self.interner.intern(tag))
            .transpose()?;
        let text = match (&spec.text, kind) {
            (Some(content), NodeKind::Text) => {
                let atom = self.interner.intern(content)?;
                self.text.insert(atom, content);
                Some(atom)
            }
            (Some(_), _) => bail!("only text nodes carry text"),
            (None, _) => None,
        };
        let node = self.document.add_node(kind, tag, text, parent);

        if let Some(id) = &spec.id {
            let atom = self.interner.intern(id)?;
            self.document.nodes.set_attributes(node, Some(atom), None, None);
            if self.ids.insert(id.clone(), node).is_some() {
                bail!("duplicate node id `{id}`");
            }
        }
        if !spec.classes.is_empty() {
            if kind != NodeKind::Element {
                bail!("{kind:?} nodes cannot carry classes");
            }
            let classes = spec
                .classes
                .iter()
                .map(|class| self.interner.intern(class))
                .collect::<Result<Vec<Atom>>>()?;
            self.document.assign_classes(node, &classes);
        }
        for (position, child) in spec.children.iter().enumerate() {
            self.add(child, Some(node))
                .with_context(|| format!("child {position} of {node}"))?;
        }
        Ok(())
    }
}

/// Build a [`Fixture`] from a JSON scene description.
///
/// # Errors
/// Fails on malformed JSON, unknown fields, unparsable rules, classes on
/// non-elements, text on non-text nodes and duplicate ids.
pub fn load_fixture(json: &str, config: EngineConfig) -> Result<Fixture> {
    let scene: SceneSpec = serde_json::from_str(json).context("parsing scene JSON")?;
    let config = match scene.viewport {
        Some(viewport) => EngineConfig {
            viewport_width: viewport.width,
            viewport_height: viewport.height,
            ..config
        },
        None => config,
    };

    let mut interner = Interner::default();
    let mut rules = ClassRules::new();
    for (class, block) in &scene.rules {
        let properties = parse_rule(block).with_context(|| format!("rule `.{class}`"))?;
        rules.insert(interner.intern(class)?, properties);
    }

    let mut builder = Builder {
        document: Document::with_rules(config, rules),
        interner,
        text: FixedAdvanceText::new(scene.text.advance, scene.text.line_height),
        ids: FxHashMap::default(),
    };
    for (position, root) in scene.roots.iter().enumerate() {
        builder
            .add(root, None)
            .with_context(|| format!("root {position}"))?;
    }
    let Builder {
        mut document,
        text,
        ids,
        ..
    } = builder;
    document.set_intrinsic_size(text);
    debug!(
        target: "page_layout::fixture",
        "loaded {} nodes, {} archetypes",
        document.nodes().len(),
        document.archetypes().len()
    );
    Ok(Fixture { document, ids })
}

/// Build a [`Document`] from a JSON scene description with default settings.
///
/// # Errors
/// See [`load_fixture`].
pub fn load_document(json: &str) -> Result<Document> {
    load_fixture(json, EngineConfig::default()).map(|fixture| fixture.document)
}

/// Read and load a scene description file.
///
/// # Errors
/// Fails when the file cannot be read, then as [`load_fixture`].
pub fn load_fixture_file(path: &Path, config: EngineConfig) -> Result<Fixture> {
    let json = fs::read_to_string(path)
        .with_context(|| format!("reading fixture {}", path.display()))?;
    load_fixture(&json, config).with_context(|| format!("loading fixture {}", path.display()))
}
