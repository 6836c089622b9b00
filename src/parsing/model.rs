//! parsing::model
//!
//! Structural model tree produced by a successful parse.
//!
//! The tree records what each declaration is (its leading keywords), what it
//! is called, and what it contains. It carries no semantics: types are not
//! resolved and imports are not followed.

use serde::Serialize;

/// A parsed model file.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Model {
    /// Top-level elements, in source order
    pub elements: Vec<Element>,
}

/// One declaration and its body.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Element {
    /// Leading keywords, space-joined (`part def`, `import`, `doc`)
    pub kind: String,
    /// Declared name, if any
    pub name: Option<String>,
    /// Declaration text up to its terminator, tokens space-joined
    pub declaration: String,
    /// Body text for `doc`/`comment` elements
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    /// 1-based line of the first token
    pub line: usize,
    /// Nested elements from a `{ ... }` body
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Element>,
}

impl Model {
    /// Depth-first iterator over every element.
    pub fn iter(&self) -> impl Iterator<Item = &Element> {
        let mut stack: Vec<&Element> = self.elements.iter().rev().collect();
        std::iter::from_fn(move || {
            let next = stack.pop()?;
            stack.extend(next.children.iter().rev());
            Some(next)
        })
    }

    /// Total number of elements at any depth.
    pub fn element_count(&self) -> usize {
        self.iter().count()
    }

    /// Find the first element (depth-first) with the given name.
    pub fn find(&self, name: &str) -> Option<&Element> {
        self.iter().find(|e| e.name.as_deref() == Some(name))
    }
}

impl Element {
    /// Whether the leading keywords equal `kind` (e.g. `"part def"`).
    pub fn is(&self, kind: &str) -> bool {
        self.kind == kind
    }
}
