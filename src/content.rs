//! Content descriptors
//!
//! Declarative, immutable descriptions of what a composite node may contain:
//! named element slots with occurrence bounds, exclusive choice groups, and
//! the ordered content model that strings them together. Declared once per
//! composite type and shared across all instances; the matcher in
//! [`crate::matcher`] never mutates them.

use indexmap::{IndexMap, IndexSet};

use crate::error::SchemaError;

/// A named child slot with occurrence bounds.
///
/// `max_occurs == 0` means unbounded, matching the convention of the source
/// schemata this crate validates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    name: String,
    min_occurs: u32,
    max_occurs: u32,
}

impl Element {
    /// Create an element with explicit occurrence bounds.
    ///
    /// Fails when `max_occurs > 0` and `min_occurs > max_occurs`; that is a
    /// schema declaration error, not a document error.
    pub fn new(
        name: impl Into<String>,
        min_occurs: u32,
        max_occurs: u32,
    ) -> Result<Self, SchemaError> {
        let name = name.into();
        if max_occurs > 0 && min_occurs > max_occurs {
            return Err(SchemaError::OccursBounds {
                name,
                min: min_occurs,
                max: max_occurs,
            });
        }
        Ok(Self {
            name,
            min_occurs,
            max_occurs,
        })
    }

    /// Required slot (`min_occurs = 1`, unbounded)
    pub fn required(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            min_occurs: 1,
            max_occurs: 0,
        }
    }

    /// Optional slot (`min_occurs = 0`, unbounded)
    pub fn optional(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            min_occurs: 0,
            max_occurs: 0,
        }
    }

    /// Slot name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Declared minimum occurrence
    pub fn min_occurs(&self) -> u32 {
        self.min_occurs
    }

    /// Declared maximum occurrence (0 = unbounded)
    pub fn max_occurs(&self) -> u32 {
        self.max_occurs
    }

    /// Whether the slot must be present (`min_occurs > 0`)
    pub fn is_required(&self) -> bool {
        self.min_occurs > 0
    }
}

/// One alternative inside a [`Choice`]: a single slot or an ordered
/// sub-sequence of slots.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChoiceOption {
    /// A single element alternative
    Single(Element),
    /// An ordered group of elements forming one alternative
    Sequence(Vec<Element>),
}

impl ChoiceOption {
    fn elements(&self) -> &[Element] {
        match self {
            ChoiceOption::Single(element) => std::slice::from_ref(element),
            ChoiceOption::Sequence(elements) => elements,
        }
    }
}

impl From<Element> for ChoiceOption {
    fn from(element: Element) -> Self {
        ChoiceOption::Single(element)
    }
}

impl From<Vec<Element>> for ChoiceOption {
    fn from(elements: Vec<Element>) -> Self {
        ChoiceOption::Sequence(elements)
    }
}

/// A group of mutually exclusive alternatives.
///
/// Metadata used by the matcher (flat name map, per-option required/optional
/// partitions) is computed once at construction. Element names must be unique
/// across all options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Choice {
    options: Vec<ChoiceOption>,
    required: bool,
    flat_map: IndexMap<String, Element>,
    all_names: IndexSet<String>,
    required_names: Vec<IndexSet<String>>,
    optional_names: Vec<IndexSet<String>>,
}

impl Choice {
    /// Create a required choice over the given options.
    pub fn new(options: Vec<ChoiceOption>) -> Result<Self, SchemaError> {
        Self::with_required(options, true)
    }

    /// Create an optional choice (the whole group may be absent).
    pub fn optional(options: Vec<ChoiceOption>) -> Result<Self, SchemaError> {
        Self::with_required(options, false)
    }

    /// Create a choice, precomputing the matcher metadata.
    pub fn with_required(options: Vec<ChoiceOption>, required: bool) -> Result<Self, SchemaError> {
        let mut flat_map = IndexMap::new();
        for option in &options {
            for element in option.elements() {
                if flat_map
                    .insert(element.name().to_string(), element.clone())
                    .is_some()
                {
                    return Err(SchemaError::DuplicateChoiceName {
                        name: element.name().to_string(),
                    });
                }
            }
        }
        let all_names = flat_map.keys().cloned().collect();
        let partition = |required: bool| -> Vec<IndexSet<String>> {
            options
                .iter()
                .map(|option| {
                    option
                        .elements()
                        .iter()
                        .filter(|e| e.is_required() == required)
                        .map(|e| e.name().to_string())
                        .collect()
                })
                .collect()
        };
        let required_names = partition(true);
        let optional_names = partition(false);
        Ok(Self {
            options,
            required,
            flat_map,
            all_names,
            required_names,
            optional_names,
        })
    }

    /// Whether one of the alternatives must be satisfied
    pub fn is_required(&self) -> bool {
        self.required
    }

    /// The declared alternatives, in declaration order
    pub fn options(&self) -> &[ChoiceOption] {
        &self.options
    }

    /// Union of all option elements, keyed by name
    pub fn flat_map(&self) -> &IndexMap<String, Element> {
        &self.flat_map
    }

    /// Every element name reachable through this choice
    pub fn all_names(&self) -> &IndexSet<String> {
        &self.all_names
    }

    /// Required element names of option `i`
    pub fn required_names(&self, i: usize) -> &IndexSet<String> {
        &self.required_names[i]
    }

    /// Optional element names of option `i`
    pub fn optional_names(&self, i: usize) -> &IndexSet<String> {
        &self.optional_names[i]
    }

    /// Human-readable description used in mismatch messages,
    /// e.g. `(a | (b, c) | d)`.
    pub fn describe(&self) -> String {
        let parts: Vec<String> = self
            .options
            .iter()
            .map(|option| match option {
                ChoiceOption::Single(element) => element.name().to_string(),
                ChoiceOption::Sequence(elements) => {
                    let names: Vec<&str> = elements.iter().map(|e| e.name()).collect();
                    format!("({})", names.join(", "))
                }
            })
            .collect();
        format!("({})", parts.join(" | "))
    }
}

/// One item of a content model: a plain slot or a choice group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentItem {
    /// A single named slot
    Element(Element),
    /// An exclusive group of alternatives
    Choice(Choice),
}

impl From<Element> for ContentItem {
    fn from(element: Element) -> Self {
        ContentItem::Element(element)
    }
}

impl From<Choice> for ContentItem {
    fn from(choice: Choice) -> Self {
        ContentItem::Choice(choice)
    }
}

/// The declared, ordered content of one composite type.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ContentModel {
    items: Vec<ContentItem>,
}

impl ContentModel {
    /// Create a content model from its ordered items.
    pub fn new(items: Vec<ContentItem>) -> Self {
        Self { items }
    }

    /// The declared items, in declaration order
    pub fn items(&self) -> &[ContentItem] {
        &self.items
    }
}

impl FromIterator<ContentItem> for ContentModel {
    fn from_iter<T: IntoIterator<Item = ContentItem>>(iter: T) -> Self {
        Self {
            items: iter.into_iter().collect(),
        }
    }
}
