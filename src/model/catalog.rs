// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Triton-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Triton and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! The toolbox catalog: block templates organized by category.
//!
//! Categories and shapes mirror the stock palette of block editors in the
//! Blockly family; the keyboard toolbox navigates this structure instead of
//! the host's pointer-driven flyout.

use smol_str::SmolStr;

use super::block::{BlockShape, InputSlot, SlotKind};

/// A block kind the toolbox can instantiate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockTemplate {
    kind: SmolStr,
    label: SmolStr,
    shape: BlockShape,
}

impl BlockTemplate {
    pub fn new(kind: impl Into<SmolStr>, label: impl Into<SmolStr>, shape: BlockShape) -> Self {
        Self {
            kind: kind.into(),
            label: label.into(),
            shape,
        }
    }

    pub fn kind(&self) -> &str {
        &self.kind
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn shape(&self) -> &BlockShape {
        &self.shape
    }
}

/// A named group of templates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogCategory {
    name: SmolStr,
    templates: Vec<BlockTemplate>,
}

impl CatalogCategory {
    pub fn new(name: impl Into<SmolStr>, templates: Vec<BlockTemplate>) -> Self {
        Self {
            name: name.into(),
            templates,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn templates(&self) -> &[BlockTemplate] {
        &self.templates
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Catalog {
    categories: Vec<CatalogCategory>,
}

impl Catalog {
    pub fn new(categories: Vec<CatalogCategory>) -> Self {
        Self { categories }
    }

    pub fn categories(&self) -> &[CatalogCategory] {
        &self.categories
    }

    pub fn category(&self, index: usize) -> Option<&CatalogCategory> {
        self.categories.get(index)
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    /// All templates across categories, in category order.
    pub fn iter_templates(&self) -> impl Iterator<Item = &BlockTemplate> {
        self.categories
            .iter()
            .flat_map(|category| category.templates().iter())
    }

    pub fn template(&self, kind: &str) -> Option<&BlockTemplate> {
        self.iter_templates().find(|template| template.kind() == kind)
    }
}

/// The built-in palette used by the demo workspace and tests.
pub fn builtin_catalog() -> Catalog {
    Catalog::new(vec![
        CatalogCategory::new(
            "Logic",
            vec![
                BlockTemplate::new(
                    "controls_if",
                    "If Block",
                    BlockShape::statement()
                        .with_input(InputSlot::new("IF0", SlotKind::Value).with_check("Boolean"))
                        .with_input(InputSlot::new("DO0", SlotKind::Statement)),
                ),
                BlockTemplate::new(
                    "logic_compare",
                    "Compare",
                    BlockShape::value()
                        .with_output_check("Boolean")
                        .with_input(InputSlot::new("A", SlotKind::Value))
                        .with_input(InputSlot::new("B", SlotKind::Value)),
                ),
                BlockTemplate::new(
                    "logic_boolean",
                    "Boolean",
                    BlockShape::value().with_output_check("Boolean"),
                ),
            ],
        ),
        CatalogCategory::new(
            "Loops",
            vec![
                BlockTemplate::new(
                    "controls_repeat_ext",
                    "Repeat",
                    BlockShape::statement()
                        .with_input(InputSlot::new("TIMES", SlotKind::Value).with_check("Number"))
                        .with_input(InputSlot::new("DO", SlotKind::Statement)),
                ),
                BlockTemplate::new(
                    "controls_whileUntil",
                    "While/Until",
                    BlockShape::statement()
                        .with_input(InputSlot::new("BOOL", SlotKind::Value).with_check("Boolean"))
                        .with_input(InputSlot::new("DO", SlotKind::Statement)),
                ),
            ],
        ),
        CatalogCategory::new(
            "Math",
            vec![
                BlockTemplate::new(
                    "math_number",
                    "Number",
                    BlockShape::value().with_output_check("Number"),
                ),
                BlockTemplate::new(
                    "math_arithmetic",
                    "Arithmetic",
                    BlockShape::value()
                        .with_output_check("Number")
                        .with_input(InputSlot::new("A", SlotKind::Value).with_check("Number"))
                        .with_input(InputSlot::new("B", SlotKind::Value).with_check("Number")),
                ),
            ],
        ),
        CatalogCategory::new(
            "Text",
            vec![
                BlockTemplate::new(
                    "text",
                    "Text",
                    BlockShape::value().with_output_check("String"),
                ),
                BlockTemplate::new(
                    "text_print",
                    "Print",
                    BlockShape::statement()
                        .with_input(InputSlot::new("TEXT", SlotKind::Value)),
                ),
            ],
        ),
    ])
}

#[cfg(test)]
mod tests {
    use super::builtin_catalog;
    use crate::model::block::SlotKind;

    #[test]
    fn builtin_catalog_has_four_categories() {
        let catalog = builtin_catalog();
        let names: Vec<&str> = catalog.categories().iter().map(|c| c.name()).collect();
        assert_eq!(names, ["Logic", "Loops", "Math", "Text"]);
    }

    #[test]
    fn templates_are_found_by_kind_across_categories() {
        let catalog = builtin_catalog();
        let repeat = catalog.template("controls_repeat_ext").expect("template");
        assert_eq!(repeat.label(), "Repeat");
        assert!(repeat.shape().has_previous());
        assert_eq!(
            repeat.shape().input("DO").map(|slot| slot.kind()),
            Some(SlotKind::Statement)
        );
        assert!(catalog.template("nonexistent_kind").is_none());
    }

    #[test]
    fn value_templates_carry_output_checks() {
        let catalog = builtin_catalog();
        let number = catalog.template("math_number").expect("template");
        assert!(number.shape().has_output());
        assert_eq!(number.shape().output_check(), Some("Number"));
        assert!(!number.shape().has_previous());
    }
}
