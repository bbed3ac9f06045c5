//! Common test utilities for SDK integration tests

use criteria_sdk::{EditorConfig, FieldCatalog, FieldDefinition, FilterEditor};

/// Catalog used across the editor tests
pub fn report_catalog() -> FieldCatalog {
    FieldCatalog::new(vec![
        FieldDefinition::new("age", "java.lang.Integer").with_type_short("Integer"),
        FieldDefinition::new("name", "java.lang.String"),
        FieldDefinition::new("created", "java.time.LocalDate"),
        FieldDefinition::new("active", "java.lang.Boolean"),
        FieldDefinition::new("total", "java.math.BigDecimal"),
    ])
}

/// Editor over `report_catalog` with `total` treated as a computed alias
pub fn report_editor() -> FilterEditor {
    FilterEditor::new(
        report_catalog(),
        EditorConfig::new().with_computed_aliases(["total"]),
    )
}
