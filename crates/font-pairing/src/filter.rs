use font_core::{CategorySet, FontDescriptor, SelectedFont};

/// Catalog entries in the target categories that aren't on the board yet,
/// in catalog order. Families compare case-sensitively.
pub fn filter_candidates(
    catalog: &[FontDescriptor],
    categories: CategorySet,
    selection: &[SelectedFont],
) -> Vec<FontDescriptor> {
    catalog
        .iter()
        .filter(|font| categories.contains(font.category))
        .filter(|font| !selection.iter().any(|selected| selected.family == font.family))
        .cloned()
        .collect()
}
