use font_core::{Role, SelectedFont};

/// Which selected font sets each part of the article preview
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArticleSlots<'a> {
    pub heading: &'a SelectedFont,
    pub subheading: &'a SelectedFont,
    pub body: &'a SelectedFont,
    pub caption: &'a SelectedFont,
}

impl<'a> ArticleSlots<'a> {
    /// Explicit roles win; otherwise size decides (≥ 24px heading,
    /// 18–23px subheading, < 18px body), then board position. `None` for an
    /// empty board.
    pub fn resolve(selection: &'a [SelectedFont]) -> Option<Self> {
        let first = selection.first()?;
        let with_role = |role: Role| selection.iter().find(|f| f.role == role);
        let with_size = |accept: fn(u32) -> bool| selection.iter().find(|f| accept(f.size));

        let heading = with_role(Role::Heading)
            .or_else(|| with_size(|size| size >= 24))
            .unwrap_or(first);

        let subheading = with_role(Role::Subheading)
            .or_else(|| with_size(|size| (18..24).contains(&size)))
            .unwrap_or(heading);

        let body = with_role(Role::Body)
            .or_else(|| with_size(|size| size < 18))
            .or_else(|| selection.get(1))
            .unwrap_or(first);

        let caption = with_role(Role::Caption).unwrap_or(body);

        Some(Self { heading, subheading, body, caption })
    }
}
