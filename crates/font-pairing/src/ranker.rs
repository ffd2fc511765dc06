use font_core::{Recommendation, Role, SelectedFont, MAX_RECOMMENDATIONS};

/// Roles the current selection has not filled yet
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoleNeeds {
    pub heading: bool,
    pub body: bool,
}

impl RoleNeeds {
    pub fn from_selection(selection: &[SelectedFont]) -> Self {
        Self {
            heading: !selection.iter().any(|f| f.role == Role::Heading),
            body: !selection.iter().any(|f| f.role == Role::Body),
        }
    }

    /// Whether a recommendation fills one of the open roles
    pub fn is_filled_by(&self, recommendation: &Recommendation) -> bool {
        let roles = &recommendation.recommended_roles;
        (self.heading && roles.contains(Role::Heading)) || (self.body && roles.contains(Role::Body))
    }
}

/// Move recommendations that fill an open role to the front, keeping the
/// input order inside both groups, then keep at most `limit` (never more
/// than `MAX_RECOMMENDATIONS`).
pub fn rank(recommendations: Vec<Recommendation>, needs: RoleNeeds, limit: usize) -> Vec<Recommendation> {
    let limit = limit.min(MAX_RECOMMENDATIONS);
    let (mut ranked, rest): (Vec<_>, Vec<_>) = recommendations
        .into_iter()
        .partition(|rec| needs.is_filled_by(rec));

    ranked.extend(rest);
    ranked.truncate(limit);
    ranked
}
