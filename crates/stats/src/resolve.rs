//! Branch resolution from free-text cells.

use crate::branch::short_name;

/// Map a raw branch value onto a registry entry.
///
/// Exact match first, then the first entry that contains `raw` or whose
/// city name appears inside `raw`. Blank values never resolve.
pub fn resolve_branch(raw: &str, registry: &[&'static str]) -> Option<&'static str> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Some(exact) = registry.iter().copied().find(|b| *b == raw) {
        return Some(exact);
    }

    let needle = raw.to_uppercase();
    registry
        .iter()
        .find(|b| {
            let entry = b.to_uppercase();
            entry.contains(&needle) || needle.contains(short_name(&entry))
        })
        .copied()
}

/// Column holding branch values, if the upload has one.
///
/// Variants are tried in priority order; each is compared with case and
/// punctuation ignored, so `lbl branch` finds `Lbl_Branch`.
pub fn find_branch_column<'a>(columns: &'a [String], variants: &[&str]) -> Option<&'a str> {
    variants.iter().find_map(|variant| {
        let wanted = fold(variant);
        columns.iter().find(|c| fold(c) == wanted).map(String::as_str)
    })
}

fn fold(name: &str) -> String {
    name.chars()
        .filter(|c| c.is_alphanumeric())
        .flat_map(char::to_lowercase)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::branch::BRANCHES;
    use crate::model::columns::BRANCH_VARIANTS;

    #[test]
    fn exact_match() {
        assert_eq!(
            resolve_branch("1951 - PT. APL MEDAN", &BRANCHES),
            Some("1951 - PT. APL MEDAN")
        );
    }

    #[test]
    fn code_only_matches_by_containment() {
        assert_eq!(resolve_branch("1951", &BRANCHES), Some("1951 - PT. APL MEDAN"));
    }

    #[test]
    fn city_inside_free_text() {
        assert_eq!(resolve_branch("Gudang Medan Utara", &BRANCHES), Some("1951 - PT. APL MEDAN"));
        assert_eq!(resolve_branch("APL-PALEMBANG", &BRANCHES), Some("1954 - PT. APL PALEMBANG"));
    }

    #[test]
    fn blank_and_unknown_do_not_resolve() {
        assert_eq!(resolve_branch("", &BRANCHES), None);
        assert_eq!(resolve_branch("   ", &BRANCHES), None);
        assert_eq!(resolve_branch("Singapore", &BRANCHES), None);
    }

    #[test]
    fn first_registry_entry_wins() {
        // "PT. APL" is inside every entry.
        assert_eq!(resolve_branch("PT. APL", &BRANCHES), Some(BRANCHES[0]));
    }

    #[test]
    fn branch_column_variants() {
        let cols = |names: &[&str]| names.iter().map(|s| s.to_string()).collect::<Vec<_>>();

        assert_eq!(find_branch_column(&cols(&["Material", "Plant"]), &BRANCH_VARIANTS), Some("Plant"));
        assert_eq!(find_branch_column(&cols(&["!Branch"]), &BRANCH_VARIANTS), Some("!Branch"));
        assert_eq!(find_branch_column(&cols(&["LBL BRANCH"]), &BRANCH_VARIANTS), Some("LBL BRANCH"));
        assert_eq!(find_branch_column(&cols(&["Material", "Qty"]), &BRANCH_VARIANTS), None);
    }

    #[test]
    fn branch_preferred_over_plant() {
        let cols = vec!["Plant".to_string(), "Branch".to_string()];
        assert_eq!(find_branch_column(&cols, &BRANCH_VARIANTS), Some("Branch"));
    }
}
