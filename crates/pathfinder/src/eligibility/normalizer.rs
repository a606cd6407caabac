/// Canonical form for free-text names (countries, universities) before comparison.
pub(crate) fn normalize_name(value: &str) -> String {
    let cleaned = value.replace(['\u{feff}', '\u{200b}', '\u{a0}'], " ");
    let collapsed = cleaned.split_whitespace().collect::<Vec<_>>().join(" ");
    collapsed.to_lowercase()
}

pub(crate) fn same_name(left: &str, right: &str) -> bool {
    normalize_name(left) == normalize_name(right)
}
