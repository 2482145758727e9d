/// Build the display name of a track from its identifier by stripping the
/// fixed `suffix` (for example `.mp3`).
///
/// The suffix is matched case-insensitively and only at the end of the name.
/// An empty suffix, or a name that would become empty, leaves `id` untouched.
pub fn display_name(id: &str, suffix: &str) -> String {
    let suffix = suffix.trim();
    if suffix.is_empty() || id.len() <= suffix.len() {
        return id.to_string();
    }

    let cut = id.len() - suffix.len();
    match id.get(cut..) {
        Some(tail) if tail.eq_ignore_ascii_case(suffix) => id[..cut].to_string(),
        _ => id.to_string(),
    }
}
