//! Identifier helpers shared by the resolver and the emitter

/// Pluralize a class name for collection properties and persistence sets.
///
/// A plain suffix heuristic, no dictionary:
/// a trailing `y` becomes `ies`, a trailing `s` gets `es`, anything else `s`.
///
/// # Example
/// ```
/// use modelwright::core::pluralize;
///
/// assert_eq!(pluralize("Company"), "Companies");
/// assert_eq!(pluralize("Bus"), "Buses");
/// assert_eq!(pluralize("Customer"), "Customers");
/// ```
pub fn pluralize(name: &str) -> String {
    if let Some(stem) = name.strip_suffix('y') {
        format!("{}ies", stem)
    } else if name.ends_with('s') {
        format!("{}es", name)
    } else {
        format!("{}s", name)
    }
}

/// Turn a raw attribute name into a property name.
///
/// The first character is upper-cased and the rest is kept as written,
/// except that `id` in any casing always becomes `Id`.
pub fn property_name(raw: &str) -> String {
    if raw.eq_ignore_ascii_case("id") {
        return "Id".to_string();
    }

    let mut chars = raw.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
