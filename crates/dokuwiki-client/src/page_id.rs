//! Page and media id model
//!
//! DokuWiki addresses pages and attachments with colon separated ids such as
//! `team:project:page`. The last segment is the name, everything before it is
//! the namespace. Listing calls take an absolute `depth` instead of a
//! namespace-relative one, so the client derives it from the namespace string
//! each time it is needed.

/// Namespace separator used in page and media ids
pub const SEPARATOR: char = ':';

/// Depth of the root namespace
pub const ROOT_DEPTH: u32 = 1;

/// Namespace part of an id (everything before the last separator).
///
/// Returns an empty string when the id has no separator. Ids starting with a
/// separator cut one more character off the namespace.
pub fn namespace_of(id: &str) -> &str {
    let Some(pos) = id.rfind(SEPARATOR) else {
        return "";
    };
    let namespace = &id[..pos];
    if id.starts_with(SEPARATOR) {
        match namespace.char_indices().next_back() {
            Some((last, _)) => &namespace[..last],
            None => "",
        }
    } else {
        namespace
    }
}

/// Name part of an id (everything after the last separator)
pub fn name_of(id: &str) -> &str {
    match id.rfind(SEPARATOR) {
        Some(pos) => &id[pos + SEPARATOR.len_utf8()..],
        None => id,
    }
}

/// Listing depth of a namespace, as used by `getPagelist` and `getAttachments`.
///
/// The root namespace has depth 1. Any other namespace starts at 2 because its
/// own trailing segment takes one level, and each separator strictly inside
/// the string adds one more. Leading or trailing separators are ignored.
pub fn depth_of(namespace: &str) -> u32 {
    if namespace.is_empty() {
        return ROOT_DEPTH;
    }
    let mut inner = namespace.chars();
    inner.next();
    inner.next_back();
    ROOT_DEPTH + 1 + inner.filter(|c| *c == SEPARATOR).count() as u32
}

/// Build an id from a namespace and a name
pub fn join(namespace: &str, name: &str) -> String {
    if namespace.is_empty() {
        name.to_string()
    } else {
        format!("{}{}{}", namespace, SEPARATOR, name)
    }
}
