//! Content-type inference from the target's file extension.
//!
//! The table is deliberately narrow and matches the wire format existing
//! clients of this server expect: `html` and `txt` map to `text/html`,
//! every other extension maps to `image/<extension>` verbatim. Swap this
//! module for a real MIME table if wire compatibility stops mattering.

/// Infers the Content-type value for a target path.
///
/// The extension is the substring after the last `.`; a target with no dot
/// falls through with its whole name.
pub fn content_type(target: &str) -> String {
    let extension = target
        .rsplit_once('.')
        .map(|(_, ext)| ext)
        .unwrap_or(target);

    if extension.eq_ignore_ascii_case("html") || extension.eq_ignore_ascii_case("txt") {
        "text/html".to_string()
    } else {
        format!("image/{}", extension)
    }
}
