//! Resource name normalization.

use crate::VfsError;

/// Normalize a resource name into the form the [`Vfs`](crate::Vfs) routes on.
///
/// Backslashes become forward slashes, empty and `.` segments are dropped and
/// leading or trailing separators disappear. A `..` segment is rejected so a
/// resource name can never escape its mount root.
pub fn normalize(name: &str) -> Result<String, VfsError> {
    let mut segments = Vec::new();
    for segment in name.split(['/', '\\']) {
        match segment {
            "" | "." => {}
            ".." => {
                return Err(VfsError::InvalidPath(format!(
                    "parent segment in resource name \"{name}\""
                )));
            }
            _ => segments.push(segment),
        }
    }

    if segments.is_empty() {
        return Err(VfsError::InvalidPath("empty resource name".into()));
    }
    Ok(segments.join("/"))
}

/// Split a normalized name into its first segment and the remainder.
///
/// The remainder is empty when the name has a single segment.
pub(crate) fn split_source(name: &str) -> (&str, &str) {
    name.split_once('/').unwrap_or((name, ""))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("Materials/Stone.xml", "Materials/Stone.xml")]
    #[case("/Materials/Stone.xml", "Materials/Stone.xml")]
    #[case("Materials/", "Materials")]
    #[case("Materials///Stone.xml", "Materials/Stone.xml")]
    #[case("Materials/./Stone.xml", "Materials/Stone.xml")]
    #[case("Materials\\Stone.xml", "Materials/Stone.xml")]
    #[case("Scene.xml", "Scene.xml")]
    fn normalizes(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(normalize(input).unwrap(), expected);
    }

    #[rstest]
    #[case("")]
    #[case("///")]
    #[case("./.")]
    #[case("Materials/../secret.txt")]
    fn rejects(#[case] input: &str) {
        assert!(matches!(normalize(input), Err(VfsError::InvalidPath(_))));
    }

    #[test]
    fn split_source_with_rest() {
        assert_eq!(
            split_source("assets/Materials/Stone.xml"),
            ("assets", "Materials/Stone.xml")
        );
    }

    #[test]
    fn split_source_single_segment() {
        assert_eq!(split_source("Scene.xml"), ("Scene.xml", ""));
    }
}
