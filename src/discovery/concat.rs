use std::ffi::{OsStr, OsString};

/// Joins 2 to 4 segments into one owned string. Segments are copied as-is:
/// callers supply every separator, and nothing is normalized.
pub fn concat(segments: &[&dyn AsRef<OsStr>]) -> OsString {
    debug_assert!((2..=4).contains(&segments.len()));

    let len = segments.iter().map(|s| s.as_ref().len()).sum();
    let mut joined = OsString::with_capacity(len);

    for segment in segments {
        joined.push(segment.as_ref());
    }

    joined
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_concat_keeps_segments_verbatim() {
        let root = OsString::from(r"C:\SDK10\");
        assert_eq!(concat(&[&root, &"Lib"]), OsString::from(r"C:\SDK10\Lib"));
    }

    #[test]
    fn test_concat_four_segments() {
        let joined = concat(&[&r"C:\VS", &r"\VC\Tools\MSVC\", &"14.29.30133", &r"\lib\x64"]);
        assert_eq!(joined, OsString::from(r"C:\VS\VC\Tools\MSVC\14.29.30133\lib\x64"));
    }

    #[test]
    fn test_concat_does_not_collapse_separators() {
        let joined = concat(&[&r"C:\Lib\", &r"\um\x64"]);
        assert_eq!(joined, OsString::from(r"C:\Lib\\um\x64"));
    }
}
