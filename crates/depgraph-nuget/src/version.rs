//! Version range reduction.
//!
//! NuGet dependency versions are interval notation (`[1.0, 2.0)`, `(, 3.0]`)
//! or a bare version meaning "this version or higher". Only the lower bound is
//! kept; there is no constraint solving.

/// Version used when a range has no lower bound.
pub const UNBOUNDED_MIN_VERSION: &str = "0.0.0";

/// Reduce a NuGet version range to its minimum version.
///
/// ```
/// use depgraph_nuget::version::min_version;
///
/// assert_eq!(min_version("[4.3.0, )"), "4.3.0");
/// assert_eq!(min_version("13.0.1"), "13.0.1");
/// assert_eq!(min_version("(, 2.0]"), "0.0.0");
/// ```
#[must_use]
pub fn min_version(range: &str) -> String {
    let range = range.trim();
    let Some(inner) = range
        .strip_prefix('[')
        .or_else(|| range.strip_prefix('('))
    else {
        return range.to_string();
    };

    let lower = match inner.split_once(',') {
        Some((lower, _)) => lower,
        None => inner.trim_end_matches([']', ')']),
    }
    .trim();

    if lower.is_empty() {
        UNBOUNDED_MIN_VERSION.to_string()
    } else {
        lower.to_string()
    }
}
