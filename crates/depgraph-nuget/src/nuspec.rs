//! `.nuspec` manifest parsing.
//!
//! Dependencies appear either flat under `<dependencies>` or split into
//! `<group targetFramework="...">` sections. Every group is merged; picking a
//! single target framework is out of scope.

use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};
use std::collections::HashSet;

use crate::client::DeclaredDependency;
use crate::error::{Error, Result};
use crate::version::min_version;

/// Extract the declared dependencies from a `.nuspec` document.
///
/// Version ranges are reduced to their minimum version. Elements missing an
/// `id` or `version` attribute are skipped.
///
/// # Framework groups
///
/// Groups are merged into one list rather than returned entry for entry. A
/// dependency that several groups declare with the same minimum version is
/// one requirement of the package, so it is reported once, at its first
/// position, and the graph gets a single edge for it. The same id with a
/// different minimum version is a different package identity and is kept.
///
/// # Errors
///
/// Returns [`Error::Nuspec`] if the document is not well-formed XML.
pub fn parse_nuspec(xml: &str) -> Result<Vec<DeclaredDependency>> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut dependencies = Vec::new();
    let mut seen = HashSet::new();

    loop {
        match reader.read_event() {
            Ok(Event::Start(element) | Event::Empty(element))
                if element.local_name().as_ref() == b"dependency" =>
            {
                let Some(dependency) = read_dependency(&element)? else {
                    continue;
                };
                if seen.insert(dependency.clone()) {
                    dependencies.push(dependency);
                }
            }
            Ok(Event::Eof) => break,
            Ok(_) => {}
            Err(e) => {
                return Err(Error::Nuspec(format!(
                    "at byte {}: {e}",
                    reader.error_position()
                )));
            }
        }
    }

    Ok(dependencies)
}

fn read_dependency(element: &BytesStart<'_>) -> Result<Option<DeclaredDependency>> {
    let id = attribute(element, "id")?;
    let range = attribute(element, "version")?;

    match (id, range) {
        (Some(id), Some(range)) if !id.is_empty() && !range.is_empty() => {
            Ok(Some(DeclaredDependency {
                id,
                version: min_version(&range),
            }))
        }
        (id, _) => {
            tracing::debug!(id = ?id, "Skipping dependency without id or version");
            Ok(None)
        }
    }
}

fn attribute(element: &BytesStart<'_>, name: &str) -> Result<Option<String>> {
    let Some(attr) = element
        .try_get_attribute(name)
        .map_err(|e| Error::Nuspec(e.to_string()))?
    else {
        return Ok(None);
    };
    let value = attr
        .unescape_value()
        .map_err(|e| Error::Nuspec(e.to_string()))?;
    Ok(Some(value.trim().to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dep(id: &str, version: &str) -> DeclaredDependency {
        DeclaredDependency {
            id: id.to_string(),
            version: version.to_string(),
        }
    }

    #[test]
    fn test_grouped_dependencies_are_merged() {
        let xml = r#"<?xml version="1.0" encoding="utf-8"?>
<package xmlns="http://schemas.microsoft.com/packaging/2013/05/nuspec.xsd">
  <metadata>
    <id>Serilog.Sinks.Console</id>
    <version>5.0.0</version>
    <dependencies>
      <group targetFramework=".NETFramework4.6.2">
        <dependency id="Serilog" version="[3.1.0, )" />
      </group>
      <group targetFramework="net6.0">
        <dependency id="Serilog" version="[3.1.0, )" />
        <dependency id="System.Memory" version="4.5.5" exclude="Build,Analyzers" />
      </group>
    </dependencies>
  </metadata>
</package>"#;

        let deps = parse_nuspec(xml).expect("valid nuspec");
        assert_eq!(deps, vec![dep("Serilog", "3.1.0"), dep("System.Memory", "4.5.5")]);
    }

    #[test]
    fn test_flat_dependencies() {
        let xml = r#"<package><metadata><dependencies>
            <dependency id="A" version="1.0"/>
            <dependency id="B" version="(, 2.0]"/>
        </dependencies></metadata></package>"#;

        let deps = parse_nuspec(xml).expect("valid nuspec");
        assert_eq!(deps, vec![dep("A", "1.0"), dep("B", "0.0.0")]);
    }

    #[test]
    fn test_same_id_different_minimum_kept_separately() {
        let xml = r#"<package><metadata><dependencies>
            <group targetFramework="netstandard1.0"><dependency id="A" version="[1.0, )"/></group>
            <group targetFramework="netstandard2.0"><dependency id="A" version="[2.0, )"/></group>
        </dependencies></metadata></package>"#;

        let deps = parse_nuspec(xml).expect("valid nuspec");
        assert_eq!(deps, vec![dep("A", "1.0"), dep("A", "2.0")]);
    }

    #[test]
    fn test_incomplete_dependency_skipped() {
        let xml = r#"<package><metadata><dependencies>
            <dependency id="NoVersion"/>
            <dependency version="1.0"/>
            <dependency id="Ok" version="3.0"/>
        </dependencies></metadata></package>"#;

        let deps = parse_nuspec(xml).expect("valid nuspec");
        assert_eq!(deps, vec![dep("Ok", "3.0")]);
    }

    #[test]
    fn test_no_dependencies_section() {
        let xml = "<package><metadata><id>Leaf</id></metadata></package>";
        assert!(parse_nuspec(xml).expect("valid nuspec").is_empty());
    }

    #[test]
    fn test_malformed_xml() {
        let xml = "<package><metadata></package>";
        let err = parse_nuspec(xml).expect_err("mismatched tags should fail");
        assert!(matches!(err, Error::Nuspec(_)), "got {err:?}");
    }
}
