//! Plugin descriptor documents
//!
//! A [`PluginDescriptor`] wraps one `plugin.xml` file: it is parsed once,
//! mutated in place by merge operations, and written back whole. The
//! descriptor root owns a `mojos` container of `mojo` elements, each
//! identified by a `goal` scalar child.

use std::fs;
use std::path::{Path, PathBuf};

use crate::dom::{self, XmlNode};
use crate::types::DescriptorResult;

#[derive(Debug)]
pub struct PluginDescriptor {
    path: PathBuf,
    root: XmlNode,
}

impl PluginDescriptor {
    /// Load a descriptor from disk.
    ///
    /// Fails on unreadable files and malformed markup; no schema validation
    /// beyond well-formedness is applied.
    pub fn load(path: impl Into<PathBuf>) -> DescriptorResult<Self> {
        let path = path.into();
        let content = fs::read_to_string(&path)?;
        let root = dom::parse(&content)?;
        Ok(Self { path, root })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn root(&self) -> &XmlNode {
        &self.root
    }

    /// All mojo definitions, in declaration order
    pub fn mojos(&self) -> impl Iterator<Item = &XmlNode> {
        self.root
            .child("mojos")
            .into_iter()
            .flat_map(|mojos| mojos.children_named("mojo"))
    }

    /// Goal names exposed by this descriptor, in declaration order
    pub fn goals(&self) -> Vec<&str> {
        self.mojos()
            .filter_map(|mojo| mojo.child("goal").and_then(XmlNode::text))
            .collect()
    }

    /// First mojo whose `goal` child matches exactly.
    ///
    /// Goal values are compared verbatim, without any qualifier stripping.
    /// Absence is an expected outcome, not an error: callers probe for an
    /// optional inherited counterpart.
    pub fn find_mojo(&self, goal: &str) -> Option<&XmlNode> {
        self.mojos()
            .find(|mojo| mojo.child("goal").and_then(XmlNode::text) == Some(goal))
    }

    pub fn find_mojo_mut(&mut self, goal: &str) -> Option<&mut XmlNode> {
        self.root.child_mut("mojos")?.children.iter_mut().find(|node| {
            node.name == "mojo" && node.child("goal").and_then(XmlNode::text) == Some(goal)
        })
    }

    /// Serialize the whole tree back to the file it was loaded from
    pub fn save(&self) -> DescriptorResult<()> {
        self.save_to(&self.path)
    }

    pub fn save_to(&self, path: impl AsRef<Path>) -> DescriptorResult<()> {
        let xml = dom::serialize(&self.root)?;
        fs::write(path, xml)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::DescriptorError;
    use std::io::Write;

    const DESCRIPTOR: &str = r#"<plugin>
        <goalPrefix>example</goalPrefix>
        <mojos>
            <mojo>
                <goal>compile</goal>
                <phase>compile</phase>
            </mojo>
            <mojo>
                <goal>test-compile</goal>
                <phase>test-compile</phase>
            </mojo>
        </mojos>
    </plugin>"#;

    fn write_descriptor(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        file.write_all(content.as_bytes()).expect("write fixture");
        file
    }

    #[test]
    fn test_load_and_list_goals() {
        let file = write_descriptor(DESCRIPTOR);
        let descriptor = PluginDescriptor::load(file.path()).expect("load");

        assert_eq!(descriptor.goals(), vec!["compile", "test-compile"]);
    }

    #[test]
    fn test_find_mojo_exact_match() {
        let file = write_descriptor(DESCRIPTOR);
        let descriptor = PluginDescriptor::load(file.path()).expect("load");

        let mojo = descriptor.find_mojo("test-compile").expect("mojo present");
        assert_eq!(
            mojo.child("phase").and_then(XmlNode::text),
            Some("test-compile")
        );
    }

    #[test]
    fn test_find_mojo_absence_is_none() {
        let file = write_descriptor(DESCRIPTOR);
        let descriptor = PluginDescriptor::load(file.path()).expect("load");

        assert!(descriptor.find_mojo("package").is_none());
    }

    #[test]
    fn test_find_mojo_returns_first_match() {
        let file = write_descriptor(
            "<plugin><mojos>\
                <mojo><goal>compile</goal><phase>first</phase></mojo>\
                <mojo><goal>compile</goal><phase>second</phase></mojo>\
            </mojos></plugin>",
        );
        let descriptor = PluginDescriptor::load(file.path()).expect("load");

        let mojo = descriptor.find_mojo("compile").expect("mojo present");
        assert_eq!(mojo.child("phase").and_then(XmlNode::text), Some("first"));
    }

    #[test]
    fn test_load_missing_file_is_io_error() {
        let dir = tempfile::tempdir().expect("temp dir");
        let result = PluginDescriptor::load(dir.path().join("plugin.xml"));

        assert!(matches!(result, Err(DescriptorError::Io(_))));
    }

    #[test]
    fn test_load_malformed_file_is_xml_error() {
        let file = write_descriptor("<plugin><mojos></plugin>");
        let result = PluginDescriptor::load(file.path());

        assert!(matches!(result, Err(DescriptorError::Xml(_))));
    }

    #[test]
    fn test_save_then_load_round_trip() {
        let file = write_descriptor(DESCRIPTOR);
        let descriptor = PluginDescriptor::load(file.path()).expect("load");

        let out = tempfile::NamedTempFile::new().expect("temp file");
        descriptor.save_to(out.path()).expect("save");
        let reloaded = PluginDescriptor::load(out.path()).expect("reload");

        assert_eq!(descriptor.root(), reloaded.root());
    }
}
