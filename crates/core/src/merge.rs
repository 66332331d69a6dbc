//! Mojo inheritance merge
//!
//! Folds an inherited (super) mojo definition into a child mojo. The three
//! list sections carry distinct identity rules: `parameters` entries are
//! keyed by their `name` child, `requirements` by their `field-name` child,
//! and `configuration` entries by tag name alone. A child entry always wins
//! over an inherited one with the same identity; surviving inherited entries
//! are appended after the child's own, and the section is marked with an
//! append combination mode so downstream merges keep doing the same.

use colored::Colorize;

use crate::dom::{
    self, XmlNode, CHILDREN_COMBINATION_APPEND, CHILDREN_COMBINATION_MODE_ATTRIBUTE,
};

/// Merge an inherited mojo definition into `mojo`, in place.
///
/// The super mojo is copied before any mutation, so one super instance can
/// be merged into any number of children. After the structural merge the
/// `goal` value is normalized down to its bare identifier.
pub fn merge_mojo(mojo: &mut XmlNode, super_mojo: &XmlNode) {
    let mut inherited = super_mojo.clone();

    remove_duplicates(mojo, &mut inherited, "parameters", Some("name"), true);
    remove_duplicates(mojo, &mut inherited, "configuration", None, false);
    remove_duplicates(mojo, &mut inherited, "requirements", Some("field-name"), true);

    dom::merge_into(mojo, &inherited);

    if let Some(goal) = mojo.child_mut("goal") {
        if let Some(value) = goal.text() {
            goal.value = Some(bare_goal(value).to_string());
        }
    }
}

/// Drop inherited list entries the child already declares.
///
/// `id_child` names the nested element whose text is the entry's identity;
/// `None` keys entries by their own tag name instead (the `configuration`
/// rule). Sections absent on either side are skipped entirely. When both
/// sides are present the child container is marked append-mode so the
/// surviving inherited entries land after the child's own.
fn remove_duplicates(
    mojo: &mut XmlNode,
    inherited: &mut XmlNode,
    list_name: &str,
    id_child: Option<&str>,
    verbose: bool,
) {
    let Some(list) = mojo.child_mut(list_name) else {
        return;
    };
    let Some(inherited_list) = inherited.child_mut(list_name) else {
        return;
    };

    inherited_list.children.retain(|item| {
        let Some(id) = identity(item, id_child) else {
            return true;
        };
        let duplicate = list
            .children
            .iter()
            .any(|existing| identity(existing, id_child) == Some(id));

        if duplicate && verbose {
            println!("{} overriding field {}", "[WARN]".yellow().bold(), id);
        }

        !duplicate
    });

    list.set_attribute(CHILDREN_COMBINATION_MODE_ATTRIBUTE, CHILDREN_COMBINATION_APPEND);
}

fn identity<'a>(item: &'a XmlNode, id_child: Option<&str>) -> Option<&'a str> {
    match id_child {
        Some(name) => item.child(name).and_then(XmlNode::text),
        None => Some(item.name.as_str()),
    }
}

/// Strip a `prefix:` or `prefix:field=` qualifier, keeping the bare goal.
///
/// Callers use this both to normalize a merged mojo and to resolve which
/// goal to look up in the super descriptor before merging.
pub fn bare_goal(goal: &str) -> &str {
    let bare = goal.rsplit(':').next().unwrap_or(goal);
    match bare.split_once('=') {
        Some((_, tail)) => tail,
        None => bare,
    }
}
