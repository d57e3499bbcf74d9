//! Name Resolution
//!
//! Maps raw definition keys and `$ref` pointers to the labels shown in the
//! specification, and derives the anchors those labels link to.
//!
//! Curated names for well-known shared types live in [`TYPE_NAME_OVERRIDES`];
//! every other key is title-cased.

use std::collections::HashSet;
use std::sync::OnceLock;

use regex::Regex;

use crate::config::RenderConfig;

/// Display names for shared types whose title-cased key reads badly
pub const TYPE_NAME_OVERRIDES: &[(&str, &str)] = &[
    ("unit", "Unit"),
    ("uint", "unsigned integer"),
    ("data_set_file", "Data set file"),
    ("data_set_id", "Data set id"),
    ("data_source_id", "Data source id"),
    ("setting_id", "Setting id"),
];

/// Prefix of references into the definition groups
const DEFS_PREFIX: &str = "#/$defs/";

/// Definition group holding the shared types
pub const TYPES_GROUP: &str = "types";

/// Curated display name for a shared type, if one exists
pub fn override_for(type_name: &str) -> Option<&'static str> {
    TYPE_NAME_OVERRIDES
        .iter()
        .find(|(name, _)| *name == type_name)
        .map(|(_, pretty)| *pretty)
}

/// `data_set_id` -> `Data Set Id`
///
/// Underscores become spaces; each run of letters starts upper-case and
/// continues lower-case, so `sensor2d` becomes `Sensor2D`.
pub fn title_case(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut in_word = false;
    for c in raw.chars() {
        let c = if c == '_' { ' ' } else { c };
        if c.is_alphabetic() {
            if in_word {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            in_word = true;
        } else {
            out.push(c);
            in_word = false;
        }
    }
    out
}

/// Anchor an HTML renderer assigns to a heading with this text
pub fn anchor_for(display_name: &str) -> String {
    static WHITESPACE: OnceLock<Regex> = OnceLock::new();
    let whitespace = WHITESPACE.get_or_init(|| Regex::new(r"\s+").expect("valid regex"));
    whitespace
        .replace_all(display_name.trim(), "-")
        .to_lowercase()
}

/// Split `#/$defs/<group>/<name>` into its group and name
pub fn split_defs_ref(reference: &str) -> Option<(&str, &str)> {
    let rest = reference.strip_prefix(DEFS_PREFIX)?;
    let mut parts = rest.split('/');
    let group = parts.next()?;
    let name = parts.next()?;
    Some((group, name))
}

/// Resolves references and type keys to display labels
#[derive(Debug, Clone)]
pub struct NameResolver {
    /// Shared types rendered as links into the appendix
    linked: HashSet<String>,
}

impl Default for NameResolver {
    fn default() -> Self {
        Self::from_config(&RenderConfig::default())
    }
}

impl NameResolver {
    pub fn new<I, S>(linked_types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            linked: linked_types.into_iter().map(Into::into).collect(),
        }
    }

    pub fn from_config(config: &RenderConfig) -> Self {
        Self::new(config.linked_types.iter().cloned())
    }

    /// Heading text for a shared type
    pub fn display_name(&self, type_name: &str) -> String {
        override_for(type_name)
            .map(str::to_string)
            .unwrap_or_else(|| title_case(type_name))
    }

    /// Label for a reference to a shared type, linked when configured
    pub fn type_label(&self, type_name: &str) -> String {
        let pretty = self.display_name(type_name);
        if self.linked.contains(type_name) {
            format!("<a href=\"#{}\">{}</a>", anchor_for(&pretty), pretty)
        } else {
            pretty
        }
    }

    /// Label for a `$ref`. Pointers outside `#/$defs/<group>/<name>` are shown verbatim.
    pub fn resolve_ref(&self, reference: &str) -> String {
        match split_defs_ref(reference) {
            Some((TYPES_GROUP, name)) => self.type_label(name),
            Some((_, name)) => title_case(name),
            None => reference.to_string(),
        }
    }
}
