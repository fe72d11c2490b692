//! Slash-separated addresses into the building tree.

use std::fmt;

use serde::Serialize;

/// A location in the building tree, stored as its name segments.
///
/// `house/kitchen/light` is the address of the `light` device inside the
/// `kitchen` room of the `house` building. Addresses double as the non-owning
/// parent handles held by rooms and devices.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(transparent)]
pub struct Address(Vec<String>);

impl Address {
    /// Address of a root node.
    pub fn root(name: impl Into<String>) -> Self {
        Self(vec![name.into()])
    }

    /// Parse a path string, stripping leading and trailing `/`.
    pub fn parse(path: &str) -> Self {
        let trimmed = path.trim_matches('/');
        if trimmed.is_empty() {
            return Self::default();
        }
        Self(trimmed.split('/').map(str::to_string).collect())
    }

    /// Address of a direct child of this node.
    pub fn child(&self, name: impl Into<String>) -> Self {
        let mut segments = self.0.clone();
        segments.push(name.into());
        Self(segments)
    }

    /// Address of the containing node, if this is not a root.
    pub fn parent(&self) -> Option<Self> {
        match self.0.split_last() {
            Some((_, rest)) if !rest.is_empty() => Some(Self(rest.to_vec())),
            _ => None,
        }
    }

    pub fn segments(&self) -> &[String] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.join("/"))
    }
}

impl From<&str> for Address {
    fn from(path: &str) -> Self {
        Self::parse(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_strips_outer_slashes() {
        let address = Address::parse("/house/kitchen/light/");
        assert_eq!(address.segments(), ["house", "kitchen", "light"]);
        assert_eq!(address.to_string(), "house/kitchen/light");
    }

    #[test]
    fn test_parse_empty() {
        assert!(Address::parse("").is_empty());
        assert!(Address::parse("///").is_empty());
    }

    #[test]
    fn test_parse_keeps_inner_spaces() {
        let address = Address::parse("house/girls room/fan");
        assert_eq!(address.segments(), ["house", "girls room", "fan"]);
    }

    #[test]
    fn test_child_and_parent() {
        let room = Address::root("house").child("kitchen");
        let light = room.child("light");
        assert_eq!(light.to_string(), "house/kitchen/light");
        assert_eq!(light.parent(), Some(room.clone()));
        assert_eq!(room.parent(), Some(Address::root("house")));
        assert_eq!(Address::root("house").parent(), None);
    }
}
