//! Node label text.

use crate::graph::Node;

/// Labels longer than this many characters are shortened.
pub const MAX_LABEL_CHARS: usize = 26;
/// Characters kept from a shortened label, before the ellipsis.
pub const KEPT_LABEL_CHARS: usize = 23;
pub const ELLIPSIS: char = '…';

/// Name if non-empty, else id, shortened to fit.
pub fn node_label(node: &Node) -> String {
    let text = if node.name.is_empty() {
        node.id.as_str()
    } else {
        node.name.as_str()
    };
    short_label(text)
}

/// Truncate to [`KEPT_LABEL_CHARS`] plus an ellipsis when over [`MAX_LABEL_CHARS`].
pub fn short_label(text: &str) -> String {
    if text.chars().count() <= MAX_LABEL_CHARS {
        return text.to_string();
    }
    let mut short: String = text.chars().take(KEPT_LABEL_CHARS).collect();
    short.push(ELLIPSIS);
    short
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn long_names_are_truncated() {
        let name = "abcdefghijklmnopqrstuvwxyz0123";
        assert_eq!(name.chars().count(), 30);

        let label = short_label(name);
        assert_eq!(label, "abcdefghijklmnopqrstuvw…");
        assert_eq!(label.chars().count(), 24);
    }

    #[test]
    fn boundary_is_inclusive() {
        let name = "abcdefghijklmnopqrstuvwxyz";
        assert_eq!(short_label(name), name);
        assert_eq!(short_label(""), "");
    }

    #[test]
    fn counts_characters_not_bytes() {
        let name = "ü".repeat(26);
        assert_eq!(short_label(&name), name);
        let label = short_label(&"ü".repeat(27));
        assert_eq!(label.chars().count(), 24);
        assert!(label.ends_with(ELLIPSIS));
    }

    #[test]
    fn falls_back_to_id() {
        let node = Node {
            id: "svc:billing".into(),
            name: String::new(),
            layer: 0,
            kind: "unknown".into(),
        };
        assert_eq!(node_label(&node), "svc:billing");
    }
}
