use crate::degree::Degree;
use crate::storage::NodeKey;

/// One tree vertex.
///
/// Ownership runs downward through `child`; `parent` is a back-link used
/// only by cuts. `left`/`right` thread the node into a circular sibling
/// ring (the root ring or its parent's child ring) and point at the node
/// itself when it is alone.
#[derive(Debug)]
pub(crate) struct Node<K, V> {
    pub(crate) key: K,
    pub(crate) value: V,
    pub(crate) degree: Degree,
    /// Lost a child since it last became a child; always false on roots.
    pub(crate) marked: bool,
    pub(crate) parent: Option<NodeKey>,
    pub(crate) child: Option<NodeKey>,
    pub(crate) left: NodeKey,
    pub(crate) right: NodeKey,
}

impl<K, V> Node<K, V> {
    /// A fresh singleton node living at `at`.
    pub(crate) fn singleton(at: NodeKey, key: K, value: V) -> Self {
        Node {
            key,
            value,
            degree: 0,
            marked: false,
            parent: None,
            child: None,
            left: at,
            right: at,
        }
    }
}
