//! In-memory B+Tree: an ordered map from integer keys to opaque values,
//! meant to hold row locators for key-based point lookup. Nodes live in an
//! arena (`Vec` plus free list) and refer to each other by index, so the
//! leaf sibling chain needs no shared ownership.

/// Minimum degree `t`: a node holds at most `2t - 1` keys and `2t` children.
pub const MIN_DEGREE: usize = 2;
const MAX_KEYS: usize = 2 * MIN_DEGREE - 1;

type NodeId = usize;

#[derive(Debug)]
struct Node<V> {
    keys: Vec<i64>,
    values: Vec<V>,       // leaf only
    children: Vec<NodeId>, // internal only
    is_leaf: bool,
    next: Option<NodeId>, // leaf chain, ascending key order
}

impl<V> Node<V> {
    fn leaf() -> Self {
        Self {
            keys: Vec::new(),
            values: Vec::new(),
            children: Vec::new(),
            is_leaf: true,
            next: None,
        }
    }

    fn internal() -> Self {
        Self {
            keys: Vec::new(),
            values: Vec::new(),
            children: Vec::new(),
            is_leaf: false,
            next: None,
        }
    }

    fn is_full(&self) -> bool {
        self.keys.len() == MAX_KEYS
    }
}

#[derive(Debug)]
pub struct BPlusTree<V> {
    nodes: Vec<Node<V>>,
    free: Vec<NodeId>,
    root: NodeId,
    len: usize,
}

impl<V> Default for BPlusTree<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> BPlusTree<V> {
    pub fn new() -> Self {
        Self {
            nodes: vec![Node::leaf()],
            free: Vec::new(),
            root: 0,
            len: 0,
        }
    }

    /// Number of keys currently stored.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    fn alloc(&mut self, node: Node<V>) -> NodeId {
        if let Some(id) = self.free.pop() {
            self.nodes[id] = node;
            id
        } else {
            self.nodes.push(node);
            self.nodes.len() - 1
        }
    }

    fn release(&mut self, id: NodeId) {
        // drop contents now; the arena slot becomes reusable
        self.nodes[id] = Node::leaf();
        self.free.push(id);
    }

    // Routing: separators equal the minimum key of the subtree to their
    // right, so a key equal to a separator descends right of it.
    fn child_index(node: &Node<V>, key: i64) -> usize {
        node.keys.partition_point(|&k| k <= key)
    }

    pub fn search(&self, key: i64) -> Option<&V> {
        let mut id = self.root;
        loop {
            let node = &self.nodes[id];
            if node.is_leaf {
                return match node.keys.binary_search(&key) {
                    Ok(pos) => Some(&node.values[pos]),
                    Err(_) => None,
                };
            }
            id = node.children[Self::child_index(node, key)];
        }
    }

    /// Inserts a key/value pair; an existing key has its value overwritten.
    /// Full nodes are split preemptively on the way down, so every split's
    /// parent is guaranteed to have room for the separator.
    pub fn insert(&mut self, key: i64, value: V) {
        if self.nodes[self.root].is_full() {
            let old_root = self.root;
            let mut new_root = Node::internal();
            new_root.children.push(old_root);
            let new_root = self.alloc(new_root);
            self.root = new_root;
            self.split_child(new_root, 0);
        }

        let mut id = self.root;
        loop {
            if self.nodes[id].is_leaf {
                let node = &mut self.nodes[id];
                match node.keys.binary_search(&key) {
                    Ok(pos) => node.values[pos] = value, // no duplicate keys
                    Err(pos) => {
                        node.keys.insert(pos, key);
                        node.values.insert(pos, value);
                        self.len += 1;
                    }
                }
                return;
            }
            let mut i = Self::child_index(&self.nodes[id], key);
            if self.nodes[self.nodes[id].children[i]].is_full() {
                self.split_child(id, i);
                if key >= self.nodes[id].keys[i] {
                    i += 1;
                }
            }
            id = self.nodes[id].children[i];
        }
    }

    /// Splits the full child at `children[i]` at its midpoint. A leaf keeps
    /// its lower half and copies the new right sibling's first key up; an
    /// internal node moves its true median up without duplicating it.
    fn split_child(&mut self, parent: NodeId, i: usize) {
        let child_id = self.nodes[parent].children[i];
        let child_is_leaf = self.nodes[child_id].is_leaf;

        let (sep, right) = if child_is_leaf {
            let child = &mut self.nodes[child_id];
            let mut right = Node::leaf();
            right.keys = child.keys.split_off(MIN_DEGREE - 1);
            right.values = child.values.split_off(MIN_DEGREE - 1);
            right.next = child.next;
            (right.keys[0], right)
        } else {
            let child = &mut self.nodes[child_id];
            let mut right = Node::internal();
            right.keys = child.keys.split_off(MIN_DEGREE);
            right.children = child.children.split_off(MIN_DEGREE);
            let sep = child.keys.remove(MIN_DEGREE - 1);
            (sep, right)
        };

        let right_id = self.alloc(right);
        if child_is_leaf {
            // re-thread the sibling chain so leaf order stays correct
            self.nodes[child_id].next = Some(right_id);
        }
        let parent_node = &mut self.nodes[parent];
        parent_node.keys.insert(i, sep);
        parent_node.children.insert(i + 1, right_id);
    }

    /// Removes a key; returns `false` if it was absent. Children with fewer
    /// than `t` keys are rebalanced before descending into them, so the
    /// target leaf can always afford the removal.
    pub fn delete(&mut self, key: i64) -> bool {
        let (removed, _) = self.remove_from(self.root, key);
        if removed {
            self.len -= 1;
        }
        // a merge on the way down can leave the root keyless even when the
        // key turned out to be absent
        let root = self.root;
        if !self.nodes[root].is_leaf && self.nodes[root].keys.is_empty() {
            let child = self.nodes[root].children[0];
            self.release(root);
            self.root = child;
        }
        removed
    }

    // Returns (removed, new minimum of this subtree if it changed), so
    // ancestors can keep their separators equal to right-subtree minimums.
    fn remove_from(&mut self, id: NodeId, key: i64) -> (bool, Option<i64>) {
        if self.nodes[id].is_leaf {
            let node = &mut self.nodes[id];
            return match node.keys.binary_search(&key) {
                Ok(pos) => {
                    node.keys.remove(pos);
                    node.values.remove(pos);
                    let new_min = if pos == 0 {
                        node.keys.first().copied()
                    } else {
                        None
                    };
                    (true, new_min)
                }
                Err(_) => (false, None),
            };
        }

        let mut i = Self::child_index(&self.nodes[id], key);
        if self.nodes[self.nodes[id].children[i]].keys.len() < MIN_DEGREE {
            i = self.rebalance_child(id, i);
        }
        let child = self.nodes[id].children[i];
        let (removed, child_min) = self.remove_from(child, key);
        match child_min {
            Some(min) if i > 0 => {
                self.nodes[id].keys[i - 1] = min;
                (removed, None)
            }
            Some(min) => (removed, Some(min)), // i == 0: our minimum changed too
            None => (removed, None),
        }
    }

    // Gives children[i] at least `t` keys: borrow from a sibling that can
    // lend, otherwise merge with one. Returns the index now covering the
    // key range of the original child.
    fn rebalance_child(&mut self, parent: NodeId, i: usize) -> usize {
        if i > 0 {
            let left = self.nodes[parent].children[i - 1];
            if self.nodes[left].keys.len() >= MIN_DEGREE {
                self.borrow_from_left(parent, i);
                return i;
            }
        }
        if i + 1 < self.nodes[parent].children.len() {
            let right = self.nodes[parent].children[i + 1];
            if self.nodes[right].keys.len() >= MIN_DEGREE {
                self.borrow_from_right(parent, i);
                return i;
            }
        }
        if i > 0 {
            self.merge_children(parent, i - 1);
            i - 1
        } else {
            self.merge_children(parent, i);
            i
        }
    }

    fn borrow_from_left(&mut self, parent: NodeId, i: usize) {
        let left_id = self.nodes[parent].children[i - 1];
        let child_id = self.nodes[parent].children[i];

        if self.nodes[child_id].is_leaf {
            let (k, v) = {
                let left = &mut self.nodes[left_id];
                let last = left.keys.len() - 1;
                (left.keys.remove(last), left.values.remove(last))
            };
            let child = &mut self.nodes[child_id];
            child.keys.insert(0, k);
            child.values.insert(0, v);
            // the moved key is the child's new minimum
            self.nodes[parent].keys[i - 1] = k;
        } else {
            // rotate through the parent separator
            let sep = self.nodes[parent].keys[i - 1];
            let (k, c) = {
                let left = &mut self.nodes[left_id];
                let last = left.keys.len() - 1;
                (left.keys.remove(last), left.children.remove(last + 1))
            };
            let child = &mut self.nodes[child_id];
            child.keys.insert(0, sep);
            child.children.insert(0, c);
            self.nodes[parent].keys[i - 1] = k;
        }
    }

    fn borrow_from_right(&mut self, parent: NodeId, i: usize) {
        let child_id = self.nodes[parent].children[i];
        let right_id = self.nodes[parent].children[i + 1];

        if self.nodes[child_id].is_leaf {
            let (k, v) = {
                let right = &mut self.nodes[right_id];
                (right.keys.remove(0), right.values.remove(0))
            };
            let new_sep = self.nodes[right_id].keys[0];
            let child = &mut self.nodes[child_id];
            child.keys.push(k);
            child.values.push(v);
            self.nodes[parent].keys[i] = new_sep;
        } else {
            let sep = self.nodes[parent].keys[i];
            let (k, c) = {
                let right = &mut self.nodes[right_id];
                (right.keys.remove(0), right.children.remove(0))
            };
            let child = &mut self.nodes[child_id];
            child.keys.push(sep);
            child.children.push(c);
            self.nodes[parent].keys[i] = k;
        }
    }

    // Merges children i and i+1; the right node is absorbed into the left.
    // Internal merges pull the parent separator down; leaf merges drop it
    // (it was only a copy of the right leaf's first key) and re-thread the
    // sibling chain.
    fn merge_children(&mut self, parent: NodeId, i: usize) {
        let left_id = self.nodes[parent].children[i];
        let right_id = self.nodes[parent].children[i + 1];
        let sep = self.nodes[parent].keys.remove(i);
        self.nodes[parent].children.remove(i + 1);

        let right = std::mem::replace(&mut self.nodes[right_id], Node::leaf());
        let left = &mut self.nodes[left_id];
        if left.is_leaf {
            left.keys.extend(right.keys);
            left.values.extend(right.values);
            left.next = right.next;
        } else {
            left.keys.push(sep);
            left.keys.extend(right.keys);
            left.children.extend(right.children);
        }
        self.free.push(right_id);
    }

    /// Iterates all key/value pairs in ascending key order by walking the
    /// leaf chain from the leftmost leaf.
    pub fn iter(&self) -> Iter<'_, V> {
        let mut id = self.root;
        while !self.nodes[id].is_leaf {
            id = self.nodes[id].children[0];
        }
        Iter {
            tree: self,
            node: Some(id),
            pos: 0,
        }
    }
}

pub struct Iter<'a, V> {
    tree: &'a BPlusTree<V>,
    node: Option<NodeId>,
    pos: usize,
}

impl<'a, V> Iterator for Iter<'a, V> {
    type Item = (i64, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let id = self.node?;
            let node = &self.tree.nodes[id];
            if self.pos < node.keys.len() {
                let item = (node.keys[self.pos], &node.values[self.pos]);
                self.pos += 1;
                return Some(item);
            }
            self.node = node.next;
            self.pos = 0;
        }
    }
}
