/// Disjoint-set forest over provisional component labels.
///
/// Label 0 is reserved for the background and is never handed out by
/// [`UnionFind::make_set`].
pub(crate) struct UnionFind {
    parent: Vec<u32>,
    rank: Vec<u8>,
}

impl UnionFind {
    pub(crate) fn new() -> Self {
        Self {
            parent: vec![0],
            rank: vec![0],
        }
    }

    /// Number of labels issued so far, background included.
    pub(crate) fn len(&self) -> usize {
        self.parent.len()
    }

    /// Issue a fresh singleton label.
    pub(crate) fn make_set(&mut self) -> u32 {
        let label = self.parent.len() as u32;
        self.parent.push(label);
        self.rank.push(0);
        label
    }

    pub(crate) fn find(&mut self, x: u32) -> u32 {
        let mut root = x;
        while self.parent[root as usize] != root {
            root = self.parent[root as usize];
        }
        // Path compression
        let mut node = x;
        while self.parent[node as usize] != root {
            let next = self.parent[node as usize];
            self.parent[node as usize] = root;
            node = next;
        }
        root
    }

    pub(crate) fn union(&mut self, x: u32, y: u32) {
        let root_x = self.find(x);
        let root_y = self.find(y);
        if root_x == root_y {
            return;
        }
        let (rx, ry) = (root_x as usize, root_y as usize);
        match self.rank[rx].cmp(&self.rank[ry]) {
            std::cmp::Ordering::Less => self.parent[rx] = root_y,
            std::cmp::Ordering::Greater => self.parent[ry] = root_x,
            std::cmp::Ordering::Equal => {
                self.parent[ry] = root_x;
                self.rank[rx] += 1;
            }
        }
    }
}
