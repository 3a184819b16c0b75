use std::fmt;

use compact_str::CompactString;

/// A parse-tree node.
///
/// Terminal leaves carry no production; interior nodes carry the id of
/// the production used to reduce, and their children appear in
/// left-to-right right-hand-side order. An ε-reduction yields an interior
/// node with no children.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeNode {
    symbol: CompactString,
    children: Vec<TreeNode>,
    production: Option<usize>,
}

impl TreeNode {
    pub(crate) fn leaf(symbol: &str) -> Self {
        Self {
            symbol: symbol.into(),
            children: Vec::new(),
            production: None,
        }
    }

    pub(crate) fn interior(symbol: &str, children: Vec<TreeNode>, production: usize) -> Self {
        Self {
            symbol: symbol.into(),
            children,
            production: Some(production),
        }
    }

    #[must_use]
    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    #[must_use]
    pub fn children(&self) -> &[TreeNode] {
        &self.children
    }

    /// The production this node was reduced by; `None` for terminal
    /// leaves.
    #[must_use]
    pub const fn production(&self) -> Option<usize> {
        self.production
    }

    /// True for terminal leaves (ε-interior nodes are not leaves).
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        self.production.is_none()
    }

    /// The left-to-right terminal leaves of this subtree. For the root of
    /// an accepted parse this equals the input token sequence.
    #[must_use]
    pub fn terminal_yield(&self) -> Vec<&str> {
        let mut out = Vec::new();
        self.collect_yield(&mut out);
        out
    }

    fn collect_yield<'a>(&'a self, out: &mut Vec<&'a str>) {
        if self.is_terminal() {
            out.push(self.symbol.as_str());
            return;
        }
        for child in &self.children {
            child.collect_yield(out);
        }
    }

    fn render(&self, f: &mut fmt::Formatter<'_>, prefix: &str, is_last: bool, is_root: bool) -> fmt::Result {
        let (connector, child_prefix) = if is_root {
            (String::new(), String::new())
        } else if is_last {
            ("└── ".to_owned(), format!("{prefix}    "))
        } else {
            ("├── ".to_owned(), format!("{prefix}│   "))
        };
        writeln!(f, "{prefix}{connector}{}", self.symbol)?;
        let count = self.children.len();
        for (i, child) in self.children.iter().enumerate() {
            child.render(f, &child_prefix, i + 1 == count, false)?;
        }
        Ok(())
    }
}

/// Renders the subtree with box-drawing connectors, one symbol per line.
impl fmt::Display for TreeNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.render(f, "", true, true)
    }
}
