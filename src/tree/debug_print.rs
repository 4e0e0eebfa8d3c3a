//! Box-drawing rendering of a [`TreeNode`].
//!
//! ```text
//! 1
//! ├── 11
//! │   └── 111
//! └── 12
//! ```

use std::fmt::{self, Display, Write};

use super::traverse::Stack;
use super::TreeNode;

/// The glyphs used by [`TreeNode::to_formatted_string_with`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct FormatStyle {
    /// Connector in front of a child that has later siblings.
    pub branch: &'static str,
    /// Connector in front of the last child.
    pub last_branch: &'static str,
    /// Continuation below a child that has later siblings.
    pub vertical: &'static str,
    /// Continuation below the last child.
    pub blank: &'static str,
}

impl FormatStyle {
    pub const fn unicode() -> Self {
        FormatStyle {
            branch: "├── ",
            last_branch: "└── ",
            vertical: "│   ",
            blank: "    ",
        }
    }

    pub const fn ascii() -> Self {
        FormatStyle {
            branch: "|-- ",
            last_branch: "`-- ",
            vertical: "|   ",
            blank: "    ",
        }
    }
}

impl Default for FormatStyle {
    fn default() -> Self {
        Self::unicode()
    }
}

impl<T: Display> TreeNode<T> {
    /// Renders the tree with [`FormatStyle::unicode`], one node per line and
    /// without a trailing newline.
    pub fn to_formatted_string(&self) -> String {
        self.to_string()
    }

    pub fn to_formatted_string_with(&self, style: &FormatStyle) -> String {
        Formatted { tree: self, style }.to_string()
    }

    fn write_formatted<W: Write>(&self, f: &mut W, style: &FormatStyle) -> fmt::Result {
        write!(f, "{}", self.value)?;

        // (node, prefix inherited from the ancestors, is the last child)
        let mut stack: Stack<(&TreeNode<T>, String, bool)> = Stack::new();
        push_children(&mut stack, self, "");

        while let Some((node, prefix, is_last_child)) = stack.pop() {
            let connector = if is_last_child {
                style.last_branch
            } else {
                style.branch
            };
            write!(f, "\n{prefix}{connector}{}", node.value)?;

            let continuation = if is_last_child {
                style.blank
            } else {
                style.vertical
            };
            push_children(&mut stack, node, &format!("{prefix}{continuation}"));
        }
        Ok(())
    }
}

/// A tree paired with the glyphs to render it with.
struct Formatted<'a, T> {
    tree: &'a TreeNode<T>,
    style: &'a FormatStyle,
}

impl<T: Display> Display for Formatted<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.tree.write_formatted(f, self.style)
    }
}

fn push_children<'a, T>(
    stack: &mut Stack<(&'a TreeNode<T>, String, bool)>,
    node: &'a TreeNode<T>,
    prefix: &str,
) {
    let num_children = node.children.len();
    for (i, child) in node.children.iter().enumerate().rev() {
        stack.push((child, prefix.to_string(), i + 1 == num_children));
    }
}

impl<T: Display> Display for TreeNode<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_formatted(f, &FormatStyle::default())
    }
}
