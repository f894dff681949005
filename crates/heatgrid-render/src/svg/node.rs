use std::fmt::Write as _;

/// One element in an ordered DOM-like tree. Attribute values and text are escaped on insert.
#[derive(Debug, Clone)]
pub(crate) struct Node {
    tag: &'static str,
    attrs: Vec<(&'static str, String)>,
    text: Option<String>,
    raw: bool,
    children: Vec<usize>,
}

pub(crate) fn node(tag: &'static str) -> Node {
    Node {
        tag,
        attrs: Vec::new(),
        text: None,
        raw: false,
        children: Vec::new(),
    }
}

impl Node {
    pub(crate) fn attr(mut self, key: &'static str, value: impl Into<String>) -> Self {
        self.attrs.push((key, super::util::escape_xml(&value.into())));
        self
    }

    /// Escaped text content.
    pub(crate) fn text(mut self, text: &str) -> Self {
        self.text = Some(super::util::escape_xml(text));
        self.raw = false;
        self
    }

    /// Unescaped content wrapped in a CDATA section.
    pub(crate) fn cdata(mut self, body: &str) -> Self {
        self.text = Some(body.to_string());
        self.raw = true;
        self
    }
}

/// Arena of nodes; index `0` is the root.
#[derive(Debug, Clone)]
pub(crate) struct Tree {
    arena: Vec<Node>,
}

impl Tree {
    pub(crate) fn new(root: Node) -> Self {
        Self { arena: vec![root] }
    }

    pub(crate) const ROOT: usize = 0;

    pub(crate) fn push_child(&mut self, parent: usize, child: Node) -> usize {
        let id = self.arena.len();
        self.arena.push(child);
        self.arena[parent].children.push(id);
        id
    }

    pub(crate) fn render(&self) -> String {
        let mut out = String::new();
        self.render_node(&mut out, Self::ROOT);
        out
    }

    fn render_node(&self, out: &mut String, id: usize) {
        let n = &self.arena[id];
        out.push('<');
        out.push_str(n.tag);
        for (k, v) in &n.attrs {
            let _ = write!(out, r#" {k}="{v}""#);
        }
        if n.children.is_empty() && n.text.as_deref().unwrap_or("").is_empty() {
            out.push_str("/>");
            return;
        }
        out.push('>');
        if let Some(t) = n.text.as_deref() {
            if n.raw {
                let _ = write!(out, "<![CDATA[{t}]]>");
            } else {
                out.push_str(t);
            }
        }
        for c in &n.children {
            self.render_node(out, *c);
        }
        let _ = write!(out, "</{}>", n.tag);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_nested_tree_in_insertion_order() {
        let mut tree = Tree::new(node("g").attr("id", "root"));
        let g = tree.push_child(Tree::ROOT, node("g").attr("class", "tick"));
        tree.push_child(g, node("line").attr("y2", "6"));
        tree.push_child(g, node("text").attr("y", "9").text("1760 & on"));
        assert_eq!(
            tree.render(),
            r#"<g id="root"><g class="tick"><line y2="6"/><text y="9">1760 &amp; on</text></g></g>"#
        );
    }
}
