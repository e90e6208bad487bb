//! XML encoding of lookup results.

use std::fmt::Write as _;

use newsstand_core::{HouseRow, ItemRow, ItemSummaryRow};

/// A minimal XML element tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XmlNode {
    name: String,
    attrs: Vec<(String, String)>,
    children: Vec<XmlNode>,
    text: Option<String>,
}

impl XmlNode {
    /// Create an empty element.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attrs: Vec::new(),
            children: Vec::new(),
            text: None,
        }
    }

    /// Create an element holding a text value.
    pub fn text(name: impl Into<String>, text: impl ToString) -> Self {
        let mut node = Self::new(name);
        node.text = Some(text.to_string());
        node
    }

    /// Add an attribute.
    pub fn attr(mut self, name: impl Into<String>, value: impl ToString) -> Self {
        self.attrs.push((name.into(), value.to_string()));
        self
    }

    /// Add a child element.
    pub fn child(mut self, child: XmlNode) -> Self {
        self.children.push(child);
        self
    }

    /// Add child elements.
    pub fn children(mut self, children: impl IntoIterator<Item = XmlNode>) -> Self {
        self.children.extend(children);
        self
    }

    /// Serialize the tree without an XML declaration.
    pub fn render(&self) -> String {
        let mut out = String::new();
        self.write(&mut out);
        out
    }

    fn write(&self, out: &mut String) {
        out.push('<');
        out.push_str(&self.name);
        for (name, value) in &self.attrs {
            let _ = write!(out, " {}=\"{}\"", name, escape(value));
        }

        if self.children.is_empty() && self.text.is_none() {
            out.push_str("/>");
            return;
        }

        out.push('>');
        if let Some(text) = &self.text {
            out.push_str(&escape(text));
        }
        for child in &self.children {
            child.write(out);
        }
        let _ = write!(out, "</{}>", self.name);
    }
}

/// Escape text for element content and double-quoted attributes.
fn escape(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

/// `<item id="..">` with one `<price>` per house summary.
pub fn price_summary(item: &str, rows: &[ItemSummaryRow]) -> XmlNode {
    XmlNode::new("item")
        .attr("id", item)
        .children(rows.iter().map(|row| {
            XmlNode::new("price")
                .attr("house", row.house)
                .attr("lastseen", row.lastseen.format("%Y-%m-%d %H:%M:%S"))
                .attr("level", row.level)
                .child(XmlNode::text("quantity", row.quantity))
                .child(XmlNode::text("value", row.price))
        }))
}

/// `<houses>` with one `<house>` per row.
pub fn houses(rows: &[HouseRow]) -> XmlNode {
    XmlNode::new("houses").children(rows.iter().map(|row| XmlNode::text("house", row.house)))
}

/// `<items>` with one `<item>` per definition, one child per column.
pub fn items(rows: &[ItemRow]) -> XmlNode {
    XmlNode::new("items").children(rows.iter().map(item))
}

fn item(row: &ItemRow) -> XmlNode {
    let optional = |value: Option<u32>| value.map(|v| v.to_string()).unwrap_or_default();

    XmlNode::new("item")
        .child(XmlNode::text("id", row.id))
        .child(XmlNode::text("name_enus", &row.name_enus))
        .child(XmlNode::text("quality", row.quality))
        .child(XmlNode::text("level", row.level))
        .child(XmlNode::text("class", row.class))
        .child(XmlNode::text("subclass", row.subclass))
        .child(XmlNode::text("icon", &row.icon))
        .child(XmlNode::text("stacksize", row.stacksize))
        .child(XmlNode::text("buyfromvendor", optional(row.buyfromvendor)))
        .child(XmlNode::text("selltovendor", optional(row.selltovendor)))
        .child(XmlNode::text("auctionable", u8::from(row.auctionable)))
}
