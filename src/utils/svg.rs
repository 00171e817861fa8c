use maud::Render;

/// A minimal in-memory element tree that serializes to SVG/HTML markup.
///
/// Attributes and styles keep insertion order so the rendered markup is stable.
#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    tag: String,
    attrs: Vec<(String, String)>,
    styles: Vec<(String, String)>,
    content: Option<Content>,
    children: Vec<Element>,
}

#[derive(Debug, Clone, PartialEq)]
enum Content {
    Text(String),
    Html(String),
}

impl Element {
    /// Create an empty element with the given tag name
    pub fn new(tag: &str) -> Self {
        Element {
            tag: tag.to_string(),
            attrs: Vec::new(),
            styles: Vec::new(),
            content: None,
            children: Vec::new(),
        }
    }

    /// Builder form of `set_attr`
    pub fn attr(mut self, name: &str, value: impl ToString) -> Self {
        self.set_attr(name, value);
        self
    }

    /// Builder form of `set_style`
    pub fn style(mut self, name: &str, value: impl ToString) -> Self {
        self.set_style(name, value);
        self
    }

    /// Builder form of `append`
    pub fn child(mut self, child: Element) -> Self {
        self.children.push(child);
        self
    }

    /// Set escaped text content, replacing any previous content
    pub fn text(mut self, text: impl ToString) -> Self {
        self.content = Some(Content::Text(text.to_string()));
        self
    }

    /// Set or replace an attribute
    pub fn set_attr(&mut self, name: &str, value: impl ToString) {
        set_entry(&mut self.attrs, name, value.to_string());
    }

    /// Set or replace an inline style property
    pub fn set_style(&mut self, name: &str, value: impl ToString) {
        set_entry(&mut self.styles, name, value.to_string());
    }

    /// Replace the inner markup verbatim
    pub fn set_html(&mut self, html: impl ToString) {
        self.content = Some(Content::Html(html.to_string()));
    }

    pub fn append(&mut self, child: Element) {
        self.children.push(child);
    }

    pub fn get_attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn get_style(&self, name: &str) -> Option<&str> {
        self.styles
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn children(&self) -> &[Element] {
        &self.children
    }

    /// Text or inner markup, whichever was set last
    pub fn inner(&self) -> Option<&str> {
        match &self.content {
            Some(Content::Text(s)) | Some(Content::Html(s)) => Some(s.as_str()),
            None => None,
        }
    }

    /// Depth-first search for the element with the given id, self included
    pub fn find_by_id(&self, id: &str) -> Option<&Element> {
        if self.get_attr("id") == Some(id) {
            return Some(self);
        }
        self.children.iter().find_map(|c| c.find_by_id(id))
    }

    /// All descendants (self included) whose class list contains `class`, in document order
    pub fn select_all_by_class(&self, class: &str) -> Vec<&Element> {
        let mut found = Vec::new();
        self.collect_by_class(class, &mut found);
        found
    }

    fn collect_by_class<'a>(&'a self, class: &str, found: &mut Vec<&'a Element>) {
        if let Some(classes) = self.get_attr("class") {
            if classes.split_whitespace().any(|c| c == class) {
                found.push(self);
            }
        }
        for child in &self.children {
            child.collect_by_class(class, found);
        }
    }
}

/// Serializes with maud's escaping. Every element gets an explicit closing
/// tag, like `outerHTML`.
impl Render for Element {
    fn render_to(&self, buffer: &mut String) {
        buffer.push('<');
        buffer.push_str(&self.tag);

        for (name, value) in &self.attrs {
            buffer.push_str(&format!(" {}=\"", name));
            value.as_str().render_to(buffer);
            buffer.push('"');
        }

        if !self.styles.is_empty() {
            let style = self
                .styles
                .iter()
                .map(|(k, v)| format!("{}: {};", k, v))
                .collect::<Vec<_>>()
                .join(" ");
            buffer.push_str(" style=\"");
            style.as_str().render_to(buffer);
            buffer.push('"');
        }
        buffer.push('>');

        match &self.content {
            Some(Content::Text(text)) => text.as_str().render_to(buffer),
            Some(Content::Html(html)) => buffer.push_str(html),
            None => {}
        }

        for child in &self.children {
            child.render_to(buffer);
        }

        buffer.push_str(&format!("</{}>", self.tag));
    }
}

fn set_entry(entries: &mut Vec<(String, String)>, name: &str, value: String) {
    match entries.iter_mut().find(|(k, _)| k == name) {
        Some(entry) => entry.1 = value,
        None => entries.push((name.to_string(), value)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_nested_with_styles() {
        let el = Element::new("g")
            .attr("id", "x-axis")
            .style("opacity", 0)
            .child(Element::new("text").text("a < b"));

        assert_eq!(
            el.render().into_string(),
            "<g id=\"x-axis\" style=\"opacity: 0;\"><text>a &lt; b</text></g>"
        );
    }

    #[test]
    fn test_set_attr_replaces_in_place() {
        let mut el = Element::new("rect").attr("x", 1).attr("y", 2);
        el.set_attr("x", 5);

        assert_eq!(el.get_attr("x"), Some("5"));
        assert_eq!(el.render().into_string(), "<rect x=\"5\" y=\"2\"></rect>");
    }

    #[test]
    fn test_html_content_is_not_escaped() {
        let mut el = Element::new("div");
        el.set_html("<strong>1947</strong><br>");
        assert_eq!(el.render().into_string(), "<div><strong>1947</strong><br></div>");
    }

    #[test]
    fn test_queries() {
        let root = Element::new("svg")
            .child(Element::new("rect").attr("class", "bar"))
            .child(
                Element::new("g")
                    .attr("id", "inner")
                    .child(Element::new("rect").attr("class", "bar wide")),
            );

        assert_eq!(root.select_all_by_class("bar").len(), 2);
        assert_eq!(root.find_by_id("inner").map(|e| e.children().len()), Some(1));
        assert!(root.find_by_id("missing").is_none());
    }

    #[test]
    fn test_attribute_values_are_escaped() {
        let el = Element::new("rect").attr("data-date", "1947\"<&");
        assert_eq!(
            el.render().into_string(),
            "<rect data-date=\"1947&quot;&lt;&amp;\"></rect>"
        );
    }
}
