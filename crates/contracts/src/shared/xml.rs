//! Дерево XML-элементов для моделей SOAP-сервиса WayBill.
//!
//! Запрос собирается через [`XmlElement::add_child`] и выводится
//! [`XmlElement::to_xml_string`]; ответ разбирается [`parse`] в то же дерево,
//! поэтому модели не зависят от времени жизни DOM.

use std::fmt::{self, Display};
use std::str::FromStr;

use sxd_document::dom::{ChildOfElement, ChildOfRoot, Element};
use sxd_document::parser;
use thiserror::Error;

/// Ошибки разбора XML
#[derive(Debug, Error)]
pub enum XmlError {
    #[error("Malformed XML: {0}")]
    Parse(String),

    #[error("XML document has no root element")]
    EmptyDocument,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct XmlElement {
    /// Локальное имя (без префикса пространства имён)
    pub name: String,
    pub text: Option<String>,
    pub children: Vec<XmlElement>,
}

impl XmlElement {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            text: None,
            children: Vec::new(),
        }
    }

    pub fn with_text(name: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            text: Some(text.into()),
            children: Vec::new(),
        }
    }

    /// Текст элемента без пробелов по краям ("" если текста нет)
    pub fn text(&self) -> &str {
        self.text.as_deref().map(str::trim).unwrap_or("")
    }

    pub fn push_child(&mut self, child: XmlElement) -> &mut XmlElement {
        self.children.push(child);
        let last = self.children.len() - 1;
        &mut self.children[last]
    }

    /// Добавить `<tag>value</tag>` и вернуть новый элемент
    pub fn add_child<T: Display>(&mut self, tag: &str, value: T) -> &mut XmlElement {
        self.push_child(XmlElement::with_text(tag, value.to_string()))
    }

    /// Добавить пустой контейнер `<tag />` и вернуть его
    pub fn add_container(&mut self, tag: &str) -> &mut XmlElement {
        self.push_child(XmlElement::new(tag))
    }

    /// Первый прямой потомок с указанным именем
    pub fn find(&self, tag: &str) -> Option<&XmlElement> {
        self.children.iter().find(|child| child.name == tag)
    }

    /// Прямые потомки с указанным именем
    pub fn find_all<'a>(&'a self, tag: &'a str) -> impl Iterator<Item = &'a XmlElement> + 'a {
        self.children.iter().filter(move |child| child.name == tag)
    }

    /// Сам элемент и все его потомки в порядке документа
    pub fn descendants(&self) -> Vec<&XmlElement> {
        let mut out = Vec::new();
        self.walk(&mut out);
        out
    }

    fn walk<'a>(&'a self, out: &mut Vec<&'a XmlElement>) {
        out.push(self);
        for child in &self.children {
            child.walk(out);
        }
    }

    /// Сам элемент и потомки с именем `tag` в порядке документа
    pub fn iter(&self, tag: &str) -> Vec<&XmlElement> {
        self.descendants()
            .into_iter()
            .filter(|element| element.name == tag)
            .collect()
    }

    /// Текст первого потомка `tag`, либо `default`, если потомка нет
    /// или он пуст
    pub fn get_text(&self, tag: &str, default: &str) -> String {
        match self.find(tag).map(XmlElement::text) {
            Some(text) if !text.is_empty() => text.to_string(),
            _ => default.to_string(),
        }
    }

    pub fn get_int(&self, tag: &str, default: i64) -> i64 {
        self.get_parsed(tag, default)
    }

    pub fn get_i32(&self, tag: &str, default: i32) -> i32 {
        self.get_parsed(tag, default)
    }

    pub fn get_decimal(&self, tag: &str, default: f64) -> f64 {
        self.get_parsed(tag, default)
    }

    fn get_parsed<T: FromStr>(&self, tag: &str, default: T) -> T {
        let text = self.get_text(tag, "");
        if text.is_empty() {
            return default;
        }
        text.parse().unwrap_or(default)
    }

    pub fn to_xml_string(&self) -> String {
        let mut out = String::new();
        self.write_to(&mut out);
        out
    }

    fn write_to(&self, out: &mut String) {
        let text = self.text.as_deref().unwrap_or("");
        if text.is_empty() && self.children.is_empty() {
            out.push('<');
            out.push_str(&self.name);
            out.push_str(" />");
            return;
        }

        out.push('<');
        out.push_str(&self.name);
        out.push('>');
        out.push_str(&escape(text));
        for child in &self.children {
            child.write_to(out);
        }
        out.push_str("</");
        out.push_str(&self.name);
        out.push('>');
    }
}

impl Display for XmlElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_xml_string())
    }
}

/// Экранирование текста для вставки между XML-тегами
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Разбор XML-документа в дерево с корневым элементом
pub fn parse(input: &str) -> Result<XmlElement, XmlError> {
    let input = input.trim_start_matches('\u{feff}');
    let package = parser::parse(input).map_err(|e| XmlError::Parse(format!("{:?}", e)))?;
    let document = package.as_document();

    let root = document
        .root()
        .children()
        .into_iter()
        .find_map(|child| match child {
            ChildOfRoot::Element(element) => Some(element),
            _ => None,
        })
        .ok_or(XmlError::EmptyDocument)?;

    Ok(from_dom(root))
}

fn from_dom(element: Element<'_>) -> XmlElement {
    let mut text: Option<String> = None;
    let mut children = Vec::new();

    for child in element.children() {
        match child {
            ChildOfElement::Element(inner) => children.push(from_dom(inner)),
            ChildOfElement::Text(node) => text.get_or_insert_with(String::new).push_str(node.text()),
            _ => {}
        }
    }

    XmlElement {
        name: element.name().local_part().to_string(),
        text,
        children,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<root xmlns="http://tempuri.org/">
  <ID> 42 </ID>
  <NAME>ხე-ტყე</NAME>
  <PRICE>12.5</PRICE>
  <BAD>abc</BAD>
  <EMPTY></EMPTY>
  <LIST>
    <ITEM><ID>1</ID></ITEM>
    <ITEM><ID>2</ID></ITEM>
  </LIST>
</root>"#;

    #[test]
    fn test_parse_strips_namespaces_and_reads_values() {
        let root = parse(SAMPLE).unwrap();
        assert_eq!(root.name, "root");
        assert_eq!(root.get_int("ID", 0), 42);
        assert_eq!(root.get_text("NAME", ""), "ხე-ტყე");
        assert_eq!(root.get_decimal("PRICE", 0.0), 12.5);
    }

    #[test]
    fn test_defaults_for_missing_empty_and_invalid() {
        let root = parse(SAMPLE).unwrap();
        assert_eq!(root.get_int("BAD", 7), 7);
        assert_eq!(root.get_int("MISSING", -1), -1);
        assert_eq!(root.get_text("EMPTY", "none"), "none");
        assert_eq!(root.get_decimal("NAME", 1.5), 1.5);
    }

    #[test]
    fn test_iter_walks_descendants_in_order() {
        let root = parse(SAMPLE).unwrap();
        let ids: Vec<i64> = root.iter("ITEM").iter().map(|e| e.get_int("ID", 0)).collect();
        assert_eq!(ids, vec![1, 2]);
        // включая сам элемент
        assert_eq!(root.iter("root").len(), 1);
    }

    #[test]
    fn test_parse_tolerates_bom() {
        let root = parse("\u{feff}<a><b>1</b></a>").unwrap();
        assert_eq!(root.get_int("b", 0), 1);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(parse("<a><b></a>").is_err());
    }

    #[test]
    fn test_serialization_escapes_and_collapses_empty() {
        let mut root = XmlElement::new("GOODS");
        root.add_child("W_NAME", "A & B <C>");
        root.add_child("UNIT_TXT", "");
        root.add_container("LIST");
        assert_eq!(
            root.to_xml_string(),
            "<GOODS><W_NAME>A &amp; B &lt;C&gt;</W_NAME><UNIT_TXT /><LIST /></GOODS>"
        );
    }
}
