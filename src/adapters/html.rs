//! Minimal HTML helpers for the tracking page: form discovery and table scraping.
//!
//! The page is small and its layout is fixed, so these work on tag patterns
//! rather than a full DOM.

use regex::{Captures, Regex};
use std::sync::LazyLock;

static ATTR_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?s)([A-Za-z_:][-A-Za-z0-9_:.]*)\s*=\s*(?:"([^"]*)"|'([^']*)'|([^\s"'>]+))"#)
        .expect("attribute pattern")
});
static FORM_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)<form\b([^>]*)>(.*?)</form\s*>").expect("form pattern")
});
static INPUT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<input\b([^>]*)>").expect("input pattern"));
static CHECKED_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\bchecked\b").expect("checked pattern"));
static TABLE_TAG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<(/?)table\b([^>]*)>").expect("table pattern"));
static ROW_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<tr\b[^>]*>(.*?)</tr\s*>").expect("row pattern"));
static CELL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<td\b[^>]*>(.*?)</td\s*>").expect("cell pattern"));
static TAG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<[^>]*>").expect("tag pattern"));
static ENTITY_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"&(#[xX][0-9a-fA-F]+|#[0-9]+|[a-zA-Z]+);").expect("entity pattern")
});

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMethod {
    Get,
    Post,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HtmlForm {
    pub action: Option<String>,
    pub method: FormMethod,
    /// 送出時的欄位，依文件順序
    pub fields: Vec<(String, String)>,
}

impl HtmlForm {
    /// 設定欄位值，不存在就補上
    pub fn set_field(&mut self, name: &str, value: &str) {
        match self.fields.iter_mut().find(|(n, _)| n == name) {
            Some((_, v)) => *v = value.to_string(),
            None => self.fields.push((name.to_string(), value.to_string())),
        }
    }
}

/// Parses `name="value"` pairs from the inside of an opening tag. Names are lowercased.
pub fn attributes(tag_attrs: &str) -> Vec<(String, String)> {
    ATTR_RE
        .captures_iter(tag_attrs)
        .map(|caps| {
            let name = caps[1].to_ascii_lowercase();
            let value = caps
                .get(2)
                .or_else(|| caps.get(3))
                .or_else(|| caps.get(4))
                .map(|m| decode_entities(m.as_str()))
                .unwrap_or_default();
            (name, value)
        })
        .collect()
}

pub fn attr<'a>(attrs: &'a [(String, String)], name: &str) -> Option<&'a str> {
    attrs
        .iter()
        .find(|(n, _)| n == name)
        .map(|(_, v)| v.as_str())
}

/// 依 `name`（或 `id`）尋找表單
pub fn find_form(html: &str, form_name: &str) -> Option<HtmlForm> {
    FORM_RE.captures_iter(html).find_map(|caps| {
        let attrs = attributes(&caps[1]);
        let matches = attr(&attrs, "name") == Some(form_name) || attr(&attrs, "id") == Some(form_name);
        if !matches {
            return None;
        }

        let method = match attr(&attrs, "method") {
            Some(m) if m.eq_ignore_ascii_case("get") => FormMethod::Get,
            _ => FormMethod::Post,
        };

        Some(HtmlForm {
            action: attr(&attrs, "action").map(str::to_string),
            method,
            fields: form_inputs(&caps[2]),
        })
    })
}

fn form_inputs(form_body: &str) -> Vec<(String, String)> {
    INPUT_RE
        .captures_iter(form_body)
        .filter_map(|caps| {
            let raw = &caps[1];
            let attrs = attributes(raw);
            let name = attr(&attrs, "name")?;
            let kind = attr(&attrs, "type").unwrap_or("text").to_ascii_lowercase();
            match kind.as_str() {
                "submit" | "button" | "reset" | "image" | "file" => return None,
                "checkbox" | "radio" if !CHECKED_RE.is_match(raw) => return None,
                _ => {}
            }
            let value = attr(&attrs, "value").unwrap_or_default();
            Some((name.to_string(), value.to_string()))
        })
        .collect()
}

/// Returns the inner HTML of the `<table>` whose id matches, honoring nested tables.
pub fn find_table_by_id<'a>(html: &'a str, table_id: &str) -> Option<&'a str> {
    let mut tags = TABLE_TAG_RE.captures_iter(html);

    let inner_start = loop {
        let caps = tags.next()?;
        if caps[1].is_empty() && attr(&attributes(&caps[2]), "id") == Some(table_id) {
            break caps.get(0)?.end();
        }
    };

    let mut depth = 1usize;
    for caps in tags {
        if caps[1].is_empty() {
            depth += 1;
        } else {
            depth -= 1;
            if depth == 0 {
                return Some(&html[inner_start..caps.get(0)?.start()]);
            }
        }
    }
    None
}

/// 表格中每個含 `<td>` 的列，回傳儲存格文字；只有 `<th>` 的標題列略過
pub fn table_rows(table_html: &str) -> Vec<Vec<String>> {
    ROW_RE
        .captures_iter(table_html)
        .map(|row| {
            CELL_RE
                .captures_iter(&row[1])
                .map(|cell| cell_text(&cell[1]))
                .collect::<Vec<_>>()
        })
        .filter(|cells| !cells.is_empty())
        .collect()
}

pub fn cell_text(fragment: &str) -> String {
    normalize_ws(&decode_entities(&strip_tags(fragment)))
}

/// 標籤換成空白，避免 `<br>` 兩側的文字黏在一起
pub fn strip_tags(s: &str) -> String {
    TAG_RE.replace_all(s, " ").into_owned()
}

pub fn normalize_ws(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

pub fn decode_entities(s: &str) -> String {
    ENTITY_RE
        .replace_all(s, |caps: &Captures| {
            let entity = &caps[1];
            let decoded = if let Some(hex) = entity
                .strip_prefix("#x")
                .or_else(|| entity.strip_prefix("#X"))
            {
                u32::from_str_radix(hex, 16).ok().and_then(char::from_u32)
            } else if let Some(dec) = entity.strip_prefix('#') {
                dec.parse::<u32>().ok().and_then(char::from_u32)
            } else {
                match entity {
                    "amp" => Some('&'),
                    "lt" => Some('<'),
                    "gt" => Some('>'),
                    "quot" => Some('"'),
                    "apos" => Some('\''),
                    "nbsp" => Some('\u{a0}'),
                    _ => None,
                }
            };
            decoded
                .map(String::from)
                .unwrap_or_else(|| caps[0].to_string())
        })
        .into_owned()
}
