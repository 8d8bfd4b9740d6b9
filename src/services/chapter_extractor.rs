//! 章节提取服务 - 业务能力层
//!
//! 把一份导出的 HTML 按 `h1`/`h2` 切分成有序的章节序列。
//!
//! 规则：
//! - 任意 `h1`/`h2` 都是分隔符（包括嵌套在其他元素里的），其文本即章节标题
//! - 分隔符之后、下一个分隔符之前的内容序列化回 HTML，作为章节正文
//! - 第一个分隔符之前的内容（含 `<head>`）视为前言，丢弃
//! - 找不到分隔符时返回空序列

use scraper::{ElementRef, Html, Node};

use crate::models::Chapter;

/// 章节分隔标签
pub const DELIMITER_TAGS: [&str; 2] = ["h1", "h2"];

/// 解析 HTML 文本并切分为章节
///
/// 纯函数：相同输入总是得到相同的章节序列
pub fn extract(html: &str) -> Vec<Chapter> {
    let document = Html::parse_document(html);
    let mut chapters: Vec<Chapter> = Vec::new();
    let mut parts: Vec<String> = Vec::new();

    // 按文档顺序遍历，子节点逆序入栈
    let mut stack = vec![document.tree.root()];
    while let Some(node) = stack.pop() {
        if let Some(element) = ElementRef::wrap(node) {
            if is_delimiter(element) {
                flush(&mut chapters, &mut parts);
                let title = element.text().collect::<String>().trim().to_string();
                chapters.push(Chapter::new(chapters.len(), title, String::new()));
                continue;
            }
        }

        let contains_delimiter = node.descendants().skip(1).filter_map(ElementRef::wrap).any(is_delimiter);
        if contains_delimiter || node.value().is_document() {
            stack.extend(node.children().rev());
            continue;
        }

        if chapters.is_empty() {
            continue;
        }

        match node.value() {
            Node::Element(_) => {
                if let Some(element) = ElementRef::wrap(node) {
                    parts.push(element.html());
                }
            }
            Node::Text(text) if !text.trim().is_empty() => parts.push(escape_text(text)),
            _ => {}
        }
    }

    flush(&mut chapters, &mut parts);
    chapters
}

fn is_delimiter(element: ElementRef) -> bool {
    DELIMITER_TAGS.contains(&element.value().name())
}

/// 把已收集的正文写入最后一个章节
fn flush(chapters: &mut [Chapter], parts: &mut Vec<String>) {
    if let Some(current) = chapters.last_mut() {
        current.body = parts.join("\n");
    }
    parts.clear();
}

fn escape_text(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '\u{a0}' => escaped.push_str("&nbsp;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
