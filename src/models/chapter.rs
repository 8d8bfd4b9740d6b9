use scraper::Html;

/// 从导出文件中解析出的一个章节
///
/// 章节序列解析完成后不再修改，编排层只以切片形式借用
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chapter {
    /// 在序列中的位置（从 0 开始），用于 `--start`
    pub index: usize,
    /// 分隔标题的文本（已去除首尾空白）
    pub title: String,
    /// 本章正文的 HTML 片段
    pub body: String,
}

impl Chapter {
    pub fn new(index: usize, title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            index,
            title: title.into(),
            body: body.into(),
        }
    }

    /// 在站点上对应的章节序号（从 1 开始）
    pub fn position(&self) -> usize {
        self.index + 1
    }

    /// 正文的纯文本预览，连续空白合并为一个空格，超出 `max_chars` 时截断
    pub fn preview(&self, max_chars: usize) -> String {
        let fragment = Html::parse_fragment(&self.body);
        let text = fragment
            .root_element()
            .text()
            .flat_map(str::split_whitespace)
            .collect::<Vec<_>>()
            .join(" ");
        crate::utils::logging::truncate_text(&text, max_chars)
    }
}
