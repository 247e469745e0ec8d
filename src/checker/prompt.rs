/// 构造事实核查提示词，新闻原文原样嵌入
pub fn build_prompt(news: &str) -> String {
    format!(
        r#"
You are a fact-checking AI. Analyze the following news and determine if it is Real, Fake, or Unverified.

News:
"{news}"

Respond only in JSON like this:
{{
  "status": "Fake/Real/Unverified",
  "corrected_news": "Corrected or true version (if fake or unclear)",
  "explanation": "Short reasoning or evidence"
}}
"#
    )
}

/// 在自由文本中查找第一个括号配平的 `{...}` 片段
///
/// 字符串字面量内的括号与转义字符不参与计数。某个 `{` 直到文本结束都未配平时，
/// 从下一个 `{` 重新尝试。
pub fn extract_json_object(text: &str) -> Option<&str> {
    let mut search_from = 0;
    while let Some(offset) = text[search_from..].find('{') {
        let start = search_from + offset;
        if let Some(end) = balanced_end(&text[start..]) {
            return Some(&text[start..start + end]);
        }
        search_from = start + 1;
    }
    None
}

// 返回与开头 `{` 配平的结束位置（不含），未配平返回 None
fn balanced_end(text: &str) -> Option<usize> {
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (i, c) in text.char_indices() {
        if in_string {
            match c {
                _ if escaped => escaped = false,
                '\\' => escaped = true,
                '"' => in_string = false,
                _ => {}
            }
            continue;
        }

        match c {
            '"' => in_string = true,
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(i + c.len_utf8());
                }
            }
            _ => {}
        }
    }
    None
}
