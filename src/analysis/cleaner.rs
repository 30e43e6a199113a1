use regex::Regex;

/// ASCII punctuation stripped during preprocessing, matching Python's
/// `string.punctuation`
const PUNCTUATION: &str = "!\"#$%&'()*+,-./:;<=>?@[\\]^_`{|}~";

/// Regex-based HTML cleaner for post bodies.
///
/// Posts arrive as rendered HTML from the Stack Exchange API: entity-encoded
/// text with `<p>`, `<a>`, `<code>` and `<pre>` markup. Entities are decoded
/// first, then markup is stripped, optionally dropping code blocks wholesale.
pub struct HtmlCleaner {
    pub remove_code: bool,
    code_block: Regex,
    tag: Regex,
    entity: Regex,
    url: Regex,
}

impl HtmlCleaner {
    pub fn new(remove_code: bool) -> Self {
        HtmlCleaner {
            remove_code,
            code_block: Regex::new(r"(?is)<(code|pre)\b[^>]*>.*?</(code|pre)>")
                .expect("code block pattern"),
            tag: Regex::new(r"<[^>]+>").expect("tag pattern"),
            entity: Regex::new(r"&(#x?[0-9a-fA-F]+|[a-zA-Z]+);").expect("entity pattern"),
            url: Regex::new(r"https?://\S+|www\.\S+").expect("url pattern"),
        }
    }

    /// Decode HTML entities and strip markup
    pub fn clean_html(&self, text: &str) -> String {
        let decoded = self.decode_entities(text);

        let without_code = if self.remove_code {
            self.code_block.replace_all(&decoded, " ")
        } else {
            std::borrow::Cow::Borrowed(decoded.as_str())
        };

        self.tag.replace_all(&without_code, " ").into_owned()
    }

    /// Remove http/https/www URLs
    pub fn strip_urls(&self, text: &str) -> String {
        self.url.replace_all(text, "").into_owned()
    }

    /// Delete ASCII punctuation characters
    pub fn strip_punctuation(&self, text: &str) -> String {
        text.chars().filter(|c| !PUNCTUATION.contains(*c)).collect()
    }

    fn decode_entities(&self, text: &str) -> String {
        self.entity
            .replace_all(text, |caps: &regex::Captures| {
                let body = &caps[1];
                match body {
                    "amp" => "&".to_string(),
                    "lt" => "<".to_string(),
                    "gt" => ">".to_string(),
                    "quot" => "\"".to_string(),
                    "apos" => "'".to_string(),
                    "nbsp" => " ".to_string(),
                    _ => {
                        if let Some(stripped) = body.strip_prefix('#') {
                            Self::decode_numeric(stripped)
                                .unwrap_or_else(|| caps[0].to_string())
                        } else {
                            // Unknown named entity, keep as-is
                            caps[0].to_string()
                        }
                    }
                }
            })
            .into_owned()
    }

    fn decode_numeric(body: &str) -> Option<String> {
        let code = if let Some(hex) = body.strip_prefix('x').or_else(|| body.strip_prefix('X')) {
            u32::from_str_radix(hex, 16).ok()?
        } else {
            body.parse::<u32>().ok()?
        };
        char::from_u32(code).map(|c| c.to_string())
    }
}

impl Default for HtmlCleaner {
    fn default() -> Self {
        HtmlCleaner::new(false)
    }
}
