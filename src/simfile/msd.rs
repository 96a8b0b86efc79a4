//! Reader for the MSD key/value format shared by `.sm` and `.ssc` files.
//!
//! A document is a sequence of `#KEY:value:value...;` parameters. Values may
//! contain `//` line comments and `\`-escaped characters. A `#` at the start of a
//! line also terminates an unclosed parameter, which real-world files rely on.

/// One `#KEY:...;` parameter
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Param {
    pub key: String,
    pub values: Vec<String>,
}

impl Param {
    /// First value, trimmed; empty when the parameter has none
    pub fn value(&self) -> &str {
        self.values.first().map_or("", |v| v.trim())
    }

    pub fn is(&self, key: &str) -> bool {
        self.key.eq_ignore_ascii_case(key)
    }
}

#[derive(Default)]
struct ParamBuilder {
    key: Option<String>,
    values: Vec<String>,
    current: String,
}

impl ParamBuilder {
    fn split(&mut self) {
        let part = std::mem::take(&mut self.current);
        if self.key.is_none() {
            self.key = Some(part.trim().to_string());
        } else {
            self.values.push(part);
        }
    }

    fn finish(mut self) -> Option<Param> {
        self.split();
        let key = self.key?;
        if key.is_empty() {
            return None;
        }
        Some(Param {
            key,
            values: self.values,
        })
    }
}

/// Parse every parameter in `text`
pub fn parse(text: &str) -> Vec<Param> {
    let mut params = Vec::new();
    let mut open: Option<ParamBuilder> = None;
    let mut at_line_start = true;
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        if c == '/' && chars.peek() == Some(&'/') {
            for skipped in chars.by_ref() {
                if skipped == '\n' {
                    break;
                }
            }
            if let Some(builder) = open.as_mut() {
                builder.current.push('\n');
            }
            at_line_start = true;
            continue;
        }

        match open.as_mut() {
            None => {
                if c == '#' {
                    open = Some(ParamBuilder::default());
                }
            }
            Some(builder) => match c {
                '\\' => {
                    if let Some(escaped) = chars.next() {
                        builder.current.push(escaped);
                    }
                }
                ':' => builder.split(),
                ';' => {
                    if let Some(param) = open.take().and_then(ParamBuilder::finish) {
                        params.push(param);
                    }
                }
                '#' if at_line_start => {
                    if let Some(param) = open.take().and_then(ParamBuilder::finish) {
                        params.push(param);
                    }
                    open = Some(ParamBuilder::default());
                }
                _ => builder.current.push(c),
            },
        }

        if c == '\n' {
            at_line_start = true;
        } else if !c.is_whitespace() {
            at_line_start = false;
        }
    }

    if let Some(param) = open.and_then(ParamBuilder::finish) {
        params.push(param);
    }
    params
}
