//! 寛容なJSONパーサ
//!
//! 構文エラーで止まらず、読めた部分から `Value` を組み立てる。

use crate::error::{Result, ToolError};
use serde_json::{Map, Number, Value};

/// 入れ子の上限（serde_jsonの再帰上限と同じ）
pub(super) const MAX_DEPTH: usize = 128;

/// 修復済みの値を返す。失敗するのは入れ子が深すぎるときだけ
pub(super) fn repair_value(input: &str) -> Result<Value> {
    let mut parser = Lenient::new(input);
    let first = parser.value()?;

    // トップレベルに値が複数並んでいたら配列にまとめる
    let mut rest = Vec::new();
    loop {
        parser.skip_trivia();
        match parser.peek() {
            None => break,
            Some(',') => parser.bump(),
            Some(_) => {
                let before = parser.pos;
                let value = parser.value()?;
                if parser.pos == before {
                    parser.bump();
                } else {
                    rest.push(value);
                }
            }
        }
    }

    if rest.is_empty() {
        Ok(first)
    } else {
        let mut all = vec![first];
        all.extend(rest);
        Ok(Value::Array(all))
    }
}

struct Lenient {
    chars: Vec<char>,
    pos: usize,
    depth: usize,
}

fn is_delimiter(c: char) -> bool {
    c.is_whitespace() || matches!(c, ',' | ':' | '}' | ']')
}

impl Lenient {
    fn new(input: &str) -> Self {
        Self {
            chars: input.chars().collect(),
            pos: 0,
            depth: 0,
        }
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn peek_at(&self, offset: usize) -> Option<char> {
        self.chars.get(self.pos + offset).copied()
    }

    fn bump(&mut self) {
        self.pos += 1;
    }

    /// 空白と `//`, `/* */`, `#` コメントを読み飛ばす
    fn skip_trivia(&mut self) {
        while let Some(c) = self.peek() {
            if c.is_whitespace() {
                self.bump();
            } else if c == '#' || (c == '/' && self.peek_at(1) == Some('/')) {
                while let Some(c) = self.peek() {
                    if c == '\n' {
                        break;
                    }
                    self.bump();
                }
            } else if c == '/' && self.peek_at(1) == Some('*') {
                self.pos += 2;
                while self.peek().is_some() {
                    if self.peek() == Some('*') && self.peek_at(1) == Some('/') {
                        self.pos += 2;
                        break;
                    }
                    self.bump();
                }
            } else {
                break;
            }
        }
    }

    fn value(&mut self) -> Result<Value> {
        self.skip_trivia();
        let value = match self.peek() {
            None => Value::Null,
            Some('{') => self.nested(Self::object)?,
            Some('[') => self.nested(Self::array)?,
            Some(q @ ('"' | '\'')) => Value::String(self.string(q)),
            Some(c) if c.is_ascii_digit() || matches!(c, '-' | '+' | '.') => self.number(),
            Some(c) if is_delimiter(c) => Value::Null,
            Some(_) => self.word(),
        };
        Ok(value)
    }

    /// コンテナ1段分の深さを数えてから読む
    fn nested(&mut self, read: fn(&mut Self) -> Result<Value>) -> Result<Value> {
        if self.depth >= MAX_DEPTH {
            return Err(ToolError::NestingTooDeep(MAX_DEPTH));
        }
        self.depth += 1;
        let value = read(self);
        self.depth -= 1;
        value
    }

    fn object(&mut self) -> Result<Value> {
        self.bump();
        let mut map = Map::new();
        loop {
            self.skip_trivia();
            match self.peek() {
                None => break,
                Some('}') | Some(']') => {
                    self.bump();
                    break;
                }
                Some(',') | Some(':') => self.bump(),
                Some(c) => {
                    let key = match c {
                        '"' | '\'' => self.string(c),
                        _ => self.bare(),
                    };
                    self.skip_trivia();
                    if self.peek() == Some(':') {
                        self.bump();
                    }
                    self.skip_trivia();
                    let value = match self.peek() {
                        None | Some(',') | Some('}') | Some(']') => Value::Null,
                        _ => self.value()?,
                    };
                    map.insert(key, value);
                }
            }
        }
        Ok(Value::Object(map))
    }

    fn array(&mut self) -> Result<Value> {
        self.bump();
        let mut items = Vec::new();
        loop {
            self.skip_trivia();
            match self.peek() {
                None => break,
                Some(']') | Some('}') => {
                    self.bump();
                    break;
                }
                Some(',') | Some(':') => self.bump(),
                Some(_) => items.push(self.value()?),
            }
        }
        Ok(Value::Array(items))
    }

    /// 引用符で囲まれた文字列。閉じ引用符がなければ末尾まで読む
    fn string(&mut self, quote: char) -> String {
        self.bump();
        let mut out = String::new();
        while let Some(c) = self.peek() {
            self.bump();
            if c == quote {
                return out;
            }
            if c != '\\' {
                out.push(c);
                continue;
            }
            let Some(escaped) = self.peek() else {
                break;
            };
            self.bump();
            match escaped {
                'n' => out.push('\n'),
                't' => out.push('\t'),
                'r' => out.push('\r'),
                'b' => out.push('\u{8}'),
                'f' => out.push('\u{c}'),
                'u' => match self.unicode_escape() {
                    Some(ch) => out.push(ch),
                    None => out.push_str("\\u"),
                },
                other => out.push(other),
            }
        }
        out
    }

    /// `\u` の後の4桁。サロゲートペアは1文字にまとめ、片割れだけならU+FFFD
    fn unicode_escape(&mut self) -> Option<char> {
        let code = self.hex4(self.pos)?;
        self.pos += 4;
        match code {
            0xD800..=0xDBFF => {
                let low = match (self.peek(), self.peek_at(1)) {
                    (Some('\\'), Some('u')) => self.hex4(self.pos + 2),
                    _ => None,
                };
                match low {
                    Some(low @ 0xDC00..=0xDFFF) => {
                        self.pos += 6;
                        let combined = 0x10000 + ((code - 0xD800) << 10) + (low - 0xDC00);
                        char::from_u32(combined)
                    }
                    _ => Some(char::REPLACEMENT_CHARACTER),
                }
            }
            0xDC00..=0xDFFF => Some(char::REPLACEMENT_CHARACTER),
            _ => char::from_u32(code),
        }
    }

    fn hex4(&self, at: usize) -> Option<u32> {
        let digits = self.chars.get(at..at + 4)?;
        if !digits.iter().all(|c| c.is_ascii_hexdigit()) {
            return None;
        }
        let hex: String = digits.iter().collect();
        u32::from_str_radix(&hex, 16).ok()
    }

    fn number(&mut self) -> Value {
        let start = self.pos;
        while let Some(c) = self.peek() {
            if c.is_ascii_digit() || matches!(c, '-' | '+' | '.' | 'e' | 'E') {
                self.bump();
            } else {
                break;
            }
        }
        let raw: String = self.chars[start..self.pos].iter().collect();

        let mut text = raw.trim_start_matches('+').to_string();
        if text.starts_with('.') {
            text.insert(0, '0');
        } else if text.starts_with("-.") {
            text.insert(1, '0');
        }
        if text.ends_with('.') {
            text.push('0');
        }

        match text.parse::<Number>() {
            Ok(n) => Value::Number(n),
            Err(_) => Value::String(raw),
        }
    }

    /// 引用符なしの単語。既知のリテラルは値に変換する
    fn word(&mut self) -> Value {
        let word = self.bare();
        match word.as_str() {
            "true" | "True" | "TRUE" => Value::Bool(true),
            "false" | "False" | "FALSE" => Value::Bool(false),
            "null" | "None" | "NULL" | "undefined" | "NaN" | "Infinity" => Value::Null,
            _ => Value::String(word),
        }
    }

    fn bare(&mut self) -> String {
        let start = self.pos;
        while let Some(c) = self.peek() {
            if is_delimiter(c) {
                break;
            }
            self.bump();
        }
        self.chars[start..self.pos].iter().collect()
    }
}
