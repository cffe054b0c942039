//! Text substitution engine.
//!
//! Supported tags:
//!
//! - `{{ path.to.field }}` inserts a scalar value from the data
//! - `{{#if path}} ... {{else}} ... {{/if}}` renders one branch depending on
//!   the truthiness of a value (`false`, `null`, `0`, `""` and empty
//!   collections are false)
//! - `{{! comment }}` is dropped
//!
//! A block tag that sits alone on its line removes that whole line from the
//! output, so conditionals do not leave blank lines behind.

use std::sync::OnceLock;

use regex::Regex;
use serde_json::Value;

use crate::error::{TemplateError, TemplateResult};

fn tag_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\{\{(.*?)\}\}").expect("tag pattern is a valid regex"))
}

fn path_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*(\.[A-Za-z0-9_]+)*$")
            .expect("path pattern is a valid regex")
    })
}

#[derive(Debug, Clone, PartialEq)]
enum Node {
    Text(String),
    Field(String),
    If {
        path: String,
        then: Vec<Node>,
        otherwise: Vec<Node>,
    },
}

#[derive(Debug)]
enum Token {
    Text(String),
    Tag(String),
}

#[derive(Debug, PartialEq)]
enum Tag<'a> {
    Field(&'a str),
    If(&'a str),
    Else,
    EndIf,
    Comment,
}

impl Tag<'_> {
    fn is_block(&self) -> bool {
        !matches!(self, Tag::Field(_))
    }
}

/// A parsed template, ready to be rendered any number of times.
#[derive(Debug, Clone)]
pub struct Template {
    name: String,
    nodes: Vec<Node>,
}

struct OpenBlock {
    path: String,
    then: Vec<Node>,
    otherwise: Vec<Node>,
    in_else: bool,
}

impl OpenBlock {
    fn nodes(&mut self) -> &mut Vec<Node> {
        if self.in_else {
            &mut self.otherwise
        } else {
            &mut self.then
        }
    }
}

impl Template {
    /// Parse template text. `name` is only used in error messages.
    pub fn parse(name: impl Into<String>, source: &str) -> TemplateResult<Self> {
        let name = name.into();
        let syntax = |message: String| TemplateError::Syntax {
            template: name.clone(),
            message,
        };

        let tokens = tokenize(source).map_err(syntax)?;

        let mut root = Vec::new();
        let mut open: Vec<OpenBlock> = Vec::new();

        for token in tokens {
            let current = match open.last_mut() {
                Some(block) => block.nodes(),
                None => &mut root,
            };

            let content = match token {
                Token::Text(text) => {
                    if !text.is_empty() {
                        current.push(Node::Text(text));
                    }
                    continue;
                }
                Token::Tag(content) => content,
            };

            match classify(&content).map_err(syntax)? {
                Tag::Comment => {}
                Tag::Field(path) => current.push(Node::Field(path.to_string())),
                Tag::If(path) => open.push(OpenBlock {
                    path: path.to_string(),
                    then: Vec::new(),
                    otherwise: Vec::new(),
                    in_else: false,
                }),
                Tag::Else => match open.last_mut() {
                    Some(block) if block.in_else => {
                        return Err(syntax(format!("duplicate {{{{else}}}} in block `{}`", block.path)));
                    }
                    Some(block) => block.in_else = true,
                    None => return Err(syntax("{{else}} outside of an {{#if}} block".to_string())),
                },
                Tag::EndIf => {
                    let block = open
                        .pop()
                        .ok_or_else(|| syntax("{{/if}} without a matching {{#if}}".to_string()))?;
                    let node = Node::If {
                        path: block.path,
                        then: block.then,
                        otherwise: block.otherwise,
                    };
                    match open.last_mut() {
                        Some(parent) => parent.nodes().push(node),
                        None => root.push(node),
                    }
                }
            }
        }

        if let Some(block) = open.last() {
            return Err(syntax(format!("unclosed {{{{#if {}}}}}", block.path)));
        }

        Ok(Self { name, nodes: root })
    }

    /// Render against a JSON data tree.
    pub fn render(&self, data: &Value) -> TemplateResult<String> {
        let mut out = String::new();
        self.render_nodes(&self.nodes, data, &mut out)?;
        Ok(out)
    }

    fn render_nodes(&self, nodes: &[Node], data: &Value, out: &mut String) -> TemplateResult<()> {
        for node in nodes {
            match node {
                Node::Text(text) => out.push_str(text),
                Node::Field(path) => match self.lookup(data, path)? {
                    Value::String(s) => out.push_str(s),
                    Value::Number(n) => out.push_str(&n.to_string()),
                    Value::Bool(b) => out.push_str(&b.to_string()),
                    Value::Null => {}
                    Value::Array(_) | Value::Object(_) => {
                        return Err(TemplateError::Syntax {
                            template: self.name.clone(),
                            message: format!("`{}` is not a scalar value", path),
                        });
                    }
                },
                Node::If {
                    path,
                    then,
                    otherwise,
                } => {
                    let branch = if is_truthy(self.lookup(data, path)?) {
                        then
                    } else {
                        otherwise
                    };
                    self.render_nodes(branch, data, out)?;
                }
            }
        }
        Ok(())
    }

    fn lookup<'a>(&self, data: &'a Value, path: &str) -> TemplateResult<&'a Value> {
        path.split('.')
            .try_fold(data, |value, key| match value {
                Value::Array(items) => key.parse::<usize>().ok().and_then(|i| items.get(i)),
                _ => value.get(key),
            })
            .ok_or_else(|| TemplateError::MissingField {
                template: self.name.clone(),
                field: path.to_string(),
            })
    }
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map_or(true, |f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(map) => !map.is_empty(),
    }
}

fn classify(content: &str) -> Result<Tag<'_>, String> {
    let content = content.trim();

    if content.starts_with('!') {
        return Ok(Tag::Comment);
    }
    if content == "else" {
        return Ok(Tag::Else);
    }
    if content == "/if" {
        return Ok(Tag::EndIf);
    }
    if let Some(rest) = content.strip_prefix("#if") {
        let path = rest.trim();
        if rest.starts_with(char::is_whitespace) && path_pattern().is_match(path) {
            return Ok(Tag::If(path));
        }
        return Err(format!("invalid condition `{{{{{}}}}}`", content));
    }
    if content.starts_with('#') || content.starts_with('/') {
        return Err(format!("unknown block tag `{{{{{}}}}}`", content));
    }
    if path_pattern().is_match(content) {
        return Ok(Tag::Field(content));
    }
    Err(format!("invalid field reference `{{{{{}}}}}`", content))
}

/// Split the source into alternating text and tag tokens, removing the lines
/// of standalone block tags.
fn tokenize(source: &str) -> Result<Vec<Token>, String> {
    let mut texts = Vec::new();
    let mut tags = Vec::new();
    let mut last = 0;

    for caps in tag_pattern().captures_iter(source) {
        let whole = caps.get(0).expect("group 0 always matches");
        texts.push(&source[last..whole.start()]);
        tags.push(caps[1].to_string());
        last = whole.end();
    }
    texts.push(&source[last..]);

    let mut offset = 0;
    for (i, text) in texts.iter().enumerate() {
        if let Some(pos) = text.find("{{") {
            let line = source[..offset + pos].matches('\n').count() + 1;
            return Err(format!("unterminated tag on line {}", line));
        }
        offset += text.len() + tags.get(i).map_or(0, |tag| tag.len() + 4);
    }

    // texts[i] precedes tags[i] and texts[i + 1] follows it
    let mut trim_start = vec![false; texts.len()];
    let mut trim_end = vec![false; texts.len()];
    let last_text = texts.len() - 1;

    for (i, tag) in tags.iter().enumerate() {
        let is_block = classify(tag).map(|t| t.is_block()).unwrap_or(false);
        if !is_block {
            continue;
        }

        let before = texts[i];
        let after = texts[i + 1];

        let line_start = match before.rfind('\n') {
            Some(pos) => before[pos + 1..].trim().is_empty(),
            None => i == 0 && before.trim().is_empty(),
        };
        let line_end = match after.find('\n') {
            Some(pos) => after[..pos].trim().is_empty(),
            None => i + 1 == last_text && after.trim().is_empty(),
        };

        if line_start && line_end {
            trim_end[i] = true;
            trim_start[i + 1] = true;
        }
    }

    let mut tokens = Vec::with_capacity(texts.len() + tags.len());
    for (i, text) in texts.iter().enumerate() {
        let start = if trim_start[i] {
            text.find('\n').map_or(text.len(), |pos| pos + 1)
        } else {
            0
        };
        let end = if trim_end[i] {
            text.rfind('\n').map_or(0, |pos| pos + 1)
        } else {
            text.len()
        };
        let kept = if start < end { &text[start..end] } else { "" };
        tokens.push(Token::Text(kept.to_string()));

        if let Some(tag) = tags.get(i) {
            tokens.push(Token::Tag(tag.clone()));
        }
    }

    Ok(tokens)
}
