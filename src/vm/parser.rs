// VM Assembly Parser: splits program text into lines and resolves labels before execution

use std::collections::HashMap;

/// One source line after trimming
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Line<'a> {
    Blank,
    Label(&'a str),
    /// An instruction, optionally introduced by a `name:` prefix on the same line
    Statement {
        label: Option<&'a str>,
        mnemonic: &'a str,
        args: Vec<&'a str>,
    },
}

impl<'a> Line<'a> {
    pub fn parse(raw: &'a str) -> Self {
        let text = raw.trim();
        if text.is_empty() {
            return Line::Blank;
        }
        if let Some(name) = text.strip_suffix(':') {
            return Line::Label(name.trim_end());
        }

        let (mnemonic, rest) = split_first_word(text);
        match mnemonic.strip_suffix(':') {
            // `start: MOV R0, #0` declares `start` and still executes the MOV
            Some(label) if !label.is_empty() => {
                let (mnemonic, rest) = split_first_word(rest);
                Line::Statement {
                    label: Some(label),
                    mnemonic,
                    args: split_args(rest),
                }
            }
            _ => Line::Statement {
                label: None,
                mnemonic,
                args: split_args(rest),
            },
        }
    }
}

fn split_first_word(text: &str) -> (&str, &str) {
    match text.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (text, ""),
    }
}

fn split_args(rest: &str) -> Vec<&str> {
    if rest.is_empty() {
        Vec::new()
    } else {
        rest.split(',').map(str::trim).collect()
    }
}

/// Label name to the line index of the instruction following the declaration
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LabelTable {
    targets: HashMap<String, usize>,
}

impl LabelTable {
    pub fn target(&self, label: &str) -> Option<usize> {
        self.targets.get(label).copied()
    }

    pub fn len(&self) -> usize {
        self.targets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }
}

/// Scan every line once and record where each label points.
///
/// A repeated label silently moves to its latest declaration; only a warning is logged.
pub fn resolve_labels(lines: &[Line<'_>]) -> LabelTable {
    let mut targets = HashMap::new();
    for (idx, line) in lines.iter().enumerate() {
        let declared = match line {
            Line::Label(name) => Some(*name),
            Line::Statement { label, .. } => *label,
            Line::Blank => None,
        };
        // Either form points at the line after the declaration
        if let Some(name) = declared {
            if let Some(previous) = targets.insert(name.to_string(), idx + 1) {
                log::warn!(
                    target: "vm",
                    "Label '{}' redeclared at line {} (was line {}); the later declaration wins",
                    name,
                    idx + 1,
                    previous
                );
            }
        }
    }
    LabelTable { targets }
}

/// Result of parsing an assembly program
#[derive(Debug, Clone)]
pub struct Program<'a> {
    lines: Vec<Line<'a>>,
    labels: LabelTable,
}

impl<'a> Program<'a> {
    pub fn parse(source: &'a str) -> Self {
        let lines: Vec<Line<'a>> = source.lines().map(Line::parse).collect();
        let labels = resolve_labels(&lines);
        Program { lines, labels }
    }

    pub fn line(&self, idx: usize) -> Option<&Line<'a>> {
        self.lines.get(idx)
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn labels(&self) -> &LabelTable {
        &self.labels
    }
}
