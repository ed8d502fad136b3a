//! Class diagram grammar using chumsky
//!
//! Turns diagram text into an explicit, ordered statement list. Two
//! sub-grammars overlap in the same text: `class` blocks may span lines and
//! start anywhere, association statements are whole trimmed lines. Lines
//! matching neither are reported as skipped, never as errors.

use chumsky::prelude::*;
use serde::Serialize;

use super::database::Visibility;
use crate::core::chumsky_utils::{
    followed_by_inline_whitespace, identifier, inline_whitespace, mermaid_comment,
    optional_whitespace, whitespace_required,
};
use crate::core::{SkipReason, SkippedLine};

/// An attribute line inside a class body
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParsedAttribute {
    pub visibility: Visibility,
    pub name: String,
    pub type_token: String,
}

/// A `class Name { ... }` block
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParsedClass {
    pub name: String,
    pub attributes: Vec<ParsedAttribute>,
    /// Line of the `class` keyword
    pub line: usize,
    /// Line of the closing brace
    pub end_line: usize,
}

/// Quoted end label of a labeled association, e.g. `"*bookings"`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Label {
    /// Label text with the marker stripped
    pub text: String,
    /// Whether the label carried a leading `*`
    pub many: bool,
}

/// Diamond kind on an adorned association end
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Diamond {
    /// Open diamond `o`
    Aggregation,
    /// Filled diamond `*`
    Composition,
}

/// Which end of a symbol association carries a diamond
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Adornment {
    /// Plain `--`
    None,
    /// `o--` or `*--`
    Left(Diamond),
    /// `--o` or `--*`
    Right(Diamond),
}

/// The two association grammars, in match priority order
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "form", rename_all = "snake_case")]
pub enum AssociationForm {
    /// `Left "label" <--> "label" Right`
    Labeled {
        left: String,
        left_label: Label,
        right_label: Label,
        right: String,
    },
    /// `Left <op> Right <ignored>`
    Symbol {
        left: String,
        adornment: Adornment,
        right: String,
    },
}

/// An association statement with its source line
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParsedAssociation {
    pub line: usize,
    /// Trimmed source text
    pub text: String,
    pub form: AssociationForm,
}

impl ParsedAssociation {
    /// Names of the two classes involved, left first
    pub fn endpoints(&self) -> (&str, &str) {
        match &self.form {
            AssociationForm::Labeled { left, right, .. } => (left, right),
            AssociationForm::Symbol { left, right, .. } => (left, right),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "statement", rename_all = "snake_case")]
pub enum Statement {
    Class(ParsedClass),
    Association(ParsedAssociation),
}

impl Statement {
    pub fn line(&self) -> usize {
        match self {
            Statement::Class(class) => class.line,
            Statement::Association(assoc) => assoc.line,
        }
    }
}

/// Result of scanning diagram text
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Scan {
    /// Statements ordered by source line; a class comes before an
    /// association starting on the same line
    pub statements: Vec<Statement>,
    /// Lines that contributed nothing, ordered by line
    pub skipped: Vec<SkippedLine>,
}

impl Scan {
    pub fn classes(&self) -> impl Iterator<Item = &ParsedClass> {
        self.statements.iter().filter_map(|s| match s {
            Statement::Class(class) => Some(class),
            Statement::Association(_) => None,
        })
    }

    pub fn associations(&self) -> impl Iterator<Item = &ParsedAssociation> {
        self.statements.iter().filter_map(|s| match s {
            Statement::Association(assoc) => Some(assoc),
            Statement::Class(_) => None,
        })
    }
}

/// Chumsky-based class diagram grammar
pub struct ChumskyClassParser;

impl ChumskyClassParser {
    pub fn new() -> Self {
        Self
    }

    /// Scan a complete diagram into statements and skipped lines
    pub fn scan(&self, input: &str) -> Scan {
        let mut statements = Vec::new();
        let mut skipped = Vec::new();

        let (classes, covered) = self.scan_class_blocks(input, &mut skipped);
        statements.extend(classes.into_iter().map(Statement::Class));

        for (index, raw) in input.lines().enumerate() {
            let line = index + 1;
            let trimmed = raw.trim();

            if let Some(form) = self.parse_association(trimmed) {
                statements.push(Statement::Association(ParsedAssociation {
                    line,
                    text: trimmed.to_string(),
                    form,
                }));
                continue;
            }

            let inside_block = covered.iter().any(|&(start, end)| line >= start && line <= end);
            if !inside_block && !Self::is_ignorable(trimmed) {
                skipped.push(SkippedLine::new(
                    line,
                    trimmed,
                    SkipReason::UnrecognizedStatement,
                ));
            }
        }

        // Stable sort keeps classes ahead of associations on the same line
        statements.sort_by_key(Statement::line);
        skipped.sort_by_key(|s| s.line);

        Scan {
            statements,
            skipped,
        }
    }

    /// Parse one trimmed line as an association, labeled form first
    pub fn parse_association(&self, line: &str) -> Option<AssociationForm> {
        Self::association_parser().parse(line).into_result().ok()
    }

    /// Parse one trimmed class body line as an attribute
    pub fn parse_attribute(&self, line: &str) -> Option<ParsedAttribute> {
        Self::attribute_parser()
            .then_ignore(any().repeated())
            .parse(line)
            .into_result()
            .ok()
    }

    /// Find every `class` block by repeated non-overlapping matching.
    ///
    /// Returns the blocks plus the line ranges they cover.
    fn scan_class_blocks(
        &self,
        input: &str,
        skipped: &mut Vec<SkippedLine>,
    ) -> (Vec<ParsedClass>, Vec<(usize, usize)>) {
        let mut classes = Vec::new();
        let mut covered = Vec::new();
        let mut cursor = 0;

        while let Some(found) = input[cursor..].find("class") {
            let start = cursor + found;
            let rest = &input[start..];

            if !Self::starts_on_word_boundary(input, start) {
                cursor = start + "class".len();
                continue;
            }

            let matched = Self::class_block_parser()
                .to_slice()
                .then_ignore(any().repeated())
                .parse(rest)
                .into_result()
                .ok();

            let Some(block) = matched else {
                if Self::class_header_parser()
                    .then_ignore(any().repeated())
                    .parse(rest)
                    .into_result()
                    .is_ok()
                {
                    let line = Self::line_at(input, start);
                    skipped.push(SkippedLine::new(
                        line,
                        Self::line_text(input, line),
                        SkipReason::UnterminatedClass,
                    ));
                }
                cursor = start + "class".len();
                continue;
            };

            let end = start + block.len();
            let first_line = Self::line_at(input, start);
            let last_line = Self::line_at(input, end - 1);

            if let Ok((name, body)) = Self::class_block_parser().parse(block).into_result() {
                let body_first_line = Self::line_at(input, start + block.find('{').unwrap_or(0));
                let attributes = self.parse_body(body, body_first_line, skipped);
                classes.push(ParsedClass {
                    name,
                    attributes,
                    line: first_line,
                    end_line: last_line,
                });
                covered.push((first_line, last_line));
            }

            cursor = end;
        }

        (classes, covered)
    }

    /// Parse each body line independently, in text order
    fn parse_body(
        &self,
        body: &str,
        first_line: usize,
        skipped: &mut Vec<SkippedLine>,
    ) -> Vec<ParsedAttribute> {
        let mut attributes = Vec::new();

        for (offset, raw) in body.split('\n').enumerate() {
            let trimmed = raw.trim();
            if trimmed.is_empty() {
                continue;
            }
            match self.parse_attribute(trimmed) {
                Some(attribute) => attributes.push(attribute),
                None => skipped.push(SkippedLine::new(
                    first_line + offset,
                    trimmed,
                    SkipReason::MalformedAttribute,
                )),
            }
        }

        attributes
    }

    fn class_header_parser<'src>() -> impl Parser<'src, &'src str, String> + Clone {
        text::keyword("class")
            .then_ignore(whitespace_required())
            .ignore_then(identifier())
            .then_ignore(optional_whitespace())
            .then_ignore(just('{'))
    }

    /// `class Name { body }`, where the first `}` ends the body
    fn class_block_parser<'src>() -> impl Parser<'src, &'src str, (String, &'src str)> + Clone {
        Self::class_header_parser()
            .then(none_of('}').repeated().to_slice())
            .then_ignore(just('}'))
    }

    /// `<marker> name : type`, whitespace allowed between the parts
    fn attribute_parser<'src>() -> impl Parser<'src, &'src str, ParsedAttribute> + Clone {
        let marker = choice((
            just('+').to(Visibility::Public),
            just('-').to(Visibility::Private),
            just('#').to(Visibility::Protected),
        ));

        marker
            .then_ignore(inline_whitespace())
            .then(identifier())
            .then_ignore(inline_whitespace())
            .then_ignore(just(':'))
            .then_ignore(inline_whitespace())
            .then(Self::type_token_parser())
            .map(|((visibility, name), type_token)| ParsedAttribute {
                visibility,
                name,
                type_token,
            })
    }

    /// `Ident`, optionally `<Ident>`, optionally `[]`; kept as written
    fn type_token_parser<'src>() -> impl Parser<'src, &'src str, String> + Clone {
        let generic = inline_whitespace()
            .then(just('<'))
            .then(text::ident())
            .then(just('>'))
            .ignored();
        let array = inline_whitespace().then(just("[]")).ignored();

        text::ident()
            .then(generic.or_not())
            .then(array.or_not())
            .to_slice()
            .map(|s: &str| s.to_string())
    }

    fn association_parser<'src>() -> impl Parser<'src, &'src str, AssociationForm> + Clone {
        Self::labeled_parser().or(Self::symbol_parser())
    }

    /// `"label"` with an optional leading `*`
    fn label_parser<'src>() -> impl Parser<'src, &'src str, Label> + Clone {
        just('"')
            .ignore_then(inline_whitespace())
            .ignore_then(just('*').or_not())
            .then_ignore(inline_whitespace())
            .then(identifier())
            .then_ignore(inline_whitespace())
            .then_ignore(just('"'))
            .map(|(marker, text)| Label {
                text,
                many: marker.is_some(),
            })
    }

    /// Labeled association, anchored to the whole line
    fn labeled_parser<'src>() -> impl Parser<'src, &'src str, AssociationForm> + Clone {
        identifier()
            .then_ignore(inline_whitespace())
            .then(Self::label_parser())
            .then_ignore(inline_whitespace())
            .then_ignore(just("<-->"))
            .then_ignore(inline_whitespace())
            .then(Self::label_parser())
            .then_ignore(inline_whitespace())
            .then(identifier())
            .then_ignore(end())
            .map(
                |(((left, left_label), right_label), right)| AssociationForm::Labeled {
                    left,
                    left_label,
                    right_label,
                    right,
                },
            )
    }

    /// Symbol association, anchored at line start; the tail is ignored
    fn symbol_parser<'src>() -> impl Parser<'src, &'src str, AssociationForm> + Clone {
        // Right adornments need a following blank so `A --order` stays `--`
        let operator = choice((
            just("o--").to(Adornment::Left(Diamond::Aggregation)),
            just("*--").to(Adornment::Left(Diamond::Composition)),
            just("--o")
                .then_ignore(followed_by_inline_whitespace())
                .to(Adornment::Right(Diamond::Aggregation)),
            just("--*")
                .then_ignore(followed_by_inline_whitespace())
                .to(Adornment::Right(Diamond::Composition)),
            just("--").to(Adornment::None),
        ));

        identifier()
            .then_ignore(inline_whitespace())
            .then(operator)
            .then_ignore(inline_whitespace())
            .then(identifier())
            .then_ignore(any().repeated())
            .map(|((left, adornment), right)| AssociationForm::Symbol {
                left,
                adornment,
                right,
            })
    }

    /// Lines that are never worth a diagnostic
    fn is_ignorable(trimmed: &str) -> bool {
        trimmed.is_empty()
            || trimmed == "}"
            || trimmed.eq_ignore_ascii_case("classdiagram")
            || mermaid_comment()
                .then_ignore(end())
                .parse(trimmed)
                .into_result()
                .is_ok()
    }

    fn starts_on_word_boundary(input: &str, start: usize) -> bool {
        input[..start]
            .chars()
            .next_back()
            .map_or(true, |c| !(c.is_alphanumeric() || c == '_'))
    }

    /// 1-based line number of a byte offset
    fn line_at(input: &str, offset: usize) -> usize {
        input[..offset].matches('\n').count() + 1
    }

    fn line_text(input: &str, line: usize) -> &str {
        input.lines().nth(line - 1).map(str::trim).unwrap_or_default()
    }
}

impl Default for ChumskyClassParser {
    fn default() -> Self {
        Self::new()
    }
}
