//! Whitespace-separated field splitting for data lines.

use winnow::{
    Parser as _,
    combinator::{opt, preceded, repeat},
    error::{ContextError, ErrMode},
    token::{take_till, take_while},
};

use crate::{lines::Line, span::Span};

type Input<'src> = &'src str;
type FieldResult<O> = std::result::Result<O, ErrMode<ContextError<Context>>>;

/// Field splitting attaches no context to its errors
#[derive(Debug, Clone, PartialEq, Eq)]
enum Context {}

/// One whitespace-delimited field of a data line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Field<'src> {
    text: &'src str,
    span: Span,
}

impl<'src> Field<'src> {
    pub(crate) fn text(&self) -> &'src str {
        self.text
    }

    pub(crate) fn span(&self) -> Span {
        self.span
    }
}

/// Parse a run of whitespace
fn whitespace(input: &mut Input<'_>) -> FieldResult<()> {
    take_while(1.., char::is_whitespace)
        .void()
        .parse_next(input)
}

/// Parse a single field: a run of non-whitespace characters
fn field<'src>(input: &mut Input<'src>) -> FieldResult<&'src str> {
    take_till(1.., char::is_whitespace).parse_next(input)
}

/// Parse all fields of a line, ignoring leading and trailing whitespace
fn fields<'src>(input: &mut Input<'src>) -> FieldResult<Vec<&'src str>> {
    let fields = repeat(0.., preceded(opt(whitespace), field)).parse_next(input)?;
    opt(whitespace).parse_next(input)?;
    Ok(fields)
}

/// Splits a line into its whitespace-separated fields.
pub(crate) fn split<'src>(line: &Line<'src>) -> Vec<Field<'src>> {
    let mut input = line.text();
    // Every character is either whitespace or part of a field, so splitting
    // cannot fail.
    let texts = fields(&mut input).unwrap_or_default();

    texts
        .into_iter()
        .map(|text| Field {
            text,
            span: line.span_of(text),
        })
        .collect()
}
