//! The recursive-descent core: one free function per grammar rule, each
//! preceded by the OASIS ABNF rule it implements. Every combinator takes an
//! [`Input`] cursor by value and either succeeds with a new cursor or fails
//! having consumed nothing, so callers backtrack simply by reusing their own
//! copy of the cursor.
#![allow(non_snake_case)]

pub(crate) mod common;
pub(crate) mod expressions;
pub(crate) mod literals;
pub(crate) mod names;
pub(crate) mod query_options;
pub(crate) mod resource_path;
pub(crate) mod uri;

use std::ops::{RangeFrom, RangeTo};
use std::str::{CharIndices, Chars};

use nom::{
    Compare, CompareResult, IResult, InputIter, InputLength, InputTake, Needed, Offset, Slice,
    UnspecializedInput,
};

use crate::ast::{Token, TokenKind, TokenValue};
use crate::schema::Document;

/// Grammar mismatch carries no payload; failure is control flow here.
pub(crate) type Error = ();

pub(crate) type PResult<'a, O> = IResult<Input<'a>, O, Error>;
/// Result of a raw matcher: the consumed slice.
pub(crate) type MatchResult<'a> = PResult<'a, Input<'a>>;
/// Result of a token-producing combinator.
pub(crate) type TokenResult<'a> = PResult<'a, Token>;

/// Read-only parse context shared by every cursor of one parse.
#[derive(Debug)]
pub(crate) struct Context<'a> {
    pub(crate) source: &'a str,
    pub(crate) metadata: Option<&'a Document>,
}

/// Cursor into the source buffer. It is `Copy` and as small as possible
/// since the combinators clone it all over the place; `pos` is the absolute
/// offset of `data` within the full source.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Input<'a> {
    ctx: &'a Context<'a>,
    data: &'a str,
    pos: usize,
}

impl<'a> Input<'a> {
    pub(crate) fn new(ctx: &'a Context<'a>) -> Self {
        Input {
            ctx,
            data: ctx.source,
            pos: 0,
        }
    }

    pub(crate) fn pos(&self) -> usize {
        self.pos
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub(crate) fn as_str(&self) -> &'a str {
        self.data
    }

    pub(crate) fn metadata(&self) -> Option<&'a Document> {
        self.ctx.metadata
    }

    /// Materialises a token spanning `[position, next)` of the source.
    pub(crate) fn token_between(
        &self,
        position: usize,
        next: usize,
        kind: TokenKind,
        value: TokenValue,
    ) -> Token {
        Token {
            position,
            next,
            kind,
            raw: self.ctx.source[position..next].to_string(),
            value,
        }
    }

    fn at(&self, pos: usize, data: &'a str) -> Self {
        Input {
            ctx: self.ctx,
            data,
            pos,
        }
    }
}

/// Runs `f` and wraps whatever span it consumed into a token of `kind`.
pub(crate) fn tok<'a, F>(kind: TokenKind, mut f: F) -> impl FnMut(Input<'a>) -> TokenResult<'a>
where
    F: FnMut(Input<'a>) -> PResult<'a, TokenValue>,
{
    move |input: Input<'a>| {
        let start = input.pos;
        let (rest, value) = f(input)?;
        let token = rest.token_between(start, rest.pos, kind, value);
        Ok((rest, token))
    }
}

impl<'a> InputLength for Input<'a> {
    fn input_len(&self) -> usize {
        self.data.len()
    }
}

impl<'a> InputTake for Input<'a> {
    fn take(&self, count: usize) -> Self {
        self.at(self.pos, &self.data[..count])
    }

    fn take_split(&self, count: usize) -> (Self, Self) {
        let (prefix, suffix) = self.data.split_at(count);
        (self.at(self.pos + count, suffix), self.at(self.pos, prefix))
    }
}

impl<'a> InputIter for Input<'a> {
    type Item = char;
    type Iter = CharIndices<'a>;
    type IterElem = Chars<'a>;

    fn iter_indices(&self) -> Self::Iter {
        self.data.char_indices()
    }

    fn iter_elements(&self) -> Self::IterElem {
        self.data.chars()
    }

    fn position<P>(&self, predicate: P) -> Option<usize>
    where
        P: Fn(Self::Item) -> bool,
    {
        InputIter::position(&self.data, predicate)
    }

    fn slice_index(&self, count: usize) -> Result<usize, Needed> {
        InputIter::slice_index(&self.data, count)
    }
}

impl<'a> Compare<&str> for Input<'a> {
    fn compare(&self, t: &str) -> CompareResult {
        Compare::compare(&self.data, t)
    }

    fn compare_no_case(&self, t: &str) -> CompareResult {
        Compare::compare_no_case(&self.data, t)
    }
}

impl<'a> Slice<RangeTo<usize>> for Input<'a> {
    fn slice(&self, range: RangeTo<usize>) -> Self {
        self.at(self.pos, &self.data[range])
    }
}

impl<'a> Slice<RangeFrom<usize>> for Input<'a> {
    fn slice(&self, range: RangeFrom<usize>) -> Self {
        let start = range.start;
        self.at(self.pos + start, &self.data[start..])
    }
}

impl<'a> Offset for Input<'a> {
    fn offset(&self, second: &Self) -> usize {
        second.pos - self.pos
    }
}

impl<'a> UnspecializedInput for Input<'a> {}
