//! Punctuation and character classes shared by every layer: the ABNF core
//! rules (RFC5234), the URI character sets (RFC3986) and the OData
//! punctuation that admits percent-encoded spellings.

use nom::branch::alt;
use nom::bytes::complete::tag;
use nom::character::complete::{anychar, one_of};
use nom::combinator::{recognize, verify};
use nom::multi::{many0, many1};
use nom::sequence::tuple;

use super::{Input, MatchResult};

//* ;------------------------------------------------------------------------------
//* ; 9. Punctuation
//* ;------------------------------------------------------------------------------
//*
//* RWS = 1*( SP / HTAB / "%20" / "%09" )  ; "required" whitespace
pub(crate) fn RWS(input: Input) -> MatchResult {
    recognize(many1(alt((SP, HTAB, tag("%20"), tag("%09")))))(input)
}

//* BWS =  *( SP / HTAB / "%20" / "%09" )  ; "bad" whitespace
pub(crate) fn BWS(input: Input) -> MatchResult {
    recognize(many0(alt((SP, HTAB, tag("%20"), tag("%09")))))(input)
}

//* COLON  = ":" / "%3A"
pub(crate) fn COLON(input: Input) -> MatchResult {
    alt((tag(":"), tag("%3A")))(input)
}

//* COMMA  = "," / "%2C"
pub(crate) fn COMMA(input: Input) -> MatchResult {
    alt((tag(","), tag("%2C")))(input)
}

//* EQ     = "="
pub(crate) fn EQ(input: Input) -> MatchResult {
    tag("=")(input)
}

//* SIGN   = "+" / "%2B" / "-"
pub(crate) fn SIGN(input: Input) -> MatchResult {
    alt((tag("+"), tag("%2B"), tag("-")))(input)
}

//* SEMI   = ";" / "%3B"
pub(crate) fn SEMI(input: Input) -> MatchResult {
    alt((tag(";"), tag("%3B")))(input)
}

//* STAR   = "*" / "%2A"
pub(crate) fn STAR(input: Input) -> MatchResult {
    alt((tag("*"), tag("%2A")))(input)
}

//* SQUOTE = "'" / "%27"
pub(crate) fn SQUOTE(input: Input) -> MatchResult {
    alt((tag("'"), tag("%27")))(input)
}

//* OPEN  = "(" / "%28"
pub(crate) fn OPEN(input: Input) -> MatchResult {
    alt((tag("("), tag("%28")))(input)
}

//* CLOSE = ")" / "%29"
pub(crate) fn CLOSE(input: Input) -> MatchResult {
    alt((tag(")"), tag("%29")))(input)
}

//* quotation-mark  = DQUOTE / "%22"
pub(crate) fn quotation_mark(input: Input) -> MatchResult {
    alt((DQUOTE, tag("%22")))(input)
}

//* escape = "\" / "%5C"     ; reverse solidus U+005C
pub(crate) fn escape(input: Input) -> MatchResult {
    alt((tag("\\"), tag("%5C")))(input)
}

//*
//* ;------------------------------------------------------------------------------
//* ; A. URI syntax [RFC3986]
//* ;------------------------------------------------------------------------------
//*
//* pchar         = unreserved / pct-encoded / sub-delims / ":" / "@"
pub(crate) fn pchar(input: Input) -> MatchResult {
    alt((unreserved, pct_encoded, sub_delims, recognize(one_of(":@"))))(input)
}

//* pct-encoded   = "%" HEXDIG HEXDIG
pub(crate) fn pct_encoded(input: Input) -> MatchResult {
    recognize(tuple((tag("%"), HEXDIG, HEXDIG)))(input)
}

//* unreserved    = ALPHA / DIGIT / "-" / "." / "_" / "~"
pub(crate) fn unreserved(input: Input) -> MatchResult {
    alt((ALPHA, DIGIT, recognize(one_of("-._~"))))(input)
}

//* sub-delims     =       "$" / "&" / "'" /                                     "=" / other-delims
pub(crate) fn sub_delims(input: Input) -> MatchResult {
    alt((recognize(one_of("$&'=")), other_delims))(input)
}

//* other-delims   = "!" /                   "(" / ")" / "*" / "+" / "," / ";"
pub(crate) fn other_delims(input: Input) -> MatchResult {
    recognize(one_of("!()*+,;"))(input)
}

//* pchar-no-SQUOTE       = unreserved / pct-encoded-no-SQUOTE / other-delims / "$" / "&" / "=" / ":" / "@"
pub(crate) fn pchar_no_SQUOTE(input: Input) -> MatchResult {
    alt((
        unreserved,
        pct_encoded_no_SQUOTE,
        other_delims,
        recognize(one_of("$&=:@")),
    ))(input)
}

//* pct-encoded-no-SQUOTE = "%" ( "0" / "1" /   "3" / "4" / "5" / "6" / "8" / "9" / A-to-F ) HEXDIG
//*                       / "%" "2" ( "0" / "1" / "2" / "3" / "4" / "5" / "6" /   "8" / "9" / A-to-F )
pub(crate) fn pct_encoded_no_SQUOTE(input: Input) -> MatchResult {
    alt((
        recognize(tuple((tag("%"), one_of("013456789ABCDEFabcdef"), HEXDIG))),
        recognize(tuple((tag("%2"), one_of("012345689ABCDEFabcdef")))),
    ))(input)
}

//* qchar-no-AMP              = unreserved / pct-encoded / other-delims / ":" / "@" / "/" / "?" / "$" / "'" / "="
pub(crate) fn qchar_no_AMP(input: Input) -> MatchResult {
    alt((qchar_no_AMP_EQ, tag("=")))(input)
}

//* qchar-no-AMP-EQ           = unreserved / pct-encoded / other-delims / ":" / "@" / "/" / "?" / "$" / "'"
pub(crate) fn qchar_no_AMP_EQ(input: Input) -> MatchResult {
    alt((qchar_no_AMP_EQ_AT_DOLLAR, tag("@"), tag("$")))(input)
}

//* qchar-no-AMP-EQ-AT-DOLLAR = unreserved / pct-encoded / other-delims / ":" /       "/" / "?" /       "'"
pub(crate) fn qchar_no_AMP_EQ_AT_DOLLAR(input: Input) -> MatchResult {
    alt((unreserved, pct_encoded, other_delims, recognize(one_of(":/?'"))))(input)
}

//* qchar-unescaped       = unreserved / pct-encoded-unescaped / other-delims / ":" / "@" / "/" / "?" / "$" / "'" / "="
pub(crate) fn qchar_unescaped(input: Input) -> MatchResult {
    alt((
        unreserved,
        pct_encoded_unescaped,
        other_delims,
        recognize(one_of(":@/?$'=")),
    ))(input)
}

//* pct-encoded-unescaped = "%" ( "0" / "1" /   "3" / "4" /   "6" / "7" / "8" / "9" / A-to-F ) HEXDIG
//*                       / "%" "2" ( "0" / "1" /   "3" / "4" / "5" / "6" / "7" / "8" / "9" / A-to-F )
//*                       / "%" "5" ( DIGIT / "A" / "B" /   "D" / "E" / "F" )
pub(crate) fn pct_encoded_unescaped(input: Input) -> MatchResult {
    alt((
        recognize(tuple((
            tag("%"),
            one_of("01346789ABCDEFabcdef"),
            HEXDIG,
        ))),
        recognize(tuple((tag("%2"), one_of("013456789ABCDEFabcdef")))),
        recognize(tuple((tag("%5"), one_of("0123456789ABDEFabdef")))),
    ))(input)
}

//* qchar-no-AMP-DQUOTE   = qchar-unescaped
//*                       / escape ( escape / quotation-mark )
pub(crate) fn qchar_no_AMP_DQUOTE(input: Input) -> MatchResult {
    alt((
        qchar_unescaped,
        recognize(tuple((escape, alt((escape, quotation_mark))))),
    ))(input)
}

//*
//* ;------------------------------------------------------------------------------
//* ; C. ABNF core definitions [RFC5234]
//* ;------------------------------------------------------------------------------
//*
//* ALPHA  = %x41-5A / %x61-7A
pub(crate) fn ALPHA(input: Input) -> MatchResult {
    recognize(verify(anychar, |chr: &char| chr.is_ascii_alphabetic()))(input)
}

//* DIGIT  = %x30-39
pub(crate) fn DIGIT(input: Input) -> MatchResult {
    recognize(verify(anychar, |chr: &char| chr.is_ascii_digit()))(input)
}

//* HEXDIG = DIGIT / A-to-F
pub(crate) fn HEXDIG(input: Input) -> MatchResult {
    recognize(verify(anychar, |chr: &char| chr.is_ascii_hexdigit()))(input)
}

//* DQUOTE = %x22
pub(crate) fn DQUOTE(input: Input) -> MatchResult {
    tag("\u{0022}")(input)
}

//* SP     = %x20
pub(crate) fn SP(input: Input) -> MatchResult {
    tag("\u{0020}")(input)
}

//* HTAB   = %x09
pub(crate) fn HTAB(input: Input) -> MatchResult {
    tag("\u{0009}")(input)
}
