//! Full URI assembly: service root, resource path, query options.

use nom::branch::alt;
use nom::bytes::complete::{tag, tag_no_case};
use nom::combinator::{opt, recognize};
use nom::multi::{many0, many1};
use nom::sequence::{pair, preceded};

use crate::ast::{TokenKind, TokenValue};

use super::common::{pchar, pct_encoded, sub_delims, unreserved, DIGIT};
use super::query_options::queryOptions;
use super::resource_path::resourcePath;
use super::{tok, Input, MatchResult, TokenResult};

//* odataUri = serviceRoot [ odataRelativeUri ]
//* odataRelativeUri = resourcePath [ "?" queryOptions ]
//  The $batch / $entity / $metadata forms have no counterpart in the token
//  tree and are not accepted.
pub(crate) fn odataUri(input: Input) -> TokenResult {
    tok(TokenKind::ODataUri, |i| {
        let (i, service_root) = serviceRoot(i)?;
        let (i, resource) = opt(resourcePath)(i)?;
        let (i, options) = opt(preceded(tag("?"), queryOptions))(i)?;
        Ok((
            i,
            TokenValue::Uri {
                service_root: Box::new(service_root),
                resource: resource.map(Box::new),
                options: options.map(Box::new),
            },
        ))
    })(input)
}

//* serviceRoot = ( "https" / "http" )                    ; Note: case-insensitive
//*               "://" host [ ":" port ]
//*               "/" *( segment-nz "/" )
//  Without metadata every "/"-terminated segment belongs to the service
//  root; the first segment not followed by "/" starts the resource path.
pub(crate) fn serviceRoot(input: Input) -> TokenResult {
    tok(TokenKind::ServiceRoot, |i| {
        let (i, _) = alt((tag_no_case("https"), tag_no_case("http")))(i)?;
        let (i, _) = tag("://")(i)?;
        let (i, _) = host(i)?;
        let (i, _) = opt(pair(tag(":"), port))(i)?;
        let (i, _) = tag("/")(i)?;
        let (i, _) = many0(pair(segment_nz, tag("/")))(i)?;
        Ok((i, TokenValue::None))
    })(input)
}

//* host          = IP-literal / IPv4address / reg-name
//* reg-name      = *( unreserved / pct-encoded / sub-delims )
//  A dotted IPv4 address parses as a reg-name; bracketed IP-literals are
//  not accepted.
fn host(input: Input) -> MatchResult {
    recognize(many1(alt((unreserved, pct_encoded, sub_delims))))(input)
}

//* port          = *DIGIT
fn port(input: Input) -> MatchResult {
    recognize(many0(DIGIT))(input)
}

//* segment-nz    = 1*pchar
fn segment_nz(input: Input) -> MatchResult {
    recognize(many1(pchar))(input)
}
