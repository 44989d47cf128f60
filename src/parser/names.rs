//! Identifiers, namespaces and type names.

use nom::branch::alt;
use nom::bytes::complete::tag;
use nom::character::complete::anychar;
use nom::combinator::{not, opt, recognize, verify};
use nom::multi::{many1, many_m_n};
use nom::sequence::{preceded, terminated, tuple};

use crate::ast::{TokenKind, TokenValue};

use super::{tok, Input, MatchResult, TokenResult};

//* ; Note: this pattern is overly restrictive, the normative definition is type TSimpleIdentifier in OData EDM XML Schema
//* odataIdentifier             = identifierLeadingCharacter *127identifierCharacter
pub(crate) fn odataIdentifier(input: Input) -> TokenResult {
    tok(TokenKind::ODataIdentifier, |i| {
        let (i, _) = identifier(i)?;
        Ok((i, TokenValue::None))
    })(input)
}

pub(crate) fn identifier(input: Input) -> MatchResult {
    recognize(tuple((
        identifierLeadingCharacter,
        many_m_n(0, 127, identifierCharacter),
    )))(input)
}

//* identifierLeadingCharacter  = ALPHA / "_"         ; plus Unicode characters from the categories L or Nl
pub(crate) fn identifierLeadingCharacter(input: Input) -> MatchResult {
    recognize(verify(anychar, |chr: &char| {
        chr.is_alphabetic() || *chr == '_'
    }))(input)
}

//* identifierCharacter         = ALPHA / "_" / DIGIT ; plus Unicode characters from the categories L, Nl, Nd, Mn, Mc, Pc, or Cf
pub(crate) fn identifierCharacter(input: Input) -> MatchResult {
    recognize(verify(anychar, |chr: &char| {
        chr.is_alphanumeric() || *chr == '_'
    }))(input)
}

/// Matches `f` only when no identifier character follows, so a keyword such
/// as `null` never shadows the head of a longer member name.
pub(crate) fn keyword<'a, F>(f: F) -> impl FnMut(Input<'a>) -> MatchResult<'a>
where
    F: FnMut(Input<'a>) -> MatchResult<'a>,
{
    terminated(f, not(identifierCharacter))
}

//* namespace     = namespacePart *( "." namespacePart )
//* namespacePart = odataIdentifier
//  The namespace swallows every dotted part, so qualified names are matched
//  whole (identifier plus at least one dotted part) rather than as
//  namespace "." name.
pub(crate) fn qualifiedName(input: Input) -> MatchResult {
    recognize(tuple((
        identifier,
        many1(preceded(tag("."), identifier)),
    )))(input)
}

//* qualifiedEntityTypeName     = namespace "." entityTypeName
pub(crate) fn qualifiedEntityTypeName(input: Input) -> TokenResult {
    tok(TokenKind::QualifiedEntityTypeName, |i| {
        let (rest, name) = qualifiedName(i)?;
        if let Some(doc) = rest.metadata() {
            if !doc.is_entity_type(name.as_str()) {
                return Err(nom::Err::Error(()));
            }
        }
        Ok((rest, TokenValue::None))
    })(input)
}

//* qualifiedComplexTypeName    = namespace "." complexTypeName
pub(crate) fn qualifiedComplexTypeName(input: Input) -> TokenResult {
    tok(TokenKind::QualifiedComplexTypeName, |i| {
        let (rest, name) = qualifiedName(i)?;
        if let Some(doc) = rest.metadata() {
            if !doc.is_complex_type(name.as_str()) {
                return Err(nom::Err::Error(()));
            }
        }
        Ok((rest, TokenValue::None))
    })(input)
}

//* qualifiedEnumTypeName       = namespace "." enumerationTypeName
pub(crate) fn qualifiedEnumTypeName(input: Input) -> MatchResult {
    let (rest, name) = qualifiedName(input)?;
    if let Some(doc) = rest.metadata() {
        if !doc.is_enum_type(name.as_str()) {
            return Err(nom::Err::Error(()));
        }
    }
    Ok((rest, name))
}

//* qualifiedTypeName = singleQualifiedTypeName
//*                   / 'Collection' OPEN singleQualifiedTypeName CLOSE
//  Collection(...) casts have no counterpart in the exposed paths, so only
//  the single form is accepted. Without metadata every qualified name reads
//  as an entity type name.
pub(crate) fn qualifiedTypeName(input: Input) -> TokenResult {
    alt((
        primitiveTypeName,
        qualifiedEntityTypeName,
        qualifiedComplexTypeName,
    ))(input)
}

//* primitiveTypeName = 'Edm.' ( 'Binary'
//*                            / 'Boolean'
//*                            / 'Byte'
//*                            / 'Date'
//*                            / 'DateTimeOffset'
//*                            / 'Decimal'
//*                            / 'Double'
//*                            / 'Duration'
//*                            / 'Guid'
//*                            / 'Int16'
//*                            / 'Int32'
//*                            / 'Int64'
//*                            / 'SByte'
//*                            / 'Single'
//*                            / 'Stream'
//*                            / 'String'
//*                            / 'TimeOfDay'
//*                            / abstractSpatialTypeName [ concreteSpatialTypeName ]
//*                            )
pub(crate) fn primitiveTypeName(input: Input) -> TokenResult {
    tok(TokenKind::PrimitiveTypeName, |i| {
        let (i, _) = keyword(recognize(tuple((
            tag("Edm."),
            alt((
                tag("Binary"),
                tag("Boolean"),
                tag("Byte"),
                tag("DateTimeOffset"),
                tag("Date"),
                tag("Decimal"),
                tag("Double"),
                tag("Duration"),
                tag("Guid"),
                tag("Int16"),
                tag("Int32"),
                tag("Int64"),
                tag("SByte"),
                tag("Single"),
                tag("Stream"),
                tag("String"),
                tag("TimeOfDay"),
                recognize(tuple((
                    abstractSpatialTypeName,
                    opt(concreteSpatialTypeName),
                ))),
            )),
        ))))(i)?;
        Ok((i, TokenValue::None))
    })(input)
}

//* abstractSpatialTypeName = 'Geography'
//*                         / 'Geometry'
fn abstractSpatialTypeName(input: Input) -> MatchResult {
    alt((tag("Geography"), tag("Geometry")))(input)
}

//* concreteSpatialTypeName = 'Collection'
//*                         / 'LineString'
//*                         / 'MultiLineString'
//*                         / 'MultiPoint'
//*                         / 'MultiPolygon'
//*                         / 'Point'
//*                         / 'Polygon'
fn concreteSpatialTypeName(input: Input) -> MatchResult {
    alt((
        tag("Collection"),
        tag("LineString"),
        tag("MultiLineString"),
        tag("MultiPoint"),
        tag("MultiPolygon"),
        tag("Point"),
        tag("Polygon"),
    ))(input)
}
