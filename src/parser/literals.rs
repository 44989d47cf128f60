//! Primitive literal values as they appear in URLs.

use nom::branch::alt;
use nom::bytes::complete::{tag, tag_no_case, take};
use nom::character::complete::{digit1, one_of};
use nom::combinator::{map, map_res, opt, recognize, value};
use nom::multi::{many0, many1, many_m_n};
use nom::sequence::{preceded, tuple};

use uuid::Uuid;

use crate::ast::{EdmType, TokenKind, TokenValue};

use super::common::{
    pchar_no_SQUOTE, ALPHA, CLOSE, COMMA, DIGIT, EQ, HEXDIG, OPEN, SEMI, SIGN, SP, SQUOTE,
};
use super::names::{identifier, keyword, qualifiedEnumTypeName};
use super::{tok, Input, MatchResult, PResult, TokenResult};

//* ;------------------------------------------------------------------------------
//* ; 7. Literal Data Values
//* ;------------------------------------------------------------------------------
//*
//* ; in URLs
//* primitiveLiteral = nullValue                  ; plain values up to int64Value
//*                  / booleanValue
//*                  / guidValue
//*                  / dateValue
//*                  / dateTimeOffsetValue
//*                  / timeOfDayValue
//*                  / decimalValue
//*                  / doubleValue
//*                  / singleValue
//*                  / sbyteValue
//*                  / byteValue
//*                  / int16Value
//*                  / int32Value
//*                  / int64Value
//*                  / string                     ; single-quoted
//*                  / duration
//*                  / enum
//*                  / binary                     ; all others are quoted and prefixed
//*                  / geographyPoint ... geometryCollection
//  Ordered so no shorter literal masks a longer one: the datetimeoffset
//  probe runs before date, guid and the temporal forms before the numeric
//  ones, and the keyword-prefixed quoted forms before enum.
pub(crate) fn primitiveLiteral(input: Input) -> TokenResult {
    alt((
        nullValue,
        booleanValue,
        guidValue,
        dateTimeOffsetValue,
        dateValue,
        timeOfDayValue,
        numericValue,
        string,
        duration,
        binary,
        geographyLiteral,
        geometryLiteral,
        enumLiteral,
    ))(input)
}

//* nullValue = 'null'
fn nullValue(input: Input) -> TokenResult {
    tok(TokenKind::Literal, |i| {
        map(keyword(tag("null")), |_| TokenValue::Literal(EdmType::Null))(i)
    })(input)
}

//* booleanValue = "true" / "false"
pub(crate) fn booleanValue(input: Input) -> TokenResult {
    tok(TokenKind::Literal, |i| {
        map(
            keyword(alt((tag_no_case("true"), tag_no_case("false")))),
            |_| TokenValue::Literal(EdmType::Boolean),
        )(i)
    })(input)
}

//* guidValue = 8HEXDIG "-" 4HEXDIG "-" 4HEXDIG "-" 4HEXDIG "-" 12HEXDIG
fn guidValue(input: Input) -> TokenResult {
    tok(TokenKind::Literal, |i| {
        let (i, _) = map_res(take(36usize), |hyphenated: Input| {
            Uuid::parse_str(hyphenated.as_str())
        })(i)?;
        Ok((i, TokenValue::Literal(EdmType::Guid)))
    })(input)
}

//* decimalValue = [ SIGN ] 1*DIGIT [ "." 1*DIGIT ] [ "e" [ SIGN ] 1*DIGIT ] / nanInfinity
//* doubleValue  = decimalValue ; IEEE 754 binary64 floating-point number (15-17 decimal digits)
//* singleValue  = decimalValue ; IEEE 754 binary32 floating-point number (6-9 decimal digits)
//* sbyteValue / byteValue / int16Value / int32Value / int64Value = [ SIGN ] 1*DIGIT
//  One parser covers the whole numeric family; the EDM type falls out of the
//  shape and the value range. A bare integer gets the narrowest of
//  Edm.Int32 / Edm.Int64 / Edm.Decimal that holds it.
fn numericValue(input: Input) -> TokenResult {
    tok(TokenKind::Literal, |i| {
        alt((
            map(keyword(nanInfinity), |_| {
                TokenValue::Literal(EdmType::Double)
            }),
            numericParts,
        ))(i)
    })(input)
}

//* nanInfinity  = 'NaN' / '-INF' / 'INF'
fn nanInfinity(input: Input) -> MatchResult {
    alt((tag("NaN"), tag("-INF"), tag("INF")))(input)
}

fn numericParts(input: Input) -> PResult<TokenValue> {
    let (i, sign) = opt(SIGN)(input)?;
    let (i, integral) = digit1(i)?;
    let (i, fraction) = opt(preceded(tag("."), digit1))(i)?;
    let (i, exponent) = opt(recognize(tuple((tag_no_case("e"), opt(SIGN), digit1))))(i)?;
    let (i, suffix) = opt(one_of("fFdD"))(i)?;
    let ty = match suffix {
        Some('f') | Some('F') => EdmType::Single,
        Some(_) => EdmType::Double,
        None if exponent.is_some() => EdmType::Double,
        None if fraction.is_some() => EdmType::Decimal,
        None => integerType(sign, integral),
    };
    Ok((i, TokenValue::Literal(ty)))
}

fn integerType(sign: Option<Input>, digits: Input) -> EdmType {
    let negative = matches!(sign, Some(s) if s.as_str() == "-");
    let mut normalized = String::with_capacity(digits.as_str().len() + 1);
    if negative {
        normalized.push('-');
    }
    normalized.push_str(digits.as_str());
    if normalized.parse::<i32>().is_ok() {
        EdmType::Int32
    } else if normalized.parse::<i64>().is_ok() {
        EdmType::Int64
    } else {
        EdmType::Decimal
    }
}

//* string           = SQUOTE *( SQUOTE-in-string / pchar-no-SQUOTE ) SQUOTE
// errata: pchar-no-SQUOTE includes special characters like &, =, and $. Those should be encoded
pub(crate) fn string(input: Input) -> TokenResult {
    tok(TokenKind::Literal, |i| {
        let (i, _) = SQUOTE(i)?;
        let (i, _) = many0(alt((SQUOTE_in_string, pchar_no_SQUOTE)))(i)?;
        let (i, _) = SQUOTE(i)?;
        Ok((i, TokenValue::Literal(EdmType::String)))
    })(input)
}

//* SQUOTE-in-string = SQUOTE SQUOTE ; two consecutive single quotes represent one within a string literal
fn SQUOTE_in_string(input: Input) -> MatchResult {
    recognize(tuple((SQUOTE, SQUOTE)))(input)
}

//* dateValue = year "-" month "-" day
fn dateValue(input: Input) -> TokenResult {
    tok(TokenKind::Literal, |i| {
        let (i, _) = recognize(tuple((year, tag("-"), month, tag("-"), day)))(i)?;
        Ok((i, TokenValue::Literal(EdmType::Date)))
    })(input)
}

//* dateTimeOffsetValue = year "-" month "-" day "T" hour ":" minute [ ":" second [ "." fractionalSeconds ] ] ( "Z" / SIGN hour ":" minute )
fn dateTimeOffsetValue(input: Input) -> TokenResult {
    tok(TokenKind::Literal, |i| {
        let (i, _) = recognize(tuple((
            year,
            tag("-"),
            month,
            tag("-"),
            day,
            tag_no_case("T"),
            hour,
            tag(":"),
            minute,
            opt(tuple((
                tag(":"),
                second,
                opt(tuple((tag("."), fractionalSeconds))),
            ))),
            alt((
                tag_no_case("Z"),
                recognize(tuple((SIGN, hour, tag(":"), minute))),
            )),
        )))(i)?;
        Ok((i, TokenValue::Literal(EdmType::DateTimeOffset)))
    })(input)
}

//* timeOfDayValue = hour ":" minute [ ":" second [ "." fractionalSeconds ] ]
fn timeOfDayValue(input: Input) -> TokenResult {
    tok(TokenKind::Literal, |i| {
        let (i, _) = recognize(tuple((
            hour,
            tag(":"),
            minute,
            opt(tuple((
                tag(":"),
                second,
                opt(tuple((tag("."), fractionalSeconds))),
            ))),
        )))(i)?;
        Ok((i, TokenValue::Literal(EdmType::TimeOfDay)))
    })(input)
}

//* oneToNine       = "1" / "2" / "3" / "4" / "5" / "6" / "7" / "8" / "9"
pub(crate) fn oneToNine(input: Input) -> MatchResult {
    recognize(one_of("123456789"))(input)
}

//* zeroToFiftyNine = ( "0" / "1" / "2" / "3" / "4" / "5" ) DIGIT
fn zeroToFiftyNine(input: Input) -> MatchResult {
    recognize(tuple((one_of("012345"), DIGIT)))(input)
}

//* year  = [ "-" ] ( "0" 3DIGIT / oneToNine 3*DIGIT )
fn year(input: Input) -> MatchResult {
    recognize(tuple((
        opt(tag("-")),
        alt((
            recognize(tuple((tag("0"), many_m_n(3, 3, DIGIT)))),
            recognize(tuple((oneToNine, many_m_n(3, 3, DIGIT)))),
        )),
    )))(input)
}

//* month = "0" oneToNine
//*       / "1" ( "0" / "1" / "2" )
fn month(input: Input) -> MatchResult {
    alt((
        recognize(tuple((tag("0"), oneToNine))),
        recognize(tuple((tag("1"), one_of("012")))),
    ))(input)
}

//* day   = "0" oneToNine
//*       / ( "1" / "2" ) DIGIT
//*       / "3" ( "0" / "1" )
fn day(input: Input) -> MatchResult {
    alt((
        recognize(tuple((tag("0"), oneToNine))),
        recognize(tuple((one_of("12"), DIGIT))),
        recognize(tuple((tag("3"), one_of("01")))),
    ))(input)
}

//* hour   = ( "0" / "1" ) DIGIT
//*        / "2" ( "0" / "1" / "2" / "3" )
fn hour(input: Input) -> MatchResult {
    alt((
        recognize(tuple((one_of("01"), DIGIT))),
        recognize(tuple((tag("2"), one_of("0123")))),
    ))(input)
}

//* minute = zeroToFiftyNine
fn minute(input: Input) -> MatchResult {
    zeroToFiftyNine(input)
}

//* second = zeroToFiftyNine
fn second(input: Input) -> MatchResult {
    zeroToFiftyNine(input)
}

//* fractionalSeconds = 1*12DIGIT
fn fractionalSeconds(input: Input) -> MatchResult {
    recognize(many_m_n(1, 12, DIGIT))(input)
}

//* duration      = "duration" SQUOTE durationValue SQUOTE
fn duration(input: Input) -> TokenResult {
    tok(TokenKind::Literal, |i| {
        let (i, _) = recognize(tuple((
            tag_no_case("duration"),
            SQUOTE,
            durationValue,
            SQUOTE,
        )))(i)?;
        Ok((i, TokenValue::Literal(EdmType::Duration)))
    })(input)
}

//* durationValue = [ SIGN ] "P" [ 1*DIGIT "D" ] [ "T" [ 1*DIGIT "H" ] [ 1*DIGIT "M" ] [ 1*DIGIT [ "." 1*DIGIT ] "S" ] ]
//*      ; the above is an approximation of the rules for an xml dayTimeDuration.
//*      ; see the lexical representation for dayTimeDuration in http://www.w3.org/TR/xmlschema11-2#dayTimeDuration for more information
fn durationValue(input: Input) -> MatchResult {
    recognize(tuple((
        opt(SIGN),
        tag_no_case("P"),
        opt(tuple((many1(DIGIT), tag_no_case("D")))),
        opt(tuple((
            tag_no_case("T"),
            opt(tuple((many1(DIGIT), tag_no_case("H")))),
            opt(tuple((many1(DIGIT), tag_no_case("M")))),
            opt(tuple((
                many1(DIGIT),
                opt(tuple((tag("."), many1(DIGIT)))),
                tag_no_case("S"),
            ))),
        ))),
    )))(input)
}

//* ; base64url encoding according to http://tools.ietf.org/html/rfc4648#section-5
//* binary      = "binary" SQUOTE binaryValue SQUOTE
//  The X'00FF' hex spelling predates the base64url form and is still
//  accepted.
fn binary(input: Input) -> TokenResult {
    tok(TokenKind::Literal, |i| {
        let (i, _) = alt((
            recognize(tuple((tag_no_case("binary"), SQUOTE, binaryValue, SQUOTE))),
            recognize(tuple((
                tag_no_case("X"),
                SQUOTE,
                many0(recognize(tuple((HEXDIG, HEXDIG)))),
                SQUOTE,
            ))),
        ))(i)?;
        Ok((i, TokenValue::Literal(EdmType::Binary)))
    })(input)
}

//* binaryValue = *(4base64char) [ base64b16  / base64b8 ]
fn binaryValue(input: Input) -> MatchResult {
    recognize(tuple((
        many0(recognize(many_m_n(4, 4, base64char))),
        opt(alt((base64b16, base64b8))),
    )))(input)
}

//* base64b16   = 2base64char ( 'A' / 'E' / 'I' / 'M' / 'Q' / 'U' / 'Y' / 'c' / 'g' / 'k' / 'o' / 's' / 'w' / '0' / '4' / '8' )   [ "=" ]
fn base64b16(input: Input) -> MatchResult {
    recognize(tuple((
        many_m_n(2, 2, base64char),
        one_of("AEIMQUYcgkosw048"),
        opt(tag("=")),
    )))(input)
}

//* base64b8    = base64char ( 'A' / 'Q' / 'g' / 'w' ) [ "==" ]
fn base64b8(input: Input) -> MatchResult {
    recognize(tuple((base64char, one_of("AQgw"), opt(tag("==")))))(input)
}

//* base64char  = ALPHA / DIGIT / "-" / "_"
fn base64char(input: Input) -> MatchResult {
    alt((ALPHA, DIGIT, tag("-"), tag("_")))(input)
}

//* enum            = [ qualifiedEnumTypeName ] SQUOTE enumValue SQUOTE
//  The bare 'Member' spelling is indistinguishable from a string literal, so
//  the qualified type name is required here.
fn enumLiteral(input: Input) -> TokenResult {
    tok(TokenKind::Literal, |i| {
        let (i, _) = qualifiedEnumTypeName(i)?;
        let (i, _) = SQUOTE(i)?;
        let (i, _) = enumValue(i)?;
        let (i, _) = SQUOTE(i)?;
        Ok((i, TokenValue::Literal(EdmType::Enum)))
    })(input)
}

//* enumValue       = singleEnumValue *( COMMA singleEnumValue )
fn enumValue(input: Input) -> MatchResult {
    recognize(tuple((
        singleEnumValue,
        many0(tuple((COMMA, singleEnumValue))),
    )))(input)
}

//* singleEnumValue = enumerationMember / enumMemberValue
fn singleEnumValue(input: Input) -> MatchResult {
    alt((identifier, enumMemberValue))(input)
}

//* enumMemberValue = int64Value
fn enumMemberValue(input: Input) -> MatchResult {
    recognize(tuple((opt(SIGN), many_m_n(1, 19, DIGIT))))(input)
}

//* geographyCollection / geographyLineString / ... = geographyPrefix SQUOTE sridLiteral <body> SQUOTE
//* geographyPrefix = "geography"
fn geographyLiteral(input: Input) -> TokenResult {
    tok(TokenKind::Literal, |i| {
        let (i, _) = tag_no_case("geography")(i)?;
        let (i, _) = SQUOTE(i)?;
        let (i, _) = sridLiteral(i)?;
        let (i, ty) = alt((
            value(EdmType::GeographyCollection, collectionLiteral),
            value(EdmType::GeographyLineString, lineStringLiteral),
            value(EdmType::GeographyMultiPoint, multiPointLiteral),
            value(EdmType::GeographyMultiLineString, multiLineStringLiteral),
            value(EdmType::GeographyMultiPolygon, multiPolygonLiteral),
            value(EdmType::GeographyPoint, pointLiteral),
            value(EdmType::GeographyPolygon, polygonLiteral),
        ))(i)?;
        let (i, _) = SQUOTE(i)?;
        Ok((i, TokenValue::Literal(ty)))
    })(input)
}

//* geometryCollection / geometryLineString / ... = geometryPrefix SQUOTE sridLiteral <body> SQUOTE
//* geometryPrefix  = "geometry"
fn geometryLiteral(input: Input) -> TokenResult {
    tok(TokenKind::Literal, |i| {
        let (i, _) = tag_no_case("geometry")(i)?;
        let (i, _) = SQUOTE(i)?;
        let (i, _) = sridLiteral(i)?;
        let (i, ty) = alt((
            value(EdmType::GeometryCollection, collectionLiteral),
            value(EdmType::GeometryLineString, lineStringLiteral),
            value(EdmType::GeometryMultiPoint, multiPointLiteral),
            value(EdmType::GeometryMultiLineString, multiLineStringLiteral),
            value(EdmType::GeometryMultiPolygon, multiPolygonLiteral),
            value(EdmType::GeometryPoint, pointLiteral),
            value(EdmType::GeometryPolygon, polygonLiteral),
        ))(i)?;
        let (i, _) = SQUOTE(i)?;
        Ok((i, TokenValue::Literal(ty)))
    })(input)
}

//* sridLiteral = "SRID" EQ 1*5DIGIT SEMI
fn sridLiteral(input: Input) -> MatchResult {
    recognize(tuple((
        tag_no_case("SRID"),
        EQ,
        many_m_n(1, 5, DIGIT),
        SEMI,
    )))(input)
}

//* collectionLiteral     = "Collection(" geoLiteral *( COMMA geoLiteral ) CLOSE
fn collectionLiteral(input: Input) -> MatchResult {
    recognize(tuple((
        tag_no_case("Collection("),
        geoLiteral,
        many0(tuple((COMMA, geoLiteral))),
        CLOSE,
    )))(input)
}

//* geoLiteral            = collectionLiteral
//*                       / lineStringLiteral
//*                       / multiPointLiteral
//*                       / multiLineStringLiteral
//*                       / multiPolygonLiteral
//*                       / pointLiteral
//*                       / polygonLiteral
fn geoLiteral(input: Input) -> MatchResult {
    alt((
        collectionLiteral,
        lineStringLiteral,
        multiPointLiteral,
        multiLineStringLiteral,
        multiPolygonLiteral,
        pointLiteral,
        polygonLiteral,
    ))(input)
}

//* lineStringLiteral     = "LineString" lineStringData
fn lineStringLiteral(input: Input) -> MatchResult {
    recognize(tuple((tag_no_case("LineString"), lineStringData)))(input)
}

//* lineStringData        = OPEN positionLiteral 1*( COMMA positionLiteral ) CLOSE
fn lineStringData(input: Input) -> MatchResult {
    recognize(tuple((
        OPEN,
        positionLiteral,
        many1(tuple((COMMA, positionLiteral))),
        CLOSE,
    )))(input)
}

//* multiPointLiteral     = "MultiPoint(" [ pointData *( COMMA pointData ) ] CLOSE
fn multiPointLiteral(input: Input) -> MatchResult {
    recognize(tuple((
        tag_no_case("MultiPoint("),
        opt(tuple((pointData, many0(tuple((COMMA, pointData)))))),
        CLOSE,
    )))(input)
}

//* multiLineStringLiteral = "MultiLineString(" [ lineStringData *( COMMA lineStringData ) ] CLOSE
fn multiLineStringLiteral(input: Input) -> MatchResult {
    recognize(tuple((
        tag_no_case("MultiLineString("),
        opt(tuple((lineStringData, many0(tuple((COMMA, lineStringData)))))),
        CLOSE,
    )))(input)
}

//* multiPolygonLiteral   = "MultiPolygon(" [ polygonData *( COMMA polygonData ) ] CLOSE
fn multiPolygonLiteral(input: Input) -> MatchResult {
    recognize(tuple((
        tag_no_case("MultiPolygon("),
        opt(tuple((polygonData, many0(tuple((COMMA, polygonData)))))),
        CLOSE,
    )))(input)
}

//* pointLiteral          = "Point" pointData
fn pointLiteral(input: Input) -> MatchResult {
    recognize(tuple((tag_no_case("Point"), pointData)))(input)
}

//* pointData             = OPEN positionLiteral CLOSE
fn pointData(input: Input) -> MatchResult {
    recognize(tuple((OPEN, positionLiteral, CLOSE)))(input)
}

//* polygonLiteral        = "Polygon" polygonData
fn polygonLiteral(input: Input) -> MatchResult {
    recognize(tuple((tag_no_case("Polygon"), polygonData)))(input)
}

//* polygonData           = OPEN ringLiteral *( COMMA ringLiteral ) CLOSE
fn polygonData(input: Input) -> MatchResult {
    recognize(tuple((
        OPEN,
        ringLiteral,
        many0(tuple((COMMA, ringLiteral))),
        CLOSE,
    )))(input)
}

//* ringLiteral           = OPEN positionLiteral *( COMMA positionLiteral ) CLOSE
fn ringLiteral(input: Input) -> MatchResult {
    recognize(tuple((
        OPEN,
        positionLiteral,
        many0(tuple((COMMA, positionLiteral))),
        CLOSE,
    )))(input)
}

//* positionLiteral       = doubleValue SP doubleValue  ; longitude, then latitude
fn positionLiteral(input: Input) -> MatchResult {
    recognize(tuple((doubleValue, SP, doubleValue)))(input)
}

fn doubleValue(input: Input) -> MatchResult {
    alt((
        recognize(tuple((
            opt(SIGN),
            digit1,
            opt(tuple((tag("."), digit1))),
            opt(tuple((tag_no_case("e"), opt(SIGN), digit1))),
        ))),
        nanInfinity,
    ))(input)
}
