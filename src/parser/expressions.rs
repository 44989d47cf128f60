//! Common expressions: arithmetic, comparison and logical operators with
//! their precedence, unary forms, method calls, member paths and the
//! `any`/`all` lambdas.

use nom::branch::alt;
use nom::bytes::complete::{tag, tag_no_case, take_while1};
use nom::combinator::{cut, map_res, opt, recognize, value, verify};
use nom::multi::separated_list1;
use nom::sequence::{pair, preceded, terminated, tuple};

use crate::ast::{BinOp, Method, Token, TokenKind, TokenValue};

use super::common::{BWS, CLOSE, COLON, COMMA, OPEN, RWS};
use super::literals::primitiveLiteral;
use super::names::{odataIdentifier, qualifiedTypeName};
use super::resource_path::resourcePath;
use super::{tok, Input, PResult, TokenResult};

//* ;------------------------------------------------------------------------------
//* ; 4. Expressions
//* ;------------------------------------------------------------------------------
//*
//* boolCommonExpr = commonExpr ; resulting in a Boolean
//TODO(validation) nothing checks the expression actually is boolean-valued
pub(crate) fn boolCommonExpr(input: Input) -> TokenResult {
    commonExpr(input, 0)
}

//* ; Note: a boolCommonExpr is also a commonExpr, e.g. sort by Boolean
//* commonExpr = ( primitiveLiteral
//*              / rootExpr
//*              / firstMemberExpr
//*              / methodCallExpr
//*              / parenExpr
//*              / listExpr
//*              / castExpr
//*              / isofExpr
//*              / negateExpr
//*              / notExpr
//*              )
//*              [ addExpr / subExpr / mulExpr / divExpr / modExpr ]
//*              [ eqExpr / neExpr / ltExpr / leExpr / gtExpr / geExpr / hasExpr / inExpr ]
//*              [ andExpr / orExpr ]
pub(crate) fn commonExpr(input: Input, prec: u8) -> TokenResult {
    let (mut input, mut lhs) = unaryExpr(input)?;

    // Precedence climbing. Avoids the deep recursion a fully layered descent
    // would need; recursing one level above the operator just consumed keeps
    // every level left-associative.
    while let (i, Some(op)) = opt(verify(binop, |op: &BinOp| op.precedence() >= prec))(input)? {
        let (i, rhs) = match op {
            // A list is only valid on the right of `in`, and is ambiguous
            // with a parenthesised expression when it has one element, so
            // try it first
            BinOp::In => alt((listExpr, |i| commonExpr(i, op.precedence() + 1)))(i)?,
            _ => commonExpr(i, op.precedence() + 1)?,
        };
        lhs = i.token_between(
            lhs.position,
            rhs.next,
            op.token_kind(),
            TokenValue::Binary {
                left: Box::new(lhs),
                right: Box::new(rhs),
            },
        );
        input = i;
    }

    Ok((input, lhs))
}

//* addExpr   = RWS "add"   RWS commonExpr
//* subExpr   = RWS "sub"   RWS commonExpr
//* mulExpr   = RWS "mul"   RWS commonExpr
//* divExpr   = RWS "div"   RWS commonExpr
//* modExpr   = RWS "mod"   RWS commonExpr
//* eqExpr    = RWS "eq"    RWS commonExpr
//* neExpr    = RWS "ne"    RWS commonExpr
//* ltExpr    = RWS "lt"    RWS commonExpr
//* leExpr    = RWS "le"    RWS commonExpr
//* gtExpr    = RWS "gt"    RWS commonExpr
//* geExpr    = RWS "ge"    RWS commonExpr
//* hasExpr   = RWS "has"   RWS enum
//* inExpr    = RWS "in"    RWS ( listExpr / commonExpr )
//* andExpr   = RWS "and"   RWS boolCommonExpr
//* orExpr    = RWS "or"    RWS boolCommonExpr
//  The trailing RWS doubles as the keyword boundary: `or` never matches the
//  head of `orderDate`.
fn binop(input: Input) -> PResult<BinOp> {
    terminated(
        preceded(
            RWS,
            alt((
                value(BinOp::Add, tag_no_case("add")),
                value(BinOp::Sub, tag_no_case("sub")),
                value(BinOp::Mul, tag_no_case("mul")),
                value(BinOp::Div, tag_no_case("div")),
                value(BinOp::Mod, tag_no_case("mod")),
                value(BinOp::Eq, tag_no_case("eq")),
                value(BinOp::Ne, tag_no_case("ne")),
                value(BinOp::Lt, tag_no_case("lt")),
                value(BinOp::Le, tag_no_case("le")),
                value(BinOp::Gt, tag_no_case("gt")),
                value(BinOp::Ge, tag_no_case("ge")),
                value(BinOp::Has, tag_no_case("has")),
                value(BinOp::In, tag_no_case("in")),
                value(BinOp::And, tag_no_case("and")),
                value(BinOp::Or, tag_no_case("or")),
            )),
        ),
        RWS,
    )(input)
}

//* negateExpr = "-" BWS commonExpr
//* notExpr    = "not" RWS boolCommonExpr
//  A literal probe runs first so a signed number stays one literal instead
//  of a negate around it.
fn unaryExpr(input: Input) -> TokenResult {
    alt((notExpr, primaryExpr, negateExpr))(input)
}

fn notExpr(input: Input) -> TokenResult {
    tok(TokenKind::NotExpression, |i| {
        let (i, _) = terminated(tag_no_case("not"), RWS)(i)?;
        let (i, operand) = unaryExpr(i)?;
        Ok((i, TokenValue::Unary(Box::new(operand))))
    })(input)
}

fn negateExpr(input: Input) -> TokenResult {
    tok(TokenKind::NegateExpression, |i| {
        let (i, _) = pair(tag("-"), BWS)(i)?;
        let (i, operand) = unaryExpr(i)?;
        Ok((i, TokenValue::Unary(Box::new(operand))))
    })(input)
}

//  The probe order implements the longest-match tie-breaks: a method call
//  wins over a member path of the same spelling and falls back to it
//  cleanly when no parenthesis follows.
fn primaryExpr(input: Input) -> TokenResult {
    alt((
        primitiveLiteral,
        parenExpr,
        rootExpr,
        methodCallExpr,
        firstMemberExpr,
    ))(input)
}

//* parenExpr = OPEN BWS commonExpr BWS CLOSE
fn parenExpr(input: Input) -> TokenResult {
    tok(TokenKind::ParenExpression, |i| {
        let (i, _) = pair(OPEN, BWS)(i)?;
        let (i, inner) = boolCommonExpr(i)?;
        let (i, _) = pair(BWS, CLOSE)(i)?;
        Ok((i, TokenValue::Unary(Box::new(inner))))
    })(input)
}

//* listExpr  = OPEN BWS commonExpr BWS *( COMMA BWS commonExpr BWS ) CLOSE
fn listExpr(input: Input) -> TokenResult {
    tok(TokenKind::ListExpression, |i| {
        let (i, _) = pair(OPEN, BWS)(i)?;
        let (i, items) = separated_list1(tuple((BWS, COMMA, BWS)), |i| commonExpr(i, 0))(i)?;
        let (i, _) = pair(BWS, CLOSE)(i)?;
        Ok((i, TokenValue::Items(items)))
    })(input)
}

//* rootExpr = '$root/' ( entitySetName keyPredicate / singletonEntity ) [ singleNavigationExpr ]
pub(crate) fn rootExpr(input: Input) -> TokenResult {
    tok(TokenKind::RootExpression, |i| {
        let (i, _) = tag("$root/")(i)?;
        let (i, path) = resourcePath(i)?;
        Ok((i, TokenValue::Unary(Box::new(path))))
    })(input)
}

//* methodCallExpr = indexOfMethodCallExpr / toLowerMethodCallExpr / toUpperMethodCallExpr
//*                / trimMethodCallExpr / substringMethodCallExpr / concatMethodCallExpr
//*                / lengthMethodCallExpr / yearMethodCallExpr / monthMethodCallExpr
//*                / dayMethodCallExpr / hourMethodCallExpr / minuteMethodCallExpr
//*                / secondMethodCallExpr / fractionalsecondsMethodCallExpr
//*                / dateMethodCallExpr / timeMethodCallExpr / totalOffsetMinutesMethodCallExpr
//*                / minDateTimeMethodCallExpr / maxDateTimeMethodCallExpr / nowMethodCallExpr
//*                / roundMethodCallExpr / floorMethodCallExpr / ceilingMethodCallExpr
//*                / distanceMethodCallExpr / geoLengthMethodCallExpr / intersectsMethodCallExpr
//*                / boolMethodCallExpr
//  All of those share the shape methodName OPEN BWS args BWS CLOSE, so one
//  parser drives off the method table instead of one rule each.
pub(crate) fn methodCallExpr(input: Input) -> TokenResult {
    let start = input.pos();
    let (i, method) = methodName(input)?;
    let (i, _) = pair(OPEN, BWS)(i)?;
    let (i, parameters) = match method {
        Method::Cast | Method::IsOf => typeMethodParameters(i)?,
        _ => methodParameters(i, method)?,
    };
    let (i, _) = pair(BWS, CLOSE)(i)?;
    let kind = match method {
        Method::Cast => TokenKind::CastExpression,
        Method::IsOf => TokenKind::IsOfExpression,
        _ => TokenKind::MethodCallExpression,
    };
    let token = i.token_between(
        start,
        i.pos(),
        kind,
        TokenValue::Method {
            method: method.name().to_string(),
            parameters,
        },
    );
    Ok((i, token))
}

fn methodName(input: Input) -> PResult<Method> {
    map_res(
        recognize(pair(
            opt(tag("geo.")),
            take_while1(|c: char| c.is_ascii_lowercase()),
        )),
        |name: Input| name.as_str().parse(),
    )(input)
}

fn methodParameters(input: Input, method: Method) -> PResult<Vec<Token>> {
    let (min, max) = method.arity();
    if max == 0 {
        return Ok((input, Vec::new()));
    }
    let (input, parameters) =
        separated_list1(tuple((BWS, COMMA, BWS)), |i| commonExpr(i, 0))(input)?;
    if parameters.len() < min || parameters.len() > max {
        return Err(nom::Err::Error(()));
    }
    Ok((input, parameters))
}

//* castExpr = "cast" OPEN BWS [ commonExpr BWS COMMA BWS ] optionallyQualifiedTypeName BWS CLOSE
//* isofExpr = "isof" OPEN BWS [ commonExpr BWS COMMA BWS ] optionallyQualifiedTypeName BWS CLOSE
fn typeMethodParameters(input: Input) -> PResult<Vec<Token>> {
    let (input, expr) = opt(terminated(
        |i| commonExpr(i, 0),
        tuple((BWS, COMMA, BWS)),
    ))(input)?;
    let (input, ty) = qualifiedTypeName(input)?;
    let mut parameters = Vec::new();
    parameters.extend(expr);
    parameters.push(ty);
    Ok((input, parameters))
}

//* firstMemberExpr = memberExpr
//*                 / inscopeVariableExpr [ "/" memberExpr ]
//* memberExpr = [ qualifiedEntityTypeName "/" ]
//*              ( propertyPathExpr
//*              / boundFunctionExpr
//*              )
//* propertyPathExpr = entityColNavigationProperty [ collectionNavigationExpr ] / ...
//  Without a scope table every segment is an identifier or a type cast; a
//  trailing any/all closes over the path collected so far.
pub(crate) fn firstMemberExpr(input: Input) -> TokenResult {
    let start = input.pos();
    let (i, first) = pathSegment(input)?;
    let mut segments = vec![first];
    let mut input = i;

    loop {
        let (i, lambda) = opt(preceded(tag("/"), lambdaOperator))(input)?;
        if let Some((kind, variable, predicate)) = lambda {
            let collection = collectionToken(&i, start, &segments);
            let token = i.token_between(
                start,
                i.pos(),
                kind,
                TokenValue::Lambda {
                    collection: Box::new(collection),
                    variable: variable.map(Box::new),
                    predicate: predicate.map(Box::new),
                },
            );
            return Ok((i, token));
        }

        let (i, next) = opt(preceded(tag("/"), pathSegment))(input)?;
        match next {
            Some(segment) => {
                segments.push(segment);
                input = i;
            }
            None => break,
        }
    }

    let path = collectionToken(&input, start, &segments);
    let next = path.next;
    let token = input.token_between(
        start,
        next,
        TokenKind::FirstMemberExpression,
        TokenValue::Unary(Box::new(path)),
    );
    Ok((input, token))
}

fn pathSegment(input: Input) -> TokenResult {
    alt((qualifiedTypeName, odataIdentifier))(input)
}

fn collectionToken(input: &Input, start: usize, segments: &[Token]) -> Token {
    let next = segments.last().map(|s| s.next).unwrap_or(start);
    input.token_between(
        start,
        next,
        TokenKind::PropertyPathExpression,
        TokenValue::Items(segments.to_vec()),
    )
}

//* anyExpr = "any" OPEN BWS [ lambdaVariableExpr BWS COLON BWS lambdaPredicateExpr ] BWS CLOSE
//* allExpr = "all" OPEN BWS   lambdaVariableExpr BWS COLON BWS lambdaPredicateExpr   BWS CLOSE
//* lambdaVariableExpr  = odataIdentifier
//* lambdaPredicateExpr = boolCommonExpr ; containing at least one lambdaVariableExpr
//TODO(validation) the predicate is not checked for actually using the variable
//  Once the operator name and its opening parenthesis have matched, nothing
//  else can be meant; any error after that point is fatal so a bad body
//  (such as the empty `all()`) does not backtrack into reading `all` as a
//  plain property segment.
fn lambdaOperator(input: Input) -> PResult<(TokenKind, Option<Token>, Option<Token>)> {
    alt((
        |i| {
            let (i, _) = pair(tag_no_case("any"), OPEN)(i)?;
            let (i, _) = BWS(i)?;
            let (i, body) = opt(lambdaBody)(i)?;
            let (i, _) = cut(pair(BWS, CLOSE))(i)?;
            let (variable, predicate) = match body {
                Some((variable, predicate)) => (Some(variable), Some(predicate)),
                None => (None, None),
            };
            Ok((i, (TokenKind::AnyExpression, variable, predicate)))
        },
        |i| {
            let (i, _) = pair(tag_no_case("all"), OPEN)(i)?;
            let (i, _) = BWS(i)?;
            let (i, (variable, predicate)) = cut(lambdaBody)(i)?;
            let (i, _) = cut(pair(BWS, CLOSE))(i)?;
            Ok((i, (TokenKind::AllExpression, Some(variable), Some(predicate))))
        },
    ))(input)
}

fn lambdaBody(input: Input) -> PResult<(Token, Token)> {
    let (i, variable) = odataIdentifier(input)?;
    let (i, _) = tuple((BWS, COLON, BWS))(i)?;
    let (i, predicate) = boolCommonExpr(i)?;
    Ok((i, (variable, predicate)))
}
