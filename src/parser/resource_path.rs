//! Resource paths: the entity set or singleton head, key predicates,
//! navigation segments, type casts and bound operations.

use nom::branch::alt;
use nom::bytes::complete::tag;
use nom::combinator::opt;
use nom::multi::{separated_list0, separated_list1};
use nom::sequence::{delimited, preceded, terminated};

use crate::ast::{TokenKind, TokenValue};

use super::common::{CLOSE, COMMA, EQ, OPEN};
use super::literals::primitiveLiteral;
use super::names::{identifier, odataIdentifier, qualifiedName, qualifiedTypeName};
use super::{tok, Input, TokenResult};

//* ;------------------------------------------------------------------------------
//* ; 1. Resource Path
//* ;------------------------------------------------------------------------------
//*
//* resourcePath = entitySetName                  [ collectionNavigation ]
//*              / singletonEntity                [ singleNavigation ]
//* collectionNavigation = [ "/" qualifiedEntityTypeName ] [ collectionNavPath ]
//* collectionNavPath    = keyPredicate [ singleNavigation ] / boundOperation
//* singleNavigation     = [ "/" qualifiedEntityTypeName ] [ "/" propertyPath / boundOperation ]
//  Collection- and single-valued navigation cannot be told apart without
//  metadata, so both collapse into one segment chain; the distinction is a
//  downstream concern. A leading type cast ahead of the set name is
//  accepted too.
pub(crate) fn resourcePath(input: Input) -> TokenResult {
    tok(TokenKind::ResourcePath, |i| {
        let (i, cast) = opt(terminated(qualifiedTypeName, tag("/")))(i)?;
        let (i, head) = headSegment(i)?;
        let mut items = Vec::new();
        items.extend(cast);
        items.push(head);
        let (i, key) = opt(keyPredicate)(i)?;
        items.extend(key);
        let mut input = i;
        loop {
            let (i, segment) = opt(preceded(tag("/"), navSegment))(input)?;
            match segment {
                Some(segment) => {
                    items.push(segment);
                    let (i, key) = opt(keyPredicate)(i)?;
                    items.extend(key);
                    input = i;
                }
                None => break,
            }
        }
        Ok((input, TokenValue::Items(items)))
    })(input)
}

//* entitySetName       = odataIdentifier
//* singletonEntity     = odataIdentifier
fn headSegment(input: Input) -> TokenResult {
    let (rest, name) = identifier(input)?;
    let kind = match rest.metadata() {
        Some(doc) if doc.has_entity_set(name.as_str()) => TokenKind::EntitySetName,
        Some(doc) if doc.has_singleton(name.as_str()) => TokenKind::SingletonEntity,
        Some(_) => return Err(nom::Err::Error(())),
        None => TokenKind::EntitySetName,
    };
    let token = rest.token_between(input.pos(), rest.pos(), kind, TokenValue::None);
    Ok((rest, token))
}

//* propertyPath = entityColNavigationProperty / entityNavigationProperty
//*              / complexColProperty / complexProperty
//*              / primitiveColProperty / primitiveProperty / streamProperty
fn navSegment(input: Input) -> TokenResult {
    alt((boundOperation, qualifiedTypeName, odataIdentifier))(input)
}

//* ; boundOperation segments can only be composed if the type of the previous segment
//* ; matches the type of the first parameter of the action or function being called.
//* boundOperation = "/" ( boundActionCall / boundEntityColFunctionCall / boundEntityFunctionCall
//*                      / boundComplexColFunctionCall / boundComplexFunctionCall
//*                      / boundPrimitiveColFunctionCall / boundPrimitiveFunctionCall )
//* functionParameters = OPEN [ functionParameter *( COMMA functionParameter ) ] CLOSE
fn boundOperation(input: Input) -> TokenResult {
    let start = input.pos();
    let (i, name) = qualifiedName(input)?;
    let (i, _) = OPEN(i)?;
    let (i, parameters) = separated_list0(COMMA, functionParameter)(i)?;
    let (i, _) = CLOSE(i)?;
    let token = i.token_between(
        start,
        i.pos(),
        TokenKind::BoundOperation,
        TokenValue::Method {
            method: name.as_str().to_string(),
            parameters,
        },
    );
    Ok((i, token))
}

//* functionParameter  = parameterName EQ ( parameterAlias / primitiveLiteral )
//* parameterName      = odataIdentifier
//  Parameter aliases are not accepted.
fn functionParameter(input: Input) -> TokenResult {
    tok(TokenKind::FunctionParameter, |i| {
        let (i, name) = odataIdentifier(i)?;
        let (i, _) = EQ(i)?;
        let (i, value) = primitiveLiteral(i)?;
        Ok((
            i,
            TokenValue::Pair {
                name: Box::new(name),
                value: Box::new(value),
            },
        ))
    })(input)
}

//* keyPredicate     = simpleKey / compoundKey
pub(crate) fn keyPredicate(input: Input) -> TokenResult {
    alt((simpleKey, compoundKey))(input)
}

//* simpleKey        = OPEN ( parameterAlias / keyPropertyValue ) CLOSE
//  Parameter aliases are not accepted.
fn simpleKey(input: Input) -> TokenResult {
    tok(TokenKind::KeyPredicate, |i| {
        let (i, key) = delimited(OPEN, keyPropertyValue, CLOSE)(i)?;
        Ok((i, TokenValue::Items(vec![key])))
    })(input)
}

//* compoundKey      = OPEN keyValuePair *( COMMA keyValuePair ) CLOSE
fn compoundKey(input: Input) -> TokenResult {
    tok(TokenKind::KeyPredicate, |i| {
        let (i, pairs) = delimited(OPEN, separated_list1(COMMA, keyValuePair), CLOSE)(i)?;
        Ok((i, TokenValue::Items(pairs)))
    })(input)
}

//* keyValuePair     = ( primitiveKeyProperty / keyPropertyAlias  ) EQ ( parameterAlias / keyPropertyValue )
fn keyValuePair(input: Input) -> TokenResult {
    tok(TokenKind::KeyValuePair, |i| {
        let (i, name) = odataIdentifier(i)?;
        let (i, _) = EQ(i)?;
        let (i, value) = keyPropertyValue(i)?;
        Ok((
            i,
            TokenValue::Pair {
                name: Box::new(name),
                value: Box::new(value),
            },
        ))
    })(input)
}

//* keyPropertyValue = primitiveLiteral
//FIXME validate the primitive against the key property type when metadata is present
fn keyPropertyValue(input: Input) -> TokenResult {
    primitiveLiteral(input)
}
