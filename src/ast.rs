use std::fmt;
use std::str::FromStr;

use serde::{Serialize, Serializer};

/// A node of the parse tree.
///
/// `position` and `next` delimit the half-open source span the node was
/// parsed from; `raw` is that exact slice, materialised. Every child token's
/// span is contained in its parent's span, siblings appear in source order,
/// and re-parsing `raw` with the combinator that produced the node yields an
/// equal node. Tokens are immutable once built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Token {
    /// Start index (inclusive) into the source buffer.
    pub position: usize,
    /// End index (exclusive). Equal to `position` only for the empty
    /// productions the grammar explicitly allows.
    pub next: usize,
    #[serde(rename = "type")]
    pub kind: TokenKind,
    /// The literal source slice `source[position..next]`.
    pub raw: String,
    pub value: TokenValue,
}

impl Token {
    /// Child tokens in source order, regardless of the payload shape.
    pub fn children(&self) -> Vec<&Token> {
        match &self.value {
            TokenValue::None
            | TokenValue::Literal(_)
            | TokenValue::Text(_)
            | TokenValue::KeyValue { .. } => Vec::new(),
            TokenValue::Binary { left, right } => vec![left.as_ref(), right.as_ref()],
            TokenValue::Unary(child) => vec![child.as_ref()],
            TokenValue::Items(items) => items.iter().collect(),
            TokenValue::Pair { name, value } => vec![name.as_ref(), value.as_ref()],
            TokenValue::Method { parameters, .. } => parameters.iter().collect(),
            TokenValue::Lambda {
                collection,
                variable,
                predicate,
            } => {
                let mut children = vec![collection.as_ref()];
                children.extend(variable.as_deref());
                children.extend(predicate.as_deref());
                children
            }
            TokenValue::OrderByItem { expr, .. } => vec![expr.as_ref()],
            TokenValue::ExpandItem { path, options } => {
                let mut children = vec![path.as_ref()];
                children.extend(options.iter());
                children
            }
            TokenValue::Uri {
                service_root,
                resource,
                options,
            } => {
                let mut children = vec![service_root.as_ref()];
                children.extend(resource.as_deref());
                children.extend(options.as_deref());
                children
            }
        }
    }
}

/// Discriminant of a [`Token`]. The set is closed; adding a kind is a
/// breaking change for consumers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum TokenKind {
    // names
    ODataIdentifier,
    PrimitiveTypeName,
    QualifiedEntityTypeName,
    QualifiedComplexTypeName,
    // literals
    Literal,
    // expressions
    OrExpression,
    AndExpression,
    EqualsExpression,
    NotEqualsExpression,
    LessThanExpression,
    LessOrEqualsExpression,
    GreaterThanExpression,
    GreaterOrEqualsExpression,
    HasExpression,
    InExpression,
    AddExpression,
    SubExpression,
    MulExpression,
    DivExpression,
    ModExpression,
    NegateExpression,
    NotExpression,
    ParenExpression,
    ListExpression,
    MethodCallExpression,
    CastExpression,
    IsOfExpression,
    RootExpression,
    FirstMemberExpression,
    PropertyPathExpression,
    AnyExpression,
    AllExpression,
    // resource paths
    ResourcePath,
    EntitySetName,
    SingletonEntity,
    KeyPredicate,
    KeyValuePair,
    BoundOperation,
    FunctionParameter,
    // query options
    QueryOptions,
    Filter,
    Select,
    SelectItem,
    Star,
    Expand,
    ExpandItem,
    OrderBy,
    OrderByItem,
    Top,
    Skip,
    InlineCount,
    Format,
    SkipToken,
    Levels,
    CustomQueryOption,
    Search,
    SearchAndExpression,
    SearchOrExpression,
    SearchNotExpression,
    SearchPhrase,
    SearchWord,
    // uri
    ODataUri,
    ServiceRoot,
}

/// Payload of a [`Token`], one variant per payload category. Which variant a
/// given [`TokenKind`] carries is fixed; consumers may match exhaustively.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum TokenValue {
    None,
    /// The EDM type of a primitive literal. The literal's value is recovered
    /// from the token's `raw` slice.
    Literal(EdmType),
    /// Operands of a binary operator; the operator itself is implied by the
    /// token kind.
    Binary { left: Box<Token>, right: Box<Token> },
    Unary(Box<Token>),
    /// Order-significant child tokens of a collection or container node.
    Items(Vec<Token>),
    Text(String),
    /// A custom query option, split at the first `=`.
    KeyValue { key: String, value: String },
    /// A named value, e.g. one pair of a compound key predicate.
    Pair { name: Box<Token>, value: Box<Token> },
    Method {
        method: String,
        parameters: Vec<Token>,
    },
    /// An `any`/`all` application over the navigation path it closes.
    /// `variable` and `predicate` are absent only for the empty `any()`.
    Lambda {
        collection: Box<Token>,
        variable: Option<Box<Token>>,
        predicate: Option<Box<Token>>,
    },
    OrderByItem {
        expr: Box<Token>,
        direction: SortOrder,
    },
    ExpandItem {
        path: Box<Token>,
        options: Vec<Token>,
    },
    Uri {
        service_root: Box<Token>,
        resource: Option<Box<Token>>,
        options: Option<Box<Token>>,
    },
}

/// Sort direction of an `$orderby` item. Ascending when not spelled out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SortOrder {
    Asc,
    Desc,
}

/// EDM primitive types a literal can carry. `Edm.SByte`, `Edm.Byte` and
/// `Edm.Int16` are never inferred for bare integers (the narrowest inferred
/// integer type is `Edm.Int32`) but remain part of the type name grammar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EdmType {
    Null,
    Binary,
    Boolean,
    Byte,
    Date,
    DateTimeOffset,
    Decimal,
    Double,
    Duration,
    Enum,
    Guid,
    Int16,
    Int32,
    Int64,
    SByte,
    Single,
    String,
    TimeOfDay,
    GeographyPoint,
    GeographyLineString,
    GeographyPolygon,
    GeographyMultiPoint,
    GeographyMultiLineString,
    GeographyMultiPolygon,
    GeographyCollection,
    GeometryPoint,
    GeometryLineString,
    GeometryPolygon,
    GeometryMultiPoint,
    GeometryMultiLineString,
    GeometryMultiPolygon,
    GeometryCollection,
}

impl EdmType {
    pub fn name(&self) -> &'static str {
        match self {
            EdmType::Null => "null",
            EdmType::Binary => "Edm.Binary",
            EdmType::Boolean => "Edm.Boolean",
            EdmType::Byte => "Edm.Byte",
            EdmType::Date => "Edm.Date",
            EdmType::DateTimeOffset => "Edm.DateTimeOffset",
            EdmType::Decimal => "Edm.Decimal",
            EdmType::Double => "Edm.Double",
            EdmType::Duration => "Edm.Duration",
            EdmType::Enum => "Edm.Enum",
            EdmType::Guid => "Edm.Guid",
            EdmType::Int16 => "Edm.Int16",
            EdmType::Int32 => "Edm.Int32",
            EdmType::Int64 => "Edm.Int64",
            EdmType::SByte => "Edm.SByte",
            EdmType::Single => "Edm.Single",
            EdmType::String => "Edm.String",
            EdmType::TimeOfDay => "Edm.TimeOfDay",
            EdmType::GeographyPoint => "Edm.GeographyPoint",
            EdmType::GeographyLineString => "Edm.GeographyLineString",
            EdmType::GeographyPolygon => "Edm.GeographyPolygon",
            EdmType::GeographyMultiPoint => "Edm.GeographyMultiPoint",
            EdmType::GeographyMultiLineString => "Edm.GeographyMultiLineString",
            EdmType::GeographyMultiPolygon => "Edm.GeographyMultiPolygon",
            EdmType::GeographyCollection => "Edm.GeographyCollection",
            EdmType::GeometryPoint => "Edm.GeometryPoint",
            EdmType::GeometryLineString => "Edm.GeometryLineString",
            EdmType::GeometryPolygon => "Edm.GeometryPolygon",
            EdmType::GeometryMultiPoint => "Edm.GeometryMultiPoint",
            EdmType::GeometryMultiLineString => "Edm.GeometryMultiLineString",
            EdmType::GeometryMultiPolygon => "Edm.GeometryMultiPolygon",
            EdmType::GeometryCollection => "Edm.GeometryCollection",
        }
    }
}

impl fmt::Display for EdmType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Serialize for EdmType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinOp {
    /// The `add` operator (addition)
    Add,
    /// The `sub` operator (subtraction)
    Sub,
    /// The `mul` operator (multiplication)
    Mul,
    /// The `div` operator (division)
    Div,
    /// The `mod` operator (modulus)
    Mod,
    /// The `eq` operator (equality)
    Eq,
    /// The `ne` operator (not equal to)
    Ne,
    /// The `lt` operator (less than)
    Lt,
    /// The `le` operator (less than or equal to)
    Le,
    /// The `gt` operator (greater than)
    Gt,
    /// The `ge` operator (greater than or equal to)
    Ge,
    /// The `has` operator (enumeration flags)
    Has,
    /// The `in` operator (is member of)
    In,
    /// The `and` operator (logical and)
    And,
    /// The `or` operator (logical or)
    Or,
}

impl BinOp {
    /// Binding strength, loosest first. All levels associate left.
    pub fn precedence(&self) -> u8 {
        match self {
            BinOp::Or => 0,
            BinOp::And => 1,
            BinOp::Eq
            | BinOp::Ne
            | BinOp::Lt
            | BinOp::Le
            | BinOp::Gt
            | BinOp::Ge
            | BinOp::Has
            | BinOp::In => 2,
            BinOp::Add | BinOp::Sub => 3,
            BinOp::Mul | BinOp::Div | BinOp::Mod => 4,
        }
    }

    pub fn token_kind(&self) -> TokenKind {
        match self {
            BinOp::Add => TokenKind::AddExpression,
            BinOp::Sub => TokenKind::SubExpression,
            BinOp::Mul => TokenKind::MulExpression,
            BinOp::Div => TokenKind::DivExpression,
            BinOp::Mod => TokenKind::ModExpression,
            BinOp::Eq => TokenKind::EqualsExpression,
            BinOp::Ne => TokenKind::NotEqualsExpression,
            BinOp::Lt => TokenKind::LessThanExpression,
            BinOp::Le => TokenKind::LessOrEqualsExpression,
            BinOp::Gt => TokenKind::GreaterThanExpression,
            BinOp::Ge => TokenKind::GreaterOrEqualsExpression,
            BinOp::Has => TokenKind::HasExpression,
            BinOp::In => TokenKind::InExpression,
            BinOp::And => TokenKind::AndExpression,
            BinOp::Or => TokenKind::OrExpression,
        }
    }
}

/// The built-in method set of the expression grammar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Contains,
    StartsWith,
    EndsWith,
    Length,
    IndexOf,
    Substring,
    ToLower,
    ToUpper,
    Trim,
    Concat,
    Year,
    Month,
    Day,
    Hour,
    Minute,
    Second,
    FractionalSeconds,
    Date,
    Time,
    TotalOffsetMinutes,
    Now,
    MinDatetime,
    MaxDatetime,
    Round,
    Floor,
    Ceiling,
    Cast,
    IsOf,
    GeoDistance,
    GeoLength,
    GeoIntersects,
}

pub struct MethodParseError(());

impl Method {
    /// Minimum and maximum parameter count.
    pub fn arity(&self) -> (usize, usize) {
        match self {
            Method::Contains => (2, 2),
            Method::StartsWith => (2, 2),
            Method::EndsWith => (2, 2),
            Method::Length => (1, 1),
            Method::IndexOf => (2, 2),
            Method::Substring => (2, 3),
            Method::ToLower => (1, 1),
            Method::ToUpper => (1, 1),
            Method::Trim => (1, 1),
            Method::Concat => (2, 2),
            Method::Year => (1, 1),
            Method::Month => (1, 1),
            Method::Day => (1, 1),
            Method::Hour => (1, 1),
            Method::Minute => (1, 1),
            Method::Second => (1, 1),
            Method::FractionalSeconds => (1, 1),
            Method::Date => (1, 1),
            Method::Time => (1, 1),
            Method::TotalOffsetMinutes => (1, 1),
            Method::Now => (0, 0),
            Method::MinDatetime => (0, 0),
            Method::MaxDatetime => (0, 0),
            Method::Round => (1, 1),
            Method::Floor => (1, 1),
            Method::Ceiling => (1, 1),
            Method::Cast => (1, 2),
            Method::IsOf => (1, 2),
            Method::GeoDistance => (2, 2),
            Method::GeoLength => (1, 1),
            Method::GeoIntersects => (2, 2),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Method::Contains => "contains",
            Method::StartsWith => "startswith",
            Method::EndsWith => "endswith",
            Method::Length => "length",
            Method::IndexOf => "indexof",
            Method::Substring => "substring",
            Method::ToLower => "tolower",
            Method::ToUpper => "toupper",
            Method::Trim => "trim",
            Method::Concat => "concat",
            Method::Year => "year",
            Method::Month => "month",
            Method::Day => "day",
            Method::Hour => "hour",
            Method::Minute => "minute",
            Method::Second => "second",
            Method::FractionalSeconds => "fractionalseconds",
            Method::Date => "date",
            Method::Time => "time",
            Method::TotalOffsetMinutes => "totaloffsetminutes",
            Method::Now => "now",
            Method::MinDatetime => "mindatetime",
            Method::MaxDatetime => "maxdatetime",
            Method::Round => "round",
            Method::Floor => "floor",
            Method::Ceiling => "ceiling",
            Method::Cast => "cast",
            Method::IsOf => "isof",
            Method::GeoDistance => "geo.distance",
            Method::GeoLength => "geo.length",
            Method::GeoIntersects => "geo.intersects",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Method {
    type Err = MethodParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "contains" => Ok(Method::Contains),
            "startswith" => Ok(Method::StartsWith),
            "endswith" => Ok(Method::EndsWith),
            "length" => Ok(Method::Length),
            "indexof" => Ok(Method::IndexOf),
            "substring" => Ok(Method::Substring),
            "tolower" => Ok(Method::ToLower),
            "toupper" => Ok(Method::ToUpper),
            "trim" => Ok(Method::Trim),
            "concat" => Ok(Method::Concat),
            "year" => Ok(Method::Year),
            "month" => Ok(Method::Month),
            "day" => Ok(Method::Day),
            "hour" => Ok(Method::Hour),
            "minute" => Ok(Method::Minute),
            "second" => Ok(Method::Second),
            "fractionalseconds" => Ok(Method::FractionalSeconds),
            "date" => Ok(Method::Date),
            "time" => Ok(Method::Time),
            "totaloffsetminutes" => Ok(Method::TotalOffsetMinutes),
            "now" => Ok(Method::Now),
            "mindatetime" => Ok(Method::MinDatetime),
            "maxdatetime" => Ok(Method::MaxDatetime),
            "round" => Ok(Method::Round),
            "floor" => Ok(Method::Floor),
            "ceiling" => Ok(Method::Ceiling),
            "cast" => Ok(Method::Cast),
            "isof" => Ok(Method::IsOf),
            "geo.distance" => Ok(Method::GeoDistance),
            "geo.length" => Ok(Method::GeoLength),
            "geo.intersects" => Ok(Method::GeoIntersects),
            _ => Err(MethodParseError(())),
        }
    }
}
