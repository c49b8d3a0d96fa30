//! Syntactic type expressions taken from annotations and declarations.

use std::fmt;

use crate::tree::LiteralKind;

/// Built-in type keywords.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeKeyword {
    /// `any`.
    Any,
    /// `unknown`.
    Unknown,
    /// `never`.
    Never,
    /// `number`.
    Number,
    /// `string`.
    String,
    /// `boolean`.
    Boolean,
    /// `bigint`.
    BigInt,
    /// `symbol`.
    Symbol,
    /// `void`.
    Void,
    /// `object`.
    Object,
    /// `undefined`.
    Undefined,
    /// `null`.
    Null,
}

impl TypeKeyword {
    /// Parses a keyword from its source spelling.
    #[must_use]
    pub fn from_keyword(text: &str) -> Option<Self> {
        let keyword = match text {
            "any" => Self::Any,
            "unknown" => Self::Unknown,
            "never" => Self::Never,
            "number" => Self::Number,
            "string" => Self::String,
            "boolean" => Self::Boolean,
            "bigint" => Self::BigInt,
            "symbol" => Self::Symbol,
            "void" => Self::Void,
            "object" => Self::Object,
            "undefined" => Self::Undefined,
            "null" => Self::Null,
            _ => return None,
        };
        Some(keyword)
    }

    /// Returns the source spelling.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Any => "any",
            Self::Unknown => "unknown",
            Self::Never => "never",
            Self::Number => "number",
            Self::String => "string",
            Self::Boolean => "boolean",
            Self::BigInt => "bigint",
            Self::Symbol => "symbol",
            Self::Void => "void",
            Self::Object => "object",
            Self::Undefined => "undefined",
            Self::Null => "null",
        }
    }
}

/// Whether an object-type member is a property or a method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MemberKind {
    /// A property with a value type.
    Property,
    /// A method; the member type is its return type.
    Method,
}

/// A member of an object type literal.
#[derive(Debug, Clone, PartialEq)]
pub struct TypeMember {
    /// Member name.
    pub name: String,
    /// Property or method.
    pub kind: MemberKind,
    /// Property type, or method return type.
    pub ty: TypeExpr,
}

/// A generic parameter declaration such as `T extends Action = Action`.
#[derive(Debug, Clone, PartialEq)]
pub struct TypeParameter {
    /// Parameter name.
    pub name: String,
    /// Upper bound, if declared.
    pub constraint: Option<TypeExpr>,
}

/// A type as written in source.
#[derive(Debug, Clone, PartialEq)]
pub enum TypeExpr {
    /// A built-in keyword.
    Keyword(TypeKeyword),
    /// A literal type such as `'a'` or `1`.
    Literal(LiteralKind),
    /// A named type with optional arguments, e.g. `Observable<number>`.
    ///
    /// Qualified names keep only their last segment.
    Named {
        /// Type name.
        name: String,
        /// Type arguments.
        arguments: Vec<TypeExpr>,
    },
    /// `A | B`, flattened.
    Union(Vec<TypeExpr>),
    /// `A & B`, flattened.
    Intersection(Vec<TypeExpr>),
    /// `T[]`.
    Array(Box<TypeExpr>),
    /// `[A, B]`.
    Tuple(Vec<TypeExpr>),
    /// A function or constructor type.
    Function {
        /// Declared return type.
        return_type: Box<TypeExpr>,
    },
    /// An object type literal.
    Object {
        /// Members in order.
        members: Vec<TypeMember>,
    },
    /// A construct the analysis does not model, kept as source text.
    Unsupported {
        /// The original source text.
        text: String,
    },
}

impl TypeExpr {
    /// Creates a named type without arguments.
    #[must_use]
    pub fn named(name: impl Into<String>) -> Self {
        Self::Named {
            name: name.into(),
            arguments: Vec::new(),
        }
    }
}

impl fmt::Display for TypeExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Keyword(keyword) => f.write_str(keyword.as_str()),
            Self::Literal(kind) => write!(f, "{kind:?}"),
            Self::Named { name, arguments } => {
                f.write_str(name)?;
                if !arguments.is_empty() {
                    f.write_str("<")?;
                    write_joined(f, arguments, ", ")?;
                    f.write_str(">")?;
                }
                Ok(())
            }
            Self::Union(members) => write_joined(f, members, " | "),
            Self::Intersection(members) => write_joined(f, members, " & "),
            Self::Array(element) => write!(f, "{element}[]"),
            Self::Tuple(elements) => {
                f.write_str("[")?;
                write_joined(f, elements, ", ")?;
                f.write_str("]")
            }
            Self::Function { return_type } => write!(f, "() => {return_type}"),
            Self::Object { members } => {
                f.write_str("{ ")?;
                for member in members {
                    match member.kind {
                        MemberKind::Property => write!(f, "{}: {}; ", member.name, member.ty)?,
                        MemberKind::Method => write!(f, "{}(): {}; ", member.name, member.ty)?,
                    }
                }
                f.write_str("}")
            }
            Self::Unsupported { text } => f.write_str(text),
        }
    }
}

fn write_joined(f: &mut fmt::Formatter<'_>, items: &[TypeExpr], separator: &str) -> fmt::Result {
    for (position, item) in items.iter().enumerate() {
        if position > 0 {
            f.write_str(separator)?;
        }
        write!(f, "{item}")?;
    }
    Ok(())
}
