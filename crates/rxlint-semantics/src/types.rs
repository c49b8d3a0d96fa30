//! Type descriptors and the arena that owns them.

use rxlint_syntax::MemberKind;

use crate::error::SemanticsError;

/// Opaque handle to a [`TypeData`] entry in a [`TypeTable`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TypeId(u32);

impl TypeId {
    /// The `any` type.
    pub const ANY: Self = Self(0);
    /// The `unknown` type.
    pub const UNKNOWN: Self = Self(1);
    /// The `never` type.
    pub const NEVER: Self = Self(2);
    /// The `number` type.
    pub const NUMBER: Self = Self(3);
    /// The `string` type.
    pub const STRING: Self = Self(4);
    /// The `boolean` type.
    pub const BOOLEAN: Self = Self(5);
    /// The `bigint` type.
    pub const BIGINT: Self = Self(6);
    /// The `symbol` type.
    pub const SYMBOL: Self = Self(7);
    /// The `void` type.
    pub const VOID: Self = Self(8);
    /// The `undefined` type.
    pub const UNDEFINED: Self = Self(9);
    /// The `null` type.
    pub const NULL: Self = Self(10);

    /// Returns the arena index of this type.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

/// Primitive value kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrimitiveType {
    /// `number` and numeric literal types.
    Number,
    /// `string`, string literal and template types.
    String,
    /// `boolean` and `true`/`false`.
    Boolean,
    /// `bigint`.
    BigInt,
    /// `symbol`.
    Symbol,
    /// `void`.
    Void,
    /// `undefined`.
    Undefined,
    /// `null`.
    Null,
}

impl PrimitiveType {
    /// Returns `true` for `undefined`, `null` and `void`.
    #[must_use]
    pub const fn is_nullish(self) -> bool {
        matches!(self, Self::Undefined | Self::Null | Self::Void)
    }
}

/// Whether a declared type came from a class or an interface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeclarationKind {
    /// `class` (including `declare class`).
    Class,
    /// `interface`.
    Interface,
}

/// A property or method of a declared or object type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Member {
    /// Member name.
    pub name: String,
    /// Property or method.
    pub kind: MemberKind,
    /// Property type, or method return type.
    pub ty: TypeId,
}

/// A nominal class or interface declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeclaredType {
    /// Declared name.
    pub name: String,
    /// Class or interface.
    pub kind: DeclarationKind,
    /// Generic parameters, each a [`TypeData::TypeParameter`].
    pub type_params: Vec<TypeId>,
    /// `extends` and `implements` targets.
    pub supertypes: Vec<TypeId>,
    /// Own members, excluding inherited ones.
    pub members: Vec<Member>,
}

/// The shape of a type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeData {
    /// `any`.
    Any,
    /// `unknown`, or a type the model could not determine.
    Unknown,
    /// `never`.
    Never,
    /// A primitive kind.
    Primitive(PrimitiveType),
    /// A class or interface declaration.
    Declared(DeclaredType),
    /// A generic instantiation of a declared type or alias.
    Reference {
        /// The declared type or alias being instantiated.
        target: TypeId,
        /// Type arguments in order.
        arguments: Vec<TypeId>,
    },
    /// A named alias, possibly generic.
    Alias {
        /// Alias name.
        name: String,
        /// Generic parameters, each a [`TypeData::TypeParameter`].
        type_params: Vec<TypeId>,
        /// The aliased type.
        target: TypeId,
    },
    /// `A | B`.
    Union(Vec<TypeId>),
    /// `A & B`.
    Intersection(Vec<TypeId>),
    /// `T[]`.
    Array(TypeId),
    /// `[A, B]`.
    Tuple(Vec<TypeId>),
    /// A callable type.
    Function {
        /// Return type.
        return_type: TypeId,
    },
    /// An anonymous object type.
    Object {
        /// Members in order.
        members: Vec<Member>,
    },
    /// A generic parameter.
    TypeParameter {
        /// Parameter name.
        name: String,
        /// Upper bound.
        constraint: Option<TypeId>,
    },
    /// A named type with no visible declaration.
    Opaque {
        /// The referenced name.
        name: String,
        /// Type arguments in order.
        arguments: Vec<TypeId>,
    },
}

/// Arena of [`TypeData`] addressed by [`TypeId`].
///
/// Intrinsic types are interned at construction so their identifiers are
/// the associated constants on [`TypeId`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeTable {
    entries: Vec<TypeData>,
}

impl TypeTable {
    /// Creates a table holding only the intrinsic types.
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: vec![
                TypeData::Any,
                TypeData::Unknown,
                TypeData::Never,
                TypeData::Primitive(PrimitiveType::Number),
                TypeData::Primitive(PrimitiveType::String),
                TypeData::Primitive(PrimitiveType::Boolean),
                TypeData::Primitive(PrimitiveType::BigInt),
                TypeData::Primitive(PrimitiveType::Symbol),
                TypeData::Primitive(PrimitiveType::Void),
                TypeData::Primitive(PrimitiveType::Undefined),
                TypeData::Primitive(PrimitiveType::Null),
            ],
        }
    }

    /// Returns the intrinsic identifier for a primitive kind.
    #[must_use]
    pub const fn primitive(kind: PrimitiveType) -> TypeId {
        match kind {
            PrimitiveType::Number => TypeId::NUMBER,
            PrimitiveType::String => TypeId::STRING,
            PrimitiveType::Boolean => TypeId::BOOLEAN,
            PrimitiveType::BigInt => TypeId::BIGINT,
            PrimitiveType::Symbol => TypeId::SYMBOL,
            PrimitiveType::Void => TypeId::VOID,
            PrimitiveType::Undefined => TypeId::UNDEFINED,
            PrimitiveType::Null => TypeId::NULL,
        }
    }

    /// Appends a type and returns its identifier.
    pub fn alloc(&mut self, data: TypeData) -> TypeId {
        let id = TypeId(u32::try_from(self.entries.len()).unwrap_or(u32::MAX));
        self.entries.push(data);
        id
    }

    /// Reserves an identifier for a type defined later, such as a
    /// declaration that refers to itself. The entry reads as
    /// [`TypeData::Unknown`] until defined.
    pub fn reserve(&mut self) -> TypeId {
        self.alloc(TypeData::Unknown)
    }

    /// Replaces the data behind `id`.
    ///
    /// # Errors
    ///
    /// Returns [`SemanticsError::UnknownType`] if `id` was not allocated by
    /// this table.
    pub fn define(&mut self, id: TypeId, data: TypeData) -> Result<(), SemanticsError> {
        let slot = self
            .entries
            .get_mut(id.index())
            .ok_or(SemanticsError::UnknownType { id: id.0 })?;
        *slot = data;
        Ok(())
    }

    /// Returns the data behind `id`.
    #[must_use]
    pub fn get(&self, id: TypeId) -> Option<&TypeData> {
        self.entries.get(id.index())
    }

    /// Returns the number of entries, intrinsics included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the table holds no entries. Never true in practice
    /// since intrinsics are always present.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for TypeTable {
    fn default() -> Self {
        Self::new()
    }
}
