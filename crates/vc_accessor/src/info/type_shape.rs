use alloc::boxed::Box;
use core::any::TypeId;
use core::fmt;

use crate::{FromReflect, Reflect};

// -----------------------------------------------------------------------------
// IntegerKind

/// The primitive integer types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IntegerKind {
    I8,
    I16,
    I32,
    I64,
    I128,
    Isize,
    U8,
    U16,
    U32,
    U64,
    U128,
    Usize,
}

impl IntegerKind {
    #[inline]
    pub const fn bits(self) -> u32 {
        match self {
            Self::I8 | Self::U8 => 8,
            Self::I16 | Self::U16 => 16,
            Self::I32 | Self::U32 => 32,
            Self::I64 | Self::U64 => 64,
            Self::I128 | Self::U128 => 128,
            Self::Isize | Self::Usize => usize::BITS,
        }
    }

    #[inline]
    pub const fn is_signed(self) -> bool {
        matches!(
            self,
            Self::I8 | Self::I16 | Self::I32 | Self::I64 | Self::I128 | Self::Isize
        )
    }

    /// Rank of the type in the exactness order: wider integers rank higher.
    ///
    /// Signedness does not affect the rank.
    #[inline]
    pub const fn exactness(self) -> u32 {
        self.bits()
    }

    /// `self.exactness() - reference.exactness()`.
    ///
    /// ```
    /// use vc_accessor::info::IntegerKind;
    ///
    /// assert_eq!(IntegerKind::I64.exactness_difference(IntegerKind::I32), 32);
    /// assert_eq!(IntegerKind::U32.exactness_difference(IntegerKind::I32), 0);
    /// assert!(IntegerKind::U16.exactness_difference(IntegerKind::I32) < 0);
    /// ```
    #[inline]
    pub const fn exactness_difference(self, reference: IntegerKind) -> i64 {
        self.exactness() as i64 - reference.exactness() as i64
    }
}

// -----------------------------------------------------------------------------
// FloatKind

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FloatKind {
    F32,
    F64,
}

// -----------------------------------------------------------------------------
// ShapeKind

/// What a type looks like to the accessor builders.
#[derive(Debug, Clone, Copy)]
pub enum ShapeKind {
    Unit,
    Bool,
    Char,
    Integer(IntegerKind),
    Float(FloatKind),
    Text,
    /// `Option<T>`.
    Optional(&'static TypeShape),
    /// A sequence whose length only changes by reallocation.
    ///
    /// `resizable` is `false` for `[T; N]`.
    Array {
        item: &'static TypeShape,
        resizable: bool,
    },
    /// A sequence that grows and shrinks in place.
    List { item: &'static TypeShape },
    Map {
        key: &'static TypeShape,
        value: &'static TypeShape,
    },
    /// Anything else, usually a user struct.
    Opaque,
}

// -----------------------------------------------------------------------------
// TypeShape

type DefaultFn = fn() -> Box<dyn Reflect>;
type ConvertFn = fn(&dyn Reflect) -> Option<Box<dyn Reflect>>;

/// Static description of a reflected type.
///
/// Besides identity and [`ShapeKind`], a shape optionally knows how to
/// create a default value (used to pad grown containers) and how to convert
/// a foreign value into its own type (used when writing loosely typed input).
///
/// # Examples
///
/// ```
/// use vc_accessor::info::{IntegerKind, ShapeKind, Typed};
///
/// let shape = <u16>::type_shape();
/// assert!(shape.is::<u16>());
/// assert!(matches!(shape.kind(), ShapeKind::Integer(IntegerKind::U16)));
///
/// let padding = <String>::type_shape().default_value().unwrap();
/// assert_eq!(padding.downcast_ref::<String>(), Some(&String::new()));
/// ```
pub struct TypeShape {
    type_id: TypeId,
    type_name: &'static str,
    kind: ShapeKind,
    default: Option<DefaultFn>,
    convert: Option<ConvertFn>,
}

fn boxed_default<T: Default + Reflect>() -> Box<dyn Reflect> {
    Box::new(T::default())
}

fn boxed_conversion<T: FromReflect>(value: &dyn Reflect) -> Option<Box<dyn Reflect>> {
    T::from_reflect(value).map(T::into_boxed_reflect)
}

impl TypeShape {
    /// Creates a shape for `T` without default or conversion.
    pub fn new<T: Reflect>(kind: ShapeKind) -> Self {
        Self {
            type_id: TypeId::of::<T>(),
            type_name: core::any::type_name::<T>(),
            kind,
            default: None,
            convert: None,
        }
    }

    /// Sets the function producing padding values.
    pub fn with_default(mut self, default: fn() -> Box<dyn Reflect>) -> Self {
        self.default = Some(default);
        self
    }

    /// Uses `T::default()` as padding value.
    pub fn with_default_of<T: Default + Reflect>(self) -> Self {
        self.with_default(boxed_default::<T>)
    }

    /// Converts foreign values through [`FromReflect::from_reflect`].
    pub fn with_conversion<T: FromReflect>(mut self) -> Self {
        self.convert = Some(boxed_conversion::<T>);
        self
    }

    #[inline]
    pub fn type_id(&self) -> TypeId {
        self.type_id
    }

    /// The full type path, as reported by [`core::any::type_name`].
    #[inline]
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    #[inline]
    pub fn kind(&self) -> ShapeKind {
        self.kind
    }

    #[inline]
    pub fn is<T: ?Sized + 'static>(&self) -> bool {
        self.type_id == TypeId::of::<T>()
    }

    pub fn has_default(&self) -> bool {
        self.default.is_some()
    }

    /// A fresh default value, if the type has one.
    pub fn default_value(&self) -> Option<Box<dyn Reflect>> {
        self.default.map(|default| default())
    }

    /// Converts `value` into this type without consuming it.
    ///
    /// Values that already have this type are not handled here; use
    /// [`TypeShape::coerce`] for owned input.
    pub fn convert(&self, value: &dyn Reflect) -> Option<Box<dyn Reflect>> {
        self.convert.and_then(|convert| convert(value))
    }

    /// Returns `value` as an instance of this type.
    ///
    /// The value is passed through when its type already matches, converted
    /// otherwise. The original value is handed back when neither works.
    pub fn coerce(&self, value: Box<dyn Reflect>) -> Result<Box<dyn Reflect>, Box<dyn Reflect>> {
        if value.ty_id() == self.type_id {
            return Ok(value);
        }
        self.convert(&*value).ok_or(value)
    }

    pub fn integer(&self) -> Option<IntegerKind> {
        match self.kind {
            ShapeKind::Integer(kind) => Some(kind),
            _ => None,
        }
    }

    pub fn is_integer(&self) -> bool {
        self.integer().is_some()
    }

    pub fn is_unit(&self) -> bool {
        matches!(self.kind, ShapeKind::Unit)
    }

    /// Whether the type is an array, list or map.
    pub fn is_container(&self) -> bool {
        matches!(
            self.kind,
            ShapeKind::Array { .. } | ShapeKind::List { .. } | ShapeKind::Map { .. }
        )
    }

    /// Element type of an array or list, value type of a map.
    pub fn item(&self) -> Option<&'static TypeShape> {
        match self.kind {
            ShapeKind::Array { item, .. } | ShapeKind::List { item } => Some(item),
            ShapeKind::Map { value, .. } => Some(value),
            _ => None,
        }
    }

    /// Key type of a map.
    pub fn key(&self) -> Option<&'static TypeShape> {
        match self.kind {
            ShapeKind::Map { key, .. } => Some(key),
            _ => None,
        }
    }
}

impl PartialEq for TypeShape {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.type_id == other.type_id
    }
}

impl Eq for TypeShape {}

impl fmt::Debug for TypeShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypeShape")
            .field("type_name", &self.type_name)
            .field("kind", &self.kind)
            .finish_non_exhaustive()
    }
}

impl fmt::Display for TypeShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.type_name)
    }
}
