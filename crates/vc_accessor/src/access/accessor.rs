use alloc::boxed::Box;
use core::fmt;

use crate::access::{AccessError, AccessorMode, PropertyName, ProxyAccessor, ProxyOp};
use crate::config::GrowthPolicy;
use crate::info::TypeShape;
use crate::member::{ArgList, FieldHandle, InvokeError, MethodHandle};
use crate::{FromReflect, Reflect};

// -----------------------------------------------------------------------------
// Accessor

/// An invocable handle performing one [`AccessorMode`] on one property.
///
/// Accessors are built once per type by the
/// [`DescriptorCache`](crate::descriptor::DescriptorCache) and can be cloned
/// and shared between threads. An accessor is bound to one of:
///
/// - a method of the target type,
/// - a field of the target type,
/// - a [`ProxyAccessor`] that synthesizes the mode from another accessor
///   plus container operations.
///
/// # Invocation
///
/// [`read`](Accessor::read) only needs `&target` and serves the read modes
/// (`GET`, `GET_INDEXED`, `GET_MAPPED`, `GET_SIZE`). [`invoke`](Accessor::invoke)
/// serves every mode.
///
/// Field-backed reads return a clone of the field. Proxies that modify the
/// container of a field-backed property work on the field in place; proxies
/// over a method-backed getter work on the copy it returns and store the
/// result back through the property's setter.
#[derive(Clone)]
pub struct Accessor {
    property: PropertyName,
    mode: AccessorMode,
    property_type: &'static TypeShape,
    target: &'static str,
    binding: Binding,
}

#[derive(Clone)]
enum Binding {
    Method {
        member: &'static str,
        handle: MethodHandle,
    },
    Field {
        member: &'static str,
        handle: FieldHandle,
    },
    Proxy(Box<ProxyAccessor>),
}

/// What an [`Accessor`] is bound to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AccessorSource {
    Method,
    Field,
    Proxy,
}

impl Accessor {
    pub(crate) fn method(
        target: &'static str,
        property: PropertyName,
        mode: AccessorMode,
        property_type: &'static TypeShape,
        member: &'static str,
        handle: MethodHandle,
    ) -> Self {
        Self {
            property,
            mode,
            property_type,
            target,
            binding: Binding::Method { member, handle },
        }
    }

    pub(crate) fn field(
        target: &'static str,
        property: PropertyName,
        mode: AccessorMode,
        property_type: &'static TypeShape,
        member: &'static str,
        handle: FieldHandle,
    ) -> Self {
        Self {
            property,
            mode,
            property_type,
            target,
            binding: Binding::Field { member, handle },
        }
    }

    /// Synthesizes `op` on top of `delegate`.
    ///
    /// `None` if the delegate's property type does not fit the operation.
    pub(crate) fn proxy(
        op: ProxyOp,
        delegate: Accessor,
        container_setter: Option<Accessor>,
        growth: GrowthPolicy,
    ) -> Option<Self> {
        let property_type = op.property_type(&delegate)?;
        Some(Self {
            property: delegate.property.clone(),
            mode: op.mode(),
            property_type,
            target: delegate.target,
            binding: Binding::Proxy(Box::new(ProxyAccessor::new(
                op,
                delegate,
                container_setter,
                growth,
            ))),
        })
    }

    #[inline]
    pub fn property(&self) -> &PropertyName {
        &self.property
    }

    #[inline]
    pub fn mode(&self) -> AccessorMode {
        self.mode
    }

    /// Type of the value read or written.
    ///
    /// For element modes this is the element type, for `GET_SIZE` `usize`
    /// unless a method reports the size in another integer type.
    #[inline]
    pub fn property_type(&self) -> &'static TypeShape {
        self.property_type
    }

    /// Name of the type the accessor operates on.
    #[inline]
    pub fn target_type_name(&self) -> &'static str {
        self.target
    }

    /// Name of the field or method the accessor eventually reaches.
    pub fn member_name(&self) -> &'static str {
        match &self.binding {
            Binding::Method { member, .. } | Binding::Field { member, .. } => *member,
            Binding::Proxy(proxy) => proxy.delegate().member_name(),
        }
    }

    pub fn source(&self) -> AccessorSource {
        match self.binding {
            Binding::Method { .. } => AccessorSource::Method,
            Binding::Field { .. } => AccessorSource::Field,
            Binding::Proxy(_) => AccessorSource::Proxy,
        }
    }

    /// The proxy behind a synthesized accessor.
    pub fn as_proxy(&self) -> Option<&ProxyAccessor> {
        match &self.binding {
            Binding::Proxy(proxy) => Some(proxy),
            _ => None,
        }
    }

    /// A `GET` accessor reading element `index` through this `GET_INDEXED`
    /// accessor.
    ///
    /// `None` for accessors of any other mode.
    pub fn by_index(&self, index: usize) -> Option<Accessor> {
        if self.mode != AccessorMode::GetIndexed {
            return None;
        }
        Self::proxy(
            ProxyOp::GetByIndex(index),
            self.clone(),
            None,
            GrowthPolicy::DEFAULT,
        )
    }

    // -------------------------------------------------------------------------
    // Invocation

    /// Performs a read mode with shared access to `target`.
    ///
    /// Fails with [`AccessError::AccessDenied`] for write modes and for
    /// getters taking `&mut self`; use [`invoke`](Accessor::invoke) for those.
    pub fn read(&self, target: &dyn Reflect, args: ArgList) -> Result<Box<dyn Reflect>, AccessError> {
        if !self.mode.is_read() {
            return Err(self.denied("the mode modifies the target, use `invoke`"));
        }
        self.check_arity(&args)?;
        match &self.binding {
            Binding::Method {
                member,
                handle: MethodHandle::Shared(call),
            } => {
                let found = target.reflect_shape().type_name();
                let value = call(target, args).map_err(|err| self.invoke_error(*member, found, err))?;
                Ok(value.unwrap_or_else(|| Box::new(())))
            }
            Binding::Method {
                handle: MethodHandle::Exclusive(_),
                ..
            } => Err(self.denied("the method takes `&mut self`, use `invoke`")),
            Binding::Field { handle, .. } => clone_value(self.field_ref(handle, target)?),
            Binding::Proxy(proxy) => proxy.read(target, args),
        }
    }

    /// [`read`](Accessor::read), converting the result into `T`.
    ///
    /// ```
    /// use vc_accessor::access::AccessorMode;
    /// use vc_accessor::derive::Reflect;
    /// use vc_accessor::descriptor::DescriptorCache;
    /// use vc_accessor::args;
    ///
    /// #[derive(Reflect)]
    /// struct Counter {
    ///     pub hits: u32,
    /// }
    ///
    /// let descriptor = DescriptorCache::default().get::<Counter>().unwrap();
    /// let get = descriptor.require("hits", AccessorMode::Get).unwrap();
    ///
    /// let hits: u64 = get.read_as(&Counter { hits: 3 }, args![]).unwrap();
    /// assert_eq!(hits, 3);
    /// ```
    pub fn read_as<T: FromReflect>(&self, target: &dyn Reflect, args: ArgList) -> Result<T, AccessError> {
        let value = self.read(target, args)?;
        T::take_from_reflect(value).map_err(|value| AccessError::IncompatibleValue {
            expected: core::any::type_name::<T>(),
            found: value.reflect_shape().type_name(),
        })
    }

    /// Runs `f` on the value of a `GET` accessor.
    ///
    /// Field-backed accessors lend the field itself, so the value need not
    /// be cloneable. Getters hand `f` the value they returned.
    ///
    /// ```
    /// use vc_accessor::access::AccessorMode;
    /// use vc_accessor::derive::Reflect;
    /// use vc_accessor::descriptor::DescriptorCache;
    ///
    /// #[derive(Reflect)]
    /// struct Inner {
    ///     pub hits: u32,
    /// }
    ///
    /// #[derive(Reflect)]
    /// struct Outer {
    ///     pub inner: Inner,
    /// }
    ///
    /// let descriptor = DescriptorCache::default().get::<Outer>().unwrap();
    /// let get = descriptor.require("inner", AccessorMode::Get).unwrap();
    ///
    /// let outer = Outer { inner: Inner { hits: 3 } };
    /// let hits = get
    ///     .with_value(&outer, |inner| Ok(inner.downcast_ref::<Inner>().map(|inner| inner.hits)))
    ///     .unwrap();
    /// assert_eq!(hits, Some(3));
    /// ```
    pub fn with_value<R>(
        &self,
        target: &dyn Reflect,
        f: impl FnOnce(&dyn Reflect) -> Result<R, AccessError>,
    ) -> Result<R, AccessError> {
        if self.mode != AccessorMode::Get {
            return Err(self.denied("only `GET` accessors lend their value"));
        }
        if let Binding::Field { handle, .. } = &self.binding {
            return f(self.field_ref(handle, target)?);
        }
        let value = self.read(target, ArgList::new())?;
        f(&*value)
    }

    /// Performs the accessor's mode on `target`.
    ///
    /// Returns the value read, the previous value of a write or the removed
    /// element. `None` when the mode has no result or nothing changed.
    pub fn invoke(
        &self,
        target: &mut dyn Reflect,
        args: ArgList,
    ) -> Result<Option<Box<dyn Reflect>>, AccessError> {
        self.check_arity(&args)?;
        match &self.binding {
            Binding::Method { member, handle } => {
                let found = target.reflect_shape().type_name();
                let result = match handle {
                    MethodHandle::Shared(call) => call(&*target, args),
                    MethodHandle::Exclusive(call) => call(target, args),
                };
                result.map_err(|err| self.invoke_error(*member, found, err))
            }
            Binding::Field { member, handle } => match self.mode {
                AccessorMode::Set => self.write_field(*member, handle, target, args).map(Some),
                _ => clone_value(self.field_ref(handle, target)?).map(Some),
            },
            Binding::Proxy(proxy) => proxy.invoke(target, args),
        }
    }

    // -------------------------------------------------------------------------
    // Crate helpers

    /// [`with_value`](Self::with_value) for getters that may need `&mut self`.
    pub(crate) fn with_value_mut<R>(
        &self,
        target: &mut dyn Reflect,
        f: impl FnOnce(&dyn Reflect) -> Result<R, AccessError>,
    ) -> Result<R, AccessError> {
        if let Binding::Field { handle, .. } = &self.binding {
            return f(self.field_ref(handle, target)?);
        }
        let value = self.fetch(target)?;
        f(&*value)
    }

    /// An owned copy of the property value.
    pub(crate) fn fetch(&self, target: &mut dyn Reflect) -> Result<Box<dyn Reflect>, AccessError> {
        self.invoke(target, ArgList::new())?
            .ok_or(AccessError::IncompatibleValue {
                expected: self.property_type.type_name(),
                found: "()",
            })
    }

    /// The writable field behind a field-backed accessor.
    ///
    /// `None` for method-backed accessors and read-only fields.
    pub(crate) fn place<'t>(
        &self,
        target: &'t mut dyn Reflect,
    ) -> Option<Result<&'t mut dyn Reflect, AccessError>> {
        let Binding::Field { handle, .. } = &self.binding else {
            return None;
        };
        if !handle.is_writable() {
            return None;
        }
        let found = target.reflect_shape().type_name();
        Some(handle.get_mut(target).ok_or(AccessError::TargetMismatch {
            expected: self.target,
            found,
        }))
    }

    fn field_ref<'t>(
        &self,
        handle: &FieldHandle,
        target: &'t dyn Reflect,
    ) -> Result<&'t dyn Reflect, AccessError> {
        handle.get(target).ok_or_else(|| AccessError::TargetMismatch {
            expected: self.target,
            found: target.reflect_shape().type_name(),
        })
    }

    fn write_field(
        &self,
        member: &'static str,
        handle: &FieldHandle,
        target: &mut dyn Reflect,
        mut args: ArgList,
    ) -> Result<Box<dyn Reflect>, AccessError> {
        let found = target.reflect_shape().type_name();
        let value = args
            .take_boxed(0)
            .map_err(|err| self.invoke_error(member, found, err))?;
        let value = self
            .property_type
            .coerce(value)
            .map_err(|value| self.incompatible(&*value))?;
        let Some(place) = handle.get_mut(target) else {
            return Err(if handle.is_writable() {
                AccessError::TargetMismatch {
                    expected: self.target,
                    found,
                }
            } else {
                self.denied("the field is read-only")
            });
        };
        place.replace(value).map_err(|value| self.incompatible(&*value))
    }

    fn check_arity(&self, args: &ArgList) -> Result<(), AccessError> {
        let expected = self.mode.arity();
        if args.len() == expected {
            return Ok(());
        }
        Err(AccessError::ArityMismatch {
            property: self.property.clone(),
            mode: self.mode,
            expected,
            found: args.len(),
        })
    }

    fn denied(&self, reason: &'static str) -> AccessError {
        AccessError::AccessDenied {
            target: self.target,
            member: self.member_name(),
            reason,
        }
    }

    fn incompatible(&self, value: &dyn Reflect) -> AccessError {
        AccessError::IncompatibleValue {
            expected: self.property_type.type_name(),
            found: value.reflect_shape().type_name(),
        }
    }

    fn invoke_error(&self, member: &'static str, target: &'static str, err: InvokeError) -> AccessError {
        match err {
            InvokeError::Argument {
                expected, found, ..
            } => AccessError::IncompatibleValue { expected, found },
            InvokeError::MissingArgument { index } => AccessError::ArityMismatch {
                property: self.property.clone(),
                mode: self.mode,
                expected: self.mode.arity(),
                found: index,
            },
            InvokeError::Target { expected } => AccessError::TargetMismatch {
                expected,
                found: target,
            },
            InvokeError::Failed(source) => AccessError::InvocationFailed {
                target: self.target,
                member,
                source,
            },
        }
    }
}

pub(crate) fn clone_value(value: &dyn Reflect) -> Result<Box<dyn Reflect>, AccessError> {
    value.reflect_clone().ok_or(AccessError::NotCloneable {
        type_name: value.reflect_shape().type_name(),
    })
}

impl fmt::Debug for Accessor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Accessor")
            .field("target", &self.target)
            .field("property", &self.property)
            .field("mode", &self.mode)
            .field("property_type", &self.property_type.type_name())
            .field("source", &self.source())
            .finish()
    }
}
