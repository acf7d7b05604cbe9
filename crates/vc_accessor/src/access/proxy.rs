use alloc::boxed::Box;
use core::fmt;

use log::trace;

use crate::Reflect;
use crate::access::accessor::clone_value;
use crate::access::{AccessError, Accessor, AccessorMode};
use crate::config::GrowthPolicy;
use crate::info::{TypeShape, Typed};
use crate::member::ArgList;
use crate::ops::ReflectKind;
use crate::ops::container::{self, Update};

// -----------------------------------------------------------------------------
// ProxyOp

/// The container operation a [`ProxyAccessor`] performs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProxyOp {
    GetIndexed,
    SetIndexed,
    Add,
    Remove,
    GetMapped,
    SetMapped,
    GetSize,
    /// `GET` of one fixed element, through a `GET_INDEXED` accessor.
    GetByIndex(usize),
}

impl ProxyOp {
    pub const fn mode(self) -> AccessorMode {
        match self {
            Self::GetIndexed => AccessorMode::GetIndexed,
            Self::SetIndexed => AccessorMode::SetIndexed,
            Self::Add => AccessorMode::Add,
            Self::Remove => AccessorMode::Remove,
            Self::GetMapped => AccessorMode::GetMapped,
            Self::SetMapped => AccessorMode::SetMapped,
            Self::GetSize => AccessorMode::GetSize,
            Self::GetByIndex(_) => AccessorMode::Get,
        }
    }

    /// The operations synthesized for a container of the given kind.
    pub const fn for_container(kind: ReflectKind) -> &'static [ProxyOp] {
        match kind {
            ReflectKind::Array | ReflectKind::List => &[
                Self::GetIndexed,
                Self::SetIndexed,
                Self::Add,
                Self::Remove,
                Self::GetSize,
            ],
            ReflectKind::Map => &[Self::GetMapped, Self::SetMapped, Self::Remove, Self::GetSize],
            ReflectKind::Opaque => &[],
        }
    }

    /// Type of the value the proxy reads or writes.
    pub(crate) fn property_type(self, delegate: &Accessor) -> Option<&'static TypeShape> {
        let container = delegate.property_type();
        match self {
            Self::GetByIndex(_) => (delegate.mode() == AccessorMode::GetIndexed)
                .then(|| delegate.property_type()),
            Self::GetSize => container.is_container().then(usize::type_shape),
            Self::Remove if container.key().is_some() => container.key(),
            _ => container.item(),
        }
    }
}

// -----------------------------------------------------------------------------
// ProxyAccessor

/// Synthesizes an accessor mode from a delegate accessor plus container
/// operations.
///
/// The delegate is the property's `GET` accessor (for `GetByIndex`, a
/// `GET_INDEXED` accessor). Modifications are applied in place when the
/// delegate is a writable field. Otherwise the proxy modifies the copy the
/// getter returned and stores it back through `container_setter`, failing
/// with [`AccessError::ContainerWriteImpossible`] if there is none.
#[derive(Clone)]
pub struct ProxyAccessor {
    op: ProxyOp,
    delegate: Accessor,
    container_setter: Option<Accessor>,
    growth: GrowthPolicy,
}

impl ProxyAccessor {
    pub(crate) fn new(
        op: ProxyOp,
        delegate: Accessor,
        container_setter: Option<Accessor>,
        growth: GrowthPolicy,
    ) -> Self {
        Self {
            op,
            delegate,
            container_setter,
            growth,
        }
    }

    #[inline]
    pub fn op(&self) -> ProxyOp {
        self.op
    }

    #[inline]
    pub fn delegate(&self) -> &Accessor {
        &self.delegate
    }

    #[inline]
    pub fn container_setter(&self) -> Option<&Accessor> {
        self.container_setter.as_ref()
    }

    pub(crate) fn read(&self, target: &dyn Reflect, mut args: ArgList) -> Result<Box<dyn Reflect>, AccessError> {
        match self.op {
            ProxyOp::GetIndexed | ProxyOp::GetMapped => {
                let key = self.argument(&mut args, 0)?;
                self.delegate
                    .with_value(target, |value| clone_value(container::get(value, &*key)?))
            }
            ProxyOp::GetSize => self.delegate.with_value(target, |value| {
                Ok(Box::new(container::size(value)?) as Box<dyn Reflect>)
            }),
            ProxyOp::GetByIndex(index) => self.delegate.read(target, ArgList::new().with(index)),
            ProxyOp::SetIndexed | ProxyOp::SetMapped | ProxyOp::Add | ProxyOp::Remove => {
                unreachable!("write proxies are never read")
            }
        }
    }

    pub(crate) fn invoke(
        &self,
        target: &mut dyn Reflect,
        mut args: ArgList,
    ) -> Result<Option<Box<dyn Reflect>>, AccessError> {
        let growth = self.growth;
        match self.op {
            ProxyOp::SetIndexed | ProxyOp::SetMapped => {
                let key = self.argument(&mut args, 0)?;
                let value = self.argument(&mut args, 1)?;
                self.mutate(target, |held| container::set(held, key, value, &growth))
            }
            ProxyOp::Add => {
                let value = self.argument(&mut args, 0)?;
                self.mutate(target, |held| container::add(held, value, &growth))
            }
            ProxyOp::Remove => {
                let value = self.argument(&mut args, 0)?;
                self.mutate(target, |held| container::remove(held, &*value))
            }
            ProxyOp::GetIndexed | ProxyOp::GetMapped => {
                let key = self.argument(&mut args, 0)?;
                self.delegate
                    .with_value_mut(target, |value| clone_value(container::get(value, &*key)?))
                    .map(Some)
            }
            ProxyOp::GetSize => self
                .delegate
                .with_value_mut(target, |value| {
                    Ok(Box::new(container::size(value)?) as Box<dyn Reflect>)
                })
                .map(Some),
            ProxyOp::GetByIndex(index) => self.delegate.invoke(target, ArgList::new().with(index)),
        }
    }

    /// Applies `op` to the container and makes the result visible in `target`.
    fn mutate(
        &self,
        target: &mut dyn Reflect,
        op: impl FnOnce(&mut dyn Reflect) -> Result<Update, AccessError>,
    ) -> Result<Option<Box<dyn Reflect>>, AccessError> {
        if let Some(place) = self.delegate.place(target) {
            let place = place?;
            return match op(&mut *place)? {
                Update::Unchanged => Ok(None),
                Update::InPlace(previous) => Ok(previous),
                Update::Reallocated {
                    previous,
                    container,
                } => {
                    place.replace(container).map_err(|rejected| {
                        AccessError::IncompatibleValue {
                            expected: self.delegate.property_type().type_name(),
                            found: rejected.reflect_shape().type_name(),
                        }
                    })?;
                    Ok(previous)
                }
            };
        }

        let mut copy = self.delegate.fetch(target)?;
        let (previous, container) = match op(&mut *copy)? {
            Update::Unchanged => return Ok(None),
            Update::InPlace(previous) => (previous, copy),
            Update::Reallocated {
                previous,
                container,
            } => (previous, container),
        };
        self.publish(target, container)?;
        Ok(previous)
    }

    fn publish(&self, target: &mut dyn Reflect, container: Box<dyn Reflect>) -> Result<(), AccessError> {
        let Some(setter) = &self.container_setter else {
            return Err(AccessError::ContainerWriteImpossible {
                target: self.delegate.target_type_name(),
                property: self.delegate.property().clone(),
            });
        };
        trace!(
            "storing `{}` of `{}` back through `{}`",
            self.delegate.property(),
            self.delegate.target_type_name(),
            setter.member_name(),
        );
        setter.invoke(target, ArgList::new().with_boxed(container))?;
        Ok(())
    }

    fn argument(&self, args: &mut ArgList, index: usize) -> Result<Box<dyn Reflect>, AccessError> {
        args.take_boxed(index)
            .map_err(|_| AccessError::ArityMismatch {
                property: self.delegate.property().clone(),
                mode: self.op.mode(),
                expected: self.op.mode().arity(),
                found: index,
            })
    }
}

impl fmt::Debug for ProxyAccessor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProxyAccessor")
            .field("op", &self.op)
            .field("delegate", &self.delegate)
            .field("container_setter", &self.container_setter)
            .finish()
    }
}
