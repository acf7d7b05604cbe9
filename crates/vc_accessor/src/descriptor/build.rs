//! Turns a member table into a [`Descriptor`].
//!
//! 1. Methods are offered to the method builders; the first claim wins and
//!    a `(property, mode)` pair keeps the first accessor stored for it.
//! 2. Fields are offered to the field builders and only fill pairs that
//!    no method claimed.
//! 3. Container properties with a `GET` accessor get proxies for the
//!    element modes they still lack.

use alloc::vec::Vec;
use core::any::TypeId;

use log::{debug, trace};
use vc_utils::hash::{HashMap, HashSet};

use crate::access::{AccessError, Accessor, AccessorMode, PropertyName, ProxyOp};
use crate::builder::{BuildContext, BuildFn, Claim, FIELD_BUILDERS, METHOD_BUILDERS};
use crate::config::AccessorConfig;
use crate::descriptor::Descriptor;
use crate::descriptor::table::PropertySlot;
use crate::member::{Member, MemberKind};

// -----------------------------------------------------------------------------
// TableBuilder

struct TableBuilder {
    target: &'static str,
    /// `(first contributing member, slot)`, sorted by the former at the end.
    slots: Vec<(usize, PropertySlot)>,
    index: HashMap<PropertyName, usize>,
}

impl TableBuilder {
    fn new(target: &'static str) -> Self {
        Self {
            target,
            slots: Vec::new(),
            index: HashMap::default(),
        }
    }

    /// Stores `accessor` unless its pair is taken. Returns whether it was stored.
    fn insert(&mut self, order: usize, accessor: Accessor) -> bool {
        let position = match self.index.get(accessor.property()) {
            Some(&position) => position,
            None => {
                let name = accessor.property().clone();
                self.index.insert(name.clone(), self.slots.len());
                self.slots.push((order, PropertySlot::new(name)));
                self.slots.len() - 1
            }
        };
        let (first, slot) = &mut self.slots[position];
        *first = (*first).min(order);
        slot.insert(accessor)
    }

    /// Offers `member` to `builders`, storing what they build.
    ///
    /// With `first_claim_only`, the member stops at the first builder that
    /// claims it.
    fn offer(
        &mut self,
        cx: &BuildContext<'_>,
        order: usize,
        member: &Member,
        builders: &[(&str, BuildFn)],
        first_claim_only: bool,
    ) -> Result<(), AccessError> {
        for (builder, build) in builders {
            match build(cx, member)? {
                Claim::Built(accessor) => {
                    let (property, mode) = (accessor.property().clone(), accessor.mode());
                    if self.insert(order, accessor) {
                        trace!("`{}`: {builder} built {mode} `{property}` from `{}`", self.target, member.name());
                    } else {
                        trace!(
                            "`{}`: {mode} `{property}` from `{}` shadowed by an earlier accessor",
                            self.target,
                            member.name()
                        );
                    }
                    if first_claim_only {
                        return Ok(());
                    }
                }
                Claim::Declined(reason) => {
                    trace!("`{}`: {builder} declined `{}`: {reason}", self.target, member.name());
                }
            }
        }
        Ok(())
    }

    /// Adds proxies for the element modes container properties lack.
    fn fill_gaps(&mut self, config: &AccessorConfig) {
        for (_, slot) in &mut self.slots {
            let Some(getter) = slot.get(AccessorMode::Get).cloned() else {
                continue;
            };
            let ops = ProxyOp::for_container(container_kind(&getter));
            if ops.is_empty() {
                continue;
            }
            let setter = slot.get(AccessorMode::Set).cloned();
            for &op in ops {
                if slot.get(op.mode()).is_some() {
                    continue;
                }
                let container_setter = if op.mode().is_read() { None } else { setter.clone() };
                if let Some(proxy) = Accessor::proxy(op, getter.clone(), container_setter, config.growth) {
                    trace!("`{}`: synthesized {} `{}`", self.target, op.mode(), slot.name);
                    slot.insert(proxy);
                }
            }
        }
    }

    fn finish(mut self, type_id: TypeId) -> Descriptor {
        self.slots.sort_by_key(|(order, _)| *order);
        let slots = self.slots.into_iter().map(|(_, slot)| slot).collect();
        Descriptor::new(type_id, self.target, slots)
    }
}

fn container_kind(getter: &Accessor) -> crate::ops::ReflectKind {
    use crate::info::ShapeKind;
    use crate::ops::ReflectKind;

    match getter.property_type().kind() {
        ShapeKind::Array { .. } => ReflectKind::Array,
        ShapeKind::List { .. } => ReflectKind::List,
        ShapeKind::Map { .. } => ReflectKind::Map,
        _ => ReflectKind::Opaque,
    }
}

// -----------------------------------------------------------------------------
// Validation

/// Rejects member tables no builder could interpret consistently.
fn validate(target: &'static str, members: &[Member]) -> Result<(), AccessError> {
    let mut fields: HashSet<&str> = HashSet::default();
    for member in members {
        let malformed = |reason| AccessError::MalformedMember {
            target,
            member: member.name(),
            reason,
        };
        if member.name().is_empty() {
            return Err(malformed("empty member name"));
        }
        if member.kind() == MemberKind::Field && !fields.insert(member.name()) {
            return Err(malformed("duplicate field name"));
        }
    }
    Ok(())
}

// -----------------------------------------------------------------------------
// build

pub(crate) fn build(
    type_id: TypeId,
    target: &'static str,
    members: &[Member],
    config: &AccessorConfig,
) -> Result<Descriptor, AccessError> {
    validate(target, members)?;

    let cx = BuildContext { target, config };
    let mut table = TableBuilder::new(target);

    let visible = |member: &&Member| {
        let visible = member.visibility() >= config.min_visibility;
        if !visible {
            trace!("`{target}`: `{}` is not visible enough", member.name());
        }
        visible
    };

    for (order, member) in members.iter().enumerate() {
        if member.kind() == MemberKind::Method && visible(&member) {
            table.offer(&cx, order, member, METHOD_BUILDERS, true)?;
        }
    }
    for (order, member) in members.iter().enumerate() {
        if member.kind() == MemberKind::Field && visible(&member) {
            table.offer(&cx, order, member, FIELD_BUILDERS, false)?;
        }
    }

    table.fill_gaps(config);
    let descriptor = table.finish(type_id);
    debug!(
        "built descriptor for `{target}`: {} properties, {} accessors",
        descriptor.properties().len(),
        descriptor.len()
    );
    Ok(descriptor)
}
