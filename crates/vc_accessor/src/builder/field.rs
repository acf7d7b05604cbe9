use crate::access::{AccessError, Accessor, AccessorMode, PropertyName};
use crate::builder::{BuildContext, Claim, Decline, declined};
use crate::member::Member;

fn field_accessor(
    cx: &BuildContext<'_>,
    member: &Member,
    mode: AccessorMode,
) -> Result<Claim, AccessError> {
    let Some(handle) = member.field_handle() else {
        return declined(Decline::MemberKind);
    };
    if mode == AccessorMode::Set && !handle.is_writable() {
        return declined(Decline::Inaccessible);
    }
    let malformed = |reason| AccessError::MalformedMember {
        target: cx.target,
        member: member.name(),
        reason,
    };
    let property = PropertyName::new(member.name()).ok_or_else(|| malformed("empty field name"))?;
    let shape = member.output().ok_or_else(|| malformed("field without a type"))?;
    Ok(Claim::Built(Accessor::field(
        cx.target,
        property,
        mode,
        shape,
        member.name(),
        handle,
    )))
}

/// `GET` of a field, named after the field.
pub fn field_get(cx: &BuildContext<'_>, member: &Member) -> Result<Claim, AccessError> {
    field_accessor(cx, member, AccessorMode::Get)
}

/// `SET` of a writable field.
pub fn field_set(cx: &BuildContext<'_>, member: &Member) -> Result<Claim, AccessError> {
    field_accessor(cx, member, AccessorMode::Set)
}
