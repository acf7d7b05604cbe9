use alloc::sync::Arc;
use core::error::Error;

use thiserror::Error;

/// Failure reported by a member handle.
///
/// Accessors translate it into an [`AccessError`](crate::access::AccessError)
/// that names the target type and property.
#[derive(Debug, Clone, Error)]
pub enum InvokeError {
    #[error("argument {index} should be `{expected}`, found `{found}`")]
    Argument {
        index: usize,
        expected: &'static str,
        found: &'static str,
    },
    #[error("argument {index} is missing")]
    MissingArgument { index: usize },
    #[error("target is not a `{expected}`")]
    Target { expected: &'static str },
    #[error(transparent)]
    Failed(Arc<dyn Error + Send + Sync>),
}

impl InvokeError {
    /// Target mismatch for a handle expecting `T`.
    #[inline]
    pub fn target<T: ?Sized>() -> Self {
        Self::Target {
            expected: core::any::type_name::<T>(),
        }
    }

    /// Wraps an error raised by the member itself.
    pub fn failed<E: Error + Send + Sync + 'static>(error: E) -> Self {
        Self::Failed(Arc::new(error))
    }
}
