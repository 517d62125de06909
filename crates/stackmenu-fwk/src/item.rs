//! Type-erased payloads for menu items and the return channel.
//!
//! Frames carry client-defined items and hand client-defined results back
//! up the stack. Both sides agree on the concrete type, so the engine moves
//! them around as erased `Any` payloads with checked downcasting.

use std::any::Any;
use std::fmt;
use std::sync::Arc;

/// A cheap-to-clone handle to one client-defined menu item.
///
/// Templates are copied on every push, so items are shared read-only
/// between the template and each pushed frame instance.
#[derive(Clone)]
pub struct MenuItem {
    payload: Arc<dyn Any + Send + Sync>,
}

impl MenuItem {
    /// Wrap a value as a menu item.
    pub fn new<T: Any + Send + Sync>(value: T) -> Self {
        Self {
            payload: Arc::new(value),
        }
    }

    /// Try to get a reference to the item as a specific type.
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.payload.downcast_ref()
    }

    /// Check whether the item holds a value of a specific type.
    pub fn is<T: Any>(&self) -> bool {
        self.payload.is::<T>()
    }
}

impl fmt::Debug for MenuItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MenuItem").finish_non_exhaustive()
    }
}

/// An owned value travelling on the return stack.
///
/// `pop_return` yields `Option<ReturnValue>`, so an empty stack is always
/// distinguishable from a stored value; there is no representable "null"
/// payload.
pub struct ReturnValue {
    payload: Box<dyn Any + Send>,
}

impl ReturnValue {
    /// Wrap a value for the return stack.
    pub fn new<T: Any + Send>(value: T) -> Self {
        Self {
            payload: Box::new(value),
        }
    }

    /// Try to downcast the value to a specific type.
    pub fn downcast<T: Any + Send>(self) -> Result<T, Self> {
        match self.payload.downcast::<T>() {
            Ok(value) => Ok(*value),
            Err(payload) => Err(Self { payload }),
        }
    }

    /// Try to get a reference to the value as a specific type.
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.payload.downcast_ref()
    }
}

impl fmt::Debug for ReturnValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReturnValue").finish_non_exhaustive()
    }
}
