use serde::{Deserialize, Serialize};
use std::{rc::Rc, sync::Arc};

/// The capability a value must provide in order to be stored in a [`Heap`](crate::Heap).
///
/// Lower numbers are more urgent, i.e. they are extracted first.
pub trait Priority {
    fn priority(&self) -> i64;
}

macro_rules! impl_priority_for_integer {
    ($($t:ty),*) => {
        $(
            impl Priority for $t {
                #[inline]
                fn priority(&self) -> i64 {
                    i64::from(*self)
                }
            }
        )*
    };
}

impl_priority_for_integer!(i8, i16, i32, i64, u8, u16, u32);

impl Priority for isize {
    #[inline]
    fn priority(&self) -> i64 {
        // isize is at most 64 bits on every supported target
        *self as i64
    }
}

impl<T: Priority + ?Sized> Priority for &T {
    fn priority(&self) -> i64 {
        (**self).priority()
    }
}

impl<T: Priority + ?Sized> Priority for Box<T> {
    fn priority(&self) -> i64 {
        (**self).priority()
    }
}

impl<T: Priority + ?Sized> Priority for Rc<T> {
    fn priority(&self) -> i64 {
        (**self).priority()
    }
}

impl<T: Priority + ?Sized> Priority for Arc<T> {
    fn priority(&self) -> i64 {
        (**self).priority()
    }
}

/// Attaches an explicit priority to an arbitrary payload
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Prioritized<T> {
    pub priority: i64,
    pub value: T,
}

impl<T> Prioritized<T> {
    pub fn new(priority: i64, value: T) -> Self {
        Self { priority, value }
    }

    pub fn into_value(self) -> T {
        self.value
    }
}

impl<T> Priority for Prioritized<T> {
    #[inline]
    fn priority(&self) -> i64 {
        self.priority
    }
}
