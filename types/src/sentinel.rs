use std::ptr;

/// Value handed back by a boundary call whose callable failed.
///
/// The sentinel can collide with a legitimate result, so it only means
/// something together with the adapter's failure flag.
pub trait Sentinel {
    fn sentinel() -> Self;
}

impl Sentinel for () {
    fn sentinel() -> Self {}
}

impl Sentinel for bool {
    fn sentinel() -> Self {
        false
    }
}

macro_rules! impl_sentinel {
    ($value:expr => $($ty:ty),+) => {
        $(
            impl Sentinel for $ty {
                #[inline]
                fn sentinel() -> Self {
                    $value
                }
            }
        )+
    };
}

impl_sentinel!(-1 => i8, i16, i32, i64, i128, isize);
// -1 reinterpreted as unsigned: all bits set.
impl_sentinel!(!0 => u8, u16, u32, u64, u128, usize);
impl_sentinel!(-1.0 => f32, f64);

impl<T> Sentinel for *const T {
    fn sentinel() -> Self {
        ptr::null()
    }
}

impl<T> Sentinel for *mut T {
    fn sentinel() -> Self {
        ptr::null_mut()
    }
}

impl<T> Sentinel for Option<T> {
    fn sentinel() -> Self {
        None
    }
}
