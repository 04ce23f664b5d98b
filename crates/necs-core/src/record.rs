//! Fixed-size byte encoding for values stored in type-erased containers.
//!
//! The storage containers hold untyped records of a size chosen at
//! construction. [`Record`] is the bridge between those byte records and
//! Rust values: every implementor has a fixed encoded size and copies
//! itself in and out of a byte slice of exactly that size.
//!
//! Encoding uses native endianness. Records live only in memory and are
//! never persisted, so there is no portable byte order to honour.

/// A `Copy` value with a fixed-size byte encoding.
///
/// Implementations must write and read exactly [`Record::SIZE`] bytes.
/// Both methods panic if the slice is shorter than `SIZE`.
pub trait Record: Copy {
    /// Encoded size in bytes.
    const SIZE: usize;

    /// Encode `self` into the first `SIZE` bytes of `out`.
    fn write_bytes(&self, out: &mut [u8]);

    /// Decode a value from the first `SIZE` bytes of `bytes`.
    fn read_bytes(bytes: &[u8]) -> Self;

    /// Encode `self` into a freshly allocated buffer.
    fn to_bytes(&self) -> Vec<u8> {
        let mut buf = vec![0u8; Self::SIZE];
        self.write_bytes(&mut buf);
        buf
    }
}

macro_rules! impl_record_for_primitive {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Record for $ty {
                const SIZE: usize = std::mem::size_of::<$ty>();

                #[inline]
                fn write_bytes(&self, out: &mut [u8]) {
                    out[..Self::SIZE].copy_from_slice(&self.to_ne_bytes());
                }

                #[inline]
                fn read_bytes(bytes: &[u8]) -> Self {
                    let mut buf = [0u8; std::mem::size_of::<$ty>()];
                    buf.copy_from_slice(&bytes[..Self::SIZE]);
                    <$ty>::from_ne_bytes(buf)
                }
            }
        )*
    };
}

impl_record_for_primitive!(u8, u16, u32, u64, u128, i8, i16, i32, i64, i128, f32, f64);

impl Record for bool {
    const SIZE: usize = 1;

    #[inline]
    fn write_bytes(&self, out: &mut [u8]) {
        out[0] = u8::from(*self);
    }

    #[inline]
    fn read_bytes(bytes: &[u8]) -> Self {
        bytes[0] != 0
    }
}

impl<R: Record, const N: usize> Record for [R; N] {
    const SIZE: usize = R::SIZE * N;

    fn write_bytes(&self, out: &mut [u8]) {
        for (value, chunk) in self.iter().zip(out[..Self::SIZE].chunks_exact_mut(R::SIZE.max(1))) {
            value.write_bytes(chunk);
        }
    }

    fn read_bytes(bytes: &[u8]) -> Self {
        std::array::from_fn(|i| R::read_bytes(&bytes[i * R::SIZE..]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn primitive_sizes_match_memory_layout() {
        assert_eq!(<u8 as Record>::SIZE, 1);
        assert_eq!(<u32 as Record>::SIZE, 4);
        assert_eq!(<f64 as Record>::SIZE, 8);
        assert_eq!(<i128 as Record>::SIZE, 16);
        assert_eq!(<bool as Record>::SIZE, 1);
    }

    #[test]
    fn write_only_touches_leading_bytes() {
        let mut buf = [0xAAu8; 6];
        7u16.write_bytes(&mut buf);
        assert_eq!(&buf[..2], &7u16.to_ne_bytes());
        assert_eq!(&buf[2..], &[0xAA; 4]);
    }

    #[test]
    fn bool_decodes_any_nonzero_as_true() {
        assert!(bool::read_bytes(&[3]));
        assert!(!bool::read_bytes(&[0]));
    }

    #[test]
    fn array_is_concatenation_of_elements() {
        let value = [1.5f32, -2.0, 8.25];
        assert_eq!(<[f32; 3] as Record>::SIZE, 12);

        let bytes = value.to_bytes();
        let mut expected = Vec::new();
        for v in value {
            expected.extend_from_slice(&v.to_ne_bytes());
        }
        assert_eq!(bytes, expected);
        assert_eq!(<[f32; 3]>::read_bytes(&bytes), value);
    }

    #[test]
    fn empty_array_has_zero_size() {
        let value: [u32; 0] = [];
        assert_eq!(<[u32; 0] as Record>::SIZE, 0);
        assert!(value.to_bytes().is_empty());
        assert_eq!(<[u32; 0]>::read_bytes(&[]), value);
    }

    #[test]
    #[should_panic]
    fn short_slice_panics_on_read() {
        let _ = u64::read_bytes(&[0u8; 4]);
    }

    #[cfg(not(miri))]
    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn nested_arrays_decode_what_was_written(
                value in proptest::array::uniform2(proptest::array::uniform3(any::<i16>())),
            ) {
                let bytes = value.to_bytes();
                prop_assert_eq!(bytes.len(), <[[i16; 3]; 2] as Record>::SIZE);
                prop_assert_eq!(<[[i16; 3]; 2]>::read_bytes(&bytes), value);
            }
        }
    }
}
