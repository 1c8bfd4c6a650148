use hostreduce::{ElementType, LocalTopology, PeerGroup};
use proptest::prelude::*;

use super::helpers::{always_parallel, from_bytes, reducer_with, to_bytes};

fn check_sum<T, F>(
    dtype: ElementType,
    a: &[T],
    b: &[T],
    threads: usize,
    add: F,
) -> Result<(), TestCaseError>
where
    T: super::helpers::NeBytes + PartialEq + std::fmt::Debug,
    F: Fn(T, T) -> T,
{
    let r = reducer_with(0, 1, 1, always_parallel(threads));
    let n = a.len().min(b.len());
    let mut dst = to_bytes(&a[..n]);
    let src = to_bytes(&b[..n]);
    r.sum(&mut dst, &src, dtype).unwrap();

    let got = from_bytes::<T>(&dst);
    for i in 0..n {
        prop_assert_eq!(got[i], add(a[i], b[i]));
    }
    prop_assert_eq!(from_bytes::<T>(&src), b[..n].to_vec());
    Ok(())
}

proptest! {
    /// Every whole element ends up as the native sum of the two inputs.
    #[test]
    fn u8_sum_wraps(a in prop::collection::vec(any::<u8>(), 0..2000),
                    b in prop::collection::vec(any::<u8>(), 0..2000),
                    threads in 1usize..6) {
        check_sum(ElementType::U8, &a, &b, threads, u8::wrapping_add)?;
    }

    #[test]
    fn i8_sum_wraps(a in prop::collection::vec(any::<i8>(), 0..2000),
                    b in prop::collection::vec(any::<i8>(), 0..2000),
                    threads in 1usize..6) {
        check_sum(ElementType::I8, &a, &b, threads, i8::wrapping_add)?;
    }

    #[test]
    fn i32_sum_wraps(a in prop::collection::vec(any::<i32>(), 0..1000),
                     b in prop::collection::vec(any::<i32>(), 0..1000),
                     threads in 1usize..6) {
        check_sum(ElementType::I32, &a, &b, threads, i32::wrapping_add)?;
    }

    #[test]
    fn i64_sum_wraps(a in prop::collection::vec(any::<i64>(), 0..1000),
                     b in prop::collection::vec(any::<i64>(), 0..1000),
                     threads in 1usize..6) {
        check_sum(ElementType::I64, &a, &b, threads, i64::wrapping_add)?;
    }

    #[test]
    fn f32_sum_is_ieee(a in prop::collection::vec(-1e30f32..1e30, 0..1000),
                       b in prop::collection::vec(-1e30f32..1e30, 0..1000),
                       threads in 1usize..6) {
        check_sum(ElementType::F32, &a, &b, threads, |x, y| x + y)?;
    }

    #[test]
    fn f64_sum_is_ieee(a in prop::collection::vec(-1e300f64..1e300, 0..1000),
                       b in prop::collection::vec(-1e300f64..1e300, 0..1000),
                       threads in 1usize..6) {
        check_sum(ElementType::F64, &a, &b, threads, |x, y| x + y)?;
    }

    /// Bytes past the last whole element keep their value.
    #[test]
    fn trailing_bytes_preserved(extra in 1usize..8, fill in any::<u8>(), code in 0u8..7) {
        let dtype = ElementType::from_code(code).unwrap();
        let width = dtype.kernel_width();
        let extra = extra % width;
        let len = width * 17 + extra;
        let r = reducer_with(0, 1, 1, always_parallel(3));
        let mut dst = vec![fill; len];
        let src = vec![0x3Fu8; len];
        r.sum(&mut dst, &src, dtype).unwrap();
        prop_assert!(dst[width * 17..].iter().all(|&x| x == fill));
    }

    /// A rank's group is every local rank congruent to it modulo the switch size.
    #[test]
    fn peer_group_membership(local_size in 1u32..64, switch in 1u32..16, seed in any::<u32>()) {
        let rank = seed % local_size;
        let g = PeerGroup::for_topology(&LocalTopology::new(rank, local_size, switch)).unwrap();
        let expected: Vec<u32> = (0..local_size).filter(|r| r % switch == rank % switch).collect();
        prop_assert_eq!(g.members(), &expected[..]);
        prop_assert_eq!(g.lowest(), Some(rank % switch));
    }
}
