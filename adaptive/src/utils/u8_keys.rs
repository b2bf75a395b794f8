//! Search helpers over the sorted key arrays of Node4 / Node16.

#[cfg(all(feature = "simd_keys", target_arch = "x86_64", target_feature = "sse2"))]
#[inline]
fn x86_64_sse_find_key_16(key: u8, keys: &[u8; 16], num_children: usize) -> Option<usize> {
    use std::arch::x86_64::{
        __m128i, _mm_cmpeq_epi8, _mm_loadu_si128, _mm_movemask_epi8, _mm_set1_epi8,
    };

    let bitfield = unsafe {
        let key_vec = _mm_set1_epi8(key as i8);
        let results = _mm_cmpeq_epi8(key_vec, _mm_loadu_si128(keys.as_ptr() as *const __m128i));
        // Lanes past num_children hold stale bytes, mask them out.
        let mask = (1i32 << num_children) - 1;
        _mm_movemask_epi8(results) & mask
    };
    if bitfield != 0 {
        return Some(bitfield.trailing_zeros() as usize);
    }
    None
}

#[cfg(all(feature = "simd_keys", target_arch = "aarch64", target_feature = "neon"))]
#[inline]
fn aarch64_neon_find_key_16(key: u8, keys: &[u8; 16], num_children: usize) -> Option<usize> {
    use std::arch::aarch64::*;
    unsafe {
        let key_vec = vdupq_n_u8(key);
        let node_keys_vec = vld1q_u8(keys.as_ptr());
        // 0xFF in each lane equal to the key, 0x00 elsewhere.
        let cmp_vec = vceqq_u8(key_vec, node_keys_vec);

        // No movemask on NEON: narrow each lane to 4 bits and read the result as one u64.
        let eq_mask = vreinterpretq_u16_u8(cmp_vec);
        let res = vshrn_n_u16::<4>(eq_mask);
        let matches = vget_lane_u64::<0>(vreinterpret_u64_u8(res));

        if matches != 0 {
            let idx = (matches.trailing_zeros() >> 2) as usize;
            if idx < num_children {
                return Some(idx);
            }
        }
        None
    }
}

/// Position of `key` within the first `num_children` entries of a sorted key array.
#[allow(unreachable_code)]
pub fn u8_keys_find_key_position_sorted<const WIDTH: usize>(
    key: u8,
    keys: &[u8; WIDTH],
    num_children: usize,
) -> Option<usize> {
    // Width 4 and under, just use linear search.
    if WIDTH <= 4 {
        return (0..num_children).find(|&i| keys[i] == key);
    }

    if WIDTH == 16 {
        #[cfg(all(feature = "simd_keys", target_arch = "x86_64", target_feature = "sse2"))]
        {
            if let Ok(keys16) = <&[u8; 16]>::try_from(&keys[..]) {
                return x86_64_sse_find_key_16(key, keys16, num_children);
            }
        }

        #[cfg(all(feature = "simd_keys", target_arch = "aarch64", target_feature = "neon"))]
        {
            if let Ok(keys16) = <&[u8; 16]>::try_from(&keys[..]) {
                return aarch64_neon_find_key_16(key, keys16, num_children);
            }
        }
    }

    binary_find_key(key, &keys[..num_children])
}

fn binary_find_key(key: u8, keys: &[u8]) -> Option<usize> {
    keys.binary_search(&key).ok()
}

/// Index at which `key` must be inserted to keep the first `num_children` entries sorted.
pub fn u8_keys_find_insert_position_sorted<const WIDTH: usize>(
    key: u8,
    keys: &[u8; WIDTH],
    num_children: usize,
) -> usize {
    keys[..num_children]
        .iter()
        .position(|&k| key < k)
        .unwrap_or(num_children)
}

#[cfg(test)]
mod tests {
    use crate::utils::u8_keys::{
        u8_keys_find_insert_position_sorted, u8_keys_find_key_position_sorted,
    };

    #[test]
    fn test_find_key_4() {
        let keys = [1, 3, 200, 0];
        assert_eq!(u8_keys_find_key_position_sorted(3, &keys, 3), Some(1));
        assert_eq!(u8_keys_find_key_position_sorted(200, &keys, 3), Some(2));
        // Slot 3 is past the live entries.
        assert_eq!(u8_keys_find_key_position_sorted(0, &keys, 3), None);
    }

    #[test]
    fn test_find_key_16() {
        let mut keys = [0u8; 16];
        for (i, k) in keys.iter_mut().enumerate() {
            *k = (i as u8) * 16;
        }
        for i in 0..16 {
            assert_eq!(
                u8_keys_find_key_position_sorted(i as u8 * 16, &keys, 16),
                Some(i)
            );
        }
        assert_eq!(u8_keys_find_key_position_sorted(1, &keys, 16), None);
        // High bytes compare correctly despite the signed SIMD lanes.
        assert_eq!(u8_keys_find_key_position_sorted(240, &keys, 16), Some(15));
        assert_eq!(u8_keys_find_key_position_sorted(240, &keys, 15), None);
    }

    #[test]
    fn test_insert_position() {
        let keys = [10, 20, 250, 0];
        assert_eq!(u8_keys_find_insert_position_sorted(5, &keys, 3), 0);
        assert_eq!(u8_keys_find_insert_position_sorted(15, &keys, 3), 1);
        assert_eq!(u8_keys_find_insert_position_sorted(251, &keys, 3), 3);
        assert_eq!(u8_keys_find_insert_position_sorted(130, &keys, 3), 2);
        assert_eq!(u8_keys_find_insert_position_sorted(1, &keys, 0), 0);
    }
}
