// Copyright 2020 Xavier Gillard
//
// Permission is hereby granted, free of charge, to any person obtaining a copy of
// this software and associated documentation files (the "Software"), to deal in
// the Software without restriction, including without limitation the rights to
// use, copy, modify, merge, publish, distribute, sublicense, and/or sell copies of
// the Software, and to permit persons to whom the Software is furnished to do so,
// subject to the following conditions:
//
// The above copyright notice and this permission notice shall be included in all
// copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
// IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY, FITNESS
// FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR
// COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER
// IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN
// CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

//! Computes the apparent elevation angle of every point from the observer at
//! index 0, seeding the prefix-max workspace with the same values.

use crate::common::NEG_INF;
use crate::region::SharedRegion;

/// Fills `angles[i]` and `scan[i]` for every `i` in `block`, the rank's own
/// slice of the partition.
///
/// `angles[0] = scan[0] = NEG_INF` (the identity, by construction: there is
/// no angle before the observer). For `i >= 1`, `angles[i] = atan((h[i] -
/// h[0]) / i)`, computed in single precision after promoting the integer
/// numerator.
pub fn compute_angles(
    h: &[i64],
    block: std::ops::Range<usize>,
    angles: &SharedRegion<f32>,
    scan: &SharedRegion<f32>,
) {
    let h0 = h[0];
    for i in block {
        let a = if i == 0 {
            NEG_INF
        } else {
            let delta = (h[i] - h0) as f32;
            (delta / i as f32).atan()
        };
        angles.write(i, a);
        scan.write(i, a);
    }
}

#[cfg(test)]
mod test_angle {
    use super::*;

    #[test]
    fn observer_is_the_identity() {
        let h = [5i64, 8, 1];
        let angles = SharedRegion::new(vec![0.0f32; 3].into_boxed_slice());
        let scan = SharedRegion::new(vec![0.0f32; 3].into_boxed_slice());
        compute_angles(&h, 0..3, &angles, &scan);
        assert_eq!(angles.get(0), NEG_INF);
        assert_eq!(scan.get(0), NEG_INF);
    }

    #[test]
    fn angle_matches_formula() {
        let h = [2i64, 4, 6, 8];
        let angles = SharedRegion::new(vec![0.0f32; 4].into_boxed_slice());
        let scan = SharedRegion::new(vec![0.0f32; 4].into_boxed_slice());
        compute_angles(&h, 0..4, &angles, &scan);
        for i in 1..4 {
            let expected = ((h[i] - h[0]) as f32 / i as f32).atan();
            assert_eq!(angles.get(i), expected);
            assert_eq!(scan.get(i), expected);
        }
    }

    #[test]
    fn negative_deltas_give_negative_angles() {
        let h = [10i64, 3, 5];
        let angles = SharedRegion::new(vec![0.0f32; 3].into_boxed_slice());
        let scan = SharedRegion::new(vec![0.0f32; 3].into_boxed_slice());
        compute_angles(&h, 0..3, &angles, &scan);
        assert!(angles.get(1) < 0.0);
    }

    #[test]
    fn a_rank_only_touches_its_own_block() {
        let h = [0i64, 1, 2, 3, 4];
        let angles = SharedRegion::new(vec![f32::NAN; 5].into_boxed_slice());
        let scan = SharedRegion::new(vec![f32::NAN; 5].into_boxed_slice());
        compute_angles(&h, 2..4, &angles, &scan);
        assert!(angles.get(0).is_nan());
        assert!(angles.get(1).is_nan());
        assert!(!angles.get(2).is_nan());
        assert!(!angles.get(3).is_nan());
        assert!(angles.get(4).is_nan());
    }
}
