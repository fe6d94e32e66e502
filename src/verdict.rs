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

//! Turns the angle array and its exclusive prefix-max into a visibility
//! verdict: a point is visible iff its angle strictly exceeds every angle
//! that came before it. Ties are not visible.

use crate::region::SharedRegion;

/// Fills `visible[i]` for every `i` in `block` (the rank's own slice of the
/// partition) with `angles[i] > scan[i]`. The observer (index 0) is never
/// written here; the caller (or the emitter) is responsible for rendering
/// it separately.
pub fn compute_verdict(
    block: std::ops::Range<usize>,
    angles: &SharedRegion<f32>,
    scan: &SharedRegion<f32>,
    visible: &SharedRegion<bool>,
) {
    for i in block {
        if i == 0 {
            continue;
        }
        visible.write(i, angles.get(i) > scan.get(i));
    }
}

#[cfg(test)]
mod test_verdict {
    use super::*;

    #[test]
    fn strictly_greater_is_visible_ties_are_not() {
        let angles = SharedRegion::new(vec![f32::MIN, 1.0, 1.0, 2.0].into_boxed_slice());
        let scan = SharedRegion::new(vec![f32::MIN, f32::MIN, 1.0, 1.0].into_boxed_slice());
        let visible = SharedRegion::new(vec![false; 4].into_boxed_slice());
        compute_verdict(0..4, &angles, &scan, &visible);
        assert_eq!(visible.get(1), true);
        assert_eq!(visible.get(2), false);
        assert_eq!(visible.get(3), true);
    }

    #[test]
    fn observer_index_is_left_untouched() {
        let angles = SharedRegion::new(vec![0.0, 1.0].into_boxed_slice());
        let scan = SharedRegion::new(vec![0.0, f32::MIN].into_boxed_slice());
        let visible = SharedRegion::new(vec![true, false].into_boxed_slice());
        compute_verdict(0..2, &angles, &scan, &visible);
        // index 0 untouched: still whatever it was initialized to.
        assert_eq!(visible.get(0), true);
        assert_eq!(visible.get(1), true);
    }
}
