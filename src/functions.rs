#[allow(unused_imports)]
use num_traits::Float;

/// Wrap the value of `num` such that it lies between `[min,max)` (i.e. min <= num < max)
pub fn wrap<T: Float>(mut num: T, min: T, max: T) -> T {
    debug_assert!(min < max, "Invalid wrapping bounds");
    let width = max - min;

    // Arithmetic reduction: a subtract-in-a-loop cannot make progress
    // once `num - width` rounds back to `num`. The second pass absorbs
    // the rounding residue the first leaves at large magnitudes.
    num = num - ((num - min) / width).floor() * width;
    num = num - ((num - min) / width).floor() * width;

    // Astronomical inputs can still carry a residue outside the range;
    // the value holds no angular information at that point
    if num < min || num >= max {
        num = min;
    }
    num
}
