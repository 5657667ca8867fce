//! Mathematical utility functions for the dyke temperature field
//!
//! This module provides the error function and the small interpolation
//! helpers used by the evaluator and the plot transforms.

/// Assert that the deviation between two values is less than a threshold
///
/// This macro combines deviation calculation with assertion for cleaner test code.
/// It calculates the percentage deviation between `actual` and `expected`, then
/// asserts that this deviation is less than the specified `max_deviation`.
///
/// # Examples
/// See the test cases below for usage examples.
#[macro_export]
macro_rules! assert_deviation {
    ($actual:expr, $expected:expr, $max_deviation:expr) => {
        {
            let actual_val = $actual;
            let expected_val = $expected;
            let max_dev = $max_deviation;
            let actual_deviation = $crate::math_utils::deviation(actual_val, expected_val);

            if actual_deviation >= max_dev {
                panic!(
                    "assertion failed: deviation {:.2}% >= {:.2}%\n  actual: {:?},\n  expected: {:?}",
                    actual_deviation, max_dev, actual_val, expected_val
                );
            }
        }
    };
    ($actual:expr, $expected:expr, $max_deviation:expr, $($arg:tt)+) => {
        {
            let actual_val = $actual;
            let expected_val = $expected;
            let max_dev = $max_deviation;
            let actual_deviation = $crate::math_utils::deviation(actual_val, expected_val);

            if actual_deviation >= max_dev {
                panic!(
                    "assertion failed: deviation {:.2}% >= {:.2}%: {}\n  actual: {:?},\n  expected: {:?}",
                    actual_deviation, max_dev, format_args!($($arg)+), actual_val, expected_val
                );
            }
        }
    };
}

/// Gauss error function, double precision
///
/// # Examples
/// ```
/// use dyke_thermal_rust::math_utils::erf;
///
/// assert_eq!(erf(0.0), 0.0);
/// assert!((erf(1.0) - 0.8427007929497149).abs() < 1e-14);
/// assert_eq!(erf(f64::INFINITY), 1.0);
/// ```
pub fn erf(x: f64) -> f64 {
    libm::erf(x)
}

/// Linear interpolation between two values
///
/// # Arguments
/// * `a` - Start value
/// * `b` - End value
/// * `ratio` - Interpolation ratio (0.0 = a, 1.0 = b)
///
/// # Examples
/// ```
/// use dyke_thermal_rust::math_utils::lerp;
///
/// assert_eq!(lerp(0.0, 10.0, 0.5), 5.0);
/// assert_eq!(lerp(100.0, 200.0, 0.25), 125.0);
/// ```
pub fn lerp(a: f64, b: f64, ratio: f64) -> f64 {
    a + (b - a) * ratio
}

/// `count` evenly spaced values from `start` to `end`, both ends included
///
/// A count of one yields just `start`; zero yields an empty vector.
///
/// # Examples
/// ```
/// use dyke_thermal_rust::math_utils::linspace;
///
/// assert_eq!(linspace(0.0, 2500.0, 3), vec![0.0, 1250.0, 2500.0]);
/// ```
pub fn linspace(start: f64, end: f64, count: usize) -> Vec<f64> {
    match count {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let last = (count - 1) as f64;
            (0..count)
                .map(|i| {
                    if i == count - 1 {
                        end
                    } else {
                        lerp(start, end, i as f64 / last)
                    }
                })
                .collect()
        }
    }
}

/// Inverse linear interpolation - find the ratio for a given value
///
/// # Examples
/// ```
/// use dyke_thermal_rust::math_utils::inverse_lerp;
///
/// let ratio = inverse_lerp(100.0, 200.0, 150.0);
/// assert_eq!(ratio, 0.5);
/// ```
pub fn inverse_lerp(a: f64, b: f64, value: f64) -> f64 {
    if (b - a).abs() < f64::EPSILON {
        0.0 // Avoid division by zero
    } else {
        (value - a) / (b - a)
    }
}

/// Remap a value from one range to another
///
/// # Examples
/// ```
/// use dyke_thermal_rust::math_utils::remap;
///
/// // Remap 700 °C on a [0,1400] axis onto a 400 px tall plot
/// assert_eq!(remap(700.0, 0.0, 1400.0, 0.0, 400.0), 200.0);
/// ```
pub fn remap(value: f64, from_min: f64, from_max: f64, to_min: f64, to_max: f64) -> f64 {
    let ratio = inverse_lerp(from_min, from_max, value);
    lerp(to_min, to_max, ratio)
}

/// Calculate the percentage deviation between two values
///
/// Uses the expected value as the reference (base) for the percentage calculation.
///
/// # Examples
/// ```
/// use dyke_thermal_rust::math_utils::deviation;
///
/// // 105 is 5% higher than 100
/// assert_eq!(deviation(105.0, 100.0), 5.0);
///
/// // 95 is 5% lower than 100
/// assert_eq!(deviation(95.0, 100.0), 5.0);
/// ```
pub fn deviation(actual: f64, expected: f64) -> f64 {
    if expected.abs() < f64::EPSILON {
        // if expected is 0, return 0 if actual is also 0
        if actual.abs() < f64::EPSILON {
            0.0
        } else {
            f64::INFINITY
        }
    } else {
        ((actual - expected).abs() / expected.abs()) * 100.0
    }
}
