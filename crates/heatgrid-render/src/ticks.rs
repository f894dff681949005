//! d3-array `ticks` / `tickStep` and d3-scale's default linear tick format.

const E10: f64 = 7.0710678118654755; // sqrt(50)
const E5: f64 = 3.1622776601683795; // sqrt(10)
const E2: f64 = 1.4142135623730951; // sqrt(2)

fn nice_factor(error: f64) -> f64 {
    if error >= E10 {
        10.0
    } else if error >= E5 {
        5.0
    } else if error >= E2 {
        2.0
    } else {
        1.0
    }
}

/// `(i1, i2, inc)`; a negative `inc` means the tick values are `i / -inc`.
fn tick_spec(start: f64, stop: f64, count: f64) -> Option<(i64, i64, f64)> {
    if !(count > 0.0) {
        return None;
    }
    let step = (stop - start) / count;
    if !step.is_finite() || step == 0.0 {
        return None;
    }
    let power = step.log10().floor();
    let factor = nice_factor(step / 10f64.powf(power));

    let (i1, i2, inc) = if power < 0.0 {
        let inc = 10f64.powf(-power) / factor;
        let mut i1 = (start * inc).round() as i64;
        let mut i2 = (stop * inc).round() as i64;
        if (i1 as f64) / inc < start {
            i1 += 1;
        }
        if (i2 as f64) / inc > stop {
            i2 -= 1;
        }
        (i1, i2, -inc)
    } else {
        let inc = 10f64.powf(power) * factor;
        let mut i1 = (start / inc).round() as i64;
        let mut i2 = (stop / inc).round() as i64;
        if (i1 as f64) * inc < start {
            i1 += 1;
        }
        if (i2 as f64) * inc > stop {
            i2 -= 1;
        }
        (i1, i2, inc)
    };

    if i2 < i1 && (0.5..2.0).contains(&count) {
        return tick_spec(start, stop, count * 2.0);
    }
    if !inc.is_finite() || inc == 0.0 {
        return None;
    }
    Some((i1, i2, inc))
}

/// Approximately `count` nicely rounded values in `[start, stop]`.
pub fn ticks(start: f64, stop: f64, count: usize) -> Vec<f64> {
    if !start.is_finite() || !stop.is_finite() || count == 0 {
        return Vec::new();
    }
    if start == stop {
        return vec![start];
    }

    let reverse = stop < start;
    let (a, b) = if reverse { (stop, start) } else { (start, stop) };
    let Some((i1, i2, inc)) = tick_spec(a, b, count as f64) else {
        return Vec::new();
    };
    if i2 < i1 {
        return Vec::new();
    }

    let value = |i: i64| {
        if inc < 0.0 {
            i as f64 / -inc
        } else {
            i as f64 * inc
        }
    };
    let mut out = (i1..=i2).map(value).collect::<Vec<_>>();
    if reverse {
        out.reverse();
    }
    out
}

/// The step between ticks `ticks(start, stop, count)` would produce.
pub fn tick_step(start: f64, stop: f64, count: usize) -> f64 {
    let step0 = (stop - start).abs() / (count.max(1) as f64);
    if !(step0 > 0.0) || !step0.is_finite() {
        return 0.0;
    }
    let mut step1 = 10f64.powf(step0.log10().floor());
    step1 *= nice_factor(step0 / step1);
    if stop < start { -step1 } else { step1 }
}

/// Number of fraction digits d3's `precisionFixed(step)` picks.
pub fn precision_fixed(step: f64) -> usize {
    let step = step.abs();
    if !(step > 0.0) || !step.is_finite() {
        return 0;
    }
    let exponent = step.log10().floor() as i64;
    (-exponent).max(0) as usize
}

// Enough extra digits to see past the tie digit of any f64 that is not an exact tie.
const TIE_SCAN_DIGITS: usize = 30;

/// JS `Number#toFixed(digits)`: `{:.N}`, except that an exact tie rounds away from zero.
pub fn to_fixed(value: f64, digits: usize) -> String {
    let rounded = format!("{value:.digits$}");
    if !value.is_finite() {
        return rounded;
    }

    // An exact tie has a terminating expansion whose last digit, at `digits + 1`, is 5.
    let expanded = format!("{:.*}", digits + 1 + TIE_SCAN_DIGITS, value.abs());
    let (head, tail) = expanded.split_at(expanded.len() - TIE_SCAN_DIGITS);
    if !head.ends_with('5') || tail.bytes().any(|b| b != b'0') {
        return rounded;
    }

    let half_step = 0.5 * 10f64.powi(-(digits as i32));
    let sign = if value < 0.0 { "-" } else { "" };
    format!("{sign}{:.digits$}", value.abs() + half_step)
}

/// Formats like d3-format's `,.{precision}f`: grouped thousands, U+2212 for negatives.
pub fn format_fixed_grouped(value: f64, precision: usize) -> String {
    let raw = to_fixed(value.abs(), precision);
    let (int_part, frac_part) = match raw.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (raw.as_str(), None),
    };

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let is_zero = raw.chars().all(|c| c == '0' || c == '.');
    let mut out = String::new();
    if value < 0.0 && !is_zero {
        out.push('\u{2212}');
    }
    out.push_str(&grouped);
    if let Some(frac) = frac_part {
        out.push('.');
        out.push_str(frac);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ticks_match_d3_for_integer_steps() {
        assert_eq!(ticks(2.56, 9.52, 5), vec![3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0]);
        assert_eq!(ticks(0.0, 10.0, 5), vec![0.0, 2.0, 4.0, 6.0, 8.0, 10.0]);
    }

    #[test]
    fn ticks_handle_fractional_steps_and_reversal() {
        assert_eq!(ticks(0.0, 1.0, 5), vec![0.0, 0.2, 0.4, 0.6, 0.8, 1.0]);
        assert_eq!(ticks(1.0, 0.0, 2), vec![1.0, 0.5, 0.0]);
        assert_eq!(ticks(3.0, 3.0, 5), vec![3.0]);
    }

    #[test]
    fn step_and_precision() {
        assert_eq!(tick_step(2.56, 9.52, 5), 1.0);
        assert_eq!(tick_step(0.0, 1.0, 5), 0.2);
        assert_eq!(precision_fixed(1.0), 0);
        assert_eq!(precision_fixed(0.2), 1);
        assert_eq!(precision_fixed(0.05), 2);
    }

    #[test]
    fn to_fixed_rounds_exact_ties_up() {
        assert_eq!(8.66 + -6.535, 2.125);
        assert_eq!(to_fixed(8.66 + -6.535, 2), "2.13");
        assert_eq!(to_fixed(8.66 + -6.035, 2), "2.63");
        assert_eq!(to_fixed(-2.125, 2), "-2.13");
        assert_eq!(to_fixed(0.5, 0), "1");
        assert_eq!(to_fixed(2.5, 0), "3");
    }

    #[test]
    fn to_fixed_keeps_nearest_rounding_off_ties() {
        assert_eq!(to_fixed(8.66 + -6.1, 2), "2.56");
        assert_eq!(to_fixed(9.123, 2), "9.12");
        // 1.005 is stored just below the tie.
        assert_eq!(to_fixed(1.005, 2), "1.00");
        assert_eq!(to_fixed(2.0, 2), "2.00");
    }

    #[test]
    fn grouped_fixed_format() {
        assert_eq!(format_fixed_grouped(3.0, 0), "3");
        assert_eq!(format_fixed_grouped(0.4, 1), "0.4");
        assert_eq!(format_fixed_grouped(-2.5, 1), "\u{2212}2.5");
        assert_eq!(format_fixed_grouped(-0.0, 0), "0");
        assert_eq!(format_fixed_grouped(12345.0, 0), "12,345");
        assert_eq!(format_fixed_grouped(-0.25, 1), "\u{2212}0.3");
    }
}
