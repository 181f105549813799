use rust_decimal::{Decimal, RoundingStrategy};

/// Magnitude from which fixed-decimal output falls back to plain formatting,
/// and from which plain formatting switches to exponent notation.
const FIXED_DECIMAL_LIMIT: f64 = 1e21;

/// Magnitudes below this print in exponent notation.
const SMALL_EXPONENT_LIMIT: f64 = 1e-6;

/// Formats a cell value by column key.
///
/// `volume` and `total` use 5 decimals, `price` uses 1 decimal and any other
/// key uses the shortest plain representation.
#[must_use]
pub fn format_value(value: f64, key: &str) -> String {
    match key {
        "volume" | "total" => format_fixed(value, 5),
        "price" => format_fixed(value, 1),
        _ => format_plain(value),
    }
}

/// Fixed-decimal formatting that rounds half away from zero on the exact
/// binary value, e.g. `format_fixed(0.25, 1) == "0.3"`.
#[must_use]
pub fn format_fixed(value: f64, decimals: u32) -> String {
    if !value.is_finite() || value.abs() >= FIXED_DECIMAL_LIMIT {
        return format_plain(value);
    }

    match Decimal::from_f64_retain(value) {
        Some(exact) => {
            let mut rounded =
                exact.round_dp_with_strategy(decimals, RoundingStrategy::MidpointAwayFromZero);
            rounded.rescale(decimals);
            let text = rounded.to_string();
            if rounded.is_zero() {
                // A negative value that rounds to zero keeps its sign; -0.0 does not.
                let digits = text.trim_start_matches('-');
                if value < 0.0 {
                    format!("-{digits}")
                } else {
                    digits.to_owned()
                }
            } else {
                text
            }
        }
        None => format!("{value:.prec$}", prec = decimals as usize),
    }
}

/// Shortest round-trip representation. Magnitudes below `1e-6` or from
/// `1e21` up use exponent notation with an explicit sign, e.g. `1e-7` and
/// `1.5e+21`.
#[must_use]
pub fn format_plain(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_owned();
    }
    if value.is_infinite() {
        return if value > 0.0 { "Infinity" } else { "-Infinity" }.to_owned();
    }
    if value == 0.0 {
        // Covers negative zero.
        return "0".to_owned();
    }
    let magnitude = value.abs();
    if magnitude < SMALL_EXPONENT_LIMIT || magnitude >= FIXED_DECIMAL_LIMIT {
        return format_exponent(value);
    }
    value.to_string()
}

fn format_exponent(value: f64) -> String {
    let text = format!("{value:e}");
    match text.split_once('e') {
        Some((mantissa, exponent)) if !exponent.starts_with('-') => {
            format!("{mantissa}e+{exponent}")
        }
        _ => text,
    }
}
