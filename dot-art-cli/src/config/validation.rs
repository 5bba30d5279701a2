//! Setting value validation.

use dot_art::{ColorScheme, DotStyle};

/// Validate a setting value. Returns `Ok(())` if valid, or an error message.
pub fn validate_setting(key: &str, value: &str) -> Result<(), String> {
    match key {
        "DOT_ART_PIXEL_SIZE_MM" => validate_float_range(value, 0.1, 297.0)?,
        "DOT_ART_GRID_SIZE" => validate_int_range(value, 0, 4096)?,
        "DOT_ART_TOTAL_BANDS" => validate_int_range(value, 1, 255)?,
        "DOT_ART_DOT_SIZE_MULTIPLIER" => validate_float_range(value, 0.01, 10.0)?,
        "DOT_ART_MAX_SOURCE_SIZE" => validate_int_range(value, 1, 16384)?,
        "DOT_ART_DOT_STYLE" => {
            value.parse::<DotStyle>().map_err(|e| e.to_string())?;
        }
        "DOT_ART_COLOR_SCHEME" => {
            value.parse::<ColorScheme>().map_err(|e| e.to_string())?;
        }
        k if is_boolean_setting(k) => {
            if value != "true" && value != "false" {
                return Err("must be 'true' or 'false'".into());
            }
        }
        _ => {}
    }
    Ok(())
}

fn validate_int_range(value: &str, min: i64, max: i64) -> Result<(), String> {
    let v: i64 = value.parse().map_err(|_| "must be an integer")?;
    if v < min || v > max {
        return Err(format!("must be between {min} and {max}"));
    }
    Ok(())
}

fn validate_float_range(value: &str, min: f64, max: f64) -> Result<(), String> {
    let v: f64 = value.parse().map_err(|_| "must be a number")?;
    if !(min..=max).contains(&v) {
        return Err(format!("must be between {min} and {max}"));
    }
    Ok(())
}

fn is_boolean_setting(key: &str) -> bool {
    matches!(key, "DOT_ART_STAMP_ROTATION")
}
