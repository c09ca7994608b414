use crate::errors::AppError;

pub const MAX_CONTENT_CHARS: usize = 100_000;
pub const MAX_LAYOUT_CHARS: usize = 50;

/// Validate an order: must be non-negative when given.
pub fn validate_order(order: Option<i64>) -> Option<String> {
    match order {
        Some(o) if o < 0 => Some("Order must be a non-negative integer".to_string()),
        _ => None,
    }
}

/// Validate an optional text field with a max length (absent or empty is OK).
pub fn validate_optional(value: Option<&str>, field_name: &str, max_chars: usize) -> Option<String> {
    match value {
        Some(v) if v.chars().count() > max_chars => {
            Some(format!("{field_name} must be at most {max_chars} characters"))
        }
        _ => None,
    }
}

/// Check the fields shared by create and update requests.
/// All problems are reported together, separated by "; ".
pub fn validate_slide_fields(
    content: Option<&str>,
    order: Option<i64>,
    layout: Option<&str>,
) -> Result<(), AppError> {
    let errors: Vec<String> = [
        validate_optional(content, "Content", MAX_CONTENT_CHARS),
        validate_order(order),
        validate_optional(layout, "Layout", MAX_LAYOUT_CHARS),
    ]
    .into_iter()
    .flatten()
    .collect();

    if errors.is_empty() {
        Ok(())
    } else {
        Err(AppError::Validation(errors.join("; ")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_absent_fields() {
        assert!(validate_slide_fields(None, None, None).is_ok());
        assert!(validate_slide_fields(Some(""), Some(0), Some("")).is_ok());
    }

    #[test]
    fn rejects_negative_order() {
        assert_eq!(
            validate_order(Some(-1)).as_deref(),
            Some("Order must be a non-negative integer")
        );
    }

    #[test]
    fn collects_every_problem() {
        let long_layout = "x".repeat(MAX_LAYOUT_CHARS + 1);
        match validate_slide_fields(None, Some(-3), Some(&long_layout)) {
            Err(AppError::Validation(details)) => {
                assert_eq!(
                    details,
                    "Order must be a non-negative integer; Layout must be at most 50 characters"
                );
            }
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn counts_characters_not_bytes() {
        let layout = "é".repeat(MAX_LAYOUT_CHARS);
        assert!(validate_optional(Some(&layout), "Layout", MAX_LAYOUT_CHARS).is_none());
    }
}
