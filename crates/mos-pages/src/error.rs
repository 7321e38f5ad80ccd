/// Form validation failures for the add actions.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PageError {
    #[error("Required field is empty: {0}")]
    EmptyField(&'static str),
}

/// Reject blank input, returning the trimmed value.
pub(crate) fn required(field: &'static str, value: &str) -> Result<String, PageError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(PageError::EmptyField(field));
    }
    Ok(value.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn required_trims_and_rejects_blank() {
        assert_eq!(required("name", "  CI token "), Ok("CI token".to_string()));
        assert_eq!(required("name", "   "), Err(PageError::EmptyField("name")));
        assert_eq!(
            PageError::EmptyField("title").to_string(),
            "Required field is empty: title"
        );
    }
}
