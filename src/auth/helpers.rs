#[derive(Debug, PartialEq, Eq)]
pub enum TokenExtractionError {
    InvalidScheme,
    EmptyToken,
}

/// Extracts the token from an Authorization header.
/// Returns None if no auth header is present.
/// Returns Err if the scheme is not Bearer or the token is blank.
pub fn extract_token_from_header(
    auth_header: Option<&str>,
) -> Result<Option<&str>, TokenExtractionError> {
    let Some(header) = auth_header else {
        return Ok(None);
    };

    let token = header
        .strip_prefix("Bearer ")
        .ok_or(TokenExtractionError::InvalidScheme)?
        .trim();

    if token.is_empty() {
        return Err(TokenExtractionError::EmptyToken);
    }

    Ok(Some(token))
}
