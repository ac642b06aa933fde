use crate::error::{Error, Result};
use crate::types::ObjectId;

const MAX_REFERENCE_NAME_LEN: usize = 100;
const MIN_PASSWORD_LEN: usize = 4;

/// Fails with the names of every field that is blank after trimming.
pub fn require_fields(fields: &[(&str, &str)]) -> Result<()> {
    let missing: Vec<&str> = fields
        .iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(name, _)| *name)
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(Error::invalid_input(format!(
            "missing required fields: {}",
            missing.join(", ")
        )))
    }
}

pub fn validate_reference_name(name: &str, entity: &str) -> Result<()> {
    let name = name.trim();
    if name.is_empty() {
        return Err(Error::invalid_input(format!("{entity} name cannot be empty")));
    }
    if name.chars().count() > MAX_REFERENCE_NAME_LEN {
        return Err(Error::invalid_input(format!(
            "{entity} name cannot exceed {MAX_REFERENCE_NAME_LEN} characters"
        )));
    }
    Ok(())
}

pub fn validate_credentials(username: &str, password: &str) -> Result<()> {
    if username.trim().is_empty() {
        return Err(Error::invalid_input("username cannot be empty"));
    }
    if username.contains(char::is_whitespace) {
        return Err(Error::invalid_input("username cannot contain whitespace"));
    }
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(Error::invalid_input(format!(
            "password must be at least {MIN_PASSWORD_LEN} characters"
        )));
    }
    Ok(())
}

/// Resolves the id of a save-style payload: a blank id means a new record.
pub fn resolve_id(id: Option<&str>) -> Result<ObjectId> {
    match id.map(str::trim) {
        None | Some("") => Ok(ObjectId::new()),
        Some(raw) => ObjectId::parse_str(raw),
    }
}
