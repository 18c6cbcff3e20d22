//! Container-related custom validators.

use validator::ValidationError;

use crate::constants::{ERR_IMAGE_REQUIRED, ERR_INVALID_PORT};

/// Image references must contain something besides whitespace.
pub fn validate_image(image: &str) -> Result<(), ValidationError> {
    if image.trim().is_empty() {
        let mut error = ValidationError::new("image_required");
        error.message = Some(ERR_IMAGE_REQUIRED.into());
        return Err(error);
    }
    Ok(())
}

/// Custom validator for published ports.
/// Every entry must be a decimal TCP port between 1 and 65535.
pub fn validate_ports(ports: &[String]) -> Result<(), ValidationError> {
    let valid = ports
        .iter()
        .all(|p| matches!(p.trim().parse::<u16>(), Ok(port) if port > 0));

    if valid {
        Ok(())
    } else {
        let mut error = ValidationError::new("invalid_port");
        error.message = Some(ERR_INVALID_PORT.into());
        Err(error)
    }
}
