use crate::domain::{
    entities::BoardTemplate,
    error::{CredentialError, DomainError},
    value_objects::Credentials,
};

/// Centralized domain validation.
///
/// All validation logic lives here, not scattered across services.
pub struct DomainValidator;

impl DomainValidator {
    pub fn validate_template(template: &BoardTemplate) -> Result<(), DomainError> {
        template.validate()
    }

    pub fn validate_credentials(credentials: &Credentials) -> Result<(), CredentialError> {
        credentials.validate_format()
    }
}
