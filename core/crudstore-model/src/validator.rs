use crate::Fields;

/// Validation policy applied to caller-supplied fields before a write.
///
/// The store calls [`validate`](FieldValidator::validate) on every create and
/// update, outside its critical section. A rejection surfaces to the caller as
/// an invalid-argument error carrying the returned message; the table is left
/// untouched.
pub trait FieldValidator: Send + Sync {
    /// Return `Err(message)` to reject the write.
    fn validate(&self, fields: &Fields) -> Result<(), String> {
        let _ = fields;
        Ok(())
    }
}

/// Validator that accepts any fields, including an empty object.
#[derive(Debug, Clone, Copy, Default)]
pub struct AcceptAll;

impl FieldValidator for AcceptAll {}
