use crate::domain::{LineItem, TransactionRequest};
use crate::error::ValidationError;

pub type ValidationResult = Result<(), ValidationError>;

/// True when a value is empty or whitespace only.
pub fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

pub fn validate_required(field: &'static str, value: &str) -> ValidationResult {
    if is_blank(value) {
        return Err(ValidationError::MissingField(field));
    }

    Ok(())
}

/// Checks the mandatory header fields, first blank field wins.
pub fn validate_required_fields(request: &TransactionRequest) -> ValidationResult {
    validate_required("partnerkey", &request.partner_key)?;
    validate_required("partnerrefno", &request.partner_ref_no)?;
    validate_required("partnerpassword", &request.partner_password)?;
    validate_required("timestamp", &request.timestamp)?;
    validate_required("sig", &request.sig)?;

    Ok(())
}

/// Per-item field checks, first failing field wins.
pub fn validate_line_item(item: &LineItem) -> ValidationResult {
    if is_blank(&item.partner_item_ref) {
        return Err(ValidationError::MissingItemRef);
    }

    if is_blank(&item.name) {
        return Err(ValidationError::MissingItemName(
            item.partner_item_ref.clone(),
        ));
    }

    if item.quantity < 1 {
        return Err(ValidationError::InvalidQuantity);
    }

    if item.unit_price <= 0 {
        return Err(ValidationError::InvalidUnitPrice);
    }

    Ok(())
}
