//! Input validation helpers
//!
//! Centralized text length constants and validation functions.
//! Limits match the legacy column definitions (nome 150 chars) plus
//! reasonable UX limits; SQLite TEXT has no built-in length enforcement.

use crate::utils::AppError;

// ── Text length limits ──────────────────────────────────────────────

/// Entity names: cliente, produto, categoria
pub const MAX_NOME_LEN: usize = 150;

/// Free-form descriptions
pub const MAX_DESCRICAO_LEN: usize = 2000;

/// Short identifiers: telefone, numero, cep, estado
pub const MAX_SHORT_TEXT_LEN: usize = 100;

/// Email addresses (RFC 5321)
pub const MAX_EMAIL_LEN: usize = 254;

/// Passwords (before hashing)
pub const MAX_SENHA_LEN: usize = 128;

/// Address lines (rua, bairro, cidade, complemento)
pub const MAX_ENDERECO_LEN: usize = 500;

/// Image URLs / file names
pub const MAX_IMAGEM_LEN: usize = 2048;

// ── Validation helpers (CRUD handlers) ──────────────────────────────

/// Validate that a required string is non-empty and within the length limit.
pub fn validate_required_text(value: &str, field: &str, max_len: usize) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::validation(format!("{field} must not be empty")));
    }
    if value.len() > max_len {
        return Err(AppError::validation(format!(
            "{field} is too long ({} chars, max {max_len})",
            value.len()
        )));
    }
    Ok(())
}

/// Validate that an optional string, if present, is within the length limit.
pub fn validate_optional_text(
    value: &Option<String>,
    field: &str,
    max_len: usize,
) -> Result<(), AppError> {
    if let Some(v) = value
        && v.len() > max_len
    {
        return Err(AppError::validation(format!(
            "{field} is too long ({} chars, max {max_len})",
            v.len()
        )));
    }
    Ok(())
}

/// Validate an item quantity: positive and within the ledger bound.
pub fn validate_quantidade(quantidade: i64) -> Result<(), AppError> {
    if quantidade <= 0 {
        return Err(AppError::validation(format!(
            "quantidade must be positive, got {quantidade}"
        )));
    }
    if quantidade > shared::money::MAX_QUANTIDADE {
        return Err(AppError::validation(format!(
            "quantidade exceeds maximum allowed ({}), got {quantidade}",
            shared::money::MAX_QUANTIDADE
        )));
    }
    Ok(())
}

/// Validate a non-negative stock amount (produto create/update).
pub fn validate_estoque(estoque: i64) -> Result<(), AppError> {
    if estoque < 0 {
        return Err(AppError::validation(format!(
            "estoque must be non-negative, got {estoque}"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn required_text_rejects_empty_and_oversized() {
        assert!(validate_required_text("ok", "nome", 10).is_ok());
        assert!(validate_required_text("   ", "nome", 10).is_err());
        assert!(validate_required_text("abcdefghijk", "nome", 10).is_err());
    }

    #[test]
    fn quantidade_bounds() {
        assert!(validate_quantidade(1).is_ok());
        assert!(validate_quantidade(0).is_err());
        assert!(validate_quantidade(-3).is_err());
        assert!(validate_quantidade(shared::money::MAX_QUANTIDADE + 1).is_err());
    }
}
