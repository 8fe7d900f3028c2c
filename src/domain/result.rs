//! Result type alias for Ficha

use super::errors::FichaError;

/// Result type alias for Ficha operations
///
/// # Examples
///
/// ```
/// use ficha::domain::result::Result;
/// use ficha::domain::errors::FichaError;
///
/// fn failing_function() -> Result<()> {
///     Err(FichaError::Validation("CUI es requerido.".to_string()))
/// }
/// ```
pub type Result<T> = std::result::Result<T, FichaError>;
