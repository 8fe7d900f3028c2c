//! User-facing messages returned in `{message}` bodies.
//!
//! The clinic's clients match on some of these strings, so they are part of
//! the HTTP contract.

pub const CUI_REQUIRED: &str = "CUI es requerido.";
pub const CUI_INVALID: &str = "CUI debe tener 13 dígitos.";
pub const CUI_DUPLICATE: &str = "CUI ya existe.";

pub const NAMES_REQUIRED: &str = "Nombres son requeridos.";
pub const LAST_NAMES_REQUIRED: &str = "Apellidos son requeridos.";
pub const NAMES_TOO_LONG: &str = "Nombres no pueden exceder 100 caracteres.";
pub const LAST_NAMES_TOO_LONG: &str = "Apellidos no pueden exceder 100 caracteres.";
pub const SEX_REQUIRED: &str = "Sexo es requerido.";
pub const SEX_INVALID: &str = "Sexo debe ser M o F.";
pub const BIRTHDATE_REQUIRED: &str = "Fecha de nacimiento es requerida.";
pub const BIRTHDATE_INVALID: &str = "Fecha de nacimiento inválida, use AAAA-MM-DD.";
pub const BIRTHDATE_IN_FUTURE: &str = "Fecha de nacimiento no puede ser futura.";

pub const SEARCH_TYPE_REQUIRED: &str = "Tipo de búsqueda es requerido.";
pub const SEARCH_VALUE_REQUIRED: &str = "Valor de búsqueda es requerido.";

pub const SURGICAL_EVENTS_REQUIRED: &str = "surgicalEventData debe contener al menos un evento.";
pub const SURGERY_TYPE_REQUIRED: &str = "Tipo de cirugía es requerido.";
pub const SURGERY_DATE_REQUIRED: &str = "Fecha de cirugía es requerida.";
pub const SURGERY_DATE_INVALID: &str = "Fecha de cirugía inválida, use AAAA-MM-DD.";
pub const SURGERY_TYPE_TOO_LONG: &str = "Tipo de cirugía no puede exceder 100 caracteres.";
pub const COMPLICATIONS_TOO_LONG: &str = "Complicaciones no pueden exceder 500 caracteres.";

pub const PATIENT_CREATED: &str = "Paciente creado.";
pub const PATIENT_NOT_FOUND: &str = "No patient found for the provided ID.";
pub const SURGICAL_HISTORY_NOT_FOUND: &str = "No surgical history found for the provided ID.";
pub const STUDENT_NOT_FOUND: &str = "No student info found for the provided ID.";
pub const COLLABORATOR_NOT_FOUND: &str = "No collaborator info found for the provided ID.";
pub const ROUTE_NOT_FOUND: &str = "Ruta no encontrada.";

pub const METHOD_NOT_ALLOWED: &str = "Método no permitido.";
pub const INVALID_JSON: &str = "Cuerpo JSON inválido.";
pub const DATABASE_UNAVAILABLE: &str = "Base de datos no disponible.";
pub const INTERNAL_ERROR: &str = "Error interno del servidor.";
