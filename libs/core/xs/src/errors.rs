// [libs/core/xs/src/errors.rs]
// =================================================================
// APARATO: CROSS-SECTION TABLE ERRORS
// RESPONSABILIDAD: CATALOGO DE FALLOS DE CONSTRUCCION Y BUSQUEDA
// =================================================================

use thiserror::Error;

/// Fallos posibles al construir o consultar una `CrossSectionTable`.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum XsError {
    /// La energia consultada cae fuera de `[keys[0], keys[last])`.
    #[error("energy {energy} outside table range [{low}, {high})")]
    OutOfRange {
        /// Energia consultada, en eV.
        energy: f64,
        /// Limite inferior de la tabla.
        low: f64,
        /// Limite superior (exclusivo) de la tabla.
        high: f64,
    },

    /// Las claves de energia no son estrictamente crecientes, o la tabla
    /// tiene menos de dos puntos.
    #[error("cross-section table keys are not strictly increasing, or table has fewer than 2 points")]
    InvalidTable,
}
