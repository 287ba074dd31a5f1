// [libs/core/xs/src/lib.rs]
#![deny(missing_docs)]

/*!
 * =================================================================
 * APARATO: CROSS-SECTION STRATUM ROOT
 * CLASIFICACION: CORE MATH DATA (ESTRATO L1)
 * RESPONSABILIDAD: ORQUESTACION DE TABLAS DE SECCION EFICAZ
 *
 * Una tabla por material/reaccion: dos conjuntos en el caso tipico
 * (dispersion elastica, absorcion). El motor de transporte consulta
 * ambas por celda y combina los resultados en la seccion macroscopica.
 * =================================================================
 */

/// Catalogo de fallos de construccion y consulta.
pub mod errors;
/// Tabla monotona con interpolacion lineal y busqueda guess-and-step.
pub mod table;

pub use errors::XsError;
pub use table::CrossSectionTable;

/// Reexportaciones de uso frecuente para los consumidores del aparato.
pub mod prelude {
    pub use crate::errors::XsError;
    pub use crate::table::CrossSectionTable;
}
