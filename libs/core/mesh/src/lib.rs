// [libs/core/mesh/src/lib.rs]
#![deny(missing_docs)]

//! # APARATO: MESH STRATUM ROOT
//! CLASIFICACION: CORE MATH DATA (ESTRATO L1)
//! RESPONSABILIDAD: VISTA DE SOLO LECTURA DE LA MALLA CARTESIANA
//!
//! El motor de transporte nunca construye ni muta una malla: solo la
//! consulta. Este aparato expone la geometria (bordes de celda) y la
//! densidad por celda necesarias para la seccion eficaz macroscopica.

/// Catalogo de fallos de construccion.
pub mod errors;
/// La vista de malla en si.
pub mod mesh;

pub use errors::MeshError;
pub use mesh::Mesh;

/// Reexportaciones de uso frecuente para los consumidores del aparato.
pub mod prelude {
    pub use crate::errors::MeshError;
    pub use crate::mesh::Mesh;
}
