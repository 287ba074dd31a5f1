// [libs/core/mesh/src/errors.rs]
// =================================================================
// APARATO: MESH ERRORS
// RESPONSABILIDAD: CATALOGO DE FALLOS DE CONSTRUCCION DE LA MALLA
// =================================================================

use thiserror::Error;

/// Fallos posibles al construir una [`crate::Mesh`].
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MeshError {
    /// Las coordenadas de borde no son estrictamente crecientes, o una
    /// celda resultante tiene ancho cero.
    #[error("mesh edges are non-monotone or produce a zero-width cell")]
    InvalidMesh,

    /// El buffer de densidad no coincide con las dimensiones esperadas de la
    /// malla acolchada: `(ny + 2*pad) * (nx + 2*pad)`.
    #[error("density buffer length {actual} does not match padded mesh size {expected}")]
    DensityLengthMismatch {
        /// Longitud real del buffer recibido.
        actual: usize,
        /// Longitud esperada segun `(nx + 2*pad) * (ny + 2*pad)`.
        expected: usize,
    },
}
