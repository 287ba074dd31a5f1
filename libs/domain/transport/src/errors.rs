// [libs/domain/transport/src/errors.rs]
// =================================================================
// APARATO: ENGINE ERRORS
// RESPONSABILIDAD: CATALOGO DE FALLOS DEL MOTOR DE TRANSPORTE
// =================================================================

use thiserror::Error;

/// Fallos posibles al avanzar particulas un paso de tiempo.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EngineError {
    /// Consulta de seccion eficaz fuera de rango (aborta el paso).
    #[error(transparent)]
    CrossSection(#[from] reactor_core_xs::XsError),

    /// Geometria de malla invalida (aborta el paso).
    #[error(transparent)]
    Mesh(#[from] reactor_core_mesh::MeshError),

    /// Estado de punto flotante no finito (velocidad NaN, denominador
    /// cero al calcular distancia a faceta). Solo se detecta bajo
    /// `debug_assertions`; en release la fisica lo descarta por
    /// construccion.
    #[error("arithmetic fault for particle {particle_key} at counter {counter}: {detail}")]
    Arithmetic {
        /// Identificador de la particula afectada.
        particle_key: u64,
        /// Contador de sorteo en el que ocurrio el fallo.
        counter: u64,
        /// Descripcion del estado no finito observado.
        detail: String,
    },

    /// `dt_to_census` o `mfp_to_collision` quedaron negativos mas alla
    /// de la tolerancia de punto flotante tras una actualizacion.
    #[error("invariant violated for particle {particle_key} at counter {counter}: {detail}")]
    InvariantViolation {
        /// Identificador de la particula afectada.
        particle_key: u64,
        /// Contador de sorteo en el que ocurrio el fallo.
        counter: u64,
        /// Descripcion de la invariante violada.
        detail: String,
    },
}
