// [libs/domain/particles/src/lib.rs]
#![deny(missing_docs)]

//! # APARATO: PARTICLE DOMAIN STRATUM ROOT
//! CLASIFICACION: DOMAIN MODELS (ESTRATO L2)
//! RESPONSABILIDAD: POBLACION DE PARTICULAS Y SUS PARAMETROS DE PASO
//!
//! Este aparato no contiene fisica: solo la representacion de datos
//! que el motor de transporte lee y muta. Mantenerlo separado del
//! motor permite que otros consumidores (el inyector, el driver, las
//! pruebas de escenario) construyan y lean poblaciones sin depender
//! del algoritmo de transporte en si.

/// Contadores de eventos por trabajador y su reduccion.
pub mod counters;
/// Parametros explicitos de un paso de tiempo.
pub mod context;
/// Almacen de particulas en forma estructura-de-arreglos.
pub mod store;

pub use context::StepContext;
pub use counters::EventCounters;
pub use store::ParticleStore;

/// Reexportaciones de uso frecuente para los consumidores del aparato.
pub mod prelude {
    pub use crate::context::StepContext;
    pub use crate::counters::EventCounters;
    pub use crate::store::ParticleStore;
}
