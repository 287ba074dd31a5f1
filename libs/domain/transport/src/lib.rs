// [libs/domain/transport/src/lib.rs]
#![deny(missing_docs)]

//! # APARATO: TRANSPORT DOMAIN STRATUM ROOT
//! CLASIFICACION: DOMAIN STRATEGY (ESTRATO L2)
//! RESPONSABILIDAD: ORQUESTACION DEL MOTOR DE TRANSPORTE DE PARTICULAS
//!
//! Expone las tres operaciones que el resto del sistema consume:
//! sembrar particulas nuevas, avanzar la poblacion completa un paso de
//! tiempo, y leer el acumulado de energia depositada. El algoritmo de
//! transporte en si vive en [`engine`]; este modulo solo reparte las
//! particulas entre hilos y reduce los contadores de evento.

/// Constantes fisicas fijas del motor.
pub mod constants;
/// Maquina de estados por particula (colision/faceta/censo).
pub mod engine;
/// Catalogo de fallos del motor de transporte.
pub mod errors;
/// Siembra inicial de la poblacion de particulas.
pub mod injector;
/// Propiedades de material y tablas de seccion eficaz.
pub mod material;

pub use engine::NextEvent;
pub use errors::EngineError;
pub use injector::{inject_particles, SourceRegion};
pub use material::Material;

use rayon::prelude::*;
use reactor_core_mesh::Mesh;
use reactor_core_tally::Tally;
use reactor_domain_particles::{EventCounters, ParticleStore, StepContext};

/// Puntero crudo a un `ParticleStore`, enviado a traves de los hilos
/// de Rayon para que cada uno mute su rango disjunto de ranuras.
///
/// # Safety invariant
/// Cada hilo solo toca los indices de su propio fragmento de
/// `par_chunks`; los fragmentos son disjuntos y cubren el almacen
/// exactamente una vez, asi que ningun campo del SoA es alcanzado por
/// mas de un hilo a la vez. Esta es la realizacion (a) descrita para
/// el motor: "worker pool with N threads, each owning a disjoint
/// particle range."
struct StoreSlicePtr(*mut ParticleStore);

impl StoreSlicePtr {
    fn get(&self) -> *mut ParticleStore {
        self.0
    }
}

// SAFETY: ver la invariante documentada en `StoreSlicePtr`.
unsafe impl Sync for StoreSlicePtr {}

/// Puntero crudo al buffer de contadores por particula, enviado a
/// traves de los hilos de Rayon junto con [`StoreSlicePtr`].
///
/// # Safety invariant
/// Misma invariante que `StoreSlicePtr`: cada hilo solo escribe los
/// indices de su propio fragmento de `par_chunks`, que son disjuntos.
struct CountersSlicePtr(*mut u64);

impl CountersSlicePtr {
    fn get(&self) -> *mut u64 {
        self.0
    }
}

// SAFETY: ver la invariante documentada en `CountersSlicePtr`.
unsafe impl Sync for CountersSlicePtr {}

/// Avanza toda la poblacion de particulas un paso de tiempo, repartiendo
/// las ranuras en fragmentos disjuntos entre los hilos de Rayon. Cada
/// particula mantiene su propio contador de sorteo a traves de
/// `particle_counters`, que el llamador conserva entre pasos para
/// mantener los flujos aleatorios disjuntos.
///
/// # Errors
/// Propaga el primer [`EngineError`] fatal (`CrossSection`/`Mesh`)
/// encontrado por cualquier particula. Particulas procesadas antes del
/// fallo ya quedaron mutadas en `store`.
pub fn advance_particles_one_step(
    store: &mut ParticleStore,
    particle_counters: &mut [u64],
    mesh: &Mesh,
    material: &Material,
    tally: &Tally,
    ctx: &StepContext,
) -> Result<EventCounters, EngineError> {
    let total_slots = store.len();
    debug_assert_eq!(particle_counters.len(), total_slots);

    if total_slots == 0 {
        return Ok(EventCounters::zero());
    }

    let worker_count = rayon::current_num_threads().max(1);
    let chunk_size = total_slots.div_ceil(worker_count).max(1);

    let all_slots: Vec<usize> = (0..total_slots).collect();
    let store_ptr = StoreSlicePtr(store as *mut ParticleStore);
    let counters_ptr = CountersSlicePtr(particle_counters.as_mut_ptr());

    let per_chunk_results: Vec<Result<EventCounters, EngineError>> = all_slots
        .par_chunks(chunk_size)
        .map(|chunk| {
            let mut local_counters = EventCounters::zero();
            for &slot in chunk {
                // SAFETY: `chunk` comes from a `par_chunks` partition of
                // `all_slots`, so no other thread holds this `slot`.
                let store_mut: &mut ParticleStore = unsafe { &mut *store_ptr.get() };
                // SAFETY: `slot` is exclusive to this thread for the
                // reason above, so `counters_ptr.add(slot)` is not
                // aliased by any concurrent access.
                let counter_ref: &mut u64 = unsafe { &mut *counters_ptr.get().add(slot) };

                engine::advance_particle(
                    slot,
                    counter_ref,
                    store_mut,
                    mesh,
                    material,
                    tally,
                    ctx,
                    &mut local_counters,
                )?;
            }
            Ok(local_counters)
        })
        .collect();

    let mut total = EventCounters::zero();
    for result in per_chunk_results {
        total.merge(&result?);
    }
    Ok(total)
}

/// Lee el acumulado de energia depositada por celda, en el mismo
/// orden fila-mayor que expone [`Tally::snapshot`].
#[must_use]
pub fn read_tally(tally: &Tally) -> Vec<f64> {
    tally.snapshot()
}

#[cfg(test)]
mod tests {
    use super::*;
    use reactor_core_mesh::Mesh;
    use reactor_core_tally::Tally;
    use reactor_core_xs::CrossSectionTable;

    fn flat_mesh(nx: usize, ny: usize, width: f64) -> Mesh {
        let edge_x: Vec<f64> = (0..=nx).map(|i| i as f64 * width).collect();
        let edge_y: Vec<f64> = (0..=ny).map(|i| i as f64 * width).collect();
        let density = vec![1.0; nx * ny];
        Mesh::new(nx, ny, nx, ny, 0, 0, 0, edge_x, edge_y, density).unwrap()
    }

    fn zero_xs_material() -> Material {
        let table = CrossSectionTable::from_pairs(&[(1e-10, 1e-30), (1e8, 1e-30)]).unwrap();
        Material::new(12.0, 12.0, table.clone(), table, 1e-10)
    }

    #[test]
    fn advancing_an_empty_population_is_a_no_op() {
        let mesh = flat_mesh(2, 2, 1.0);
        let material = zero_xs_material();
        let tally = Tally::new(2, 2);
        let mut store = ParticleStore::with_capacity(0);
        let mut counters_storage: Vec<u64> = Vec::new();
        let ctx = StepContext::new(0, 1.0, 1, true);

        let totals = advance_particles_one_step(
            &mut store,
            &mut counters_storage,
            &mesh,
            &material,
            &tally,
            &ctx,
        )
        .unwrap();

        assert_eq!(totals, EventCounters::zero());
    }

    #[test]
    fn advancing_a_population_reduces_counters_across_all_particles() {
        let mesh = flat_mesh(4, 1, 1.0);
        let material = zero_xs_material();
        let tally = Tally::new(4, 1);
        let energy = 14.1e6;
        let speed = (2.0 * energy * crate::constants::EV_TO_J / crate::constants::PARTICLE_MASS).sqrt();

        let mut store = ParticleStore::with_capacity(8);
        for pid in 0..8u64 {
            store.push(pid, 0.5, 0.5, 1.0, 0.0, energy, 1.0, 0, 0, 0.0, 0.0);
        }

        let mut particle_counters = vec![0u64; 8];
        let ctx = StepContext::new(0, 3.0 / speed, 8, true);

        let totals = advance_particles_one_step(
            &mut store,
            &mut particle_counters,
            &mesh,
            &material,
            &tally,
            &ctx,
        )
        .unwrap();

        assert_eq!(totals.n_collisions, 0);
        assert_eq!(totals.n_facets, 8 * 3);
        for x in &store.x {
            assert!((x - 3.5).abs() < 1e-6);
        }
    }
}
