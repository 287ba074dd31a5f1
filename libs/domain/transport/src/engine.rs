// [libs/domain/transport/src/engine.rs]
/*!
 * =================================================================
 * APARATO: PER-PARTICLE TRANSPORT ENGINE
 * CLASIFICACION: DOMAIN STRATEGY (ESTRATO L2)
 * RESPONSABILIDAD: MAQUINA DE ESTADOS DE UNA PARTICULA DENTRO DE UN PASO
 *
 * Cada particula streamea hasta el proximo de tres eventos posibles
 * -colision, cruce de faceta, o censo- y el evento ganador se decide
 * por la menor distancia entre los tres candidatos. El despacho usa
 * un enum pequeno (`NextEvent`) resuelto con `match`, no punteros a
 * funcion: los tres manejadores son fijos y conocidos en tiempo de
 * compilacion.
 * =================================================================
 */

use reactor_core_mesh::Mesh;
use reactor_core_tally::Tally;
use reactor_domain_particles::{EventCounters, ParticleStore, StepContext};
use tracing::trace;

use crate::constants::{AVOGADROS, BARNS, EV_TO_J, OPEN_BOUND_CORRECTION, PARTICLE_MASS};
use crate::errors::EngineError;
use crate::material::Material;

/// El evento que gana la carrera de distancias en una iteracion del
/// bucle de streaming de una particula.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NextEvent {
    /// La particula colisiona (absorcion o dispersion elastica) antes
    /// de alcanzar una faceta o el censo.
    Collision,
    /// La particula cruza el borde de la celda actual.
    Facet,
    /// La particula llega al final del paso de tiempo sin colisionar
    /// ni cruzar una faceta.
    Census,
}

/// Secciones eficaces macroscopicas validas para la celda/energia
/// actual de una particula, recalculadas en cada iteracion del bucle.
struct MacroCrossSections {
    sigma_s_macro: f64,
    sigma_a_macro: f64,
    cell_mfp: f64,
    number_density: f64,
}

fn macroscopic_cross_sections(
    energy: f64,
    density: f64,
    material: &Material,
) -> Result<MacroCrossSections, EngineError> {
    let (sigma_s, _) = material.scatter_xs.lookup(energy)?;
    let (sigma_a, _) = material.absorb_xs.lookup(energy)?;

    let number_density = density * AVOGADROS / material.molar_mass;
    let sigma_s_macro = number_density * sigma_s * BARNS;
    let sigma_a_macro = number_density * sigma_a * BARNS;
    let cell_mfp = 1.0 / (sigma_s_macro + sigma_a_macro);

    Ok(MacroCrossSections {
        sigma_s_macro,
        sigma_a_macro,
        cell_mfp,
        number_density,
    })
}

fn speed_of(energy: f64) -> f64 {
    (2.0 * energy * EV_TO_J / PARTICLE_MASS).sqrt()
}

/// Deposito de energia de un segmento recto de longitud `length`,
/// segun la formula de deposito compartida por colision/faceta/censo.
fn segment_energy_deposition(
    weight: f64,
    length: f64,
    sigma_s_macro: f64,
    sigma_a_macro: f64,
    energy: f64,
    pabsorb: f64,
    mass_number: f64,
) -> f64 {
    let a = mass_number;
    let scatter_heat = (1.0 - pabsorb) * energy * (a * a + a + 1.0) / ((a + 1.0) * (a + 1.0));
    let absorb_heat = pabsorb * 0.0;
    let sigma_total_macro = sigma_s_macro + sigma_a_macro;
    weight * length * sigma_total_macro * (energy - scatter_heat - absorb_heat)
}

/// Traduce un indice de celda global (el que almacena el `ParticleStore`)
/// al sistema local del mosaico que posee `mesh`.
fn to_local(mesh: &Mesh, global_cell_x: i32, global_cell_y: i32) -> (i32, i32) {
    let (x_off, y_off) = mesh.offset();
    (global_cell_x - x_off as i32, global_cell_y - y_off as i32)
}

fn flush_tally(tally: &Tally, ctx: &StepContext, local_cell_x: i32, local_cell_y: i32, ed_local: f64) {
    if ed_local == 0.0 {
        return;
    }
    let delta = ed_local / ctx.ntotal_particles as f64;
    tally.add(local_cell_x as usize, local_cell_y as usize, delta);
}

/// Avanza una unica particula hasta que alcance el censo o muera,
/// mutando su ranura en `store` y acumulando en `tally` y `counters`.
///
/// El identificador aleatorio de la particula es `store.pid[slot]`;
/// `counter` es su contador de sorteo, persistente entre llamadas a
/// traves de pasos sucesivos para mantener disjuntos los sorteos.
pub fn advance_particle(
    slot: usize,
    counter: &mut u64,
    store: &mut ParticleStore,
    mesh: &Mesh,
    material: &Material,
    tally: &Tally,
    ctx: &StepContext,
    counters: &mut EventCounters,
) -> Result<(), EngineError> {
    if !store.alive[slot] {
        return Ok(());
    }

    let particle_key = store.pid[slot];

    if ctx.initial {
        store.dt_to_census[slot] = ctx.dt;
    }

    if store.mfp_to_collision[slot] == 0.0 {
        let (local_cell_x, local_cell_y) = to_local(mesh, store.cell_x[slot], store.cell_y[slot]);
        let density = mesh.density(local_cell_x, local_cell_y);
        let macro_xs = macroscopic_cross_sections(store.e[slot], density, material)?;

        let (r0, _, _, _) = reactor_core_rng::rng(particle_key, ctx.master_key, *counter);
        *counter += 1;
        store.mfp_to_collision[slot] = -r0.ln() / macro_xs.sigma_s_macro;
    }

    let mut ed_local = 0.0f64;

    loop {
        if !store.alive[slot] {
            break;
        }

        let (local_cell_x, local_cell_y) = to_local(mesh, store.cell_x[slot], store.cell_y[slot]);
        let density = mesh.density(local_cell_x, local_cell_y);
        let energy = store.e[slot];
        let macro_xs = macroscopic_cross_sections(energy, density, material)?;
        let speed = speed_of(energy);

        let (edge_lo_x, edge_hi_x) = mesh.cell_edges_x(local_cell_x);
        let (edge_lo_y, edge_hi_y) = mesh.cell_edges_y(local_cell_y);

        let omega_x = store.omega_x[slot];
        let omega_y = store.omega_y[slot];
        let x = store.x[slot];
        let y = store.y[slot];

        let edge_target_x = if omega_x >= 0.0 {
            edge_hi_x
        } else {
            edge_lo_x - OPEN_BOUND_CORRECTION
        };
        let edge_target_y = if omega_y >= 0.0 {
            edge_hi_y
        } else {
            edge_lo_y - OPEN_BOUND_CORRECTION
        };

        let dt_x = (edge_target_x - x) / (omega_x * speed);
        let dt_y = (edge_target_y - y) / (omega_y * speed);
        let dt_to_nearest_facet = dt_x.min(dt_y);

        // An axis the particle isn't moving along (`omega_? == 0`) yields an
        // infinite `dt`, which is expected and simply loses the `min` below.
        // Only a NaN, or a non-finite result on the axis that wins the
        // `min`, reflects a genuine arithmetic fault.
        if dt_x.is_nan() || dt_y.is_nan() || !dt_to_nearest_facet.is_finite() || !speed.is_finite()
        {
            return Err(EngineError::Arithmetic {
                particle_key,
                counter: *counter,
                detail: format!(
                    "non-finite streaming distance: dt_x={dt_x}, dt_y={dt_y}, speed={speed}"
                ),
            });
        }

        let x_facet_is_x_axis = dt_x < dt_y;
        let distance_to_facet = speed * dt_to_nearest_facet;
        let distance_to_collision = store.mfp_to_collision[slot] * macro_xs.cell_mfp;
        let distance_to_census = speed * store.dt_to_census[slot];
        let pabsorb = macro_xs.sigma_a_macro * macro_xs.cell_mfp;

        let event = if distance_to_collision < distance_to_facet
            && distance_to_collision < distance_to_census
        {
            NextEvent::Collision
        } else if distance_to_facet < distance_to_census {
            NextEvent::Facet
        } else {
            NextEvent::Census
        };

        match event {
            NextEvent::Collision => {
                handle_collision(
                    slot,
                    counter,
                    store,
                    material,
                    tally,
                    ctx,
                    counters,
                    &macro_xs,
                    distance_to_collision,
                    pabsorb,
                    speed,
                    local_cell_x,
                    local_cell_y,
                    &mut ed_local,
                )?;
            }
            NextEvent::Facet => {
                handle_facet(
                    slot,
                    store,
                    mesh,
                    tally,
                    ctx,
                    counters,
                    material,
                    &macro_xs,
                    distance_to_facet,
                    pabsorb,
                    speed,
                    x_facet_is_x_axis,
                    local_cell_x,
                    local_cell_y,
                    &mut ed_local,
                );
            }
            NextEvent::Census => {
                handle_census(
                    slot,
                    store,
                    tally,
                    ctx,
                    counters,
                    material,
                    &macro_xs,
                    distance_to_census,
                    pabsorb,
                    speed,
                    local_cell_x,
                    local_cell_y,
                    &mut ed_local,
                );
                break;
            }
        }
    }

    Ok(())
}

#[allow(clippy::too_many_arguments)]
fn handle_collision(
    slot: usize,
    counter: &mut u64,
    store: &mut ParticleStore,
    material: &Material,
    tally: &Tally,
    ctx: &StepContext,
    counters: &mut EventCounters,
    macro_xs: &MacroCrossSections,
    distance: f64,
    pabsorb: f64,
    speed: f64,
    local_cell_x: i32,
    local_cell_y: i32,
    ed_local: &mut f64,
) -> Result<(), EngineError> {
    let particle_key = store.pid[slot];

    store.x[slot] += distance * store.omega_x[slot];
    store.y[slot] += distance * store.omega_y[slot];
    store.dt_to_census[slot] -= distance / speed;

    *ed_local += segment_energy_deposition(
        store.w[slot],
        distance,
        macro_xs.sigma_s_macro,
        macro_xs.sigma_a_macro,
        store.e[slot],
        pabsorb,
        material.mass_number,
    );

    let (r0, r1, _, _) = reactor_core_rng::rng(particle_key, ctx.master_key, *counter);
    *counter += 1;

    if r0 < pabsorb {
        store.w[slot] *= 1.0 - pabsorb;
    } else {
        let a = material.mass_number;
        let mu_cm = 1.0 - 2.0 * r1;
        let e = store.e[slot];
        let e_prime = e * (a * a + 2.0 * a * mu_cm + 1.0) / ((a + 1.0) * (a + 1.0));

        let cos_theta_lab =
            0.5 * ((a + 1.0) * (e_prime / e).sqrt() - (a - 1.0) * (e / e_prime).sqrt());
        let sin_theta_lab = (1.0 - cos_theta_lab * cos_theta_lab).max(0.0).sqrt();

        let omega_x = store.omega_x[slot];
        let omega_y = store.omega_y[slot];
        store.omega_x[slot] = omega_x * cos_theta_lab - omega_y * sin_theta_lab;
        store.omega_y[slot] = omega_x * sin_theta_lab + omega_y * cos_theta_lab;
        store.e[slot] = e_prime;

        debug_assert!(
            (store.omega_x[slot].powi(2) + store.omega_y[slot].powi(2) - 1.0).abs() < 1e-9,
            "direction cosines left the unit circle after scatter"
        );
    }

    counters.n_collisions += 1;
    counters.n_processed += 1;

    if store.e[slot] < material.min_energy_of_interest {
        flush_tally(tally, ctx, local_cell_x, local_cell_y, *ed_local);
        *ed_local = 0.0;
        store.alive[slot] = false;
        return Ok(());
    }

    // Resolucion de la ambiguedad de la fuente original (ver DESIGN.md):
    // el sorteo que resiembra `mfp_to_collision` tras una dispersion es
    // un sorteo fresco, con su propio contador, no una palabra reciclada
    // del sorteo de absorcion.
    let (r_next, _, _, _) = reactor_core_rng::rng(particle_key, ctx.master_key, *counter);
    *counter += 1;

    let (sigma_s_new, _) = material.scatter_xs.lookup(store.e[slot])?;
    let sigma_s_macro_new = macro_xs.number_density * sigma_s_new * BARNS;
    store.mfp_to_collision[slot] = -r_next.ln() / sigma_s_macro_new;

    trace!(particle = particle_key, energy = store.e[slot], "collision resolved");

    Ok(())
}

#[allow(clippy::too_many_arguments)]
fn handle_facet(
    slot: usize,
    store: &mut ParticleStore,
    mesh: &Mesh,
    tally: &Tally,
    ctx: &StepContext,
    counters: &mut EventCounters,
    material: &Material,
    macro_xs: &MacroCrossSections,
    distance: f64,
    pabsorb: f64,
    speed: f64,
    x_facet_is_x_axis: bool,
    local_cell_x: i32,
    local_cell_y: i32,
    ed_local: &mut f64,
) {
    store.x[slot] += distance * store.omega_x[slot];
    store.y[slot] += distance * store.omega_y[slot];

    store.mfp_to_collision[slot] -= distance * (macro_xs.sigma_s_macro + macro_xs.sigma_a_macro);
    store.dt_to_census[slot] -= distance / speed;

    *ed_local += segment_energy_deposition(
        store.w[slot],
        distance,
        macro_xs.sigma_s_macro,
        macro_xs.sigma_a_macro,
        store.e[slot],
        pabsorb,
        material.mass_number,
    );
    flush_tally(tally, ctx, local_cell_x, local_cell_y, *ed_local);
    *ed_local = 0.0;

    let (global_nx, global_ny) = mesh.global_dims();

    if x_facet_is_x_axis {
        let step: i32 = if store.omega_x[slot] >= 0.0 { 1 } else { -1 };
        let candidate = store.cell_x[slot] + step;
        if candidate < 0 || candidate >= global_nx as i32 {
            store.omega_x[slot] = -store.omega_x[slot];
        } else {
            store.cell_x[slot] = candidate;
        }
    } else {
        let step: i32 = if store.omega_y[slot] >= 0.0 { 1 } else { -1 };
        let candidate = store.cell_y[slot] + step;
        if candidate < 0 || candidate >= global_ny as i32 {
            store.omega_y[slot] = -store.omega_y[slot];
        } else {
            store.cell_y[slot] = candidate;
        }
    }

    debug_assert!(
        store.mfp_to_collision[slot] >= -1e-6,
        "mfp_to_collision went negative beyond tolerance after facet"
    );
    debug_assert!(
        store.dt_to_census[slot] >= -1e-15,
        "dt_to_census went negative beyond tolerance after facet"
    );

    counters.n_facets += 1;
    counters.n_processed += 1;
}

#[allow(clippy::too_many_arguments)]
fn handle_census(
    slot: usize,
    store: &mut ParticleStore,
    tally: &Tally,
    ctx: &StepContext,
    counters: &mut EventCounters,
    material: &Material,
    macro_xs: &MacroCrossSections,
    distance: f64,
    pabsorb: f64,
    speed: f64,
    local_cell_x: i32,
    local_cell_y: i32,
    ed_local: &mut f64,
) {
    store.x[slot] += distance * store.omega_x[slot];
    store.y[slot] += distance * store.omega_y[slot];
    store.dt_to_census[slot] = 0.0;
    store.mfp_to_collision[slot] -= distance * (macro_xs.sigma_s_macro + macro_xs.sigma_a_macro);

    let _ = speed;

    *ed_local += segment_energy_deposition(
        store.w[slot],
        distance,
        macro_xs.sigma_s_macro,
        macro_xs.sigma_a_macro,
        store.e[slot],
        pabsorb,
        material.mass_number,
    );
    flush_tally(tally, ctx, local_cell_x, local_cell_y, *ed_local);
    *ed_local = 0.0;

    counters.n_processed += 1;
}

#[cfg(test)]
mod tests {
    use super::*;
    use reactor_core_mesh::Mesh;
    use reactor_core_tally::Tally;
    use reactor_core_xs::CrossSectionTable;
    use reactor_domain_particles::{EventCounters, ParticleStore, StepContext};

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
    fn straight_streamer_crosses_three_facets_with_no_collisions() {
        let mesh = flat_mesh(4, 1, 1.0);
        let material = zero_xs_material();
        let tally = Tally::new(4, 1);
        let energy = 14.1e6;
        let speed = speed_of(energy);

        let mut store = ParticleStore::with_capacity(1);
        store.push(1, 0.5, 0.5, 1.0, 0.0, energy, 1.0, 0, 0, 0.0, 0.0);

        let ctx = StepContext::new(0, 3.0 / speed, 1, true);
        let mut counter = 0u64;
        let mut counters = EventCounters::zero();

        advance_particle(
            0, &mut counter, &mut store, &mesh, &material, &tally, &ctx, &mut counters,
        )
        .unwrap();

        assert!((store.x[0] - 3.5).abs() < 1e-6, "x = {}", store.x[0]);
        assert_eq!(counters.n_facets, 3);
        assert_eq!(counters.n_collisions, 0);
    }

    #[test]
    fn reflection_flips_direction_at_global_boundary() {
        let mesh = flat_mesh(4, 1, 1.0);
        let material = zero_xs_material();
        let tally = Tally::new(4, 1);
        let energy = 14.1e6;
        let speed = speed_of(energy);

        let mut store = ParticleStore::with_capacity(1);
        store.push(1, 0.5, 0.5, 1.0, 0.0, energy, 1.0, 0, 0, 0.0, 0.0);

        let ctx = StepContext::new(0, 10.0 / speed, 1, true);
        let mut counter = 0u64;
        let mut counters = EventCounters::zero();

        advance_particle(
            0, &mut counter, &mut store, &mesh, &material, &tally, &ctx, &mut counters,
        )
        .unwrap();

        assert!(store.cell_x[0] >= 0 && store.cell_x[0] < 4);
        assert!(counters.n_facets >= 3);
    }

    #[test]
    fn dead_particle_is_left_untouched() {
        let mesh = flat_mesh(1, 1, 1.0);
        let material = zero_xs_material();
        let tally = Tally::new(1, 1);

        let mut store = ParticleStore::with_capacity(1);
        store.push(1, 0.5, 0.5, 1.0, 0.0, 1.0, 1.0, 0, 0, 1.0, 0.0);
        store.alive[0] = false;

        let ctx = StepContext::new(0, 1.0, 1, false);
        let mut counter = 5u64;
        let mut counters = EventCounters::zero();

        advance_particle(
            0, &mut counter, &mut store, &mesh, &material, &tally, &ctx, &mut counters,
        )
        .unwrap();

        assert_eq!(counter, 5);
        assert_eq!(counters.n_processed, 0);
    }
}
