// [reactor-driver/src/main.rs]
/*!
 * =================================================================
 * APARATO: REACTOR DRIVER SHELL
 * CLASIFICACION: APPLICATION LAYER (ENTRY POINT)
 * RESPONSABILIDAD: BOOTSTRAP DE ENTORNO E IGNICION DEL MOTOR DE TRANSPORTE
 *
 * Orquestador puro: parsea directivas, construye la malla/material/
 * poblacion inicial, y delega cada paso de tiempo al motor de
 * transporte. Un `Arc<AtomicBool>` de apagado se revisa entre pasos
 * de tiempo, nunca a mitad de uno -- un paso siempre corre hasta el
 * censo de todas las particulas antes de que el apagado surta efecto.
 * =================================================================
 */

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{error, info, warn};

use reactor_core_mesh::Mesh;
use reactor_core_tally::Tally;
use reactor_core_xs::CrossSectionTable;
use reactor_domain_particles::{EventCounters, ParticleStore, StepContext};
use reactor_domain_transport::{inject_particles, read_tally, Material, SourceRegion};

/// Directivas de mando para una corrida soberana del transporte de
/// neutrones. Configuracion inyectada via CLI o variables de entorno.
#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "2D Monte Carlo neutron transport core runner"
)]
struct ReactorRunDirectives {
    /// Celdas de malla en x.
    #[arg(long, env = "REACTOR_NX", default_value_t = 32)]
    nx: usize,

    /// Celdas de malla en y.
    #[arg(long, env = "REACTOR_NY", default_value_t = 32)]
    ny: usize,

    /// Ancho fisico de cada celda de malla (malla uniforme cuadrada).
    #[arg(long, env = "REACTOR_CELL_WIDTH", default_value_t = 1.0)]
    cell_width: f64,

    /// Densidad uniforme del material de fondo, en g/cm^3.
    #[arg(long, env = "REACTOR_DENSITY", default_value_t = 1.0)]
    density: f64,

    /// Numero de pasos de tiempo a ejecutar.
    #[arg(long, env = "REACTOR_TIMESTEPS", default_value_t = 10)]
    timesteps: u64,

    /// Duracion de cada paso de tiempo, en segundos.
    #[arg(long, env = "REACTOR_DT", default_value_t = 1e-8)]
    dt: f64,

    /// Particulas nuevas sembradas en el primer paso.
    #[arg(long, env = "REACTOR_PARTICLE_COUNT", default_value_t = 10_000)]
    particle_count: u64,

    /// Energia inicial de las particulas sembradas, en eV.
    #[arg(long, env = "REACTOR_INITIAL_ENERGY", default_value_t = 14.1e6)]
    initial_energy: f64,

    /// Limite inferior en x de la region fuente.
    #[arg(long, env = "REACTOR_SOURCE_X_LO", default_value_t = 0.0)]
    source_x_lo: f64,

    /// Limite superior en x de la region fuente.
    #[arg(long, env = "REACTOR_SOURCE_X_HI")]
    source_x_hi: Option<f64>,

    /// Limite inferior en y de la region fuente.
    #[arg(long, env = "REACTOR_SOURCE_Y_LO", default_value_t = 0.0)]
    source_y_lo: f64,

    /// Limite superior en y de la region fuente.
    #[arg(long, env = "REACTOR_SOURCE_Y_HI")]
    source_y_hi: Option<f64>,

    /// Numero de masa `A` del nucleido dispersor del material.
    #[arg(long, env = "REACTOR_MASS_NUMBER", default_value_t = 12.0)]
    mass_number: f64,

    /// Masa molar del material, en g/mol.
    #[arg(long, env = "REACTOR_MOLAR_MASS", default_value_t = 12.011)]
    molar_mass: f64,

    /// Seccion eficaz microscopica de dispersion, en barns (uniforme en
    /// todo el rango de energia relevante).
    #[arg(long, env = "REACTOR_SCATTER_XS_BARNS", default_value_t = 4.7)]
    scatter_xs_barns: f64,

    /// Seccion eficaz microscopica de absorcion, en barns.
    #[arg(long, env = "REACTOR_ABSORB_XS_BARNS", default_value_t = 0.0035)]
    absorb_xs_barns: f64,

    /// Umbral de energia por debajo del cual una particula se da por
    /// muerta, en eV.
    #[arg(long, env = "REACTOR_MIN_ENERGY_OF_INTEREST", default_value_t = 1e-10)]
    min_energy_of_interest: f64,

    /// Semilla determinista de la clave maestra de paso. Si se omite,
    /// la corrida arranca en cero.
    #[arg(long, env = "REACTOR_MASTER_KEY_SEED", default_value_t = 0)]
    master_key_seed: u64,

    /// Ruta opcional donde volcar el tally final en formato CSV.
    #[arg(long, env = "REACTOR_TALLY_CSV")]
    tally_csv: Option<std::path::PathBuf>,
}

fn main() -> Result<()> {
    reactor_shared_telemetry::init_tracing("reactor_driver");

    let directives = ReactorRunDirectives::parse();

    let shutdown_requested = Arc::new(AtomicBool::new(false));
    let shutdown_signal_for_handler = Arc::clone(&shutdown_requested);
    ctrlc::set_handler(move || {
        warn!("shutdown requested by host, will stop after the current timestep completes");
        shutdown_signal_for_handler.store(true, Ordering::SeqCst);
    })
    .context("failed to install Ctrl+C handler")?;

    let run_started_at = Instant::now();
    let report = run(&directives, &shutdown_requested)?;

    info!(
        timesteps_executed = report.timesteps_executed,
        n_facets = report.counters.n_facets,
        n_collisions = report.counters.n_collisions,
        n_processed = report.counters.n_processed,
        total_energy_deposited = report.total_energy_deposited,
        wall_clock_seconds = run_started_at.elapsed().as_secs_f64(),
        "run complete"
    );

    Ok(())
}

struct RunReport {
    timesteps_executed: u64,
    counters: EventCounters,
    total_energy_deposited: f64,
}

fn run(directives: &ReactorRunDirectives, shutdown_requested: &Arc<AtomicBool>) -> Result<RunReport> {
    let source_x_hi = directives
        .source_x_hi
        .unwrap_or(directives.nx as f64 * directives.cell_width);
    let source_y_hi = directives
        .source_y_hi
        .unwrap_or(directives.ny as f64 * directives.cell_width);

    let edge_x: Vec<f64> = (0..=directives.nx)
        .map(|i| i as f64 * directives.cell_width)
        .collect();
    let edge_y: Vec<f64> = (0..=directives.ny)
        .map(|i| i as f64 * directives.cell_width)
        .collect();
    let cell_density = vec![directives.density; directives.nx * directives.ny];

    let mesh = Mesh::new(
        directives.nx,
        directives.ny,
        directives.nx,
        directives.ny,
        0,
        0,
        0,
        edge_x,
        edge_y,
        cell_density,
    )
    .context("failed to build reactor mesh")?;

    let scatter_xs = CrossSectionTable::from_pairs(&[
        (1e-10, directives.scatter_xs_barns),
        (1e8, directives.scatter_xs_barns),
    ])
    .context("failed to build scattering cross-section table")?;
    let absorb_xs = CrossSectionTable::from_pairs(&[
        (1e-10, directives.absorb_xs_barns),
        (1e8, directives.absorb_xs_barns),
    ])
    .context("failed to build absorption cross-section table")?;

    let material = Material::new(
        directives.mass_number,
        directives.molar_mass,
        scatter_xs,
        absorb_xs,
        directives.min_energy_of_interest,
    );

    let tally = Tally::new(directives.nx, directives.ny);
    let mut store = ParticleStore::with_capacity(directives.particle_count as usize);

    let source_region = SourceRegion {
        x_lo: directives.source_x_lo,
        x_hi: source_x_hi,
        y_lo: directives.source_y_lo,
        y_hi: source_y_hi,
    };

    info!(
        particle_count = directives.particle_count,
        nx = directives.nx,
        ny = directives.ny,
        "seeding initial particle population"
    );
    inject_particles(
        &mut store,
        &mesh,
        &source_region,
        directives.initial_energy,
        directives.dt,
        0,
        directives.particle_count,
    );

    let mut particle_counters = vec![0u64; store.len()];
    let mut ctx = StepContext::new(directives.master_key_seed, directives.dt, directives.particle_count, true);
    let mut run_totals = EventCounters::zero();
    let mut timesteps_executed = 0u64;

    for timestep in 0..directives.timesteps {
        if shutdown_requested.load(Ordering::SeqCst) {
            warn!(timestep, "stopping run early due to shutdown request");
            break;
        }

        let step_totals = reactor_domain_transport::advance_particles_one_step(
            &mut store,
            &mut particle_counters,
            &mesh,
            &material,
            &tally,
            &ctx,
        )
        .map_err(|fault| {
            error!(timestep, %fault, "transport step aborted");
            fault
        })?;

        run_totals.merge(&step_totals);
        timesteps_executed += 1;
        ctx = ctx.next_step();

        info!(
            timestep,
            alive = store.alive_count(),
            n_facets = step_totals.n_facets,
            n_collisions = step_totals.n_collisions,
            "timestep complete"
        );
    }

    let snapshot = read_tally(&tally);
    let total_energy_deposited: f64 = snapshot.iter().sum();

    if let Some(path) = &directives.tally_csv {
        write_tally_csv(path, &snapshot, directives.nx, directives.ny)
            .with_context(|| format!("failed to write tally CSV to {}", path.display()))?;
    }

    Ok(RunReport {
        timesteps_executed,
        counters: run_totals,
        total_energy_deposited,
    })
}

fn write_tally_csv(path: &std::path::Path, snapshot: &[f64], nx: usize, ny: usize) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record(["cell_x", "cell_y", "energy_deposited"])?;
    for cell_y in 0..ny {
        for cell_x in 0..nx {
            let value = snapshot[cell_y * nx + cell_x];
            writer.write_record([cell_x.to_string(), cell_y.to_string(), value.to_string()])?;
        }
    }
    writer.flush()?;
    Ok(())
}
