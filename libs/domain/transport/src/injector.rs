// [libs/domain/transport/src/injector.rs]
/*!
 * =================================================================
 * APARATO: PARTICLE INJECTOR
 * CLASIFICACION: DOMAIN STRATEGY (ESTRATO L2)
 * RESPONSABILIDAD: SIEMBRA INICIAL DE LA POBLACION DE PARTICULAS
 *
 * Cada particula nueva recibe su identificador `pid` y deriva toda su
 * geometria inicial (posicion, celda, direccion) de un unico sorteo
 * `rng(pid, 0, 0)`. El particionamiento entre hilos es embarazosamente
 * paralelo: ninguna particula consulta el estado de otra.
 * =================================================================
 */

use reactor_core_mesh::Mesh;
use reactor_domain_particles::ParticleStore;
use std::f64::consts::PI;
use tracing::info;

/// Rectangulo fuente en coordenadas de mundo, `[x_lo, x_hi) x [y_lo, y_hi)`.
#[derive(Debug, Clone, Copy)]
pub struct SourceRegion {
    /// Limite inferior en x.
    pub x_lo: f64,
    /// Limite superior en x.
    pub x_hi: f64,
    /// Limite inferior en y.
    pub y_lo: f64,
    /// Limite superior en y.
    pub y_hi: f64,
}

/// Ubica el indice de celda global que contiene `position` en el eje
/// cuyos bordes vienen dados en `edges`, explorando el arreglo de
/// bordes (malla no uniforme permitida).
fn locate_cell(edges: &[f64], position: f64) -> i32 {
    for (index, window) in edges.windows(2).enumerate() {
        if position >= window[0] && position < window[1] {
            return index as i32;
        }
    }
    (edges.len() as i32 - 2).max(0)
}

/// Siembra `count` particulas nuevas dentro de `region`, a energia
/// `initial_energy`, y las agrega a `store`.
///
/// Para cada particula con identificador `pid` (de `next_pid` a
/// `next_pid + count - 1`): sortea cuatro numeros con
/// `rng(pid, 0, 0)`, ubica `(x, y)` uniformemente en `region`, localiza
/// la celda escaneando los bordes de malla, y fija la direccion desde
/// `theta = 2*pi*r_theta`.
pub fn inject_particles(
    store: &mut ParticleStore,
    mesh: &Mesh,
    region: &SourceRegion,
    initial_energy: f64,
    dt: f64,
    next_pid: u64,
    count: u64,
) {
    info!(count, next_pid, "injecting new particle population");

    let global_edge_x = global_edges_x(mesh);
    let global_edge_y = global_edges_y(mesh);

    for offset in 0..count {
        let pid = next_pid + offset;
        let (r_x, r_y, r_theta, _) = reactor_core_rng::rng(pid, 0, 0);

        let x = region.x_lo + r_x * (region.x_hi - region.x_lo);
        let y = region.y_lo + r_y * (region.y_hi - region.y_lo);

        let cell_x = locate_cell(&global_edge_x, x);
        let cell_y = locate_cell(&global_edge_y, y);

        let theta = 2.0 * PI * r_theta;
        let (omega_x, omega_y) = (theta.cos(), theta.sin());

        store.push(pid, x, y, omega_x, omega_y, initial_energy, 1.0, cell_x, cell_y, dt, 0.0);
    }
}

/// Reconstruye el arreglo de bordes en x a partir de la vista local de
/// malla, asumiendo que el mosaico actual cubre todo el dominio
/// global (caso de un unico mosaico, el unico soportado por el
/// inyector en esta version).
fn global_edges_x(mesh: &Mesh) -> Vec<f64> {
    let (nx, _) = mesh.local_dims();
    let mut edges: Vec<f64> = (0..nx as i32).map(|i| mesh.cell_edges_x(i).0).collect();
    edges.push(mesh.cell_edges_x(nx as i32 - 1).1);
    edges
}

fn global_edges_y(mesh: &Mesh) -> Vec<f64> {
    let (_, ny) = mesh.local_dims();
    let mut edges: Vec<f64> = (0..ny as i32).map(|i| mesh.cell_edges_y(i).0).collect();
    edges.push(mesh.cell_edges_y(ny as i32 - 1).1);
    edges
}
