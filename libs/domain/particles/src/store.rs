// [libs/domain/particles/src/store.rs]
/*!
 * =================================================================
 * APARATO: PARTICLE POPULATION STORE
 * CLASIFICACION: DOMAIN MODELS (ESTRATO L2)
 * RESPONSABILIDAD: ALMACENAMIENTO SOA DE LA POBLACION DE PARTICULAS
 *
 * Estructura de arreglos (SoA), no arreglo de estructuras: cada campo
 * de la particula vive en su propio `Vec`, indexado por ranura. Esto
 * es lo que permite que el motor de transporte reparta rangos
 * disjuntos de ranuras entre hilos sin ningun aliasing entre ellos
 * (cada particula es mutada exclusivamente por el hilo que posee su
 * ranura durante el paso).
 * =================================================================
 */

/// Poblacion de particulas en representacion estructura-de-arreglos.
#[derive(Debug, Clone, Default)]
pub struct ParticleStore {
    /// Identificador estable de la particula, usado como `particle_key`
    /// en cada sorteo aleatorio a lo largo de toda su vida.
    pub pid: Vec<u64>,
    /// Coordenada x de posicion, en unidades de malla.
    pub x: Vec<f64>,
    /// Coordenada y de posicion.
    pub y: Vec<f64>,
    /// Coseno director en x.
    pub omega_x: Vec<f64>,
    /// Coseno director en y.
    pub omega_y: Vec<f64>,
    /// Energia cinetica, en eV.
    pub e: Vec<f64>,
    /// Peso estadistico, en `(0, 1]`.
    pub w: Vec<f64>,
    /// Indice de celda en x, coordenadas globales de malla.
    pub cell_x: Vec<i32>,
    /// Indice de celda en y, coordenadas globales de malla.
    pub cell_y: Vec<i32>,
    /// Tiempo restante del paso, en segundos.
    pub dt_to_census: Vec<f64>,
    /// Trayectos libres medios restantes hasta la proxima colision.
    pub mfp_to_collision: Vec<f64>,
    /// `true` mientras la particula siga activa en el paso.
    pub alive: Vec<bool>,
}

impl ParticleStore {
    /// Crea un almacen vacio con capacidad reservada para `capacity`
    /// particulas.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            pid: Vec::with_capacity(capacity),
            x: Vec::with_capacity(capacity),
            y: Vec::with_capacity(capacity),
            omega_x: Vec::with_capacity(capacity),
            omega_y: Vec::with_capacity(capacity),
            e: Vec::with_capacity(capacity),
            w: Vec::with_capacity(capacity),
            cell_x: Vec::with_capacity(capacity),
            cell_y: Vec::with_capacity(capacity),
            dt_to_census: Vec::with_capacity(capacity),
            mfp_to_collision: Vec::with_capacity(capacity),
            alive: Vec::with_capacity(capacity),
        }
    }

    /// Numero de ranuras ocupadas (vivas o muertas) en el almacen.
    #[must_use]
    pub fn len(&self) -> usize {
        self.x.len()
    }

    /// `true` si el almacen no tiene ninguna particula.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    /// Agrega una nueva particula al final del almacen, devolviendo su
    /// indice de ranura.
    #[allow(clippy::too_many_arguments)]
    pub fn push(
        &mut self,
        pid: u64,
        x: f64,
        y: f64,
        omega_x: f64,
        omega_y: f64,
        e: f64,
        w: f64,
        cell_x: i32,
        cell_y: i32,
        dt_to_census: f64,
        mfp_to_collision: f64,
    ) -> usize {
        let slot = self.x.len();
        self.pid.push(pid);
        self.x.push(x);
        self.y.push(y);
        self.omega_x.push(omega_x);
        self.omega_y.push(omega_y);
        self.e.push(e);
        self.w.push(w);
        self.cell_x.push(cell_x);
        self.cell_y.push(cell_y);
        self.dt_to_census.push(dt_to_census);
        self.mfp_to_collision.push(mfp_to_collision);
        self.alive.push(true);
        slot
    }

    /// Cuenta de particulas vivas, util para reportes de fin de paso.
    #[must_use]
    pub fn alive_count(&self) -> usize {
        self.alive.iter().filter(|&&a| a).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_appends_consistent_rows_across_all_fields() {
        let mut store = ParticleStore::with_capacity(2);
        let slot = store.push(7, 0.5, 0.5, 1.0, 0.0, 14.1, 1.0, 0, 0, 1e-6, 0.0);
        assert_eq!(slot, 0);
        assert_eq!(store.len(), 1);
        assert_eq!(store.pid[0], 7);
        assert_eq!(store.x[0], 0.5);
        assert!(store.alive[0]);
    }

    #[test]
    fn alive_count_ignores_dead_slots() {
        let mut store = ParticleStore::with_capacity(2);
        store.push(0, 0.0, 0.0, 1.0, 0.0, 1.0, 1.0, 0, 0, 1.0, 0.0);
        store.push(1, 0.0, 0.0, 1.0, 0.0, 1.0, 1.0, 0, 0, 1.0, 0.0);
        store.alive[1] = false;
        assert_eq!(store.alive_count(), 1);
    }
}
