// [libs/core/tally/src/lib.rs]
#![deny(missing_docs)]

/*!
 * =================================================================
 * APARATO: ATOMIC ENERGY TALLY
 * CLASIFICACION: CORE MATH DATA (ESTRATO L1)
 * RESPONSABILIDAD: ACUMULACION CONCURRENTE DE ENERGIA DEPOSITADA
 *
 * Cada celda de la malla acumula energia desde multiples hilos
 * trabajadores sin cerrojo. `f64` no tiene una operacion atomica de
 * suma nativa y estable, asi que cada celda se representa como un
 * `AtomicU64` portando el patron de bits de un `f64`, actualizado con
 * un bucle de comparacion-e-intercambio (CAS). Esta es la unica
 * implementacion, no un respaldo condicional: no existe una ruta sin
 * CAS en este aparato.
 * =================================================================
 */

use std::sync::atomic::{AtomicU64, Ordering};

/// Tabla de acumulacion atomica de energia depositada, una entrada por
/// celda del mosaico local (sin celdas fantasma).
pub struct Tally {
    cells: Vec<AtomicU64>,
    nx: usize,
    ny: usize,
}

impl Tally {
    /// Crea una tabla de `nx * ny` celdas, todas inicializadas en cero.
    #[must_use]
    pub fn new(nx: usize, ny: usize) -> Self {
        let mut cells = Vec::with_capacity(nx * ny);
        cells.resize_with(nx * ny, || AtomicU64::new(0.0f64.to_bits()));
        Self { cells, nx, ny }
    }

    /// Dimensiones del mosaico que respalda esta tabla.
    #[must_use]
    pub fn dims(&self) -> (usize, usize) {
        (self.nx, self.ny)
    }

    #[inline(always)]
    fn index(&self, cell_x: usize, cell_y: usize) -> usize {
        debug_assert!(cell_x < self.nx);
        debug_assert!(cell_y < self.ny);
        cell_y * self.nx + cell_x
    }

    /// Suma `delta` a la celda `(cell_x, cell_y)` de forma atomica.
    ///
    /// Implementado como bucle `compare_exchange_weak` sobre el patron de
    /// bits del `f64`: lee el valor actual, calcula la suma, e intenta
    /// reemplazarlo; reintenta si otro hilo gano la carrera.
    pub fn add(&self, cell_x: usize, cell_y: usize, delta: f64) {
        let slot = &self.cells[self.index(cell_x, cell_y)];
        let mut current_bits = slot.load(Ordering::Relaxed);

        loop {
            let current_value = f64::from_bits(current_bits);
            let updated_bits = (current_value + delta).to_bits();

            match slot.compare_exchange_weak(
                current_bits,
                updated_bits,
                Ordering::Relaxed,
                Ordering::Relaxed,
            ) {
                Ok(_) => return,
                Err(actual_bits) => current_bits = actual_bits,
            }
        }
    }

    /// Lee el valor acumulado en `(cell_x, cell_y)`.
    #[must_use]
    pub fn get(&self, cell_x: usize, cell_y: usize) -> f64 {
        let slot = &self.cells[self.index(cell_x, cell_y)];
        f64::from_bits(slot.load(Ordering::Relaxed))
    }

    /// Toma una instantanea de toda la tabla, fila por fila (`y` externo,
    /// `x` interno), pensada para usarse tras la barrera de fin de paso.
    #[must_use]
    pub fn snapshot(&self) -> Vec<f64> {
        self.cells
            .iter()
            .map(|cell| f64::from_bits(cell.load(Ordering::Relaxed)))
            .collect()
    }

    /// Pone a cero todas las celdas. Uso tipico: entre corridas de prueba
    /// o al reiniciar una acumulacion por ventana de reporte.
    pub fn reset(&self) {
        for cell in &self.cells {
            cell.store(0.0f64.to_bits(), Ordering::Relaxed);
        }
    }
}
