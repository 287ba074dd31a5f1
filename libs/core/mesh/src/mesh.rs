// [libs/core/mesh/src/mesh.rs]
/*!
 * =================================================================
 * APARATO: PADDED MESH VIEW
 * CLASIFICACION: CORE MATH DATA (ESTRATO L1)
 * RESPONSABILIDAD: GEOMETRIA DE MALLA Y DENSIDAD DE CELDA
 *
 * Vista de solo lectura sobre una malla cartesiana rectangular con
 * celdas fantasma (ghost cells) en el borde de cada mosaico local.
 * Los accesores reciben coordenadas de celda locales (sin acolchado)
 * y trasladan internamente al indice acolchado: el motor de
 * transporte nunca ve la aritmetica de `pad`.
 * =================================================================
 */

use crate::errors::MeshError;

/// Vista inmutable de una malla cartesiana 2D con celdas fantasma.
#[derive(Debug, Clone)]
pub struct Mesh {
    global_nx: usize,
    global_ny: usize,
    nx: usize,
    ny: usize,
    x_off: usize,
    y_off: usize,
    pad: usize,
    edge_x: Vec<f64>,
    edge_y: Vec<f64>,
    density: Vec<f64>,
}

impl Mesh {
    /// Construye una malla a partir de las coordenadas de borde y la
    /// densidad por celda del mosaico local acolchado.
    ///
    /// `edge_x` debe tener `nx + 2*pad + 1` puntos estrictamente
    /// crecientes (analogamente `edge_y` con `ny`); `density` debe tener
    /// `(nx + 2*pad) * (ny + 2*pad)` entradas no negativas.
    ///
    /// # Errors
    /// [`MeshError::InvalidMesh`] si un eje no es estrictamente creciente.
    /// [`MeshError::DensityLengthMismatch`] si `density` no tiene la
    /// longitud esperada.
    pub fn new(
        global_nx: usize,
        global_ny: usize,
        nx: usize,
        ny: usize,
        x_off: usize,
        y_off: usize,
        pad: usize,
        edge_x: Vec<f64>,
        edge_y: Vec<f64>,
        density: Vec<f64>,
    ) -> Result<Self, MeshError> {
        let expected_edge_x_len = nx + 2 * pad + 1;
        let expected_edge_y_len = ny + 2 * pad + 1;

        if edge_x.len() != expected_edge_x_len || edge_y.len() != expected_edge_y_len {
            return Err(MeshError::InvalidMesh);
        }

        if !is_strictly_increasing(&edge_x) || !is_strictly_increasing(&edge_y) {
            return Err(MeshError::InvalidMesh);
        }

        let expected_density_len = (nx + 2 * pad) * (ny + 2 * pad);
        if density.len() != expected_density_len {
            return Err(MeshError::DensityLengthMismatch {
                actual: density.len(),
                expected: expected_density_len,
            });
        }

        if density.iter().any(|&rho| rho < 0.0 || !rho.is_finite()) {
            return Err(MeshError::InvalidMesh);
        }

        Ok(Self {
            global_nx,
            global_ny,
            nx,
            ny,
            x_off,
            y_off,
            pad,
            edge_x,
            edge_y,
            density,
        })
    }

    /// Dimensiones globales del dominio completo (todos los mosaicos).
    #[must_use]
    pub fn global_dims(&self) -> (usize, usize) {
        (self.global_nx, self.global_ny)
    }

    /// Dimensiones del mosaico local, sin contar las celdas fantasma.
    #[must_use]
    pub fn local_dims(&self) -> (usize, usize) {
        (self.nx, self.ny)
    }

    /// Desplazamiento del mosaico local dentro del dominio global.
    #[must_use]
    pub fn offset(&self) -> (usize, usize) {
        (self.x_off, self.y_off)
    }

    /// Numero de celdas fantasma en cada borde del mosaico.
    #[must_use]
    pub fn pad(&self) -> usize {
        self.pad
    }

    /// Traslada un indice de celda local (puede ser negativo, dentro del
    /// acolchado) al indice correspondiente en el buffer acolchado.
    #[inline(always)]
    fn padded_index_x(&self, local_cell_x: i32) -> usize {
        debug_assert!(local_cell_x >= -(self.pad as i32));
        debug_assert!(local_cell_x < (self.nx + self.pad) as i32);
        (local_cell_x + self.pad as i32) as usize
    }

    #[inline(always)]
    fn padded_index_y(&self, local_cell_y: i32) -> usize {
        debug_assert!(local_cell_y >= -(self.pad as i32));
        debug_assert!(local_cell_y < (self.ny + self.pad) as i32);
        (local_cell_y + self.pad as i32) as usize
    }

    /// Coordenadas `(lo, hi)` de los bordes de la celda local `cell_x` en
    /// el eje x.
    #[must_use]
    pub fn cell_edges_x(&self, local_cell_x: i32) -> (f64, f64) {
        let ix = self.padded_index_x(local_cell_x);
        (self.edge_x[ix], self.edge_x[ix + 1])
    }

    /// Coordenadas `(lo, hi)` de los bordes de la celda local `cell_y` en
    /// el eje y.
    #[must_use]
    pub fn cell_edges_y(&self, local_cell_y: i32) -> (f64, f64) {
        let iy = self.padded_index_y(local_cell_y);
        (self.edge_y[iy], self.edge_y[iy + 1])
    }

    /// Densidad de la celda local `(cell_x, cell_y)`.
    #[must_use]
    pub fn density(&self, local_cell_x: i32, local_cell_y: i32) -> f64 {
        let ix = self.padded_index_x(local_cell_x);
        let iy = self.padded_index_y(local_cell_y);
        self.density[iy * (self.nx + 2 * self.pad) + ix]
    }

    /// `true` si `(local_cell_x, local_cell_y)` cae dentro del mosaico
    /// local (excluyendo celdas fantasma).
    #[must_use]
    pub fn contains_local_cell(&self, local_cell_x: i32, local_cell_y: i32) -> bool {
        local_cell_x >= 0
            && local_cell_y >= 0
            && (local_cell_x as usize) < self.nx
            && (local_cell_y as usize) < self.ny
    }
}

fn is_strictly_increasing(values: &[f64]) -> bool {
    values.windows(2).all(|w| w[0].is_finite() && w[1] > w[0])
}
