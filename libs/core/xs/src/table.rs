// [libs/core/xs/src/table.rs]
/*!
 * =================================================================
 * APARATO: CROSS-SECTION LOOKUP TABLE
 * CLASIFICACION: CORE MATH DATA (ESTRATO L1)
 * RESPONSABILIDAD: BUSQUEDA DE SECCION EFICAZ POR ENERGIA
 *
 * Tabla monotona e inmutable de pares (energia, valor). La busqueda
 * usa un guess-and-step de ancho decreciente: arranca en el punto
 * medio y, en cada iteracion que falla, da un salto de la mitad del
 * ancho anterior (acotado a 1) en la direccion correcta. Converge en
 * pocos pasos sin necesitar el log2(n) completo de una biseccion
 * clasica cuando la energia consultada esta cerca del ultimo punto
 * de acceso (localidad tipica de un barrido de energias de salida
 * de colision, que suele moverse poco entre consultas sucesivas).
 * =================================================================
 */

use crate::errors::XsError;

/// Tabla ordenada e inmutable de secciones eficaces microscopicas.
#[derive(Debug, Clone)]
pub struct CrossSectionTable {
    keys: Vec<f64>,
    values: Vec<f64>,
}

impl CrossSectionTable {
    /// Construye una tabla a partir de pares `(energia, valor)` ya
    /// ordenados por energia creciente.
    ///
    /// # Errors
    /// Retorna [`XsError::InvalidTable`] si hay menos de dos puntos o si
    /// las claves no son estrictamente crecientes.
    pub fn from_pairs(pairs: &[(f64, f64)]) -> Result<Self, XsError> {
        if pairs.len() < 2 {
            return Err(XsError::InvalidTable);
        }

        let mut keys = Vec::with_capacity(pairs.len());
        let mut values = Vec::with_capacity(pairs.len());

        for window in pairs.windows(2) {
            if !(window[0].0 < window[1].0) {
                return Err(XsError::InvalidTable);
            }
        }

        for &(key, value) in pairs {
            keys.push(key);
            values.push(value);
        }

        Ok(Self { keys, values })
    }

    /// Numero de puntos almacenados.
    #[must_use]
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// `true` si la tabla esta vacia (nunca ocurre tras `from_pairs`, que
    /// exige al menos dos puntos; expuesto por simetria con `len`).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Busca el intervalo `[keys[ix], keys[ix+1])` que contiene `energy` e
    /// interpola linealmente el valor correspondiente.
    ///
    /// # Errors
    /// Retorna [`XsError::OutOfRange`] si `energy` cae fuera de
    /// `[keys[0], keys[last])`.
    pub fn lookup(&self, energy: f64) -> Result<(f64, usize), XsError> {
        let low = self.keys[0];
        let high = self.keys[self.keys.len() - 1];

        if !(energy >= low && energy < high) {
            return Err(XsError::OutOfRange { energy, low, high });
        }

        let ix = self.find_interval(energy);
        let (key_lo, key_hi) = (self.keys[ix], self.keys[ix + 1]);
        let (val_lo, val_hi) = (self.values[ix], self.values[ix + 1]);

        let fraction = (energy - key_lo) / (key_hi - key_lo);
        let interpolated = val_lo + fraction * (val_hi - val_lo);

        Ok((interpolated, ix))
    }

    /// Guess-and-step de ancho decreciente: arranca en el punto medio y
    /// acota el ancho de salto a la mitad en cada iteracion (minimo 1),
    /// hasta aterrizar en el intervalo que contiene `energy`.
    fn find_interval(&self, energy: f64) -> usize {
        let last_index = self.keys.len() - 2;
        let mut ix = last_index / 2;
        let mut width = (last_index / 2).max(1);

        loop {
            if self.keys[ix] <= energy && energy < self.keys[ix + 1] {
                return ix;
            }

            if energy < self.keys[ix] {
                ix = ix.saturating_sub(width);
            } else {
                ix = (ix + width).min(last_index);
            }

            width = (width / 2).max(1);
        }
    }
}
