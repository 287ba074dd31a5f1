// [libs/domain/particles/src/context.rs]
// =================================================================
// APARATO: STEP CONTEXT
// RESPONSABILIDAD: PARAMETROS EXPLICITOS DE UN PASO DE TIEMPO
//
// Reemplaza los contadores globales de modulo y la "master key"
// inyectada implicitamente: cada llamada al motor recibe este
// contexto por valor, sin estado mutable compartido fuera de el.
// =================================================================

/// Parametros de un unico paso de tiempo, pasados explicitamente a
/// cada llamada del motor de transporte.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepContext {
    /// Clave de paso, usada junto con `particle_key` para derivar los
    /// flujos aleatorios deterministas. Avanza monotonamente entre
    /// pasos para que los sorteos de cada paso sean disjuntos de los
    /// anteriores.
    pub master_key: u64,
    /// Duracion del paso de tiempo, en segundos.
    pub dt: f64,
    /// Numero total de particulas en la corrida completa (usado para
    /// normalizar la deposicion de energia por particula).
    pub ntotal_particles: u64,
    /// `true` si este es el primer paso de la particula (dispara el
    /// reinicio de `mfp_to_collision` descrito en el motor).
    pub initial: bool,
}

impl StepContext {
    /// Construye un contexto de paso.
    #[must_use]
    pub fn new(master_key: u64, dt: f64, ntotal_particles: u64, initial: bool) -> Self {
        Self {
            master_key,
            dt,
            ntotal_particles,
            initial,
        }
    }

    /// Deriva el contexto del siguiente paso: misma configuracion de
    /// corrida, `master_key` avanzada en uno, `initial = false`.
    #[must_use]
    pub fn next_step(&self) -> Self {
        Self {
            master_key: self.master_key.wrapping_add(1),
            dt: self.dt,
            ntotal_particles: self.ntotal_particles,
            initial: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn next_step_advances_master_key_and_clears_initial() {
        let first = StepContext::new(0, 1e-6, 1000, true);
        let second = first.next_step();
        assert_eq!(second.master_key, 1);
        assert!(!second.initial);
        assert_eq!(second.dt, first.dt);
        assert_eq!(second.ntotal_particles, first.ntotal_particles);
    }
}
