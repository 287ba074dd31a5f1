// [libs/domain/particles/src/counters.rs]
// =================================================================
// APARATO: EVENT COUNTERS
// RESPONSABILIDAD: CONTEO DE EVENTOS POR TRABAJADOR Y SU REDUCCION
// =================================================================

/// Contadores de eventos acumulados durante un paso, locales a un
/// trabajador hasta que el driver los reduce por suma al final del
/// paso.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EventCounters {
    /// Numero de cruces de faceta (borde de celda) procesados.
    pub n_facets: u64,
    /// Numero de colisiones (absorcion o dispersion) procesadas.
    pub n_collisions: u64,
    /// Numero total de iteraciones de particula procesadas (facet +
    /// collision + census).
    pub n_processed: u64,
}

impl EventCounters {
    /// Contadores en cero, el punto de partida de cada trabajador.
    #[must_use]
    pub fn zero() -> Self {
        Self::default()
    }

    /// Combina los contadores de otro trabajador en este, por suma
    /// componente a componente.
    pub fn merge(&mut self, other: &Self) {
        self.n_facets += other.n_facets;
        self.n_collisions += other.n_collisions;
        self.n_processed += other.n_processed;
    }

    /// Reduce una coleccion de contadores locales en un unico total,
    /// tipicamente uno por trabajador al final de un paso.
    #[must_use]
    pub fn reduce<I: IntoIterator<Item = Self>>(counters: I) -> Self {
        let mut total = Self::zero();
        for counter in counters {
            total.merge(&counter);
        }
        total
    }
}
