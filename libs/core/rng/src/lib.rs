// [libs/core/rng/src/lib.rs]
#![deny(missing_docs)]

//! # APARATO: RNG STRATUM ROOT
//! CLASIFICACION: CORE MATH (ESTRATO L1)
//! RESPONSABILIDAD: FLUJOS ALEATORIOS DETERMINISTAS POR PARTICULA
//!
//! Cada particula deriva su propio flujo de numeros a partir de su
//! identificador (`particle_key`), la clave de paso (`master_key`) y un
//! contador local. No hay estado compartido mutable: reordenar particulas
//! entre hilos o carriles SIMD no cambia el resultado.

mod threefry;

/// Ronda estandar Random123 para las dos construcciones (2x64 y 4x64).
const THREEFRY_ROUNDS: u32 = 20;

/// Convierte una palabra de 64 bits en un real abierto en ambos extremos de
/// `(0, 1)`: `u * 2^-64 + 2^-65`.
#[inline(always)]
fn word_to_open_unit(word: u64) -> f64 {
    const TWO_POW_NEG_64: f64 = 1.0 / 18_446_744_073_709_551_616.0;
    const TWO_POW_NEG_65: f64 = TWO_POW_NEG_64 / 2.0;
    (word as f64) * TWO_POW_NEG_64 + TWO_POW_NEG_65
}

/// Genera cuatro reales deterministas en `(0, 1)` para una particula dada.
///
/// `particle_key` identifica a la particula, `master_key` distingue el
/// paso de tiempo actual, y `counter` distingue llamadas sucesivas dentro
/// del mismo paso para la misma particula (por ejemplo: muestreo inicial
/// de `mfp_to_collision`, luego cada colision posterior).
#[must_use]
pub fn rng(particle_key: u64, master_key: u64, counter: u64) -> (f64, f64, f64, f64) {
    let key = [particle_key, master_key, 0, 0];
    let ctr = [counter, 0, 0, 0];
    let words = threefry::threefry4x64(key, ctr, THREEFRY_ROUNDS);

    (
        word_to_open_unit(words[0]),
        word_to_open_unit(words[1]),
        word_to_open_unit(words[2]),
        word_to_open_unit(words[3]),
    )
}

/// Variante de dos salidas, para sitios de llamada que solo necesitan dos
/// reales (spec: "simpler two-output variant is acceptable").
#[must_use]
pub fn rng2(particle_key: u64, master_key: u64, counter: u64) -> (f64, f64) {
    let key = [particle_key, master_key];
    let ctr = [counter, 0];
    let words = threefry::threefry2x64(key, ctr, THREEFRY_ROUNDS);

    (word_to_open_unit(words[0]), word_to_open_unit(words[1]))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_open_unit_interval(value: f64) {
        assert!(value > 0.0, "draw must be strictly greater than 0");
        assert!(value < 1.0, "draw must be strictly less than 1");
    }

    #[test]
    fn rng_draws_land_in_the_open_unit_interval() {
        for (pid, mk, c) in [(0u64, 0u64, 0u64), (1, 0, 0), (0, 1, 0), (42, 42, 42)] {
            let (u0, u1, u2, u3) = rng(pid, mk, c);
            assert_open_unit_interval(u0);
            assert_open_unit_interval(u1);
            assert_open_unit_interval(u2);
            assert_open_unit_interval(u3);
        }
    }

    #[test]
    fn rng_is_pure_and_deterministic() {
        let a = rng(7, 3, 99);
        let b = rng(7, 3, 99);
        assert_eq!(a, b);
    }

    #[test]
    fn rng_distinguishes_particle_master_and_counter() {
        let base = rng(0, 0, 0);
        assert_ne!(base, rng(1, 0, 0));
        assert_ne!(base, rng(0, 1, 0));
        assert_ne!(base, rng(0, 0, 1));
    }

    #[test]
    fn rng_streams_are_independent_of_schedule() {
        // Reordering "which particle draws first" must not change any
        // individual particle's stream: each call is a pure function of
        // its own (pid, master_key, counter).
        let particle_five_first = rng(5, 0, 0);
        let _ = rng(9, 0, 0);
        let particle_five_second = rng(5, 0, 0);
        assert_eq!(particle_five_first, particle_five_second);
    }

    #[test]
    fn rng_matches_pinned_reference_vectors() {
        // Reference outputs for the threefry4x64 construction this module
        // wraps (key=[pid,mk,0,0], ctr=[counter,0,0,0], 20 rounds),
        // computed independently from the same algorithm.
        let cases: [((u64, u64, u64), (f64, f64, f64, f64)); 4] = [
            (
                (0, 0, 0),
                (
                    0.03566829811350776,
                    0.334291417710888,
                    0.29617870369851645,
                    0.9303272078794397,
                ),
            ),
            (
                (1, 0, 0),
                (
                    0.03396027894915549,
                    0.7510054632646931,
                    0.19446893574094,
                    0.5452675772887813,
                ),
            ),
            (
                (0, 1, 0),
                (
                    0.5312110862623868,
                    0.8958830749573998,
                    0.6777139057693563,
                    0.5471703152839055,
                ),
            ),
            (
                (42, 42, 42),
                (
                    0.3298849871942936,
                    0.7345708002580619,
                    0.8627806552236817,
                    0.29229116007059774,
                ),
            ),
        ];

        for ((pid, mk, c), expected) in cases {
            assert_eq!(rng(pid, mk, c), expected, "mismatch for (pid={pid}, mk={mk}, c={c})");
        }
    }

    #[test]
    fn rng2_matches_rng_purity_properties() {
        let a = rng2(3, 1, 2);
        let b = rng2(3, 1, 2);
        assert_eq!(a, b);
        assert_ne!(rng2(3, 1, 2), rng2(3, 1, 3));
    }
}
