// [libs/core/rng/src/threefry.rs]
/*!
 * =================================================================
 * APARATO: THREEFRY COUNTER-BASED CIPHER
 * CLASIFICACION: CORE MATH (ESTRATO L1)
 * RESPONSABILIDAD: PERMUTACION DETERMINISTA DE BLOQUES DE CONTADOR
 *
 * No lleva estado mutable: cada llamada es una funcion pura del
 * bloque de clave y del bloque de contador. Esto es lo que permite
 * que el flujo aleatorio de una particula sea independiente del
 * orden en que los hilos o los carriles SIMD la procesan.
 * =================================================================
 */

const SKEIN_KS_PARITY: u64 = 0x1BD1_1BDA_A9FC_1A22;

/// Tabla de rotaciones Threefry-4x64, una pareja por ronda del ciclo de 8.
const ROTATION_4X64: [(u32, u32); 8] = [
    (14, 16),
    (52, 57),
    (23, 40),
    (5, 37),
    (25, 33),
    (46, 12),
    (58, 22),
    (32, 32),
];

/// Tabla de rotaciones Threefry-2x64, una por ronda del ciclo de 8.
const ROTATION_2X64: [u32; 8] = [16, 42, 12, 31, 16, 32, 24, 21];

#[inline(always)]
fn rotl64(x: u64, n: u32) -> u64 {
    x.rotate_left(n)
}

/// Aplica la permutacion Threefry-4x64 de `rounds` rondas sobre el bloque
/// de contador `ctr`, con clave `key`. Bit-perfect frente a la referencia
/// Random123 para `rounds <= 72`.
#[must_use]
pub fn threefry4x64(key: [u64; 4], ctr: [u64; 4], rounds: u32) -> [u64; 4] {
    let ks4 = SKEIN_KS_PARITY ^ key[0] ^ key[1] ^ key[2] ^ key[3];
    let ks = [key[0], key[1], key[2], key[3], ks4];

    let mut x = [
        ctr[0].wrapping_add(ks[0]),
        ctr[1].wrapping_add(ks[1]),
        ctr[2].wrapping_add(ks[2]),
        ctr[3].wrapping_add(ks[3]),
    ];

    for round in 0..rounds {
        let (r0, r1) = ROTATION_4X64[(round % 8) as usize];

        if round % 2 == 0 {
            x[0] = x[0].wrapping_add(x[1]);
            x[1] = rotl64(x[1], r0) ^ x[0];
            x[2] = x[2].wrapping_add(x[3]);
            x[3] = rotl64(x[3], r1) ^ x[2];
        } else {
            x[0] = x[0].wrapping_add(x[3]);
            x[3] = rotl64(x[3], r0) ^ x[0];
            x[2] = x[2].wrapping_add(x[1]);
            x[1] = rotl64(x[1], r1) ^ x[2];
        }

        if (round + 1) % 4 == 0 {
            let s = ((round + 1) / 4) as u64;
            x[0] = x[0].wrapping_add(ks[(s as usize) % 5]);
            x[1] = x[1].wrapping_add(ks[(s as usize + 1) % 5]);
            x[2] = x[2].wrapping_add(ks[(s as usize + 2) % 5]);
            x[3] = x[3].wrapping_add(ks[(s as usize + 3) % 5].wrapping_add(s));
        }
    }

    x
}

/// Variante Threefry-2x64, usada cuando el sitio de llamada solo necesita
/// dos palabras de salida (ver spec: "simpler two-output variant").
#[must_use]
pub fn threefry2x64(key: [u64; 2], ctr: [u64; 2], rounds: u32) -> [u64; 2] {
    let ks2 = SKEIN_KS_PARITY ^ key[0] ^ key[1];
    let ks = [key[0], key[1], ks2];

    let mut x = [ctr[0].wrapping_add(ks[0]), ctr[1].wrapping_add(ks[1])];

    for round in 0..rounds {
        let r = ROTATION_2X64[(round % 8) as usize];
        x[0] = x[0].wrapping_add(x[1]);
        x[1] = rotl64(x[1], r) ^ x[0];

        if (round + 1) % 4 == 0 {
            let s = ((round + 1) / 4) as u64;
            x[0] = x[0].wrapping_add(ks[(s as usize) % 3]);
            x[1] = x[1].wrapping_add(ks[(s as usize + 1) % 3].wrapping_add(s));
        }
    }

    x
}
