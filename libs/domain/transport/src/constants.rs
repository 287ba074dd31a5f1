// [libs/domain/transport/src/constants.rs]
// =================================================================
// APARATO: PHYSICAL CONSTANTS
// RESPONSABILIDAD: VALORES FISICOS FIJOS DEL MOTOR DE TRANSPORTE
//
// Estos valores deben coincidir exactamente con los usados por
// cualquier referencia de validacion externa; no son sintonizables.
// =================================================================

/// Conversion de electronvoltios a joules.
pub const EV_TO_J: f64 = 1.602176634e-19;

/// Masa en reposo del neutron, en kilogramos.
pub const PARTICLE_MASS: f64 = 1.674_927_498_04e-27;

/// Numero de Avogadro, en mol^-1.
pub const AVOGADROS: f64 = 6.022_140_76e23;

/// Centimetros cuadrados por barn.
pub const BARNS: f64 = 1e-24;

/// Margen de correccion para respetar la convencion de celda
/// semi-abierta al calcular la arista objetivo de streaming.
pub const OPEN_BOUND_CORRECTION: f64 = 1e-14;

/// Umbral por defecto de energia de interes, en eV, por debajo del
/// cual una particula se considera muerta.
pub const DEFAULT_MIN_ENERGY_OF_INTEREST: f64 = 1e-10;
