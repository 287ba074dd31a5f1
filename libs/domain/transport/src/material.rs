// [libs/domain/transport/src/material.rs]
// =================================================================
// APARATO: MATERIAL PROPERTIES
// RESPONSABILIDAD: CONSTANTES DE MATERIAL Y TABLAS DE SECCION EFICAZ
// =================================================================

use reactor_core_xs::CrossSectionTable;

/// Propiedades del material de fondo: numero de masa del nucleido
/// dispersor, masa molar, y las dos tablas de seccion eficaz
/// microscopica (dispersion y absorcion).
#[derive(Debug, Clone)]
pub struct Material {
    /// Numero de masa `A` del nucleido dispersor, usado en la
    /// cinematica de dispersion elastica.
    pub mass_number: f64,
    /// Masa molar del material, en gramos por mol.
    pub molar_mass: f64,
    /// Tabla de seccion eficaz microscopica de dispersion, en barns.
    pub scatter_xs: CrossSectionTable,
    /// Tabla de seccion eficaz microscopica de absorcion, en barns.
    pub absorb_xs: CrossSectionTable,
    /// Umbral de energia por debajo del cual una particula muere.
    pub min_energy_of_interest: f64,
}

impl Material {
    /// Construye una descripcion de material a partir de sus
    /// constantes y tablas de seccion eficaz.
    #[must_use]
    pub fn new(
        mass_number: f64,
        molar_mass: f64,
        scatter_xs: CrossSectionTable,
        absorb_xs: CrossSectionTable,
        min_energy_of_interest: f64,
    ) -> Self {
        Self {
            mass_number,
            molar_mass,
            scatter_xs,
            absorb_xs,
            min_energy_of_interest,
        }
    }
}
