use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::error::{Result, ensure_positive};

/// Absorber material for a longitudinal shower simulation.
///
/// Only the two energy scales enter the stepping algorithm; `name` is carried
/// through to reports unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Material {
    pub name: String,
    /// Critical energy in MeV. Charged particles above it may radiate.
    pub critical_energy: f64,
    /// Ionization loss in MeV per unit step length.
    pub ionization_energy: f64,
}

impl Material {
    pub fn new(name: &str, critical_energy: f64, ionization_energy: f64) -> Self {
        Self {
            name: name.to_string(),
            critical_energy,
            ionization_energy,
        }
    }

    /// Liquid water.
    pub fn water() -> Self {
        Self::new("liquid water", 78.33, 1.981)
    }

    /// Cesium iodide.
    pub fn cesium_iodide() -> Self {
        Self::new("cesium iodide", 11.17, 5.605)
    }

    /// Checks that both energy scales are finite and strictly positive.
    pub fn validate(&self) -> Result<()> {
        ensure_positive("critical_energy", self.critical_energy)?;
        ensure_positive("ionization_energy", self.ionization_energy)
    }
}

/// Library of named materials.
///
/// Lookup is case-insensitive and also accepts short aliases.
#[derive(Debug, Clone)]
pub struct MaterialLibrary {
    materials: HashMap<String, Material>,
    aliases: HashMap<String, String>,
}

impl MaterialLibrary {
    pub fn new() -> Self {
        Self {
            materials: HashMap::new(),
            aliases: HashMap::new(),
        }
    }

    /// Adds a material to the library, replacing any material with the same name.
    pub fn add(&mut self, material: Material) {
        self.materials
            .insert(material.name.to_lowercase(), material);
    }

    /// Registers `alias` as another name for the material `material_name`.
    pub fn alias(&mut self, alias: &str, material_name: &str) {
        self.aliases
            .insert(alias.to_lowercase(), material_name.to_lowercase());
    }

    /// Returns a material by name or alias.
    pub fn get(&self, name: &str) -> Option<&Material> {
        let key = name.to_lowercase();
        if let Some(material) = self.materials.get(&key) {
            return Some(material);
        }
        self.aliases
            .get(&key)
            .and_then(|target| self.materials.get(target))
    }

    /// Material names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.materials.values().map(|m| m.name.as_str()).collect();
        names.sort_unstable();
        names
    }

    /// Creates a library with water and cesium iodide.
    pub fn with_presets() -> Self {
        let mut lib = Self::new();

        lib.add(Material::water());
        lib.alias("water", "liquid water");
        lib.alias("h2o", "liquid water");

        lib.add(Material::cesium_iodide());
        lib.alias("csi", "cesium iodide");

        lib
    }
}

impl Default for MaterialLibrary {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presets() {
        let lib = MaterialLibrary::with_presets();
        let water = lib.get("liquid water").unwrap();
        assert!((water.critical_energy - 78.33).abs() < 1e-12);
        assert!((water.ionization_energy - 1.981).abs() < 1e-12);

        let csi = lib.get("CsI").unwrap();
        assert_eq!(csi.name, "cesium iodide");
        assert!((csi.critical_energy - 11.17).abs() < 1e-12);
    }

    #[test]
    fn test_aliases_and_missing() {
        let lib = MaterialLibrary::with_presets();
        assert_eq!(lib.get("WATER"), lib.get("h2o"));
        assert!(lib.get("lead").is_none());
        assert_eq!(lib.names(), vec!["cesium iodide", "liquid water"]);
    }

    #[test]
    fn test_add_replaces_same_name() {
        let mut lib = MaterialLibrary::new();
        lib.add(Material::new("lead", 7.4, 12.0));
        lib.add(Material::new("Lead", 7.43, 12.7));
        assert_eq!(lib.names().len(), 1);
        assert!((lib.get("lead").unwrap().critical_energy - 7.43).abs() < 1e-12);
    }

    #[test]
    fn test_validate() {
        assert!(Material::water().validate().is_ok());
        assert!(Material::new("bad", 0.0, 1.0).validate().is_err());
        assert!(Material::new("bad", 1.0, -2.0).validate().is_err());
    }
}
