//! Material constants shared by the estimators.

use serde::{Deserialize, Serialize};

/// Physical and processing characteristics of a recyclable material.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MaterialProfile {
    /// Loose (uncompacted) bulk density, t/m³.
    pub loose_density: f64,
    /// Highest bale density a full-force press reaches, t/m³.
    pub max_bale_density: f64,
    /// Multiplier applied to throughput when sizing a baler.
    pub baling_factor: f64,
    /// Relative resistance to cutting; cardboard is 1.0.
    pub hardness: f64,
    /// Shredding energy demand at a 1:1 size reduction, kWh/t.
    pub specific_energy_kwh_per_t: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Material {
    #[default]
    Cardboard,
    MixedPaper,
    PlasticFilm,
    PetBottles,
    AluminumCans,
    SteelScrap,
    Textiles,
    Tires,
}

impl Material {
    pub const ALL: [Material; 8] = [
        Material::Cardboard,
        Material::MixedPaper,
        Material::PlasticFilm,
        Material::PetBottles,
        Material::AluminumCans,
        Material::SteelScrap,
        Material::Textiles,
        Material::Tires,
    ];

    pub fn profile(self) -> &'static MaterialProfile {
        match self {
            Material::Cardboard => &CARDBOARD,
            Material::MixedPaper => &MIXED_PAPER,
            Material::PlasticFilm => &PLASTIC_FILM,
            Material::PetBottles => &PET_BOTTLES,
            Material::AluminumCans => &ALUMINUM_CANS,
            Material::SteelScrap => &STEEL_SCRAP,
            Material::Textiles => &TEXTILES,
            Material::Tires => &TIRES,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Material::Cardboard => "Cardboard (OCC)",
            Material::MixedPaper => "Mixed paper",
            Material::PlasticFilm => "Plastic film",
            Material::PetBottles => "PET bottles",
            Material::AluminumCans => "Aluminum cans",
            Material::SteelScrap => "Steel scrap",
            Material::Textiles => "Textiles",
            Material::Tires => "Tires",
        }
    }
}

const CARDBOARD: MaterialProfile = MaterialProfile {
    loose_density: 0.05,
    max_bale_density: 0.50,
    baling_factor: 1.00,
    hardness: 1.0,
    specific_energy_kwh_per_t: 15.0,
};

const MIXED_PAPER: MaterialProfile = MaterialProfile {
    loose_density: 0.08,
    max_bale_density: 0.60,
    baling_factor: 1.10,
    hardness: 1.0,
    specific_energy_kwh_per_t: 12.0,
};

const PLASTIC_FILM: MaterialProfile = MaterialProfile {
    loose_density: 0.03,
    max_bale_density: 0.45,
    baling_factor: 0.80,
    hardness: 0.8,
    specific_energy_kwh_per_t: 25.0,
};

const PET_BOTTLES: MaterialProfile = MaterialProfile {
    loose_density: 0.04,
    max_bale_density: 0.40,
    baling_factor: 0.90,
    hardness: 0.9,
    specific_energy_kwh_per_t: 28.0,
};

const ALUMINUM_CANS: MaterialProfile = MaterialProfile {
    loose_density: 0.06,
    max_bale_density: 0.55,
    baling_factor: 1.20,
    hardness: 1.3,
    specific_energy_kwh_per_t: 35.0,
};

const STEEL_SCRAP: MaterialProfile = MaterialProfile {
    loose_density: 0.50,
    max_bale_density: 1.80,
    baling_factor: 1.60,
    hardness: 2.5,
    specific_energy_kwh_per_t: 45.0,
};

const TEXTILES: MaterialProfile = MaterialProfile {
    loose_density: 0.10,
    max_bale_density: 0.55,
    baling_factor: 0.90,
    hardness: 0.7,
    specific_energy_kwh_per_t: 20.0,
};

const TIRES: MaterialProfile = MaterialProfile {
    loose_density: 0.25,
    max_bale_density: 0.70,
    baling_factor: 1.40,
    hardness: 2.0,
    specific_energy_kwh_per_t: 30.0,
};
