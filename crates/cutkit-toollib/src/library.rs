//! In-memory parameter library
//!
//! Holds the four record collections behind `RwLock`s, loads and saves a
//! single JSON file, and ships a seeded standard library for first runs
//! and tests.

use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use std::sync::{Arc, Mutex, RwLock};

use anyhow::{Context, Result};
use cutkit_core::data::{
    Machine, MachineId, Material, MaterialGroup, MaterialId, Strategy, StrategyId, Tool,
    ToolCoating, ToolId, ToolKind, ToolMaterial,
};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::traits::ParameterStore;

#[derive(Debug, Default, Serialize, Deserialize)]
struct LibraryFile {
    materials: Vec<Material>,
    tools: Vec<Tool>,
    machines: Vec<Machine>,
    strategies: Vec<Strategy>,
}

/// JSON-backed library of optimization input records
#[derive(Debug, Clone)]
pub struct ParameterLibrary {
    materials: Arc<RwLock<HashMap<String, Material>>>,
    tools: Arc<RwLock<HashMap<String, Tool>>>,
    machines: Arc<RwLock<HashMap<String, Machine>>>,
    strategies: Arc<RwLock<HashMap<String, Strategy>>>,
    library_path: PathBuf,
    file_lock: Arc<Mutex<()>>,
}

impl ParameterLibrary {
    pub fn new(library_path: PathBuf) -> Self {
        Self {
            materials: Arc::new(RwLock::new(HashMap::new())),
            tools: Arc::new(RwLock::new(HashMap::new())),
            machines: Arc::new(RwLock::new(HashMap::new())),
            strategies: Arc::new(RwLock::new(HashMap::new())),
            library_path,
            file_lock: Arc::new(Mutex::new(())),
        }
    }

    /// Load the library file; a missing file seeds and saves the
    /// standard library instead.
    pub fn load(&self) -> Result<()> {
        if !self.library_path.exists() {
            info!(path = %self.library_path.display(), "no library file, seeding standard library");
            let seeded = init_standard_library();
            self.adopt(&seeded);
            self.save()?;
            return Ok(());
        }

        let content = fs::read_to_string(&self.library_path)
            .context("Failed to read parameter library file")?;
        let data: LibraryFile =
            serde_json::from_str(&content).context("Failed to parse parameter library JSON")?;

        *self.materials.write().unwrap() = data
            .materials
            .into_iter()
            .map(|m| (m.id.0.clone(), m))
            .collect();
        *self.tools.write().unwrap() =
            data.tools.into_iter().map(|t| (t.id.0.clone(), t)).collect();
        *self.machines.write().unwrap() = data
            .machines
            .into_iter()
            .map(|m| (m.id.0.clone(), m))
            .collect();
        *self.strategies.write().unwrap() = data
            .strategies
            .into_iter()
            .map(|s| (s.id.0.clone(), s))
            .collect();

        Ok(())
    }

    /// Write the library file, creating parent directories as needed
    pub fn save(&self) -> Result<()> {
        let _file_guard = self.file_lock.lock().unwrap();

        let data = LibraryFile {
            materials: self.materials.read().unwrap().values().cloned().collect(),
            tools: self.tools.read().unwrap().values().cloned().collect(),
            machines: self.machines.read().unwrap().values().cloned().collect(),
            strategies: self.strategies.read().unwrap().values().cloned().collect(),
        };

        if let Some(parent) = self.library_path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(&data)?;
        fs::write(&self.library_path, content)
            .context("Failed to write parameter library file")?;

        Ok(())
    }

    pub fn add_material(&self, material: Material) {
        self.materials
            .write()
            .unwrap()
            .insert(material.id.0.clone(), material);
    }

    pub fn add_tool(&self, tool: Tool) {
        self.tools.write().unwrap().insert(tool.id.0.clone(), tool);
    }

    pub fn add_machine(&self, machine: Machine) {
        self.machines
            .write()
            .unwrap()
            .insert(machine.id.0.clone(), machine);
    }

    pub fn add_strategy(&self, strategy: Strategy) {
        self.strategies
            .write()
            .unwrap()
            .insert(strategy.id.0.clone(), strategy);
    }

    pub fn material_count(&self) -> usize {
        self.materials.read().unwrap().len()
    }

    pub fn tool_count(&self) -> usize {
        self.tools.read().unwrap().len()
    }

    fn adopt(&self, other: &ParameterLibrary) {
        *self.materials.write().unwrap() = other.materials.read().unwrap().clone();
        *self.tools.write().unwrap() = other.tools.read().unwrap().clone();
        *self.machines.write().unwrap() = other.machines.read().unwrap().clone();
        *self.strategies.write().unwrap() = other.strategies.read().unwrap().clone();
    }
}

impl ParameterStore for ParameterLibrary {
    fn material(&self, id: &str) -> Option<Material> {
        self.materials.read().unwrap().get(id).cloned()
    }

    fn tool(&self, id: &str) -> Option<Tool> {
        self.tools.read().unwrap().get(id).cloned()
    }

    fn machine(&self, id: &str) -> Option<Machine> {
        self.machines.read().unwrap().get(id).cloned()
    }

    fn strategy(&self, id: &str) -> Option<Strategy> {
        self.strategies.read().unwrap().get(id).cloned()
    }
}

/// Seed the standard library: three materials, three tools, two
/// machines, and one strategy per machining method.
pub fn init_standard_library() -> ParameterLibrary {
    let library = ParameterLibrary::new(PathBuf::from("cutkit-library.json"));

    library.add_material(Material {
        id: MaterialId("P2".to_string()),
        name: "C45 medium-carbon steel".to_string(),
        group: MaterialGroup::P,
        hardness: 220.0,
        tensile_strength: 700.0,
        machinability: 0.70,
        cutting_force_coefficient: 2000.0,
        kienzle_slope: 0.21,
    });
    library.add_material(Material {
        id: MaterialId("K1".to_string()),
        name: "GG25 gray cast iron".to_string(),
        group: MaterialGroup::K,
        hardness: 200.0,
        tensile_strength: 250.0,
        machinability: 0.90,
        cutting_force_coefficient: 1100.0,
        kienzle_slope: 0.26,
    });
    library.add_material(Material {
        id: MaterialId("N1".to_string()),
        name: "AlMg3 aluminium alloy".to_string(),
        group: MaterialGroup::N,
        hardness: 95.0,
        tensile_strength: 310.0,
        machinability: 1.20,
        cutting_force_coefficient: 700.0,
        kienzle_slope: 0.23,
    });

    library.add_tool(Tool {
        id: ToolId("FM25-2".to_string()),
        name: "25 mm face mill".to_string(),
        kind: ToolKind::FaceMill,
        material: ToolMaterial::CoatedCarbide,
        coating: ToolCoating::TiAlN,
        diameter: 25.0,
        teeth: 2,
        tip_radius: 0.8,
        approach_angle: 45.0,
        rake_angle: 6.0,
        overhang: 75.0,
        recommended_speed_min: 800.0,
        recommended_speed_max: 3000.0,
        recommended_feed_min: 150.0,
        recommended_feed_max: 1200.0,
        recommended_cut_depth_max: 3.0,
        recommended_cut_width_max: 18.0,
        max_cutting_speed: 240.0,
        max_feed_per_tooth: 0.15,
        max_feed_force: 2000.0,
        life_coefficient: 100_000.0,
        speed_exponent: -1.5,
        feed_exponent: 0.75,
        depth_exponent: 0.1,
        stiffness: 2.0e7,
        elastic_modulus: 600_000.0,
    });
    library.add_tool(Tool {
        id: ToolId("DR10-2".to_string()),
        name: "10 mm twist drill".to_string(),
        kind: ToolKind::Drill,
        material: ToolMaterial::Carbide,
        coating: ToolCoating::TiN,
        diameter: 10.0,
        teeth: 2,
        tip_radius: 0.2,
        approach_angle: 59.0,
        rake_angle: 3.0,
        overhang: 60.0,
        recommended_speed_min: 600.0,
        recommended_speed_max: 2400.0,
        recommended_feed_min: 50.0,
        recommended_feed_max: 400.0,
        recommended_cut_depth_max: 25.0,
        recommended_cut_width_max: 10.0,
        max_cutting_speed: 80.0,
        max_feed_per_tooth: 0.2,
        max_feed_force: 3000.0,
        life_coefficient: 80_000.0,
        speed_exponent: -1.4,
        feed_exponent: 0.8,
        depth_exponent: 0.1,
        stiffness: 1.5e7,
        elastic_modulus: 600_000.0,
    });
    library.add_tool(Tool {
        id: ToolId("BB25".to_string()),
        name: "25 mm boring bar".to_string(),
        kind: ToolKind::BoringBar,
        material: ToolMaterial::Carbide,
        coating: ToolCoating::None,
        diameter: 25.0,
        teeth: 1,
        tip_radius: 0.4,
        approach_angle: 75.0,
        rake_angle: 5.0,
        overhang: 100.0,
        recommended_speed_min: 500.0,
        recommended_speed_max: 2000.0,
        recommended_feed_min: 30.0,
        recommended_feed_max: 300.0,
        recommended_cut_depth_max: 1.5,
        recommended_cut_width_max: 2.0,
        max_cutting_speed: 180.0,
        max_feed_per_tooth: 0.12,
        max_feed_force: 1500.0,
        life_coefficient: 90_000.0,
        speed_exponent: -1.5,
        feed_exponent: 0.75,
        depth_exponent: 0.1,
        stiffness: 8.0e6,
        elastic_modulus: 600_000.0,
    });

    library.add_machine(Machine {
        id: MachineId("VMC-850".to_string()),
        name: "VMC-850 vertical machining center".to_string(),
        rpm_max: 8000.0,
        power_max: 15.0,
        torque_max: 95.0,
        feed_rate_max: 10_000.0,
        feed_force_max: 8000.0,
        efficiency: 0.85,
    });
    library.add_machine(Machine {
        id: MachineId("TD-500".to_string()),
        name: "TD-500 drill-tap center".to_string(),
        rpm_max: 3000.0,
        power_max: 4.0,
        torque_max: 30.0,
        feed_rate_max: 2000.0,
        feed_force_max: 5000.0,
        efficiency: 0.80,
    });

    library.add_strategy(Strategy {
        id: StrategyId("ROUGH-MILL".to_string()),
        name: "Face milling, roughing".to_string(),
        method: "milling".to_string(),
        min_tool_life: 10.0,
        bottom_roughness_limit: 6.3,
        side_roughness_limit: 12.5,
        cut_width: 8.5,
        wear_multiplier: 1.0,
        inner_diameter: 0.0,
    });
    library.add_strategy(Strategy {
        id: StrategyId("DRILL-STD".to_string()),
        name: "Standard drilling".to_string(),
        method: "drilling".to_string(),
        min_tool_life: 15.0,
        bottom_roughness_limit: 25.0,
        side_roughness_limit: 25.0,
        cut_width: 0.0,
        wear_multiplier: 1.0,
        inner_diameter: 0.0,
    });
    library.add_strategy(Strategy {
        id: StrategyId("FINE-BORE".to_string()),
        name: "Fine boring".to_string(),
        method: "boring".to_string(),
        min_tool_life: 20.0,
        bottom_roughness_limit: 3.2,
        side_roughness_limit: 3.2,
        cut_width: 1.25,
        wear_multiplier: 0.9,
        inner_diameter: 22.5,
    });

    library
}
