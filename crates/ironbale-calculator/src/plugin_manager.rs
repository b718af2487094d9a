use crate::plugin::EstimatorPlugin;
use std::collections::BTreeMap;

pub struct PluginManager {
    plugins: BTreeMap<String, Box<dyn EstimatorPlugin>>,
}

impl Default for PluginManager {
    fn default() -> Self {
        Self::new()
    }
}

impl PluginManager {
    pub fn new() -> Self {
        Self { plugins: BTreeMap::new() }
    }

    pub fn register(&mut self, plugin: Box<dyn EstimatorPlugin>) {
        self.plugins.insert(plugin.name().to_string(), plugin);
    }

    pub fn get(&self, name: &str) -> Option<&dyn EstimatorPlugin> {
        self.plugins.get(name).map(|p| p.as_ref())
    }

    /// Registered plugins in name order.
    pub fn iter(&self) -> impl Iterator<Item = &dyn EstimatorPlugin> {
        self.plugins.values().map(|p| p.as_ref())
    }
}
