mod builtin;

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{PlanError, Result};
use crate::models::FoodItem;

pub use builtin::default_catalog;

/// Source of catalog entries. The planner treats the result as read-only.
pub trait FoodProvider {
    fn load(&self) -> Result<Vec<FoodItem>>;
}

/// The catalog compiled into the binary.
#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinProvider;

impl FoodProvider for BuiltinProvider {
    fn load(&self) -> Result<Vec<FoodItem>> {
        Ok(default_catalog())
    }
}

/// A JSON array of food items on disk.
#[derive(Debug, Clone)]
pub struct JsonFileProvider {
    path: PathBuf,
}

impl JsonFileProvider {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }
}

impl FoodProvider for JsonFileProvider {
    fn load(&self) -> Result<Vec<FoodItem>> {
        load_foods(&self.path)
    }
}

/// Keep one entry per lowercase name; the last one wins but keeps the
/// position of the first.
pub fn dedupe_by_name(foods: Vec<FoodItem>) -> Vec<FoodItem> {
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut out: Vec<FoodItem> = Vec::with_capacity(foods.len());
    for food in foods {
        match index.get(&food.key()) {
            Some(&i) => out[i] = food,
            None => {
                index.insert(food.key(), out.len());
                out.push(food);
            }
        }
    }
    out
}

/// Load foods from a JSON file, rejecting negative quantities or macros.
pub fn load_foods<P: AsRef<Path>>(path: P) -> Result<Vec<FoodItem>> {
    let content = fs::read_to_string(path.as_ref())?;
    let foods: Vec<FoodItem> = serde_json::from_str(&content)?;

    if let Some(bad) = foods.iter().find(|f| !f.is_valid()) {
        return Err(PlanError::InvalidInput(format!(
            "food '{}' has a negative quantity, price or macro",
            bad.name
        )));
    }

    let foods = dedupe_by_name(foods);
    debug!(path = %path.as_ref().display(), count = foods.len(), "loaded catalog");
    Ok(foods)
}

/// Save foods to a JSON file, deduplicated by name.
pub fn save_foods<P: AsRef<Path>>(path: P, foods: &[FoodItem]) -> Result<()> {
    let deduped = dedupe_by_name(foods.to_vec());
    let json = serde_json::to_string_pretty(&deduped)?;
    fs::write(path, json)?;
    Ok(())
}

/// Catalog with id and name lookups.
#[derive(Debug, Clone, Default)]
pub struct FoodCatalog {
    foods: Vec<FoodItem>,
    by_id: HashMap<String, usize>,
}

impl FoodCatalog {
    pub fn new(foods: Vec<FoodItem>) -> Self {
        let foods = dedupe_by_name(foods);
        let by_id = foods
            .iter()
            .enumerate()
            .map(|(i, f)| (f.id.clone(), i))
            .collect();
        Self { foods, by_id }
    }

    pub fn from_provider(provider: &dyn FoodProvider) -> Result<Self> {
        Ok(Self::new(provider.load()?))
    }

    /// The built-in catalog, or the JSON file at `path` when given.
    pub fn load_or_builtin<P: AsRef<Path>>(path: Option<P>) -> Result<Self> {
        match path {
            Some(p) => Self::from_provider(&JsonFileProvider::new(p.as_ref())),
            None => Self::from_provider(&BuiltinProvider),
        }
    }

    pub fn foods(&self) -> &[FoodItem] {
        &self.foods
    }

    pub fn len(&self) -> usize {
        self.foods.len()
    }

    pub fn is_empty(&self) -> bool {
        self.foods.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&FoodItem> {
        self.by_id.get(id).map(|&i| &self.foods[i])
    }

    /// Case-insensitive name lookup.
    pub fn find_by_name(&self, name: &str) -> Result<&FoodItem> {
        let key = name.trim().to_lowercase();
        self.foods
            .iter()
            .find(|f| f.key() == key)
            .ok_or_else(|| PlanError::FoodNotFound(name.to_string()))
    }

    pub fn names(&self) -> Vec<&str> {
        self.foods.iter().map(|f| f.name.as_str()).collect()
    }
}
