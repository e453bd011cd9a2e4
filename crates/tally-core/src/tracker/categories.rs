use tracing::info;

use super::{authenticate, Tracker};
use crate::error::{Error, Result};
use crate::models::{Category, CategoryType, CategoryUpdate, NewCategory};

fn validate_name(name: &str) -> Result<()> {
    if name.trim().is_empty() {
        return Err(Error::InvalidData("Category name cannot be empty".into()));
    }
    Ok(())
}

impl Tracker {
    pub fn get_user_categories(
        &self,
        caller: Option<&str>,
        category_type: Option<CategoryType>,
    ) -> Result<Vec<Category>> {
        let user = authenticate(caller)?;
        self.db.list_categories(user, category_type)
    }

    pub fn get_category(&self, caller: Option<&str>, id: i64) -> Result<Category> {
        let user = authenticate(caller)?;
        self.owned_category(user, id)
    }

    pub fn create_category(&self, caller: Option<&str>, category: &NewCategory) -> Result<i64> {
        let user = authenticate(caller)?;
        validate_name(&category.name)?;

        let category = NewCategory {
            name: category.name.trim().to_string(),
            ..category.clone()
        };
        self.db.insert_category(user, &category, false)
    }

    /// Rename or restyle a category; its type never changes
    pub fn update_category(
        &self,
        caller: Option<&str>,
        id: i64,
        update: &CategoryUpdate,
    ) -> Result<()> {
        let user = authenticate(caller)?;
        self.owned_category(user, id)?;
        validate_name(&update.name)?;

        let update = CategoryUpdate {
            name: update.name.trim().to_string(),
            ..update.clone()
        };
        self.db.update_category(id, &update)
    }

    /// Delete a custom category. Seeded defaults are protected.
    pub fn delete_category(&self, caller: Option<&str>, id: i64) -> Result<()> {
        let user = authenticate(caller)?;
        let category = self.owned_category(user, id)?;
        if category.is_default {
            return Err(Error::ProtectedDefault);
        }
        self.db.delete_category(id)?;
        info!(user = %user, category = id, "Deleted category");
        Ok(())
    }

    /// Seed the default categories if the caller has none. Safe to call repeatedly.
    pub fn initialize_default_categories(&self, caller: Option<&str>) -> Result<usize> {
        let user = authenticate(caller)?;
        self.db.seed_default_categories(user)
    }
}
