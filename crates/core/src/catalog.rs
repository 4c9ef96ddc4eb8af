//! Menu catalog rules: categories, menu items, and slug generation.

use crate::error::CoreError;

/// Category name length bounds.
pub const MIN_CATEGORY_NAME_LENGTH: usize = 2;
pub const MAX_CATEGORY_NAME_LENGTH: usize = 50;

/// Menu item name length bounds.
pub const MIN_ITEM_NAME_LENGTH: usize = 2;
pub const MAX_ITEM_NAME_LENGTH: usize = 100;

/// Maximum length for item and category descriptions.
pub const MAX_DESCRIPTION_LENGTH: usize = 500;

/// Maximum length for the comma-separated allergens field.
pub const MAX_ALLERGENS_LENGTH: usize = 255;

/// Validate a category name.
pub fn validate_category_name(name: &str) -> Result<(), CoreError> {
    let len = name.trim().chars().count();
    if !(MIN_CATEGORY_NAME_LENGTH..=MAX_CATEGORY_NAME_LENGTH).contains(&len) {
        return Err(CoreError::Validation(format!(
            "Category name must be between {MIN_CATEGORY_NAME_LENGTH} and {MAX_CATEGORY_NAME_LENGTH} characters"
        )));
    }
    Ok(())
}

/// Validate a menu item name.
pub fn validate_item_name(name: &str) -> Result<(), CoreError> {
    let len = name.trim().chars().count();
    if !(MIN_ITEM_NAME_LENGTH..=MAX_ITEM_NAME_LENGTH).contains(&len) {
        return Err(CoreError::Validation(format!(
            "Item name must be between {MIN_ITEM_NAME_LENGTH} and {MAX_ITEM_NAME_LENGTH} characters"
        )));
    }
    Ok(())
}

/// Validate an optional description field.
pub fn validate_description(description: &Option<String>) -> Result<(), CoreError> {
    if let Some(text) = description {
        if text.chars().count() > MAX_DESCRIPTION_LENGTH {
            return Err(CoreError::Validation(format!(
                "Description must not exceed {MAX_DESCRIPTION_LENGTH} characters"
            )));
        }
    }
    Ok(())
}

/// Validate a menu item price. Prices are non-negative; zero is allowed
/// for comped items.
pub fn validate_price(price: f64) -> Result<(), CoreError> {
    if !price.is_finite() || price < 0.0 {
        return Err(CoreError::Validation(
            "Price must be a non-negative number".to_string(),
        ));
    }
    Ok(())
}

/// Validate the comma-separated allergens field.
pub fn validate_allergens(allergens: &Option<String>) -> Result<(), CoreError> {
    if let Some(text) = allergens {
        if text.chars().count() > MAX_ALLERGENS_LENGTH {
            return Err(CoreError::Validation(format!(
                "Allergens must not exceed {MAX_ALLERGENS_LENGTH} characters"
            )));
        }
    }
    Ok(())
}

/// Generate a URL-friendly slug from a display name.
///
/// Lowercases, maps whitespace runs to single hyphens, and drops anything
/// that is not alphanumeric or a hyphen. Consecutive hyphens collapse.
pub fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut last_hyphen = true; // suppress leading hyphens

    for c in name.chars() {
        if c.is_alphanumeric() {
            slug.extend(c.to_lowercase());
            last_hyphen = false;
        } else if !last_hyphen {
            slug.push('-');
            last_hyphen = true;
        }
    }

    slug.trim_end_matches('-').to_string()
}

/// Split a stored allergens string into its individual entries.
pub fn split_allergens(allergens: &Option<String>) -> Vec<String> {
    allergens
        .as_deref()
        .unwrap_or_default()
        .split(',')
        .map(|a| a.trim().to_string())
        .filter(|a| !a.is_empty())
        .collect()
}
