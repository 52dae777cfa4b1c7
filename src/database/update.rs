//! Targeted updates against one hobby aggregate.
//!
//! Each [`HobbyUpdate`] carries the filters that select the nested elements it
//! touches. Applying an update either changes exactly the selected elements
//! and re-stamps them, or leaves the aggregate untouched and reports why.
//! Stores run [`HobbyUpdate::apply`] inside whatever atomic step they have
//! (a write lock, or a revision-checked row replacement).

use chrono::{DateTime, Duration, Utc};
use serde_json::{Map, Value};
use thiserror::Error;

use crate::database::models::{Category, CategorySchema, Hobby, HobbyPatch, SubCategoryItem};

/// Selects categories inside a hobby.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CategoryFilter {
    Name(String),
}

impl CategoryFilter {
    pub fn name(name: impl Into<String>) -> Self {
        CategoryFilter::Name(name.into())
    }

    pub fn matches(&self, category: &Category) -> bool {
        match self {
            CategoryFilter::Name(name) => category.name == *name,
        }
    }
}

/// Selects items inside a category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ItemFilter {
    Id(String),
}

impl ItemFilter {
    pub fn id(id: impl Into<String>) -> Self {
        ItemFilter::Id(id.into())
    }

    pub fn matches(&self, item: &SubCategoryItem) -> bool {
        match self {
            ItemFilter::Id(id) => item.id == *id,
        }
    }
}

/// Fields that may be set on a single category element.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CategoryPatch {
    pub name: Option<String>,
    pub schema: Option<CategorySchema>,
}

/// The mutation shapes a hobby aggregate supports.
#[derive(Debug, Clone, PartialEq)]
pub enum HobbyUpdate {
    /// Set top-level hobby fields.
    SetHobbyFields(HobbyPatch),
    /// Append a category; rejected if its name is already taken.
    PushCategory(Category),
    /// Set fields on the first matching category.
    SetCategoryFields { category: CategoryFilter, patch: CategoryPatch },
    /// Remove every matching category.
    PullCategory { category: CategoryFilter },
    /// Append an item to the first matching category.
    PushItem { category: CategoryFilter, item: SubCategoryItem },
    /// Replace `data` on every matching item of every matching category.
    SetItemData { category: CategoryFilter, item: ItemFilter, data: Map<String, Value> },
    /// Remove matching items from the first matching category.
    PullItem { category: CategoryFilter, item: ItemFilter },
}

/// An atomic predicate carried by the update did not hold.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UpdateRejection {
    #[error("Category '{0}' already exists")]
    DuplicateCategory(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpdateOutcome {
    Applied,
    /// A nested filter selected nothing; the aggregate is unchanged.
    Unmatched,
    Rejected(UpdateRejection),
}

/// Next value for an `updated_at` column: `now`, or one microsecond past
/// `previous` when the clock has not moved beyond it.
pub fn restamp(previous: DateTime<Utc>, now: DateTime<Utc>) -> DateTime<Utc> {
    if now > previous {
        now
    } else {
        previous + Duration::microseconds(1)
    }
}

impl HobbyUpdate {
    pub fn kind(&self) -> &'static str {
        match self {
            HobbyUpdate::SetHobbyFields(_) => "set_hobby_fields",
            HobbyUpdate::PushCategory(_) => "push_category",
            HobbyUpdate::SetCategoryFields { .. } => "set_category_fields",
            HobbyUpdate::PullCategory { .. } => "pull_category",
            HobbyUpdate::PushItem { .. } => "push_item",
            HobbyUpdate::SetItemData { .. } => "set_item_data",
            HobbyUpdate::PullItem { .. } => "pull_item",
        }
    }

    /// Apply to `hobby` in place. Anything other than `Applied` leaves it as it was.
    pub fn apply(&self, hobby: &mut Hobby, now: DateTime<Utc>) -> UpdateOutcome {
        let outcome = match self {
            HobbyUpdate::SetHobbyFields(patch) => {
                if let Some(name) = &patch.name {
                    hobby.name = name.clone();
                }
                if let Some(description) = &patch.description {
                    hobby.description = description.clone();
                }
                UpdateOutcome::Applied
            }
            HobbyUpdate::PushCategory(category) => {
                if hobby.has_category(&category.name) {
                    return UpdateOutcome::Rejected(UpdateRejection::DuplicateCategory(
                        category.name.clone(),
                    ));
                }
                hobby.categories.push(category.clone());
                UpdateOutcome::Applied
            }
            HobbyUpdate::SetCategoryFields { category, patch } => {
                set_category_fields(hobby, category, patch, now)
            }
            HobbyUpdate::PullCategory { category } => {
                let before = hobby.categories.len();
                hobby.categories.retain(|c| !category.matches(c));
                if hobby.categories.len() == before {
                    UpdateOutcome::Unmatched
                } else {
                    UpdateOutcome::Applied
                }
            }
            HobbyUpdate::PushItem { category, item } => {
                match hobby.categories.iter_mut().find(|c| category.matches(c)) {
                    Some(target) => {
                        target.items.push(item.clone());
                        target.updated_at = restamp(target.updated_at, now);
                        UpdateOutcome::Applied
                    }
                    None => UpdateOutcome::Unmatched,
                }
            }
            HobbyUpdate::SetItemData { category, item, data } => {
                set_item_data(hobby, category, item, data, now)
            }
            HobbyUpdate::PullItem { category, item } => {
                match hobby.categories.iter_mut().find(|c| category.matches(c)) {
                    Some(target) => {
                        let before = target.items.len();
                        target.items.retain(|i| !item.matches(i));
                        if target.items.len() == before {
                            UpdateOutcome::Unmatched
                        } else {
                            target.updated_at = restamp(target.updated_at, now);
                            UpdateOutcome::Applied
                        }
                    }
                    None => UpdateOutcome::Unmatched,
                }
            }
        };

        if outcome == UpdateOutcome::Applied {
            hobby.updated_at = restamp(hobby.updated_at, now);
        }
        outcome
    }
}

fn set_category_fields(
    hobby: &mut Hobby,
    filter: &CategoryFilter,
    patch: &CategoryPatch,
    now: DateTime<Utc>,
) -> UpdateOutcome {
    let Some(index) = hobby.categories.iter().position(|c| filter.matches(c)) else {
        return UpdateOutcome::Unmatched;
    };

    if let Some(new_name) = &patch.name {
        let taken = hobby
            .categories
            .iter()
            .enumerate()
            .any(|(i, c)| i != index && c.name == *new_name);
        if taken {
            return UpdateOutcome::Rejected(UpdateRejection::DuplicateCategory(new_name.clone()));
        }
    }

    let target = &mut hobby.categories[index];
    if let Some(schema) = &patch.schema {
        target.schema = schema.clone();
    }
    if let Some(new_name) = &patch.name {
        target.name = new_name.clone();
        target.schema.category_name = new_name.clone();
    }
    target.updated_at = restamp(target.updated_at, now);
    UpdateOutcome::Applied
}

fn set_item_data(
    hobby: &mut Hobby,
    category_filter: &CategoryFilter,
    item_filter: &ItemFilter,
    data: &Map<String, Value>,
    now: DateTime<Utc>,
) -> UpdateOutcome {
    let mut touched = 0usize;

    for category in hobby.categories.iter_mut().filter(|c| category_filter.matches(c)) {
        let mut hit = false;
        for item in category.items.iter_mut().filter(|i| item_filter.matches(i)) {
            item.data = data.clone();
            item.updated_at = restamp(item.updated_at, now);
            hit = true;
            touched += 1;
        }
        if hit {
            category.updated_at = restamp(category.updated_at, now);
        }
    }

    if touched == 0 {
        UpdateOutcome::Unmatched
    } else {
        UpdateOutcome::Applied
    }
}
