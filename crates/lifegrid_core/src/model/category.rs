//! Fixed life-category taxonomy.
//!
//! # Responsibility
//! - Define the closed set of 12 categories an hour can be assigned to.
//! - Provide the display metadata table consumed by outer layers.
//!
//! # Invariants
//! - Category codes are `0..=11` and never change meaning.
//! - Code `0` is always `Sleep`; sleep statistics depend on it.
//! - Wire code `-1` means "unassigned" and never maps to a category.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Number of categories in the taxonomy.
pub const CATEGORY_COUNT: usize = 12;

/// Wire sentinel for an hour with no category.
pub const UNASSIGNED_CODE: i64 = -1;

/// One of the 12 fixed life categories.
///
/// Serialized as its integer code to match the external contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
#[repr(u8)]
pub enum Category {
    Sleep = 0,
    Work = 1,
    LearningBuilding = 2,
    DeepThinking = 3,
    ExerciseHealth = 4,
    FriendsSocial = 5,
    RelaxationLeisure = 6,
    DatingPartner = 7,
    Family = 8,
    LifeAdmin = 9,
    TravelCommute = 10,
    GettingReady = 11,
}

impl Category {
    /// All categories in code order.
    pub const ALL: [Category; CATEGORY_COUNT] = [
        Category::Sleep,
        Category::Work,
        Category::LearningBuilding,
        Category::DeepThinking,
        Category::ExerciseHealth,
        Category::FriendsSocial,
        Category::RelaxationLeisure,
        Category::DatingPartner,
        Category::Family,
        Category::LifeAdmin,
        Category::TravelCommute,
        Category::GettingReady,
    ];

    /// Returns the stable integer code.
    pub fn code(self) -> u8 {
        self as u8
    }

    /// Returns the position of this category in 12-slot count arrays.
    pub fn index(self) -> usize {
        self as usize
    }

    /// Maps a wire code to a category. Returns `None` for anything outside `0..=11`.
    pub fn from_code(code: i64) -> Option<Self> {
        usize::try_from(code)
            .ok()
            .and_then(|index| Self::ALL.get(index).copied())
    }

    /// Canonical display name.
    pub fn name(self) -> &'static str {
        STANDARD_METADATA[self.index()].name
    }
}

impl From<Category> for i64 {
    fn from(value: Category) -> Self {
        i64::from(value.code())
    }
}

impl TryFrom<i64> for Category {
    type Error = UnknownCategoryCode;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::from_code(value).ok_or(UnknownCategoryCode(value))
    }
}

impl Display for Category {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// A code that is not part of the taxonomy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnknownCategoryCode(pub i64);

impl Display for UnknownCategoryCode {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "unknown category code {}; expected 0..={}",
            self.0,
            CATEGORY_COUNT - 1
        )
    }
}

impl Error for UnknownCategoryCode {}

/// Display metadata for one category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CategoryMeta {
    pub category: Category,
    pub name: &'static str,
    pub icon: &'static str,
    pub color_class: &'static str,
}

const STANDARD_METADATA: [CategoryMeta; CATEGORY_COUNT] = [
    CategoryMeta {
        category: Category::Sleep,
        name: "Sleep",
        icon: "🌙",
        color_class: "cat-0",
    },
    CategoryMeta {
        category: Category::Work,
        name: "Work",
        icon: "💼",
        color_class: "cat-1",
    },
    CategoryMeta {
        category: Category::LearningBuilding,
        name: "Learning & Building",
        icon: "📘",
        color_class: "cat-2",
    },
    CategoryMeta {
        category: Category::DeepThinking,
        name: "Deep Thinking / Reflection",
        icon: "🧠",
        color_class: "cat-3",
    },
    CategoryMeta {
        category: Category::ExerciseHealth,
        name: "Exercise & Health",
        icon: "🏋️",
        color_class: "cat-4",
    },
    CategoryMeta {
        category: Category::FriendsSocial,
        name: "Friends & Social",
        icon: "🧑‍🤝‍🧑",
        color_class: "cat-5",
    },
    CategoryMeta {
        category: Category::RelaxationLeisure,
        name: "Relaxation & Leisure",
        icon: "🎮",
        color_class: "cat-6",
    },
    CategoryMeta {
        category: Category::DatingPartner,
        name: "Dating / Partner",
        icon: "❤️",
        color_class: "cat-7",
    },
    CategoryMeta {
        category: Category::Family,
        name: "Family",
        icon: "👪",
        color_class: "cat-8",
    },
    CategoryMeta {
        category: Category::LifeAdmin,
        name: "Life Admin / Chores",
        icon: "🧾",
        color_class: "cat-9",
    },
    CategoryMeta {
        category: Category::TravelCommute,
        name: "Travel / Commute",
        icon: "✈️",
        color_class: "cat-10",
    },
    CategoryMeta {
        category: Category::GettingReady,
        name: "Getting Ready / Misc",
        icon: "🚿",
        color_class: "cat-11",
    },
];

/// Immutable category metadata table.
///
/// Passed by reference to presentation-facing callers instead of being read
/// from ambient global state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryCatalog {
    entries: [CategoryMeta; CATEGORY_COUNT],
}

impl CategoryCatalog {
    /// The standard LifeGrid taxonomy.
    pub fn standard() -> Self {
        Self {
            entries: STANDARD_METADATA,
        }
    }

    /// Looks up metadata for one category.
    pub fn meta(&self, category: Category) -> &CategoryMeta {
        &self.entries[category.index()]
    }

    /// Returns all entries in code order.
    pub fn entries(&self) -> &[CategoryMeta] {
        &self.entries
    }
}

impl Default for CategoryCatalog {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::{Category, CategoryCatalog, CATEGORY_COUNT};

    #[test]
    fn codes_round_trip_through_from_code() {
        for category in Category::ALL {
            assert_eq!(Category::from_code(i64::from(category)), Some(category));
        }
    }

    #[test]
    fn from_code_rejects_sentinel_and_out_of_range() {
        assert_eq!(Category::from_code(-1), None);
        assert_eq!(Category::from_code(12), None);
        assert_eq!(Category::from_code(i64::MAX), None);
    }

    #[test]
    fn sleep_is_code_zero() {
        assert_eq!(Category::Sleep.code(), 0);
        assert_eq!(Category::ALL[0], Category::Sleep);
    }

    #[test]
    fn catalog_entries_are_in_code_order() {
        let catalog = CategoryCatalog::standard();
        assert_eq!(catalog.entries().len(), CATEGORY_COUNT);
        for (index, meta) in catalog.entries().iter().enumerate() {
            assert_eq!(meta.category.index(), index);
            assert_eq!(meta.color_class, format!("cat-{index}"));
        }
        assert_eq!(catalog.meta(Category::Family).name, "Family");
    }
}
