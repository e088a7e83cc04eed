use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::nutrition::value_objects::{GlycemicIndex, GlycemicRisk};

/// Closed vocabulary of foods the service can put a number on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FoodLabel {
    // Detector classes, in class-id order
    Asparagus,
    Avocados,
    Broccoli,
    Cabbage,
    Celery,
    Cucumber,
    GreenApples,
    GreenBeans,
    GreenCapsicum,
    GreenGrapes,
    Kiwifruit,
    Lettuce,
    Limes,
    Peas,
    Spinach,
    Banana,
    Cauliflower,
    Date,
    Garlic,
    Ginger,
    Mushroom,
    Onion,
    Parsnip,
    Peach,
    Pear,
    Potato,
    Turnip,
    Beetroot,
    Blackberry,
    Blueberry,
    Cherry,
    Eggplant,
    Plum,
    PurpleAsparagus,
    PurpleGrapes,
    Radish,
    Raspberry,
    RedApple,
    RedGrape,
    RedCabbage,
    RedCapsicum,
    Strawberry,
    Tomato,
    Watermelon,
    Apricot,
    Carrot,
    Corn,
    Grapefruit,
    Lemon,
    Mango,
    Nectarine,
    Orange,
    Pineapple,
    Pumpkin,
    SweetPotato,
    // Reference foods
    Apple,
    Rice,
    Bread,
    Pizza,
    Salad,
}

/// Class vocabulary of the food detector. The index is the class id.
pub const DETECTOR_CLASSES: [FoodLabel; 55] = [
    FoodLabel::Asparagus,
    FoodLabel::Avocados,
    FoodLabel::Broccoli,
    FoodLabel::Cabbage,
    FoodLabel::Celery,
    FoodLabel::Cucumber,
    FoodLabel::GreenApples,
    FoodLabel::GreenBeans,
    FoodLabel::GreenCapsicum,
    FoodLabel::GreenGrapes,
    FoodLabel::Kiwifruit,
    FoodLabel::Lettuce,
    FoodLabel::Limes,
    FoodLabel::Peas,
    FoodLabel::Spinach,
    FoodLabel::Banana,
    FoodLabel::Cauliflower,
    FoodLabel::Date,
    FoodLabel::Garlic,
    FoodLabel::Ginger,
    FoodLabel::Mushroom,
    FoodLabel::Onion,
    FoodLabel::Parsnip,
    FoodLabel::Peach,
    FoodLabel::Pear,
    FoodLabel::Potato,
    FoodLabel::Turnip,
    FoodLabel::Beetroot,
    FoodLabel::Blackberry,
    FoodLabel::Blueberry,
    FoodLabel::Cherry,
    FoodLabel::Eggplant,
    FoodLabel::Plum,
    FoodLabel::PurpleAsparagus,
    FoodLabel::PurpleGrapes,
    FoodLabel::Radish,
    FoodLabel::Raspberry,
    FoodLabel::RedApple,
    FoodLabel::RedGrape,
    FoodLabel::RedCabbage,
    FoodLabel::RedCapsicum,
    FoodLabel::Strawberry,
    FoodLabel::Tomato,
    FoodLabel::Watermelon,
    FoodLabel::Apricot,
    FoodLabel::Carrot,
    FoodLabel::Corn,
    FoodLabel::Grapefruit,
    FoodLabel::Lemon,
    FoodLabel::Mango,
    FoodLabel::Nectarine,
    FoodLabel::Orange,
    FoodLabel::Pineapple,
    FoodLabel::Pumpkin,
    FoodLabel::SweetPotato,
];

/// Per-100g nutrition facts for one food.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct NutritionFacts {
    pub calories: u32,
    pub carbs_g: u32,
    pub glycemic_index: u8,
}

impl NutritionFacts {
    const fn new(calories: u32, carbs_g: u32, glycemic_index: u8) -> Self {
        Self {
            calories,
            carbs_g,
            glycemic_index,
        }
    }

    pub fn glycemic_category(&self) -> GlycemicIndex {
        GlycemicIndex::from_value(self.glycemic_index)
    }

    /// Glycemic load of 100g: `carbs_g * glycemic_index / 100`.
    pub fn glycemic_load(&self) -> f32 {
        self.carbs_g as f32 * f32::from(self.glycemic_index) / 100.0
    }

    pub fn glycemic_risk(&self) -> GlycemicRisk {
        GlycemicRisk::from_load(self.glycemic_load())
    }
}

impl FoodLabel {
    pub const ALL: [FoodLabel; 60] = [
        FoodLabel::Asparagus,
        FoodLabel::Avocados,
        FoodLabel::Broccoli,
        FoodLabel::Cabbage,
        FoodLabel::Celery,
        FoodLabel::Cucumber,
        FoodLabel::GreenApples,
        FoodLabel::GreenBeans,
        FoodLabel::GreenCapsicum,
        FoodLabel::GreenGrapes,
        FoodLabel::Kiwifruit,
        FoodLabel::Lettuce,
        FoodLabel::Limes,
        FoodLabel::Peas,
        FoodLabel::Spinach,
        FoodLabel::Banana,
        FoodLabel::Cauliflower,
        FoodLabel::Date,
        FoodLabel::Garlic,
        FoodLabel::Ginger,
        FoodLabel::Mushroom,
        FoodLabel::Onion,
        FoodLabel::Parsnip,
        FoodLabel::Peach,
        FoodLabel::Pear,
        FoodLabel::Potato,
        FoodLabel::Turnip,
        FoodLabel::Beetroot,
        FoodLabel::Blackberry,
        FoodLabel::Blueberry,
        FoodLabel::Cherry,
        FoodLabel::Eggplant,
        FoodLabel::Plum,
        FoodLabel::PurpleAsparagus,
        FoodLabel::PurpleGrapes,
        FoodLabel::Radish,
        FoodLabel::Raspberry,
        FoodLabel::RedApple,
        FoodLabel::RedGrape,
        FoodLabel::RedCabbage,
        FoodLabel::RedCapsicum,
        FoodLabel::Strawberry,
        FoodLabel::Tomato,
        FoodLabel::Watermelon,
        FoodLabel::Apricot,
        FoodLabel::Carrot,
        FoodLabel::Corn,
        FoodLabel::Grapefruit,
        FoodLabel::Lemon,
        FoodLabel::Mango,
        FoodLabel::Nectarine,
        FoodLabel::Orange,
        FoodLabel::Pineapple,
        FoodLabel::Pumpkin,
        FoodLabel::SweetPotato,
        FoodLabel::Apple,
        FoodLabel::Rice,
        FoodLabel::Bread,
        FoodLabel::Pizza,
        FoodLabel::Salad,
    ];

    /// Label as emitted by the detector.
    pub fn as_str(&self) -> &'static str {
        match self {
            FoodLabel::Asparagus => "asparagus",
            FoodLabel::Avocados => "avocados",
            FoodLabel::Broccoli => "broccoli",
            FoodLabel::Cabbage => "cabbage",
            FoodLabel::Celery => "celery",
            FoodLabel::Cucumber => "cucumber",
            FoodLabel::GreenApples => "green_apples",
            FoodLabel::GreenBeans => "green_beans",
            FoodLabel::GreenCapsicum => "green_capsicum",
            FoodLabel::GreenGrapes => "green_grapes",
            FoodLabel::Kiwifruit => "kiwifruit",
            FoodLabel::Lettuce => "lettuce",
            FoodLabel::Limes => "limes",
            FoodLabel::Peas => "peas",
            FoodLabel::Spinach => "spinach",
            FoodLabel::Banana => "Banana",
            FoodLabel::Cauliflower => "Cauliflower",
            FoodLabel::Date => "Date",
            FoodLabel::Garlic => "Garlic",
            FoodLabel::Ginger => "Ginger",
            FoodLabel::Mushroom => "Mushroom",
            FoodLabel::Onion => "Onion",
            FoodLabel::Parsnip => "Parsnip",
            FoodLabel::Peach => "Peach",
            FoodLabel::Pear => "Pear",
            FoodLabel::Potato => "Potato",
            FoodLabel::Turnip => "Turnip",
            FoodLabel::Beetroot => "Beetroot",
            FoodLabel::Blackberry => "Blackberry",
            FoodLabel::Blueberry => "Blueberry",
            FoodLabel::Cherry => "Cherry",
            FoodLabel::Eggplant => "Eggplant",
            FoodLabel::Plum => "Plum",
            FoodLabel::PurpleAsparagus => "Purple asparagus",
            FoodLabel::PurpleGrapes => "Purple grapes",
            FoodLabel::Radish => "Radish",
            FoodLabel::Raspberry => "Raspberry",
            FoodLabel::RedApple => "Red Apple",
            FoodLabel::RedGrape => "Red Grape",
            FoodLabel::RedCabbage => "Red cabbage",
            FoodLabel::RedCapsicum => "Red capsicum",
            FoodLabel::Strawberry => "Strawberry",
            FoodLabel::Tomato => "Tomato",
            FoodLabel::Watermelon => "Watermelon",
            FoodLabel::Apricot => "apricot",
            FoodLabel::Carrot => "carrot",
            FoodLabel::Corn => "corn",
            FoodLabel::Grapefruit => "grapefruit",
            FoodLabel::Lemon => "lemon",
            FoodLabel::Mango => "mango",
            FoodLabel::Nectarine => "nectarine",
            FoodLabel::Orange => "orange",
            FoodLabel::Pineapple => "pineapple",
            FoodLabel::Pumpkin => "pumpkin",
            FoodLabel::SweetPotato => "sweet_potato",
            FoodLabel::Apple => "apple",
            FoodLabel::Rice => "rice",
            FoodLabel::Bread => "bread",
            FoodLabel::Pizza => "pizza",
            FoodLabel::Salad => "salad",
        }
    }

    pub fn facts(&self) -> NutritionFacts {
        match self {
            FoodLabel::Asparagus => NutritionFacts::new(20, 4, 15),
            FoodLabel::Avocados => NutritionFacts::new(160, 9, 15),
            FoodLabel::Broccoli => NutritionFacts::new(55, 7, 15),
            FoodLabel::Cabbage => NutritionFacts::new(25, 6, 10),
            FoodLabel::Celery => NutritionFacts::new(16, 3, 15),
            FoodLabel::Cucumber => NutritionFacts::new(16, 4, 15),
            FoodLabel::GreenApples => NutritionFacts::new(52, 14, 38),
            FoodLabel::GreenBeans => NutritionFacts::new(31, 7, 15),
            FoodLabel::GreenCapsicum => NutritionFacts::new(20, 5, 15),
            FoodLabel::GreenGrapes => NutritionFacts::new(69, 18, 53),
            FoodLabel::Kiwifruit => NutritionFacts::new(61, 15, 50),
            FoodLabel::Lettuce => NutritionFacts::new(15, 3, 10),
            FoodLabel::Limes => NutritionFacts::new(30, 11, 20),
            FoodLabel::Peas => NutritionFacts::new(81, 14, 48),
            FoodLabel::Spinach => NutritionFacts::new(23, 4, 15),
            FoodLabel::Banana => NutritionFacts::new(89, 27, 51),
            FoodLabel::Cauliflower => NutritionFacts::new(25, 5, 15),
            FoodLabel::Date => NutritionFacts::new(282, 75, 42),
            FoodLabel::Garlic => NutritionFacts::new(149, 33, 30),
            FoodLabel::Ginger => NutritionFacts::new(80, 18, 15),
            FoodLabel::Mushroom => NutritionFacts::new(22, 3, 15),
            FoodLabel::Onion => NutritionFacts::new(40, 9, 10),
            FoodLabel::Parsnip => NutritionFacts::new(75, 18, 52),
            FoodLabel::Peach => NutritionFacts::new(39, 10, 42),
            FoodLabel::Pear => NutritionFacts::new(57, 15, 38),
            FoodLabel::Potato => NutritionFacts::new(77, 17, 78),
            FoodLabel::Turnip => NutritionFacts::new(28, 6, 62),
            FoodLabel::Beetroot => NutritionFacts::new(43, 10, 64),
            FoodLabel::Blackberry => NutritionFacts::new(43, 10, 25),
            FoodLabel::Blueberry => NutritionFacts::new(57, 14, 53),
            FoodLabel::Cherry => NutritionFacts::new(50, 12, 22),
            FoodLabel::Eggplant => NutritionFacts::new(25, 6, 15),
            FoodLabel::Plum => NutritionFacts::new(46, 11, 40),
            FoodLabel::PurpleAsparagus => NutritionFacts::new(20, 4, 15),
            FoodLabel::PurpleGrapes => NutritionFacts::new(69, 18, 53),
            FoodLabel::Radish => NutritionFacts::new(16, 3, 15),
            FoodLabel::Raspberry => NutritionFacts::new(52, 12, 32),
            FoodLabel::RedApple => NutritionFacts::new(52, 14, 36),
            FoodLabel::RedGrape => NutritionFacts::new(69, 18, 53),
            FoodLabel::RedCabbage => NutritionFacts::new(31, 7, 10),
            FoodLabel::RedCapsicum => NutritionFacts::new(31, 6, 15),
            FoodLabel::Strawberry => NutritionFacts::new(32, 8, 40),
            FoodLabel::Tomato => NutritionFacts::new(18, 4, 15),
            FoodLabel::Watermelon => NutritionFacts::new(30, 8, 72),
            FoodLabel::Apricot => NutritionFacts::new(48, 11, 34),
            FoodLabel::Carrot => NutritionFacts::new(41, 10, 39),
            FoodLabel::Corn => NutritionFacts::new(86, 19, 52),
            FoodLabel::Grapefruit => NutritionFacts::new(42, 11, 25),
            FoodLabel::Lemon => NutritionFacts::new(29, 9, 20),
            FoodLabel::Mango => NutritionFacts::new(60, 15, 51),
            FoodLabel::Nectarine => NutritionFacts::new(44, 11, 43),
            FoodLabel::Orange => NutritionFacts::new(47, 12, 43),
            FoodLabel::Pineapple => NutritionFacts::new(50, 13, 59),
            FoodLabel::Pumpkin => NutritionFacts::new(26, 7, 75),
            FoodLabel::SweetPotato => NutritionFacts::new(86, 20, 63),
            FoodLabel::Apple => NutritionFacts::new(52, 14, 36),
            FoodLabel::Rice => NutritionFacts::new(130, 28, 73),
            FoodLabel::Bread => NutritionFacts::new(265, 49, 75),
            FoodLabel::Pizza => NutritionFacts::new(266, 33, 80),
            FoodLabel::Salad => NutritionFacts::new(20, 5, 15),
        }
    }

    /// Label for a detector class id, if the id is in the vocabulary.
    pub fn from_class_id(class_id: usize) -> Option<FoodLabel> {
        DETECTOR_CLASSES.get(class_id).copied()
    }
}

impl std::fmt::Display for FoodLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
