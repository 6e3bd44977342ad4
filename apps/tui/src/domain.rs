#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize)]
pub enum Fuel {
    Electric,
    Gasoline,
    Diesel,
}

impl Fuel {
    pub const ALL: [Self; 3] = [Self::Electric, Self::Gasoline, Self::Diesel];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Electric => "electric",
            Self::Gasoline => "gasoline",
            Self::Diesel => "diesel",
        }
    }

    pub const fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(Self::Electric),
            1 => Some(Self::Gasoline),
            2 => Some(Self::Diesel),
            _ => None,
        }
    }

    /// Parses a CSV fuel label. The source data spells electric vehicles
    /// `Electricity`, the legend spells them `Electric`.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "electric" | "electricity" => Some(Self::Electric),
            "gasoline" => Some(Self::Gasoline),
            "diesel" => Some(Self::Diesel),
            _ => None,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Electric => "Electric",
            Self::Gasoline => "Gasoline",
            Self::Diesel => "Diesel",
        }
    }
}

/// One row of the vehicle dataset.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize)]
pub struct VehicleRecord {
    pub city_mpg: f64,
    pub highway_mpg: f64,
    pub cylinders: u32,
    pub fuel: Fuel,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Scene {
    Title,
    FuelTypeFocus,
    EngineSizeFocus,
    CombinedFocus,
    Conclusion,
}

impl Scene {
    pub const COUNT: usize = 5;

    pub const fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(Self::Title),
            1 => Some(Self::FuelTypeFocus),
            2 => Some(Self::EngineSizeFocus),
            3 => Some(Self::CombinedFocus),
            4 => Some(Self::Conclusion),
            _ => None,
        }
    }

    pub const fn index(self) -> usize {
        match self {
            Self::Title => 0,
            Self::FuelTypeFocus => 1,
            Self::EngineSizeFocus => 2,
            Self::CombinedFocus => 3,
            Self::Conclusion => 4,
        }
    }

    /// Maps a requested scene index onto a valid scene. Anything outside
    /// `0..=4` lands on the title scene, so stepping back from the title
    /// re-enters it and stepping past the conclusion restarts the story.
    pub fn resolve(index: isize) -> Self {
        usize::try_from(index)
            .ok()
            .and_then(Self::from_index)
            .unwrap_or(Self::Title)
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Title => "Introduction",
            Self::FuelTypeFocus => "Fuel Type",
            Self::EngineSizeFocus => "Engine Size",
            Self::CombinedFocus => "Fuel Type and Engine Size",
            Self::Conclusion => "Conclusion",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fuel_labels_parse_case_insensitively() {
        assert_eq!(Fuel::parse(" Gasoline "), Some(Fuel::Gasoline));
        assert_eq!(Fuel::parse("DIESEL"), Some(Fuel::Diesel));
        assert_eq!(Fuel::parse("Electricity"), Some(Fuel::Electric));
        assert_eq!(Fuel::parse("Electric"), Some(Fuel::Electric));
        assert_eq!(Fuel::parse("Hydrogen"), None);
    }

    #[test]
    fn scene_indices_round_trip() {
        for index in 0..Scene::COUNT {
            let scene = Scene::from_index(index);
            assert_eq!(scene.map(Scene::index), Some(index));
        }
        assert_eq!(Scene::from_index(5), None);
    }

    #[test]
    fn out_of_range_indices_resolve_to_title() {
        assert_eq!(Scene::resolve(-1), Scene::Title);
        assert_eq!(Scene::resolve(5), Scene::Title);
        assert_eq!(Scene::resolve(isize::MAX), Scene::Title);
        assert_eq!(Scene::resolve(3), Scene::CombinedFocus);
    }
}
