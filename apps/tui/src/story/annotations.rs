use crate::stage::AnnotationDescriptor;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Callout {
    ElectricVehicles,
    DieselVehicles,
    ZeroCylinders,
    SmallEngines,
    LargeEngines,
    FourCylinders,
    SixCylinders,
}

impl Callout {
    pub fn descriptor(self) -> &'static AnnotationDescriptor {
        match self {
            Self::ElectricVehicles => &ELECTRIC_VEHICLES,
            Self::DieselVehicles => &DIESEL_VEHICLES,
            Self::ZeroCylinders => &ZERO_CYLINDERS,
            Self::SmallEngines => &SMALL_ENGINES,
            Self::LargeEngines => &LARGE_ENGINES,
            Self::FourCylinders => &FOUR_CYLINDERS,
            Self::SixCylinders => &SIX_CYLINDERS,
        }
    }
}

static ELECTRIC_VEHICLES: AnnotationDescriptor = AnnotationDescriptor {
    id: "electric-annotation",
    anchor: (113.0, 100.0),
    callout_offset: (-0.14, -0.21),
    radius: 0.14,
    title: "Electric Vehicles",
    label: "Perform best in the city and highway",
};

static DIESEL_VEHICLES: AnnotationDescriptor = AnnotationDescriptor {
    id: "diesel-annotation",
    anchor: (24.7, 36.2),
    callout_offset: (0.14, -0.21),
    radius: 0.11,
    title: "Diesel Vehicles",
    label: "Perform better than most gasoline vehicles in the city and highway",
};

static ZERO_CYLINDERS: AnnotationDescriptor = AnnotationDescriptor {
    id: "electric-engine-annotation",
    anchor: (113.0, 100.0),
    callout_offset: (-0.14, -0.21),
    radius: 0.14,
    title: "Zero Cylinders (Electric Engine)",
    label: "Performs best in the city and highway",
};

static SMALL_ENGINES: AnnotationDescriptor = AnnotationDescriptor {
    id: "small-engine-annotation",
    anchor: (27.0, 31.6),
    callout_offset: (0.14, -0.21),
    radius: 0.16,
    title: "Small (2-4) Engine Cylinders",
    label: "Perform better than larger engines in the city and highway",
};

static LARGE_ENGINES: AnnotationDescriptor = AnnotationDescriptor {
    id: "large-engine-annotation",
    anchor: (11.3, 18.4),
    callout_offset: (0.08, -0.11),
    radius: 0.08,
    title: "Large (12) Engine Cylinders",
    label: "Perform the worst in the city and highway",
};

static FOUR_CYLINDERS: AnnotationDescriptor = AnnotationDescriptor {
    id: "four-cylinders-annotation",
    anchor: (24.7, 33.8),
    callout_offset: (0.16, 0.24),
    radius: 0.11,
    title: "Four Cylinders",
    label: "Diesel engine performs better in the city and highway.",
};

static SIX_CYLINDERS: AnnotationDescriptor = AnnotationDescriptor {
    id: "six-cylinders-annotation",
    anchor: (19.7, 24.1),
    callout_offset: (0.11, -0.16),
    radius: 0.11,
    title: "Six Cylinders",
    label: "Diesel engine performs better in the city. Gasoline engine performs better on the highway.",
};

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [Callout; 7] = [
        Callout::ElectricVehicles,
        Callout::DieselVehicles,
        Callout::ZeroCylinders,
        Callout::SmallEngines,
        Callout::LargeEngines,
        Callout::FourCylinders,
        Callout::SixCylinders,
    ];

    #[test]
    fn callout_ids_are_unique() {
        let mut ids: Vec<_> = ALL.iter().map(|c| c.descriptor().id).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), ALL.len());
    }

    #[test]
    fn notes_stay_on_the_plot() {
        for callout in ALL {
            let note = callout.descriptor().note_point();
            assert!((0.0..=1.0).contains(&note.x), "{callout:?} x={}", note.x);
            assert!((0.0..=1.0).contains(&note.y), "{callout:?} y={}", note.y);
        }
    }
}
