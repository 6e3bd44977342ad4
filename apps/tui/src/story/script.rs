//! The five scenes of the presentation as data.
//!
//! Every scene has the same shape: an entry routine that sets the stage and
//! installs a gating control, then a reveal routine that runs when the
//! control is activated. Both routines are step lists interpreted by
//! [`crate::story::controller`].

use std::time::Duration;

use crate::domain::{Fuel, Scene};
use crate::filter::Filter;
use crate::stage::{Container, ControlAction, NextLabel};
use crate::story::annotations::Callout;

pub const MARK_FADE: Duration = Duration::from_millis(2000);
pub const ANNOTATION_FADE: Duration = Duration::from_millis(2000);
pub const CONTROL_FADE: Duration = Duration::from_millis(1000);
pub const FINDINGS_FADE: Duration = Duration::from_millis(2000);

pub const FUEL_FOCUS_FADED: f64 = 0.03;
pub const FADED: f64 = 0.05;
pub const DIMMED_CALLOUT: f64 = 0.1;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Step {
    Title(&'static str),
    /// Appends a paragraph instantly.
    Write(Container, &'static str),
    Clear(Container),
    /// Types a paragraph out with the narration effect.
    Narrate(Container, &'static str),
    Pause(Duration),
    /// Fades marks matching the filter to the given opacity.
    Fade(Filter, f64),
    ResetFades,
    /// Brings marks matching the filter back to full opacity.
    Highlight(Filter),
    /// Waits for the latest visual transition to finish.
    Settle,
    Annotate(Callout),
    Dim(Callout, f64),
    Restore(Callout),
    Findings(&'static [&'static str]),
    EnableExplore,
    ShowNav(NextLabel),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControlSpec {
    pub label: &'static str,
    pub action: ControlAction,
}

#[derive(Debug, Clone, Copy)]
pub struct ScenePlan {
    pub scene: Scene,
    pub entry: &'static [Step],
    pub control: ControlSpec,
    pub reveal: &'static [Step],
}

const fn pause(millis: u64) -> Step {
    Step::Pause(Duration::from_millis(millis))
}

pub fn plan(scene: Scene) -> &'static ScenePlan {
    match scene {
        Scene::Title => &TITLE,
        Scene::FuelTypeFocus => &FUEL_TYPE_FOCUS,
        Scene::EngineSizeFocus => &ENGINE_SIZE_FOCUS,
        Scene::CombinedFocus => &COMBINED_FOCUS,
        Scene::Conclusion => &CONCLUSION,
    }
}

static TITLE: ScenePlan = ScenePlan {
    scene: Scene::Title,
    entry: &[
        Step::Title("Introduction"),
        Step::Write(
            Container::Narrative,
            "Let's explore how different fuel types and engine sizes affect city and highway miles per gallon (MPG).",
        ),
        Step::Write(
            Container::Narrative,
            "Note that the vehicle's fuel type is characterized by its color and its engine size is delineated by the data point's diameter.",
        ),
    ],
    control: ControlSpec {
        label: "Let's Explore \u{2192}",
        action: ControlAction::Advance,
    },
    reveal: &[],
};

const FUEL_QUESTION: &str = "How does fuel type impact city and highway mileage?";

static FUEL_TYPE_FOCUS: ScenePlan = ScenePlan {
    scene: Scene::FuelTypeFocus,
    entry: &[
        Step::Title("The Impact of Fuel Type on Mileage"),
        Step::Narrate(Container::Narrative, FUEL_QUESTION),
        pause(1000),
        Step::Narrate(
            Container::Narrative,
            "First, let's focus on electric and diesel vehicles.",
        ),
    ],
    control: ControlSpec {
        label: "Focus on Diesel and Electric Vehicles \u{2192}",
        action: ControlAction::Reveal,
    },
    reveal: &[
        Step::Clear(Container::Narrative),
        Step::Write(Container::Narrative, FUEL_QUESTION),
        Step::Fade(Filter::FuelIs(Fuel::Gasoline), FUEL_FOCUS_FADED),
        Step::Settle,
        pause(1000),
        Step::Annotate(Callout::ElectricVehicles),
        Step::Narrate(
            Container::Narrative,
            "Notice how the electric cars are clustered around the top right side of the graph because they have high city and highway mileage.",
        ),
        pause(2000),
        Step::Annotate(Callout::DieselVehicles),
        Step::Narrate(
            Container::Narrative,
            "Diesel engines are clustered above the majority of gasoline engines, showing that they perform better than most gasoline engines in city and highway mileage.",
        ),
        pause(2000),
        Step::Narrate(Container::ConclusionHeader, "Conclusion"),
        Step::Narrate(
            Container::Conclusion,
            "Fuel type is a significant factor in determining fuel efficiency, with electric vehicles generally performing better due to regenerative braking and diesel vehicles performing better than most gasoline vehicles due to diesel fuel being more combustible than gasoline.",
        ),
        Step::ShowNav(NextLabel::Arrow),
    ],
};

const ENGINE_QUESTION: &str = "How does engine size impact city and highway mileage?";

static ENGINE_SIZE_FOCUS: ScenePlan = ScenePlan {
    scene: Scene::EngineSizeFocus,
    entry: &[
        Step::Title("The Impact of Engine Size on Mileage"),
        Step::Narrate(Container::Narrative, ENGINE_QUESTION),
        pause(1000),
        Step::Narrate(
            Container::Narrative,
            "Let's focus on vehicles that have either a small or large engine.",
        ),
    ],
    control: ControlSpec {
        label: "Filter Engine Sizes \u{2192}",
        action: ControlAction::Reveal,
    },
    reveal: &[
        Step::Clear(Container::Narrative),
        Step::Write(Container::Narrative, ENGINE_QUESTION),
        Step::Fade(Filter::CylindersBetween(4, 12), FADED),
        Step::Settle,
        pause(1000),
        Step::Annotate(Callout::ZeroCylinders),
        Step::Narrate(
            Container::Narrative,
            "Electric vehicles do not have engine cylinders, therefore all the energy goes to the motor instead of firing engine cylinders.",
        ),
        pause(2000),
        Step::Annotate(Callout::SmallEngines),
        Step::Annotate(Callout::LargeEngines),
        Step::Narrate(
            Container::Narrative,
            "The more cylinders an engine has, the less fuel efficient it is. Hence, vehicles with smaller engines have better mileage than larger engines.",
        ),
        Step::Narrate(Container::ConclusionHeader, "Conclusion"),
        Step::Narrate(
            Container::Conclusion,
            "Larger engines typically consume more fuel, resulting in a lower MPG. So, although fun to drive, cars with many cylinders have relatively low fuel efficiency.",
        ),
        Step::ShowNav(NextLabel::Arrow),
    ],
};

const COMBINED_QUESTION: &str =
    "How does the combination of fuel type and engine size improve overall fuel efficiency?";

const COMBINED_HIGHLIGHTS: &[Filter] = &[
    Filter::CylindersIs(4),
    Filter::CylindersIs(6),
    Filter::FuelIs(Fuel::Electric),
];

static COMBINED_FOCUS: ScenePlan = ScenePlan {
    scene: Scene::CombinedFocus,
    entry: &[
        Step::Title("The Impact of Fuel Type and Engine Size on Mileage"),
        Step::Narrate(Container::Narrative, COMBINED_QUESTION),
        pause(1000),
        Step::Narrate(
            Container::Narrative,
            "Let's explore how engine size and fuel type affect fuel efficiency.",
        ),
    ],
    control: ControlSpec {
        label: "Explore \u{2192}",
        action: ControlAction::Reveal,
    },
    reveal: &[
        Step::Clear(Container::Narrative),
        Step::Write(Container::Narrative, COMBINED_QUESTION),
        Step::Fade(Filter::FuelIsNot(Fuel::Electric), FADED),
        Step::Annotate(Callout::ZeroCylinders),
        Step::Narrate(
            Container::Narrative,
            "Electric cars consistently outperform diesel and gasoline vehicles due to regenerative braking.",
        ),
        pause(3000),
        Step::ResetFades,
        Step::Dim(Callout::ZeroCylinders, DIMMED_CALLOUT),
        Step::Fade(Filter::CylindersIsNot(4), FADED),
        Step::Annotate(Callout::FourCylinders),
        Step::Narrate(
            Container::Narrative,
            "Four-cylinder diesel vehicles perform better in the city and highway than most four-cylinder gasoline vehicles due to diesel fuel being more combustible than gasoline.",
        ),
        pause(3000),
        Step::ResetFades,
        Step::Dim(Callout::FourCylinders, DIMMED_CALLOUT),
        Step::Fade(Filter::CylindersIsNot(6), FADED),
        Step::Annotate(Callout::SixCylinders),
        Step::Narrate(
            Container::Narrative,
            "Contrary to popular belief, six-cylinder diesel vehicles perform worse on the highway than most six-cylinder gasoline vehicles.",
        ),
        pause(5000),
        Step::Highlight(Filter::AnyOf(COMBINED_HIGHLIGHTS)),
        Step::Restore(Callout::ZeroCylinders),
        Step::Restore(Callout::FourCylinders),
        Step::Narrate(Container::ConclusionHeader, "Conclusion"),
        Step::Narrate(
            Container::Conclusion,
            "There is a complex interplay between fuel type and engine size. Although electric cars perform the best, four-cylinder diesel engines perform better than most gasoline counterparts. In contrast, six-cylinder diesel engines perform worse on the highway than most equivalently sized gasoline engines.",
        ),
        Step::ShowNav(NextLabel::Arrow),
    ],
};

const CLOSING: &str =
    "Consider these factors when choosing a vehicle to balance performance and fuel economy.";

static CONCLUSION: ScenePlan = ScenePlan {
    scene: Scene::Conclusion,
    entry: &[
        Step::Title("Conclusion"),
        Step::Narrate(Container::ConclusionHeader, "Main Findings"),
        Step::Findings(&[
            "Fuel type significantly affects MPG",
            "Engine size inversely relates to fuel efficiency",
            "Fuel type and engine size provide deeper insights into fuel efficiency trends",
        ]),
        pause(1000),
        Step::Narrate(Container::Conclusion, CLOSING),
    ],
    control: ControlSpec {
        label: "Explore the Data Yourself \u{2192}",
        action: ControlAction::Reveal,
    },
    reveal: &[
        Step::Clear(Container::Conclusion),
        Step::Write(Container::Conclusion, CLOSING),
        Step::EnableExplore,
        Step::Narrate(
            Container::Conclusion,
            "Hover over the data points to see more details or filter the data by selecting a fuel type from the legend on the bottom right.",
        ),
        Step::ShowNav(NextLabel::Restart),
    ],
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plans_are_indexed_by_their_scene() {
        for index in 0..Scene::COUNT {
            let scene = Scene::from_index(index).unwrap_or(Scene::Title);
            assert_eq!(plan(scene).scene, scene);
        }
    }

    #[test]
    fn every_reveal_ends_with_navigation() {
        for index in 1..Scene::COUNT {
            let scene = Scene::from_index(index).unwrap_or(Scene::Title);
            let plan = plan(scene);
            assert_eq!(plan.control.action, ControlAction::Reveal);
            assert!(matches!(plan.reveal.last(), Some(Step::ShowNav(_))));
        }
    }

    #[test]
    fn title_scene_advances_directly() {
        let plan = plan(Scene::Title);
        assert_eq!(plan.control.action, ControlAction::Advance);
        assert!(plan.reveal.is_empty());
    }

    #[test]
    fn only_the_conclusion_offers_a_restart() {
        for index in 0..Scene::COUNT {
            let scene = Scene::from_index(index).unwrap_or(Scene::Title);
            let restarts = plan(scene)
                .reveal
                .iter()
                .any(|step| *step == Step::ShowNav(NextLabel::Restart));
            assert_eq!(restarts, scene == Scene::Conclusion);
        }
    }
}
