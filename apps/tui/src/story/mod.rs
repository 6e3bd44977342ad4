pub mod annotations;
pub mod controller;
pub mod narration;
pub mod script;

pub use controller::{
    Presentation, PresentationState, SceneContext, SlideController, SubStep, Superseded,
};
