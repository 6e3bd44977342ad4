use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use thiserror::Error;
use tokio::task::JoinHandle;
use tokio::time::Instant;
use tracing::{debug, info};

use crate::domain::{Fuel, Scene, VehicleRecord};
use crate::scale::PlotPoint;
use crate::stage::{
    AnnotationHandle, AnnotationRenderer, ChartRenderer, ControlAction, HoverEvent, Stage,
    Transition, OPAQUE,
};
use crate::story::annotations::Callout;
use crate::story::narration::narrate;
use crate::story::script::{
    self, ScenePlan, Step, ANNOTATION_FADE, CONTROL_FADE, FINDINGS_FADE, MARK_FADE,
};

/// Progress within the current scene's script.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubStep {
    Entering,
    AwaitingControl,
    Revealing,
    Complete,
}

impl SubStep {
    pub const fn index(self) -> usize {
        match self {
            Self::Entering => 0,
            Self::AwaitingControl => 1,
            Self::Revealing => 2,
            Self::Complete => 3,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PresentationState {
    pub current_scene: Scene,
    pub sub_step: SubStep,
}

impl PresentationState {
    pub const fn enter(scene: Scene) -> Self {
        Self {
            current_scene: scene,
            sub_step: SubStep::Entering,
        }
    }
}

#[derive(Debug)]
pub struct Presentation {
    pub state: PresentationState,
    generation: u64,
    pub stage: Stage,
}

impl Presentation {
    pub fn new(records: Arc<[VehicleRecord]>) -> Self {
        Self {
            state: PresentationState::enter(Scene::Title),
            generation: 0,
            stage: Stage::new(records),
        }
    }

    pub const fn generation(&self) -> u64 {
        self.generation
    }

    /// Makes every running scene routine stale.
    pub fn invalidate(&mut self) -> u64 {
        self.generation += 1;
        self.generation
    }
}

/// Returned when a scene routine notices it has been replaced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("scene routine was superseded")]
pub struct Superseded;

fn lock(shared: &Mutex<Presentation>) -> MutexGuard<'_, Presentation> {
    shared.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Handle a scene routine uses to touch shared state. Every access first
/// checks that the routine's generation is still the current one.
#[derive(Debug, Clone)]
pub struct SceneContext {
    shared: Arc<Mutex<Presentation>>,
    generation: u64,
}

impl SceneContext {
    /// A context bound to the presentation's current generation.
    pub fn current(shared: &Arc<Mutex<Presentation>>) -> Self {
        let generation = lock(shared).generation;
        Self {
            shared: Arc::clone(shared),
            generation,
        }
    }

    pub fn update<R>(&self, f: impl FnOnce(&mut Presentation) -> R) -> Result<R, Superseded> {
        let mut presentation = lock(&self.shared);
        if presentation.generation != self.generation {
            return Err(Superseded);
        }
        Ok(f(&mut presentation))
    }

    pub fn stage<R>(&self, f: impl FnOnce(&mut Stage) -> R) -> Result<R, Superseded> {
        self.update(|presentation| f(&mut presentation.stage))
    }

    pub fn check(&self) -> Result<(), Superseded> {
        self.update(|_| ())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Entry,
    Reveal,
}

/// Owns the presentation state and sequences the five scenes.
#[derive(Debug)]
pub struct SlideController {
    shared: Arc<Mutex<Presentation>>,
    routine: Option<JoinHandle<()>>,
}

impl SlideController {
    pub fn new(records: Arc<[VehicleRecord]>) -> Self {
        Self {
            shared: Arc::new(Mutex::new(Presentation::new(records))),
            routine: None,
        }
    }

    pub fn start(&mut self) {
        self.go_to_scene(0);
    }

    pub fn state(&self) -> PresentationState {
        lock(&self.shared).state
    }

    pub fn current_scene(&self) -> Scene {
        self.state().current_scene
    }

    /// Read access for rendering.
    pub fn view<R>(&self, f: impl FnOnce(&PresentationState, &Stage) -> R) -> R {
        let presentation = lock(&self.shared);
        f(&presentation.state, &presentation.stage)
    }

    pub fn go_to_scene(&mut self, index: isize) {
        let scene = Scene::resolve(index);
        let generation = self.reset_transient_ui();
        lock(&self.shared).state = PresentationState::enter(scene);
        info!(scene = scene.label(), generation, "entering scene");
        self.spawn(scene, Phase::Entry);
    }

    pub fn advance(&mut self) {
        self.go_to_scene(self.scene_offset(1));
    }

    pub fn retreat(&mut self) {
        self.go_to_scene(self.scene_offset(-1));
    }

    pub fn replay(&mut self) {
        self.go_to_scene(self.scene_offset(0));
    }

    /// Cancels the running scene routine and clears everything it put on
    /// the stage. Returns the new generation.
    pub fn reset_transient_ui(&mut self) -> u64 {
        if let Some(routine) = self.routine.take() {
            routine.abort();
        }
        let mut presentation = lock(&self.shared);
        let generation = presentation.invalidate();
        presentation.stage.reset_transient(MARK_FADE);
        generation
    }

    /// Presses the scene's gating control. Returns false when no control is
    /// currently offered.
    pub fn activate_control(&mut self) -> bool {
        let (scene, action) = {
            let mut presentation = lock(&self.shared);
            if presentation.state.sub_step != SubStep::AwaitingControl {
                return false;
            }
            let Some(control) = presentation.stage.control.take() else {
                return false;
            };
            if control.action == ControlAction::Reveal {
                presentation.state.sub_step = SubStep::Revealing;
            }
            (presentation.state.current_scene, control.action)
        };

        debug!(scene = scene.label(), ?action, "control activated");
        match action {
            ControlAction::Advance => self.advance(),
            ControlAction::Reveal => self.spawn(scene, Phase::Reveal),
        }
        true
    }

    pub fn legend_click(&self, fuel: Fuel) -> bool {
        let applied = lock(&self.shared).stage.apply_legend_filter(fuel);
        if applied {
            debug!(fuel = fuel.label(), "legend filter applied");
        }
        applied
    }

    pub fn hover(&self, event: HoverEvent) {
        lock(&self.shared).stage.hover(event);
    }

    pub fn mark_near(&self, point: PlotPoint, tolerance: f64) -> Option<usize> {
        lock(&self.shared).stage.mark_near(point, tolerance)
    }

    fn scene_offset(&self, offset: isize) -> isize {
        let index = isize::try_from(self.current_scene().index()).unwrap_or(0);
        index + offset
    }

    fn spawn(&mut self, scene: Scene, phase: Phase) {
        let ctx = SceneContext::current(&self.shared);
        let plan = script::plan(scene);
        if let Some(previous) = self.routine.take() {
            previous.abort();
        }
        self.routine = Some(tokio::spawn(async move {
            let result = match phase {
                Phase::Entry => run_entry(&ctx, plan).await,
                Phase::Reveal => StepRunner::new(&ctx).run(plan.reveal).await,
            };
            if result.is_err() {
                debug!(scene = plan.scene.label(), ?phase, "scene routine superseded");
            }
        }));
    }
}

impl Drop for SlideController {
    fn drop(&mut self) {
        if let Some(routine) = self.routine.take() {
            routine.abort();
        }
    }
}

async fn run_entry(ctx: &SceneContext, plan: &'static ScenePlan) -> Result<(), Superseded> {
    StepRunner::new(ctx).run(plan.entry).await?;
    ctx.update(|presentation| {
        presentation
            .stage
            .install_control(plan.control.label, plan.control.action, CONTROL_FADE);
        presentation.state.sub_step = SubStep::AwaitingControl;
    })
}

/// Interprets scene steps in order, suspending on narration, pauses and
/// transition completion.
struct StepRunner<'a> {
    ctx: &'a SceneContext,
    callouts: HashMap<Callout, AnnotationHandle>,
    pending: Option<Transition>,
}

impl<'a> StepRunner<'a> {
    fn new(ctx: &'a SceneContext) -> Self {
        Self {
            ctx,
            callouts: HashMap::new(),
            pending: None,
        }
    }

    async fn run(&mut self, steps: &[Step]) -> Result<(), Superseded> {
        for step in steps {
            self.step(*step).await?;
        }
        Ok(())
    }

    async fn step(&mut self, step: Step) -> Result<(), Superseded> {
        match step {
            Step::Title(text) => self.ctx.stage(|stage| stage.title = text.to_string()),
            Step::Write(container, text) => self
                .ctx
                .stage(|stage| stage.panel_mut(container).write(text)),
            Step::Clear(container) => self.ctx.stage(|stage| stage.panel_mut(container).clear()),
            Step::Narrate(container, text) => narrate(self.ctx, container, text).await,
            Step::Pause(duration) => {
                tokio::time::sleep(duration).await;
                self.ctx.check()
            }
            Step::Fade(filter, opacity) => {
                let transition = self
                    .ctx
                    .stage(|stage| stage.set_mark_opacity(&filter, opacity, MARK_FADE))?;
                self.track(transition);
                Ok(())
            }
            Step::ResetFades => {
                let transition = self.ctx.stage(|stage| stage.reset_all_opacity(MARK_FADE))?;
                self.track(transition);
                Ok(())
            }
            Step::Highlight(filter) => {
                let transition = self
                    .ctx
                    .stage(|stage| stage.set_mark_opacity(&filter, OPAQUE, MARK_FADE))?;
                self.track(transition);
                Ok(())
            }
            Step::Settle => {
                if let Some(transition) = self.pending.take() {
                    transition.finished().await;
                }
                self.ctx.check()
            }
            Step::Annotate(callout) => {
                let handle = self
                    .ctx
                    .stage(|stage| stage.show(callout.descriptor(), ANNOTATION_FADE))?;
                self.callouts.insert(callout, handle);
                self.track(Transition::until(Instant::now() + ANNOTATION_FADE));
                Ok(())
            }
            Step::Dim(callout, opacity) => self.fade_callout(callout, opacity),
            Step::Restore(callout) => self.fade_callout(callout, OPAQUE),
            Step::Findings(items) => {
                let transition = self
                    .ctx
                    .stage(|stage| stage.show_findings(items, FINDINGS_FADE))?;
                self.track(transition);
                Ok(())
            }
            Step::EnableExplore => self.ctx.stage(Stage::enable_explore),
            Step::ShowNav(label) => self.ctx.update(|presentation| {
                presentation.stage.show_nav(label);
                presentation.state.sub_step = SubStep::Complete;
            }),
        }
    }

    fn fade_callout(&mut self, callout: Callout, opacity: f64) -> Result<(), Superseded> {
        let Some(handle) = self.callouts.get(&callout).copied() else {
            return Ok(());
        };
        let transition = self
            .ctx
            .stage(|stage| stage.hide(handle, opacity, ANNOTATION_FADE))?;
        self.track(transition);
        Ok(())
    }

    fn track(&mut self, transition: Transition) {
        self.pending = Some(match self.pending {
            Some(pending) => pending.join(transition),
            None => transition,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stage::{Container, NextLabel, LEGEND_FADED_OPACITY};
    use std::time::Duration;

    fn records() -> Arc<[VehicleRecord]> {
        Arc::from(vec![
            VehicleRecord {
                city_mpg: 21.0,
                highway_mpg: 29.0,
                cylinders: 6,
                fuel: Fuel::Gasoline,
            },
            VehicleRecord {
                city_mpg: 27.0,
                highway_mpg: 38.0,
                cylinders: 4,
                fuel: Fuel::Diesel,
            },
            VehicleRecord {
                city_mpg: 124.0,
                highway_mpg: 102.0,
                cylinders: 0,
                fuel: Fuel::Electric,
            },
        ])
    }

    async fn settle() {
        tokio::time::sleep(Duration::from_secs(90)).await;
    }

    fn opacities(controller: &SlideController) -> Vec<f64> {
        let now = Instant::now();
        controller.view(|_, stage| {
            (0..stage.records().len())
                .filter_map(|index| stage.mark_opacity(index, now))
                .collect()
        })
    }

    #[tokio::test(start_paused = true)]
    async fn fuel_scene_runs_entry_then_reveal() {
        let mut controller = SlideController::new(records());
        controller.go_to_scene(1);
        settle().await;

        assert_eq!(controller.state().sub_step, SubStep::AwaitingControl);
        controller.view(|_, stage| {
            assert_eq!(stage.title, "The Impact of Fuel Type on Mileage");
            assert!(stage
                .panel(Container::Narrative)
                .text()
                .starts_with("How does fuel type impact"));
            assert!(stage.control.is_some());
            assert!(!stage.nav.visible);
        });

        assert!(controller.activate_control());
        assert_eq!(controller.state().sub_step, SubStep::Revealing);
        settle().await;

        assert_eq!(controller.state().sub_step, SubStep::Complete);
        controller.view(|_, stage| {
            assert!(stage.nav.visible);
            assert_eq!(stage.nav.next_label, NextLabel::Arrow);
            assert_eq!(stage.annotations().len(), 2);
            assert_eq!(stage.panel(Container::ConclusionHeader).text(), "Conclusion\n\n");
        });
        assert_eq!(opacities(&controller), vec![0.03, 1.0, 1.0]);
    }

    #[tokio::test(start_paused = true)]
    async fn engine_scene_fades_mid_size_engines() {
        let mut controller = SlideController::new(records());
        controller.go_to_scene(2);
        settle().await;
        assert!(controller.activate_control());
        settle().await;

        assert_eq!(opacities(&controller), vec![0.05, 1.0, 1.0]);
        controller.view(|_, stage| assert_eq!(stage.annotations().len(), 3));
    }

    #[tokio::test(start_paused = true)]
    async fn combined_scene_ends_with_highlights_restored() {
        let mut controller = SlideController::new(records());
        controller.go_to_scene(3);
        settle().await;
        assert!(controller.activate_control());
        settle().await;

        assert_eq!(controller.state().sub_step, SubStep::Complete);
        assert_eq!(opacities(&controller), vec![1.0, 1.0, 1.0]);
        controller.view(|_, stage| {
            let targets: Vec<f64> = stage
                .annotations()
                .iter()
                .map(|a| a.opacity.target())
                .collect();
            assert_eq!(targets, vec![1.0, 1.0, 1.0]);
        });
    }

    #[tokio::test(start_paused = true)]
    async fn control_is_ignored_until_offered() {
        let mut controller = SlideController::new(records());
        controller.go_to_scene(1);
        assert!(!controller.activate_control());
        assert_eq!(controller.state().sub_step, SubStep::Entering);
    }

    #[tokio::test(start_paused = true)]
    async fn title_control_moves_to_the_first_scene() {
        let mut controller = SlideController::new(records());
        controller.start();
        settle().await;

        assert!(controller.activate_control());
        assert_eq!(controller.current_scene(), Scene::FuelTypeFocus);
        assert_eq!(controller.state().sub_step, SubStep::Entering);
    }

    #[tokio::test(start_paused = true)]
    async fn navigating_mid_narration_discards_the_old_scene() {
        let mut controller = SlideController::new(records());
        controller.go_to_scene(1);
        tokio::time::sleep(Duration::from_millis(200)).await;

        controller.go_to_scene(2);
        settle().await;

        controller.view(|state, stage| {
            assert_eq!(state.current_scene, Scene::EngineSizeFocus);
            let narrative = stage.panel(Container::Narrative).text();
            assert!(narrative.starts_with("How does engine size impact"));
            assert!(!narrative.contains("fuel type impact"));
        });
    }

    #[tokio::test(start_paused = true)]
    async fn reset_leaves_nothing_behind_for_every_scene() {
        for index in 0..5 {
            let mut controller = SlideController::new(records());
            controller.go_to_scene(index);
            settle().await;
            controller.activate_control();
            tokio::time::sleep(Duration::from_millis(4500)).await;

            controller.reset_transient_ui();
            settle().await;

            controller.view(|_, stage| {
                assert!(stage.is_clear(), "scene {index} left residue");
                assert!(stage.annotations().is_empty());
            });
        }
    }

    #[tokio::test(start_paused = true)]
    async fn navigation_wraps_and_clamps() {
        let mut controller = SlideController::new(records());
        controller.go_to_scene(4);
        controller.advance();
        assert_eq!(controller.current_scene(), Scene::Title);

        controller.retreat();
        assert_eq!(controller.current_scene(), Scene::Title);

        controller.go_to_scene(2);
        controller.replay();
        assert_eq!(controller.current_scene(), Scene::EngineSizeFocus);
        controller.retreat();
        assert_eq!(controller.current_scene(), Scene::FuelTypeFocus);
    }

    #[tokio::test(start_paused = true)]
    async fn conclusion_legend_filters_against_the_full_dataset() {
        let mut controller = SlideController::new(records());
        controller.go_to_scene(4);
        settle().await;
        assert!(!controller.legend_click(Fuel::Diesel));

        assert!(controller.activate_control());
        settle().await;
        controller.view(|_, stage| {
            assert!(stage.explore.is_some());
            assert_eq!(stage.nav.next_label, NextLabel::Restart);
            assert_eq!(stage.findings.len(), 3);
        });

        assert!(controller.legend_click(Fuel::Electric));
        assert!(controller.legend_click(Fuel::Diesel));
        tokio::time::sleep(Duration::from_secs(1)).await;

        assert_eq!(
            opacities(&controller),
            vec![LEGEND_FADED_OPACITY, 1.0, LEGEND_FADED_OPACITY]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn leaving_the_conclusion_detaches_explore_mode() {
        let mut controller = SlideController::new(records());
        controller.go_to_scene(4);
        settle().await;
        controller.activate_control();
        settle().await;

        controller.advance();
        assert_eq!(controller.current_scene(), Scene::Title);
        assert!(!controller.legend_click(Fuel::Gasoline));
        controller.view(|_, stage| assert!(stage.explore.is_none()));
    }
}
