use std::time::Duration;

use crate::stage::Container;
use crate::story::controller::{SceneContext, Superseded};

pub const CHARACTER_DELAY: Duration = Duration::from_millis(10);

/// Types `text` into `container` one character at a time, then appends the
/// paragraph separator.
///
/// The narration stops without touching the stage as soon as either the scene
/// routine that started it is no longer current, or a newer narration has
/// claimed the same container.
pub async fn narrate(
    ctx: &SceneContext,
    container: Container,
    text: &str,
) -> Result<(), Superseded> {
    let ticket = ctx.stage(|stage| stage.panel_mut(container).begin())?;

    for ch in text.chars() {
        let typed = ctx.stage(|stage| stage.panel_mut(container).type_char(ticket, ch))?;
        if !typed {
            return Err(Superseded);
        }
        tokio::time::sleep(CHARACTER_DELAY).await;
    }

    if ctx.stage(|stage| stage.panel_mut(container).finish(ticket))? {
        Ok(())
    } else {
        Err(Superseded)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Fuel, VehicleRecord};
    use crate::stage::SEPARATOR;
    use crate::story::controller::Presentation;
    use std::sync::{Arc, Mutex};

    fn context() -> (Arc<Mutex<Presentation>>, SceneContext) {
        let records: Arc<[VehicleRecord]> = Arc::from(vec![VehicleRecord {
            city_mpg: 25.0,
            highway_mpg: 31.0,
            cylinders: 4,
            fuel: Fuel::Gasoline,
        }]);
        let shared = Arc::new(Mutex::new(Presentation::new(records)));
        let ctx = SceneContext::current(&shared);
        (shared, ctx)
    }

    fn panel_text(shared: &Mutex<Presentation>, container: Container) -> String {
        let presentation = shared.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
        presentation.stage.panel(container).text()
    }

    #[tokio::test(start_paused = true)]
    async fn uninterrupted_narration_types_every_character_in_order() {
        let (shared, ctx) = context();
        let text = "Electric cars lead.";

        let task = tokio::spawn({
            let ctx = ctx.clone();
            async move { narrate(&ctx, Container::Narrative, text).await }
        });

        let mut snapshots = Vec::new();
        while !task.is_finished() {
            snapshots.push(panel_text(&shared, Container::Narrative));
            tokio::time::sleep(CHARACTER_DELAY).await;
        }
        assert!(matches!(task.await, Ok(Ok(()))));

        for snapshot in &snapshots {
            assert!(text.starts_with(snapshot.as_str()), "out of order: {snapshot:?}");
        }
        assert_eq!(
            panel_text(&shared, Container::Narrative),
            format!("{text}{SEPARATOR}")
        );
    }

    #[tokio::test(start_paused = true)]
    async fn newer_narration_on_the_same_container_wins() {
        let (shared, ctx) = context();

        let first = tokio::spawn({
            let ctx = ctx.clone();
            async move { narrate(&ctx, Container::Conclusion, "AAAAAAAAAAAAAAAAAAAA").await }
        });
        tokio::time::sleep(CHARACTER_DELAY * 5).await;

        let second = narrate(&ctx, Container::Conclusion, "BBBB").await;
        assert!(second.is_ok());
        assert!(matches!(first.await, Ok(Err(Superseded))));

        tokio::time::sleep(Duration::from_secs(1)).await;
        assert_eq!(
            panel_text(&shared, Container::Conclusion),
            format!("BBBB{SEPARATOR}")
        );
    }

    #[tokio::test(start_paused = true)]
    async fn stale_generation_stops_narration() {
        let (shared, ctx) = context();

        let task = tokio::spawn({
            let ctx = ctx.clone();
            async move { narrate(&ctx, Container::Narrative, "Never finished").await }
        });
        tokio::time::sleep(CHARACTER_DELAY * 3).await;

        {
            let mut presentation = shared.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
            presentation.invalidate();
            presentation.stage.panel_mut(Container::Narrative).clear();
        }

        assert!(matches!(task.await, Ok(Err(Superseded))));
        assert_eq!(panel_text(&shared, Container::Narrative), "");
    }
}
