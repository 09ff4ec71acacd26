//! Pointer picking and the click-triggered hop-and-spin.
//!
//! The controller owns the single interactive object once the asset loader
//! resolves it, the camera used to cast pick rays, the hover selection read
//! by the outline stage, and at most one animation session. The host drives
//! it with pointer events and one `tick` per animation frame.

use crate::animation::{AnimationConfig, AnimationPhase, AnimationSession, SessionEvent};
use crate::camera::Camera;
use crate::error::{AssetError, PickError};
use crate::pick::{ObjectId, SceneObject};
use crate::selection::SelectionSignal;
use crate::viewport::Viewport;
use smallvec::SmallVec;
use std::f32::consts::TAU;

/// Load state of the interactive object.
#[derive(Clone, Debug)]
pub enum Interactive {
    Pending,
    Ready(SceneObject),
    Unavailable(String),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ClickOutcome {
    /// Object not loaded (or failed to load).
    NotReady,
    Missed,
    Started,
    /// Hit while a session is running; ignored.
    Busy,
}

#[derive(Clone, Debug, Default)]
pub struct TickReport {
    pub events: SmallVec<[SessionEvent; 2]>,
}

pub struct PickController {
    camera: Camera,
    interactive: Interactive,
    selection: SelectionSignal,
    session: Option<AnimationSession>,
    config: AnimationConfig,
    sessions_started: u64,
}

impl PickController {
    pub fn new(camera: Camera, config: AnimationConfig) -> Self {
        Self {
            camera,
            interactive: Interactive::Pending,
            selection: SelectionSignal::new(),
            session: None,
            config,
            sessions_started: 0,
        }
    }

    /// Deliver the asset loader's result. Only the first resolution counts.
    pub fn resolve_load(&mut self, result: Result<SceneObject, AssetError>) {
        if !matches!(self.interactive, Interactive::Pending) {
            log::warn!("[assets] interactive object already resolved; ignoring");
            return;
        }
        self.interactive = match result {
            Ok(obj) => {
                log::info!("[assets] interactive object '{}' ready", obj.name);
                Interactive::Ready(obj)
            }
            Err(e) => {
                log::warn!("[assets] no interactive object available: {}", e);
                Interactive::Unavailable(e.to_string())
            }
        };
    }

    pub fn interactive(&self) -> &Interactive {
        &self.interactive
    }

    pub fn object(&self) -> Option<&SceneObject> {
        match &self.interactive {
            Interactive::Ready(obj) => Some(obj),
            _ => None,
        }
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn camera_mut(&mut self) -> &mut Camera {
        &mut self.camera
    }

    pub fn selection(&self) -> &SelectionSignal {
        &self.selection
    }

    pub fn session(&self) -> Option<&AnimationSession> {
        self.session.as_ref()
    }

    pub fn phase(&self) -> AnimationPhase {
        self.session
            .as_ref()
            .map_or(AnimationPhase::Idle, AnimationSession::phase)
    }

    pub fn sessions_started(&self) -> u64 {
        self.sessions_started
    }

    /// Hover: select the interactive object iff the pointer ray hits it.
    pub fn on_pointer_move(
        &mut self,
        screen_x: f32,
        screen_y: f32,
        viewport_width: f32,
        viewport_height: f32,
    ) -> Result<(), PickError> {
        let viewport = Viewport::new(viewport_width, viewport_height)?;
        let Some((id, hit)) = self.pick(screen_x, screen_y, &viewport) else {
            return Ok(());
        };
        if self.selection.set(hit.then_some(id)) {
            log::debug!("[hover] selection -> {:?}", self.selection.as_slice());
        }
        Ok(())
    }

    /// Click: start a hop-and-spin if the object is hit and none is running.
    pub fn on_click(
        &mut self,
        screen_x: f32,
        screen_y: f32,
        viewport_width: f32,
        viewport_height: f32,
    ) -> Result<ClickOutcome, PickError> {
        let viewport = Viewport::new(viewport_width, viewport_height)?;
        let outcome = match self.pick(screen_x, screen_y, &viewport) {
            None => ClickOutcome::NotReady,
            Some((_, false)) => ClickOutcome::Missed,
            Some(_) if self.session.is_some() => ClickOutcome::Busy,
            Some(_) => {
                self.start_session();
                ClickOutcome::Started
            }
        };
        log::debug!("[click] {:?}", outcome);
        Ok(outcome)
    }

    /// Advance the running session to `now_ms` and write its pose to the
    /// object.
    pub fn tick(&mut self, now_ms: f64) -> TickReport {
        let (Some(session), Interactive::Ready(obj)) = (&mut self.session, &mut self.interactive)
        else {
            return TickReport::default();
        };
        let step = session.advance(now_ms);
        obj.transform.position.y = step.pose.height;
        obj.transform.rotation.z = step.pose.rotation;
        if session.is_finished() {
            obj.transform.rotation.z = session.end_rotation().rem_euclid(TAU);
            self.session = None;
        }
        for ev in &step.events {
            log::info!("[anim] {:?}", ev);
        }
        TickReport { events: step.events }
    }

    /// `None` when there is no object to test; otherwise its id and whether
    /// the pointer ray hits it.
    fn pick(&self, screen_x: f32, screen_y: f32, viewport: &Viewport) -> Option<(ObjectId, bool)> {
        let obj = self.object()?;
        let ray = self
            .camera
            .ray_from_ndc(viewport.to_ndc(screen_x, screen_y));
        Some((obj.id, obj.intersect(&ray).is_some()))
    }

    fn start_session(&mut self) {
        let Some(obj) = self.object() else {
            return;
        };
        let session = AnimationSession::new(
            obj.transform.position.y,
            obj.transform.rotation.z,
            &self.config,
        );
        log::info!(
            "[click] hop from y={:.2} to y={:.2}",
            session.start_height(),
            session.peak_height()
        );
        self.session = Some(session);
        self.sessions_started += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pick::{PickMesh, Transform};
    use glam::Vec3;

    fn ready_controller() -> PickController {
        let camera = Camera {
            eye: Vec3::new(0.0, 0.0, 5.5),
            target: Vec3::ZERO,
            ..Camera::default()
        };
        let mut c = PickController::new(camera, AnimationConfig::default());
        c.resolve_load(Ok(SceneObject::new(
            ObjectId(7),
            "axe",
            Transform::default(),
            PickMesh::cuboid(Vec3::splat(0.5)),
        )));
        c
    }

    #[test]
    fn pending_controller_ignores_pointer_input() {
        let mut c = PickController::new(Camera::default(), AnimationConfig::default());
        c.on_pointer_move(400.0, 300.0, 800.0, 600.0).unwrap();
        assert!(c.selection().is_empty());
        assert_eq!(
            c.on_click(400.0, 300.0, 800.0, 600.0),
            Ok(ClickOutcome::NotReady)
        );
        assert!(c.session().is_none());
    }

    #[test]
    fn failed_load_stays_unavailable() {
        let mut c = PickController::new(Camera::default(), AnimationConfig::default());
        c.resolve_load(Err(AssetError::Empty));
        assert!(matches!(c.interactive(), Interactive::Unavailable(_)));
        // A late success does not override the first resolution.
        c.resolve_load(Ok(SceneObject::new(
            ObjectId(1),
            "late",
            Transform::default(),
            PickMesh::cuboid(Vec3::ONE),
        )));
        assert!(c.object().is_none());
    }

    #[test]
    fn invalid_viewport_is_rejected_even_when_pending() {
        let mut c = PickController::new(Camera::default(), AnimationConfig::default());
        assert!(c.on_pointer_move(1.0, 1.0, 0.0, 600.0).is_err());
        assert!(c.on_click(1.0, 1.0, 800.0, -2.0).is_err());
    }

    #[test]
    fn busy_click_is_ignored() {
        let mut c = ready_controller();
        assert_eq!(
            c.on_click(400.0, 300.0, 800.0, 600.0),
            Ok(ClickOutcome::Started)
        );
        c.tick(0.0);
        c.tick(300.0);
        let height = c.object().unwrap().transform.position.y;
        assert_eq!(
            c.on_click(400.0, 300.0, 800.0, 600.0),
            Ok(ClickOutcome::Busy)
        );
        assert_eq!(c.sessions_started(), 1);
        assert_eq!(c.object().unwrap().transform.position.y, height);
    }

    #[test]
    fn rotation_is_normalized_after_landing() {
        let mut c = ready_controller();
        c.on_click(400.0, 300.0, 800.0, 600.0).unwrap();
        c.tick(0.0);
        c.tick(1400.0);
        assert_eq!(c.phase(), AnimationPhase::Idle);
        assert_eq!(c.object().unwrap().transform.rotation.z, 0.0);
        assert_eq!(c.object().unwrap().transform.position.y, 0.0);
    }

    #[test]
    fn tick_without_session_is_a_no_op() {
        let mut c = ready_controller();
        assert!(c.tick(123.0).events.is_empty());
        assert_eq!(c.object().unwrap().transform, Transform::default());
    }
}
