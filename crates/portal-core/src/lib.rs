pub mod animation;
pub mod assets;
pub mod camera;
pub mod constants;
pub mod controller;
pub mod diorama;
pub mod error;
pub mod fireflies;
pub mod orbit;
pub mod params;
pub mod pick;
pub mod selection;
pub mod tween;
pub mod viewport;

pub static SCENE_WGSL: &str = include_str!("../shaders/scene.wgsl");
pub static FIREFLIES_WGSL: &str = include_str!("../shaders/fireflies.wgsl");

pub use animation::{AnimationConfig, AnimationPhase, AnimationSession, SessionEvent};
pub use camera::Camera;
pub use controller::{ClickOutcome, Interactive, PickController, TickReport};
pub use error::{AssetError, ParamError, PickError};
pub use pick::{ObjectId, PickMesh, Ray, SceneObject, Transform};
pub use selection::SelectionSignal;
pub use tween::{Easing, Pose};
pub use viewport::Viewport;
