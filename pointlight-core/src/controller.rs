//! Input controller
//!
//! Turns [`InputEvent`]s into scene updates. Cursor motion feeds the
//! trackball. The resulting rotation, and separately the scroll wheel, go to
//! whatever target the current [`Mode`] selects.

use crate::{
    input::{ButtonState, InputEvent, Key, MouseButton},
    scene::Scene,
    trackball::{Rotation, Trackball},
    traits::Transformable,
};
use log::{debug, info, trace};

/// Selector for the target that receives rotations and scrolls.
///
/// Set directly from the number keys. Values without a [`Target`] are
/// valid and simply ignore rotation and scroll input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Mode(pub u8);

/// What a [`Mode`] routes input to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    /// The active object
    Object,
    /// The point light marker
    PointLight,
    /// The active object and the point light marker together
    ObjectAndPointLight,
    /// Direction of the directional light
    DirectionalLight,
    /// Direction of the spot light
    SpotLight,
}

impl Mode {
    pub fn target(self) -> Option<Target> {
        match self.0 {
            0 | 1 => Some(Target::Object),
            2 => Some(Target::PointLight),
            3 => Some(Target::ObjectAndPointLight),
            7 => Some(Target::DirectionalLight),
            8 => Some(Target::SpotLight),
            _ => None,
        }
    }
}

/// Multiplicative zoom for a wheel offset: `1 + d` when scrolling up,
/// `1 / (1 - d)` when scrolling down, so opposite offsets cancel.
pub fn zoom_factor(delta: f64) -> f32 {
    let factor = if delta > 0.0 { 1.0 + delta } else { 1.0 / (1.0 - delta) };
    factor as f32
}

/// Outcome of handling one event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Response {
    Continue,
    Quit,
}

/// Routes input events to the scene
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Controller {
    trackball: Trackball,
    mode: Mode,
}

impl Controller {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            trackball: Trackball::new(width, height),
            mode: Mode::default(),
        }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn set_mode(&mut self, mode: Mode) {
        if mode != self.mode {
            info!("Mode {} -> {}", self.mode.0, mode.0);
        }
        self.mode = mode;
    }

    pub fn trackball(&self) -> &Trackball {
        &self.trackball
    }

    /// Handle one input event against `scene`
    pub fn handle(&mut self, event: &InputEvent, scene: &mut Scene) -> Response {
        match *event {
            InputEvent::KeyPressed { key, shift } => return self.handle_key(key, shift, scene),
            InputEvent::MouseButton { button: MouseButton::Left, state } => match state {
                ButtonState::Pressed => self.trackball.press(),
                ButtonState::Released => self.trackball.release(),
            },
            InputEvent::MouseButton { .. } => {}
            InputEvent::CursorMoved { x, y } => {
                if let Some(rotation) = self.trackball.motion(x, y) {
                    self.apply_rotation(&rotation, scene);
                }
            }
            InputEvent::Scroll { delta } => self.apply_scroll(delta, scene),
            InputEvent::Resized { width, height } => self.trackball.resize(width, height),
        }
        Response::Continue
    }

    fn handle_key(&mut self, key: Key, shift: bool, scene: &mut Scene) -> Response {
        match key {
            Key::Escape => return Response::Quit,
            Key::F1 => self.select(scene, 0),
            Key::F2 => self.select(scene, 1),
            Key::F3 => self.select(scene, 2),
            Key::P => {
                let object = scene.active_mut();
                if shift {
                    object.grow_points();
                } else {
                    object.shrink_points();
                }
                debug!("{} point size {:.1}", object.name, object.point_size());
            }
            Key::N => {
                let enabled = scene.toggle_color_mode();
                info!("Normal colouring {}", on_off(enabled));
            }
            Key::Digit(4) => {
                let enabled = scene.toggle_point_light();
                info!("Point light {}", on_off(enabled));
            }
            Key::Digit(5) => {
                let enabled = scene.toggle_directional_light();
                info!("Directional light {}", on_off(enabled));
            }
            Key::Digit(6) => {
                let enabled = scene.toggle_spot_light();
                info!("Spot light {}", on_off(enabled));
            }
            Key::Digit(digit @ (1 | 2 | 3 | 7 | 8)) => self.set_mode(Mode(digit)),
            Key::Digit(_) | Key::Other => {}
        }
        Response::Continue
    }

    fn select(&self, scene: &mut Scene, index: usize) {
        if scene.select(index) {
            info!("Showing {}", scene.active().name);
        }
    }

    /// Apply one trackball increment to the target of the current mode
    pub fn apply_rotation(&self, rotation: &Rotation, scene: &mut Scene) {
        let Some(target) = self.mode.target() else {
            return;
        };
        trace!("Rotate {:?} by {:.4} rad", target, rotation.angle);

        let delta = rotation.to_quaternion();
        match target {
            Target::Object => scene.active_mut().rotate(delta),
            Target::PointLight => scene.rotate_point_light(delta),
            Target::ObjectAndPointLight => {
                scene.active_mut().rotate(delta);
                scene.rotate_point_light(delta);
            }
            Target::DirectionalLight => scene.lights.directional.rotate(delta),
            Target::SpotLight => scene.lights.spot.rotate(delta),
        }
    }

    /// Apply a wheel offset to the target of the current mode
    pub fn apply_scroll(&self, delta: f64, scene: &mut Scene) {
        let factor = zoom_factor(delta);
        match self.mode.target() {
            Some(Target::Object) => scene.active_mut().scale(factor),
            Some(Target::PointLight) => scene.scale_point_light_distance(factor),
            Some(Target::ObjectAndPointLight) => {
                scene.active_mut().scale(factor);
                scene.scale_point_light_distance(factor);
            }
            Some(Target::DirectionalLight) | Some(Target::SpotLight) | None => return,
        }
        trace!("Scroll {:?} by factor {:.3}", self.mode.target(), factor);
    }
}

fn on_off(enabled: bool) -> &'static str {
    if enabled {
        "on"
    } else {
        "off"
    }
}
