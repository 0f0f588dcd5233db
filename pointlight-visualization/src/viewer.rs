//! Interactive lighting viewer
//!
//! Owns the [`Scene`] and the [`Controller`], opens a window and runs the
//! winit event loop: window events are mapped to [`InputEvent`]s and handed
//! to the controller, then the active object and both light markers are
//! drawn.
//!
//! [`InputEvent`]: pointlight_core::InputEvent

use crate::{camera::Camera, config::ViewerConfig, frame::FrameUniforms, input::InputMapper};
use log::{error, info, trace};
use pointlight_core::{Controller, Error, Response, Result, Scene};
use pointlight_gpu::{CloudHandle, DrawCall, PointCloudRenderer, RenderConfig};
use std::sync::Arc;
use winit::{
    dpi::PhysicalSize,
    event::{Event, WindowEvent},
    event_loop::{ControlFlow, EventLoop},
    window::WindowBuilder,
};

/// Interactive point cloud lighting viewer
pub struct Viewer {
    config: ViewerConfig,
    scene: Scene,
    controller: Controller,
    camera: Camera,
}

/// Renderer handles of every cloud the scene can draw
struct SceneHandles {
    objects: Vec<CloudHandle>,
    point_marker: CloudHandle,
    spot_marker: CloudHandle,
}

impl SceneHandles {
    fn upload(renderer: &mut PointCloudRenderer, scene: &Scene) -> Self {
        let objects = scene
            .objects()
            .iter()
            .map(|object| renderer.upload(&object.name, &object.cloud))
            .collect();
        let point = &scene.point_marker.object;
        let point_marker = renderer.upload(&point.name, &point.cloud);
        let spot = &scene.spot_marker.object;
        let spot_marker = renderer.upload(&spot.name, &spot.cloud);
        Self {
            objects,
            point_marker,
            spot_marker,
        }
    }

    fn draws(&self, scene: &Scene, frame: &FrameUniforms) -> [DrawCall; 3] {
        [
            DrawCall {
                cloud: self.objects[scene.active_index()],
                uniforms: frame.object,
            },
            DrawCall {
                cloud: self.point_marker,
                uniforms: frame.point_marker,
            },
            DrawCall {
                cloud: self.spot_marker,
                uniforms: frame.spot_marker,
            },
        ]
    }
}

impl Viewer {
    /// Load the scene from `config.assets_dir` and create a viewer for it
    pub fn new(config: ViewerConfig) -> Result<Self> {
        let scene = pointlight_io::load_scene(&config.assets_dir)?;
        Ok(Self::with_scene(config, scene))
    }

    /// Create a viewer for an already assembled scene
    pub fn with_scene(config: ViewerConfig, scene: Scene) -> Self {
        let controller = Controller::new(config.width, config.height);
        let mut camera = Camera::default();
        camera.set_viewport(config.width, config.height);
        Self {
            config,
            scene,
            controller,
            camera,
        }
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn controller(&self) -> &Controller {
        &self.controller
    }

    /// Open the window and run until it is closed or Escape is pressed
    pub fn run(mut self) -> Result<()> {
        let event_loop = EventLoop::new()
            .map_err(|e| Error::Visualization(format!("Failed to create event loop: {}", e)))?;
        let window = Arc::new(
            WindowBuilder::new()
                .with_title(self.config.title.as_str())
                .with_inner_size(PhysicalSize::new(self.config.width, self.config.height))
                .build(&event_loop)
                .map_err(|e| Error::Visualization(format!("Failed to create window: {}", e)))?,
        );

        let mut renderer =
            pollster::block_on(PointCloudRenderer::new(window.clone(), RenderConfig::default()))?;
        let handles = SceneHandles::upload(&mut renderer, &self.scene);

        // The window manager may not honour the requested size
        let size = window.inner_size();
        self.resize(size);

        let mut mapper = InputMapper::new();
        info!("Showing {}", self.scene.active().name);

        event_loop
            .run(move |event, target| {
                target.set_control_flow(ControlFlow::Poll);

                match event {
                    Event::WindowEvent { event, .. } => match event {
                        WindowEvent::CloseRequested => target.exit(),
                        WindowEvent::RedrawRequested => {
                            let size = window.inner_size();
                            let viewport = (size.width, size.height);
                            let frame = FrameUniforms::build(&self.scene, &self.camera, viewport);
                            if let Err(e) = renderer.render(&handles.draws(&self.scene, &frame)) {
                                error!("Render error: {}", e);
                                target.exit();
                            }
                        }
                        event => {
                            if let WindowEvent::Resized(size) = event {
                                renderer.resize(size);
                                self.camera.set_viewport(size.width, size.height);
                            }
                            if let Some(input) = mapper.map(&event) {
                                trace!("{:?}", input);
                                let response = self.controller.handle(&input, &mut self.scene);
                                if response == Response::Quit {
                                    target.exit();
                                }
                            }
                        }
                    },
                    Event::AboutToWait => window.request_redraw(),
                    _ => {}
                }
            })
            .map_err(|e| Error::Visualization(format!("Event loop error: {}", e)))?;

        info!("Viewer closed");
        Ok(())
    }

    fn resize(&mut self, size: PhysicalSize<u32>) {
        self.camera.set_viewport(size.width, size.height);
        self.controller.handle(
            &pointlight_core::InputEvent::Resized {
                width: size.width,
                height: size.height,
            },
            &mut self.scene,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_viewer_follows_config_size() {
        let config = ViewerConfig {
            width: 800,
            height: 400,
            assets_dir: "no/such/asset/dir".into(),
            ..ViewerConfig::default()
        };
        let mut viewer = Viewer::new(config).unwrap();

        assert_eq!(viewer.controller().trackball().viewport(), (800.0, 400.0));
        assert_relative_eq!(viewer.camera.aspect_ratio, 2.0);

        viewer.resize(PhysicalSize::new(300, 300));
        assert_eq!(viewer.controller().trackball().viewport(), (300.0, 300.0));
        assert_relative_eq!(viewer.camera.aspect_ratio, 1.0);
        assert_eq!(viewer.scene().active().name, "bunny");
    }
}
