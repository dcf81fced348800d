//! The spinning object and everything the GPU needs to draw it.

use std::{sync::Arc, time::Duration};

use glam::{Mat4, Vec3, Vec4};
use glow::HasContext;

use crate::{
    abs::{Locations, Mesh, ShaderProgram, Texture, Vertex, load_image_or_placeholder},
    config::{Config, Variant},
    error::{SceneError, ShaderStage},
    frame_loop::Renderer,
    geometry,
    transform,
};

const QUAD_COLOR: Vec4 = Vec4::new(1.0, 0.5, 0.2, 1.0);
const LIGHT_DIRECTION: Vec3 = Vec3::new(-0.4, -0.6, -1.0);
const AMBIENT: f32 = 0.25;

/// Owns the program, mesh and optional texture for one variant.
///
/// A `Scene` only exists once every resource was created, so holding one means drawing is safe.
pub struct Scene {
    gl: Arc<glow::Context>,
    variant: Variant,
    program: ShaderProgram,
    locations: Locations,
    mesh: Mesh,
    texture: Option<Texture>,
    projection: Mat4,
    background: [f32; 4],
    rotation_speed: f32,
    camera_distance: f32,
    fov: f32,
}

fn uniform_names(variant: Variant) -> &'static [&'static str] {
    match variant {
        Variant::Quad => &["u_model", "u_projection", "u_color"],
        Variant::ColoredCube => &["u_model", "u_projection"],
        Variant::TexturedCube => &[
            "u_model",
            "u_projection",
            "u_texture",
            "u_light_dir",
            "u_ambient",
        ],
    }
}

impl Scene {
    /// Builds the shader program, uploads the geometry and, for the textured cube, the texture.
    ///
    /// Any failure drops what was already created and no scene is returned.
    pub fn new(gl: &Arc<glow::Context>, config: &Config) -> Result<Self, SceneError> {
        let variant = config.variant;
        let program = ShaderProgram::from_files(
            gl,
            &config.shader_path(ShaderStage::Vertex.file_name()),
            &config.shader_path(ShaderStage::Fragment.file_name()),
        )?;

        let attributes = match variant {
            Variant::Quad => geometry::PositionVertex::attribute_names(),
            Variant::ColoredCube => geometry::ColorVertex::attribute_names(),
            Variant::TexturedCube => geometry::TexturedVertex::attribute_names(),
        };
        let locations = program.resolve_locations(uniform_names(variant), &attributes);

        let mesh = match variant {
            Variant::Quad => Mesh::new(
                gl,
                &locations,
                &geometry::QUAD_VERTICES,
                Some(&geometry::QUAD_INDICES),
                glow::TRIANGLES,
            ),
            Variant::ColoredCube => Mesh::new(
                gl,
                &locations,
                &geometry::colored_cube(),
                None,
                glow::TRIANGLES,
            ),
            Variant::TexturedCube => Mesh::new(
                gl,
                &locations,
                &geometry::textured_cube(),
                Some(&geometry::strip_indices(6)),
                glow::TRIANGLE_STRIP,
            ),
        }
        .map_err(SceneError::Buffer)?;

        let texture = match variant {
            Variant::TexturedCube => {
                let image = load_image_or_placeholder(&config.texture_path());
                Some(Texture::new(gl, &image).map_err(SceneError::Texture)?)
            }
            _ => None,
        };

        unsafe {
            gl.enable(glow::DEPTH_TEST);
        }

        log::info!("scene ready: {variant:?}");
        Ok(Self {
            gl: Arc::clone(gl),
            variant,
            program,
            locations,
            mesh,
            texture,
            projection: transform::projection_matrix(
                config.fov,
                config.window.width,
                config.window.height,
            ),
            background: config.background,
            rotation_speed: config.rotation_speed,
            camera_distance: config.camera_distance,
            fov: config.fov,
        })
    }
}

impl Renderer for Scene {
    fn render(&mut self, elapsed: Duration) {
        let angle = transform::rotation_angle(elapsed, self.rotation_speed);
        let model = transform::model_matrix(angle, self.camera_distance);

        let [r, g, b, a] = self.background;
        unsafe {
            self.gl.clear_color(r, g, b, a);
            self.gl
                .clear(glow::COLOR_BUFFER_BIT | glow::DEPTH_BUFFER_BIT);
        }

        self.program.use_program();
        self.program
            .set_uniform(self.locations.uniform("u_model"), model);
        self.program
            .set_uniform(self.locations.uniform("u_projection"), self.projection);

        match self.variant {
            Variant::Quad => {
                self.program
                    .set_uniform(self.locations.uniform("u_color"), QUAD_COLOR);
            }
            Variant::ColoredCube => {}
            Variant::TexturedCube => {
                if let Some(texture) = &self.texture {
                    texture.bind(0);
                }
                self.program.set_uniform(self.locations.uniform("u_texture"), 0);
                self.program.set_uniform(
                    self.locations.uniform("u_light_dir"),
                    LIGHT_DIRECTION.normalize(),
                );
                self.program
                    .set_uniform(self.locations.uniform("u_ambient"), AMBIENT);
            }
        }

        self.mesh.draw();
    }

    fn resize(&mut self, width: u32, height: u32) {
        self.projection = transform::projection_matrix(self.fov, width, height);
        log::debug!("projection updated for {width}x{height}");
    }

    fn release(self) {
        let Self {
            gl,
            program,
            mesh,
            texture,
            ..
        } = self;
        unsafe {
            gl.bind_vertex_array(None);
            gl.bind_buffer(glow::ARRAY_BUFFER, None);
            gl.bind_texture(glow::TEXTURE_2D, None);
            gl.use_program(None);
        }
        drop(texture);
        drop(mesh);
        drop(program);
        log::info!("scene resources released");
    }
}
