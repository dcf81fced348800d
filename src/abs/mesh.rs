//! Mesh management module.
//!
//! This module defines the [`Mesh`] struct for managing static mesh data on the GPU side.
//! Vertices should implement the [`Vertex`] trait.

use std::sync::Arc;

use glow::HasContext;

use super::Locations;

/// One float attribute inside a vertex.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Attribute {
    /// Name of the shader input fed by this attribute.
    pub name: &'static str,
    /// Number of `f32` components.
    pub components: i32,
    /// Byte offset from the start of the vertex.
    pub offset: i32,
}

/// Trait that defines the memory layout of a vertex.
///
/// Implementors must be `#[repr(C)]` and made only of `f32`s.
pub trait Vertex: Copy {
    const ATTRIBUTES: &'static [Attribute];

    /// Byte distance between consecutive vertices.
    fn stride() -> i32 {
        std::mem::size_of::<Self>() as i32
    }

    /// Names of the attributes, for location lookup.
    fn attribute_names() -> Vec<&'static str> {
        Self::ATTRIBUTES.iter().map(|a| a.name).collect()
    }

    /// Sets up the vertex attribute pointers for the bound vertex array.
    ///
    /// Attributes the program does not expose are skipped.
    fn vertex_attribs(gl: &glow::Context, locations: &Locations) {
        for attribute in Self::ATTRIBUTES {
            let Some(index) = locations.attribute(attribute.name) else {
                log::debug!(
                    "attribute {} not found (location {}), skipping",
                    attribute.name,
                    locations.attribute_index(attribute.name)
                );
                continue;
            };
            unsafe {
                gl.enable_vertex_attrib_array(index);
                gl.vertex_attrib_pointer_f32(
                    index,
                    attribute.components,
                    glow::FLOAT,
                    false,
                    Self::stride(),
                    attribute.offset,
                );
            }
        }
    }
}

fn as_bytes<T: Copy>(data: &[T]) -> &[u8] {
    // SAFETY: `T` is plain old data (floats or u32s) and the slice covers exactly the input.
    unsafe { std::slice::from_raw_parts(data.as_ptr() as *const u8, std::mem::size_of_val(data)) }
}

/// Represents a mesh stored on the GPU side.
///
/// Meshes without indices are drawn with `glDrawArrays`, the others with `glDrawElements`.
pub struct Mesh {
    gl: Arc<glow::Context>,
    draw_mode: u32,
    vao: glow::VertexArray,
    vbo: glow::Buffer,
    ebo: Option<glow::Buffer>,
    count: usize,
}

impl Mesh {
    /// Uploads the given vertex and index data once with a static usage hint.
    pub fn new<V: Vertex>(
        gl: &Arc<glow::Context>,
        locations: &Locations,
        vertices: &[V],
        indices: Option<&[u32]>,
        draw_mode: u32,
    ) -> Result<Self, String> {
        unsafe {
            let vao = gl.create_vertex_array()?;
            let vbo = match gl.create_buffer() {
                Ok(vbo) => vbo,
                Err(e) => {
                    gl.delete_vertex_array(vao);
                    return Err(e);
                }
            };

            gl.bind_vertex_array(Some(vao));
            gl.bind_buffer(glow::ARRAY_BUFFER, Some(vbo));
            gl.buffer_data_u8_slice(glow::ARRAY_BUFFER, as_bytes(vertices), glow::STATIC_DRAW);

            let ebo = match indices {
                Some(indices) => {
                    let ebo = match gl.create_buffer() {
                        Ok(ebo) => ebo,
                        Err(e) => {
                            gl.bind_vertex_array(None);
                            gl.bind_buffer(glow::ARRAY_BUFFER, None);
                            gl.delete_buffer(vbo);
                            gl.delete_vertex_array(vao);
                            return Err(e);
                        }
                    };
                    gl.bind_buffer(glow::ELEMENT_ARRAY_BUFFER, Some(ebo));
                    gl.buffer_data_u8_slice(
                        glow::ELEMENT_ARRAY_BUFFER,
                        as_bytes(indices),
                        glow::STATIC_DRAW,
                    );
                    Some(ebo)
                }
                None => None,
            };

            V::vertex_attribs(gl, locations);

            gl.bind_vertex_array(None);
            gl.bind_buffer(glow::ARRAY_BUFFER, None);
            gl.bind_buffer(glow::ELEMENT_ARRAY_BUFFER, None);

            let count = indices.map_or(vertices.len(), <[u32]>::len);
            log::debug!(
                "uploaded mesh: {} vertices, {} indices",
                vertices.len(),
                indices.map_or(0, <[u32]>::len)
            );

            Ok(Self {
                gl: Arc::clone(gl),
                draw_mode,
                vao,
                vbo,
                ebo,
                count,
            })
        }
    }

    /// Draws the mesh.
    pub fn draw(&self) {
        unsafe {
            self.gl.bind_vertex_array(Some(self.vao));
            if self.ebo.is_some() {
                self.gl
                    .draw_elements(self.draw_mode, self.count as i32, glow::UNSIGNED_INT, 0);
            } else {
                self.gl.draw_arrays(self.draw_mode, 0, self.count as i32);
            }
            self.gl.bind_vertex_array(None);
        }
    }
}

impl Drop for Mesh {
    fn drop(&mut self) {
        unsafe {
            self.gl.bind_vertex_array(None);
            self.gl.bind_buffer(glow::ARRAY_BUFFER, None);
            self.gl.delete_buffer(self.vbo);
            if let Some(ebo) = self.ebo {
                self.gl.delete_buffer(ebo);
            }
            self.gl.delete_vertex_array(self.vao);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_as_bytes_length() {
        let indices = [0u32, 1, 2, 2, 3, 0];
        assert_eq!(as_bytes(&indices).len(), 24);
        assert_eq!(&as_bytes(&indices)[4..8], &1u32.to_ne_bytes());
    }
}
