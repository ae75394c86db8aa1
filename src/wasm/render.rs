use crate::error::{LogoError, Result};
use crate::scene::{Camera, Light, Scene};
use glam::{Mat3, Vec3};
use js_sys::{Float32Array, Object, Reflect};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{
    HtmlCanvasElement, WebGl2RenderingContext as GL, WebGlBuffer, WebGlProgram, WebGlShader,
    WebGlUniformLocation, WebGlVertexArrayObject,
};

/// Directional lights beyond this are ignored.
const MAX_LIGHTS: usize = 4;

const VERTEX_SHADER: &str = r#"#version 300 es
layout(location = 0) in vec3 a_position;
layout(location = 1) in vec3 a_normal;

uniform mat4 u_model;
uniform mat4 u_view_proj;
uniform mat3 u_normal_matrix;

out vec3 v_normal;
out vec3 v_world;

void main() {
    vec4 world = u_model * vec4(a_position, 1.0);
    v_world = world.xyz;
    v_normal = u_normal_matrix * a_normal;
    gl_Position = u_view_proj * world;
}
"#;

const FRAGMENT_SHADER: &str = r#"#version 300 es
precision highp float;
#define MAX_LIGHTS 4

in vec3 v_normal;
in vec3 v_world;

uniform vec3 u_color;
uniform vec3 u_specular;
uniform float u_shininess;
uniform vec3 u_ambient;
uniform int u_light_count;
uniform vec3 u_light_dir[MAX_LIGHTS];
uniform vec3 u_light_color[MAX_LIGHTS];
uniform vec3 u_eye;

out vec4 frag;

void main() {
    vec3 n = normalize(v_normal);
    vec3 v = normalize(u_eye - v_world);
    vec3 lit = u_ambient * u_color;
    for (int i = 0; i < MAX_LIGHTS; i++) {
        if (i >= u_light_count) break;
        vec3 l = normalize(u_light_dir[i]);
        float diffuse = max(dot(n, l), 0.0);
        vec3 h = normalize(l + v);
        float spec = diffuse > 0.0 ? pow(max(dot(n, h), 0.0), u_shininess) : 0.0;
        lit += u_light_color[i] * (diffuse * u_color + spec * u_specular);
    }
    frag = vec4(lit, 1.0);
}
"#;

struct Uniforms {
    model: Option<WebGlUniformLocation>,
    view_proj: Option<WebGlUniformLocation>,
    normal_matrix: Option<WebGlUniformLocation>,
    color: Option<WebGlUniformLocation>,
    specular: Option<WebGlUniformLocation>,
    shininess: Option<WebGlUniformLocation>,
    ambient: Option<WebGlUniformLocation>,
    light_count: Option<WebGlUniformLocation>,
    light_dir: Option<WebGlUniformLocation>,
    light_color: Option<WebGlUniformLocation>,
    eye: Option<WebGlUniformLocation>,
}

impl Uniforms {
    fn locate(gl: &GL, program: &WebGlProgram) -> Self {
        let at = |name: &str| gl.get_uniform_location(program, name);
        Self {
            model: at("u_model"),
            view_proj: at("u_view_proj"),
            normal_matrix: at("u_normal_matrix"),
            color: at("u_color"),
            specular: at("u_specular"),
            shininess: at("u_shininess"),
            ambient: at("u_ambient"),
            light_count: at("u_light_count"),
            light_dir: at("u_light_dir[0]"),
            light_color: at("u_light_color[0]"),
            eye: at("u_eye"),
        }
    }
}

struct GpuMesh {
    vao: WebGlVertexArrayObject,
    // kept alive for the VAO
    _buffer: WebGlBuffer,
    vertices: i32,
}

/// Draws a [`Scene`] into a canvas with a transparent background.
pub struct Renderer {
    canvas: HtmlCanvasElement,
    gl: GL,
    program: WebGlProgram,
    uniforms: Uniforms,
    meshes: Vec<GpuMesh>,
}

impl Renderer {
    pub fn new(canvas: HtmlCanvasElement) -> Result<Self> {
        let options = Object::new();
        Reflect::set(&options, &"alpha".into(), &JsValue::TRUE)?;
        Reflect::set(&options, &"antialias".into(), &JsValue::TRUE)?;
        let gl: GL = canvas
            .get_context_with_context_options("webgl2", &options)?
            .ok_or(LogoError::ContextUnavailable)?
            .dyn_into()
            .map_err(|_| LogoError::ContextUnavailable)?;

        let vertex = compile_shader(&gl, GL::VERTEX_SHADER, VERTEX_SHADER)?;
        let fragment = compile_shader(&gl, GL::FRAGMENT_SHADER, FRAGMENT_SHADER)?;
        let program = link_program(&gl, &vertex, &fragment)?;
        let uniforms = Uniforms::locate(&gl, &program);

        gl.clear_color(0.0, 0.0, 0.0, 0.0);
        gl.enable(GL::DEPTH_TEST);

        Ok(Self {
            canvas,
            gl,
            program,
            uniforms,
            meshes: Vec::new(),
        })
    }

    pub fn canvas(&self) -> &HtmlCanvasElement {
        &self.canvas
    }

    /// Resizes the drawing buffer and viewport.
    pub fn set_size(&self, width: u32, height: u32) {
        self.canvas.set_width(width);
        self.canvas.set_height(height);
        self.gl.viewport(0, 0, width as i32, height as i32);
    }

    /// Uploads every mesh of `scene` once. Meshes are matched to GPU buffers by
    /// traversal order, so the scene's structure must not change afterwards.
    pub fn upload(&mut self, scene: &Scene) -> Result<()> {
        let gl = &self.gl;
        self.meshes.clear();
        for (_, mesh) in scene.meshes() {
            let vao = gl
                .create_vertex_array()
                .ok_or(LogoError::Resource("vertex array"))?;
            let buffer = gl.create_buffer().ok_or(LogoError::Resource("buffer"))?;
            gl.bind_vertex_array(Some(&vao));
            gl.bind_buffer(GL::ARRAY_BUFFER, Some(&buffer));

            let data = mesh.geometry.interleaved();
            let view = Float32Array::from(data.as_slice());
            gl.buffer_data_with_array_buffer_view(GL::ARRAY_BUFFER, &view, GL::STATIC_DRAW);

            let stride = 6 * 4;
            gl.enable_vertex_attrib_array(0);
            gl.vertex_attrib_pointer_with_i32(0, 3, GL::FLOAT, false, stride, 0);
            gl.enable_vertex_attrib_array(1);
            gl.vertex_attrib_pointer_with_i32(1, 3, GL::FLOAT, false, stride, 3 * 4);

            self.meshes.push(GpuMesh {
                vao,
                _buffer: buffer,
                vertices: mesh.geometry.vertex_count() as i32,
            });
        }
        gl.bind_vertex_array(None);
        log::debug!("uploaded {} meshes", self.meshes.len());
        Ok(())
    }

    pub fn render(&self, scene: &Scene, camera: &Camera) {
        let gl = &self.gl;
        let u = &self.uniforms;
        gl.clear(GL::COLOR_BUFFER_BIT | GL::DEPTH_BUFFER_BIT);
        gl.use_program(Some(&self.program));

        gl.uniform_matrix4fv_with_f32_array(
            u.view_proj.as_ref(),
            false,
            &camera.view_projection().to_cols_array(),
        );
        gl.uniform3fv_with_f32_array(u.eye.as_ref(), &camera.position.to_array());
        self.apply_lights(&scene.lights);

        for ((model, mesh), gpu) in scene.meshes().zip(&self.meshes) {
            let normal_matrix = Mat3::from_mat4(model).inverse().transpose();
            gl.uniform_matrix4fv_with_f32_array(u.model.as_ref(), false, &model.to_cols_array());
            gl.uniform_matrix3fv_with_f32_array(
                u.normal_matrix.as_ref(),
                false,
                &normal_matrix.to_cols_array(),
            );
            gl.uniform3fv_with_f32_array(u.color.as_ref(), &mesh.material.color.to_array());
            gl.uniform3fv_with_f32_array(u.specular.as_ref(), &mesh.material.specular.to_array());
            gl.uniform1f(u.shininess.as_ref(), mesh.material.shininess);

            gl.bind_vertex_array(Some(&gpu.vao));
            gl.draw_arrays(GL::TRIANGLES, 0, gpu.vertices);
        }
        gl.bind_vertex_array(None);
    }

    fn apply_lights(&self, lights: &[Light]) {
        let mut ambient = Vec3::ZERO;
        let mut directions = [0.0f32; MAX_LIGHTS * 3];
        let mut colors = [0.0f32; MAX_LIGHTS * 3];
        let mut count = 0;
        for light in lights {
            match *light {
                Light::Ambient { color, intensity } => ambient += color * intensity,
                Light::Directional { color, intensity, direction } => {
                    if count == MAX_LIGHTS {
                        continue;
                    }
                    directions[count * 3..count * 3 + 3].copy_from_slice(&direction.to_array());
                    colors[count * 3..count * 3 + 3].copy_from_slice(&(color * intensity).to_array());
                    count += 1;
                }
            }
        }

        let u = &self.uniforms;
        self.gl.uniform3fv_with_f32_array(u.ambient.as_ref(), &ambient.to_array());
        self.gl.uniform1i(u.light_count.as_ref(), count as i32);
        self.gl.uniform3fv_with_f32_array(u.light_dir.as_ref(), &directions);
        self.gl.uniform3fv_with_f32_array(u.light_color.as_ref(), &colors);
    }
}

fn compile_shader(gl: &GL, kind: u32, source: &str) -> Result<WebGlShader> {
    let shader = gl.create_shader(kind).ok_or(LogoError::Resource("shader"))?;
    gl.shader_source(&shader, source);
    gl.compile_shader(&shader);

    if gl
        .get_shader_parameter(&shader, GL::COMPILE_STATUS)
        .as_bool()
        .unwrap_or(false)
    {
        Ok(shader)
    } else {
        Err(LogoError::ShaderCompile(
            gl.get_shader_info_log(&shader).unwrap_or_default(),
        ))
    }
}

fn link_program(gl: &GL, vertex: &WebGlShader, fragment: &WebGlShader) -> Result<WebGlProgram> {
    let program = gl.create_program().ok_or(LogoError::Resource("program"))?;
    gl.attach_shader(&program, vertex);
    gl.attach_shader(&program, fragment);
    gl.link_program(&program);

    if gl
        .get_program_parameter(&program, GL::LINK_STATUS)
        .as_bool()
        .unwrap_or(false)
    {
        Ok(program)
    } else {
        Err(LogoError::ProgramLink(
            gl.get_program_info_log(&program).unwrap_or_default(),
        ))
    }
}
