use glam::{Mat4, Vec3};
use portal_core::camera::Camera;
use portal_core::constants::{OUTLINE_COLOR, OUTLINE_THICKNESS, POLE_LIGHT_COLOR};
use portal_core::diorama::{self, MaterialKind};
use portal_core::params::{Rgb, SceneParams};
use portal_core::{SceneObject, SelectionSignal};
use web_sys as web;

mod fireflies;
mod helpers;
mod meshes;
mod targets;

use fireflies::{create_fireflies_resources, FirefliesResources};
use helpers::MeshPipelineDesc;
use meshes::{DrawItem, KIND_BAKED, KIND_EMISSIVE, KIND_PORTAL};
use targets::DepthTarget;

// Direction the light travels, world space.
const LIGHT_DIR: Vec3 = Vec3::new(-0.4, -1.0, -0.3);

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub(crate) struct GlobalUniforms {
    view_proj: [[f32; 4]; 4],
    light_dir: [f32; 4],
    portal_start: [f32; 4],
    portal_end: [f32; 4],
    resolution: [f32; 2],
    time: f32,
    pixel_ratio: f32,
    fireflies_size: f32,
    _pad: [f32; 3],
}

/// Everything the renderer reads for one frame.
pub struct FrameScene<'a> {
    pub camera: &'a Camera,
    pub object: Option<&'a SceneObject>,
    pub selection: &'a SelectionSignal,
    pub params: &'a SceneParams,
    pub time_sec: f32,
}

struct ObjectDraw {
    body: DrawItem,
    outline: DrawItem,
}

pub struct GpuState {
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    depth: DepthTarget,

    globals_buffer: wgpu::Buffer,
    globals_bind_group: wgpu::BindGroup,
    draw_bgl: wgpu::BindGroupLayout,

    mesh_pipeline: wgpu::RenderPipeline,
    outline_pipeline: wgpu::RenderPipeline,
    statics: Vec<DrawItem>,
    // Built on the first frame that has a loaded object.
    object: Option<ObjectDraw>,
    fireflies: FirefliesResources,

    width: u32,
    height: u32,
}

impl GpuState {
    pub async fn new(
        canvas: &web::HtmlCanvasElement,
        flies: &[portal_core::fireflies::Firefly],
    ) -> anyhow::Result<Self> {
        let width = canvas.width();
        let height = canvas.height();

        let instance = wgpu::Instance::default();
        let surface = instance.create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))?;
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or_else(|| anyhow::anyhow!("No WebGPU adapter"))?;
        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    required_features: wgpu::Features::empty(),
                    required_limits: wgpu::Limits::default(),
                    memory_hints: wgpu::MemoryHints::Performance,
                    label: None,
                },
                None,
            )
            .await
            .map_err(|e| anyhow::anyhow!(format!("request_device error: {:?}", e)))?;
        let caps = surface.get_capabilities(&adapter);
        // sRGB target: shaders output linear colour and the surface encodes it.
        let format = caps
            .formats
            .iter()
            .copied()
            .find(|f| {
                matches!(
                    f,
                    wgpu::TextureFormat::Bgra8UnormSrgb | wgpu::TextureFormat::Rgba8UnormSrgb
                )
            })
            .or_else(|| caps.formats.first().copied())
            .ok_or_else(|| anyhow::anyhow!("surface reports no formats"))?;
        let alpha_mode = caps
            .alpha_modes
            .first()
            .copied()
            .unwrap_or(wgpu::CompositeAlphaMode::Auto);
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width: width.max(1),
            height: height.max(1),
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);
        log::info!("[gpu] surface {}x{} format={:?}", width, height, format);

        let depth = DepthTarget::new(&device, width, height);

        let globals_bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("globals_bgl"),
            entries: &[helpers::uniform_layout_entry(
                0,
                wgpu::ShaderStages::VERTEX_FRAGMENT,
            )],
        });
        let draw_bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("draw_bgl"),
            entries: &[helpers::uniform_layout_entry(
                0,
                wgpu::ShaderStages::VERTEX_FRAGMENT,
            )],
        });
        let globals_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("globals"),
            size: std::mem::size_of::<GlobalUniforms>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let globals_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("globals_bg"),
            layout: &globals_bgl,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: globals_buffer.as_entire_binding(),
            }],
        });

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("scene_shader"),
            source: wgpu::ShaderSource::Wgsl(portal_core::SCENE_WGSL.into()),
        });
        let layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("scene_pl"),
            bind_group_layouts: &[&globals_bgl, &draw_bgl],
            push_constant_ranges: &[],
        });
        // Two-sided: the procedural portal disc and frame are seen from both sides.
        let mesh_pipeline = helpers::make_mesh_pipeline(
            &device,
            &layout,
            &shader,
            format,
            MeshPipelineDesc {
                label: "mesh_pipeline",
                frag_entry: "fs_main",
                cull_mode: None,
                depth_write: true,
            },
        );
        // Inverted hull: only the back faces of the inflated mesh survive.
        let outline_pipeline = helpers::make_mesh_pipeline(
            &device,
            &layout,
            &shader,
            format,
            MeshPipelineDesc {
                label: "outline_pipeline",
                frag_entry: "fs_outline",
                cull_mode: Some(wgpu::Face::Front),
                depth_write: true,
            },
        );

        let statics = build_statics(&device, &draw_bgl);
        for item in &statics {
            item.write(&queue, Mat4::IDENTITY, 0.0);
        }
        log::info!("[gpu] static parts={}", statics.len());

        let fireflies = create_fireflies_resources(&device, &globals_bgl, format, flies);

        Ok(Self {
            surface,
            device,
            queue,
            config,
            depth,
            globals_buffer,
            globals_bind_group,
            draw_bgl,
            mesh_pipeline,
            outline_pipeline,
            statics,
            object: None,
            fireflies,
            width,
            height,
        })
    }

    pub fn resize_if_needed(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        if width != self.width || height != self.height {
            self.width = width;
            self.height = height;
            self.config.width = width;
            self.config.height = height;
            self.surface.configure(&self.device, &self.config);
            self.depth.recreate(&self.device, width, height);
        }
    }

    pub fn render(&mut self, scene: &FrameScene<'_>) -> Result<(), wgpu::SurfaceError> {
        self.write_globals(scene);

        let mut outlined = false;
        if let Some(obj) = scene.object {
            self.ensure_object_draw(obj);
            if let Some(draw) = &self.object {
                let model = obj.transform.matrix();
                draw.body.write(&self.queue, model, 0.0);
                draw.outline.write(&self.queue, model, OUTLINE_THICKNESS);
            }
            outlined = scene.selection.contains(obj.id);
        }

        let frame = self.surface.get_current_texture()?;
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("encoder"),
            });
        {
            let [r, g, b] = scene.params.clear_color.to_array();
            let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("scene_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color {
                            r: r as f64,
                            g: g as f64,
                            b: b as f64,
                            a: 1.0,
                        }),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.depth.view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                timestamp_writes: None,
                occlusion_query_set: None,
            });

            rpass.set_pipeline(&self.mesh_pipeline);
            rpass.set_bind_group(0, &self.globals_bind_group, &[]);
            for item in &self.statics {
                item.draw(&mut rpass);
            }
            if let Some(draw) = &self.object {
                if scene.object.is_some() {
                    draw.body.draw(&mut rpass);
                    if outlined {
                        rpass.set_pipeline(&self.outline_pipeline);
                        draw.outline.draw(&mut rpass);
                    }
                }
            }
            self.fireflies.draw(&mut rpass, &self.globals_bind_group);
        }

        self.queue.submit(Some(encoder.finish()));
        frame.present();
        Ok(())
    }
}

impl GpuState {
    fn write_globals(&self, scene: &FrameScene<'_>) {
        let l = LIGHT_DIR.normalize();
        let [sr, sg, sb] = scene.params.portal_color_start.to_array();
        let [er, eg, eb] = scene.params.portal_color_end.to_array();
        let g = GlobalUniforms {
            view_proj: scene.camera.view_projection().to_cols_array_2d(),
            light_dir: [l.x, l.y, l.z, 0.0],
            portal_start: [sr, sg, sb, 1.0],
            portal_end: [er, eg, eb, 1.0],
            resolution: [self.width as f32, self.height as f32],
            time: scene.time_sec,
            pixel_ratio: scene.params.pixel_ratio,
            fireflies_size: scene.params.fireflies_size(),
            _pad: [0.0; 3],
        };
        self.queue
            .write_buffer(&self.globals_buffer, 0, bytemuck::bytes_of(&g));
    }

    fn ensure_object_draw(&mut self, obj: &SceneObject) {
        if self.object.is_some() {
            return;
        }
        let device = &self.device;
        let layout = &self.draw_bgl;
        let vertices = diorama::flat_vertices(obj.mesh.triangles());
        log::info!(
            "[gpu] uploading '{}' ({} triangles)",
            obj.name,
            vertices.len() / 3
        );
        let body = DrawItem::new(
            device,
            layout,
            "object",
            &vertices,
            hex(OBJECT_COLOR),
            KIND_BAKED,
        );
        let outline = body.share_geometry(
            device,
            layout,
            "object_outline",
            hex(OUTLINE_COLOR),
            KIND_EMISSIVE,
        );
        self.object = Some(ObjectDraw { body, outline });
    }
}

const OBJECT_COLOR: &str = "#8a6a4a";

fn hex(s: &str) -> [f32; 3] {
    Rgb::from_hex(s).unwrap_or(Rgb::BLACK).to_array()
}

fn build_statics(device: &wgpu::Device, layout: &wgpu::BindGroupLayout) -> Vec<DrawItem> {
    diorama::static_parts()
        .iter()
        .map(|part| {
            let (color, kind) = match part.material {
                MaterialKind::Baked(c) => (hex(c), KIND_BAKED),
                MaterialKind::PoleLight => (hex(POLE_LIGHT_COLOR), KIND_EMISSIVE),
                MaterialKind::PortalLight => ([0.0; 3], KIND_PORTAL),
            };
            DrawItem::new(device, layout, part.name, &part.vertices, color, kind)
        })
        .collect()
}
