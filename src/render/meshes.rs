use glam::Mat4;
use portal_core::diorama::MeshVertex;
use wgpu::util::DeviceExt;

pub(crate) const KIND_BAKED: f32 = 0.0;
pub(crate) const KIND_EMISSIVE: f32 = 1.0;
pub(crate) const KIND_PORTAL: f32 = 2.0;

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub(crate) struct DrawUniforms {
    model: [[f32; 4]; 4],
    color: [f32; 4],
    // x: material kind, y: normal push (outline hull)
    params: [f32; 4],
}

/// One mesh with its own model/colour uniforms.
pub(crate) struct DrawItem {
    vertex_buffer: wgpu::Buffer,
    vertex_count: u32,
    uniform_buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
    color: [f32; 3],
    kind: f32,
}

impl DrawItem {
    pub(crate) fn new(
        device: &wgpu::Device,
        layout: &wgpu::BindGroupLayout,
        label: &str,
        vertices: &[MeshVertex],
        color: [f32; 3],
        kind: f32,
    ) -> Self {
        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(label),
            contents: bytemuck::cast_slice(vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });
        Self::with_vertices(
            device,
            layout,
            label,
            vertex_buffer,
            vertices.len() as u32,
            color,
            kind,
        )
    }

    /// Second draw of the same geometry (e.g. an outline hull).
    pub(crate) fn share_geometry(
        &self,
        device: &wgpu::Device,
        layout: &wgpu::BindGroupLayout,
        label: &str,
        color: [f32; 3],
        kind: f32,
    ) -> Self {
        Self::with_vertices(
            device,
            layout,
            label,
            self.vertex_buffer.clone(),
            self.vertex_count,
            color,
            kind,
        )
    }

    fn with_vertices(
        device: &wgpu::Device,
        layout: &wgpu::BindGroupLayout,
        label: &str,
        vertex_buffer: wgpu::Buffer,
        vertex_count: u32,
        color: [f32; 3],
        kind: f32,
    ) -> Self {
        let uniform_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some(label),
            size: std::mem::size_of::<DrawUniforms>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some(label),
            layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_buffer.as_entire_binding(),
            }],
        });
        Self {
            vertex_buffer,
            vertex_count,
            uniform_buffer,
            bind_group,
            color,
            kind,
        }
    }

    pub(crate) fn write(&self, queue: &wgpu::Queue, model: Mat4, push: f32) {
        let [r, g, b] = self.color;
        let u = DrawUniforms {
            model: model.to_cols_array_2d(),
            color: [r, g, b, 1.0],
            params: [self.kind, push, 0.0, 0.0],
        };
        queue.write_buffer(&self.uniform_buffer, 0, bytemuck::bytes_of(&u));
    }

    pub(crate) fn draw(&self, rpass: &mut wgpu::RenderPass<'_>) {
        rpass.set_bind_group(1, &self.bind_group, &[]);
        rpass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
        rpass.draw(0..self.vertex_count, 0..1);
    }
}
