//! Render pass and per-frame command encoding helpers.

use crate::depth::DepthBuffer;

/// Deep space clear color.
pub const SPACE_BLACK: wgpu::Color = wgpu::Color {
    r: 0.0,
    g: 0.0,
    b: 0.0,
    a: 1.0,
};

/// Declarative render pass configuration.
///
/// The depth attachment, when present, is cleared to
/// [`DepthBuffer::CLEAR_VALUE`] so reverse-Z testing starts from the far
/// plane.
#[derive(Debug)]
pub struct RenderPassBuilder {
    clear_color: wgpu::Color,
    depth_view: Option<wgpu::TextureView>,
    label: Option<&'static str>,
}

impl Default for RenderPassBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl RenderPassBuilder {
    pub fn new() -> Self {
        Self {
            clear_color: SPACE_BLACK,
            depth_view: None,
            label: None,
        }
    }

    /// Set the clear color for the color attachment.
    pub fn clear_color(mut self, color: wgpu::Color) -> Self {
        self.clear_color = color;
        self
    }

    /// Attach a depth buffer, cleared for reverse-Z.
    pub fn depth(mut self, view: wgpu::TextureView) -> Self {
        self.depth_view = Some(view);
        self
    }

    /// Set a debug label for the render pass.
    pub fn label(mut self, label: &'static str) -> Self {
        self.label = Some(label);
        self
    }

    fn create_render_pass<'encoder>(
        &self,
        encoder: &'encoder mut wgpu::CommandEncoder,
        color_view: &'encoder wgpu::TextureView,
    ) -> wgpu::RenderPass<'encoder> {
        let color_attachment = wgpu::RenderPassColorAttachment {
            view: color_view,
            resolve_target: None,
            ops: wgpu::Operations {
                load: wgpu::LoadOp::Clear(self.clear_color),
                store: wgpu::StoreOp::Store,
            },
            depth_slice: None,
        };

        let depth_stencil_attachment =
            self.depth_view
                .as_ref()
                .map(|view| wgpu::RenderPassDepthStencilAttachment {
                    view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(DepthBuffer::CLEAR_VALUE),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                });

        encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: self.label,
            color_attachments: &[Some(color_attachment)],
            depth_stencil_attachment,
            timestamp_writes: None,
            occlusion_query_set: None,
            multiview_mask: None,
        })
    }
}

/// Per-frame command encoding: create once per frame, record passes, then
/// [`FrameEncoder::finish`] to submit and present.
pub struct FrameEncoder {
    encoder: wgpu::CommandEncoder,
    surface_texture: wgpu::SurfaceTexture,
    surface_view: wgpu::TextureView,
}

impl FrameEncoder {
    pub fn new(device: &wgpu::Device, surface_texture: wgpu::SurfaceTexture) -> Self {
        let encoder = device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("frame-encoder"),
        });
        let surface_view = surface_texture
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        Self {
            encoder,
            surface_texture,
            surface_view,
        }
    }

    /// Begin a render pass targeting the surface texture.
    pub fn begin_render_pass<'a>(
        &'a mut self,
        builder: &'a RenderPassBuilder,
    ) -> wgpu::RenderPass<'a> {
        builder.create_render_pass(&mut self.encoder, &self.surface_view)
    }

    /// Submit the recorded commands and present the frame. Consuming self
    /// prevents double submission.
    pub fn finish(self, queue: &wgpu::Queue) {
        queue.submit([self.encoder.finish()]);
        self.surface_texture.present();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_clear_color_is_space_black() {
        let builder = RenderPassBuilder::new();
        assert_eq!(builder.clear_color.r, 0.0);
        assert_eq!(builder.clear_color.g, 0.0);
        assert_eq!(builder.clear_color.b, 0.0);
        assert_eq!(builder.clear_color.a, 1.0);
    }

    #[test]
    fn test_builder_overrides_clear_color() {
        let builder = RenderPassBuilder::new().clear_color(wgpu::Color::RED);
        assert_eq!(builder.clear_color.r, 1.0);
    }

    #[test]
    fn test_depth_attachment_is_optional() {
        let builder = RenderPassBuilder::new();
        assert!(builder.depth_view.is_none());
    }

    #[test]
    fn test_label_is_stored() {
        let builder = RenderPassBuilder::new().label("scene-pass");
        assert_eq!(builder.label, Some("scene-pass"));
    }
}
