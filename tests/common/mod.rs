#![allow(dead_code)]

use leaf_batch::prelude::*;
use std::cell::RefCell;
use std::rc::Rc;

/// everything the batcher sent to its collaborators
#[derive(Default, Debug)]
pub struct Recording {
    pub vertex_uploads: Vec<Vec<Vertex>>,
    pub index_uploads: Vec<Vec<u32>>,
    pub draws: Vec<usize>,
    pub binds: Vec<(String, u32)>,
}

pub type SharedRecording = Rc<RefCell<Recording>>;

struct MockRenderer {
    recording: SharedRecording,
    fail: bool,
}

impl Renderer for MockRenderer {
    fn draw(&mut self, index_count: usize) -> Result<(), RenderError> {
        if self.fail {
            return Err(RenderError::Draw("device lost".to_string()));
        }
        self.recording.borrow_mut().draws.push(index_count);
        Ok(())
    }
}

struct MockVertexBuffer(SharedRecording);

impl GpuBuffer<Vertex> for MockVertexBuffer {
    fn partial_write(&mut self, data: &[Vertex], count: usize) -> Result<(), RenderError> {
        self.0.borrow_mut().vertex_uploads.push(data[..count].to_vec());
        Ok(())
    }
}

struct MockIndexBuffer(SharedRecording);

impl GpuBuffer<u32> for MockIndexBuffer {
    fn partial_write(&mut self, data: &[u32], count: usize) -> Result<(), RenderError> {
        self.0.borrow_mut().index_uploads.push(data[..count].to_vec());
        Ok(())
    }
}

pub struct MockTexture {
    name: String,
    recording: SharedRecording,
}

impl MockTexture {
    pub fn new(name: &str, recording: &SharedRecording) -> Self {
        Self {
            name: name.to_string(),
            recording: Rc::clone(recording),
        }
    }
}

impl Texture for MockTexture {
    fn name(&self) -> &str {
        &self.name
    }

    fn bind(&self, slot: u32) -> Result<(), RenderError> {
        self.recording
            .borrow_mut()
            .binds
            .push((self.name.clone(), slot));
        Ok(())
    }
}

pub const FONT_NAME: &str = "font_atlas";

/// glyph with a box as high as the native size so alignment math stays readable
pub fn glyph(id: u32, character: char, x_advance: f32) -> Glyph {
    Glyph {
        id,
        character,
        x: (id - 64) as f32 * 32.0,
        y: 32.0,
        width: x_advance,
        height: 32.0,
        x_offset: 0.0,
        y_offset: 0.0,
        x_advance,
    }
}

/// a 32px font with 'A' (advance 20), 'B' (advance 18), 'C' (advance 16) and the kerning pair A->B of -4
pub fn test_font(recording: &SharedRecording) -> Font {
    let data = FontData::new(
        FontMetrics {
            size: 32.0,
            atlas_width: 256.0,
            atlas_height: 128.0,
        },
        vec![glyph(65, 'A', 20.0), glyph(66, 'B', 18.0), glyph(67, 'C', 16.0)],
        vec![Kerning {
            first: 65,
            second: 66,
            amount: -4.0,
        }],
    );
    Font::new(Box::new(MockTexture::new(FONT_NAME, recording)), data)
}

fn build(config: BatchConfig, fail_draws: bool) -> (Batcher, SharedRecording) {
    let _ = env_logger::builder().is_test(true).try_init();
    let recording = SharedRecording::default();
    let targets = BatchTargets {
        renderer: Box::new(MockRenderer {
            recording: Rc::clone(&recording),
            fail: fail_draws,
        }),
        vertex_buffer: Box::new(MockVertexBuffer(Rc::clone(&recording))),
        index_buffer: Box::new(MockIndexBuffer(Rc::clone(&recording))),
    };
    let font = Rc::new(test_font(&recording));
    let circle_mask = Rc::new(MockTexture::new(CIRCLE_TEXTURE_NAME, &recording));
    let batcher = Batcher::new(config, targets, font, circle_mask).unwrap();
    (batcher, recording)
}

pub fn batcher(config: BatchConfig) -> (Batcher, SharedRecording) {
    build(config, false)
}

pub fn failing_batcher() -> (Batcher, SharedRecording) {
    build(BatchConfig::default(), true)
}

pub fn positions(vertices: &[Vertex]) -> Vec<(f32, f32)> {
    vertices
        .iter()
        .map(|v| (v.position.x, v.position.y))
        .collect()
}

pub const RED: Vec4 = Vec4::new(1.0, 0.0, 0.0, 1.0);
