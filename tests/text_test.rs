mod common;

use approx::assert_relative_eq;
use common::*;
use leaf_batch::prelude::*;

fn tex_indices(vertices: &[Vertex]) -> Vec<f32> {
    vertices.iter().map(|v| v.tex_index).collect()
}

#[test]
fn kerning_moves_the_second_glyph() {
    let (mut batcher, recording) = batcher(BatchConfig::default());
    let pos = vec2(100.0, 50.0);
    batcher.begin();
    batcher
        .draw_colored_text("AB", pos, 16.0, TextAlign::default(), RED)
        .unwrap();
    let vertices = batcher.pending_vertices().to_vec();
    batcher.end().unwrap();

    assert_eq!(vertices.len(), 8);
    assert_eq!(
        positions(&vertices[..4]),
        vec![(100.0, 50.0), (110.0, 50.0), (110.0, 66.0), (100.0, 66.0)]
    );
    // advance of 'A' plus the A->B kerning, both scaled by 16 / 32
    assert_relative_eq!(vertices[4].position.x, pos.x + 20.0 * 0.5 - 4.0 * 0.5);
    assert_relative_eq!(vertices[5].position.x, 108.0 + 18.0 * 0.5);

    let width = batcher.font().data.measure("AB", 16.0).0;
    assert_relative_eq!(width, (20.0 - 4.0 + 18.0) * 0.5);

    let recording = recording.borrow();
    assert_eq!(recording.draws, vec![12]);
    assert_eq!(recording.binds, vec![(FONT_NAME.to_string(), 1)]);
}

#[test]
fn glyph_vertex_attributes() {
    let (mut batcher, _recording) = batcher(BatchConfig::default());
    batcher.begin();
    batcher
        .draw_colored_text("A", vec2(0.0, 0.0), 16.0, TextAlign::default(), RED)
        .unwrap();
    let vertices = batcher.pending_vertices();
    let uvs: Vec<(f32, f32)> = vertices
        .iter()
        .map(|v| (v.uv_coords.x, v.uv_coords.y))
        .collect();
    assert_eq!(
        uvs,
        vec![(0.125, 0.25), (0.203125, 0.25), (0.203125, 0.5), (0.125, 0.5)]
    );
    assert!(vertices
        .iter()
        .all(|v| v.scale == 0.5 && v.tex_index == 1.0 && v.color == RED));
    assert_eq!(batcher.pending_indices(), &[0, 1, 2, 2, 3, 0]);
}

#[test]
fn center_alignment_centers_the_block() {
    let (mut batcher, _recording) = batcher(BatchConfig::default());
    let pos = vec2(200.0, 100.0);
    let align: TextAlign = "center-center".parse().unwrap();
    batcher.begin();
    batcher.draw_colored_text("ABC", pos, 32.0, align, RED).unwrap();

    let vertices = batcher.pending_vertices();
    let min_x = vertices.iter().map(|v| v.position.x).fold(f32::MAX, f32::min);
    let max_x = vertices.iter().map(|v| v.position.x).fold(f32::MIN, f32::max);
    let min_y = vertices.iter().map(|v| v.position.y).fold(f32::MAX, f32::min);
    let max_y = vertices.iter().map(|v| v.position.y).fold(f32::MIN, f32::max);
    assert_relative_eq!(min_x, 175.0);
    assert_relative_eq!(max_x, 225.0);
    assert_relative_eq!((min_x + max_x) / 2.0, pos.x);
    assert_relative_eq!((min_y + max_y) / 2.0, pos.y);
}

#[test]
fn end_alignment() {
    let (mut batcher, _recording) = batcher(BatchConfig::default());
    let align = TextAlign::new(Align::End, Align::End);
    batcher.begin();
    batcher
        .draw_colored_text("A", vec2(0.0, 0.0), 32.0, align, RED)
        .unwrap();
    assert_eq!(
        positions(batcher.pending_vertices()),
        vec![(-20.0, -32.0), (0.0, -32.0), (0.0, 0.0), (-20.0, 0.0)]
    );
}

#[test]
fn flush_inside_text_rebinds_the_atlas() {
    let config = BatchConfig::default().with_max_vertex_count(10);
    let (mut batcher, recording) = batcher(config);
    let grass = MockTexture::new("grass", &recording);
    batcher.begin();
    batcher
        .draw_textured_rect(vec2(0.0, 0.0), vec2(1.0, 1.0), &grass)
        .unwrap();
    batcher
        .draw_colored_text("AB", vec2(0.0, 0.0), 32.0, TextAlign::default(), RED)
        .unwrap();
    batcher.end().unwrap();

    let recording = recording.borrow();
    assert_eq!(recording.draws, vec![12, 6]);
    assert_eq!(
        tex_indices(&recording.vertex_uploads[0]),
        vec![1.0, 1.0, 1.0, 1.0, 2.0, 2.0, 2.0, 2.0]
    );
    assert_eq!(tex_indices(&recording.vertex_uploads[1]), vec![1.0; 4]);
    assert_eq!(
        recording.binds,
        vec![
            ("grass".to_string(), 1),
            (FONT_NAME.to_string(), 2),
            (FONT_NAME.to_string(), 1)
        ]
    );
}

#[test]
fn long_text_spans_several_batches() {
    let config = BatchConfig::default().with_max_vertex_count(10);
    let (mut batcher, recording) = batcher(config);
    batcher.begin();
    batcher
        .draw_colored_text("ABCA", vec2(0.0, 0.0), 32.0, TextAlign::default(), RED)
        .unwrap();
    batcher.end().unwrap();

    let recording = recording.borrow();
    assert_eq!(recording.draws, vec![12, 12]);
    // the pen keeps advancing across the flush
    assert_relative_eq!(recording.vertex_uploads[1][0].position.x, 20.0 - 4.0 + 18.0);
    assert_eq!(recording.binds.len(), 2);
}

#[test]
fn missing_glyphs_are_skipped() {
    let (mut batcher, _recording) = batcher(BatchConfig::default());
    batcher.begin();
    batcher
        .draw_colored_text("A?C", vec2(0.0, 0.0), 32.0, TextAlign::default(), RED)
        .unwrap();
    assert_eq!(batcher.vertex_count(), 8);
    assert_relative_eq!(batcher.pending_vertices()[4].position.x, 20.0);
}

#[test]
fn empty_text_draws_nothing() {
    let (mut batcher, recording) = batcher(BatchConfig::default());
    batcher.begin();
    batcher
        .draw_colored_text("", vec2(0.0, 0.0), DEFAULT_TEXT_SIZE, TextAlign::default(), RED)
        .unwrap();
    assert_eq!(batcher.state(), BatchState::Empty);
    batcher.end().unwrap();
    let recording = recording.borrow();
    assert!(recording.draws.is_empty());
    assert_eq!(recording.binds.len(), 1);
}

#[test]
fn text_and_images_share_a_batch() {
    let (mut batcher, recording) = batcher(BatchConfig::default());
    let grass = MockTexture::new("grass", &recording);
    let align: TextAlign = "start-start".parse().unwrap();
    batcher.begin();
    batcher
        .draw_colored_text("A", vec2(0.0, 0.0), DEFAULT_TEXT_SIZE, align, RED)
        .unwrap();
    batcher
        .draw_textured_rect(vec2(0.0, 0.0), vec2(8.0, 8.0), &grass)
        .unwrap();
    batcher
        .draw_colored_ellipse(vec2(0.0, 0.0), vec2(8.0, 8.0), RED)
        .unwrap();
    batcher
        .draw_colored_text("B", vec2(0.0, 0.0), DEFAULT_TEXT_SIZE, align, RED)
        .unwrap();
    assert_relative_eq!(batcher.pending_vertices()[0].scale, 12.0 / 32.0);
    assert_eq!(
        tex_indices(batcher.pending_vertices()),
        [1.0, 2.0, 3.0, 1.0]
            .iter()
            .flat_map(|&slot| [slot; 4])
            .collect::<Vec<f32>>()
    );
    batcher.end().unwrap();

    let recording = recording.borrow();
    assert_eq!(recording.draws, vec![24]);
    assert_eq!(recording.binds.len(), 3);
}
