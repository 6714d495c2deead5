use egui::{Pos2, pos2, vec2};
use tikz_draw::shape::{ArrowShape, BoxShape, LineShape, PathShape, PolyShape, StrokeStyle, TextShape};
use tikz_draw::surface::SurfaceOp;
use tikz_draw::tikz::{self, TikzCommand};
use tikz_draw::{Color, Fill, RecordingSurface, Shape};

fn style(color: &str) -> StrokeStyle {
    StrokeStyle::new(color, 2.0)
}

fn zigzag(n: usize) -> Vec<Pos2> {
    (0..n)
        .map(|i| pos2(50.0 + i as f32 * 20.0, if i % 2 == 0 { 300.0 } else { 320.0 }))
        .collect()
}

// One shape of every kind the editor can produce
fn every_kind() -> Vec<Shape> {
    vec![
        Shape::Freehand(PathShape {
            points: zigzag(5),
            style: style("#000000"),
        }),
        Shape::SmoothFreehand(PathShape {
            points: zigzag(4),
            style: style("#333333"),
        }),
        Shape::Line(LineShape {
            start: pos2(20.0, 20.0),
            end: pos2(200.0, 40.0),
            style: style("#0000ff"),
        }),
        Shape::Arrow(ArrowShape {
            start: pos2(250.0, 250.0),
            end: pos2(400.0, 200.0),
            style: style("#ff0000"),
            head_size: 10.0,
        }),
        Shape::Rectangle(BoxShape {
            start: pos2(10.0, 10.0),
            end: pos2(110.0, 60.0),
            style: style("#ff0000"),
            fill: Fill::Transparent,
        }),
        Shape::Ellipse(BoxShape {
            start: pos2(300.0, 100.0),
            end: pos2(380.0, 160.0),
            style: style("#00aa00"),
            fill: Fill::Solid(Color::parse("#ffff00")),
        }),
        Shape::Polygon(PolyShape {
            points: vec![pos2(150.0, 150.0), pos2(220.0, 150.0), pos2(190.0, 210.0)],
            style: style("#000000"),
            fill: Fill::Solid(Color::parse("#cccccc")),
        }),
        Shape::Bezier(PolyShape {
            points: vec![pos2(60.0, 200.0), pos2(90.0, 160.0), pos2(120.0, 240.0), pos2(150.0, 200.0)],
            style: style("#000000"),
            fill: Fill::Transparent,
        }),
        Shape::Text(TextShape {
            anchor: pos2(400.0, 350.0),
            content: "x^2".into(),
            font_size: 16.0,
            font_family: "Arial".into(),
            color: Color::parse("#123456"),
        }),
    ]
}

#[test]
fn test_decode_recognizes_every_encoded_shape() {
    let shapes = every_kind();
    let source = tikz::encode(&shapes, vec2(500.0, 400.0));
    let commands = tikz::decode(&source);

    assert_eq!(commands.len(), shapes.len());
    assert!(matches!(commands[3], TikzCommand::Arrow { .. }));
    assert!(matches!(commands[4], TikzCommand::Rectangle { .. }));
    assert!(matches!(commands[5], TikzCommand::Ellipse { .. }));
    assert!(matches!(commands[6], TikzCommand::Path { closed: true, .. }));
    assert!(matches!(&commands[8], TikzCommand::Text { content, .. } if content == "x^2"));
}

#[test]
fn test_encode_is_idempotent() {
    let shapes = every_kind();
    let size = vec2(500.0, 400.0);
    assert_eq!(tikz::encode(&shapes, size), tikz::encode(&shapes, size));
}

#[test]
fn test_rectangle_coordinates_are_flipped() {
    let shapes = vec![every_kind().swap_remove(4)];
    let source = tikz::encode(&shapes, vec2(500.0, 400.0));
    assert!(source.contains("\\draw[color={rgb,255:red,255;green,0;blue,0}, line width=2pt]"));

    let commands = tikz::decode(&source);
    let TikzCommand::Rectangle { corner1, corner2, .. } = commands[0] else {
        panic!("expected a rectangle, got {:?}", commands[0]);
    };
    assert!(corner1.x < corner2.x);
    // The top of the canvas rectangle becomes the larger TikZ y.
    assert!(corner1.y < corner2.y);
}

#[test]
fn test_preview_replays_inserted_picture() {
    let shapes = every_kind();
    let picture = tikz::wrap_tikzpicture(&tikz::encode(&shapes, vec2(500.0, 400.0)));
    let document = format!("Some text\n{picture}\nMore text");

    let blocks = tikz::extract_tikz_blocks(&document);
    assert_eq!(blocks.len(), 1);

    let mut surface = RecordingSurface::new(320.0, 220.0);
    let drawn = tikz::render_tikz(&mut surface, blocks[0]);

    assert_eq!(drawn, shapes.len());
    assert_eq!(surface.texts(), vec!["x^2"]);
    assert!(surface.count(|op| matches!(op, SurfaceOp::Ellipse(..))) == 1);
    assert!(surface.fill_count() >= 2);
}

#[test]
fn test_empty_scene_round_trip() {
    let source = tikz::encode(&[], vec2(500.0, 400.0));
    assert!(tikz::decode(&source).is_empty());
}

#[test]
fn test_braced_text_label_round_trips() {
    let shapes = vec![
        every_kind().swap_remove(2),
        Shape::Text(TextShape {
            anchor: pos2(100.0, 100.0),
            content: "$x^{2}$".into(),
            font_size: 16.0,
            font_family: "Arial".into(),
            color: Color::BLACK,
        }),
    ];
    let source = tikz::encode(&shapes, vec2(500.0, 400.0));
    let commands = tikz::decode(&source);

    assert_eq!(commands.len(), 2);
    assert!(matches!(&commands[1], TikzCommand::Text { content, .. } if content == "$x^{2}$"));
}
