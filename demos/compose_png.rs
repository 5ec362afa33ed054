use std::io::Cursor;
use std::path::Path;

use imgboard::{
    Canvas, DroppedFile, Editor, EditorConfig, InputEvent, Key, Modifiers, Point, PointerButton,
};

fn checker_png(w: u32, h: u32, a: [u8; 4], b: [u8; 4]) -> anyhow::Result<Vec<u8>> {
    let img = image::RgbaImage::from_fn(w, h, |x, y| {
        if (x / 8 + y / 8) % 2 == 0 {
            image::Rgba(a)
        } else {
            image::Rgba(b)
        }
    });
    let mut buf = Vec::new();
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)?;
    Ok(buf)
}

fn press(editor: &mut Editor, from: Point, to: Point) {
    editor.handle(&InputEvent::PointerDown {
        pos: from,
        button: PointerButton::Primary,
        modifiers: Modifiers::default(),
    });
    editor.handle(&InputEvent::PointerMove {
        pos: to,
        modifiers: Modifiers::default(),
    });
    editor.handle(&InputEvent::PointerUp { pos: to });
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let mut editor = Editor::new(EditorConfig {
        canvas: Canvas {
            width: 480,
            height: 320,
        },
        background_rgba: [245, 245, 240, 255],
        ..EditorConfig::default()
    })?;

    let logo = r##"<svg xmlns="http://www.w3.org/2000/svg" width="96" height="96">
  <circle cx="48" cy="48" r="44" fill="#ff3366"/>
</svg>"##;

    editor.handle(&InputEvent::FilesDropped(vec![
        DroppedFile::new(
            "tiles.png",
            "image/png",
            checker_png(160, 96, [40, 90, 200, 255], [250, 250, 250, 255])?,
        ),
        DroppedFile::new("logo.svg", "image/svg+xml", logo.as_bytes().to_vec()),
        DroppedFile::new("notes.txt", "text/plain", b"skipped".to_vec()),
    ]));
    let report = editor.wait_imports();
    println!(
        "imported {} image(s), {} failed",
        report.added.len(),
        report.failed.len()
    );

    // The logo was appended last and sits on top at the default placement; move it aside.
    press(&mut editor, Point::new(50.0, 50.0), Point::new(360.0, 200.0));

    // Then move the tiles toward the middle.
    press(&mut editor, Point::new(100.0, 80.0), Point::new(250.0, 130.0));

    // Zoom in a little around the logo, then drop the selection so nothing is highlighted.
    for _ in 0..4 {
        editor.handle(&InputEvent::Wheel {
            pos: Point::new(360.0, 200.0),
            delta_y: 1.0,
            modifiers: Modifiers::default(),
        });
    }
    editor.handle(&InputEvent::KeyDown { key: Key::Escape });

    let artifact = editor.export()?;
    let path = artifact.save_in(&Path::new("target").join("demos"))?;
    println!(
        "wrote {} ({}x{}, {} bytes)",
        path.display(),
        artifact.width,
        artifact.height,
        artifact.bytes.len()
    );
    Ok(())
}
