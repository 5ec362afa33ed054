use std::io::Cursor;

use super::*;

fn png_file(name: &str, w: u32, h: u32) -> DroppedFile {
    let img = image::RgbaImage::from_pixel(w, h, image::Rgba([10, 20, 30, 255]));
    let mut buf = Vec::new();
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .unwrap();
    DroppedFile::new(name, "image/png", buf)
}

#[test]
fn zero_threads_is_rejected() {
    assert!(ImportQueue::new(Some(0)).is_err());
}

#[test]
fn wait_collects_every_submission() {
    let mut q = ImportQueue::new(Some(2)).unwrap();
    let a = q.submit(png_file("a.png", 3, 2));
    let b = q.submit(DroppedFile::new("broken.png", "image/png", b"nope".to_vec()));
    let c = q.submit(png_file("c.png", 7, 5));
    assert_eq!(q.in_flight(), 3);

    let mut done = q.wait();
    assert_eq!(q.in_flight(), 0);
    done.sort_by_key(|o| o.ticket);

    assert_eq!(
        done.iter().map(|o| o.ticket).collect::<Vec<_>>(),
        vec![a, b, c]
    );
    assert_eq!(done[0].result.as_ref().unwrap().width, 3);
    assert!(matches!(done[1].result, Err(CanvasError::Decode(_))));
    assert_eq!(done[1].name, "broken.png");
    assert_eq!(done[2].result.as_ref().unwrap().height, 5);
}

#[test]
fn poll_never_blocks_and_eventually_drains() {
    let mut q = ImportQueue::new(Some(1)).unwrap();
    assert!(q.poll().is_empty());
    q.submit(png_file("a.png", 1, 1));

    let mut got = Vec::new();
    while got.is_empty() {
        got.extend(q.poll());
        std::thread::yield_now();
    }
    assert_eq!(got.len(), 1);
    assert_eq!(q.in_flight(), 0);
    assert!(q.wait().is_empty());
}

#[test]
fn tickets_are_sequential() {
    let mut q = ImportQueue::new(Some(1)).unwrap();
    assert_eq!(q.submit(png_file("a.png", 1, 1)), ImportTicket(0));
    assert_eq!(q.submit(png_file("b.png", 1, 1)), ImportTicket(1));
    q.wait();
}
