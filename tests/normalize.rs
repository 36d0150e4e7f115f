use std::path::{Path, PathBuf};

use image::{ColorType, DynamicImage, GenericImageView, GrayImage, Luma, Rgb, RgbImage, Rgba, RgbaImage};
use png512::image::{derive_output_path, CANVAS_SIZE};
use png512::{normalize, Config, Normalizer};

#[allow(clippy::cast_possible_truncation)]
fn gradient(width: u32, height: u32) -> DynamicImage {
    DynamicImage::ImageRgb8(RgbImage::from_fn(width, height, |x, y| {
        Rgb([(x % 256) as u8, (y % 256) as u8, 128])
    }))
}

fn write_image(dir: &Path, name: &str, img: &DynamicImage) -> PathBuf {
    let path = dir.join(name);
    img.save(&path).expect("write fixture");
    path
}

fn open_output(input: &Path) -> DynamicImage {
    image::open(derive_output_path(input)).expect("output decodes")
}

#[test]
fn mixed_batch_reports_in_order() {
    let dir = tempfile::tempdir().unwrap();
    let a = write_image(dir.path(), "a.jpg", &gradient(300, 600));
    let b = dir.path().join("b.txt");
    std::fs::write(&b, "hello").unwrap();
    let c = dir.path().join("c.png");
    std::fs::write(&c, [0x13, 0x37, 0xde, 0xad, 0xbe, 0xef]).unwrap();

    let report = normalize(&[&a, &b, &c]);

    assert_eq!(report.processed, 1);
    assert_eq!(report.errors.len(), 2);
    assert_eq!(report.errors[0].to_string(), "b.txt: unsupported format");
    assert_eq!(report.errors[1].label, "c.png");
    assert!(!report.errors[1].message.is_empty());
    assert_ne!(report.errors[1].message, "unsupported format");

    assert_eq!(open_output(&a).dimensions(), (CANVAS_SIZE, CANVAS_SIZE));
    assert!(dir.path().join("a_nuevo.png").exists());
    assert!(!dir.path().join("b_nuevo.png").exists());
    assert!(!dir.path().join("c_nuevo.png").exists());
}

#[test]
fn count_invariant_holds() {
    let dir = tempfile::tempdir().unwrap();
    let good = write_image(dir.path(), "good.png", &gradient(20, 20));
    let missing = dir.path().join("missing.jpeg");
    let other = dir.path().join("clip.mp4");

    let empty: [&Path; 0] = [];
    let report = normalize(&empty);
    assert_eq!(report.processed, 0);
    assert!(report.errors.is_empty());

    let paths = [&good, &missing, &other, &good];
    let report = normalize(&paths);
    assert_eq!(report.total(), paths.len());
    assert_eq!(report.processed, 2);
    assert_eq!(report.errors[0].label, "missing.jpeg");
    assert_eq!(report.errors[1].to_string(), "clip.mp4: unsupported format");
}

#[test]
fn outputs_are_always_canvas_sized() {
    let dir = tempfile::tempdir().unwrap();
    let inputs = [
        write_image(dir.path(), "tall.png", &gradient(100, 500)),
        write_image(dir.path(), "wide.png", &gradient(500, 100)),
        write_image(dir.path(), "square.png", &gradient(300, 300)),
        write_image(dir.path(), "tiny.png", &gradient(3, 7)),
    ];

    let report = normalize(&inputs);
    assert!(report.is_clean());

    for input in &inputs {
        assert_eq!(open_output(input).dimensions(), (512, 512), "{}", input.display());
    }
}

#[test]
fn non_square_source_fills_canvas() {
    let dir = tempfile::tempdir().unwrap();
    let blue = DynamicImage::ImageRgb8(RgbImage::from_pixel(500, 100, Rgb([0, 0, 255])));
    let input = write_image(dir.path(), "banner.png", &blue);

    assert!(normalize(&[&input]).is_clean());

    let output = open_output(&input).to_rgb8();
    for y in [0, 1, 255, 510, 511] {
        for x in [0, 1, 255, 510, 511] {
            let [r, g, b] = output.get_pixel(x, y).0;
            assert!(r < 5 && g < 5 && b > 250, "pixel ({x}, {y}) = {r},{g},{b}");
        }
    }
}

#[test]
fn reprocessing_overwrites_with_identical_bytes() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_image(dir.path(), "photo.jpg", &gradient(640, 480));
    let output = dir.path().join("photo_nuevo.png");
    assert_eq!(derive_output_path(&input), output);

    std::fs::write(&output, b"stale").unwrap();
    let source_before = std::fs::read(&input).unwrap();

    assert!(normalize(&[&input]).is_clean());
    let first = std::fs::read(&output).unwrap();
    assert_ne!(first, b"stale");

    assert!(normalize(&[&input]).is_clean());
    let second = std::fs::read(&output).unwrap();

    assert_eq!(first, second);
    assert_eq!(std::fs::read(&input).unwrap(), source_before);
}

#[test]
fn grayscale_becomes_rgb_and_alpha_survives() {
    let dir = tempfile::tempdir().unwrap();
    let gray = write_image(
        dir.path(),
        "gray.png",
        &DynamicImage::ImageLuma8(GrayImage::from_pixel(64, 48, Luma([90]))),
    );
    let rgba = write_image(
        dir.path(),
        "overlay.png",
        &DynamicImage::ImageRgba8(RgbaImage::from_pixel(48, 64, Rgba([200, 10, 10, 128]))),
    );

    assert!(normalize(&[&gray, &rgba]).is_clean());

    let gray_out = open_output(&gray);
    assert_eq!(gray_out.color(), ColorType::Rgb8);
    let [r, g, b] = gray_out.to_rgb8().get_pixel(256, 256).0;
    assert!(r.abs_diff(90) <= 1 && g.abs_diff(90) <= 1 && b.abs_diff(90) <= 1);

    let rgba_out = open_output(&rgba);
    assert_eq!(rgba_out.color(), ColorType::Rgba8);
    assert!(rgba_out.to_rgba8().pixels().all(|p| p.0[3].abs_diff(128) <= 1));
}

#[test]
fn every_accepted_format_is_converted() {
    let dir = tempfile::tempdir().unwrap();
    let rgb = gradient(120, 80);
    let rgba = DynamicImage::ImageRgba8(rgb.to_rgba8());

    let inputs = [
        write_image(dir.path(), "one.jpg", &rgb),
        write_image(dir.path(), "two.jpeg", &rgb),
        write_image(dir.path(), "three.png", &rgb),
        write_image(dir.path(), "four.gif", &rgba),
        write_image(dir.path(), "five.bmp", &rgb),
        write_image(dir.path(), "six.tiff", &rgb),
        write_image(dir.path(), "seven.webp", &rgb),
    ];

    let report = Normalizer::new(Config { jobs: Some(3) }).unwrap().run(&inputs);
    assert!(report.is_clean(), "{:?}", report.errors);
    assert_eq!(report.processed, inputs.len());

    for input in &inputs {
        assert_eq!(open_output(input).dimensions(), (512, 512));
    }
}

#[test]
fn uppercase_extension_is_accepted() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("SHOUT.PNG");
    let bytes = png512::image::encode_png(&gradient(30, 60)).unwrap();
    std::fs::write(&input, bytes).unwrap();

    assert!(normalize(&[&input]).is_clean());
    assert!(dir.path().join("SHOUT_nuevo.png").exists());
}

#[test]
fn mislabeled_content_is_sniffed() {
    let dir = tempfile::tempdir().unwrap();
    // PNG bytes behind a .jpg name still decode
    let input = dir.path().join("actually_png.jpg");
    std::fs::write(&input, png512::image::encode_png(&gradient(50, 50)).unwrap()).unwrap();

    assert!(normalize(&[&input]).is_clean());
}

#[test]
fn thin_strip_does_not_abort_batch() {
    let dir = tempfile::tempdir().unwrap();
    let strip = write_image(dir.path(), "strip.png", &gradient(1, 30_000));
    let other = dir.path().join("b.txt");

    let report = normalize(&[&strip, &other]);

    assert_eq!(report.total(), 2);
    assert_eq!(report.processed, 1);
    assert_eq!(report.errors[0].to_string(), "b.txt: unsupported format");
    assert_eq!(open_output(&strip).dimensions(), (512, 512));
}

#[test]
fn gif_source_becomes_rgb() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_image(
        dir.path(),
        "anim.gif",
        &DynamicImage::ImageRgba8(gradient(40, 30).to_rgba8()),
    );

    assert!(normalize(&[&input]).is_clean());
    assert_eq!(open_output(&input).color(), ColorType::Rgb8);
}
