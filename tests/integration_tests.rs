// Integration tests for laservector: synthesized rasters exercising the
// concrete scenarios from the pipeline's worked examples.
use laservector::{process, Params};

fn white_canvas(w: u32, h: u32) -> Vec<u8> {
    vec![255u8; (w * h * 4) as usize]
}

fn set_pixel(buf: &mut [u8], w: u32, x: u32, y: u32) {
    let idx = (y * w + x) as usize * 4;
    buf[idx] = 0;
    buf[idx + 1] = 0;
    buf[idx + 2] = 0;
    buf[idx + 3] = 255;
}

fn draw_disk(buf: &mut [u8], w: u32, h: u32, cx: i32, cy: i32, r: i32) {
    for y in 0..h as i32 {
        for x in 0..w as i32 {
            let dx = x - cx;
            let dy = y - cy;
            if dx * dx + dy * dy <= r * r {
                set_pixel(buf, w, x as u32, y as u32);
            }
        }
    }
}

fn draw_line(buf: &mut [u8], w: u32, x0: i32, y0: i32, x1: i32, y1: i32) {
    let steps = (x1 - x0).abs().max((y1 - y0).abs()).max(1);
    for i in 0..=steps {
        let x = x0 + (x1 - x0) * i / steps;
        let y = y0 + (y1 - y0) * i / steps;
        set_pixel(buf, w, x as u32, y as u32);
    }
}

#[test]
fn all_white_canvas_yields_no_paths() {
    let buf = white_canvas(100, 100);
    let result = process(&buf, 100, 100, &Params::default()).unwrap();
    assert_eq!(result.stats.total_paths, 0);
    assert!(result.cut.contains("<svg"));
    assert!(result.engrave.contains("<svg"));
}

#[test]
fn single_black_pixel_is_noise_and_produces_nothing() {
    let mut buf = white_canvas(100, 100);
    set_pixel(&mut buf, 100, 50, 50);
    let result = process(&buf, 100, 100, &Params::default()).unwrap();
    assert_eq!(result.stats.total_paths, 0);
}

#[test]
fn filled_disk_becomes_one_closed_cut_outline() {
    let w = 100;
    let h = 100;
    let mut buf = white_canvas(w, h);
    draw_disk(&mut buf, w, h, 50, 50, 20);

    let result = process(&buf, w, h, &Params::default()).unwrap();
    assert!(result.stats.outline_count >= 1);
    assert_eq!(result.stats.centerline_count, 0);
    assert!(result.cut.matches("<polyline").count() >= 1);
    assert!(result.engrave.matches("polyline").count() == 0);
}

/// Pull the `(x,y)` vertex list out of every `<polyline d="...">` in an
/// emitted document, in document order.
fn parse_polylines(svg: &str) -> Vec<Vec<(f64, f64)>> {
    svg.split("d=\"")
        .skip(1)
        .map(|seg| {
            let d = seg.split('"').next().unwrap();
            d.split_whitespace()
                .filter(|tok| *tok != "M" && *tok != "L" && *tok != "Z")
                .filter_map(|tok| {
                    let (xs, ys) = tok.split_once(',')?;
                    Some((xs.parse::<f64>().ok()?, ys.parse::<f64>().ok()?))
                })
                .collect()
        })
        .collect()
}

fn dist(a: (f64, f64), b: (f64, f64)) -> f64 {
    ((a.0 - b.0).powi(2) + (a.1 - b.1).powi(2)).sqrt()
}

fn point_to_segment_dist(p: (f64, f64), a: (f64, f64), b: (f64, f64)) -> f64 {
    let (dx, dy) = (b.0 - a.0, b.1 - a.1);
    let len2 = dx * dx + dy * dy;
    if len2 == 0.0 {
        return dist(p, a);
    }
    let t = (((p.0 - a.0) * dx + (p.1 - a.1) * dy) / len2).clamp(0.0, 1.0);
    dist(p, (a.0 + t * dx, a.1 + t * dy))
}

fn min_dist_to_polylines(p: (f64, f64), polylines: &[Vec<(f64, f64)>]) -> f64 {
    polylines
        .iter()
        .flat_map(|pl| pl.windows(2))
        .map(|w| point_to_segment_dist(p, w[0], w[1]))
        .fold(f64::INFINITY, f64::min)
}

#[test]
fn thin_line_segment_becomes_an_engrave_centerline() {
    let w = 100;
    let h = 100;
    let mut buf = white_canvas(w, h);
    draw_line(&mut buf, w, 10, 50, 90, 50);

    let params = Params {
        detail_level: 100,
        centerline_sensitivity: 0,
    };
    let result = process(&buf, w, h, &params).unwrap();

    let polylines = parse_polylines(&result.engrave);
    assert!(
        !polylines.is_empty(),
        "expected at least one centerline polyline in the engrave layer"
    );

    let near = |p: (f64, f64), target: (f64, f64)| dist(p, target) < 2.0;
    let matching = polylines.iter().find(|pl| {
        let first = *pl.first().unwrap();
        let last = *pl.last().unwrap();
        (near(first, (10.0, 50.0)) && near(last, (90.0, 50.0)))
            || (near(first, (90.0, 50.0)) && near(last, (10.0, 50.0)))
    });
    let matching = matching
        .unwrap_or_else(|| panic!("no centerline endpoints land near (10,50) and (90,50): {polylines:?}"));
    assert!(
        matching.len() <= 10,
        "expected <=10 vertices after RDP, got {}",
        matching.len()
    );
}

#[test]
fn plus_sign_centerlines_cover_every_source_pixel_within_one_pixel() {
    let w = 100;
    let h = 100;
    let mut buf = white_canvas(w, h);
    draw_line(&mut buf, w, 50, 10, 50, 90);
    draw_line(&mut buf, w, 10, 50, 90, 50);

    let params = Params {
        detail_level: 100,
        centerline_sensitivity: 50,
    };
    let result = process(&buf, w, h, &params).unwrap();

    assert!(
        (2..=4).contains(&result.stats.centerline_count),
        "expected 2-4 centerline polylines, got {}",
        result.stats.centerline_count
    );

    let polylines = parse_polylines(&result.engrave);
    assert_eq!(polylines.len(), result.stats.centerline_count);

    let mut pixels: Vec<(f64, f64)> = (10..=90).map(|y| (50.0, y as f64)).collect();
    pixels.extend((10..=90).map(|x| (x as f64, 50.0)));

    for p in pixels {
        let d = min_dist_to_polylines(p, &polylines);
        assert!(d <= 1.0, "pixel {p:?} is {d:.2}px from the nearest centerline");
    }
}

#[test]
fn stats_json_round_trips_through_serde() {
    let w = 60;
    let h = 60;
    let mut buf = white_canvas(w, h);
    draw_disk(&mut buf, w, h, 30, 30, 15);

    let result = process(&buf, w, h, &Params::default()).unwrap();
    let json = serde_json::to_string(&result.stats).unwrap();
    let back: laservector::Stats = serde_json::from_str(&json).unwrap();
    assert_eq!(back.total_paths, result.stats.total_paths);
}

#[test]
fn detail_level_zero_still_yields_the_silhouette_layer() {
    let w = 100;
    let h = 100;
    let mut buf = white_canvas(w, h);
    draw_disk(&mut buf, w, h, 50, 50, 20);

    let params = Params {
        detail_level: 0,
        centerline_sensitivity: 50,
    };
    let result = process(&buf, w, h, &params).unwrap();
    assert!(result.stats.total_paths >= 1);
    assert_eq!(result.stats.centerline_count, 0);
}
