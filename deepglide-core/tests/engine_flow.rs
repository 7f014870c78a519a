use deepglide_core::{
    CameraState, Complex, Fractal, FractalKind, FractalParams, InteractionController,
    IterationResult, Julia, JuliaFf, Mandelbrot, MandelbrotFf, Precision, SierpinskiGasket,
    Viewport, EXTENDED_SPAN_THRESHOLD,
};

/// Evaluate every pixel of a viewport, honoring the coordinate convention
/// the fractal expects, and collect results into a flat Vec.
fn render_grid<F: Fractal>(fractal: &F, viewport: &Viewport) -> Vec<IterationResult> {
    let mut results = Vec::with_capacity((viewport.width * viewport.height) as usize);
    for py in 0..viewport.height {
        for px in 0..viewport.width {
            let p = if fractal.uses_delta_coordinates() {
                viewport.pixel_to_delta(px, py)
            } else {
                viewport.pixel_to_complex(px, py)
            };
            results.push(fractal.iterate(p));
        }
    }
    results
}

#[test]
fn headless_mandelbrot_grid() {
    let mandelbrot = Mandelbrot::new(FractalParams::new(256).unwrap());
    let viewport = Viewport::new(-0.5, 0.0, 2.6, 100, 100).unwrap();

    let results = render_grid(&mandelbrot, &viewport);
    assert_eq!(results.len(), 100 * 100);

    let escaped = results
        .iter()
        .filter(|r| matches!(r, IterationResult::Escaped { .. }))
        .count();
    let interior = results
        .iter()
        .filter(|r| matches!(r, IterationResult::Interior))
        .count();

    assert!(escaped > 0, "should have some escaped points");
    assert!(interior > 0, "should have some interior points");
    assert_eq!(escaped + interior, 10_000);
}

#[test]
fn headless_julia_grid() {
    let julia = Julia::default();
    let viewport = Viewport::new(0.0, 0.0, 3.0, 100, 100).unwrap();

    let results = render_grid(&julia, &viewport);

    let escaped = results
        .iter()
        .filter(|r| matches!(r, IterationResult::Escaped { .. }))
        .count();
    assert!(escaped > 0, "should have some escaped points");
}

#[test]
fn headless_gasket_grid() {
    let gasket = SierpinskiGasket::default();
    let viewport = Viewport::new(0.5, 0.5, 1.5, 64, 64).unwrap();

    let results = render_grid(&gasket, &viewport);
    assert!(
        results
            .iter()
            .all(|r| matches!(r, IterationResult::Trapped { distance } if distance.is_finite())),
        "gasket evaluation is orbit-trap only"
    );
    // The trap field must actually vary across the view.
    let first = results[0].class();
    assert!(results.iter().any(|r| r.class() != first));
}

#[test]
fn headless_render_is_deterministic() {
    let mandelbrot = Mandelbrot::default();
    let viewport = Viewport::new(-0.5, 0.0, 3.0, 80, 60).unwrap();

    let run1 = render_grid(&mandelbrot, &viewport);
    let run2 = render_grid(&mandelbrot, &viewport);

    assert_eq!(
        run1, run2,
        "two identical renders must produce identical results"
    );
}

#[test]
fn precision_paths_agree_in_shared_regime() {
    // Just above the switch threshold, both paths are valid; their
    // classifications must be identical in a region of fast escapes.
    let params = FractalParams::new(128).unwrap();
    let viewport = Viewport::new(1.0, 1.0, 0.09, 32, 24).unwrap();

    let native = Mandelbrot::new(params);
    let extended = MandelbrotFf::new(params, viewport.center_ff());

    let native_classes: Vec<u64> = render_grid(&native, &viewport)
        .iter()
        .map(|r| r.class())
        .collect();
    let extended_classes: Vec<u64> = render_grid(&extended, &viewport)
        .iter()
        .map(|r| r.class())
        .collect();

    assert_eq!(
        native_classes, extended_classes,
        "dual paths must classify identically where f32 is adequate"
    );
}

/// The full per-frame data flow of the engine: gestures mutate the camera
/// target, smoothing advances the current view, the precision selector
/// reads the snapshot, and the matching evaluator renders it.
#[test]
fn deep_zoom_transition_end_to_end() {
    const DT: f64 = 0.016;
    const W: u32 = 96;
    const H: u32 = 64;

    let mut camera = CameraState::default();
    let mut controller = InteractionController::new();
    controller.set_viewport(W, H);

    let pointer = (W as f64 / 2.0, H as f64 / 2.0);
    let mut saw_native = false;
    let mut saw_extended = false;

    for _ in 0..200 {
        controller.scroll(&mut camera, 1.0, pointer);
        camera.advance(DT, H);

        let snapshot = camera.snapshot();
        match Precision::select(snapshot.span, FractalKind::Mandelbrot) {
            Precision::Native => saw_native = true,
            Precision::Extended => saw_extended = true,
        }
    }

    // Let the camera settle on the final target.
    for _ in 0..2000 {
        camera.advance(DT, H);
    }

    let expected_span = 3.0 * 0.92_f64.powi(200);
    let settled = camera.snapshot();
    assert!(
        (settled.span - expected_span).abs() < expected_span * 1e-3,
        "settled span {} should be ≈ {expected_span}",
        settled.span
    );
    assert!(saw_native, "the descent starts in native precision");
    assert!(saw_extended, "the descent must cross into extended precision");
    assert!(settled.span < EXTENDED_SPAN_THRESHOLD);

    // The settled snapshot still renders a valid frame on the extended path.
    let viewport = Viewport::from_view(settled, W, H).unwrap();
    let params = FractalParams::default().scaled_for_span(settled.span, 3.0);
    let fractal = MandelbrotFf::new(params, viewport.center_ff());
    let results = render_grid(&fractal, &viewport);
    assert_eq!(results.len(), (W * H) as usize);
    assert!(results.iter().all(|r| matches!(
        r,
        IterationResult::Escaped { .. } | IterationResult::Interior
    )));
}

#[test]
fn julia_extended_path_renders_deep_view() {
    let viewport = Viewport::new(0.2, -0.1, 1e-5, 48, 32).unwrap();
    let fractal = JuliaFf::new(
        Julia::default_c(),
        FractalParams::new(600).unwrap(),
        viewport.center_ff(),
    );
    let results = render_grid(&fractal, &viewport);
    assert_eq!(results.len(), 48 * 32);

    // Deltas this small must still vary across pixels — otherwise the
    // whole frame collapses into one flat color.
    let p0 = viewport.pixel_to_delta(0, 0);
    let p1 = viewport.pixel_to_delta(1, 0);
    assert_ne!(p0, p1, "adjacent pixel deltas must stay distinguishable");
}

#[test]
fn pan_release_flow_keeps_view_finite() {
    const DT: f64 = 0.016;
    let mut camera = CameraState::default();
    let mut controller = InteractionController::new();
    controller.set_viewport(1024, 768);

    controller.pointer_down(&mut camera, (500.0, 400.0));
    controller.pointer_move(&mut camera, (560.0, 360.0));
    controller.pointer_up(&mut camera);

    for _ in 0..500 {
        camera.advance(DT, 768);
    }
    assert_eq!(camera.velocity, (0.0, 0.0), "momentum must come to rest");
    let v = camera.snapshot();
    assert!(v.center_x.is_finite() && v.center_y.is_finite() && v.span.is_finite());

    // The rested view renders.
    let viewport = Viewport::from_view(v, 64, 48).unwrap();
    let results = render_grid(&Mandelbrot::default(), &viewport);
    assert_eq!(results.len(), 64 * 48);
}

#[test]
fn complex_delta_magnitudes_survive_extreme_span() {
    // At span 1e-9 (far beyond the f32 regime) deltas remain well-formed
    // f32 values and evaluation stays NaN-free.
    let viewport = Viewport::new(-0.743_643_887, 0.131_825_904, 1e-9, 32, 32).unwrap();
    let fractal = MandelbrotFf::new(FractalParams::new(800).unwrap(), viewport.center_ff());
    for py in 0..viewport.height {
        for px in 0..viewport.width {
            let d = viewport.pixel_to_delta(px, py);
            assert!(d.re.is_finite() && d.im.is_finite());
            match fractal.iterate(d) {
                IterationResult::Escaped { norm_sq, .. } => assert!(norm_sq.is_finite()),
                IterationResult::Interior => {}
                IterationResult::Trapped { .. } => panic!("wrong result variant"),
            }
        }
    }
}

#[test]
fn gasket_ignores_precision_switching() {
    // The selector never sends the gasket to the extended path, and the
    // native gasket keeps producing sane traps at tiny spans.
    assert_eq!(
        Precision::select(1e-9, FractalKind::SierpinskiGasket),
        Precision::Native
    );
    let viewport = Viewport::new(0.25, 0.25, 1e-4, 16, 16).unwrap();
    let gasket = SierpinskiGasket::default();
    let results = render_grid(&gasket, &viewport);
    assert!(results
        .iter()
        .all(|r| matches!(r, IterationResult::Trapped { distance } if distance.is_finite())));
}

#[test]
fn c_zero_is_interior_at_any_budget() {
    for budget in [1, 2, 10, 500] {
        let m = Mandelbrot::new(FractalParams::new(budget).unwrap());
        assert_eq!(
            m.iterate(Complex::new(0.0, 0.0)),
            IterationResult::Interior,
            "c = 0 must be interior at max_iterations = {budget}"
        );
    }
}
